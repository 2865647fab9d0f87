// ============================================================================
// LOGIN VIEW
// ============================================================================
// El formulario no navega: tras un login exitoso el AuthService emite
// tokenUpdated y el router monta el árbol del rol en su refresco.
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

use crate::dom::{alert, append_child, on_click, ElementBuilder};
use crate::services::auth_service;
use crate::state::AppState;
use crate::views::componentes::{campo_texto, valor_de_campo};

pub fn render_login(state: &AppState) -> Result<Element, JsValue> {
    let pantalla = ElementBuilder::new("div")?.class("auth-screen").build();
    let contenedor = ElementBuilder::new("div")?.class("auth-container").build();

    // Cabecera
    let header = ElementBuilder::new("div")?.class("auth-header").build();
    let logo = ElementBuilder::new("div")?.class("auth-logo").text("🏥").build();
    let titulo = ElementBuilder::new("h1")?.text("CitaSalud").build();
    let subtitulo = ElementBuilder::new("p")?
        .text("Gestión de citas médicas")
        .build();
    append_child(&header, &logo)?;
    append_child(&header, &titulo)?;
    append_child(&header, &subtitulo)?;
    append_child(&contenedor, &header)?;

    // Formulario
    let form = ElementBuilder::new("div")?.class("auth-form").build();
    append_child(
        &form,
        &campo_texto("login-email", "Correo electrónico", "email", "")?,
    )?;
    append_child(
        &form,
        &campo_texto("login-password", "Contraseña", "password", "")?,
    )?;

    let boton = ElementBuilder::new("button")?
        .class("btn btn-primary btn-block")
        .text("Iniciar Sesión")
        .build();
    on_click(&boton, move |_| {
        let email = valor_de_campo("login-email");
        let password = valor_de_campo("login-password");

        if email.trim().is_empty() || password.is_empty() {
            alert("Por favor ingresa correo y contraseña");
            return;
        }

        spawn_local(async move {
            match auth_service::login_user(email.trim(), &password).await {
                Ok(info) => {
                    log::info!("✅ Sesión iniciada: {}", info.nombre_visible());
                    // el router detecta el token nuevo vía tokenUpdated
                }
                Err(e) => {
                    alert(&format!(
                        "Error: {}",
                        e.mensaje_usuario("No se pudo iniciar sesión")
                    ));
                }
            }
        });
    })?;
    append_child(&form, &boton)?;

    // Enlace a registro
    let enlace = ElementBuilder::new("button")?
        .class("btn btn-link")
        .text("¿No tienes cuenta? Regístrate")
        .build();
    {
        let state = state.clone();
        on_click(&enlace, move |_| {
            *state.mostrar_registro.borrow_mut() = true;
            state.notificar_cambio();
        })?;
    }
    append_child(&form, &enlace)?;

    append_child(&contenedor, &form)?;
    append_child(&pantalla, &contenedor)?;
    Ok(pantalla)
}
