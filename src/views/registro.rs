// ============================================================================
// REGISTRO VIEW - Alta de usuario
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

use crate::dom::{alert, append_child, on_click, ElementBuilder};
use crate::services::auth_service;
use crate::state::AppState;
use crate::views::componentes::{campo_select, campo_texto, valor_de_campo};

pub fn render_registro(state: &AppState) -> Result<Element, JsValue> {
    let pantalla = ElementBuilder::new("div")?.class("auth-screen").build();
    let contenedor = ElementBuilder::new("div")?.class("auth-container").build();

    let titulo = ElementBuilder::new("h1")?.text("Crear cuenta").build();
    append_child(&contenedor, &titulo)?;

    let form = ElementBuilder::new("div")?.class("auth-form").build();
    append_child(&form, &campo_texto("reg-name", "Nombre completo", "text", "")?)?;
    append_child(
        &form,
        &campo_texto("reg-email", "Correo electrónico", "email", "")?,
    )?;
    append_child(
        &form,
        &campo_texto("reg-password", "Contraseña", "password", "")?,
    )?;

    let roles = [
        ("paciente".to_string(), "Paciente".to_string()),
        ("doctor".to_string(), "Doctor".to_string()),
    ];
    append_child(
        &form,
        &campo_select("reg-rol", "Tipo de cuenta", &roles, Some("paciente"))?,
    )?;

    let boton = ElementBuilder::new("button")?
        .class("btn btn-primary btn-block")
        .text("Registrarse")
        .build();
    {
        let state_exito = state.clone();
        on_click(&boton, move |_| {
            let name = valor_de_campo("reg-name");
            let email = valor_de_campo("reg-email");
            let password = valor_de_campo("reg-password");
            let rol = valor_de_campo("reg-rol");

            if name.trim().is_empty() || email.trim().is_empty() || password.is_empty() {
                alert("Por favor completa todos los campos");
                return;
            }

            let state = state_exito.clone();
            spawn_local(async move {
                match auth_service::register_user(
                    name.trim(),
                    email.trim(),
                    &password,
                    &rol,
                )
                .await
                {
                    Ok(mensaje) => {
                        alert(&format!("✅ {}", mensaje));
                        *state.mostrar_registro.borrow_mut() = false;
                        state.notificar_cambio();
                    }
                    Err(e) => {
                        alert(&format!(
                            "Error: {}",
                            e.mensaje_usuario("No se pudo completar el registro")
                        ));
                    }
                }
            });
        })?;
    }
    append_child(&form, &boton)?;

    let volver = ElementBuilder::new("button")?
        .class("btn btn-link")
        .text("Volver al inicio de sesión")
        .build();
    {
        let state = state.clone();
        on_click(&volver, move |_| {
            *state.mostrar_registro.borrow_mut() = false;
            state.notificar_cambio();
        })?;
    }
    append_child(&form, &volver)?;

    append_child(&contenedor, &form)?;
    append_child(&pantalla, &contenedor)?;
    Ok(pantalla)
}
