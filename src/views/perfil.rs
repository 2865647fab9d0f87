// ============================================================================
// PERFIL VIEW - Datos del usuario autenticado y cierre de sesión
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

use crate::dom::{alert, append_child, confirm, ElementBuilder};
use crate::services::auth_service::{self, ActualizarPerfil};
use crate::state::AppState;
use crate::views::componentes::{campo_texto, render_boton, render_header, valor_de_campo};

pub fn render_perfil(state: &AppState) -> Result<Element, JsValue> {
    let pantalla = ElementBuilder::new("div")?.class("screen perfil-screen").build();

    let header = render_header::<fn(web_sys::MouseEvent)>("Perfil", None)?;
    append_child(&pantalla, &header)?;

    let info = auth_service::get_user_info().unwrap_or_default();

    // Tarjeta resumen
    let tarjeta = ElementBuilder::new("div")?.class("perfil-card").build();
    let nombre = ElementBuilder::new("h3")?.text(&info.nombre_visible()).build();
    append_child(&tarjeta, &nombre)?;
    if let Some(email) = &info.email {
        let email_el = ElementBuilder::new("p")?.text(email).build();
        append_child(&tarjeta, &email_el)?;
    }
    if let Some(rol) = &info.role {
        let rol_el = ElementBuilder::new("p")?
            .class("perfil-rol")
            .text(&format!("Rol: {}", rol))
            .build();
        append_child(&tarjeta, &rol_el)?;
    }
    append_child(&pantalla, &tarjeta)?;

    // Formulario de edición
    let form = ElementBuilder::new("div")?.class("perfil-form").build();
    append_child(
        &form,
        &campo_texto(
            "perfil-name",
            "Nombre",
            "text",
            info.name.as_deref().unwrap_or(""),
        )?,
    )?;
    append_child(
        &form,
        &campo_texto(
            "perfil-email",
            "Correo electrónico",
            "email",
            info.email.as_deref().unwrap_or(""),
        )?,
    )?;
    append_child(
        &form,
        &campo_texto(
            "perfil-telefono",
            "Teléfono",
            "tel",
            info.telefono.as_deref().unwrap_or(""),
        )?,
    )?;

    {
        let state = state.clone();
        let guardar = render_boton("Guardar cambios", "btn btn-primary", move |_| {
            let name = valor_de_campo("perfil-name");
            let email = valor_de_campo("perfil-email");
            let telefono = valor_de_campo("perfil-telefono");

            if name.trim().is_empty() || email.trim().is_empty() {
                alert("Nombre y correo son obligatorios");
                return;
            }

            let datos = ActualizarPerfil {
                name: Some(name.trim().to_string()),
                email: Some(email.trim().to_string()),
                telefono: if telefono.trim().is_empty() {
                    None
                } else {
                    Some(telefono.trim().to_string())
                },
                ..ActualizarPerfil::default()
            };

            let state = state.clone();
            spawn_local(async move {
                match auth_service::update_user_profile(&datos).await {
                    Ok(_) => {
                        alert("✅ Perfil actualizado correctamente");
                        state.notificar_cambio();
                    }
                    Err(e) => alert(&format!(
                        "Error: {}",
                        e.mensaje_usuario("No se pudo actualizar el perfil")
                    )),
                }
            });
        })?;
        append_child(&form, &guardar)?;
    }
    append_child(&pantalla, &form)?;

    // Cierre de sesión: el router observa el token ausente y vuelve a Auth
    let salir = render_boton("Cerrar Sesión", "btn btn-danger btn-block", move |_| {
        if !confirm("¿Cerrar la sesión actual?") {
            return;
        }
        spawn_local(async move {
            if let Err(e) = auth_service::logout().await {
                log::warn!("⚠️ Error al cerrar sesión: {}", e);
            }
        });
    })?;
    append_child(&pantalla, &salir)?;

    Ok(pantalla)
}
