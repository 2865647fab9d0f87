// ============================================================================
// INICIO VIEW - Pantalla de bienvenida por rol
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

use crate::dom::{append_child, ElementBuilder};
use crate::services::{auth_service, doctores_service};
use crate::state::{AppState, NavigationTree};

pub fn render_inicio(state: &AppState) -> Result<Element, JsValue> {
    let pantalla = ElementBuilder::new("div")?.class("screen inicio-screen").build();
    let info = auth_service::get_user_info().unwrap_or_default();
    let arbol = state.router.arbol();

    let saludo = ElementBuilder::new("h2")?
        .class("screen-title")
        .text(&format!("Hola, {}", info.nombre_visible()))
        .build();
    append_child(&pantalla, &saludo)?;

    let descripcion = match arbol {
        NavigationTree::Admin => "Administra usuarios, doctores, pacientes y citas de la EPS.",
        NavigationTree::Doctor => "Consulta tus citas, horarios y consultorio asignado.",
        _ => "Solicita y consulta tus citas médicas.",
    };
    let texto = ElementBuilder::new("p")?
        .class("hint-text")
        .text(descripcion)
        .build();
    append_child(&pantalla, &texto)?;

    // El doctor ve su consultorio asignado en el inicio
    if arbol == NavigationTree::Doctor {
        if state.marcar_cargada("Inicio") {
            let state = state.clone();
            spawn_local(async move {
                match doctores_service::get_mi_consultorio().await {
                    Ok(consultorio) => *state.mi_consultorio.borrow_mut() = consultorio,
                    Err(e) => log::warn!("⚠️ No se pudo cargar mi consultorio: {}", e),
                }
                state.notificar_cambio();
            });
        }

        let tarjeta = ElementBuilder::new("div")?.class("consultorio-card").build();
        let titulo = ElementBuilder::new("h3")?.text("Mi Consultorio").build();
        append_child(&tarjeta, &titulo)?;

        let detalle = match state.mi_consultorio.borrow().as_ref() {
            Some(consultorio) => consultorio.etiqueta(),
            None => "Sin consultorio asignado".to_string(),
        };
        let detalle_el = ElementBuilder::new("p")?.text(&detalle).build();
        append_child(&tarjeta, &detalle_el)?;
        append_child(&pantalla, &tarjeta)?;
    }

    Ok(pantalla)
}
