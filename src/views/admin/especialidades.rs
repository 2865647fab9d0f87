// ============================================================================
// ESPECIALIDADES (ADMIN) - CRUD
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

use crate::dom::{alert, append_child, confirm, ElementBuilder};
use crate::services::especialidades_service::{self, EspecialidadPayload};
use crate::state::AppState;
use crate::views::componentes::{
    campo_texto, render_boton, render_empty_state, render_header, render_modal, valor_de_campo,
};

pub fn render_especialidades(state: &AppState) -> Result<Element, JsValue> {
    if state.marcar_cargada("Especialidades") {
        let state = state.clone();
        spawn_local(async move {
            match especialidades_service::get_especialidades().await {
                Ok(lista) => *state.especialidades.borrow_mut() = lista,
                Err(e) => log::error!("❌ Error al obtener especialidades: {}", e),
            }
            state.notificar_cambio();
        });
    }

    let pantalla = ElementBuilder::new("div")?.class("screen crud-screen").build();

    let state_nuevo = state.clone();
    let header = render_header(
        "Especialidades",
        Some(("Nueva", move |_| {
            *state_nuevo.editando_id.borrow_mut() = None;
            *state_nuevo.form_visible.borrow_mut() = true;
            state_nuevo.notificar_cambio();
        })),
    )?;
    append_child(&pantalla, &header)?;

    let especialidades = state.especialidades.borrow();
    if especialidades.is_empty() {
        let vacio = render_empty_state("Sin especialidades", "Registra la primera especialidad")?;
        append_child(&pantalla, &vacio)?;
    } else {
        let lista = ElementBuilder::new("div")?.class("crud-list").build();
        for item in especialidades.iter() {
            let card = ElementBuilder::new("div")?.class("crud-card").build();

            let nombre = ElementBuilder::new("div")?
                .class("crud-card-title")
                .text(&item.especialidad)
                .build();
            append_child(&card, &nombre)?;

            if let Some(descripcion) = &item.descripcion {
                let desc = ElementBuilder::new("div")?
                    .class("crud-card-subtitle")
                    .text(descripcion)
                    .build();
                append_child(&card, &desc)?;
            }

            append_child(&card, &acciones_card(state, item.id)?)?;
            append_child(&lista, &card)?;
        }
        append_child(&pantalla, &lista)?;
    }
    drop(especialidades);

    if *state.form_visible.borrow() {
        append_child(&pantalla, &render_form(state)?)?;
    }

    Ok(pantalla)
}

fn acciones_card(state: &AppState, id: u32) -> Result<Element, JsValue> {
    let acciones = ElementBuilder::new("div")?.class("card-acciones").build();
    {
        let state = state.clone();
        let editar = render_boton("Editar", "btn btn-secondary", move |_| {
            *state.editando_id.borrow_mut() = Some(id);
            *state.form_visible.borrow_mut() = true;
            state.notificar_cambio();
        })?;
        append_child(&acciones, &editar)?;
    }
    {
        let state = state.clone();
        let borrar = render_boton("Eliminar", "btn btn-danger", move |_| {
            if !confirm("¿Eliminar esta especialidad?") {
                return;
            }
            let state = state.clone();
            spawn_local(async move {
                match especialidades_service::delete_especialidad(id).await {
                    Ok(_) => recargar(&state),
                    Err(e) => alert(&format!(
                        "Error: {}",
                        e.mensaje_usuario("No se pudo eliminar la especialidad")
                    )),
                }
            });
        })?;
        append_child(&acciones, &borrar)?;
    }
    Ok(acciones)
}

fn recargar(state: &AppState) {
    state.invalidar_carga("Especialidades");
    *state.form_visible.borrow_mut() = false;
    *state.editando_id.borrow_mut() = None;
    state.notificar_cambio();
}

fn render_form(state: &AppState) -> Result<Element, JsValue> {
    let editando = *state.editando_id.borrow();
    let actual = editando.and_then(|id| {
        state
            .especialidades
            .borrow()
            .iter()
            .find(|e| e.id == id)
            .cloned()
    });

    let form = ElementBuilder::new("div")?.class("crud-form").build();
    append_child(
        &form,
        &campo_texto(
            "esp-nombre",
            "Especialidad",
            "text",
            actual.as_ref().map(|e| e.especialidad.as_str()).unwrap_or(""),
        )?,
    )?;
    append_child(
        &form,
        &campo_texto(
            "esp-descripcion",
            "Descripción",
            "text",
            actual
                .as_ref()
                .and_then(|e| e.descripcion.as_deref())
                .unwrap_or(""),
        )?,
    )?;

    let acciones = ElementBuilder::new("div")?.class("modal-actions").build();
    {
        let state = state.clone();
        let cancelar = render_boton("Cancelar", "btn btn-secondary", move |_| {
            *state.form_visible.borrow_mut() = false;
            *state.editando_id.borrow_mut() = None;
            state.notificar_cambio();
        })?;
        append_child(&acciones, &cancelar)?;
    }
    {
        let state = state.clone();
        let guardar = render_boton("Guardar", "btn btn-primary", move |_| {
            let nombre = valor_de_campo("esp-nombre");
            if nombre.trim().is_empty() {
                alert("El nombre de la especialidad es obligatorio");
                return;
            }

            let datos = EspecialidadPayload {
                especialidad: nombre.trim().to_string(),
                descripcion: valor_de_campo("esp-descripcion").trim().to_string(),
            };

            let state = state.clone();
            let editando = *state.editando_id.borrow();
            spawn_local(async move {
                let resultado = match editando {
                    Some(id) => especialidades_service::update_especialidad(id, &datos).await,
                    None => especialidades_service::create_especialidad(&datos).await,
                };
                match resultado {
                    Ok(_) => {
                        alert("✅ Especialidad guardada");
                        recargar(&state);
                    }
                    Err(e) => alert(&format!(
                        "Error: {}",
                        e.mensaje_usuario("No se pudo guardar la especialidad")
                    )),
                }
            });
        })?;
        append_child(&acciones, &guardar)?;
    }
    append_child(&form, &acciones)?;

    let titulo = if editando.is_some() {
        "Editar Especialidad"
    } else {
        "Nueva Especialidad"
    };
    render_modal(titulo, form)
}
