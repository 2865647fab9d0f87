// ============================================================================
// CONSULTORIOS (ADMIN) - CRUD
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

use crate::dom::{alert, append_child, confirm, ElementBuilder};
use crate::services::consultorios_service::{self, ConsultorioPayload};
use crate::state::AppState;
use crate::views::componentes::{
    campo_select, campo_texto, render_boton, render_empty_state, render_header, render_modal,
    valor_de_campo,
};

pub fn render_consultorios(state: &AppState) -> Result<Element, JsValue> {
    if state.marcar_cargada("Consultorios") {
        let state = state.clone();
        spawn_local(async move {
            match consultorios_service::get_consultorios().await {
                Ok(lista) => *state.consultorios.borrow_mut() = lista,
                Err(e) => log::error!("❌ Error al obtener consultorios: {}", e),
            }
            state.notificar_cambio();
        });
    }

    let pantalla = ElementBuilder::new("div")?.class("screen crud-screen").build();

    let state_nuevo = state.clone();
    let header = render_header(
        "Consultorios",
        Some(("Nuevo", move |_| {
            *state_nuevo.editando_id.borrow_mut() = None;
            *state_nuevo.form_visible.borrow_mut() = true;
            state_nuevo.notificar_cambio();
        })),
    )?;
    append_child(&pantalla, &header)?;

    let consultorios = state.consultorios.borrow();
    if consultorios.is_empty() {
        let vacio = render_empty_state("Sin consultorios", "Registra el primer consultorio")?;
        append_child(&pantalla, &vacio)?;
    } else {
        let lista = ElementBuilder::new("div")?.class("crud-list").build();
        for consultorio in consultorios.iter() {
            let card = ElementBuilder::new("div")?.class("crud-card").build();

            let etiqueta = ElementBuilder::new("div")?
                .class("crud-card-title")
                .text(&consultorio.etiqueta())
                .build();
            append_child(&card, &etiqueta)?;

            if let Some(estado) = &consultorio.estado {
                let estado_el = ElementBuilder::new("span")?
                    .class("badge")
                    .text(estado)
                    .build();
                append_child(&card, &estado_el)?;
            }

            append_child(&card, &acciones_card(state, consultorio.id)?)?;
            append_child(&lista, &card)?;
        }
        append_child(&pantalla, &lista)?;
    }
    drop(consultorios);

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
            if !confirm("¿Eliminar este consultorio?") {
                return;
            }
            let state = state.clone();
            spawn_local(async move {
                match consultorios_service::delete_consultorio(id).await {
                    Ok(_) => recargar(&state),
                    Err(e) => alert(&format!(
                        "Error: {}",
                        e.mensaje_usuario("No se pudo eliminar el consultorio")
                    )),
                }
            });
        })?;
        append_child(&acciones, &borrar)?;
    }
    Ok(acciones)
}

fn recargar(state: &AppState) {
    state.invalidar_carga("Consultorios");
    *state.form_visible.borrow_mut() = false;
    *state.editando_id.borrow_mut() = None;
    state.notificar_cambio();
}

fn render_form(state: &AppState) -> Result<Element, JsValue> {
    let editando = *state.editando_id.borrow();
    let actual = editando.and_then(|id| {
        state
            .consultorios
            .borrow()
            .iter()
            .find(|c| c.id == id)
            .cloned()
    });

    let form = ElementBuilder::new("div")?.class("crud-form").build();
    append_child(
        &form,
        &campo_texto(
            "con-codigo",
            "Código",
            "text",
            actual.as_ref().map(|c| c.codigo.as_str()).unwrap_or(""),
        )?,
    )?;
    append_child(
        &form,
        &campo_texto(
            "con-ubicacion",
            "Ubicación",
            "text",
            actual.as_ref().map(|c| c.ubicacion.as_str()).unwrap_or(""),
        )?,
    )?;

    let estados = [
        ("Disponible".to_string(), "Disponible".to_string()),
        ("Ocupado".to_string(), "Ocupado".to_string()),
        ("Mantenimiento".to_string(), "Mantenimiento".to_string()),
    ];
    let estado_actual = actual
        .as_ref()
        .and_then(|c| c.estado.clone())
        .unwrap_or_else(|| "Disponible".to_string());
    append_child(
        &form,
        &campo_select("con-estado", "Estado", &estados, Some(&estado_actual))?,
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
            let codigo = valor_de_campo("con-codigo");
            let ubicacion = valor_de_campo("con-ubicacion");

            if codigo.trim().is_empty() || ubicacion.trim().is_empty() {
                alert("Código y ubicación son obligatorios");
                return;
            }

            let datos = ConsultorioPayload {
                codigo: codigo.trim().to_string(),
                ubicacion: ubicacion.trim().to_string(),
                estado: valor_de_campo("con-estado"),
            };

            let state = state.clone();
            let editando = *state.editando_id.borrow();
            spawn_local(async move {
                let resultado = match editando {
                    Some(id) => consultorios_service::update_consultorio(id, &datos).await,
                    None => consultorios_service::create_consultorio(&datos).await,
                };
                match resultado {
                    Ok(_) => {
                        alert("✅ Consultorio guardado");
                        recargar(&state);
                    }
                    Err(e) => alert(&format!(
                        "Error: {}",
                        e.mensaje_usuario("No se pudo guardar el consultorio")
                    )),
                }
            });
        })?;
        append_child(&acciones, &guardar)?;
    }
    append_child(&form, &acciones)?;

    let titulo = if editando.is_some() {
        "Editar Consultorio"
    } else {
        "Nuevo Consultorio"
    };
    render_modal(titulo, form)
}
