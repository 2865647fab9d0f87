// ============================================================================
// HORARIOS VIEW - Franjas del doctor autenticado (CRUD)
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

use crate::dom::{alert, append_child, confirm, ElementBuilder};
use crate::models::NuevoHorario;
use crate::services::doctores_service;
use crate::state::AppState;
use crate::views::componentes::{
    campo_select, campo_texto, render_boton, render_empty_state, render_header, render_modal,
    valor_de_campo,
};

pub fn render_horarios(state: &AppState) -> Result<Element, JsValue> {
    if state.marcar_cargada("Horarios") {
        cargar_horarios(state.clone());
    }

    let pantalla = ElementBuilder::new("div")?.class("screen horarios-screen").build();

    let state_nuevo = state.clone();
    let header = render_header(
        "Mis Horarios",
        Some(("Nuevo Horario", move |_| {
            *state_nuevo.editando_id.borrow_mut() = None;
            *state_nuevo.form_visible.borrow_mut() = true;
            state_nuevo.notificar_cambio();
        })),
    )?;
    append_child(&pantalla, &header)?;

    let horarios = state.horarios.borrow();
    if horarios.is_empty() {
        let vacio = render_empty_state("Sin horarios", "Aún no has registrado franjas de atención")?;
        append_child(&pantalla, &vacio)?;
    } else {
        let lista = ElementBuilder::new("div")?.class("horarios-list").build();
        for horario in horarios.iter() {
            let card = ElementBuilder::new("div")?.class("horario-card").build();

            let etiqueta = ElementBuilder::new("div")?
                .class("horario-etiqueta")
                .text(&horario.etiqueta())
                .build();
            append_child(&card, &etiqueta)?;

            if let Some(fecha) = &horario.fecha {
                let fecha_el = ElementBuilder::new("div")?
                    .class("horario-fecha")
                    .text(fecha)
                    .build();
                append_child(&card, &fecha_el)?;
            }

            if let Some(estado) = &horario.estado {
                let estado_el = ElementBuilder::new("span")?
                    .class("badge")
                    .text(estado)
                    .build();
                append_child(&card, &estado_el)?;
            }

            let acciones = ElementBuilder::new("div")?.class("card-acciones").build();
            let horario_id = horario.id;
            {
                let state = state.clone();
                let editar = render_boton("Editar", "btn btn-secondary", move |_| {
                    *state.editando_id.borrow_mut() = Some(horario_id);
                    *state.form_visible.borrow_mut() = true;
                    state.notificar_cambio();
                })?;
                append_child(&acciones, &editar)?;
            }
            {
                let state = state.clone();
                let borrar = render_boton("Eliminar", "btn btn-danger", move |_| {
                    if !confirm("¿Eliminar esta franja horaria?") {
                        return;
                    }
                    let state = state.clone();
                    spawn_local(async move {
                        match doctores_service::delete_horario(horario_id).await {
                            Ok(_) => recargar(&state),
                            Err(e) => alert(&format!(
                                "Error: {}",
                                e.mensaje_usuario("No se pudo eliminar el horario")
                            )),
                        }
                    });
                })?;
                append_child(&acciones, &borrar)?;
            }
            append_child(&card, &acciones)?;
            append_child(&lista, &card)?;
        }
        append_child(&pantalla, &lista)?;
    }
    drop(horarios);

    if *state.form_visible.borrow() {
        let modal = render_form(state)?;
        append_child(&pantalla, &modal)?;
    }

    Ok(pantalla)
}

fn cargar_horarios(state: AppState) {
    spawn_local(async move {
        match doctores_service::get_mis_horarios().await {
            Ok(horarios) => *state.horarios.borrow_mut() = horarios,
            Err(e) => log::error!("❌ Error al obtener mis horarios: {}", e),
        }
        state.notificar_cambio();
    });
}

fn recargar(state: &AppState) {
    state.invalidar_carga("Horarios");
    *state.form_visible.borrow_mut() = false;
    *state.editando_id.borrow_mut() = None;
    state.notificar_cambio();
}

fn render_form(state: &AppState) -> Result<Element, JsValue> {
    let editando = *state.editando_id.borrow();
    let actual = editando.and_then(|id| {
        state
            .horarios
            .borrow()
            .iter()
            .find(|h| h.id == id)
            .cloned()
    });

    let form = ElementBuilder::new("div")?.class("crud-form").build();

    let (inicio, fin, fecha, estado) = match &actual {
        Some(h) => (
            h.hora_inicio.clone(),
            h.hora_fin.clone(),
            h.fecha.clone().unwrap_or_default(),
            h.estado.clone().unwrap_or_else(|| "Disponible".to_string()),
        ),
        None => (
            String::new(),
            String::new(),
            String::new(),
            "Disponible".to_string(),
        ),
    };

    append_child(&form, &campo_texto("horario-inicio", "Hora inicio", "time", &inicio)?)?;
    append_child(&form, &campo_texto("horario-fin", "Hora fin", "time", &fin)?)?;
    append_child(&form, &campo_texto("horario-fecha", "Fecha", "date", &fecha)?)?;

    let estados = [
        ("Disponible".to_string(), "Disponible".to_string()),
        ("Ocupado".to_string(), "Ocupado".to_string()),
    ];
    append_child(
        &form,
        &campo_select("horario-estado", "Estado", &estados, Some(&estado))?,
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
            let hora_inicio = valor_de_campo("horario-inicio");
            let hora_fin = valor_de_campo("horario-fin");
            let fecha = valor_de_campo("horario-fecha");
            let estado = valor_de_campo("horario-estado");

            if hora_inicio.is_empty() || hora_fin.is_empty() {
                alert("Por favor indica hora de inicio y fin");
                return;
            }

            let datos = NuevoHorario {
                hora_inicio,
                hora_fin,
                fecha: if fecha.is_empty() { None } else { Some(fecha) },
                estado,
            };

            let state = state.clone();
            let editando = *state.editando_id.borrow();
            spawn_local(async move {
                let resultado = match editando {
                    Some(id) => doctores_service::update_horario(id, &datos).await,
                    None => doctores_service::create_horario(&datos).await,
                };
                match resultado {
                    Ok(_) => {
                        alert("✅ Horario guardado");
                        recargar(&state);
                    }
                    Err(e) => alert(&format!(
                        "Error: {}",
                        e.mensaje_usuario("No se pudo guardar el horario")
                    )),
                }
            });
        })?;
        append_child(&acciones, &guardar)?;
    }
    append_child(&form, &acciones)?;

    let titulo = if editando.is_some() {
        "Editar Horario"
    } else {
        "Nuevo Horario"
    };
    render_modal(titulo, form)
}
