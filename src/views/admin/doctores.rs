// ============================================================================
// DOCTORES (ADMIN) - CRUD con selección de especialidad
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

use crate::dom::{alert, append_child, confirm, ElementBuilder};
use crate::services::doctores_service::{self, DoctorPayload};
use crate::services::especialidades_service;
use crate::state::AppState;
use crate::views::componentes::{
    campo_select, campo_texto, render_boton, render_empty_state, render_header, render_modal,
    valor_de_campo,
};

pub fn render_doctores(state: &AppState) -> Result<Element, JsValue> {
    if state.marcar_cargada("Doctores") {
        let state = state.clone();
        spawn_local(async move {
            match doctores_service::get_doctores().await {
                Ok(lista) => *state.doctores.borrow_mut() = lista,
                Err(e) => log::error!("❌ Error al obtener doctores: {}", e),
            }
            // especialidades para el select del formulario
            match especialidades_service::get_especialidades().await {
                Ok(lista) => *state.especialidades.borrow_mut() = lista,
                Err(e) => log::warn!("⚠️ No se pudieron cargar especialidades: {}", e),
            }
            state.notificar_cambio();
        });
    }

    let pantalla = ElementBuilder::new("div")?.class("screen crud-screen").build();

    let state_nuevo = state.clone();
    let header = render_header(
        "Doctores",
        Some(("Nuevo", move |_| {
            *state_nuevo.editando_id.borrow_mut() = None;
            *state_nuevo.form_visible.borrow_mut() = true;
            state_nuevo.notificar_cambio();
        })),
    )?;
    append_child(&pantalla, &header)?;

    let doctores = state.doctores.borrow();
    if doctores.is_empty() {
        let vacio = render_empty_state("Sin doctores", "Registra el primer doctor")?;
        append_child(&pantalla, &vacio)?;
    } else {
        let lista = ElementBuilder::new("div")?.class("crud-list").build();
        for doctor in doctores.iter() {
            let card = ElementBuilder::new("div")?.class("crud-card").build();

            let nombre = ElementBuilder::new("div")?
                .class("crud-card-title")
                .text(&doctor.nombre_completo())
                .build();
            append_child(&card, &nombre)?;

            let especialidad = ElementBuilder::new("div")?
                .class("crud-card-subtitle")
                .text(doctor.nombre_especialidad())
                .build();
            append_child(&card, &especialidad)?;

            if let Some(email) = &doctor.email {
                let email_el = ElementBuilder::new("div")?
                    .class("crud-card-detalle")
                    .text(email)
                    .build();
                append_child(&card, &email_el)?;
            }

            append_child(&card, &acciones_card(state, doctor.id)?)?;
            append_child(&lista, &card)?;
        }
        append_child(&pantalla, &lista)?;
    }
    drop(doctores);

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
            if !confirm("¿Eliminar este doctor?") {
                return;
            }
            let state = state.clone();
            spawn_local(async move {
                match doctores_service::delete_doctor(id).await {
                    Ok(_) => recargar(&state),
                    Err(e) => alert(&format!(
                        "Error: {}",
                        e.mensaje_usuario("No se pudo eliminar el doctor")
                    )),
                }
            });
        })?;
        append_child(&acciones, &borrar)?;
    }
    Ok(acciones)
}

fn recargar(state: &AppState) {
    state.invalidar_carga("Doctores");
    *state.form_visible.borrow_mut() = false;
    *state.editando_id.borrow_mut() = None;
    state.notificar_cambio();
}

fn render_form(state: &AppState) -> Result<Element, JsValue> {
    let editando = *state.editando_id.borrow();
    let actual = editando.and_then(|id| {
        state.doctores.borrow().iter().find(|d| d.id == id).cloned()
    });

    let form = ElementBuilder::new("div")?.class("crud-form").build();
    append_child(
        &form,
        &campo_texto(
            "doc-nombres",
            "Nombres",
            "text",
            actual.as_ref().map(|d| d.nombres.as_str()).unwrap_or(""),
        )?,
    )?;
    append_child(
        &form,
        &campo_texto(
            "doc-apellidos",
            "Apellidos",
            "text",
            actual.as_ref().map(|d| d.apellidos.as_str()).unwrap_or(""),
        )?,
    )?;
    append_child(
        &form,
        &campo_texto(
            "doc-email",
            "Correo electrónico",
            "email",
            actual.as_ref().and_then(|d| d.email.as_deref()).unwrap_or(""),
        )?,
    )?;
    append_child(
        &form,
        &campo_texto(
            "doc-telefono",
            "Teléfono",
            "tel",
            actual
                .as_ref()
                .and_then(|d| d.telefono.as_deref())
                .unwrap_or(""),
        )?,
    )?;

    let opciones: Vec<(String, String)> = state
        .especialidades
        .borrow()
        .iter()
        .map(|e| (e.id.to_string(), e.especialidad.clone()))
        .collect();
    let seleccionada = actual
        .as_ref()
        .and_then(|d| d.especialidad_id)
        .map(|id| id.to_string());
    append_child(
        &form,
        &campo_select(
            "doc-especialidad",
            "Especialidad",
            &opciones,
            seleccionada.as_deref(),
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
            let nombres = valor_de_campo("doc-nombres");
            let apellidos = valor_de_campo("doc-apellidos");
            let especialidad_id: u32 = match valor_de_campo("doc-especialidad").parse() {
                Ok(id) => id,
                Err(_) => {
                    alert("Por favor selecciona una especialidad");
                    return;
                }
            };

            if nombres.trim().is_empty() || apellidos.trim().is_empty() {
                alert("Nombres y apellidos son obligatorios");
                return;
            }

            let datos = DoctorPayload {
                nombres: nombres.trim().to_string(),
                apellidos: apellidos.trim().to_string(),
                email: valor_de_campo("doc-email").trim().to_string(),
                telefono: valor_de_campo("doc-telefono").trim().to_string(),
                especialidad_id,
            };

            let state = state.clone();
            let editando = *state.editando_id.borrow();
            spawn_local(async move {
                let resultado = match editando {
                    Some(id) => doctores_service::update_doctor(id, &datos).await,
                    None => doctores_service::create_doctor(&datos).await,
                };
                match resultado {
                    Ok(_) => {
                        alert("✅ Doctor guardado");
                        recargar(&state);
                    }
                    Err(e) => alert(&format!(
                        "Error: {}",
                        e.mensaje_usuario("No se pudo guardar el doctor")
                    )),
                }
            });
        })?;
        append_child(&acciones, &guardar)?;
    }
    append_child(&form, &acciones)?;

    let titulo = if editando.is_some() {
        "Editar Doctor"
    } else {
        "Nuevo Doctor"
    };
    render_modal(titulo, form)
}
