// ============================================================================
// CITAS (ADMIN) - CRUD de citas médicas de toda la EPS
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

use crate::dom::{alert, append_child, confirm, ElementBuilder};
use crate::services::citas_service::{self, CitaPayload};
use crate::services::{consultorios_service, doctores_service, pacientes_service};
use crate::state::AppState;
use crate::viewmodels::formatear_fecha_hora;
use crate::views::componentes::{
    campo_select, campo_texto, render_boton, render_empty_state, render_estado_badge,
    render_header, render_modal, valor_de_campo,
};

pub fn render_citas_admin(state: &AppState) -> Result<Element, JsValue> {
    if state.marcar_cargada("Citas") {
        let state = state.clone();
        spawn_local(async move {
            match citas_service::get_citas().await {
                Ok(lista) => *state.citas_admin.borrow_mut() = lista,
                Err(e) => log::error!("❌ Error al obtener citas: {}", e),
            }
            // catálogos para el formulario
            if let Ok(lista) = doctores_service::get_doctores().await {
                *state.doctores.borrow_mut() = lista;
            }
            if let Ok(lista) = pacientes_service::get_pacientes().await {
                *state.pacientes.borrow_mut() = lista;
            }
            if let Ok(lista) = consultorios_service::get_consultorios().await {
                *state.consultorios.borrow_mut() = lista;
            }
            state.notificar_cambio();
        });
    }

    let pantalla = ElementBuilder::new("div")?.class("screen crud-screen").build();

    let state_nuevo = state.clone();
    let header = render_header(
        "Citas Médicas",
        Some(("Nueva", move |_| {
            *state_nuevo.editando_id.borrow_mut() = None;
            *state_nuevo.form_visible.borrow_mut() = true;
            state_nuevo.notificar_cambio();
        })),
    )?;
    append_child(&pantalla, &header)?;

    let citas = state.citas_admin.borrow();
    if citas.is_empty() {
        let vacio = render_empty_state("Sin citas", "No hay citas registradas")?;
        append_child(&pantalla, &vacio)?;
    } else {
        let lista = ElementBuilder::new("div")?.class("crud-list").build();
        for cita in citas.iter() {
            let card = ElementBuilder::new("div")?.class("crud-card").build();

            let fecha = ElementBuilder::new("div")?
                .class("crud-card-title")
                .text(&formatear_fecha_hora(&cita.fecha_hora))
                .build();
            append_child(&card, &fecha)?;

            let doctor = cita
                .doctor
                .as_ref()
                .map(|d| d.nombre_completo())
                .unwrap_or_else(|| format!("Doctor #{}", cita.doctor_id.unwrap_or(0)));
            let paciente = cita
                .paciente
                .as_ref()
                .map(|p| p.nombre_completo())
                .unwrap_or_else(|| format!("Paciente #{}", cita.paciente_id.unwrap_or(0)));
            let partes = ElementBuilder::new("div")?
                .class("crud-card-subtitle")
                .text(&format!("{} — {}", doctor, paciente))
                .build();
            append_child(&card, &partes)?;

            append_child(&card, &render_estado_badge(cita.estado)?)?;
            append_child(&card, &acciones_card(state, cita.id)?)?;
            append_child(&lista, &card)?;
        }
        append_child(&pantalla, &lista)?;
    }
    drop(citas);

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
            if !confirm("¿Eliminar esta cita?") {
                return;
            }
            let state = state.clone();
            spawn_local(async move {
                match citas_service::delete_cita(id).await {
                    Ok(_) => recargar(&state),
                    Err(e) => alert(&format!(
                        "Error: {}",
                        e.mensaje_usuario("No se pudo eliminar la cita")
                    )),
                }
            });
        })?;
        append_child(&acciones, &borrar)?;
    }
    Ok(acciones)
}

fn recargar(state: &AppState) {
    state.invalidar_carga("Citas");
    *state.form_visible.borrow_mut() = false;
    *state.editando_id.borrow_mut() = None;
    state.notificar_cambio();
}

fn render_form(state: &AppState) -> Result<Element, JsValue> {
    let editando = *state.editando_id.borrow();
    let actual = editando.and_then(|id| {
        state
            .citas_admin
            .borrow()
            .iter()
            .find(|c| c.id == id)
            .cloned()
    });

    let form = ElementBuilder::new("div")?.class("crud-form").build();

    let doctores: Vec<(String, String)> = state
        .doctores
        .borrow()
        .iter()
        .map(|d| (d.id.to_string(), d.nombre_completo()))
        .collect();
    let doctor_actual = actual
        .as_ref()
        .and_then(|c| c.doctor_id)
        .map(|id| id.to_string());
    append_child(
        &form,
        &campo_select("cita-doctor", "Doctor", &doctores, doctor_actual.as_deref())?,
    )?;

    let pacientes: Vec<(String, String)> = state
        .pacientes
        .borrow()
        .iter()
        .map(|p| (p.id.to_string(), p.nombre_completo()))
        .collect();
    let paciente_actual = actual
        .as_ref()
        .and_then(|c| c.paciente_id)
        .map(|id| id.to_string());
    append_child(
        &form,
        &campo_select(
            "cita-paciente",
            "Paciente",
            &pacientes,
            paciente_actual.as_deref(),
        )?,
    )?;

    let consultorios: Vec<(String, String)> = state
        .consultorios
        .borrow()
        .iter()
        .map(|c| (c.id.to_string(), c.etiqueta()))
        .collect();
    let consultorio_actual = actual
        .as_ref()
        .and_then(|c| c.consultorio_id)
        .map(|id| id.to_string());
    append_child(
        &form,
        &campo_select(
            "cita-consultorio",
            "Consultorio",
            &consultorios,
            consultorio_actual.as_deref(),
        )?,
    )?;

    // datetime-local espera "YYYY-MM-DDTHH:MM"
    let fecha_actual = actual
        .as_ref()
        .map(|c| c.fecha_hora.chars().take(16).collect::<String>())
        .unwrap_or_default();
    append_child(
        &form,
        &campo_texto("cita-fecha", "Fecha y hora", "datetime-local", &fecha_actual)?,
    )?;

    let estados = [
        ("Por aprobar".to_string(), "Por aprobar".to_string()),
        ("Programada".to_string(), "Programada".to_string()),
        ("Completada".to_string(), "Completada".to_string()),
        ("Rechazada".to_string(), "Rechazada".to_string()),
    ];
    let estado_actual = actual
        .as_ref()
        .map(|c| c.estado.como_texto().to_string())
        .unwrap_or_else(|| "Programada".to_string());
    append_child(
        &form,
        &campo_select("cita-estado", "Estado", &estados, Some(&estado_actual))?,
    )?;

    append_child(
        &form,
        &campo_texto(
            "cita-novedad",
            "Novedad",
            "text",
            actual
                .as_ref()
                .and_then(|c| c.novedad.as_deref())
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
            let doctor_id: u32 = match valor_de_campo("cita-doctor").parse() {
                Ok(id) => id,
                Err(_) => {
                    alert("Por favor selecciona un doctor");
                    return;
                }
            };
            let paciente_id: u32 = match valor_de_campo("cita-paciente").parse() {
                Ok(id) => id,
                Err(_) => {
                    alert("Por favor selecciona un paciente");
                    return;
                }
            };
            let consultorio_id: u32 = match valor_de_campo("cita-consultorio").parse() {
                Ok(id) => id,
                Err(_) => {
                    alert("Por favor selecciona un consultorio");
                    return;
                }
            };

            let fecha = valor_de_campo("cita-fecha");
            if fecha.is_empty() {
                alert("Por favor indica fecha y hora");
                return;
            }

            let datos = CitaPayload {
                doctor_id,
                paciente_id,
                consultorio_id,
                // datetime-local entrega "YYYY-MM-DDTHH:MM"; se completa a ISO
                fecha_hora: format!("{}:00", fecha),
                estado: valor_de_campo("cita-estado"),
                novedad: valor_de_campo("cita-novedad").trim().to_string(),
            };

            let state = state.clone();
            let editando = *state.editando_id.borrow();
            spawn_local(async move {
                let resultado = match editando {
                    Some(id) => citas_service::update_cita(id, &datos).await,
                    None => citas_service::create_cita(&datos).await,
                };
                match resultado {
                    Ok(_) => {
                        alert("✅ Cita guardada");
                        recargar(&state);
                    }
                    Err(e) => alert(&format!(
                        "Error: {}",
                        e.mensaje_usuario("No se pudo guardar la cita")
                    )),
                }
            });
        })?;
        append_child(&acciones, &guardar)?;
    }
    append_child(&form, &acciones)?;

    let titulo = if editando.is_some() {
        "Editar Cita"
    } else {
        "Nueva Cita"
    };
    render_modal(titulo, form)
}
