// ============================================================================
// SOLICITAR CITA VIEW - Modal del asistente de solicitud
// ============================================================================
// Render por etapa de la máquina de estados del asistente. El control de
// enviar solo existe en la etapa de confirmación con la selección
// completa: el envío inválido es inalcanzable desde la UI.
// ============================================================================

use chrono::{Local, NaiveDate};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

use crate::dom::{alert, append_child, on_input, ElementBuilder};
use crate::state::AppState;
use crate::viewmodels::solicitud_cita::Etapa;
use crate::viewmodels::ModoFecha;
use crate::views::citas::recargar_citas;
use crate::views::componentes::{
    render_boton, render_modal, render_selection_card, render_volver, valor_de_campo,
};

pub fn render_solicitud(state: &AppState) -> Result<Element, JsValue> {
    let solicitud = &state.solicitud;
    let contenido = ElementBuilder::new("div")?.class("solicitud-form").build();

    let cuerpo = match solicitud.etapa() {
        Etapa::Doctor => render_etapa_doctor(state)?,
        Etapa::Fecha => render_etapa_fecha(state)?,
        Etapa::Horario => render_etapa_horario(state)?,
        Etapa::Consultorio => render_etapa_consultorio(state)?,
        Etapa::Confirmar | Etapa::Enviada => render_etapa_confirmar(state)?,
    };
    append_child(&contenido, &cuerpo)?;

    // Acciones del modal
    let acciones = ElementBuilder::new("div")?.class("modal-actions").build();
    {
        let state_cancelar = state.clone();
        let cancelar = render_boton("Cancelar", "btn btn-secondary", move |_| {
            state_cancelar.solicitud.cerrar();
            state_cancelar.notificar_cambio();
        })?;
        append_child(&acciones, &cancelar)?;
    }

    // El botón de enviar solo se expone con la selección completa
    if solicitud.etapa() == Etapa::Confirmar && solicitud.puede_enviar() {
        let state_enviar = state.clone();
        let enviar = render_boton("Solicitar Cita", "btn btn-primary", move |_| {
            let state = state_enviar.clone();
            spawn_local(async move {
                match state.solicitud.enviar().await {
                    Ok(()) => {
                        alert("✅ Cita solicitada correctamente");
                        recargar_citas(&state);
                    }
                    Err(mensaje) => {
                        // la selección se conserva para reintentar
                        alert(&format!("Error: {}", mensaje));
                    }
                }
            });
        })?;
        append_child(&acciones, &enviar)?;
    }
    append_child(&contenido, &acciones)?;

    render_modal("Solicitar Nueva Cita", contenido)
}

fn titulo_seccion(texto: &str) -> Result<Element, JsValue> {
    Ok(ElementBuilder::new("h4")?
        .class("form-section-title")
        .text(texto)
        .build())
}

fn info_seleccion(lineas: &[String]) -> Result<Element, JsValue> {
    let caja = ElementBuilder::new("div")?.class("selected-info").build();
    for linea in lineas {
        let p = ElementBuilder::new("p")?.text(linea).build();
        append_child(&caja, &p)?;
    }
    Ok(caja)
}

fn render_etapa_doctor(state: &AppState) -> Result<Element, JsValue> {
    let seccion = ElementBuilder::new("div")?.build();
    append_child(&seccion, &titulo_seccion("Seleccionar Doctor:")?)?;

    let doctores = state.solicitud.doctores.borrow();
    if doctores.is_empty() {
        let vacio = ElementBuilder::new("p")?
            .class("hint-text")
            .text("No hay doctores disponibles")
            .build();
        append_child(&seccion, &vacio)?;
    }

    for doctor in doctores.iter() {
        let state_sel = state.clone();
        let elegido = doctor.clone();
        let card = render_selection_card(
            &doctor.nombre_completo(),
            doctor.nombre_especialidad(),
            false,
            move |_| {
                seleccionar_doctor(&state_sel, elegido.clone());
            },
        )?;
        append_child(&seccion, &card)?;
    }

    Ok(seccion)
}

fn seleccionar_doctor(state: &AppState, doctor: crate::models::Doctor) {
    state.solicitud.seleccionar_doctor(doctor);

    // el consultorio depende del doctor elegido; los horarios esperan a
    // la fecha en la variante con calendario
    let solicitud = state.solicitud.clone();
    let state_notif = state.clone();
    spawn_local(async move {
        if let Err(e) = solicitud.cargar_consultorios().await {
            alert(&format!(
                "Error: {}",
                e.mensaje_usuario("No se pudieron cargar los consultorios disponibles")
            ));
        }
        if solicitud.modo != ModoFecha::Calendario {
            if let Err(e) = solicitud.cargar_horarios().await {
                alert(&format!(
                    "Error: {}",
                    e.mensaje_usuario("No se pudieron cargar los horarios disponibles")
                ));
            }
        }
        state_notif.notificar_cambio();
    });

    state.notificar_cambio();
}

fn render_etapa_fecha(state: &AppState) -> Result<Element, JsValue> {
    let seccion = ElementBuilder::new("div")?.build();
    let solicitud = &state.solicitud;

    if let Some(doctor) = solicitud.doctor.borrow().as_ref() {
        append_child(&seccion, &titulo_seccion("Doctor Seleccionado:")?)?;
        append_child(
            &seccion,
            &info_seleccion(&[
                doctor.nombre_completo(),
                doctor.nombre_especialidad().to_string(),
            ])?,
        )?;
    }

    append_child(&seccion, &titulo_seccion("Seleccionar Día:")?)?;

    let hoy = Local::now().date_naive().format("%Y-%m-%d").to_string();
    let grupo = ElementBuilder::new("div")?.class("form-group").build();
    let input = ElementBuilder::new("input")?
        .class("form-input")
        .id("solicitud-fecha")?
        .attr("type", "date")?
        .attr("value", &hoy)?
        // min = hoy: no se agendan citas en el pasado
        .attr("min", &hoy)?
        .build();
    append_child(&grupo, &input)?;
    append_child(&seccion, &grupo)?;

    {
        let state_confirmar = state.clone();
        let boton = render_boton("Confirmar Fecha", "btn btn-primary", move |_| {
            let crudo = valor_de_campo("solicitud-fecha");
            let fecha = match NaiveDate::parse_from_str(&crudo, "%Y-%m-%d") {
                Ok(f) => f,
                Err(_) => {
                    alert("Por favor selecciona una fecha válida");
                    return;
                }
            };

            state_confirmar.solicitud.confirmar_fecha(fecha);

            let solicitud = state_confirmar.solicitud.clone();
            let state_notif = state_confirmar.clone();
            spawn_local(async move {
                if let Err(e) = solicitud.cargar_horarios().await {
                    alert(&format!(
                        "Error: {}",
                        e.mensaje_usuario("No se pudieron cargar los horarios disponibles")
                    ));
                }
                state_notif.notificar_cambio();
            });

            state_confirmar.notificar_cambio();
        })?;
        append_child(&seccion, &boton)?;
    }

    append_child(&seccion, &boton_volver(state, Etapa::Doctor, "Cambiar Doctor")?)?;
    Ok(seccion)
}

fn render_etapa_horario(state: &AppState) -> Result<Element, JsValue> {
    let seccion = ElementBuilder::new("div")?.build();
    let solicitud = &state.solicitud;

    if solicitud.modo == ModoFecha::Calendario {
        if let Some(fecha) = *solicitud.fecha.borrow() {
            append_child(&seccion, &titulo_seccion("Día Seleccionado:")?)?;
            append_child(
                &seccion,
                &info_seleccion(&[fecha.format("%d/%m/%Y").to_string()])?,
            )?;
        }
    }

    append_child(&seccion, &titulo_seccion("Selecciona un Horario:")?)?;

    let horarios = solicitud.horarios.borrow();
    if horarios.is_empty() {
        let vacio = ElementBuilder::new("p")?
            .class("hint-text")
            .text("No hay horarios disponibles para ese día")
            .build();
        append_child(&seccion, &vacio)?;
    }

    for horario in horarios.iter() {
        let state_sel = state.clone();
        let elegido = horario.clone();
        let estado = horario.estado.clone().unwrap_or_default();
        let card = render_selection_card(&horario.etiqueta(), &estado, false, move |_| {
            state_sel.solicitud.seleccionar_horario(elegido.clone());
            state_sel.notificar_cambio();
        })?;
        append_child(&seccion, &card)?;
    }
    drop(horarios);

    if solicitud.modo == ModoFecha::Calendario {
        append_child(&seccion, &boton_volver(state, Etapa::Fecha, "Cambiar Día")?)?;
    }
    append_child(&seccion, &boton_volver(state, Etapa::Doctor, "Cambiar Doctor")?)?;
    Ok(seccion)
}

fn render_etapa_consultorio(state: &AppState) -> Result<Element, JsValue> {
    let seccion = ElementBuilder::new("div")?.build();
    let solicitud = &state.solicitud;

    append_child(&seccion, &titulo_seccion("Horario Seleccionado:")?)?;
    let mut lineas = Vec::new();
    if let Some(doctor) = solicitud.doctor.borrow().as_ref() {
        lineas.push(doctor.nombre_completo());
        lineas.push(doctor.nombre_especialidad().to_string());
    }
    if let Some(fecha) = *solicitud.fecha.borrow() {
        lineas.push(fecha.format("%d/%m/%Y").to_string());
    }
    if let Some(horario) = solicitud.horario.borrow().as_ref() {
        lineas.push(horario.etiqueta());
    }
    append_child(&seccion, &info_seleccion(&lineas)?)?;

    append_child(&seccion, &titulo_seccion("Selecciona un Consultorio:")?)?;

    let consultorios = solicitud.consultorios.borrow();
    if consultorios.is_empty() {
        let vacio = ElementBuilder::new("p")?
            .class("hint-text")
            .text("No hay consultorios disponibles")
            .build();
        append_child(&seccion, &vacio)?;
    }

    for consultorio in consultorios.iter() {
        let state_sel = state.clone();
        let elegido = consultorio.clone();
        let estado = consultorio.estado.clone().unwrap_or_default();
        let card = render_selection_card(&consultorio.etiqueta(), &estado, false, move |_| {
            state_sel.solicitud.seleccionar_consultorio(elegido.clone());
            state_sel.notificar_cambio();
        })?;
        append_child(&seccion, &card)?;
    }
    drop(consultorios);

    append_child(
        &seccion,
        &boton_volver(state, Etapa::Horario, "Cambiar Horario")?,
    )?;
    if solicitud.modo == ModoFecha::Calendario {
        append_child(&seccion, &boton_volver(state, Etapa::Fecha, "Cambiar Día")?)?;
    }
    Ok(seccion)
}

fn render_etapa_confirmar(state: &AppState) -> Result<Element, JsValue> {
    let seccion = ElementBuilder::new("div")?.build();
    let solicitud = &state.solicitud;

    append_child(&seccion, &titulo_seccion("Confirmar Cita:")?)?;

    let mut lineas = Vec::new();
    if let Some(doctor) = solicitud.doctor.borrow().as_ref() {
        lineas.push(format!("Doctor: {}", doctor.nombre_completo()));
        lineas.push(format!("Especialidad: {}", doctor.nombre_especialidad()));
    }
    if let Some(fecha) = *solicitud.fecha.borrow() {
        lineas.push(format!("Fecha: {}", fecha.format("%d/%m/%Y")));
    }
    if let Some(horario) = solicitud.horario.borrow().as_ref() {
        lineas.push(format!("Horario: {}", horario.etiqueta()));
    }
    if let Some(consultorio) = solicitud.consultorio.borrow().as_ref() {
        lineas.push(format!("Consultorio: {}", consultorio.etiqueta()));
    }
    append_child(&seccion, &info_seleccion(&lineas)?)?;

    // Nota adicional (novedad), sincronizada con el estado del asistente
    append_child(&seccion, &titulo_seccion("Nota adicional:")?)?;
    let nota = ElementBuilder::new("textarea")?
        .class("form-input")
        .id("solicitud-novedad")?
        .attr("placeholder", "Describe tu motivo de consulta (opcional)")?
        .text(&solicitud.novedad.borrow())
        .build();
    {
        let novedad = solicitud.novedad.clone();
        on_input(&nota, move |_| {
            *novedad.borrow_mut() = valor_de_campo("solicitud-novedad");
        })?;
    }
    append_child(&seccion, &nota)?;

    append_child(
        &seccion,
        &boton_volver(state, Etapa::Consultorio, "Cambiar Consultorio")?,
    )?;
    append_child(
        &seccion,
        &boton_volver(state, Etapa::Horario, "Cambiar Horario")?,
    )?;

    Ok(seccion)
}

fn boton_volver(state: &AppState, destino: Etapa, texto: &str) -> Result<Element, JsValue> {
    let state = state.clone();
    render_volver(texto, move |_| {
        state.solicitud.volver_a(destino);
        state.notificar_cambio();
    })
}
