// ============================================================================
// CITAS VIEW - "Mis Citas" de paciente y doctor
// ============================================================================
// El paciente ve sus citas y puede abrir el asistente de solicitud.
// El doctor ve una sección de pendientes con aprobar/rechazar (rechazar y
// completar piden confirmación explícita; aprobar dispara directo).
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

use crate::dom::{alert, append_child, confirm, ElementBuilder};
use crate::models::{Cita, EstadoCita};
use crate::state::{AppState, NavigationTree};
use crate::viewmodels::{formatear_fecha_hora, CitasViewModel};
use crate::views::componentes::{
    render_boton, render_empty_state, render_estado_badge, render_header,
};
use crate::views::solicitar_cita;

pub fn render_citas(state: &AppState) -> Result<Element, JsValue> {
    let es_doctor = state.router.arbol() == NavigationTree::Doctor;

    // Carga inicial de la pantalla (una vez por sesión de árbol)
    if state.marcar_cargada("MisCitas") {
        cargar_citas(state.clone(), es_doctor);
    }

    let pantalla = ElementBuilder::new("div")?.class("screen citas-screen").build();

    // Cabecera: solo el paciente puede solicitar
    let header = if es_doctor {
        render_header::<fn(web_sys::MouseEvent)>("Mis Citas", None)?
    } else {
        let state_abrir = state.clone();
        render_header(
            "Mis Citas",
            Some(("Solicitar Cita", move |_| {
                abrir_asistente(&state_abrir);
            })),
        )?
    };
    append_child(&pantalla, &header)?;

    // Sección de pendientes del doctor
    if es_doctor && !state.citas_pendientes.borrow().is_empty() {
        let seccion = ElementBuilder::new("div")?.class("pending-section").build();
        let titulo = ElementBuilder::new("h3")?
            .class("list-section-title")
            .text("Citas Pendientes")
            .build();
        append_child(&seccion, &titulo)?;

        for cita in state.citas_pendientes.borrow().iter() {
            let card = render_cita_card(state, cita, true)?;
            append_child(&seccion, &card)?;
        }
        append_child(&pantalla, &seccion)?;
    }

    // Lista principal
    let titulo_lista = ElementBuilder::new("h3")?
        .class("list-section-title")
        .text(if es_doctor { "Todas mis Citas" } else { "Mis Citas" })
        .build();
    append_child(&pantalla, &titulo_lista)?;

    let citas = state.citas.borrow();
    if citas.is_empty() {
        let vacio = render_empty_state(
            "No hay citas",
            if es_doctor {
                "No tienes citas asignadas"
            } else {
                "No tienes citas programadas"
            },
        )?;
        append_child(&pantalla, &vacio)?;
    } else {
        let lista = ElementBuilder::new("div")?.class("citas-list").build();
        for cita in citas.iter() {
            let card = render_cita_card(state, cita, false)?;
            append_child(&lista, &card)?;
        }
        append_child(&pantalla, &lista)?;
    }
    drop(citas);

    // Modal del asistente de solicitud
    if *state.solicitud.visible.borrow() {
        let modal = solicitar_cita::render_solicitud(state)?;
        append_child(&pantalla, &modal)?;
    }

    Ok(pantalla)
}

fn abrir_asistente(state: &AppState) {
    state.solicitud.abrir();

    // disponibilidad de doctores: una vez por sesión del asistente
    let solicitud = state.solicitud.clone();
    let state_notif = state.clone();
    spawn_local(async move {
        if let Err(e) = solicitud.cargar_doctores().await {
            alert(&format!(
                "Error: {}",
                e.mensaje_usuario("No se pudieron cargar los doctores disponibles")
            ));
        }
        state_notif.notificar_cambio();
    });

    state.notificar_cambio();
}

fn cargar_citas(state: AppState, es_doctor: bool) {
    spawn_local(async move {
        if es_doctor {
            match CitasViewModel::cargar_citas_doctor().await {
                Ok((citas, pendientes)) => {
                    *state.citas.borrow_mut() = citas;
                    *state.citas_pendientes.borrow_mut() = pendientes;
                }
                Err(e) => log::error!("❌ Error al obtener mis citas: {}", e),
            }
        } else {
            match CitasViewModel::cargar_citas_paciente().await {
                Ok(citas) => *state.citas.borrow_mut() = citas,
                Err(e) => log::error!("❌ Error al obtener mis citas: {}", e),
            }
        }
        state.notificar_cambio();
    });
}

/// Recarga tras una transición de estado
pub fn recargar_citas(state: &AppState) {
    state.invalidar_carga("MisCitas");
    state.notificar_cambio();
}

fn render_cita_card(state: &AppState, cita: &Cita, pendiente: bool) -> Result<Element, JsValue> {
    let es_doctor = state.router.arbol() == NavigationTree::Doctor;
    let card = ElementBuilder::new("div")?.class("cita-card").build();

    let fecha = ElementBuilder::new("div")?
        .class("cita-fecha")
        .text(&formatear_fecha_hora(&cita.fecha_hora))
        .build();
    append_child(&card, &fecha)?;

    // contraparte: el doctor ve al paciente y viceversa
    let contraparte = if es_doctor {
        cita.paciente
            .as_ref()
            .map(|p| p.nombre_completo())
            .unwrap_or_else(|| "Paciente".to_string())
    } else {
        cita.doctor
            .as_ref()
            .map(|d| d.nombre_completo())
            .unwrap_or_else(|| "Doctor".to_string())
    };
    let nombre = ElementBuilder::new("div")?
        .class("cita-nombre")
        .text(&contraparte)
        .build();
    append_child(&card, &nombre)?;

    if let Some(consultorio) = &cita.consultorio {
        let lugar = ElementBuilder::new("div")?
            .class("cita-consultorio")
            .text(&consultorio.etiqueta())
            .build();
        append_child(&card, &lugar)?;
    }

    if let Some(novedad) = &cita.novedad {
        if !novedad.is_empty() {
            let nota = ElementBuilder::new("div")?
                .class("cita-novedad")
                .text(novedad)
                .build();
            append_child(&card, &nota)?;
        }
    }

    append_child(&card, &render_estado_badge(cita.estado)?)?;

    if es_doctor {
        let acciones = render_acciones_doctor(state, cita, pendiente)?;
        append_child(&card, &acciones)?;
    }

    Ok(card)
}

/// Acciones del doctor sobre una cita: aprobar dispara directo; rechazar
/// y completar piden confirmación antes de lanzar la petición
fn render_acciones_doctor(
    state: &AppState,
    cita: &Cita,
    pendiente: bool,
) -> Result<Element, JsValue> {
    let acciones = ElementBuilder::new("div")?.class("cita-acciones").build();
    let cita_id = cita.id;

    if pendiente || cita.estado == EstadoCita::PorAprobar {
        {
            let state = state.clone();
            let boton = render_boton("Aprobar", "btn btn-success", move |_| {
                let state = state.clone();
                spawn_local(async move {
                    match CitasViewModel::aprobar(cita_id).await {
                        Ok(()) => {
                            alert("✅ Cita aprobada correctamente");
                            recargar_citas(&state);
                        }
                        Err(mensaje) => alert(&format!("Error: {}", mensaje)),
                    }
                });
            })?;
            append_child(&acciones, &boton)?;
        }
        {
            let state = state.clone();
            let boton = render_boton("Rechazar", "btn btn-danger", move |_| {
                if !confirm("¿Estás seguro de que quieres rechazar esta cita?") {
                    return;
                }
                let state = state.clone();
                spawn_local(async move {
                    match CitasViewModel::rechazar(cita_id).await {
                        Ok(()) => {
                            alert("✅ Cita rechazada correctamente");
                            recargar_citas(&state);
                        }
                        Err(mensaje) => alert(&format!("Error: {}", mensaje)),
                    }
                });
            })?;
            append_child(&acciones, &boton)?;
        }
    }

    if cita.estado == EstadoCita::Programada {
        let state = state.clone();
        let boton = render_boton("Completar", "btn btn-secondary", move |_| {
            if !confirm("¿Marcar esta cita como completada?") {
                return;
            }
            let state = state.clone();
            spawn_local(async move {
                match CitasViewModel::completar(cita_id).await {
                    Ok(()) => {
                        alert("✅ Cita completada");
                        recargar_citas(&state);
                    }
                    Err(mensaje) => alert(&format!("Error: {}", mensaje)),
                }
            });
        })?;
        append_child(&acciones, &boton)?;
    }

    Ok(acciones)
}
