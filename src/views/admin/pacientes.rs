// ============================================================================
// PACIENTES (ADMIN) - CRUD
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

use crate::dom::{alert, append_child, confirm, ElementBuilder};
use crate::services::pacientes_service::{self, PacientePayload};
use crate::state::AppState;
use crate::views::componentes::{
    campo_texto, render_boton, render_empty_state, render_header, render_modal, valor_de_campo,
};

pub fn render_pacientes(state: &AppState) -> Result<Element, JsValue> {
    if state.marcar_cargada("Pacientes") {
        let state = state.clone();
        spawn_local(async move {
            match pacientes_service::get_pacientes().await {
                Ok(lista) => *state.pacientes.borrow_mut() = lista,
                Err(e) => log::error!("❌ Error al obtener pacientes: {}", e),
            }
            state.notificar_cambio();
        });
    }

    let pantalla = ElementBuilder::new("div")?.class("screen crud-screen").build();

    let state_nuevo = state.clone();
    let header = render_header(
        "Pacientes",
        Some(("Nuevo", move |_| {
            *state_nuevo.editando_id.borrow_mut() = None;
            *state_nuevo.form_visible.borrow_mut() = true;
            state_nuevo.notificar_cambio();
        })),
    )?;
    append_child(&pantalla, &header)?;

    let pacientes = state.pacientes.borrow();
    if pacientes.is_empty() {
        let vacio = render_empty_state("Sin pacientes", "Registra el primer paciente")?;
        append_child(&pantalla, &vacio)?;
    } else {
        let lista = ElementBuilder::new("div")?.class("crud-list").build();
        for paciente in pacientes.iter() {
            let card = ElementBuilder::new("div")?.class("crud-card").build();

            let nombre = ElementBuilder::new("div")?
                .class("crud-card-title")
                .text(&paciente.nombre_completo())
                .build();
            append_child(&card, &nombre)?;

            if let Some(documento) = &paciente.documento {
                let doc = ElementBuilder::new("div")?
                    .class("crud-card-subtitle")
                    .text(&format!("Documento: {}", documento))
                    .build();
                append_child(&card, &doc)?;
            }
            if let Some(email) = &paciente.email {
                let email_el = ElementBuilder::new("div")?
                    .class("crud-card-detalle")
                    .text(email)
                    .build();
                append_child(&card, &email_el)?;
            }

            append_child(&card, &acciones_card(state, paciente.id)?)?;
            append_child(&lista, &card)?;
        }
        append_child(&pantalla, &lista)?;
    }
    drop(pacientes);

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
            if !confirm("¿Eliminar este paciente?") {
                return;
            }
            let state = state.clone();
            spawn_local(async move {
                match pacientes_service::delete_paciente(id).await {
                    Ok(_) => recargar(&state),
                    Err(e) => alert(&format!(
                        "Error: {}",
                        e.mensaje_usuario("No se pudo eliminar el paciente")
                    )),
                }
            });
        })?;
        append_child(&acciones, &borrar)?;
    }
    Ok(acciones)
}

fn recargar(state: &AppState) {
    state.invalidar_carga("Pacientes");
    *state.form_visible.borrow_mut() = false;
    *state.editando_id.borrow_mut() = None;
    state.notificar_cambio();
}

fn render_form(state: &AppState) -> Result<Element, JsValue> {
    let editando = *state.editando_id.borrow();
    let actual = editando.and_then(|id| {
        state.pacientes.borrow().iter().find(|p| p.id == id).cloned()
    });

    let form = ElementBuilder::new("div")?.class("crud-form").build();
    append_child(
        &form,
        &campo_texto(
            "pac-nombres",
            "Nombres",
            "text",
            actual.as_ref().map(|p| p.nombres.as_str()).unwrap_or(""),
        )?,
    )?;
    append_child(
        &form,
        &campo_texto(
            "pac-apellidos",
            "Apellidos",
            "text",
            actual.as_ref().map(|p| p.apellidos.as_str()).unwrap_or(""),
        )?,
    )?;
    append_child(
        &form,
        &campo_texto(
            "pac-documento",
            "Documento",
            "text",
            actual
                .as_ref()
                .and_then(|p| p.documento.as_deref())
                .unwrap_or(""),
        )?,
    )?;
    append_child(
        &form,
        &campo_texto(
            "pac-email",
            "Correo electrónico",
            "email",
            actual.as_ref().and_then(|p| p.email.as_deref()).unwrap_or(""),
        )?,
    )?;
    append_child(
        &form,
        &campo_texto(
            "pac-telefono",
            "Teléfono",
            "tel",
            actual
                .as_ref()
                .and_then(|p| p.telefono.as_deref())
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
            let nombres = valor_de_campo("pac-nombres");
            let apellidos = valor_de_campo("pac-apellidos");
            let documento = valor_de_campo("pac-documento");

            if nombres.trim().is_empty() || apellidos.trim().is_empty() {
                alert("Nombres y apellidos son obligatorios");
                return;
            }
            if documento.trim().is_empty() {
                alert("El documento es obligatorio");
                return;
            }

            let datos = PacientePayload {
                nombres: nombres.trim().to_string(),
                apellidos: apellidos.trim().to_string(),
                documento: documento.trim().to_string(),
                email: valor_de_campo("pac-email").trim().to_string(),
                telefono: valor_de_campo("pac-telefono").trim().to_string(),
            };

            let state = state.clone();
            let editando = *state.editando_id.borrow();
            spawn_local(async move {
                let resultado = match editando {
                    Some(id) => pacientes_service::update_paciente(id, &datos).await,
                    None => pacientes_service::create_paciente(&datos).await,
                };
                match resultado {
                    Ok(_) => {
                        alert("✅ Paciente guardado");
                        recargar(&state);
                    }
                    Err(e) => alert(&format!(
                        "Error: {}",
                        e.mensaje_usuario("No se pudo guardar el paciente")
                    )),
                }
            });
        })?;
        append_child(&acciones, &guardar)?;
    }
    append_child(&form, &acciones)?;

    let titulo = if editando.is_some() {
        "Editar Paciente"
    } else {
        "Nuevo Paciente"
    };
    render_modal(titulo, form)
}
