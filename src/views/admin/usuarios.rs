// ============================================================================
// USUARIOS (ADMIN) - CRUD de usuarios con asignación de rol
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

use crate::dom::{alert, append_child, confirm, ElementBuilder};
use crate::services::usuarios_service::{self, UsuarioPayload};
use crate::state::AppState;
use crate::views::componentes::{
    campo_select, campo_texto, render_boton, render_empty_state, render_header, render_modal,
    valor_de_campo,
};

pub fn render_usuarios(state: &AppState) -> Result<Element, JsValue> {
    if state.marcar_cargada("Usuarios") {
        let state = state.clone();
        spawn_local(async move {
            match usuarios_service::get_users().await {
                Ok(lista) => *state.usuarios.borrow_mut() = lista,
                Err(e) => log::error!("❌ Error al obtener usuarios: {}", e),
            }
            // roles para el select del formulario
            match usuarios_service::get_roles().await {
                Ok(lista) => *state.roles.borrow_mut() = lista,
                Err(e) => log::warn!("⚠️ No se pudieron cargar roles: {}", e),
            }
            state.notificar_cambio();
        });
    }

    let pantalla = ElementBuilder::new("div")?.class("screen crud-screen").build();

    let state_nuevo = state.clone();
    let header = render_header(
        "Usuarios",
        Some(("Nuevo", move |_| {
            *state_nuevo.editando_id.borrow_mut() = None;
            *state_nuevo.form_visible.borrow_mut() = true;
            state_nuevo.notificar_cambio();
        })),
    )?;
    append_child(&pantalla, &header)?;

    let usuarios = state.usuarios.borrow();
    if usuarios.is_empty() {
        let vacio = render_empty_state("Sin usuarios", "No hay usuarios registrados")?;
        append_child(&pantalla, &vacio)?;
    } else {
        let lista = ElementBuilder::new("div")?.class("crud-list").build();
        for usuario in usuarios.iter() {
            let card = ElementBuilder::new("div")?.class("crud-card").build();

            let nombre = ElementBuilder::new("div")?
                .class("crud-card-title")
                .text(&usuario.name)
                .build();
            append_child(&card, &nombre)?;

            let email = ElementBuilder::new("div")?
                .class("crud-card-subtitle")
                .text(&usuario.email)
                .build();
            append_child(&card, &email)?;

            let rol = usuario
                .rol
                .as_ref()
                .map(|r| r.rol.clone())
                .unwrap_or_else(|| "sin rol".to_string());
            let rol_el = ElementBuilder::new("span")?.class("badge").text(&rol).build();
            append_child(&card, &rol_el)?;

            append_child(&card, &acciones_card(state, usuario.id)?)?;
            append_child(&lista, &card)?;
        }
        append_child(&pantalla, &lista)?;
    }
    drop(usuarios);

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
            if !confirm("¿Eliminar este usuario?") {
                return;
            }
            let state = state.clone();
            spawn_local(async move {
                match usuarios_service::delete_user(id).await {
                    Ok(_) => recargar(&state),
                    Err(e) => alert(&format!(
                        "Error: {}",
                        e.mensaje_usuario("No se pudo eliminar el usuario")
                    )),
                }
            });
        })?;
        append_child(&acciones, &borrar)?;
    }
    Ok(acciones)
}

fn recargar(state: &AppState) {
    state.invalidar_carga("Usuarios");
    *state.form_visible.borrow_mut() = false;
    *state.editando_id.borrow_mut() = None;
    state.notificar_cambio();
}

fn render_form(state: &AppState) -> Result<Element, JsValue> {
    let editando = *state.editando_id.borrow();
    let actual = editando.and_then(|id| {
        state.usuarios.borrow().iter().find(|u| u.id == id).cloned()
    });

    let form = ElementBuilder::new("div")?.class("crud-form").build();
    append_child(
        &form,
        &campo_texto(
            "usr-name",
            "Nombre",
            "text",
            actual.as_ref().map(|u| u.name.as_str()).unwrap_or(""),
        )?,
    )?;
    append_child(
        &form,
        &campo_texto(
            "usr-email",
            "Correo electrónico",
            "email",
            actual.as_ref().map(|u| u.email.as_str()).unwrap_or(""),
        )?,
    )?;
    // en edición la contraseña en blanco significa "no cambiar"
    append_child(&form, &campo_texto("usr-password", "Contraseña", "password", "")?)?;

    let roles = state.roles.borrow();
    let opciones: Vec<(String, String)> = if roles.is_empty() {
        ["admin", "doctor", "paciente"]
            .iter()
            .map(|r| (r.to_string(), r.to_string()))
            .collect()
    } else {
        roles.iter().map(|r| (r.rol.clone(), r.rol.clone())).collect()
    };
    drop(roles);

    let rol_actual = actual
        .as_ref()
        .and_then(|u| u.rol.as_ref())
        .map(|r| r.rol.clone());
    append_child(
        &form,
        &campo_select("usr-rol", "Rol", &opciones, rol_actual.as_deref())?,
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
            let name = valor_de_campo("usr-name");
            let email = valor_de_campo("usr-email");
            let password = valor_de_campo("usr-password");
            let rol = valor_de_campo("usr-rol");

            if name.trim().is_empty() || email.trim().is_empty() {
                alert("Nombre y correo son obligatorios");
                return;
            }

            let editando = *state.editando_id.borrow();
            if editando.is_none() && password.is_empty() {
                alert("La contraseña es obligatoria para un usuario nuevo");
                return;
            }

            let datos = UsuarioPayload {
                name: name.trim().to_string(),
                email: email.trim().to_string(),
                password: if password.is_empty() {
                    None
                } else {
                    Some(password)
                },
                rol,
            };

            let state = state.clone();
            spawn_local(async move {
                let resultado = match editando {
                    Some(id) => usuarios_service::update_user(id, &datos).await,
                    None => usuarios_service::create_user(&datos).await,
                };
                match resultado {
                    Ok(_) => {
                        alert("✅ Usuario guardado");
                        recargar(&state);
                    }
                    Err(e) => alert(&format!(
                        "Error: {}",
                        e.mensaje_usuario("No se pudo guardar el usuario")
                    )),
                }
            });
        })?;
        append_child(&acciones, &guardar)?;
    }
    append_child(&form, &acciones)?;

    let titulo = if editando.is_some() {
        "Editar Usuario"
    } else {
        "Nuevo Usuario"
    };
    render_modal(titulo, form)
}
