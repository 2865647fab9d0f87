// ============================================================================
// APP VIEW - Selección del árbol de navegación y barra de pestañas
// ============================================================================
// Render puro: el árbol lo decide el SessionRouter; esta vista solo monta
// el componente que toca. La historia de pantallas dentro de cada árbol se
// reduce a la pestaña activa.
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::{append_child, ElementBuilder};
use crate::state::{AppState, NavigationTree};
use crate::views;

/// Renderizar aplicación completa según el árbol activo
pub fn render_app(state: &AppState) -> Result<Element, JsValue> {
    let contenedor = ElementBuilder::new("div")?.class("app-container").build();

    if state.router.cargando() {
        let spinner = views::componentes::render_cargando("Cargando...")?;
        append_child(&contenedor, &spinner)?;
        return Ok(contenedor);
    }

    let arbol = state.router.arbol();
    match arbol {
        NavigationTree::Auth => {
            let auth = if *state.mostrar_registro.borrow() {
                views::registro::render_registro(state)?
            } else {
                views::login::render_login(state)?
            };
            append_child(&contenedor, &auth)?;
        }
        _ => {
            let pantalla = render_pantalla_activa(state, arbol)?;
            append_child(&contenedor, &pantalla)?;

            let tab_bar = render_tab_bar(state, arbol)?;
            append_child(&contenedor, &tab_bar)?;
        }
    }

    Ok(contenedor)
}

/// Pestaña activa del árbol; si la guardada no pertenece al árbol actual
/// se cae a la primera
fn pestana_vigente(state: &AppState, arbol: NavigationTree) -> &'static str {
    let pestanas = arbol.pestanas();
    let activa = state.pestana_activa.borrow();
    pestanas
        .iter()
        .find(|p| **p == activa.as_str())
        .copied()
        .unwrap_or(pestanas[0])
}

fn render_pantalla_activa(state: &AppState, arbol: NavigationTree) -> Result<Element, JsValue> {
    let cuerpo = ElementBuilder::new("div")?.class("screen-body").build();

    let pantalla = match (arbol, pestana_vigente(state, arbol)) {
        (_, "Inicio") => views::inicio::render_inicio(state)?,
        (_, "MisCitas") => views::citas::render_citas(state)?,
        (NavigationTree::Doctor, "Horarios") => views::horarios::render_horarios(state)?,
        (_, "Perfil") => views::perfil::render_perfil(state)?,
        (NavigationTree::Admin, "Usuarios") => views::admin::usuarios::render_usuarios(state)?,
        (NavigationTree::Admin, "Doctores") => views::admin::doctores::render_doctores(state)?,
        (NavigationTree::Admin, "Pacientes") => views::admin::pacientes::render_pacientes(state)?,
        (NavigationTree::Admin, "Especialidades") => {
            views::admin::especialidades::render_especialidades(state)?
        }
        (NavigationTree::Admin, "Consultorios") => {
            views::admin::consultorios::render_consultorios(state)?
        }
        (NavigationTree::Admin, "Citas") => views::admin::citas::render_citas_admin(state)?,
        _ => views::inicio::render_inicio(state)?,
    };

    append_child(&cuerpo, &pantalla)?;
    Ok(cuerpo)
}

/// Barra de pestañas inferior del árbol activo
fn render_tab_bar(state: &AppState, arbol: NavigationTree) -> Result<Element, JsValue> {
    let barra = ElementBuilder::new("nav")?.class("tab-bar").build();
    let activa = pestana_vigente(state, arbol);

    for pestana in arbol.pestanas() {
        let clase = if *pestana == activa {
            "tab-item active"
        } else {
            "tab-item"
        };

        let item = ElementBuilder::new("button")?
            .class(clase)
            .text(pestana)
            .build();

        let state_clone = state.clone();
        let nombre = *pestana;
        crate::dom::on_click(&item, move |_| {
            state_clone.seleccionar_pestana(nombre);
        })?;

        append_child(&barra, &item)?;
    }

    Ok(barra)
}
