// ============================================================================
// APP - Aplicación principal
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::{append_child, get_element_by_id, set_inner_html};
use crate::state::AppState;
use crate::views::render_app;

/// Aplicación principal
pub struct App {
    state: AppState,
    root: Option<Element>,
}

impl App {
    /// Crear nueva aplicación
    pub fn new() -> Result<Self, JsValue> {
        let root = get_element_by_id("app")
            .ok_or_else(|| JsValue::from_str("No #app element found"))?;

        let state = AppState::new();

        // El router decide el árbol; ante cualquier cambio se descartan
        // las cargas de pantalla del árbol anterior y se re-renderiza
        {
            let state_clone = state.clone();
            state.router.suscribir(move || {
                state_clone.reiniciar_cargas();
                programar_rerender();
            });
        }

        // Cambios de datos/UI re-renderizan en el siguiente tick
        state.subscribe_to_changes(programar_rerender);

        // Alta de los disparadores de sesión (sondeo, ciclo de vida,
        // broadcast tokenUpdated)
        state.router.montar();

        Ok(Self {
            state,
            root: Some(root),
        })
    }

    /// Renderizar aplicación completa
    pub fn render(&mut self) -> Result<(), JsValue> {
        if let Some(root) = &self.root {
            set_inner_html(root, "");
            let app_view = render_app(&self.state)?;
            append_child(root, &app_view)?;
        }
        Ok(())
    }

    /// Obtener referencia al estado
    pub fn state(&self) -> &AppState {
        &self.state
    }
}

/// Batchea múltiples notificaciones en un único re-render
fn programar_rerender() {
    use gloo_timers::callback::Timeout;
    Timeout::new(0, crate::rerender_app).forget();
}
