// ============================================================================
// MONITOR DE CICLO DE VIDA DE LA APP
// ============================================================================
// Detecta transiciones primer plano / segundo plano del documento
// (visibilitychange + focus/blur) para que el router de sesión refresque
// al volver a Active y pause el sondeo mientras la app no está visible.
// A diferencia de un listener global con forget(), los closures viven en
// el monitor y se retiran en stop(): un monitor detenido no dispara nada.
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Event, VisibilityState};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppLifecycle {
    Active,
    Inactive,
    Background,
}

type ClosureEvento = Closure<dyn FnMut(Event)>;

struct ListenersRegistrados {
    visibilidad: ClosureEvento,
    foco: ClosureEvento,
    desenfoque: ClosureEvento,
}

pub struct LifecycleMonitor {
    estado: Rc<RefCell<AppLifecycle>>,
    listeners: Option<ListenersRegistrados>,
}

impl LifecycleMonitor {
    pub fn new() -> Self {
        let inicial = estado_del_documento();
        Self {
            estado: Rc::new(RefCell::new(inicial)),
            listeners: None,
        }
    }

    /// Estado actual conocido
    pub fn current(&self) -> AppLifecycle {
        *self.estado.borrow()
    }

    /// Handle compartido al estado, para closures que necesitan consultarlo
    /// sin poseer el monitor (p.ej. el gate del sondeo de sesión)
    pub fn estado_compartido(&self) -> Rc<RefCell<AppLifecycle>> {
        self.estado.clone()
    }

    /// Registra los listeners de ciclo de vida. El callback recibe cada
    /// nuevo estado; la detección de flanco (background→active) queda a
    /// cargo del consumidor.
    pub fn start_monitoring<F>(&mut self, callback: F)
    where
        F: Fn(AppLifecycle) + 'static,
    {
        if self.listeners.is_some() {
            log::warn!("⚠️ LifecycleMonitor: start_monitoring ya fue llamado, ignorando");
            return;
        }

        let (window, document) = match (web_sys::window(), crate::dom::document()) {
            (Some(w), Some(d)) => (w, d),
            _ => return,
        };

        let callback = Rc::new(callback);
        let estado = self.estado.clone();

        let visibilidad = Closure::wrap(Box::new({
            let estado = estado.clone();
            let callback = callback.clone();
            move |_: Event| {
                let nuevo = estado_del_documento();
                *estado.borrow_mut() = nuevo;
                callback(nuevo);
            }
        }) as Box<dyn FnMut(Event)>);

        let foco = Closure::wrap(Box::new({
            let estado = estado.clone();
            let callback = callback.clone();
            move |_: Event| {
                *estado.borrow_mut() = AppLifecycle::Active;
                callback(AppLifecycle::Active);
            }
        }) as Box<dyn FnMut(Event)>);

        let desenfoque = Closure::wrap(Box::new({
            let estado = estado.clone();
            let callback = callback.clone();
            move |_: Event| {
                // blur sin cambio de visibilidad = app visible pero sin foco
                if *estado.borrow() == AppLifecycle::Active {
                    *estado.borrow_mut() = AppLifecycle::Inactive;
                    callback(AppLifecycle::Inactive);
                }
            }
        }) as Box<dyn FnMut(Event)>);

        let _ = document.add_event_listener_with_callback(
            "visibilitychange",
            visibilidad.as_ref().unchecked_ref(),
        );
        let _ = window.add_event_listener_with_callback("focus", foco.as_ref().unchecked_ref());
        let _ =
            window.add_event_listener_with_callback("blur", desenfoque.as_ref().unchecked_ref());

        self.listeners = Some(ListenersRegistrados {
            visibilidad,
            foco,
            desenfoque,
        });

        log::info!("✅ LifecycleMonitor: listeners registrados");
    }

    /// Retira los listeners; tras stop() no se entrega ningún callback
    pub fn stop(&mut self) {
        let listeners = match self.listeners.take() {
            Some(l) => l,
            None => return,
        };

        if let Some(document) = crate::dom::document() {
            let _ = document.remove_event_listener_with_callback(
                "visibilitychange",
                listeners.visibilidad.as_ref().unchecked_ref(),
            );
        }
        if let Some(window) = web_sys::window() {
            let _ = window.remove_event_listener_with_callback(
                "focus",
                listeners.foco.as_ref().unchecked_ref(),
            );
            let _ = window.remove_event_listener_with_callback(
                "blur",
                listeners.desenfoque.as_ref().unchecked_ref(),
            );
        }

        log::info!("🔌 LifecycleMonitor: listeners retirados");
    }
}

impl Default for LifecycleMonitor {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for LifecycleMonitor {
    fn drop(&mut self) {
        self.stop();
    }
}

fn estado_del_documento() -> AppLifecycle {
    match crate::dom::document().map(|d| d.visibility_state()) {
        Some(VisibilityState::Visible) => AppLifecycle::Active,
        Some(_) => AppLifecycle::Background,
        None => AppLifecycle::Active,
    }
}

/// Flanco background/inactive → active: el único que dispara un refresh
pub fn es_transicion_a_primer_plano(previo: AppLifecycle, nuevo: AppLifecycle) -> bool {
    matches!(
        previo,
        AppLifecycle::Inactive | AppLifecycle::Background
    ) && nuevo == AppLifecycle::Active
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn solo_el_flanco_a_active_cuenta() {
        assert!(es_transicion_a_primer_plano(
            AppLifecycle::Background,
            AppLifecycle::Active
        ));
        assert!(es_transicion_a_primer_plano(
            AppLifecycle::Inactive,
            AppLifecycle::Active
        ));
        // nivel, no flanco: active → active no dispara
        assert!(!es_transicion_a_primer_plano(
            AppLifecycle::Active,
            AppLifecycle::Active
        ));
        assert!(!es_transicion_a_primer_plano(
            AppLifecycle::Active,
            AppLifecycle::Background
        ));
    }
}
