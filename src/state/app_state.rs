// ============================================================================
// APP STATE - Estado global de la aplicación
// ============================================================================

use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use crate::models::{Cita, Consultorio, Doctor, Especialidad, Horario, Paciente, RolRecord, Usuario};
use crate::state::router::SessionRouter;
use crate::state::session::LocalSessionStore;
use crate::viewmodels::{ModoFecha, SolicitudCita};

/// Estado global de la aplicación
#[derive(Clone)]
pub struct AppState {
    pub router: SessionRouter,
    pub solicitud: SolicitudCita,

    // UI State
    pub pestana_activa: Rc<RefCell<String>>,
    pub mostrar_registro: Rc<RefCell<bool>>,

    // Datos por pantalla
    pub citas: Rc<RefCell<Vec<Cita>>>,
    pub citas_pendientes: Rc<RefCell<Vec<Cita>>>,
    pub citas_admin: Rc<RefCell<Vec<Cita>>>,
    pub doctores: Rc<RefCell<Vec<Doctor>>>,
    pub pacientes: Rc<RefCell<Vec<Paciente>>>,
    pub especialidades: Rc<RefCell<Vec<Especialidad>>>,
    pub consultorios: Rc<RefCell<Vec<Consultorio>>>,
    pub usuarios: Rc<RefCell<Vec<Usuario>>>,
    pub roles: Rc<RefCell<Vec<RolRecord>>>,
    pub horarios: Rc<RefCell<Vec<Horario>>>,
    pub mi_consultorio: Rc<RefCell<Option<Consultorio>>>,

    // Estado del formulario modal de las pantallas CRUD
    pub form_visible: Rc<RefCell<bool>>,
    pub editando_id: Rc<RefCell<Option<u32>>>,

    // Pantallas que ya dispararon su carga inicial (evita re-fetch en
    // cada re-render)
    pestanas_cargadas: Rc<RefCell<HashSet<String>>>,

    // Reactivity: callbacks para notificar cambios
    pub change_subscribers: Rc<RefCell<Vec<Rc<dyn Fn()>>>>,
}

impl AppState {
    /// Crear nuevo estado de aplicación
    pub fn new() -> Self {
        Self {
            router: SessionRouter::new(Rc::new(LocalSessionStore)),
            solicitud: SolicitudCita::new(ModoFecha::Calendario),

            pestana_activa: Rc::new(RefCell::new("Inicio".to_string())),
            mostrar_registro: Rc::new(RefCell::new(false)),

            citas: Rc::new(RefCell::new(Vec::new())),
            citas_pendientes: Rc::new(RefCell::new(Vec::new())),
            citas_admin: Rc::new(RefCell::new(Vec::new())),
            doctores: Rc::new(RefCell::new(Vec::new())),
            pacientes: Rc::new(RefCell::new(Vec::new())),
            especialidades: Rc::new(RefCell::new(Vec::new())),
            consultorios: Rc::new(RefCell::new(Vec::new())),
            usuarios: Rc::new(RefCell::new(Vec::new())),
            roles: Rc::new(RefCell::new(Vec::new())),
            horarios: Rc::new(RefCell::new(Vec::new())),
            mi_consultorio: Rc::new(RefCell::new(None)),

            form_visible: Rc::new(RefCell::new(false)),
            editando_id: Rc::new(RefCell::new(None)),

            pestanas_cargadas: Rc::new(RefCell::new(HashSet::new())),
            change_subscribers: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// Suscribirse a cambios de estado (re-render automático)
    pub fn subscribe_to_changes<F>(&self, callback: F)
    where
        F: Fn() + 'static,
    {
        self.change_subscribers.borrow_mut().push(Rc::new(callback));
    }

    /// Notificar a todos los suscriptores
    pub fn notificar_cambio(&self) {
        let lista: Vec<Rc<dyn Fn()>> =
            self.change_subscribers.borrow().iter().cloned().collect();
        for callback in lista {
            callback();
        }
    }

    /// Cambiar de pestaña y re-renderizar. Navegar fuera cierra el
    /// asistente de solicitud e invalida sus cargas en vuelo.
    pub fn seleccionar_pestana(&self, nombre: &str) {
        *self.pestana_activa.borrow_mut() = nombre.to_string();
        *self.form_visible.borrow_mut() = false;
        *self.editando_id.borrow_mut() = None;
        if *self.solicitud.visible.borrow() {
            self.solicitud.cerrar();
        }
        self.notificar_cambio();
    }

    /// Marca la carga inicial de una pantalla; devuelve true solo la
    /// primera vez, para que el render no re-dispare el fetch en bucle
    pub fn marcar_cargada(&self, pestana: &str) -> bool {
        self.pestanas_cargadas.borrow_mut().insert(pestana.to_string())
    }

    /// Olvida las cargas hechas (cambio de árbol/usuario): la siguiente
    /// visita a cada pantalla vuelve a pedir datos frescos
    pub fn reiniciar_cargas(&self) {
        self.pestanas_cargadas.borrow_mut().clear();
        *self.pestana_activa.borrow_mut() = "Inicio".to_string();
        *self.form_visible.borrow_mut() = false;
        *self.editando_id.borrow_mut() = None;
    }

    /// Fuerza la recarga de una pantalla concreta tras una mutación
    pub fn invalidar_carga(&self, pestana: &str) {
        self.pestanas_cargadas.borrow_mut().remove(pestana);
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
