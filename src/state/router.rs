// ============================================================================
// SESSION ROUTER - Máquina de estados sesión/rol
// ============================================================================
// Decide en todo momento qué árbol de navegación se monta, a partir del
// token y rol cacheados. Cuatro disparadores comparten un único camino de
// refresco:
//   1. montar() del router
//   2. flanco background/inactive → active del ciclo de vida
//   3. sondeo fijo cada 2 s, solo con la app en primer plano
//   4. broadcast tokenUpdated (login/logout/edición de perfil)
// El refresco es idempotente: cada invocación lee el estado actual del
// almacén y sobreescribe el estado local completo (last-write-wins), nunca
// deja token y rol a medio actualizar.
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Interval;

use crate::config::CONFIG;
use crate::services::event_bus::{self, Subscription};
use crate::services::lifecycle_monitor::{
    es_transicion_a_primer_plano, AppLifecycle, LifecycleMonitor,
};
use crate::state::session::{leer_sesion, resolver_navegacion, NavigationTree, SessionStore};
use crate::utils::EVENTO_TOKEN_ACTUALIZADO;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EstadoRouter {
    Cargando,
    Listo(NavigationTree),
}

/// Recursos adquiridos en montar(); cada uno se cancela por separado al
/// soltarse (Interval y Subscription cancelan en Drop, el monitor en stop)
struct Recursos {
    _intervalo: Interval,
    ciclo_vida: LifecycleMonitor,
    _suscripcion_token: Subscription,
}

#[derive(Clone)]
pub struct SessionRouter {
    store: Rc<dyn SessionStore>,
    estado: Rc<RefCell<EstadoRouter>>,
    // false tras desmontar: los callbacks tardíos no tocan el estado
    activo: Rc<RefCell<bool>>,
    suscriptores: Rc<RefCell<Vec<Rc<dyn Fn()>>>>,
    recursos: Rc<RefCell<Option<Recursos>>>,
}

impl SessionRouter {
    pub fn new(store: Rc<dyn SessionStore>) -> Self {
        Self {
            store,
            estado: Rc::new(RefCell::new(EstadoRouter::Cargando)),
            activo: Rc::new(RefCell::new(true)),
            suscriptores: Rc::new(RefCell::new(Vec::new())),
            recursos: Rc::new(RefCell::new(None)),
        }
    }

    pub fn estado(&self) -> EstadoRouter {
        *self.estado.borrow()
    }

    /// Árbol activo; mientras carga se comporta como Auth
    pub fn arbol(&self) -> NavigationTree {
        match self.estado() {
            EstadoRouter::Listo(arbol) => arbol,
            EstadoRouter::Cargando => NavigationTree::Auth,
        }
    }

    pub fn cargando(&self) -> bool {
        self.estado() == EstadoRouter::Cargando
    }

    /// Suscribirse a cambios de árbol (re-render de la app)
    pub fn suscribir<F>(&self, callback: F)
    where
        F: Fn() + 'static,
    {
        self.suscriptores.borrow_mut().push(Rc::new(callback));
    }

    /// Único camino de refresco ("loadToken") compartido por los cuatro
    /// disparadores. Lee token + rol en un solo paso y sobreescribe el
    /// estado local de forma atómica; un fallo de lectura degrada a
    /// sesión ausente pero siempre alcanza un estado terminal de render.
    pub fn refresh(&self) {
        if !*self.activo.borrow() {
            return;
        }

        let (token, rol) = leer_sesion(self.store.as_ref());
        let nuevo = EstadoRouter::Listo(resolver_navegacion(token.as_deref(), rol.as_deref()));

        let cambio = {
            let mut actual = self.estado.borrow_mut();
            let distinto = *actual != nuevo;
            *actual = nuevo;
            distinto
        };

        if cambio {
            log::info!("🧭 Árbol de navegación: {:?}", self.arbol());
            self.notificar();
        }
    }

    fn notificar(&self) {
        // se clona la lista para tolerar suscripciones durante la notificación
        let lista: Vec<Rc<dyn Fn()>> = self.suscriptores.borrow().iter().cloned().collect();
        for callback in lista {
            callback();
        }
    }

    /// Montaje: refresco inicial y alta de los tres disparadores
    /// asíncronos (sondeo, ciclo de vida, broadcast)
    pub fn montar(&self) {
        if self.recursos.borrow().is_some() {
            log::warn!("⚠️ SessionRouter: montar() ya fue llamado, ignorando");
            return;
        }

        *self.activo.borrow_mut() = true;
        self.refresh();

        let mut ciclo_vida = LifecycleMonitor::new();
        let estado_app = ciclo_vida.estado_compartido();

        // flanco a primer plano (disparo por transición, no por nivel)
        {
            let router = self.clone();
            let previo = Rc::new(RefCell::new(ciclo_vida.current()));
            ciclo_vida.start_monitoring(move |nuevo| {
                let anterior = *previo.borrow();
                *previo.borrow_mut() = nuevo;
                if es_transicion_a_primer_plano(anterior, nuevo) {
                    log::info!("📲 App vuelve a primer plano, refrescando sesión");
                    router.refresh();
                }
            });
        }

        // sondeo periódico, pausado mientras la app no está en primer plano
        let intervalo = {
            let router = self.clone();
            Interval::new(CONFIG.session_poll_interval_ms, move || {
                if *estado_app.borrow() == AppLifecycle::Active {
                    router.refresh();
                }
            })
        };

        // broadcast interno: el único disparador push
        let suscripcion = {
            let router = self.clone();
            event_bus::subscribe(EVENTO_TOKEN_ACTUALIZADO, move || router.refresh())
        };

        *self.recursos.borrow_mut() = Some(Recursos {
            _intervalo: intervalo,
            ciclo_vida,
            _suscripcion_token: suscripcion,
        });

        log::info!("✅ SessionRouter montado (sondeo cada {} ms)", CONFIG.session_poll_interval_ms);
    }

    /// Desmontaje: cancela sondeo, listeners y broadcast. Ningún callback
    /// posterior modifica el estado.
    pub fn desmontar(&self) {
        *self.activo.borrow_mut() = false;

        if let Some(mut recursos) = self.recursos.borrow_mut().take() {
            recursos.ciclo_vida.stop();
            // _intervalo y _suscripcion_token se cancelan aquí al soltarse
        }

        log::info!("🔌 SessionRouter desmontado");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::{STORAGE_KEY_TOKEN, STORAGE_KEY_USER_INFO};
    use std::cell::Cell;
    use std::collections::HashMap;

    /// Almacén en memoria con modo de fallo, para simular storage caído
    #[derive(Default)]
    struct MemoryStore {
        datos: RefCell<HashMap<String, String>>,
        fallar: Cell<bool>,
    }

    impl MemoryStore {
        fn poner(&self, clave: &str, valor: &str) {
            self.datos
                .borrow_mut()
                .insert(clave.to_string(), valor.to_string());
        }

        fn quitar(&self, clave: &str) {
            self.datos.borrow_mut().remove(clave);
        }
    }

    impl SessionStore for MemoryStore {
        fn get(&self, clave: &str) -> Result<Option<String>, String> {
            if self.fallar.get() {
                return Err("almacenamiento no disponible".to_string());
            }
            Ok(self.datos.borrow().get(clave).cloned())
        }

        fn set(&self, clave: &str, valor: &str) -> Result<(), String> {
            self.poner(clave, valor);
            Ok(())
        }

        fn remove(&self, clave: &str) -> Result<(), String> {
            self.quitar(clave);
            Ok(())
        }
    }

    fn router_con_store() -> (SessionRouter, Rc<MemoryStore>) {
        let store = Rc::new(MemoryStore::default());
        (SessionRouter::new(store.clone()), store)
    }

    fn sesion(store: &MemoryStore, rol: &str) {
        store.poner(STORAGE_KEY_TOKEN, "token-abc");
        store.poner(
            STORAGE_KEY_USER_INFO,
            &format!("{{\"role\":\"{}\"}}", rol),
        );
    }

    #[test]
    fn arranca_cargando_y_sin_token_cae_a_auth() {
        let (router, _store) = router_con_store();
        assert_eq!(router.estado(), EstadoRouter::Cargando);

        router.refresh();
        assert_eq!(router.estado(), EstadoRouter::Listo(NavigationTree::Auth));
    }

    #[test]
    fn rol_cacheado_sin_token_no_autentica() {
        let (router, store) = router_con_store();
        store.poner(STORAGE_KEY_USER_INFO, "{\"role\":\"admin\"}");

        router.refresh();
        assert_eq!(router.arbol(), NavigationTree::Auth);
    }

    #[test]
    fn token_con_rol_desconocido_resuelve_paciente() {
        let (router, store) = router_con_store();
        sesion(&store, "superadmin");

        router.refresh();
        assert_eq!(router.arbol(), NavigationTree::Paciente);
    }

    #[test]
    fn login_como_doctor_monta_el_arbol_doctor() {
        let (router, store) = router_con_store();
        sesion(&store, "doctor");

        router.refresh();
        assert_eq!(router.arbol(), NavigationTree::Doctor);
        assert_eq!(
            router.arbol().pestanas(),
            &["Inicio", "MisCitas", "Horarios", "Perfil"]
        );
    }

    #[test]
    fn el_refresco_depende_solo_del_ultimo_estado_del_almacen() {
        let (router, store) = router_con_store();

        // ráfaga de disparos con el almacén cambiando entre medias:
        // el resultado final solo depende de la última lectura
        router.refresh();
        sesion(&store, "admin");
        router.refresh();
        router.refresh();
        sesion(&store, "doctor");
        router.refresh();
        router.refresh();
        router.refresh();
        assert_eq!(router.arbol(), NavigationTree::Doctor);

        // y en el orden inverso de roles el resultado sigue a la última
        sesion(&store, "admin");
        router.refresh();
        assert_eq!(router.arbol(), NavigationTree::Admin);
    }

    #[test]
    fn logout_devuelve_a_auth() {
        let (router, store) = router_con_store();
        sesion(&store, "paciente");
        router.refresh();
        assert_eq!(router.arbol(), NavigationTree::Paciente);

        store.quitar(STORAGE_KEY_TOKEN);
        router.refresh();
        assert_eq!(router.arbol(), NavigationTree::Auth);
    }

    #[test]
    fn fallo_de_lectura_degrada_a_auth_sin_colgarse() {
        let (router, store) = router_con_store();
        sesion(&store, "admin");
        router.refresh();
        assert_eq!(router.arbol(), NavigationTree::Admin);

        // el almacén cae: nunca se conserva el estado privilegiado obsoleto
        // y el router sale de todos modos del estado de carga
        store.fallar.set(true);
        router.refresh();
        assert!(!router.cargando());
        assert_eq!(router.arbol(), NavigationTree::Auth);
    }

    #[test]
    fn tras_desmontar_no_hay_actualizaciones_de_estado() {
        let (router, store) = router_con_store();
        let notificaciones = Rc::new(Cell::new(0));
        {
            let n = notificaciones.clone();
            router.suscribir(move || n.set(n.get() + 1));
        }

        sesion(&store, "doctor");
        router.refresh();
        assert_eq!(router.arbol(), NavigationTree::Doctor);
        let antes = notificaciones.get();

        router.desmontar();
        sesion(&store, "admin");
        // un callback tardío (sondeo o broadcast rezagado) no hace nada
        router.refresh();

        assert_eq!(router.arbol(), NavigationTree::Doctor);
        assert_eq!(notificaciones.get(), antes);
    }

    #[test]
    fn el_broadcast_token_actualizado_refresca_igual_que_el_sondeo() {
        let (router, store) = router_con_store();

        let suscripcion = {
            let router = router.clone();
            event_bus::subscribe(EVENTO_TOKEN_ACTUALIZADO, move || router.refresh())
        };

        sesion(&store, "doctor");
        event_bus::emit(EVENTO_TOKEN_ACTUALIZADO);
        assert_eq!(router.arbol(), NavigationTree::Doctor);

        // dada de baja la suscripción, el broadcast deja de llegar
        drop(suscripcion);
        store.quitar(STORAGE_KEY_TOKEN);
        event_bus::emit(EVENTO_TOKEN_ACTUALIZADO);
        assert_eq!(router.arbol(), NavigationTree::Doctor);
    }
}
