// ============================================================================
// STATE MODULE - State Management con Rc<RefCell> + notificaciones
// ============================================================================

pub mod app_state;
pub mod router;
pub mod session;

pub use app_state::AppState;
pub use router::{EstadoRouter, SessionRouter};
pub use session::{resolver_navegacion, LocalSessionStore, NavigationTree, SessionStore};
