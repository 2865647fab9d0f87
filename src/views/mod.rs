pub mod admin;
pub mod app;
pub mod citas;
pub mod componentes;
pub mod horarios;
pub mod inicio;
pub mod login;
pub mod perfil;
pub mod registro;
pub mod solicitar_cita;

pub use app::render_app;
