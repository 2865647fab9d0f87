pub mod api_client;
pub mod auth_service;
pub mod citas_service;
pub mod consultorios_service;
pub mod doctores_service;
pub mod especialidades_service;
pub mod event_bus;
pub mod lifecycle_monitor;
pub mod pacientes_service;
pub mod usuarios_service;

pub use api_client::{ApiClient, ApiError};
pub use lifecycle_monitor::{AppLifecycle, LifecycleMonitor};
