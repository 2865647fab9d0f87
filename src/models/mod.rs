pub mod auth;
pub mod cita;
pub mod consultorio;
pub mod doctor;
pub mod especialidad;
pub mod horario;
pub mod paciente;
pub mod usuario;

pub use auth::{LoginRequest, LoginResponse, Rol, UserInfo};
pub use cita::{Cita, EstadoCita, NuevaCita};
pub use consultorio::Consultorio;
pub use doctor::Doctor;
pub use especialidad::Especialidad;
pub use horario::{Horario, NuevoHorario};
pub use paciente::Paciente;
pub use usuario::{RolRecord, Usuario};
