use serde::{Deserialize, Serialize};

use crate::models::consultorio::Consultorio;
use crate::models::doctor::Doctor;
use crate::models::paciente::Paciente;

/// Estados que maneja el backend para una cita
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EstadoCita {
    Programada,
    #[serde(rename = "Por aprobar")]
    PorAprobar,
    Completada,
    Rechazada,
    #[serde(other)]
    Desconocido,
}

impl EstadoCita {
    pub fn como_texto(&self) -> &'static str {
        match self {
            EstadoCita::Programada => "Programada",
            EstadoCita::PorAprobar => "Por aprobar",
            EstadoCita::Completada => "Completada",
            EstadoCita::Rechazada => "Rechazada",
            EstadoCita::Desconocido => "Desconocido",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cita {
    pub id: u32,
    #[serde(rename = "fechaHora")]
    pub fecha_hora: String,
    pub estado: EstadoCita,
    #[serde(default)]
    pub novedad: Option<String>,
    #[serde(default)]
    pub paciente_id: Option<u32>,
    #[serde(default)]
    pub doctor_id: Option<u32>,
    #[serde(default)]
    pub consultorio_id: Option<u32>,
    #[serde(default)]
    pub paciente: Option<Paciente>,
    #[serde(default)]
    pub doctor: Option<Doctor>,
    #[serde(default)]
    pub consultorio: Option<Consultorio>,
}

/// Payload de solicitud de cita construido por el asistente de solicitud.
/// `fecha_hora` viaja como ISO-8601 en UTC.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NuevaCita {
    pub doctor_id: u32,
    pub consultorio_id: u32,
    #[serde(rename = "fechaHora")]
    pub fecha_hora: String,
    pub novedad: String,
}
