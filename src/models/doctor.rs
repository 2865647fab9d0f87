use serde::{Deserialize, Serialize};

use crate::models::especialidad::Especialidad;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Doctor {
    pub id: u32,
    pub nombres: String,
    pub apellidos: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub telefono: Option<String>,
    #[serde(default)]
    pub especialidad_id: Option<u32>,
    #[serde(default)]
    pub especialidad: Option<Especialidad>,
}

impl Doctor {
    pub fn nombre_completo(&self) -> String {
        format!("Dr. {} {}", self.nombres, self.apellidos)
    }

    pub fn nombre_especialidad(&self) -> &str {
        self.especialidad
            .as_ref()
            .map(|e| e.especialidad.as_str())
            .unwrap_or("Sin especialidad")
    }
}
