use serde::{Deserialize, Serialize};

/// Franja horaria de un doctor. El backend puede adjuntar la fecha de
/// tres maneras distintas: un timestamp combinado (`fechaHora` o
/// `fechaHoraInicio`), una fecha suelta (`fecha`, formato YYYY-MM-DD),
/// o ninguna (horario recurrente sin día asociado).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Horario {
    pub id: u32,
    #[serde(rename = "horaInicio")]
    pub hora_inicio: String,
    #[serde(rename = "horaFin")]
    pub hora_fin: String,
    #[serde(default)]
    pub estado: Option<String>,
    #[serde(default)]
    pub fecha: Option<String>,
    #[serde(default, rename = "fechaHora")]
    pub fecha_hora: Option<String>,
    #[serde(default, rename = "fechaHoraInicio")]
    pub fecha_hora_inicio: Option<String>,
    #[serde(default)]
    pub doctor_id: Option<u32>,
}

impl Horario {
    pub fn etiqueta(&self) -> String {
        format!("{} - {}", self.hora_inicio, self.hora_fin)
    }
}

/// Payload de creación/edición de horario (pantalla Horarios del doctor)
#[derive(Debug, Clone, Serialize)]
pub struct NuevoHorario {
    #[serde(rename = "horaInicio")]
    pub hora_inicio: String,
    #[serde(rename = "horaFin")]
    pub hora_fin: String,
    pub fecha: Option<String>,
    pub estado: String,
}
