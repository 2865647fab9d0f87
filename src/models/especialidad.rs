use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Especialidad {
    pub id: u32,
    pub especialidad: String,
    #[serde(default)]
    pub descripcion: Option<String>,
}
