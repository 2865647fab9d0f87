use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Consultorio {
    pub id: u32,
    pub codigo: String,
    pub ubicacion: String,
    #[serde(default)]
    pub estado: Option<String>,
}

impl Consultorio {
    pub fn etiqueta(&self) -> String {
        format!("{} - {}", self.codigo, self.ubicacion)
    }
}
