use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RolRecord {
    pub id: u32,
    pub rol: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Usuario {
    pub id: u32,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub rol: Option<RolRecord>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}
