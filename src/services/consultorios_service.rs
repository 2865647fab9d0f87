// ============================================================================
// CONSULTORIOS SERVICE - CRUD de consultorios
// ============================================================================

use serde::{Deserialize, Serialize};

use crate::models::Consultorio;
use crate::services::api_client::{ApiClient, ApiError};

#[derive(Deserialize)]
struct ConsultoriosResponse {
    consultorios: Vec<Consultorio>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ConsultorioPayload {
    pub codigo: String,
    pub ubicacion: String,
    pub estado: String,
}

pub async fn get_consultorios() -> Result<Vec<Consultorio>, ApiError> {
    let r: ConsultoriosResponse = ApiClient::new().get("api/consultorios").await?;
    Ok(r.consultorios)
}

pub async fn create_consultorio(datos: &ConsultorioPayload) -> Result<serde_json::Value, ApiError> {
    ApiClient::new().post("api/addConsultorio", datos).await
}

pub async fn update_consultorio(
    id: u32,
    datos: &ConsultorioPayload,
) -> Result<serde_json::Value, ApiError> {
    ApiClient::new()
        .put(&format!("api/updateConsultorio/{}", id), datos)
        .await
}

pub async fn delete_consultorio(id: u32) -> Result<serde_json::Value, ApiError> {
    ApiClient::new()
        .delete(&format!("api/deleteConsultorio/{}", id))
        .await
}
