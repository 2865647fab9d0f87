// ============================================================================
// ESPECIALIDADES SERVICE - CRUD de especialidades
// ============================================================================

use serde::{Deserialize, Serialize};

use crate::models::Especialidad;
use crate::services::api_client::{ApiClient, ApiError};

#[derive(Deserialize)]
struct EspecialidadesResponse {
    especialidad: Vec<Especialidad>,
}

#[derive(Debug, Clone, Serialize)]
pub struct EspecialidadPayload {
    pub especialidad: String,
    pub descripcion: String,
}

pub async fn get_especialidades() -> Result<Vec<Especialidad>, ApiError> {
    let r: EspecialidadesResponse = ApiClient::new().get("api/Especialidades").await?;
    Ok(r.especialidad)
}

pub async fn create_especialidad(
    datos: &EspecialidadPayload,
) -> Result<serde_json::Value, ApiError> {
    ApiClient::new().post("api/addEspecialidad", datos).await
}

pub async fn update_especialidad(
    id: u32,
    datos: &EspecialidadPayload,
) -> Result<serde_json::Value, ApiError> {
    ApiClient::new()
        .put(&format!("api/updateEspecialidad/{}", id), datos)
        .await
}

pub async fn delete_especialidad(id: u32) -> Result<serde_json::Value, ApiError> {
    ApiClient::new()
        .delete(&format!("api/deleteEspecialidad/{}", id))
        .await
}
