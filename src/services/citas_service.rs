// ============================================================================
// CITAS SERVICE - CRUD de citas (vista admin)
// ============================================================================

use serde::{Deserialize, Serialize};

use crate::models::Cita;
use crate::services::api_client::{ApiClient, ApiError};

#[derive(Deserialize)]
struct CitasResponse {
    #[serde(rename = "citasMedicas")]
    citas_medicas: Vec<Cita>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CitaPayload {
    pub doctor_id: u32,
    pub paciente_id: u32,
    pub consultorio_id: u32,
    #[serde(rename = "fechaHora")]
    pub fecha_hora: String,
    pub estado: String,
    pub novedad: String,
}

pub async fn get_citas() -> Result<Vec<Cita>, ApiError> {
    let r: CitasResponse = ApiClient::new().get("api/citas").await?;
    Ok(r.citas_medicas)
}

pub async fn create_cita(datos: &CitaPayload) -> Result<serde_json::Value, ApiError> {
    ApiClient::new().post("api/addCita", datos).await
}

pub async fn update_cita(id: u32, datos: &CitaPayload) -> Result<serde_json::Value, ApiError> {
    ApiClient::new()
        .put(&format!("api/updateCita/{}", id), datos)
        .await
}

pub async fn delete_cita(id: u32) -> Result<serde_json::Value, ApiError> {
    ApiClient::new()
        .delete(&format!("api/deleteCita/{}", id))
        .await
}
