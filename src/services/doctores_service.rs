// ============================================================================
// DOCTORES SERVICE - CRUD de doctores y operaciones del doctor autenticado
// ============================================================================

use serde::{Deserialize, Serialize};

use crate::models::{Cita, Consultorio, Doctor, Horario, NuevoHorario};
use crate::services::api_client::{ApiClient, ApiError};

#[derive(Deserialize)]
struct DoctoresResponse {
    doctores: Vec<Doctor>,
}

#[derive(Deserialize)]
struct CitasResponse {
    citas: Vec<Cita>,
}

#[derive(Deserialize)]
struct CitasPendientesResponse {
    citas_pendientes: Vec<Cita>,
}

#[derive(Deserialize)]
struct MisHorariosResponse {
    mis_horarios: Vec<Horario>,
}

#[derive(Deserialize)]
struct MiConsultorioResponse {
    mi_consultorio: Option<Consultorio>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DoctorPayload {
    pub nombres: String,
    pub apellidos: String,
    pub email: String,
    pub telefono: String,
    pub especialidad_id: u32,
}

pub async fn get_doctores() -> Result<Vec<Doctor>, ApiError> {
    let r: DoctoresResponse = ApiClient::new().get("api/doctores").await?;
    Ok(r.doctores)
}

pub async fn create_doctor(datos: &DoctorPayload) -> Result<serde_json::Value, ApiError> {
    ApiClient::new().post("api/addDoctor", datos).await
}

pub async fn update_doctor(id: u32, datos: &DoctorPayload) -> Result<serde_json::Value, ApiError> {
    ApiClient::new()
        .put(&format!("api/updateDoctor/{}", id), datos)
        .await
}

pub async fn delete_doctor(id: u32) -> Result<serde_json::Value, ApiError> {
    ApiClient::new()
        .delete(&format!("api/deleteDoctor/{}", id))
        .await
}

// --- Operaciones del doctor autenticado ---

pub async fn get_mis_citas() -> Result<Vec<Cita>, ApiError> {
    let r: CitasResponse = ApiClient::new().get("api/mis-citas").await?;
    Ok(r.citas)
}

pub async fn get_mis_citas_pendientes() -> Result<Vec<Cita>, ApiError> {
    let r: CitasPendientesResponse = ApiClient::new().get("api/mis-citas-pendientes").await?;
    Ok(r.citas_pendientes)
}

pub async fn aprobar_cita(id: u32) -> Result<serde_json::Value, ApiError> {
    ApiClient::new()
        .put_vacio(&format!("api/aprobar-cita/{}", id))
        .await
}

pub async fn rechazar_cita(id: u32) -> Result<serde_json::Value, ApiError> {
    ApiClient::new()
        .put_vacio(&format!("api/rechazar-cita/{}", id))
        .await
}

pub async fn completar_cita(id: u32) -> Result<serde_json::Value, ApiError> {
    ApiClient::new()
        .put_vacio(&format!("api/completar-cita/{}", id))
        .await
}

pub async fn get_mis_horarios() -> Result<Vec<Horario>, ApiError> {
    let r: MisHorariosResponse = ApiClient::new().get("api/mis-horarios").await?;
    Ok(r.mis_horarios)
}

pub async fn get_mi_consultorio() -> Result<Option<Consultorio>, ApiError> {
    let r: MiConsultorioResponse = ApiClient::new().get("api/mi-consultorio").await?;
    Ok(r.mi_consultorio)
}

pub async fn create_horario(datos: &NuevoHorario) -> Result<serde_json::Value, ApiError> {
    ApiClient::new().post("api/addHorario", datos).await
}

pub async fn update_horario(id: u32, datos: &NuevoHorario) -> Result<serde_json::Value, ApiError> {
    ApiClient::new()
        .put(&format!("api/updateHorario/{}", id), datos)
        .await
}

pub async fn delete_horario(id: u32) -> Result<serde_json::Value, ApiError> {
    ApiClient::new()
        .delete(&format!("api/deleteHorario/{}", id))
        .await
}
