// ============================================================================
// PACIENTES SERVICE - CRUD de pacientes y flujo de solicitud de citas
// ============================================================================

use serde::{Deserialize, Serialize};

use crate::models::{Cita, Consultorio, Doctor, Horario, NuevaCita, Paciente};
use crate::services::api_client::{ApiClient, ApiError};

#[derive(Deserialize)]
struct PacientesResponse {
    pacientes: Vec<Paciente>,
}

#[derive(Deserialize)]
struct CitasResponse {
    citas: Vec<Cita>,
}

#[derive(Deserialize)]
struct DoctoresDisponiblesResponse {
    doctores_disponibles: Vec<Doctor>,
}

#[derive(Deserialize)]
struct HorariosDisponiblesResponse {
    horarios_disponibles: Vec<Horario>,
}

#[derive(Deserialize)]
struct ConsultoriosDisponiblesResponse {
    consultorios_disponibles: Vec<Consultorio>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PacientePayload {
    pub nombres: String,
    pub apellidos: String,
    pub documento: String,
    pub email: String,
    pub telefono: String,
}

pub async fn get_pacientes() -> Result<Vec<Paciente>, ApiError> {
    let r: PacientesResponse = ApiClient::new().get("api/pacientes").await?;
    Ok(r.pacientes)
}

pub async fn create_paciente(datos: &PacientePayload) -> Result<serde_json::Value, ApiError> {
    ApiClient::new().post("api/addPaciete", datos).await
}

pub async fn update_paciente(
    id: u32,
    datos: &PacientePayload,
) -> Result<serde_json::Value, ApiError> {
    ApiClient::new()
        .put(&format!("api/updatePaciente/{}", id), datos)
        .await
}

pub async fn delete_paciente(id: u32) -> Result<serde_json::Value, ApiError> {
    ApiClient::new()
        .delete(&format!("api/deletePaciente/{}", id))
        .await
}

// --- Flujo de solicitud de cita del paciente autenticado ---

pub async fn get_mis_citas() -> Result<Vec<Cita>, ApiError> {
    let r: CitasResponse = ApiClient::new().get("api/mis-citas").await?;
    Ok(r.citas)
}

pub async fn solicitar_cita(datos: &NuevaCita) -> Result<serde_json::Value, ApiError> {
    ApiClient::new().post("api/solicitar-cita", datos).await
}

pub async fn get_doctores_disponibles() -> Result<Vec<Doctor>, ApiError> {
    let r: DoctoresDisponiblesResponse =
        ApiClient::new().get("api/doctores-disponibles").await?;
    Ok(r.doctores_disponibles)
}

/// Horarios disponibles de un doctor; `fecha` (YYYY-MM-DD) acota al día
/// elegido en la variante con calendario
pub async fn get_horarios_disponibles(
    doctor_id: u32,
    fecha: Option<&str>,
) -> Result<Vec<Horario>, ApiError> {
    let ruta = match fecha {
        Some(f) => format!("api/horarios-disponibles/{}?fecha={}", doctor_id, f),
        None => format!("api/horarios-disponibles/{}", doctor_id),
    };
    let r: HorariosDisponiblesResponse = ApiClient::new().get(&ruta).await?;
    Ok(r.horarios_disponibles)
}

pub async fn get_consultorios_disponibles(doctor_id: u32) -> Result<Vec<Consultorio>, ApiError> {
    let r: ConsultoriosDisponiblesResponse = ApiClient::new()
        .get(&format!("api/consultorios-disponibles/{}", doctor_id))
        .await?;
    Ok(r.consultorios_disponibles)
}
