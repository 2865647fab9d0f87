// ============================================================================
// CITAS VIEWMODEL - Listas de citas y transiciones de estado del doctor
// ============================================================================
// Aprobar dispara directo; rechazar y completar exigen confirmación
// explícita del usuario antes de tocar la red (eso lo gobierna la vista,
// aquí solo viven las llamadas y la traducción de errores).
// ============================================================================

use crate::models::Cita;
use crate::services::api_client::ApiError;
use crate::services::{doctores_service, pacientes_service};

pub struct CitasViewModel;

impl CitasViewModel {
    /// Citas del paciente autenticado
    pub async fn cargar_citas_paciente() -> Result<Vec<Cita>, ApiError> {
        pacientes_service::get_mis_citas().await
    }

    /// Citas del doctor autenticado: todas + pendientes de aprobación.
    /// Un fallo en pendientes no tumba la lista principal.
    pub async fn cargar_citas_doctor() -> Result<(Vec<Cita>, Vec<Cita>), ApiError> {
        let citas = doctores_service::get_mis_citas().await?;
        let pendientes = match doctores_service::get_mis_citas_pendientes().await {
            Ok(p) => p,
            Err(e) => {
                log::warn!("⚠️ No se pudieron cargar las citas pendientes: {}", e);
                Vec::new()
            }
        };
        Ok((citas, pendientes))
    }

    pub async fn aprobar(cita_id: u32) -> Result<(), String> {
        doctores_service::aprobar_cita(cita_id)
            .await
            .map(|_| ())
            .map_err(|e| e.mensaje_usuario("No se pudo aprobar la cita"))
    }

    pub async fn rechazar(cita_id: u32) -> Result<(), String> {
        doctores_service::rechazar_cita(cita_id)
            .await
            .map(|_| ())
            .map_err(|e| e.mensaje_usuario("No se pudo rechazar la cita"))
    }

    pub async fn completar(cita_id: u32) -> Result<(), String> {
        doctores_service::completar_cita(cita_id)
            .await
            .map(|_| ())
            .map_err(|e| e.mensaje_usuario("No se pudo completar la cita"))
    }
}
