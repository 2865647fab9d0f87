/// URL base del backend
/// Configurada en tiempo de compilación:
/// - Desarrollo: http://localhost:8000 (por defecto)
/// - Producción: via BACKEND_URL env var
pub const BACKEND_URL: &str = match option_env!("BACKEND_URL") {
    Some(url) => url,
    None => "http://localhost:8000",
};

/// Claves de almacenamiento local
pub const STORAGE_KEY_TOKEN: &str = "userToken";
pub const STORAGE_KEY_USER_INFO: &str = "userInfo";

/// Evento interno de broadcast emitido tras login/logout/edición de perfil
pub const EVENTO_TOKEN_ACTUALIZADO: &str = "tokenUpdated";

/// Novedad por defecto cuando el paciente no escribe nota
pub const NOVEDAD_POR_DEFECTO: &str = "Cita solicitada por el paciente";
