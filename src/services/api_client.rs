// ============================================================================
// API CLIENT - Pasarela HTTP única (stateless)
// ============================================================================
// NO tiene lógica de negocio, solo hace requests HTTP.
// Adjunta credenciales a toda ruta no pública y traduce fallos a ApiError.
// Un 401 en ruta protegida limpia el token guardado una sola vez por
// petición, sin reintento ni redirección: el router de sesión observa el
// token ausente en su siguiente tick y monta el árbol de autenticación.
// ============================================================================

use gloo_net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

use crate::models::UserInfo;
use crate::utils::{
    get_item, load_from_storage, remove_item, BACKEND_URL, STORAGE_KEY_TOKEN,
    STORAGE_KEY_USER_INFO,
};

/// Rutas sin autentificación
const RUTAS_PUBLICAS: &[&str] = &["api/login"];

#[derive(Debug, Clone, Error)]
pub enum ApiError {
    #[error("Error de conexión: {0}")]
    Red(String),
    #[error("{mensaje}")]
    Http { estado: u16, mensaje: String },
    #[error("Sesión expirada o no autorizada")]
    NoAutorizado,
    #[error("Error interpretando la respuesta: {0}")]
    Parseo(String),
}

impl ApiError {
    /// Mensaje del servidor tal cual si existe; respaldo genérico si no
    pub fn mensaje_usuario(&self, respaldo: &str) -> String {
        match self {
            ApiError::Http { mensaje, .. } if !mensaje.starts_with("HTTP ") => mensaje.clone(),
            ApiError::NoAutorizado => self.to_string(),
            _ => respaldo.to_string(),
        }
    }
}

pub fn es_ruta_publica(ruta: &str) -> bool {
    RUTAS_PUBLICAS.iter().any(|r| ruta.contains(r))
}

/// Decide si un 401 debe limpiar el token guardado. `ya_limpiado` es el
/// flag de la petición en curso: garantiza una única limpieza por request.
pub fn debe_limpiar_token(estado: u16, ruta: &str, ya_limpiado: bool) -> bool {
    estado == 401 && !es_ruta_publica(ruta) && !ya_limpiado
}

/// Cliente API - SOLO comunicación HTTP (stateless)
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
}

impl ApiClient {
    pub fn new() -> Self {
        Self {
            base_url: BACKEND_URL.to_string(),
        }
    }

    fn url(&self, ruta: &str) -> String {
        format!("{}/{}", self.base_url, ruta)
    }

    /// Adjunta cabeceras comunes y credenciales (salvo rutas públicas)
    fn con_credenciales(&self, builder: RequestBuilder, ruta: &str) -> RequestBuilder {
        let mut builder = builder.header("Accept", "application/json");

        if !es_ruta_publica(ruta) {
            if let Ok(Some(token)) = get_item(STORAGE_KEY_TOKEN) {
                builder = builder.header("Authorization", &format!("Bearer {}", token));
            }
            if let Some(info) = load_from_storage::<UserInfo>(STORAGE_KEY_USER_INFO) {
                if let Some(guard) = info.guard {
                    builder = builder.header("X-Guard", &guard);
                }
            }
        }

        builder
    }

    async fn procesar<T: DeserializeOwned>(
        &self,
        ruta: &str,
        respuesta: Response,
    ) -> Result<T, ApiError> {
        let estado = respuesta.status();

        let mut token_limpiado = false;
        if debe_limpiar_token(estado, ruta, token_limpiado) {
            let _ = remove_item(STORAGE_KEY_TOKEN);
            token_limpiado = true;
            log::warn!("🔒 Token expirado o no autorizado; se limpia la sesión local");
        }
        if token_limpiado {
            return Err(ApiError::NoAutorizado);
        }

        if !respuesta.ok() {
            let mensaje = extraer_mensaje(&respuesta)
                .await
                .unwrap_or_else(|| format!("HTTP {}", estado));
            return Err(ApiError::Http { estado, mensaje });
        }

        respuesta
            .json::<T>()
            .await
            .map_err(|e| ApiError::Parseo(e.to_string()))
    }

    pub async fn get<T: DeserializeOwned>(&self, ruta: &str) -> Result<T, ApiError> {
        let respuesta = self
            .con_credenciales(Request::get(&self.url(ruta)), ruta)
            .send()
            .await
            .map_err(|e| ApiError::Red(e.to_string()))?;
        self.procesar(ruta, respuesta).await
    }

    pub async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        ruta: &str,
        cuerpo: &B,
    ) -> Result<T, ApiError> {
        let respuesta = self
            .con_credenciales(Request::post(&self.url(ruta)), ruta)
            .json(cuerpo)
            .map_err(|e| ApiError::Parseo(e.to_string()))?
            .send()
            .await
            .map_err(|e| ApiError::Red(e.to_string()))?;
        self.procesar(ruta, respuesta).await
    }

    /// POST sin cuerpo (p.ej. logout)
    pub async fn post_vacio<T: DeserializeOwned>(&self, ruta: &str) -> Result<T, ApiError> {
        let respuesta = self
            .con_credenciales(Request::post(&self.url(ruta)), ruta)
            .send()
            .await
            .map_err(|e| ApiError::Red(e.to_string()))?;
        self.procesar(ruta, respuesta).await
    }

    pub async fn put<B: Serialize, T: DeserializeOwned>(
        &self,
        ruta: &str,
        cuerpo: &B,
    ) -> Result<T, ApiError> {
        let respuesta = self
            .con_credenciales(Request::put(&self.url(ruta)), ruta)
            .json(cuerpo)
            .map_err(|e| ApiError::Parseo(e.to_string()))?
            .send()
            .await
            .map_err(|e| ApiError::Red(e.to_string()))?;
        self.procesar(ruta, respuesta).await
    }

    /// PUT sin cuerpo (transiciones de estado: aprobar/rechazar/completar)
    pub async fn put_vacio<T: DeserializeOwned>(&self, ruta: &str) -> Result<T, ApiError> {
        let respuesta = self
            .con_credenciales(Request::put(&self.url(ruta)), ruta)
            .send()
            .await
            .map_err(|e| ApiError::Red(e.to_string()))?;
        self.procesar(ruta, respuesta).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, ruta: &str) -> Result<T, ApiError> {
        let respuesta = self
            .con_credenciales(Request::delete(&self.url(ruta)), ruta)
            .send()
            .await
            .map_err(|e| ApiError::Red(e.to_string()))?;
        self.procesar(ruta, respuesta).await
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Intenta extraer el campo `message` del cuerpo de error del backend
async fn extraer_mensaje(respuesta: &Response) -> Option<String> {
    let valor = respuesta.json::<serde_json::Value>().await.ok()?;
    valor
        .get("message")
        .and_then(|m| m.as_str())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_es_ruta_publica() {
        assert!(es_ruta_publica("api/login"));
        assert!(!es_ruta_publica("api/mis-citas"));
        assert!(!es_ruta_publica("api/doctores"));
    }

    #[test]
    fn el_401_en_ruta_protegida_limpia_una_sola_vez() {
        // primera evaluación de la petición: limpia
        assert!(debe_limpiar_token(401, "api/mis-citas", false));
        // con el flag ya levantado no vuelve a limpiar (sin bucle de reintento)
        assert!(!debe_limpiar_token(401, "api/mis-citas", true));
    }

    #[test]
    fn el_401_en_ruta_publica_no_limpia() {
        assert!(!debe_limpiar_token(401, "api/login", false));
    }

    #[test]
    fn otros_estados_no_limpian() {
        assert!(!debe_limpiar_token(403, "api/mis-citas", false));
        assert!(!debe_limpiar_token(500, "api/mis-citas", false));
        assert!(!debe_limpiar_token(200, "api/mis-citas", false));
    }

    #[test]
    fn mensaje_usuario_prefiere_el_del_servidor() {
        let err = ApiError::Http {
            estado: 422,
            mensaje: "El horario ya no está disponible".to_string(),
        };
        assert_eq!(
            err.mensaje_usuario("Error al solicitar la cita"),
            "El horario ya no está disponible"
        );

        let err = ApiError::Red("fetch failed".to_string());
        assert_eq!(
            err.mensaje_usuario("Error al solicitar la cita"),
            "Error al solicitar la cita"
        );
    }
}
