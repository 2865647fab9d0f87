// ============================================================================
// AUTH SERVICE - Autenticación y perfil
// ============================================================================
// Único escritor de la sesión local: login/logout/edición de perfil
// persisten token + userInfo y emiten el broadcast tokenUpdated para que
// el router de sesión refresque de inmediato.
// ============================================================================

use serde::{Deserialize, Serialize};

use crate::models::{LoginRequest, LoginResponse, Rol, UserInfo, Usuario};
use crate::services::api_client::{ApiClient, ApiError};
use crate::services::event_bus;
use crate::utils::{
    load_from_storage, remove_item, save_to_storage, set_item, EVENTO_TOKEN_ACTUALIZADO,
    STORAGE_KEY_TOKEN, STORAGE_KEY_USER_INFO,
};

/// Resuelve el rol efectivo de un usuario autenticado: primero la relación
/// `rol` del usuario, después el guard como respaldo, y `paciente` como
/// valor por defecto.
pub fn resolver_rol(user: &Usuario, guard: Option<&str>) -> Rol {
    if let Some(rol) = user.rol.as_ref().and_then(|r| Rol::desde_texto(&r.rol)) {
        return rol;
    }
    if let Some(rol) = guard.and_then(Rol::desde_guard) {
        return rol;
    }
    Rol::Paciente
}

/// Login contra `api/login` (ruta pública). En éxito persiste token y
/// userInfo (con rol resuelto y guard) y emite tokenUpdated.
pub async fn login_user(email: &str, password: &str) -> Result<UserInfo, ApiError> {
    let api = ApiClient::new();
    let peticion = LoginRequest {
        email: email.to_string(),
        password: password.to_string(),
    };

    let respuesta: LoginResponse = api.post("api/login", &peticion).await?;

    let (token, user) = match (respuesta.access_token, respuesta.user) {
        (Some(t), Some(u)) => (t, u),
        _ => {
            return Err(ApiError::Parseo(
                "Respuesta sin token o usuario".to_string(),
            ))
        }
    };

    let rol = resolver_rol(&user, respuesta.guard.as_deref());
    log::info!("✅ Login exitoso - Rol: {} Guard: {:?}", rol.como_texto(), respuesta.guard);

    let info = UserInfo {
        id: Some(user.id),
        name: Some(user.name.clone()),
        email: Some(user.email.clone()),
        role: Some(rol.como_texto().to_string()),
        guard: respuesta.guard,
        extra: user.extra.clone(),
        ..UserInfo::default()
    };

    set_item(STORAGE_KEY_TOKEN, &token).map_err(ApiError::Parseo)?;
    save_to_storage(STORAGE_KEY_USER_INFO, &info).map_err(ApiError::Parseo)?;

    event_bus::emit(EVENTO_TOKEN_ACTUALIZADO);
    Ok(info)
}

#[derive(Serialize)]
struct RegistroRequest {
    name: String,
    email: String,
    password: String,
    rol: String,
}

#[derive(Deserialize)]
struct RegistroResponse {
    #[serde(default)]
    message: Option<String>,
}

/// Registro de usuario nuevo (`api/addUser`)
pub async fn register_user(
    name: &str,
    email: &str,
    password: &str,
    rol: &str,
) -> Result<String, ApiError> {
    let api = ApiClient::new();
    let peticion = RegistroRequest {
        name: name.to_string(),
        email: email.to_string(),
        password: password.to_string(),
        rol: rol.to_string(),
    };

    let respuesta: RegistroResponse = api.post("api/addUser", &peticion).await?;
    Ok(respuesta
        .message
        .unwrap_or_else(|| "Registro exitoso".to_string()))
}

/// Información de usuario cacheada; cualquier fallo de lectura se trata
/// como sesión ausente
pub fn get_user_info() -> Option<UserInfo> {
    load_from_storage(STORAGE_KEY_USER_INFO)
}

/// Logout: intenta invalidar el token en el backend y siempre limpia la
/// sesión local, incluso si la llamada remota falla.
pub async fn logout() -> Result<(), String> {
    let api = ApiClient::new();
    if let Err(e) = api.post_vacio::<serde_json::Value>("api/logout").await {
        log::warn!("⚠️ Error al cerrar sesión en el backend: {}", e);
    }

    remove_item(STORAGE_KEY_TOKEN)?;
    remove_item(STORAGE_KEY_USER_INFO)?;
    event_bus::emit(EVENTO_TOKEN_ACTUALIZADO);
    log::info!("👋 Sesión cerrada");
    Ok(())
}

#[derive(Deserialize)]
struct PerfilResponse {
    user: UserInfo,
}

/// Perfil autenticado desde el backend (`api/mi-perfil`)
pub async fn get_user_profile() -> Result<UserInfo, ApiError> {
    let api = ApiClient::new();
    let respuesta: PerfilResponse = api.get("api/mi-perfil").await?;
    Ok(respuesta.user)
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ActualizarPerfil {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nombres: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub apellidos: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub telefono: Option<String>,
}

/// Actualiza el perfil y fusiona la respuesta en el blob local, sin perder
/// rol ni guard; emite tokenUpdated para refrescar cabeceras y navegación.
pub async fn update_user_profile(datos: &ActualizarPerfil) -> Result<UserInfo, ApiError> {
    let api = ApiClient::new();
    let respuesta: PerfilResponse = api.put("api/actualizar-perfil", datos).await?;

    let mut info = get_user_info().unwrap_or_default();
    info.fusionar(respuesta.user);
    save_to_storage(STORAGE_KEY_USER_INFO, &info).map_err(ApiError::Parseo)?;

    event_bus::emit(EVENTO_TOKEN_ACTUALIZADO);
    Ok(info)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::usuario::RolRecord;

    fn usuario(rol: Option<&str>) -> Usuario {
        Usuario {
            id: 7,
            name: "Ana".to_string(),
            email: "ana@eps.test".to_string(),
            rol: rol.map(|r| RolRecord {
                id: 1,
                rol: r.to_string(),
            }),
            extra: serde_json::Map::new(),
        }
    }

    #[test]
    fn la_relacion_rol_tiene_prioridad() {
        let rol = resolver_rol(&usuario(Some("admin")), Some("apiPaciente"));
        assert_eq!(rol, Rol::Admin);
    }

    #[test]
    fn sin_relacion_se_usa_el_guard() {
        assert_eq!(
            resolver_rol(&usuario(None), Some("apiDoctor")),
            Rol::Doctor
        );
        assert_eq!(
            resolver_rol(&usuario(None), Some("apiAdmin")),
            Rol::Admin
        );
    }

    #[test]
    fn sin_rol_ni_guard_se_asume_paciente() {
        assert_eq!(resolver_rol(&usuario(None), None), Rol::Paciente);
        // guard no reconocido tampoco promociona
        assert_eq!(
            resolver_rol(&usuario(None), Some("apiOtraCosa")),
            Rol::Paciente
        );
    }

    #[test]
    fn rol_no_reconocido_cae_al_guard() {
        assert_eq!(
            resolver_rol(&usuario(Some("superusuario")), Some("apiDoctor")),
            Rol::Doctor
        );
    }
}
