// ============================================================================
// USUARIOS SERVICE - CRUD de usuarios y roles (vista admin)
// ============================================================================

use serde::{Deserialize, Serialize};

use crate::models::{RolRecord, Usuario};
use crate::services::api_client::{ApiClient, ApiError};

#[derive(Deserialize)]
struct UsersResponse {
    users: Vec<Usuario>,
}

#[derive(Deserialize)]
struct RolesResponse {
    roles: Vec<RolRecord>,
}

#[derive(Debug, Clone, Serialize)]
pub struct UsuarioPayload {
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    pub rol: String,
}

pub async fn get_users() -> Result<Vec<Usuario>, ApiError> {
    let r: UsersResponse = ApiClient::new().get("api/users").await?;
    Ok(r.users)
}

pub async fn create_user(datos: &UsuarioPayload) -> Result<serde_json::Value, ApiError> {
    ApiClient::new().post("api/addUser", datos).await
}

pub async fn update_user(id: u32, datos: &UsuarioPayload) -> Result<serde_json::Value, ApiError> {
    ApiClient::new()
        .put(&format!("api/updateUser/{}", id), datos)
        .await
}

pub async fn delete_user(id: u32) -> Result<serde_json::Value, ApiError> {
    ApiClient::new()
        .delete(&format!("api/deleteUser/{}", id))
        .await
}

pub async fn get_roles() -> Result<Vec<RolRecord>, ApiError> {
    let r: RolesResponse = ApiClient::new().get("api/roles").await?;
    Ok(r.roles)
}
