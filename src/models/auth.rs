use serde::{Deserialize, Serialize};

use crate::models::usuario::Usuario;

/// Roles reconocidos por el cliente. Cualquier valor no reconocido
/// se trata como `Paciente` al resolver el árbol de navegación.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rol {
    Admin,
    Doctor,
    Paciente,
}

impl Rol {
    pub fn desde_texto(valor: &str) -> Option<Rol> {
        match valor {
            "admin" => Some(Rol::Admin),
            "doctor" => Some(Rol::Doctor),
            "paciente" => Some(Rol::Paciente),
            _ => None,
        }
    }

    /// Mapeo guard → rol, usado como respaldo cuando el usuario
    /// no trae la relación `rol` desde el backend
    pub fn desde_guard(guard: &str) -> Option<Rol> {
        match guard {
            "apiAdmin" => Some(Rol::Admin),
            "apiDoctor" => Some(Rol::Doctor),
            "apiPaciente" => Some(Rol::Paciente),
            _ => None,
        }
    }

    pub fn como_texto(&self) -> &'static str {
        match self {
            Rol::Admin => "admin",
            Rol::Doctor => "doctor",
            Rol::Paciente => "paciente",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub access_token: Option<String>,
    pub guard: Option<String>,
    pub user: Option<Usuario>,
}

/// Información de usuario cacheada en el almacenamiento local.
/// Se persiste como blob JSON junto al rol resuelto y el guard;
/// `extra` conserva los campos del backend que el cliente no modela.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserInfo {
    #[serde(default)]
    pub id: Option<u32>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub nombres: Option<String>,
    #[serde(default)]
    pub apellidos: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub telefono: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub guard: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl UserInfo {
    /// Fusiona los campos presentes de `otro` sobre este blob, conservando
    /// rol y guard locales cuando el backend no los devuelve
    pub fn fusionar(&mut self, otro: UserInfo) {
        if otro.id.is_some() {
            self.id = otro.id;
        }
        if otro.name.is_some() {
            self.name = otro.name;
        }
        if otro.nombres.is_some() {
            self.nombres = otro.nombres;
        }
        if otro.apellidos.is_some() {
            self.apellidos = otro.apellidos;
        }
        if otro.email.is_some() {
            self.email = otro.email;
        }
        if otro.telefono.is_some() {
            self.telefono = otro.telefono;
        }
        if otro.role.is_some() {
            self.role = otro.role;
        }
        if otro.guard.is_some() {
            self.guard = otro.guard;
        }
        self.extra.extend(otro.extra);
    }

    /// Nombre para mostrar en cabeceras y perfil
    pub fn nombre_visible(&self) -> String {
        match (&self.nombres, &self.apellidos) {
            (Some(n), Some(a)) => format!("{} {}", n, a),
            _ => self
                .name
                .clone()
                .or_else(|| self.email.clone())
                .unwrap_or_else(|| "Usuario".to_string()),
        }
    }
}
