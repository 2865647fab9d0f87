// ============================================================================
// SESSION - Lectura de sesión y resolución del árbol de navegación
// ============================================================================

use crate::models::{Rol, UserInfo};
use crate::utils::{STORAGE_KEY_TOKEN, STORAGE_KEY_USER_INFO};

/// Contrato del almacén clave/valor de sesión. Abstrae localStorage para
/// que el router sea verificable fuera del navegador.
pub trait SessionStore {
    fn get(&self, clave: &str) -> Result<Option<String>, String>;
    fn set(&self, clave: &str, valor: &str) -> Result<(), String>;
    fn remove(&self, clave: &str) -> Result<(), String>;
}

/// Implementación de producción sobre localStorage
pub struct LocalSessionStore;

impl SessionStore for LocalSessionStore {
    fn get(&self, clave: &str) -> Result<Option<String>, String> {
        crate::utils::get_item(clave)
    }

    fn set(&self, clave: &str, valor: &str) -> Result<(), String> {
        crate::utils::set_item(clave, valor)
    }

    fn remove(&self, clave: &str) -> Result<(), String> {
        crate::utils::remove_item(clave)
    }
}

/// Árboles de navegación que puede montar la aplicación
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationTree {
    Auth,
    Admin,
    Doctor,
    Paciente,
}

impl NavigationTree {
    /// Pestañas del árbol, en orden de presentación
    pub fn pestanas(&self) -> &'static [&'static str] {
        match self {
            NavigationTree::Auth => &[],
            NavigationTree::Admin => &[
                "Inicio",
                "Usuarios",
                "Doctores",
                "Pacientes",
                "Especialidades",
                "Consultorios",
                "Citas",
                "Perfil",
            ],
            NavigationTree::Doctor => &["Inicio", "MisCitas", "Horarios", "Perfil"],
            NavigationTree::Paciente => &["Inicio", "MisCitas", "Perfil"],
        }
    }
}

/// Resolución pura del árbol a partir del estado de sesión leído.
/// Sin token siempre gana Auth; con token, un rol ausente o no
/// reconocido degrada a Paciente (nunca a un árbol privilegiado).
pub fn resolver_navegacion(token: Option<&str>, rol: Option<&str>) -> NavigationTree {
    if token.is_none() {
        return NavigationTree::Auth;
    }

    match rol.and_then(Rol::desde_texto) {
        Some(Rol::Admin) => NavigationTree::Admin,
        Some(Rol::Doctor) => NavigationTree::Doctor,
        Some(Rol::Paciente) | None => NavigationTree::Paciente,
    }
}

/// Lee token y rol cacheados. Cualquier fallo de lectura se degrada a
/// sesión ausente: nunca se propaga como error al árbol de render.
pub fn leer_sesion(store: &dyn SessionStore) -> (Option<String>, Option<String>) {
    let token = store.get(STORAGE_KEY_TOKEN).unwrap_or(None);

    let rol = store
        .get(STORAGE_KEY_USER_INFO)
        .unwrap_or(None)
        .and_then(|json| serde_json::from_str::<UserInfo>(&json).ok())
        .and_then(|info| info.role);

    (token, rol)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sin_token_siempre_auth() {
        assert_eq!(resolver_navegacion(None, None), NavigationTree::Auth);
        // un rol cacheado obsoleto no mantiene la sesión viva
        assert_eq!(
            resolver_navegacion(None, Some("admin")),
            NavigationTree::Auth
        );
    }

    #[test]
    fn con_token_el_rol_elige_el_arbol() {
        assert_eq!(
            resolver_navegacion(Some("tok"), Some("admin")),
            NavigationTree::Admin
        );
        assert_eq!(
            resolver_navegacion(Some("tok"), Some("doctor")),
            NavigationTree::Doctor
        );
        assert_eq!(
            resolver_navegacion(Some("tok"), Some("paciente")),
            NavigationTree::Paciente
        );
    }

    #[test]
    fn rol_ausente_o_desconocido_degrada_a_paciente() {
        assert_eq!(
            resolver_navegacion(Some("tok"), None),
            NavigationTree::Paciente
        );
        assert_eq!(
            resolver_navegacion(Some("tok"), Some("superusuario")),
            NavigationTree::Paciente
        );
    }

    #[test]
    fn el_arbol_doctor_expone_sus_pestanas() {
        assert_eq!(
            NavigationTree::Doctor.pestanas(),
            &["Inicio", "MisCitas", "Horarios", "Perfil"]
        );
    }
}
