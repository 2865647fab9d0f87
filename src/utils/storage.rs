use serde::{de::DeserializeOwned, Serialize};
use web_sys::{window, Storage};

pub fn get_local_storage() -> Option<Storage> {
    window()?.local_storage().ok()?
}

/// Lectura cruda por clave. `Ok(None)` significa clave ausente;
/// `Err` significa almacenamiento no disponible.
pub fn get_item(key: &str) -> Result<Option<String>, String> {
    let storage = get_local_storage().ok_or("No se pudo acceder a localStorage")?;
    storage
        .get_item(key)
        .map_err(|_| "Error accediendo a localStorage".to_string())
}

pub fn set_item(key: &str, value: &str) -> Result<(), String> {
    let storage = get_local_storage().ok_or("No se pudo acceder a localStorage")?;
    storage
        .set_item(key, value)
        .map_err(|_| "Error guardando en localStorage".to_string())
}

pub fn remove_item(key: &str) -> Result<(), String> {
    let storage = get_local_storage().ok_or("No se pudo acceder a localStorage")?;
    storage
        .remove_item(key)
        .map_err(|_| "Error eliminando de localStorage".to_string())
}

pub fn save_to_storage<T: Serialize>(key: &str, value: &T) -> Result<(), String> {
    let json = serde_json::to_string(value)
        .map_err(|e| format!("Error serializando datos: {}", e))?;
    set_item(key, &json)
}

pub fn load_from_storage<T: DeserializeOwned>(key: &str) -> Option<T> {
    let json = get_item(key).ok()??;
    serde_json::from_str(&json).ok()
}
