// ============================================================================
// EVENT BUS - Broadcast interno de eventos (pub/sub en proceso)
// ============================================================================
// Sustituye al emisor de eventos del dispositivo: emit() notifica a todos
// los suscriptores registrados para un evento. La suscripción es un recurso
// con dueño: al soltar la Subscription el handler se da de baja, de modo
// que un componente desmontado nunca recibe callbacks tardíos.
// ============================================================================

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

type Handler = Rc<dyn Fn()>;

#[derive(Default)]
struct Registro {
    siguiente_id: usize,
    handlers: HashMap<String, Vec<(usize, Handler)>>,
}

thread_local! {
    static REGISTRO: RefCell<Registro> = RefCell::new(Registro::default());
}

/// Suscripción activa; darla de baja = soltarla
pub struct Subscription {
    evento: String,
    id: usize,
}

pub fn emit(evento: &str) {
    // Se clonan los handlers antes de invocar para tolerar que un handler
    // emita o (de)suscriba durante la notificación
    let lista: Vec<Handler> = REGISTRO.with(|r| {
        r.borrow()
            .handlers
            .get(evento)
            .map(|v| v.iter().map(|(_, h)| h.clone()).collect())
            .unwrap_or_default()
    });

    for handler in lista {
        handler();
    }
}

pub fn subscribe<F>(evento: &str, handler: F) -> Subscription
where
    F: Fn() + 'static,
{
    REGISTRO.with(|r| {
        let mut registro = r.borrow_mut();
        let id = registro.siguiente_id;
        registro.siguiente_id += 1;
        registro
            .handlers
            .entry(evento.to_string())
            .or_default()
            .push((id, Rc::new(handler)));
        Subscription {
            evento: evento.to_string(),
            id,
        }
    })
}

impl Drop for Subscription {
    fn drop(&mut self) {
        REGISTRO.with(|r| {
            if let Some(lista) = r.borrow_mut().handlers.get_mut(&self.evento) {
                lista.retain(|(id, _)| *id != self.id);
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emit_notifica_a_los_suscriptores() {
        let contador = Rc::new(RefCell::new(0));
        let c = contador.clone();
        let _sub = subscribe("prueba-emit", move || *c.borrow_mut() += 1);

        emit("prueba-emit");
        emit("prueba-emit");
        assert_eq!(*contador.borrow(), 2);
    }

    #[test]
    fn soltar_la_suscripcion_da_de_baja() {
        let contador = Rc::new(RefCell::new(0));
        let c = contador.clone();
        let sub = subscribe("prueba-baja", move || *c.borrow_mut() += 1);

        emit("prueba-baja");
        drop(sub);
        emit("prueba-baja");
        assert_eq!(*contador.borrow(), 1);
    }

    #[test]
    fn eventos_distintos_no_se_cruzan() {
        let contador = Rc::new(RefCell::new(0));
        let c = contador.clone();
        let _sub = subscribe("prueba-a", move || *c.borrow_mut() += 1);

        emit("prueba-b");
        assert_eq!(*contador.borrow(), 0);
    }
}
