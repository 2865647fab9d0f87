// ============================================================================
// COMPONENTES COMPARTIDOS - Header, cards, modales, campos de formulario
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::{Element, MouseEvent};

use crate::dom::{append_child, on_click, ElementBuilder};
use crate::models::EstadoCita;

/// Cabecera de pantalla con botón de acción opcional
pub fn render_header<F>(
    titulo: &str,
    accion: Option<(&str, F)>,
) -> Result<Element, JsValue>
where
    F: FnMut(MouseEvent) + 'static,
{
    let header = ElementBuilder::new("div")?.class("screen-header").build();

    let titulo_el = ElementBuilder::new("h2")?
        .class("screen-title")
        .text(titulo)
        .build();
    append_child(&header, &titulo_el)?;

    if let Some((texto, handler)) = accion {
        let boton = ElementBuilder::new("button")?
            .class("btn btn-primary")
            .text(texto)
            .build();
        on_click(&boton, handler)?;
        append_child(&header, &boton)?;
    }

    Ok(header)
}

/// Estado vacío de una lista
pub fn render_empty_state(titulo: &str, mensaje: &str) -> Result<Element, JsValue> {
    let contenedor = ElementBuilder::new("div")?.class("empty-state").build();
    let titulo_el = ElementBuilder::new("h3")?.text(titulo).build();
    let mensaje_el = ElementBuilder::new("p")?.text(mensaje).build();
    append_child(&contenedor, &titulo_el)?;
    append_child(&contenedor, &mensaje_el)?;
    Ok(contenedor)
}

/// Card de selección del asistente (doctor / horario / consultorio)
pub fn render_selection_card<F>(
    titulo: &str,
    subtitulo: &str,
    seleccionado: bool,
    handler: F,
) -> Result<Element, JsValue>
where
    F: FnMut(MouseEvent) + 'static,
{
    let clase = if seleccionado {
        "selection-card selected"
    } else {
        "selection-card"
    };
    let card = ElementBuilder::new("div")?.class(clase).build();

    let titulo_el = ElementBuilder::new("div")?
        .class("selection-card-title")
        .text(titulo)
        .build();
    append_child(&card, &titulo_el)?;

    if !subtitulo.is_empty() {
        let subtitulo_el = ElementBuilder::new("div")?
            .class("selection-card-subtitle")
            .text(subtitulo)
            .build();
        append_child(&card, &subtitulo_el)?;
    }

    on_click(&card, handler)?;
    Ok(card)
}

/// Badge de estado de cita
pub fn render_estado_badge(estado: EstadoCita) -> Result<Element, JsValue> {
    let clase = match estado {
        EstadoCita::Programada => "badge badge-programada",
        EstadoCita::PorAprobar => "badge badge-pendiente",
        EstadoCita::Completada => "badge badge-completada",
        EstadoCita::Rechazada => "badge badge-rechazada",
        EstadoCita::Desconocido => "badge",
    };
    Ok(ElementBuilder::new("span")?
        .class(clase)
        .text(estado.como_texto())
        .build())
}

/// Campo de texto de formulario con id para lectura en el submit
pub fn campo_texto(
    id: &str,
    etiqueta: &str,
    tipo: &str,
    valor: &str,
) -> Result<Element, JsValue> {
    let grupo = ElementBuilder::new("div")?.class("form-group").build();

    let etiqueta_el = ElementBuilder::new("label")?
        .attr("for", id)?
        .text(etiqueta)
        .build();
    append_child(&grupo, &etiqueta_el)?;

    let input = ElementBuilder::new("input")?
        .class("form-input")
        .id(id)?
        .attr("type", tipo)?
        .attr("value", valor)?
        .build();
    append_child(&grupo, &input)?;

    Ok(grupo)
}

/// Select de formulario; `opciones` son pares (valor, etiqueta)
pub fn campo_select(
    id: &str,
    etiqueta: &str,
    opciones: &[(String, String)],
    seleccionado: Option<&str>,
) -> Result<Element, JsValue> {
    let grupo = ElementBuilder::new("div")?.class("form-group").build();

    let etiqueta_el = ElementBuilder::new("label")?
        .attr("for", id)?
        .text(etiqueta)
        .build();
    append_child(&grupo, &etiqueta_el)?;

    let select = ElementBuilder::new("select")?
        .class("form-input")
        .id(id)?
        .build();

    for (valor, texto) in opciones {
        let mut opcion = ElementBuilder::new("option")?.attr("value", valor)?;
        if seleccionado == Some(valor.as_str()) {
            opcion = opcion.attr("selected", "selected")?;
        }
        append_child(&select, &opcion.text(texto).build())?;
    }

    append_child(&grupo, &select)?;
    Ok(grupo)
}

/// Valor de un campo de formulario por id
pub fn valor_de_campo(id: &str) -> String {
    use wasm_bindgen::JsCast;
    crate::dom::get_element_by_id(id)
        .map(|el| {
            if let Some(select) = el.dyn_ref::<web_sys::HtmlSelectElement>() {
                select.value()
            } else {
                crate::dom::input_value(&el)
            }
        })
        .unwrap_or_default()
}

/// Cascarón de modal con overlay; el contenido lo aporta cada pantalla
pub fn render_modal(titulo: &str, contenido: Element) -> Result<Element, JsValue> {
    let overlay = ElementBuilder::new("div")?.class("modal-overlay").build();
    let modal = ElementBuilder::new("div")?.class("modal-content").build();

    let titulo_el = ElementBuilder::new("h3")?
        .class("modal-title")
        .text(titulo)
        .build();
    append_child(&modal, &titulo_el)?;
    append_child(&modal, &contenido)?;
    append_child(&overlay, &modal)?;

    Ok(overlay)
}

/// Botón genérico
pub fn render_boton<F>(texto: &str, clase: &str, handler: F) -> Result<Element, JsValue>
where
    F: FnMut(MouseEvent) + 'static,
{
    let boton = ElementBuilder::new("button")?.class(clase).text(texto).build();
    on_click(&boton, handler)?;
    Ok(boton)
}

/// Enlace de retroceso del asistente ("Cambiar Doctor", "Cambiar Día", …)
pub fn render_volver<F>(texto: &str, handler: F) -> Result<Element, JsValue>
where
    F: FnMut(MouseEvent) + 'static,
{
    render_boton(texto, "btn btn-link", handler)
}

/// Spinner sencillo para estados de carga
pub fn render_cargando(mensaje: &str) -> Result<Element, JsValue> {
    let contenedor = ElementBuilder::new("div")?.class("loading-spinner").build();
    let texto = ElementBuilder::new("p")?.text(mensaje).build();
    append_child(&contenedor, &texto)?;
    Ok(contenedor)
}
