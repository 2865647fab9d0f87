// ============================================================================
// SOLICITUD DE CITA - Máquina de estados del asistente de solicitud
// ============================================================================
// Flujo lineal doctor → (fecha) → horario → consultorio → confirmar →
// enviada. Cada retroceso limpia la etapa destino y todo lo posterior,
// nunca un reseteo parcial. Las cargas por etapa llevan un contador de
// generación: una respuesta tardía de una etapa abandonada no pisa el
// estado de la etapa vigente.
// ============================================================================

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use chrono::NaiveDate;
use thiserror::Error;

use crate::models::{Consultorio, Doctor, Horario, NuevaCita};
use crate::services::api_client::ApiError;
use crate::services::pacientes_service;
use crate::utils::NOVEDAD_POR_DEFECTO;
use crate::viewmodels::fecha_hora::{
    a_iso_utc, a_ymd, resolver_instante_cita, FechaIncompleta, RespaldoFecha,
};

/// Etapas nombradas del asistente
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Etapa {
    Doctor,
    Fecha,
    Horario,
    Consultorio,
    Confirmar,
    Enviada,
}

/// Variante del flujo de fecha:
/// - Calendario: el paciente elige día explícito y los horarios se piden
///   acotados a doctor+fecha
/// - DesdeHorario: sin etapa de fecha; el día sale de los metadatos del
///   horario, con día de respaldo configurable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModoFecha {
    Calendario,
    DesdeHorario(RespaldoFecha),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SolicitudError {
    #[error("Por favor selecciona un doctor, una fecha, un horario y un consultorio")]
    SeleccionIncompleta,
    #[error(transparent)]
    FechaIncompleta(#[from] FechaIncompleta),
}

#[derive(Clone)]
pub struct SolicitudCita {
    pub modo: ModoFecha,
    etapa: Rc<RefCell<Etapa>>,
    pub visible: Rc<RefCell<bool>>,
    pub doctor: Rc<RefCell<Option<Doctor>>>,
    pub fecha: Rc<RefCell<Option<NaiveDate>>>,
    pub fecha_confirmada: Rc<RefCell<bool>>,
    pub horario: Rc<RefCell<Option<Horario>>>,
    pub consultorio: Rc<RefCell<Option<Consultorio>>>,
    pub novedad: Rc<RefCell<String>>,

    // listas por etapa
    pub doctores: Rc<RefCell<Vec<Doctor>>>,
    pub horarios: Rc<RefCell<Vec<Horario>>>,
    pub consultorios: Rc<RefCell<Vec<Consultorio>>>,

    pub enviando: Rc<RefCell<bool>>,
    // invalida respuestas en vuelo de etapas abandonadas
    generacion: Rc<Cell<u32>>,
}

impl SolicitudCita {
    pub fn new(modo: ModoFecha) -> Self {
        Self {
            modo,
            etapa: Rc::new(RefCell::new(Etapa::Doctor)),
            visible: Rc::new(RefCell::new(false)),
            doctor: Rc::new(RefCell::new(None)),
            fecha: Rc::new(RefCell::new(None)),
            fecha_confirmada: Rc::new(RefCell::new(false)),
            horario: Rc::new(RefCell::new(None)),
            consultorio: Rc::new(RefCell::new(None)),
            novedad: Rc::new(RefCell::new(String::new())),
            doctores: Rc::new(RefCell::new(Vec::new())),
            horarios: Rc::new(RefCell::new(Vec::new())),
            consultorios: Rc::new(RefCell::new(Vec::new())),
            enviando: Rc::new(RefCell::new(false)),
            generacion: Rc::new(Cell::new(0)),
        }
    }

    pub fn etapa(&self) -> Etapa {
        *self.etapa.borrow()
    }

    pub fn generacion_actual(&self) -> u32 {
        self.generacion.get()
    }

    fn invalidar_cargas(&self) {
        self.generacion.set(self.generacion.get().wrapping_add(1));
    }

    /// Abrir el asistente: selección siempre vacía al arrancar
    pub fn abrir(&self) {
        self.invalidar_cargas();
        *self.etapa.borrow_mut() = Etapa::Doctor;
        *self.doctor.borrow_mut() = None;
        *self.fecha.borrow_mut() = None;
        *self.fecha_confirmada.borrow_mut() = false;
        *self.horario.borrow_mut() = None;
        *self.consultorio.borrow_mut() = None;
        self.novedad.borrow_mut().clear();
        self.horarios.borrow_mut().clear();
        self.consultorios.borrow_mut().clear();
        *self.enviando.borrow_mut() = false;
        *self.visible.borrow_mut() = true;
    }

    /// Cerrar el asistente; las respuestas en vuelo quedan invalidadas
    pub fn cerrar(&self) {
        self.invalidar_cargas();
        *self.visible.borrow_mut() = false;
    }

    /// Elegir doctor: limpia todo lo posterior y avanza de etapa
    pub fn seleccionar_doctor(&self, doctor: Doctor) {
        self.invalidar_cargas();
        *self.doctor.borrow_mut() = Some(doctor);
        *self.fecha.borrow_mut() = None;
        *self.fecha_confirmada.borrow_mut() = false;
        *self.horario.borrow_mut() = None;
        *self.consultorio.borrow_mut() = None;
        self.horarios.borrow_mut().clear();
        self.consultorios.borrow_mut().clear();

        *self.etapa.borrow_mut() = match self.modo {
            ModoFecha::Calendario => Etapa::Fecha,
            ModoFecha::DesdeHorario(_) => Etapa::Horario,
        };
    }

    /// Confirmar día del calendario: resetea cualquier horario previo
    pub fn confirmar_fecha(&self, fecha: NaiveDate) {
        if self.doctor.borrow().is_none() {
            return;
        }
        self.invalidar_cargas();
        *self.fecha.borrow_mut() = Some(fecha);
        *self.fecha_confirmada.borrow_mut() = true;
        *self.horario.borrow_mut() = None;
        *self.consultorio.borrow_mut() = None;
        self.horarios.borrow_mut().clear();
        *self.etapa.borrow_mut() = Etapa::Horario;
    }

    pub fn seleccionar_horario(&self, horario: Horario) {
        if self.etapa() != Etapa::Horario {
            return;
        }
        *self.horario.borrow_mut() = Some(horario);
        *self.etapa.borrow_mut() = Etapa::Consultorio;
    }

    pub fn seleccionar_consultorio(&self, consultorio: Consultorio) {
        if self.etapa() != Etapa::Consultorio {
            return;
        }
        *self.consultorio.borrow_mut() = Some(consultorio);
        *self.etapa.borrow_mut() = Etapa::Confirmar;
    }

    /// Retroceso explícito: limpia la etapa destino y todas las
    /// posteriores, jamás deja una selección aguas abajo apuntando a una
    /// combinación obsoleta
    pub fn volver_a(&self, destino: Etapa) {
        self.invalidar_cargas();
        match destino {
            Etapa::Doctor => {
                *self.doctor.borrow_mut() = None;
                *self.fecha.borrow_mut() = None;
                *self.fecha_confirmada.borrow_mut() = false;
                *self.horario.borrow_mut() = None;
                *self.consultorio.borrow_mut() = None;
                self.horarios.borrow_mut().clear();
                self.consultorios.borrow_mut().clear();
            }
            Etapa::Fecha => {
                *self.fecha.borrow_mut() = None;
                *self.fecha_confirmada.borrow_mut() = false;
                *self.horario.borrow_mut() = None;
                *self.consultorio.borrow_mut() = None;
                self.horarios.borrow_mut().clear();
            }
            Etapa::Horario => {
                *self.horario.borrow_mut() = None;
                *self.consultorio.borrow_mut() = None;
            }
            Etapa::Consultorio => {
                *self.consultorio.borrow_mut() = None;
            }
            Etapa::Confirmar | Etapa::Enviada => return,
        }
        *self.etapa.borrow_mut() = destino;
    }

    /// El envío solo es alcanzable con doctor, (fecha,) horario y
    /// consultorio elegidos; el control de enviar no se muestra antes
    pub fn puede_enviar(&self) -> bool {
        let fecha_lista = match self.modo {
            ModoFecha::Calendario => {
                *self.fecha_confirmada.borrow() && self.fecha.borrow().is_some()
            }
            ModoFecha::DesdeHorario(_) => true,
        };

        self.doctor.borrow().is_some()
            && fecha_lista
            && self.horario.borrow().is_some()
            && self.consultorio.borrow().is_some()
            && !*self.enviando.borrow()
    }

    /// Construye el payload final. Valida antes de tocar la red y falla
    /// cerrado si el componente fecha no se puede resolver.
    pub fn construir_cita(&self) -> Result<NuevaCita, SolicitudError> {
        let doctor = self.doctor.borrow();
        let horario = self.horario.borrow();
        let consultorio = self.consultorio.borrow();

        let (doctor, horario, consultorio) = match (&*doctor, &*horario, &*consultorio) {
            (Some(d), Some(h), Some(c)) => (d, h, c),
            _ => return Err(SolicitudError::SeleccionIncompleta),
        };

        let (fecha_explicita, respaldo) = match self.modo {
            ModoFecha::Calendario => {
                if !*self.fecha_confirmada.borrow() || self.fecha.borrow().is_none() {
                    return Err(SolicitudError::SeleccionIncompleta);
                }
                (*self.fecha.borrow(), RespaldoFecha::DiaActual)
            }
            ModoFecha::DesdeHorario(respaldo) => (None, respaldo),
        };

        let instante = resolver_instante_cita(horario, fecha_explicita, respaldo)?;

        let novedad = self.novedad.borrow().trim().to_string();
        let novedad = if novedad.is_empty() {
            NOVEDAD_POR_DEFECTO.to_string()
        } else {
            novedad
        };

        Ok(NuevaCita {
            doctor_id: doctor.id,
            consultorio_id: consultorio.id,
            fecha_hora: a_iso_utc(instante),
            novedad,
        })
    }

    // --- Aplicación de resultados de carga (con guarda de generación) ---

    pub fn aplicar_doctores(&self, generacion: u32, lista: Vec<Doctor>) {
        if generacion != self.generacion.get() {
            log::info!("🕓 Lista de doctores descartada (etapa abandonada)");
            return;
        }
        *self.doctores.borrow_mut() = lista;
    }

    /// Aplica horarios solo si la respuesta corresponde a la selección
    /// vigente (misma generación y mismo doctor)
    pub fn aplicar_horarios(&self, generacion: u32, doctor_id: u32, lista: Vec<Horario>) {
        let vigente = self.doctor.borrow().as_ref().map(|d| d.id) == Some(doctor_id);
        if generacion != self.generacion.get() || !vigente {
            log::info!("🕓 Horarios de doctor {} descartados (respuesta tardía)", doctor_id);
            return;
        }
        *self.horarios.borrow_mut() = lista;
    }

    pub fn aplicar_consultorios(&self, generacion: u32, doctor_id: u32, lista: Vec<Consultorio>) {
        let vigente = self.doctor.borrow().as_ref().map(|d| d.id) == Some(doctor_id);
        if generacion != self.generacion.get() || !vigente {
            log::info!(
                "🕓 Consultorios de doctor {} descartados (respuesta tardía)",
                doctor_id
            );
            return;
        }
        *self.consultorios.borrow_mut() = lista;
    }

    // --- Cargas remotas por etapa (secuenciales, una por transición) ---

    /// Disponibilidad de doctores, una vez por sesión del asistente
    pub async fn cargar_doctores(&self) -> Result<(), ApiError> {
        let generacion = self.generacion.get();
        let lista = pacientes_service::get_doctores_disponibles().await?;
        self.aplicar_doctores(generacion, lista);
        Ok(())
    }

    pub async fn cargar_horarios(&self) -> Result<(), ApiError> {
        let generacion = self.generacion.get();
        let doctor_id = match self.doctor.borrow().as_ref().map(|d| d.id) {
            Some(id) => id,
            None => return Ok(()),
        };
        let fecha = match self.modo {
            ModoFecha::Calendario => self.fecha.borrow().map(a_ymd),
            ModoFecha::DesdeHorario(_) => None,
        };

        let lista =
            pacientes_service::get_horarios_disponibles(doctor_id, fecha.as_deref()).await?;
        self.aplicar_horarios(generacion, doctor_id, lista);
        Ok(())
    }

    pub async fn cargar_consultorios(&self) -> Result<(), ApiError> {
        let generacion = self.generacion.get();
        let doctor_id = match self.doctor.borrow().as_ref().map(|d| d.id) {
            Some(id) => id,
            None => return Ok(()),
        };

        let lista = pacientes_service::get_consultorios_disponibles(doctor_id).await?;
        self.aplicar_consultorios(generacion, doctor_id, lista);
        Ok(())
    }

    /// Envía la solicitud. En éxito cierra el asistente; en fallo conserva
    /// toda la selección para reintentar y devuelve el mensaje del
    /// servidor tal cual cuando existe.
    pub async fn enviar(&self) -> Result<(), String> {
        let cita = self.construir_cita().map_err(|e| e.to_string())?;

        *self.enviando.borrow_mut() = true;
        let resultado = pacientes_service::solicitar_cita(&cita).await;
        *self.enviando.borrow_mut() = false;

        match resultado {
            Ok(_) => {
                log::info!("✅ Cita solicitada correctamente");
                *self.etapa.borrow_mut() = Etapa::Enviada;
                self.cerrar();
                Ok(())
            }
            Err(e) => Err(e.mensaje_usuario("Error al solicitar la cita")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    fn doctor(id: u32) -> Doctor {
        Doctor {
            id,
            nombres: "Laura".to_string(),
            apellidos: "Gómez".to_string(),
            email: None,
            telefono: None,
            especialidad_id: None,
            especialidad: None,
        }
    }

    fn horario(id: u32) -> Horario {
        Horario {
            id,
            hora_inicio: "09:30".to_string(),
            hora_fin: "10:00".to_string(),
            estado: Some("Disponible".to_string()),
            fecha: None,
            fecha_hora: None,
            fecha_hora_inicio: None,
            doctor_id: None,
        }
    }

    fn consultorio(id: u32) -> Consultorio {
        Consultorio {
            id,
            codigo: "C-101".to_string(),
            ubicacion: "Piso 1".to_string(),
            estado: None,
        }
    }

    fn solicitud_completa(modo: ModoFecha) -> SolicitudCita {
        let s = SolicitudCita::new(modo);
        s.abrir();
        s.seleccionar_doctor(doctor(4));
        if modo == ModoFecha::Calendario {
            s.confirmar_fecha(NaiveDate::from_ymd_opt(2025, 6, 10).unwrap());
        }
        s.seleccionar_horario(horario(9));
        s.seleccionar_consultorio(consultorio(2));
        s
    }

    #[test]
    fn el_envio_no_es_alcanzable_con_seleccion_incompleta() {
        let s = SolicitudCita::new(ModoFecha::Calendario);
        s.abrir();
        assert!(!s.puede_enviar());
        assert_eq!(
            s.construir_cita(),
            Err(SolicitudError::SeleccionIncompleta)
        );

        s.seleccionar_doctor(doctor(4));
        assert!(!s.puede_enviar());

        s.confirmar_fecha(NaiveDate::from_ymd_opt(2025, 6, 10).unwrap());
        assert!(!s.puede_enviar());

        s.seleccionar_horario(horario(9));
        assert!(!s.puede_enviar());

        s.seleccionar_consultorio(consultorio(2));
        assert!(s.puede_enviar());
    }

    #[test]
    fn en_modo_calendario_la_fecha_es_obligatoria() {
        let s = SolicitudCita::new(ModoFecha::Calendario);
        s.abrir();
        s.seleccionar_doctor(doctor(4));
        // sin fecha confirmada no se puede avanzar de etapa ni enviar
        s.seleccionar_horario(horario(9));
        assert_eq!(s.etapa(), Etapa::Fecha);
        assert!(!s.puede_enviar());
    }

    #[test]
    fn las_etapas_avanzan_en_orden() {
        let s = SolicitudCita::new(ModoFecha::Calendario);
        s.abrir();
        assert_eq!(s.etapa(), Etapa::Doctor);

        s.seleccionar_doctor(doctor(4));
        assert_eq!(s.etapa(), Etapa::Fecha);

        s.confirmar_fecha(NaiveDate::from_ymd_opt(2025, 6, 10).unwrap());
        assert_eq!(s.etapa(), Etapa::Horario);

        s.seleccionar_horario(horario(9));
        assert_eq!(s.etapa(), Etapa::Consultorio);

        s.seleccionar_consultorio(consultorio(2));
        assert_eq!(s.etapa(), Etapa::Confirmar);
    }

    #[test]
    fn sin_etapa_de_fecha_en_modo_desde_horario() {
        let s = SolicitudCita::new(ModoFecha::DesdeHorario(RespaldoFecha::DiaActual));
        s.abrir();
        s.seleccionar_doctor(doctor(4));
        assert_eq!(s.etapa(), Etapa::Horario);
    }

    #[test]
    fn cambiar_de_doctor_limpia_horario_y_consultorio() {
        let s = solicitud_completa(ModoFecha::Calendario);
        assert!(s.puede_enviar());

        s.seleccionar_doctor(doctor(5));
        // ninguna selección aguas abajo sobrevive al doctor anterior
        assert!(s.horario.borrow().is_none());
        assert!(s.consultorio.borrow().is_none());
        assert!(s.horarios.borrow().is_empty());
        assert!(s.consultorios.borrow().is_empty());
        assert!(!*s.fecha_confirmada.borrow());
        assert!(!s.puede_enviar());
    }

    #[test]
    fn volver_a_una_etapa_limpia_todo_lo_posterior() {
        let s = solicitud_completa(ModoFecha::Calendario);

        s.volver_a(Etapa::Fecha);
        assert_eq!(s.etapa(), Etapa::Fecha);
        assert!(s.doctor.borrow().is_some());
        assert!(s.fecha.borrow().is_none());
        assert!(s.horario.borrow().is_none());
        assert!(s.consultorio.borrow().is_none());

        let s = solicitud_completa(ModoFecha::Calendario);
        s.volver_a(Etapa::Consultorio);
        assert_eq!(s.etapa(), Etapa::Consultorio);
        assert!(s.horario.borrow().is_some());
        assert!(s.consultorio.borrow().is_none());
    }

    #[test]
    fn el_payload_compone_fecha_y_hora_del_calendario() {
        let s = solicitud_completa(ModoFecha::Calendario);
        let cita = s.construir_cita().unwrap();

        assert_eq!(cita.doctor_id, 4);
        assert_eq!(cita.consultorio_id, 2);

        let esperado = a_iso_utc(
            NaiveDate::from_ymd_opt(2025, 6, 10)
                .unwrap()
                .and_time(NaiveTime::from_hms_opt(9, 30, 0).unwrap()),
        );
        assert_eq!(cita.fecha_hora, esperado);
    }

    #[test]
    fn la_novedad_en_blanco_usa_el_texto_por_defecto() {
        let s = solicitud_completa(ModoFecha::Calendario);
        *s.novedad.borrow_mut() = "   ".to_string();

        let cita = s.construir_cita().unwrap();
        assert_eq!(cita.novedad, NOVEDAD_POR_DEFECTO);

        *s.novedad.borrow_mut() = "  Dolor de cabeza  ".to_string();
        let cita = s.construir_cita().unwrap();
        assert_eq!(cita.novedad, "Dolor de cabeza");
    }

    #[test]
    fn horario_sin_fecha_en_modo_desde_horario_falla_cerrado() {
        let s = solicitud_completa(ModoFecha::DesdeHorario(RespaldoFecha::DiaActual));
        // una horaInicio ilegible deja la cadena sin rama válida
        s.horario.borrow_mut().as_mut().unwrap().hora_inicio = "??".to_string();

        assert!(matches!(
            s.construir_cita(),
            Err(SolicitudError::FechaIncompleta(_))
        ));
    }

    #[test]
    fn una_respuesta_tardia_no_pisa_la_etapa_vigente() {
        let s = SolicitudCita::new(ModoFecha::DesdeHorario(RespaldoFecha::DiaActual));
        s.abrir();
        s.seleccionar_doctor(doctor(4));

        // arranca la carga de horarios del doctor 4...
        let gen_anterior = s.generacion_actual();

        // ...pero el usuario cambia de doctor antes de que llegue
        s.seleccionar_doctor(doctor(5));
        s.aplicar_horarios(gen_anterior, 4, vec![horario(1), horario(2)]);
        assert!(
            s.horarios.borrow().is_empty(),
            "la respuesta obsoleta debe descartarse"
        );

        // la respuesta de la selección vigente sí se aplica
        s.aplicar_horarios(s.generacion_actual(), 5, vec![horario(3)]);
        assert_eq!(s.horarios.borrow().len(), 1);
    }

    #[test]
    fn cerrar_el_asistente_invalida_cargas_en_vuelo() {
        let s = SolicitudCita::new(ModoFecha::Calendario);
        s.abrir();
        let gen = s.generacion_actual();
        s.cerrar();

        s.aplicar_doctores(gen, vec![doctor(1)]);
        assert!(s.doctores.borrow().is_empty());
    }

    #[test]
    fn abrir_resetea_la_seleccion_anterior() {
        let s = solicitud_completa(ModoFecha::Calendario);
        *s.novedad.borrow_mut() = "algo".to_string();

        s.abrir();
        assert_eq!(s.etapa(), Etapa::Doctor);
        assert!(s.doctor.borrow().is_none());
        assert!(s.horario.borrow().is_none());
        assert!(s.consultorio.borrow().is_none());
        assert!(s.novedad.borrow().is_empty());
    }
}
