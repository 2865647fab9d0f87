// ============================================================================
// FECHA/HORA - Composición del instante de la cita
// ============================================================================
// El backend reparte el componente fecha de un horario de tres maneras
// (timestamp combinado, fecha suelta, o nada). Toda la heurística vive en
// resolver_instante_cita, con una cadena de respaldo ordenada y fallo
// cerrado: jamás se envía una cita con fecha inventada silenciosamente.
// ============================================================================

use chrono::{
    DateTime, Datelike, Duration, Local, LocalResult, NaiveDate, NaiveDateTime, NaiveTime,
    SecondsFormat, TimeZone, Utc,
};
use thiserror::Error;

use crate::models::Horario;

/// Día de último recurso cuando el horario no trae fecha por ningún lado
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RespaldoFecha {
    DiaActual,
    DiaSiguiente,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("No fue posible construir una fechaHora válida. Verifica que el horario incluya fecha.")]
pub struct FechaIncompleta;

pub fn parsear_hora(valor: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(valor, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(valor, "%H:%M:%S"))
        .ok()
}

pub fn parsear_fecha(valor: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(valor, "%Y-%m-%d").ok()
}

/// Timestamp combinado tal como lo publica el backend: ISO local sin zona,
/// con zona, o "YYYY-MM-DD HH:MM:SS"
fn parsear_timestamp(valor: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(valor, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(valor, "%Y-%m-%d %H:%M:%S"))
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(valor)
                .ok()
                .map(|dt| dt.with_timezone(&Local).naive_local())
        })
}

/// Resuelve el instante de la cita combinando componente fecha y hora.
///
/// Cadena de prioridad para el componente fecha:
///   1. fecha explícita elegida en el calendario
///   2. timestamp combinado del horario (fechaHora / fechaHoraInicio)
///   3. fecha suelta del horario (YYYY-MM-DD) + horaInicio
///   4. día de respaldo (hoy o mañana, según estrategia) + horaInicio
///
/// Falla cerrado con FechaIncompleta si ninguna rama produce un instante
/// válido (incluida una horaInicio ilegible).
pub fn resolver_instante_cita(
    horario: &Horario,
    fecha_explicita: Option<NaiveDate>,
    respaldo: RespaldoFecha,
) -> Result<NaiveDateTime, FechaIncompleta> {
    let hora = parsear_hora(&horario.hora_inicio);

    if let (Some(fecha), Some(hora)) = (fecha_explicita, hora) {
        return Ok(fecha.and_time(hora));
    }

    if let Some(crudo) = horario
        .fecha_hora
        .as_deref()
        .or(horario.fecha_hora_inicio.as_deref())
    {
        if let Some(instante) = parsear_timestamp(crudo) {
            return Ok(instante);
        }
    }

    let hora = hora.ok_or(FechaIncompleta)?;

    if let Some(fecha) = horario.fecha.as_deref().and_then(parsear_fecha) {
        return Ok(fecha.and_time(hora));
    }

    let hoy = Local::now().date_naive();
    let dia = match respaldo {
        RespaldoFecha::DiaActual => hoy,
        RespaldoFecha::DiaSiguiente => hoy + Duration::days(1),
    };
    Ok(dia.and_time(hora))
}

/// Serializa el instante local a ISO-8601 en UTC (equivalente al
/// toISOString del payload original)
pub fn a_iso_utc(instante: NaiveDateTime) -> String {
    let utc: DateTime<Utc> = match Local.from_local_datetime(&instante) {
        LocalResult::Single(dt) => dt.with_timezone(&Utc),
        LocalResult::Ambiguous(dt, _) => dt.with_timezone(&Utc),
        // hueco de cambio horario: se interpreta como UTC directo
        LocalResult::None => Utc.from_utc_datetime(&instante),
    };
    utc.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Fecha de una cita ya existente, formateada para listas
pub fn formatear_fecha_hora(iso: &str) -> String {
    if let Ok(dt) = DateTime::parse_from_rfc3339(iso) {
        return dt
            .with_timezone(&Local)
            .format("%d/%m/%Y %H:%M")
            .to_string();
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(iso, "%Y-%m-%dT%H:%M:%S") {
        return naive.format("%d/%m/%Y %H:%M").to_string();
    }
    iso.to_string()
}

/// YYYY-MM-DD para la query de horarios-disponibles
pub fn a_ymd(fecha: NaiveDate) -> String {
    format!("{:04}-{:02}-{:02}", fecha.year(), fecha.month(), fecha.day())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn horario_base() -> Horario {
        Horario {
            id: 1,
            hora_inicio: "09:30".to_string(),
            hora_fin: "10:00".to_string(),
            estado: Some("Disponible".to_string()),
            fecha: None,
            fecha_hora: None,
            fecha_hora_inicio: None,
            doctor_id: Some(4),
        }
    }

    #[test]
    fn fecha_explicita_mas_hora_inicio() {
        let fecha = NaiveDate::from_ymd_opt(2025, 6, 10).unwrap();
        let instante =
            resolver_instante_cita(&horario_base(), Some(fecha), RespaldoFecha::DiaActual)
                .unwrap();

        // construcción explícita, no concatenación de cadenas
        let esperado = fecha.and_time(NaiveTime::from_hms_opt(9, 30, 0).unwrap());
        assert_eq!(instante, esperado);
    }

    #[test]
    fn el_timestamp_combinado_tiene_prioridad_sobre_la_fecha_suelta() {
        let mut horario = horario_base();
        horario.fecha_hora = Some("2025-07-01T14:00:00".to_string());
        horario.fecha = Some("2025-07-02".to_string());

        let instante =
            resolver_instante_cita(&horario, None, RespaldoFecha::DiaActual).unwrap();
        assert_eq!(
            instante,
            NaiveDate::from_ymd_opt(2025, 7, 1)
                .unwrap()
                .and_time(NaiveTime::from_hms_opt(14, 0, 0).unwrap())
        );
    }

    #[test]
    fn fecha_suelta_del_horario_mas_hora_inicio() {
        let mut horario = horario_base();
        horario.fecha = Some("2025-07-02".to_string());

        let instante =
            resolver_instante_cita(&horario, None, RespaldoFecha::DiaActual).unwrap();
        assert_eq!(
            instante,
            NaiveDate::from_ymd_opt(2025, 7, 2)
                .unwrap()
                .and_time(NaiveTime::from_hms_opt(9, 30, 0).unwrap())
        );
    }

    #[test]
    fn sin_fecha_por_ningun_lado_aplica_el_dia_de_respaldo() {
        let horario = horario_base();
        let hoy = Local::now().date_naive();

        let actual =
            resolver_instante_cita(&horario, None, RespaldoFecha::DiaActual).unwrap();
        assert_eq!(actual.date(), hoy);

        let siguiente =
            resolver_instante_cita(&horario, None, RespaldoFecha::DiaSiguiente).unwrap();
        assert_eq!(siguiente.date(), hoy + Duration::days(1));
    }

    #[test]
    fn hora_inicio_ilegible_falla_cerrado() {
        let mut horario = horario_base();
        horario.hora_inicio = "no-es-hora".to_string();

        let resultado = resolver_instante_cita(&horario, None, RespaldoFecha::DiaActual);
        assert_eq!(resultado, Err(FechaIncompleta));
    }

    #[test]
    fn timestamp_ilegible_cae_a_la_siguiente_rama() {
        let mut horario = horario_base();
        horario.fecha_hora = Some("ayer por la tarde".to_string());
        horario.fecha = Some("2025-07-02".to_string());

        let instante =
            resolver_instante_cita(&horario, None, RespaldoFecha::DiaActual).unwrap();
        assert_eq!(
            instante.date(),
            NaiveDate::from_ymd_opt(2025, 7, 2).unwrap()
        );
    }

    #[test]
    fn iso_utc_es_rfc3339_con_zulu() {
        let instante = NaiveDate::from_ymd_opt(2025, 6, 10)
            .unwrap()
            .and_time(NaiveTime::from_hms_opt(9, 30, 0).unwrap());

        let iso = a_iso_utc(instante);
        assert!(iso.ends_with('Z'), "se serializa en UTC: {}", iso);
        assert!(DateTime::parse_from_rfc3339(&iso).is_ok());
    }

    #[test]
    fn formato_de_listas() {
        assert_eq!(
            formatear_fecha_hora("2025-06-10T09:30:00"),
            "10/06/2025 09:30"
        );
        // entrada irreconocible se muestra tal cual
        assert_eq!(formatear_fecha_hora("pendiente"), "pendiente");
    }

    #[test]
    fn a_ymd_rellena_con_ceros() {
        let fecha = NaiveDate::from_ymd_opt(2025, 3, 7).unwrap();
        assert_eq!(a_ymd(fecha), "2025-03-07");
    }
}
