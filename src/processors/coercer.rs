use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};

use crate::models::{Cell, Status, MAX_QUANTITY};
use crate::processors::cleaner::ResolvedIdentity;
use crate::processors::normalizer::NormalizedRow;
use crate::utils::header::CanonicalField;
use crate::utils::text::title_case_company;

/// Días entre el epoch de serial de hoja de cálculo (1899-12-30) y el de Unix.
const SERIAL_EPOCH_OFFSET_DAYS: f64 = 25569.0;
const MS_PER_DAY: f64 = 86_400_000.0;

/// Longitud canónica de un número de orden.
const PO_DIGITS: usize = 5;

/// Valor coercionado junto con la marca de si se usó el valor por defecto.
/// Los coercionadores nunca fallan; el validador decide después.
#[derive(Debug, Clone)]
pub struct Coerced<T> {
    pub value: T,
    pub defaulted: bool,
}

impl<T> Coerced<T> {
    fn provided(value: T) -> Self {
        Self { value, defaulted: false }
    }

    fn defaulted(value: T) -> Self {
        Self { value, defaulted: true }
    }
}

/// Fila completamente coercionada, lista para validarse.
#[derive(Debug, Clone)]
pub struct CoercedRow {
    pub company_name: String,
    pub po_number: String,
    pub part_name: Coerced<String>,
    pub quantity: Coerced<i64>,
    pub status: Coerced<Status>,
    pub created_at: Coerced<DateTime<Utc>>,
}

/// Aplica todos los coercionadores sobre una fila ya resuelta.
pub fn coerce_row(
    row: &NormalizedRow,
    identity: &ResolvedIdentity,
    default_company: Option<&str>,
) -> CoercedRow {
    let company_raw = identity
        .company
        .clone()
        .or_else(|| default_company.map(str::to_string))
        .unwrap_or_default();

    CoercedRow {
        company_name: title_case_company(&company_raw),
        po_number: identity
            .order
            .as_deref()
            .map(normalize_order_number)
            .unwrap_or_default(),
        part_name: resolve_part_name(row),
        quantity: parse_quantity(row.cell(CanonicalField::Cantidad)),
        status: map_status(row.text(CanonicalField::Estatus)),
        created_at: parse_date(row.cell(CanonicalField::Fecha)),
    }
}

/// Canonicaliza un número de orden: quita el prefijo SO/PO, extrae los
/// dígitos y los deja en 5 posiciones (rellena con ceros o conserva los
/// últimos 5). Así colisionan correctamente las órdenes que cada
/// departamento escribe a su manera.
pub fn normalize_order_number(raw: &str) -> String {
    let trimmed = raw.trim();

    let mut rest = trimmed;
    let prefix: String = trimmed.chars().take(2).collect();
    if prefix.eq_ignore_ascii_case("so") || prefix.eq_ignore_ascii_case("po") {
        rest = &trimmed[2..];
        rest = rest.strip_prefix('/').unwrap_or(rest).trim_start();
    }

    let digits: String = rest.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        // resto sin dígitos: se conserva tal cual como valor de respaldo
        return rest.to_string();
    }

    if digits.len() > PO_DIGITS {
        digits[digits.len() - PO_DIGITS..].to_string()
    } else {
        format!("{:0>width$}", digits, width = PO_DIGITS)
    }
}

/// Resuelve el nombre de parte: columna combinada primero, después
/// "número - descripción", y "Sin nombre" solo si todo viene vacío.
pub fn resolve_part_name(row: &NormalizedRow) -> Coerced<String> {
    if let Some(parte) = row.text(CanonicalField::Parte) {
        return Coerced::provided(parte);
    }

    let numero = row.text(CanonicalField::NumeroParte);
    let descripcion = row.text(CanonicalField::Descripcion);
    match (numero, descripcion) {
        (Some(numero), Some(descripcion)) => {
            Coerced::provided(format!("{} - {}", numero, descripcion))
        }
        (Some(numero), None) => Coerced::provided(numero),
        (None, Some(descripcion)) => Coerced::provided(descripcion),
        (None, None) => Coerced::defaulted("Sin nombre".to_string()),
    }
}

/// Interpreta la cantidad: separadores de miles fuera, enteros dentro de
/// [0, MAX_QUANTITY]; lo no numérico o negativo se vuelve 0.
pub fn parse_quantity(cell: Option<&Cell>) -> Coerced<i64> {
    let parsed = match cell {
        Some(Cell::Number(f)) if f.is_finite() => Some(f.trunc() as i64),
        Some(Cell::Text(t)) => {
            let cleaned: String = t.trim().chars().filter(|c| *c != ',' && *c != ' ').collect();
            cleaned
                .parse::<i64>()
                .ok()
                .or_else(|| cleaned.parse::<f64>().ok().filter(|f| f.is_finite()).map(|f| f.trunc() as i64))
        }
        _ => None,
    };

    match parsed {
        Some(value) => Coerced::provided(value.clamp(0, MAX_QUANTITY)),
        None => Coerced::defaulted(0),
    }
}

/// Interpreta la fecha de creación.
///
/// Las celdas numéricas son seriales de hoja de cálculo; los textos se
/// intentan como fecha libre. Lo que no se entiende toma "ahora" al momento
/// de coercionar, no al inicio del lote.
pub fn parse_date(cell: Option<&Cell>) -> Coerced<DateTime<Utc>> {
    let parsed = match cell {
        Some(Cell::Number(serial)) => serial_to_instant(*serial),
        Some(Cell::Text(t)) => parse_free_text_date(t.trim()),
        _ => None,
    };

    match parsed {
        Some(value) => Coerced::provided(value),
        None => Coerced::defaulted(Utc::now()),
    }
}

fn serial_to_instant(serial: f64) -> Option<DateTime<Utc>> {
    if !serial.is_finite() {
        return None;
    }
    let millis = (serial - SERIAL_EPOCH_OFFSET_DAYS) * MS_PER_DAY;
    if !millis.is_finite() || millis.abs() > i64::MAX as f64 {
        return None;
    }
    Utc.timestamp_millis_opt(millis.round() as i64).single()
}

fn parse_free_text_date(text: &str) -> Option<DateTime<Utc>> {
    if text.is_empty() {
        return None;
    }

    if let Ok(instant) = DateTime::parse_from_rfc3339(text) {
        return Some(instant.with_timezone(&Utc));
    }

    const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%d/%m/%Y %H:%M:%S"];
    for format in DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }

    // los archivos de origen escriben la fecha con el día primero
    const DATE_FORMATS: [&str; 4] = ["%d/%m/%Y", "%d-%m-%Y", "%d/%m/%y", "%Y-%m-%d"];
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(text, format) {
            return Some(Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0)?));
        }
    }

    None
}

/// Mapea el texto de estatus al conjunto cerrado del tablero.
pub fn map_status(text: Option<String>) -> Coerced<Status> {
    const LABELS: [(&str, Status); 12] = [
        ("programada", Status::Scheduled),
        ("programado", Status::Scheduled),
        ("scheduled", Status::Scheduled),
        ("en producción", Status::Production),
        ("en produccion", Status::Production),
        ("producción", Status::Production),
        ("produccion", Status::Production),
        ("production", Status::Production),
        ("calidad", Status::Quality),
        ("quality", Status::Quality),
        ("en hold", Status::Hold),
        ("hold", Status::Hold),
    ];

    let raw = match text {
        Some(t) => t.trim().to_lowercase(),
        None => return Coerced::defaulted(Status::default()),
    };
    if raw.is_empty() {
        return Coerced::defaulted(Status::default());
    }

    for (label, status) in LABELS {
        if raw == label {
            return Coerced::provided(status);
        }
    }

    // sin coincidencia exacta: contención en ambos sentidos antes de caer
    // al valor por defecto
    for (label, status) in LABELS {
        if raw.contains(label) || label.contains(raw.as_str()) {
            return Coerced::provided(status);
        }
    }

    Coerced::defaulted(Status::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RawRow;
    use crate::processors::normalizer::{map_headers, normalize_row};

    #[test]
    fn test_normalize_order_number_examples() {
        assert_eq!(normalize_order_number("202600072"), "00072");
        assert_eq!(normalize_order_number("179"), "00179");
        assert_eq!(normalize_order_number("SO20691"), "20691");
        assert_eq!(normalize_order_number("so/12345"), "12345");
        assert_eq!(normalize_order_number("PO 884"), "00884");
        assert_eq!(normalize_order_number("BRACKET"), "BRACKET");
        assert_eq!(normalize_order_number(""), "");
    }

    #[test]
    fn test_normalize_order_number_is_idempotent() {
        for input in ["202600072", "179", "SO20691", "so/12345", "BRACKET", "00072", ""] {
            let once = normalize_order_number(input);
            assert_eq!(normalize_order_number(&once), once, "entrada: {input:?}");
        }
    }

    #[test]
    fn test_parse_quantity() {
        assert_eq!(parse_quantity(Some(&Cell::Text("1,200".into()))).value, 1200);
        assert_eq!(parse_quantity(Some(&Cell::Number(10.0))).value, 10);
        assert_eq!(parse_quantity(Some(&Cell::Text("-5".into()))).value, 0);
        assert_eq!(parse_quantity(Some(&Cell::Text("abc".into()))).value, 0);
        assert_eq!(
            parse_quantity(Some(&Cell::Number(9_999_999.0))).value,
            MAX_QUANTITY
        );

        assert!(!parse_quantity(Some(&Cell::Text("15".into()))).defaulted);
        assert!(parse_quantity(Some(&Cell::Blank)).defaulted);
        assert!(parse_quantity(None).defaulted);
    }

    #[test]
    fn test_parse_date_serial() {
        let epoch = parse_date(Some(&Cell::Number(25569.0)));
        assert!(!epoch.defaulted);
        assert_eq!(epoch.value.to_rfc3339(), "1970-01-01T00:00:00+00:00");

        let day = parse_date(Some(&Cell::Number(45292.0)));
        assert_eq!(day.value.to_rfc3339(), "2024-01-01T00:00:00+00:00");
    }

    #[test]
    fn test_parse_date_free_text() {
        let iso = parse_date(Some(&Cell::Text("2024-03-15".into())));
        assert!(!iso.defaulted);
        assert_eq!(iso.value.date_naive().to_string(), "2024-03-15");

        let dayfirst = parse_date(Some(&Cell::Text("15/03/2024".into())));
        assert_eq!(dayfirst.value.date_naive().to_string(), "2024-03-15");
    }

    #[test]
    fn test_parse_date_garbage_defaults_to_now() {
        let before = Utc::now();
        let coerced = parse_date(Some(&Cell::Text("mañana".into())));
        let after = Utc::now();
        assert!(coerced.defaulted);
        assert!(coerced.value >= before && coerced.value <= after);
    }

    #[test]
    fn test_map_status() {
        assert_eq!(map_status(Some("Programada".into())).value, Status::Scheduled);
        assert_eq!(map_status(Some("EN PRODUCCIÓN".into())).value, Status::Production);
        assert_eq!(map_status(Some("calidad".into())).value, Status::Quality);
        assert_eq!(map_status(Some("En Hold".into())).value, Status::Hold);

        // contención en ambos sentidos
        assert_eq!(
            map_status(Some("calidad - retrabajo".into())).value,
            Status::Quality
        );
        assert_eq!(map_status(Some("produccion".into())).value, Status::Production);

        let unknown = map_status(Some("xyz".into()));
        assert_eq!(unknown.value, Status::Scheduled);
        assert!(unknown.defaulted);
        assert!(map_status(None).defaulted);
    }

    fn row_from(headers: &[&str], cells: Vec<Cell>) -> NormalizedRow {
        let headers: Vec<String> = headers.iter().map(|h| h.to_string()).collect();
        let mapping = map_headers(&headers);
        normalize_row(&RawRow { cells }, &mapping, 1)
    }

    #[test]
    fn test_resolve_part_name_prefers_combined_column() {
        let row = row_from(
            &["Parte", "Número de Parte", "Descripción"],
            vec![
                Cell::Text("Bracket".into()),
                Cell::Text("BRK-1".into()),
                Cell::Text("Soporte lateral".into()),
            ],
        );
        assert_eq!(resolve_part_name(&row).value, "Bracket");
    }

    #[test]
    fn test_resolve_part_name_combines_number_and_description() {
        let row = row_from(
            &["Número de Parte", "Descripción"],
            vec![Cell::Text("BRK-1".into()), Cell::Text("Soporte lateral".into())],
        );
        assert_eq!(resolve_part_name(&row).value, "BRK-1 - Soporte lateral");

        let only_number = row_from(
            &["Número de Parte", "Descripción"],
            vec![Cell::Text("BRK-1".into()), Cell::Blank],
        );
        assert_eq!(resolve_part_name(&only_number).value, "BRK-1");
    }

    #[test]
    fn test_resolve_part_name_fallback() {
        let row = row_from(&["Parte"], vec![Cell::Blank]);
        let coerced = resolve_part_name(&row);
        assert_eq!(coerced.value, "Sin nombre");
        assert!(coerced.defaulted);
    }

    #[test]
    fn test_coerce_row_applies_default_company() {
        let row = row_from(&["Orden", "Parte"], vec![Cell::Text("179".into()), Cell::Text("Bracket".into())]);
        let identity = ResolvedIdentity {
            order: Some("179".into()),
            company: None,
        };
        let coerced = coerce_row(&row, &identity, Some("importación nacional"));
        assert_eq!(coerced.company_name, "Importación Nacional");
        assert_eq!(coerced.po_number, "00179");
        assert_eq!(coerced.part_name.value, "Bracket");
    }
}
