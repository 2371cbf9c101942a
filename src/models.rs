use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Cantidad máxima aceptada por partida; todo lo demás se recorta.
pub const MAX_QUANTITY: i64 = 1_000_000;

pub const MAX_COMPANY_LEN: usize = 100;
pub const MAX_PO_LEN: usize = 50;
pub const MAX_PART_LEN: usize = 255;

pub const DEFAULT_PRIORITY: &str = "normal";

/// Formato de entrada, deducido de la extensión del archivo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    /// Libro de Excel (.xlsx / .xls); solo se lee la primera hoja.
    Workbook,
    /// Texto delimitado por comas (.csv).
    Delimited,
}

impl FileFormat {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "xlsx" | "xls" => Some(Self::Workbook),
            "csv" => Some(Self::Delimited),
            _ => None,
        }
    }

    /// Deduce el formato a partir del nombre de archivo completo.
    pub fn from_file_name(name: &str) -> Option<Self> {
        let ext = name.rsplit('.').next()?;
        if ext.len() == name.len() {
            return None;
        }
        Self::from_extension(ext)
    }
}

/// Valor de una celda tal como lo entrega el lector tabular.
///
/// Los lectores conservan la distinción texto/número: en Excel las fechas
/// llegan como serial numérico y deben tratarse distinto a un texto libre.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Blank,
    Text(String),
    Number(f64),
}

impl Cell {
    pub fn is_blank(&self) -> bool {
        match self {
            Cell::Blank => true,
            Cell::Text(t) => t.trim().is_empty(),
            Cell::Number(_) => false,
        }
    }

    /// Texto recortado de la celda, o `None` si está en blanco.
    /// Los números enteros se formatean sin decimales.
    pub fn text(&self) -> Option<String> {
        match self {
            Cell::Blank => None,
            Cell::Text(t) => {
                let t = t.trim();
                if t.is_empty() {
                    None
                } else {
                    Some(t.to_string())
                }
            }
            Cell::Number(f) => {
                if f.fract().abs() < f64::EPSILON {
                    Some(format!("{:.0}", f))
                } else {
                    Some(f.to_string())
                }
            }
        }
    }
}

/// Una fila física del archivo, en el orden original de columnas.
#[derive(Debug, Clone)]
pub struct RawRow {
    pub cells: Vec<Cell>,
}

impl RawRow {
    pub fn is_blank(&self) -> bool {
        self.cells.iter().all(Cell::is_blank)
    }
}

/// Tabla cruda: encabezados originales más filas de datos en orden de archivo.
#[derive(Debug, Clone)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<RawRow>,
}

/// Estatus de una orden de trabajo; conjunto cerrado que entiende el tablero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    #[default]
    Scheduled,
    Production,
    Quality,
    Hold,
}

/// Partida de orden ya coercionada y validada, previa a la consolidación.
///
/// Si una fila no pasa la validación, nunca llega a existir como
/// `CandidateRecord`; solo queda su `ValidationError`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateRecord {
    pub company_name: String,
    pub po_number: String,
    pub part_name: String,
    pub quantity_total: i64,
    pub quantity_completed: i64,
    pub priority: String,
    pub status: Status,
    pub created_at: DateTime<Utc>,
}

/// Registro final por orden lógica: partes deduplicadas y unidas con coma,
/// cantidades sumadas, metadatos del primer candidato del grupo.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupedRecord {
    pub company_name: String,
    pub po_number: String,
    pub part_name: String,
    pub quantity_total: i64,
    pub quantity_completed: i64,
    pub priority: String,
    pub status: Status,
    pub created_at: DateTime<Utc>,
}

/// Error de una sola fila; nunca aborta el lote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    /// Número de fila de datos (base 1, sin contar encabezado ni filas vacías).
    pub row: usize,
    pub message: String,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fila {}: {}", self.row, self.message)
    }
}

/// Resultado de procesar un archivo completo.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportResult {
    pub records: Vec<GroupedRecord>,
    pub errors: Vec<ValidationError>,
}

/// Condición fatal de lote: los bytes no se pueden decodificar en el formato
/// declarado. Es el único error que aborta el archivo completo.
#[derive(Debug, Clone, Error, Serialize, Deserialize)]
pub enum FormatError {
    #[error("No se pudo leer el libro de Excel: {0}")]
    Workbook(String),
    #[error("No se pudo interpretar el archivo delimitado: {0}")]
    Delimited(String),
    #[error("Formato de archivo no soportado: {0}")]
    UnsupportedExtension(String),
    #[error("El archivo no contiene una fila de encabezados.")]
    MissingHeader,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_file_format_from_extension() {
        assert_eq!(FileFormat::from_extension("XLSX"), Some(FileFormat::Workbook));
        assert_eq!(FileFormat::from_extension("xls"), Some(FileFormat::Workbook));
        assert_eq!(FileFormat::from_extension("csv"), Some(FileFormat::Delimited));
        assert_eq!(FileFormat::from_extension("txt"), None);
    }

    #[test]
    fn test_file_format_from_file_name() {
        assert_eq!(
            FileFormat::from_file_name("ordenes marzo.XLSX"),
            Some(FileFormat::Workbook)
        );
        assert_eq!(
            FileFormat::from_file_name("pedidos.csv"),
            Some(FileFormat::Delimited)
        );
        assert_eq!(FileFormat::from_file_name("sin_extension"), None);
    }

    #[test]
    fn test_cell_text() {
        assert_eq!(Cell::Blank.text(), None);
        assert_eq!(Cell::Text("  ".into()).text(), None);
        assert_eq!(Cell::Text(" 179 ".into()).text(), Some("179".into()));
        assert_eq!(Cell::Number(179.0).text(), Some("179".into()));
        assert_eq!(Cell::Number(1.5).text(), Some("1.5".into()));
    }

    #[test]
    fn test_validation_error_display() {
        let err = ValidationError {
            row: 3,
            message: "Falta el número de orden.".into(),
        };
        assert_eq!(err.to_string(), "Fila 3: Falta el número de orden.");
    }

    #[test]
    fn test_grouped_record_wire_shape() {
        let record = GroupedRecord {
            company_name: "ACME".into(),
            po_number: "00179".into(),
            part_name: "Bracket, Hinge".into(),
            quantity_total: 15,
            quantity_completed: 0,
            priority: DEFAULT_PRIORITY.into(),
            status: Status::Scheduled,
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["status"], "scheduled");
        assert_eq!(json["po_number"], "00179");
        assert_eq!(json["quantity_completed"], 0);
        assert_eq!(json["created_at"], "2024-01-01T00:00:00Z");
    }
}
