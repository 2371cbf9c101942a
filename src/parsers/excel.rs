use std::io::Cursor;

use calamine::{open_workbook_auto_from_rs, DataType, Reader};

use crate::models::{Cell, FormatError};

/// Lee la primera hoja del libro; conserva la distinción texto/número.
pub fn read_workbook(bytes: &[u8]) -> Result<Vec<Vec<Cell>>, FormatError> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))
        .map_err(|err| FormatError::Workbook(err.to_string()))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| FormatError::Workbook("el libro no contiene hojas".into()))?
        .map_err(|err| FormatError::Workbook(err.to_string()))?;

    let rows = range
        .rows()
        .map(|row| row.iter().map(data_type_to_cell).collect())
        .collect();

    Ok(rows)
}

fn data_type_to_cell(cell: &DataType) -> Cell {
    match cell {
        DataType::Empty => Cell::Blank,
        DataType::String(s) => {
            if s.trim().is_empty() {
                Cell::Blank
            } else {
                Cell::Text(s.trim().to_string())
            }
        }
        DataType::Float(f) => Cell::Number(*f),
        DataType::Int(v) => Cell::Number(*v as f64),
        DataType::Bool(v) => Cell::Text(v.to_string()),
        // las fechas de Excel llegan como serial; el coercionador de fechas
        // decide qué hacer con él
        DataType::DateTime(serial) => Cell::Number(*serial),
        DataType::Error(_) => Cell::Blank,
        other => {
            let text = other.to_string();
            if text.trim().is_empty() {
                Cell::Blank
            } else {
                Cell::Text(text.trim().to_string())
            }
        }
    }
}
