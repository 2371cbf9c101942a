mod builder;
mod csv;
mod excel;

use crate::models::{FileFormat, FormatError, RawTable};

pub use builder::build_table;

/// Decodifica el búfer de entrada en una tabla cruda según el formato
/// declarado. Es la única etapa que puede fallar para el lote completo.
pub fn read_table(bytes: &[u8], format: FileFormat) -> Result<RawTable, FormatError> {
    let rows = match format {
        FileFormat::Delimited => csv::read_csv(bytes)?,
        FileFormat::Workbook => excel::read_workbook(bytes)?,
    };

    let table = build_table(rows)?;
    log::debug!(
        "archivo {:?} leído: {} columnas, {} filas de datos",
        format,
        table.headers.len(),
        table.rows.len()
    );
    Ok(table)
}
