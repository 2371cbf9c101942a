use crate::models::{Cell, FormatError, RawRow, RawTable};

/// Arma la tabla cruda a partir de las filas decodificadas.
///
/// La primera fila no vacía es el encabezado; lo que sigue son datos. Las
/// filas totalmente vacías al final se descartan, las intermedias se
/// conservan para que el orquestador las salte sin contarlas.
pub fn build_table(rows: Vec<Vec<Cell>>) -> Result<RawTable, FormatError> {
    let mut header_row: Option<Vec<Cell>> = None;
    let mut data_rows: Vec<Vec<Cell>> = Vec::new();

    for row in rows {
        if header_row.is_none() {
            if row.iter().all(Cell::is_blank) {
                continue;
            }
            header_row = Some(row);
            continue;
        }
        data_rows.push(row);
    }

    while let Some(last) = data_rows.last() {
        if last.iter().all(Cell::is_blank) {
            data_rows.pop();
        } else {
            break;
        }
    }

    let header_cells = header_row.ok_or(FormatError::MissingHeader)?;
    let headers: Vec<String> = header_cells
        .iter()
        .map(|cell| cell.text().unwrap_or_default())
        .collect();

    // cada fila se ajusta al ancho del encabezado: las celdas faltantes
    // quedan en blanco, las sobrantes no tienen columna y se descartan
    let width = headers.len();
    let rows = data_rows
        .into_iter()
        .map(|mut cells| {
            cells.truncate(width);
            cells.resize(width, Cell::Blank);
            RawRow { cells }
        })
        .collect();

    Ok(RawTable { headers, rows })
}
