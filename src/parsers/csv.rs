use csv::ReaderBuilder;

use crate::models::{Cell, FormatError};

/// Lee texto delimitado desde el búfer; cada celda llega como texto.
pub fn read_csv(bytes: &[u8]) -> Result<Vec<Vec<Cell>>, FormatError> {
    let mut reader = ReaderBuilder::new().has_headers(false).from_reader(bytes);

    let mut rows = Vec::new();
    for record in reader.records() {
        let record =
            record.map_err(|err| FormatError::Delimited(err.to_string()))?;
        let row: Vec<Cell> = record
            .iter()
            .map(|cell| {
                if cell.trim().is_empty() {
                    Cell::Blank
                } else {
                    Cell::Text(cell.to_string())
                }
            })
            .collect();
        rows.push(row);
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_csv_preserves_blanks() {
        let bytes = b"Orden,Cantidad,Parte\n179,,Bracket\n";
        let rows = read_csv(bytes).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1][0], Cell::Text("179".into()));
        assert_eq!(rows[1][1], Cell::Blank);
        assert_eq!(rows[1][2], Cell::Text("Bracket".into()));
    }

    #[test]
    fn test_read_csv_malformed_is_fatal() {
        // una fila con más campos que el resto no es un CSV válido
        let bytes = b"a,b\n1,2,3\n";
        assert!(matches!(read_csv(bytes), Err(FormatError::Delimited(_))));
    }
}
