use crate::models::{Cell, RawRow};
use crate::utils::header::{canonical_field, CanonicalField};

/// Fila con encabezados ya resueltos al vocabulario canónico.
///
/// Conserva todas las celdas en el orden original de columnas; las columnas
/// no reconocidas quedan sin campo y solo participan como respaldo posicional
/// (primera celda no vacía de la fila).
#[derive(Debug, Clone)]
pub struct NormalizedRow {
    /// Número de fila de datos, base 1, sin encabezado ni filas vacías.
    pub row: usize,
    cells: Vec<(Option<CanonicalField>, Cell)>,
}

impl NormalizedRow {
    /// Primera celda mapeada al campo dado (si hay columnas duplicadas, gana
    /// la de más a la izquierda).
    pub fn cell(&self, field: CanonicalField) -> Option<&Cell> {
        self.cells
            .iter()
            .find(|(mapped, _)| *mapped == Some(field))
            .map(|(_, cell)| cell)
    }

    /// Texto recortado del campo, o `None` si la celda falta o está vacía.
    pub fn text(&self, field: CanonicalField) -> Option<String> {
        self.cell(field).and_then(Cell::text)
    }

    /// Primera celda no vacía de la fila, en orden de columnas.
    pub fn first_non_blank(&self) -> Option<String> {
        self.cells.iter().find_map(|(_, cell)| cell.text())
    }
}

/// Resuelve cada encabezado crudo una sola vez por archivo.
pub fn map_headers(headers: &[String]) -> Vec<Option<CanonicalField>> {
    let mut mapping: Vec<Option<CanonicalField>> = Vec::with_capacity(headers.len());
    for header in headers {
        let field = canonical_field(header);
        // columnas duplicadas: la primera se queda con el campo
        let field = match field {
            Some(f) if mapping.contains(&Some(f)) => None,
            other => other,
        };
        mapping.push(field);
    }
    mapping
}

pub fn normalize_row(
    raw: &RawRow,
    mapping: &[Option<CanonicalField>],
    row: usize,
) -> NormalizedRow {
    let cells = raw
        .cells
        .iter()
        .zip(mapping.iter())
        .map(|(cell, field)| (*field, cell.clone()))
        .collect();
    NormalizedRow { row, cells }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(value: &str) -> Cell {
        Cell::Text(value.into())
    }

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_map_headers_drops_unknown() {
        let mapping = map_headers(&headers(&["Orden", "Comentarios", "Cantidad"]));
        assert_eq!(
            mapping,
            vec![
                Some(CanonicalField::Order),
                None,
                Some(CanonicalField::Cantidad)
            ]
        );
    }

    #[test]
    fn test_map_headers_duplicate_first_wins() {
        let mapping = map_headers(&headers(&["Orden", "PO"]));
        assert_eq!(mapping, vec![Some(CanonicalField::Order), None]);
    }

    #[test]
    fn test_normalized_row_accessors() {
        let mapping = map_headers(&headers(&["Comentarios", "Orden"]));
        let raw = RawRow {
            cells: vec![text("urgente"), text(" 179 ")],
        };
        let row = normalize_row(&raw, &mapping, 1);
        assert_eq!(row.text(CanonicalField::Order), Some("179".into()));
        assert_eq!(row.text(CanonicalField::Cantidad), None);
        assert_eq!(row.first_non_blank(), Some("urgente".into()));
    }
}
