use crate::models::{FileFormat, FormatError, ImportResult};
use crate::parsers;
use crate::processors::cleaner::CarryForward;
use crate::processors::{coercer, grouper, normalizer, validator};

/// Procesa un archivo de órdenes deduciendo el formato del nombre.
///
/// Una extensión desconocida es condición fatal, igual que un archivo que no
/// se puede decodificar; todo lo demás degrada a errores por fila.
pub fn import_order_file(
    bytes: &[u8],
    file_name: &str,
    default_company: Option<&str>,
) -> Result<ImportResult, FormatError> {
    let format = FileFormat::from_file_name(file_name).ok_or_else(|| {
        let ext = file_name.rsplit('.').next().unwrap_or(file_name);
        FormatError::UnsupportedExtension(ext.to_string())
    })?;
    import_order_bytes(bytes, format, default_company)
}

/// Corre el pipeline completo sobre el búfer: lectura, normalización de
/// encabezados, arrastre de valores, coerción, validación y consolidación.
///
/// Las filas rechazadas no abortan el lote; cada una deja exactamente un
/// error con su número de fila de datos (base 1, sin contar filas vacías).
pub fn import_order_bytes(
    bytes: &[u8],
    format: FileFormat,
    default_company: Option<&str>,
) -> Result<ImportResult, FormatError> {
    let table = parsers::read_table(bytes, format)?;
    let mapping = normalizer::map_headers(&table.headers);

    let mut carry = CarryForward::new();
    let mut candidates = Vec::new();
    let mut errors = Vec::new();
    let mut row_number = 0usize;

    for raw in &table.rows {
        // las filas totalmente vacías se saltan sin contarse ni reportarse
        if raw.is_blank() {
            continue;
        }
        row_number += 1;

        let row = normalizer::normalize_row(raw, &mapping, row_number);
        let identity = carry.resolve(&row);
        let coerced = coercer::coerce_row(&row, &identity, default_company);

        match validator::validate_row(coerced, row_number) {
            Ok(candidate) => candidates.push(candidate),
            Err(error) => {
                log::debug!("fila descartada: {}", error);
                errors.push(error);
            }
        }
    }

    let records = grouper::group_candidates(candidates);
    log::debug!(
        "importación: {} registros, {} errores",
        records.len(),
        errors.len()
    );

    Ok(ImportResult { records, errors })
}
