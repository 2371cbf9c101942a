use crate::models::{
    CandidateRecord, ValidationError, DEFAULT_PRIORITY, MAX_COMPANY_LEN, MAX_PART_LEN, MAX_PO_LEN,
};
use crate::processors::coercer::CoercedRow;

/// Valida una fila coercionada y construye el registro candidato.
///
/// Las revisiones corren en orden fijo y la primera que falla descarta la
/// fila con un solo error; nunca sobrevive un candidato a medias. Estatus y
/// prioridad ya traen valor por construcción y no se revisan.
pub fn validate_row(coerced: CoercedRow, row: usize) -> Result<CandidateRecord, ValidationError> {
    let company = coerced.company_name.trim().to_string();
    if company.is_empty() {
        return Err(error(row, "Falta el nombre de la compañía."));
    }
    if company.chars().count() > MAX_COMPANY_LEN {
        return Err(error(
            row,
            format!("El nombre de la compañía excede {} caracteres.", MAX_COMPANY_LEN),
        ));
    }

    let po_number = coerced.po_number.trim().to_string();
    if po_number.is_empty() {
        return Err(error(row, "Falta el número de orden."));
    }
    if po_number.chars().count() > MAX_PO_LEN {
        return Err(error(
            row,
            format!("El número de orden excede {} caracteres.", MAX_PO_LEN),
        ));
    }

    let part_name = coerced.part_name.value.trim().to_string();
    if part_name.is_empty() {
        return Err(error(row, "Falta el nombre de la parte."));
    }
    if part_name.chars().count() > MAX_PART_LEN {
        return Err(error(
            row,
            format!("El nombre de la parte excede {} caracteres.", MAX_PART_LEN),
        ));
    }

    if coerced.quantity.value < 0 {
        return Err(error(row, "La cantidad no puede ser negativa."));
    }

    Ok(CandidateRecord {
        company_name: company,
        po_number,
        part_name,
        quantity_total: coerced.quantity.value,
        quantity_completed: 0,
        priority: DEFAULT_PRIORITY.to_string(),
        status: coerced.status.value,
        created_at: coerced.created_at.value,
    })
}

fn error(row: usize, message: impl Into<String>) -> ValidationError {
    ValidationError {
        row,
        message: message.into(),
    }
}
