use crate::utils::text::collapse_whitespace;

/// Campo canónico al que se mapea un encabezado crudo.
///
/// Los archivos llegan de distintos departamentos sin plantilla común; este
/// vocabulario cerrado es el único que entiende el resto del pipeline. Los
/// nombres conservan el vocabulario histórico del tablero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CanonicalField {
    /// Número de orden de compra o venta (PO/SO/referencia).
    Order,
    /// Número de parte explícito.
    NumeroParte,
    /// Descripción libre de la parte.
    Descripcion,
    /// Columna combinada "parte o descripción".
    Parte,
    Cantidad,
    /// Fecha de creación de la orden.
    Fecha,
    Estatus,
    Compania,
}

/// Normaliza un encabezado: recorte, minúsculas, espacios internos colapsados.
pub fn normalize_header(raw: &str) -> String {
    collapse_whitespace(raw).to_lowercase()
}

/// Mapea un encabezado crudo a su campo canónico, o `None` si no se reconoce.
/// Una columna no reconocida simplemente no alimenta ningún coercionador.
pub fn canonical_field(raw: &str) -> Option<CanonicalField> {
    let header = normalize_header(raw);

    // Coincidencia exacta (prioridad máxima)
    match header.as_str() {
        "orden" | "order" | "no. orden" | "no orden" | "no. de orden" | "numero de orden"
        | "número de orden" | "orden de compra" | "po" | "p.o." | "po #" | "po#"
        | "purchase order" | "so" | "sales order" | "referencia" | "reference" | "folio" => {
            return Some(CanonicalField::Order)
        }
        "numero de parte" | "número de parte" | "no. de parte" | "no. parte" | "no parte"
        | "numero parte" | "part number" | "part no" | "part no." | "p/n" | "pn" | "sku" => {
            return Some(CanonicalField::NumeroParte)
        }
        "descripcion" | "descripción" | "description" | "desc" | "detalle" => {
            return Some(CanonicalField::Descripcion)
        }
        "parte" | "part" | "producto" | "articulo" | "artículo" | "item"
        | "parte / descripcion" | "parte / descripción" => return Some(CanonicalField::Parte),
        "cantidad" | "cant" | "cant." | "qty" | "quantity" | "piezas" | "pzas" | "pzas."
        | "pcs" => return Some(CanonicalField::Cantidad),
        "fecha" | "date" | "fecha de creacion" | "fecha de creación" | "fecha creacion"
        | "fecha de captura" | "creacion" | "creación" | "created" => {
            return Some(CanonicalField::Fecha)
        }
        "estatus" | "estado" | "status" => return Some(CanonicalField::Estatus),
        "compania" | "compañia" | "compañía" | "company" | "cliente" | "empresa"
        | "razon social" | "razón social" | "customer" => return Some(CanonicalField::Compania),
        _ => {}
    }

    // Coincidencia parcial, con guardas para no confundir familias
    // ("departamento" también contiene "part")
    if (header.contains("parte") || header.contains("part")) && !header.contains("depart") {
        if header.contains("numero") || header.contains("número") || header.contains("no.")
            || header.contains("number")
        {
            return Some(CanonicalField::NumeroParte);
        }
        return Some(CanonicalField::Parte);
    }
    if header.contains("descripcion") || header.contains("descripción") || header.contains("description") {
        return Some(CanonicalField::Descripcion);
    }
    if header.contains("orden") || header.contains("purchase order") || header.contains("referencia") {
        return Some(CanonicalField::Order);
    }
    if header.contains("cantidad") || header.contains("qty") {
        return Some(CanonicalField::Cantidad);
    }
    if header.contains("fecha") {
        return Some(CanonicalField::Fecha);
    }
    if header.contains("estatus") || header.contains("status") {
        return Some(CanonicalField::Estatus);
    }
    if header.contains("compania") || header.contains("compañia") || header.contains("compañía")
        || header.contains("cliente") || header.contains("empresa")
    {
        return Some(CanonicalField::Compania);
    }

    None
}
