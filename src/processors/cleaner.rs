use crate::processors::normalizer::NormalizedRow;
use crate::utils::header::CanonicalField;

/// Identidad resuelta de una fila tras aplicar el arrastre de valores.
#[derive(Debug, Clone, Default)]
pub struct ResolvedIdentity {
    pub order: Option<String>,
    pub company: Option<String>,
}

/// Arrastre de valores por columna: cuando la celda de orden o de compañía
/// viene vacía se reutiliza el último valor visto en una fila anterior del
/// mismo archivo. Modela las celdas combinadas de los libros de origen, donde
/// la orden aparece una vez y las partes siguientes la dejan en blanco.
///
/// El estado vive en este acumulador, que el orquestador crea por archivo y
/// enhebra fila por fila; no hay estado compartido entre lotes.
#[derive(Debug, Default)]
pub struct CarryForward {
    last_order: Option<String>,
    last_company: Option<String>,
}

impl CarryForward {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resuelve orden y compañía para la fila y actualiza los últimos vistos.
    pub fn resolve(&mut self, row: &NormalizedRow) -> ResolvedIdentity {
        let mut order = row.text(CanonicalField::Order);
        if order.is_none() {
            order = self.last_order.clone();
        }
        if order.is_none() {
            // sin valor previo: la primera celda no vacía de la fila suele
            // ser la orden en archivos sin encabezado reconocible
            order = row.first_non_blank();
        }

        let mut company = row.text(CanonicalField::Compania);
        if company.is_none() {
            company = self.last_company.clone();
        }

        if let Some(order) = &order {
            self.last_order = Some(order.clone());
        }
        if let Some(company) = &company {
            self.last_company = Some(company.clone());
        }

        ResolvedIdentity { order, company }
    }
}
