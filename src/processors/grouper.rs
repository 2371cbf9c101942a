use std::collections::{HashMap, HashSet};

use crate::models::{CandidateRecord, GroupedRecord};
use crate::utils::text::comparison_key;

/// Llave de identidad de una orden lógica: compañía y número de orden
/// normalizados. Solo sirve para agrupar, nunca se persiste; la capa de
/// inserción usa la misma derivación para su propio filtro de existentes.
pub fn identity_key(company_name: &str, po_number: &str) -> String {
    format!(
        "{}|{}",
        comparison_key(company_name),
        comparison_key(po_number)
    )
}

struct Bucket {
    first: CandidateRecord,
    parts: Vec<String>,
    seen_parts: HashSet<String>,
    quantity_total: i64,
}

impl Bucket {
    fn new(record: CandidateRecord) -> Self {
        let mut bucket = Self {
            parts: Vec::new(),
            seen_parts: HashSet::new(),
            quantity_total: 0,
            first: record.clone(),
        };
        bucket.absorb(record);
        bucket
    }

    fn absorb(&mut self, record: CandidateRecord) {
        self.quantity_total += record.quantity_total;
        let key = comparison_key(&record.part_name);
        if self.seen_parts.insert(key) {
            self.parts.push(record.part_name);
        }
    }

    fn finish(self) -> GroupedRecord {
        GroupedRecord {
            company_name: self.first.company_name,
            po_number: self.first.po_number,
            part_name: self.parts.join(", "),
            quantity_total: self.quantity_total,
            quantity_completed: 0,
            priority: self.first.priority,
            status: self.first.status,
            created_at: self.first.created_at,
        }
    }
}

/// Consolida las partidas validadas: una orden lógica puede venir repartida
/// en varias filas y debe salir como un solo registro. Las partes se
/// deduplican conservando la primera forma vista, las cantidades se suman y
/// los metadatos (estatus, prioridad, fecha) son los del primer candidato
/// del grupo.
pub fn group_candidates(candidates: Vec<CandidateRecord>) -> Vec<GroupedRecord> {
    let mut order: Vec<String> = Vec::new();
    let mut buckets: HashMap<String, Bucket> = HashMap::new();

    for candidate in candidates {
        let key = identity_key(&candidate.company_name, &candidate.po_number);
        match buckets.get_mut(&key) {
            Some(bucket) => bucket.absorb(candidate),
            None => {
                buckets.insert(key.clone(), Bucket::new(candidate));
                order.push(key);
            }
        }
    }

    log::debug!("consolidación: {} grupos", order.len());

    order
        .into_iter()
        .filter_map(|key| buckets.remove(&key))
        .map(Bucket::finish)
        .collect()
}
