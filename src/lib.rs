//! Motor de importación masiva de órdenes de compra.
//!
//! Recibe el contenido de un archivo de Excel o CSV con partidas de órdenes,
//! normaliza encabezados y celdas de origen inconsistente, completa valores
//! heredados de filas anteriores, valida cada fila y consolida las partidas
//! que pertenecen a la misma orden lógica en un solo registro. El resultado
//! son los registros listos para insertar más la lista de filas descartadas
//! con su motivo; solo un archivo indecodificable aborta el lote completo.

pub mod models;
pub mod utils;

mod importer;
mod parsers;
mod processors;

pub use importer::{import_order_bytes, import_order_file};
pub use models::{
    CandidateRecord, Cell, FileFormat, FormatError, GroupedRecord, ImportResult, RawRow, RawTable,
    Status, ValidationError,
};
pub use processors::coercer::{normalize_order_number, Coerced};
pub use processors::grouper::identity_key;
