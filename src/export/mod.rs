//! Export functionality for stored scan results.

mod csv;
mod row;

pub use csv::{export_csv, export_store_csv};
pub use row::{render_chain, truncate_snippet, CHAIN_PARSE_ERROR, EXPORT_COLUMNS};
