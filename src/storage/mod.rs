// storage/mod.rs
// Result store module

mod models;
mod pool;
mod queries;
mod results;
mod schema;

#[cfg(test)]
pub(crate) mod test_helpers;

// Re-export commonly used items
pub use models::{classify_row, CacheSnapshot, CacheState, StoredResult};
pub use pool::{init_db_pool_with_path, pool_size_for, DbPool};
pub use results::{ResultStore, LAST_CHECKED_FORMAT};
pub use schema::init_schema;
