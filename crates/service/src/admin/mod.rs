//! Store traits the HTTP layer depends on.

pub mod kv_store;
pub mod menu_store;
