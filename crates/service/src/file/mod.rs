//! File-backed implementations of the store traits.

pub mod kv_store;
pub mod menu_store;
pub mod image_store;
