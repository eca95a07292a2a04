//! Storage primitives for the service layer
//!
//! Key validation and JSON file helpers shared by the file-backed stores.

pub mod key;
pub mod json_file;

pub use key::StorageKey;
