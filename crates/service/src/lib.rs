//! Service layer for the menu admin server.
//! - File-backed key/value records, one JSON file per key.
//! - The menu document and uploaded images.
//! - Clear error types separating disk failures from corrupt data.

pub mod errors;
pub mod runtime;
pub mod storage;
pub mod file;
pub mod admin;
