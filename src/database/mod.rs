//! Módulo de base de datos
//!
//! Almacén clave-valor inyectable y las colecciones JSON que viven en él.

pub mod collections;
pub mod connection;
pub mod json_file;
pub mod store;

pub use connection::open_store;
pub use json_file::JsonFileStore;
pub use store::{InMemoryStore, KeyValueStore, SharedStore};
