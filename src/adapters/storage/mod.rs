//! File storage adapters.

mod local_file_storage;

pub use local_file_storage::LocalFileStorage;
