//! Persistence for the Files domain

pub mod store;

pub use store::FileStore;
