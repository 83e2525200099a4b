//! Domain layer for the Files domain

pub mod entities;
pub mod filename;
pub mod state;
pub mod validation;
