//! API endpoint integration tests
//!
//! Drives the composed router end to end with a mock model backend and a
//! temporary content root.

#![allow(dead_code)]

mod chat;
mod common;
mod files;
mod system;
