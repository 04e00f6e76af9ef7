//! Networking modules for the project-files REST backend.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` issues the HTTP calls and `types` defines the wire schema they
//! exchange.

pub mod api;
pub mod types;
