//! Client for the project-files backend: session controls, project listings,
//! and folder uploads.

pub mod auth;
pub mod config;
pub mod error;
pub mod net;
pub mod page;
pub mod project;
pub mod session;
pub mod upload;

pub use error::ClientError;
