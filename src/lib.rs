//! Softproof - spectral soft proofs of ink on rough paper
//!
//! Command-line front end for the `proof-render` crate: description files,
//! configuration, batch scripts and PNG output.
//! This library exposes modules for integration testing.

pub mod assets;
pub mod cli;
pub mod error;
pub mod models;
pub mod rendering;
pub mod services;
