//! Backend for a campus-placement preparation app: a read-only catalog,
//! flat-file accounts, and generator-backed interview practice.

pub mod accounts;
pub mod catalog;
pub mod config;
pub mod errors;
pub mod interview;
pub mod invoke;
pub mod llm_client;
pub mod logging;
pub mod models;
pub mod routes;
pub mod state;
