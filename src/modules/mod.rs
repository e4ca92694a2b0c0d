//! Modules layer - Infrastructure components for external integrations
//!
//! Contains clients and adapters for external services the gateway talks to.

pub mod catalog_api;
