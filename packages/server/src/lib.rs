//! Vitrine Server
//!
//! HTTP surface over the Vitrine content layer: REST endpoints for
//! managing the collection, a read-only display feed for viewer screens,
//! a server-sent event stream of catalog changes, and the server
//! configuration.

pub mod api;
pub mod config;
