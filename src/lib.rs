//! deepreason - symbolic reasoning over object detection events
//!
//! Turns one detection event into a meaning, a human explanation, a
//! significance score and recommended actions.
//!
//! # Modules
//!
//! - [`reasoning`] - the synchronous engine (extract, match, synthesize)
//! - [`config`] - layered service configuration
//! - [`http_server`] - axum API with bearer license checks
//! - [`cli`] - command-line entry points
//! - [`observability`] - JSON logging and request metrics

pub mod cli;
pub mod config;
pub mod http_server;
pub mod observability;
pub mod reasoning;
