//! Relaychat - stateless relay routes for hosted chat models.
//!
//! Each route validates one request, attaches the server-held credential,
//! forwards the call to its provider and hands the provider's answer (or a
//! normalized error) back to the caller.

pub mod config;
pub mod error;
pub mod handlers;
pub mod llm;
pub mod server;
