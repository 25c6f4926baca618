//! cocoadiag: client for an image-based cocoa plant diagnosis service.
//!
//! Keeps a bounded, newest-first history of diagnoses in durable key/value
//! storage and exposes it to an embedding page over JSON-RPC.
//!
//! This library crate exposes all modules for use by the binaries and integration tests.

pub mod app;
pub mod database;
pub mod logging;
pub mod managers;
pub mod platform;
pub mod rpc_handler;
pub mod services;
pub mod storage;
pub mod types;
pub mod ui;
