//! Toolweb - dependency graph analysis for a tool ecosystem.
//!
//! This crate provides the `toolweb` CLI and the library pieces behind it:
//! configuration discovery, JSONL registry loading, and rendering of
//! [`toolweb_graph`] query results as text or JSON.

#![forbid(unsafe_code)]

// Public modules for library usage
pub mod app;
pub mod error;
pub mod registry;

// Public CLI module (needed by binary)
pub mod cli;

// Command implementations
pub mod commands;

pub mod config;
pub mod output;
