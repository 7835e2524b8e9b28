//! Guidekit - team playbook MCP server
//!
//! Serves a YAML-authored catalog of coding guidelines (tools) and
//! parameterized prompt templates over line-delimited JSON-RPC on
//! stdio.

pub mod catalog;
pub mod config;
pub mod error;
pub mod mcp;
pub mod template;

pub use catalog::{Catalog, ServerManifest};
pub use config::Config;
pub use error::{GuidekitError, Result};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
