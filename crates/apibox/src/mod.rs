//! apibox: API documentation boxes from a reflected declaration tree
//!
//! This crate turns the JSON a TypeScript declaration reflector emits into
//! template-ready models for "API boxes" on a documentation site:
//! - Indexing the declaration tree by fully-qualified name, once per build
//! - Resolving a symbol's parameters, return type and properties through
//!   references, type aliases, inline shapes and unions
//! - Splitting parameters into positional arguments and an unwrapped
//!   options object
//! - Producing a one-line signature, summary and member groups
//!
//! Markup is left to the template step; this crate only produces data.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │ reflector JSON  │
//! └────────┬────────┘
//!          ▼
//!   ┌──────────────┐     ┌──────────────┐
//!   │ SymbolIndex  │ ──▶ │   Renderer   │ ──▶ RenderModel ──▶ template
//!   └──────────────┘     └──────────────┘
//! ```
//!
//! # Usage
//!
//! ```no_run
//! use apibox::{ApiBoxConfig, DiagnosticsCollector, Renderer, SymbolIndex, TemplateOptions};
//!
//! let config = ApiBoxConfig::load("apibox.toml").expect("config");
//! let tree = config.load_tree().expect("declaration tree");
//! let index = SymbolIndex::build(&tree);
//! let renderer = Renderer::from_config(&index, &config);
//!
//! let mut diagnostics = DiagnosticsCollector::new();
//! let context = renderer.template_context("Client.fetch", &TemplateOptions::new(), &mut diagnostics);
//! println!("{}", serde_json::Value::Object(context));
//! ```

// Core types
pub mod node;
pub mod params;
pub mod types;

// Resolution and rendering
pub mod index;
pub mod links;
pub mod model;
pub mod render;

// Ambient
pub mod config;
pub mod diagnostics;
pub mod test;

// Re-exports for convenience
pub use config::{ApiBoxConfig, DEFAULT_MAX_DEPTH};
pub use diagnostics::{
    codes, ApiBoxError, ApiBoxResult, Diagnostic, DiagnosticSeverity, DiagnosticsCollector,
};
pub use index::{IndexEntry, SymbolIndex};
pub use links::{expand_doc_links, link};
pub use model::{Group, GroupKind, RenderModel, TemplateOptions};
pub use node::{
    is_readable_name, is_synthetic_name, Comment, DeclarationKind, DeclarationNode,
    SourceReference,
};
pub use params::{Member, OPTIONS_PARAMETER_NAME};
pub use render::{Renderer, ANY_TYPE};
pub use types::TypeDescriptor;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
