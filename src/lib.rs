//! metaninza-docs: the metaninza API documentation, browsable in a terminal.
//!
//! Topics are markdown files embedded at build time. They are parsed with tree-sitter into typed
//! sections, arranged in a fixed sidebar, and rendered with ratatui. Endpoint sections collapse
//! to a method badge. The two integration flows are drawn as pannable, zoomable node graphs.
#![allow(clippy::multiple_crate_versions)]

pub mod app_state;
pub mod config;
pub mod content;
pub mod diagram;
pub mod error;
pub mod formats;
pub mod highlight;
pub mod input;
pub mod navigation;
pub mod render;
pub mod section;
pub mod ui;

pub use error::Error;
