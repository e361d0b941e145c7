//! Exhaustiveness checking for annotated Go `switch` statements.
//!
//! Per package, in dependency order:
//! - [`registry`]: map import qualifiers to module handles
//! - [`catalog_builder`]: collect and export the package's constant catalog
//! - [`directive`]: parse the `// switchchecker` comment above each switch
//! - [`coverage`]: compare case labels against the catalog of the tag's type
//! - [`message`]: render the `no case of ...` phrase
//!
//! [`engine`] drives the whole run over a loaded workspace.

pub mod types;
pub mod message;
pub mod directive;
pub mod registry;
pub mod catalog_builder;
pub mod coverage;
pub mod engine;
