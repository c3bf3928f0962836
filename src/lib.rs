//! Accessor generation for annotated Rust structs.
//!
//! `accessorgen` parses the struct declarations of a package, derives a
//! per-field access policy from an `#[orm("...")]` annotation or from the
//! identifier casing convention, renders getter/setter fragments through
//! overridable MiniJinja templates, and buffers the generated source per
//! target type ready for emission.
//!
//! The pipeline is sequential, deterministic, and stateless between
//! invocations: repeated runs over unchanged input produce byte-identical
//! output.

pub mod aggregate;
pub mod cli;
pub mod error;
pub mod files;
pub mod model;
pub mod pipeline;
pub mod policy;
pub mod render;
pub mod tag;
pub mod template;
