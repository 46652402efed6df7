//! # wikigraph Core
//!
//! Data model and wire encoding for wiki documents split into a graph of
//! linked content nodes.
//!
//! This crate provides:
//! - RFC 3339 timestamp codec that preserves the original UTC offset
//! - schema.org-style `Thing` descriptors for metadata records
//! - `Page`, `Section` and `Source` graph nodes with their JSON shapes
//! - A pure checker for `hasPart` / `isPartOf` agreement
//!
//! Nothing here performs I/O or resolves the identifiers stored in
//! adjacency lists.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod codec;
pub mod content;
pub mod graph;
pub mod thing;
pub mod time;

pub use codec::CodecError;
pub use content::{Identifier, Page, Section, Source};
pub use graph::{check_adjacency, Inconsistency};
pub use thing::{Descriptor, Thing};
pub use time::{JsonTime, TimestampError};
