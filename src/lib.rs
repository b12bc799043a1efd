//! ActivityStreams Collection Model
//!
//! Typed, read-only views over expanded JSON-LD documents, and the builders
//! that produce them.
//!
//! # Overview
//!
//! A linked-data document is a property bag: any property may be absent,
//! single-valued, or multi-valued, and ordered values live inside
//! `{"@list": [...]}` wrappers. This library puts two layers on top of it:
//!
//! 1. [`Object`] / [`ObjectBuilder`]: a view bound to a [`Reasoner`] that
//!    resolves symbolic names (`as:name`) to canonical IRIs, and a builder that
//!    accumulates property assignments.
//! 2. [`Collection`] / [`CollectionBuilder`]: paging counters, navigation
//!    links, range extensions, and items. Ordered items are wrapped in a list
//!    on write and unwrapped on read; a builder refuses to mix ordered and
//!    unordered items once it has committed to one.
//!
//! Paging counters are strict on write and lenient on read: setting a
//! negative or non-numeric `totalItems` fails, while a malformed stored value
//! reads as 0.
//!
//! # Usage
//!
//! ```
//! use std::sync::Arc;
//! use activitystreams_collections::{CollectionBuilder, Reasoner};
//!
//! let reasoner = Arc::new(Reasoner::new());
//! let mut builder = CollectionBuilder::new(Arc::clone(&reasoner), &[], None);
//! builder
//!     .total_items(3)?
//!     .ordered_items(["urn:a", "urn:b", "urn:c"])?
//!     .next("https://example.org/feed?page=2");
//!
//! let collection = builder.build();
//! assert!(collection.ordered());
//! assert_eq!(collection.total_items(), 3);
//! assert_eq!(collection.items().map(|i| i.len()), Some(3));
//!
//! // mixing item modes is rejected
//! assert!(builder.items(["urn:d"]).is_err());
//! # Ok::<(), activitystreams_collections::ModelError>(())
//! ```

pub mod collection;
pub mod config;
pub mod document;
pub mod error;
pub mod id;
pub mod object;
pub mod reasoner;
pub mod vocab;

// Re-export main types for convenience
pub use crate::collection::{Collection, CollectionBuilder, ItemMode, Items};
pub use crate::config::VocabularyConfig;
pub use crate::document::{Document, Entry, Literal};
pub use crate::error::{ModelError, Result};
pub use crate::object::{Object, ObjectBuilder};
pub use crate::reasoner::Reasoner;
