//! Content lookup abstraction for the Weft expansion engine.
//!
//! This crate provides a [`ContentIndex`] trait for resolving node reference
//! targets to their content, decoupled from wherever that content actually
//! lives. This enables:
//!
//! - **Unit testing** the expansion engine without a real document tree
//! - **Host flexibility** (in-memory index, editor workspace index, generated fixtures)
//! - **A hard I/O boundary**: the index is populated before rendering starts,
//!   so the render call itself never touches the filesystem
//!
//! # Architecture
//!
//! The crate provides:
//! - [`ContentUnit`]: one addressable piece of content (id, title, body, full source)
//! - [`ContentIndex`] trait with a single synchronous `get()` lookup
//! - [`MemoryIndex`]: a `HashMap`-backed implementation with builder methods
//!
//! # Example
//!
//! ```
//! use weft_index::{ContentIndex, ContentUnit, MemoryIndex};
//!
//! let index = MemoryIndex::new()
//!     .with_unit(ContentUnit::new("intro", "Intro", "Hello from the intro."));
//!
//! let unit = index.get("intro").unwrap();
//! assert_eq!(unit.title, "Intro");
//! assert!(index.get("missing").is_none());
//! ```

mod index;
mod memory;

pub use index::{ContentIndex, ContentUnit};
pub use memory::MemoryIndex;
