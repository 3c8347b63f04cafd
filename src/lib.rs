//! seqscope - lazy sequence combinators and exactly-once ownership primitives
//!
//! Two families of building blocks that are easy to get subtly wrong:
//! pull-based sequence transformations with precise laziness and buffering
//! contracts, and deterministic release of shared resources.
//!
//! # Architecture
//!
//! - [`seq`] - Lazy combinators over [`Iterator`] pull sources (batching,
//!   merging, cross products, strict zipping, consecutive grouping,
//!   distinct-by, trailing trim) plus a handful of eager queries
//! - [`align`] - Longest common contiguous slice between two sequences
//! - [`equivalence`] - Statically resolved equivalence capability
//! - [`scope`] - Exactly-once cleanup guard that can be cancelled or transferred
//! - [`stream`] - Ownership-aware decorator over a byte resource
//! - [`config`] - Optional TOML configuration for stream defaults
//!
//! # Correctness Invariants
//!
//! 1. Combinator arguments are validated when the combinator is built, never on first pull
//! 2. Nothing is pulled from a source until the consumer asks for an item
//! 3. A cleanup action or an owned resource is released at most once
//! 4. A released wrapper never forwards to the resource it used to hold

pub mod align;
pub mod config;
pub mod equivalence;
pub mod scope;
pub mod seq;
pub mod stream;

pub use align::{longest_common_slice, longest_common_slice_by, AlignmentTable, CommonSlice};
pub use config::{Config, ConfigError, StreamSettings};
pub use equivalence::Equivalent;
pub use scope::{BoxedScope, Scope, ScopeState, SendScope};
pub use seq::{SeqError, SeqExt, Side};
pub use stream::{
    ByteResource, Ownership, OwnershipStream, ReadOnlyStream, ResourceState, StreamError,
};
