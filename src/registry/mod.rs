//! Pattern-keyed registries for guards and edges.
//!
//! Both registries expand each [`TransitionPattern`](crate::TransitionPattern)
//! into exact-match keys and answer lookups for a concrete transition by
//! probing the four tiers in order: exact, leaving, entering, any-to-any.

mod edges;
mod guards;
mod table;

pub use edges::EdgeRegistry;
pub use guards::GuardRegistry;
