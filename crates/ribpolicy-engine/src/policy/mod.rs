//! Policy layer (statements, first-match-wins policies).
//!
//! Compiles policy descriptors into immutable runtime structures that the
//! route-install pipeline evaluates per candidate route.

pub mod engine;
pub mod statement;

pub use engine::RibPolicy;
pub use statement::RibPolicyStatement;
