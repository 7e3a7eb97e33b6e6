//! Top-level facade crate for ribpolicy.
//!
//! Re-exports the core data model and the policy engine so users can depend on a single crate.

pub mod core {
    pub use ribpolicy_core::*;
}

pub mod engine {
    pub use ribpolicy_engine::*;
}
