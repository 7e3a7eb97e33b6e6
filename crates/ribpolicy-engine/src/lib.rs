//! ribpolicy engine library entry.
//!
//! Compiles policy descriptors into runtime policies, keeps the installed
//! policy, and evaluates it against candidate routes before they are handed
//! to forwarding-table programming. Consumed by the binary (`main.rs`) and by
//! integration tests.

pub mod config;
pub mod policy;
pub mod store;

pub use policy::{RibPolicy, RibPolicyStatement};
pub use store::{spawn_expiry_sweeper, RibPolicyStore};
