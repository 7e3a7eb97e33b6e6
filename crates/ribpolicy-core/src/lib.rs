//! ribpolicy core: route data model, policy descriptor schema, clock, and errors.
//!
//! This crate defines the contracts shared by the policy engine and the
//! collaborators around it (route computation, policy distribution, forwarding
//! programming). It carries no runtime dependencies so it can be reused in
//! multiple contexts.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! All fallible paths surface as `RibPolicyError`/`Result`.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod clock;
pub mod descriptor;
pub mod error;
pub mod route;

/// Shared result type.
pub use error::{Result, RibPolicyError};

pub use clock::{Clock, ManualClock, MonotonicClock};
pub use descriptor::{
    ActionDescriptor, MatcherDescriptor, PolicyDescriptor, StatementDescriptor, WeightAction,
};
pub use route::{NextHop, Prefix, RouteEntry};
