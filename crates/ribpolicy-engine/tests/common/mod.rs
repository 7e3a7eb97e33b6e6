#![allow(dead_code)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::sync::Arc;

use ribpolicy_core::clock::{Clock, ManualClock};
use ribpolicy_core::descriptor::{PolicyDescriptor, StatementDescriptor, WeightAction};
use ribpolicy_core::route::{NextHop, Prefix, RouteEntry};

pub fn prefix(s: &str) -> Prefix {
    s.parse().unwrap()
}

pub fn nh(addr: &str, area: Option<&str>, weight: u32) -> NextHop {
    let nh = NextHop::new(addr.parse().unwrap(), weight);
    match area {
        Some(a) => nh.with_area(a),
        None => nh,
    }
}

pub fn route(p: &str, nexthops: Vec<NextHop>) -> RouteEntry {
    RouteEntry::new(prefix(p), nexthops)
}

pub fn statement(name: &str, prefixes: &[&str], action: WeightAction) -> StatementDescriptor {
    StatementDescriptor::new(name, prefixes.iter().map(|p| prefix(p)), action)
}

pub fn policy(ttl_secs: i64, statements: Vec<StatementDescriptor>) -> PolicyDescriptor {
    PolicyDescriptor {
        ttl_secs,
        statements,
    }
}

pub fn manual_clock() -> (Arc<ManualClock>, Arc<dyn Clock>) {
    let clock = Arc::new(ManualClock::new());
    let dyn_clock: Arc<dyn Clock> = clock.clone();
    (clock, dyn_clock)
}
