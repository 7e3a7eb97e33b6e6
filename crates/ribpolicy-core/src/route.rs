//! Route entries as produced by route computation and consumed by forwarding.
//!
//! Next-hops are value objects: every field, weight included, takes part in
//! equality and hashing. A route's next-hop set therefore deduplicates
//! entries that become identical after a weight rewrite.

use std::collections::HashSet;
use std::net::IpAddr;

use ipnet::IpNet;
use serde::{Deserialize, Serialize};

/// IP network used as an exact-match key.
pub type Prefix = IpNet;

/// Forwarding next-hop with its multipath weight.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NextHop {
    pub address: IpAddr,
    /// Outgoing interface name, if resolved.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub if_name: Option<String>,
    /// Routing area the next-hop was learned from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area: Option<String>,
    #[serde(default)]
    pub metric: u32,
    /// Relative traffic share; 0 means excluded.
    #[serde(default)]
    pub weight: u32,
}

impl NextHop {
    pub fn new(address: IpAddr, weight: u32) -> Self {
        Self {
            address,
            if_name: None,
            area: None,
            metric: 0,
            weight,
        }
    }

    pub fn with_area(mut self, area: impl Into<String>) -> Self {
        self.area = Some(area.into());
        self
    }

    pub fn with_if_name(mut self, if_name: impl Into<String>) -> Self {
        self.if_name = Some(if_name.into());
        self
    }

    pub fn with_metric(mut self, metric: u32) -> Self {
        self.metric = metric;
        self
    }
}

/// Unicast route: destination prefix plus its next-hop set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RouteEntry {
    pub prefix: Prefix,
    #[serde(default)]
    pub nexthops: HashSet<NextHop>,
}

impl RouteEntry {
    pub fn new(prefix: Prefix, nexthops: impl IntoIterator<Item = NextHop>) -> Self {
        Self {
            prefix,
            nexthops: nexthops.into_iter().collect(),
        }
    }
}
