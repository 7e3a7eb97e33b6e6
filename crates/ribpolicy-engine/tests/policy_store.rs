//! Installed-policy store and expiry sweeper.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::sync::Arc;
use std::time::Duration;

use ribpolicy_core::clock::MonotonicClock;
use ribpolicy_core::descriptor::WeightAction;
use ribpolicy_core::error::ErrorCode;
use ribpolicy_engine::{spawn_expiry_sweeper, RibPolicyStore};

mod common;
use common::{manual_clock, nh, policy, route, statement};

#[test]
fn get_without_policy_is_not_found() {
    let store = RibPolicyStore::new(Arc::new(MonotonicClock));
    assert_eq!(store.get_policy().unwrap_err().code(), ErrorCode::NotFound);
}

#[test]
fn rejected_update_keeps_previous_policy() {
    let store = RibPolicyStore::new(Arc::new(MonotonicClock));
    store
        .set_policy(&policy(60, vec![statement("v1", &["10.0.0.0/8"], WeightAction::new(7))]))
        .unwrap();

    let err = store.set_policy(&policy(60, vec![])).unwrap_err();
    assert_eq!(err.code(), ErrorCode::Config);

    let current = store.get_policy().unwrap();
    assert_eq!(current.statements[0].name, "v1");
}

#[test]
fn update_replaces_policy_wholesale() {
    let store = RibPolicyStore::new(Arc::new(MonotonicClock));
    store
        .set_policy(&policy(60, vec![statement("v1", &["10.0.0.0/8"], WeightAction::new(7))]))
        .unwrap();
    store
        .set_policy(&policy(60, vec![statement("v2", &["172.16.0.0/12"], WeightAction::new(3))]))
        .unwrap();

    let mut old = route("10.0.0.0/8", vec![nh("192.0.2.1", None, 1)]);
    assert!(!store.apply(&mut old).unwrap());

    let mut new = route("172.16.0.0/12", vec![nh("192.0.2.1", None, 1)]);
    assert!(store.apply(&mut new).unwrap());
    assert!(new.nexthops.contains(&nh("192.0.2.1", None, 3)));
}

#[test]
fn expired_policy_is_not_applied_and_gets_evicted() {
    let (clock, dyn_clock) = manual_clock();
    let store = RibPolicyStore::new(dyn_clock);
    store
        .set_policy(&policy(5, vec![statement("s", &["10.0.0.0/8"], WeightAction::new(9))]))
        .unwrap();

    assert!(!store.evict_expired().unwrap());
    clock.advance(Duration::from_secs(5));

    let original = route("10.0.0.0/8", vec![nh("192.0.2.1", None, 1)]);
    let mut r = original.clone();
    assert!(!store.apply(&mut r).unwrap());
    assert_eq!(r, original);
    assert_eq!(store.get_policy().unwrap_err().code(), ErrorCode::NotFound);

    assert!(store.evict_expired().unwrap());
    assert!(!store.evict_expired().unwrap());
}

#[test]
fn apply_all_counts_rewritten_routes() {
    let store = RibPolicyStore::new(Arc::new(MonotonicClock));
    let mut routes = vec![
        route("10.0.0.0/8", vec![nh("192.0.2.1", Some("a"), 1)]),
        route("10.1.0.0/16", vec![nh("192.0.2.1", Some("a"), 1)]),
        route("192.168.0.0/16", vec![nh("192.0.2.1", Some("a"), 1)]),
    ];
    assert_eq!(store.apply_all(&mut routes).unwrap(), 0);

    store
        .set_policy(&policy(
            60,
            vec![statement(
                "s",
                &["10.0.0.0/8", "192.168.0.0/16"],
                WeightAction::new(1).with_area("a", 0),
            )],
        ))
        .unwrap();
    assert_eq!(store.apply_all(&mut routes).unwrap(), 2);
    assert!(routes[0].nexthops.is_empty());
    assert_eq!(routes[1].nexthops.len(), 1);
    assert!(routes[2].nexthops.is_empty());
}

#[test]
fn clear_drops_policy() {
    let store = RibPolicyStore::new(Arc::new(MonotonicClock));
    store
        .set_policy(&policy(60, vec![statement("s", &["10.0.0.0/8"], WeightAction::new(1))]))
        .unwrap();
    store.clear().unwrap();
    assert!(store.active_policy().unwrap().is_none());
}

#[tokio::test]
async fn sweeper_evicts_expired_policy() {
    let (clock, dyn_clock) = manual_clock();
    let store = Arc::new(RibPolicyStore::new(dyn_clock));
    store
        .set_policy(&policy(1, vec![statement("s", &["10.0.0.0/8"], WeightAction::new(1))]))
        .unwrap();

    let sweeper = spawn_expiry_sweeper(Arc::clone(&store), Duration::from_millis(10));
    clock.advance(Duration::from_secs(2));

    let mut evicted = false;
    for _ in 0..100 {
        tokio::time::sleep(Duration::from_millis(10)).await;
        if !store.has_policy().unwrap() {
            evicted = true;
            break;
        }
    }
    sweeper.abort();
    assert!(evicted, "sweeper never evicted the expired policy");
}
