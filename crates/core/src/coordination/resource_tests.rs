use super::*;
use proptest::prelude::*;
use std::sync::Arc;

#[test]
fn new_resource_is_full() {
    let pool = CountingResource::new(10);
    assert_eq!(pool.capacity(), 10);
    assert_eq!(pool.remaining(), 10);
    assert_eq!(pool.claimed(), 0);
    assert!(!pool.is_exhausted());
}

#[test]
fn claim_stops_at_first_failed_unit() {
    let pool = CountingResource::new(3);

    assert_eq!(pool.try_claim(2), 2);
    assert_eq!(pool.try_claim(5), 1);
    assert_eq!(pool.remaining(), 0);
    assert!(pool.is_exhausted());
}

#[test]
fn claim_against_empty_pool_has_no_side_effect() {
    let pool = CountingResource::new(0);

    assert!(!pool.try_claim_one());
    assert_eq!(pool.try_claim(4), 0);
    assert_eq!(pool.remaining(), 0);
    assert_eq!(pool.claimed(), 0);
}

#[test]
fn zero_request_claims_nothing() {
    let pool = CountingResource::new(5);
    assert_eq!(pool.try_claim(0), 0);
    assert_eq!(pool.remaining(), 5);
}

#[test]
fn concurrent_claims_never_oversell() {
    let pool = Arc::new(CountingResource::new(1_000));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let pool = Arc::clone(&pool);
            std::thread::spawn(move || (0..200).map(|_| pool.try_claim(1)).sum::<u32>())
        })
        .collect();

    let total: u32 = handles.into_iter().map(|h| h.join().unwrap()).sum();

    assert_eq!(total, 1_000);
    assert_eq!(pool.remaining(), 0);
    assert_eq!(pool.claimed(), total);
}

proptest! {
    #[test]
    fn claimed_units_match_capacity_minus_remaining(
        capacity in 0u32..100,
        wants in proptest::collection::vec(0u32..10, 0..30),
    ) {
        let pool = CountingResource::new(capacity);
        let mut total = 0;

        for want in wants {
            let got = pool.try_claim(want);
            prop_assert!(got <= want);
            total += got;
        }

        prop_assert!(total <= capacity);
        prop_assert_eq!(total, capacity - pool.remaining());
        prop_assert_eq!(total, pool.claimed());
    }
}
