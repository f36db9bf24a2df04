use super::*;
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[test]
fn empty_chain_is_rejected() {
    assert!(matches!(
        OrderedHandoffChain::new(0),
        Err(CoordinationError::EmptyChain)
    ));
}

#[test]
fn only_first_gate_starts_unlocked() {
    let chain = OrderedHandoffChain::new(3).unwrap();
    assert_eq!(chain.len(), 3);
    assert!(chain.is_unlocked(0));
    assert!(!chain.is_unlocked(1));
    assert!(!chain.is_unlocked(2));
    assert!(!chain.is_unlocked(3));
}

#[tokio::test]
async fn advance_unlocks_next_gate() {
    let chain = OrderedHandoffChain::new(2).unwrap();
    let cancel = CancellationToken::new();

    let turn = chain.wait_turn(0, &cancel).await.unwrap();
    assert_eq!(turn.index(), 0);
    assert_eq!(turn.sequence(), 0);
    assert!(!chain.is_unlocked(1));

    turn.advance();
    assert!(chain.is_unlocked(1));

    let turn = chain.wait_turn(1, &cancel).await.unwrap();
    assert_eq!(turn.sequence(), 1);
    // Last gate: advancing is a no-op
    turn.advance();
}

#[tokio::test]
async fn out_of_range_gate_is_an_error() {
    let chain = OrderedHandoffChain::new(2).unwrap();
    let cancel = CancellationToken::new();

    let err = chain.wait_turn(5, &cancel).await.unwrap_err();
    assert!(matches!(
        err,
        CoordinationError::GateOutOfRange { index: 5, len: 2 }
    ));
}

#[tokio::test]
async fn locked_gate_waits_until_cancelled() {
    let chain = Arc::new(OrderedHandoffChain::new(2).unwrap());
    let cancel = CancellationToken::new();

    let waiter = {
        let chain = Arc::clone(&chain);
        let cancel = cancel.clone();
        tokio::spawn(async move { chain.wait_turn(1, &cancel).await.map(|t| t.index()) })
    };

    tokio::time::sleep(Duration::from_millis(20)).await;
    assert!(!waiter.is_finished());

    cancel.cancel();
    let result = waiter.await.unwrap();
    assert!(matches!(result, Err(CoordinationError::Cancelled)));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn workers_take_turns_in_gate_order() {
    let chain = Arc::new(OrderedHandoffChain::new(8).unwrap());
    let cancel = CancellationToken::new();
    let order = Arc::new(Mutex::new(Vec::new()));

    // Spawn in reverse so scheduling order cannot explain the result
    let handles: Vec<_> = (0..8)
        .rev()
        .map(|index| {
            let chain = Arc::clone(&chain);
            let cancel = cancel.clone();
            let order = Arc::clone(&order);
            tokio::spawn(async move {
                let turn = chain.wait_turn(index, &cancel).await.unwrap();
                order.lock().unwrap().push((index, turn.sequence()));
                turn.advance();
            })
        })
        .collect();

    for handle in handles {
        handle.await.unwrap();
    }

    let order = order.lock().unwrap().clone();
    let expected: Vec<_> = (0..8).map(|i| (i, i as u64)).collect();
    assert_eq!(order, expected);
}
