//! Tests for the in-memory counter backend

use std::sync::Arc;
use std::thread;

use super::*;

fn count(scope: &str) -> CounterDescriptor {
    CounterDescriptor::numeric(format!("{scope}_route_count"))
}

#[test]
fn test_init_and_inc() {
    let backend = MemoryCounterBackend::new();
    backend.init("s", &[count("s"), CounterDescriptor::numeric("s_route_size")]).unwrap();

    backend.inc("s", &[CounterIncrement::new("s_route_count", 2)]).unwrap();
    backend
        .inc(
            "s",
            &[CounterIncrement::new("s_route_count", 3), CounterIncrement::new("s_route_size", 100)],
        )
        .unwrap();

    let snapshot = backend.snapshot();
    assert_eq!(snapshot.get("s", "s_route_count"), Some(5));
    assert_eq!(snapshot.get("s", "s_route_size"), Some(100));
}

#[test]
fn test_new_counters_start_at_zero() {
    let backend = MemoryCounterBackend::new();
    backend.init("s", &[count("s")]).unwrap();
    assert_eq!(backend.snapshot().get("s", "s_route_count"), Some(0));
}

#[test]
fn test_reinit_keeps_values() {
    let backend = MemoryCounterBackend::new();
    backend.init("s", &[count("s")]).unwrap();
    backend.inc("s", &[CounterIncrement::new("s_route_count", 4)]).unwrap();

    backend.init("s", &[count("s")]).unwrap();

    assert_eq!(backend.snapshot().get("s", "s_route_count"), Some(4));
    assert_eq!(backend.scope_count(), 1);
}

#[test]
fn test_unknown_scope() {
    let backend = MemoryCounterBackend::new();
    let err = backend.inc("nope", &[CounterIncrement::new("x", 1)]).unwrap_err();
    assert_eq!(err, MetricsError::unknown_scope("nope"));
}

#[test]
fn test_unknown_counter_changes_nothing() {
    let backend = MemoryCounterBackend::new();
    backend.init("s", &[count("s")]).unwrap();

    let err = backend
        .inc("s", &[CounterIncrement::new("s_route_count", 1), CounterIncrement::new("bogus", 1)])
        .unwrap_err();

    assert!(matches!(err, MetricsError::UnknownCounter { .. }));
    assert_eq!(backend.snapshot().get("s", "s_route_count"), Some(0));
}

#[test]
fn test_stop_rejects_updates() {
    let backend = MemoryCounterBackend::new();
    backend.init("s", &[count("s")]).unwrap();
    backend.stop().unwrap();

    assert!(backend.is_stopped());
    assert_eq!(backend.inc("s", &[CounterIncrement::new("s_route_count", 1)]), Err(MetricsError::Stopped));
    assert_eq!(backend.init("t", &[count("t")]), Err(MetricsError::Stopped));
    assert!(backend.has_scope("s"));
}

#[test]
fn test_concurrent_increments() {
    let backend = Arc::new(MemoryCounterBackend::new());
    backend.init("s", &[count("s")]).unwrap();

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let backend = Arc::clone(&backend);
            thread::spawn(move || {
                for _ in 0..1000 {
                    backend.inc("s", &[CounterIncrement::new("s_route_count", 1)]).unwrap();
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }

    assert_eq!(backend.snapshot().get("s", "s_route_count"), Some(8000));
}
