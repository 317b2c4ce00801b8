//! Race-freedom of the worker pool.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use pricer_risk::parallel::{TaskGroup, TaskScheduler};

#[test]
fn test_four_workers_hundred_tasks() {
    for _ in 0..20 {
        let counter = Arc::new(AtomicUsize::new(0));
        let scheduler = TaskScheduler::new(4).unwrap();
        let group = TaskGroup::new();

        for _ in 0..100 {
            let counter = Arc::clone(&counter);
            group
                .spawn(&scheduler, move || {
                    counter.fetch_add(1, Ordering::SeqCst);
                })
                .unwrap();
        }
        group.wait();

        assert_eq!(counter.load(Ordering::SeqCst), 100);
        assert_eq!(group.pending(), 0);
    }
}

#[test]
fn test_shared_counter_under_mutex() {
    let counter = Arc::new(Mutex::new(0usize));
    let mut scheduler = TaskScheduler::new(4).unwrap();

    for _ in 0..100 {
        let counter = Arc::clone(&counter);
        scheduler
            .enqueue(move || {
                let mut value = counter.lock();
                *value += 1;
            })
            .unwrap();
    }
    scheduler.shutdown();

    assert_eq!(*counter.lock(), 100);
}

#[test]
fn test_results_land_in_submission_slots() {
    let scheduler = TaskScheduler::new(4).unwrap();
    let group = TaskGroup::new();
    let slots = Arc::new(Mutex::new(vec![None; 100]));

    for index in 0..100 {
        let slots = Arc::clone(&slots);
        group
            .spawn(&scheduler, move || {
                // Uneven work so completion order differs from submission order
                let spins = (100 - index) * 50;
                let value = (0..spins).fold(index, |acc, _| std::hint::black_box(acc));
                slots.lock()[index] = Some(value);
            })
            .unwrap();
    }
    group.wait();

    let slots = slots.lock();
    assert!(slots.iter().enumerate().all(|(i, slot)| *slot == Some(i)));
}
