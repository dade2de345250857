//! Tests for SimClock and TimerQueue

use agent_demo_core_rs::{ScheduledTask, SimClock, TimerQueue};

#[test]
fn test_clock_starts_at_zero() {
    let clock = SimClock::new();
    assert_eq!(clock.now(), 0);
}

#[test]
fn test_advance_by_accumulates() {
    let mut clock = SimClock::new();
    clock.advance_by(40);
    clock.advance_by(300);
    assert_eq!(clock.now(), 340);
    assert_eq!(clock.elapsed_since(40), 300);
}

#[test]
#[should_panic(expected = "clock cannot move backward")]
fn test_clock_rejects_backward_move() {
    let mut clock = SimClock::new();
    clock.advance_to(1_000);
    clock.advance_to(999);
}

#[test]
fn test_timer_queue_orders_by_due_time() {
    let mut queue = TimerQueue::new();
    queue.schedule(2_500, ScheduledTask::Phase { run_token: 1, step: 1 });
    queue.schedule(1_000, ScheduledTask::Phase { run_token: 1, step: 0 });
    queue.schedule(8_000, ScheduledTask::AutoCycle { loop_token: 1 });

    let order: Vec<u64> = std::iter::from_fn(|| queue.pop_due(u64::MAX))
        .map(|(due, _)| due)
        .collect();
    assert_eq!(order, vec![1_000, 2_500, 8_000]);
    assert!(queue.is_empty());
}

#[test]
fn test_timer_queue_same_due_fires_in_schedule_order() {
    // Advance steps sharing an offset must apply in table order
    let mut queue = TimerQueue::new();
    for step in 3..6 {
        queue.schedule(4_000, ScheduledTask::Phase { run_token: 1, step });
    }

    let steps: Vec<usize> = std::iter::from_fn(|| queue.pop_due(4_000))
        .filter_map(|(_, task)| match task {
            ScheduledTask::Phase { step, .. } => Some(step),
            _ => None,
        })
        .collect();
    assert_eq!(steps, vec![3, 4, 5]);
}

#[test]
fn test_pop_due_respects_horizon() {
    let mut queue = TimerQueue::new();
    queue.schedule(100, ScheduledTask::TypeNextChar { typing_token: 1 });
    queue.schedule(200, ScheduledTask::TypeNextChar { typing_token: 1 });

    assert!(queue.pop_due(99).is_none());
    assert_eq!(queue.pop_due(150).map(|(due, _)| due), Some(100));
    assert!(queue.pop_due(150).is_none());
    assert_eq!(queue.next_due(), Some(200));
    assert_eq!(queue.pending(), 1);
}

#[test]
fn test_task_kind_and_token() {
    let task = ScheduledTask::AutoCycle { loop_token: 7 };
    assert_eq!(task.kind(), "auto_cycle");
    assert_eq!(task.token(), 7);

    let task = ScheduledTask::Phase { run_token: 3, step: 2 };
    assert_eq!(task.kind(), "phase");
    assert_eq!(task.token(), 3);
}
