//! Property tests for timer engine invariants.

use deepwork_core::{Event, SilentCue, TimerEngine, TimerState};
use proptest::prelude::*;

#[derive(Debug, Clone, Copy)]
enum Op {
    Start,
    Pause,
    Resume,
    Restart,
    Tick,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        1 => Just(Op::Start),
        1 => Just(Op::Pause),
        1 => Just(Op::Resume),
        1 => Just(Op::Restart),
        // Ticks dominate real sessions.
        4 => Just(Op::Tick),
    ]
}

fn apply(engine: &mut TimerEngine, op: Op) -> Vec<Event> {
    match op {
        Op::Start => engine.start().into_iter().collect(),
        Op::Pause => engine.pause().into_iter().collect(),
        Op::Resume => engine.resume().into_iter().collect(),
        Op::Restart => engine.restart().into_iter().collect(),
        Op::Tick => engine.tick(),
    }
}

proptest! {
    #[test]
    fn current_time_only_decreases_on_restart(
        max in 0u64..20,
        ops in prop::collection::vec(op(), 0..200),
    ) {
        let mut engine = TimerEngine::new(max, Box::new(SilentCue));
        let mut previous = engine.current_time();
        for op in ops {
            let state_before = engine.state();
            apply(&mut engine, op);
            let now = engine.current_time();
            match op {
                Op::Restart => prop_assert_eq!(now, 0),
                Op::Tick if state_before == TimerState::Running => {
                    prop_assert_eq!(now, previous + 1)
                }
                _ => prop_assert_eq!(now, previous),
            }
            previous = now;
        }
    }

    #[test]
    fn progress_stays_in_unit_interval(
        max in 0u64..10,
        ops in prop::collection::vec(op(), 0..100),
    ) {
        let mut engine = TimerEngine::new(max, Box::new(SilentCue));
        for op in ops {
            apply(&mut engine, op);
            let p = engine.progress();
            prop_assert!((0.0..=1.0).contains(&p));
            if max == 0 {
                prop_assert_eq!(p, 0.0);
            }
        }
    }

    #[test]
    fn running_never_survives_a_tick_at_max(
        max in 1u64..10,
        ops in prop::collection::vec(op(), 0..150),
    ) {
        let mut engine = TimerEngine::new(max, Box::new(SilentCue));
        for op in ops {
            let events = apply(&mut engine, op);
            if matches!(op, Op::Tick) && engine.is_max_reached() && !events.is_empty() {
                prop_assert_eq!(engine.state(), TimerState::Paused);
                prop_assert!(!engine.is_ticking());
            }
            prop_assert_eq!(engine.is_ticking(), engine.state() == TimerState::Running);
        }
    }
}

#[test]
fn five_second_max_scenario() {
    let mut engine = TimerEngine::new(5, Box::new(SilentCue));
    engine.start();
    for _ in 0..5 {
        engine.tick();
    }
    assert_eq!(engine.state(), TimerState::Paused);
    assert_eq!(engine.current_time(), 5);
    assert!(engine.is_max_reached());

    // Further ticks while paused change nothing.
    assert!(engine.tick().is_empty());
    assert_eq!(engine.current_time(), 5);

    engine.restart();
    assert_eq!(engine.current_time(), 0);
    assert_eq!(engine.state(), TimerState::Stopped);
}
