//! Tests for the activity simulation engine

use agent_demo_core_rs::{
    ActivityEngine, ActivityStatus, Layer, PhaseAction, PhaseStep, PhaseTable, ResultLookup, RngManager,
    RoleCatalog, RunOrigin, RunPhase, StepOutcome,
};
use proptest::prelude::*;

fn investor_engine() -> (ActivityEngine, RoleCatalog) {
    (
        ActivityEngine::new(PhaseTable::role_catalog()),
        RoleCatalog::builtin(),
    )
}

#[test]
fn test_start_creates_thinking_records() {
    let (mut engine, catalog) = investor_engine();
    let role = catalog.get("investor").unwrap();
    let mut rng = RngManager::new(1);

    let pending = engine.start(role, "评估人工智能芯片赛道的投资价值", RunOrigin::Automatic, 0, &mut rng);

    let state = engine.state();
    assert_eq!(state.phase, RunPhase::Running);
    assert_eq!(state.records.len(), role.agents.len());
    assert!(state
        .records
        .iter()
        .all(|r| r.status() == ActivityStatus::Thinking && r.progress() == 0 && r.result().is_none()));
    assert_eq!(pending.len(), 9);
    assert!(pending.iter().all(|p| p.run_token == engine.current_token()));
}

#[test]
fn test_task_is_one_of_agent_tasks() {
    let catalog = RoleCatalog::classic();
    let role = catalog.first().unwrap();
    let mut engine = ActivityEngine::new(PhaseTable::classic());
    let mut rng = RngManager::new(77);

    engine.start(role, "q", RunOrigin::Manual, 0, &mut rng);
    for record in &engine.state().records {
        assert!(record.agent.tasks.contains(&record.task));
    }
}

#[test]
fn test_full_role_catalog_timeline() {
    let (mut engine, catalog) = investor_engine();
    let role = catalog.get("investor").unwrap();
    let results = ResultLookup::builtin();
    let mut rng = RngManager::new(3);

    let pending = engine.start(role, "q", RunOrigin::Automatic, 0, &mut rng);
    let token = pending[0].run_token;
    let mut apply = |engine: &mut ActivityEngine, step| engine.apply(token, step, &mut rng, &results);

    apply(&mut engine, 0);
    apply(&mut engine, 1);
    apply(&mut engine, 2);
    let state = engine.state();
    assert!(state.records_in(Layer::Core).all(|r| r.progress() == 60));
    assert!(state.records_in(Layer::Professional).all(|r| r.progress() == 50));
    assert!(state
        .records_in(Layer::DataSource)
        .all(|r| r.status() == ActivityStatus::Thinking));

    for step in 3..6 {
        apply(&mut engine, step);
    }
    let state = engine.state();
    assert!(state.records_in(Layer::Core).all(|r| r.progress() == 90));
    assert!(state.records_in(Layer::Professional).all(|r| r.progress() == 70));
    assert!(state
        .records_in(Layer::DataSource)
        .all(|r| r.status() == ActivityStatus::Working && r.progress() == 50));
    assert!(state.delivery().is_none());

    assert_eq!(apply(&mut engine, 6), StepOutcome::Completed);
    let state = engine.state();
    assert_eq!(state.phase, RunPhase::Completed);
    for record in &state.records {
        assert_eq!(record.progress(), 100);
        let result = record.result().unwrap();
        assert!(results.candidates(&record.task).iter().any(|c| c == result));
    }

    assert_eq!(apply(&mut engine, 7), StepOutcome::Delivered);
    assert_eq!(
        engine.state().delivery().map(|d| d.headline.clone()),
        Some(role.delivery.headline.clone())
    );

    assert_eq!(apply(&mut engine, 8), StepOutcome::Reset);
    assert!(engine.is_idle());
    assert!(engine.state().records.is_empty());
    assert!(engine.state().delivery().is_none());
}

#[test]
fn test_progress_never_decreases() {
    let catalog = RoleCatalog::classic();
    let role = catalog.first().unwrap();
    let results = ResultLookup::builtin();
    let mut rng = RngManager::new(8);
    let table = PhaseTable::new(vec![
        PhaseStep::advance(1_000, None, 80),
        PhaseStep::advance(2_000, None, 40),
        PhaseStep::at(3_000, PhaseAction::Complete),
        PhaseStep::at(4_000, PhaseAction::Reset),
    ]);
    let mut engine = ActivityEngine::new(table);

    let pending = engine.start(role, "q", RunOrigin::Manual, 0, &mut rng);
    let token = pending[0].run_token;
    engine.apply(token, 0, &mut rng, &results);
    assert_eq!(
        engine.apply(token, 1, &mut rng, &results),
        StepOutcome::Advanced { records_changed: 0 }
    );
    assert!(engine.state().records.iter().all(|r| r.progress() == 80));
}

#[test]
fn test_restart_supersedes_previous_run() {
    let catalog = RoleCatalog::builtin();
    let investor = catalog.get("investor").unwrap();
    let legal = catalog.get("legal").unwrap();
    let results = ResultLookup::builtin();
    let mut rng = RngManager::new(4);
    let mut engine = ActivityEngine::new(PhaseTable::role_catalog());

    let old = engine.start(investor, "a", RunOrigin::Automatic, 0, &mut rng);
    let new = engine.start(legal, "b", RunOrigin::Manual, 3_000, &mut rng);
    assert!(new[0].run_token > old[0].run_token);
    assert_eq!(engine.state().role_id.as_deref(), Some("legal"));

    for step in &old {
        assert!(engine.apply(step.run_token, step.step, &mut rng, &results).is_stale());
    }
    assert!(engine
        .state()
        .records
        .iter()
        .all(|r| r.status() == ActivityStatus::Thinking));
}

proptest! {
    #[test]
    fn prop_progress_monotone(seed in any::<u64>(), targets in proptest::collection::vec(1u8..=100, 1..8)) {
        let catalog = RoleCatalog::classic();
        let role = catalog.first().unwrap();
        let results = ResultLookup::builtin();
        let mut rng = RngManager::new(seed);

        let mut steps: Vec<PhaseStep> = targets
            .iter()
            .enumerate()
            .map(|(i, p)| PhaseStep::advance(i as u64 * 100 + 100, None, *p))
            .collect();
        let end = steps.len() as u64 * 100 + 100;
        steps.push(PhaseStep::at(end, PhaseAction::Complete));
        steps.push(PhaseStep::at(end + 100, PhaseAction::Reset));
        let mut engine = ActivityEngine::new(PhaseTable::new(steps));

        let pending = engine.start(role, "q", RunOrigin::Manual, 0, &mut rng);
        let mut previous = vec![0u8; engine.state().records.len()];
        for step in pending.iter().take(targets.len()) {
            engine.apply(step.run_token, step.step, &mut rng, &results);
            for (record, before) in engine.state().records.iter().zip(previous.iter_mut()) {
                prop_assert!(record.progress() >= *before);
                prop_assert!(record.progress() <= 100);
                *before = record.progress();
            }
        }
    }
}
