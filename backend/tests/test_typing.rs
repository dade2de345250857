//! Tests for typing simulation, standalone and inside a session

use agent_demo_core_rs::typing::{char_delay, COMMA_PAUSE, SENTENCE_PAUSE, SPACE_PAUSE};
use agent_demo_core_rs::{
    AgentDefinition, DeliveryMetrics, DemoConfig, DemoEvent, DemoMode, DemoSession, Layer,
    RngManager, Role, RoleCatalog, TypingSimulator,
};
use proptest::prelude::*;

fn session_typing(query: &str) -> DemoSession {
    let role = Role {
        id: "typist".to_string(),
        name: "Typist".to_string(),
        agents: vec![AgentDefinition::new("solo", "Solo", Layer::Core, &["数据挖掘"])],
        sample_queries: vec![query.to_string()],
        delivery: DeliveryMetrics::default(),
    };
    let mut config = DemoConfig::classic().with_seed(5);
    config.catalog = RoleCatalog::new(vec![role]);
    DemoSession::new(config).unwrap()
}

#[test]
fn test_punctuation_pauses() {
    let mut rng = RngManager::new(1);
    assert_eq!(char_delay(',', &mut rng), COMMA_PAUSE);
    assert_eq!(char_delay('，', &mut rng), COMMA_PAUSE);
    for ch in ['.', '!', '?', '。'] {
        assert_eq!(char_delay(ch, &mut rng), SENTENCE_PAUSE);
    }
    assert_eq!(char_delay(' ', &mut rng), SPACE_PAUSE);
}

#[test]
fn test_empty_target_types_nothing() {
    let mut typing = TypingSimulator::new();
    let mut rng = RngManager::new(1);
    typing.start("");
    assert!(!typing.is_active());
    assert!(typing.type_next(&mut rng).is_none());
    assert_eq!(typing.displayed(), "");
}

#[test]
fn test_overwrite_replaces_display() {
    let mut typing = TypingSimulator::new();
    let mut rng = RngManager::new(1);
    typing.start("帮我分析一下");
    typing.type_next(&mut rng);

    assert_eq!(typing.overwrite("手动输入"), Some(1));
    assert_eq!(typing.displayed(), "手动输入");
    assert!(!typing.is_active());
    assert!(typing.type_next(&mut rng).is_none());
}

/// "A,B." types A at 0, then waits [40,70) before ',', 300 before 'B'
/// and [40,70) before '.'
#[test]
fn test_session_types_with_expected_timing() {
    let mut session = session_typing("A,B.");

    session.advance_to(0);
    assert_eq!(session.displayed_input(), "A");

    session.advance_to(39);
    assert_eq!(session.displayed_input(), "A");

    session.advance_to(69);
    assert_eq!(session.displayed_input(), "A,");

    session.advance_to(339);
    assert_eq!(session.displayed_input(), "A,");

    session.advance_to(369);
    assert_eq!(session.displayed_input(), "A,B");

    session.advance_to(379);
    assert_eq!(session.displayed_input(), "A,B");

    session.advance_to(439);
    assert_eq!(session.displayed_input(), "A,B.");
    assert!(!session.snapshot().typing);

    let finished = session.event_log().events_of_type("TypingFinished");
    assert_eq!(finished.len(), 1);
    assert!((380..440).contains(&finished[0].time()));
}

#[test]
fn test_no_continuation_scheduled_after_last_char() {
    let mut session = session_typing("AB");
    session.advance_to(500);

    let typing_tasks = session
        .pending_tasks()
        .filter(|(_, task)| task.kind() == "type_next_char")
        .count();
    assert_eq!(typing_tasks, 0);
}

#[test]
fn test_manual_switch_stops_typing() {
    let mut session = session_typing("Hello world, this is a demo.");
    session.advance_to(100);
    let partial = session.displayed_input().to_string();
    assert!(!partial.is_empty());
    assert!(partial.len() < "Hello world, this is a demo.".len());

    session.edit_input(&partial);
    assert_eq!(session.mode(), DemoMode::Manual);

    session.advance_to(5_000);
    assert_eq!(session.displayed_input(), partial);
    assert!(!session.event_log().events_of_type("TypingCancelled").is_empty());
    assert!(session
        .event_log()
        .events_of_type("StaleCallback")
        .iter()
        .any(|e| matches!(e, DemoEvent::StaleCallback { kind, .. } if kind == "type_next_char")));
}

proptest! {
    #[test]
    fn prop_letter_delay_in_range(seed in any::<u64>(), ch in proptest::char::range('a', 'z')) {
        let mut rng = RngManager::new(seed);
        let delay = char_delay(ch, &mut rng);
        prop_assert!((40..70).contains(&delay));
    }

    #[test]
    fn prop_other_delay_in_range(seed in any::<u64>(), ch in proptest::char::range('一', '龥')) {
        let mut rng = RngManager::new(seed);
        let delay = char_delay(ch, &mut rng);
        prop_assert!((30..70).contains(&delay));
    }

    #[test]
    fn prop_typing_reproduces_target(seed in any::<u64>(), target in "[a-z ,.]{0,24}") {
        let mut typing = TypingSimulator::new();
        let mut rng = RngManager::new(seed);
        typing.start(&target);
        while typing.type_next(&mut rng).is_some() {}
        prop_assert_eq!(typing.displayed(), target.as_str());
    }
}
