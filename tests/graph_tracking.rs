// tests/graph_tracking.rs

use std::sync::Arc;

use layerdag::{Engine, LayerdagError, NodeSpec, UnitHandle};
use layerdag_test_utils::units::{Probe, RecordingUnit, UnnamedUnit};

#[test]
fn unknown_bare_name_is_unregistrable() {
    let mut engine: Engine<Probe> = Engine::new();

    let err = engine.add_dependency("a", "b").unwrap_err();
    assert!(matches!(err, LayerdagError::UnregistrableUnit(name) if name == "a"));
}

#[test]
fn a_unit_with_an_empty_name_is_unregistrable() {
    let mut engine: Engine<Probe> = Engine::new();

    let err = engine.register(UnnamedUnit::new()).unwrap_err();
    assert!(matches!(err, LayerdagError::UnregistrableUnit(_)));
    assert_eq!(engine.graph().node_count(), 0);
}

#[test]
fn unit_handles_describe_their_target() {
    let by_name: UnitHandle<Probe> = "a".into();
    let by_unit: UnitHandle<Probe> = UnitHandle::Unit(RecordingUnit::new("b"));

    assert_eq!(by_name.describe(), "a");
    assert_eq!(by_unit.describe(), "b");
    assert!(format!("{by_unit:?}").contains("b"));
}

#[test]
fn registering_the_same_unit_twice_is_idempotent() {
    let mut engine: Engine<Probe> = Engine::new();
    let unit = RecordingUnit::new("a");

    let id1 = engine.register(Arc::clone(&unit)).unwrap();
    let id2 = engine.register(unit).unwrap();

    assert_eq!(id1, id2);
    assert_eq!(engine.graph().node_count(), 1);
}

#[test]
fn a_second_unit_claiming_a_taken_name_is_rejected() {
    let mut engine: Engine<Probe> = Engine::new();
    engine.register(RecordingUnit::new("a")).unwrap();

    let err = engine.register(RecordingUnit::new("a")).unwrap_err();
    assert!(matches!(err, LayerdagError::DuplicateNode(name) if name == "a"));
}

#[test]
fn add_dependency_auto_registers_both_sides() {
    let mut engine: Engine<Probe> = Engine::new();

    engine
        .add_dependency(
            UnitHandle::Unit(RecordingUnit::new("a")),
            UnitHandle::Unit(RecordingUnit::new("b")),
        )
        .unwrap();

    assert_eq!(engine.graph().node_count(), 2);
    let plan = engine.plan("a").unwrap();
    assert_eq!(
        plan.layer_names(),
        vec![vec!["b".to_string()], vec!["a".to_string()]]
    );
}

#[test]
fn duplicate_edges_collapse_to_one_dependency() {
    let mut engine: Engine<Probe> = Engine::new();
    engine.register(RecordingUnit::new("a")).unwrap();
    engine.register(RecordingUnit::new("b")).unwrap();

    engine.add_dependency("a", "b").unwrap();
    engine.add_dependency("a", "b").unwrap();

    let id = engine.graph().lookup(&UnitHandle::Name("a".into())).unwrap();
    assert_eq!(engine.graph().dependencies_of(id).len(), 1);
}

#[test]
fn retracking_replaces_the_dependency_set_without_forking() {
    let mut engine: Engine<Probe> = Engine::new();
    let a = RecordingUnit::new("a");
    let b = RecordingUnit::new("b");
    let c = RecordingUnit::new("c");

    engine
        .track(NodeSpec::new("a", Arc::clone(&a)).depends_on(b))
        .unwrap();
    assert_eq!(engine.graph().node_count(), 2);

    // Redefinition: same node, fresh dependency set, only c added.
    engine
        .track(NodeSpec::new("a", Arc::clone(&a)).depends_on(c))
        .unwrap();
    assert_eq!(engine.graph().node_count(), 3);

    let plan = engine.plan("a").unwrap();
    assert_eq!(
        plan.layer_names(),
        vec![vec!["c".to_string()], vec!["a".to_string()]]
    );
}

#[test]
fn track_can_alias_an_existing_name_to_a_new_unit() {
    let mut engine: Engine<Probe> = Engine::new();
    let u1 = RecordingUnit::new("x");
    let u2 = RecordingUnit::new("y");
    engine.register(Arc::clone(&u1)).unwrap();
    engine.register(Arc::clone(&u2)).unwrap();

    // Redefine "x" to carry u2: the name and u2's identity now resolve to
    // the same node, while "y" keeps pointing at its original one.
    engine.track(NodeSpec::new("x", Arc::clone(&u2))).unwrap();

    let by_name = engine.graph().lookup(&UnitHandle::Name("x".into())).unwrap();
    let by_unit = engine.graph().lookup(&UnitHandle::Unit(u2)).unwrap();
    assert_eq!(by_name, by_unit);
    assert_eq!(engine.graph().node_count(), 2);
    assert!(engine.graph().lookup(&UnitHandle::Name("y".into())).is_some());
}
