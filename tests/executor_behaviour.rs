// tests/executor_behaviour.rs

use std::error::Error;
use std::sync::Arc;

use layerdag::{Engine, LayerdagError};
use layerdag_test_utils::builders::EngineBuilder;
use layerdag_test_utils::units::{ArgRecordingUnit, Probe};
use layerdag_test_utils::{init_tracing, with_timeout};

type TestResult = Result<(), Box<dyn Error>>;

fn diamond() -> Engine<Probe> {
    EngineBuilder::new()
        .unit("a")
        .unit("b")
        .unit("c")
        .unit("d")
        .edge("a", "b")
        .edge("a", "c")
        .edge("b", "d")
        .edge("c", "d")
        .build()
}

#[tokio::test]
async fn run_invokes_every_unit_once_in_layer_order() -> TestResult {
    init_tracing();

    let engine = diamond();
    let probe = Probe::new();

    let returned = with_timeout(engine.run("a", Arc::clone(&probe), Arc::new(()))).await?;

    // The context comes back unchanged.
    assert!(Arc::ptr_eq(&returned, &probe));

    for name in ["a", "b", "c", "d"] {
        assert_eq!(probe.count(name), 1, "unit '{name}' should run exactly once");
    }

    // A layer only starts after the previous one has fully settled, so the
    // recorded start order witnesses layer progression.
    let d = probe.position("d").unwrap();
    let b = probe.position("b").unwrap();
    let c = probe.position("c").unwrap();
    let a = probe.position("a").unwrap();
    assert!(d < b && d < c);
    assert!(b < a && c < a);

    Ok(())
}

#[tokio::test]
async fn middle_layer_failure_stops_later_layers() -> TestResult {
    init_tracing();

    let engine = EngineBuilder::new()
        .unit("leaf")
        .failing_unit("mid", "mid exploded")
        .unit("top")
        .edge("mid", "leaf")
        .edge("top", "mid")
        .build();
    let probe = Probe::new();

    let result = with_timeout(engine.run("top", Arc::clone(&probe), Arc::new(()))).await;

    match result {
        Err(LayerdagError::UnitFailed { unit, source }) => {
            assert_eq!(unit, "mid");
            assert!(source.to_string().contains("mid exploded"));
        }
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("run should have failed"),
    }

    assert_eq!(probe.count("leaf"), 1);
    assert_eq!(probe.count("mid"), 1);
    assert_eq!(probe.count("top"), 0, "layers after the failure must not start");

    Ok(())
}

#[tokio::test]
async fn failing_layer_drains_before_the_error_surfaces() -> TestResult {
    init_tracing();

    // mid_ok and mid_fail share a layer; both must settle even though one
    // of them fails, and top must never start.
    let engine = EngineBuilder::new()
        .unit("leaf")
        .unit("mid_ok")
        .failing_unit("mid_fail", "boom")
        .unit("top")
        .edge("mid_ok", "leaf")
        .edge("mid_fail", "leaf")
        .edge("top", "mid_ok")
        .edge("top", "mid_fail")
        .build();
    let probe = Probe::new();

    let result = with_timeout(engine.run("top", Arc::clone(&probe), Arc::new(()))).await;

    assert!(matches!(
        result,
        Err(LayerdagError::UnitFailed { ref unit, .. }) if unit == "mid_fail"
    ));
    assert_eq!(probe.count("mid_ok"), 1);
    assert_eq!(probe.count("mid_fail"), 1);
    assert_eq!(probe.count("top"), 0);

    Ok(())
}

#[tokio::test]
async fn args_are_bound_identically_to_every_invocation() -> TestResult {
    init_tracing();

    let mut engine: Engine<Probe, Vec<String>> = Engine::new();
    engine.register(ArgRecordingUnit::new("a"))?;
    engine.register(ArgRecordingUnit::new("b"))?;
    engine.add_dependency("a", "b")?;

    let probe = Probe::new();
    let args = Arc::new(vec!["x".to_string(), "y".to_string()]);

    with_timeout(engine.run("a", Arc::clone(&probe), args)).await?;

    assert_eq!(
        probe.started(),
        vec!["b(x,y)".to_string(), "a(x,y)".to_string()]
    );

    Ok(())
}

#[tokio::test]
async fn rerunning_a_cached_plan_invokes_units_again() -> TestResult {
    init_tracing();

    let engine = EngineBuilder::new().unit("a").unit("b").edge("a", "b").build();
    let probe = Probe::new();

    with_timeout(engine.run("a", Arc::clone(&probe), Arc::new(()))).await?;
    with_timeout(engine.run("a", Arc::clone(&probe), Arc::new(()))).await?;

    // The plan is memoized; the invocations are not.
    assert_eq!(probe.count("a"), 2);
    assert_eq!(probe.count("b"), 2);

    Ok(())
}
