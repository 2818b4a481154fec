//! Integration tests for provider contract violations.
//!
//! Tests verify that:
//! - A continuation fired twice resumes the computation once
//! - A stray firing after the driver moved on does not leak into later steps
//! - Dropped continuations and resolvers are reported, not awaited forever,
//!   even while other handles to the deferred are alive
//! - An awaitable that is kept alive but never settles stalls the run
//! - The step limit stops runaway computations

mod common;

use corun_core::awaitable::{CallbackOp, Continuation};
use corun_core::error::CorunError;
use corun_core::testing::{
    DUPLICATE_MARKER, Delivery, MockProvider, ResumptionRecorder, ScriptedComputation,
};
use corun_core::types::StepIndex;
use corun_core::value::Value;
use corun_driver::{Driver, DriverConfig};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;

use common::{Shape, awaitable, strings, test_driver};

#[tokio::test]
async fn double_firing_continuation_resumes_once() {
    for shape in [Shape::Deferred, Shape::Callback] {
        let provider = MockProvider::new();
        let recorder = Arc::new(ResumptionRecorder::new());

        let (p1, p2) = (provider.clone(), provider.clone());
        let computation = ScriptedComputation::new()
            .then(move || awaitable(&p1, shape, Ok(Value::string("first")), Delivery::Twice))
            .then(move || awaitable(&p2, shape, Ok(Value::string("second")), Delivery::Twice))
            .with_recorder(Arc::clone(&recorder));

        let summary = test_driver()
            .run_with_summary(move || computation)
            .await
            .unwrap();

        assert_eq!(summary.steps, 2);
        assert_eq!(strings(&summary.value.unwrap()), vec!["first", "second"]);
        assert_eq!(recorder.resumption_count(), 2);
        assert!(
            !recorder
                .resumed_values()
                .contains(&Value::string(DUPLICATE_MARKER))
        );
    }
}

#[tokio::test(start_paused = true)]
async fn stray_firing_does_not_reach_next_step() {
    let kept: Arc<Mutex<Option<Continuation>>> = Arc::new(Mutex::new(None));
    let provider = MockProvider::new();

    let keep = Arc::clone(&kept);
    let p = provider.clone();
    let computation = ScriptedComputation::new()
        .then(move || {
            CallbackOp::new(move |k| {
                k.succeed("one");
                *keep.lock() = Some(k);
            })
            .into()
        })
        .then(move || {
            p.deferred_ok("two", Delivery::After(Duration::from_millis(20)))
                .into()
        });

    // Fire the step-0 continuation again while step 1 is pending.
    let stray = Arc::clone(&kept);
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(5)).await;
        if let Some(k) = stray.lock().as_ref() {
            k.succeed("ghost");
            k.fail("ghost failure");
        }
    });

    let value = test_driver().run(move || computation).await.unwrap();
    assert_eq!(strings(&value.unwrap()), vec!["one", "two"]);
    assert!(kept.lock().is_some());
}

#[tokio::test]
async fn dropped_report_is_abandoned() {
    for shape in [Shape::Deferred, Shape::Callback] {
        let provider = MockProvider::new();
        let recorder = Arc::new(ResumptionRecorder::new());
        let (p1, p2) = (provider.clone(), provider.clone());

        let computation = ScriptedComputation::new()
            .then(move || awaitable(&p1, shape, Ok(Value::string("ok")), Delivery::Immediate))
            .then(move || awaitable(&p2, shape, Ok(Value::string("lost")), Delivery::Dropped))
            .with_recorder(Arc::clone(&recorder));

        let err = test_driver().run(move || computation).await.unwrap_err();

        assert!(err.is_contract_violation());
        match err {
            CorunError::AwaitableAbandoned { step, .. } => assert_eq!(step, StepIndex::new(1)),
            other => panic!("expected abandoned awaitable, got {:?}", other),
        }
        assert_eq!(recorder.resumed_values(), vec![Value::string("ok")]);
    }
}

#[tokio::test(start_paused = true)]
async fn dropped_resolver_is_abandoned_while_deferred_is_shared() {
    let (deferred, resolver) = corun_core::Deferred::new();
    let kept = deferred.clone();

    let computation = ScriptedComputation::new().then_yield(deferred);
    let dropper = tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(5)).await;
        drop(resolver);
    });

    let outcome =
        tokio::time::timeout(Duration::from_secs(60), test_driver().run(move || computation))
            .await
            .expect("run should end once the resolver is gone");

    assert!(matches!(
        outcome,
        Err(CorunError::AwaitableAbandoned { step, .. }) if step == StepIndex::FIRST
    ));
    assert!(kept.is_abandoned());
    dropper.await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn never_settling_awaitable_stalls() {
    for shape in [Shape::Deferred, Shape::Callback] {
        let provider = MockProvider::new();
        let p = provider.clone();
        let computation = ScriptedComputation::new()
            .then(move || awaitable(&p, shape, Ok(Value::null()), Delivery::Never));

        let driver = test_driver();
        let outcome =
            tokio::time::timeout(Duration::from_secs(60), driver.run(move || computation)).await;

        assert!(outcome.is_err(), "run should still be pending");
        assert_eq!(provider.held(), 1);
    }
}

#[tokio::test]
async fn step_limit_stops_runaway_computation() {
    let driver = Driver::new(DriverConfig::default().with_max_steps(3));

    let mut computation = ScriptedComputation::new();
    for i in 0..10i64 {
        computation = computation.then_yield(corun_core::Deferred::resolved(i));
    }

    let err = driver.run(move || computation).await.unwrap_err();
    assert!(matches!(err, CorunError::StepLimitExceeded { limit: 3, .. }));
}

#[tokio::test]
async fn step_limit_allows_exactly_the_limit() {
    let driver = Driver::new(DriverConfig::default().with_max_steps(2));
    let computation = ScriptedComputation::new()
        .then_yield(corun_core::Deferred::resolved("a"))
        .then_yield(corun_core::Deferred::resolved("b"));

    let summary = driver.run_with_summary(move || computation).await.unwrap();
    assert_eq!(summary.steps, 2);
}

#[tokio::test]
async fn zero_step_limit_does_not_stop_the_run() {
    let driver = Driver::new(DriverConfig::default().with_max_steps(0));
    let computation = ScriptedComputation::new()
        .then_yield(corun_core::Deferred::resolved("a"))
        .then_yield(corun_core::Deferred::resolved("b"));

    let summary = driver.run_with_summary(move || computation).await.unwrap();
    assert_eq!(summary.steps, 2);
}

#[tokio::test]
async fn each_run_gets_its_own_id() {
    let driver = test_driver();
    let first = driver
        .run_with_summary(ScriptedComputation::new)
        .await
        .unwrap();
    let second = driver
        .run_with_summary(ScriptedComputation::new)
        .await
        .unwrap();
    assert_ne!(first.run_id, second.run_id);
}
