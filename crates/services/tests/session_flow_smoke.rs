use std::sync::Arc;

use backend::{ExerciseRecord, InMemoryBackend, SessionBootstrap};
use fit_core::model::{SessionFeedback, SessionKind, SessionMode, SessionPhase};
use fit_core::time::fixed_clock;
use services::sessions::CompletionOutcome;
use services::SessionFlowService;

fn strength_record(index: usize, target_sets: u32, target_reps: u32) -> ExerciseRecord {
    ExerciseRecord {
        index,
        name: format!("Exercise {index}"),
        target_sets: Some(target_sets),
        target_reps: Some(target_reps),
        duration_secs: None,
        completed_sets: 0,
        rest_secs: None,
    }
}

fn hold_record(index: usize, duration_secs: u32) -> ExerciseRecord {
    ExerciseRecord {
        index,
        name: format!("Hold {index}"),
        target_sets: None,
        target_reps: None,
        duration_secs: Some(duration_secs),
        completed_sets: 0,
        rest_secs: None,
    }
}

fn bootstrap(exercises: Vec<ExerciseRecord>) -> SessionBootstrap {
    SessionBootstrap {
        exercises,
        current_exercise_index: 0,
        accumulated_calories: 0,
        total_sets_completed: 0,
    }
}

async fn drain_background_tasks() {
    for _ in 0..8 {
        tokio::task::yield_now().await;
    }
}

#[tokio::test]
async fn free_form_session_mirrors_sets_and_completion() {
    let backend = InMemoryBackend::new().with_bootstrap(bootstrap(vec![
        strength_record(0, 2, 10),
        strength_record(1, 2, 12),
    ]));
    let flow = SessionFlowService::new(fixed_clock(), Arc::new(backend.clone()));

    let mut session = flow.start_session(SessionKind::FreeForm).await;
    assert_eq!(session.mode(), SessionMode::Authenticated);

    while !session.is_complete() {
        match session.phase() {
            SessionPhase::Exercise => {
                let index = session.current_index();
                flow.log_set(&mut session, index, 10, Some(20.0)).unwrap();
            }
            SessionPhase::Rest => {
                session.skip().unwrap();
            }
            SessionPhase::Complete => {}
        }
    }

    let completion = flow
        .finalize(&mut session, Some(SessionFeedback::Better))
        .await
        .unwrap();
    assert!(matches!(completion.outcome, CompletionOutcome::Synced { .. }));
    assert_eq!(completion.report.exercises_completed(), 2);

    drain_background_tasks().await;
    let sets = backend.logged_sets();
    assert_eq!(sets.len(), 4);
    assert!(sets.iter().all(|set| set.session_id == session.session_id()));

    let completions = backend.completions();
    assert_eq!(completions.len(), 1);
    assert_eq!(completions[0].sets_completed, 4);
    assert_eq!(completions[0].feedback, Some(SessionFeedback::Better));
}

#[tokio::test]
async fn unreachable_backend_falls_back_to_guest_plan() {
    let backend = InMemoryBackend::new().with_failing_fetch();
    let flow = SessionFlowService::new(fixed_clock(), Arc::new(backend.clone()));

    let mut session = flow.start_session(SessionKind::FreeForm).await;
    assert_eq!(session.mode(), SessionMode::Guest);
    let fetch_calls = backend.call_count();

    // Run the whole guest session; nothing may reach the network.
    while !session.is_complete() {
        match session.phase() {
            SessionPhase::Exercise => {
                let index = session.current_index();
                flow.log_set(&mut session, index, 10, None).unwrap();
            }
            SessionPhase::Rest => {
                session.skip().unwrap();
            }
            SessionPhase::Complete => {}
        }
    }
    let completion = flow.finalize(&mut session, None).await.unwrap();
    assert_eq!(completion.outcome, CompletionOutcome::Local);

    drain_background_tasks().await;
    assert_eq!(backend.call_count(), fetch_calls);
    assert!(backend.logged_sets().is_empty());
    assert!(backend.completions().is_empty());
}

#[tokio::test]
async fn corrective_session_runs_on_ticks() {
    let backend = InMemoryBackend::new()
        .with_daily_plan(bootstrap(vec![hold_record(0, 30), hold_record(1, 30)]));
    let flow = SessionFlowService::new(fixed_clock(), Arc::new(backend.clone()));

    let mut session = flow.start_session(SessionKind::Corrective).await;
    assert_eq!(session.mode(), SessionMode::Authenticated);
    assert_eq!(session.phase_remaining_secs(), 30);

    for _ in 0..30 {
        session.tick();
    }
    assert_eq!(session.phase(), SessionPhase::Rest);
    assert_eq!(session.phase_remaining_secs(), 15);

    for _ in 0..15 {
        session.tick();
    }
    assert_eq!(session.phase(), SessionPhase::Exercise);
    assert_eq!(session.current_index(), 1);

    for _ in 0..30 {
        session.tick();
    }
    assert_eq!(session.phase(), SessionPhase::Complete);

    let completion = flow.finalize(&mut session, Some(SessionFeedback::Same)).await.unwrap();
    assert!(matches!(completion.outcome, CompletionOutcome::Synced { .. }));
    assert_eq!(completion.report.duration_secs(), 75);

    drain_background_tasks().await;
    // Corrective sessions only mirror the completion record.
    assert!(backend.logged_sets().is_empty());
    assert_eq!(backend.completions().len(), 1);
    assert_eq!(backend.completions()[0].exercises_completed, 2);
}

#[tokio::test]
async fn backend_bootstrap_resumes_mid_session() {
    let mut first = strength_record(0, 2, 10);
    first.completed_sets = 2;
    let backend = InMemoryBackend::new().with_bootstrap(SessionBootstrap {
        exercises: vec![first, strength_record(1, 2, 10)],
        current_exercise_index: 1,
        accumulated_calories: 12,
        total_sets_completed: 2,
    });
    let flow = SessionFlowService::new(fixed_clock(), Arc::new(backend.clone()));

    let session = flow.start_session(SessionKind::FreeForm).await;
    assert_eq!(session.mode(), SessionMode::Authenticated);
    assert_eq!(session.current_index(), 1);
    assert_eq!(session.totals().sets_completed, 2);
    assert_eq!(session.totals().calories_estimate, 12);
}

#[tokio::test]
async fn malformed_bootstrap_falls_back_to_guest_plan() {
    let mut bad = strength_record(0, 2, 10);
    bad.completed_sets = 9;
    let backend = InMemoryBackend::new().with_bootstrap(bootstrap(vec![bad]));
    let flow = SessionFlowService::new(fixed_clock(), Arc::new(backend));

    let session = flow.start_session(SessionKind::FreeForm).await;
    assert_eq!(session.mode(), SessionMode::Guest);
}
