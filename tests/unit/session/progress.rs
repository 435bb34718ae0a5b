use super::*;

#[test]
fn manual_ticker_counts_starts() {
    let mut t = ManualTicker::new();
    assert!(!t.is_active());
    t.start();
    t.stop();
    t.start();
    assert!(t.is_active());
    assert_eq!(t.starts(), 2);
}

#[test]
fn idle_runner_yields_nothing() {
    let mut r = ProgressRunner::new();
    assert!(!r.is_running());
    assert_eq!(r.advance(0.1), None);
}

#[test]
fn forward_runner_reports_progress_then_completes() {
    let mut r = ProgressRunner::new();
    r.start(0.0, 1.0, false);

    assert_eq!(r.advance(0.25), Some(RunnerStep::Progress(0.25)));
    assert_eq!(r.advance(0.25), Some(RunnerStep::Progress(0.5)));
    assert_eq!(r.advance(0.495), Some(RunnerStep::Complete(true)));
    assert!(!r.is_running());
    assert_eq!(r.advance(0.1), None);
}

#[test]
fn reversed_runner_counts_down_to_cancel() {
    let mut r = ProgressRunner::new();
    r.start(0.5, 1.0, true);
    assert!(r.is_reversed());

    assert_eq!(r.advance(0.25), Some(RunnerStep::Progress(0.25)));
    assert_eq!(r.advance(0.25), Some(RunnerStep::Complete(false)));
    assert_eq!(r.time_passed(), 0.0);
}

#[test]
fn stop_halts_without_completing() {
    let mut r = ProgressRunner::new();
    r.start(0.0, 2.0, false);
    r.stop();
    assert_eq!(r.advance(5.0), None);
}
