//! Session Tests - Score, Countdown and Outcome

use lagoon_engine::game::{GameSession, Outcome, SessionPhase, SessionSettings};

fn started() -> GameSession {
    let mut session = GameSession::new(SessionSettings::default());
    session.start();
    session
}

#[test]
fn test_win_with_time_left() {
    let mut session = started();
    assert_eq!(session.tick(45.0), None);

    for i in 1..10 {
        assert_eq!(session.pickup(), SessionPhase::Active, "pickup {i}");
    }
    assert_eq!(session.pickup(), SessionPhase::Ended(Outcome::Win));
    assert!((session.elapsed() - 45.0).abs() < 1e-4);
    assert_eq!(
        session.end_text().as_deref(),
        Some("You Win!\nTime: 45.00 seconds")
    );
}

#[test]
fn test_lose_when_time_runs_out() {
    let mut session = started();
    session.pickup();
    let mut outcome = None;
    for _ in 0..10_000 {
        if let Some(o) = session.tick(1.0 / 60.0) {
            outcome = Some(o);
            break;
        }
    }
    assert_eq!(outcome, Some(Outcome::Lose));
    assert_eq!(session.remaining(), 0.0);
    assert_eq!(session.score(), 1);
}

#[test]
fn test_remaining_never_increases() {
    let mut session = started();
    let mut last = session.remaining();
    for step in [0.5, 0.0, 10.0, 3.25, 100.0, 1.0] {
        session.tick(step);
        assert!(session.remaining() <= last);
        assert!(session.remaining() >= 0.0);
        last = session.remaining();
    }
}

#[test]
fn test_nothing_moves_before_start() {
    let mut session = GameSession::new(SessionSettings::default());
    assert_eq!(session.tick(10.0), None);
    assert_eq!(session.remaining(), 90.0);
    assert_eq!(session.pickup(), SessionPhase::NotStarted);
    assert_eq!(session.end_text(), None);
}

#[test]
fn test_custom_target() {
    let mut session = GameSession::new(SessionSettings {
        duration: 30.0,
        target_score: 2,
    });
    session.start();
    assert_eq!(session.timer_text(), "00:30");
    session.pickup();
    assert_eq!(session.score_text(), "Score: 1 / 2");
    assert_eq!(session.pickup(), SessionPhase::Ended(Outcome::Win));
    assert_eq!(session.outcome(), Some(Outcome::Win));
}
