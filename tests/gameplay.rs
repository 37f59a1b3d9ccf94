use flappy_spark::consts::*;
use glam::Vec2;
use flappy_spark::platform::FrameClock;
use flappy_spark::sim::{
    GameController, GameEvent, GamePhase, Pipe, Viewport, autopilot_should_tap, collides,
};

const FRAME_MS: f64 = 1000.0 / 60.0;

fn viewport() -> Viewport {
    Viewport::new(390.0, 844.0).with_insets(47.0, 34.0)
}

/// Play one run with the autopilot, returning the frame timestamp it ended on
fn autopilot_run(game: &mut GameController, mut now: f64, max_frames: u32) -> f64 {
    assert_eq!(game.phase(), GamePhase::Waiting);
    game.tap();
    for _ in 0..max_frames {
        now += FRAME_MS;
        game.on_frame_tick(now);
        if game.phase() != GamePhase::Playing {
            break;
        }
        assert_eq!(game.state().pipes().len(), PIPE_COUNT);
        assert!(game.state().spark().vel_y <= MAX_FALL_SPEED);
        if autopilot_should_tap(game.state()) {
            game.tap();
        }
    }
    now
}

#[test]
fn test_spark_inside_gap_does_not_collide() {
    let vp = viewport();
    let y = vp.screen_height / 2.0;
    let pipes = [Pipe::new(vp.spark_x(), y - GAP_SIZE / 2.0)];
    assert!(!collides(Vec2::new(vp.spark_x(), y), &pipes, &vp));
}

#[test]
fn test_spark_one_unit_past_gap_bottom_collides() {
    let vp = viewport();
    let y = vp.screen_height / 2.0;
    let gap_bottom = y + SPARK_SIZE / 2.0 - 1.0;
    let pipes = [Pipe::new(vp.spark_x(), gap_bottom - GAP_SIZE)];
    assert!(collides(Vec2::new(vp.spark_x(), y), &pipes, &vp));
}

#[test]
fn test_full_cycle() {
    let mut game = GameController::manual(viewport(), 2024);
    assert_eq!(game.phase(), GamePhase::Waiting);

    game.tap();
    assert_eq!(game.phase(), GamePhase::Playing);
    assert_eq!(game.state().spark().vel_y, FLAP_VELOCITY);

    // No more input: the spark falls until it hits something
    let mut now = 0.0;
    while game.phase() == GamePhase::Playing {
        game.on_frame_tick(now);
        now += FRAME_MS;
        assert!(now < 60_000.0, "run never ended");
    }
    assert_eq!(game.phase(), GamePhase::GameOver);
    assert!(!game.clock().is_running());

    game.tap();
    assert_eq!(game.phase(), GamePhase::Waiting);
    assert_eq!(game.state().score(), 0);
    assert_eq!(game.state().pipes().len(), PIPE_COUNT);
    assert_eq!(game.state().spark().y, viewport().screen_height / 2.0);
}

#[test]
fn test_autopilot_sessions_are_deterministic() {
    let mut a = GameController::manual(viewport(), 31337);
    let mut b = GameController::manual(viewport(), 31337);

    let mut now_a = 0.0;
    let mut now_b = 0.0;
    for _ in 0..3 {
        now_a = autopilot_run(&mut a, now_a, 3_000);
        now_b = autopilot_run(&mut b, now_b, 3_000);
        assert_eq!(a.snapshot(), b.snapshot());
        assert_eq!(a.drain_events(), b.drain_events());

        if a.phase() == GamePhase::GameOver {
            a.tap();
            b.tap();
        } else {
            break;
        }
    }
}

#[test]
fn test_score_events_and_best_score_agree() {
    let mut game = GameController::manual(viewport(), 8);
    let mut now = 0.0;
    let mut best_seen = 0;

    for _ in 0..5 {
        now = autopilot_run(&mut game, now, 2_000);

        let mut last_total = 0;
        for event in game.drain_events() {
            match event {
                GameEvent::Scored { total } => {
                    assert!(total > last_total);
                    last_total = total;
                }
                GameEvent::GameOver { score, new_best } => {
                    assert_eq!(score, last_total);
                    assert_eq!(new_best, score > best_seen);
                }
                GameEvent::Flap | GameEvent::Reset => {}
            }
        }
        assert_eq!(game.state().score(), last_total);

        assert!(game.state().best_score() >= best_seen);
        best_seen = best_seen.max(game.state().score());

        if game.phase() != GamePhase::GameOver {
            break;
        }
        assert_eq!(game.state().best_score(), best_seen);
        game.tap();
    }
}

#[test]
fn test_snapshot_is_renderer_ready() {
    let game = GameController::manual(viewport(), 5);
    let snapshot = game.snapshot();

    assert_eq!(snapshot.phase, GamePhase::Waiting);
    assert_eq!(snapshot.pipes.len(), PIPE_COUNT);
    assert_eq!(snapshot.spark_x, viewport().spark_x());
    assert_eq!(snapshot.spark_x, game.state().spark_x());
    for pipe in &snapshot.pipes {
        assert!((pipe.gap_bottom - pipe.gap_top - GAP_SIZE).abs() < 1e-3);
        assert!(pipe.gap_top >= GAP_MARGIN);
        assert!(pipe.gap_bottom <= viewport().screen_height - GAP_MARGIN);
    }

    let json = serde_json::to_value(&snapshot).unwrap();
    assert_eq!(json["phase"], "waiting");
    assert_eq!(json["score"], 0);
    assert!(json["pipes"].as_array().is_some_and(|p| p.len() == PIPE_COUNT));
}
