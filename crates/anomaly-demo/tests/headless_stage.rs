//! Drives the stage through the fixed-step loop without a window.

use std::f32::consts::FRAC_PI_2;
use std::time::Duration;

use anomaly_demo::config::DemoConfig;
use anomaly_demo::physics::BodyPose;
use anomaly_demo::stage::Stage;
use anomaly_engine::input::{InputSnapshot, Key};
use anomaly_engine::time::FixedStepper;

fn new_stage() -> Stage {
    let config = DemoConfig::default();
    Stage::new(&config, config.world_min).expect("stage setup")
}

fn stepper() -> FixedStepper {
    let config = DemoConfig::default();
    FixedStepper::new(config.physics.time_step).with_max_catch_up(config.physics.max_catch_up)
}

/// Runs one frame the way the app does: controls, fixed steps, visual sync.
fn frame(stage: &mut Stage, stepper: &mut FixedStepper, input: &InputSnapshot, delta: Duration) {
    stage.apply_controls(input);
    stepper.advance(delta, stage);
    stage.sync_visuals();
}

/// Uneven frame times from a small LCG, between 1 and 40 ms.
fn jittery_deltas(n: usize) -> Vec<Duration> {
    let mut state = 0x2545_f491_u64;
    (0..n)
        .map(|_| {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            Duration::from_micros(1_000 + (state >> 33) % 39_000)
        })
        .collect()
}

fn run(deltas: &[Duration]) -> (BodyPose, BodyPose, u64) {
    let mut stage = new_stage();
    let mut stepper = stepper();
    for (i, &delta) in deltas.iter().enumerate() {
        let input = if (i / 20) % 2 == 0 {
            InputSnapshot::with_held([Key::ArrowRight, Key::ArrowUp])
        } else {
            InputSnapshot::with_held([Key::ArrowLeft])
        };
        frame(&mut stage, &mut stepper, &input, delta);
    }
    (
        stage.player_pose().expect("player"),
        stage.anomaly_pose().expect("anomaly"),
        stepper.total_steps(),
    )
}

#[test]
fn same_frame_times_give_identical_worlds() {
    let deltas = jittery_deltas(240);
    assert_eq!(run(&deltas), run(&deltas));
}

#[test]
fn anomaly_turns_a_quarter_in_one_second() {
    let mut stage = new_stage();
    let mut stepper = stepper();
    let step = stepper.step();
    for _ in 0..60 {
        frame(&mut stage, &mut stepper, &InputSnapshot::default(), step);
    }

    assert_eq!(stepper.total_steps(), 60);
    let angle = stage.anomaly_pose().expect("anomaly").angle;
    assert!((angle - FRAC_PI_2).abs() < 1e-3, "angle {angle}");
    assert!((stage.anomaly_visual().rotation - 90.0).abs() < 0.1);
    let spin = stage.anomaly_spin_rate().expect("anomaly");
    assert!((spin - FRAC_PI_2).abs() < 1e-6);
}

#[test]
fn holding_right_moves_the_player_right() {
    let mut stage = new_stage();
    let mut stepper = stepper();
    let start = stage.player_pose().expect("player").position;

    let input = InputSnapshot::with_held([Key::ArrowRight]);
    let step = stepper.step();
    for _ in 0..30 {
        frame(&mut stage, &mut stepper, &input, step);
    }

    let end = stage.player_pose().expect("player").position;
    assert!(end.x - start.x > 50.0, "moved {}", end.x - start.x);
    assert!((end.y - start.y).abs() < 1.0);
}

#[test]
fn player_coasts_to_a_stop_after_release() {
    let mut stage = new_stage();
    let mut stepper = stepper();
    let step = stepper.step();

    let right = InputSnapshot::with_held([Key::ArrowRight]);
    for _ in 0..10 {
        frame(&mut stage, &mut stepper, &right, step);
    }
    let released = stage.player_pose().expect("player").position;
    let speed = stage.player_linear_velocity().expect("player").length();
    assert!(speed > 200.0 && speed <= 250.0, "speed {speed}");

    // 2.5 linear damping: the body keeps moving for a while, then settles.
    for _ in 0..300 {
        frame(&mut stage, &mut stepper, &InputSnapshot::default(), step);
    }
    let settled = stage.player_pose().expect("player").position;
    let mut after = settled;
    for _ in 0..10 {
        frame(&mut stage, &mut stepper, &InputSnapshot::default(), step);
        after = stage.player_pose().expect("player").position;
    }

    assert!(settled.x > released.x);
    assert!((after.x - settled.x).abs() < 0.5);
    assert!(stage.player_linear_velocity().expect("player").length() < 0.1);
}

#[test]
fn long_stall_is_capped() {
    let mut stage = new_stage();
    let mut stepper = stepper();
    let report = stepper.advance(Duration::from_secs(2), &mut stage);
    assert_eq!(report.steps, 8);
    assert!(report.dropped > 0);
}
