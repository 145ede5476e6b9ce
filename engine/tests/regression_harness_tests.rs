use std::{
    fs,
    path::PathBuf,
    time::{Duration, SystemTime, UNIX_EPOCH},
};

use engine::{
    Behaviour, HeadlessRunner, Vec3,
    regression::{assert_or_update_golden_json, load_golden_json, record_trace, save_golden_json},
    tween::Tween,
};

fn unique_temp_dir() -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    std::env::temp_dir().join(format!("teahouse_engine_regression_harness_{nanos}"))
}

#[derive(Debug)]
struct Glide {
    position: Vec3,
    tween: Option<Tween<Vec3>>,
}

#[derive(Debug, Clone, Copy)]
enum GlideInput {
    Wait,
    MoveTo(Vec3),
}

impl Behaviour for Glide {
    type Input = GlideInput;

    fn handle(&mut self, input: Self::Input) {
        if let GlideInput::MoveTo(target) = input {
            self.tween = Some(Tween::new(self.position, target, Duration::from_millis(50)));
        }
    }

    fn tick(&mut self, dt: Duration) {
        if let Some(tween) = self.tween.as_mut() {
            self.position = tween.advance(dt);
            if tween.is_finished() {
                self.tween = None;
            }
        }
    }
}

fn inputs() -> Vec<GlideInput> {
    vec![
        GlideInput::MoveTo(Vec3::new(10.0, 0.0, 0.0)),
        GlideInput::Wait,
        GlideInput::Wait,
        GlideInput::MoveTo(Vec3::new(0.0, 5.0, 0.0)),
        GlideInput::Wait,
    ]
}

fn run_trace() -> engine::regression::TraceGolden {
    let mut runner = HeadlessRunner::with_frame_step(
        Glide {
            position: Vec3::ZERO,
            tween: None,
        },
        Duration::from_millis(20),
    );
    record_trace("glide", &mut runner, inputs(), |g| g.position).expect("trace should record")
}

#[test]
fn traces_are_deterministic() {
    let a = run_trace();
    let b = run_trace();
    assert_eq!(a, b);
    assert_eq!(a.hashes.len(), inputs().len() + 1);
}

#[test]
fn golden_written_then_matched_then_mismatch_reported() {
    let out_dir = unique_temp_dir();
    let path = out_dir.join("glide.json");
    let trace = run_trace();

    assert_or_update_golden_json(&path, &trace, false).expect("first run writes golden");
    assert_eq!(load_golden_json(&path).expect("golden loads"), trace);
    assert_or_update_golden_json(&path, &trace, false).expect("second run matches");

    let mut tampered = trace.clone();
    tampered.hashes[2] = "0".repeat(64);
    save_golden_json(&path, &tampered).expect("tampered golden saves");
    let err = assert_or_update_golden_json(&path, &trace, false).expect_err("mismatch is reported");
    assert!(err.to_string().contains("frame 2"), "unexpected error: {err}");

    let _ = fs::remove_dir_all(out_dir);
}
