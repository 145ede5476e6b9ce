pub mod audio;
pub mod profiling;
pub mod regression;
pub mod transform;
pub mod tween;
pub mod ui;

use std::time::{Duration, Instant};

pub use glam::{Vec2, Vec3};

/// Fixed frame step used by headless runs unless the caller picks another one (60 Hz).
pub const DEFAULT_FRAME_STEP: Duration = Duration::from_nanos(16_666_667);

/// Something the host loop drives frame by frame.
///
/// Mirrors the engine component lifecycle: `init` once on attach, `handle` for discrete inputs,
/// `tick` once per frame and `dispose` when the owner goes away. Timed behaviour lives in state
/// advanced by `tick`, never in suspended control flow.
pub trait Behaviour {
    type Input;

    fn init(&mut self) {}

    fn handle(&mut self, input: Self::Input);

    fn tick(&mut self, dt: Duration);

    fn dispose(&mut self) {}
}

#[derive(Debug)]
pub struct HeadlessRunner<B: Behaviour> {
    behaviour: B,
    frame_step: Duration,
    frame: usize,
    elapsed: Duration,
}

impl<B: Behaviour> HeadlessRunner<B> {
    pub fn new(behaviour: B) -> Self {
        Self::with_frame_step(behaviour, DEFAULT_FRAME_STEP)
    }

    pub fn with_frame_step(mut behaviour: B, frame_step: Duration) -> Self {
        behaviour.init();
        Self {
            behaviour,
            frame_step: frame_step.max(Duration::from_micros(1)),
            frame: 0,
            elapsed: Duration::ZERO,
        }
    }

    pub fn frame(&self) -> usize {
        self.frame
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn frame_step(&self) -> Duration {
        self.frame_step
    }

    pub fn behaviour(&self) -> &B {
        &self.behaviour
    }

    pub fn behaviour_mut(&mut self) -> &mut B {
        &mut self.behaviour
    }

    /// Delivers `input` and then advances one frame.
    pub fn step(&mut self, input: B::Input) -> usize {
        self.behaviour.handle(input);
        self.advance_frame()
    }

    /// Advances `frames` frames without input.
    pub fn idle(&mut self, frames: usize) -> usize {
        for _ in 0..frames {
            self.advance_frame();
        }
        self.frame
    }

    /// Idles for at least `duration` of simulated time.
    pub fn run_for(&mut self, duration: Duration) -> usize {
        let target = self.elapsed.saturating_add(duration);
        while self.elapsed < target {
            self.advance_frame();
        }
        self.frame
    }

    pub fn run<I>(&mut self, inputs: I) -> usize
    where
        I: IntoIterator<Item = B::Input>,
    {
        let mut last_frame = self.frame;
        for input in inputs {
            last_frame = self.step(input);
        }
        last_frame
    }

    pub fn step_profiled<P: profiling::Profiler>(&mut self, input: B::Input, profiler: &mut P) -> usize {
        let total_start = Instant::now();

        let handle_start = Instant::now();
        self.behaviour.handle(input);
        let handle_dt = handle_start.elapsed();

        let tick_start = Instant::now();
        let frame = self.advance_frame();
        let tick_dt = tick_start.elapsed();

        let total_dt = total_start.elapsed();
        profiler.on_step(
            frame,
            profiling::StepTimings {
                handle: handle_dt,
                tick: tick_dt,
                total: total_dt,
            },
        );

        frame
    }

    /// Disposes the behaviour and hands it back to the caller.
    pub fn finish(mut self) -> B {
        self.behaviour.dispose();
        self.behaviour
    }

    fn advance_frame(&mut self) -> usize {
        self.behaviour.tick(self.frame_step);
        self.elapsed = self.elapsed.saturating_add(self.frame_step);
        self.frame += 1;
        self.frame
    }
}
