//! Frame timing: fixed-step accumulator, redraw pacing and the session clock.
//!
//! Movement speeds are expressed per *reference frame* (1/60 s), so a delta of
//! `1.0` means "one frame at 60 FPS". The simulation always advances in fixed
//! `fixed_dt` slices, which keeps movement identical no matter which FPS cap is
//! active.

use std::time::{Duration, Instant};

const FPS_SAMPLE_COUNT: usize = 60;

/// Rate that movement speeds are authored against.
pub const REFERENCE_FPS: f64 = 60.0;

pub struct TimeState {
    pub fixed_dt: f64,
    pub max_accumulator: f64,
    accumulator: f64,
    pub total_time: f64,
    pub fixed_step_count: u64,
    pub frame_count: u64,
    pub steps_this_frame: u32,
    pub real_dt: f64,
    last_instant: Instant,
    pub interpolation_alpha: f64,

    fps_samples: [f64; FPS_SAMPLE_COUNT],
    fps_sample_index: usize,
    pub smoothed_fps: f64,
    pub smoothed_frame_time_ms: f64,
}

impl TimeState {
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    pub fn starting_at(start: Instant) -> Self {
        Self {
            fixed_dt: 1.0 / REFERENCE_FPS,
            max_accumulator: 0.25,
            accumulator: 0.0,
            total_time: 0.0,
            fixed_step_count: 0,
            frame_count: 0,
            steps_this_frame: 0,
            real_dt: 0.0,
            last_instant: start,
            interpolation_alpha: 0.0,
            fps_samples: [1.0 / REFERENCE_FPS; FPS_SAMPLE_COUNT],
            fps_sample_index: 0,
            smoothed_fps: REFERENCE_FPS,
            smoothed_frame_time_ms: 1000.0 / REFERENCE_FPS,
        }
    }

    pub fn begin_frame(&mut self) {
        self.begin_frame_at(Instant::now());
    }

    pub fn begin_frame_at(&mut self, now: Instant) {
        self.real_dt = now.saturating_duration_since(self.last_instant).as_secs_f64();
        self.last_instant = now;

        // Spiral-of-death cap
        if self.real_dt > self.max_accumulator {
            log::warn!(
                "Frame took {:.1}ms, capping accumulator to {}ms",
                self.real_dt * 1000.0,
                self.max_accumulator * 1000.0
            );
            self.real_dt = self.max_accumulator;
        }

        self.accumulator += self.real_dt;
        self.steps_this_frame = 0;
        self.frame_count += 1;

        self.fps_samples[self.fps_sample_index] = self.real_dt;
        self.fps_sample_index = (self.fps_sample_index + 1) % FPS_SAMPLE_COUNT;
        let avg_dt: f64 = self.fps_samples.iter().sum::<f64>() / FPS_SAMPLE_COUNT as f64;
        self.smoothed_frame_time_ms = avg_dt * 1000.0;
        self.smoothed_fps = if avg_dt > 0.0 { 1.0 / avg_dt } else { 0.0 };
    }

    pub fn should_step(&mut self) -> bool {
        if self.accumulator >= self.fixed_dt {
            self.accumulator -= self.fixed_dt;
            self.total_time += self.fixed_dt;
            self.fixed_step_count += 1;
            self.steps_this_frame += 1;
            true
        } else {
            false
        }
    }

    pub fn end_frame(&mut self) {
        self.interpolation_alpha = self.accumulator / self.fixed_dt;
    }

    /// Delta time of one fixed step, in reference frames.
    pub fn step_delta(&self) -> f32 {
        (self.fixed_dt * REFERENCE_FPS) as f32
    }

    /// Wall-clock time of the last frame, in reference frames.
    pub fn frame_delta(&self) -> f32 {
        (self.real_dt * REFERENCE_FPS) as f32
    }
}

impl Default for TimeState {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FramePacing {
    Ready,
    WaitUntil(Instant),
}

/// Paces redraw requests to an FPS cap. A cap of `0` disables pacing.
#[derive(Debug, Clone)]
pub struct FrameLimiter {
    period: Option<Duration>,
    next_frame: Instant,
}

impl FrameLimiter {
    pub fn new(fps: u32, now: Instant) -> Self {
        Self {
            period: period_for(fps),
            next_frame: now,
        }
    }

    pub fn set_fps(&mut self, fps: u32, now: Instant) {
        self.period = period_for(fps);
        self.next_frame = now;
    }

    pub fn period(&self) -> Option<Duration> {
        self.period
    }

    pub fn poll(&mut self, now: Instant) -> FramePacing {
        let Some(period) = self.period else {
            return FramePacing::Ready;
        };
        if now < self.next_frame {
            return FramePacing::WaitUntil(self.next_frame);
        }
        self.next_frame += period;
        // Fell behind by more than a frame: resync instead of bursting.
        if self.next_frame <= now {
            self.next_frame = now + period;
        }
        FramePacing::Ready
    }
}

fn period_for(fps: u32) -> Option<Duration> {
    (fps > 0).then(|| Duration::from_secs_f64(1.0 / fps as f64))
}

/// Wall-clock time since process start. Backed by `Instant`, so it never
/// goes backwards.
#[derive(Debug, Clone, Copy)]
pub struct SessionClock {
    started: Instant,
}

impl SessionClock {
    pub fn start() -> Self {
        Self {
            started: Instant::now(),
        }
    }

    pub fn started_at(started: Instant) -> Self {
        Self { started }
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    pub fn elapsed_at(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.started)
    }
}
