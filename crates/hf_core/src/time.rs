use std::cell::Cell;
use std::rc::Rc;
use std::time::Instant;

const FPS_SAMPLE_COUNT: usize = 60;
/// Frames slower than this are logged; usually a blocking hook.
const SLOW_FRAME_SECS: f64 = 0.25;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameStats {
    pub frame_count: u64,
    pub delta_secs: f64,
    pub smoothed_fps: f64,
    pub smoothed_frame_time_ms: f64,
}

impl Default for FrameStats {
    fn default() -> Self {
        Self {
            frame_count: 0,
            delta_secs: 0.0,
            smoothed_fps: 60.0,
            smoothed_frame_time_ms: 16.667,
        }
    }
}

/// Read-only view of the latest `FrameStats`, cheap to clone into hooks.
#[derive(Debug, Clone, Default)]
pub struct FrameStatsHandle(Rc<Cell<FrameStats>>);

impl FrameStatsHandle {
    pub fn get(&self) -> FrameStats {
        self.0.get()
    }
}

pub struct FrameClock {
    last_instant: Instant,
    fps_samples: [f64; FPS_SAMPLE_COUNT],
    fps_sample_index: usize,
    stats: FrameStats,
    shared: FrameStatsHandle,
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            last_instant: Instant::now(),
            fps_samples: [1.0 / 60.0; FPS_SAMPLE_COUNT],
            fps_sample_index: 0,
            stats: FrameStats::default(),
            shared: FrameStatsHandle::default(),
        }
    }

    pub fn handle(&self) -> FrameStatsHandle {
        self.shared.clone()
    }

    pub fn stats(&self) -> FrameStats {
        self.stats
    }

    pub fn begin_frame(&mut self) {
        let now = Instant::now();
        let dt = now.duration_since(self.last_instant).as_secs_f64();
        self.last_instant = now;
        self.record(dt);
    }

    fn record(&mut self, dt: f64) {
        if dt > SLOW_FRAME_SECS && self.stats.frame_count > 0 {
            log::warn!("Frame took {:.1}ms", dt * 1000.0);
        }

        self.stats.delta_secs = dt;
        self.stats.frame_count += 1;

        // FPS smoothing
        self.fps_samples[self.fps_sample_index] = dt;
        self.fps_sample_index = (self.fps_sample_index + 1) % FPS_SAMPLE_COUNT;
        let avg_dt: f64 = self.fps_samples.iter().sum::<f64>() / FPS_SAMPLE_COUNT as f64;
        self.stats.smoothed_frame_time_ms = avg_dt * 1000.0;
        self.stats.smoothed_fps = if avg_dt > 0.0 { 1.0 / avg_dt } else { 0.0 };

        self.shared.0.set(self.stats);
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
