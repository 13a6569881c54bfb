//! Frame scheduling for the drive loop.
//!
//! The animator never sleeps or loops on its own. After each frame it asks a
//! [`FrameScheduler`] for another one, and the host decides when that frame
//! actually runs.

use std::time::{Duration, Instant};

/// Poll timeout used while no frame is pending.
const IDLE_POLL: Duration = Duration::from_millis(100);

/// Something that can be asked to run the next frame.
pub trait FrameScheduler {
    /// Ask for one more frame before the next repaint.
    fn request_frame(&mut self);
}

/// Wall-clock scheduler that spaces frames a fixed interval apart.
#[derive(Debug, Clone)]
pub struct FrameClock {
    interval: Duration,
    last_tick: Option<Instant>,
    due: Option<Instant>,
}

impl FrameClock {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_tick: None,
            due: None,
        }
    }

    pub fn set_interval(&mut self, interval: Duration) {
        self.interval = interval;
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Whether a frame has been requested and not yet taken.
    pub fn is_pending(&self) -> bool {
        self.due.is_some()
    }

    /// How long the host may block waiting for input before the next frame.
    pub fn timeout(&self, now: Instant) -> Duration {
        self.due.map_or(IDLE_POLL, |due| due.saturating_duration_since(now))
    }

    /// Consume the pending request if its time has come.
    pub fn take_due(&mut self, now: Instant) -> bool {
        match self.due {
            Some(due) if due <= now => {
                self.due = None;
                self.last_tick = Some(now);
                true
            }
            _ => false,
        }
    }
}

impl FrameScheduler for FrameClock {
    fn request_frame(&mut self) {
        // Repeated requests before the frame runs collapse into one.
        if self.due.is_none() {
            self.due = Some(match self.last_tick {
                Some(tick) => tick + self.interval,
                None => Instant::now(),
            });
        }
    }
}

/// Scheduler for tests and headless runs: frames run only when stepped.
#[derive(Debug, Clone, Default)]
pub struct ManualStepper {
    pending: bool,
    requests: u64,
}

impl ManualStepper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume the pending request, returning whether there was one.
    pub fn step(&mut self) -> bool {
        std::mem::take(&mut self.pending)
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Total number of requests received.
    pub fn requests(&self) -> u64 {
        self.requests
    }
}

impl FrameScheduler for ManualStepper {
    fn request_frame(&mut self) {
        self.pending = true;
        self.requests += 1;
    }
}
