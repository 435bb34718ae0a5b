/// Completion threshold of the progress runner, one half of a 60 Hz frame.
pub const COMPLETION_EPSILON: f64 = 1.0 / 120.0;

/// Display-refresh callback source driving a session.
///
/// The host owns the actual callback and forwards each frame to `TransitionSession::tick`; the
/// session only switches the source on and off.
pub trait TickSource {
    /// Begin delivering frames.
    fn start(&mut self);

    /// Stop delivering frames.
    fn stop(&mut self);

    /// Return `true` while frames are being delivered.
    fn is_active(&self) -> bool;
}

/// Tick source for callers that step the clock themselves.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ManualTicker {
    active: bool,
    starts: u32,
}

impl ManualTicker {
    /// Inactive ticker.
    pub fn new() -> Self {
        Self::default()
    }

    /// How many times the session switched the ticker on.
    pub fn starts(&self) -> u32 {
        self.starts
    }
}

impl TickSource for ManualTicker {
    fn start(&mut self) {
        self.active = true;
        self.starts += 1;
    }

    fn stop(&mut self) {
        self.active = false;
    }

    fn is_active(&self) -> bool {
        self.active
    }
}

/// What one runner step produced.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RunnerStep {
    /// New progress in `[0, 1]`.
    Progress(f64),
    /// The runner reached an end and stopped; `true` when it ran forward.
    Complete(bool),
}

/// Plays progress forward or backward in real time once the user lets go.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ProgressRunner {
    time_passed: f64,
    duration: f64,
    reversed: bool,
    running: bool,
}

impl ProgressRunner {
    /// Stopped runner.
    pub fn new() -> Self {
        Self::default()
    }

    /// Run from `time_passed` seconds into a `duration`-long timeline.
    pub fn start(&mut self, time_passed: f64, duration: f64, reverse: bool) {
        self.time_passed = time_passed;
        self.duration = duration;
        self.reversed = reverse;
        self.running = true;
    }

    /// Stop without completing.
    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Return `true` while running.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Return `true` when running backward.
    pub fn is_reversed(&self) -> bool {
        self.reversed
    }

    /// Seconds into the timeline.
    pub fn time_passed(&self) -> f64 {
        self.time_passed
    }

    /// Advance by one frame of `dt` seconds.
    pub fn advance(&mut self, dt: f64) -> Option<RunnerStep> {
        if !self.running {
            return None;
        }
        self.time_passed += if self.reversed { -dt } else { dt };
        if self.reversed && self.time_passed <= COMPLETION_EPSILON {
            self.running = false;
            return Some(RunnerStep::Complete(false));
        }
        if !self.reversed && self.time_passed > self.duration - COMPLETION_EPSILON {
            self.running = false;
            return Some(RunnerStep::Complete(true));
        }
        Some(RunnerStep::Progress(self.time_passed / self.duration))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/progress.rs"]
mod tests;
