/// Background job lifecycle phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// No work in progress.
    #[default]
    Idle,
    /// A job has been started and is expected to complete asynchronously.
    Running,
}

/// Minimal single-job model.
///
/// Used for both the OCR job and the speech job; at most one of each runs at
/// a time and re-entrant requests are ignored while one is in flight.
#[derive(Debug, Default)]
pub struct Model {
    phase: Phase,
}

impl Model {
    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    pub fn start(&mut self) {
        self.phase = Phase::Running;
    }

    pub fn finish(&mut self) {
        self.phase = Phase::Idle;
    }
}
