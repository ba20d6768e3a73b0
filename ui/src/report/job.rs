//! Report job state: phases, progress checkpoints and cancellation.

use std::{cell::Cell, rc::Rc};

use super::error::ReportError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    LoadingData,
    WaitingRender,
    Capturing,
    Converting,
    Saving,
    Done,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobStatus {
    pub phase: Phase,
    pub percent: u8,
    pub message: String,
}

impl JobStatus {
    pub fn new(phase: Phase, percent: u8, message: impl Into<String>) -> Self {
        Self {
            phase,
            percent: percent.min(100),
            message: message.into(),
        }
    }

    pub fn starting() -> Self {
        Self::new(Phase::LoadingData, 0, "Memuat komponen...")
    }
}

/// Fixed checkpoints. Capture progress is spread between
/// [`checkpoints::CAPTURE`] and [`checkpoints::CONVERT`].
pub mod checkpoints {
    pub const FETCH: u8 = 10;
    pub const COMPOSE: u8 = 20;
    pub const VERIFY: u8 = 40;
    pub const CAPTURE: u8 = 60;
    pub const CONVERT: u8 = 80;
    pub const SAVE: u8 = 95;
    pub const DONE: u8 = 100;

    /// Progress value when capture of page `index` (0-based) of `total` starts.
    pub fn page(index: usize, total: usize) -> u8 {
        if total == 0 {
            return CAPTURE;
        }
        let span = usize::from(CONVERT - CAPTURE);
        CAPTURE + (span * index.min(total) / total) as u8
    }
}

/// Shared flag flipped when the user closes the progress modal. Every await in
/// the pipeline is followed by [`CancelToken::check`].
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Rc<Cell<bool>>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.get()
    }

    pub fn check(&self) -> Result<(), ReportError> {
        if self.is_cancelled() {
            Err(ReportError::Cancelled)
        } else {
            Ok(())
        }
    }
}

impl PartialEq for CancelToken {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}
