use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ParamsError {
    #[error("future_days must be at least 1 trading day, got {0}")]
    FutureDaysTooSmall(usize),

    #[error("threshold_pct must be a finite percentage greater than -100, got {0}")]
    ThresholdOutOfRange(f64),
}

/// Parameters of one breakout analysis run.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct BreakoutParams {
    /// Minimum single-day gain (in percent) for a day to count as a
    /// breakout candidate. May be zero or negative: the scan then
    /// degenerates to "any day at least that flat".
    pub threshold_pct: f64,

    /// How many closes after the breakout day must stay at or above the
    /// breakout close. Zero means candidates need no confirmation.
    pub hold_days: usize,

    /// Forward horizon in trading-day steps used to label Win/Loss.
    pub future_days: usize,
}

impl Default for BreakoutParams {
    /// 5% day, held for 2 closes, evaluated 126 trading days
    /// (roughly six months) later.
    fn default() -> Self {
        Self {
            threshold_pct: 5.0,
            hold_days: 2,
            future_days: 126,
        }
    }
}

impl BreakoutParams {
    /// Reject out-of-range parameters before any scanning starts.
    ///
    /// `hold_days == 0` and `threshold_pct <= 0` are valid degenerate
    /// settings; a horizon of zero days or a threshold at or below
    /// -100% is not.
    pub fn validate(&self) -> Result<(), ParamsError> {
        if self.future_days == 0 {
            return Err(ParamsError::FutureDaysTooSmall(self.future_days));
        }

        if !self.threshold_pct.is_finite() || self.threshold_pct <= -100.0 {
            return Err(ParamsError::ThresholdOutOfRange(self.threshold_pct));
        }

        Ok(())
    }

    /// Same hold window and horizon, different candidate threshold.
    pub fn with_threshold(self, threshold_pct: f64) -> Self {
        Self {
            threshold_pct,
            ..self
        }
    }
}
