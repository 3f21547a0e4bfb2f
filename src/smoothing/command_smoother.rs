use super::rolling_window::RollingWindow;
use crate::pose::{MotionCommand, NumericField};
use std::collections::HashMap;

/// Samples kept per numeric field.
pub const SMOOTHING_WINDOW: usize = 5;

/// Per-session temporal smoother for [`MotionCommand`]s.
///
/// Every numeric slot present in a command is pushed into that slot's rolling
/// window and replaced by the recency-weighted mean of the window. Enum and
/// boolean slots pass through untouched. A slot absent from the current command
/// stays absent in the output, while its window is kept for later frames.
#[derive(Debug, Clone, Default)]
pub struct CommandSmoother {
    history: HashMap<NumericField, RollingWindow<f32, SMOOTHING_WINDOW>>,
}

impl CommandSmoother {
    pub fn new() -> Self { Self::default() }

    pub fn smooth(&mut self, command: &MotionCommand) -> MotionCommand {
        let mut smoothed = *command;
        for (field, value) in NumericField::present(command) {
            let window = self.history.entry(field).or_default();
            window.push(value);
            *field.slot(&mut smoothed) = window.recency_weighted_mean();
        }
        smoothed
    }

    /// Number of samples currently held for `field`.
    pub fn history_len(&self, field: NumericField) -> usize {
        self.history.get(&field).map_or(0, RollingWindow::len)
    }

    pub fn reset(&mut self) { self.history.clear(); }
}
