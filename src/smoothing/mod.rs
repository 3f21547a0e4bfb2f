//! Jitter reduction for classifier output.

mod command_smoother;
mod rolling_window;

pub use command_smoother::{CommandSmoother, SMOOTHING_WINDOW};
pub use rolling_window::RollingWindow;
