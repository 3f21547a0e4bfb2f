use serde::Serialize;
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter};

/// Discrete flight intent recognised from a pose.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Default, Display, EnumIter, Serialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum MotionState {
    #[default]
    None,
    Glide,
    Dive,
    GainHeight,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Display, Serialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum TurnDirection {
    Left,
    Right,
}

impl TurnDirection {
    /// `+1.0` for right, `-1.0` for left.
    pub fn sign(self) -> f32 {
        match self {
            TurnDirection::Left => -1.0,
            TurnDirection::Right => 1.0,
        }
    }
}

/// A symbolic flight command.
///
/// Every slot except `state` is optional: `None` means the classifier did not
/// emit the field this frame, which is distinct from an emitted zero. The same
/// shape carries smoothed commands, where numeric slots hold weighted averages.
#[derive(Debug, PartialEq, Clone, Copy, Default, Serialize)]
pub struct MotionCommand {
    pub state: MotionState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub turn: Option<TurnDirection>,
    /// Degrees, `0..=60`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub turn_angle: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flap: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flap_intensity: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dive_intensity: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height_gain: Option<f32>,
}

impl MotionCommand {
    /// The command emitted when no usable pose is available.
    pub fn neutral() -> Self { Self::default() }

    pub fn is_flapping(&self) -> bool { self.flap.unwrap_or(false) }
}

/// The numeric slots of a [`MotionCommand`], used as keys for per-field smoothing.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Display, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum NumericField {
    TurnAngle,
    FlapIntensity,
    DiveIntensity,
    HeightGain,
}

impl NumericField {
    /// The numeric slots set in `cmd`, with their values.
    pub fn present(cmd: &MotionCommand) -> impl Iterator<Item = (NumericField, f32)> + '_ {
        NumericField::iter().filter_map(|f| f.get(cmd).map(|v| (f, v)))
    }

    pub fn get(self, cmd: &MotionCommand) -> Option<f32> {
        match self {
            NumericField::TurnAngle => cmd.turn_angle,
            NumericField::FlapIntensity => cmd.flap_intensity,
            NumericField::DiveIntensity => cmd.dive_intensity,
            NumericField::HeightGain => cmd.height_gain,
        }
    }

    pub fn slot(self, cmd: &mut MotionCommand) -> &mut Option<f32> {
        match self {
            NumericField::TurnAngle => &mut cmd.turn_angle,
            NumericField::FlapIntensity => &mut cmd.flap_intensity,
            NumericField::DiveIntensity => &mut cmd.dive_intensity,
            NumericField::HeightGain => &mut cmd.height_gain,
        }
    }
}
