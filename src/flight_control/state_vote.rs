use crate::pose::MotionState;
use crate::smoothing::RollingWindow;
use itertools::Itertools;

/// Number of recent non-neutral states taking part in the vote.
pub const VOTE_WINDOW: usize = 5;

/// Majority vote over the last few non-`None` motion states, damping rapid
/// flicker between states.
#[derive(Debug, Clone, Default)]
pub struct StateVote {
    history: RollingWindow<MotionState, VOTE_WINDOW>,
}

impl StateVote {
    pub fn new() -> Self { Self::default() }

    /// Feeds the raw state and returns the resolved one.
    ///
    /// `None` is never recorded and resolves to `None`: without input the bird
    /// stops acting rather than repeating the last gesture. Ties go to the state
    /// seen most recently.
    pub fn resolve(&mut self, raw: MotionState) -> MotionState {
        if raw == MotionState::None {
            return MotionState::None;
        }
        self.history.push(raw);

        let counts = self.history.iter().counts();
        let best = counts.values().copied().max().unwrap_or(0);
        self.history
            .iter()
            .rev()
            .find(|s| counts.get(s) == Some(&best))
            .unwrap_or(raw)
    }

    pub fn len(&self) -> usize { self.history.len() }

    pub fn is_empty(&self) -> bool { self.history.is_empty() }
}
