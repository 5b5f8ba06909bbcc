use std::time::Duration;

use nova_strike_core::tuning::{COMBO_WINDOW, MAX_COMBO_MULTIPLIER};

/// Single score award after the combo multiplier was applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Award {
    pub(crate) points: u64,
    pub(crate) multiplier: u32,
    pub(crate) total: u64,
}

/// Session score with a time-windowed kill multiplier.
#[derive(Clone, Debug)]
pub(crate) struct ScoreBoard {
    total: u64,
    streak: u32,
    multiplier: u32,
    last_kill: Option<Duration>,
}

impl Default for ScoreBoard {
    fn default() -> Self {
        Self {
            total: 0,
            streak: 0,
            multiplier: 1,
            last_kill: None,
        }
    }
}

impl ScoreBoard {
    pub(crate) fn total(&self) -> u64 {
        self.total
    }

    pub(crate) fn multiplier(&self) -> u32 {
        self.multiplier
    }

    /// Adds `points` scaled by the current multiplier.
    pub(crate) fn award(&mut self, points: u64) -> Award {
        self.total = self
            .total
            .saturating_add(points.saturating_mul(u64::from(self.multiplier)));
        Award {
            points,
            multiplier: self.multiplier,
            total: self.total,
        }
    }

    /// Records a kill at simulation time `now`, extending the streak when the
    /// previous kill is within the combo window and restarting it otherwise.
    /// Returns the multiplier that applies to subsequent awards.
    pub(crate) fn register_kill(&mut self, now: Duration) -> u32 {
        let chained = self
            .last_kill
            .is_some_and(|last| now.saturating_sub(last) <= COMBO_WINDOW);
        if chained {
            self.streak = self.streak.saturating_add(1);
            self.multiplier = self.streak.min(MAX_COMBO_MULTIPLIER);
        } else {
            self.streak = 1;
            self.multiplier = 1;
        }
        self.last_kill = Some(now);
        self.multiplier
    }
}
