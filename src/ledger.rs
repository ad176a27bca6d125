pub const PELLET_POINTS: u32 = 10;
pub const POWER_PELLET_POINTS: u32 = 50;
/// Flat reward per captured pursuer (no combo within a fright window).
pub const CAPTURE_POINTS: u32 = 200;
pub const START_LIVES: u32 = 3;

/// Score, lives and level for one play session.
#[derive(Debug, Clone)]
pub struct ScoreLedger {
    score: u32,
    lives: u32,
    level: u32,
    best: u32,
}

impl ScoreLedger {
    pub fn new(best: u32) -> Self {
        Self {
            score: 0,
            lives: START_LIVES,
            level: 1,
            best,
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn best(&self) -> u32 {
        self.best
    }

    pub fn award(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
    }

    /// Take one life. Returns how many remain.
    pub fn lose_life(&mut self) -> u32 {
        self.lives = self.lives.saturating_sub(1);
        self.lives
    }

    pub fn is_game_over(&self) -> bool {
        self.lives == 0
    }

    pub fn advance_level(&mut self) {
        self.level += 1;
    }

    /// Raise the best score if beaten. Returns true when it changed.
    pub fn record_best(&mut self) -> bool {
        if self.score > self.best {
            self.best = self.score;
            true
        } else {
            false
        }
    }

    /// New session: score 0, full lives, level 1. The best score survives.
    pub fn reset(&mut self) {
        self.score = 0;
        self.lives = START_LIVES;
        self.level = 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lives_run_out() {
        let mut ledger = ScoreLedger::new(0);
        assert_eq!(ledger.lose_life(), 2);
        assert_eq!(ledger.lose_life(), 1);
        assert!(!ledger.is_game_over());
        assert_eq!(ledger.lose_life(), 0);
        assert!(ledger.is_game_over());
        assert_eq!(ledger.lose_life(), 0);
    }

    #[test]
    fn best_only_rises() {
        let mut ledger = ScoreLedger::new(500);
        ledger.award(PELLET_POINTS);
        assert!(!ledger.record_best());
        ledger.award(CAPTURE_POINTS * 3);
        assert!(ledger.record_best());
        assert_eq!(ledger.best(), 610);
        ledger.reset();
        assert_eq!(ledger.score(), 0);
        assert_eq!(ledger.lives(), START_LIVES);
        assert_eq!(ledger.level(), 1);
        assert_eq!(ledger.best(), 610);
    }
}
