/// Source of uniform choices for frightened pursuers.
pub trait RandomSource {
    /// Index in `0..len`. `len` is never zero.
    fn pick(&mut self, len: usize) -> usize;
}

impl RandomSource for fastrand::Rng {
    fn pick(&mut self, len: usize) -> usize {
        self.usize(0..len)
    }
}

/// Replays a fixed list of picks (wrapped into range), cycling when exhausted.
#[derive(Debug, Clone)]
pub struct ScriptedPicks {
    picks: Vec<usize>,
    next: usize,
}

impl ScriptedPicks {
    pub fn new(picks: Vec<usize>) -> Self {
        Self { picks, next: 0 }
    }
}

impl RandomSource for ScriptedPicks {
    fn pick(&mut self, len: usize) -> usize {
        if self.picks.is_empty() {
            return 0;
        }
        let value = self.picks[self.next % self.picks.len()];
        self.next += 1;
        value % len
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_rng_stays_in_range() {
        let mut rng = fastrand::Rng::with_seed(42);
        for len in 1..10 {
            assert!(rng.pick(len) < len);
        }
    }

    #[test]
    fn scripted_picks_cycle() {
        let mut picks = ScriptedPicks::new(vec![0, 5]);
        assert_eq!(picks.pick(3), 0);
        assert_eq!(picks.pick(3), 2);
        assert_eq!(picks.pick(3), 0);
        assert_eq!(ScriptedPicks::new(Vec::new()).pick(4), 0);
    }
}
