use std::collections::HashMap;

/// Key the best score is stored under.
pub const BEST_SCORE_KEY: &str = "mazechase_best_score";

/// Storage for the best score across sessions.
pub trait BestScoreStore {
    fn load(&self, key: &str) -> Option<u32>;
    fn save(&mut self, key: &str, score: u32);
}

/// In-process store, for headless runs and tests.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    values: HashMap<String, u32>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_best(score: u32) -> Self {
        let mut store = Self::new();
        store.save(BEST_SCORE_KEY, score);
        store
    }
}

impl BestScoreStore for MemoryStore {
    fn load(&self, key: &str) -> Option<u32> {
        self.values.get(key).copied()
    }

    fn save(&mut self, key: &str, score: u32) {
        self.values.insert(key.to_owned(), score);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_by_key() {
        let mut store = MemoryStore::new();
        assert_eq!(store.load(BEST_SCORE_KEY), None);
        store.save(BEST_SCORE_KEY, 1200);
        assert_eq!(store.load(BEST_SCORE_KEY), Some(1200));
        assert_eq!(store.load("other"), None);
        assert_eq!(MemoryStore::with_best(7).load(BEST_SCORE_KEY), Some(7));
    }
}
