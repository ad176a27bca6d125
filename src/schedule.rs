/// Colony-wide behaviour phase that every non-overridden pursuer follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Patrol,
    Pursuit,
}

impl Phase {
    pub fn label(self) -> &'static str {
        match self {
            Phase::Patrol => "patrol",
            Phase::Pursuit => "pursuit",
        }
    }
}

/// One slot of the schedule. `None` duration never ends.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhaseEntry {
    pub phase: Phase,
    pub duration: Option<f64>,
}

impl PhaseEntry {
    pub const fn timed(phase: Phase, seconds: f64) -> Self {
        Self {
            phase,
            duration: Some(seconds),
        }
    }

    pub const fn unbounded(phase: Phase) -> Self {
        Self {
            phase,
            duration: None,
        }
    }
}

/// Patrol 7s, pursuit 20s, patrol 7s, pursuit 20s, patrol 5s, then pursuit forever.
pub const DEFAULT_SCHEDULE: [PhaseEntry; 6] = [
    PhaseEntry::timed(Phase::Patrol, 7.0),
    PhaseEntry::timed(Phase::Pursuit, 20.0),
    PhaseEntry::timed(Phase::Patrol, 7.0),
    PhaseEntry::timed(Phase::Pursuit, 20.0),
    PhaseEntry::timed(Phase::Patrol, 5.0),
    PhaseEntry::unbounded(Phase::Pursuit),
];

/// Emitted when the schedule moves to its next slot. Scheduled pursuers
/// reverse once in response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseChange {
    pub from: Phase,
    pub to: Phase,
    pub index: usize,
}

/// Walks the phase list on simulation time.
#[derive(Debug, Clone)]
pub struct ModeScheduler {
    entries: Vec<PhaseEntry>,
    cursor: usize,
    /// Seconds spent in the current slot.
    elapsed: f64,
}

impl ModeScheduler {
    /// An empty list falls back to the default schedule.
    pub fn new(entries: Vec<PhaseEntry>) -> Self {
        let entries = if entries.is_empty() {
            DEFAULT_SCHEDULE.to_vec()
        } else {
            entries
        };
        Self {
            entries,
            cursor: 0,
            elapsed: 0.0,
        }
    }

    pub fn phase(&self) -> Phase {
        self.entries[self.cursor].phase
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    fn is_terminal(&self) -> bool {
        self.cursor + 1 >= self.entries.len()
    }

    /// Accumulate `dt` seconds. Returns the change when a slot runs out.
    /// The last slot never ends, whatever its listed duration.
    pub fn advance(&mut self, dt: f64) -> Option<PhaseChange> {
        self.elapsed += dt.max(0.0);
        if self.is_terminal() {
            return None;
        }

        let duration = self.entries[self.cursor].duration?;
        if self.elapsed < duration {
            return None;
        }

        let from = self.phase();
        self.cursor += 1;
        self.elapsed = 0.0;
        let to = self.phase();
        log::info!("Phase {} -> {} (slot {})", from.label(), to.label(), self.cursor);
        Some(PhaseChange {
            from,
            to,
            index: self.cursor,
        })
    }

    pub fn reset(&mut self) {
        self.cursor = 0;
        self.elapsed = 0.0;
    }
}

impl Default for ModeScheduler {
    fn default() -> Self {
        Self::new(DEFAULT_SCHEDULE.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_in_patrol() {
        let s = ModeScheduler::default();
        assert_eq!(s.phase(), Phase::Patrol);
        assert_eq!(s.cursor(), 0);
    }

    #[test]
    fn switches_after_exactly_seven_seconds() {
        let mut s = ModeScheduler::new(vec![
            PhaseEntry::timed(Phase::Patrol, 7.0),
            PhaseEntry::timed(Phase::Pursuit, 20.0),
        ]);
        let mut changes = 0;
        for _ in 0..70 {
            if s.advance(0.1).is_some() {
                changes += 1;
            }
        }
        // 70 * 0.1 may land a hair short of 7.0 in floating point.
        if changes == 0 {
            changes += s.advance(1e-9).map_or(0, |_| 1);
        }
        assert_eq!(changes, 1);
        assert_eq!(s.phase(), Phase::Pursuit);
    }

    #[test]
    fn whole_schedule_then_steady_pursuit() {
        let mut s = ModeScheduler::default();
        let mut seen = Vec::new();
        for _ in 0..(70 * 100) {
            if let Some(change) = s.advance(0.01) {
                seen.push(change.to);
            }
        }
        assert_eq!(
            seen,
            vec![
                Phase::Pursuit,
                Phase::Patrol,
                Phase::Pursuit,
                Phase::Patrol,
                Phase::Pursuit
            ]
        );
        assert_eq!(s.cursor(), 5);
        assert!(s.advance(1_000_000.0).is_none());
        assert_eq!(s.phase(), Phase::Pursuit);
    }

    #[test]
    fn finite_last_entry_is_clamped() {
        let mut s = ModeScheduler::new(vec![PhaseEntry::timed(Phase::Patrol, 1.0)]);
        assert!(s.advance(5.0).is_none());
        assert_eq!(s.phase(), Phase::Patrol);
    }

    #[test]
    fn negative_time_is_ignored() {
        let mut s = ModeScheduler::default();
        s.advance(-3.0);
        assert_eq!(s.elapsed(), 0.0);
    }

    #[test]
    fn reset_rewinds() {
        let mut s = ModeScheduler::default();
        s.advance(7.5);
        assert_eq!(s.phase(), Phase::Pursuit);
        s.reset();
        assert_eq!(s.phase(), Phase::Patrol);
        assert_eq!(s.elapsed(), 0.0);
    }
}
