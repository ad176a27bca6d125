/// Effects that fire a fixed amount of simulation time after they were
/// scheduled. Each one re-checks its guard when it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deferred {
    /// Ready overlay is over.
    BeginPlay,
    /// Death sequence is over.
    RespawnAfterDeath,
    /// Level-complete pause is over.
    AdvanceLevel,
    FrightExpired { entity: hecs::Entity, serial: u32 },
    ReleaseFromDen { entity: hecs::Entity, round: u32 },
}

#[derive(Debug, Clone, Copy)]
struct Scheduled {
    due: f64,
    /// Insertion order; breaks ties between equal due times.
    seq: u64,
    event: Deferred,
}

/// Pending deferred effects keyed by simulation time.
#[derive(Debug, Default)]
pub struct DeferredQueue {
    pending: Vec<Scheduled>,
    next_seq: u64,
}

impl DeferredQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, due: f64, event: Deferred) {
        self.pending.push(Scheduled {
            due,
            seq: self.next_seq,
            event,
        });
        self.next_seq += 1;
    }

    /// Remove and return everything due at or before `now`, earliest first.
    pub fn drain_due(&mut self, now: f64) -> Vec<Deferred> {
        let mut due: Vec<Scheduled> = Vec::new();
        self.pending.retain(|s| {
            if s.due <= now {
                due.push(*s);
                false
            } else {
                true
            }
        });
        due.sort_by(|a, b| a.due.total_cmp(&b.due).then(a.seq.cmp(&b.seq)));
        due.into_iter().map(|s| s.event).collect()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }
}
