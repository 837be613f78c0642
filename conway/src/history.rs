// history.rs - Recent-generation fingerprints for spotting cycles

use crate::grid::Grid;

pub const HISTORY_LEN: usize = 10;

/// Ring of the last [`HISTORY_LEN`] grid fingerprints.
#[derive(Debug, Clone, Default)]
pub struct CycleHistory {
    seen: [u64; HISTORY_LEN],
    count: usize,
}

impl CycleHistory {
    /// Record `grid`. Returns `true` if it matches one of the recorded
    /// generations, i.e. the board has settled or is oscillating.
    pub fn observe(&mut self, grid: &Grid) -> bool {
        let hash = grid.fingerprint();
        let filled = self.count.min(HISTORY_LEN);
        if self.seen[..filled].contains(&hash) {
            return true;
        }
        self.seen[self.count % HISTORY_LEN] = hash;
        self.count += 1;
        false
    }

    pub fn clear(&mut self) {
        self.count = 0;
    }
}
