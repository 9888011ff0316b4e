//! Power-up inventory and target geometry

use arrayvec::ArrayVec;

use crate::types::{PowerUpKind, GRID_SIZE};

/// Remaining uses per power-up kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PowerUpInventory {
    area_clear: u8,
    reshuffle: u8,
    single_clear: u8,
}

impl PowerUpInventory {
    /// Fresh session counts
    pub fn new() -> Self {
        Self {
            area_clear: PowerUpKind::AreaClear.initial_count(),
            reshuffle: PowerUpKind::Reshuffle.initial_count(),
            single_clear: PowerUpKind::SingleClear.initial_count(),
        }
    }

    /// An inventory with explicit counts
    pub fn with_counts(area_clear: u8, reshuffle: u8, single_clear: u8) -> Self {
        Self {
            area_clear,
            reshuffle,
            single_clear,
        }
    }

    pub fn count(&self, kind: PowerUpKind) -> u8 {
        match kind {
            PowerUpKind::AreaClear => self.area_clear,
            PowerUpKind::Reshuffle => self.reshuffle,
            PowerUpKind::SingleClear => self.single_clear,
        }
    }

    pub fn has(&self, kind: PowerUpKind) -> bool {
        self.count(kind) > 0
    }

    /// Spend one use; returns false (and changes nothing) when none are left
    pub fn consume(&mut self, kind: PowerUpKind) -> bool {
        let slot = match kind {
            PowerUpKind::AreaClear => &mut self.area_clear,
            PowerUpKind::Reshuffle => &mut self.reshuffle,
            PowerUpKind::SingleClear => &mut self.single_clear,
        };
        if *slot == 0 {
            return false;
        }
        *slot -= 1;
        true
    }
}

impl Default for PowerUpInventory {
    fn default() -> Self {
        Self::new()
    }
}

/// Cells hit by an area clear centred on `(row, col)`, clipped to the grid
///
/// ```
/// use tui_blocks_core::powerup::area_targets;
///
/// assert_eq!(area_targets(5, 5).len(), 9);
/// assert_eq!(area_targets(0, 0).len(), 4);
/// assert_eq!(area_targets(0, 4).len(), 6);
/// ```
pub fn area_targets(row: u8, col: u8) -> ArrayVec<(u8, u8), 9> {
    let mut cells = ArrayVec::new();
    for dr in -1i8..=1 {
        for dc in -1i8..=1 {
            let r = row as i8 + dr;
            let c = col as i8 + dc;
            if (0..GRID_SIZE as i8).contains(&r) && (0..GRID_SIZE as i8).contains(&c) {
                cells.push((r as u8, c as u8));
            }
        }
    }
    cells
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_counts() {
        let inventory = PowerUpInventory::new();
        assert_eq!(inventory.count(PowerUpKind::AreaClear), 2);
        assert_eq!(inventory.count(PowerUpKind::Reshuffle), 2);
        assert_eq!(inventory.count(PowerUpKind::SingleClear), 3);
    }

    #[test]
    fn test_consume_stops_at_zero() {
        let mut inventory = PowerUpInventory::with_counts(1, 0, 0);
        assert!(inventory.consume(PowerUpKind::AreaClear));
        assert!(!inventory.consume(PowerUpKind::AreaClear));
        assert!(!inventory.consume(PowerUpKind::Reshuffle));
        assert_eq!(inventory.count(PowerUpKind::AreaClear), 0);
        assert!(!inventory.has(PowerUpKind::AreaClear));
    }

    #[test]
    fn test_area_targets_corner_and_edge() {
        let corner = area_targets(9, 9);
        assert_eq!(corner.as_slice(), &[(8, 8), (8, 9), (9, 8), (9, 9)]);
        assert_eq!(area_targets(9, 3).len(), 6);
        assert!(area_targets(4, 4).contains(&(3, 3)));
    }
}
