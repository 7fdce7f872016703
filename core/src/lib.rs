#![no_std]

extern crate alloc;

use serde::{Deserialize, Serialize};

pub use cell::*;
pub use error::*;
pub use generator::*;
pub use lot::*;
pub use session::*;
pub use types::*;
pub use view::*;

mod cell;
mod error;
mod generator;
mod lot;
mod session;
mod types;
mod view;

/// Fixed position of the exit on every lot.
pub const EXIT: Coord2 = (0, 0);

/// Highest playable level; its lot side of 255 still fits [`Coord`].
pub const MAX_LEVEL: Level = 125;

/// Dimensions and population of a lot for one level.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LevelConfig {
    pub level: Level,
    pub size: Coord2,
    pub obstacles: CellCount,
    pub vehicles: CellCount,
}

impl LevelConfig {
    pub const fn new_unchecked(
        level: Level,
        size: Coord2,
        obstacles: CellCount,
        vehicles: CellCount,
    ) -> Self {
        Self {
            level,
            size,
            obstacles,
            vehicles,
        }
    }

    /// A `(5 + 2n)` square lot with `2n` obstacles and `2n + 3` cars.
    pub fn for_level(level: Level) -> Result<Self> {
        if level == 0 || level > MAX_LEVEL {
            return Err(GameError::InvalidLevel);
        }
        let side = 5 + 2 * level;
        let scale = CellCount::from(level);
        Ok(Self::new_unchecked(
            level,
            (side, side),
            2 * scale,
            2 * scale + 3,
        ))
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }

    /// Exit, obstacles, cars and the cursor each need a cell of their own.
    pub fn check_capacity(&self) -> Result<()> {
        let needed = self
            .obstacles
            .saturating_add(self.vehicles)
            .saturating_add(2);
        if needed > self.total_cells() {
            Err(GameError::LotFull)
        } else {
            Ok(())
        }
    }
}

/// Outcome of moving the cursor or the selected car
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum MoveOutcome {
    /// The step would leave the lot, nothing moved
    NoChange,
    Moved,
    /// The carried car drove out through the exit
    Exited(VehicleId),
}

impl MoveOutcome {
    /// Whether this outcome could have caused an update to the lot
    pub const fn has_update(self) -> bool {
        use MoveOutcome::*;
        match self {
            NoChange => false,
            Moved => true,
            Exited(_) => true,
        }
    }
}
