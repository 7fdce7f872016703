use core::fmt::{Display, Formatter};
use serde::{Deserialize, Serialize};

use crate::Coord2;

/// Identifier of a parked car, displayed as `C1`, `C2`, ...
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct VehicleId(pub u16);

impl Display for VehicleId {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "C{}", self.0)
    }
}

/// Canonical state of a single lot cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cell {
    Empty,
    Exit,
    Obstacle,
    Occupied(VehicleId),
}

impl Cell {
    /// Whether the cursor or a carried car may step onto this cell.
    pub const fn is_passable(self) -> bool {
        matches!(self, Self::Empty | Self::Exit)
    }

    pub const fn vehicle(self) -> Option<VehicleId> {
        match self {
            Self::Occupied(id) => Some(id),
            _ => None,
        }
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::Empty
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: VehicleId,
    pub position: Coord2,
}
