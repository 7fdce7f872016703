use crate::*;
pub use random::*;

mod random;

/// Rejected draws tolerated before falling back to enumerating free cells.
pub const MAX_SAMPLE_ATTEMPTS: u32 = 1024;

/// Obstacle layouts tried before giving up on a reachable exit.
pub const MAX_LAYOUT_ATTEMPTS: u32 = 64;

pub trait LotGenerator {
    fn generate(self, config: LevelConfig) -> Result<ParkingLot>;
}
