use alloc::vec::Vec;
use rand::prelude::*;

use super::*;

/// Generation strategy that places obstacles, cars and the cursor uniformly at random, only
/// insisting that obstacles never wall off the exit.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomLotGenerator {
    seed: u64,
}

impl RandomLotGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl LotGenerator for RandomLotGenerator {
    fn generate(self, config: LevelConfig) -> Result<ParkingLot> {
        config.check_capacity()?;

        let mut rng = SmallRng::seed_from_u64(self.seed);
        let mut lot = lay_out_obstacles(&config, &mut rng)?;

        for number in 1..=config.vehicles {
            let coords = sample_cell(&mut rng, config.size, |coords| {
                lot.cell_at(coords) == Cell::Empty
            })?;
            lot.park_vehicle(VehicleId(number), coords);
        }

        let cursor = sample_cell(&mut rng, config.size, |coords| {
            lot.cell_at(coords) == Cell::Empty
        })?;
        lot.place_cursor(cursor);

        log::debug!(
            "Generated level {} lot {:?} with {} obstacles and {} cars, cursor at {:?}",
            config.level,
            config.size,
            config.obstacles,
            config.vehicles,
            cursor
        );
        Ok(lot)
    }
}

/// Draws obstacle layouts until one leaves the exit reachable from every open cell.
fn lay_out_obstacles<R: Rng>(config: &LevelConfig, rng: &mut R) -> Result<ParkingLot> {
    for attempt in 1..=MAX_LAYOUT_ATTEMPTS {
        let mut lot = ParkingLot::empty(config.level, config.size);
        for _ in 0..config.obstacles {
            let coords = sample_cell(rng, config.size, |coords| {
                lot.cell_at(coords) == Cell::Empty
            })?;
            lot.place_obstacle(coords);
        }

        if lot.is_exit_reachable() {
            return Ok(lot);
        }
        log::debug!("Obstacle layout {} cuts off the exit, redrawing", attempt);
    }

    log::warn!(
        "No obstacle layout with a reachable exit after {} attempts",
        MAX_LAYOUT_ATTEMPTS
    );
    Err(GameError::UnreachableExit)
}

/// Rejection-samples a cell satisfying `accept`.
///
/// Gives up after [`MAX_SAMPLE_ATTEMPTS`] draws and picks uniformly among the acceptable
/// cells instead, so a crowded lot can never spin forever.
fn sample_cell<R, F>(rng: &mut R, size: Coord2, accept: F) -> Result<Coord2>
where
    R: Rng,
    F: Fn(Coord2) -> bool,
{
    for _ in 0..MAX_SAMPLE_ATTEMPTS {
        let coords = (rng.random_range(0..size.0), rng.random_range(0..size.1));
        if accept(coords) {
            return Ok(coords);
        }
        log::trace!("Rejected sample at {:?}", coords);
    }

    let candidates: Vec<Coord2> = (0..size.0)
        .flat_map(|row| (0..size.1).map(move |col| (row, col)))
        .filter(|&coords| accept(coords))
        .collect();
    log::warn!(
        "Sampling gave up after {} draws, choosing among {} free cells",
        MAX_SAMPLE_ATTEMPTS,
        candidates.len()
    );
    candidates.choose(rng).copied().ok_or(GameError::LotFull)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generate(level: Level, seed: u64) -> ParkingLot {
        let config = LevelConfig::for_level(level).unwrap();
        RandomLotGenerator::new(seed).generate(config).unwrap()
    }

    #[test]
    fn generated_levels_have_expected_population() {
        for level in 1..=8 {
            for seed in 0..16 {
                let lot = generate(level, seed);
                let side = usize::from(5 + 2 * level);

                assert_eq!(lot.level(), level);
                assert_eq!(lot.cells().dim(), (side, side));
                assert_eq!(lot.obstacles().len(), usize::from(2 * level));
                assert_eq!(lot.vehicle_count(), CellCount::from(2 * level + 3));

                let exits = lot.cells().iter().filter(|&&cell| cell == Cell::Exit).count();
                assert_eq!(exits, 1);
                assert_eq!(lot.cell_at((0, 0)), Cell::Exit);
            }
        }
    }

    #[test]
    fn generated_entities_never_overlap() {
        for seed in 0..64 {
            let lot = generate(3, seed);

            let obstacle_cells = lot
                .cells()
                .iter()
                .filter(|&&cell| cell == Cell::Obstacle)
                .count();
            assert_eq!(obstacle_cells, lot.obstacles().len());

            for vehicle in lot.vehicles() {
                assert_eq!(lot.cell_at(vehicle.position), Cell::Occupied(vehicle.id));
            }
            let occupied = lot
                .cells()
                .iter()
                .filter(|cell| cell.vehicle().is_some())
                .count();
            assert_eq!(occupied, usize::from(lot.vehicle_count()));

            assert_eq!(lot.cell_at(lot.cursor()), Cell::Empty);
            assert_eq!(lot.selected(), None);
        }
    }

    #[test]
    fn vehicles_are_numbered_sequentially() {
        let lot = generate(2, 7);

        let ids: Vec<_> = lot.vehicles().map(|vehicle| vehicle.id).collect();
        assert_eq!(ids, (1..=7).map(VehicleId).collect::<Vec<_>>());
    }

    #[test]
    fn exit_is_always_reachable() {
        for seed in 0..128 {
            assert!(generate(1, seed).is_exit_reachable());
        }
    }

    #[test]
    fn same_seed_generates_same_lot() {
        assert_eq!(generate(4, 42), generate(4, 42));
    }

    #[test]
    fn crowded_lot_is_filled_completely() {
        // 3x3 lot: exit, cursor and seven other entities leave no free cell
        let config = LevelConfig::new_unchecked(1, (3, 3), 0, 7);
        let lot = RandomLotGenerator::new(5).generate(config).unwrap();

        let empty = lot.cells().iter().filter(|&&cell| cell == Cell::Empty).count();
        assert_eq!(lot.vehicle_count(), 7);
        assert_eq!(empty, 1);
        assert_eq!(lot.cell_at(lot.cursor()), Cell::Empty);
    }

    #[test]
    fn overfull_config_is_rejected() {
        let config = LevelConfig::new_unchecked(1, (3, 3), 4, 4);

        assert_eq!(
            RandomLotGenerator::new(0).generate(config),
            Err(GameError::LotFull)
        );
    }
}
