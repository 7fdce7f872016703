use alloc::collections::{BTreeMap, VecDeque};
use alloc::vec::Vec;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// One level's parking lot: cells, parked cars, obstacles and the player cursor.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ParkingLot {
    level: Level,
    cells: Array2<Cell>,
    vehicles: BTreeMap<VehicleId, Vehicle>,
    obstacles: Vec<Coord2>,
    cursor: Coord2,
    selected: Option<VehicleId>,
}

impl ParkingLot {
    /// Lot with only the exit marked; callers must ensure `size` is at least 1x1.
    pub(crate) fn empty(level: Level, size: Coord2) -> Self {
        let mut cells = Array2::default(size.to_nd_index());
        cells[EXIT.to_nd_index()] = Cell::Exit;
        Self {
            level,
            cells,
            vehicles: BTreeMap::new(),
            obstacles: Vec::new(),
            cursor: EXIT,
            selected: None,
        }
    }

    /// Builds a lot from explicit coordinates, cars are numbered in the given order.
    pub fn from_layout(
        level: Level,
        size: Coord2,
        obstacles: &[Coord2],
        vehicles: &[Coord2],
        cursor: Coord2,
    ) -> Result<Self> {
        if size.0 == 0 || size.1 == 0 {
            return Err(GameError::InvalidLayout);
        }
        let mut lot = Self::empty(level, size);

        for &coords in obstacles {
            let coords = lot.validate_coords(coords)?;
            lot.check_free(coords)?;
            lot.place_obstacle(coords);
        }

        for (number, &coords) in (1..).zip(vehicles) {
            let coords = lot.validate_coords(coords)?;
            lot.check_free(coords)?;
            lot.park_vehicle(VehicleId(number), coords);
        }

        let cursor = lot.validate_coords(cursor)?;
        lot.check_free(cursor)?;
        lot.place_cursor(cursor);

        Ok(lot)
    }

    pub(crate) fn place_obstacle(&mut self, coords: Coord2) {
        self.set_cell(coords, Cell::Obstacle);
        self.obstacles.push(coords);
    }

    pub(crate) fn park_vehicle(&mut self, id: VehicleId, position: Coord2) {
        self.set_cell(position, Cell::Occupied(id));
        self.vehicles.insert(id, Vehicle { id, position });
    }

    pub(crate) fn place_cursor(&mut self, coords: Coord2) {
        self.cursor = coords;
    }

    fn check_free(&self, coords: Coord2) -> Result<()> {
        if self.cell_at(coords) == Cell::Empty {
            Ok(())
        } else {
            Err(GameError::InvalidLayout)
        }
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let size = self.size();
        if coords.0 < size.0 && coords.1 < size.1 {
            Ok(coords)
        } else {
            Err(GameError::InvalidPosition)
        }
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn size(&self) -> Coord2 {
        let (rows, cols) = self.cells.dim();
        (
            rows.try_into().unwrap_or(Coord::MAX),
            cols.try_into().unwrap_or(Coord::MAX),
        )
    }

    pub fn cell_at(&self, coords: Coord2) -> Cell {
        self.cells[coords.to_nd_index()]
    }

    pub(crate) fn cells(&self) -> &Array2<Cell> {
        &self.cells
    }

    fn set_cell(&mut self, coords: Coord2, cell: Cell) {
        self.cells[coords.to_nd_index()] = cell;
    }

    pub fn cursor(&self) -> Coord2 {
        self.cursor
    }

    pub fn selected(&self) -> Option<VehicleId> {
        self.selected
    }

    pub fn vehicle(&self, id: VehicleId) -> Option<Vehicle> {
        self.vehicles.get(&id).copied()
    }

    pub fn vehicles(&self) -> impl Iterator<Item = Vehicle> + '_ {
        self.vehicles.values().copied()
    }

    pub fn vehicle_count(&self) -> CellCount {
        self.vehicles.len().try_into().unwrap_or(CellCount::MAX)
    }

    pub fn obstacles(&self) -> &[Coord2] {
        &self.obstacles
    }

    pub fn is_cleared(&self) -> bool {
        self.vehicles.is_empty()
    }

    pub fn is_at_exit(&self) -> bool {
        self.cursor == EXIT
    }

    /// Moves the bare cursor one step, putting down any selected car.
    ///
    /// Stepping off the lot is absorbed as [`MoveOutcome::NoChange`], only obstacles and
    /// parked cars report [`GameError::BlockedMove`].
    pub fn move_cursor(&mut self, direction: Direction) -> Result<MoveOutcome> {
        let Some(target) = direction.step(self.cursor, self.size()) else {
            log::trace!("Cursor at {:?} clamped moving {}", self.cursor, direction);
            return Ok(MoveOutcome::NoChange);
        };

        if !self.cell_at(target).is_passable() {
            log::debug!("Cursor blocked at {:?} by {:?}", target, self.cell_at(target));
            return Err(GameError::BlockedMove);
        }

        if let Some(id) = self.selected.take() {
            log::debug!("Put down {} at {:?}", id, self.cursor);
        }
        self.cursor = target;
        Ok(MoveOutcome::Moved)
    }

    /// Picks up the car at `coords`, the cursor jumps onto it.
    pub fn select_vehicle(&mut self, coords: Coord2) -> Result<VehicleId> {
        let coords = self.validate_coords(coords)?;
        let id = self
            .cell_at(coords)
            .vehicle()
            .ok_or(GameError::EmptyOrInvalidTarget)?;

        self.selected = Some(id);
        self.cursor = coords;
        log::debug!("Selected {} at {:?}", id, coords);
        Ok(id)
    }

    /// Drives the selected car one step, the cursor travels with it.
    ///
    /// A car driven onto the exit leaves the lot: it is dropped from the registry and the
    /// exit cell keeps its marking.
    pub fn move_selected(&mut self, direction: Direction) -> Result<MoveOutcome> {
        let id = self.selected.ok_or(GameError::NoSelection)?;
        let from = self
            .vehicles
            .get(&id)
            .map(|vehicle| vehicle.position)
            .ok_or(GameError::NoSelection)?;

        let Some(target) = direction.step(from, self.size()) else {
            log::trace!("{} at {:?} clamped moving {}", id, from, direction);
            return Ok(MoveOutcome::NoChange);
        };

        match self.cell_at(target) {
            Cell::Empty => {
                self.set_cell(from, Cell::Empty);
                self.set_cell(target, Cell::Occupied(id));
                if let Some(vehicle) = self.vehicles.get_mut(&id) {
                    vehicle.position = target;
                }
                self.cursor = target;
                log::trace!("Moved {} from {:?} to {:?}", id, from, target);
                Ok(MoveOutcome::Moved)
            }
            Cell::Exit => {
                self.set_cell(from, Cell::Empty);
                self.vehicles.remove(&id);
                self.selected = None;
                self.cursor = target;
                log::debug!("{} left the lot, {} left", id, self.vehicles.len());
                Ok(MoveOutcome::Exited(id))
            }
            Cell::Obstacle | Cell::Occupied(_) => Err(GameError::BlockedMove),
        }
    }

    /// Removes the car under the cursor.
    pub fn remove_vehicle(&mut self) -> Result<VehicleId> {
        let coords = self.cursor;
        let id = self
            .cell_at(coords)
            .vehicle()
            .ok_or(GameError::NoVehicleHere)?;

        self.set_cell(coords, Cell::Empty);
        self.vehicles.remove(&id);
        if self.selected == Some(id) {
            self.selected = None;
        }
        log::debug!("Removed {} at {:?}, {} left", id, coords, self.vehicles.len());
        Ok(id)
    }

    /// Whether every cell that is not an obstacle connects orthogonally to the exit.
    pub fn is_exit_reachable(&self) -> bool {
        let mut visited: Array2<bool> = Array2::default(self.cells.dim());
        visited[EXIT.to_nd_index()] = true;
        let mut to_visit = VecDeque::from([EXIT]);
        let mut reached: usize = 1;

        while let Some(coords) = to_visit.pop_front() {
            for pos in self.cells.iter_neighbors(coords) {
                if visited[pos.to_nd_index()] || self.cell_at(pos) == Cell::Obstacle {
                    continue;
                }
                visited[pos.to_nd_index()] = true;
                reached += 1;
                to_visit.push_back(pos);
            }
        }

        reached + self.obstacles.len() == self.cells.len()
    }
}
