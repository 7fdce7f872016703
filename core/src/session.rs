use rand::prelude::*;
use serde::{Deserialize, Serialize};

use crate::*;

/// Level range and seed for one play session.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    pub first_level: Level,
    /// Last level to play, unbounded up to [`MAX_LEVEL`] when `None`
    pub last_level: Option<Level>,
    pub seed: u64,
}

impl SessionConfig {
    pub fn new(seed: u64) -> Self {
        Self {
            first_level: 1,
            last_level: None,
            seed,
        }
    }

    pub fn final_level(&self) -> Level {
        self.last_level
            .unwrap_or(MAX_LEVEL)
            .clamp(self.first_level, MAX_LEVEL)
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Command {
    Move(Direction),
    Remove,
}

/// Answer to a prompt.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Reply<T> {
    Given(T),
    /// Input could not be understood, reported and prompted again
    Invalid(GameError),
    Quit,
}

/// Messages the session asks the console to show.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Notice {
    Selected(VehicleId),
    Removed(VehicleId),
    Exited(VehicleId),
    Rejected(GameError),
    HeadToExit,
    LevelCleared(Level),
    /// The answer to continuing was not understood, the session ends
    InvalidChoice,
    AllLevelsCleared(Level),
    Goodbye,
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum SessionEnd {
    Quit { level: Level },
    Completed { level: Level },
}

/// Input and output collaborator driven by [`Session::run`].
pub trait Console {
    /// Failure of the console itself; gameplay errors are never returned through it.
    type Error: From<GameError>;

    fn render(&mut self, view: &LotView) -> core::result::Result<(), Self::Error>;

    fn notify(&mut self, notice: Notice) -> core::result::Result<(), Self::Error>;

    /// Zero-based coordinates of the car to pick up.
    fn read_selection(&mut self) -> core::result::Result<Reply<Coord2>, Self::Error>;

    fn read_command(&mut self) -> core::result::Result<Reply<Command>, Self::Error>;

    /// Asked once a level is cleared and the player stands on the exit.
    fn confirm_advance(&mut self, cleared: Level) -> core::result::Result<Reply<()>, Self::Error>;
}

/// Level progression over a freshly generated lot per level.
#[derive(Clone, Debug)]
pub struct Session {
    config: SessionConfig,
    level: Level,
    rng: SmallRng,
    lot: ParkingLot,
}

impl Session {
    pub fn new(config: SessionConfig) -> Result<Self> {
        let mut rng = SmallRng::seed_from_u64(config.seed);
        let level = config.first_level;
        let lot = generate_lot(&mut rng, level)?;
        log::debug!("Session starting at level {} with seed {}", level, config.seed);
        Ok(Self {
            config,
            level,
            rng,
            lot,
        })
    }

    /// Starts on a prepared lot instead of a generated one; later levels are still drawn from
    /// the config seed.
    pub fn with_lot(config: SessionConfig, lot: ParkingLot) -> Self {
        log::debug!("Session starting on a prepared level {} lot", lot.level());
        Self {
            config,
            level: lot.level(),
            rng: SmallRng::seed_from_u64(config.seed),
            lot,
        }
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn lot(&self) -> &ParkingLot {
        &self.lot
    }

    pub fn view(&self) -> LotView {
        LotView::from_lot(&self.lot)
    }

    /// Plays until the player quits or the final level is cleared.
    pub fn run<C: Console>(&mut self, console: &mut C) -> core::result::Result<SessionEnd, C::Error> {
        loop {
            console.render(&self.view())?;

            let step = if self.lot.is_cleared() && self.lot.is_at_exit() {
                self.finish_level(console)?
            } else if self.lot.is_cleared() {
                console.notify(Notice::HeadToExit)?;
                self.walk_to_exit(console)?
            } else {
                self.select_and_drive(console)?
            };

            if let Some(end) = step {
                log::debug!("Session ended: {:?}", end);
                return Ok(end);
            }
        }
    }

    fn finish_level<C: Console>(
        &mut self,
        console: &mut C,
    ) -> core::result::Result<Option<SessionEnd>, C::Error> {
        if self.level >= self.config.final_level() {
            console.notify(Notice::AllLevelsCleared(self.level))?;
            return Ok(Some(SessionEnd::Completed { level: self.level }));
        }

        console.notify(Notice::LevelCleared(self.level))?;
        match console.confirm_advance(self.level)? {
            Reply::Given(()) => {
                self.advance()?;
                Ok(None)
            }
            Reply::Invalid(err) => {
                log::debug!("Unusable answer to continue: {}", err);
                console.notify(Notice::InvalidChoice)?;
                Ok(Some(SessionEnd::Quit { level: self.level }))
            }
            Reply::Quit => self.quit(console).map(Some),
        }
    }

    fn select_and_drive<C: Console>(
        &mut self,
        console: &mut C,
    ) -> core::result::Result<Option<SessionEnd>, C::Error> {
        let coords = match console.read_selection()? {
            Reply::Given(coords) => coords,
            Reply::Invalid(err) => {
                console.notify(Notice::Rejected(err))?;
                return Ok(None);
            }
            Reply::Quit => return self.quit(console).map(Some),
        };

        match self.lot.select_vehicle(coords) {
            Ok(id) => console.notify(Notice::Selected(id))?,
            Err(err) => {
                console.notify(Notice::Rejected(err))?;
                return Ok(None);
            }
        }

        console.render(&self.view())?;
        loop {
            let command = match console.read_command()? {
                Reply::Given(command) => command,
                Reply::Invalid(err) => {
                    console.notify(Notice::Rejected(err))?;
                    continue;
                }
                Reply::Quit => return self.quit(console).map(Some),
            };

            let updated = match command {
                Command::Remove => match self.lot.remove_vehicle() {
                    Ok(id) => {
                        console.notify(Notice::Removed(id))?;
                        return Ok(None);
                    }
                    Err(err) => {
                        console.notify(Notice::Rejected(err))?;
                        false
                    }
                },
                Command::Move(direction) => match self.lot.move_selected(direction) {
                    Ok(outcome) => {
                        if let MoveOutcome::Exited(id) = outcome {
                            console.notify(Notice::Exited(id))?;
                        }
                        outcome.has_update()
                    }
                    Err(err) => {
                        console.notify(Notice::Rejected(err))?;
                        false
                    }
                },
            };

            if self.lot.is_at_exit() {
                return Ok(None);
            }
            if updated {
                console.render(&self.view())?;
            }
        }
    }

    fn walk_to_exit<C: Console>(
        &mut self,
        console: &mut C,
    ) -> core::result::Result<Option<SessionEnd>, C::Error> {
        while !self.lot.is_at_exit() {
            let command = match console.read_command()? {
                Reply::Given(command) => command,
                Reply::Invalid(err) => {
                    console.notify(Notice::Rejected(err))?;
                    continue;
                }
                Reply::Quit => return self.quit(console).map(Some),
            };

            let updated = match command {
                Command::Move(direction) => {
                    self.lot.move_cursor(direction).map(MoveOutcome::has_update)
                }
                Command::Remove => self.lot.remove_vehicle().map(|_| true),
            };
            match updated {
                Ok(true) if !self.lot.is_at_exit() => console.render(&self.view())?,
                Ok(_) => {}
                Err(err) => console.notify(Notice::Rejected(err))?,
            }
        }
        Ok(None)
    }

    fn advance(&mut self) -> Result<()> {
        self.level += 1;
        self.lot = generate_lot(&mut self.rng, self.level)?;
        log::debug!("Advanced to level {}", self.level);
        Ok(())
    }

    fn quit<C: Console>(&self, console: &mut C) -> core::result::Result<SessionEnd, C::Error> {
        console.notify(Notice::Goodbye)?;
        Ok(SessionEnd::Quit { level: self.level })
    }
}

fn generate_lot(rng: &mut SmallRng, level: Level) -> Result<ParkingLot> {
    let config = LevelConfig::for_level(level)?;
    RandomLotGenerator::new(rng.next_u64()).generate(config)
}
