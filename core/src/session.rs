use alloc::vec::Vec;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::*;

/// Player input accepted by [`Session::dispatch`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Input {
    Click(Coord2),
    ToggleFlag(Coord2),
    Press(Coord2),
    Release,
    Restart,
    ChangeDifficulty(Difficulty),
}

/// Rendering view of one cell. Content shows up only once revealed, so a
/// snapshot never leaks where the hidden mines are.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Face {
    Hidden { pressed: bool },
    Flagged,
    Open(u8),
    Mine,
}

/// Read-only view of a session for rendering.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub status: GameStatus,
    pub rows: Coord,
    pub cols: Coord,
    pub mines_left: i32,
    pub cells: Vec<(Coord2, Face)>,
}

impl Snapshot {
    pub fn face_at(&self, coords: Coord2) -> Option<Face> {
        self.cells
            .iter()
            .find(|&&(pos, _)| pos == coords)
            .map(|&(_, face)| face)
    }
}

/// One game session: the live board plus the configuration used to rebuild
/// it on restart or difficulty change.
#[derive(Clone, Debug)]
pub struct Session {
    config: BoardConfig,
    game: Game,
    rng: SmallRng,
}

impl Session {
    /// Starts a session over a random board seeded from OS entropy. Fails
    /// when a dimension is zero or the mines leave no safe cell.
    pub fn create(rows: Coord, cols: Coord, mines: CellCount) -> Result<Self> {
        let config = BoardConfig::new(rows, cols, mines)?;
        Ok(Self::start(config, SmallRng::from_os_rng()))
    }

    /// Same as [`Session::create`] with a caller-controlled seed, for
    /// reproducible boards.
    pub fn with_seed(rows: Coord, cols: Coord, mines: CellCount, seed: u64) -> Result<Self> {
        let config = BoardConfig::new(rows, cols, mines)?;
        Ok(Self::start(config, SmallRng::seed_from_u64(seed)))
    }

    /// Starts a session over a fixed mine placement.
    pub fn with_field(field: &MineField) -> Result<Self> {
        let (rows, cols) = field.size();
        let config = BoardConfig::new(rows, cols, field.mine_count())?;
        Ok(Self {
            config,
            game: Game::new(field),
            rng: SmallRng::from_os_rng(),
        })
    }

    fn start(config: BoardConfig, mut rng: SmallRng) -> Self {
        let game = deal(config, &mut rng);
        Self { config, game, rng }
    }

    pub fn config(&self) -> BoardConfig {
        self.config
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Applies one input and returns the refreshed view. Board inputs on a
    /// decided session are ignored; restart-level inputs always act.
    pub fn dispatch(&mut self, input: Input) -> Snapshot {
        match input {
            Input::Click(coords) => self.game.click(coords),
            Input::ToggleFlag(coords) => self.game.toggle_flag(coords),
            Input::Press(coords) => self.game.press(coords),
            Input::Release => self.game.release_all(),
            Input::Restart => self.restart(),
            Input::ChangeDifficulty(difficulty) => {
                self.config = difficulty.config();
                self.restart();
            }
        }
        self.snapshot()
    }

    /// Drops the whole cell set and deals a fresh board with the current
    /// configuration.
    pub fn restart(&mut self) {
        log::debug!(
            "restart: {}x{}, {} mines",
            self.config.rows,
            self.config.cols,
            self.config.mines
        );
        self.game = deal(self.config, &mut self.rng);
    }

    pub fn snapshot(&self) -> Snapshot {
        let (rows, cols) = self.game.size();
        let cells = self
            .game
            .cells()
            .map(|(coords, cell)| (coords, face_of(cell)))
            .collect();
        Snapshot {
            status: self.game.status(),
            rows,
            cols,
            mines_left: self.game.mines_left(),
            cells,
        }
    }
}

fn deal(config: BoardConfig, rng: &mut SmallRng) -> Game {
    let field = RandomFieldGenerator::new(rng.random()).generate(config);
    Game::new(&field)
}

const fn face_of(cell: &Cell) -> Face {
    match (cell.visibility(), cell.content()) {
        (Visibility::Hidden { pressed }, _) => Face::Hidden { pressed },
        (Visibility::Flagged, _) => Face::Flagged,
        (Visibility::Revealed, Content::Empty(count)) => Face::Open(count),
        (Visibility::Revealed, Content::Mine) => Face::Mine,
    }
}
