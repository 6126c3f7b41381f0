use alloc::collections::VecDeque;
use hashbrown::HashSet;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Session outcome.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    Playing,
    Won,
    Lost,
}

impl GameStatus {
    pub const fn is_over(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// One live board: the owning side of every cell state machine.
///
/// Cells communicate only upward; each transition hands back signals that
/// are routed here through an explicit FIFO worklist, so arbitrarily large
/// reveal cascades run without recursion and one input drains completely
/// before the next is accepted.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Game {
    cells: Array2<Cell>,
    mines: HashSet<Coord2>,
    mine_count: CellCount,
    flag_count: CellCount,
    status: GameStatus,
}

impl Game {
    pub fn new(field: &MineField) -> Self {
        let cells = Array2::from_shape_fn(idx(field.size()), |(row, col)| {
            let coords = (row as Coord, col as Coord);
            let content = if field.contains_mine(coords) {
                Content::Mine
            } else {
                Content::Empty(field.adjacent_mines(coords))
            };
            Cell::hidden(content)
        });

        Self {
            cells,
            mines: field.mine_coords().collect(),
            mine_count: field.mine_count(),
            flag_count: 0,
            status: GameStatus::Playing,
        }
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn size(&self) -> Coord2 {
        let dim = self.cells.dim();
        (dim.0 as Coord, dim.1 as Coord)
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    /// How many mines remain unflagged; negative with surplus flags.
    pub fn mines_left(&self) -> i32 {
        i32::from(self.mine_count) - i32::from(self.flag_count)
    }

    pub fn cell_at(&self, coords: Coord2) -> Option<&Cell> {
        self.cells.get(idx(coords))
    }

    pub fn cells(&self) -> impl Iterator<Item = (Coord2, &Cell)> {
        self.cells
            .indexed_iter()
            .map(|((row, col), cell)| ((row as Coord, col as Coord), cell))
    }

    /// Primary click: opens a hidden cell, chords a revealed numbered one.
    pub fn click(&mut self, coords: Coord2) {
        self.deliver(coords, CellEvent::Click);
    }

    pub fn toggle_flag(&mut self, coords: Coord2) {
        self.deliver(coords, CellEvent::ToggleFlag);
    }

    /// Press feedback on one cell; pressing a revealed cell presses its
    /// neighbors instead.
    pub fn press(&mut self, coords: Coord2) {
        self.deliver(coords, CellEvent::Press);
    }

    /// Release is a board-wide broadcast: every pressed cell pops back up,
    /// wherever the pointer ended.
    pub fn release_all(&mut self) {
        if self.status.is_over() {
            return;
        }
        let queue: VecDeque<_> = self
            .coords_iter()
            .map(|coords| (coords, CellEvent::Release))
            .collect();
        self.pump(queue);
    }

    fn deliver(&mut self, coords: Coord2, event: CellEvent) {
        if self.status.is_over() {
            log::trace!("{:?} at {:?} ignored, game over", event, coords);
            return;
        }
        self.pump(VecDeque::from([(coords, event)]));
    }

    /// Drains the worklist one cell event at a time. Signals emitted by a
    /// transition are routed back into the queue, which turns re-entrant
    /// cascades into a breadth-first sweep over the grid.
    fn pump(&mut self, mut queue: VecDeque<(Coord2, CellEvent)>) {
        while let Some((coords, event)) = queue.pop_front() {
            let Some(cell) = self.cells.get_mut(idx(coords)) else {
                // stale or out-of-bounds target, dropped silently
                continue;
            };
            let signals = cell.apply(coords, event);
            for signal in signals {
                self.route(signal, &mut queue);
            }
        }
    }

    fn route(&mut self, signal: CellSignal, queue: &mut VecDeque<(Coord2, CellEvent)>) {
        use CellSignal::*;

        if self.status.is_over() {
            // A decided game routes nothing further; events already queued
            // still drain so a lost board finishes revealing itself.
            return;
        }

        match signal {
            Exploded(coords) => {
                log::debug!("mine hit at {:?}", coords);
                queue.extend(self.coords_iter().map(|pos| (pos, CellEvent::Open)));
                self.status = GameStatus::Lost;
            }
            OpenNeighbors(coords) => {
                queue.extend(self.neighbors_of(coords).map(|pos| (pos, CellEvent::Open)));
            }
            OpenNeighborsIfFlagged(coords, required) => {
                if self.count_flagged_neighbors(coords) == required {
                    queue.extend(self.neighbors_of(coords).map(|pos| (pos, CellEvent::Open)));
                }
            }
            PressNeighbors(coords) => {
                queue.extend(self.neighbors_of(coords).map(|pos| (pos, CellEvent::Press)));
            }
            Uncovered(_) => self.refresh_outcome(),
            Flagged(_) => self.flag_count += 1,
            Unflagged(_) => self.flag_count -= 1,
        }
    }

    /// A session is decided once no cell is hidden: it is a win when every
    /// mine carries a flag. Surplus flags on safe cells do not disqualify.
    fn refresh_outcome(&mut self) {
        let finished = self.cells.iter().all(|cell| !cell.visibility().is_hidden());
        if !finished {
            return;
        }
        let all_mines_flagged = self
            .mines
            .iter()
            .all(|&coords| self.cells[idx(coords)].visibility() == Visibility::Flagged);
        if all_mines_flagged {
            log::debug!("all mines flagged, board solved");
            self.status = GameStatus::Won;
        }
    }

    fn count_flagged_neighbors(&self, coords: Coord2) -> u8 {
        self.neighbors_of(coords)
            .filter(|&pos| self.cells[idx(pos)].visibility() == Visibility::Flagged)
            .count() as u8
    }

    fn neighbors_of(&self, coords: Coord2) -> Neighbors {
        neighbors(coords, self.size())
    }

    fn coords_iter(&self) -> impl Iterator<Item = Coord2> + use<> {
        let (rows, cols) = self.size();
        (0..rows).flat_map(move |row| (0..cols).map(move |col| (row, col)))
    }
}
