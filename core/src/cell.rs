use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::types::Coord2;

/// What a cell holds, fixed once at board generation.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Content {
    Mine,
    /// Safe cell with its adjacent-mine count (0..=8).
    Empty(u8),
}

impl Content {
    pub const fn is_mine(self) -> bool {
        matches!(self, Self::Mine)
    }
}

/// Player-visible state of a cell.
///
/// Valid transitions:
/// - Hidden <-> Flagged (toggle)
/// - Hidden -> Revealed (terminal)
///
/// The `pressed` sub-state is transient visual feedback and carries no
/// game-logic consequence.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Visibility {
    Hidden { pressed: bool },
    Flagged,
    Revealed,
}

impl Visibility {
    pub const fn is_hidden(self) -> bool {
        matches!(self, Self::Hidden { .. })
    }
}

/// Input delivered to a single cell by the owning game.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum CellEvent {
    Press,
    Release,
    Click,
    Open,
    ToggleFlag,
}

/// Notification sent upward from a cell. Cells never address each other;
/// the owning game resolves every target by coordinate lookup.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum CellSignal {
    /// The cell left the hidden state, whether revealed or flagged.
    Uncovered(Coord2),
    /// A mine was revealed.
    Exploded(Coord2),
    /// A zero-count cell was revealed; its neighbors should open too.
    OpenNeighbors(Coord2),
    /// A revealed numbered cell was clicked; open its neighbors when
    /// exactly this many of them carry flags.
    OpenNeighborsIfFlagged(Coord2, u8),
    /// Press feedback for the neighbors of a revealed cell.
    PressNeighbors(Coord2),
    Flagged(Coord2),
    Unflagged(Coord2),
}

/// A transition emits at most two signals, so this never heap-allocates.
pub(crate) type Signals = SmallVec<[CellSignal; 2]>;

/// One board cell: immutable content plus mutable visibility.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    content: Content,
    visibility: Visibility,
}

impl Cell {
    pub(crate) const fn hidden(content: Content) -> Self {
        Self {
            content,
            visibility: Visibility::Hidden { pressed: false },
        }
    }

    pub const fn content(&self) -> Content {
        self.content
    }

    pub const fn visibility(&self) -> Visibility {
        self.visibility
    }

    /// Advances the cell state machine. Events with no transition in the
    /// current state are ignored. The leave-hidden notification always
    /// precedes the enter-state ones.
    pub(crate) fn apply(&mut self, coords: Coord2, event: CellEvent) -> Signals {
        use CellEvent::*;
        use Visibility::*;

        let mut signals = Signals::new();
        match (self.visibility, event) {
            (Hidden { .. }, Click | Open) => {
                self.visibility = Revealed;
                signals.push(CellSignal::Uncovered(coords));
                match self.content {
                    Content::Mine => signals.push(CellSignal::Exploded(coords)),
                    Content::Empty(0) => signals.push(CellSignal::OpenNeighbors(coords)),
                    Content::Empty(_) => {}
                }
            }
            (Hidden { .. }, ToggleFlag) => {
                self.visibility = Flagged;
                signals.push(CellSignal::Uncovered(coords));
                signals.push(CellSignal::Flagged(coords));
            }
            (Hidden { pressed: false }, Press) => {
                self.visibility = Hidden { pressed: true };
            }
            (Hidden { pressed: true }, Release) => {
                self.visibility = Hidden { pressed: false };
            }
            (Flagged, ToggleFlag) => {
                self.visibility = Hidden { pressed: false };
                signals.push(CellSignal::Unflagged(coords));
            }
            (Revealed, Click) => {
                if let Content::Empty(count) = self.content {
                    if count > 0 {
                        signals.push(CellSignal::OpenNeighborsIfFlagged(coords, count));
                    }
                }
            }
            (Revealed, Press) => {
                signals.push(CellSignal::PressNeighbors(coords));
            }
            _ => {}
        }
        signals
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const AT: Coord2 = (1, 2);

    #[test]
    fn press_and_release_toggle_the_pressed_substate() {
        let mut cell = Cell::hidden(Content::Empty(3));
        assert!(cell.apply(AT, CellEvent::Press).is_empty());
        assert_eq!(cell.visibility(), Visibility::Hidden { pressed: true });
        assert!(cell.apply(AT, CellEvent::Release).is_empty());
        assert_eq!(cell.visibility(), Visibility::Hidden { pressed: false });
    }

    #[test]
    fn release_without_press_is_ignored() {
        let mut cell = Cell::hidden(Content::Empty(1));
        assert!(cell.apply(AT, CellEvent::Release).is_empty());
        assert_eq!(cell.visibility(), Visibility::Hidden { pressed: false });
    }

    #[test]
    fn opening_a_numbered_cell_only_uncovers() {
        let mut cell = Cell::hidden(Content::Empty(2));
        let signals = cell.apply(AT, CellEvent::Open);
        assert_eq!(signals.as_slice(), &[CellSignal::Uncovered(AT)]);
        assert_eq!(cell.visibility(), Visibility::Revealed);
    }

    #[test]
    fn opening_a_mine_explodes_after_uncovering() {
        let mut cell = Cell::hidden(Content::Mine);
        let signals = cell.apply(AT, CellEvent::Click);
        assert_eq!(
            signals.as_slice(),
            &[CellSignal::Uncovered(AT), CellSignal::Exploded(AT)]
        );
    }

    #[test]
    fn opening_a_zero_cell_requests_neighbor_opens() {
        let mut cell = Cell::hidden(Content::Empty(0));
        let signals = cell.apply(AT, CellEvent::Open);
        assert_eq!(
            signals.as_slice(),
            &[CellSignal::Uncovered(AT), CellSignal::OpenNeighbors(AT)]
        );
    }

    #[test]
    fn flag_toggle_cycles_and_reports() {
        let mut cell = Cell::hidden(Content::Mine);
        let signals = cell.apply(AT, CellEvent::ToggleFlag);
        assert_eq!(
            signals.as_slice(),
            &[CellSignal::Uncovered(AT), CellSignal::Flagged(AT)]
        );
        assert_eq!(cell.visibility(), Visibility::Flagged);

        let signals = cell.apply(AT, CellEvent::ToggleFlag);
        assert_eq!(signals.as_slice(), &[CellSignal::Unflagged(AT)]);
        assert_eq!(cell.visibility(), Visibility::Hidden { pressed: false });
    }

    #[test]
    fn flagged_cell_ignores_open_and_click() {
        let mut cell = Cell::hidden(Content::Mine);
        cell.apply(AT, CellEvent::ToggleFlag);
        assert!(cell.apply(AT, CellEvent::Open).is_empty());
        assert!(cell.apply(AT, CellEvent::Click).is_empty());
        assert_eq!(cell.visibility(), Visibility::Flagged);
    }

    #[test]
    fn revealed_is_terminal() {
        let mut cell = Cell::hidden(Content::Empty(1));
        cell.apply(AT, CellEvent::Open);
        assert!(cell.apply(AT, CellEvent::Open).is_empty());
        assert!(cell.apply(AT, CellEvent::ToggleFlag).is_empty());
        assert_eq!(cell.visibility(), Visibility::Revealed);
    }

    #[test]
    fn clicking_a_revealed_number_requests_a_chord() {
        let mut cell = Cell::hidden(Content::Empty(2));
        cell.apply(AT, CellEvent::Open);
        let signals = cell.apply(AT, CellEvent::Click);
        assert_eq!(
            signals.as_slice(),
            &[CellSignal::OpenNeighborsIfFlagged(AT, 2)]
        );
    }

    #[test]
    fn clicking_a_revealed_zero_does_nothing() {
        let mut cell = Cell::hidden(Content::Empty(0));
        cell.apply(AT, CellEvent::Open);
        assert!(cell.apply(AT, CellEvent::Click).is_empty());
    }

    #[test]
    fn pressing_a_revealed_cell_forwards_to_neighbors() {
        let mut cell = Cell::hidden(Content::Empty(1));
        cell.apply(AT, CellEvent::Open);
        let signals = cell.apply(AT, CellEvent::Press);
        assert_eq!(signals.as_slice(), &[CellSignal::PressNeighbors(AT)]);
    }
}
