use serde::{Deserialize, Serialize};

/// What a cell holds, fixed when the board is generated.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellContent {
    Empty,
    Hazard,
    Potion,
    Wall,
    Exit,
}

impl CellContent {
    pub const fn is_hazard(self) -> bool {
        matches!(self, Self::Hazard)
    }

    pub const fn is_wall(self) -> bool {
        matches!(self, Self::Wall)
    }
}

impl Default for CellContent {
    fn default() -> Self {
        Self::Empty
    }
}

/// How much of a cell the player knows about.
///
/// A cell only moves forward through `Hidden -> Visible -> Revealed`. `Flagged` is a player mark
/// that can only be toggled on and off a `Hidden` cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellState {
    Hidden,
    /// Seen from a neighbouring revealed cell but never entered.
    Visible,
    Revealed,
    Flagged,
}

impl CellState {
    /// Whether the player can not see into the cell at all.
    pub const fn is_concealed(self) -> bool {
        matches!(self, Self::Hidden | Self::Flagged)
    }
}

impl Default for CellState {
    fn default() -> Self {
        Self::Hidden
    }
}

/// Which half of which two-cell exit opening an exit cell is.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExitLabel {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
    LeftTop,
    LeftBottom,
    RightTop,
    RightBottom,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub content: CellContent,
    pub state: CellState,
    pub adjacent_mines: u8,
    pub exit_label: Option<ExitLabel>,
}

impl Cell {
    pub const fn new(content: CellContent) -> Self {
        Self {
            content,
            state: CellState::Hidden,
            adjacent_mines: 0,
            exit_label: None,
        }
    }

    pub const fn exit(label: Option<ExitLabel>) -> Self {
        Self {
            content: CellContent::Exit,
            state: CellState::Hidden,
            adjacent_mines: 0,
            exit_label: label,
        }
    }

    /// Whether entering this cell keeps the flood fill going.
    pub const fn is_open_space(&self) -> bool {
        matches!(self.content, CellContent::Empty) && self.adjacent_mines == 0
    }
}
