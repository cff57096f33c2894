use cavern_core::*;

fn cell_symbol(cell: &Cell) -> char {
    match cell.state {
        CellState::Hidden => '?',
        CellState::Flagged => 'F',
        // peeked cells only give away their outline
        CellState::Visible => match cell.content {
            CellContent::Wall => '#',
            CellContent::Exit => 'E',
            _ => ',',
        },
        CellState::Revealed => match cell.content {
            CellContent::Wall => '#',
            CellContent::Exit => 'E',
            CellContent::Hazard => '*',
            CellContent::Potion => 'p',
            CellContent::Empty if cell.adjacent_mines == 0 => '.',
            CellContent::Empty => char::from(b'0' + cell.adjacent_mines),
        },
    }
}

/// Draws the board one text row per grid row, with the player as `@`.
pub fn render_board(board: &Board) -> String {
    let (width, height) = board.size();
    let mut out = String::with_capacity((usize::from(width) + 1) * usize::from(height));
    for y in 0..height {
        for x in 0..width {
            let symbol = if (x, y) == board.player() {
                '@'
            } else {
                cell_symbol(&board.grid()[(x, y)])
            };
            out.push(symbol);
        }
        out.push('\n');
    }
    out
}

pub fn render_status(board: &Board) -> String {
    let state = match board.state() {
        BoardState::Ready => "ready",
        BoardState::Active => "exploring",
        BoardState::Won => "escaped",
        BoardState::Lost => "lost",
    };
    format!(
        "{}x{} | {} | player {:?} | mines left {}",
        board.width(),
        board.height(),
        state,
        board.player(),
        board.mines_left()
    )
}
