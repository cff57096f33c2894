use alloc::collections::VecDeque;

use crate::*;

impl Board {
    /// Enters the cell at `coords`.
    ///
    /// Out-of-bounds coordinates, flagged cells, already revealed cells and any call after the
    /// level ended change nothing. Entering a hazard loses the level, entering an exit completes
    /// it. Safe cells start a flood fill through empty cells with no adjacent hazards; every
    /// revealed cell that stops the fill makes its hidden neighbours visible.
    pub fn reveal(&mut self, coords: Coord2) -> RevealOutcome {
        use CellState::{Flagged, Hidden, Visible};
        use RevealOutcome::*;

        if self.state.is_finished() {
            return NoChange;
        }

        let Some(&cell) = self.grid.get(coords) else {
            return NoChange;
        };

        match (cell.state, cell.content) {
            (Flagged, _) => NoChange,
            // exits stay enterable once seen, shop exits start revealed
            (CellState::Revealed, CellContent::Exit) => {
                self.end_game(true);
                ReachedExit
            }
            (CellState::Revealed, _) => NoChange,
            (Hidden | Visible, CellContent::Hazard) => {
                self.flood_reveal(coords);
                self.triggered_hazard = Some(coords);
                self.end_game(false);
                HitHazard
            }
            (Hidden | Visible, CellContent::Exit) => {
                self.flood_reveal(coords);
                self.end_game(true);
                ReachedExit
            }
            (Hidden | Visible, _) => {
                let revealed = self.flood_reveal(coords);
                log::trace!("Revealed {} cells from {:?}", revealed, coords);
                self.mark_started();
                Revealed
            }
        }
    }

    /// Reveals the start cell, the first move of every level.
    pub fn reveal_start(&mut self) -> RevealOutcome {
        self.reveal(self.start)
    }

    /// Promotes a hidden cell to visible. Anything else is left alone.
    pub fn set_visible(&mut self, coords: Coord2) -> bool {
        match self.grid.get_mut(coords) {
            Some(cell) if cell.state == CellState::Hidden => {
                cell.state = CellState::Visible;
                true
            }
            _ => false,
        }
    }

    /// Reveals every cell at once, flags included, without any cascading.
    pub fn reveal_all(&mut self) {
        for cell in self.grid.cells_mut() {
            cell.state = CellState::Revealed;
        }
    }

    /// Flags a hidden cell or removes the flag from a flagged one.
    pub fn toggle_flag(&mut self, coords: Coord2) -> MarkOutcome {
        use CellState::*;
        use MarkOutcome::*;

        if self.state.is_finished() {
            return NoChange;
        }

        let Some(cell) = self.grid.get_mut(coords) else {
            return NoChange;
        };

        match cell.state {
            Hidden => {
                cell.state = Flagged;
                Changed
            }
            Flagged => {
                cell.state = Hidden;
                Changed
            }
            Visible | Revealed => NoChange,
        }
    }

    pub fn flag_count(&self) -> CellCount {
        self.grid.count_state(CellState::Flagged)
    }

    /// Hazards not yet accounted for by a flag, can go negative with wrong flags.
    pub fn mines_left(&self) -> isize {
        (self.mine_count as isize) - (self.flag_count() as isize)
    }

    /// Reveals `origin` and cascades, returning how many cells were revealed.
    fn flood_reveal(&mut self, origin: Coord2) -> usize {
        let mut revealed = 0;
        let mut to_visit = VecDeque::from([origin]);

        while let Some(visit_coords) = to_visit.pop_front() {
            let cell = &mut self.grid[visit_coords];
            if matches!(cell.state, CellState::Revealed | CellState::Flagged) {
                continue;
            }
            cell.state = CellState::Revealed;
            revealed += 1;

            if cell.is_open_space() {
                to_visit.extend(self.grid.iter_neighbors(visit_coords).filter(|&pos| {
                    matches!(self.grid[pos].state, CellState::Hidden | CellState::Visible)
                }));
            } else {
                for pos in self.grid.iter_neighbors(visit_coords) {
                    self.set_visible(pos);
                }
            }
        }

        revealed
    }

    fn mark_started(&mut self) {
        if matches!(self.state, BoardState::Ready) {
            self.state = BoardState::Active;
        }
    }

    fn end_game(&mut self, won: bool) {
        if self.state.is_finished() {
            return;
        }

        self.state = if won {
            BoardState::Won
        } else {
            BoardState::Lost
        };
        if won {
            self.triggered_hazard = None;
        }
        log::debug!("Level ended, won: {}", won);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// `#` wall, `*` hazard, `E` exit, `P` potion, anything else empty.
    fn layout(rows: &[&str], start: Coord2) -> Board {
        let size = (rows[0].len() as Coord, rows.len() as Coord);
        let mut grid = Grid::new(size);
        for (y, row) in rows.iter().enumerate() {
            for (x, symbol) in row.bytes().enumerate() {
                grid[(x as Coord, y as Coord)].content = match symbol {
                    b'#' => CellContent::Wall,
                    b'*' => CellContent::Hazard,
                    b'E' => CellContent::Exit,
                    b'P' => CellContent::Potion,
                    _ => CellContent::Empty,
                };
            }
        }
        Board::from_layout(grid, start).unwrap()
    }

    fn state(board: &Board, coords: Coord2) -> CellState {
        board.cell_at(coords).unwrap().state
    }

    #[test]
    fn reveal_out_of_bounds_is_noop() {
        let mut board = layout(&["#####", "#...#", "#...#", "#...#", "#####"], (2, 2));
        let before = board.clone();

        assert_eq!(board.reveal((5, 1)), RevealOutcome::NoChange);
        assert_eq!(board.reveal((1, 200)), RevealOutcome::NoChange);
        assert_eq!(board, before);
    }

    #[test]
    fn flood_fill_stops_at_numbers_and_peeks_past_them() {
        let mut board = layout(
            &[
                "#######", //
                "#.....#", //
                "#.....#", //
                "#...*.#", //
                "#.....#", //
                "#######",
            ],
            (1, 1),
        );

        assert_eq!(board.reveal((1, 1)), RevealOutcome::Revealed);

        // zero region and its numbered border are revealed
        assert_eq!(state(&board, (1, 4)), CellState::Revealed);
        assert_eq!(state(&board, (5, 1)), CellState::Revealed);
        assert_eq!(state(&board, (3, 2)), CellState::Revealed);
        assert_eq!(state(&board, (3, 4)), CellState::Revealed);
        // cells past the numbered border are only peeked at
        assert_eq!(state(&board, (4, 3)), CellState::Visible);
        assert_eq!(state(&board, (4, 4)), CellState::Visible);
        // and nothing beyond that
        assert_eq!(state(&board, (5, 4)), CellState::Hidden);
        // walls touching the zero region are revealed too
        assert_eq!(state(&board, (0, 0)), CellState::Revealed);
        assert_eq!(state(&board, (6, 5)), CellState::Hidden);
        assert_eq!(board.state(), BoardState::Active);
    }

    #[test]
    fn numbered_cell_does_not_cascade() {
        let mut board = layout(
            &[
                "#######", //
                "#.....#", //
                "#.*...#", //
                "#.....#", //
                "#.....#", //
                "#######",
            ],
            (3, 3),
        );

        assert_eq!(board.reveal((3, 3)), RevealOutcome::Revealed);

        assert_eq!(state(&board, (3, 3)), CellState::Revealed);
        assert_eq!(state(&board, (4, 4)), CellState::Visible);
        assert_eq!(state(&board, (2, 2)), CellState::Visible);
        assert_eq!(state(&board, (5, 1)), CellState::Hidden);
        assert_eq!(board.grid().count_state(CellState::Revealed), 1);
    }

    #[test]
    fn visible_zero_cell_keeps_cascading() {
        let mut board = layout(
            &[
                "######", //
                "#....#", //
                "#*...#", //
                "#....#", //
                "######",
            ],
            (2, 2),
        );

        board.reveal((2, 2));
        assert_eq!(state(&board, (3, 2)), CellState::Visible);

        board.reveal((3, 2));
        assert_eq!(state(&board, (4, 1)), CellState::Revealed);
        assert_eq!(state(&board, (4, 3)), CellState::Revealed);
        assert_eq!(state(&board, (1, 2)), CellState::Visible);
    }

    #[test]
    fn reveal_is_idempotent() {
        let mut once = layout(&["######", "#....#", "#*...#", "#....#", "######"], (4, 2));
        let mut twice = once.clone();

        once.reveal((4, 2));
        twice.reveal((4, 2));
        assert_eq!(twice.reveal((4, 2)), RevealOutcome::NoChange);

        assert_eq!(once, twice);
    }

    #[test]
    fn hazard_ends_the_level_and_freezes_the_board() {
        let mut board = layout(&["#####", "#.*.#", "#...#", "#...#", "#####"], (2, 3));

        assert_eq!(board.reveal((2, 1)), RevealOutcome::HitHazard);
        assert!(board.is_game_over());
        assert_eq!(board.state(), BoardState::Lost);
        assert_eq!(board.triggered_hazard(), Some((2, 1)));

        let frozen = board.clone();
        assert_eq!(board.reveal((2, 3)), RevealOutcome::NoChange);
        assert_eq!(board.toggle_flag((1, 3)), MarkOutcome::NoChange);
        assert!(board.move_player((1, 1)).is_empty());
        assert_eq!(board, frozen);
    }

    #[test]
    fn exit_completes_the_level() {
        let mut board = layout(&["##EE#", "#...#", "#...#", "#...#", "#####"], (2, 3));

        board.reveal((2, 3));
        assert_eq!(state(&board, (2, 0)), CellState::Revealed);
        assert_eq!(board.state(), BoardState::Active);

        assert_eq!(board.reveal((2, 0)), RevealOutcome::ReachedExit);
        assert_eq!(board.state(), BoardState::Won);
        assert_eq!(board.reveal((3, 0)), RevealOutcome::NoChange);
    }

    #[test]
    fn flags_only_toggle_on_hidden_cells() {
        let mut board = layout(&["#####", "#..*#", "#...#", "#...#", "#####"], (1, 3));

        board.reveal((2, 2));
        assert_eq!(state(&board, (3, 1)), CellState::Visible);

        assert_eq!(board.toggle_flag((2, 2)), MarkOutcome::NoChange);
        assert_eq!(board.toggle_flag((3, 1)), MarkOutcome::NoChange);
        assert_eq!(board.toggle_flag((9, 9)), MarkOutcome::NoChange);

        let mut fresh = layout(&["#####", "#..*#", "#...#", "#...#", "#####"], (1, 3));
        assert_eq!(fresh.toggle_flag((3, 1)), MarkOutcome::Changed);
        assert_eq!(fresh.mines_left(), 0);
        assert_eq!(fresh.reveal((3, 1)), RevealOutcome::NoChange);
        assert_eq!(fresh.toggle_flag((3, 1)), MarkOutcome::Changed);
        assert_eq!(state(&fresh, (3, 1)), CellState::Hidden);
    }

    #[test]
    fn flood_fill_skips_flagged_cells() {
        let mut board = layout(&["#######", "#.....#", "#.....#", "#.....#", "#######"], (1, 1));

        board.toggle_flag((3, 2));
        board.reveal((1, 1));

        assert_eq!(state(&board, (3, 2)), CellState::Flagged);
        assert_eq!(state(&board, (5, 3)), CellState::Revealed);
    }

    #[test]
    fn set_visible_only_promotes_hidden() {
        let mut board = layout(&["#####", "#...#", "#...#", "#...#", "#####"], (2, 2));

        assert!(board.set_visible((1, 1)));
        assert!(!board.set_visible((1, 1)));
        board.toggle_flag((3, 3));
        assert!(!board.set_visible((3, 3)));
        assert!(!board.set_visible((7, 7)));
        assert_eq!(state(&board, (3, 3)), CellState::Flagged);
    }

    #[test]
    fn walking_toward_hidden_cells_stops_at_the_nearest_known_cell() {
        let mut board = layout(
            &[
                "######", //
                "#....#", //
                "#....#", //
                "#*...#", //
                "######",
            ],
            (1, 2),
        );
        board.reveal_start();
        assert_eq!(state(&board, (4, 1)), CellState::Hidden);

        let path = board.move_player((4, 1));
        assert_eq!(path.len(), 3);
        assert_eq!(path.first(), Some(&(1, 2)));
        assert_eq!(path.last(), Some(&(2, 1)));
        assert_eq!(board.player(), (2, 1));

        assert_eq!(board.reveal(board.player()), RevealOutcome::Revealed);
        assert_eq!(state(&board, (4, 1)), CellState::Revealed);

        let path = board.move_player((4, 1));
        assert_eq!(path, alloc::vec![(2, 1), (3, 1), (4, 1)]);
        assert_eq!(board.player(), (4, 1));
    }

    #[test]
    fn reveal_all_uncovers_everything_without_ending() {
        let mut board = layout(&["#####", "#.*.#", "#...#", "#P..#", "#####"], (2, 3));
        board.toggle_flag((2, 1));

        board.reveal_all();

        assert_eq!(board.grid().count_state(CellState::Revealed), 25);
        assert_eq!(board.state(), BoardState::Ready);
    }
}
