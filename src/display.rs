// Board projection: a pure function of position + selection + color assignment +
// last move. The presentation layer redraws all 64 squares from a `BoardView` on
// every state change; there is no incremental diffing.

use shakmaty::{Color, Piece, Role};

use crate::coord::{Col, Coord, Row, NUM_COLS, NUM_ROWS};
use crate::force::Force;
use crate::position::Position;


#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum BoardOrientation {
    Normal,  // White at the bottom
    Rotated, // Black at the bottom
}

impl BoardOrientation {
    // Own pieces always appear nearest the viewer. Before a color is assigned,
    // the board is shown from White's side.
    pub fn for_force(force: Option<Force>) -> Self {
        match force {
            Some(Force::Black) => BoardOrientation::Rotated,
            _ => BoardOrientation::Normal,
        }
    }
}

// Screen-space square coords: x grows to the right, y grows downwards,
// (0, 0) is the top-left square from the viewer's perspective.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct DisplayCoord {
    pub x: u8,
    pub y: u8,
}

pub fn to_display_coord(coord: Coord, orientation: BoardOrientation) -> DisplayCoord {
    match orientation {
        BoardOrientation::Normal => DisplayCoord {
            x: coord.col.to_zero_based(),
            y: NUM_ROWS - coord.row.to_zero_based() - 1,
        },
        BoardOrientation::Rotated => DisplayCoord {
            x: NUM_COLS - coord.col.to_zero_based() - 1,
            y: coord.row.to_zero_based(),
        },
    }
}

pub fn from_display_coord(q: DisplayCoord, orientation: BoardOrientation) -> Coord {
    match orientation {
        BoardOrientation::Normal => Coord::new(
            Row::from_zero_based(NUM_ROWS - q.y - 1),
            Col::from_zero_based(q.x),
        ),
        BoardOrientation::Rotated => Coord::new(
            Row::from_zero_based(q.y),
            Col::from_zero_based(NUM_COLS - q.x - 1),
        ),
    }
}


#[derive(Clone, Copy, Debug)]
pub struct SquareView {
    pub coord: Coord,
    pub piece: Option<Piece>,
    pub is_dark: bool,
    pub selected: bool,
    pub legal_target: bool,
    pub last_move: bool,
    pub check: bool,
}

pub struct BoardView {
    pub orientation: BoardOrientation,
    squares: [[SquareView; NUM_COLS as usize]; NUM_ROWS as usize], // [y][x], display order
}

impl BoardView {
    pub fn project(
        position: &Position, selection: Option<Coord>, my_force: Option<Force>,
        last_move: Option<(Coord, Coord)>,
    ) -> BoardView {
        let orientation = BoardOrientation::for_force(my_force);
        let legal_targets =
            selection.map_or_else(Vec::new, |from| position.legal_targets_from(from));
        let checked_king = if position.is_check() {
            position.king_position(position.side_to_move())
        } else {
            None
        };
        let squares = std::array::from_fn(|y| {
            std::array::from_fn(|x| {
                let coord =
                    from_display_coord(DisplayCoord { x: x as u8, y: y as u8 }, orientation);
                SquareView {
                    coord,
                    piece: position.piece_at(coord),
                    is_dark: coord.parity() == 0,
                    selected: selection == Some(coord),
                    legal_target: legal_targets.contains(&coord),
                    last_move: last_move
                        .is_some_and(|(from, to)| from == coord || to == coord),
                    check: checked_king == Some(coord),
                }
            })
        });
        BoardView { orientation, squares }
    }

    pub fn square(&self, q: DisplayCoord) -> &SquareView {
        &self.squares[q.y as usize][q.x as usize]
    }

    // Rows in display order, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[SquareView; NUM_COLS as usize]> {
        self.squares.iter()
    }

    // File label under display column `x`, mirrored with the orientation.
    pub fn col_label(&self, x: u8) -> char {
        from_display_coord(DisplayCoord { x, y: 0 }, self.orientation).col.to_algebraic()
    }

    // Rank label next to display row `y`, mirrored with the orientation.
    pub fn row_label(&self, y: u8) -> char {
        from_display_coord(DisplayCoord { x: 0, y }, self.orientation).row.to_algebraic()
    }
}


pub fn piece_to_pictogram(piece: Piece) -> char {
    use Role::*;
    match (piece.color, piece.role) {
        (Color::White, Pawn) => '♙',
        (Color::White, Knight) => '♘',
        (Color::White, Bishop) => '♗',
        (Color::White, Rook) => '♖',
        (Color::White, Queen) => '♕',
        (Color::White, King) => '♔',
        (Color::Black, Pawn) => '♟',
        (Color::Black, Knight) => '♞',
        (Color::Black, Bishop) => '♝',
        (Color::Black, Rook) => '♜',
        (Color::Black, Queen) => '♛',
        (Color::Black, King) => '♚',
    }
}
