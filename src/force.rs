use serde::{Deserialize, Serialize};
use shakmaty::Color;
use strum::EnumIter;


// Player color. Serializes to the wire strings used by the server ("white" / "black").
#[derive(
    Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, EnumIter, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Force {
    White,
    Black,
}

impl Force {
    pub fn opponent(self) -> Force {
        match self {
            Force::White => Force::Black,
            Force::Black => Force::White,
        }
    }

    // Side-to-move letter, as it appears in a FEN string.
    pub fn fen_letter(self) -> char {
        match self {
            Force::White => 'w',
            Force::Black => 'b',
        }
    }

    pub fn to_color(self) -> Color {
        match self {
            Force::White => Color::White,
            Force::Black => Color::Black,
        }
    }
    pub fn from_color(color: Color) -> Self {
        match color {
            Color::White => Force::White,
            Color::Black => Force::Black,
        }
    }
}
