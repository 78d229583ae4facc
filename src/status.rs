use serde::{Deserialize, Serialize};
use strum::EnumIter;

use crate::position::Position;


// Presentational game status. `Waiting` and `Active` come from the server verbatim;
// the terminal variants are derived locally from the position; `Disconnected` and
// `Resigned` come from explicit signals. This is not authoritative game state.
#[derive(Clone, Copy, PartialEq, Eq, Debug, EnumIter, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameStatus {
    Waiting,
    Active,
    Checkmate,
    Draw,
    Stalemate,
    Disconnected,
    Resigned,
}

impl GameStatus {
    pub fn ui_label(self) -> &'static str {
        match self {
            GameStatus::Waiting => "Waiting for opponent",
            GameStatus::Active => "Game in progress",
            GameStatus::Checkmate => "Checkmate",
            GameStatus::Draw => "Draw",
            GameStatus::Stalemate => "Stalemate",
            GameStatus::Disconnected => "Opponent disconnected",
            GameStatus::Resigned => "Resigned",
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, GameStatus::Checkmate | GameStatus::Draw | GameStatus::Stalemate)
    }

    // Terminal status dictated by the rules engine, if any.
    pub fn from_position(position: &Position) -> Option<GameStatus> {
        if position.is_checkmate() {
            Some(GameStatus::Checkmate)
        } else if position.is_stalemate() {
            Some(GameStatus::Stalemate)
        } else if position.is_draw() {
            Some(GameStatus::Draw)
        } else {
            None
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_status_from_position() {
        assert_eq!(GameStatus::from_position(&Position::new()), None);
        let mate = Position::from_fen(
            "rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3",
        )
        .unwrap();
        assert_eq!(GameStatus::from_position(&mate), Some(GameStatus::Checkmate));
        let stalemate = Position::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").unwrap();
        assert_eq!(GameStatus::from_position(&stalemate), Some(GameStatus::Stalemate));
    }

    #[test]
    fn every_status_has_a_label() {
        use strum::IntoEnumIterator;
        for status in GameStatus::iter() {
            assert!(!status.ui_label().is_empty());
        }
    }

    #[test]
    fn wire_representation() {
        assert_eq!(serde_json::to_string(&GameStatus::Waiting).unwrap(), "\"waiting\"");
        assert_eq!(serde_json::from_str::<GameStatus>("\"active\"").unwrap(), GameStatus::Active);
    }
}
