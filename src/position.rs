// Thin seam over the external rules engine. All chess legality, notation and
// game-termination detection is delegated to `shakmaty`; the rest of the crate
// only ever sees `Coord`s, SAN strings and FEN strings.

use shakmaty::fen::Fen;
use shakmaty::san::SanPlus;
use shakmaty::{CastlingMode, Chess, EnPassantMode, File, Move, Piece, Position as _, Role, Square};

use crate::coord::Coord;
use crate::force::Force;


// A move resolved from a click pair: the engine move, its notation and the position after it.
#[derive(Clone, Debug)]
pub struct ResolvedMove {
    pub mv: Move,
    pub san: String,
    pub next: Position,
}

// Full board state plus side-to-move, owned by the rules engine.
#[derive(Clone, Debug)]
pub struct Position {
    game: Chess,
}

impl Position {
    pub fn new() -> Self {
        Position { game: Chess::default() }
    }

    pub fn from_fen(fen: &str) -> Result<Self, String> {
        let setup: Fen = fen.parse().map_err(|err| format!("cannot parse FEN: {}", err))?;
        let game = setup
            .into_position(CastlingMode::Standard)
            .map_err(|err| format!("illegal position: {}", err))?;
        Ok(Position { game })
    }

    pub fn to_fen(&self) -> String {
        Fen::from_position(self.game.clone(), EnPassantMode::Legal).to_string()
    }

    pub fn side_to_move(&self) -> Force { Force::from_color(self.game.turn()) }

    pub fn piece_at(&self, coord: Coord) -> Option<Piece> {
        self.game.board().piece_at(coord.to_square())
    }

    pub fn has_friendly_piece_at(&self, coord: Coord, force: Force) -> bool {
        self.piece_at(coord).is_some_and(|piece| piece.color == force.to_color())
    }

    // Squares reachable by a legal move originating (click-wise) from `from`.
    pub fn legal_targets_from(&self, from: Coord) -> Vec<Coord> {
        let from_sq = from.to_square();
        let mut targets: Vec<_> = self
            .game
            .legal_moves()
            .iter()
            .filter_map(click_squares)
            .filter(|&(move_from, _)| move_from == from_sq)
            .map(|(_, move_to)| Coord::from_square(move_to))
            .collect();
        targets.sort_by_key(|coord| (coord.row, coord.col));
        targets.dedup();
        targets
    }

    // Resolves a move attempt given as a pair of clicked squares. Castling is entered by
    // clicking the king's destination; a pawn reaching the back rank always promotes to
    // a queen (there is no promotion-choice UI). Returns `None` for illegal attempts.
    pub fn try_click_move(&self, from: Coord, to: Coord) -> Option<ResolvedMove> {
        let click_pair = (from.to_square(), to.to_square());
        let legal_moves = self.game.legal_moves();
        let candidates = legal_moves
            .iter()
            .filter(|m| click_squares(m) == Some(click_pair));
        let mv = candidates
            .clone()
            .find(|m| matches!(m, Move::Normal { promotion: Some(Role::Queen), .. }))
            .or_else(|| candidates.clone().find(|m| !m.is_promotion()))?
            .clone();
        let san = SanPlus::from_move(self.game.clone(), &mv).to_string();
        let next = Position { game: self.game.clone().play(&mv).ok()? };
        Some(ResolvedMove { mv, san, next })
    }

    // Resolves server-sent notation against this position. Used for last-move highlighting.
    // Check and mate suffixes ("+" / "#") are accepted.
    pub fn move_from_san(&self, san: &str) -> Option<Move> {
        san.parse::<SanPlus>().ok()?.san.to_move(&self.game).ok()
    }

    pub fn is_checkmate(&self) -> bool { self.game.is_checkmate() }
    pub fn is_stalemate(&self) -> bool { self.game.is_stalemate() }
    pub fn is_check(&self) -> bool { self.game.is_check() }

    // Draws detectable from the position alone: insufficient material or the 50-move rule.
    // Threefold repetition needs game history, which the server does not share.
    pub fn is_draw(&self) -> bool {
        !self.is_checkmate()
            && (self.game.is_insufficient_material() || self.game.halfmoves() >= 100)
    }

    pub fn is_game_over(&self) -> bool {
        self.is_checkmate() || self.is_stalemate() || self.is_draw()
    }

    // The square of `force`'s king.
    pub fn king_position(&self, force: Force) -> Option<Coord> {
        self.game.board().king_of(force.to_color()).map(Coord::from_square)
    }
}

// The (from, to) board squares of a move, as a click-driven UI presents them.
pub fn click_coords(m: &Move) -> Option<(Coord, Coord)> {
    click_squares(m).map(|(from, to)| (Coord::from_square(from), Coord::from_square(to)))
}

// Maps an engine move to the (from, to) squares a click-driven UI uses for it.
// Castling is presented as the king moving two files, not as king-takes-rook.
fn click_squares(m: &Move) -> Option<(Square, Square)> {
    match *m {
        Move::Normal { from, to, .. } => Some((from, to)),
        Move::EnPassant { from, to } => Some((from, to)),
        Move::Castle { king, rook } => {
            let king_to_file = if rook.file() > king.file() { File::G } else { File::C };
            Some((king, Square::from_coords(king_to_file, king.rank())))
        }
        Move::Put { .. } => None,
    }
}


#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn coord(s: &str) -> Coord { Coord::from_algebraic(s).unwrap() }

    #[test]
    fn starting_position_fen() {
        assert_eq!(
            Position::new().to_fen(),
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"
        );
    }

    #[test]
    fn click_move_pawn_push() {
        let pos = Position::new();
        let resolved = pos.try_click_move(coord("e2"), coord("e4")).unwrap();
        assert_eq!(resolved.san, "e4");
        assert_eq!(resolved.next.side_to_move(), Force::Black);
        assert!(resolved.next.has_friendly_piece_at(coord("e4"), Force::White));
    }

    #[test]
    fn click_move_rejects_illegal() {
        let pos = Position::new();
        assert!(pos.try_click_move(coord("e2"), coord("e5")).is_none());
        assert!(pos.try_click_move(coord("e7"), coord("e5")).is_none()); // not white's piece
        assert!(pos.try_click_move(coord("e4"), coord("e5")).is_none()); // empty square
    }

    #[test]
    fn click_move_always_promotes_to_queen() {
        let pos = Position::from_fen("4k3/P7/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        let resolved = pos.try_click_move(coord("a7"), coord("a8")).unwrap();
        assert_eq!(resolved.san, "a8=Q+");
        let piece = resolved.next.piece_at(coord("a8")).unwrap();
        assert_eq!(piece.role, Role::Queen);
    }

    #[test]
    fn click_move_castles_via_king_destination() {
        let pos =
            Position::from_fen("r1bqk1nr/pppp1ppp/2n5/2b1p3/2B1P3/5N2/PPPP1PPP/RNBQK2R w KQkq - 4 4")
                .unwrap();
        let resolved = pos.try_click_move(coord("e1"), coord("g1")).unwrap();
        assert_eq!(resolved.san, "O-O");
        assert!(resolved.next.has_friendly_piece_at(coord("g1"), Force::White));
        assert!(resolved.next.has_friendly_piece_at(coord("f1"), Force::White));
    }

    #[test]
    fn legal_targets_from_knight() {
        let pos = Position::new();
        let targets = pos.legal_targets_from(coord("g1"));
        assert_eq!(targets, vec![coord("f3"), coord("h3")]);
        assert_eq!(pos.legal_targets_from(coord("e5")), vec![]);
    }

    #[test]
    fn terminal_predicates() {
        let mate = Position::from_fen(
            "rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3",
        )
        .unwrap();
        assert!(mate.is_checkmate());
        assert!(mate.is_game_over());

        let stalemate = Position::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").unwrap();
        assert!(stalemate.is_stalemate());
        assert!(!stalemate.is_checkmate());

        let bare_kings = Position::from_fen("8/8/4k3/8/8/4K3/8/8 w - - 0 1").unwrap();
        assert!(bare_kings.is_draw());
    }

    #[test]
    fn san_carries_check_and_mate_suffixes() {
        // 1.f3 e5 2.g4; Qh4 delivers mate.
        let pos =
            Position::from_fen("rnbqkbnr/pppp1ppp/8/4p3/6P1/5P2/PPPPP2P/RNBQKBNR b KQkq - 0 2")
                .unwrap();
        let resolved = pos.try_click_move(coord("d8"), coord("h4")).unwrap();
        assert_eq!(resolved.san, "Qh4#");
        assert!(resolved.next.is_checkmate());
        // Suffixed notation arriving on the wire resolves too.
        assert!(pos.move_from_san("Qh4#").is_some());
        assert!(pos.move_from_san("Qh4").is_some());
        assert!(pos.move_from_san("Qh5").is_none());
    }

    #[test]
    fn check_detection() {
        let pos =
            Position::from_fen("rnbqkbnr/ppp1pppp/8/1B1p4/4P3/8/PPPP1PPP/RNBQK1NR b KQkq - 1 2")
                .unwrap();
        assert!(pos.is_check());
        assert_eq!(pos.king_position(Force::Black), Some(coord("e8")));
    }
}
