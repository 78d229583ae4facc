use console::Style;
use itertools::Itertools;

use chesslink::client::GameClientState;
use chesslink::coord::NUM_COLS;
use chesslink::display::{piece_to_pictogram, BoardView, DisplayCoord, SquareView};
use chesslink::force::Force;
use chesslink::status::GameStatus;


fn format_square(ch: char) -> String { format!(" {} ", ch) }

fn square_style(square: &SquareView, under_cursor: bool) -> Style {
    let style = if square.check {
        Style::new().color256(233).on_red()
    } else if square.selected {
        Style::new().color256(233).on_color256(114)
    } else if square.legal_target {
        Style::new().color256(233).on_color256(194)
    } else if square.last_move {
        Style::new().color256(233).on_color256(186)
    } else if square.is_dark {
        Style::new().color256(233).on_color256(222)
    } else {
        Style::new().color256(233).on_color256(230)
    };
    if under_cursor { style.reverse() } else { style }
}

pub fn render_board(view: &BoardView, cursor: DisplayCoord) -> String {
    let mut ret = String::new();
    ret.push_str("   ");
    for x in 0..NUM_COLS {
        ret.push_str(&format_square(view.col_label(x)));
    }
    ret.push('\n');
    for (y, row) in view.rows().enumerate() {
        ret.push_str(&format_square(view.row_label(y as u8)));
        for (x, square) in row.iter().enumerate() {
            let ch = match square.piece {
                Some(piece) => piece_to_pictogram(piece),
                None if square.legal_target => '·',
                None => ' ',
            };
            let under_cursor = cursor == (DisplayCoord { x: x as u8, y: y as u8 });
            ret.push_str(
                &square_style(square, under_cursor).apply_to(format_square(ch)).to_string(),
            );
        }
        ret.push('\n');
    }
    ret
}

fn status_line(state: &GameClientState) -> String {
    match state.status() {
        GameStatus::Active => match state.my_force() {
            Some(force) if state.position().side_to_move() == force => "Your move".to_owned(),
            Some(_) => "Opponent's move".to_owned(),
            None => GameStatus::Active.ui_label().to_owned(),
        },
        status => status.ui_label().to_owned(),
    }
}

pub fn render_game(
    state: &GameClientState, cursor: DisplayCoord, message: Option<&str>, confirm_resign: bool,
    share_url: &url::Url,
) -> String {
    let mut ret = String::new();
    ret.push_str(&format!("Game {}: {}\n", state.game_id(), status_line(state)));
    let you = match state.my_force() {
        Some(Force::White) => "White",
        Some(Force::Black) => "Black",
        None => "not assigned yet",
    };
    ret.push_str(&format!("You play: {}\n\n", you));
    ret.push_str(&render_board(&state.board_view(), cursor));
    ret.push('\n');
    let moves = state
        .move_pairs()
        .iter()
        .map(|(n, white_move, black_move)| match black_move {
            Some(black_move) => format!("{}. {} {}", n, white_move, black_move),
            None => format!("{}. {}", n, white_move),
        })
        .join("  ");
    if !moves.is_empty() {
        ret.push_str(&format!("Moves: {}\n", moves));
    }
    if let Some(message) = message {
        ret.push_str(&format!("{}\n", message));
    }
    if confirm_resign {
        ret.push_str("Resign? Press 'y' to confirm, any other key to cancel.\n");
    }
    ret.push_str(&format!("Link: {}\n", share_url));
    ret.push_str("arrows: move cursor, enter: select/move, r: resign, c: show link, q: quit\n");
    ret
}
