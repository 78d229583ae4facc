// Game view controller: a per-session state record driving pure projections.
//
// The general philosophy is that the server is trusted, but the user is not.
// Local moves are applied speculatively for responsiveness and reconciled
// against the next authoritative push; every server push replaces local state
// wholesale. User clicks can never put the state machine in a bad place: an
// unqualified click is a no-op or a reselect, never an error.

use std::collections::VecDeque;
use std::sync::mpsc;

use crate::coord::Coord;
use crate::display::BoardView;
use crate::event::{ClientEvent, ServerEvent};
use crate::force::Force;
use crate::position::{click_coords, Position, ResolvedMove};
use crate::status::GameStatus;


#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ClickResult {
    Ignored,
    Selected,
    Deselected,
    MoveMade,
}

// Events the presentation layer may want to react to beyond a plain redraw.
#[derive(Clone, Debug)]
pub enum NotableEvent {
    MyMoveMade,
    OpponentMoveMade,
    OpponentJoined,
    OpponentDisconnected,
}

#[derive(Clone, Debug)]
pub enum EventError {
    ServerReturnedError(String),
    CannotApplyEvent(String),
}

pub struct GameClientState {
    game_id: String,
    events_tx: mpsc::Sender<ClientEvent>,
    my_force: Option<Force>,
    position: Position,
    selection: Option<Coord>,
    status: GameStatus,
    move_history: Vec<String>,
    last_move: Option<(Coord, Coord)>,
    // SAN of the speculatively applied move whose server echo is still in flight.
    pending_echo: Option<String>,
    notable_events: VecDeque<NotableEvent>,
}

impl GameClientState {
    pub fn new(game_id: String, events_tx: mpsc::Sender<ClientEvent>) -> Self {
        GameClientState {
            game_id,
            events_tx,
            my_force: None,
            position: Position::new(),
            selection: None,
            status: GameStatus::Waiting,
            move_history: Vec::new(),
            last_move: None,
            pending_echo: None,
            notable_events: VecDeque::new(),
        }
    }

    pub fn game_id(&self) -> &str { &self.game_id }
    pub fn my_force(&self) -> Option<Force> { self.my_force }
    pub fn position(&self) -> &Position { &self.position }
    pub fn selection(&self) -> Option<Coord> { self.selection }
    pub fn status(&self) -> GameStatus { self.status }
    pub fn move_history(&self) -> &[String] { &self.move_history }
    pub fn last_move(&self) -> Option<(Coord, Coord)> { self.last_move }

    pub fn next_notable_event(&mut self) -> Option<NotableEvent> {
        self.notable_events.pop_front()
    }

    pub fn join(&mut self) {
        self.events_tx
            .send(ClientEvent::JoinGame { game_id: self.game_id.clone() })
            .unwrap();
    }

    // The selection state machine. Driven by one square "click" at a time;
    // every call leaves the state ready to be re-projected in full.
    pub fn click_square(&mut self, clicked: Coord) -> ClickResult {
        let Some(my_force) = self.my_force else {
            return ClickResult::Ignored;
        };
        if self.position.side_to_move() != my_force {
            return ClickResult::Ignored;
        }
        if self.position.is_game_over() {
            return ClickResult::Ignored;
        }
        match self.selection {
            Some(selected) if selected == clicked => {
                self.selection = None;
                ClickResult::Deselected
            }
            Some(selected) => {
                if let Some(resolved) = self.position.try_click_move(selected, clicked) {
                    self.apply_local_move(resolved);
                    ClickResult::MoveMade
                } else if self.position.has_friendly_piece_at(clicked, my_force) {
                    self.selection = Some(clicked);
                    ClickResult::Selected
                } else {
                    self.selection = None;
                    ClickResult::Deselected
                }
            }
            None => {
                if self.position.has_friendly_piece_at(clicked, my_force) {
                    self.selection = Some(clicked);
                    ClickResult::Selected
                } else {
                    ClickResult::Ignored
                }
            }
        }
    }

    // Speculative local apply: commit immediately, emit upstream, reconcile on echo.
    fn apply_local_move(&mut self, resolved: ResolvedMove) {
        let ResolvedMove { mv, san, next } = resolved;
        self.last_move = click_coords(&mv);
        self.position = next;
        self.selection = None;
        self.move_history.push(san.clone());
        self.refresh_status();
        self.pending_echo = Some(san.clone());
        self.events_tx
            .send(ClientEvent::MakeMove {
                game_id: self.game_id.clone(),
                san,
                fen: self.position.to_fen(),
            })
            .unwrap();
        self.notable_events.push_back(NotableEvent::MyMoveMade);
    }

    // Post-transition hook: re-derive the presentational status from the position.
    // Invoked explicitly by every position-mutating path.
    fn refresh_status(&mut self) {
        if let Some(terminal) = GameStatus::from_position(&self.position) {
            self.status = terminal;
        }
    }

    pub fn process_server_event(&mut self, event: ServerEvent) -> Result<(), EventError> {
        match event {
            ServerEvent::Error { message } => Err(EventError::ServerReturnedError(message)),
            ServerEvent::GameJoined { color } => {
                self.my_force = Some(color);
                Ok(())
            }
            ServerEvent::GameCreated { color, .. } => {
                // Seen when this client is the creator; the server follows up with `game_info`.
                if let Some(color) = color {
                    self.my_force = Some(color);
                }
                Ok(())
            }
            ServerEvent::GameInfo { fen, color, status } => {
                if let Some(fen) = &fen {
                    self.position =
                        Position::from_fen(fen).map_err(EventError::CannotApplyEvent)?;
                    self.selection = None;
                    self.last_move = None;
                    self.pending_echo = None;
                }
                // `game_info` is broadcast to the whole room, so its color field is
                // only meaningful for a client still awaiting assignment. A color
                // is assigned once per session and immutable thereafter.
                if self.my_force.is_none() {
                    self.my_force = color;
                }
                if let Some(status) = status {
                    self.status = status;
                }
                self.refresh_status();
                Ok(())
            }
            ServerEvent::MoveMade { san, fen } => {
                let server_position =
                    Position::from_fen(&fen).map_err(EventError::CannotApplyEvent)?;
                if self.pending_echo.as_deref() == Some(san.as_str()) {
                    self.pending_echo = None;
                    if server_position.to_fen() != self.position.to_fen() {
                        log::warn!(
                            "server position diverged after '{}', adopting server state", san
                        );
                        self.position = server_position;
                        self.selection = None;
                    }
                } else {
                    self.last_move =
                        self.position.move_from_san(&san).as_ref().and_then(click_coords);
                    self.position = server_position;
                    self.selection = None;
                    self.move_history.push(san);
                    self.notable_events.push_back(NotableEvent::OpponentMoveMade);
                }
                self.refresh_status();
                Ok(())
            }
            ServerEvent::PlayerJoined {} => {
                self.status = GameStatus::Active;
                self.notable_events.push_back(NotableEvent::OpponentJoined);
                Ok(())
            }
            ServerEvent::PlayerDisconnected {} => {
                // Board state is kept; the click handler does not check this status,
                // so it holds only until contradicted by a later push.
                self.status = GameStatus::Disconnected;
                self.notable_events.push_back(NotableEvent::OpponentDisconnected);
                Ok(())
            }
        }
    }

    // Local-only status change: the protocol has no resign event.
    pub fn resign(&mut self) {
        self.status = GameStatus::Resigned;
        self.selection = None;
    }

    // Full-redraw projection of the current state.
    pub fn board_view(&self) -> BoardView {
        BoardView::project(&self.position, self.selection, self.my_force, self.last_move)
    }

    // Move list grouped for display: (move number, white move, black reply if any).
    pub fn move_pairs(&self) -> Vec<(usize, String, Option<String>)> {
        self.move_history
            .chunks(2)
            .enumerate()
            .map(|(i, chunk)| {
                (i + 1, chunk[0].clone(), chunk.get(1).cloned())
            })
            .collect()
    }
}
