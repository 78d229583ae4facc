// Lobby flow: request a new game, show a shareable join link and auto-enter the
// game after a fixed delay. Join-by-identifier does no validation beyond trimming;
// the identifier is resolved server-side after navigation.

use std::sync::mpsc;
use std::time::{Duration, Instant};

use url::Url;

use crate::event::{ClientEvent, ServerEvent};


pub const NAVIGATE_DELAY: Duration = Duration::from_secs(2);


// A blocking, terminal failure from the lobby's perspective. There is no retry path.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum LobbyAlert {
    EmptyGameId,
    ServerError(String),
}

impl LobbyAlert {
    pub fn message(&self) -> String {
        match self {
            LobbyAlert::EmptyGameId => "Enter a game ID to join".to_owned(),
            LobbyAlert::ServerError(message) => message.clone(),
        }
    }
}

// A created game waiting for auto-navigation.
#[derive(Clone, Debug)]
pub struct PendingGame {
    pub game_id: String,
    pub share_url: Url,
    navigate_at: Instant,
}

pub struct LobbyState {
    origin: Url,
    events_tx: mpsc::Sender<ClientEvent>,
    pending: Option<PendingGame>,
}

impl LobbyState {
    pub fn new(origin: Url, events_tx: mpsc::Sender<ClientEvent>) -> Self {
        LobbyState { origin, events_tx, pending: None }
    }

    pub fn pending_game(&self) -> Option<&PendingGame> { self.pending.as_ref() }

    // Requests a new game. The reply arrives asynchronously as `game_created`;
    // there is no retry and no timeout.
    pub fn create_game(&mut self) {
        self.events_tx.send(ClientEvent::CreateGame).unwrap();
    }

    // Validates free-text input for manual join. Empty input is a user error;
    // anything else is a navigation target, well-formed or not.
    pub fn join_game(&self, input: &str) -> Result<String, LobbyAlert> {
        let game_id = input.trim();
        if game_id.is_empty() {
            Err(LobbyAlert::EmptyGameId)
        } else {
            Ok(game_id.to_owned())
        }
    }

    pub fn process_server_event(
        &mut self, event: ServerEvent, now: Instant,
    ) -> Result<(), LobbyAlert> {
        match event {
            ServerEvent::GameCreated { game_id, .. } => {
                let share_url = self
                    .origin
                    .join(&format!("game/{}", game_id))
                    .map_err(|err| LobbyAlert::ServerError(format!("bad game link: {}", err)))?;
                self.pending = Some(PendingGame {
                    game_id,
                    share_url,
                    navigate_at: now + NAVIGATE_DELAY,
                });
                Ok(())
            }
            ServerEvent::Error { message } => Err(LobbyAlert::ServerError(message)),
            // The lobby page has no handlers for game-view events.
            _ => Ok(()),
        }
    }

    // The game to auto-enter, once the navigation delay has elapsed.
    // The schedule cannot be cancelled.
    pub fn navigation_due(&self, now: Instant) -> Option<&str> {
        self.pending
            .as_ref()
            .filter(|pending| now >= pending.navigate_at)
            .map(|pending| pending.game_id.as_str())
    }
}


#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn make_lobby() -> (LobbyState, mpsc::Receiver<ClientEvent>) {
        let (tx, rx) = mpsc::channel();
        (LobbyState::new(Url::parse("http://localhost:5000/").unwrap(), tx), rx)
    }

    #[test]
    fn create_game_flow() {
        let (mut lobby, rx) = make_lobby();
        let t0 = Instant::now();
        lobby.create_game();
        assert_eq!(rx.try_recv().unwrap(), ClientEvent::CreateGame);

        let created =
            ServerEvent::GameCreated { game_id: "abc123".to_owned(), color: None };
        lobby.process_server_event(created, t0).unwrap();
        let pending = lobby.pending_game().unwrap();
        assert_eq!(pending.share_url.as_str(), "http://localhost:5000/game/abc123");

        assert_eq!(lobby.navigation_due(t0), None);
        assert_eq!(lobby.navigation_due(t0 + Duration::from_millis(1999)), None);
        assert_eq!(lobby.navigation_due(t0 + Duration::from_millis(2000)), Some("abc123"));
    }

    #[test]
    fn join_game_trims_input() {
        let (lobby, _rx) = make_lobby();
        assert_eq!(lobby.join_game("  abc123  ").unwrap(), "abc123");
        assert_eq!(lobby.join_game("   "), Err(LobbyAlert::EmptyGameId));
        assert_eq!(lobby.join_game(""), Err(LobbyAlert::EmptyGameId));
    }

    #[test]
    fn server_error_is_terminal_alert() {
        let (mut lobby, _rx) = make_lobby();
        let err = lobby
            .process_server_event(
                ServerEvent::Error { message: "Game not found".to_owned() },
                Instant::now(),
            )
            .unwrap_err();
        assert_eq!(err.message(), "Game not found");
        assert!(lobby.pending_game().is_none());
    }
}
