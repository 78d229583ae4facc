use std::sync::mpsc;

use chesslink::client::GameClientState;
use chesslink::coord::Coord;
use chesslink::event::{ClientEvent, ServerEvent};
use chesslink::force::Force;

pub const GAME_ID: &str = "abc123";

pub fn coord(s: &str) -> Coord {
    Coord::from_algebraic(s).unwrap()
}

pub struct TestClient {
    pub state: GameClientState,
    pub outgoing: mpsc::Receiver<ClientEvent>,
}

impl TestClient {
    // A client that has loaded the game page but received nothing from the server yet.
    pub fn fresh() -> Self {
        let (tx, rx) = mpsc::channel();
        let mut state = GameClientState::new(GAME_ID.to_owned(), tx);
        state.join();
        let join_request = rx.try_recv().unwrap();
        assert_eq!(join_request, ClientEvent::JoinGame { game_id: GAME_ID.to_owned() });
        TestClient { state, outgoing: rx }
    }

    // A client that has joined and been assigned a color, with the game active.
    pub fn joined(color: Force) -> Self {
        let mut client = Self::fresh();
        client.state.process_server_event(ServerEvent::GameJoined { color }).unwrap();
        client
            .state
            .process_server_event(ServerEvent::PlayerJoined {})
            .unwrap();
        client
    }
}
