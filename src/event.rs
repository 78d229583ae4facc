// Wire protocol: named events with JSON payloads, one object per WebSocket message,
// shaped as `{"event": <name>, "data": <payload>}`. The transport is assumed to
// deliver events to a given client in send order; there are no sequence numbers.

use serde::{Deserialize, Serialize};

use crate::force::Force;
use crate::status::GameStatus;


#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ClientEvent {
    CreateGame,
    JoinGame {
        game_id: String,
    },
    MakeMove {
        game_id: String,
        #[serde(rename = "move")]
        san: String,
        fen: String,
    },
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ServerEvent {
    GameCreated {
        game_id: String,
        // The creator always plays white.
        color: Option<Force>,
    },
    GameJoined {
        color: Force,
    },
    GameInfo {
        fen: Option<String>,
        color: Option<Force>,
        status: Option<GameStatus>,
    },
    MoveMade {
        #[serde(rename = "move")]
        san: String,
        fen: String,
    },
    PlayerJoined {},
    PlayerDisconnected {},
    Error {
        message: String,
    },
}


#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn client_event_wire_shape() {
        assert_eq!(
            serde_json::to_string(&ClientEvent::CreateGame).unwrap(),
            r#"{"event":"create_game"}"#
        );
        assert_eq!(
            serde_json::to_string(&ClientEvent::JoinGame { game_id: "abc123".to_owned() })
                .unwrap(),
            r#"{"event":"join_game","data":{"game_id":"abc123"}}"#
        );
        let mv = ClientEvent::MakeMove {
            game_id: "abc123".to_owned(),
            san: "e4".to_owned(),
            fen: "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq - 0 1".to_owned(),
        };
        let serialized = serde_json::to_string(&mv).unwrap();
        assert!(serialized.contains(r#""move":"e4""#));
        assert_eq!(serde_json::from_str::<ClientEvent>(&serialized).unwrap(), mv);
    }

    #[test]
    fn server_event_wire_shape() {
        let ev: ServerEvent = serde_json::from_str(
            r#"{"event":"game_created","data":{"game_id":"abc123","color":"white"}}"#,
        )
        .unwrap();
        assert_eq!(
            ev,
            ServerEvent::GameCreated { game_id: "abc123".to_owned(), color: Some(Force::White) }
        );

        let ev: ServerEvent =
            serde_json::from_str(r#"{"event":"game_joined","data":{"color":"black"}}"#).unwrap();
        assert_eq!(ev, ServerEvent::GameJoined { color: Force::Black });

        // `game_info` fields are all optional.
        let ev: ServerEvent =
            serde_json::from_str(r#"{"event":"game_info","data":{"status":"waiting"}}"#).unwrap();
        assert_eq!(
            ev,
            ServerEvent::GameInfo { fen: None, color: None, status: Some(GameStatus::Waiting) }
        );

        let ev: ServerEvent =
            serde_json::from_str(r#"{"event":"player_disconnected","data":{}}"#).unwrap();
        assert_eq!(ev, ServerEvent::PlayerDisconnected {});

        let ev: ServerEvent =
            serde_json::from_str(r#"{"event":"error","data":{"message":"Room is full"}}"#)
                .unwrap();
        assert_eq!(ev, ServerEvent::Error { message: "Room is full".to_owned() });
    }
}
