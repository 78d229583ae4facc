// Lobby flows. "Navigation" from the lobby into the game view opens a fresh
// connection, the way a browser navigation would.

use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::bail;
use url::Url;

use chesslink::event::ServerEvent;
use chesslink::lobby::LobbyState;

use crate::client_main;
use crate::network;


fn server_origin(server_address: &str) -> anyhow::Result<Url> {
    Ok(Url::parse(&format!("http://{}:{}/", server_address, network::PORT))?)
}

pub fn run_create(server_address: String) -> anyhow::Result<()> {
    let (mut socket_in, mut socket_out) = network::connect(&server_address)?;
    let (tx, rx) = mpsc::channel();
    let mut lobby = LobbyState::new(server_origin(&server_address)?, tx);

    lobby.create_game();
    for event in rx.try_iter() {
        network::write_obj(&mut socket_out, &event)?;
    }

    let game_id = loop {
        let event: ServerEvent = network::read_obj(&mut socket_in)?;
        match lobby.process_server_event(event, Instant::now()) {
            Ok(()) => {}
            Err(alert) => bail!(alert.message()),
        }
        if let Some(pending) = lobby.pending_game() {
            println!("Game created. Share this link with your opponent:");
            println!("  {}", pending.share_url);
            println!("Entering the game...");
            break pending.game_id.clone();
        }
    };

    // Fixed navigation delay; the schedule cannot be cancelled.
    while lobby.navigation_due(Instant::now()).is_none() {
        thread::sleep(Duration::from_millis(50));
    }
    drop(socket_in);
    drop(socket_out);
    client_main::run(client_main::ClientConfig { server_address, game_id })
}

pub fn run_join(server_address: String, game_id_input: &str) -> anyhow::Result<()> {
    let (tx, _rx) = mpsc::channel();
    let lobby = LobbyState::new(server_origin(&server_address)?, tx);
    let game_id = match lobby.join_game(game_id_input) {
        Ok(game_id) => game_id,
        Err(alert) => bail!(alert.message()),
    };
    client_main::run(client_main::ClientConfig { server_address, game_id })
}
