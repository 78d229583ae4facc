// Game view event loop: network, keyboard and tick events funnel into one
// channel; every iteration re-renders the whole view from `GameClientState`.

use std::fmt;
use std::io;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use anyhow::bail;
use crossterm::{cursor, event as term_event, execute, style, terminal};
use scopeguard::defer;
use url::Url;

use chesslink::client::{ClickResult, EventError, GameClientState, NotableEvent};
use chesslink::coord::{NUM_COLS, NUM_ROWS};
use chesslink::display::{from_display_coord, BoardOrientation, DisplayCoord};
use chesslink::event::ServerEvent;

use crate::network;
use crate::tui;


pub struct ClientConfig {
    pub server_address: String,
    pub game_id: String,
}

enum IncomingEvent {
    Network(ServerEvent),
    Terminal(term_event::Event),
    Tick,
}

fn writeln_raw(stdout: &mut io::Stdout, v: impl fmt::Display) -> io::Result<()> {
    let s = v.to_string();
    // Note. Not using `lines()` because it removes the trailing new line.
    for line in s.split('\n') {
        execute!(stdout, style::Print(line), cursor::MoveToNextLine(1))?;
    }
    Ok(())
}

pub fn run(config: ClientConfig) -> anyhow::Result<()> {
    let (mut socket_in, mut socket_out) = network::connect(&config.server_address)?;
    let share_url = Url::parse(&format!("http://{}:{}/", config.server_address, network::PORT))?
        .join(&format!("game/{}", config.game_id))?;

    let mut stdout = io::stdout();
    terminal::enable_raw_mode()?;
    execute!(stdout, terminal::EnterAlternateScreen, cursor::Hide)?;
    defer! {
        let _ = terminal::disable_raw_mode();
        let _ = execute!(io::stdout(), terminal::LeaveAlternateScreen, cursor::Show);
    }

    let (tx, rx) = mpsc::channel();
    let tx_net = tx.clone();
    let tx_local = tx.clone();
    let tx_tick = tx;
    thread::spawn(move || loop {
        match network::read_obj(&mut socket_in) {
            Ok(event) => {
                if tx_net.send(IncomingEvent::Network(event)).is_err() {
                    break;
                }
            }
            Err(err) => {
                // No timeout and no reconnect: a dead server leaves the view idle.
                log::error!("Reading from server failed: {}", err);
                break;
            }
        }
    });
    thread::spawn(move || loop {
        let Ok(event) = term_event::read() else {
            break;
        };
        if tx_local.send(IncomingEvent::Terminal(event)).is_err() {
            break;
        }
    });
    thread::spawn(move || loop {
        thread::sleep(Duration::from_millis(100));
        if tx_tick.send(IncomingEvent::Tick).is_err() {
            break;
        }
    });

    let (server_tx, server_rx) = mpsc::channel();
    thread::spawn(move || {
        for event in server_rx {
            if let Err(err) = network::write_obj(&mut socket_out, &event) {
                log::error!("Sending to server failed: {}", err);
                break;
            }
        }
    });

    let mut client_state = GameClientState::new(config.game_id.clone(), server_tx);
    let mut cursor_pos = DisplayCoord { x: 4, y: 6 };
    let mut message: Option<String> = None;
    let mut confirm_resign = false;
    client_state.join();

    for event in rx {
        match event {
            IncomingEvent::Network(event) => match client_state.process_server_event(event) {
                Ok(()) => {}
                // A server error is terminal from the UI's perspective.
                Err(EventError::ServerReturnedError(alert)) => bail!(alert),
                Err(EventError::CannotApplyEvent(details)) => {
                    log::error!("Bad server event: {}", details);
                    message = Some(details);
                }
            },
            IncomingEvent::Terminal(event) => {
                if let term_event::Event::Key(key) = event {
                    use term_event::KeyCode;
                    if confirm_resign {
                        if key.code == KeyCode::Char('y') {
                            client_state.resign();
                        }
                        confirm_resign = false;
                    } else {
                        match key.code {
                            KeyCode::Up => cursor_pos.y = cursor_pos.y.saturating_sub(1),
                            KeyCode::Down => cursor_pos.y = (cursor_pos.y + 1).min(NUM_ROWS - 1),
                            KeyCode::Left => cursor_pos.x = cursor_pos.x.saturating_sub(1),
                            KeyCode::Right => cursor_pos.x = (cursor_pos.x + 1).min(NUM_COLS - 1),
                            KeyCode::Enter | KeyCode::Char(' ') => {
                                let orientation =
                                    BoardOrientation::for_force(client_state.my_force());
                                let clicked = from_display_coord(cursor_pos, orientation);
                                if client_state.click_square(clicked) != ClickResult::Ignored {
                                    message = None;
                                }
                            }
                            KeyCode::Char('r') => confirm_resign = true,
                            KeyCode::Char('c') => {
                                message = Some(format!("Game link: {}", share_url));
                            }
                            KeyCode::Char('q') => return Ok(()),
                            _ => {}
                        }
                    }
                }
            }
            IncomingEvent::Tick => {
                // Any event triggers a repaint, so no additional action is required.
            }
        }
        while let Some(notable) = client_state.next_notable_event() {
            match notable {
                NotableEvent::OpponentJoined => message = Some("Opponent joined".to_owned()),
                NotableEvent::OpponentDisconnected => {
                    message = Some("Opponent disconnected".to_owned());
                }
                NotableEvent::MyMoveMade | NotableEvent::OpponentMoveMade => message = None,
            }
        }
        execute!(stdout, cursor::MoveTo(0, 0))?;
        writeln_raw(
            &mut stdout,
            tui::render_game(
                &client_state,
                cursor_pos,
                message.as_deref(),
                confirm_resign,
                &share_url,
            ),
        )?;
        execute!(stdout, terminal::Clear(terminal::ClearType::FromCursorDown))?;
    }
    Ok(())
}
