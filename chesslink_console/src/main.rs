#![forbid(unsafe_code)]
#![cfg_attr(feature = "strict", deny(warnings))]

mod client_main;
mod lobby_main;
mod network;
mod tui;

use clap::{arg, Command};

fn main() -> anyhow::Result<()> {
    env_logger::Builder::new()
        .target(env_logger::Target::Stdout)
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let matches = Command::new("Chesslink")
        .version(clap::crate_version!())
        .about("Two-player chess over a shareable link: terminal client")
        .subcommand_required(true)
        .subcommand(
            Command::new("create")
                .about("Create a new game and share the join link")
                .arg(arg!(<server_address> "Server address")),
        )
        .subcommand(
            Command::new("join")
                .about("Join an existing game")
                .arg(arg!(<server_address> "Server address"))
                .arg(arg!(<game_id> "Game ID from the share link")),
        )
        .get_matches();

    match matches.subcommand() {
        Some(("create", sub_matches)) => lobby_main::run_create(
            sub_matches.get_one::<String>("server_address").unwrap().clone(),
        ),
        Some(("join", sub_matches)) => lobby_main::run_join(
            sub_matches.get_one::<String>("server_address").unwrap().clone(),
            sub_matches.get_one::<String>("game_id").unwrap(),
        ),
        _ => unreachable!("Exhausted list of subcommands and subcommand_required prevents `None`"),
    }
}
