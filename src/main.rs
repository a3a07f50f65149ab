//! cadence — terminal host for the favorites client.
//!
//! Usage: cadence [--config <path>] <command> [args]

use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Result};

use cadence::favorites::{FavoritesLoad, SkipReason};
use cadence::notify::StderrNotifier;
use cadence::ui::LogNavigator;
use cadence::{logger, Client, Config, SessionRecord, TrackId};

const USAGE: &str = "\
Usage: cadence [--config <path>] <command>

Commands:
  status                             show session and auth section
  login <user-id> <username> <token> store a session (as the login page does)
  logout                             end the session
  favorites                          list cached favorite track ids
  sync                               reload favorites from the server
  add <track-id>                     add a track to favorites
  remove <track-id>                  remove a track from favorites
  toggle <track-id>                  flip a track's favorite state
  example-config                     print a default config file";

#[tokio::main]
async fn main() -> Result<()> {
    let mut args: Vec<String> = std::env::args().skip(1).collect();

    let config_path = match args.iter().position(|a| a == "--config") {
        Some(i) if i + 1 < args.len() => {
            let path = args.remove(i + 1);
            args.remove(i);
            Some(path)
        }
        Some(_) => bail!("--config needs a path\n\n{}", USAGE),
        None => None,
    };

    let Some(command) = args.first().cloned() else {
        eprintln!("{}", USAGE);
        std::process::exit(1);
    };

    if command == "example-config" {
        print!("{}", Config::example_config());
        return Ok(());
    }

    let config = match config_path {
        Some(ref p) => Config::load_from(Path::new(p))?,
        None => Config::load()?,
    };
    logger::init(&config.log)?;

    let client = Client::open(config, Arc::new(StderrNotifier), Arc::new(LogNavigator))?;
    run(&client, &command, &args[1..]).await
}

async fn run(client: &Client, command: &str, args: &[String]) -> Result<()> {
    match (command, args) {
        ("status", []) => {
            println!("{}", client.auth_section());
            match client.session().user_data().and_then(|r| r.user_id()) {
                Some(id) => println!("user id: {}", id),
                None => println!("user id: -"),
            }
            let token = if client.session().access_token().is_some() { "present" } else { "missing" };
            println!("access token: {}", token);
        }
        ("login", [user_id, username, token]) => {
            let id = match user_id.parse::<i64>() {
                Ok(n) => serde_json::Value::from(n),
                Err(_) => serde_json::Value::from(user_id.as_str()),
            };
            client.session().login(&SessionRecord::new(id, username), token)?;
            println!("{}", client.auth_section());
        }
        ("logout", []) => {
            client.session().logout();
            // Give the detached server notification a moment before the runtime exits
            tokio::time::sleep(std::time::Duration::from_millis(200)).await;
        }
        ("favorites", []) => {
            for id in client.favorites().cache().ids() {
                println!("{}", client.favorite_button(id));
            }
        }
        ("sync", []) => match client.favorites().load_favorite_tracks().await {
            FavoritesLoad::Loaded(tracks) => println!("Loaded {} favorite tracks", tracks.len()),
            FavoritesLoad::Skipped(SkipReason::NotLoggedIn) => bail!("not logged in"),
            FavoritesLoad::Skipped(SkipReason::MissingUserId) => bail!("session has no user id"),
            FavoritesLoad::Failed(e) => bail!("could not load favorites: {}", e),
        },
        ("add", [id]) => {
            let track_id = TrackId::from(id.as_str());
            if !client.favorites().add_to_favorites(&track_id).await {
                std::process::exit(1);
            }
            println!("{}", client.favorite_button(track_id));
        }
        ("remove", [id]) => {
            let track_id = TrackId::from(id.as_str());
            if !client.favorites().remove_from_favorites(&track_id).await {
                std::process::exit(1);
            }
            println!("{}", client.favorite_button(track_id));
        }
        ("toggle", [id]) => {
            let mut button = client.favorite_button(TrackId::from(id.as_str()));
            if !button.click(client.favorites()).await {
                std::process::exit(1);
            }
            println!("{}", button);
        }
        _ => bail!("unknown command or wrong arguments\n\n{}", USAGE),
    }
    Ok(())
}
