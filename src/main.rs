// Entrypoint for the CLI application.
// - Keeps `main` small: load config, create the API client, hand both to the UI loop.
// - A missing API key aborts here, before any menu is shown or request is sent.

use anyhow::Context;
use headlines_cli::{
    ui::{main_menu, LinePrompter, TerminalPrompter},
    Config, NewsClient, Session,
};
use std::io::IsTerminal;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

/// Load a local .env if present. A missing file is fine; a broken one is logged.
fn load_dotenv() {
    match dotenvy::dotenv() {
        Ok(path) => debug!(path = %path.display(), "loaded .env"),
        Err(e) if e.not_found() => debug!("No .env file found"),
        Err(e) => warn!(error = %e, "failed to load .env"),
    }
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    load_dotenv();

    let config = Config::from_env().context("Invalid configuration")?;
    let client = NewsClient::from_config(&config)?;
    debug!(endpoint = client.endpoint(), country = %config.country, "starting");

    let mut session = Session::new(client, config.country);
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    // dialoguer needs a real terminal; piped input is read line by line.
    let stdin = std::io::stdin();
    if stdin.is_terminal() {
        main_menu(&mut session, &mut TerminalPrompter, &mut out)?;
    } else {
        main_menu(&mut session, &mut LinePrompter::new(stdin.lock()), &mut out)?;
    }
    Ok(())
}
