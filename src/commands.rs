// Command handlers. Each one receives the `App` bundle (configuration,
// session store, HTTP client, credential prompt) instead of reaching for
// globals, and runs a single request sequence to completion: the first
// error aborts the command.

use crate::api::{http_client, ApiClient};
use crate::config::Config;
use crate::error::{GoshortError, Result};
use crate::models::Shortlink;
use crate::session::{SessionRecord, SessionStore};
use crate::ui::{self, CredentialPrompt};
use reqwest::blocking::Client;
use std::io::Write;

/// Dependencies shared by every command.
pub struct App<P: CredentialPrompt> {
    pub config: Config,
    pub store: SessionStore,
    pub http: Client,
    pub prompt: P,
}

impl<P: CredentialPrompt> App<P> {
    pub fn new(config: Config, prompt: P) -> Result<Self> {
        let http = http_client(config.timeout)?;
        let store = SessionStore::new(config.session_dir.clone());
        Ok(App {
            config,
            store,
            http,
            prompt,
        })
    }

    fn api(&self, base_url: &str) -> ApiClient {
        ApiClient::new(self.http.clone(), base_url)
    }

    /// Load the stored session and confirm with the server that the token
    /// is still accepted. Nothing is cached between runs.
    fn authenticated(&self) -> Result<ApiClient> {
        let record = self.store.load()?;
        let mut api = self.api(&record.server_url);
        api.set_token(&record.token);

        tracing::info!("Checking session token...");
        api.validate_session()?;
        ui::success("Session token is valid!");
        Ok(api)
    }
}

/// Probe the server, prompt for credentials, log in and persist the
/// returned session. Credentials are only requested once the server
/// answered the probe.
pub fn login<P: CredentialPrompt>(app: &App<P>, server: Option<String>) -> Result<SessionRecord> {
    let server_url = match server {
        Some(url) => url,
        None => {
            tracing::info!(
                "No server provided! Using default server: {}",
                app.config.default_server
            );
            app.config.default_server.clone()
        }
    };
    let api = app.api(&server_url);

    // probe first so a dead server never asks for a password
    tracing::info!("Checking if server is online...");
    if let Err(e) = api.ping() {
        if matches!(e, GoshortError::HttpStatus { .. }) {
            tracing::error!("Server is not online! Are you sure the server is running/reachable?");
        }
        return Err(e);
    }
    tracing::info!("Server is online!");

    let credentials = app.prompt.credentials()?;
    let payload = api.login(&credentials)?;

    // greet by username, falling back to email
    let name = if payload.user.username.is_empty() {
        &payload.user.email
    } else {
        &payload.user.username
    };
    if name.is_empty() {
        ui::success("Login successful!");
    } else {
        ui::success(&format!("Login successful! Welcome {}!", name));
    }

    // persist only after the server accepted the credentials
    let path = app.store.save(&server_url, &payload.session)?;
    tracing::info!("Session data saved to: {}", path.display());

    Ok(SessionRecord {
        server_url,
        token: payload.session,
    })
}

/// Fetch every shortlink of the logged-in user and print them as a table.
pub fn list<P: CredentialPrompt>(app: &App<P>, out: &mut dyn Write) -> Result<Vec<Shortlink>> {
    let api = app.authenticated()?;

    // clear the spinner before any error or table reaches the terminal
    let spinner = ui::spinner("Fetching shortlinks...");
    let result = api.list_shortlinks();
    spinner.finish_and_clear();
    let links = result?;

    writeln!(out, "{}", ui::render_shortlinks(&links)).map_err(GoshortError::Output)?;
    Ok(links)
}

/// Create a shortlink for `long_url` and print the short URL alone on
/// its line.
pub fn shorten<P: CredentialPrompt>(
    app: &App<P>,
    long_url: &str,
    out: &mut dyn Write,
) -> Result<Shortlink> {
    let api = app.authenticated()?;

    let spinner = ui::spinner("Shortening URL...");
    let result = api.create_shortlink(long_url);
    spinner.finish_and_clear();
    let link = result?;

    tracing::info!(id = link.id, long_url = %link.long_url, "URL shortened");
    writeln!(out, "{}", link.short_url).map_err(GoshortError::Output)?;
    Ok(link)
}
