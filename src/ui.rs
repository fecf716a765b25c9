// UI layer: terminal prompts (`dialoguer`), spinners (`indicatif`),
// colored status lines (`crossterm`) and the shortlink table
// (`comfy-table`). Results go to stdout; everything else to stderr.

use crate::error::{GoshortError, Result};
use crate::models::{LoginRequest, Shortlink};
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use crossterm::style::{style, Stylize};
use dialoguer::{Input, Password};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

pub const TABLE_HEADER: [&str; 7] = [
    "ID",
    "Long URL",
    "Short URL",
    "Clicks",
    "Browser",
    "Count",
    "Country",
];

/// Source of login credentials. The terminal implementation is used by
/// the binary; tests inject fixed credentials.
pub trait CredentialPrompt {
    fn credentials(&self) -> Result<LoginRequest>;
}

/// Asks for the email, then the password with masked input.
pub struct TerminalPrompt;

impl CredentialPrompt for TerminalPrompt {
    fn credentials(&self) -> Result<LoginRequest> {
        let email: String = Input::new()
            .with_prompt("Please enter your email address")
            .interact_text()
            .map_err(GoshortError::Prompt)?;
        let password: String = Password::new()
            .with_prompt("Please enter your password")
            .interact()
            .map_err(GoshortError::Prompt)?;
        Ok(LoginRequest { email, password })
    }
}

/// Steady spinner on stderr; hidden when stderr is not a terminal.
pub fn spinner(message: &'static str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

pub fn success(message: &str) {
    eprintln!("{}", style(message).green());
}

pub fn error(message: &str) {
    eprintln!("{} {}", style("Error:").red().bold(), message);
}

/// One row per shortlink without browser analytics; otherwise one row per
/// browser, with the shortlink columns only on the first of them.
pub fn shortlink_rows(links: &[Shortlink]) -> Vec<[String; 7]> {
    let mut rows = Vec::new();
    for link in links {
        let ident = [
            link.id.to_string(),
            link.long_url.clone(),
            link.short_url.clone(),
            link.analytics.click_count.to_string(),
        ];
        if link.analytics.browsers.is_empty() {
            let [id, long_url, short_url, clicks] = ident;
            rows.push([
                id,
                long_url,
                short_url,
                clicks,
                String::new(),
                String::new(),
                String::new(),
            ]);
            continue;
        }
        for (i, browser) in link.analytics.browsers.iter().enumerate() {
            let [id, long_url, short_url, clicks] = if i == 0 {
                ident.clone()
            } else {
                Default::default()
            };
            rows.push([
                id,
                long_url,
                short_url,
                clicks,
                browser.browser_name.clone(),
                browser.count.to_string(),
                browser.country.clone(),
            ]);
        }
    }
    rows
}

pub fn render_shortlinks(links: &[Shortlink]) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(TABLE_HEADER.to_vec());
    for row in shortlink_rows(links) {
        table.add_row(Vec::from(row));
    }
    table.to_string()
}
