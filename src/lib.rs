// Library root
// ------------
// The binary (`main.rs`) only parses arguments and wires these modules
// together, so the whole request workflow can be driven from tests.
//
// Module responsibilities:
// - `session`: the two-line session file under `~/.goshort`.
// - `api` / `models`: HTTP calls and the shared JSON envelope schemas.
// - `commands` / `cli`: login, list and shorten handlers and their routing.
// - `ui`: prompts, spinners, status lines and the shortlink table.
pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod models;
pub mod session;
pub mod ui;
