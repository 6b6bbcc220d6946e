//! `shoplist` command-line frontend over `shoplist_core`.

mod args;
mod commands;
pub mod config;
pub mod terminal;

pub use args::{Cli, Commands};
pub use commands::run;
