//! Command dispatch.

pub mod context;
pub mod generate;
pub mod providers;

use crate::cli::{Cli, Command};
use anyhow::Result;

pub async fn handle(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Generate(args) => generate::handle(args).await,
        Command::Context { deck } => context::handle(&deck),
        Command::Providers { action } => providers::handle(action).await,
    }
}
