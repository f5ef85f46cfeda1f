//! Command handlers, one module per area of the client.

mod admin;
mod auth;
mod leads;
mod stats;

use anyhow::Result;

use crate::app::App;
use crate::cli::Command;

pub async fn run(app: &App, command: Command) -> Result<()> {
    match command {
        Command::Login { username } => auth::login(app, username).await,
        Command::Logout => auth::logout(app),
        Command::Whoami => auth::whoami(app),
        Command::Config(args) => auth::config(app, args),
        Command::Dashboard { days } => stats::dashboard(app, days).await,
        Command::Leads(cmd) => leads::run(app, cmd).await,
        Command::Projects(cmd) => admin::projects(app, cmd).await,
        Command::Bots(cmd) => admin::bots(app, cmd).await,
        Command::Managers(cmd) => admin::managers(app, cmd).await,
        Command::Stats(cmd) => stats::run(app, cmd).await,
    }
}
