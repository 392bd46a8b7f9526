//! Command-line interface.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::{Config, ConfigError};
use crate::ui::route::{Route, UnknownRoute};

/// salesdesk - terminal client for the Sales REST resource
#[derive(Debug, Parser)]
#[command(name = "salesdesk")]
#[command(about = "Browse, create, edit and delete Sales records from the terminal")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Config file (default: ~/.config/salesdesk/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Override `api.base_url`
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Write logs to this file (a timestamp and pid are appended)
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Open the terminal client (default)
    Ui(UiArgs),
    /// Run the in-memory reference server
    Serve(ServeArgs),
}

#[derive(Debug, Clone, Args)]
pub struct UiArgs {
    /// Route to open, e.g. /sales, /sales/new, /sales/3/edit
    #[arg(long, default_value = "/sales", value_parser = parse_route)]
    pub route: Route,
}

#[derive(Debug, Clone, Args)]
pub struct ServeArgs {
    /// Override `server.bind_addr`
    #[arg(long)]
    pub bind: Option<String>,

    /// Start with an empty table
    #[arg(long)]
    pub no_seed: bool,
}

fn parse_route(value: &str) -> Result<Route, UnknownRoute> {
    Route::parse(value)
}

impl Cli {
    /// The subcommand to run, `ui` on `/sales` when none was given.
    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Ui(UiArgs { route: Route::List }))
    }

    /// Load the config file and apply command-line overrides.
    pub fn resolve_config(&self) -> Result<Config, ConfigError> {
        let mut config = match &self.config {
            Some(path) => Config::load_from(path)?,
            None => Config::load()?,
        };
        if let Some(base_url) = &self.base_url {
            config.api.base_url = base_url.clone();
        }
        if let Some(Command::Serve(ServeArgs {
            bind: Some(bind), ..
        })) = &self.command
        {
            config.server.bind_addr = bind.clone();
        }
        config.validate()?;
        Ok(config)
    }
}
