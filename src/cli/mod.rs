//! CLI entry points for chat-commander using clap.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::borrow::Cow;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};

use crate::commander::{Flow, Session};
use crate::config::{self, Settings};
use crate::display::ConsoleDisplay;
use crate::{error, logging};

/// chat-commander - interactive command layer for a distributed chat group.
#[derive(Parser, Debug)]
#[command(name = "chat-commander")]
#[command(version)]
#[command(about = "Interactive chat group commands with remote membership sync", long_about = None)]
pub struct Commands {
    /// Settings file (default: ~/.chat-commander/settings.json)
    #[arg(long, global = true, env = "CHAT_COMMANDER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Member name to register as
    #[arg(long, global = true)]
    pub name: Option<String>,

    /// Service directory URL
    #[arg(long, global = true)]
    pub services_url: Option<String>,

    /// Membership directory base URL
    #[arg(long, global = true)]
    pub membership_url: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Read commands from stdin until quit (default)
    Run,

    /// Execute the given command lines in order and exit
    Exec {
        /// Command lines, e.g. '\gcpsubscribe' '\list tag1'
        #[arg(required = true)]
        lines: Vec<String>,
    },

    /// Print the effective settings
    Config,
}

impl Commands {
    pub async fn run(self) -> Result<ExitCode> {
        let settings = self.settings()?;

        match &self.command {
            Some(Command::Config) => {
                println!("{}", serde_json::to_string_pretty(&settings)?);
                Ok(ExitCode::SUCCESS)
            }
            Some(Command::Exec { lines }) => run_session(&settings, lines.iter().cloned()).await,
            Some(Command::Run) | None => run_interactive(&settings).await,
        }
    }

    /// Load settings and apply command line overrides.
    ///
    /// A missing default settings file falls back to defaults; an explicit
    /// `--config` must load.
    fn settings(&self) -> Result<Settings> {
        let mut settings = match &self.config {
            Some(path) => config::load_settings_from(path)
                .with_context(|| format!("loading {}", path.display()))?,
            None => config::load_settings().unwrap_or_else(|e| {
                eprintln!("Using default settings: {}", e);
                Settings::default()
            }),
        };

        if let Some(name) = &self.name {
            settings.member.name = name.clone();
        }
        if let Some(url) = &self.services_url {
            settings.services.directory_url = url.clone();
        }
        if let Some(url) = &self.membership_url {
            settings.membership.service_url = url.clone();
        }

        config::validate_settings(&settings)?;
        Ok(settings)
    }
}

async fn run_interactive(settings: &Settings) -> Result<ExitCode> {
    let (_guard, log_file) = logging::init(settings)?;
    let mut session = Session::from_settings(
        settings,
        Arc::new(ConsoleDisplay),
        log_file.display().to_string(),
    )?;

    run_lines(&mut session, BufReader::new(tokio::io::stdin())).await?;
    Ok(ExitCode::SUCCESS)
}

/// Feed input lines to the session until quit, end of input or a fatal error.
async fn run_lines<R>(session: &mut Session, mut reader: R) -> Result<()>
where
    R: AsyncBufRead + Unpin,
{
    let mut buf = Vec::new();
    loop {
        let line = match read_line(&mut reader, &mut buf).await {
            Ok(Some(line)) => line,
            Ok(None) => {
                tracing::info!("End of input");
                return Ok(());
            }
            Err(e) => {
                tracing::warn!("Reading input failed: {}", e);
                return Ok(());
            }
        };

        if step(session, &line).await? == Flow::Quit {
            return Ok(());
        }
    }
}

/// Read one line without its terminator. Invalid UTF-8 is replaced, not rejected.
async fn read_line<R>(reader: &mut R, buf: &mut Vec<u8>) -> std::io::Result<Option<String>>
where
    R: AsyncBufRead + Unpin,
{
    buf.clear();
    if reader.read_until(b'\n', buf).await? == 0 {
        return Ok(None);
    }

    let text = String::from_utf8_lossy(buf);
    if matches!(text, Cow::Owned(_)) {
        tracing::warn!("Input line is not valid UTF-8: {:?}", text);
    }
    Ok(Some(text.trim_end_matches(&['\n', '\r'][..]).to_string()))
}

async fn run_session(
    settings: &Settings,
    lines: impl IntoIterator<Item = String>,
) -> Result<ExitCode> {
    let (_guard, log_file) = logging::init(settings)?;
    let mut session = Session::from_settings(
        settings,
        Arc::new(ConsoleDisplay),
        log_file.display().to_string(),
    )?;

    for line in lines {
        if step(&mut session, &line).await? == Flow::Quit {
            break;
        }
    }
    Ok(ExitCode::SUCCESS)
}

/// Execute one line; fatal errors end the loop and flush the log on return.
async fn step(session: &mut Session, line: &str) -> Result<Flow> {
    settle(session.execute(line).await)
}

fn settle(outcome: error::Result<Flow>) -> Result<Flow> {
    match outcome {
        Ok(flow) => Ok(flow),
        Err(e) if e.is_fatal() => {
            tracing::error!("{}", e);
            Err(e.into())
        }
        Err(e) => {
            tracing::warn!("Command failed: {}", e);
            Ok(Flow::Continue)
        }
    }
}
