//! Command interpreter.
//!
//! A line of operator input is tokenized, matched against the command table
//! and routed to one handler. Handlers write tagged text blocks to the display
//! sink and report recoverable failures there as well; only fatal errors are
//! returned to the caller.

mod gcp;
mod services;
mod state;
pub mod table;

#[cfg(test)]
pub(crate) mod testing;

use std::sync::Arc;

use serde::Serialize;

use crate::config::Settings;
use crate::directory::{HttpServiceDirectory, ServiceDirectory};
use crate::display::Display;
use crate::error::{Error, Result};
use crate::group::{ChatGroup, TcpBroadcaster};
use crate::membership::{HttpMembershipClient, MembershipConfig, MembershipDirectory};
use crate::protocol::MessageType;

pub use table::{tokenize, Command, CommandTable};

/// What the input loop should do after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Everything a command can read or change.
pub struct Session {
    table: CommandTable,
    group: ChatGroup,
    membership: Box<dyn MembershipDirectory>,
    directory: Box<dyn ServiceDirectory>,
    display: Arc<dyn Display>,
    logfile: String,
}

impl Session {
    pub fn new(
        group: ChatGroup,
        membership: Box<dyn MembershipDirectory>,
        directory: Box<dyn ServiceDirectory>,
        display: Arc<dyn Display>,
        logfile: impl Into<String>,
    ) -> Self {
        Self {
            table: CommandTable::new(),
            group,
            membership,
            directory,
            display,
            logfile: logfile.into(),
        }
    }

    /// Build a session talking to the directories named in `settings`.
    pub fn from_settings(
        settings: &Settings,
        display: Arc<dyn Display>,
        logfile: impl Into<String>,
    ) -> Result<Self> {
        let client = settings.http.client()?;
        let me = settings.member.to_member();

        let membership = HttpMembershipClient::new(
            client.clone(),
            MembershipConfig {
                service_url: settings.membership.service_url.clone(),
                self_member: (&me).into(),
            },
        );
        let directory = HttpServiceDirectory::new(client, &settings.services.directory_url);
        let group = ChatGroup::new(me, Box::new(TcpBroadcaster));

        Ok(Self::new(
            group,
            Box::new(membership),
            Box::new(directory),
            display,
            logfile,
        ))
    }

    pub fn group(&self) -> &ChatGroup {
        &self.group
    }

    pub fn group_mut(&mut self) -> &mut ChatGroup {
        &mut self.group
    }

    /// Execute one line of operator input.
    ///
    /// Empty input and unknown commands print the usage text.
    pub async fn execute(&mut self, line: &str) -> Result<Flow> {
        let fields = tokenize(line);
        let Some((name, args)) = fields.split_first() else {
            self.usage();
            return Ok(Flow::Continue);
        };

        tracing::debug!("Command: {:?}", name);
        tracing::debug!("Arguments ({}): {:?}", args.len(), args);

        let Some(command) = self.table.lookup(name) else {
            self.usage();
            return Ok(Flow::Continue);
        };

        tracing::info!("{}", command.tag());
        self.dispatch(command, args).await
    }

    async fn dispatch(&mut self, command: Command, args: &[String]) -> Result<Flow> {
        match command {
            Command::Chat => {
                self.cmd_self(args)?;
                self.cmd_list(args)?;
                self.cmd_message(args)?;
                self.cmd_logfile(args)?;
            }
            Command::SelfMember => self.cmd_self(args)?,
            Command::List => self.cmd_list(args)?,
            Command::Message => self.cmd_message(args)?,
            Command::Logfile => self.cmd_logfile(args)?,
            Command::Gcp => {
                self.cmd_gcpconfig(args)?;
                self.cmd_gcplist(args).await?;
            }
            Command::GcpConfig => self.cmd_gcpconfig(args)?,
            Command::GcpList => self.cmd_gcplist(args).await?,
            Command::GcpReset => self.cmd_gcpreset(args).await,
            Command::GcpSubscribe => self.cmd_gcpsubscribe(args).await,
            Command::GcpUnsubscribe => self.cmd_gcpunsubscribe(args).await,
            Command::Types => self.cmd_types(),
            Command::Services => self.cmd_services(args).await?,
            Command::Service => self.cmd_service(args).await,
            Command::Quit => {
                self.display.quit();
                return Ok(Flow::Quit);
            }
        }
        Ok(Flow::Continue)
    }

    /// Print every command's usage, alphabetically.
    pub fn usage(&self) {
        for line in self.table.usage_lines() {
            self.display.display_text(&line);
        }
    }

    fn cmd_types(&self) {
        let text: String = MessageType::ALL
            .iter()
            .map(|t| {
                let label = format!("{} =", t.name());
                format!("<CMD_TYPES>: {:<22} {}; \n", label, t.ordinal())
            })
            .collect();
        self.display.display_text(&text);
    }

    fn emit(&self, text: &str) {
        self.display.display_text(text);
    }

    /// Emit a recoverable failure.
    fn report(&self, text: String) {
        tracing::warn!("{}", text);
        self.display.display_text(&text);
    }
}

/// Trailing correlation text appended by distributed test harnesses.
fn trailing(args: &[String]) -> String {
    args.join(" ")
}

/// Pretty JSON for internally built values. Failure is fatal.
fn pretty<T: Serialize + ?Sized>(what: &'static str, value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).map_err(|e| Error::serialization(what, e))
}

/// `<TAG>: \n<body>\n<trailing>` block.
fn block(tag: &str, body: &str, last: &str) -> String {
    format!("<{}>: \n{}\n{}", tag, body, last)
}

/// Block with surrounding blank lines removed.
fn trimmed_block(tag: &str, body: &str, last: &str) -> String {
    block(tag, body, last).trim_matches('\n').to_string()
}
