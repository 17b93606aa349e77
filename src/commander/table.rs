//! Command table: names, usage strings and the sorted usage order.

use std::collections::HashMap;

/// Every command the interpreter understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    Chat,
    SelfMember,
    List,
    Message,
    Logfile,
    Gcp,
    GcpConfig,
    GcpList,
    GcpReset,
    GcpSubscribe,
    GcpUnsubscribe,
    Types,
    Services,
    Service,
    Quit,
}

impl Command {
    pub const ALL: [Command; 15] = [
        Command::Chat,
        Command::SelfMember,
        Command::List,
        Command::Message,
        Command::Logfile,
        Command::Gcp,
        Command::GcpConfig,
        Command::GcpList,
        Command::GcpReset,
        Command::GcpSubscribe,
        Command::GcpUnsubscribe,
        Command::Types,
        Command::Services,
        Command::Service,
        Command::Quit,
    ];

    /// Name typed by the operator.
    pub fn name(self) -> &'static str {
        match self {
            Command::Chat => "chat",
            Command::SelfMember => "self",
            Command::List => "list",
            Command::Message => "message",
            Command::Logfile => "logfile",
            Command::Gcp => "gcp",
            Command::GcpConfig => "gcpconfig",
            Command::GcpList => "gcplist",
            Command::GcpReset => "gcpreset",
            Command::GcpSubscribe => "gcpsubscribe",
            Command::GcpUnsubscribe => "gcpunsubscribe",
            Command::Types => "types",
            Command::Services => "services",
            Command::Service => "service",
            Command::Quit => "quit",
        }
    }

    /// Log tag, e.g. `CMD_GCP_SUBSCRIBE`.
    pub fn tag(self) -> &'static str {
        match self {
            Command::Chat => "CMD_CHAT",
            Command::SelfMember => "CMD_SELF",
            Command::List => "CMD_LIST",
            Command::Message => "CMD_MESSAGE",
            Command::Logfile => "CMD_LOGFILE",
            Command::Gcp => "CMD_GCP",
            Command::GcpConfig => "CMD_GCP_CONFIG",
            Command::GcpList => "CMD_GCP_LIST",
            Command::GcpReset => "CMD_GCP_RESET",
            Command::GcpSubscribe => "CMD_GCP_SUBSCRIBE",
            Command::GcpUnsubscribe => "CMD_GCP_UNSUBSCRIBE",
            Command::Types => "CMD_TYPES",
            Command::Services => "CMD_SERVICES",
            Command::Service => "CMD_SERVICE",
            Command::Quit => "CMD_QUIT",
        }
    }

    fn usage(self) -> &'static str {
        match self {
            Command::Chat => "\\chat",
            Command::SelfMember => "\\self",
            Command::List => "\\list",
            Command::Message => "\\message",
            Command::Logfile => "\\logfile",
            Command::Gcp => "\\gcp",
            Command::GcpConfig => "\\gcpconfig",
            Command::GcpList => "\\gcplist",
            Command::GcpReset => "\\gcpreset",
            Command::GcpSubscribe => "\\gcpsubscribe",
            Command::GcpUnsubscribe => "\\gcpunsubscribe",
            Command::Types => "\\types",
            Command::Services => "\\services",
            Command::Service => "\\service <name> [args...]",
            Command::Quit => "\\quit",
        }
    }
}

/// Name to command lookup plus usage text, built once at startup.
#[derive(Debug, Clone)]
pub struct CommandTable {
    commands: HashMap<&'static str, Command>,
    keys: Vec<&'static str>,
}

impl CommandTable {
    pub fn new() -> Self {
        let commands: HashMap<_, _> = Command::ALL.iter().map(|c| (c.name(), *c)).collect();

        let mut keys: Vec<&'static str> = commands.keys().copied().collect();
        keys.sort_unstable();

        tracing::debug!("Command table keys: {:?}", keys);
        Self { commands, keys }
    }

    /// Case-sensitive lookup.
    pub fn lookup(&self, name: &str) -> Option<Command> {
        self.commands.get(name).copied()
    }

    /// Command names in alphabetical order.
    pub fn keys(&self) -> &[&'static str] {
        &self.keys
    }

    /// One `<CMD USAGE>` line per command, alphabetical.
    pub fn usage_lines(&self) -> impl Iterator<Item = String> + '_ {
        self.keys
            .iter()
            .filter_map(|key| self.commands.get(key))
            .map(|cmd| format!("<CMD USAGE>: {}", cmd.usage()))
    }
}

impl Default for CommandTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Split a raw input line into command and arguments.
///
/// Escape characters are trimmed from both ends of the line before splitting
/// on whitespace.
pub fn tokenize(line: &str) -> Vec<String> {
    line.trim_matches('\\')
        .split_whitespace()
        .map(str::to_string)
        .collect()
}
