//! Command registry and best-match resolution.
//!
//! A command name may span several words (`pools show`). Resolution takes
//! the non-flag arguments in order and looks up the longest space-joined
//! prefix of them that is registered.

use std::collections::BTreeMap;
use std::io::Write;

use candlepin_core::CandlepinApi;
use tracing::debug;

use crate::commands::{self, CommandKind, ParsedCommand};
use crate::error::{CliError, CliResult};
use crate::logging;
use crate::settings::Settings;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandEntry {
    pub name: &'static str,
    pub shortdesc: &'static str,
    pub kind: CommandKind,
}

#[derive(Debug, Clone, Default)]
pub struct Registry {
    commands: BTreeMap<&'static str, CommandEntry>,
}

const BUILTIN: &[(&str, &str, CommandKind)] = &[
    ("register", "Register a consumer", CommandKind::Register),
    ("unregister", "Unregister a consumer", CommandKind::Unregister),
    ("bind", "Bind a consumer to a product, pool or token", CommandKind::Bind),
    ("unbind", "Remove entitlements from a consumer", CommandKind::Unbind),
    ("certificates", "Fetch entitlement certificates", CommandKind::Certificates),
    ("certificates serials", "List certificate serial numbers", CommandKind::CertificateSerials),
    ("pools", "List entitlement pools", CommandKind::Pools),
    ("pools show", "Show one pool", CommandKind::PoolShow),
    ("entitlements", "List a consumer's entitlements", CommandKind::Entitlements),
    ("products", "List products", CommandKind::Products),
    ("subscriptions", "List subscriptions", CommandKind::Subscriptions),
    ("subscriptions create", "Create a subscription", CommandKind::SubscriptionCreate),
    ("subscriptions delete", "Delete a subscription", CommandKind::SubscriptionDelete),
    ("rules upload", "Upload an entitlement rules script", CommandKind::RulesUpload),
];

impl Registry {
    /// Registry holding every command the binary ships with.
    pub fn builtin() -> Self {
        let mut registry = Self::default();
        for &(name, shortdesc, kind) in BUILTIN {
            registry.register(CommandEntry { name, shortdesc, kind });
        }
        registry
    }

    /// Adds `entry`, replacing any command with the same name.
    pub fn register(&mut self, entry: CommandEntry) {
        self.commands.insert(entry.name, entry);
    }

    pub fn get(&self, name: &str) -> Option<&CommandEntry> {
        self.commands.get(name)
    }

    pub fn entries(&self) -> impl Iterator<Item = &CommandEntry> {
        self.commands.values()
    }

    /// Longest registered prefix of the non-flag arguments after `argv[0]`.
    pub fn find_best_match<S: AsRef<str>>(&self, argv: &[S]) -> Option<&CommandEntry> {
        let mut tokens: Vec<&str> = argv
            .iter()
            .skip(1)
            .map(AsRef::as_ref)
            .filter(|arg| !arg.starts_with('-'))
            .collect();

        while !tokens.is_empty() {
            if let Some(entry) = self.get(&tokens.join(" ")) {
                return Some(entry);
            }
            tokens.pop();
        }
        None
    }

    /// Header line followed by every command and its description.
    pub fn usage(&self, program: &str) -> String {
        let width = self.commands.keys().map(|name| name.len()).max().unwrap_or(0);
        let mut text = format!("Usage: {program} <command> [options]\n\nCommands:\n");
        for entry in self.entries() {
            text.push_str(&format!("  {:<width$}  {}\n", entry.name, entry.shortdesc));
        }
        text
    }
}

/// Argument vector handed to the command's own parser: the resolved
/// command words are dropped and `argv[0]` becomes `"<program> <name>"`.
pub fn command_argv<S: AsRef<str>>(argv: &[S], name: &str) -> Vec<String> {
    let program = argv.first().map(AsRef::as_ref).unwrap_or("candlepin");
    let mut to_skip = name.split(' ').count();

    let mut out = vec![format!("{program} {name}")];
    for arg in argv.iter().skip(1).map(AsRef::as_ref) {
        if to_skip > 0 && !arg.starts_with('-') {
            to_skip -= 1;
            continue;
        }
        out.push(arg.to_string());
    }
    out
}

/// Resolves, parses and runs one command line.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    registry: Registry,
    settings: Settings,
}

impl Dispatcher {
    pub fn new(settings: Settings) -> Self {
        Self::with_registry(Registry::builtin(), settings)
    }

    pub fn with_registry(registry: Registry, settings: Settings) -> Self {
        Self { registry, settings }
    }

    /// Resolve `argv` to a command and parse its flags.
    pub fn parse<S: AsRef<str>>(&self, argv: &[S]) -> CliResult<ParsedCommand> {
        let program = argv.first().map(AsRef::as_ref).unwrap_or("candlepin");
        let entry = self
            .registry
            .find_best_match(argv)
            .ok_or_else(|| CliError::Usage(self.registry.usage(program)))?;
        entry.kind.parse(command_argv(argv, entry.name))
    }

    pub fn run<S: AsRef<str>, W: Write>(&self, argv: &[S], out: &mut W) -> CliResult<()> {
        let ParsedCommand { global, invocation } = self.parse(argv)?;
        logging::init(global.debug);

        let endpoint = self.settings.clone().with_overrides(&global).endpoint();
        debug!(url = %endpoint.base_url(), "using endpoint");
        let api = CandlepinApi::connect(endpoint)?;
        commands::execute(invocation, &api, out)
    }
}
