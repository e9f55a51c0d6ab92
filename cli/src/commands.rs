//! Command kinds, their validated options, and execution.
//!
//! Parsing a command yields a `ParsedCommand`: the global flags plus an
//! immutable `Invocation` whose variants only admit valid option
//! combinations. `execute` consumes the invocation and prints the result.

use std::fs;
use std::io::Write;

use candlepin_core::{CandlepinApi, Credentials, NewConsumer, PoolFilter, Transport};
use clap::Parser;
use serde::Serialize;
use serde_json::Value;
use tracing::info;

use crate::args::*;
use crate::error::{CliError, CliResult};

/// Every command the dispatcher knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    Register,
    Unregister,
    Bind,
    Unbind,
    Certificates,
    CertificateSerials,
    Pools,
    PoolShow,
    Entitlements,
    Products,
    Subscriptions,
    SubscriptionCreate,
    SubscriptionDelete,
    RulesUpload,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindTarget {
    Product(String),
    Pool(String),
    RegToken(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnbindTarget {
    All { consumer: String },
    Serials { consumer: String, serials: Vec<String> },
    Entitlement(String),
}

/// Validated options of one command.
#[derive(Debug, Clone, PartialEq)]
pub enum Invocation {
    Register { credentials: Credentials, consumer: NewConsumer },
    Unregister { consumer: String },
    Bind { consumer: String, target: BindTarget },
    Unbind(UnbindTarget),
    Certificates { consumer: String, serials: Vec<String> },
    CertificateSerials { consumer: String },
    Pools(PoolFilter),
    PoolShow { pool: String },
    Entitlements { consumer: String, product: Option<String> },
    Products,
    Subscriptions,
    SubscriptionCreate { subscription: Value },
    SubscriptionDelete { id: String },
    RulesUpload { rules: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParsedCommand {
    pub global: GlobalArgs,
    pub invocation: Invocation,
}

/// A clap schema that can be turned into an `Invocation`.
trait CommandArgs: Parser {
    fn global(&self) -> &GlobalArgs;
    fn into_invocation(self) -> CliResult<Invocation>;
}

fn parse_with<A: CommandArgs>(argv: Vec<String>) -> CliResult<ParsedCommand> {
    let args = A::try_parse_from(argv)?;
    let global = args.global().clone();
    let invocation = args.into_invocation()?;
    Ok(ParsedCommand { global, invocation })
}

impl CommandKind {
    /// Parse and validate this command's flags. `argv[0]` is used as the
    /// program name in clap's messages.
    pub fn parse(self, argv: Vec<String>) -> CliResult<ParsedCommand> {
        match self {
            CommandKind::Register => parse_with::<RegisterArgs>(argv),
            CommandKind::Unregister => parse_with::<UnregisterArgs>(argv),
            CommandKind::Bind => parse_with::<BindArgs>(argv),
            CommandKind::Unbind => parse_with::<UnbindArgs>(argv),
            CommandKind::Certificates => parse_with::<CertificatesArgs>(argv),
            CommandKind::CertificateSerials => parse_with::<CertificateSerialsArgs>(argv),
            CommandKind::Pools => parse_with::<PoolsArgs>(argv),
            CommandKind::PoolShow => parse_with::<PoolShowArgs>(argv),
            CommandKind::Entitlements => parse_with::<EntitlementsArgs>(argv),
            CommandKind::Products => parse_with::<ProductsArgs>(argv),
            CommandKind::Subscriptions => parse_with::<SubscriptionsArgs>(argv),
            CommandKind::SubscriptionCreate => parse_with::<SubscriptionCreateArgs>(argv),
            CommandKind::SubscriptionDelete => parse_with::<SubscriptionDeleteArgs>(argv),
            CommandKind::RulesUpload => parse_with::<RulesUploadArgs>(argv),
        }
    }
}

/// `"1, 2,,3"` → `["1", "2", "3"]`
fn split_serials(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn read_file(path: &std::path::Path) -> CliResult<String> {
    fs::read_to_string(path).map_err(|e| CliError::InvalidArgs(format!("cannot read {}: {e}", path.display())))
}

impl CommandArgs for RegisterArgs {
    fn global(&self) -> &GlobalArgs {
        &self.global
    }

    fn into_invocation(self) -> CliResult<Invocation> {
        let mut consumer = NewConsumer::new(self.system).with_type(self.consumer_type);
        for fact in &self.facts {
            let (key, value) = fact
                .split_once('=')
                .filter(|(key, _)| !key.is_empty())
                .ok_or_else(|| CliError::InvalidArgs(format!("--fact expects KEY=VALUE, got '{fact}'")))?;
            consumer = consumer.with_fact(key, value);
        }
        if let Some(uuid) = self.uuid {
            consumer = consumer.with_uuid(uuid);
        }
        Ok(Invocation::Register {
            credentials: Credentials::new(self.username, self.password),
            consumer,
        })
    }
}

impl CommandArgs for UnregisterArgs {
    fn global(&self) -> &GlobalArgs {
        &self.global
    }

    fn into_invocation(self) -> CliResult<Invocation> {
        Ok(Invocation::Unregister { consumer: self.consumer })
    }
}

impl CommandArgs for BindArgs {
    fn global(&self) -> &GlobalArgs {
        &self.global
    }

    fn into_invocation(self) -> CliResult<Invocation> {
        let target = match (self.product, self.pool, self.regtoken) {
            (Some(product), None, None) => BindTarget::Product(product),
            (None, Some(pool), None) => BindTarget::Pool(pool),
            (None, None, Some(token)) => BindTarget::RegToken(token),
            _ => {
                return Err(CliError::InvalidArgs(
                    "Need --consumer and exactly one of --product, --pool or --regtoken".to_string(),
                ))
            }
        };
        Ok(Invocation::Bind {
            consumer: self.consumer,
            target,
        })
    }
}

impl CommandArgs for UnbindArgs {
    fn global(&self) -> &GlobalArgs {
        &self.global
    }

    fn into_invocation(self) -> CliResult<Invocation> {
        let target = match (self.consumer, self.serialnumbers, self.entitlement) {
            (_, None, Some(id)) => UnbindTarget::Entitlement(id),
            (Some(consumer), Some(raw), None) => {
                let serials = split_serials(&raw);
                if serials.is_empty() {
                    return Err(CliError::InvalidArgs("--serialnumbers needs at least one serial".to_string()));
                }
                UnbindTarget::Serials { consumer, serials }
            }
            (Some(consumer), None, None) => UnbindTarget::All { consumer },
            (_, Some(_), Some(_)) => {
                return Err(CliError::InvalidArgs(
                    "--entitlement and --serialnumbers are mutually exclusive".to_string(),
                ))
            }
            (None, _, None) => return Err(CliError::InvalidArgs("Need --consumer or --entitlement".to_string())),
        };
        Ok(Invocation::Unbind(target))
    }
}

impl CommandArgs for CertificatesArgs {
    fn global(&self) -> &GlobalArgs {
        &self.global
    }

    fn into_invocation(self) -> CliResult<Invocation> {
        Ok(Invocation::Certificates {
            consumer: self.consumer,
            serials: self.serials.as_deref().map(split_serials).unwrap_or_default(),
        })
    }
}

impl CommandArgs for CertificateSerialsArgs {
    fn global(&self) -> &GlobalArgs {
        &self.global
    }

    fn into_invocation(self) -> CliResult<Invocation> {
        Ok(Invocation::CertificateSerials { consumer: self.consumer })
    }
}

impl CommandArgs for PoolsArgs {
    fn global(&self) -> &GlobalArgs {
        &self.global
    }

    fn into_invocation(self) -> CliResult<Invocation> {
        Ok(Invocation::Pools(PoolFilter {
            consumer: self.consumer,
            owner: self.owner,
            product: self.product,
        }))
    }
}

impl CommandArgs for PoolShowArgs {
    fn global(&self) -> &GlobalArgs {
        &self.global
    }

    fn into_invocation(self) -> CliResult<Invocation> {
        Ok(Invocation::PoolShow { pool: self.pool })
    }
}

impl CommandArgs for EntitlementsArgs {
    fn global(&self) -> &GlobalArgs {
        &self.global
    }

    fn into_invocation(self) -> CliResult<Invocation> {
        Ok(Invocation::Entitlements {
            consumer: self.consumer,
            product: self.product,
        })
    }
}

impl CommandArgs for ProductsArgs {
    fn global(&self) -> &GlobalArgs {
        &self.global
    }

    fn into_invocation(self) -> CliResult<Invocation> {
        Ok(Invocation::Products)
    }
}

impl CommandArgs for SubscriptionsArgs {
    fn global(&self) -> &GlobalArgs {
        &self.global
    }

    fn into_invocation(self) -> CliResult<Invocation> {
        Ok(Invocation::Subscriptions)
    }
}

impl CommandArgs for SubscriptionCreateArgs {
    fn global(&self) -> &GlobalArgs {
        &self.global
    }

    fn into_invocation(self) -> CliResult<Invocation> {
        let raw = read_file(&self.file)?;
        let subscription = serde_json::from_str(&raw)
            .map_err(|e| CliError::InvalidArgs(format!("{} is not valid JSON: {e}", self.file.display())))?;
        Ok(Invocation::SubscriptionCreate { subscription })
    }
}

impl CommandArgs for SubscriptionDeleteArgs {
    fn global(&self) -> &GlobalArgs {
        &self.global
    }

    fn into_invocation(self) -> CliResult<Invocation> {
        Ok(Invocation::SubscriptionDelete { id: self.id })
    }
}

impl CommandArgs for RulesUploadArgs {
    fn global(&self) -> &GlobalArgs {
        &self.global
    }

    fn into_invocation(self) -> CliResult<Invocation> {
        Ok(Invocation::RulesUpload {
            rules: read_file(&self.file)?,
        })
    }
}

fn emit<W: Write, S: Serialize + ?Sized>(out: &mut W, value: &S) -> CliResult<()> {
    writeln!(out, "{}", serde_json::to_string_pretty(value)?)?;
    Ok(())
}

/// Run one invocation against the binding and print its result as JSON.
pub fn execute<T: Transport, W: Write>(invocation: Invocation, api: &CandlepinApi<T>, out: &mut W) -> CliResult<()> {
    match invocation {
        Invocation::Register { credentials, consumer } => {
            let registered = api.register_consumer(&credentials, &consumer)?;
            info!(uuid = %registered.uuid, "consumer registered");
            emit(out, &registered)
        }
        Invocation::Unregister { consumer } => emit(out, &api.unregister_consumer(&consumer)?),
        Invocation::Bind { consumer, target } => {
            let entitlements = match target {
                BindTarget::Product(product) => api.bind_product(&consumer, &product)?,
                BindTarget::Pool(pool) => api.bind_pool(&consumer, &pool)?,
                BindTarget::RegToken(token) => api.bind_regtoken(&consumer, &token)?,
            };
            emit(out, &entitlements)
        }
        Invocation::Unbind(target) => {
            let result = match target {
                UnbindTarget::All { consumer } => api.unbind_all(&consumer)?,
                UnbindTarget::Serials { consumer, serials } => api.unbind_by_serial_numbers(&consumer, &serials)?,
                UnbindTarget::Entitlement(id) => api.unbind_entitlement(&id)?,
            };
            emit(out, &result)
        }
        Invocation::Certificates { consumer, serials } => emit(out, &api.get_certificates(&consumer, &serials)?),
        Invocation::CertificateSerials { consumer } => emit(out, &api.get_certificate_serials(&consumer)?),
        Invocation::Pools(filter) => emit(out, &api.get_pools(&filter)?),
        Invocation::PoolShow { pool } => emit(out, &api.get_pool(&pool)?),
        Invocation::Entitlements { consumer, product } => {
            emit(out, &api.get_entitlements(&consumer, product.as_deref())?)
        }
        Invocation::Products => emit(out, &api.get_products()?),
        Invocation::Subscriptions => emit(out, &api.get_subscriptions()?),
        Invocation::SubscriptionCreate { subscription } => emit(out, &api.create_subscription(&subscription)?),
        Invocation::SubscriptionDelete { id } => emit(out, &api.delete_subscription(&id)?),
        Invocation::RulesUpload { rules } => emit(out, &api.upload_rules(&rules)?),
    }
}
