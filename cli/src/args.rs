//! Per-command flag schemas using clap
//!
//! Each registered command parses its own flags with one of these structs.
//! `GlobalArgs` is flattened into all of them.

use std::path::PathBuf;

use clap::{Args, Parser};

/// Flags accepted by every command.
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct GlobalArgs {
    /// Debug level: 0 warn, 1 info, 2 requests, 3 request/response bodies
    #[arg(long, value_name = "LEVEL", default_value_t = 0)]
    pub debug: u8,

    /// Candlepin host name
    #[arg(long)]
    pub host: Option<String>,

    /// Candlepin port
    #[arg(long)]
    pub port: Option<u16>,

    /// Base path of the REST API
    #[arg(long, value_name = "PATH")]
    pub prefix: Option<String>,

    /// Connect over HTTPS
    #[arg(long)]
    pub secure: bool,

    /// PEM client certificate (HTTPS only)
    #[arg(long, value_name = "PEM")]
    pub cert: Option<PathBuf>,

    /// PEM private key for --cert (defaults to the certificate file)
    #[arg(long, value_name = "PEM")]
    pub key: Option<PathBuf>,

    /// Do not verify the server certificate
    #[arg(long)]
    pub insecure: bool,
}

#[derive(Parser, Debug)]
#[command(name = "register", about = "Register a consumer")]
pub struct RegisterArgs {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[arg(long)]
    pub username: String,

    #[arg(long, default_value = "")]
    pub password: String,

    /// Consumer name
    #[arg(long)]
    pub system: String,

    /// Consumer type label
    #[arg(long = "type", default_value = "system")]
    pub consumer_type: String,

    /// Register under this UUID instead of a server-assigned one
    #[arg(long)]
    pub uuid: Option<String>,

    /// Hardware fact, repeatable
    #[arg(long = "fact", value_name = "KEY=VALUE")]
    pub facts: Vec<String>,
}

#[derive(Parser, Debug)]
#[command(name = "unregister", about = "Unregister a consumer")]
pub struct UnregisterArgs {
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Consumer UUID
    #[arg(long)]
    pub consumer: String,
}

#[derive(Parser, Debug)]
#[command(name = "bind", about = "Bind a consumer to a product, pool or registration token")]
pub struct BindArgs {
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Consumer UUID
    #[arg(long)]
    pub consumer: String,

    /// Product label
    #[arg(long)]
    pub product: Option<String>,

    /// Pool id
    #[arg(long)]
    pub pool: Option<String>,

    /// Registration token
    #[arg(long)]
    pub regtoken: Option<String>,
}

#[derive(Parser, Debug)]
#[command(name = "unbind", about = "Remove entitlements from a consumer")]
pub struct UnbindArgs {
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Consumer UUID
    #[arg(long)]
    pub consumer: Option<String>,

    /// Comma separated certificate serial numbers
    #[arg(long, value_name = "S1,S2,...")]
    pub serialnumbers: Option<String>,

    /// Entitlement id
    #[arg(long)]
    pub entitlement: Option<String>,
}

#[derive(Parser, Debug)]
#[command(name = "certificates", about = "Fetch entitlement certificates")]
pub struct CertificatesArgs {
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Consumer UUID
    #[arg(long)]
    pub consumer: String,

    /// Only these comma separated serial numbers
    #[arg(long, value_name = "S1,S2,...")]
    pub serials: Option<String>,
}

#[derive(Parser, Debug)]
#[command(name = "certificates serials", about = "List certificate serial numbers")]
pub struct CertificateSerialsArgs {
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Consumer UUID
    #[arg(long)]
    pub consumer: String,
}

#[derive(Parser, Debug)]
#[command(name = "pools", about = "List entitlement pools")]
pub struct PoolsArgs {
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Only pools available to this consumer UUID
    #[arg(long)]
    pub consumer: Option<String>,

    /// Only pools of this owner
    #[arg(long)]
    pub owner: Option<String>,

    /// Only pools for this product id
    #[arg(long)]
    pub product: Option<String>,
}

#[derive(Parser, Debug)]
#[command(name = "pools show", about = "Show one pool")]
pub struct PoolShowArgs {
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Pool id
    #[arg(long)]
    pub pool: String,
}

#[derive(Parser, Debug)]
#[command(name = "entitlements", about = "List a consumer's entitlements")]
pub struct EntitlementsArgs {
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Consumer UUID
    #[arg(long)]
    pub consumer: String,

    /// Only entitlements for this product id
    #[arg(long)]
    pub product: Option<String>,
}

#[derive(Parser, Debug)]
#[command(name = "products", about = "List products")]
pub struct ProductsArgs {
    #[command(flatten)]
    pub global: GlobalArgs,
}

#[derive(Parser, Debug)]
#[command(name = "subscriptions", about = "List subscriptions")]
pub struct SubscriptionsArgs {
    #[command(flatten)]
    pub global: GlobalArgs,
}

#[derive(Parser, Debug)]
#[command(name = "subscriptions create", about = "Create a subscription from a JSON file")]
pub struct SubscriptionCreateArgs {
    #[command(flatten)]
    pub global: GlobalArgs,

    /// JSON document describing the subscription
    #[arg(long)]
    pub file: PathBuf,
}

#[derive(Parser, Debug)]
#[command(name = "subscriptions delete", about = "Delete a subscription")]
pub struct SubscriptionDeleteArgs {
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subscription id
    #[arg(long)]
    pub id: String,
}

#[derive(Parser, Debug)]
#[command(name = "rules upload", about = "Upload an entitlement rules script")]
pub struct RulesUploadArgs {
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Rules script
    #[arg(long)]
    pub file: PathBuf,
}
