use std::io::{self, Write};
use std::process;

use candlepin_cli::error::FAILURE;
use candlepin_cli::{CliError, Dispatcher, Settings};
use colored::Colorize;

fn main() {
    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("{}", format!("Error: configuration: {e}").red());
            process::exit(FAILURE);
        }
    };

    let argv: Vec<String> = std::env::args().collect();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if let Err(e) = Dispatcher::new(settings).run(&argv, &mut out) {
        let _ = out.flush();
        report(e);
    }
}

fn report(e: CliError) -> ! {
    match e {
        CliError::Args(e) => e.exit(),
        CliError::Usage(text) | CliError::InvalidArgs(text) => {
            println!("{text}");
            process::exit(FAILURE);
        }
        CliError::Api(e) => {
            eprintln!("{}", format!("Error: {e}").red());
            if let Some(response) = e.response().filter(|r| !r.body.is_empty()) {
                eprintln!("{}", response.body);
            }
            process::exit(FAILURE);
        }
        other => {
            eprintln!("{}", format!("Error: {other}").red());
            process::exit(other.exit_code());
        }
    }
}

#[cfg(test)]
mod tests {
    use candlepin_cli::args::*;
    use clap::CommandFactory;

    // https://docs.rs/clap/latest/clap/_derive/_tutorial/index.html#testing
    #[test]
    fn verify_cli() {
        RegisterArgs::command().debug_assert();
        UnregisterArgs::command().debug_assert();
        BindArgs::command().debug_assert();
        UnbindArgs::command().debug_assert();
        CertificatesArgs::command().debug_assert();
        CertificateSerialsArgs::command().debug_assert();
        PoolsArgs::command().debug_assert();
        PoolShowArgs::command().debug_assert();
        EntitlementsArgs::command().debug_assert();
        ProductsArgs::command().debug_assert();
        SubscriptionsArgs::command().debug_assert();
        SubscriptionCreateArgs::command().debug_assert();
        SubscriptionDeleteArgs::command().debug_assert();
        RulesUploadArgs::command().debug_assert();
    }
}
