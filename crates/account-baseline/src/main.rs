//! account-baseline: apply the account security baseline to a new AWS account
//!
//! Each subcommand is one handler invocation. The input event is read as JSON
//! from `--event` (a file, or `-` for stdin) and the resulting event is
//! written to stdout.

use account_baseline::aws::{
    AwsConnector, AwsContext, FromAwsContext, S3Client, classify_anyhow_error,
};
use account_baseline::{HandlerSettings, handlers, logging, pipeline};
use account_baseline_common::{BaselineEvent, CreateAccountNotification};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "account-baseline")]
#[command(about = "Security baseline handlers for newly created AWS accounts")]
#[command(version)]
struct Args {
    #[command(subcommand)]
    command: Command,

    #[command(flatten)]
    settings: HandlerSettings,

    /// Input event JSON file, or `-` for stdin
    #[arg(long, global = true, default_value = "-")]
    event: PathBuf,
}

#[derive(Subcommand, Debug, Clone, Copy)]
enum Command {
    /// Validate the account-creation notification and load the configuration
    LoadConfig,
    /// Apply the IAM account password policy
    PasswordPolicy,
    /// Delete default VPCs outside the preserved regions
    DeleteDefaultVpcs,
    /// Block public sharing of EBS snapshots in every region
    EbsBlockPublicAccess,
    /// Set instance metadata defaults in every region
    Imdsv2,
    /// Apply account-wide S3 block public access
    S3BlockPublicAccess,
    /// Run every handler in order, starting from the notification
    Run,
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        print_error(&e);
        std::process::exit(1);
    }
}

/// Print error in a user-friendly way
fn print_error(e: &anyhow::Error) {
    use std::io::Write;

    let mut stderr = std::io::stderr();

    let _ = writeln!(stderr, "\n\x1b[1;31mError:\x1b[0m {e}");

    let mut source = e.source();
    while let Some(cause) = source {
        let _ = writeln!(stderr, "  \x1b[33mCaused by:\x1b[0m {cause}");
        source = cause.source();
    }

    if let Some(suggestion) = classify_anyhow_error(e).suggestion() {
        let _ = writeln!(stderr, "\n\x1b[36mHint:\x1b[0m {suggestion}");
    }
}

fn read_input(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut input = String::new();
        std::io::stdin()
            .read_to_string(&mut input)
            .context("Failed to read event from stdin")?;
        Ok(input)
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read event from {}", path.display()))
    }
}

fn parse_event(input: &str) -> Result<BaselineEvent> {
    serde_json::from_str(input).context("Input is not a baseline event")
}

fn parse_trigger(input: &str) -> Result<CreateAccountNotification> {
    CreateAccountNotification::from_json(input)
        .context("Input is not an account creation notification")
}

async fn run() -> Result<()> {
    let args = Args::parse();
    logging::init()?;

    let settings = args.settings;
    if let Some(profile) = &settings.aws_profile {
        info!(profile = %profile, "Using AWS profile");
    }

    let home = AwsContext::with_profile(&settings.region, settings.aws_profile.as_deref()).await;
    let connector = AwsConnector::new(home.clone(), settings.role_session_name.clone());
    let input = read_input(&args.event)?;

    let output = match args.command {
        Command::LoadConfig => {
            let store = S3Client::from_context(&home);
            handlers::load_config(&parse_trigger(&input)?, &settings, &store, &connector).await?
        }
        Command::Run => {
            let store = S3Client::from_context(&home);
            pipeline::run_baseline(&parse_trigger(&input)?, &settings, &store, &connector).await?
        }
        Command::PasswordPolicy => {
            handlers::password_policy(parse_event(&input)?, &connector).await?
        }
        Command::DeleteDefaultVpcs => {
            handlers::default_vpc(parse_event(&input)?, &connector).await?
        }
        Command::EbsBlockPublicAccess => {
            handlers::ebs_block_public_access(parse_event(&input)?, &connector).await?
        }
        Command::Imdsv2 => handlers::imdsv2(parse_event(&input)?, &connector).await?,
        Command::S3BlockPublicAccess => {
            handlers::s3_block_public_access(parse_event(&input)?, &connector).await?
        }
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
