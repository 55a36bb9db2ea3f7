//! Tracing setup for the handler binary
//!
//! Logs go to stderr so stdout carries only the resulting event.

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::{Directive, LevelFilter};

/// SDK targets kept at `warn` regardless of the configured level
const QUIET_TARGETS: &[&str] = &[
    "aws_config",
    "aws_sdk_ec2",
    "aws_sdk_iam",
    "aws_sdk_s3",
    "aws_sdk_s3control",
    "aws_sdk_sts",
    "aws_smithy_runtime",
    "aws_smithy_runtime_api",
    "aws_smithy_http",
    "hyper",
    "hyper_util",
];

/// Map a `LOG_LEVEL` value onto a tracing level; unknown values give `info`.
pub fn level_from_name(name: Option<&str>) -> LevelFilter {
    match name.map(|n| n.trim().to_ascii_uppercase()).as_deref() {
        Some("TRACE") => LevelFilter::TRACE,
        Some("DEBUG") => LevelFilter::DEBUG,
        Some("WARN" | "WARNING") => LevelFilter::WARN,
        Some("ERROR" | "CRITICAL") => LevelFilter::ERROR,
        _ => LevelFilter::INFO,
    }
}

/// Build the filter: `RUST_LOG` if set, else `log_level`, with SDK targets clamped.
pub fn env_filter(log_level: Option<&str>) -> Result<EnvFilter> {
    let mut filter = match std::env::var("RUST_LOG") {
        Ok(spec) if !spec.trim().is_empty() => {
            EnvFilter::try_new(&spec).with_context(|| format!("Invalid RUST_LOG '{spec}'"))?
        }
        _ => EnvFilter::default().add_directive(level_from_name(log_level).into()),
    };

    for target in QUIET_TARGETS {
        let directive = format!("{target}=warn")
            .parse::<Directive>()
            .with_context(|| format!("Invalid log directive for {target}"))?;
        filter = filter.add_directive(directive);
    }
    Ok(filter)
}

/// Install the global subscriber
pub fn init() -> Result<()> {
    let log_level = std::env::var("LOG_LEVEL").ok();
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(log_level.as_deref())?)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}
