//! Command-line bot check.
//!
//! Classifies each User-Agent given on the command line.

use anyhow::{bail, Context, Result};
use clap::Parser;
use isbot::{Classifier, ClassifierConfig, Reason};
use serde::Serialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "isbot")]
#[command(author, version, about = "Check if HTTP requests look like bots")]
struct Args {
    /// User-Agent strings to classify
    #[arg(required = true)]
    user_agents: Vec<String>,

    /// Remote address of the request
    #[arg(long, default_value = "")]
    ip: String,

    /// Request header as "Name: value"; may be repeated
    #[arg(short = 'H', long = "header")]
    headers: Vec<String>,

    /// Path to configuration file (JSON or YAML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print one JSON object per User-Agent
    #[arg(long)]
    json: bool,

    /// Enable JSON logging format
    #[arg(long)]
    json_logs: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    log_level: String,
}

#[derive(Serialize)]
struct Output<'a> {
    user_agent: &'a str,
    code: Reason,
    reason: &'static str,
    is_bot: bool,
}

fn init_logging(json: bool, level: &str) {
    let level = match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::WARN,
    };

    let env_filter = EnvFilter::from_default_env().add_directive(level.into());

    // Logs go to stderr so stdout stays parseable.
    if json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn load_config(path: &Path) -> Result<ClassifierConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    let config = if path.extension().is_some_and(|e| e == "yaml" || e == "yml") {
        serde_yaml::from_str(&content)?
    } else {
        serde_json::from_str(&content)?
    };
    Ok(config)
}

fn parse_headers(raw: &[String]) -> Result<HashMap<String, Vec<String>>> {
    let mut headers: HashMap<String, Vec<String>> = HashMap::new();
    for line in raw {
        let Some((name, value)) = line.split_once(':') else {
            bail!("header {line:?} is not in \"Name: value\" form");
        };
        headers
            .entry(name.trim().to_string())
            .or_default()
            .push(value.trim().to_string());
    }
    Ok(headers)
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(args.json_logs, &args.log_level);

    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => ClassifierConfig::default(),
    };
    let classifier = Classifier::new(config)?;
    let headers = parse_headers(&args.headers)?;
    debug!(headers = headers.len(), ip = %args.ip, "Classifying");

    for ua in &args.user_agents {
        let reason = classifier.classify_request(&headers, &args.ip, ua);
        let is_bot = isbot::is_bot(reason);
        if args.json {
            let output = Output {
                user_agent: ua,
                code: reason,
                reason: reason.as_str(),
                is_bot,
            };
            println!("{}", serde_json::to_string(&output)?);
        } else {
            println!("{is_bot} ({reason}) <- {ua}");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_headers() {
        let headers = parse_headers(&[
            "Purpose: preview".to_string(),
            "X-Moz:prefetch".to_string(),
            "Purpose: prefetch".to_string(),
        ])
        .unwrap();
        assert_eq!(headers["Purpose"], vec!["preview", "prefetch"]);
        assert_eq!(headers["X-Moz"], vec!["prefetch"]);
    }

    #[test]
    fn test_parse_headers_rejects_missing_colon() {
        assert!(parse_headers(&["Purpose preview".to_string()]).is_err());
    }

    #[test]
    fn test_args() {
        let args = Args::parse_from(["isbot", "--ip", "35.180.1.1", "-H", "X-Moz: prefetch", "ua"]);
        assert_eq!(args.ip, "35.180.1.1");
        assert_eq!(args.headers, vec!["X-Moz: prefetch"]);
        assert_eq!(args.user_agents, vec!["ua"]);
        assert!(!args.json);
    }
}
