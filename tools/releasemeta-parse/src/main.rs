//! Release Name Parser
//!
//! Parses release or file names given as arguments, or one per line on
//! stdin, and prints one JSON record per input.

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use releasemeta_core::{MetaInfo, ParserConfig, TitleParser};
use serde::Serialize;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use tracing::{Level, debug, info};

/// CLI arguments
#[derive(Parser, Debug)]
#[command(name = "releasemeta-parse")]
#[command(about = "Extract media metadata from release and file names")]
#[command(version)]
struct Cli {
    /// Names to parse; read from stdin, one per line, when omitted
    titles: Vec<String>,

    /// Subtitle / description applied to every input
    #[arg(short, long)]
    subtitle: Option<String>,

    /// Treat inputs as file names (a known media extension is dropped)
    #[arg(short, long)]
    file: bool,

    /// Parser configuration (JSON)
    #[arg(short, long, env = "RELEASEMETA_CONFIG")]
    config: Option<PathBuf>,

    /// Pretty-print each record
    #[arg(short, long)]
    pretty: bool,

    /// Log verbosity on stderr (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

/// One output line.
#[derive(Debug, Serialize)]
struct ParseOutput<'a> {
    name: &'a str,
    season_episode: Option<String>,
    resource_term: Option<String>,
    #[serde(flatten)]
    meta: &'a MetaInfo,
}

impl<'a> ParseOutput<'a> {
    fn new(meta: &'a MetaInfo) -> Self {
        Self {
            name: meta.name(),
            season_episode: meta.season_episode_label(),
            resource_term: meta.resource_term(),
            meta,
        }
    }
}

fn log_level(verbose: u8) -> Level {
    match verbose {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

fn load_config(path: Option<&Path>) -> Result<ParserConfig> {
    let Some(path) = path else {
        return Ok(ParserConfig::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    ParserConfig::from_json(&text)
        .with_context(|| format!("Invalid parser config {}", path.display()))
}

fn emit(out: &mut impl Write, meta: &MetaInfo, pretty: bool) -> Result<()> {
    let output = ParseOutput::new(meta);
    if pretty {
        serde_json::to_writer_pretty(&mut *out, &output)?;
    } else {
        serde_json::to_writer(&mut *out, &output)?;
    }
    writeln!(out)?;
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(log_level(cli.verbose))
        .with_writer(io::stderr)
        .init();

    let config = load_config(cli.config.as_deref())?;
    let parser = TitleParser::new(config).context("Failed to build parser")?;
    debug!(config = ?parser.config(), "parser ready");

    let subtitle = cli.subtitle.as_deref();
    let parse = |line: &str| {
        if cli.file {
            parser.parse_file(line, subtitle)
        } else {
            parser.parse(line, subtitle, false)
        }
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut count = 0usize;

    if cli.titles.is_empty() {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let line = line.context("Failed to read stdin")?;
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            emit(&mut out, &parse(line), cli.pretty)?;
            count += 1;
        }
    } else {
        for title in &cli.titles {
            emit(&mut out, &parse(title), cli.pretty)?;
            count += 1;
        }
    }

    info!(count, "done");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_arguments() {
        let cli = Cli::try_parse_from([
            "releasemeta-parse",
            "-f",
            "-vv",
            "--subtitle",
            "第1季",
            "Show.S01E01.mkv",
        ])
        .unwrap();
        assert!(cli.file);
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.subtitle.as_deref(), Some("第1季"));
        assert_eq!(cli.titles, ["Show.S01E01.mkv"]);
        assert_eq!(log_level(cli.verbose), Level::TRACE);
    }

    #[test]
    fn missing_config_file_is_an_error() {
        let err = load_config(Some(Path::new("/nonexistent/releasemeta.json"))).unwrap_err();
        assert!(err.to_string().contains("Failed to read config"));
        assert!(load_config(None).is_ok());
    }

    #[test]
    fn output_carries_derived_fields() {
        let meta = releasemeta_core::parse("Friends.S01E02.1080p.BluRay.x264-GROUP");
        let mut buf = Vec::new();
        emit(&mut buf, &meta, false).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value["name"], "Friends");
        assert_eq!(value["season_episode"], "S01 E02");
        assert_eq!(value["resource_term"], "BluRay 1080p");
        assert_eq!(value["org_string"], "Friends.S01E02.1080p.BluRay.x264-GROUP");
    }
}
