//! url-engine: classify a stream of URLs against wildcard pattern sets.
//!
//! ```text
//! url-engine <posix|self> <config> <url-file> [thread <N>] [debug_enable|calc_time]
//! ```

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use url_engine::catalog::{PatternCatalog, SharedCatalog};
use url_engine::config::load_config;
use url_engine::error::EngineError;
use url_engine::matcher::MatchStrategy;
use url_engine::pipeline::Pipeline;
use url_engine::reload::ReloadCoordinator;

#[derive(Parser, Debug)]
#[command(
    name = "url-engine",
    about = "Match URLs against configured wildcard pattern sets",
    override_usage = "url-engine <posix|self> <config> <url-file> [thread <N>] [debug_enable|calc_time]"
)]
struct Cli {
    /// Matching strategy: `posix` (regex) or `self` (DP matcher).
    #[arg(value_parser = parse_strategy)]
    strategy: MatchStrategy,

    /// Pattern configuration file (TOML).
    config: PathBuf,

    /// File with one URL per line.
    url_file: PathBuf,

    /// Trailing options: `thread <N>`, `debug_enable`, `calc_time`.
    #[arg(trailing_var_arg = true)]
    options: Vec<String>,
}

fn parse_strategy(s: &str) -> Result<MatchStrategy, String> {
    s.parse()
}

#[derive(Debug, Default, PartialEq, Eq)]
struct RunOptions {
    threads: usize,
    debug: bool,
    calc_time: bool,
}

impl RunOptions {
    fn parse(tokens: &[String]) -> Result<Self, String> {
        let mut options = Self {
            threads: 1,
            ..Self::default()
        };
        let mut iter = tokens.iter();
        while let Some(token) = iter.next() {
            match token.as_str() {
                "thread" => {
                    let count = iter
                        .next()
                        .ok_or_else(|| "thread requires a worker count".to_string())?;
                    options.threads = count
                        .parse()
                        .map_err(|_| format!("invalid thread count `{count}`"))?;
                    if options.threads == 0 {
                        return Err("thread count must be at least 1".to_string());
                    }
                }
                "debug_enable" => options.debug = true,
                "calc_time" => options.calc_time = true,
                other => return Err(format!("unknown option `{other}`")),
            }
        }
        Ok(options)
    }
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // Usage errors exit with code 1.
            let _ = e.print();
            return ExitCode::FAILURE;
        }
    };

    let options = match RunOptions::parse(&cli.options) {
        Ok(options) => options,
        Err(message) => {
            eprintln!("{message}");
            eprintln!(
                "Usage: url-engine <posix|self> <config> <url-file> [thread <N>] [debug_enable|calc_time]"
            );
            return ExitCode::FAILURE;
        }
    };

    // Debug tracing goes to stdout and interleaves with the report lines.
    let default_filter = if options.debug {
        "url_engine=debug"
    } else {
        "url_engine=info"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stdout))
        .init();

    match run(cli, options) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("url-engine: {e}");
            ExitCode::FAILURE
        }
    }
}

#[tokio::main]
async fn run(cli: Cli, options: RunOptions) -> Result<(), EngineError> {
    let config = load_config(&cli.config)?;
    let catalog = PatternCatalog::from_config(&config);
    tracing::debug!(sets = catalog.len(), "catalog loaded");
    catalog.trace_contents();
    let shared = SharedCatalog::new(catalog);

    let url_file = tokio::fs::File::open(&cli.url_file)
        .await
        .map_err(|source| EngineError::UrlFile {
            path: cli.url_file.clone(),
            source,
        })?;
    let reader = tokio::io::BufReader::new(url_file);

    let (coordinator, pause_gate) = ReloadCoordinator::new(shared.clone(), cli.config.clone());
    #[cfg(unix)]
    tokio::spawn(coordinator.run());
    #[cfg(not(unix))]
    drop(coordinator);

    let pipeline = Pipeline::new(
        shared,
        cli.strategy,
        options.threads,
        pause_gate,
        std::io::stdout(),
    );

    let start = Instant::now();
    pipeline.run(reader).await?;

    if options.calc_time {
        println!("Time taken is {:.6} sec", start.elapsed().as_secs_f64());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_options_default_to_single_thread() {
        let options = RunOptions::parse(&[]).unwrap();
        assert_eq!(options.threads, 1);
        assert!(!options.debug);
        assert!(!options.calc_time);
    }

    #[test]
    fn test_options_thread_count() {
        let options = RunOptions::parse(&tokens(&["thread", "4"])).unwrap();
        assert_eq!(options.threads, 4);
    }

    #[test]
    fn test_options_flags() {
        let options = RunOptions::parse(&tokens(&["thread", "2", "debug_enable"])).unwrap();
        assert!(options.debug);
        let options = RunOptions::parse(&tokens(&["calc_time"])).unwrap();
        assert!(options.calc_time);
    }

    #[test]
    fn test_options_reject_bad_input() {
        assert!(RunOptions::parse(&tokens(&["thread"])).is_err());
        assert!(RunOptions::parse(&tokens(&["thread", "zero"])).is_err());
        assert!(RunOptions::parse(&tokens(&["thread", "0"])).is_err());
        assert!(RunOptions::parse(&tokens(&["bogus"])).is_err());
    }

    #[test]
    fn test_strategy_names() {
        assert_eq!(parse_strategy("posix").unwrap(), MatchStrategy::Posix);
        assert_eq!(parse_strategy("self").unwrap(), MatchStrategy::SelfMatch);
        assert!(parse_strategy("pcre").is_err());
    }
}
