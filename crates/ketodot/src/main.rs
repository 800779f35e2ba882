use std::process::ExitCode;

use clap::Parser;
use ketodot::cli::Cli;
use ketodot::config::{AppConfig, LogConfig, LogFormat};
use ketodot::error::AppError;
use ketodot::input::Source;
use ketodot::pipeline;
use ketodot::report;
use ketodot::watch::{ChangeWatcher, watch_targets};

use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

fn init_logging(config: &LogConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    // stdout carries the DOT output, so logs go to stderr.
    let registry = tracing_subscriber::registry().with(filter);

    match config.format {
        LogFormat::Json => {
            let fmt_layer = tracing_subscriber::fmt::layer()
                .json()
                .with_writer(std::io::stderr);
            registry.with(fmt_layer).init();
        }
        LogFormat::Pretty => {
            let fmt_layer = tracing_subscriber::fmt::layer()
                .pretty()
                .with_writer(std::io::stderr);
            registry.with(fmt_layer).init();
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match AppConfig::load(&cli) {
        Ok(config) => config,
        Err(e) => {
            // Logging is configured from this file and is not up yet.
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };
    init_logging(&config.log);

    // Failures past this point are reported through `report`.
    let sources = Source::from_args(&cli.files);
    let succeeded = if cli.watch {
        run_watch(&sources, &config)
            .inspect_err(|e| report::watch_failed(e))
            .is_ok()
    } else {
        pipeline::run_and_emit(&sources, &config, &mut std::io::stdout().lock()).is_ok()
    };

    if succeeded {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

/// Regenerates the output on every change; failed runs are reported and
/// watching continues.
fn run_watch(sources: &[Source], config: &AppConfig) -> Result<(), AppError> {
    let targets = watch_targets(sources)?;
    let watcher = ChangeWatcher::new(&targets, config.watch.debounce())?;
    report::watch_started(&targets);

    loop {
        let _ = pipeline::run_and_emit(sources, config, &mut std::io::stdout().lock());
        match watcher.next_change()? {
            Some(path) => report::change_detected(&path),
            None => return Ok(()),
        }
    }
}
