use std::process::ExitCode;

use anyhow::Context;
use tracing::debug;

use viscogroups::{Analyzer, Settings};

mod cli;
mod logging;
mod output;

fn run(cli: &cli::Cli) -> anyhow::Result<()> {
    let mut settings = Settings::default();
    if let Some(path) = &cli.config {
        settings = Settings::from_path(path)
            .with_context(|| format!("failed to load settings from {}", path.display()))?;
    }
    let settings = settings.merge(cli.overrides());
    debug!(?settings, "effective settings");

    let analyzer = Analyzer::from_settings(&settings).context("failed to set up the analyzer")?;
    let report = analyzer
        .analyze(&cli.input)
        .with_context(|| format!("failed to classify '{}'", cli.input))?;
    output::print_report(&report).context("failed to write the report")?;
    Ok(())
}

fn main() -> ExitCode {
    let cli = cli::parse();
    logging::setup_logging(cli.debug, cli.quiet);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::print_error(&e);
            ExitCode::FAILURE
        }
    }
}
