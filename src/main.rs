//! Repair Desk CLI

use std::{
    io::{self, Write},
    process::ExitCode,
};

use thiserror::Error;
use tracing::{error, info};

use repair_desk::{
    config::{DeskCommand, DeskConfig},
    desk::ServiceDesk,
    details::OrderDetails,
    fixtures::{Fixture, FixtureError},
    observability,
    pricing::PriceError,
    render::{self, RenderError},
    script::{Script, ScriptError},
    sequence::OrderNumber,
};

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Currency(#[from] PriceError),

    #[error(transparent)]
    Fixture(#[from] FixtureError),

    #[error(transparent)]
    Script(#[from] ScriptError),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error("failed to write output: {0}")]
    Io(#[from] io::Error),

    #[error("no order numbered {0}")]
    UnknownOrder(OrderNumber),
}

/// Repair Desk entry point
pub fn main() -> ExitCode {
    let config = match DeskConfig::load() {
        Ok(config) => config,
        Err(error) => {
            _ = error.print();

            return if error.use_stderr() {
                ExitCode::from(2)
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    if let Err(error) = observability::init_subscriber(&config.logging) {
        #[expect(
            clippy::print_stderr,
            reason = "logging not initialized, must use eprintln for setup errors"
        )]
        {
            eprintln!("{error}");
        }

        return ExitCode::FAILURE;
    }

    match run(config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "repair desk failed");

            #[expect(
                clippy::print_stderr,
                reason = "the error must reach the user whatever the log level"
            )]
            {
                eprintln!("{err}");
            }

            ExitCode::FAILURE
        }
    }
}

fn run(config: DeskConfig) -> Result<(), CliError> {
    let settings = config.settings()?;
    let currency = settings.currency;
    let mut desk = ServiceDesk::new(settings);

    if !config.no_sample {
        let fixture = match &config.fixture {
            Some(path) => Fixture::from_path(path, currency)?,
            None => Fixture::sample(currency)?,
        };

        fixture.load_into(&mut desk);
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match config.command {
        DeskCommand::List { search } => {
            render::write_order_table(&mut out, &desk.rows(&search))?;
        }
        DeskCommand::View { number } => {
            let number = OrderNumber::from(number.as_str());
            let order = desk
                .find_by_number(&number)
                .ok_or_else(|| CliError::UnknownOrder(number.clone()))?;

            writeln!(out, "{}", OrderDetails::new(order))?;
        }
        DeskCommand::Run { script } => {
            let report = Script::from_path(&script)?.run(&mut desk, &mut out)?;

            info!(
                script = %script.display(),
                applied = report.applied,
                failed = report.failed,
                "script finished"
            );

            writeln!(
                out,
                "{} steps applied, {} rejected",
                report.applied, report.failed
            )?;
        }
    }

    Ok(())
}
