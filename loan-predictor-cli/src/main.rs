mod cli;
mod interactive;

use std::io::{self, Write};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use loan_flow::{Field, FieldKind, FormState, HttpPredictionClient, Outcome, SubmissionRunner};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::{Cli, Command, build_form};

/// Initialize tracing based on environment variables.
/// Logs go to stderr so they never interleave with the form on stdout.
fn init_tracing() {
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string());
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "loan_flow=warn,loan_predictor=warn".into());

    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_target(true)
                        .with_level(true)
                        .with_writer(io::stderr),
                )
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .pretty()
                        .with_writer(io::stderr),
                )
                .init();
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Some(Command::Fields) => print_fields(&mut io::stdout().lock()),
        None | Some(Command::Interactive) => {
            let runner = build_runner(&cli)?;
            let stdin = io::stdin();
            interactive::run(&runner, &mut stdin.lock(), &mut io::stdout()).await
        }
        Some(Command::Submit {
            ref from_json,
            ref fields,
        }) => {
            let form = build_form(from_json.as_ref(), fields)?;
            let runner = build_runner(&cli)?;
            submit_once(&runner, &form, &mut io::stdout()).await?;
            Ok(())
        }
    }
}

fn build_runner(cli: &Cli) -> Result<SubmissionRunner> {
    let config = cli.client_config().context("invalid client configuration")?;
    info!(endpoint = %config.endpoint, timeout = ?config.timeout, "using prediction service");
    let client = HttpPredictionClient::new(config).context("failed to build HTTP client")?;
    Ok(SubmissionRunner::new(Arc::new(client)))
}

/// One-shot submission; an incomplete form never reaches the service.
async fn submit_once<W: Write>(
    runner: &SubmissionRunner,
    form: &FormState,
    out: &mut W,
) -> Result<Outcome> {
    form.ensure_complete()?;
    for (field, value) in form.iter() {
        runner.set(field, value).await;
    }
    let outcome = interactive::submit_and_show(runner, out).await?;
    if let Outcome::Message(message) = &outcome {
        info!(message = %message, "prediction service returned a message");
    }
    Ok(outcome)
}

fn print_fields<W: Write>(out: &mut W) -> Result<()> {
    for field in Field::FORM_ORDER {
        match field.kind() {
            FieldKind::Choice(options) => writeln!(out, "{field:<18} one of: {}", options.join(", "))?,
            FieldKind::Number { placeholder } => writeln!(out, "{field:<18} number: {placeholder}")?,
        }
    }
    Ok(())
}
