use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use loan_flow::{ClientConfig, Field, FormState};

#[derive(Debug, Parser)]
#[command(
    name = "loan-predictor",
    version,
    about = "Fill in a loan application and ask the prediction service whether it would be approved"
)]
pub struct Cli {
    /// Prediction endpoint (overrides LOAN_PREDICTOR_URL)
    #[arg(long, global = true)]
    pub endpoint: Option<String>,

    /// Request timeout in seconds (overrides LOAN_PREDICTOR_TIMEOUT_SECS)
    #[arg(long, global = true)]
    pub timeout_secs: Option<u64>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Walk through the form field by field (default)
    Interactive,
    /// Submit a complete application once and print the outcome
    Submit {
        /// JSON object with field values to start from
        #[arg(long)]
        from_json: Option<PathBuf>,
        /// Field value as NAME=VALUE, e.g. --field Gender=Male (repeatable)
        #[arg(long = "field", value_parser = parse_assignment)]
        fields: Vec<(Field, String)>,
    },
    /// List the form fields and their accepted values
    Fields,
}

fn parse_assignment(raw: &str) -> Result<(Field, String), String> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got {raw:?}"))?;
    let field = name.trim().parse::<Field>().map_err(|e| e.to_string())?;
    Ok((field, value.to_string()))
}

impl Cli {
    /// Environment first, then flags on top.
    pub fn client_config(&self) -> loan_flow::Result<ClientConfig> {
        let mut config = ClientConfig::from_env()?;
        if let Some(endpoint) = &self.endpoint {
            config = config.with_endpoint(endpoint)?;
        }
        if let Some(secs) = self.timeout_secs {
            config = config.with_timeout(Duration::from_secs(secs));
        }
        Ok(config)
    }
}

/// Build the form for `submit`: file values first, `--field` overrides after.
pub fn build_form(
    from_json: Option<&PathBuf>,
    fields: &[(Field, String)],
) -> loan_flow::Result<FormState> {
    let mut form = match from_json {
        Some(path) => {
            let raw = std::fs::read_to_string(path)?;
            serde_json::from_str::<FormState>(&raw)?
        }
        None => FormState::new(),
    };
    for (field, value) in fields {
        form.set(*field, value.clone());
    }
    Ok(form)
}
