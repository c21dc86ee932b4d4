use std::{path::PathBuf, sync::Arc};

use anyhow::{Context, bail};
use clap::{Args, Parser, Subcommand};
use tracing::{debug, info};

use tax_client::HttpTaxApi;
use tax_ui::{Bridge, BridgeConfig, FormId, FormSubmission, MemoryPage, csv_loader, logging};

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Console host for the tax estimate form bridge.
///
/// Submits forms to the estimate backend exactly as the web page would and
/// prints what the page would show afterwards.
#[derive(Debug, Parser)]
struct Cli {
    /// TOML configuration file. Built-in defaults are used when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Backend origin, e.g. `http://127.0.0.1:5000`. Overrides the config file.
    #[arg(long)]
    base_url: Option<String>,

    /// Log level or filter directive. Overrides the config file.
    #[arg(long)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Request a tax estimate.
    Estimate {
        #[arg(long)]
        gross_annual: String,
        /// single, mfj or hoh.
        #[arg(long, default_value = "single")]
        filing_status: String,
        /// Two-letter state code.
        #[arg(long)]
        state: String,
    },
    /// Save a new net-income entry.
    SaveNet(EntryArgs),
    /// Overwrite the most recent net-income entry.
    EditLatest(EntryArgs),
    /// Request an estimate for every row of a CSV file.
    Batch { file: PathBuf },
}

#[derive(Debug, Args)]
struct EntryArgs {
    #[arg(long, default_value = "")]
    label: String,
    #[arg(long)]
    net_amount: String,
    /// weekly, bi-weekly, monthly or yearly.
    #[arg(long, default_value = "monthly")]
    frequency: String,
}

impl EntryArgs {
    fn into_submission(
        self,
        form: FormId,
    ) -> FormSubmission {
        FormSubmission::new(form)
            .with_field("label", self.label)
            .with_field("net_amount", self.net_amount)
            .with_field("frequency", self.frequency)
    }
}

impl Command {
    fn into_submissions(self) -> anyhow::Result<Vec<FormSubmission>> {
        Ok(match self {
            Command::Estimate {
                gross_annual,
                filing_status,
                state,
            } => vec![
                FormSubmission::new(FormId::Estimate)
                    .with_field("gross_annual", gross_annual)
                    .with_field("filing_status", filing_status)
                    .with_field("state", state),
            ],
            Command::SaveNet(entry) => vec![entry.into_submission(FormId::SaveNet)],
            Command::EditLatest(entry) => vec![entry.into_submission(FormId::EditLatest)],
            Command::Batch { file } => csv_loader::load_from_file(&file)
                .with_context(|| format!("loading batch '{}'", file.display()))?,
        })
    }
}

// ─── entry point ─────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => BridgeConfig::load(path)?,
        None => BridgeConfig::default(),
    };
    if let Some(base_url) = cli.base_url {
        config.backend.base_url = base_url;
    }
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }

    logging::init_logging(&config.logging)?;

    let api = Arc::new(HttpTaxApi::new(config.backend.base_url.clone()));
    debug!(base_url = api.client().base_url(), "using backend");
    let page = Arc::new(MemoryPage::new());
    let bridge = Bridge::new(api, page.clone(), config.forms);

    let submissions = cli.command.into_submissions()?;
    let total = submissions.len();
    let mut failed = 0;

    for submission in &submissions {
        let outcome = bridge.submit(submission).await;

        println!("[{}]", submission.form);
        for event in page.drain_events() {
            println!("  {event}");
        }
        if let Err(error) = outcome {
            failed += 1;
            println!("  failed: {error}");
        }
    }

    info!(total, failed, "done");
    if failed > 0 {
        bail!("{failed} of {total} submissions failed");
    }
    Ok(())
}
