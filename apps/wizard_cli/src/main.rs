mod config;
mod script;

use std::{path::PathBuf, sync::Arc};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use client_core::{HttpQuotationApi, Navigator, QuotationMeta, SubmitOptions, WizardSession};
use shared::domain::QuotationId;
use tracing::info;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;
use wizard::WELL_SCHEMA;

use crate::config::{load_settings, Settings};

#[derive(Parser, Debug)]
#[command(about = "Drive the well quotation wizard from the terminal")]
struct Args {
    /// Overrides the configured API base url.
    #[arg(long, global = true)]
    api_base_url: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Replay a JSON array of wizard actions, then submit the result.
    Run {
        script: PathBuf,
        #[arg(long)]
        no_submit: bool,
    },
    /// Load a stored quotation into the wizard and print its wells.
    Resume { quotation: Uuid },
}

struct LogNavigator;

impl Navigator for LogNavigator {
    fn navigate(&self, url: &str) {
        info!(%url, "navigation requested");
        println!("-> {url}");
    }
}

fn build_session(settings: &Settings) -> Result<WizardSession> {
    let api = HttpQuotationApi::new(&settings.api_base_url)
        .with_context(|| format!("invalid api base url {}", settings.api_base_url))?;
    let options = SubmitOptions {
        redirect_url: settings.redirect_url.clone(),
        redirect_delay: settings.redirect_delay(),
        meta: QuotationMeta::default(),
    };
    Ok(WizardSession::new(
        &WELL_SCHEMA,
        Arc::new(api),
        Arc::new(LogNavigator),
        options,
    ))
}

fn flush_notifications(session: &mut WizardSession) {
    for notification in session.take_notifications() {
        println!("{}", script::render_notification(&notification));
    }
}

fn print_summary(session: &WizardSession) {
    let state = session.state();
    println!("step: {}", state.current_step().title());
    println!("{}", state.entities.summary());
    for entity in state.entities.iter() {
        println!("  - {}", entity.key());
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let mut settings = load_settings();
    if let Some(url) = args.api_base_url {
        settings.api_base_url = url;
    }

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&settings.log_filter))
        .init();

    let mut session = build_session(&settings)?;

    match args.command {
        Command::Run { script, no_submit } => {
            let actions = script::load_script(&script)?;
            let rejected = script::apply_script(&mut session, actions);
            info!(rejected, "script applied");
            flush_notifications(&mut session);

            if !no_submit {
                let report = session.submit().await;
                flush_notifications(&mut session);
                if let Some(stage) = report.failed_stage() {
                    print_summary(&session);
                    anyhow::bail!("submission stopped at stage: {stage}");
                }
            }
        }
        Command::Resume { quotation } => {
            let loaded = session.resume(QuotationId(quotation)).await;
            flush_notifications(&mut session);
            loaded?;
        }
    }

    print_summary(&session);
    Ok(())
}
