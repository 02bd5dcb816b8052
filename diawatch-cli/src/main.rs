use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use chrono::Local;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod report;
mod settings;

use diawatch_analytics::{
    build_weekly_context, daily_averages, glycemic_summary, hourly_profile, total_daily_insulin,
    Journal,
};
use diawatch_types::{JournalDocument, MmolL, PatientProfile};

use report::Period;
use settings::Settings;

#[derive(Parser, Debug)]
#[command(name = "diawatch")]
#[command(about = "Diabetes self-management analytics and assistant CLI")]
struct Args {
    /// Path to the measurement journal file
    #[arg(short, long, default_value = "journal.json")]
    journal: PathBuf,

    /// Path to a settings file (TOML); DIAWATCH_* env vars override it
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the glycemic summary and aggregates for a period
    Summary {
        /// Reporting period: 7, 30, 90, 365 or "all"
        #[arg(short, long, default_value = "30")]
        period: String,

        /// Override the target range lower bound, mmol/L
        #[arg(long)]
        target_min: Option<f64>,

        /// Override the target range upper bound, mmol/L
        #[arg(long)]
        target_max: Option<f64>,
    },

    /// Print the weekly assistant context as JSON
    Context,

    /// Ask the RAG assistant a question
    Ask {
        question: String,

        /// Include the personal weekly context
        #[arg(long)]
        personal: bool,
    },
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let settings = Settings::load(args.config.as_deref())?;

    let text = fs::read_to_string(&args.journal)
        .with_context(|| format!("failed to read journal {}", args.journal.display()))?;
    let document: JournalDocument = serde_json::from_str(&text)
        .with_context(|| format!("failed to parse journal {}", args.journal.display()))?;

    let profile = document
        .patient
        .clone()
        .unwrap_or_else(|| PatientProfile::new("patient"));

    let journal = Journal::new();
    let handle = journal
        .load(document)
        .context("journal contains invalid records")?;

    let today = Local::now().date_naive();

    match args.command {
        Command::Summary {
            period,
            target_min,
            target_max,
        } => {
            let period = Period::parse(&period);
            let mut target = profile.target;
            if let Some(min) = target_min {
                target.min = MmolL(min);
            }
            if let Some(max) = target_max {
                target.max = MmolL(max);
            }

            let (samples, doses) = match period.start(today) {
                Some(start) => (
                    handle.glucose_between(start, today),
                    handle.insulin_between(start, today),
                ),
                None => (handle.glucose_all(), handle.insulin_all()),
            };

            let summary = glycemic_summary(&samples, &target);
            let daily = daily_averages(&samples);
            let hourly = hourly_profile(&samples);
            let insulin = total_daily_insulin(&doses);

            print!(
                "{}",
                report::render(
                    &profile.name,
                    &period.label(),
                    &target,
                    summary.as_ref(),
                    &daily,
                    &hourly,
                    &insulin,
                )
            );
        }

        Command::Context => {
            let context = build_weekly_context(&profile, &handle, today);
            println!("{}", serde_json::to_string_pretty(&context)?);
        }

        Command::Ask { question, personal } => {
            let client = settings.rag_client();

            let result = if personal {
                let context = build_weekly_context(&profile, &handle, today);
                client
                    .ask_personalized(&question, &context.personal_context)
                    .await
            } else {
                client.ask(&question).await
            };

            match result {
                Ok(answer) => {
                    println!("{}", answer.answer);
                    if !answer.sources.is_empty() {
                        println!();
                        println!("Sources:");
                        for source in &answer.sources {
                            println!("  - {}", source);
                        }
                    }
                }
                Err(err) => {
                    tracing::error!(error = %err, "assistant query failed");
                    println!("{}", err.user_message());
                    return Ok(ExitCode::FAILURE);
                }
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}
