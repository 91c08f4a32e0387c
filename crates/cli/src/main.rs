//! Stale-issue report entry point.
//!
//! This binary is the composition root for the entire system. Responsibilities:
//!
//! 1. **Parse configuration** — read every option from flags or environment
//!    variables and validate it. Missing or invalid values exit with code 2
//!    before any network call.
//! 2. **Wire observability** — configure `tracing-subscriber` with a JSON (or
//!    pretty) layer and, when `OTEL_EXPORTER_OTLP_ENDPOINT` is set, an
//!    OpenTelemetry OTLP exporter. All spans and events from every crate in the
//!    workspace flow through this layer.
//! 3. **Construct infrastructure** — create the `GithubClient` and
//!    `SlackNotifier` and inject them into a `ReportJob`.
//! 4. **Run once** — execute a single report run against the current wall
//!    clock and map the outcome to the exit code (0 success, 1 run failure).
//!
//! Scheduling is left to whatever invokes the binary (cron, CI schedule, a
//! person at a terminal).

mod config;
mod observability;

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use chat::SlackNotifier;
use clap::Parser;
use github::GithubClient;
use nodes::{AssigneeResolver, NotificationDispatcher, ReportJob, ReportJobSettings};
use pipeline::Timestamp;
use tracing::{error, info};

use crate::config::{Cli, Config};

const CONFIG_FAILURE: u8 = 2;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let telemetry = match observability::init(cli.log_format, cli.otlp_endpoint.as_deref()) {
        Ok(telemetry) => telemetry,
        Err(e) => {
            eprintln!("failed to initialise logging: {e:#}");
            return ExitCode::from(CONFIG_FAILURE);
        }
    };

    let code = run(&cli).await;
    telemetry.shutdown();
    code
}

async fn run(cli: &Cli) -> ExitCode {
    let config = match cli.to_config() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Invalid configuration");
            return ExitCode::from(CONFIG_FAILURE);
        }
    };

    let job = match build_job(&config) {
        Ok(job) => job,
        Err(e) => {
            error!(error = %format!("{e:#}"), "Failed to construct clients");
            return ExitCode::from(CONFIG_FAILURE);
        }
    };

    match job.run(Timestamp::now()).await {
        Ok(summary) => {
            info!(
                run_id = %summary.run_id,
                fetched = summary.fetched,
                stale = summary.stale,
                unknown_lookups = summary.unknown_lookups,
                outcome = ?summary.outcome,
                "Report run finished"
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "Report run failed");
            ExitCode::FAILURE
        }
    }
}

fn build_job(config: &Config) -> Result<ReportJob> {
    let github = Arc::new(
        GithubClient::new(
            &config.github_api_url,
            &config.github_token,
            config.http_timeout,
        )
        .context("failed to create GitHub client")?,
    );
    let slack = SlackNotifier::new(
        &config.slack_api_url,
        &config.slack_bot_token,
        config.http_timeout,
    )
    .context("failed to create chat client")?;

    let resolver = AssigneeResolver::new(github.clone())
        .with_concurrency(config.lookup_concurrency)
        .with_lookup_timeout(config.lookup_timeout);
    let dispatcher = NotificationDispatcher::new(
        Arc::new(slack),
        config.slack_channel.clone(),
        config.repository.clone(),
    );

    Ok(ReportJob::new(
        github,
        resolver,
        dispatcher,
        ReportJobSettings {
            repository: config.repository.clone(),
            organization: config.organization.clone(),
            fallback: config.fallback.clone(),
            window: config.window,
        },
    ))
}
