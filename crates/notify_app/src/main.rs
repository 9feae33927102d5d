mod platform;

use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use clap::{Args, Parser, Subcommand};
use notify_core::{NotificationScheduler, SchedulerConfig};
use notify_domain::{NotificationRequest, RepeatPolicy};

use crate::platform::TracingPlatform;

#[derive(Parser, Debug)]
#[command(name = "notify_desktop", about = "Drive the local notification scheduler from a terminal")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Display a notification now.
    Show(RequestArgs),
    /// Arm an alarm for a local wall-clock time.
    Schedule {
        #[command(flatten)]
        request: RequestArgs,
        /// Local time, `YYYY-MM-DD HH:MM[:SS]`.
        #[arg(long, value_parser = parse_wall_clock)]
        at: NaiveDateTime,
    },
    /// Cancel the alarm and displayed notification for an id.
    Cancel {
        #[arg(long, default_value_t = 0)]
        id: i32,
    },
}

#[derive(Args, Debug)]
struct RequestArgs {
    #[arg(long)]
    title: String,
    #[arg(long, default_value = "")]
    body: String,
    #[arg(long, default_value_t = 0)]
    id: i32,
    /// none, daily, weekly, monthly, yearly, 20s, or a legacy code 0-5.
    #[arg(long, default_value = "none", value_parser = parse_repeat)]
    repeat: RepeatPolicy,
    /// Opaque payload entries, in order.
    #[arg(long = "payload")]
    payload: Vec<String>,
}

impl RequestArgs {
    fn into_request(self) -> NotificationRequest {
        NotificationRequest::new(self.title, self.body)
            .with_id(self.id)
            .with_repeat(self.repeat)
            .with_payload(self.payload)
    }
}

fn parse_repeat(value: &str) -> Result<RepeatPolicy, String> {
    RepeatPolicy::parse(value).ok_or_else(|| format!("unknown repeat policy `{value}`"))
}

fn parse_wall_clock(value: &str) -> Result<NaiveDateTime, String> {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M"))
        .map_err(|err| format!("invalid time `{value}`: {err}"))
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();
    if let Err(err) = run(Cli::parse()).await {
        eprintln!("notify_desktop failed: {err:#}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let platform = Arc::new(TracingPlatform::new());
    let scheduler = NotificationScheduler::builder(platform.clone())
        .with_config(SchedulerConfig::from_env())
        .build();

    match cli.command {
        Command::Show(args) => {
            let request = args.into_request();
            let rearmed = scheduler
                .show_now(&request)
                .await
                .with_context(|| format!("showing notification {}", request.id))?;
            if let Some(alarm) = rearmed {
                tracing::info!(key = %alarm.key, "next occurrence armed");
            }
        }
        Command::Schedule { request, at } => {
            let request = request.into_request().at(at);
            scheduler
                .show_at(&request)
                .with_context(|| format!("scheduling notification {} for {at}", request.id))?;
        }
        Command::Cancel { id } => {
            scheduler
                .cancel(id)
                .with_context(|| format!("canceling notification {id}"))?;
        }
    }

    tracing::info!(
        displayed = platform.displayed_count(),
        pending_alarms = platform.pending_alarms().len(),
        "done"
    );
    Ok(())
}
