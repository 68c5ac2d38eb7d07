mod cli;
mod config;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use rota_core::impls::JsonFileRosterStore;
use rota_core::{DutyReceipt, RosterService, ServiceBuilder, Worker, WorkerId};

use crate::cli::{CliArgs, Command};
use crate::config::RotaConfig;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let args = CliArgs::parse();

    let config = RotaConfig::load(args.config.as_deref())
        .context("failed to load configuration")?
        .with_overrides(args.data.clone(), args.crew_size);

    let store = JsonFileRosterStore::open(&config.data_file)
        .await
        .with_context(|| format!("failed to open roster {}", config.data_file.display()))?;
    info!(path = %store.path().display(), crew_size = config.crew_size, "roster opened");

    let service = ServiceBuilder::new(store)
        .crew_size(config.crew_size)
        .build()
        .context("invalid configuration")?;

    run(&service, &config, args.command).await
}

async fn run(service: &RosterService, config: &RotaConfig, command: Command) -> Result<()> {
    match command {
        Command::Init { names } => {
            let names = if names.is_empty() {
                config.seed_workers.clone()
            } else {
                names
            };
            if service.seed(names.as_slice()).await? {
                println!("Seeded {} workers.", names.len());
            } else {
                println!("Roster already has workers (or no names given); nothing seeded.");
            }
        }
        Command::List => {
            let roster = service.roster().await?;
            if roster.is_empty() {
                println!("Roster is empty.");
            }
            for worker in &roster {
                println!("{}", describe(worker));
            }
        }
        Command::Add { name } => {
            let worker = service.add_worker(&name).await?;
            println!("Added {}", describe(&worker));
        }
        Command::Remove { id } => {
            service.remove_worker(WorkerId::new(id)).await?;
            println!("Removed worker {id}.");
        }
        Command::Off { id } => {
            let worker = service.set_eligibility(WorkerId::new(id), true).await?;
            println!("{} is now OFF.", worker.name);
        }
        Command::On { id } => {
            let worker = service.set_eligibility(WorkerId::new(id), false).await?;
            println!("{} is back in the rotation.", worker.name);
        }
        Command::Reorder { ids } => {
            let ids: Vec<WorkerId> = ids.into_iter().map(WorkerId::from).collect();
            service.reorder(&ids).await?;
            println!("Order updated.");
        }
        Command::Next => {
            let crew = service.next_duty().await?;
            if crew.is_empty() {
                println!("Nobody is available for duty.");
            } else {
                println!("Next on duty: {}", crew_names(&crew));
            }
        }
        Command::Advance => {
            let receipt = service.advance().await?;
            report(service, &receipt).await?;
        }
        Command::Record { ids } => {
            let ids: Vec<WorkerId> = ids.into_iter().map(WorkerId::from).collect();
            let receipt = service.record_duty(&ids).await?;
            report(service, &receipt).await?;
        }
        Command::Status => {
            let summary = service.summary().await?;
            println!(
                "workers: {} (available: {}, off: {}), duties recorded: {}",
                summary.total, summary.eligible, summary.off, summary.total_duties
            );
        }
    }
    Ok(())
}

async fn report(service: &RosterService, receipt: &DutyReceipt) -> Result<()> {
    if receipt.is_noop() {
        println!("No duty recorded.");
    } else {
        let roster = service.roster().await?;
        let crew: Vec<Worker> = receipt
            .recorded
            .iter()
            .filter_map(|id| roster.iter().find(|w| w.id == *id).cloned())
            .collect();
        println!("Duty recorded: {}", crew_names(&crew));
    }
    for id in &receipt.skipped {
        println!("Skipped unknown worker {}.", id.get());
    }
    let next = service.next_duty().await?;
    if !next.is_empty() {
        println!("Next on duty: {}", crew_names(&next));
    }
    Ok(())
}

fn crew_names(crew: &[Worker]) -> String {
    crew.iter()
        .map(|w| w.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

fn describe(worker: &Worker) -> String {
    let last = worker
        .last_duty_date
        .map(|d| d.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "-".to_string());
    format!(
        "[{:>3}] #{:<3} {:<16} {:<3} duties={:<3} last={}",
        worker.id.get(),
        worker.order_index,
        worker.name,
        if worker.is_off { "OFF" } else { "" },
        worker.duty_count,
        last
    )
}
