//! vCloud Inventory CLI
//!
//! Lists, exports and backs up the vApps of a vCloud Director installation.

use clap::Parser;
use console::style;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;
use tracing_subscriber::EnvFilter;
use vcloud_inventory::backup::{BackupMode, BackupOutcome, BackupService};
use vcloud_inventory::config::{
    CliArgs, Commands, ConnectionConfig, InventorySettings, LogFormat, OutputFormat, SortKey,
};
use vcloud_inventory::error::{InventoryError, Result};
use vcloud_inventory::export::{default_export_path, SpreadsheetExporter};
use vcloud_inventory::inventory::{classify, sort_servers, InventoryWalker, Server};
use vcloud_inventory::progress::ProgressReporter;
use vcloud_inventory::vcloud::{Client, DefaultClient};

fn main() {
    // Parse CLI arguments
    let args = CliArgs::parse();

    init_logging(&args);

    // Handle result
    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        if e.is_recoverable() {
            eprintln!("The failure looks transient; running the command again may succeed.");
        }
        std::process::exit(1);
    }
}

fn init_logging(args: &CliArgs) {
    let default_level = if args.quiet {
        "error"
    } else {
        match args.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("vcloud_inventory={default_level}")));

    match args.log_format {
        LogFormat::Text => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init(),
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init(),
    }
}

fn run(args: CliArgs) -> Result<()> {
    let settings = InventorySettings::load(&args.settings)?;

    // Classification needs no session
    if let Commands::Classify { names } = &args.command {
        return cmd_classify(&settings, names);
    }

    let config = ConnectionConfig::from_cli(&args).map_err(InventoryError::ConfigError)?;

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| InventoryError::config(format!("Failed to create runtime: {}", e)))?;

    rt.block_on(async {
        let client = DefaultClient::create(&config, None)?;
        client.login().await?;

        let result = handle_command(&args, &config, &settings, &client).await;

        if let Err(e) = client.logout().await {
            warn!("Logout failed: {}", e);
        }
        result
    })
}

async fn handle_command(
    args: &CliArgs,
    config: &ConnectionConfig,
    settings: &InventorySettings,
    client: &DefaultClient,
) -> Result<()> {
    let show_progress = !args.quiet
        && !matches!(args.command, Commands::List { format: OutputFormat::Json, .. });
    let progress = Arc::new(if show_progress {
        ProgressReporter::new()
    } else {
        ProgressReporter::disabled()
    });

    let walker = InventoryWalker::new(&config.data_center, settings.environments().to_vec())
        .with_progress(progress.clone());

    match &args.command {
        Commands::List { sort, format } => {
            let servers = walk(&walker, client, &progress, *sort).await?;
            cmd_list(&servers, *format)
        }
        Commands::Export { path, sort } => {
            let servers = walk(&walker, client, &progress, *sort).await?;
            let path = path.clone()
                .unwrap_or_else(|| default_export_path(chrono::Local::now().date_naive()));
            cmd_export(settings, &servers, &path, &progress, args.quiet)
        }
        Commands::Backup { server, description, dry_run, task_timeout, poll_interval } => {
            let found = walker.find_server(client, server).await;
            progress.finish_success("Inventory loaded");
            let found = found?;

            let service = BackupService::new(client, config.catalog.clone())
                .with_task_timeout(*task_timeout)
                .with_poll_interval(*poll_interval);
            cmd_backup(&service, &found, description, *dry_run, *task_timeout).await
        }
        Commands::Classify { names } => cmd_classify(settings, names),
    }
}

async fn walk(
    walker: &InventoryWalker,
    client: &DefaultClient,
    progress: &ProgressReporter,
    sort: SortKey,
) -> Result<Vec<Server>> {
    match walker.walk(client).await {
        Ok(mut servers) => {
            progress.finish_success(&progress.summary().line());
            sort_servers(&mut servers, sort);
            Ok(servers)
        }
        Err(e) => {
            progress.finish_error("Inventory walk failed");
            Err(e)
        }
    }
}

fn cmd_list(servers: &[Server], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let summaries: Vec<_> = servers.iter().map(Server::summary).collect();
            println!("{}", serde_json::to_string_pretty(&summaries)?);
        }
        OutputFormat::Text => {
            println!(
                "{:<28} {:<12} {:<20} {:>4} {:>10}  {}",
                style("NAME").bold(),
                style("ENVIRONMENT").bold(),
                style("ORGANIZATION").bold(),
                style("CPUS").bold(),
                style("MEMORY").bold(),
                style("IP ADDRESS").bold(),
            );
            for server in servers {
                let summary = server.summary();
                println!(
                    "{:<28} {:<12} {:<20} {:>4} {:>10}  {}",
                    summary.name,
                    summary.environment.as_str(),
                    summary.organization,
                    summary.cpus,
                    humansize::format_size(summary.memory_bytes(), humansize::BINARY),
                    summary.ip_address.as_deref().unwrap_or("-"),
                );
            }
            println!("\n{} vApp(s)", servers.len());
        }
    }
    Ok(())
}

fn cmd_export(
    settings: &InventorySettings,
    servers: &[Server],
    path: &Path,
    progress: &ProgressReporter,
    quiet: bool,
) -> Result<()> {
    let stats = SpreadsheetExporter::new(settings.templates())
        .with_progress(progress)
        .export(servers, path)?;

    if !quiet {
        println!("{} Wrote {} row(s) to {}", style("✓").green(), stats.rows, path.display());
        for name in &stats.skipped {
            println!("  {} skipped '{}' (no VMs)", style("!").yellow(), name);
        }
    }
    Ok(())
}

async fn cmd_backup(
    service: &BackupService<'_, DefaultClient>,
    server: &Server,
    description: &str,
    dry_run: bool,
    task_timeout: Duration,
) -> Result<()> {
    let mode = if dry_run { BackupMode::Validate } else { BackupMode::Capture };

    if mode == BackupMode::Capture {
        println!(
            "Backing up {} (task timeout: {})...",
            style(server.name()).bold(),
            if task_timeout.is_zero() { "none".to_string() } else { humantime::format_duration(task_timeout).to_string() },
        );
    }

    match service.backup_server(server, description, mode).await? {
        BackupOutcome::Validated { params } => {
            println!("=== Dry Run Mode ===");
            println!("'{}' can be backed up as '{}'", server.name(), params.name);
            println!("Source: {}", params.source.href);
        }
        BackupOutcome::Captured { template, catalog } => {
            println!(
                "{} '{}' captured to catalog '{}' ({})",
                style("✓").green(),
                server.name(),
                catalog.display_name(),
                template.href,
            );
        }
    }
    Ok(())
}

fn cmd_classify(settings: &InventorySettings, names: &[String]) -> Result<()> {
    if settings.environments().is_empty() {
        warn!("No environment rules loaded; every name is UNKNOWN");
    }
    for name in names {
        let tier = classify(name, settings.environments());
        println!("{:<32} {}", name, style(tier.as_str()).cyan());
    }
    Ok(())
}
