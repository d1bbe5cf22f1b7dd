//! CLI administration tool for hit-stats.
//!
//! Reads statistics and raw hits straight from PostgreSQL, without going
//! through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Aggregated stats, same semantics as GET /stats
//! cargo run --bin admin -- stats --start "2025-01-01 00:00:00" --end "2025-12-31 23:59:59"
//!
//! # Only some URIs, counting distinct IPs
//! cargo run --bin admin -- stats --start "..." --end "..." --uri /events/1 --uri /events/2 --unique
//!
//! # Raw hits in a window
//! cargo run --bin admin -- hits --start "..." --end "..."
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` (required): PostgreSQL connection string

use hit_stats::application::services::HitService;
use hit_stats::infrastructure::persistence::{PgHitRepository, pg_hit_repository};
use hit_stats::utils::datetime::{format_timestamp, parse_timestamp};

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use clap::{Parser, Subcommand};
use colored::*;
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for inspecting hit-stats data.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Show aggregated hit counts per (app, uri)
    Stats {
        /// Window start, inclusive ("yyyy-MM-dd HH:mm:ss")
        #[arg(long, value_parser = parse_datetime)]
        start: NaiveDateTime,

        /// Window end, inclusive ("yyyy-MM-dd HH:mm:ss")
        #[arg(long, value_parser = parse_datetime)]
        end: NaiveDateTime,

        /// Restrict to this URI (repeatable)
        #[arg(long = "uri")]
        uris: Vec<String>,

        /// Count distinct client IPs instead of hits
        #[arg(long)]
        unique: bool,
    },

    /// List raw hits in a window
    Hits {
        #[arg(long, value_parser = parse_datetime)]
        start: NaiveDateTime,

        #[arg(long, value_parser = parse_datetime)]
        end: NaiveDateTime,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

    let pool = PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    match cli.command {
        Commands::Stats {
            start,
            end,
            uris,
            unique,
        } => handle_stats(&pool, start, end, uris, unique).await?,
        Commands::Hits { start, end } => handle_hits(&pool, start, end).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

fn parse_datetime(value: &str) -> Result<NaiveDateTime, String> {
    parse_timestamp(value).map_err(|e| e.to_string())
}

/// Prints aggregated stats, highest count first.
async fn handle_stats(
    pool: &PgPool,
    start: NaiveDateTime,
    end: NaiveDateTime,
    uris: Vec<String>,
    unique: bool,
) -> Result<()> {
    let service = HitService::new(Arc::new(PgHitRepository::new(Arc::new(pool.clone()))));

    let uris = (!uris.is_empty()).then_some(uris);
    let stats = service
        .get_stats(start, end, uris, unique)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to load stats: {}", e))?;

    println!("{}", "📊 View Statistics".bright_blue().bold());
    println!(
        "  {} .. {}{}",
        format_timestamp(&start).bright_black(),
        format_timestamp(&end).bright_black(),
        if unique { " (unique IPs)" } else { "" }
    );
    println!();

    if stats.is_empty() {
        println!("{}", "  No hits in this window".yellow());
        println!();
        return Ok(());
    }

    println!(
        "  {:<20} {:<40} {}",
        "APP".bold(),
        "URI".bold(),
        "HITS".bold()
    );
    println!("  {}", "─".repeat(70).bright_black());

    for item in &stats {
        println!(
            "  {:<20} {:<40} {}",
            item.app.cyan(),
            item.uri,
            item.hits.to_string().bright_green().bold()
        );
    }

    println!();
    println!("  Rows: {}", stats.len().to_string().bright_white().bold());
    println!();

    Ok(())
}

/// Prints every stored hit in `[start, end]`, oldest first.
async fn handle_hits(pool: &PgPool, start: NaiveDateTime, end: NaiveDateTime) -> Result<()> {
    if start > end {
        anyhow::bail!("--start must not be after --end");
    }

    let hits = pg_hit_repository::fetch_hits_between(pool, start, end)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to load hits: {}", e))?;

    println!("{}", "📋 Hits".bright_blue().bold());
    println!();

    for hit in &hits {
        println!(
            "  {:<6} {} {:<15} {:<20} {}",
            hit.id.to_string().bright_black(),
            format_timestamp(&hit.timestamp).bright_black(),
            hit.ip,
            hit.app.cyan(),
            hit.uri
        );
    }

    println!();
    println!("  Total: {}", hits.len().to_string().bright_white().bold());
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "ℹ️  Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            let hits_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM hits")
                .fetch_one(pool)
                .await?;

            println!("  PostgreSQL: {}", version.bright_white());
            println!(
                "  Hits:       {}",
                hits_count.to_string().bright_green().bold()
            );
            println!();
        }
    }

    Ok(())
}
