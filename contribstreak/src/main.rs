//! contribstreak - merged contribution streaks and yearly heatmap
//!
//! Fetches (or loads) the daily contributions of several accounts, merges
//! them, and prints streaks plus a calendar heatmap.

mod render;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use contribstreak_core::analytics::{count_display, generate_report, ContributionReport, StreakTier};
use contribstreak_core::source::{load_series, ContributionsClient};
use contribstreak_core::{CalendarDay, Config, SourceSeries};

#[derive(Parser, Debug)]
#[command(name = "contribstreak")]
#[command(about = "Merged contribution streaks and heatmap across accounts")]
#[command(version)]
struct Args {
    /// Year to show in the heatmap (default: current year)
    #[arg(long, value_parser = clap::value_parser!(i32).range(1..=9999))]
    year: Option<i32>,

    /// Reference day in YYYY-MM-DD format (default: today)
    #[arg(long, value_parser = parse_day)]
    today: Option<CalendarDay>,

    /// Account to include; repeatable (default: accounts from config)
    #[arg(long = "account")]
    accounts: Vec<String>,

    /// Read a series from a JSON file instead of fetching; repeatable
    #[arg(long = "input")]
    inputs: Vec<PathBuf>,

    /// Export format (md = markdown, json = JSON)
    #[arg(long)]
    export: Option<String>,

    /// Config file (default: ~/.config/contribstreak/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,
}

fn parse_day(s: &str) -> std::result::Result<CalendarDay, String> {
    CalendarDay::parse(s).ok_or_else(|| format!("invalid date {:?}, expected YYYY-MM-DD", s))
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("failed to load configuration from {}", path.display()))?,
        None => Config::load().context("failed to load configuration")?,
    };
    let _log_guard = contribstreak_core::logging::init(&config.logging).ok();

    if let Some(format) = args.export.as_deref() {
        if !matches!(format, "md" | "json") {
            anyhow::bail!("Unknown export format: {}. Use 'md' or 'json'", format);
        }
    }

    let today = args.today.unwrap_or_else(CalendarDay::today);
    let series = collect_series(&args, &config).await?;

    let report = generate_report(&series, args.year, today);

    match args.export.as_deref() {
        Some("json") => print_json(&report)?,
        Some(_) => print_markdown(&report),
        None => print_terminal(&report),
    }

    Ok(())
}

/// Series from `--input` files, or fetched for the selected accounts.
async fn collect_series(args: &Args, config: &Config) -> Result<Vec<SourceSeries>> {
    if !args.inputs.is_empty() {
        tracing::info!(files = args.inputs.len(), "Loading series from files");
        return args
            .inputs
            .iter()
            .map(|path| {
                load_series(path)
                    .with_context(|| format!("failed to load series from {}", path.display()))
            })
            .collect();
    }

    let accounts = if args.accounts.is_empty() {
        config.accounts.clone()
    } else {
        args.accounts.clone()
    };
    if accounts.is_empty() {
        anyhow::bail!(
            "No accounts given. Pass --account NAME or set `accounts` in {}",
            Config::config_path().display()
        );
    }

    tracing::info!(accounts = ?accounts, "Fetching contributions");
    let client =
        ContributionsClient::new(&config.source).context("failed to create contributions client")?;
    // Always full history, never `--year`: streaks that cross January 1 need
    // the neighbouring years, and the heatmap selects the year afterwards.
    Ok(client.fetch_all(&accounts, None).await)
}

fn plural_days(n: u32) -> String {
    format!("{} day{}", n, if n == 1 { "" } else { "s" })
}

fn longest_range(report: &ContributionReport) -> String {
    match (
        report.streaks.longest_streak_start,
        report.streaks.longest_streak_end,
    ) {
        (Some(start), Some(end)) => format!(" ({} - {})", start.short_display(), end.short_display()),
        _ => String::new(),
    }
}

fn visible_days(report: &ContributionReport) -> i64 {
    report
        .heatmap
        .range
        .map(|r| r.last_day.days_since(r.first_day) + 1)
        .unwrap_or(0)
}

fn print_terminal(report: &ContributionReport) {
    let tier = StreakTier::for_streak(report.streaks.current_streak);
    let title = format!("{} CONTRIBUTIONS {} {}", tier.icon(), report.year, tier.icon());

    // Header
    println!();
    println!("╭{}╮", "─".repeat(60));
    println!("│{:^60}│", title);
    println!("╰{}╯", "─".repeat(60));
    println!("   {}", report.accounts_display());
    println!();

    let degraded: Vec<&str> = report.degraded_accounts().collect();
    if !degraded.is_empty() {
        println!("   ⚠ Could not fetch: {} (partial data)", degraded.join(", "));
        println!();
    }

    if report.is_empty() {
        println!("  No contributions found for these accounts.");
        println!();
        return;
    }

    // Streaks
    println!("STREAKS");
    println!(
        "   Current:  {} {} ({})",
        plural_days(report.streaks.current_streak),
        tier.icon(),
        tier.label()
    );
    println!(
        "   Longest:  {}{}",
        plural_days(report.streaks.longest_streak),
        longest_range(report)
    );
    println!(
        "   Total:    {} contributions ({} in {})",
        count_display(report.streaks.total_contributions),
        count_display(report.year_total),
        report.year
    );
    println!(
        "   Active:   {} of {} days in {}",
        report.heatmap.active_days,
        visible_days(report),
        report.year
    );
    println!();

    // Heatmap
    println!("HEATMAP");
    for line in render::heatmap_lines(&report.heatmap) {
        println!("   {}", line);
    }
    println!();

    // Accounts
    if report.accounts.len() > 1 {
        println!("ACCOUNTS");
        for account in &report.accounts {
            let status = if account.degraded { "  (unavailable)" } else { "" };
            println!(
                "   {:<24} {:>8}{}",
                account.account,
                count_display(account.total),
                status
            );
        }
        println!();
    }
}

fn print_markdown(report: &ContributionReport) {
    let tier = StreakTier::for_streak(report.streaks.current_streak);

    println!("# Contributions {}", report.year);
    println!();
    println!("*{}*", report.accounts_display());
    println!();

    let degraded: Vec<&str> = report.degraded_accounts().collect();
    if !degraded.is_empty() {
        println!("> Could not fetch: {}", degraded.join(", "));
        println!();
    }

    if report.is_empty() {
        println!("*No contributions found for these accounts.*");
        return;
    }

    // Streaks
    println!("## Streaks");
    println!();
    println!(
        "- **Current streak:** {} {} ({})",
        plural_days(report.streaks.current_streak),
        tier.icon(),
        tier.label()
    );
    println!(
        "- **Longest streak:** {}{}",
        plural_days(report.streaks.longest_streak),
        longest_range(report)
    );
    println!(
        "- **Total contributions:** {}",
        report.streaks.total_contributions
    );
    println!(
        "- **In {}:** {} across {} of {} days",
        report.year,
        report.year_total,
        report.heatmap.active_days,
        visible_days(report)
    );
    println!();

    // Heatmap
    println!("## Heatmap");
    println!();
    println!("```text");
    for line in render::heatmap_lines(&report.heatmap) {
        println!("{}", line);
    }
    println!("```");
    println!();

    // Accounts
    println!("## Accounts");
    println!();
    println!("| Account | Contributions | Status |");
    println!("|---------|---------------|--------|");
    for account in &report.accounts {
        let status = if account.degraded { "unavailable" } else { "ok" };
        println!("| {} | {} | {} |", account.account, account.total, status);
    }
    println!();

    println!("---");
    println!("*Generated by contribstreak*");
}

fn print_json(report: &ContributionReport) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(report)?);
    Ok(())
}
