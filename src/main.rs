use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tokio_util::sync::CancellationToken;

use seasonmap::{
    build_services, commands,
    modules::{mapping::BatchSummary, matching::ToleranceDays},
    shared::{utils::init_logger, MapperConfig},
};

#[derive(Parser)]
#[command(name = "seasonmap")]
#[command(about = "Map AniList anime entries to TMDB season ids by air date", long_about = None)]
struct Cli {
    /// Results file, read for resume and rewritten after every entry
    #[arg(short, long, global = true, default_value = "results.json")]
    output: PathBuf,

    /// Maximum distance in days between AniList start date and TMDB season air date
    #[arg(short, long, global = true)]
    tolerance: Option<i64>,

    /// Never match season 0 (specials)
    #[arg(long, global = true)]
    exclude_specials: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Map the ids listed in a file, one per line
    File {
        #[arg(short, long, default_value = "input_ids.txt")]
        input: PathBuf,
    },
    /// Map every AniList id the base mapping knows (takes hours)
    All {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Map one id and print the record, the results file is left alone
    One {
        #[arg(value_name = "ANILIST_ID")]
        anilist_id: u32,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // loads .env before reading RUST_LOG
    init_logger();

    let cli = Cli::parse();

    let mut config = MapperConfig::from_env()?;
    if let Some(days) = cli.tolerance {
        config.pipeline.tolerance = ToleranceDays::new(days)?;
    }
    if cli.exclude_specials {
        config.pipeline.exclude_specials = true;
    }

    log::info!(
        "Tolerance {}, specials {}",
        config.pipeline.tolerance,
        if config.pipeline.exclude_specials {
            "excluded"
        } else {
            "included"
        }
    );

    let services = build_services(&config)?;

    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            log::warn!("Interrupted, finishing up. Completed entries are already saved.");
            on_interrupt.cancel();
        }
    });

    match cli.command {
        Command::File { input } => {
            let summary = commands::map_file(&services, &input, &cli.output, &cancel).await?;
            print_summary(&summary);
        }
        Command::All { yes } => {
            if !yes && !confirm("Mapping the full catalog takes several hours. Continue? (y/n): ")? {
                println!("Aborted.");
                return Ok(());
            }
            let summary = commands::map_all(&services, &cli.output, &cancel).await?;
            print_summary(&summary);
        }
        Command::One { anilist_id } => {
            let entry = commands::map_single(&services, anilist_id).await;
            let json = serde_json::to_string_pretty(&entry.record)
                .context("Failed to serialize record")?;
            println!("{}", json);
        }
    }

    Ok(())
}

fn confirm(prompt: &str) -> anyhow::Result<bool> {
    print!("{}", prompt);
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin()
        .lock()
        .read_line(&mut answer)
        .context("Failed to read confirmation")?;
    Ok(answer.trim().eq_ignore_ascii_case("y"))
}

fn print_summary(summary: &BatchSummary) {
    println!();
    println!("Processed:          {}/{}", summary.processed, summary.total);
    println!(
        "Matched:            {} ({:.1}%)",
        summary.matched,
        summary.match_rate()
    );
    println!("Unmatched:          {}", summary.unmatched);
    println!("No base mapping:    {}", summary.resolution_failed);
    println!(
        "Failed:             {} (not saved, retried on the next run)",
        summary.failed
    );
    if summary.interrupted {
        println!(
            "Interrupted with {} ids left; run again to resume.",
            summary.remaining()
        );
    }
}
