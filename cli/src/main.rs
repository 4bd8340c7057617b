mod site;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde::Serialize;

use kalandkonyv_core::catalog::{BOOK_TITLE, TOTAL_PAGES};
use kalandkonyv_core::dice::{DEFAULT_DICE_COUNT, DEFAULT_SUCCESS_THRESHOLD, DIE_FACES};
use kalandkonyv_core::{DiceRoller, DieOutcome};

#[derive(Parser)]
#[command(name = "kalandkonyv-cli", version, about = "Authoring tools for the Kalandkönyv reader")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the URLs the service worker caches on install.
    Precache {
        #[arg(long, env = "BOOK_TOTAL_PAGES", default_value_t = TOTAL_PAGES)]
        total_pages: u32,
        #[arg(long)]
        pretty: bool,
    },
    /// Report page documents missing from a built site.
    Check {
        #[arg(long)]
        root: PathBuf,
        #[arg(long, env = "BOOK_TOTAL_PAGES", default_value_t = TOTAL_PAGES)]
        total_pages: u32,
        /// Also check the local shell and image assets.
        #[arg(long)]
        assets: bool,
    },
    /// Roll dice the way the in-book widget does.
    Roll {
        #[arg(long, default_value_t = DEFAULT_DICE_COUNT as u8, value_parser = clap::value_parser!(u8).range(1..=20))]
        count: u8,
        #[arg(long, default_value_t = DEFAULT_SUCCESS_THRESHOLD, value_parser = clap::value_parser!(u8).range(1..=DIE_FACES as i64))]
        threshold: u8,
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long)]
        json: bool,
    },
}

#[derive(Serialize)]
struct RollReport<'a> {
    faces: Vec<u8>,
    successes: usize,
    label: Option<&'a str>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Precache {
            total_pages,
            pretty,
        } => {
            let manifest = site::precache_manifest(total_pages);
            let json = if pretty {
                serde_json::to_string_pretty(&manifest)?
            } else {
                serde_json::to_string(&manifest)?
            };
            println!("{json}");
        }
        Commands::Check {
            root,
            total_pages,
            assets,
        } => {
            if !root.is_dir() {
                return Err(format!("site root {} is not a directory", root.display()).into());
            }
            let report = site::check_site(&root, total_pages, assets);
            for missing in &report.missing {
                println!("missing: {missing}");
            }
            if !report.is_complete() {
                return Err(format!(
                    "{} of {} files missing under {}",
                    report.missing.len(),
                    report.checked,
                    root.display()
                )
                .into());
            }
            println!("{BOOK_TITLE}: all {} files present", report.checked);
        }
        Commands::Roll {
            count,
            threshold,
            seed,
            json,
        } => {
            let mut roller = DiceRoller::new();
            match seed {
                Some(seed) => {
                    let mut rng = SmallRng::seed_from_u64(seed);
                    roller.roll(&mut rng, usize::from(count), threshold);
                }
                None => {
                    roller.roll(&mut rand::rng(), usize::from(count), threshold);
                }
            }
            let report = RollReport {
                faces: roller.results().iter().map(|outcome: &DieOutcome| outcome.value).collect(),
                successes: roller.success_count(),
                label: roller.success_text(),
            };
            if json {
                println!("{}", serde_json::to_string(&report)?);
            } else {
                let faces = report
                    .faces
                    .iter()
                    .map(|face| face.to_string())
                    .collect::<Vec<_>>()
                    .join(" ");
                println!("faces: {faces}");
                println!("successes: {}", report.successes);
                if let Some(label) = report.label {
                    println!("{label}");
                }
            }
        }
    }

    Ok(())
}
