use std::io;
use std::path::PathBuf;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use cleaning_roster::board::{AssignmentStore, RangeStore};
use cleaning_roster::clipboard::SystemClipboard;
use cleaning_roster::config::SeedOptions;
use cleaning_roster::display::{format_notice, render_classification, write_result_to_file};
use cleaning_roster::{repl, web};

#[derive(Parser)]
#[command(name = "cleaning-roster", version, about = "Assign people to cleaning zones")]
struct Cli {
    /// TOML file with [[people]] and [[zones]] tables
    #[arg(long, env = "CLEANING_SEED", global = true)]
    seed: Option<PathBuf>,

    /// CSV roster (`id,name`); needs --zones
    #[arg(long, requires = "zones", global = true)]
    people: Option<PathBuf>,

    /// CSV zone list (`id,label,order`); needs --people
    #[arg(long, requires = "people", global = true)]
    zones: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Mode {
    /// pick a person, then a zone
    Toggle,
    /// mark a stretch of zones, then fill it in order
    Range,
}

#[derive(Subcommand)]
enum Command {
    /// Serve the board over HTTP
    Web {
        #[arg(long, env = "CLEANING_PORT", default_value_t = 8080)]
        port: u16,
        #[arg(long, env = "CLEANING_BIND", default_value = "0.0.0.0")]
        bind: String,
    },
    /// Interactive board on stdin/stdout
    Repl {
        #[arg(long, value_enum, default_value_t = Mode::Toggle)]
        mode: Mode,
    },
    /// Show how the zone labels are grouped
    Zones,
    /// Format a result from explicit person=zone pairs
    Format {
        #[arg(long = "assign", value_parser = parse_pair)]
        assign: Vec<(String, String)>,
        /// Also write the result to this file
        #[arg(long)]
        out: Option<PathBuf>,
        /// Also copy the result to the clipboard
        #[arg(long)]
        copy: bool,
    },
}

fn parse_pair(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((person, zone)) if !person.trim().is_empty() && !zone.trim().is_empty() => {
            Ok((person.trim().to_string(), zone.trim().to_string()))
        }
        _ => Err(format!("expected person=zone, got `{}`", raw)),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let options = SeedOptions {
        seed: cli.seed,
        people_csv: cli.people,
        zones_csv: cli.zones,
    };
    let roster = options.load_roster()?;
    tracing::debug!(people = roster.people().len(), zones = roster.zones().len(), "roster loaded");

    match cli.command.unwrap_or(Command::Repl { mode: Mode::Toggle }) {
        Command::Web { port, bind } => {
            println!("Starting web server on {}:{}...", bind, port);
            println!("Access the board at http://localhost:{}", port);
            let store = AssignmentStore::new(roster);
            web::start_server(&bind, port, store, Box::new(SystemClipboard::detect())).await?;
        }
        Command::Repl { mode } => {
            let mut clipboard = SystemClipboard::detect();
            let stdin = io::stdin();
            let mut stdout = io::stdout();
            match mode {
                Mode::Toggle => {
                    let mut store = AssignmentStore::new(roster);
                    repl::run_toggle(&mut store, &mut clipboard, stdin.lock(), &mut stdout)?;
                }
                Mode::Range => {
                    let mut store = RangeStore::new(roster);
                    repl::run_range(&mut store, &mut clipboard, stdin.lock(), &mut stdout)?;
                }
            }
        }
        Command::Zones => {
            print!("{}", render_classification(&roster));
        }
        Command::Format { assign, out, copy } => {
            let mut store = AssignmentStore::new(roster);
            for (person_id, zone_id) in &assign {
                if store.roster().person(person_id).is_none() || store.roster().zone(zone_id).is_none() {
                    tracing::warn!(%person_id, %zone_id, "skipping unknown pairing");
                    continue;
                }
                if store.state().selected.as_deref() != Some(person_id.as_str()) {
                    store.select_person(person_id);
                }
                store.assign_to_zone(zone_id);
            }

            let text = store.result_text();
            println!("{}", text);

            if let Some(path) = out {
                write_result_to_file(&path, &text)?;
                println!("Result saved to {}", path.display());
            }
            if copy {
                let notice = store.copy_result(&mut SystemClipboard::detect());
                println!("{}", format_notice(&notice));
            }
        }
    }

    Ok(())
}
