mod render;
mod shell;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use countdown_core::{
    parse_date, Clock, CountdownController, EventId, EventStore, HttpEventStore, Outcome, SystemClock, UpdateEvent,
    DEFAULT_ORIGIN,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "countdown")]
#[command(about = "Count the days left until your events")]
struct Cli {
    /// Backend origin, e.g. http://localhost:8080
    #[arg(long, global = true, env = "COUNTDOWN_API_URL", default_value = DEFAULT_ORIGIN)]
    api_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show every event with its days left
    List,
    /// Save a new event
    Add {
        title: String,

        /// Target date (YYYY-MM-DD)
        date: String,
    },
    /// Delete an event by id
    Delete {
        id: EventId,
    },
    /// Replace an event's title and date
    Edit {
        id: EventId,
        title: String,

        /// Target date (YYYY-MM-DD)
        date: String,
    },
    /// Interactive session that keeps the list in memory
    Shell,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut view = CountdownController::new(HttpEventStore::new(&cli.api_url));
    let backend = view.store().client().collection_url().to_string();

    match cli.command {
        Commands::List => {
            require(view.load().await, "could not load events", &backend)?;
            print!("{}", render::event_list(&view.countdowns(&SystemClock.now())));
        }
        Commands::Add { title, date } => {
            view.set_pending_title(title);
            view.set_pending_date(date);
            match view.add().await {
                Outcome::Applied => {
                    if let Some(event) = view.events().last() {
                        println!("{}", render::event_line(event, &SystemClock.now()));
                    }
                }
                Outcome::Skipped => bail!("both a title and a date are required"),
                Outcome::Failed => bail!("could not save event to {backend}"),
            }
        }
        Commands::Delete { id } => {
            require(view.delete(id).await, "could not delete event", &backend)?;
            println!("deleted #{id}");
        }
        Commands::Edit { id, title, date } => {
            let update = UpdateEvent {
                title,
                date: parse_date(&date)?,
            };
            let event = view.store().update_event(id, update).await?;
            println!("{}", render::event_line(&event, &SystemClock.now()));
        }
        Commands::Shell => shell::run(view, &SystemClock).await?,
    }

    Ok(())
}

fn require(outcome: Outcome, message: &str, backend: &str) -> Result<()> {
    if outcome == Outcome::Failed {
        bail!("{message} at {backend} (run with RUST_LOG=debug for details)");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn every_subcommand_has_help_text() {
        let cli = Cli::command();
        for sub in cli.get_subcommands() {
            assert!(sub.get_about().is_some(), "`{}` has no description", sub.get_name());
        }
    }

    #[test]
    fn delete_parses_a_numeric_id() {
        let cli = Cli::try_parse_from(["countdown", "delete", "7"]).unwrap();
        assert!(matches!(cli.command, Commands::Delete { id } if id == EventId(7)));
        assert!(Cli::try_parse_from(["countdown", "delete", "seven"]).is_err());
    }
}
