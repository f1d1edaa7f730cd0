//! Interactive session over a single mounted controller.
//!
//! The list is loaded once on start and afterwards only changes through
//! confirmed adds and deletes, or an explicit `reload`.

use anyhow::Result;
use countdown_core::{Clock, CountdownController, EventId, EventStore, Outcome};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::render;

const HELP: &str = "\
commands:
  title <text>    set the pending title
  date <date>     set the pending date (YYYY-MM-DD)
  add             save the pending event
  delete <id>     delete an event
  list            show events
  reload          fetch the list again
  quit";

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Title(String),
    Date(String),
    Add,
    Delete(EventId),
    List,
    Reload,
    Help,
    Quit,
}

fn parse(line: &str) -> Result<Option<Command>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let rest = rest.trim();
    let command = match word {
        "title" => Command::Title(rest.to_string()),
        "date" => Command::Date(rest.to_string()),
        "add" => Command::Add,
        "delete" | "rm" => {
            let id = rest.parse().map_err(|_| format!("not an event id: {rest:?}"))?;
            Command::Delete(id)
        }
        "list" | "ls" => Command::List,
        "reload" => Command::Reload,
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        other => return Err(format!("unknown command: {other} (try `help`)")),
    };
    Ok(Some(command))
}

pub async fn run<S: EventStore>(mut view: CountdownController<S>, clock: &impl Clock) -> Result<()> {
    if view.load().await == Outcome::Failed {
        eprintln!("could not load events; starting with an empty list");
    }
    print!("{}", render::event_list(&view.countdowns(&clock.now())));
    println!("type `help` for commands");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let command = match parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(message) => {
                eprintln!("{message}");
                continue;
            }
        };
        match command {
            Command::Title(title) => view.set_pending_title(title),
            Command::Date(date) => view.set_pending_date(date),
            Command::Add => match view.add().await {
                Outcome::Applied => print!("{}", render::event_list(&view.countdowns(&clock.now()))),
                Outcome::Skipped => eprintln!("set both `title` and `date` first"),
                Outcome::Failed => eprintln!("could not save event"),
            },
            Command::Delete(id) => match view.delete(id).await {
                Outcome::Failed => eprintln!("could not delete #{id}"),
                _ => print!("{}", render::event_list(&view.countdowns(&clock.now()))),
            },
            Command::List => print!("{}", render::event_list(&view.countdowns(&clock.now()))),
            Command::Reload => {
                if view.load().await == Outcome::Failed {
                    eprintln!("could not load events");
                }
                print!("{}", render::event_list(&view.countdowns(&clock.now())));
            }
            Command::Help => println!("{HELP}"),
            Command::Quit => break,
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_lines_are_ignored() {
        assert_eq!(parse("   "), Ok(None));
    }

    #[test]
    fn title_keeps_inner_spaces() {
        assert_eq!(parse("title  Summer holiday "), Ok(Some(Command::Title("Summer holiday".to_string()))));
    }

    #[test]
    fn bare_title_clears_the_field() {
        assert_eq!(parse("title"), Ok(Some(Command::Title(String::new()))));
    }

    #[test]
    fn delete_needs_a_numeric_id() {
        assert_eq!(parse("delete 4"), Ok(Some(Command::Delete(EventId(4)))));
        assert!(parse("delete four").is_err());
    }

    #[test]
    fn aliases_and_unknown_words() {
        assert_eq!(parse("q"), Ok(Some(Command::Quit)));
        assert_eq!(parse("ls"), Ok(Some(Command::List)));
        assert!(parse("frobnicate").unwrap_err().contains("unknown command"));
    }
}
