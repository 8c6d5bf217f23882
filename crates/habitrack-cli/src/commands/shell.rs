//! Interactive shell over the list and detail views.
//!
//! Reads one command per line from stdin, applies it to the active view's
//! controller and prints the re-rendered view. The habit collection exists
//! only for the lifetime of the session.

use clap::{Args, CommandFactory, Parser, Subcommand};
use habitrack_core::{AppState, DayKey, Navigation, Route, Router};
use std::io::{BufRead, IsTerminal, Write};

use super::days::{parse_day, parse_strip_days};
use crate::render;

#[derive(Args)]
pub struct ShellArgs {
    /// Width of the completion strip, 1 to 31 (default: strip.days from config)
    #[arg(long, value_parser = parse_strip_days)]
    days: Option<usize>,
    /// Treat this date as today, YYYY-MM-DD
    #[arg(long, value_parser = parse_day)]
    today: Option<DayKey>,
    /// Print each rendered view as one JSON line
    #[arg(long)]
    json: bool,
}

/// One line of shell input.
#[derive(Parser)]
#[command(
    name = "shell",
    no_binary_name = true,
    disable_help_flag = true,
    disable_version_flag = true,
    disable_help_subcommand = true
)]
struct ShellLine {
    #[command(subcommand)]
    command: ShellCommand,
}

#[derive(Subcommand)]
enum ShellCommand {
    /// Go to the habit list
    #[command(alias = "ls")]
    List,
    /// Show the current view again
    Show,
    /// Open a habit's detail view
    Open { id: String },
    /// Leave the detail view
    Back,
    /// Go to a path: / or /habits/<id>
    Route { path: String },
    /// Show or hide the create form (list)
    New,
    /// Create a habit (list)
    Create {
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        title: Vec<String>,
    },
    /// Open the edit dialog and optionally save a title: `edit <id> [title]` on
    /// the list, `edit [title]` on a detail view
    Edit {
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// Save the open edit dialog
    Save {
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        title: Vec<String>,
    },
    /// Close the open edit dialog
    Cancel,
    /// Flip a day on the detail view, by date or strip position (1 = oldest)
    Toggle { day: String },
    /// Delete a habit: `delete <id>` on the list, `delete` on a detail view
    #[command(alias = "rm")]
    Delete { id: Option<String> },
    /// List commands
    Help,
    /// End the session
    #[command(alias = "exit")]
    Quit,
}

struct Session {
    state: AppState,
    router: Router,
    json: bool,
}

enum Flow {
    Continue,
    Quit,
}

pub fn run(args: ShellArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut state = AppState::load()?;
    if let Some(days) = args.days {
        state = state.with_strip_days(days);
    }
    if let Some(today) = args.today {
        state = state.pin_today(today);
    }
    tracing::info!(habits = state.store().len(), days = state.strip_days(), "shell started");

    let mut session = Session {
        state,
        router: Router::new(),
        json: args.json,
    };
    let interactive = std::io::stdin().is_terminal();

    session.print_view();
    let stdin = std::io::stdin();
    let mut lines = stdin.lock().split(b'\n');
    loop {
        if interactive {
            print!("{}> ", session.router.route());
            std::io::stdout().flush()?;
        }
        let Some(bytes) = lines.next() else {
            break;
        };
        let bytes = bytes?;
        let line = String::from_utf8_lossy(&bytes);
        let words: Vec<&str> = line.split_whitespace().collect();
        if words.is_empty() || words[0].starts_with('#') {
            continue;
        }

        let command = match ShellLine::try_parse_from(words) {
            Ok(parsed) => parsed.command,
            Err(err) => {
                eprintln!("error: {}", first_line(&err.to_string()));
                continue;
            }
        };
        if let Flow::Quit = session.apply(command) {
            break;
        }
    }
    tracing::info!(habits = session.state.store().len(), "shell finished, discarding habits");
    Ok(())
}

fn reject(message: &str) -> Flow {
    eprintln!("error: {message}");
    Flow::Continue
}

fn first_line(message: &str) -> &str {
    message.lines().next().unwrap_or(message).trim_start_matches("error: ")
}

impl Session {
    fn apply(&mut self, command: ShellCommand) -> Flow {
        let on_detail = matches!(self.router.route(), Route::Detail(_));
        let navigation = match command {
            ShellCommand::Quit => return Flow::Quit,
            ShellCommand::Help => {
                let help = ShellLine::command().render_long_help();
                println!("{help}");
                return Flow::Continue;
            }
            ShellCommand::Show => Navigation::Stay,
            ShellCommand::List => Navigation::ToList,
            ShellCommand::Back => match self.router.detail() {
                Some(detail) => detail.back(),
                None => Navigation::Stay,
            },
            ShellCommand::Open { id } => self.router.list().open_detail(&id),
            ShellCommand::Route { path } => match Route::parse(&path) {
                Some(route) => {
                    self.router.go(route);
                    Navigation::Stay
                }
                None => return reject(&format!("unknown route: {path}")),
            },
            ShellCommand::New if !on_detail => {
                self.router.list().toggle_create_form();
                Navigation::Stay
            }
            ShellCommand::Create { title } if !on_detail => {
                self.router.list().submit_create(&mut self.state, &title.join(" "))
            }
            ShellCommand::New | ShellCommand::Create { .. } => {
                return reject("habits are created from the list (`list` first)")
            }
            ShellCommand::Edit { args } => self.edit(args),
            ShellCommand::Save { title } => {
                let title = title.join(" ");
                match self.router.detail() {
                    Some(detail) => detail.submit_edit(&mut self.state, &title),
                    None => self.router.list().submit_edit(&mut self.state, &title),
                }
            }
            ShellCommand::Cancel => {
                match self.router.detail() {
                    Some(detail) => detail.cancel_edit(),
                    None => self.router.list().cancel_edit(),
                }
                Navigation::Stay
            }
            ShellCommand::Toggle { day } => match self.resolve_day(&day) {
                Ok(day) => match self.router.detail() {
                    Some(detail) => detail.toggle_day(&mut self.state, day),
                    None => return reject("open a habit to toggle its days"),
                },
                Err(message) => return reject(&message),
            },
            ShellCommand::Delete { id } if on_detail => {
                if id.is_some() {
                    return reject("usage on a detail view: delete");
                }
                match self.router.detail() {
                    Some(detail) => detail.delete(&mut self.state),
                    None => Navigation::Stay,
                }
            }
            ShellCommand::Delete { id } => match id {
                Some(id) => self.router.list().delete(&mut self.state, &id),
                None => return reject("usage on the list: delete <id>"),
            },
        };

        self.router.navigate(navigation);
        self.report_events();
        self.print_view();
        Flow::Continue
    }

    fn edit(&mut self, args: Vec<String>) -> Navigation {
        let state = &mut self.state;
        if let Some(detail) = self.router.detail() {
            let navigation = detail.open_edit(state);
            if navigation != Navigation::Stay || args.is_empty() {
                return navigation;
            }
            return detail.submit_edit(state, &args.join(" "));
        }

        let Some((id, title)) = args.split_first() else {
            eprintln!("error: usage on the list: edit <id> [title]");
            return Navigation::Stay;
        };
        let list = self.router.list();
        let navigation = list.open_edit(state, id);
        if navigation != Navigation::Stay || title.is_empty() {
            return navigation;
        }
        list.submit_edit(state, &title.join(" "))
    }

    /// A date on the current strip, or a 1-based position on it.
    fn resolve_day(&self, raw: &str) -> Result<DayKey, String> {
        let window = self.state.window();
        if let Ok(position) = raw.parse::<usize>() {
            return position
                .checked_sub(1)
                .and_then(|index| window.get(index).copied())
                .ok_or_else(|| format!("position must be between 1 and {}", window.len()));
        }
        let day = DayKey::parse(raw).map_err(|e| e.to_string())?;
        if window.contains(&day) {
            return Ok(day);
        }
        match (window.first(), window.last()) {
            (Some(first), Some(last)) => {
                Err(format!("{day} is not on the strip ({first} to {last})"))
            }
            _ => Err(format!("{day} is not on the strip")),
        }
    }

    fn report_events(&mut self) {
        for event in self.state.store_mut().drain_events() {
            tracing::info!(id = %event.habit_id(), event = ?event, "habit changed");
            if !self.json {
                println!("* {}", event.summary());
            }
        }
    }

    fn print_view(&self) {
        let view = self.router.render(&self.state);
        if self.json {
            match serde_json::to_string(&view) {
                Ok(line) => println!("{line}"),
                Err(err) => eprintln!("error: {err}"),
            }
        } else {
            println!("{}", render::view(&view));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use habitrack_core::{Habit, HabitStore};

    fn session() -> Session {
        let store = HabitStore::with_seed([Habit::new("1", "Read"), Habit::new("2", "Run")]).unwrap();
        Session {
            state: AppState::new(store).pin_today(DayKey::parse("2024-03-10").unwrap()),
            router: Router::new(),
            json: true,
        }
    }

    fn run_line(session: &mut Session, line: &str) {
        let command = ShellLine::try_parse_from(line.split_whitespace()).unwrap().command;
        session.apply(command);
    }

    #[test]
    fn parses_multi_word_titles() {
        let line = ShellLine::try_parse_from(["create", "Read", "a", "book"]).unwrap();
        assert!(matches!(line.command, ShellCommand::Create { title } if title.join(" ") == "Read a book"));
    }

    #[test]
    fn toggle_by_position_and_date() {
        let mut s = session();
        run_line(&mut s, "open 1");
        run_line(&mut s, "toggle 5");
        run_line(&mut s, "toggle 2024-03-06");

        let habit = s.state.store().get("1").unwrap();
        assert!(habit.is_completed(DayKey::parse("2024-03-10").unwrap()));
        assert!(habit.is_completed(DayKey::parse("2024-03-06").unwrap()));
        assert_eq!(habit.completed_days().len(), 2);
    }

    #[test]
    fn resolve_day_rejects_out_of_range_positions() {
        let s = session();
        assert!(s.resolve_day("0").is_err());
        assert!(s.resolve_day("6").is_err());
        assert!(s.resolve_day("03/10").is_err());
        assert_eq!(
            s.resolve_day("1").unwrap(),
            DayKey::parse("2024-03-06").unwrap()
        );
    }

    #[test]
    fn dates_off_the_strip_are_rejected() {
        let mut s = session();
        assert_eq!(
            s.resolve_day("1999-01-01").unwrap_err(),
            "1999-01-01 is not on the strip (2024-03-06 to 2024-03-10)"
        );

        run_line(&mut s, "open 1");
        run_line(&mut s, "toggle 1999-01-01");
        assert!(s.state.store().get("1").unwrap().completed_days().is_empty());
    }

    #[test]
    fn edit_on_list_takes_id_then_title() {
        let mut s = session();
        run_line(&mut s, "edit 2 Run 5k");
        assert_eq!(s.state.store().get("2").unwrap().title(), "Run 5k");
        assert!(s.router.list().editing().is_none());
    }

    #[test]
    fn blank_edit_keeps_dialog_open_until_saved() {
        let mut s = session();
        run_line(&mut s, "open 1");
        run_line(&mut s, "edit");
        run_line(&mut s, "save");
        assert!(s.router.detail().unwrap().is_edit_open());

        run_line(&mut s, "save Read poetry");
        assert!(!s.router.detail().unwrap().is_edit_open());
        assert_eq!(s.state.store().get("1").unwrap().title(), "Read poetry");
    }

    #[test]
    fn delete_from_detail_returns_to_list() {
        let mut s = session();
        run_line(&mut s, "open 2");
        run_line(&mut s, "delete");
        assert_eq!(s.router.route(), Route::List);
        assert!(s.state.store().get("2").is_none());
    }

    #[test]
    fn create_is_rejected_on_detail_view() {
        let mut s = session();
        run_line(&mut s, "open 1");
        run_line(&mut s, "create Walk");
        assert_eq!(s.state.store().len(), 2);
    }

    #[test]
    fn quit_stops_the_session() {
        let mut s = session();
        let command = ShellLine::try_parse_from(["quit"]).unwrap().command;
        assert!(matches!(s.apply(command), Flow::Quit));
    }
}
