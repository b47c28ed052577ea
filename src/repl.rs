//! Line-oriented driver for both interaction modes.

use std::io::{self, BufRead, Write};

use crate::board::{AssignmentStore, Notice, RangeStore};
use crate::clipboard::Clipboard;
use crate::display::{format_notice, render_board, render_range_board};

const TOGGLE_HELP: &str = "\
commands:
  select <person-id>     select (or deselect) a person
  assign <zone-id>       place the selected person, swapping out any occupant
  unassign <person-id>   remove a person from their zone
  unassign-selected      remove the selected person from their zone
  reset                  clear every assignment
  board                  show the board
  result                 show the result text
  copy                   copy the result to the clipboard
  quit";

const RANGE_HELP: &str = "\
commands:
  zone <index>           mark range start, then end; a third pick restarts
  pick <person-id>       place a person into the next empty zone in range
  clear <zone-id>        empty a zone
  reset                  clear every assignment and the range
  board                  show the board
  result                 show the result text
  copy                   copy the result to the clipboard
  quit";

/// One parsed input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Select(String),
    Assign(String),
    Unassign(String),
    UnassignSelected,
    Zone(usize),
    Pick(String),
    Clear(String),
    Reset,
    Board,
    Result,
    Copy,
    Help,
    Quit,
}

pub fn parse_command(line: &str) -> Result<Command, String> {
    let mut parts = line.split_whitespace();
    let Some(verb) = parts.next() else {
        return Err("empty command".to_string());
    };
    let arg = parts.next();

    let need = |arg: Option<&str>, what: &str| {
        arg.map(str::to_string).ok_or_else(|| format!("`{}` needs a {}", verb, what))
    };

    match verb {
        "select" | "s" => need(arg, "person id").map(Command::Select),
        "assign" | "a" => need(arg, "zone id").map(Command::Assign),
        "unassign" | "u" => need(arg, "person id").map(Command::Unassign),
        "unassign-selected" => Ok(Command::UnassignSelected),
        "zone" | "z" => {
            let raw = need(arg, "zone index")?;
            raw.parse()
                .map(Command::Zone)
                .map_err(|_| format!("`{}` is not a zone index", raw))
        }
        "pick" | "p" => need(arg, "person id").map(Command::Pick),
        "clear" => need(arg, "zone id").map(Command::Clear),
        "reset" => Ok(Command::Reset),
        "board" | "b" => Ok(Command::Board),
        "result" | "r" => Ok(Command::Result),
        "copy" | "c" => Ok(Command::Copy),
        "help" | "h" | "?" => Ok(Command::Help),
        "quit" | "q" | "exit" => Ok(Command::Quit),
        other => Err(format!("unknown command `{}` (try `help`)", other)),
    }
}

fn write_notice<W: Write>(out: &mut W, notice: &Notice) -> io::Result<()> {
    writeln!(out, "{}", format_notice(notice))
}

/// Runs select-then-place mode until `quit` or end of input
pub fn run_toggle<R: BufRead, W: Write>(
    store: &mut AssignmentStore,
    clipboard: &mut dyn Clipboard,
    input: R,
    out: &mut W,
) -> io::Result<()> {
    writeln!(out, "{}", render_board(store.roster(), store.assignments(), store.selected()))?;

    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(msg) => {
                writeln!(out, "{}", msg)?;
                continue;
            }
        };

        match command {
            Command::Select(pid) => store.select_person(&pid),
            Command::Assign(zid) => store.assign_to_zone(&zid),
            Command::Unassign(pid) => store.unassign_person(&pid),
            Command::UnassignSelected => store.unassign_selected(),
            Command::Reset => write_notice(out, &store.reset_all())?,
            Command::Board => {}
            Command::Result => {
                writeln!(out, "{}", store.result_text())?;
                continue;
            }
            Command::Copy => {
                write_notice(out, &store.copy_result(clipboard))?;
                continue;
            }
            Command::Help => {
                writeln!(out, "{}", TOGGLE_HELP)?;
                continue;
            }
            Command::Quit => break,
            Command::Zone(_) | Command::Pick(_) | Command::Clear(_) => {
                writeln!(out, "range commands are not available in toggle mode")?;
                continue;
            }
        }

        writeln!(out, "{}", render_board(store.roster(), store.assignments(), store.selected()))?;
    }

    Ok(())
}

/// Runs range-then-fill mode until `quit` or end of input
pub fn run_range<R: BufRead, W: Write>(
    store: &mut RangeStore,
    clipboard: &mut dyn Clipboard,
    input: R,
    out: &mut W,
) -> io::Result<()> {
    writeln!(out, "{}", render_range_board(store))?;

    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(msg) => {
                writeln!(out, "{}", msg)?;
                continue;
            }
        };

        match command {
            Command::Zone(idx) => store.pick_zone_index(idx),
            Command::Pick(pid) => store.pick_person(&pid),
            Command::Clear(zid) => store.unassign_zone(&zid),
            Command::Reset => write_notice(out, &store.reset())?,
            Command::Board => {}
            Command::Result => {
                writeln!(out, "{}", store.result_text())?;
                continue;
            }
            Command::Copy => {
                write_notice(out, &store.copy_result(clipboard))?;
                continue;
            }
            Command::Help => {
                writeln!(out, "{}", RANGE_HELP)?;
                continue;
            }
            Command::Quit => break,
            Command::Select(_) | Command::Assign(_) | Command::Unassign(_) | Command::UnassignSelected => {
                writeln!(out, "toggle commands are not available in range mode")?;
                continue;
            }
        }

        writeln!(out, "{}", render_range_board(store))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clipboard::MemoryClipboard;
    use crate::model::{Person, Roster, Zone};
    use std::io::Cursor;

    fn roster() -> Roster {
        Roster::new(
            vec![Person::new("a", "Alice"), Person::new("b", "Bob")],
            vec![Zone::new("z1", "Lounge").with_order(1), Zone::new("z2", "Shower(3)").with_order(2)],
        )
        .unwrap()
    }

    fn run_toggle_script(script: &str, clipboard: &mut MemoryClipboard) -> (AssignmentStore, String) {
        let mut store = AssignmentStore::new(roster());
        let mut out = Vec::new();
        run_toggle(&mut store, clipboard, Cursor::new(script), &mut out).unwrap();
        (store, String::from_utf8(out).unwrap())
    }

    #[test]
    fn parses_commands_and_aliases() {
        assert_eq!(parse_command("select a"), Ok(Command::Select("a".to_string())));
        assert_eq!(parse_command("  a   z1 "), Ok(Command::Assign("z1".to_string())));
        assert_eq!(parse_command("zone 3"), Ok(Command::Zone(3)));
        assert_eq!(parse_command("q"), Ok(Command::Quit));
        assert!(parse_command("zone x").is_err());
        assert!(parse_command("select").is_err());
        assert!(parse_command("dance").is_err());
    }

    #[test]
    fn toggle_script_assigns_and_copies() {
        let mut clipboard = MemoryClipboard::default();
        let (store, out) = run_toggle_script(
            "select b\nassign z2\nselect a\nassign z1\ncopy\nquit\nselect b\n",
            &mut clipboard,
        );

        assert_eq!(store.result_text(), "Alice - Lounge\nBob - Shower junior");
        assert_eq!(clipboard.contents(), Some("Alice - Lounge\nBob - Shower junior"));
        assert!(out.contains("** Copied"));
        // quit stops before the trailing select
        assert_eq!(store.selected().map(|p| p.id.as_str()), Some("a"));
    }

    #[test]
    fn bad_commands_do_not_change_state() {
        let mut clipboard = MemoryClipboard::default();
        let (store, out) = run_toggle_script("dance\nzone 1\nassign\n", &mut clipboard);
        assert!(out.contains("unknown command `dance`"));
        assert!(out.contains("range commands are not available"));
        assert!(out.contains("`assign` needs a zone id"));
        assert_eq!(store.assignments().assigned_count(), 0);
    }

    #[test]
    fn reset_and_failed_copy_each_print_one_notice() {
        let mut clipboard = MemoryClipboard::failing();
        let (_, out) = run_toggle_script("select a\nassign z1\nreset\ncopy\n", &mut clipboard);
        assert_eq!(out.matches("** Reset complete").count(), 1);
        assert_eq!(out.matches("!! Copy failed").count(), 1);
    }

    #[test]
    fn range_script_fills_in_order() {
        let mut store = RangeStore::new(roster());
        let mut clipboard = MemoryClipboard::default();
        let mut out = Vec::new();
        run_range(
            &mut store,
            &mut clipboard,
            Cursor::new("zone 0\nzone 1\npick b\npick a\nresult\n"),
            &mut out,
        )
        .unwrap();

        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("Bob - Lounge\nAlice - Shower junior"));
    }
}
