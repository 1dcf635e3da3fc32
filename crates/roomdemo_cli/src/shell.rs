//! Interactive form loop.
//!
//! Each input line is one edit or button press; the screen is re-rendered
//! after every button press.

use crate::render;
use roomdemo_core::{ProductScreen, ScreenAction, ScreenError};
use std::io::{BufRead, Write};

const HELP: &str = "\
commands:
  name <text>      set the product name field
  quantity <text>  set the quantity field
  add | search | delete | clear
  show             re-render the screen
  help             show this help
  quit             leave the shell
";

enum ShellCommand<'a> {
    SetName(&'a str),
    SetQuantity(&'a str),
    Press(ScreenAction),
    Show,
    Help,
    Quit,
    Unknown(&'a str),
}

fn parse_line(line: &str) -> Option<ShellCommand<'_>> {
    let line = line.trim_end_matches(['\n', '\r']);
    let (word, rest) = match line.trim_start().split_once(' ') {
        Some((word, rest)) => (word, rest),
        None => (line.trim(), ""),
    };
    let command = match word {
        "" => return None,
        "name" => ShellCommand::SetName(rest),
        "quantity" => ShellCommand::SetQuantity(rest),
        "add" => ShellCommand::Press(ScreenAction::Add),
        "search" => ShellCommand::Press(ScreenAction::Search),
        "delete" => ShellCommand::Press(ScreenAction::Delete),
        "clear" => ShellCommand::Press(ScreenAction::Clear),
        "show" => ShellCommand::Show,
        "help" => ShellCommand::Help,
        "quit" | "exit" => ShellCommand::Quit,
        other => ShellCommand::Unknown(other),
    };
    Some(command)
}

/// Runs the form until `quit` or end of input.
pub fn run(
    screen: &mut ProductScreen,
    input: impl BufRead,
    mut output: impl Write,
) -> Result<(), String> {
    let io_err = |err: std::io::Error| format!("shell I/O failed: {err}");
    show(screen, &mut output)?;

    for line in input.lines() {
        let line = line.map_err(io_err)?;
        let Some(command) = parse_line(&line) else {
            continue;
        };
        match command {
            ShellCommand::SetName(text) => screen.set_name(text),
            ShellCommand::SetQuantity(text) => screen.set_quantity(text),
            ShellCommand::Press(action) => {
                match screen.press(action) {
                    // The form already carries the message; it is rendered below.
                    Ok(()) | Err(ScreenError::Form(_)) => {}
                    Err(err @ ScreenError::ViewModel(_)) => return Err(err.to_string()),
                }
                show(screen, &mut output)?;
            }
            ShellCommand::Show => show(screen, &mut output)?,
            ShellCommand::Help => output.write_all(HELP.as_bytes()).map_err(io_err)?,
            ShellCommand::Quit => break,
            ShellCommand::Unknown(word) => {
                writeln!(output, "unknown command `{word}`; type `help`").map_err(io_err)?
            }
        }
    }
    output.flush().map_err(io_err)
}

fn show(screen: &ProductScreen, output: &mut impl Write) -> Result<(), String> {
    screen.view_model().wait_idle().map_err(|err| err.to_string())?;
    output
        .write_all(render::screen(screen).as_bytes())
        .map_err(|err| format!("shell I/O failed: {err}"))
}
