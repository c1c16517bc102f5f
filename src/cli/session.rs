use anyhow::Result;
use std::io::{BufRead, Write};
use tracing::debug;

use crate::application::BudgetController;
use crate::domain::Kind;
use crate::presentation::{Page, Presenter};

pub const HELP: &str = "\
Commands:
  add [income|expense] <description> <value>   add an item (kind defaults to the selected type)
  type [income|expense]                        select the item type (toggles without argument)
  delete <element-id>                          delete an item, e.g. 'delete expense-0'
  show                                         print the budget
  json                                         print the budget as JSON
  help                                         show this help
  quit                                         leave the session

Quote descriptions with spaces: add expense \"Weekly groceries\" 85.50";

/// One line of session input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    Add {
        kind: Option<Kind>,
        description: String,
        value: String,
    },
    Type(Option<Kind>),
    Delete(String),
    Show,
    Json,
    Help,
    Quit,
}

/// Parse one input line. Blank lines and `#` comments yield `Ok(None)`.
pub fn parse_command(line: &str) -> Result<Option<SessionCommand>, String> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let words = shell_words::split(line).map_err(|e| format!("Cannot parse '{}': {}", line, e))?;
    let Some((name, args)) = words.split_first() else {
        return Ok(None);
    };

    let command = match name.to_lowercase().as_str() {
        "add" | "a" => parse_add(args)?,
        "type" | "t" => match args {
            [] => SessionCommand::Type(None),
            [kind] => SessionCommand::Type(Some(
                Kind::from_str(kind).ok_or_else(|| format!("Unknown type '{}'", kind))?,
            )),
            _ => return Err("Usage: type [income|expense]".to_string()),
        },
        "delete" | "del" | "rm" => match args {
            [element_id] => SessionCommand::Delete(element_id.clone()),
            _ => return Err("Usage: delete <element-id>".to_string()),
        },
        "show" | "ls" => SessionCommand::Show,
        "json" => SessionCommand::Json,
        "help" | "?" => SessionCommand::Help,
        "quit" | "exit" | "q" => SessionCommand::Quit,
        other => return Err(format!("Unknown command '{}'. Type 'help' for a list.", other)),
    };

    Ok(Some(command))
}

/// `[kind] <description...> <value>`; the kind is only taken from the first
/// word when a description and value follow it.
fn parse_add(args: &[String]) -> Result<SessionCommand, String> {
    let (kind, rest) = match args {
        [first, rest @ ..] if rest.len() >= 2 => match Kind::from_str(first) {
            Some(kind) => (Some(kind), rest),
            None => (None, args),
        },
        _ => (None, args),
    };

    let Some((value, description)) = rest.split_last() else {
        return Err("Usage: add [income|expense] <description> <value>".to_string());
    };

    Ok(SessionCommand::Add {
        kind,
        description: description.join(" "),
        value: value.clone(),
    })
}

/// Whether the session should keep reading input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Drives a controller from text commands.
pub struct Session<W: Write> {
    controller: BudgetController<Page>,
    out: W,
    /// Print the page after every change, as an interactive view would.
    echo: bool,
}

impl<W: Write> Session<W> {
    pub fn new(controller: BudgetController<Page>, out: W, echo: bool) -> Self {
        Self {
            controller,
            out,
            echo,
        }
    }

    pub fn controller(&self) -> &BudgetController<Page> {
        &self.controller
    }

    pub fn into_parts(self) -> (BudgetController<Page>, W) {
        (self.controller, self.out)
    }

    /// Parse and run one line of input.
    pub fn handle_line(&mut self, line: &str) -> Result<Flow> {
        match parse_command(line) {
            Ok(Some(command)) => self.execute(command),
            Ok(None) => Ok(Flow::Continue),
            Err(message) => {
                writeln!(self.out, "{}", message)?;
                Ok(Flow::Continue)
            }
        }
    }

    pub fn execute(&mut self, command: SessionCommand) -> Result<Flow> {
        match command {
            SessionCommand::Add {
                kind,
                description,
                value,
            } => {
                let page = self.controller.view_mut();
                let kind = kind.unwrap_or(page.form().kind);
                page.fill_form(kind, description, value);

                // Rejected input is dropped without touching the view
                if self.controller.add_item().is_ok() {
                    self.echo_page()?;
                }
            }

            SessionCommand::Type(kind) => {
                let page = self.controller.view_mut();
                let selected = match kind {
                    Some(kind) => {
                        page.select_kind(kind);
                        kind
                    }
                    None => page.toggle_kind(),
                };
                debug!(kind = %selected, "type selected");
                if self.echo {
                    writeln!(self.out, "Type: {}", selected)?;
                }
            }

            SessionCommand::Delete(element_id) => {
                if self.controller.delete_item(&element_id).is_ok() {
                    self.echo_page()?;
                }
            }

            SessionCommand::Show => {
                write!(self.out, "{}", self.controller.view())?;
            }

            SessionCommand::Json => {
                let report = self.controller.report();
                writeln!(self.out, "{}", serde_json::to_string_pretty(&report)?)?;
            }

            SessionCommand::Help => {
                writeln!(self.out, "{}", HELP)?;
            }

            SessionCommand::Quit => return Ok(Flow::Quit),
        }

        Ok(Flow::Continue)
    }

    /// Run every line from `input` until it ends or a `quit` is read.
    pub fn run_script<R: BufRead>(&mut self, input: R) -> Result<()> {
        for line in input.lines() {
            if self.handle_line(&line?)? == Flow::Quit {
                break;
            }
        }
        Ok(())
    }

    /// Interactive loop with a prompt showing the selected type.
    pub fn run_interactive<R: BufRead>(&mut self, mut input: R) -> Result<()> {
        write!(self.out, "{}", self.controller.view())?;
        writeln!(self.out, "Type 'help' for commands.")?;

        let mut line = String::new();
        loop {
            write!(self.out, "[{}] > ", self.controller.view().read_input().kind)?;
            self.out.flush()?;

            line.clear();
            if input.read_line(&mut line)? == 0 {
                writeln!(self.out)?;
                break;
            }
            if self.handle_line(&line)? == Flow::Quit {
                break;
            }
        }
        Ok(())
    }

    fn echo_page(&mut self) -> Result<()> {
        if self.echo {
            write!(self.out, "{}", self.controller.view())?;
        }
        Ok(())
    }
}
