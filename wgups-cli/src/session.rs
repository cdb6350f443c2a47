//! Interactive status session over a dispatched [`Depot`].
//!
//! Commands and prompts are looked up by name in [`Table`]s, so the set of
//! commands and the prompt texts can be changed without touching the loop.

use std::io::{BufRead, Write};

use wgups_core::Table;
use wgups_router::Depot;

use crate::CliError;
use crate::input::{parse_package_id, parse_query_time};
use crate::render::{comprehensive_report, distance_message, individual_report};

/// Actions a session command can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SessionCommand {
    /// Print the total distance driven.
    Distance,
    /// Report on a single package.
    Package,
    /// Report on every package.
    All,
    /// Clear the terminal.
    Clear,
    /// Leave the session.
    Exit,
}

/// Maps typed command names to actions.
#[derive(Debug, Clone)]
pub(crate) struct Commander {
    commands: Table<String, SessionCommand>,
}

impl Commander {
    /// A commander with no commands.
    pub(crate) fn new() -> Self {
        Self {
            commands: Table::new(),
        }
    }

    /// Register `name`, replacing any earlier action for it.
    pub(crate) fn register(&mut self, name: &str, command: SessionCommand) {
        self.commands.set(name.to_owned(), command);
    }

    /// Action registered for `name`.
    pub(crate) fn lookup(&self, name: &str) -> Option<SessionCommand> {
        self.commands.get(name).copied()
    }

    /// Registered command names in table order.
    pub(crate) fn options(&self) -> Vec<&str> {
        self.commands.keys().map(String::as_str).collect()
    }
}

impl Default for Commander {
    fn default() -> Self {
        let mut commander = Self::new();
        commander.register("distance", SessionCommand::Distance);
        commander.register("package", SessionCommand::Package);
        commander.register("all", SessionCommand::All);
        commander.register("clear", SessionCommand::Clear);
        commander.register("exit", SessionCommand::Exit);
        commander
    }
}

/// Maps prompt names to the text shown before reading a line.
#[derive(Debug, Clone)]
pub(crate) struct Prompter {
    prompts: Table<String, String>,
}

impl Prompter {
    /// A prompter with no prompts.
    pub(crate) fn new() -> Self {
        Self {
            prompts: Table::new(),
        }
    }

    /// Register or replace the text for `name`.
    pub(crate) fn register(&mut self, name: impl Into<String>, text: impl Into<String>) {
        self.prompts.set(name.into(), text.into());
    }

    /// Text registered for `name`, or the name itself as a fallback.
    pub(crate) fn text<'a>(&'a self, name: &'a str) -> &'a str {
        self.prompts.get(name).map_or(name, String::as_str)
    }
}

impl Default for Prompter {
    fn default() -> Self {
        let mut prompter = Self::new();
        prompter.register(
            "options",
            "Enter a command (distance, package, all, clear, exit): ",
        );
        prompter.register("package", "Enter a package ID: ");
        prompter.register("time", "Enter a time (HH:MM:SS): ");
        prompter
    }
}

impl<S: Into<String>> Extend<(S, S)> for Prompter {
    fn extend<I: IntoIterator<Item = (S, S)>>(&mut self, iter: I) {
        for (name, text) in iter {
            self.register(name, text);
        }
    }
}

/// Prompt loop answering status queries until `exit` or end of input.
pub(crate) struct Session<R, W> {
    depot: Depot,
    commander: Commander,
    prompter: Prompter,
    input: R,
    output: W,
    running: bool,
}

impl<R: BufRead, W: Write> Session<R, W> {
    /// Create a session over an already dispatched depot.
    pub(crate) fn new(depot: Depot, prompter: Prompter, input: R, output: W) -> Self {
        Self {
            depot,
            commander: Commander::default(),
            prompter,
            input,
            output,
            running: false,
        }
    }

    /// Run until `exit` is entered or the input ends.
    pub(crate) fn run(&mut self) -> Result<(), CliError> {
        self.running = true;
        while self.running {
            match self.prompt("options")? {
                Some(command) => self.execute(command.trim())?,
                None => self.running = false,
            }
        }
        Ok(())
    }

    /// Execute a single command by name.
    pub(crate) fn execute(&mut self, name: &str) -> Result<(), CliError> {
        match self.commander.lookup(name) {
            Some(SessionCommand::Distance) => self.route_distance(),
            Some(SessionCommand::Package) => self.package_report(),
            Some(SessionCommand::All) => self.packages_report(),
            Some(SessionCommand::Clear) => self.write("\x1b[2J\x1b[H"),
            Some(SessionCommand::Exit) => {
                self.running = false;
                Ok(())
            }
            None => {
                let options = self.commander.options().join(", ");
                self.write(&format!(
                    "\nInvalid Command: \"{name}\"\nAvailable commands: {options}\n\n"
                ))
            }
        }
    }

    fn route_distance(&mut self) -> Result<(), CliError> {
        let message = match self.depot.last_summary() {
            Some(summary) => distance_message(summary),
            None => distance_message(self.depot.deliver_packages()?),
        };
        self.write(&message)
    }

    fn package_report(&mut self) -> Result<(), CliError> {
        let Some(id_text) = self.prompt("package")? else {
            return Ok(());
        };
        let id = match parse_package_id(&id_text, self.depot.packages()) {
            Ok(id) => id,
            Err(err) => return self.write(&format!("\n{err}\n\n")),
        };
        let Some(time_text) = self.prompt("time")? else {
            return Ok(());
        };
        let text = parse_query_time(&time_text).map_or_else(
            |err| format!("\n{err}\n\n"),
            |time| {
                self.depot
                    .package(id)
                    .map(|package| individual_report(package, &time))
                    .unwrap_or_default()
            },
        );
        self.write(&text)
    }

    fn packages_report(&mut self) -> Result<(), CliError> {
        let Some(answer) = self.prompt("time")? else {
            return Ok(());
        };
        let text = parse_query_time(&answer).map_or_else(
            |err| format!("\n{err}\n\n"),
            |time| comprehensive_report(self.depot.packages(), &time),
        );
        self.write(&text)
    }

    /// Show the prompt registered as `name` and read one line.
    ///
    /// Returns `None` once the input is exhausted.
    fn prompt(&mut self, name: &str) -> Result<Option<String>, CliError> {
        let text = self.prompter.text(name).to_owned();
        self.write(&text)?;
        self.output.flush().map_err(CliError::WriteOutput)?;
        let mut line = Vec::new();
        let read = self
            .input
            .read_until(b'\n', &mut line)
            .map_err(CliError::ReadInput)?;
        if read == 0 {
            return Ok(None);
        }
        // Undecodable bytes become U+FFFD and fail as an ordinary bad answer.
        let text = String::from_utf8_lossy(&line);
        Ok(Some(text.trim_end_matches(['\r', '\n']).to_owned()))
    }

    fn write(&mut self, text: &str) -> Result<(), CliError> {
        self.output
            .write_all(text.as_bytes())
            .map_err(CliError::WriteOutput)
    }
}
