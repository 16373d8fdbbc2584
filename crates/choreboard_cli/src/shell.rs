//! Interactive shell session over the task store.
//!
//! # Responsibility
//! - Translate typed commands into named task store operations.
//! - Own presentation state: the selected owner, the owner filter
//!   toggle, and the rendering of the task list.
//! - Reject invalid input with a warning before it reaches the store.
//!
//! # Invariants
//! - Task numbers shown to the user are stable 1-based store indices;
//!   filtering hides rows without renumbering them.
//! - The list is re-rendered after every successful mutation.
//! - Quitting with unsaved changes always offers save/discard/cancel.

use choreboard_core::{Task, TaskRepository, TaskStore};
use std::io::{BufRead, Write};

const PROMPT: &str = "choreboard> ";

/// One typed shell command, parsed from an input line.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    List,
    Dump,
    Add(String),
    Done(usize),
    Delete(usize),
    Assign(usize),
    SelectOwner(String),
    NewOwner(String),
    Filter(bool),
    Save,
    Help,
    Quit,
}

/// Interactive session state: the store plus shell-owned UI state.
pub struct Session<R: TaskRepository> {
    store: TaskStore<R>,
    selected_owner: String,
    filter_active: bool,
}

impl<R: TaskRepository> Session<R> {
    pub fn new(store: TaskStore<R>) -> Self {
        let selected_owner = store.default_owner().to_string();
        Self {
            store,
            selected_owner,
            filter_active: false,
        }
    }

    /// Runs the read-render loop until `quit` or end of input.
    ///
    /// End of input acts like `quit`; if unsaved changes exist the
    /// save/discard/cancel prompt is still offered, and end of input
    /// at that prompt discards.
    pub fn run<I: BufRead, O: Write>(&mut self, mut input: I, mut output: O) -> std::io::Result<()> {
        writeln!(output, "choreboard {} (type `help` for commands)", choreboard_core::core_version())?;
        self.render(&mut output)?;

        let mut line = String::new();
        loop {
            write!(output, "{PROMPT}")?;
            output.flush()?;

            line.clear();
            if input.read_line(&mut line)? == 0 {
                // End of input: same exit path as `quit`.
                if self.confirm_exit(&mut input, &mut output)? {
                    return Ok(());
                }
                continue;
            }

            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }

            match parse_command(trimmed) {
                Ok(Command::Quit) => {
                    if self.confirm_exit(&mut input, &mut output)? {
                        return Ok(());
                    }
                }
                Ok(command) => self.execute(command, &mut output)?,
                Err(message) => writeln!(output, "warning: {message}")?,
            }
        }
    }

    fn execute<O: Write>(&mut self, command: Command, output: &mut O) -> std::io::Result<()> {
        match command {
            Command::List => self.render(output)?,
            Command::Dump => self.dump_json(output)?,
            Command::Add(text) => self.add_task(text, output)?,
            Command::Done(number) => {
                if self.store.toggle_done(number - 1) {
                    self.render(output)?;
                } else {
                    writeln!(output, "warning: no task {number}")?;
                }
            }
            Command::Delete(number) => {
                if self.store.delete_task(number - 1) {
                    self.render(output)?;
                } else {
                    writeln!(output, "warning: no task {number}")?;
                }
            }
            Command::Assign(number) => {
                let owner = self.selected_owner.clone();
                if self.store.change_owner(number - 1, &owner) {
                    self.render(output)?;
                } else {
                    writeln!(output, "warning: no task {number}")?;
                }
            }
            Command::SelectOwner(name) => self.select_owner(name, output)?,
            Command::NewOwner(name) => self.new_owner(name, output)?,
            Command::Filter(active) => {
                self.filter_active = active;
                self.render(output)?;
            }
            Command::Save => match self.store.save() {
                Ok(()) => writeln!(output, "saved")?,
                Err(err) => writeln!(output, "error: save failed: {err}")?,
            },
            Command::Help => print_help(output)?,
            Command::Quit => unreachable!("quit is handled by the run loop"),
        }
        Ok(())
    }

    fn add_task<O: Write>(&mut self, text: String, output: &mut O) -> std::io::Result<()> {
        let task = Task::new(text, self.selected_owner.clone());
        if let Err(err) = task.validate() {
            writeln!(output, "warning: {err}")?;
            return Ok(());
        }
        self.store.add_task(task);
        self.render(output)
    }

    fn select_owner<O: Write>(&mut self, name: String, output: &mut O) -> std::io::Result<()> {
        if !self.store.owners().contains(&name) {
            writeln!(
                output,
                "warning: unknown owner `{name}` (add with `newowner {name}`)"
            )?;
            return Ok(());
        }
        self.selected_owner = name;
        writeln!(output, "selected owner: {}", self.selected_owner)?;
        if self.filter_active {
            self.render(output)?;
        }
        Ok(())
    }

    fn new_owner<O: Write>(&mut self, name: String, output: &mut O) -> std::io::Result<()> {
        if name.trim().is_empty() {
            writeln!(output, "warning: owner name cannot be empty")?;
            return Ok(());
        }
        match self.store.add_owner(&name) {
            Ok(true) => {
                self.selected_owner = name.trim().to_string();
                writeln!(output, "added owner: {}", self.selected_owner)?;
            }
            Ok(false) => writeln!(output, "owner `{name}` already exists")?,
            Err(err) => writeln!(output, "error: owner added but save failed: {err}")?,
        }
        Ok(())
    }

    fn render<O: Write>(&self, output: &mut O) -> std::io::Result<()> {
        if self.filter_active {
            writeln!(output, "tasks (owner: {}):", self.selected_owner)?;
        } else {
            writeln!(output, "tasks:")?;
        }

        let mut shown = 0usize;
        for (index, task) in self.store.tasks().iter().enumerate() {
            if self.filter_active && task.owner != self.selected_owner {
                continue;
            }
            writeln!(output, "{}", format_task_row(index, task))?;
            shown += 1;
        }
        if shown == 0 {
            writeln!(output, "  (no tasks)")?;
        }
        Ok(())
    }

    fn dump_json<O: Write>(&self, output: &mut O) -> std::io::Result<()> {
        let snapshot = serde_json::json!({
            "owners": self.store.owners(),
            "tasks": self.store.tasks(),
        });
        writeln!(output, "{snapshot}")
    }

    /// Three-way exit prompt. Returns whether the session should end.
    fn confirm_exit<I: BufRead, O: Write>(
        &mut self,
        input: &mut I,
        output: &mut O,
    ) -> std::io::Result<bool> {
        if !self.store.is_dirty() {
            writeln!(output, "bye")?;
            return Ok(true);
        }

        write!(output, "You have unsaved changes. Save before exiting? [y/n/c] ")?;
        output.flush()?;

        let mut answer = String::new();
        if input.read_line(&mut answer)? == 0 {
            // Input is gone; nothing left to cancel back into.
            writeln!(output, "discarding unsaved changes")?;
            return Ok(true);
        }

        match answer.trim() {
            "y" | "Y" => match self.store.save() {
                Ok(()) => {
                    writeln!(output, "saved, bye")?;
                    Ok(true)
                }
                Err(err) => {
                    writeln!(output, "error: save failed: {err}")?;
                    Ok(false)
                }
            },
            "n" | "N" => {
                writeln!(output, "discarding unsaved changes")?;
                Ok(true)
            }
            _ => {
                writeln!(output, "cancelled")?;
                Ok(false)
            }
        }
    }
}

fn format_task_row(index: usize, task: &Task) -> String {
    let marker = if task.done { "x" } else { " " };
    let mut row = format!("{:>3}. [{marker}] {} ({})", index + 1, task.text, task.owner);
    if let Some(stamp) = &task.completed_at {
        row.push_str(&format!(" done {stamp}"));
    }
    row
}

fn parse_command(line: &str) -> Result<Command, String> {
    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    match verb {
        "list" | "ls" => Ok(Command::List),
        "dump" => Ok(Command::Dump),
        "add" => {
            if rest.is_empty() {
                return Err("usage: add <task text>".to_string());
            }
            Ok(Command::Add(rest.to_string()))
        }
        "done" => parse_task_number(rest).map(Command::Done),
        "del" | "delete" => parse_task_number(rest).map(Command::Delete),
        "assign" => parse_task_number(rest).map(Command::Assign),
        "owner" => {
            if rest.is_empty() {
                return Err("usage: owner <name>".to_string());
            }
            Ok(Command::SelectOwner(rest.to_string()))
        }
        "newowner" => {
            if rest.is_empty() {
                return Err("usage: newowner <name>".to_string());
            }
            Ok(Command::NewOwner(rest.to_string()))
        }
        "filter" => match rest {
            "on" => Ok(Command::Filter(true)),
            "off" => Ok(Command::Filter(false)),
            _ => Err("usage: filter on|off".to_string()),
        },
        "save" => Ok(Command::Save),
        "help" => Ok(Command::Help),
        "quit" | "exit" | "q" => Ok(Command::Quit),
        other => Err(format!("unknown command `{other}` (try `help`)")),
    }
}

fn parse_task_number(arg: &str) -> Result<usize, String> {
    match arg.parse::<usize>() {
        Ok(number) if number >= 1 => Ok(number),
        _ => Err("expected a task number (as shown by `list`)".to_string()),
    }
}

fn print_help<O: Write>(output: &mut O) -> std::io::Result<()> {
    writeln!(
        output,
        "commands:\n  \
         list              show tasks (numbers are stable across filtering)\n  \
         add <text>        add a task for the selected owner\n  \
         done <n>          toggle task n done/pending\n  \
         del <n>           delete task n\n  \
         assign <n>        re-own task n to the selected owner\n  \
         owner <name>      select an existing owner\n  \
         newowner <name>   add an owner (saves immediately)\n  \
         filter on|off     show only the selected owner's tasks\n  \
         dump              print owners and tasks as JSON\n  \
         save              write the task file\n  \
         quit              exit (prompts if unsaved changes exist)"
    )
}
