//! Line-oriented terminal front end.
//!
//! [`Session`] owns the main form and runs the read-dispatch loop; the rate
//! editor runs as a nested loop, so the main form is unreachable until it
//! is saved or cancelled. [`Console`] plays the part of the dialogs.

use crate::app::main_view::{MainView, ViewError};
use crate::app::rate_editor::{Field, Prompter, RateEditor};
use crate::core::rate_store::REFERENCE_CURRENCY;
use crate::persistence::RateRepository;
use crate::ui::commands::{EditorCommand, MainCommand, EDITOR_HELP, MAIN_HELP};
use log::debug;
use std::io::{self, BufRead, Write};

/// Terminal input and output, plus the user-facing dialogs.
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Print `prompt` and read one line. `None` at end of input.
    pub fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    pub fn say(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.output, "{}", text)
    }

    pub fn warning(&mut self, title: &str, message: &str) -> io::Result<()> {
        writeln!(self.output, "[{}] Warning: {}", title, message)
    }

    pub fn error(&mut self, title: &str, message: &str) -> io::Result<()> {
        writeln!(self.output, "[{}] Error: {}", title, message)
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

impl<R: BufRead, W: Write> Prompter for Console<R, W> {
    fn confirm(&mut self, title: &str, question: &str) -> bool {
        match self.read_line(&format!("[{}] {} [y/N] ", title, question)) {
            Ok(Some(answer)) => matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"),
            _ => false,
        }
    }
}

/// Whether the main loop keeps going.
enum Flow {
    Continue,
    Quit,
}

/// An interactive converter session.
pub struct Session<'a, R, W> {
    view: MainView,
    repository: &'a dyn RateRepository,
    console: Console<R, W>,
}

impl<'a, R: BufRead, W: Write> Session<'a, R, W> {
    /// Start a session over the rates held by `repository`.
    pub fn new(repository: &'a dyn RateRepository, console: Console<R, W>) -> Self {
        Self {
            view: MainView::new(repository.load()),
            repository,
            console,
        }
    }

    pub fn view(&self) -> &MainView {
        &self.view
    }

    pub fn into_console(self) -> Console<R, W> {
        self.console
    }

    /// Run until `quit` or end of input.
    pub fn run(&mut self) -> io::Result<()> {
        self.console.say("Currency Converter (type 'help' for commands)")?;
        self.render_form()?;
        while let Some(line) = self.console.read_line("> ")? {
            let command = match line.parse::<MainCommand>() {
                Ok(command) => command,
                Err(e) => {
                    self.console.say(&e.to_string())?;
                    continue;
                }
            };
            debug!("main command: {:?}", command);
            if let Flow::Quit = self.dispatch(command)? {
                break;
            }
        }
        Ok(())
    }

    fn dispatch(&mut self, command: MainCommand) -> io::Result<Flow> {
        match command {
            MainCommand::Amount(text) => self.view.set_amount_text(text),
            MainCommand::From(code) => {
                let selected = self.view.select_from(&code);
                self.report(selected)?;
            }
            MainCommand::To(code) => {
                let selected = self.view.select_to(&code);
                self.report(selected)?;
            }
            MainCommand::Convert => self.convert()?,
            MainCommand::ConvertAmount(text) => {
                self.view.set_amount_text(text);
                self.convert()?;
            }
            MainCommand::Swap => {
                self.view.swap();
                self.render_selection()?;
            }
            MainCommand::Clear => {
                self.view.clear();
                self.render_form()?;
            }
            MainCommand::Rates => {
                self.run_editor()?;
                self.render_form()?;
            }
            MainCommand::Show => self.render_form()?,
            MainCommand::Help => self.console.say(MAIN_HELP)?,
            MainCommand::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    fn convert(&mut self) -> io::Result<()> {
        let line = self.view.convert().map(|conversion| conversion.to_string());
        match line {
            Ok(line) => self.console.say(&line),
            Err(e) => self.report(Err(e)),
        }
    }

    fn report(&mut self, outcome: Result<(), ViewError>) -> io::Result<()> {
        match outcome {
            Ok(()) => Ok(()),
            Err(e) if e.is_warning() => self.console.warning(e.title(), &e.to_string()),
            Err(e) => self.console.error(e.title(), &e.to_string()),
        }
    }

    fn run_editor(&mut self) -> io::Result<()> {
        let mut editor = self.view.open_rate_editor();
        self.console.say("Manage Rates (type 'help' for commands)")?;
        self.render_rates(&editor)?;

        while let Some(line) = self.console.read_line("rates> ")? {
            let command = match line.parse::<EditorCommand>() {
                Ok(command) => command,
                Err(e) => {
                    self.console.say(&e.to_string())?;
                    continue;
                }
            };
            debug!("editor command: {:?}", command);
            match command {
                EditorCommand::List => self.render_rates(&editor)?,
                EditorCommand::Add => {
                    let row = editor.add_row();
                    self.console.say(&format!("Added row {}.", row + 1))?;
                    self.render_rates(&editor)?;
                }
                EditorCommand::Remove(row) => {
                    let removed = match row {
                        Some(row) => editor.remove_row(row),
                        None => editor.remove_selected(),
                    };
                    if removed {
                        self.render_rates(&editor)?;
                    }
                }
                EditorCommand::Select(row) => {
                    if editor.select(row) {
                        self.render_rates(&editor)?;
                    }
                }
                EditorCommand::Code(row, value) => {
                    if editor.edit_cell(row, Field::Code, &value) {
                        self.render_rates(&editor)?;
                    }
                }
                EditorCommand::Rate(row, value) => {
                    if editor.edit_cell(row, Field::Rate, &value) {
                        self.render_rates(&editor)?;
                    }
                }
                EditorCommand::Reset => {
                    if editor.reset_to_defaults(&mut self.console) {
                        self.render_rates(&editor)?;
                    }
                }
                EditorCommand::Save => {
                    if let Err(e) = self.view.apply_rate_editor(editor, self.repository) {
                        self.console
                            .error("Error", &format!("Failed to save rates: {}", e))?;
                    }
                    return self.console.say("Rates updated.");
                }
                EditorCommand::Cancel => break,
                EditorCommand::Help => self.console.say(EDITOR_HELP)?,
            }
        }
        self.console.say("Rate changes discarded.")
    }

    fn render_form(&mut self) -> io::Result<()> {
        let codes: Vec<String> = self.view.currencies().iter().map(|c| c.to_string()).collect();
        let result = self
            .view
            .result()
            .map(|c| c.to_string())
            .unwrap_or_default();
        let text = format!(
            "  Amount: {}\n  From:   {}\n  To:     {}\n  Result: {}\n  Currencies: {}",
            self.view.amount_text(),
            self.view.from().map(|c| c.as_str()).unwrap_or("-"),
            self.view.to().map(|c| c.as_str()).unwrap_or("-"),
            result,
            codes.join(", ")
        );
        self.console.say(&text)
    }

    fn render_selection(&mut self) -> io::Result<()> {
        let text = format!(
            "  From: {}  To: {}",
            self.view.from().map(|c| c.as_str()).unwrap_or("-"),
            self.view.to().map(|c| c.as_str()).unwrap_or("-"),
        );
        self.console.say(&text)
    }

    fn render_rates(&mut self, editor: &RateEditor) -> io::Result<()> {
        let mut text = format!(
            "     #  {:<10}Rate (1 {} = rate)",
            "Currency", REFERENCE_CURRENCY
        );
        for (i, row) in editor.rows().iter().enumerate() {
            let marker = if editor.selected() == Some(i) { '>' } else { ' ' };
            text.push_str(&format!(
                "\n  {} {:>3}  {:<10}{}",
                marker,
                i + 1,
                row.code(),
                row.rate()
            ));
        }
        if editor.is_empty() {
            text.push_str("\n  (no rates)");
        }
        self.console.say(&text)
    }
}
