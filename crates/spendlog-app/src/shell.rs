//! Command loop and dispatch.

use std::{error::Error, fs};

use dialoguer::Confirm;
use rustyline::{error::ReadlineError, DefaultEditor};
use tracing::warn;

use spendlog_config::{Config, ConfigManager, Theme};
use spendlog_core::{
    persistence, Clock, ExpenseDraft, LedgerService, MonthRollover, SystemClock,
};
use spendlog_domain::LedgerState;
use spendlog_exchange::{apply_import, export_workbook, import_workbook, parse_datetime};
use spendlog_storage_kv::JsonFileStore;

use crate::output;

const PROMPT: &str = "spendlog> ";
const STORE_FILE: &str = "ledger.json";

pub fn run() -> Result<(), Box<dyn Error>> {
    let config_manager = ConfigManager::with_default_path()?;
    let config = config_manager.load().unwrap_or_else(|err| {
        warn!(%err, "config unreadable, using defaults");
        Config::default()
    });

    let store_path = config.resolve_data_dir().join(STORE_FILE);
    let store = JsonFileStore::open(store_path)?;
    let state = persistence::load(&store);

    let clock = SystemClock;
    let mut app = App {
        config,
        config_manager,
        store,
        state,
        rollover: MonthRollover::armed_at(clock.now()),
        clock,
    };

    output::info(app.theme(), "spendlog ready. Type `help` for commands.");
    app.poll_rollover();

    let mut editor = DefaultEditor::new()?;
    loop {
        match editor.readline(PROMPT) {
            Ok(line) => {
                let _ = editor.add_history_entry(line.as_str());
                let args = match shell_words::split(&line) {
                    Ok(args) => args,
                    Err(err) => {
                        output::error(app.theme(), &format!("Could not parse input: {err}"));
                        continue;
                    }
                };
                if args.is_empty() {
                    continue;
                }
                app.poll_rollover();
                if !app.dispatch(&args) {
                    break;
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(err) => return Err(Box::new(err)),
        }
    }
    Ok(())
}

struct App {
    config: Config,
    config_manager: ConfigManager,
    store: JsonFileStore,
    state: LedgerState,
    rollover: MonthRollover,
    clock: SystemClock,
}

impl App {
    fn theme(&self) -> Theme {
        self.config.theme
    }

    /// Returns false when the loop should exit.
    fn dispatch(&mut self, args: &[String]) -> bool {
        let rest: Vec<&str> = args[1..].iter().map(String::as_str).collect();
        match args[0].as_str() {
            "help" => print_help(),
            "budget" => self.cmd_budget(&rest),
            "spend" => self.cmd_spend(&rest),
            "undo" => self.cmd_undo(),
            "redo" => self.cmd_redo(),
            "list" => self.cmd_list(),
            "summary" => self.cmd_summary(),
            "export" => self.cmd_export(&rest),
            "import" => self.cmd_import(&rest),
            "reset" => self.cmd_reset(),
            "theme" => self.cmd_theme(&rest),
            "quit" | "exit" => return false,
            other => output::error(self.theme(), &format!("Unknown command `{other}`.")),
        }
        true
    }

    fn cmd_budget(&mut self, args: &[&str]) {
        let Some(amount) = args.first().and_then(|raw| raw.parse::<f64>().ok()) else {
            output::error(self.theme(), "Usage: budget <amount>");
            return;
        };
        match LedgerService::set_budget(&mut self.state, amount) {
            Ok(()) => {
                self.write_through();
                output::info(
                    self.theme(),
                    &format!("Budget set. Total budget: {:.2}", self.state.budget),
                );
            }
            Err(err) => output::error(self.theme(), &err.to_string()),
        }
    }

    fn cmd_spend(&mut self, args: &[&str]) {
        if args.len() < 2 {
            output::error(
                self.theme(),
                "Usage: spend <purpose> <amount> [category] [date time]",
            );
            return;
        }
        let Ok(amount) = args[1].parse::<f64>() else {
            output::error(self.theme(), "Amount must be a number.");
            return;
        };
        let mut draft = ExpenseDraft::new(args[0], amount);
        if let Some(category) = args.get(2) {
            draft = draft.with_category(*category);
        }
        if args.len() > 3 {
            let text = args[3..].join(" ");
            match parse_datetime(&text) {
                Some(timestamp) => draft = draft.at(timestamp),
                None => {
                    output::error(self.theme(), &format!("Unrecognized date-time `{text}`."));
                    return;
                }
            }
        }

        let pending = match LedgerService::propose_expense(&self.state, draft, &self.clock) {
            Ok(pending) => pending,
            Err(err) => {
                output::error(self.theme(), &err.to_string());
                return;
            }
        };
        if pending.would_exceed_budget()
            && !confirm("Adding this expense will exceed your budget. Proceed?")
        {
            LedgerService::discard_expense(pending);
            return;
        }
        let expense = LedgerService::commit_expense(&mut self.state, pending);
        self.write_through();
        output::info(
            self.theme(),
            &format!("Logged `{}` ({}).", expense.name, expense.display_amount()),
        );
    }

    fn cmd_undo(&mut self) {
        match LedgerService::undo(&mut self.state) {
            Ok(expense) => {
                self.write_through();
                output::info(self.theme(), &format!("Undid `{}`.", expense.name));
            }
            Err(err) => output::error(self.theme(), &err.to_string()),
        }
    }

    fn cmd_redo(&mut self) {
        match LedgerService::redo(&mut self.state) {
            Ok(expense) => {
                self.write_through();
                output::info(self.theme(), &format!("Restored `{}`.", expense.name));
            }
            Err(err) => output::error(self.theme(), &err.to_string()),
        }
    }

    fn cmd_list(&self) {
        if self.state.expenses.is_empty() {
            println!("No expenses logged.");
            return;
        }
        println!(
            "{:<24} {:<16} {:>10}  {:<10} {:<8}",
            "Purpose", "Category", "Amount", "Date", "Time"
        );
        for expense in &self.state.expenses {
            println!(
                "{:<24} {:<16} {:>10}  {:<10} {:<8}",
                expense.name,
                expense.display_category(),
                expense.display_amount(),
                expense.timestamp.format("%d/%m/%Y"),
                expense.timestamp.format("%H:%M:%S"),
            );
        }
    }

    fn cmd_summary(&self) {
        let currency = &self.config.currency;
        println!("Total Budget:     {:.2} {currency}", self.state.budget);
        println!("Total Expenses:   {:.2} {currency}", self.state.total_expenses);
        println!(
            "Remaining Budget: {:.2} {currency}",
            self.state.remaining_budget()
        );
    }

    fn cmd_export(&self, args: &[&str]) {
        let Some(path) = args.first() else {
            output::error(self.theme(), "Usage: export <file.xlsx>");
            return;
        };
        let result = export_workbook(&self.state).and_then(|bytes| {
            fs::write(path, bytes).map_err(|err| spendlog_core::LedgerError::Export(err.to_string()))
        });
        match result {
            Ok(()) => output::info(self.theme(), &format!("Exported to {path}.")),
            Err(err) => output::error(self.theme(), &err.to_string()),
        }
    }

    fn cmd_import(&mut self, args: &[&str]) {
        let Some(path) = args.first() else {
            output::error(self.theme(), "Usage: import <file.xlsx>");
            return;
        };
        // Blocks until the whole file is in memory; parsing is synchronous.
        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(err) => {
                output::error(self.theme(), &format!("Could not read {path}: {err}"));
                return;
            }
        };
        match import_workbook(&bytes) {
            Ok(imported) => {
                let (rows, skipped) = (imported.expenses.len(), imported.skipped_rows);
                apply_import(&mut self.state, imported);
                self.write_through();
                let mut message = format!("Imported {rows} expense(s).");
                if skipped > 0 {
                    message.push_str(&format!(" Skipped {skipped} malformed row(s)."));
                }
                output::info(self.theme(), &message);
            }
            Err(err) => output::error(self.theme(), &err.to_string()),
        }
    }

    fn cmd_reset(&mut self) {
        if !confirm("Reset budget and expense log? This cannot be undone.") {
            return;
        }
        LedgerService::reset(&mut self.state);
        self.write_through();
        output::info(self.theme(), "Ledger reset.");
    }

    fn cmd_theme(&mut self, args: &[&str]) {
        self.config.theme = match args.first() {
            Some(value) => Theme::from_str(value),
            None => self.config.theme.toggled(),
        };
        if let Err(err) = self.config_manager.save(&self.config) {
            output::error(self.theme(), &format!("Could not save config: {err}"));
        }
        output::info(self.theme(), &format!("Theme: {}.", self.config.theme));
    }

    /// Persists the full ledger after a mutation. Failures are a notice,
    /// never fatal; there is no retry.
    fn write_through(&mut self) {
        if let Err(err) = persistence::save(&mut self.store, &self.state) {
            output::error(self.theme(), &err.to_string());
        }
    }

    /// Fires the month-boundary reset when due and re-arms the scheduler.
    fn poll_rollover(&mut self) {
        if self.rollover.fire(&mut self.state, self.clock.now()) {
            self.write_through();
            output::info(
                self.theme(),
                "Month rolled over: budget and expense log reset.",
            );
        }
    }
}

fn confirm(prompt: &str) -> bool {
    Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()
        .unwrap_or(false)
}

fn print_help() {
    println!("Commands:");
    println!("  budget <amount>                           add to the monthly budget");
    println!("  spend <purpose> <amount> [category] [date time]");
    println!("                                            log an expense (date defaults to now)");
    println!("  undo / redo                               step the expense log back or forward");
    println!("  list                                      show the expense log");
    println!("  summary                                   show budget totals");
    println!("  export <file.xlsx> / import <file.xlsx>   spreadsheet snapshot exchange");
    println!("  reset                                     clear budget and expenses");
    println!("  theme [light|dark]                        switch notice colors");
    println!("  quit                                      leave");
}
