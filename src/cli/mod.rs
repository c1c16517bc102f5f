mod session;

pub use session::*;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand, ValueEnum};
use std::fs::File;
use std::io::{self, BufReader, Read, Write};
use std::sync::Once;

use crate::application::BudgetController;
use crate::domain::Ledger;
use crate::io::{Exporter, ImportOptions, Importer};
use crate::presentation::Page;

/// Budgety - income and expense budget
#[derive(Parser)]
#[command(name = "budgety")]
#[command(about = "Track income and expenses and see what is left to spend")]
#[command(version)]
pub struct Cli {
    /// Month shown in the budget title (YYYY-MM, defaults to the current month)
    #[arg(long, global = true)]
    pub month: Option<String>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Defaults to an interactive shell
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start an interactive session
    Shell,

    /// Run session commands from a script and print the resulting budget
    Run {
        /// Script file (stdin if omitted)
        script: Option<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// Load items from a CSV file (kind,description,value) and print the budget
    Import {
        /// Input file (stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,

        /// Validate rows without adding them
        #[arg(long)]
        validate: bool,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
}

static TRACING_INIT: Once = Once::new();

/// Install the stderr log subscriber. `RUST_LOG` takes precedence over `verbose`.
pub fn init_tracing(verbose: bool) {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let default = if verbose { "budgety=debug" } else { "budgety=warn" };
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

        fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .with_target(false)
            .init();
    });
}

impl Cli {
    pub fn run(self) -> Result<()> {
        let today = match &self.month {
            Some(month) => parse_month(month)
                .with_context(|| format!("Invalid month '{}'. Use YYYY-MM", month))?,
            None => Local::now().date_naive(),
        };

        let mut controller = BudgetController::new(Ledger::new(), Page::new());
        controller.init(today);

        match self.command.unwrap_or(Commands::Shell) {
            Commands::Shell => {
                let mut session = Session::new(controller, io::stdout(), true);
                session.run_interactive(io::stdin().lock())?;
            }

            Commands::Run { script, format } => {
                let reader = open_input(script.as_deref())?;
                let mut session = Session::new(controller, io::stdout(), false);
                session.run_script(BufReader::new(reader))?;

                let (controller, mut out) = session.into_parts();
                print_state(&controller, format, &mut out)?;
            }

            Commands::Import {
                input,
                validate,
                format,
            } => {
                let reader = open_input(input.as_deref())?;
                let result = Importer::new(&mut controller)
                    .import_items_csv(reader, ImportOptions { validate_only: validate })?;

                if validate {
                    eprintln!("Validation complete");
                } else {
                    eprintln!("Import complete");
                }
                eprintln!("  Imported: {}", result.imported);
                eprintln!("  Errors:   {}", result.errors.len());

                if !result.errors.is_empty() {
                    eprintln!("\nErrors:");
                    for error in result.errors.iter().take(10) {
                        eprintln!(
                            "  Line {}: {}",
                            error.line,
                            error
                                .field
                                .as_ref()
                                .map(|f| format!("{}: ", f))
                                .unwrap_or_default()
                                + &error.error
                        );
                    }
                    if result.errors.len() > 10 {
                        eprintln!("  ... and {} more errors", result.errors.len() - 10);
                    }
                }

                if !validate {
                    print_state(&controller, format, &mut io::stdout())?;
                }
            }
        }

        Ok(())
    }
}

/// Write the current budget in the requested format.
pub fn print_state<W: Write>(
    controller: &BudgetController<Page>,
    format: OutputFormat,
    out: &mut W,
) -> Result<()> {
    let report = controller.report();
    let exporter = Exporter::new(&report);

    match format {
        OutputFormat::Table => write!(out, "{}", controller.view())?,
        OutputFormat::Json => exporter.export_report_json(&mut *out)?,
        OutputFormat::Csv => {
            exporter.export_items_csv(&mut *out)?;
        }
    }
    Ok(())
}

fn open_input(path: Option<&str>) -> Result<Box<dyn Read>> {
    Ok(match path {
        Some(path) => {
            let file =
                File::open(path).with_context(|| format!("Failed to open input file: {}", path))?;
            Box::new(file)
        }
        None => Box::new(io::stdin()),
    })
}

/// Parse `YYYY-MM` into the first day of that month.
fn parse_month(month: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(&format!("{}-01", month.trim()), "%Y-%m-%d")
        .context("expected YYYY-MM")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_month() {
        assert_eq!(
            parse_month("2024-03").unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
        );
        assert!(parse_month("2024-13").is_err());
        assert!(parse_month("March").is_err());
    }

    #[test]
    fn test_cli_parses_subcommands() {
        let cli = Cli::try_parse_from(["budgety", "--month", "2024-03", "run", "-f", "json"]).unwrap();
        assert_eq!(cli.month.as_deref(), Some("2024-03"));
        assert!(matches!(
            cli.command,
            Some(Commands::Run {
                script: None,
                format: OutputFormat::Json
            })
        ));

        let cli = Cli::try_parse_from(["budgety"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_print_state_csv() {
        let mut controller = BudgetController::new(Ledger::new(), Page::new());
        controller.init(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        controller.view_mut().fill_form(crate::domain::Kind::Expense, "Rent", "300");
        controller.add_item().unwrap();

        let mut out = Vec::new();
        print_state(&controller, OutputFormat::Csv, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "kind,id,description,value,percentage\nexpense,0,Rent,300.00,-1\n"
        );
    }
}
