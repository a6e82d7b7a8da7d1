//! Tallysheet CLI - formula evaluation and sheet editing tool

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tallysheet::prelude::*;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "tally")]
#[command(author, version, about = "Evaluate formulas and edit saved sheets")]
struct Cli {
    /// Upper-case cell names and formula variables
    #[arg(long, global = true)]
    upper: bool,

    /// Version string of the sheet files
    #[arg(long, global = true, default_value = tallysheet::DEFAULT_VERSION)]
    sheet_version: String,

    /// Log recalculation details to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate a single formula
    Eval {
        /// Formula text, without a leading '='
        formula: String,

        /// Variable value as NAME=VALUE (repeatable)
        #[arg(long = "var", value_name = "NAME=VALUE")]
        vars: Vec<String>,
    },

    /// Print every cell of a saved sheet with its content and value
    Show {
        /// Sheet file
        input: PathBuf,
    },

    /// Set the content of one cell and save the sheet
    Set {
        /// Sheet file
        input: PathBuf,

        /// Cell name
        cell: String,

        /// New content: a number, text, or a formula starting with '='
        content: String,

        /// Start a new sheet if the file does not exist
        #[arg(long)]
        create: bool,
    },

    /// Replace the content of every cell whose content equals FIND
    Replace {
        /// Sheet file
        input: PathBuf,

        find: String,

        with: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let options = sheet_options(&cli);

    match cli.command {
        Commands::Eval { formula, vars } => eval(&formula, &vars, &options.rules),
        Commands::Show { input } => show(&input, options),
        Commands::Set {
            input,
            cell,
            content,
            create,
        } => set(&input, &cell, &content, create, options),
        Commands::Replace { input, find, with } => replace(&input, &find, &with, options),
    }
}

/// Default directives when `TALLY_LOG` is unset
fn log_filter(verbose: bool) -> &'static str {
    if verbose {
        "tallysheet=debug,warn"
    } else {
        "warn"
    }
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env("TALLY_LOG")
        .unwrap_or_else(|_| EnvFilter::new(log_filter(verbose)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

fn sheet_options(cli: &Cli) -> SpreadsheetOptions {
    let mut rules = NameRules::new();
    if cli.upper {
        rules = rules.with_normalizer(|s| s.to_uppercase());
    }
    SpreadsheetOptions::default()
        .with_rules(rules)
        .with_version(cli.sheet_version.clone())
}

/// Parse a `NAME=VALUE` variable assignment
fn parse_var(var: &str) -> Result<(String, f64)> {
    let (name, value) = var
        .split_once('=')
        .with_context(|| format!("Invalid variable format: '{var}'. Expected NAME=VALUE format"))?;
    let value = value
        .trim()
        .parse::<f64>()
        .with_context(|| format!("Invalid value for variable '{name}': '{value}'"))?;
    Ok((name.trim().to_string(), value))
}

fn eval(text: &str, vars: &[String], rules: &NameRules) -> Result<()> {
    let formula = Formula::with_rules(text, rules)
        .with_context(|| format!("Failed to parse formula '{text}'"))?;

    let mut values = HashMap::new();
    for var in vars {
        let (name, value) = parse_var(var)?;
        values.insert(rules.normalize(&name), value);
    }

    debug!(formula = %formula, variables = ?formula.variables(), "evaluating");
    match formula.evaluate(|name| values.get(name).copied()) {
        Ok(value) => println!("{}", value),
        Err(err) => println!("{}", err),
    }
    Ok(())
}

fn load(input: &Path, options: SpreadsheetOptions) -> Result<Spreadsheet> {
    Spreadsheet::load(input, options).with_context(|| format!("Failed to open '{}'", input.display()))
}

fn save(sheet: &mut Spreadsheet, input: &Path) -> Result<()> {
    sheet
        .save(input)
        .with_context(|| format!("Failed to write '{}'", input.display()))
}

fn print_cells(sheet: &Spreadsheet, names: &[String]) -> Result<()> {
    for name in names {
        let content = sheet.cell_content_string(name)?;
        let value = sheet.cell_value(name)?;
        println!("{}\t{}\t{}", name, content, value);
    }
    Ok(())
}

fn show(input: &Path, options: SpreadsheetOptions) -> Result<()> {
    let sheet = load(input, options)?;

    println!("File: {}", input.display());
    println!("Version: {}", sheet.version());
    println!("Cells: {}", sheet.nonempty_cells().len());
    println!();
    print_cells(&sheet, &sheet.nonempty_cells())
}

fn set(
    input: &Path,
    cell: &str,
    content: &str,
    create: bool,
    options: SpreadsheetOptions,
) -> Result<()> {
    let mut sheet = if create && !input.exists() {
        Spreadsheet::with_options(options)
    } else {
        load(input, options)?
    };

    let recalculated = sheet
        .set_contents_of_cell(cell, content)
        .with_context(|| format!("Failed to set {cell} to '{content}'"))?;

    save(&mut sheet, input)?;
    print_cells(&sheet, &recalculated)
}

fn replace(input: &Path, find: &str, with: &str, options: SpreadsheetOptions) -> Result<()> {
    let mut sheet = load(input, options)?;

    let matches = sheet.find_cells_with_content(find);
    if matches.is_empty() {
        eprintln!("No cells contain '{}'", find);
        return Ok(());
    }
    eprintln!("Found: {}", matches.join(", "));

    let result = sheet.replace_all(find, with);

    // Edits made before a failure stay applied
    if sheet.is_changed() {
        save(&mut sheet, input)?;
    }

    match result {
        Ok(recalculated) => print_cells(&sheet, &recalculated),
        Err(err) => bail!("Replace stopped: {}", err),
    }
}
