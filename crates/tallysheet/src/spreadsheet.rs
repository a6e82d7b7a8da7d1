//! The spreadsheet recalculation engine
//!
//! # Example
//!
//! ```rust
//! use tallysheet::prelude::*;
//!
//! let mut sheet = Spreadsheet::new();
//! sheet.set_contents_of_cell("A1", "10").unwrap();
//! sheet.set_contents_of_cell("B1", "=A1*2+5").unwrap();
//!
//! let order = sheet.set_contents_of_cell("A1", "20").unwrap();
//! assert_eq!(order, ["A1", "B1"]);
//! assert_eq!(sheet.cell_value("B1").unwrap(), CellValue::Number(45.0));
//! ```

use ahash::AHashMap;
use tracing::{debug, trace, warn};

use tallysheet_core::{CellValue, NameRules};
use tallysheet_formula::DependencyGraph;

use crate::cell::{Cell, CellContent};
use crate::error::Result;
use crate::recalc::recalculation_order;

/// Version string written by sheets created with default options
pub const DEFAULT_VERSION: &str = "default";

/// Options for creating a spreadsheet
#[derive(Debug, Clone)]
pub struct SpreadsheetOptions {
    /// Normalizer and validator for cell names and formula variables
    pub rules: NameRules,
    /// Version written into saved documents and required when loading
    pub version: String,
}

impl Default for SpreadsheetOptions {
    fn default() -> Self {
        Self {
            rules: NameRules::default(),
            version: DEFAULT_VERSION.to_string(),
        }
    }
}

impl SpreadsheetOptions {
    /// Set the name rules
    pub fn with_rules(mut self, rules: NameRules) -> Self {
        self.rules = rules;
        self
    }

    /// Set the version string
    pub fn with_version<S: Into<String>>(mut self, version: S) -> Self {
        self.version = version.into();
        self
    }
}

/// A sheet of named cells holding numbers, text or formulas
///
/// Every edit goes through [`Spreadsheet::set_contents_of_cell`], which keeps
/// the dependency graph and every computed value up to date. Cells holding
/// empty text are not stored.
#[derive(Debug, Clone, Default)]
pub struct Spreadsheet {
    cells: AHashMap<String, Cell>,
    graph: DependencyGraph,
    options: SpreadsheetOptions,
    changed: bool,
}

impl Spreadsheet {
    /// Create an empty spreadsheet with default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty spreadsheet
    pub fn with_options(options: SpreadsheetOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    pub fn options(&self) -> &SpreadsheetOptions {
        &self.options
    }

    pub fn version(&self) -> &str {
        &self.options.version
    }

    /// Whether the sheet was modified since it was created, loaded or saved
    pub fn is_changed(&self) -> bool {
        self.changed
    }

    pub(crate) fn mark_saved(&mut self) {
        self.changed = false;
    }

    /// Set the content of a cell and recalculate everything that depends on it
    ///
    /// `content` is classified as a number, a formula (leading `=`) or text;
    /// empty text clears the cell. Returns the cells that were re-evaluated,
    /// starting with `name` itself, in the order they were evaluated.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidName`](crate::Error::InvalidName) if `name` is not a
    ///   valid cell name
    /// - [`Error::FormulaFormat`](crate::Error::FormulaFormat) if the formula
    ///   cannot be parsed
    /// - [`Error::CircularReference`](crate::Error::CircularReference) if the
    ///   new formula would make a cell depend on itself
    ///
    /// On error the sheet is left exactly as it was.
    pub fn set_contents_of_cell(&mut self, name: &str, content: &str) -> Result<Vec<String>> {
        let name = self.options.rules.resolve(name)?;
        let content = CellContent::parse(content, &self.options.rules)?;

        let new_dependees: Vec<String> = content
            .as_formula()
            .map(|f| f.variables().into_iter().map(str::to_string).collect())
            .unwrap_or_default();
        let old_dependees: Vec<String> = self.graph.dependees(&name).map(str::to_string).collect();

        self.graph.replace_dependees(&name, &new_dependees);

        let order = match recalculation_order(&self.graph, &name) {
            Ok(order) => order,
            Err(err) => {
                self.graph.replace_dependees(&name, &old_dependees);
                warn!(cell = %name, content = %content, "rejected edit: {}", err);
                return Err(err);
            }
        };

        if content.is_empty() {
            self.cells.remove(&name);
        } else {
            self.cells.insert(name.clone(), Cell::new(content));
        }

        self.reevaluate(&order);
        self.changed = true;

        debug!(cell = %name, order = ?order, "cell contents set");
        Ok(order)
    }

    /// Recompute the value of every stored cell in `order`
    fn reevaluate(&mut self, order: &[String]) {
        for name in order {
            let Some(cell) = self.cells.get(name) else {
                continue;
            };

            let value = match &cell.content {
                CellContent::Number(n) => CellValue::Number(*n),
                CellContent::Text(s) => CellValue::Text(s.clone()),
                CellContent::Formula(f) => f.evaluate(|var| self.number_value(var)).into(),
            };
            trace!(cell = %name, value = %value, "evaluated");

            if let Some(cell) = self.cells.get_mut(name) {
                cell.value = value;
            }
        }
    }

    /// The current value of a cell, if it is a number
    fn number_value(&self, name: &str) -> Option<f64> {
        self.cells.get(name).and_then(|cell| cell.value.as_number())
    }

    /// Get the content of a cell (`Text("")` for an absent cell)
    pub fn cell_contents(&self, name: &str) -> Result<CellContent> {
        let name = self.options.rules.resolve(name)?;
        Ok(self
            .cells
            .get(&name)
            .map(|cell| cell.content.clone())
            .unwrap_or_default())
    }

    /// Get the value of a cell (`Text("")` for an absent cell)
    pub fn cell_value(&self, name: &str) -> Result<CellValue> {
        let name = self.options.rules.resolve(name)?;
        Ok(self
            .cells
            .get(&name)
            .map(|cell| cell.value.clone())
            .unwrap_or_default())
    }

    /// Get the content of a cell in its saved string form
    ///
    /// Numbers render in their shortest form, formulas with a leading `=`,
    /// and an absent cell as `""`.
    pub fn cell_content_string(&self, name: &str) -> Result<String> {
        self.cell_contents(name).map(|content| content.content_string())
    }

    /// Names of all stored cells, sorted
    pub fn nonempty_cells(&self) -> Vec<String> {
        let mut names: Vec<String> = self.cells.keys().cloned().collect();
        names.sort_unstable();
        names
    }

    /// Every stored cell with its content string
    pub(crate) fn content_strings(&self) -> impl Iterator<Item = (&str, String)> + '_ {
        self.cells
            .iter()
            .map(|(name, cell)| (name.as_str(), cell.content.content_string()))
    }

    /// Names of the cells whose formulas reference `name` directly, sorted
    pub fn direct_dependents(&self, name: &str) -> Result<Vec<String>> {
        let name = self.options.rules.resolve(name)?;
        let mut names: Vec<String> = self.graph.dependents(&name).map(str::to_string).collect();
        names.sort_unstable();
        Ok(names)
    }

    /// Names of the stored cells whose content string equals `content`, sorted
    pub fn find_cells_with_content(&self, content: &str) -> Vec<String> {
        let mut names: Vec<String> = self
            .content_strings()
            .filter(|(_, string_form)| string_form == content)
            .map(|(name, _)| name.to_string())
            .collect();
        names.sort_unstable();
        names
    }

    /// Replace the content of every cell whose content string equals `find`
    ///
    /// Cells are edited one at a time in name order. The first failing edit
    /// stops the batch; edits made before it stay applied. Returns every
    /// re-evaluated cell, each listed once, in the order first evaluated.
    pub fn replace_all(&mut self, find: &str, replace_with: &str) -> Result<Vec<String>> {
        let matches = self.find_cells_with_content(find);
        debug!(find, replace_with, cells = matches.len(), "replace all");

        let mut recalculated: Vec<String> = Vec::new();
        for name in &matches {
            for cell in self.set_contents_of_cell(name, replace_with)? {
                if !recalculated.contains(&cell) {
                    recalculated.push(cell);
                }
            }
        }
        Ok(recalculated)
    }
}
