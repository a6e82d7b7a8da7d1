//! Saved sheet documents
//!
//! A sheet is saved as a JSON document holding its version string and the
//! content string of every stored cell:
//!
//! ```json
//! {
//!   "Version": "default",
//!   "cells": {
//!     "A1": { "stringForm": "5" },
//!     "B1": { "stringForm": "=A1*2" }
//!   }
//! }
//! ```
//!
//! Loading replays every content string through
//! [`Spreadsheet::set_contents_of_cell`], so a document that holds an invalid
//! formula or a cycle cannot be loaded.

use std::collections::{BTreeMap, BTreeSet};
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{Error, ReadWriteError, Result};
use crate::spreadsheet::{Spreadsheet, SpreadsheetOptions};

#[derive(Debug, Serialize, Deserialize)]
struct SheetDocument {
    #[serde(rename = "Version", alias = "version")]
    version: String,
    #[serde(default)]
    cells: BTreeMap<String, SavedCell>,
}

#[derive(Debug, Serialize, Deserialize)]
struct SavedCell {
    #[serde(rename = "stringForm")]
    string_form: String,
}

impl Spreadsheet {
    /// Serialize the sheet to a JSON document
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(&self.document())
            .map_err(|e| ReadWriteError::from(e).into())
    }

    /// Write the sheet as JSON
    pub fn write<W: Write>(&self, writer: W) -> Result<()> {
        serde_json::to_writer_pretty(writer, &self.document()).map_err(ReadWriteError::from)?;
        Ok(())
    }

    /// Save the sheet to a file
    ///
    /// Clears the changed flag on success only.
    pub fn save<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path).map_err(ReadWriteError::from)?;
        let mut writer = BufWriter::new(file);
        self.write(&mut writer)?;
        writer.flush().map_err(ReadWriteError::from)?;

        self.mark_saved();
        info!(path = %path.display(), cells = self.nonempty_cells().len(), "saved sheet");
        Ok(())
    }

    /// Rebuild a sheet from a JSON document
    ///
    /// # Errors
    ///
    /// [`ReadWriteError::VersionMismatch`] if the document's version differs
    /// from `options.version`, [`ReadWriteError::InvalidCell`] if any saved
    /// cell fails to replay or two saved names normalize to the same cell.
    pub fn from_json(json: &str, options: SpreadsheetOptions) -> Result<Self> {
        let document: SheetDocument = serde_json::from_str(json).map_err(ReadWriteError::from)?;
        Self::from_document(document, options)
    }

    /// Read a sheet from JSON
    pub fn read<R: Read>(reader: R, options: SpreadsheetOptions) -> Result<Self> {
        let document: SheetDocument =
            serde_json::from_reader(reader).map_err(ReadWriteError::from)?;
        Self::from_document(document, options)
    }

    /// Load a sheet from a file
    pub fn load<P: AsRef<Path>>(path: P, options: SpreadsheetOptions) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(ReadWriteError::from)?;
        let sheet = Self::read(BufReader::new(file), options)?;

        info!(path = %path.display(), cells = sheet.nonempty_cells().len(), "loaded sheet");
        Ok(sheet)
    }

    fn document(&self) -> SheetDocument {
        let cells = self
            .content_strings()
            .map(|(name, string_form)| (name.to_string(), SavedCell { string_form }))
            .collect();

        SheetDocument {
            version: self.version().to_string(),
            cells,
        }
    }

    fn from_document(document: SheetDocument, options: SpreadsheetOptions) -> Result<Self> {
        if document.version != options.version {
            return Err(ReadWriteError::VersionMismatch {
                expected: options.version,
                found: document.version,
            }
            .into());
        }

        let mut sheet = Spreadsheet::with_options(options);
        let mut restored: BTreeSet<String> = BTreeSet::new();
        for (name, cell) in document.cells {
            let result = sheet
                .options()
                .rules
                .resolve(&name)
                .map_err(Error::from)
                .and_then(|resolved| {
                    // Two saved names that normalize to the same cell
                    if !restored.insert(resolved) {
                        return Err(Error::InvalidName(name.clone()));
                    }
                    sheet.set_contents_of_cell(&name, &cell.string_form)
                });

            if let Err(err) = result {
                return Err(ReadWriteError::InvalidCell {
                    name,
                    source: Box::new(err),
                }
                .into());
            }
        }

        sheet.mark_saved();
        Ok(sheet)
    }
}
