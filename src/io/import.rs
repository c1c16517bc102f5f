use anyhow::Result;
use std::io::Read;
use tracing::debug;

use crate::application::{validate_input, AppError, BudgetController};
use crate::domain::Kind;
use crate::presentation::{FormInput, Page};

/// Result of an import operation
#[derive(Debug, Clone, Default)]
pub struct ImportResult {
    pub imported: usize,
    pub errors: Vec<ImportError>,
}

/// A row that could not be imported
#[derive(Debug, Clone)]
pub struct ImportError {
    pub line: usize,
    pub field: Option<String>,
    pub error: String,
}

/// Options for import operations
#[derive(Debug, Clone, Default)]
pub struct ImportOptions {
    /// Check every row but leave the ledger untouched
    pub validate_only: bool,
}

/// Loads line items into a running controller.
///
/// Each row is typed into the entry form and submitted, so imported items go
/// through the same checks and rendering as items entered by hand.
pub struct Importer<'a> {
    controller: &'a mut BudgetController<Page>,
}

impl<'a> Importer<'a> {
    pub fn new(controller: &'a mut BudgetController<Page>) -> Self {
        Self { controller }
    }

    /// Import items from CSV with the header `kind,description,value`.
    ///
    /// Whatever the user had in the form, including the selected type, is
    /// back in place afterwards.
    pub fn import_items_csv<R: Read>(
        &mut self,
        reader: R,
        options: ImportOptions,
    ) -> Result<ImportResult> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let saved = self.controller.view().form().clone();
        let result = self.import_records(&mut csv_reader, options);
        self.controller
            .view_mut()
            .fill_form(saved.kind, saved.description, saved.value);

        Ok(result)
    }

    fn import_records<R: Read>(
        &mut self,
        csv_reader: &mut csv::Reader<R>,
        options: ImportOptions,
    ) -> ImportResult {
        let mut result = ImportResult::default();

        for (line_num, record) in csv_reader.records().enumerate() {
            let line = line_num + 2; // +2 for header and 0-indexing

            let record = match record {
                Ok(r) => r,
                Err(e) => {
                    result.errors.push(ImportError {
                        line,
                        field: None,
                        error: format!("CSV parse error: {}", e),
                    });
                    continue;
                }
            };

            let kind_str = record.get(0).unwrap_or("");
            let Some(kind) = Kind::from_str(kind_str) else {
                result.errors.push(ImportError {
                    line,
                    field: Some("kind".to_string()),
                    error: format!("Unknown kind '{}'", kind_str),
                });
                continue;
            };

            let input = FormInput {
                kind,
                description: record.get(1).unwrap_or("").to_string(),
                value: record.get(2).unwrap_or("").to_string(),
            };

            if let Err(e) = validate_input(&input) {
                result.errors.push(ImportError {
                    line,
                    field: Some(rejected_field(&e).to_string()),
                    error: e.to_string(),
                });
                continue;
            }

            if options.validate_only {
                result.imported += 1;
                continue;
            }

            self.controller
                .view_mut()
                .fill_form(input.kind, input.description, input.value);
            match self.controller.add_item() {
                Ok(item) => {
                    debug!(line, element_id = %item.element_id(), "row imported");
                    result.imported += 1;
                }
                Err(e) => result.errors.push(ImportError {
                    line,
                    field: Some(rejected_field(&e).to_string()),
                    error: e.to_string(),
                }),
            }
        }

        result
    }
}

fn rejected_field(error: &AppError) -> &'static str {
    match error {
        AppError::EmptyDescription => "description",
        _ => "value",
    }
}
