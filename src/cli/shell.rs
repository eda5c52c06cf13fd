//! Interactive menu
//!
//! A thin loop around the catalog: it reads choices, converts record
//! numbers to indices and prints outcomes. All persistence goes through
//! `Catalog` and `Database`.

use std::io::{BufRead, Write};

use crate::backend::{Removal, StorageBackend};
use crate::database::{Catalog, Database, DatabaseName};
use crate::errors::FlatDbError;
use crate::observability::{log_event, Event};
use crate::records::Record;
use crate::schema::{SchemaBuilder, SchemaValidator};

use super::errors::CliResult;
use super::io::Prompter;

/// Terminates field entry while defining a schema
const DONE: &str = "done";

/// Interactive menu over a catalog
pub struct Shell<'c, B: StorageBackend, R: BufRead, W: Write> {
    catalog: &'c Catalog<B>,
    io: Prompter<R, W>,
}

impl<'c, B: StorageBackend, R: BufRead, W: Write> Shell<'c, B, R, W> {
    pub fn new(catalog: &'c Catalog<B>, input: R, output: W) -> Self {
        Self {
            catalog,
            io: Prompter::new(input, output),
        }
    }

    /// Runs the main menu until the user exits or input ends.
    pub fn run(&mut self) -> CliResult<()> {
        log_event(Event::ShellStart);
        let result = match self.main_loop() {
            Err(e) if e.is_input_closed() => self.io.say("\nExiting the program."),
            other => other,
        };
        log_event(Event::ShellExit);
        result
    }

    /// Consumes the shell, returning the output sink
    pub fn into_output(self) -> W {
        self.io.into_output()
    }

    fn main_loop(&mut self) -> CliResult<()> {
        loop {
            self.io.say("\nflatdb Main Menu")?;
            self.io.say("1. Create a new database")?;
            self.io.say("2. Open an existing database")?;
            self.io.say("3. Delete a database")?;
            self.io.say("4. Exit")?;

            match self.io.ask("Select an option: ")?.as_str() {
                "1" => self.create_database()?,
                "2" => self.open_database()?,
                "3" => self.delete_database()?,
                "4" => {
                    self.io.say("Exiting the program.")?;
                    return Ok(());
                }
                _ => self.io.say("Invalid option, please try again.")?,
            }
        }
    }

    /// Reads and validates a database name; prints the problem on failure
    fn ask_name(&mut self, message: &str) -> CliResult<Option<DatabaseName>> {
        let raw = self.io.ask(message)?;
        match DatabaseName::parse(&raw) {
            Ok(name) => Ok(Some(name)),
            Err(FlatDbError::InvalidName { reason, .. }) if raw.is_empty() => {
                self.io.say(format!("Database {}!", reason))?;
                Ok(None)
            }
            Err(e) => {
                self.io.say(e.to_string())?;
                Ok(None)
            }
        }
    }

    fn create_database(&mut self) -> CliResult<()> {
        let Some(name) = self.ask_name("Enter the name of the new database: ")? else {
            return Ok(());
        };

        if self.catalog.exists(&name) {
            self.io
                .say(format!("A database with the name '{}' already exists.", name))?;
            return Ok(());
        }

        let mut builder = SchemaBuilder::new();
        loop {
            let field = self.io.ask("Enter field name (or type 'done' to finish): ")?;
            if field.eq_ignore_ascii_case(DONE) {
                break;
            }
            if field.is_empty() {
                self.io.say("Field name cannot be empty.")?;
                continue;
            }
            if builder.contains(&field) {
                self.io.say(format!(
                    "Field '{}' already exists. Please enter a unique name.",
                    field
                ))?;
                continue;
            }

            let raw_length = self
                .io
                .ask(&format!("Enter maximum length for field '{}': ", field))?;
            let Ok(max_length) = raw_length.parse::<i64>() else {
                self.io.say("Please enter a valid integer for field length.")?;
                continue;
            };
            if builder.add_field(field, max_length).is_err() {
                self.io.say("Maximum length must be a positive integer.")?;
            }
        }

        if builder.is_empty() {
            self.io.say("No fields defined. Database creation aborted.")?;
            return Ok(());
        }

        let result = builder
            .build()
            .and_then(|schema| self.catalog.create_database(&name, &schema).map(|_| schema));
        match result {
            Ok(schema) => self.io.say(format!(
                "Database '{}' created successfully with fields: {}",
                name, schema
            )),
            Err(e) => self
                .io
                .say(format!("Failed to create database '{}': {}", name, e)),
        }
    }

    /// Prints the database list; returns false when there is none
    fn display_databases(&mut self) -> CliResult<bool> {
        let names = match self.catalog.list_databases() {
            Ok(names) => names,
            Err(e) => {
                self.io.say(e.to_string())?;
                return Ok(false);
            }
        };

        if names.is_empty() {
            self.io.say("No databases found. Returning to the main menu.")?;
            return Ok(false);
        }

        self.io.say("Available Databases:")?;
        for (i, name) in names.iter().enumerate() {
            self.io.say(format!("{}. {}", i + 1, name))?;
        }
        Ok(true)
    }

    fn open_database(&mut self) -> CliResult<()> {
        if !self.display_databases()? {
            return Ok(());
        }
        let Some(name) = self.ask_name("Enter the name of the database to open: ")? else {
            return Ok(());
        };

        let catalog = self.catalog;
        match catalog.open(&name) {
            Ok(db) => self.database_loop(&db),
            Err(FlatDbError::NotFound(_)) => self
                .io
                .say(format!("Database '{}' does not exist.", name)),
            Err(e) => self.io.say(format!("Error: {}", e)),
        }
    }

    fn delete_database(&mut self) -> CliResult<()> {
        if !self.display_databases()? {
            return Ok(());
        }
        let Some(name) = self.ask_name("Enter the name of the database to delete: ")? else {
            return Ok(());
        };

        if !self.catalog.exists(&name) {
            return self
                .io
                .say(format!("Database '{}' does not exist.", name));
        }

        let question = format!(
            "Are you sure you want to delete the database '{}'? (yes/no): ",
            name
        );
        if !self.io.confirm(&question)? {
            return self.io.say("Deletion canceled.");
        }

        match self.catalog.delete_database(&name) {
            Ok(report) => {
                let data_key = name.data_key();
                let schema_key = name.schema_key();
                self.say_removal("Data", &data_key, report.data)?;
                self.say_removal("System", &schema_key, report.schema)?;
                self.io
                    .say(format!("Database '{}' has been deleted successfully.", name))
            }
            Err(e) => self
                .io
                .say(format!("Error deleting database '{}': {}", name, e)),
        }
    }

    fn say_removal(&mut self, kind: &str, key: &str, removal: Removal) -> CliResult<()> {
        match removal {
            Removal::Removed => self
                .io
                .say(format!("Deleted {} file: {}", kind.to_lowercase(), key)),
            Removal::Absent => self.io.say(format!("{} file '{}' not found.", kind, key)),
        }
    }

    fn database_loop(&mut self, db: &Database<'_, B>) -> CliResult<()> {
        loop {
            self.io.say(format!("\nDatabase Menu - {}", db.name()))?;
            self.io.say("1. Add a record")?;
            self.io.say("2. Edit a record")?;
            self.io.say("3. Delete a record")?;
            self.io.say("4. View all records")?;
            self.io.say("5. Back to Main Menu")?;

            match self.io.ask("Select an option: ")?.as_str() {
                "1" => self.add_record(db)?,
                "2" => {
                    if let Some(number) =
                        self.ask_number("Enter the index of the record to edit: ")?
                    {
                        self.edit_record(db, number)?;
                    }
                }
                "3" => {
                    if let Some(number) =
                        self.ask_number("Enter the index of the record to delete: ")?
                    {
                        self.delete_record(db, number)?;
                    }
                }
                "4" => self.view_records(db)?,
                "5" => return Ok(()),
                _ => self.io.say("Invalid choice. Please try again.")?,
            }
        }
    }

    fn ask_number(&mut self, message: &str) -> CliResult<Option<i64>> {
        let raw = self.io.ask(message)?;
        match raw.parse::<i64>() {
            Ok(n) => Ok(Some(n)),
            Err(_) => {
                self.io
                    .say("Invalid input. Please enter a valid integer for the record index.")?;
                Ok(None)
            }
        }
    }

    /// Prompts once per field until the value is non-empty and fits.
    fn add_record(&mut self, db: &Database<'_, B>) -> CliResult<()> {
        let validator = SchemaValidator::new(db.schema());
        let mut record = Record::new();

        for field in db.schema().fields() {
            loop {
                let value = self.io.ask(&format!(
                    "Enter value for '{}' (max {} chars): ",
                    field.name, field.max_length
                ))?;
                if value.is_empty() {
                    self.io.say(format!(
                        "Error: '{}' cannot be empty. Please enter a value.",
                        field.name
                    ))?;
                } else if validator.validate_value(&field.name, &value).is_err() {
                    self.io.say(format!(
                        "Value for '{}' exceeds maximum length of {}.",
                        field.name, field.max_length
                    ))?;
                } else {
                    record.set(field.name.as_str(), value);
                    break;
                }
            }
        }

        match db.add_record(&record) {
            Ok(_) => self.io.say("Record added successfully."),
            Err(e) => self.io.say(format!("Error: {}", e)),
        }
    }

    /// Empty input keeps the current value of a field.
    fn edit_record(&mut self, db: &Database<'_, B>, number: i64) -> CliResult<()> {
        let records = match db.records() {
            Ok(records) => records,
            Err(e) => return self.io.say(format!("Error: {}", e)),
        };
        if records.is_empty() {
            return self.io.say("No records found.");
        }
        let index = match db.record_index(number) {
            Ok(index) => index,
            Err(_) => return self.io.say("Invalid record index."),
        };
        let Some(current) = records.get(index) else {
            return self.io.say("Invalid record index.");
        };

        let validator = SchemaValidator::new(db.schema());
        let mut values = Record::new();

        self.io.say(format!("Editing record {}:", number))?;
        for field in db.schema().fields() {
            let existing = current.get(&field.name);
            loop {
                let answer = self.io.ask(&format!("{} [{}]: ", field.name, existing))?;
                let value = if answer.is_empty() {
                    existing.to_string()
                } else {
                    answer
                };
                if validator.validate_value(&field.name, &value).is_err() {
                    self.io.say(format!(
                        "Value for '{}' exceeds maximum length of {}.",
                        field.name, field.max_length
                    ))?;
                } else {
                    values.set(field.name.as_str(), value);
                    break;
                }
            }
        }

        match db.edit_record(index, &values) {
            Ok(_) => self.io.say("Record updated successfully."),
            Err(e) => self.io.say(format!("Error: {}", e)),
        }
    }

    fn delete_record(&mut self, db: &Database<'_, B>, number: i64) -> CliResult<()> {
        match db.is_empty() {
            Ok(true) => return self.io.say("No records found."),
            Ok(false) => {}
            Err(e) => return self.io.say(format!("Error: {}", e)),
        }
        let index = match db.record_index(number) {
            Ok(index) => index,
            Err(_) => return self.io.say("Invalid record index."),
        };

        let question = format!(
            "Are you sure you want to delete record {}? (yes/no): ",
            number
        );
        if !self.io.confirm(&question)? {
            return self.io.say("Deletion canceled.");
        }

        match db.delete_record(index) {
            Ok(_) => self
                .io
                .say(format!("Record {} deleted successfully.", number)),
            Err(e) => self.io.say(format!("Error: {}", e)),
        }
    }

    fn view_records(&mut self, db: &Database<'_, B>) -> CliResult<()> {
        match db.render() {
            Ok(table) => self.io.say(table),
            Err(FlatDbError::NoRecords) => self.io.say("No records found."),
            Err(e) => self.io.say(format!("Error: {}", e)),
        }
    }
}
