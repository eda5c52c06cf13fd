//! CLI command implementations
//!
//! Each command resolves configuration, opens a catalog over the data
//! directory and performs a single operation. `shell` hands control to the
//! interactive menu.

use std::io::{self, BufRead, Write};

use crate::backend::{LocalBackend, Removal, StorageBackend};
use crate::database::{Catalog, DatabaseName};
use crate::errors::FlatDbError;
use crate::observability::{log_event_with_fields, Event, Logger};
use crate::schema::Schema;

use super::args::{Cli, Command};
use super::config::Config;
use super::errors::CliResult;
use super::io::Prompter;
use super::shell::Shell;

/// Main CLI entry point
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    let config = Config::resolve(cli.config.as_deref())?.with_data_dir(cli.data_dir.as_deref());

    Logger::set_min_severity(config.severity());
    log_event_with_fields(Event::ConfigLoaded, &[("data_dir", config.data_dir.as_str())]);

    let catalog =
        Catalog::new(LocalBackend::new(config.data_path())).with_indent(config.json_indent);

    let stdin = io::stdin();
    let stdout = io::stdout();
    run_command(cli.command(), &catalog, stdin.lock(), stdout.lock())
}

/// Dispatches a parsed command against `catalog`
pub fn run_command<B, R, W>(
    command: &Command,
    catalog: &Catalog<B>,
    input: R,
    mut output: W,
) -> CliResult<()>
where
    B: StorageBackend,
    R: BufRead,
    W: Write,
{
    match command {
        Command::Shell => Shell::new(catalog, input, output).run(),
        Command::List => list(catalog, &mut output),
        Command::Show { name } => show(catalog, name, &mut output),
        Command::Create { name, fields } => create(catalog, name, fields, &mut output),
        Command::Drop { name, yes } => {
            let mut io = Prompter::new(input, output);
            drop_database(catalog, name, *yes, &mut io)
        }
    }
}

/// Print database names, one per line
pub fn list<B: StorageBackend, W: Write>(catalog: &Catalog<B>, out: &mut W) -> CliResult<()> {
    let names = catalog.list_databases()?;
    if names.is_empty() {
        writeln!(out, "No databases found.")?;
    }
    for name in names {
        writeln!(out, "{}", name)?;
    }
    Ok(())
}

/// Print schema and record table of one database
pub fn show<B: StorageBackend, W: Write>(
    catalog: &Catalog<B>,
    name: &str,
    out: &mut W,
) -> CliResult<()> {
    let name = DatabaseName::parse(name)?;
    let db = catalog.open(&name)?;

    writeln!(out, "Database '{}' fields: {}", db.name(), db.schema())?;
    match db.render() {
        Ok(table) => writeln!(out, "{}", table)?,
        Err(FlatDbError::NoRecords) => writeln!(out, "No records found.")?,
        Err(e) => return Err(e.into()),
    }
    Ok(())
}

/// Create a database from `NAME:LEN` field specs
pub fn create<B: StorageBackend, W: Write>(
    catalog: &Catalog<B>,
    name: &str,
    fields: &[(String, i64)],
    out: &mut W,
) -> CliResult<()> {
    let name = DatabaseName::parse(name)?;
    let schema = Schema::new(fields.iter().map(|(f, len)| (f.clone(), *len)))?;

    catalog.create_database(&name, &schema)?;
    writeln!(
        out,
        "Database '{}' created successfully with fields: {}",
        name, schema
    )?;
    Ok(())
}

/// Delete a database, asking for confirmation unless `yes`
pub fn drop_database<B: StorageBackend, R: BufRead, W: Write>(
    catalog: &Catalog<B>,
    name: &str,
    yes: bool,
    io: &mut Prompter<R, W>,
) -> CliResult<()> {
    let name = DatabaseName::parse(name)?;

    if !yes {
        let question = format!(
            "Are you sure you want to delete the database '{}'? (yes/no): ",
            name
        );
        if !io.confirm(&question)? {
            return io.say("Deletion canceled.");
        }
    }

    let report = catalog.delete_database(&name)?;
    if report.is_not_found() {
        return io.say(format!("Database '{}' not found.", name));
    }
    for (key, removal) in [(name.data_key(), report.data), (name.schema_key(), report.schema)] {
        match removal {
            Removal::Removed => io.say(format!("Deleted {}", key))?,
            Removal::Absent => io.say(format!("'{}' not found", key))?,
        }
    }
    io.say(format!("Database '{}' has been deleted successfully.", name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MemoryBackend;
    use std::io::Cursor;

    fn catalog_with_contacts() -> Catalog<MemoryBackend> {
        let catalog = Catalog::new(MemoryBackend::new());
        let mut out = Vec::new();
        create(
            &catalog,
            "contacts",
            &[("name".into(), 20), ("phone".into(), 15)],
            &mut out,
        )
        .unwrap();
        catalog
    }

    fn output_of(command: Command, catalog: &Catalog<MemoryBackend>, input: &str) -> String {
        let mut out = Vec::new();
        run_command(&command, catalog, Cursor::new(input.to_string()), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_list() {
        let catalog = Catalog::new(MemoryBackend::new());
        assert_eq!(output_of(Command::List, &catalog, ""), "No databases found.\n");

        let catalog = catalog_with_contacts();
        assert_eq!(output_of(Command::List, &catalog, ""), "contacts\n");
    }

    #[test]
    fn test_create_invalid_schema() {
        let catalog = Catalog::new(MemoryBackend::new());
        let mut out = Vec::new();
        let err = create(&catalog, "contacts", &[("name".into(), 0)], &mut out).unwrap_err();
        assert!(err.message().contains("FLATDB_VALIDATION"));
    }

    #[test]
    fn test_show() {
        let catalog = catalog_with_contacts();
        let out = output_of(Command::Show { name: "contacts".into() }, &catalog, "");
        assert!(out.contains("fields: {'name': 20, 'phone': 15}"));
        assert!(out.contains("No records found."));
    }

    #[test]
    fn test_show_missing() {
        let catalog = Catalog::new(MemoryBackend::new());
        let mut out = Vec::new();
        let err = show(&catalog, "ghost", &mut out).unwrap_err();
        assert!(err.message().contains("FLATDB_NOT_FOUND"));
    }

    #[test]
    fn test_drop_with_confirmation() {
        let catalog = catalog_with_contacts();
        let drop_cmd = |yes| Command::Drop {
            name: "contacts".into(),
            yes,
        };

        let out = output_of(drop_cmd(false), &catalog, "no\n");
        assert!(out.contains("Deletion canceled."));

        let out = output_of(drop_cmd(false), &catalog, "yes\n");
        assert!(out.contains("Deleted contacts_data.json"));
        assert!(out.contains("has been deleted successfully"));

        let out = output_of(drop_cmd(true), &catalog, "");
        assert!(out.contains("Database 'contacts' not found."));
    }
}
