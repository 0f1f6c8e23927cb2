use std::collections::HashMap;

use crate::error::{DbError, DbResult};
use crate::interpreter;
use crate::table::{ResultSet, Schema, Table};

/// The main entry point for the in-memory database engine.
/// It owns a collection of tables and orchestrates statement execution.
///
/// Table names are unique under case-insensitive comparison: the registry is
/// keyed by the lowercased name while each [Table] keeps its original casing
/// for display.
#[derive(Default)]
pub struct Database {
    tables: HashMap<String, Table>,
}

/// The structured result of a successfully executed statement. Rendering is
/// the caller's concern; the engine only reports what happened.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// A table was registered, reported with its display name.
    Created { table: String },
    /// Rows were appended by an INSERT.
    Inserted { count: usize },
    /// The data set produced by a SELECT.
    Rows(ResultSet),
    /// The number of rows an UPDATE overwrote (may be zero).
    Updated { count: usize },
    /// The number of rows a DELETE removed (may be zero).
    Deleted { count: usize },
    /// The statement contained no tokens; nothing was executed.
    Empty,
}

impl Database {
    /// Creates a new, empty database instance.
    pub fn new() -> Self {
        Self {
            tables: HashMap::default(),
        }
    }

    /// Registers a new empty table under the given name.
    ///
    /// # Errors
    /// Returns an error if a table with the same name (ignoring case)
    /// already exists.
    pub fn create_table(&mut self, name: String, schema: Schema) -> DbResult<()> {
        let key = name.to_lowercase();
        if self.tables.contains_key(&key) {
            return Err(DbError::Schema(format!(
                "table {name:?} already exists in the database"
            )));
        }
        self.tables.insert(key, Table::new(name, schema));
        Ok(())
    }

    /// Retrieves a reference to a table by case-insensitive name.
    pub fn get_table(&self, name: &str) -> Option<&Table> {
        self.tables.get(&name.to_lowercase())
    }

    /// Retrieves a mutable reference to a table by case-insensitive name.
    pub fn get_table_mut(&mut self, name: &str) -> Option<&mut Table> {
        self.tables.get_mut(&name.to_lowercase())
    }

    /// Returns the display names of all tables currently registered.
    pub fn list_tables(&self) -> Vec<&str> {
        self.tables.values().map(|t| t.name.as_str()).collect()
    }

    /// Interprets and executes one raw statement against this database.
    ///
    /// # Errors
    /// Returns an error if the statement is malformed, violates a schema, or
    /// carries an unreadable literal. A failed statement never leaves a
    /// partial mutation behind.
    ///
    /// # Example
    /// ```
    /// use minisql::{Database, Outcome, Value};
    ///
    /// let mut db = Database::new();
    /// db.execute("CREATE TABLE users (id INT, name STRING)").unwrap();
    /// db.execute("INSERT INTO users (id, name) VALUES (1, 'Alice')").unwrap();
    ///
    /// let outcome = db.execute("SELECT name FROM users WHERE id = 1").unwrap();
    /// let Outcome::Rows(result) = outcome else { panic!("expected rows") };
    /// assert_eq!(result.rows[0][0], Value::Text("Alice".into()));
    /// ```
    pub fn execute(&mut self, statement: &str) -> DbResult<Outcome> {
        interpreter::execute(self, statement)
    }
}
