use crate::data_type::DataType;
use crate::error::{DbError, DbResult};
use crate::row::Row;
use crate::value::Value;

/// Column definition in the schema
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDef {
    pub name: String,
    pub data_type: DataType,
}

/// The ordered list of typed columns defining a table's shape.
/// Fixed at table creation; never altered afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    pub columns: Vec<ColumnDef>,
}

impl Schema {
    /// Resolves a column by case-insensitive name, returning its definition
    /// with the originally-declared spelling.
    pub fn column(&self, name: &str) -> Option<&ColumnDef> {
        self.columns
            .iter()
            .find(|col| col.name.eq_ignore_ascii_case(name))
    }
}

/// The columns a SELECT projects: every schema column in schema order, or an
/// explicit ordered list of names.
#[derive(Debug, Clone, PartialEq)]
pub enum Projection {
    Star,
    Columns(Vec<String>),
}

/// A single equality test `column = value`; the only predicate form the
/// engine supports.
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    pub column: String,
    pub value: Value,
}

/// A single `column = value` pair from an UPDATE's SET clause.
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    pub column: String,
    pub value: Value,
}

/// The data set produced by a SELECT: the projected column names in output
/// order (canonical schema casing) and one value vector per matching row.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultSet {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

/// A named table: its fixed [Schema] and its stored rows in insertion order.
///
/// Every stored row holds exactly one type-correct value per schema column,
/// under the column's canonical spelling; `insert` enforces this before
/// anything is appended.
pub struct Table {
    pub name: String,
    pub schema: Schema,
    rows: Vec<Row>,
}

impl Table {
    pub fn new(name: String, schema: Schema) -> Self {
        Self {
            name,
            schema,
            rows: Vec::new(),
        }
    }

    /// Returns the number of rows currently stored in the table.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if the table holds no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Validates a row against the schema and appends it.
    ///
    /// For every schema column, the row must contain a same-named
    /// (case-insensitive) value of the matching type. The stored copy is
    /// rebuilt in schema order under canonical column spellings, so later
    /// projections read straight out of storage order.
    ///
    /// # Errors
    /// Returns a schema error naming the first missing or type-mismatched
    /// column; nothing is appended on failure.
    pub fn insert(&mut self, row: Row) -> DbResult<()> {
        let mut stored = Row::new();

        for col in &self.schema.columns {
            let value = row.get(&col.name).ok_or_else(|| {
                DbError::Schema(format!(
                    "missing column {:?} in row for table {:?}",
                    col.name, self.name
                ))
            })?;

            if value.data_type() != col.data_type {
                return Err(DbError::Schema(format!(
                    "type mismatch for column {:?}: expected {}, got {}",
                    col.name,
                    col.data_type,
                    value.data_type()
                )));
            }

            stored.set(&col.name, value.clone());
        }

        self.rows.push(stored);
        Ok(())
    }

    /// Produces one projected row per matching stored row, in original row
    /// order. Column names in the result carry the schema's canonical
    /// spelling regardless of how the caller spelled them.
    ///
    /// # Errors
    /// Returns a schema error if a projected or predicate column does not
    /// exist in this table.
    pub fn select(
        &self,
        projection: &Projection,
        predicate: Option<&Predicate>,
    ) -> DbResult<ResultSet> {
        let columns: Vec<String> = match projection {
            Projection::Star => self
                .schema
                .columns
                .iter()
                .map(|col| col.name.clone())
                .collect(),
            Projection::Columns(names) => names
                .iter()
                .map(|name| {
                    self.schema
                        .column(name)
                        .map(|col| col.name.clone())
                        .ok_or_else(|| self.unknown_column(name))
                })
                .collect::<DbResult<_>>()?,
        };

        self.check_predicate(predicate)?;

        let mut rows = Vec::new();
        for row in &self.rows {
            if !Self::matches(row, predicate) {
                continue;
            }

            let mut projected = Vec::with_capacity(columns.len());
            for name in &columns {
                match row.get(name) {
                    Some(value) => projected.push(value.clone()),
                    None => {
                        return Err(DbError::Schema(format!(
                            "internal error: stored row in {:?} lacks column {:?}",
                            self.name, name
                        )));
                    }
                }
            }
            rows.push(projected);
        }

        Ok(ResultSet { columns, rows })
    }

    /// Overwrites one column in every matching row.
    ///
    /// The SET pair is validated once, before any row is scanned: the column
    /// must exist and the value's type must match its declared type, so a
    /// failing statement leaves every row untouched.
    ///
    /// Returns the number of rows updated (possibly zero).
    pub fn update(&mut self, assignment: &Assignment, predicate: Option<&Predicate>) -> DbResult<usize> {
        let col = self
            .schema
            .column(&assignment.column)
            .ok_or_else(|| self.unknown_column(&assignment.column))?;

        if assignment.value.data_type() != col.data_type {
            return Err(DbError::Schema(format!(
                "type mismatch for column {:?}: expected {}, got {}",
                col.name,
                col.data_type,
                assignment.value.data_type()
            )));
        }

        let column = col.name.clone();
        self.check_predicate(predicate)?;

        let mut updated = 0;
        for row in &mut self.rows {
            if Self::matches(row, predicate) {
                row.set(&column, assignment.value.clone());
                updated += 1;
            }
        }

        Ok(updated)
    }

    /// Removes every matching row, preserving the relative order of the
    /// remainder. Without a predicate, all rows are removed and the schema
    /// stays usable for new inserts.
    ///
    /// Returns the number of rows removed.
    pub fn delete(&mut self, predicate: Option<&Predicate>) -> DbResult<usize> {
        self.check_predicate(predicate)?;

        let before = self.rows.len();
        self.rows.retain(|row| !Self::matches(row, predicate));
        Ok(before - self.rows.len())
    }

    /// Validates that a predicate, when present, names an existing column.
    fn check_predicate(&self, predicate: Option<&Predicate>) -> DbResult<()> {
        if let Some(pred) = predicate {
            if self.schema.column(&pred.column).is_none() {
                return Err(self.unknown_column(&pred.column));
            }
        }
        Ok(())
    }

    /// An absent predicate matches every row; a present one matches rows
    /// whose named column equals the given value. Cross-type equality is
    /// always false.
    fn matches(row: &Row, predicate: Option<&Predicate>) -> bool {
        match predicate {
            None => true,
            Some(pred) => row.get(&pred.column).is_some_and(|v| *v == pred.value),
        }
    }

    fn unknown_column(&self, name: &str) -> DbError {
        DbError::Schema(format!(
            "column {:?} does not exist in table {:?}",
            name, self.name
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn student_schema() -> Schema {
        Schema {
            columns: vec![
                ColumnDef {
                    name: "id".into(),
                    data_type: DataType::Int,
                },
                ColumnDef {
                    name: "Name".into(),
                    data_type: DataType::Text,
                },
            ],
        }
    }

    fn row(id: i64, name: &str) -> Row {
        let mut row = Row::new();
        row.set("id", Value::Int(id));
        row.set("name", Value::Text(name.into()));
        row
    }

    #[test]
    fn test_table_creation() {
        let table = Table::new("students".into(), student_schema());

        assert_eq!(table.schema.columns.len(), 2);
        assert_eq!(table.row_count(), 0);
        assert!(table.is_empty());
    }

    #[test]
    fn test_schema_column_resolution() {
        let schema = student_schema();

        assert_eq!(schema.column("NAME").map(|c| c.name.as_str()), Some("Name"));
        assert_eq!(schema.column("id").map(|c| c.data_type), Some(DataType::Int));
        assert!(schema.column("age").is_none());
    }

    #[test]
    fn test_insert_and_select_star() {
        let mut table = Table::new("students".into(), student_schema());
        table.insert(row(1, "Alice")).unwrap();
        table.insert(row(2, "Bob")).unwrap();

        let result = table.select(&Projection::Star, None).unwrap();

        assert_eq!(result.columns, vec!["id", "Name"]);
        assert_eq!(result.rows.len(), 2);
        assert_eq!(
            result.rows[0],
            vec![Value::Int(1), Value::Text("Alice".into())]
        );
        assert_eq!(
            result.rows[1],
            vec![Value::Int(2), Value::Text("Bob".into())]
        );
    }

    #[test]
    fn test_insert_missing_column() {
        let mut table = Table::new("students".into(), student_schema());

        let mut partial = Row::new();
        partial.set("id", Value::Int(1));

        let result = table.insert(partial);
        assert!(matches!(result, Err(DbError::Schema(_))));
        assert_eq!(table.row_count(), 0);
    }

    #[test]
    fn test_insert_type_mismatch_leaves_table_unchanged() {
        let mut table = Table::new("students".into(), student_schema());

        let mut bad = Row::new();
        bad.set("id", Value::Text("one".into()));
        bad.set("name", Value::Text("Alice".into()));

        let result = table.insert(bad);
        assert!(matches!(result, Err(DbError::Schema(_))));
        assert_eq!(table.row_count(), 0);
    }

    #[test]
    fn test_insert_normalizes_column_casing() {
        let mut table = Table::new("students".into(), student_schema());

        let mut upper = Row::new();
        upper.set("ID", Value::Int(7));
        upper.set("NAME", Value::Text("Grace".into()));
        table.insert(upper).unwrap();

        let result = table
            .select(&Projection::Columns(vec!["name".into()]), None)
            .unwrap();

        // The result header uses the spelling the schema declared.
        assert_eq!(result.columns, vec!["Name"]);
        assert_eq!(result.rows[0], vec![Value::Text("Grace".into())]);
    }

    #[test]
    fn test_select_with_predicate() {
        let mut table = Table::new("students".into(), student_schema());
        table.insert(row(1, "Alice")).unwrap();
        table.insert(row(2, "Bob")).unwrap();

        let predicate = Predicate {
            column: "id".into(),
            value: Value::Int(2),
        };
        let result = table.select(&Projection::Star, Some(&predicate)).unwrap();

        assert_eq!(result.rows.len(), 1);
        assert_eq!(
            result.rows[0],
            vec![Value::Int(2), Value::Text("Bob".into())]
        );
    }

    #[test]
    fn test_select_unknown_column() {
        let table = Table::new("students".into(), student_schema());

        let result = table.select(&Projection::Columns(vec!["age".into()]), None);
        assert!(matches!(result, Err(DbError::Schema(_))));

        let predicate = Predicate {
            column: "age".into(),
            value: Value::Int(1),
        };
        let result = table.select(&Projection::Star, Some(&predicate));
        assert!(matches!(result, Err(DbError::Schema(_))));
    }

    #[test]
    fn test_predicate_cross_type_never_matches() {
        let mut table = Table::new("students".into(), student_schema());
        table.insert(row(1, "Alice")).unwrap();

        let predicate = Predicate {
            column: "id".into(),
            value: Value::Text("1".into()),
        };
        let result = table.select(&Projection::Star, Some(&predicate)).unwrap();

        assert!(result.rows.is_empty());
    }

    #[test]
    fn test_update_scoped_by_predicate() {
        let mut table = Table::new("students".into(), student_schema());
        table.insert(row(1, "Alice")).unwrap();
        table.insert(row(2, "Bob")).unwrap();

        let assignment = Assignment {
            column: "name".into(),
            value: Value::Text("Robert".into()),
        };
        let predicate = Predicate {
            column: "id".into(),
            value: Value::Int(2),
        };
        let updated = table.update(&assignment, Some(&predicate)).unwrap();

        assert_eq!(updated, 1);
        let result = table.select(&Projection::Star, None).unwrap();
        assert_eq!(result.rows[0][1], Value::Text("Alice".into()));
        assert_eq!(result.rows[1][1], Value::Text("Robert".into()));
    }

    #[test]
    fn test_update_without_predicate_touches_every_row() {
        let mut table = Table::new("students".into(), student_schema());
        table.insert(row(1, "Alice")).unwrap();
        table.insert(row(2, "Bob")).unwrap();

        let assignment = Assignment {
            column: "id".into(),
            value: Value::Int(0),
        };
        let updated = table.update(&assignment, None).unwrap();

        assert_eq!(updated, 2);
    }

    #[test]
    fn test_update_validates_before_scanning() {
        let mut table = Table::new("students".into(), student_schema());
        table.insert(row(1, "Alice")).unwrap();

        let mismatched = Assignment {
            column: "id".into(),
            value: Value::Text("oops".into()),
        };
        let result = table.update(&mismatched, None);

        assert!(matches!(result, Err(DbError::Schema(_))));
        let rows = table.select(&Projection::Star, None).unwrap().rows;
        assert_eq!(rows[0][0], Value::Int(1));
    }

    #[test]
    fn test_update_zero_matches() {
        let mut table = Table::new("students".into(), student_schema());
        table.insert(row(1, "Alice")).unwrap();

        let assignment = Assignment {
            column: "name".into(),
            value: Value::Text("Nobody".into()),
        };
        let predicate = Predicate {
            column: "id".into(),
            value: Value::Int(99),
        };

        assert_eq!(table.update(&assignment, Some(&predicate)).unwrap(), 0);
    }

    #[test]
    fn test_delete_with_predicate_preserves_order() {
        let mut table = Table::new("students".into(), student_schema());
        table.insert(row(1, "Alice")).unwrap();
        table.insert(row(2, "Bob")).unwrap();
        table.insert(row(3, "Charlie")).unwrap();

        let predicate = Predicate {
            column: "id".into(),
            value: Value::Int(2),
        };
        let removed = table.delete(Some(&predicate)).unwrap();

        assert_eq!(removed, 1);
        let result = table.select(&Projection::Star, None).unwrap();
        assert_eq!(result.rows[0][0], Value::Int(1));
        assert_eq!(result.rows[1][0], Value::Int(3));
    }

    #[test]
    fn test_delete_all_keeps_schema_usable() {
        let mut table = Table::new("students".into(), student_schema());
        table.insert(row(1, "Alice")).unwrap();
        table.insert(row(2, "Bob")).unwrap();

        let removed = table.delete(None).unwrap();

        assert_eq!(removed, 2);
        assert!(table.is_empty());

        // The schema survives the clear.
        table.insert(row(3, "Charlie")).unwrap();
        assert_eq!(table.row_count(), 1);
    }

    #[test]
    fn test_delete_unknown_predicate_column() {
        let mut table = Table::new("students".into(), student_schema());
        table.insert(row(1, "Alice")).unwrap();

        let predicate = Predicate {
            column: "age".into(),
            value: Value::Int(20),
        };
        let result = table.delete(Some(&predicate));

        assert!(matches!(result, Err(DbError::Schema(_))));
        assert_eq!(table.row_count(), 1);
    }
}
