//! The statement interpreter: tokenizes one raw statement, locates its
//! clauses by keyword position, coerces literals against the target table's
//! schema, and invokes the matching [Database]/[Table] operation.

use crate::clause;
use crate::data_type::DataType;
use crate::database::{Database, Outcome};
use crate::error::{DbError, DbResult};
use crate::row::Row;
use crate::table::{Assignment, ColumnDef, Predicate, Projection, Schema, Table};
use crate::tokenizer::Tokenizer;
use crate::value::Value;

/// Interprets and executes one raw statement, dispatching on the lowercased
/// leading keyword. A statement that tokenizes to nothing is a no-op.
pub fn execute(db: &mut Database, statement: &str) -> DbResult<Outcome> {
    let tokens = Tokenizer::new(statement).tokenize();

    let Some(first) = tokens.first() else {
        return Ok(Outcome::Empty);
    };

    match first.to_lowercase().as_str() {
        "create" => exec_create(db, statement, &tokens),
        "insert" => exec_insert(db, statement, &tokens),
        "select" => exec_select(db, &tokens),
        "update" => exec_update(db, &tokens),
        "delete" => exec_delete(db, &tokens),
        other => Err(DbError::Syntax(format!(
            "unrecognized statement keyword {other:?}"
        ))),
    }
}

/// `CREATE TABLE <name> (<column> <type>, ...)`
fn exec_create(db: &mut Database, statement: &str, tokens: &[String]) -> DbResult<Outcome> {
    expect_keyword(tokens, 1, "table", "CREATE must be followed by TABLE")?;
    let name = table_name(tokens, 2)?;

    let body = clause::extract_bracketed(statement)?;
    let mut columns: Vec<ColumnDef> = Vec::new();

    for item in clause::split_list(body) {
        let parts: Vec<&str> = item.split_whitespace().collect();
        let (column, keyword) = match parts.as_slice() {
            [column, keyword] => (*column, *keyword),
            _ => {
                return Err(DbError::Syntax(format!(
                    "malformed column definition {item:?}, expected <name> <type>"
                )));
            }
        };

        let data_type = DataType::from_keyword(keyword)
            .ok_or_else(|| DbError::Syntax(format!("unknown column type {keyword:?}")))?;

        if columns.iter().any(|c| c.name.eq_ignore_ascii_case(column)) {
            return Err(DbError::Schema(format!(
                "duplicate column {column:?} in table {name:?}"
            )));
        }

        columns.push(ColumnDef {
            name: column.to_string(),
            data_type,
        });
    }

    db.create_table(name.to_string(), Schema { columns })?;
    Ok(Outcome::Created {
        table: name.to_string(),
    })
}

/// `INSERT INTO <name> (<columns...>) VALUES (<values...>)`
///
/// The first occurrence of the keyword `VALUES` in the raw text splits the
/// column-list clause from the value-list clause; each side contributes one
/// bracketed list.
fn exec_insert(db: &mut Database, statement: &str, tokens: &[String]) -> DbResult<Outcome> {
    expect_keyword(tokens, 1, "into", "INSERT must be followed by INTO")?;
    let name = table_name(tokens, 2)?;

    let values_at = clause::find_keyword(statement, "values")
        .ok_or_else(|| DbError::Syntax("missing VALUES clause".into()))?;
    let (head, tail) = statement.split_at(values_at);

    let columns = clause::split_list(clause::extract_bracketed(head)?);
    let values = clause::split_list(clause::extract_bracketed(tail)?);

    if columns.len() != values.len() {
        return Err(DbError::Syntax(format!(
            "INSERT lists {} columns but {} values",
            columns.len(),
            values.len()
        )));
    }

    let table = db
        .get_table_mut(name)
        .ok_or_else(|| unknown_table(name))?;

    let mut row = Row::new();
    for (column, literal) in columns.iter().zip(values.iter()) {
        let def = table.schema.column(column).ok_or_else(|| {
            DbError::Schema(format!(
                "column {column:?} does not exist in table {:?}",
                table.name
            ))
        })?;
        let value = Value::coerce(literal, def.data_type)?;
        row.set(&def.name, value);
    }

    table.insert(row)?;
    Ok(Outcome::Inserted { count: 1 })
}

/// `SELECT <columns|*> FROM <name> [WHERE <column> = <value>]`
fn exec_select(db: &Database, tokens: &[String]) -> DbResult<Outcome> {
    let from_pos = keyword_position(tokens, "from")
        .ok_or_else(|| DbError::Syntax("missing FROM clause".into()))?;
    if from_pos < 2 {
        return Err(DbError::Syntax("missing column list before FROM".into()));
    }

    // The projection is taken from the second token only; a column list
    // must therefore be written without internal whitespace.
    let projection = if tokens[1] == "*" {
        Projection::Star
    } else {
        let names = clause::split_list(&tokens[1]);
        if names.is_empty() {
            return Err(DbError::Syntax("missing column list before FROM".into()));
        }
        Projection::Columns(names)
    };

    let name = table_name(tokens, from_pos + 1)?;
    let table = db.get_table(name).ok_or_else(|| unknown_table(name))?;

    let predicate = parse_predicate(table, tokens)?;
    let result = table.select(&projection, predicate.as_ref())?;
    Ok(Outcome::Rows(result))
}

/// `UPDATE <name> SET <column> = <value> [WHERE <column> = <value>]`
fn exec_update(db: &mut Database, tokens: &[String]) -> DbResult<Outcome> {
    let name = table_name(tokens, 1)?;
    let set_pos = keyword_position(tokens, "set")
        .ok_or_else(|| DbError::Syntax("missing SET clause".into()))?;

    let table = db
        .get_table_mut(name)
        .ok_or_else(|| unknown_table(name))?;

    let (column, value) = parse_equality(table, tokens, set_pos, "SET")?;
    let predicate = parse_predicate(table, tokens)?;

    let count = table.update(&Assignment { column, value }, predicate.as_ref())?;
    Ok(Outcome::Updated { count })
}

/// `DELETE FROM <name> [WHERE <column> = <value>]`
fn exec_delete(db: &mut Database, tokens: &[String]) -> DbResult<Outcome> {
    expect_keyword(tokens, 1, "from", "DELETE must be followed by FROM")?;
    let name = table_name(tokens, 2)?;

    let table = db
        .get_table_mut(name)
        .ok_or_else(|| unknown_table(name))?;

    let predicate = parse_predicate(table, tokens)?;
    let count = table.delete(predicate.as_ref())?;
    Ok(Outcome::Deleted { count })
}

// --- Clause Helpers ---

/// Scans the token sequence for the first case-insensitive occurrence of a
/// clause keyword.
fn keyword_position(tokens: &[String], keyword: &str) -> Option<usize> {
    tokens.iter().position(|t| t.eq_ignore_ascii_case(keyword))
}

/// Requires the token at `index` to be the given keyword (case-insensitive).
fn expect_keyword(tokens: &[String], index: usize, keyword: &str, message: &str) -> DbResult<()> {
    match tokens.get(index) {
        Some(token) if token.eq_ignore_ascii_case(keyword) => Ok(()),
        _ => Err(DbError::Syntax(message.into())),
    }
}

/// Reads the table-name token at `index`, trimming anything from the first
/// `(` onwards so a name written flush against its column list still
/// resolves.
fn table_name(tokens: &[String], index: usize) -> DbResult<&str> {
    let token = tokens
        .get(index)
        .ok_or_else(|| DbError::Syntax("missing table name".into()))?;

    let name = match token.find('(') {
        Some(open) => &token[..open],
        None => token.as_str(),
    };

    if name.is_empty() {
        return Err(DbError::Syntax(format!("missing table name in {token:?}")));
    }
    Ok(name)
}

/// Reads the three tokens following a clause keyword as `<column> = <value>`,
/// resolving the column against the table's schema and coercing the literal
/// to the column's declared type. Any operator other than `=` is rejected.
///
/// Returns the canonical column spelling and the coerced value.
fn parse_equality(
    table: &Table,
    tokens: &[String],
    keyword_pos: usize,
    label: &str,
) -> DbResult<(String, Value)> {
    let (column, operator, literal) = match tokens.get(keyword_pos + 1..keyword_pos + 4) {
        Some([column, operator, literal]) => (column, operator, literal),
        _ => {
            return Err(DbError::Syntax(format!(
                "incomplete {label} clause: expected <column> = <value>"
            )));
        }
    };

    if operator != "=" {
        return Err(DbError::Syntax(format!(
            "unsupported operator {operator:?} in {label} clause, only '=' is supported"
        )));
    }

    let def = table.schema.column(column).ok_or_else(|| {
        DbError::Schema(format!(
            "column {column:?} does not exist in table {:?}",
            table.name
        ))
    })?;
    let value = Value::coerce(literal, def.data_type)?;

    Ok((def.name.clone(), value))
}

/// Parses the optional WHERE clause into a [Predicate].
fn parse_predicate(table: &Table, tokens: &[String]) -> DbResult<Option<Predicate>> {
    match keyword_position(tokens, "where") {
        None => Ok(None),
        Some(pos) => {
            let (column, value) = parse_equality(table, tokens, pos, "WHERE")?;
            Ok(Some(Predicate { column, value }))
        }
    }
}

fn unknown_table(name: &str) -> DbError {
    DbError::Schema(format!("table {name:?} does not exist in the database"))
}
