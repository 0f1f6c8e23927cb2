use minisql::{Database, Outcome};

/// Runs a fixed statement script against a fresh database and prints what
/// each statement produced. Errors abort nothing; the script keeps going.
fn main() {
    let mut db = Database::new();

    let script = [
        "CREATE TABLE student (id INT, name STRING, age INT)",
        "INSERT INTO student (id, name, age) VALUES (1, 'Alice', 20)",
        "INSERT INTO student (id, name, age) VALUES (2, 'Bob', 21)",
        "INSERT INTO student (id, name, age) VALUES (3, 'Charlie', 22)",
        "SELECT * FROM student",
        "SELECT name,age FROM student WHERE id = 2",
        "UPDATE student SET age = 23 WHERE name = 'Bob'",
        "SELECT * FROM student",
        "DELETE FROM student WHERE id = 3",
        "DELETE FROM student",
        "SELECT * FROM student",
    ];

    for statement in script {
        println!("> {statement}");
        match db.execute(statement) {
            Ok(outcome) => render(&outcome),
            Err(err) => println!("{err}"),
        }
        println!();
    }
}

fn render(outcome: &Outcome) {
    match outcome {
        Outcome::Created { table } => println!("created table {table}"),
        Outcome::Inserted { count } => println!("{count} row(s) inserted"),
        Outcome::Updated { count } => println!("{count} row(s) updated"),
        Outcome::Deleted { count } => println!("{count} row(s) deleted"),
        Outcome::Rows(result) => {
            println!("{}", result.columns.join(" | "));
            for row in &result.rows {
                let cells: Vec<String> = row.iter().map(ToString::to_string).collect();
                println!("{}", cells.join(" | "));
            }
            println!("({} row(s))", result.rows.len());
        }
        Outcome::Empty => {}
    }
}
