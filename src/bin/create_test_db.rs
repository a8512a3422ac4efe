use std::error::Error;
use std::path::Path;
use std::process::exit;

use clap::Parser;
use rusqlite::Connection;
use time::OffsetDateTime;

use tally_rs::{
    ListKind, NewLineItem, TaskLabel, UserID, initialize_db, line_item::create_line_item,
};

/// A utility for creating a test database for tally.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,

    /// The ID of the user that owns the sample items.
    #[arg(long, default_value_t = 1)]
    user_id: i64,
}

const SAMPLE_INCOME: [(&str, Option<f64>); 3] = [
    ("Salary", Some(250_000.0)),
    ("Freelance design work", Some(42_500.0)),
    ("Birthday gift", None),
];

const SAMPLE_EXPENSES: [(&str, Option<f64>); 4] = [
    ("Rent", Some(85_000.0)),
    ("Groceries", Some(23_450.5)),
    ("Electricity bill", Some(6_780.0)),
    ("Bus fare", Some(1_200.0)),
];

/// Create and populate a database for manual testing.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let output_path = Path::new(&args.output_path);

    match output_path.extension() {
        None => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        Some(extension) if extension.is_empty() => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        _ => {}
    }

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    println!("Creating database at {output_path:#?}");
    let conn = Connection::open(output_path)?;

    initialize_db(&conn)?;

    let owner = UserID::new(args.user_id);

    for (kind, samples) in [
        (ListKind::Income, SAMPLE_INCOME.as_slice()),
        (ListKind::Expense, SAMPLE_EXPENSES.as_slice()),
    ] {
        println!("Creating sample {} items...", kind.label().to_lowercase());

        for (task, amount) in samples {
            let item = NewLineItem {
                task: TaskLabel::new(task)?,
                amount: *amount,
                owner,
            };

            create_line_item(kind, &item, OffsetDateTime::now_utc(), &conn)?;
        }
    }

    println!("Success!");

    Ok(())
}
