use std::{error::Error, fs::OpenOptions, sync::Arc};

use clap::{Parser, Subcommand};
use rusqlite::Connection;
use tracing_subscriber::{EnvFilter, Layer, filter, layer::SubscriberExt, util::SubscriberInitExt};

use tally_rs::{
    ConversionConfig, CurrencyConverter, ExchangeRateApi, LineItemId, ListKind, ListSnapshot,
    ListStore, UserID, format_conversion, format_money, stores::sqlite::create_line_item_store,
};

/// Record income and expenses and see their totals in a foreign currency.
///
/// The exchange rate API key, if the service needs one, is read from the environment
/// variable TALLY_RATE_API_KEY.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to the application SQLite database.
    #[arg(long)]
    db_path: String,

    /// The ID of the user whose lists to use.
    #[arg(long, default_value_t = 1)]
    user_id: i64,

    /// Print the list as JSON.
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show a list and its total.
    List {
        /// Which list to show.
        #[arg(value_enum)]
        kind: ListKind,
    },
    /// Add an item to a list.
    Add {
        /// Which list to add to.
        #[arg(value_enum)]
        kind: ListKind,
        /// What the money was for.
        task: String,
        /// How much money.
        #[arg(long, short, default_value = "")]
        amount: String,
    },
    /// Delete an item from a list.
    Delete {
        /// Which list to delete from.
        #[arg(value_enum)]
        kind: ListKind,
        /// The ID of the item.
        id: LineItemId,
    },
    /// Mark an item as complete, or as not complete if it already is.
    Toggle {
        /// Which list the item is in.
        #[arg(value_enum)]
        kind: ListKind,
        /// The ID of the item.
        id: LineItemId,
    },
}

impl Command {
    fn kind(&self) -> ListKind {
        match self {
            Command::List { kind }
            | Command::Add { kind, .. }
            | Command::Delete { kind, .. }
            | Command::Toggle { kind, .. } => *kind,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    setup_logging();

    let args = Args::parse();
    let config = ConversionConfig::from_env()?;
    tracing::debug!("Using {config:?}");

    let connection = Connection::open(&args.db_path)?;
    let store = create_line_item_store(connection)?;
    let converter = CurrencyConverter::new(ExchangeRateApi::new(&config), config);
    let mut list = ListStore::new(
        args.command.kind(),
        UserID::new(args.user_id),
        store,
        converter,
    );

    list.load().await?;

    match args.command {
        Command::List { .. } => {}
        Command::Add { task, amount, .. } => {
            list.set_draft_task(&task);
            list.set_draft_amount(&amount);

            match list.submit_draft().await {
                // Failures that set the error text are printed with the list.
                Err(error) if list.error_text().is_none() => print_error(error),
                _ => {}
            }
        }
        Command::Delete { id, .. } => {
            if let Err(error) = list.delete(id).await {
                print_error(format!("Could not delete item #{id}: {error}"));
            }
        }
        Command::Toggle { id, .. } => match list.toggle_complete(id).await {
            Ok(true) => println!("Marked item #{id} as complete."),
            Ok(false) => println!("Marked item #{id} as not complete."),
            Err(error) => print_error(format!("Could not update item #{id}: {error}")),
        },
    }

    list.settle_conversions().await;
    let snapshot = list.snapshot();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    } else {
        print_list(&snapshot);
    }

    Ok(())
}

fn print_list(snapshot: &ListSnapshot) {
    println!("{}", snapshot.kind.label());

    if snapshot.items.is_empty() {
        println!("  Nothing here yet.");
    }

    for item in &snapshot.items {
        let check = if item.is_complete() { "x" } else { " " };
        let amount = item
            .amount
            .map(|amount| format_money(&snapshot.source_currency, amount))
            .unwrap_or_else(|| "-".to_owned());

        println!("  [{check}] #{:<4} {:<32} {amount}", item.id, item.task);
    }

    if let Some(error_text) = &snapshot.error_text {
        print_error(error_text);
    }

    println!(
        "Total {}: {} - {}",
        snapshot.kind.label(),
        format_money(&snapshot.source_currency, snapshot.total),
        format_conversion(&snapshot.target_currency, &snapshot.conversion)
    );
}

fn print_error(error: impl ToString) {
    eprintln!(
        "\x1b[31;1m{}\x1b[0m",
        capitalise_first_char(&error.to_string())
    )
}

/// From https://crates.io/crates/capitalize
fn capitalise_first_char(string: &str) -> String {
    let mut chars = string.chars();
    let Some(first) = chars.next() else {
        return String::with_capacity(0);
    };
    first.to_uppercase().chain(chars).collect()
}

fn setup_logging() {
    let stderr_log = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_filter(filter::LevelFilter::WARN);

    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open("debug.log")
        .expect("Could not create log file");

    let debug_log = tracing_subscriber::fmt::layer()
        .pretty()
        .with_writer(Arc::new(log_file))
        .with_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("tally_rs=debug")),
        );

    tracing_subscriber::registry()
        .with(stderr_log)
        .with(debug_log)
        .init();
}
