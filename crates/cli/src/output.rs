//! Output formatting for CLI

use clap::ValueEnum;
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use serde::Serialize;

/// Output format
#[derive(Debug, Clone, Copy, ValueEnum, Default)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format
    Json,
    /// Plain text format
    Plain,
}

/// Items rendered as one table row
pub trait TableDisplay {
    fn headers() -> Vec<&'static str>;
    fn row(&self) -> Vec<String>;
}

/// Items rendered as a two-column field/value listing
pub trait FieldDisplay {
    fn fields(&self) -> Vec<(String, String)>;
}

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Print a single item as field/value pairs
pub fn print_fields<T: Serialize + FieldDisplay>(item: &T, format: OutputFormat) {
    match format {
        OutputFormat::Table => {
            let mut table = new_table();
            table.set_header(vec!["Field", "Value"]);
            for (field, value) in item.fields() {
                table.add_row(vec![field, value]);
            }
            println!("{table}");
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(item).unwrap_or_default());
        }
        OutputFormat::Plain => {
            for (field, value) in item.fields() {
                println!("{}: {}", field, value);
            }
        }
    }
}

fn list_table<T: TableDisplay>(items: &[T]) -> Table {
    let mut table = new_table();
    table.set_header(T::headers());
    for item in items {
        table.add_row(item.row());
    }
    table
}

/// Print a list of items
pub fn print_list<T: Serialize + TableDisplay>(items: &[T], format: OutputFormat) {
    match format {
        OutputFormat::Table => println!("{}", list_table(items)),
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(items).unwrap_or_default());
        }
        OutputFormat::Plain => {
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    println!("---");
                }
                let row = item.row();
                for (header, value) in T::headers().iter().zip(row.iter()) {
                    println!("{}: {}", header, value);
                }
            }
        }
    }
}

/// Print success message
pub fn print_success(message: &str) {
    println!("{} {}", "✔".green(), message);
}

/// Print error message
pub fn print_error(message: &str) {
    eprintln!("{} {}", "✘".red(), message);
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Row(&'static str, bool);

    impl TableDisplay for Row {
        fn headers() -> Vec<&'static str> {
            vec!["Name", "Passed"]
        }

        fn row(&self) -> Vec<String> {
            vec![self.0.to_string(), self.1.to_string()]
        }
    }

    #[test]
    fn test_list_table_has_one_row_per_item() {
        let rendered = list_table(&[Row("auto-play", true), Row("audible", false)]).to_string();
        assert!(rendered.contains("Name"));
        assert!(rendered.contains("auto-play"));
        assert!(rendered.contains("audible"));
    }
}
