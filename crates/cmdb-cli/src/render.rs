//! Terminal rendering of view models.
//!
//! Every renderer takes a `styled` flag: `false` yields plain text with the
//! same layout, which keeps output testable and pipe-friendly.

use colored::Colorize;
use cmdb_core::chat::{ChatEntry, Sender};
use cmdb_core::view::{BadgeTone, Cell, CellStyle, DashboardHeader, FaqList, TableView};

const COLUMN_GAP: &str = "  ";

pub fn header(header: &DashboardHeader, styled: bool) -> String {
    let line = format!(
        "Account: {}  Region: {}  Last updated: {}",
        header.account, header.region, header.last_updated
    );
    if styled {
        line.bold().to_string()
    } else {
        line
    }
}

pub fn table(table: &TableView, styled: bool) -> String {
    let widths = table.column_widths();
    let mut out = String::new();

    let title = if styled {
        table.title.bright_magenta().bold().to_string()
    } else {
        table.title.clone()
    };
    out.push_str(&title);
    out.push('\n');

    let header_line = table
        .columns
        .iter()
        .zip(&widths)
        .map(|(name, width)| format!("{name:<width$}"))
        .collect::<Vec<_>>()
        .join(COLUMN_GAP);
    let header_line = header_line.trim_end();
    if styled {
        out.push_str(&header_line.bold().to_string());
    } else {
        out.push_str(header_line);
    }
    out.push('\n');

    let rule = widths
        .iter()
        .map(|width| "-".repeat(*width))
        .collect::<Vec<_>>()
        .join(COLUMN_GAP);
    out.push_str(&rule);
    out.push('\n');

    if table.rows.is_empty() {
        out.push_str(&placeholder("(none)", styled));
        out.push('\n');
    }

    for row in &table.rows {
        let last = row.len().saturating_sub(1);
        let line = row
            .iter()
            .zip(&widths)
            .enumerate()
            .map(|(index, (cell, width))| {
                // No trailing padding after the last column
                let padded = if index == last {
                    cell.text.clone()
                } else {
                    format!("{:<width$}", cell.text)
                };
                paint(cell, padded, styled)
            })
            .collect::<Vec<_>>()
            .join(COLUMN_GAP);
        out.push_str(&line);
        out.push('\n');
    }

    out
}

fn paint(cell: &Cell, padded: String, styled: bool) -> String {
    if !styled {
        return padded;
    }
    match cell.style {
        CellStyle::Plain => padded,
        CellStyle::Mono => padded.cyan().to_string(),
        CellStyle::Badge(BadgeTone::Success) => padded.green().bold().to_string(),
        CellStyle::Badge(BadgeTone::Neutral) => padded.bright_black().to_string(),
    }
}

fn placeholder(text: &str, styled: bool) -> String {
    if styled {
        text.bright_black().to_string()
    } else {
        text.to_string()
    }
}

/// Numbered accordion; expanded items show their answer indented below.
pub fn faq(list: &FaqList, expand_all: bool, styled: bool) -> String {
    if list.is_empty() {
        return placeholder("No FAQ entries.", styled) + "\n";
    }

    let mut out = String::new();
    for (index, item) in list.items().iter().enumerate() {
        let open = expand_all || list.is_expanded(index);
        let marker = if open { "v" } else { ">" };
        let question = format!("{marker} {}. {}", index + 1, item.question);
        if styled {
            out.push_str(&question.bold().to_string());
        } else {
            out.push_str(&question);
        }
        out.push('\n');

        if open {
            for line in item.answer.lines() {
                out.push_str("     ");
                out.push_str(line);
                out.push('\n');
            }
        }
    }
    out
}

pub fn chat_entry(entry: &ChatEntry, styled: bool) -> String {
    let (label, text) = match entry.sender {
        Sender::User => ("you", entry.text.as_str()),
        Sender::Bot => ("bot", entry.text.as_str()),
    };
    let mut out = String::new();
    for (index, line) in text.lines().enumerate() {
        let prefix = if index == 0 {
            format!("{label}> ")
        } else {
            " ".repeat(label.len() + 2)
        };
        let line = format!("{prefix}{line}");
        let line = match (styled, entry.sender) {
            (false, _) => line,
            (true, Sender::User) => line.green().to_string(),
            (true, Sender::Bot) => line.bright_blue().to_string(),
        };
        out.push_str(&line);
        out.push('\n');
    }
    out
}

pub fn error(message: &str, styled: bool) -> String {
    let line = format!("Error: {message}");
    if styled {
        line.red().to_string()
    } else {
        line
    }
}
