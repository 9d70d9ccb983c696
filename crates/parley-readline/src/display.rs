//! Terminal rendering of transcript rows.

use colored::Colorize;
use parley_core::session::TurnRole;
use parley_core::transcript::DisplayRow;

/// Width of the left column (user message / model label).
pub const LEFT_WIDTH: usize = 28;

/// Lays out one display row as `(left, right)` line pairs.
///
/// Long or multi-line left text is wrapped at `left_width` characters; the
/// right column keeps its own line breaks.
pub fn layout_row(row: &DisplayRow, left_width: usize) -> Vec<(String, String)> {
    let left_lines = wrap(&row.left.content, left_width);
    let right_lines: Vec<String> = row.right.content.lines().map(str::to_string).collect();

    let height = left_lines.len().max(right_lines.len()).max(1);
    (0..height)
        .map(|i| {
            (
                left_lines.get(i).cloned().unwrap_or_default(),
                right_lines.get(i).cloned().unwrap_or_default(),
            )
        })
        .collect()
}

fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    for line in text.lines() {
        let chars: Vec<char> = line.chars().collect();
        if chars.is_empty() {
            lines.push(String::new());
            continue;
        }
        for chunk in chars.chunks(width.max(1)) {
            lines.push(chunk.iter().collect());
        }
    }
    lines
}

fn paint(text: &str, role: TurnRole) -> String {
    match role {
        TurnRole::User => text.green().to_string(),
        TurnRole::Model => text.bright_magenta().to_string(),
        TurnRole::Ai => text.bright_blue().to_string(),
        TurnRole::Persona => text.bright_black().to_string(),
    }
}

/// Prints rows in the order given, with a rule after every exchange.
pub fn print_rows(rows: &[DisplayRow]) {
    if rows.is_empty() {
        println!("{}", "No messages yet.".bright_black());
        return;
    }

    for (index, row) in rows.iter().enumerate() {
        for (left, right) in layout_row(row, LEFT_WIDTH) {
            let padded = format!("{left:<LEFT_WIDTH$}");
            println!(
                "{} │ {}",
                paint(&padded, row.left.role),
                paint(&right, row.right.role)
            );
        }
        if index % 2 == 1 {
            println!("{}", "─".repeat(LEFT_WIDTH + 40).bright_black());
        }
    }
}
