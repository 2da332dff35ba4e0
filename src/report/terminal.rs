use colored::Colorize;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table};

use super::{Row, Verdict};

/// Render the rows as a colored table, followed by a summary line unless `quiet`.
pub fn render(rows: &[Row], quiet: bool) {
    println!("{}", build_table(rows));

    if quiet {
        return;
    }
    let count = |v: Verdict| rows.iter().filter(|r| r.verdict == v).count();
    let accepted = count(Verdict::Exact) + count(Verdict::Accepted) + count(Verdict::Declared);
    println!(
        "Total: {}  Accepted: {}  Unknown: {}  Missing: {}  Unresolved: {}",
        rows.len(),
        accepted.to_string().green(),
        count(Verdict::Unknown).to_string().yellow(),
        count(Verdict::Missing).to_string().yellow(),
        count(Verdict::Unresolved).to_string().red(),
    );
}

fn verdict_color(verdict: Verdict) -> Color {
    match verdict {
        Verdict::Exact => Color::Green,
        Verdict::Accepted => Color::Cyan,
        Verdict::Unknown => Color::Yellow,
        Verdict::Missing => Color::DarkGrey,
        Verdict::Unresolved => Color::Red,
        Verdict::Declared => Color::Blue,
    }
}

pub(crate) fn build_table(rows: &[Row]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Package").add_attribute(Attribute::Bold),
            Cell::new("License").add_attribute(Attribute::Bold),
            Cell::new("File").add_attribute(Attribute::Bold),
        ]);

    for row in rows {
        table.add_row(vec![
            Cell::new(&row.package),
            Cell::new(row.license_text("\n")).fg(verdict_color(row.verdict)),
            Cell::new(&row.path),
        ]);
    }
    table
}
