use std::io::Write;

use anyhow::Result;

use super::Row;

const HEADERS: [&str; 3] = ["Package", "License File", "License"];

/// Cells cannot span lines or contain bare pipes.
fn cell(value: &str) -> String {
    value.replace('|', "\\|").replace('\n', "<br>")
}

/// Write a pipe table. Nothing is written when there are no rows.
pub fn render<W: Write>(rows: &[Row], out: &mut W) -> Result<()> {
    if rows.is_empty() {
        return Ok(());
    }
    writeln!(out, "{}", HEADERS.join("|"))?;
    writeln!(out, "{}", vec!["---"; HEADERS.len()].join("|"))?;
    for row in rows {
        let cols = [
            cell(&row.package),
            cell(&row.path),
            cell(&row.license_text("\n")),
        ];
        writeln!(out, "{}", cols.join("|"))?;
    }
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ProductConfig;
    use crate::report::tests::{matched, options};
    use crate::report::{build_rows, RenderOptions};

    #[test]
    fn test_empty_writes_nothing() {
        let mut out = Vec::new();
        render(&[], &mut out).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn test_table_layout() {
        let records = vec![matched("foo", "foo/LICENSE", "MIT License", 0.95)];
        let opts = RenderOptions {
            words: true,
            ..options()
        };
        let rows = build_rows(&records, &opts, &ProductConfig::default());
        let mut out = Vec::new();
        render(&rows, &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Package|License File|License\n---|---|---\n\
foo|foo/LICENSE|MIT License<br>+words: acme<br>-words: software, permission\n"
        );
    }
}
