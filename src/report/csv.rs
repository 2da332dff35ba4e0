use std::io::Write;

use anyhow::Result;

use super::Row;

/// Quote a field when it holds a separator, quote, line break or leading space.
fn field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) || value.starts_with(' ') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Write `package,path,license` lines, without a header.
pub fn render<W: Write>(rows: &[Row], out: &mut W) -> Result<()> {
    for row in rows {
        let line = [
            field(&row.package),
            field(&row.path),
            field(&row.license_text("\n\t")),
        ];
        writeln!(out, "{}", line.join(","))?;
    }
    out.flush()?;
    Ok(())
}
