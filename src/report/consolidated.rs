use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};

use crate::models::LicenseRecord;

/// Write each record's license text after an index/package header.
pub fn write<W: Write>(records: &[&LicenseRecord], out: &mut W) -> Result<()> {
    for (i, record) in records.iter().enumerate() {
        write!(out, "---\nIndex: {}\nPackage: {}\nLicense:\n", i, record.package)?;
        if let Some(m) = record.match_result() {
            out.write_all(&m.file_content)?;
        }
    }
    out.flush()?;
    Ok(())
}

/// Write the consolidated license file to `path`, replacing any existing file.
pub fn write_file(path: &Path, records: &[&LicenseRecord]) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("unable to write consolidated license file {}", path.display()))?;
    write(records, &mut BufWriter::new(file))
        .with_context(|| format!("unable to write consolidated license file {}", path.display()))
}
