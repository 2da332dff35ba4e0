use std::io::BufRead;
use std::rc::Rc;

use crate::error::ScanError;
use crate::license::words::{normalize, WordSet};

/// Canonical license texts, embedded at build time.
const ASSETS: &[(&str, &str)] = &[
    ("mit", include_str!("../../assets/licenses/mit.txt")),
    ("apache-2.0", include_str!("../../assets/licenses/apache-2.0.txt")),
    ("bsd-2-clause", include_str!("../../assets/licenses/bsd-2-clause.txt")),
    ("bsd-3-clause", include_str!("../../assets/licenses/bsd-3-clause.txt")),
    ("isc", include_str!("../../assets/licenses/isc.txt")),
    ("unlicense", include_str!("../../assets/licenses/unlicense.txt")),
    ("0bsd", include_str!("../../assets/licenses/0bsd.txt")),
    ("zlib", include_str!("../../assets/licenses/zlib.txt")),
];

/// A known license reduced to its metadata and vocabulary.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Template {
    pub title: String,
    pub nickname: String,
    pub spdx_id: String,
    pub words: WordSet,
}

impl Template {
    /// Nickname when the asset declares one, SPDX identifier otherwise.
    pub fn short_name(&self) -> &str {
        if self.nickname.is_empty() {
            &self.spdx_id
        } else {
            &self.nickname
        }
    }
}

/// Where the parser stands in a `---` delimited asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    /// Looking for the opening `---`.
    Preamble,
    /// Between the delimiters, reading `key: value` lines.
    FrontMatter,
    /// After the closing `---`; every line is license text.
    Body,
}

impl Section {
    fn next(self, line: &str) -> Section {
        match (self, line.trim() == "---") {
            (Section::Preamble, true) => Section::FrontMatter,
            (Section::FrontMatter, true) => Section::Body,
            (state, _) => state,
        }
    }
}

/// Parse one asset.
///
/// A front matter that is never closed yields an empty word set, since no
/// line ever reaches the body.
pub fn parse_template<R: BufRead>(reader: R) -> std::io::Result<Template> {
    let mut template = Template::default();
    let mut body = String::new();
    let mut section = Section::Preamble;

    for line in reader.lines() {
        let line = line?;
        match section {
            Section::Body => {
                body.push_str(&line);
                body.push('\n');
            }
            Section::FrontMatter if line.trim() != "---" => {
                let meta = line.trim();
                if let Some(v) = meta.strip_prefix("title:") {
                    template.title = v.trim().to_string();
                } else if let Some(v) = meta.strip_prefix("nickname:") {
                    template.nickname = v.trim().to_string();
                } else if let Some(v) = meta.strip_prefix("spdx-id:") {
                    template.spdx_id = v.trim().to_string();
                }
            }
            _ => section = section.next(&line),
        }
    }

    template.words = normalize(body.as_bytes());
    Ok(template)
}

/// Parse every embedded asset. Any failure aborts the whole load.
pub fn load_templates() -> Result<Vec<Rc<Template>>, ScanError> {
    ASSETS
        .iter()
        .map(|(name, content)| {
            parse_template(content.as_bytes())
                .map(Rc::new)
                .map_err(|source| ScanError::Template {
                    name: name.to_string(),
                    source,
                })
        })
        .collect()
}
