//! YAML front matter: a `---` delimited metadata block at the top of a
//! markdown file.

use serde::de::DeserializeOwned;
use serde::Serialize;

const DELIMITER: &str = "---";

/// A markdown document split into typed metadata and body text.
#[derive(Debug, Clone, PartialEq)]
pub struct Document<T> {
    /// Parsed front matter, or `T::default()` when the file has none.
    pub front: T,
    /// Everything after the closing delimiter.
    pub body: String,
}

/// Splits `source` into its raw front-matter block and body.
///
/// Returns `None` for the block when the text does not open with a `---`
/// line or the block is never closed.
#[must_use]
pub fn split(source: &str) -> (Option<&str>, &str) {
    let Some(rest) = source.strip_prefix(DELIMITER) else {
        return (None, source);
    };
    let Some(rest) = rest.strip_prefix("\r\n").or_else(|| rest.strip_prefix('\n')) else {
        return (None, source);
    };

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end_matches(['\r', '\n']) == DELIMITER {
            return (Some(&rest[..offset]), &rest[offset + line.len()..]);
        }
        offset += line.len();
    }
    (None, source)
}

/// Parses a document, defaulting the metadata when the block is absent or empty.
///
/// # Errors
///
/// Returns an error if the block is present but is not valid YAML for `T`.
pub fn parse<T: DeserializeOwned + Default>(source: &str) -> Result<Document<T>, serde_yaml::Error> {
    let (block, body) = split(source);
    let front = match block {
        Some(yaml) if !yaml.trim().is_empty() => serde_yaml::from_str(yaml)?,
        _ => T::default(),
    };
    Ok(Document { front, body: body.to_string() })
}

/// Renders metadata and body back into a markdown document ending in a newline.
///
/// # Errors
///
/// Returns an error if `front` cannot be serialized to YAML.
pub fn render<T: Serialize>(front: &T, body: &str) -> Result<String, serde_yaml::Error> {
    let yaml = serde_yaml::to_string(front)?;
    let mut out = format!("{DELIMITER}\n{yaml}{DELIMITER}\n{body}");
    if !out.ends_with('\n') {
        out.push('\n');
    }
    Ok(out)
}
