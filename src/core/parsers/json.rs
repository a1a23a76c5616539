use std::{fs, path::Path};

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::{Value, ser::PrettyFormatter};

/// Indentation used when writing JSON files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Indent {
    #[default]
    Tabs,
    Spaces(usize),
}

impl Indent {
    /// `None` means tabs; `Some(n)` means `n` spaces.
    pub fn from_spaces(spaces: Option<usize>) -> Self {
        match spaces {
            Some(n) => Indent::Spaces(n),
            None => Indent::Tabs,
        }
    }

    fn as_bytes(&self) -> Vec<u8> {
        match self {
            Indent::Tabs => b"\t".to_vec(),
            Indent::Spaces(n) => vec![b' '; *n],
        }
    }
}

/// Serialize a value as pretty-printed JSON with the given indentation.
pub fn to_json_string<T: Serialize + ?Sized>(value: &T, indent: Indent) -> Result<String> {
    let indent = indent.as_bytes();
    let mut buffer = Vec::new();
    let formatter = PrettyFormatter::with_indent(&indent);
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
    value
        .serialize(&mut serializer)
        .context("Failed to serialize JSON")?;
    String::from_utf8(buffer).context("Serialized JSON is not valid UTF-8")
}

/// Read and parse a JSON document.
pub fn read_json_file(path: &Path) -> Result<Value> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read JSON file: {}", path.display()))?;
    parse_json(&content).with_context(|| format!("Failed to parse JSON file: {}", path.display()))
}

/// Parse JSON text, tolerating a leading byte order mark.
pub fn parse_json(content: &str) -> Result<Value> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    Ok(serde_json::from_str(content)?)
}

/// Write a value as pretty-printed JSON, creating parent directories.
pub fn write_json_file(path: &Path, value: &Value, indent: Indent) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    let content = to_json_string(value, indent)?;
    fs::write(path, content).with_context(|| format!("Failed to write file: {}", path.display()))
}
