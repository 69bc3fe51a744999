//! Process-wide property table
//!
//! A `name -> value` map shared by the whole process, seeded by the host
//! (command-line `-D name=value` definitions, property files) and read by the
//! resolver before it falls back to the environment.
//!
//! Property files are TOML. Nested tables flatten to dotted names:
//!
//! ```toml
//! [app]
//! mode = "prod"      # app.mode = prod
//! workers = 4        # app.workers = 4
//! ```

use crate::source::{LookupError, ValueSource};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{OnceLock, PoisonError, RwLock};
use thiserror::Error;
use tracing::debug;

static TABLE: OnceLock<RwLock<HashMap<String, String>>> = OnceLock::new();

fn table() -> &'static RwLock<HashMap<String, String>> {
    TABLE.get_or_init(|| RwLock::new(HashMap::new()))
}

/// Errors raised while seeding the property table
#[derive(Debug, Error)]
pub enum PropertiesError {
    /// Property file could not be read
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Property document is not valid TOML; `path` is set when it came from a file
    #[error("TOML parsing error in {}: {source}", describe_origin(.path))]
    TomlParse {
        path: Option<PathBuf>,
        source: toml::de::Error,
    },

    /// A `name=value` definition without `=` or with a blank name
    #[error("Invalid property definition '{definition}': expected NAME=VALUE")]
    InvalidDefinition { definition: String },

    /// A property file entry that has no single string form
    #[error("Property '{name}' has unsupported {kind} value")]
    UnsupportedValue { name: String, kind: &'static str },
}

fn describe_origin(path: &Option<PathBuf>) -> String {
    match path {
        Some(path) => path.display().to_string(),
        None => "property document".to_string(),
    }
}

/// Set a property, returning the previous value
pub fn set_property(name: impl Into<String>, value: impl Into<String>) -> Option<String> {
    table()
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .insert(name.into(), value.into())
}

/// Read a property; an unreadable table reads as unset
pub fn property(name: &str) -> Option<String> {
    SystemProperties.lookup(name).ok().flatten()
}

/// Remove a property, returning its value
pub fn clear_property(name: &str) -> Option<String> {
    table()
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .remove(name)
}

/// All property names currently set, sorted
pub fn property_names() -> Vec<String> {
    let mut names: Vec<String> = table()
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .keys()
        .cloned()
        .collect();
    names.sort();
    names
}

/// The process property table as a [`ValueSource`]
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemProperties;

impl ValueSource for SystemProperties {
    fn lookup(&self, name: &str) -> Result<Option<String>, LookupError> {
        let guard = table().read().map_err(|_| LookupError::AccessDenied {
            name: name.to_string(),
            reason: "property table lock poisoned".to_string(),
        })?;
        Ok(guard.get(name).cloned())
    }
}

/// Split a `NAME=VALUE` definition on its first `=`
///
/// The name is trimmed and must not be empty. The value is kept verbatim and
/// may be empty or contain further `=` characters.
pub fn parse_definition(definition: &str) -> Result<(String, String), PropertiesError> {
    let invalid = || PropertiesError::InvalidDefinition {
        definition: definition.to_string(),
    };
    let (name, value) = definition.split_once('=').ok_or_else(invalid)?;
    let name = name.trim();
    if name.is_empty() {
        return Err(invalid());
    }
    Ok((name.to_string(), value.to_string()))
}

/// Parse a TOML property document into flattened `(name, value)` pairs
///
/// Pairs are returned sorted by name.
pub fn parse_document(contents: &str) -> Result<Vec<(String, String)>, PropertiesError> {
    parse_from(contents, None)
}

fn parse_from(
    contents: &str,
    path: Option<&Path>,
) -> Result<Vec<(String, String)>, PropertiesError> {
    let document: toml::Table = contents.parse().map_err(|source| PropertiesError::TomlParse {
        path: path.map(Path::to_path_buf),
        source,
    })?;
    let mut pairs = Vec::new();
    flatten(None, &document, &mut pairs)?;
    pairs.sort();
    Ok(pairs)
}

fn flatten(
    prefix: Option<&str>,
    table: &toml::Table,
    out: &mut Vec<(String, String)>,
) -> Result<(), PropertiesError> {
    for (key, value) in table {
        let name = match prefix {
            Some(prefix) => format!("{prefix}.{key}"),
            None => key.clone(),
        };
        match value {
            toml::Value::Table(nested) => flatten(Some(&name), nested, out)?,
            toml::Value::Array(_) => {
                return Err(PropertiesError::UnsupportedValue {
                    name,
                    kind: value.type_str(),
                });
            }
            toml::Value::String(s) => out.push((name, s.clone())),
            scalar => out.push((name, scalar.to_string())),
        }
    }
    Ok(())
}

/// Load a TOML property file into the process table
///
/// The whole file is parsed before anything is installed, so a bad file
/// leaves the table untouched. Returns the number of properties set.
pub fn load_file(path: &Path) -> Result<usize, PropertiesError> {
    let contents = std::fs::read_to_string(path).map_err(|source| PropertiesError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let pairs = parse_from(&contents, Some(path))?;
    let count = pairs.len();

    let mut guard = table().write().unwrap_or_else(PoisonError::into_inner);
    guard.extend(pairs);
    drop(guard);

    debug!("Loaded {count} properties from {}", path.display());
    Ok(count)
}
