//! Value sources consulted by the resolver

use std::collections::HashMap;
use std::env;
use std::fmt;
use thiserror::Error;

/// Failure while reading a single name from a source
///
/// The resolver never propagates these; they downgrade the source to "not set".
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LookupError {
    /// The host refused access to the store
    #[error("access to '{name}' denied: {reason}")]
    AccessDenied { name: String, reason: String },

    /// The value exists but is not valid UTF-8
    #[error("value of '{name}' is not valid unicode")]
    NotUnicode { name: String },
}

/// A read-only, string-keyed store of configuration values
///
/// `Ok(None)` means the name is not set. Blank values are returned as-is;
/// deciding whether they count is the resolver's job.
pub trait ValueSource {
    fn lookup(&self, name: &str) -> Result<Option<String>, LookupError>;
}

impl<T: ValueSource + ?Sized> ValueSource for &T {
    fn lookup(&self, name: &str) -> Result<Option<String>, LookupError> {
        (**self).lookup(name)
    }
}

/// Which store produced a resolved value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Origin {
    Property,
    Environment,
}

impl Origin {
    pub fn as_str(self) -> &'static str {
        match self {
            Origin::Property => "property",
            Origin::Environment => "environment",
        }
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The process environment variable table
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessEnv;

impl ProcessEnv {
    /// Empty names and names containing `=` or NUL are never set.
    ///
    /// `env::var` already reports these as `NotPresent`; the check keeps the
    /// answer independent of the toolchain's handling of invalid keys.
    fn is_representable(name: &str) -> bool {
        !name.is_empty() && !name.contains('=') && !name.contains('\0')
    }
}

impl ValueSource for ProcessEnv {
    fn lookup(&self, name: &str) -> Result<Option<String>, LookupError> {
        if !Self::is_representable(name) {
            return Ok(None);
        }
        match env::var(name) {
            Ok(value) => Ok(Some(value)),
            Err(env::VarError::NotPresent) => Ok(None),
            Err(env::VarError::NotUnicode(_)) => Err(LookupError::NotUnicode {
                name: name.to_string(),
            }),
        }
    }
}

/// In-memory source for embedding fixed values or for tests
#[derive(Debug, Default, Clone)]
pub struct MapSource {
    values: HashMap<String, String>,
}

impl MapSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    /// Insert a value, returning the one it replaced
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.values.insert(name.into(), value.into())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MapSource {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl ValueSource for MapSource {
    fn lookup(&self, name: &str) -> Result<Option<String>, LookupError> {
        Ok(self.values.get(name).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const VAR: &str = "SYSPARAM_SOURCE_TEST_VAR";

    fn with_var<F: FnOnce()>(value: Option<&str>, f: F) {
        let original = env::var(VAR).ok();
        unsafe {
            match value {
                Some(v) => env::set_var(VAR, v),
                None => env::remove_var(VAR),
            }
        }

        f();

        // Restore
        unsafe {
            match original {
                Some(v) => env::set_var(VAR, v),
                None => env::remove_var(VAR),
            }
        }
    }

    #[test]
    #[serial]
    fn test_process_env_reads_set_variable() {
        with_var(Some("prod"), || {
            assert_eq!(ProcessEnv.lookup(VAR), Ok(Some("prod".to_string())));
        });
    }

    #[test]
    #[serial]
    fn test_process_env_unset_variable() {
        with_var(None, || {
            assert_eq!(ProcessEnv.lookup(VAR), Ok(None));
        });
    }

    #[test]
    #[serial]
    fn test_process_env_keeps_blank_values() {
        with_var(Some("   "), || {
            assert_eq!(ProcessEnv.lookup(VAR), Ok(Some("   ".to_string())));
        });
    }

    #[test]
    fn test_process_env_unrepresentable_names_are_unset() {
        assert_eq!(ProcessEnv.lookup(""), Ok(None));
        assert_eq!(ProcessEnv.lookup("A=B"), Ok(None));
        assert_eq!(ProcessEnv.lookup("A\0B"), Ok(None));
    }

    #[cfg(unix)]
    #[test]
    #[serial]
    fn test_process_env_non_unicode_is_lookup_error() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let original = env::var_os(VAR);
        unsafe { env::set_var(VAR, OsStr::from_bytes(&[0x66, 0x6f, 0x80])) };

        let result = ProcessEnv.lookup(VAR);

        unsafe {
            match original {
                Some(v) => env::set_var(VAR, v),
                None => env::remove_var(VAR),
            }
        }
        assert_eq!(
            result,
            Err(LookupError::NotUnicode {
                name: VAR.to_string()
            })
        );
    }

    #[test]
    fn test_map_source_lookup() {
        let source = MapSource::new().with("app.mode", "prod");
        assert_eq!(source.lookup("app.mode"), Ok(Some("prod".to_string())));
        assert_eq!(source.lookup("app.other"), Ok(None));
        assert_eq!(source.len(), 1);
    }

    #[test]
    fn test_map_source_insert_returns_previous() {
        let mut source = MapSource::new();
        assert!(source.is_empty());
        assert_eq!(source.insert("k", "one"), None);
        assert_eq!(source.insert("k", "two"), Some("one".to_string()));
    }

    #[test]
    fn test_map_source_from_iter() {
        let source: MapSource = [("a", "1"), ("b", "2")].into_iter().collect();
        assert_eq!(source.lookup("b"), Ok(Some("2".to_string())));
    }

    #[test]
    fn test_reference_is_a_source() {
        fn lookup_via<S: ValueSource>(source: S, name: &str) -> Option<String> {
            source.lookup(name).ok().flatten()
        }

        let source = MapSource::new().with("k", "v");
        assert_eq!(lookup_via(&source, "k"), Some("v".to_string()));
        assert_eq!(lookup_via(&source, "missing"), None);
    }

    #[test]
    fn test_origin_names() {
        assert_eq!(Origin::Property.as_str(), "property");
        assert_eq!(Origin::Environment.to_string(), "environment");
    }

    #[test]
    fn test_lookup_error_messages() {
        let denied = LookupError::AccessDenied {
            name: "app.mode".to_string(),
            reason: "policy".to_string(),
        };
        assert_eq!(denied.to_string(), "access to 'app.mode' denied: policy");
    }
}
