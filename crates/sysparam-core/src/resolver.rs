//! Property-then-environment parameter resolution
//!
//! # Precedence
//!
//! 1. Property named `property_name` (if it has content)
//! 2. Environment variable named `variable_name` (if it has content)
//! 3. Absent
//!
//! "Has content" means something is left after stripping leading and trailing
//! characters at or below U+0020 (space and ASCII control characters). Other
//! Unicode spaces count as content. Stripping is only used for that check; the
//! value is returned exactly as stored.

use crate::properties::SystemProperties;
use crate::source::{LookupError, Origin, ProcessEnv, ValueSource};
use tracing::{debug, trace};

/// Whether a value counts as set
pub fn has_content(value: &str) -> bool {
    !value.trim_matches(|c: char| c <= '\u{20}').is_empty()
}

/// A resolved value and the store it came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub value: String,
    pub origin: Origin,
}

/// What a single store reported for a name
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceOutcome {
    /// Set with content
    Found(String),
    /// Set, but empty or whitespace only
    Blank,
    /// Not set
    Unset,
    /// Lookup failed; carries the reason
    Unavailable(String),
}

impl SourceOutcome {
    fn from_lookup(result: Result<Option<String>, LookupError>) -> Self {
        match result {
            Ok(Some(value)) if has_content(&value) => SourceOutcome::Found(value),
            Ok(Some(_)) => SourceOutcome::Blank,
            Ok(None) => SourceOutcome::Unset,
            Err(e) => SourceOutcome::Unavailable(e.to_string()),
        }
    }

    pub fn value(&self) -> Option<&str> {
        match self {
            SourceOutcome::Found(value) => Some(value),
            _ => None,
        }
    }
}

/// Both stores' outcomes for one property/variable pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Explanation {
    pub property_name: String,
    pub variable_name: String,
    pub property: SourceOutcome,
    pub environment: SourceOutcome,
}

impl Explanation {
    /// The value `resolve` would return for the same inputs
    pub fn winner(&self) -> Option<Resolved> {
        if let Some(value) = self.property.value() {
            return Some(Resolved {
                value: value.to_string(),
                origin: Origin::Property,
            });
        }
        self.environment.value().map(|value| Resolved {
            value: value.to_string(),
            origin: Origin::Environment,
        })
    }
}

/// Resolves parameters from a property source with an environment fallback
#[derive(Debug, Clone, Default)]
pub struct ParameterResolver<P, E> {
    properties: P,
    environment: E,
}

impl ParameterResolver<SystemProperties, ProcessEnv> {
    /// Resolver over the process property table and the process environment
    pub fn system() -> Self {
        Self::new(SystemProperties, ProcessEnv)
    }
}

impl<P: ValueSource, E: ValueSource> ParameterResolver<P, E> {
    pub fn new(properties: P, environment: E) -> Self {
        Self {
            properties,
            environment,
        }
    }

    /// Resolve a value, property first
    pub fn resolve(&self, property_name: &str, variable_name: &str) -> Option<String> {
        self.resolve_with_origin(property_name, variable_name)
            .map(|resolved| resolved.value)
    }

    /// Resolve a value and report which store supplied it
    ///
    /// The environment is only consulted when the property has no content.
    pub fn resolve_with_origin(&self, property_name: &str, variable_name: &str) -> Option<Resolved> {
        if let Some(value) = read_guarded(&self.properties, property_name, Origin::Property) {
            trace!("Resolved '{property_name}' from property");
            return Some(Resolved {
                value,
                origin: Origin::Property,
            });
        }

        if let Some(value) = read_guarded(&self.environment, variable_name, Origin::Environment) {
            trace!("Resolved '{property_name}' from environment variable '{variable_name}'");
            return Some(Resolved {
                value,
                origin: Origin::Environment,
            });
        }

        trace!("No value for property '{property_name}' or environment variable '{variable_name}'");
        None
    }

    /// Read both stores and report each outcome
    pub fn explain(&self, property_name: &str, variable_name: &str) -> Explanation {
        Explanation {
            property_name: property_name.to_string(),
            variable_name: variable_name.to_string(),
            property: SourceOutcome::from_lookup(self.properties.lookup(property_name)),
            environment: SourceOutcome::from_lookup(self.environment.lookup(variable_name)),
        }
    }
}

/// Look up `name`, treating failures and blank values as unset
fn read_guarded<S: ValueSource>(source: &S, name: &str, origin: Origin) -> Option<String> {
    match source.lookup(name) {
        Ok(Some(value)) if has_content(&value) => Some(value),
        Ok(_) => None,
        Err(e) => {
            debug!("Ignoring {origin} lookup failure: {e}");
            None
        }
    }
}

/// Resolve from the process property table, falling back to the environment
pub fn resolve(property_name: &str, variable_name: &str) -> Option<String> {
    ParameterResolver::system().resolve(property_name, variable_name)
}

/// Like [`resolve`], also reporting the origin
pub fn resolve_with_origin(property_name: &str, variable_name: &str) -> Option<Resolved> {
    ParameterResolver::system().resolve_with_origin(property_name, variable_name)
}
