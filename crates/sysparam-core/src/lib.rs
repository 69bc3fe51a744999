//! Parameter resolution for sysparam
//!
//! Resolves a configuration value from two process-level stores:
//! - The process property table (see [`properties`])
//! - The environment variable table
//!
//! A property with content always wins over the environment variable. Lookups
//! that fail (denied access, non-UTF-8 values, poisoned locks) are treated as
//! "not set" and never reach the caller.
//!
//! ```
//! use sysparam_core::{MapSource, Origin, ParameterResolver};
//!
//! let properties = MapSource::new().with("app.mode", "   ");
//! let environment = MapSource::new().with("APP_MODE", "prod");
//! let resolver = ParameterResolver::new(properties, environment);
//!
//! // A blank property falls through to the environment variable
//! let resolved = resolver.resolve_with_origin("app.mode", "APP_MODE").unwrap();
//! assert_eq!(resolved.value, "prod");
//! assert_eq!(resolved.origin, Origin::Environment);
//! ```
//!
//! [`resolve`] does the same over the process property table and the process
//! environment.

pub mod logging;
pub mod properties;
pub mod resolver;
pub mod source;

pub use properties::{PropertiesError, SystemProperties};
pub use resolver::{
    Explanation, ParameterResolver, Resolved, SourceOutcome, has_content, resolve,
    resolve_with_origin,
};
pub use source::{LookupError, MapSource, Origin, ProcessEnv, ValueSource};
