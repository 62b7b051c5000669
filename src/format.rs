//! The `format` registry and built-in format checks.
//!
//! A [`FormatRegistry`] maps a format name to a [`FormatValidator`]. The
//! registry is plain configuration: which names are available for a draft is
//! decided when a [`Validator`](crate::Validator) is built, and a schema that
//! names an unregistered format gets a `Formatting::Unsupported` error.

use std::net::Ipv6Addr;
use std::sync::{Arc, OnceLock};

use chrono::{DateTime, NaiveDate};
use indexmap::IndexMap;
use ::regex::Regex;
use ::uuid::Uuid;

use crate::error::Formatting;

/// A capability that checks a string against a named format.
///
/// Any `Fn(&str) -> Result<(), Formatting>` closure that is `Send + Sync`
/// implements this trait.
///
/// # Example
///
/// ```rust
/// use schemata::format::{FormatRegistry, FormatValidator};
/// use schemata::error::Formatting;
///
/// let registry = FormatRegistry::new().with("even-length", |s: &str| {
///     if s.len() % 2 == 0 {
///         Ok(())
///     } else {
///         Err(Formatting::Custom {
///             format: "even-length".to_string(),
///             instance: s.to_string(),
///         })
///     }
/// });
///
/// let check = registry.get("even-length").unwrap();
/// assert!(check.validate("ab").is_ok());
/// assert!(check.validate("abc").is_err());
/// ```
pub trait FormatValidator: Send + Sync {
    /// Returns the formatting violation for `instance`, if any.
    fn validate(&self, instance: &str) -> Result<(), Formatting>;
}

impl<F> FormatValidator for F
where
    F: Fn(&str) -> Result<(), Formatting> + Send + Sync,
{
    fn validate(&self, instance: &str) -> Result<(), Formatting> {
        self(instance)
    }
}

/// Names of every format with a built-in implementation.
pub const BUILTIN_FORMATS: &[&str] = &[
    "date",
    "date-time",
    "duration",
    "ipv4",
    "ipv6",
    "json-pointer",
    "regex",
    "time",
    "uri",
    "uuid",
];

/// A mapping from format name to its validation capability.
///
/// Names keep their registration order.
#[derive(Clone, Default)]
pub struct FormatRegistry {
    formats: IndexMap<String, Arc<dyn FormatValidator>>,
}

impl FormatRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding the named built-in formats.
    ///
    /// Names without a built-in implementation are skipped.
    pub fn with_builtins(names: &[&str]) -> Self {
        let formats = names
            .iter()
            .filter_map(|name| builtin(name).map(|check| (name.to_string(), check)))
            .collect();
        Self { formats }
    }

    /// Adds or replaces a format and returns the registry for chaining.
    pub fn with<V>(mut self, name: impl Into<String>, validator: V) -> Self
    where
        V: FormatValidator + 'static,
    {
        self.insert(name, validator);
        self
    }

    /// Adds or replaces a format.
    pub fn insert<V>(&mut self, name: impl Into<String>, validator: V)
    where
        V: FormatValidator + 'static,
    {
        self.formats.insert(name.into(), Arc::new(validator));
    }

    /// Removes a format, returning true if it was registered.
    pub fn remove(&mut self, name: &str) -> bool {
        self.formats.shift_remove(name).is_some()
    }

    /// Looks up a format by name.
    pub fn get(&self, name: &str) -> Option<&Arc<dyn FormatValidator>> {
        self.formats.get(name)
    }

    /// Returns true if the format is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.formats.contains_key(name)
    }

    /// Returns the registered names in registration order.
    pub fn names(&self) -> Vec<&str> {
        self.formats.keys().map(String::as_str).collect()
    }
}

impl std::fmt::Debug for FormatRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormatRegistry")
            .field("formats", &self.names())
            .finish()
    }
}

/// Returns the built-in implementation of a format.
pub fn builtin(name: &str) -> Option<Arc<dyn FormatValidator>> {
    let check: Arc<dyn FormatValidator> = match name {
        "ipv4" => Arc::new(ipv4),
        "ipv6" => Arc::new(ipv6),
        "uri" => Arc::new(uri),
        "uuid" => Arc::new(uuid),
        "regex" => Arc::new(regex),
        "json-pointer" => Arc::new(json_pointer),
        "date-time" => Arc::new(date_time),
        "date" => Arc::new(date),
        "time" => Arc::new(time),
        "duration" => Arc::new(duration),
        _ => return None,
    };
    Some(check)
}

fn compiled(cell: &'static OnceLock<Regex>, pattern: &str) -> &'static Regex {
    cell.get_or_init(|| Regex::new(pattern).expect("built-in format pattern is valid"))
}

/// Dotted-quad IPv4 address with decimal octets in `0..=255`.
pub fn ipv4(value: &str) -> Result<(), Formatting> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = compiled(
        &RE,
        r"^(25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)\.(25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)\.(25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)\.(25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)$",
    );
    if re.is_match(value) {
        Ok(())
    } else {
        Err(Formatting::InvalidIpv4Address {
            instance: value.to_string(),
        })
    }
}

/// IPv6 address as accepted by the standard library, without a zone id.
pub fn ipv6(value: &str) -> Result<(), Formatting> {
    if !value.contains('%') && value.parse::<Ipv6Addr>().is_ok() {
        Ok(())
    } else {
        Err(Formatting::InvalidIpv6Address {
            instance: value.to_string(),
        })
    }
}

/// Absolute URI: a scheme followed by URI characters or percent escapes,
/// matched against the whole string.
pub fn uri(value: &str) -> Result<(), Formatting> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = compiled(
        &RE,
        r"^[A-Za-z][A-Za-z0-9+.\-]*:(?:[A-Za-z0-9.\-_~:/?#\[\]@!$&'()*+,;=]|%[A-Fa-f0-9]{2})+$",
    );
    if re.is_match(value) {
        Ok(())
    } else {
        Err(Formatting::InvalidUri {
            instance: value.to_string(),
        })
    }
}

/// Canonical hyphenated UUID (`8-4-4-4-12` hex digits).
pub fn uuid(value: &str) -> Result<(), Formatting> {
    // the hyphenated form is the only one that is 36 characters long
    if value.len() == 36 && Uuid::parse_str(value).is_ok() {
        Ok(())
    } else {
        Err(Formatting::InvalidUuid {
            instance: value.to_string(),
        })
    }
}

/// A string that compiles as a regular expression.
pub fn regex(value: &str) -> Result<(), Formatting> {
    match Regex::new(value) {
        Ok(_) => Ok(()),
        Err(_) => Err(Formatting::InvalidRegex {
            instance: value.to_string(),
        }),
    }
}

/// RFC 6901 JSON Pointer: empty, or `/`-prefixed with only `~0`/`~1` escapes.
pub fn json_pointer(value: &str) -> Result<(), Formatting> {
    if value.is_empty() || (value.starts_with('/') && crate::path::has_valid_escapes(value)) {
        Ok(())
    } else {
        Err(Formatting::InvalidJsonPointer {
            instance: value.to_string(),
        })
    }
}

/// RFC 3339 `date-time`.
pub fn date_time(value: &str) -> Result<(), Formatting> {
    match DateTime::parse_from_rfc3339(value) {
        Ok(_) => Ok(()),
        Err(_) => Err(Formatting::Rfc3339DateTime {
            instance: value.to_string(),
        }),
    }
}

/// RFC 3339 `full-date`.
pub fn date(value: &str) -> Result<(), Formatting> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = compiled(&RE, r"^\d{4}-\d{2}-\d{2}$");
    if re.is_match(value) && NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok() {
        Ok(())
    } else {
        Err(Formatting::Rfc3339Date {
            instance: value.to_string(),
        })
    }
}

/// RFC 3339 `full-time`, offset required.
pub fn time(value: &str) -> Result<(), Formatting> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = compiled(
        &RE,
        r"^\d{2}:\d{2}:\d{2}(?:\.\d+)?(?:[Zz]|[+-]\d{2}:\d{2})$",
    );
    if re.is_match(value) && DateTime::parse_from_rfc3339(&format!("1970-01-01T{}", value)).is_ok()
    {
        Ok(())
    } else {
        Err(Formatting::Rfc3339Time {
            instance: value.to_string(),
        })
    }
}

/// ISO 8601 duration as profiled by RFC 3339 appendix A.
pub fn duration(value: &str) -> Result<(), Formatting> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = compiled(
        &RE,
        r"^P(?:\d+W|(?:\d+Y(?:\d+M)?(?:\d+D)?|\d+M(?:\d+D)?|\d+D)(?:T(?:\d+H(?:\d+M)?(?:\d+S)?|\d+M(?:\d+S)?|\d+S))?|T(?:\d+H(?:\d+M)?(?:\d+S)?|\d+M(?:\d+S)?|\d+S))$",
    );
    if re.is_match(value) {
        Ok(())
    } else {
        Err(Formatting::Duration {
            instance: value.to_string(),
        })
    }
}
