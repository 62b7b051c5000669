//! Supported JSON Schema drafts and their keyword tables.
//!
//! Each [`Draft`] assembles its own [`KeywordTable`] and default set of
//! formats. Differences between drafts (the boolean `exclusiveMinimum`
//! sibling of draft 4, `minContains`/`maxContains` in 2019-09, `prefixItems`
//! in 2020-12, ...) live here as distinct table entries rather than as
//! branches inside the keyword functions.

use std::fmt::{self, Display};

use serde_json::Value;

use crate::format::FormatRegistry;
use crate::keywords::{array, combinators, equality, numeric, object, reference, string, type_check, KeywordTable};

/// A JSON Schema draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Draft {
    Draft4,
    Draft6,
    Draft7,
    Draft201909,
    #[default]
    Draft202012,
}

const DRAFT4_FORMATS: &[&str] = &["ipv4", "ipv6", "uri", "date-time"];
const DRAFT6_FORMATS: &[&str] = &["ipv4", "ipv6", "uri", "date-time", "json-pointer"];
const DRAFT7_FORMATS: &[&str] = &[
    "ipv4",
    "ipv6",
    "uri",
    "date-time",
    "json-pointer",
    "regex",
    "date",
    "time",
];
const MODERN_FORMATS: &[&str] = &[
    "ipv4",
    "ipv6",
    "uri",
    "date-time",
    "json-pointer",
    "regex",
    "date",
    "time",
    "uuid",
    "duration",
];

impl Draft {
    /// Every supported draft, oldest first.
    pub const ALL: [Draft; 5] = [
        Draft::Draft4,
        Draft::Draft6,
        Draft::Draft7,
        Draft::Draft201909,
        Draft::Draft202012,
    ];

    /// Recognizes a `$schema` URI. Both `http` and `https` and an optional
    /// trailing `#` are accepted.
    ///
    /// # Example
    ///
    /// ```rust
    /// use schemata::Draft;
    ///
    /// assert_eq!(
    ///     Draft::from_schema_uri("http://json-schema.org/draft-07/schema#"),
    ///     Some(Draft::Draft7)
    /// );
    /// assert_eq!(Draft::from_schema_uri("https://example.com/custom"), None);
    /// ```
    pub fn from_schema_uri(uri: &str) -> Option<Self> {
        let uri = uri.trim_end_matches('#');
        let path = uri
            .strip_prefix("https://")
            .or_else(|| uri.strip_prefix("http://"))?;

        match path {
            "json-schema.org/draft-04/schema" => Some(Draft::Draft4),
            "json-schema.org/draft-06/schema" => Some(Draft::Draft6),
            "json-schema.org/draft-07/schema" => Some(Draft::Draft7),
            "json-schema.org/draft/2019-09/schema" => Some(Draft::Draft201909),
            "json-schema.org/draft/2020-12/schema" => Some(Draft::Draft202012),
            _ => None,
        }
    }

    /// Detects the draft a schema declares through `$schema`.
    ///
    /// Returns `None` for boolean schemas, schemas without `$schema`, and
    /// unrecognized URIs.
    pub fn detect(schema: &Value) -> Option<Self> {
        schema
            .get("$schema")
            .and_then(Value::as_str)
            .and_then(Self::from_schema_uri)
    }

    /// The canonical meta-schema URI of this draft.
    pub fn schema_uri(&self) -> &'static str {
        match self {
            Draft::Draft4 => "http://json-schema.org/draft-04/schema#",
            Draft::Draft6 => "http://json-schema.org/draft-06/schema#",
            Draft::Draft7 => "http://json-schema.org/draft-07/schema#",
            Draft::Draft201909 => "https://json-schema.org/draft/2019-09/schema",
            Draft::Draft202012 => "https://json-schema.org/draft/2020-12/schema",
        }
    }

    /// Names of the formats a validator for this draft registers by default.
    pub fn default_formats(&self) -> &'static [&'static str] {
        match self {
            Draft::Draft4 => DRAFT4_FORMATS,
            Draft::Draft6 => DRAFT6_FORMATS,
            Draft::Draft7 => DRAFT7_FORMATS,
            Draft::Draft201909 | Draft::Draft202012 => MODERN_FORMATS,
        }
    }

    /// Builds the default format registry for this draft.
    pub fn formats(&self) -> FormatRegistry {
        FormatRegistry::with_builtins(self.default_formats())
    }

    /// Builds the keyword table for this draft.
    pub fn keywords(&self) -> KeywordTable {
        let table = KeywordTable::new()
            .with("$ref", reference::reference)
            .with("type", type_check::type_of)
            .with("enum", equality::enumeration)
            .with("allOf", combinators::all_of)
            .with("anyOf", combinators::any_of)
            .with("oneOf", combinators::one_of)
            .with("not", combinators::not)
            .with("required", object::required)
            .with("minLength", string::min_length)
            .with("maxLength", string::max_length)
            .with("pattern", string::pattern)
            .with("format", string::format)
            .with("minItems", array::min_items)
            .with("maxItems", array::max_items)
            .with("uniqueItems", array::unique_items)
            .with("minProperties", object::min_properties)
            .with("maxProperties", object::max_properties)
            .with("multipleOf", numeric::multiple_of)
            .with("properties", object::properties)
            .with("patternProperties", object::pattern_properties)
            .with("additionalProperties", object::additional_properties);

        match self {
            Draft::Draft4 => table
                .with("type", type_check::type_of_draft4)
                .with("minimum", numeric::minimum_draft4)
                .with("maximum", numeric::maximum_draft4)
                .with("items", array::items)
                .with("additionalItems", array::additional_items)
                .with("dependencies", object::dependencies)
                .with_ref_overriding_siblings(true),
            Draft::Draft6 => draft6(table).with_ref_overriding_siblings(true),
            Draft::Draft7 => draft6(table)
                .with("if", combinators::if_then_else)
                .with_ref_overriding_siblings(true),
            Draft::Draft201909 => modern(table)
                .with("items", array::items)
                .with("additionalItems", array::additional_items),
            Draft::Draft202012 => modern(table)
                .with("prefixItems", array::prefix_items)
                .with("items", array::items_after_prefix),
        }
    }
}

fn draft6(table: KeywordTable) -> KeywordTable {
    table
        .with("minimum", numeric::minimum)
        .with("maximum", numeric::maximum)
        .with("exclusiveMinimum", numeric::exclusive_minimum)
        .with("exclusiveMaximum", numeric::exclusive_maximum)
        .with("const", equality::constant)
        .with("contains", array::contains)
        .with("propertyNames", object::property_names)
        .with("items", array::items)
        .with("additionalItems", array::additional_items)
        .with("dependencies", object::dependencies)
}

fn modern(table: KeywordTable) -> KeywordTable {
    table
        .with("minimum", numeric::minimum)
        .with("maximum", numeric::maximum)
        .with("exclusiveMinimum", numeric::exclusive_minimum)
        .with("exclusiveMaximum", numeric::exclusive_maximum)
        .with("const", equality::constant)
        .with("contains", array::contains_bounded)
        .with("propertyNames", object::property_names)
        .with("if", combinators::if_then_else)
        .with("dependentRequired", object::dependent_required)
        .with("dependentSchemas", object::dependent_schemas)
}

impl Display for Draft {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Draft::Draft4 => "draft-04",
            Draft::Draft6 => "draft-06",
            Draft::Draft7 => "draft-07",
            Draft::Draft201909 => "2019-09",
            Draft::Draft202012 => "2020-12",
        };
        f.write_str(name)
    }
}
