//! Per-resource filter allow-lists and value coercion.
//!
//! A [`FieldMap`] maps the public (API-facing) field name to a Sea-ORM column
//! and the [`FieldKind`] used to convert raw query-string values before they
//! reach the database. A field that is not in the map cannot be filtered on.

use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use sea_orm::{EntityTrait, Value};
use uuid::Uuid;

/// Logical type of a filterable field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    String,
    I64,
    F64,
    Bool,
    Uuid,
    Date,
    DateTimeUtc,
    /// Enumerated string column; values match the listed variants case-insensitively.
    Enum(&'static [&'static str]),
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String => write!(f, "string"),
            Self::I64 => write!(f, "integer"),
            Self::F64 => write!(f, "number"),
            Self::Bool => write!(f, "boolean"),
            Self::Uuid => write!(f, "uuid"),
            Self::Date => write!(f, "date"),
            Self::DateTimeUtc => write!(f, "date-time"),
            Self::Enum(variants) => write!(f, "one of [{}]", variants.join(", ")),
        }
    }
}

impl FieldKind {
    /// Convert a raw query-string value into a database value of this kind.
    ///
    /// Returns `None` when the value cannot be parsed.
    #[must_use]
    pub fn coerce(self, raw: &str) -> Option<Value> {
        let trimmed = raw.trim();
        match self {
            Self::String => Some(Value::String(Some(Box::new(raw.to_string())))),
            Self::I64 => trimmed.parse::<i64>().ok().map(|i| Value::BigInt(Some(i))),
            Self::F64 => trimmed
                .parse::<f64>()
                .ok()
                .filter(|f| f.is_finite())
                .map(|f| Value::Double(Some(f))),
            Self::Bool => parse_bool(trimmed).map(|b| Value::Bool(Some(b))),
            Self::Uuid => Uuid::parse_str(trimmed)
                .ok()
                .map(|u| Value::Uuid(Some(Box::new(u)))),
            Self::Date => trimmed
                .parse::<NaiveDate>()
                .ok()
                .map(|d| Value::ChronoDate(Some(Box::new(d)))),
            Self::DateTimeUtc => {
                parse_datetime_utc(trimmed).map(|dt| Value::ChronoDateTimeUtc(Some(Box::new(dt))))
            }
            Self::Enum(variants) => variants
                .iter()
                .find(|variant| variant.eq_ignore_ascii_case(trimmed))
                .map(|variant| Value::String(Some(Box::new((*variant).to_string())))),
        }
    }

    /// Whether the string-matching operators apply to this kind.
    #[must_use]
    pub const fn is_textual(self) -> bool {
        matches!(self, Self::String)
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    if value.eq_ignore_ascii_case("true") {
        Some(true)
    } else if value.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

/// RFC 3339 first, then naive date-times and bare dates read as UTC.
fn parse_datetime_utc(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Some(naive.and_utc());
        }
    }
    value
        .parse::<NaiveDate>()
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// A single filterable field: the column it reads and how values are typed.
#[derive(Clone, Debug)]
pub struct Field<E: EntityTrait> {
    pub column: E::Column,
    pub kind: FieldKind,
}

/// Allow-list of filterable fields for one entity.
///
/// Lookups are exact (case-sensitive) on the public name.
///
/// ```rust,ignore
/// let fields = FieldMap::<worker::Entity>::new()
///     .insert("status", worker::Column::Status, FieldKind::Enum(&["active", "pending"]))
///     .insert("salary", worker::Column::Salary, FieldKind::I64)
///     .insert("createdAt", worker::Column::CreatedAt, FieldKind::DateTimeUtc);
/// ```
#[derive(Clone, Debug)]
#[must_use]
pub struct FieldMap<E: EntityTrait> {
    fields: HashMap<String, Field<E>>,
}

impl<E: EntityTrait> Default for FieldMap<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: EntityTrait> FieldMap<E> {
    pub fn new() -> Self {
        Self {
            fields: HashMap::new(),
        }
    }

    /// Expose `column` under the public name `name`.
    pub fn insert(mut self, name: impl Into<String>, column: E::Column, kind: FieldKind) -> Self {
        self.fields.insert(name.into(), Field { column, kind });
        self
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Field<E>> {
        self.fields.get(name)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Public field names, sorted, for documentation output.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.fields.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}
