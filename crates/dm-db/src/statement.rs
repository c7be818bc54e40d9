//! Parameterized statements and their bound values

use chrono::NaiveDate;
use duckdb::types::{ToSql, ToSqlOutput, Value};
use std::fmt;
use uuid::Uuid;

/// Column type a bound value is written into.
///
/// Postgres needs it to cast textual parameters; DuckDB casts implicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SqlType {
    Int,
    Text,
    Uuid,
    DateRange,
    /// A user-defined enum type such as `task_status`
    Enum(&'static str),
}

impl SqlType {
    /// Type name as written in a Postgres cast
    pub fn postgres_name(&self) -> &'static str {
        match self {
            SqlType::Int => "bigint",
            SqlType::Text => "text",
            SqlType::Uuid => "uuid",
            SqlType::DateRange => "daterange",
            SqlType::Enum(name) => *name,
        }
    }
}

/// Half-open date range `[start, end)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{},{})", self.start, self.end)
    }
}

/// A value bound to a `?` placeholder
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    /// SQL `NULL` destined for a column of the given type
    Null(SqlType),
    Int(i64),
    Text(String),
    Uuid(Uuid),
    DateRange(DateRange),
    Enum {
        type_name: &'static str,
        label: &'static str,
    },
}

/// Rust types with a fixed column type, so `None` can become a typed `NULL`
pub trait SqlTyped {
    fn sql_type() -> SqlType;
}

impl SqlTyped for i64 {
    fn sql_type() -> SqlType {
        SqlType::Int
    }
}

impl SqlTyped for i32 {
    fn sql_type() -> SqlType {
        SqlType::Int
    }
}

impl SqlTyped for String {
    fn sql_type() -> SqlType {
        SqlType::Text
    }
}

impl SqlTyped for &str {
    fn sql_type() -> SqlType {
        SqlType::Text
    }
}

impl SqlTyped for Uuid {
    fn sql_type() -> SqlType {
        SqlType::Uuid
    }
}

impl SqlTyped for DateRange {
    fn sql_type() -> SqlType {
        SqlType::DateRange
    }
}

impl SqlValue {
    /// Wrap an optional value, mapping `None` to a `NULL` of `T`'s column type.
    pub fn nullable<T: Into<SqlValue> + SqlTyped>(value: Option<T>) -> Self {
        value.map_or(SqlValue::Null(T::sql_type()), Into::into)
    }

    /// Label of a user-defined enum type
    pub fn enum_label(type_name: &'static str, label: &'static str) -> Self {
        SqlValue::Enum { type_name, label }
    }

    pub fn sql_type(&self) -> SqlType {
        match self {
            SqlValue::Null(ty) => *ty,
            SqlValue::Int(_) => SqlType::Int,
            SqlValue::Text(_) => SqlType::Text,
            SqlValue::Uuid(_) => SqlType::Uuid,
            SqlValue::DateRange(_) => SqlType::DateRange,
            SqlValue::Enum { type_name, .. } => SqlType::Enum(*type_name),
        }
    }

    /// Textual form sent to servers that cast parameters; `None` for `NULL`
    pub fn as_text(&self) -> Option<String> {
        match self {
            SqlValue::Null(_) => None,
            SqlValue::Int(v) => Some(v.to_string()),
            SqlValue::Text(v) => Some(v.clone()),
            SqlValue::Uuid(v) => Some(v.to_string()),
            SqlValue::DateRange(v) => Some(v.to_string()),
            SqlValue::Enum { label, .. } => Some((*label).to_string()),
        }
    }
}

impl From<i64> for SqlValue {
    fn from(v: i64) -> Self {
        SqlValue::Int(v)
    }
}

impl From<i32> for SqlValue {
    fn from(v: i32) -> Self {
        SqlValue::Int(i64::from(v))
    }
}

impl From<&str> for SqlValue {
    fn from(v: &str) -> Self {
        SqlValue::Text(v.to_string())
    }
}

impl From<String> for SqlValue {
    fn from(v: String) -> Self {
        SqlValue::Text(v)
    }
}

impl From<Uuid> for SqlValue {
    fn from(v: Uuid) -> Self {
        SqlValue::Uuid(v)
    }
}

impl From<DateRange> for SqlValue {
    fn from(v: DateRange) -> Self {
        SqlValue::DateRange(v)
    }
}

impl fmt::Display for SqlValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SqlValue::Null(_) => f.write_str("NULL"),
            SqlValue::Int(v) => write!(f, "{v}"),
            SqlValue::Text(v) => write!(f, "'{v}'"),
            SqlValue::Uuid(v) => write!(f, "{v}"),
            SqlValue::DateRange(v) => write!(f, "'{v}'"),
            SqlValue::Enum { label, .. } => write!(f, "'{label}'"),
        }
    }
}

impl ToSql for SqlValue {
    fn to_sql(&self) -> duckdb::Result<ToSqlOutput<'_>> {
        let value = match self {
            SqlValue::Null(_) => Value::Null,
            SqlValue::Int(v) => Value::BigInt(*v),
            // DuckDB casts the textual form to the column type on insert
            other => match other.as_text() {
                Some(text) => Value::Text(text),
                None => Value::Null,
            },
        };
        Ok(ToSqlOutput::Owned(value))
    }
}

/// A SQL statement with positional parameters
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    /// SQL text with `?` placeholders
    pub sql: String,
    /// Values bound to the placeholders, in order
    pub params: Vec<SqlValue>,
}

impl Statement {
    /// Statement without parameters
    pub fn new(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            params: Vec::new(),
        }
    }

    /// Statement with positional parameters
    pub fn with_params(sql: impl Into<String>, params: Vec<SqlValue>) -> Self {
        Self {
            sql: sql.into(),
            params,
        }
    }

    /// Bound values rendered for logs and error messages
    pub fn params_display(&self) -> String {
        self.params
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.sql, self.params_display())
    }
}

#[cfg(test)]
#[path = "statement_test.rs"]
mod tests;
