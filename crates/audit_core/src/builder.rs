//! Builder pattern for creating audit configurations.
//!
//! Stages take their rules from an explicit [`AuditConfig`], so tests and
//! callers can assemble small synthetic rule sets instead of the default
//! sprint backlog one.

use crate::{AuditConfig, ColumnSpec, ColumnType, EnumConstraint, NumericBound};

/// Builder for creating an `AuditConfig`.
///
/// # Example
///
/// ```rust
/// use audit_core::ConfigBuilder;
///
/// let config = ConfigBuilder::new("id")
///     .text_column("id")
///     .text_column("status")
///     .float_column("points")
///     .scored_allowed_values("status", ["open", "done"])
///     .bound("points", 1.0, 13.0)
///     .build();
///
/// assert_eq!(config.expected_schema.len(), 3);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    primary_key: String,
    columns: Vec<ColumnSpec>,
    allowed_values: Vec<EnumConstraint>,
    numeric_bound: Option<NumericBound>,
}

impl ConfigBuilder {
    /// Creates a new builder with the primary key column name.
    pub fn new(primary_key: impl Into<String>) -> Self {
        Self {
            primary_key: primary_key.into(),
            ..Default::default()
        }
    }

    /// Adds an expected column.
    pub fn column(mut self, name: impl Into<String>, expected: ColumnType) -> Self {
        self.columns.push(ColumnSpec::new(name, expected));
        self
    }

    /// Adds an expected text column.
    pub fn text_column(self, name: impl Into<String>) -> Self {
        self.column(name, ColumnType::Text)
    }

    /// Adds an expected float column.
    pub fn float_column(self, name: impl Into<String>) -> Self {
        self.column(name, ColumnType::Float)
    }

    /// Adds an allow-list that does not affect the quality score.
    pub fn allowed_values<I, S>(mut self, column: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_values.push(EnumConstraint::new(column, values));
        self
    }

    /// Adds an allow-list whose violations reduce the quality score.
    pub fn scored_allowed_values<I, S>(mut self, column: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_values
            .push(EnumConstraint::new(column, values).scored());
        self
    }

    /// Sets the inclusive numeric bound.
    pub fn bound(mut self, column: impl Into<String>, min: f64, max: f64) -> Self {
        self.numeric_bound = Some(NumericBound::new(column, min, max));
        self
    }

    /// Builds the configuration.
    ///
    /// The result is not validated; call [`AuditConfig::validate`] when the
    /// input is untrusted.
    pub fn build(self) -> AuditConfig {
        AuditConfig {
            expected_schema: self.columns,
            primary_key: self.primary_key,
            allowed_values: self.allowed_values,
            numeric_bound: self.numeric_bound,
        }
    }
}
