//! Audit configuration.
//!
//! The rule set is fixed in shape: an expected schema, a primary key column,
//! allow-lists for enumerated columns and one inclusive numeric bound. Values
//! can be overridden from a file, but no new kinds of rules can be expressed.

use crate::{AuditError, CellValue, ColumnType, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// The complete, immutable rule set for one audit run.
///
/// `Default` yields the sprint backlog configuration.
///
/// # Example
///
/// ```rust
/// use audit_core::{AuditConfig, ColumnType};
///
/// let config = AuditConfig::default();
/// assert_eq!(config.expected_type("Est_Hours"), Some(ColumnType::Float));
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuditConfig {
    /// Column whose values must be unique
    pub primary_key: String,

    /// Columns the dataset is expected to carry, with their types
    pub expected_schema: Vec<ColumnSpec>,

    /// Enumerated columns and their allowed values
    pub allowed_values: Vec<EnumConstraint>,

    /// Inclusive numeric range for one column
    pub numeric_bound: Option<NumericBound>,
}

/// A single expected column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSpec {
    /// Column name
    pub name: String,

    /// Expected semantic type
    #[serde(rename = "type")]
    pub expected: ColumnType,
}

/// Allow-list for an enumerated column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumConstraint {
    /// Constrained column
    pub column: String,

    /// Allowed values, in display order
    pub values: Vec<String>,

    /// Whether invalid values in this column reduce the quality score
    #[serde(default)]
    pub scored: bool,
}

/// Inclusive numeric range `[min, max]` for one column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumericBound {
    /// Bounded column
    pub column: String,
    /// Minimum value (inclusive)
    pub min: f64,
    /// Maximum value (inclusive)
    pub max: f64,
}

impl ColumnSpec {
    /// Creates a new column spec.
    pub fn new(name: impl Into<String>, expected: ColumnType) -> Self {
        Self {
            name: name.into(),
            expected,
        }
    }
}

impl EnumConstraint {
    /// Creates a new allow-list.
    pub fn new<I, S>(column: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            column: column.into(),
            values: values.into_iter().map(Into::into).collect(),
            scored: false,
        }
    }

    /// Marks this constraint as contributing to the quality score.
    pub fn scored(mut self) -> Self {
        self.scored = true;
        self
    }

    /// Returns true if the cell is one of the allowed values.
    ///
    /// Null and numeric cells are never members.
    pub fn allows(&self, value: &CellValue) -> bool {
        value
            .as_text()
            .is_some_and(|s| self.values.iter().any(|v| v == s))
    }
}

impl NumericBound {
    /// Creates a new bound.
    pub fn new(column: impl Into<String>, min: f64, max: f64) -> Self {
        Self {
            column: column.into(),
            min,
            max,
        }
    }

    /// Returns true if `value` lies within `[min, max]`.
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Returns true if the cell breaks the bound.
    ///
    /// Nulls are not violations. Numeric text is checked by its value; any
    /// other text cannot satisfy a numeric bound.
    pub fn is_violated_by(&self, value: &CellValue) -> bool {
        if value.is_null() {
            return false;
        }
        value.as_float().is_none_or(|v| !self.contains(v))
    }
}

/// Primary key of the sprint backlog.
pub const STORY_ID: &str = "Story_ID";

/// Estimated hours column of the sprint backlog.
pub const EST_HOURS: &str = "Est_Hours";

/// Lowest valid estimate, in hours.
pub const MIN_EST_HOURS: f64 = 0.5;

/// Highest valid estimate, in hours.
pub const MAX_EST_HOURS: f64 = 100.0;

const SPRINT_SCHEMA: &[(&str, ColumnType)] = &[
    ("Sprint", ColumnType::Text),
    ("Sprint_Name", ColumnType::Text),
    ("Phase", ColumnType::Text),
    (STORY_ID, ColumnType::Text),
    ("Story_Name", ColumnType::Text),
    ("Type", ColumnType::Text),
    ("Description", ColumnType::Text),
    ("Tasks", ColumnType::Text),
    (EST_HOURS, ColumnType::Float),
    ("Resources", ColumnType::Text),
    ("Acceptance_Criteria", ColumnType::Text),
];

const VALID_PHASES: &[&str] = &[
    "Foundation",
    "Core Tools",
    "Capstone",
    "Revision",
    "Advanced Concepts",
    "Software Engineering",
    "Cloud & Infrastructure",
    "Interview Prep",
];

const VALID_TYPES: &[&str] = &[
    "Setup",
    "Study",
    "Practice",
    "Design",
    "Implementation",
    "Documentation",
    "Interview Prep",
    "Job Search",
    "Project",
    "Study & Practice",
    "Revision",
];

impl AuditConfig {
    /// The sprint backlog rule set.
    pub fn sprint_backlog() -> Self {
        Self {
            expected_schema: SPRINT_SCHEMA
                .iter()
                .map(|(name, ty)| ColumnSpec::new(*name, *ty))
                .collect(),
            primary_key: STORY_ID.to_string(),
            allowed_values: vec![
                EnumConstraint::new("Phase", VALID_PHASES.iter().copied()).scored(),
                EnumConstraint::new("Type", VALID_TYPES.iter().copied()),
            ],
            numeric_bound: Some(NumericBound::new(EST_HOURS, MIN_EST_HOURS, MAX_EST_HOURS)),
        }
    }

    /// Returns the expected type of a column, if the schema names it.
    pub fn expected_type(&self, column: &str) -> Option<ColumnType> {
        self.expected_schema
            .iter()
            .find(|spec| spec.name == column)
            .map(|spec| spec.expected)
    }

    /// Returns the allow-list for a column, if any.
    pub fn allow_list(&self, column: &str) -> Option<&EnumConstraint> {
        self.allowed_values.iter().find(|c| c.column == column)
    }

    /// Returns the allow-lists that feed the quality score.
    pub fn scored_allow_lists(&self) -> impl Iterator<Item = &EnumConstraint> {
        self.allowed_values.iter().filter(|c| c.scored)
    }

    /// Checks the configuration for internal consistency.
    pub fn validate(&self) -> Result<()> {
        if self.expected_schema.is_empty() {
            return Err(AuditError::EmptySchema);
        }

        let mut seen = HashSet::new();
        for spec in &self.expected_schema {
            if !seen.insert(spec.name.as_str()) {
                return Err(AuditError::DuplicateColumn(spec.name.clone()));
            }
        }

        if self.primary_key.trim().is_empty() {
            return Err(AuditError::EmptyPrimaryKey);
        }

        for constraint in &self.allowed_values {
            if constraint.values.is_empty() {
                return Err(AuditError::EmptyAllowList(constraint.column.clone()));
            }
        }

        if let Some(bound) = &self.numeric_bound {
            // NaN bounds fail this comparison too
            if !(bound.min <= bound.max) {
                return Err(AuditError::invalid_bound(&bound.column, bound.min, bound.max));
            }
        }

        Ok(())
    }
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self::sprint_backlog()
    }
}
