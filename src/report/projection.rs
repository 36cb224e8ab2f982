//! Row Projection
//!
//! Renames positional row values into the public JSON field names of an
//! endpoint. Two shapes exist:
//!
//! - **Scalar**: metric 0 of row 0 under a single key, `"0"` when absent.
//! - **List**: one record per row, each field read from a dimension or
//!   metric position with an optional fallback.
//!
//! A list report whose response has no rows property projects to a body
//! without `data`, while an empty rows list projects to `data: []`.

use serde::ser::{Serialize, SerializeMap, Serializer};
use thiserror::Error;

use super::row::{ReportResponse, ReportRow};

/// Value used by scalar reports when no value is available
pub const SCALAR_DEFAULT: &str = "0";

/// Where a field's value comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Dimension(usize),
    Metric(usize),
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Source::Dimension(i) => write!(f, "dimension {}", i),
            Source::Metric(i) => write!(f, "metric {}", i),
        }
    }
}

/// What to do when a cell is unavailable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fallback {
    /// Cell must exist; an empty value is emitted as-is
    Required,
    /// Substitute this value when the cell is absent or empty
    Default(&'static str),
}

/// One named output field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    pub name: &'static str,
    pub source: Source,
    pub fallback: Fallback,
}

impl Field {
    pub const fn required(name: &'static str, source: Source) -> Self {
        Self {
            name,
            source,
            fallback: Fallback::Required,
        }
    }

    pub const fn or(name: &'static str, source: Source, default: &'static str) -> Self {
        Self {
            name,
            source,
            fallback: Fallback::Default(default),
        }
    }

    fn read(&self, row: &ReportRow) -> Result<String, ProjectionError> {
        let cell = match self.source {
            Source::Dimension(i) => row.dimension(i),
            Source::Metric(i) => row.metric(i),
        };

        match (cell, self.fallback) {
            (Some(value), Fallback::Default(default)) if value.is_empty() => {
                Ok(default.to_string())
            }
            (Some(value), _) => Ok(value.to_string()),
            (None, Fallback::Default(default)) => Ok(default.to_string()),
            (None, Fallback::Required) => Err(ProjectionError::MissingCell {
                field: self.name,
                position: self.source,
            }),
        }
    }
}

/// Per-endpoint projection rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Projection {
    Scalar { key: &'static str },
    List { fields: &'static [Field] },
}

impl Projection {
    /// Project a report response into the endpoint's response body
    pub fn project(&self, response: ReportResponse) -> Result<ReportBody, ProjectionError> {
        match *self {
            Projection::Scalar { key } => {
                let value = response
                    .rows
                    .as_ref()
                    .and_then(|rows| rows.first())
                    .and_then(|row| row.metric(0))
                    .filter(|value| !value.is_empty())
                    .unwrap_or(SCALAR_DEFAULT)
                    .to_string();

                Ok(ReportBody::Scalar { key, value })
            }
            Projection::List { fields } => {
                let data = response
                    .rows
                    .map(|rows| {
                        rows.iter()
                            .map(|row| project_row(fields, row))
                            .collect::<Result<Vec<_>, _>>()
                    })
                    .transpose()?;

                Ok(ReportBody::List { data })
            }
        }
    }

    /// Output field names in order
    pub fn field_names(&self) -> Vec<&'static str> {
        match self {
            Projection::Scalar { key } => vec![*key],
            Projection::List { fields } => fields.iter().map(|f| f.name).collect(),
        }
    }
}

fn project_row(fields: &[Field], row: &ReportRow) -> Result<ProjectedRecord, ProjectionError> {
    let values = fields
        .iter()
        .map(|field| Ok((field.name, field.read(row)?)))
        .collect::<Result<Vec<_>, ProjectionError>>()?;

    Ok(ProjectedRecord { fields: values })
}

/// A row after renaming, serialized as a JSON object in field order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectedRecord {
    fields: Vec<(&'static str, String)>,
}

impl ProjectedRecord {
    /// Value of the field called `name`
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(field, _)| *field == name)
            .map(|(_, value)| value.as_str())
    }
}

impl Serialize for ProjectedRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// Response body of a report endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportBody {
    /// `{"<key>": "<value>"}`
    Scalar { key: &'static str, value: String },
    /// `{"data": [...]}`, or `{}` when the response had no rows property
    List { data: Option<Vec<ProjectedRecord>> },
}

impl Serialize for ReportBody {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ReportBody::Scalar { key, value } => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry(key, value)?;
                map.end()
            }
            ReportBody::List { data: Some(records) } => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("data", records)?;
                map.end()
            }
            ReportBody::List { data: None } => serializer.serialize_map(Some(0))?.end(),
        }
    }
}

/// Projection failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProjectionError {
    #[error("row has no {position} for required field '{field}'")]
    MissingCell {
        field: &'static str,
        position: Source,
    },
}
