//! Error types.

use thiserror::Error;

use crate::provider::BoxError;

/// Invalid collector definition, detected while building descriptors or
/// queries.
#[derive(Debug, Error)]
pub enum DescriptorError {
    /// A family name contains characters outside `[a-zA-Z0-9_:]`.
    #[error("invalid metric name: {0}")]
    InvalidMetricName(String),
    /// A counter family name lacks the `_total` suffix.
    #[error("counter metric name must end in _total: {0}")]
    CounterWithoutTotal(String),
    /// A gauge family name carries the `_total` suffix.
    #[error("gauge metric name must not end in _total: {0}")]
    GaugeWithTotal(String),
    /// Two fields map to the same family name.
    #[error("metric already registered: {0}")]
    Duplicate(String),
    /// The class schema has no field.
    #[error("counter class declares no fields: {0}")]
    EmptySchema(String),
    /// The provider class name cannot be used in a query.
    #[error("invalid provider class name: {0:?}")]
    InvalidClassName(String),
}

/// Invalid collector configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An enabled class name matches no known counter class.
    #[error("unknown counter class: {0}")]
    UnknownClass(String),
}

/// Any error raised while constructing a collector.
#[derive(Debug, Error)]
pub enum BuildError {
    /// The configuration is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// A counter class schema is invalid.
    #[error(transparent)]
    Descriptor(#[from] DescriptorError),
}

/// A scrape of one or more counter classes failed.
///
/// No sample of a failed class is emitted for that scrape.
#[derive(Debug, Error)]
pub enum CollectError {
    /// The provider query failed, or returned rows not matching the schema.
    #[error("query failed: {class}")]
    Query {
        /// Provider class that was queried.
        class: &'static str,
        /// Underlying provider error.
        #[source]
        source: BoxError,
    },
    /// Several counter classes failed within the same scrape.
    #[error("{} counter classes failed: {}", .0.len(), join(.0))]
    Classes(Vec<CollectError>),
}

impl CollectError {
    /// Name of the provider classes that failed.
    pub fn classes(&self) -> Vec<&'static str> {
        match self {
            CollectError::Query { class, .. } => vec![*class],
            CollectError::Classes(errors) => errors.iter().flat_map(|e| e.classes()).collect(),
        }
    }

    /// Render the error together with its causes, e.g.
    /// `query failed: <class>: <provider message>`.
    pub fn report(&self) -> String {
        match self {
            CollectError::Query { .. } => {
                let mut report = self.to_string();
                let mut cause = std::error::Error::source(self);
                while let Some(err) = cause {
                    report.push_str(": ");
                    report.push_str(&err.to_string());
                    cause = err.source();
                }
                report
            }
            CollectError::Classes(_) => self.to_string(),
        }
    }
}

/// A provider row lacks a field the class schema declares.
#[derive(Debug, Error)]
#[error("{class}: instance {instance:?} has no field {field}")]
pub struct SchemaMismatch {
    /// Provider class of the row.
    pub class: &'static str,
    /// Instance name of the row.
    pub instance: String,
    /// Wire name of the missing field.
    pub field: &'static str,
}

fn join(errors: &[CollectError]) -> String {
    errors
        .iter()
        .map(CollectError::report)
        .collect::<Vec<_>>()
        .join("; ")
}
