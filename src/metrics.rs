//! Sample types produced by a collection cycle.

use std::sync::Arc;

use crate::registry::Descriptor;

/// Semantic type of a metric family.
///
/// The type is a static property of a schema field, independent of any
/// observed value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MetricType {
    /// Monotonically non-decreasing value, cumulative since process start.
    Counter,
    /// Instantaneous value that may rise or fall.
    Gauge,
}

impl MetricType {
    /// Returns the given metric type's str representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricType::Counter => "counter",
            MetricType::Gauge => "gauge",
        }
    }
}

impl From<MetricType> for prometheus_client::metrics::MetricType {
    fn from(metric_type: MetricType) -> Self {
        match metric_type {
            MetricType::Counter => prometheus_client::metrics::MetricType::Counter,
            MetricType::Gauge => prometheus_client::metrics::MetricType::Gauge,
        }
    }
}

/// A single observation of one field of one instance.
///
/// Label values are ordered like the label names of the
/// [`Descriptor`].
#[derive(Clone, Debug, PartialEq)]
pub struct MetricSample {
    descriptor: Arc<Descriptor>,
    metric_type: MetricType,
    value: f64,
    label_values: Vec<String>,
}

impl MetricSample {
    /// Create a new [`MetricSample`].
    pub fn new(
        descriptor: Arc<Descriptor>,
        metric_type: MetricType,
        value: f64,
        label_values: Vec<String>,
    ) -> Self {
        Self {
            descriptor,
            metric_type,
            value,
            label_values,
        }
    }

    /// The descriptor of the family this sample belongs to.
    pub fn descriptor(&self) -> &Arc<Descriptor> {
        &self.descriptor
    }

    /// The semantic type of this sample.
    pub fn metric_type(&self) -> MetricType {
        self.metric_type
    }

    /// The observed value.
    pub fn value(&self) -> f64 {
        self.value
    }

    /// The label values, in the order of the descriptor's label names.
    pub fn label_values(&self) -> &[String] {
        &self.label_values
    }

    /// Iterate `(name, value)` label pairs.
    pub fn labels(&self) -> impl Iterator<Item = (&str, &str)> {
        self.descriptor
            .label_names()
            .iter()
            .map(|name| name.as_ref())
            .zip(self.label_values.iter().map(String::as_str))
    }
}
