//! Static counter class schemas and the generic row decoder.
//!
//! A [`CounterClass`] is plain data: the provider class to query and an
//! ordered table of [`Field`]s. The position of a field in that table is its
//! slot, both in the decoded row and in the
//! [`DescriptorSet`](crate::registry::DescriptorSet) built for the class.
//! Supporting a new provider class only takes a new table.

use crate::error::SchemaMismatch;
use crate::metrics::MetricType;
use crate::provider::RawCounterSample;

/// Maps one provider field to one metric family.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Field {
    /// Property name as reported by the provider.
    pub wire_name: &'static str,
    /// Metric name, relative to the class prefix.
    pub metric: &'static str,
    /// Help text, emitted verbatim.
    pub help: &'static str,
    /// Semantic type, fixed for every instance and every scrape.
    pub metric_type: MetricType,
}

impl Field {
    /// A cumulative counter field.
    pub const fn counter(
        wire_name: &'static str,
        metric: &'static str,
        help: &'static str,
    ) -> Self {
        Self {
            wire_name,
            metric,
            help,
            metric_type: MetricType::Counter,
        }
    }

    /// An instantaneous gauge field.
    pub const fn gauge(wire_name: &'static str, metric: &'static str, help: &'static str) -> Self {
        Self {
            wire_name,
            metric,
            help,
            metric_type: MetricType::Gauge,
        }
    }
}

/// Schema of one provider counter class.
#[derive(Debug, PartialEq, Eq)]
pub struct CounterClass {
    /// Short name, used as metric name prefix and in configuration.
    pub name: &'static str,
    /// Name of the provider class queried on each scrape.
    pub provider_class: &'static str,
    /// Declared fields, in emission order.
    pub fields: &'static [Field],
}

impl CounterClass {
    /// Decode the declared fields of `row` into their slots.
    ///
    /// Fields the provider reports but the schema does not declare are
    /// ignored.
    pub fn decode(&self, row: &RawCounterSample) -> Result<Vec<u64>, SchemaMismatch> {
        self.fields
            .iter()
            .map(|field| {
                row.field(field.wire_name).ok_or_else(|| SchemaMismatch {
                    class: self.provider_class,
                    instance: row.name().to_string(),
                    field: field.wire_name,
                })
            })
            .collect()
    }
}
