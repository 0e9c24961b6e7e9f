//! Per-scrape collection of one counter class.
//!
//! See [`ClassCollector`] for details.

use std::sync::Arc;

use tracing::{debug, trace};

use crate::error::{CollectError, DescriptorError, SchemaMismatch};
use crate::filter::is_aggregate;
use crate::metrics::MetricSample;
use crate::provider::{CounterProvider, Namespace, Query, RawCounterSample};
use crate::registry::DescriptorSet;
use crate::schema::CounterClass;
use crate::sink::MetricSink;

/// The [`Collector`] abstraction produces a fresh set of samples on each
/// scrape.
///
/// A collector either emits its complete sample set for a scrape or, when
/// returning an error, nothing at all.
pub trait Collector: std::fmt::Debug + Send + Sync {
    /// Called on each scrape.
    fn collect(&self, sink: &mut dyn MetricSink) -> Result<(), CollectError>;
}

/// Collects one provider counter class.
///
/// Descriptors and the query are built once in [`ClassCollector::new`]. Each
/// call to [`Collector::collect`] issues exactly one query, skips the
/// aggregate pseudo-instance and emits one sample per declared field for
/// every other instance, in schema field order.
#[derive(Debug)]
pub struct ClassCollector {
    class: &'static CounterClass,
    namespace: Namespace,
    query: Query,
    descriptors: DescriptorSet,
    provider: Arc<dyn CounterProvider>,
}

impl ClassCollector {
    /// Create a collector for `class`, querying the `root/CIMv2` namespace.
    ///
    /// `metric_namespace` and `subsystem` prefix every family name.
    pub fn new(
        metric_namespace: &str,
        subsystem: &str,
        class: &'static CounterClass,
        provider: Arc<dyn CounterProvider>,
    ) -> Result<Self, DescriptorError> {
        Ok(Self {
            class,
            namespace: Namespace::ROOT_CIMV2,
            query: Query::select_all(class.provider_class)?,
            descriptors: DescriptorSet::build(metric_namespace, subsystem, class)?,
            provider,
        })
    }

    /// Query a different provider namespace.
    pub fn with_provider_namespace(mut self, namespace: Namespace) -> Self {
        self.namespace = namespace;
        self
    }

    /// The collected counter class.
    pub fn class(&self) -> &'static CounterClass {
        self.class
    }

    /// The descriptors, one per schema field.
    pub fn descriptors(&self) -> &DescriptorSet {
        &self.descriptors
    }
}

impl Collector for ClassCollector {
    fn collect(&self, sink: &mut dyn MetricSink) -> Result<(), CollectError> {
        let class = self.class.provider_class;

        let rows = self
            .provider
            .query(self.namespace, &self.query)
            .map_err(|source| CollectError::Query { class, source })?;

        let samples =
            map_rows(self.class, &self.descriptors, &rows).map_err(|err| CollectError::Query {
                class,
                source: Box::new(err),
            })?;

        debug!(
            class,
            rows = rows.len(),
            samples = samples.len(),
            "collected counter class"
        );

        for sample in samples {
            sink.send(sample);
        }

        Ok(())
    }
}

/// Map provider rows to samples.
///
/// Rows are decoded completely before anything is returned, so a row that
/// does not match the schema fails the whole batch.
pub fn map_rows(
    class: &CounterClass,
    descriptors: &DescriptorSet,
    rows: &[RawCounterSample],
) -> Result<Vec<MetricSample>, SchemaMismatch> {
    let mut samples = Vec::with_capacity(rows.len() * class.fields.len());

    for row in rows {
        if is_aggregate(row.name()) {
            trace!(class = class.provider_class, "skipping aggregate instance");
            continue;
        }

        let values = class.decode(row)?;
        for ((field, descriptor), value) in class.fields.iter().zip(descriptors.iter()).zip(values)
        {
            samples.push(MetricSample::new(
                descriptor.clone(),
                field.metric_type,
                value as f64,
                vec![row.name().to_string()],
            ));
        }
    }

    Ok(samples)
}
