//! Exposition through [`prometheus_client`].
//!
//! See [`PrometheusBridge`] for details.

use std::sync::Arc;

use prometheus_client::encoding::{DescriptorEncoder, EncodeMetric};
use prometheus_client::metrics::counter::ConstCounter;
use prometheus_client::metrics::gauge::ConstGauge;
use tracing::warn;

use crate::collector::Collector;
use crate::metrics::{MetricSample, MetricType};
use crate::registry::Descriptor;

/// Exposes a [`Collector`] as a [`prometheus_client::collector::Collector`].
///
/// Register it with
/// [`Registry::register_collector`](prometheus_client::registry::Registry::register_collector).
/// On each scrape the wrapped collector runs once and its samples are encoded
/// family by family, in the order families first appear.
///
/// When collection fails, the failure is logged and the samples that were
/// collected anyway (e.g. other counter classes) are encoded. With
/// [`PrometheusBridge::report_errors`] the whole encoding fails instead.
#[derive(Debug)]
pub struct PrometheusBridge<C> {
    collector: C,
    report_errors: bool,
}

impl<C> PrometheusBridge<C> {
    /// Wrap `collector`.
    pub fn new(collector: C) -> Self {
        Self {
            collector,
            report_errors: false,
        }
    }

    /// Whether a collection failure fails the encoding.
    pub fn report_errors(mut self, report_errors: bool) -> Self {
        self.report_errors = report_errors;
        self
    }
}

impl<C: Collector + 'static> prometheus_client::collector::Collector for PrometheusBridge<C> {
    fn encode(&self, mut encoder: DescriptorEncoder) -> Result<(), std::fmt::Error> {
        let mut samples = Vec::new();
        if let Err(err) = self.collector.collect(&mut samples) {
            warn!(
                error = %err.report(),
                classes = ?err.classes(),
                "collecting counter classes failed"
            );
            if self.report_errors {
                return Err(std::fmt::Error);
            }
        }

        for family in group_families(&samples) {
            encode_family(&mut encoder, &family)?;
        }

        Ok(())
    }
}

struct Family<'a> {
    descriptor: &'a Arc<Descriptor>,
    metric_type: MetricType,
    samples: Vec<&'a MetricSample>,
}

fn group_families(samples: &[MetricSample]) -> Vec<Family<'_>> {
    let mut families: Vec<Family<'_>> = Vec::new();

    for sample in samples {
        match families
            .iter_mut()
            .find(|family| Arc::ptr_eq(family.descriptor, sample.descriptor()))
        {
            Some(family) => family.samples.push(sample),
            None => families.push(Family {
                descriptor: sample.descriptor(),
                metric_type: sample.metric_type(),
                samples: vec![sample],
            }),
        }
    }

    families
}

fn encode_family(encoder: &mut DescriptorEncoder, family: &Family<'_>) -> Result<(), std::fmt::Error> {
    let name = exposition_name(family.descriptor.name(), family.metric_type);
    let mut metric_encoder = encoder.encode_descriptor(
        name,
        family.descriptor.help(),
        None,
        family.metric_type.into(),
    )?;

    for sample in &family.samples {
        let labels = sample.labels().collect::<Vec<_>>();
        let sample_encoder = metric_encoder.encode_family(&labels)?;
        match family.metric_type {
            MetricType::Counter => ConstCounter::new(sample.value()).encode(sample_encoder)?,
            MetricType::Gauge => ConstGauge::new(sample.value()).encode(sample_encoder)?,
        }
    }

    Ok(())
}

/// The OpenMetrics encoder appends `_total` to counters itself.
fn exposition_name(name: &str, metric_type: MetricType) -> &str {
    match metric_type {
        MetricType::Counter => name.strip_suffix("_total").unwrap_or(name),
        MetricType::Gauge => name,
    }
}
