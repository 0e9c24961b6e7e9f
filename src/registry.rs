//! Metric descriptor registry.
//!
//! See [`DescriptorSet`] for details.

use std::borrow::Cow;
use std::collections::HashSet;
use std::sync::Arc;

use crate::error::DescriptorError;
use crate::metrics::MetricType;
use crate::schema::CounterClass;

/// Name of the single label attached to every per-instance sample.
pub const PROCESS_LABEL: &str = "process";

const COUNTER_SUFFIX: &str = "_total";

/// Immutable identity of a metric family.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Descriptor {
    name: String,
    help: String,
    label_names: Vec<Cow<'static, str>>,
}

impl Descriptor {
    pub(crate) fn new<N: Into<String>, H: Into<String>>(
        name: N,
        help: H,
        label_names: Vec<Cow<'static, str>>,
    ) -> Self {
        Descriptor {
            name: name.into(),
            help: help.into(),
            label_names,
        }
    }

    /// Returns the fully-qualified name of the metric family.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the help text of the metric family.
    pub fn help(&self) -> &str {
        &self.help
    }

    /// Returns the ordered label names of the metric family.
    pub fn label_names(&self) -> &[Cow<'static, str>] {
        &self.label_names
    }
}

/// The descriptors of one counter class, in schema field order.
///
/// Built once when a collector is constructed and shared by every scrape
/// afterwards. The `i`-th descriptor belongs to the `i`-th schema field.
///
/// ```
/// # use perf_counter_collector::netframework::{clrremoting, SUBSYSTEM};
/// # use perf_counter_collector::registry::DescriptorSet;
/// #
/// let descriptors = DescriptorSet::build("windows", SUBSYSTEM, &clrremoting::CLASS).unwrap();
///
/// assert_eq!(clrremoting::CLASS.fields.len(), descriptors.len());
/// assert_eq!(
///     "windows_netframework_clrremoting_contexts",
///     descriptors.get(4).unwrap().name()
/// );
/// ```
#[derive(Debug, Clone)]
pub struct DescriptorSet {
    descriptors: Vec<Arc<Descriptor>>,
}

impl DescriptorSet {
    /// Build and validate one descriptor per field of `class`.
    ///
    /// Family names follow `<namespace>_<subsystem>_<class>_<metric>`. Counter
    /// families must end in `_total`, gauge families must not.
    pub fn build(
        namespace: &str,
        subsystem: &str,
        class: &CounterClass,
    ) -> Result<Self, DescriptorError> {
        if class.fields.is_empty() {
            return Err(DescriptorError::EmptySchema(class.name.to_string()));
        }

        let mut seen = HashSet::with_capacity(class.fields.len());
        let mut descriptors = Vec::with_capacity(class.fields.len());

        for field in class.fields {
            let metric = format!("{}_{}", class.name, field.metric);
            let name = build_fq_name(namespace, subsystem, &metric);

            if !is_valid_metric_name(&name) {
                return Err(DescriptorError::InvalidMetricName(name));
            }
            match field.metric_type {
                MetricType::Counter if !name.ends_with(COUNTER_SUFFIX) => {
                    return Err(DescriptorError::CounterWithoutTotal(name));
                }
                MetricType::Gauge if name.ends_with(COUNTER_SUFFIX) => {
                    return Err(DescriptorError::GaugeWithTotal(name));
                }
                _ => {}
            }
            if !seen.insert(name.clone()) {
                return Err(DescriptorError::Duplicate(name));
            }

            descriptors.push(Arc::new(Descriptor::new(
                name,
                field.help,
                vec![Cow::Borrowed(PROCESS_LABEL)],
            )));
        }

        Ok(Self { descriptors })
    }

    /// The descriptor of the `index`-th schema field.
    pub fn get(&self, index: usize) -> Option<&Arc<Descriptor>> {
        self.descriptors.get(index)
    }

    /// Number of descriptors.
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    /// Whether the set holds no descriptor.
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// Iterate the descriptors in schema field order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<Descriptor>> {
        self.descriptors.iter()
    }
}

/// Join the non-empty parts with `_`.
pub fn build_fq_name(namespace: &str, subsystem: &str, name: &str) -> String {
    [namespace, subsystem, name]
        .iter()
        .filter(|part| !part.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join("_")
}

fn is_valid_metric_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == ':' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == ':')
}
