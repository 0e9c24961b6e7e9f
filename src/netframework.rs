//! .NET Framework CLR performance counters.
//!
//! Each submodule holds the schema of one provider class. See
//! [`NetFrameworkCollector`] for collecting several of them together.

pub mod clrexceptions;
pub mod clrremoting;

use std::sync::Arc;

use crate::collector::{ClassCollector, Collector};
use crate::config::Config;
use crate::error::{BuildError, CollectError};
use crate::provider::CounterProvider;
use crate::schema::CounterClass;
use crate::sink::MetricSink;

/// Subsystem part of every family name.
pub const SUBSYSTEM: &str = "netframework";

/// All known counter classes, in collection order.
pub static CLASSES: &[&CounterClass] = &[&clrexceptions::CLASS, &clrremoting::CLASS];

/// Collects every counter class enabled in the [`Config`].
///
/// Classes are collected one after another on each scrape. A failing class
/// contributes no sample, but does not prevent the other classes from
/// emitting theirs. The errors of all failed classes are returned together.
#[derive(Debug)]
pub struct NetFrameworkCollector {
    collectors: Vec<ClassCollector>,
}

impl NetFrameworkCollector {
    /// Build one [`ClassCollector`] per enabled class, all sharing `provider`.
    pub fn new(config: &Config, provider: Arc<dyn CounterProvider>) -> Result<Self, BuildError> {
        let collectors = config
            .enabled_classes()?
            .into_iter()
            .map(|class| ClassCollector::new(&config.namespace, SUBSYSTEM, class, provider.clone()))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { collectors })
    }

    /// The per-class collectors, in collection order.
    pub fn collectors(&self) -> &[ClassCollector] {
        &self.collectors
    }
}

impl Collector for NetFrameworkCollector {
    fn collect(&self, sink: &mut dyn MetricSink) -> Result<(), CollectError> {
        let mut errors = self
            .collectors
            .iter()
            .filter_map(|collector| collector.collect(&mut *sink).err())
            .collect::<Vec<_>>();

        match errors.len() {
            0 => Ok(()),
            1 => Err(errors.remove(0)),
            _ => Err(CollectError::Classes(errors)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::MetricSample;
    use crate::provider::{RawCounterSample, StaticProvider};
    use crate::registry::DescriptorSet;

    fn remoting_row(name: &str) -> RawCounterSample {
        RawCounterSample::new(name)
            .with_field("Channels", 1)
            .with_field("ContextBoundClassesLoaded", 2)
            .with_field("ContextBoundObjectsAllocPersec", 3)
            .with_field("ContextProxies", 4)
            .with_field("Contexts", 5)
            .with_field("RemoteCallsPersec", 6)
            .with_field("TotalRemoteCalls", 7)
    }

    fn exceptions_row(name: &str) -> RawCounterSample {
        RawCounterSample::new(name)
            .with_field("NumberofExcepsThrown", 10)
            .with_field("NumberofFiltersPersec", 11)
            .with_field("NumberofFinallysPersec", 12)
            .with_field("ThrowToCatchDepthPersec", 13)
    }

    fn names(samples: &[MetricSample]) -> Vec<&str> {
        samples.iter().map(|s| s.descriptor().name()).collect()
    }

    #[test]
    fn remoting_identity() {
        let provider = Arc::new(StaticProvider::default());
        provider.set_rows(
            clrremoting::CLASS.provider_class,
            vec![remoting_row("w3wp"), remoting_row("_Global_")],
        );
        let config = Config {
            collectors_enabled: vec!["clrremoting".to_string()],
            ..Default::default()
        };
        let collector = NetFrameworkCollector::new(&config, provider).unwrap();

        let mut samples = Vec::new();
        collector.collect(&mut samples).unwrap();

        assert_eq!(
            vec![
                "windows_netframework_clrremoting_channels_total",
                "windows_netframework_clrremoting_context_bound_classes_loaded",
                "windows_netframework_clrremoting_context_bound_objects_total",
                "windows_netframework_clrremoting_context_proxies_total",
                "windows_netframework_clrremoting_contexts",
                "windows_netframework_clrremoting_remote_calls_total",
            ],
            names(&samples)
        );
        assert_eq!(
            vec![1.0, 2.0, 3.0, 4.0, 5.0, 7.0],
            samples.iter().map(|s| s.value()).collect::<Vec<_>>()
        );
        assert_eq!(
            vec!["counter", "gauge", "counter", "counter", "gauge", "counter"],
            samples
                .iter()
                .map(|s| s.metric_type().as_str())
                .collect::<Vec<_>>()
        );
        assert_eq!(
            "Displays the current number of remoting contexts in the application.",
            samples[4].descriptor().help()
        );
        assert!(samples
            .iter()
            .all(|s| s.labels().eq([("process", "w3wp")])));
    }

    #[test]
    fn classes_collected_in_fixed_order() {
        let provider = Arc::new(StaticProvider::default());
        provider.set_rows(clrremoting::CLASS.provider_class, vec![remoting_row("a")]);
        provider.set_rows(clrexceptions::CLASS.provider_class, vec![exceptions_row("a")]);
        let collector = NetFrameworkCollector::new(&Config::default(), provider.clone()).unwrap();

        let mut samples = Vec::new();
        collector.collect(&mut samples).unwrap();

        assert_eq!(10, samples.len());
        assert_eq!(
            "windows_netframework_clrexceptions_exceptions_thrown_total",
            samples[0].descriptor().name()
        );
        assert_eq!(
            "windows_netframework_clrremoting_channels_total",
            samples[4].descriptor().name()
        );
        assert_eq!(2, provider.query_count());
    }

    #[test]
    fn failing_class_is_isolated() {
        let provider = Arc::new(StaticProvider::default());
        provider.set_rows(clrremoting::CLASS.provider_class, vec![remoting_row("a")]);
        provider.fail(clrexceptions::CLASS.provider_class, "access denied");
        let collector = NetFrameworkCollector::new(&Config::default(), provider).unwrap();

        let mut samples = Vec::new();
        let err = collector.collect(&mut samples).unwrap_err();

        assert_eq!(vec![clrexceptions::CLASS.provider_class], err.classes());
        assert_eq!(6, samples.len());
        assert!(names(&samples)
            .iter()
            .all(|name| name.contains("clrremoting")));
    }

    #[test]
    fn all_failures_are_joined() {
        let provider = Arc::new(StaticProvider::default());
        let collector = NetFrameworkCollector::new(&Config::default(), provider).unwrap();

        let mut samples = Vec::new();
        let err = collector.collect(&mut samples).unwrap_err();

        assert!(samples.is_empty());
        assert!(matches!(err, CollectError::Classes(ref errors) if errors.len() == 2));
    }

    #[test]
    fn provider_causes_are_reported() {
        let provider = Arc::new(StaticProvider::default());
        provider.fail(clrexceptions::CLASS.provider_class, "RPC server is unavailable");
        provider.fail(clrremoting::CLASS.provider_class, "Access denied");
        let collector = NetFrameworkCollector::new(&Config::default(), provider.clone()).unwrap();

        let mut samples = Vec::new();
        let err = collector.collect(&mut samples).unwrap_err();

        let message = err.to_string();
        assert!(message.contains(
            "query failed: Win32_PerfRawData_NETFramework_NETCLRExceptions: RPC server is unavailable"
        ));
        assert!(message.contains(
            "query failed: Win32_PerfRawData_NETFramework_NETCLRRemoting: Access denied"
        ));
        assert_eq!(message, err.report());

        provider.set_rows(clrremoting::CLASS.provider_class, vec![remoting_row("a")]);
        let err = collector.collect(&mut samples).unwrap_err();
        assert_eq!(
            "query failed: Win32_PerfRawData_NETFramework_NETCLRExceptions: RPC server is unavailable",
            err.report()
        );
    }

    #[test]
    fn every_class_schema_is_valid() {
        for class in CLASSES {
            DescriptorSet::build("windows", SUBSYSTEM, class).unwrap();
        }
    }

    #[test]
    fn custom_namespace() {
        let provider = Arc::new(StaticProvider::default());
        let config = Config {
            namespace: "dotnet".to_string(),
            ..Default::default()
        };
        let collector = NetFrameworkCollector::new(&config, provider).unwrap();

        assert_eq!(
            "dotnet_netframework_clrexceptions_exceptions_thrown_total",
            collector.collectors()[0].descriptors().get(0).unwrap().name()
        );
    }
}
