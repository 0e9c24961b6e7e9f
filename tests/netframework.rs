use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc};
use std::thread;

use perf_counter_collector::collector::{ClassCollector, Collector};
use perf_counter_collector::config::Config;
use perf_counter_collector::encoding::PrometheusBridge;
use perf_counter_collector::netframework::{clrremoting, NetFrameworkCollector, SUBSYSTEM};
use perf_counter_collector::provider::{
    BoxError, CounterProvider, Namespace, Query, RawCounterSample,
};
use prometheus_client::encoding::text::encode;
use prometheus_client::registry::Registry;

/// Answers every remoting query with two processes and the aggregate row.
#[derive(Debug, Default)]
struct Session {
    broken: AtomicBool,
}

impl CounterProvider for Session {
    fn query(
        &self,
        namespace: Namespace,
        query: &Query,
    ) -> Result<Vec<RawCounterSample>, BoxError> {
        assert_eq!(Namespace::ROOT_CIMV2, namespace);
        if self.broken.load(Ordering::Relaxed) {
            return Err("RPC server is unavailable".into());
        }
        if query.as_str() != "SELECT * FROM Win32_PerfRawData_NETFramework_NETCLRRemoting" {
            return Err(format!("invalid class: {}", query.class()).into());
        }

        Ok(vec![
            process("w3wp", 5, 2),
            process("_Global_", 999, 1),
            process("powershell", 1, 0),
        ])
    }
}

fn process(name: &str, channels: u64, contexts: u64) -> RawCounterSample {
    RawCounterSample::new(name)
        .with_field("Channels", channels)
        .with_field("ContextBoundClassesLoaded", 3)
        .with_field("ContextBoundObjectsAllocPersec", 4)
        .with_field("ContextProxies", 0)
        .with_field("Contexts", contexts)
        .with_field("RemoteCallsPersec", 7)
        .with_field("TotalRemoteCalls", 8)
}

fn remoting(session: Arc<Session>) -> ClassCollector {
    ClassCollector::new("windows", SUBSYSTEM, &clrremoting::CLASS, session).unwrap()
}

#[test]
fn text_exposition() {
    let mut registry = Registry::default();
    registry.register_collector(Box::new(PrometheusBridge::new(remoting(Arc::default()))));

    let mut buffer = String::new();
    encode(&mut buffer, &registry).unwrap();

    assert!(buffer.contains("windows_netframework_clrremoting_channels_total{process=\"w3wp\"} 5"));
    assert!(buffer.contains(
        "windows_netframework_clrremoting_channels_total{process=\"powershell\"} 1"
    ));
    assert!(buffer.contains("windows_netframework_clrremoting_contexts{process=\"w3wp\"} 2"));
    assert!(buffer.contains(
        "# HELP windows_netframework_clrremoting_remote_calls Displays the total number of remote procedure calls invoked since the application started."
    ));
    assert!(!buffer.contains("_Global_"));
    assert!(!buffer.contains("999"));
    assert!(!buffer.contains("remote_calls_persec"));
}

#[test]
fn unknown_class_fails_without_samples() {
    let config = Config::default();
    let collector = NetFrameworkCollector::new(&config, Arc::new(Session::default())).unwrap();

    let mut samples = Vec::new();
    let err = collector.collect(&mut samples).unwrap_err();

    assert_eq!(
        vec!["Win32_PerfRawData_NETFramework_NETCLRExceptions"],
        err.classes()
    );
    assert_eq!(2 * clrremoting::CLASS.fields.len(), samples.len());
}

#[test]
fn recovers_after_failed_cycle() {
    let session = Arc::new(Session::default());
    let collector = remoting(session.clone());

    session.broken.store(true, Ordering::Relaxed);
    let mut samples = Vec::new();
    assert!(collector.collect(&mut samples).is_err());
    assert!(samples.is_empty());

    session.broken.store(false, Ordering::Relaxed);
    collector.collect(&mut samples).unwrap();
    assert_eq!(12, samples.len());
}

#[test]
fn concurrent_scrapes_into_channel() {
    let collector = Arc::new(remoting(Arc::default()));
    let (tx, rx) = mpsc::channel();

    let handles = (0..4)
        .map(|_| {
            let collector = collector.clone();
            let mut tx = tx.clone();
            thread::spawn(move || collector.collect(&mut tx))
        })
        .collect::<Vec<_>>();
    drop(tx);

    for handle in handles {
        handle.join().unwrap().unwrap();
    }

    let samples = rx.iter().collect::<Vec<_>>();
    assert_eq!(4 * 12, samples.len());
    assert!(samples
        .iter()
        .all(|s| s.label_values()[0] == "w3wp" || s.label_values()[0] == "powershell"));
}
