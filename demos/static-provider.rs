//! Serves a fixed CLR remoting snapshot in the OpenMetrics text format.
//!
//! Run with `RUST_LOG=debug` to see per-class collection logs.

use std::sync::Arc;

use perf_counter_collector::config::Config;
use perf_counter_collector::encoding::PrometheusBridge;
use perf_counter_collector::netframework::{clrremoting, NetFrameworkCollector};
use perf_counter_collector::provider::{RawCounterSample, StaticProvider};
use prometheus_client::encoding::text::encode;
use prometheus_client::registry::Registry;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let provider = Arc::new(StaticProvider::default());
    provider.set_rows(
        clrremoting::CLASS.provider_class,
        vec![
            RawCounterSample::new("w3wp")
                .with_field("Channels", 2)
                .with_field("ContextBoundClassesLoaded", 1)
                .with_field("ContextBoundObjectsAllocPersec", 12)
                .with_field("ContextProxies", 3)
                .with_field("Contexts", 1)
                .with_field("RemoteCallsPersec", 0)
                .with_field("TotalRemoteCalls", 40),
            RawCounterSample::new("_Global_")
                .with_field("Channels", 2)
                .with_field("ContextBoundClassesLoaded", 1)
                .with_field("ContextBoundObjectsAllocPersec", 12)
                .with_field("ContextProxies", 3)
                .with_field("Contexts", 1)
                .with_field("RemoteCallsPersec", 0)
                .with_field("TotalRemoteCalls", 40),
        ],
    );
    // No rows for the exceptions class: it fails and is skipped.

    let config = Config::default();
    let collector = NetFrameworkCollector::new(&config, provider).unwrap();

    let mut registry = Registry::default();
    registry.register_collector(Box::new(
        PrometheusBridge::new(collector).report_errors(config.report_errors),
    ));

    let mut buffer = String::new();
    encode(&mut buffer, &registry).unwrap();

    println!("Scrape output:\n{}", buffer);
}
