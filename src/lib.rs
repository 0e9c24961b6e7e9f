#![deny(dead_code)]
#![deny(missing_docs)]
#![deny(unused)]
#![forbid(unsafe_code)]
#![warn(missing_debug_implementations)]

//! Turns raw performance-counter snapshots, as exposed by an operating system
//! counter provider (e.g. WMI `Win32_PerfRawData_*` classes), into typed,
//! labeled samples on every scrape.
//!
//! Each counter class is described by a static schema, mapping provider
//! fields to metric families and their semantic type (counter or gauge). A
//! [`ClassCollector`](collector::ClassCollector) issues one query per scrape,
//! drops the provider's aggregate pseudo-instance, and emits one sample per
//! declared field and instance. A failed query yields no samples at all for
//! that scrape.
//!
//! # Examples
//!
//! ```
//! # #[cfg(feature = "test-util")]
//! # {
//! use std::sync::Arc;
//!
//! use perf_counter_collector::collector::{ClassCollector, Collector};
//! use perf_counter_collector::netframework::{clrremoting, SUBSYSTEM};
//! use perf_counter_collector::provider::{RawCounterSample, StaticProvider};
//!
//! let provider = Arc::new(StaticProvider::default());
//! provider.set_rows(
//!     clrremoting::CLASS.provider_class,
//!     vec![RawCounterSample::new("w3wp")
//!         .with_field("Channels", 3)
//!         .with_field("ContextBoundClassesLoaded", 1)
//!         .with_field("ContextBoundObjectsAllocPersec", 8)
//!         .with_field("ContextProxies", 0)
//!         .with_field("Contexts", 2)
//!         .with_field("TotalRemoteCalls", 42)],
//! );
//!
//! let collector = ClassCollector::new("windows", SUBSYSTEM, &clrremoting::CLASS, provider).unwrap();
//!
//! let mut samples = Vec::new();
//! collector.collect(&mut samples).unwrap();
//!
//! assert_eq!(6, samples.len());
//! assert_eq!(
//!     "windows_netframework_clrremoting_channels_total",
//!     samples[0].descriptor().name()
//! );
//! # }
//! ```

pub mod collector;
pub mod config;
pub mod encoding;
pub mod error;
pub mod filter;
pub mod metrics;
pub mod netframework;
pub mod provider;
pub mod registry;
pub mod schema;
pub mod sink;
