//! `Win32_PerfRawData_NETFramework_NETCLRRemoting`: .NET CLR remoting activity
//! per process.

use crate::schema::{CounterClass, Field};

/// CLR remoting counters.
///
/// `ContextBoundObjectsAllocPersec` is a raw running count despite its name
/// and is exposed as a counter. `RemoteCallsPersec` is not mapped;
/// `TotalRemoteCalls` carries the same information.
pub static CLASS: CounterClass = CounterClass {
    name: "clrremoting",
    provider_class: "Win32_PerfRawData_NETFramework_NETCLRRemoting",
    fields: &[
        Field::counter(
            "Channels",
            "channels_total",
            "Displays the total number of remoting channels registered across all application domains since application started.",
        ),
        Field::gauge(
            "ContextBoundClassesLoaded",
            "context_bound_classes_loaded",
            "Displays the current number of context-bound classes that are loaded.",
        ),
        Field::counter(
            "ContextBoundObjectsAllocPersec",
            "context_bound_objects_total",
            "Displays the total number of context-bound objects allocated.",
        ),
        Field::counter(
            "ContextProxies",
            "context_proxies_total",
            "Displays the total number of remoting proxy objects in this process since it started.",
        ),
        Field::gauge(
            "Contexts",
            "contexts",
            "Displays the current number of remoting contexts in the application.",
        ),
        Field::counter(
            "TotalRemoteCalls",
            "remote_calls_total",
            "Displays the total number of remote procedure calls invoked since the application started.",
        ),
    ],
};
