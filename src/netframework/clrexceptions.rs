//! `Win32_PerfRawData_NETFramework_NETCLRExceptions`: .NET CLR exception
//! handling per process.

use crate::schema::{CounterClass, Field};

/// CLR exception counters. The `*Persec` fields are raw running counts.
pub static CLASS: CounterClass = CounterClass {
    name: "clrexceptions",
    provider_class: "Win32_PerfRawData_NETFramework_NETCLRExceptions",
    fields: &[
        Field::counter(
            "NumberofExcepsThrown",
            "exceptions_thrown_total",
            "Displays the total number of exceptions thrown since the application started. This includes both .NET exceptions and unmanaged exceptions that are converted into .NET exceptions.",
        ),
        Field::counter(
            "NumberofFiltersPersec",
            "exceptions_filters_total",
            "Displays the total number of .NET exception filters executed. An exception filter evaluates regardless of whether an exception is handled.",
        ),
        Field::counter(
            "NumberofFinallysPersec",
            "exceptions_finallys_total",
            "Displays the total number of finally blocks executed. Only the finally blocks executed for an exception are counted; finally blocks on normal code paths are not counted by this counter.",
        ),
        Field::counter(
            "ThrowToCatchDepthPersec",
            "throw_to_catch_depth_total",
            "Displays the total number of stack frames traversed, from the frame that threw the exception to the frame that handled the exception.",
        ),
    ],
};
