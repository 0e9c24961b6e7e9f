//! Counter provider interface.
//!
//! The provider session itself (connection, authentication, lifetime) is
//! owned by the caller. A collector only ever issues read-only queries
//! against it, possibly from several scrapes at once.

use std::collections::HashMap;
use std::sync::Arc;

use crate::error::DescriptorError;

/// Error type returned by providers.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Root context of a provider query.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Namespace(&'static str);

impl Namespace {
    /// The `root/CIMv2` namespace, home of the `Win32_PerfRawData_*` classes.
    pub const ROOT_CIMV2: Namespace = Namespace("root/CIMv2");

    /// Create a new [`Namespace`].
    pub const fn new(name: &'static str) -> Self {
        Namespace(name)
    }

    /// Returns the namespace's str representation.
    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

/// A `SELECT * FROM <class>` query.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Query {
    class: String,
    text: String,
}

impl Query {
    /// Select every instance of the given provider class.
    ///
    /// ```
    /// # use perf_counter_collector::provider::Query;
    /// let query = Query::select_all("Win32_PerfRawData_NETFramework_NETCLRRemoting").unwrap();
    /// assert_eq!(
    ///     "SELECT * FROM Win32_PerfRawData_NETFramework_NETCLRRemoting",
    ///     query.as_str()
    /// );
    /// assert!(Query::select_all("Foo; DROP").is_err());
    /// ```
    pub fn select_all(class: &str) -> Result<Self, DescriptorError> {
        let mut chars = class.chars();
        let valid = matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
            && chars.all(|c| c.is_ascii_alphanumeric() || c == '_');
        if !valid {
            return Err(DescriptorError::InvalidClassName(class.to_string()));
        }

        Ok(Self {
            class: class.to_string(),
            text: format!("SELECT * FROM {class}"),
        })
    }

    /// The queried provider class.
    pub fn class(&self) -> &str {
        &self.class
    }

    /// The query expression.
    pub fn as_str(&self) -> &str {
        &self.text
    }
}

/// One provider row: an instance name and its raw unsigned fields.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RawCounterSample {
    name: String,
    fields: HashMap<String, u64>,
}

impl RawCounterSample {
    /// Create a row for the given instance, without any field.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: HashMap::new(),
        }
    }

    /// Set a field, builder style.
    pub fn with_field(mut self, name: impl Into<String>, value: u64) -> Self {
        self.set_field(name, value);
        self
    }

    /// Set a field.
    pub fn set_field(&mut self, name: impl Into<String>, value: u64) {
        self.fields.insert(name.into(), value);
    }

    /// The instance name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The raw value of the given field, if reported.
    pub fn field(&self, name: &str) -> Option<u64> {
        self.fields.get(name).copied()
    }
}

/// A session with a performance-counter provider.
///
/// Implementations must tolerate concurrent queries. A query is a single
/// attempt: no retry and no timeout are applied by the caller.
pub trait CounterProvider: std::fmt::Debug + Send + Sync {
    /// Run `query` in `namespace`, returning one row per instance.
    fn query(
        &self,
        namespace: Namespace,
        query: &Query,
    ) -> Result<Vec<RawCounterSample>, BoxError>;
}

impl<P: CounterProvider + ?Sized> CounterProvider for Arc<P> {
    fn query(
        &self,
        namespace: Namespace,
        query: &Query,
    ) -> Result<Vec<RawCounterSample>, BoxError> {
        (**self).query(namespace, query)
    }
}

#[cfg(any(test, feature = "test-util"))]
pub use self::fixed::{StaticProvider, StaticProviderError};

#[cfg(any(test, feature = "test-util"))]
mod fixed {
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use parking_lot::RwLock;
    use thiserror::Error;

    use super::{BoxError, CounterProvider, Namespace, Query, RawCounterSample};

    /// Error returned by [`StaticProvider`].
    #[derive(Clone, Debug, Error, PartialEq, Eq)]
    #[error("{0}")]
    pub struct StaticProviderError(String);

    /// In-memory provider answering from fixed rows.
    ///
    /// Rows and failures can be swapped between scrapes. Querying a class
    /// without rows fails, like querying an unknown class would.
    #[derive(Debug, Default)]
    pub struct StaticProvider {
        classes: RwLock<HashMap<String, Result<Vec<RawCounterSample>, StaticProviderError>>>,
        queries: AtomicUsize,
    }

    impl StaticProvider {
        /// Answer queries for `class` with `rows`.
        pub fn set_rows(&self, class: &str, rows: Vec<RawCounterSample>) {
            self.classes.write().insert(class.to_string(), Ok(rows));
        }

        /// Fail queries for `class` with `message`.
        pub fn fail(&self, class: &str, message: &str) {
            self.classes
                .write()
                .insert(class.to_string(), Err(StaticProviderError(message.to_string())));
        }

        /// Number of queries answered so far, failed ones included.
        pub fn query_count(&self) -> usize {
            self.queries.load(Ordering::Relaxed)
        }
    }

    impl CounterProvider for StaticProvider {
        fn query(
            &self,
            _namespace: Namespace,
            query: &Query,
        ) -> Result<Vec<RawCounterSample>, BoxError> {
            self.queries.fetch_add(1, Ordering::Relaxed);
            match self.classes.read().get(query.class()) {
                Some(Ok(rows)) => Ok(rows.clone()),
                Some(Err(err)) => Err(err.clone().into()),
                None => Err(StaticProviderError(format!("invalid class: {}", query.class())).into()),
            }
        }
    }
}
