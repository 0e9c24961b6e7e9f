//! Collector configuration.

use serde::{Deserialize, Deserializer};

use crate::error::ConfigError;
use crate::netframework::CLASSES;
use crate::schema::CounterClass;

/// Default metric namespace.
pub const DEFAULT_NAMESPACE: &str = "windows";

/// Configuration of a [`NetFrameworkCollector`](crate::netframework::NetFrameworkCollector).
///
/// ```
/// # use perf_counter_collector::config::Config;
/// let config: Config = serde_json::from_str(r#"{ "collectors_enabled": "clrremoting" }"#).unwrap();
///
/// assert_eq!("windows", config.namespace);
/// assert_eq!(1, config.enabled_classes().unwrap().len());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// First part of every family name.
    pub namespace: String,
    /// Names of the counter classes to collect, either as a list or as a
    /// comma-separated string.
    #[serde(deserialize_with = "class_list")]
    pub collectors_enabled: Vec<String>,
    /// Whether a failed collection fails the whole exposition, instead of
    /// only dropping the failed classes for that scrape.
    pub report_errors: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            namespace: DEFAULT_NAMESPACE.to_string(),
            collectors_enabled: CLASSES.iter().map(|class| class.name.to_string()).collect(),
            report_errors: false,
        }
    }
}

impl Config {
    /// Resolve the enabled classes, in collection order.
    pub fn enabled_classes(&self) -> Result<Vec<&'static CounterClass>, ConfigError> {
        if let Some(unknown) = self
            .collectors_enabled
            .iter()
            .find(|name| !CLASSES.iter().any(|class| class.name == name.as_str()))
        {
            return Err(ConfigError::UnknownClass(unknown.clone()));
        }

        Ok(CLASSES
            .iter()
            .filter(|class| self.collectors_enabled.iter().any(|name| name == class.name))
            .copied()
            .collect())
    }
}

/// Split a comma-separated class list, ignoring blanks.
pub fn parse_class_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

fn class_list<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum ClassList {
        Csv(String),
        List(Vec<String>),
    }

    Ok(match ClassList::deserialize(deserializer)? {
        ClassList::Csv(list) => parse_class_list(&list),
        ClassList::List(names) => names,
    })
}
