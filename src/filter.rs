//! Aggregate pseudo-instance filtering.

/// Instance name under which the provider reports the sum over all real
/// instances.
pub const AGGREGATE_INSTANCE: &str = "_Global_";

/// Whether `instance` names the aggregate pseudo-instance.
///
/// The comparison is exact. Every other name is a real instance, duplicates
/// included.
pub fn is_aggregate(instance: &str) -> bool {
    instance == AGGREGATE_INSTANCE
}
