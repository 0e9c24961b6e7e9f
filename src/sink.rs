//! Output streams for collected samples.

use std::sync::mpsc;

use crate::metrics::MetricSample;

/// Write-only destination of [`MetricSample`]s.
pub trait MetricSink {
    /// Accept one sample.
    fn send(&mut self, sample: MetricSample);
}

impl MetricSink for Vec<MetricSample> {
    fn send(&mut self, sample: MetricSample) {
        self.push(sample);
    }
}

/// Samples sent after the receiver hung up are dropped.
impl MetricSink for mpsc::Sender<MetricSample> {
    fn send(&mut self, sample: MetricSample) {
        let _ = mpsc::Sender::send(self, sample);
    }
}

impl<S: MetricSink + ?Sized> MetricSink for &mut S {
    fn send(&mut self, sample: MetricSample) {
        (**self).send(sample)
    }
}

/// A [`MetricSink`] calling a closure for each sample.
///
/// See [`from_fn`].
pub struct FnSink<F>(F);

impl<F> std::fmt::Debug for FnSink<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnSink").finish_non_exhaustive()
    }
}

/// Wrap a closure into a [`MetricSink`].
///
/// ```
/// # use perf_counter_collector::sink::from_fn;
/// let mut seen = 0;
/// let sink = from_fn(|_sample| seen += 1);
/// # drop(sink);
/// ```
pub fn from_fn<F: FnMut(MetricSample)>(f: F) -> FnSink<F> {
    FnSink(f)
}

impl<F: FnMut(MetricSample)> MetricSink for FnSink<F> {
    fn send(&mut self, sample: MetricSample) {
        (self.0)(sample)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::metrics::MetricType;
    use crate::registry::Descriptor;

    fn sample(value: f64) -> MetricSample {
        let descriptor = Arc::new(Descriptor::new("g", "G.", vec!["process".into()]));
        MetricSample::new(descriptor, MetricType::Gauge, value, vec!["p".to_string()])
    }

    #[test]
    fn channel_sink() {
        let (mut tx, rx) = mpsc::channel();
        MetricSink::send(&mut tx, sample(1.0));
        MetricSink::send(&mut tx, sample(2.0));
        drop(tx);

        let values = rx.iter().map(|s| s.value()).collect::<Vec<_>>();
        assert_eq!(vec![1.0, 2.0], values);
    }

    #[test]
    fn channel_sink_ignores_hang_up() {
        let (mut tx, rx) = mpsc::channel();
        drop(rx);

        MetricSink::send(&mut tx, sample(1.0));
    }

    #[test]
    fn closure_sink() {
        let mut values = Vec::new();
        {
            let mut sink = from_fn(|s: MetricSample| values.push(s.value()));
            sink.send(sample(3.0));
        }
        assert_eq!(vec![3.0], values);
    }
}
