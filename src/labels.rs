use crate::types::StreamKind;
use std::collections::HashMap;

/// Stores the ordered channel/metric names announced once per stream.
///
/// Later data vectors for a stream are positional against these labels. The
/// registry does not enforce the length match; channel counts are fixed by
/// the headset protocol.
#[derive(Debug, Default)]
pub struct LabelRegistry {
    labels: HashMap<StreamKind, Vec<String>>,
}

impl LabelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record (or overwrite) the labels for a stream.
    pub fn record(&mut self, kind: StreamKind, labels: Vec<String>) {
        self.labels.insert(kind, labels);
    }

    pub fn get(&self, kind: StreamKind) -> Option<&[String]> {
        self.labels.get(&kind).map(|l| l.as_slice())
    }
}
