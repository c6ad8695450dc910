//! Session store: the last successful fetch, kept across re-renders.

use crate::domain::{InstrumentInfo, TimeSeriesDataset};

#[derive(Debug, Clone, PartialEq)]
struct Entry {
    dataset: TimeSeriesDataset,
    info: InstrumentInfo,
}

/// Holds the dataset and instrument info of the last successful fetch.
///
/// Starts empty and is never cleared. Both halves are replaced together, so
/// a dataset is never shown next to metadata from a different fetch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionStore {
    entry: Option<Entry>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dataset(&self) -> Option<&TimeSeriesDataset> {
        self.entry.as_ref().map(|e| &e.dataset)
    }

    pub fn info(&self) -> Option<&InstrumentInfo> {
        self.entry.as_ref().map(|e| &e.info)
    }

    pub fn has_data(&self) -> bool {
        self.entry.is_some()
    }

    pub(crate) fn replace(&mut self, dataset: TimeSeriesDataset, info: InstrumentInfo) {
        self.entry = Some(Entry { dataset, info });
    }
}
