use crate::api::TransportError;

/// Latest published result of a sync engine.
///
/// Owned exclusively by the engine; readers receive clones through a watch
/// channel and can never mutate engine state.
#[derive(Debug, Clone, PartialEq)]
pub struct SyncState<T> {
    /// Last successfully merged value. Retained across failed ticks, so a
    /// stale value is shown in preference to nothing.
    pub data: Option<T>,
    /// True from start until the first tick settles, success or failure
    pub loading: bool,
    /// Failure kind of the most recent tick, cleared on success
    pub last_error: Option<TransportError>,
}

impl<T> SyncState<T> {
    pub(crate) fn initial() -> Self {
        Self {
            data: None,
            loading: true,
            last_error: None,
        }
    }

    pub fn has_data(&self) -> bool {
        self.data.is_some()
    }
}

impl<T> Default for SyncState<T> {
    fn default() -> Self {
        Self::initial()
    }
}
