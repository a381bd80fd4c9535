use std::sync::Arc;

/// Anything that can hand out the latest value of a resource without blocking.
///
/// The returned [`Arc`] is a point-in-time copy. Hold it for the length of one unit of work (a
/// request, a loop iteration) and ask again for the next one, so a refresh never lands halfway
/// through.
pub trait SnapshotSource<T> {
    /// The most recently published snapshot.
    fn latest_snapshot(&self) -> Arc<T>;
}
