use super::page::ContentId;

/// Synchronous listener for notebook notifications.
///
/// All methods default to no-ops; everything runs on the caller's thread
/// inside the operation that caused the change, so a recompute triggered
/// by the notification can never race a paint.
pub trait NotebookObserver {
    /// The displayed page changed.  Either index may be `None` only while
    /// the collection is empty.
    fn selection_changed(&mut self, _old: Option<usize>, _new: Option<usize>) {}

    /// A close was requested through the close button.  Return `true` to
    /// cancel; the page then stays and no further notification fires.
    fn page_closing(&mut self, _index: usize) -> bool {
        false
    }

    /// A page was removed through its close button.
    fn page_closed(&mut self, _content: ContentId) {}

    /// A drag reorder swapped the page to a new index.
    fn page_reordered(&mut self, _content: ContentId, _from: usize, _to: usize) {}
}
