//! Shared line buffer between the tailer thread and snapshot readers

use std::sync::Arc;

use parking_lot::Mutex;

/// Append-only, clearable store of cleaned transcript lines.
///
/// One producer (the tailer thread) appends; consumers only ever see
/// point-in-time copies via [`snapshot`](Self::snapshot), never the live
/// Vec, so iteration can't race mutation. Within a snapshot, lines keep
/// transcript arrival order; across snapshots, lines already returned are
/// never retracted (until an explicit [`clear`](Self::clear)).
#[derive(Clone, Default)]
pub struct LineBuffer {
    inner: Arc<Mutex<Vec<String>>>,
}

impl LineBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one cleaned line
    pub fn push(&self, line: String) {
        self.inner.lock().push(line);
    }

    /// Point-in-time copy of all buffered lines
    pub fn snapshot(&self) -> Vec<String> {
        self.inner.lock().clone()
    }

    /// Drop all buffered lines
    pub fn clear(&self) {
        self.inner.lock().clear();
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_is_a_copy() {
        let buffer = LineBuffer::new();
        buffer.push("one".to_string());
        let snap = buffer.snapshot();
        buffer.push("two".to_string());
        assert_eq!(snap, vec!["one"]);
        assert_eq!(buffer.len(), 2);
    }

    #[test]
    fn clear_empties_the_buffer() {
        let buffer = LineBuffer::new();
        buffer.push("stale".to_string());
        buffer.clear();
        assert!(buffer.is_empty());
        assert!(buffer.snapshot().is_empty());
    }

    #[test]
    fn preserves_arrival_order() {
        let buffer = LineBuffer::new();
        for i in 0..100 {
            buffer.push(format!("line {i}"));
        }
        let snap = buffer.snapshot();
        assert_eq!(snap.len(), 100);
        assert_eq!(snap[0], "line 0");
        assert_eq!(snap[99], "line 99");
    }

    #[test]
    fn clones_share_the_same_store() {
        let buffer = LineBuffer::new();
        let writer = buffer.clone();
        writer.push("shared".to_string());
        assert_eq!(buffer.snapshot(), vec!["shared"]);
    }
}
