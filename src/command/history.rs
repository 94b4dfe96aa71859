use crate::surface::Snapshot;

/// Linear undo/redo history of full-surface snapshots.
///
/// The history is never empty: it starts with the blank surface, and
/// `current_index` always points at a valid entry. Memory grows with
/// width × height × entries; set a `limit` to evict the oldest snapshots.
pub struct SnapshotHistory {
    entries: Vec<Snapshot>,
    current_index: usize,
    limit: Option<usize>,
}

impl SnapshotHistory {
    /// Creates a history holding only `initial`.
    pub fn new(initial: Snapshot, limit: Option<usize>) -> Self {
        Self {
            entries: vec![initial],
            current_index: 0,
            limit: limit.map(|limit| limit.max(1)),
        }
    }

    /// Records `snapshot` as the newest state, discarding any redo branch.
    pub fn commit(&mut self, snapshot: Snapshot) {
        let discarded = self.entries.len() - (self.current_index + 1);
        if discarded > 0 {
            log::debug!("Discarding {} redo entries", discarded);
        }
        self.entries.truncate(self.current_index + 1);
        self.entries.push(snapshot);
        self.current_index = self.entries.len() - 1;

        if let Some(limit) = self.limit {
            if self.entries.len() > limit {
                let evicted = self.entries.len() - limit;
                self.entries.drain(..evicted);
                self.current_index -= evicted;
                log::debug!("Evicted {} oldest history entries", evicted);
            }
        }

        log::debug!("Committed history entry {}", self.current_index);
    }

    /// Steps back one entry and returns it, or `None` at the oldest entry.
    pub fn undo(&mut self) -> Option<&Snapshot> {
        if !self.can_undo() {
            return None;
        }
        self.current_index -= 1;
        Some(&self.entries[self.current_index])
    }

    /// Steps forward one entry and returns it, or `None` at the newest entry.
    pub fn redo(&mut self) -> Option<&Snapshot> {
        if !self.can_redo() {
            return None;
        }
        self.current_index += 1;
        Some(&self.entries[self.current_index])
    }

    pub fn current(&self) -> &Snapshot {
        &self.entries[self.current_index]
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[Snapshot] {
        &self.entries
    }

    pub fn can_undo(&self) -> bool {
        self.current_index > 0
    }

    pub fn can_redo(&self) -> bool {
        self.current_index + 1 < self.entries.len()
    }

    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    /// Drops every entry and starts over from `initial`.
    pub fn reset(&mut self, initial: Snapshot) {
        self.entries.clear();
        self.entries.push(initial);
        self.current_index = 0;
    }

    /// Total bytes held by all snapshots.
    pub fn memory_bytes(&self) -> usize {
        self.entries.iter().map(Snapshot::byte_len).sum()
    }
}
