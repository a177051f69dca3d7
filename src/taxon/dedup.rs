use crate::taxon::record::IdentityKey;
use std::collections::HashSet;

/// Remembers the identity of every record emitted during one run.
#[derive(Debug, Default)]
pub struct Deduplicator {
    seen: HashSet<IdentityKey>,
}

impl Deduplicator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` the first time a key is offered, `false` afterwards.
    pub fn first_sighting(&mut self, key: IdentityKey) -> bool {
        self.seen.insert(key)
    }
}
