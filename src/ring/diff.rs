//! Key reassignment between two ring states
//!
//! The ring never moves data. After a membership change a caller can diff the
//! old and new snapshots over its own keys to learn what has to move where.

use super::state::RingSnapshot;
use tracing::debug;

/// A key whose owner changed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reassignment {
    pub key: String,
    /// Owner in the old ring (`None` if it was empty)
    pub from: Option<String>,
    /// Owner in the new ring (`None` if it is empty)
    pub to: Option<String>,
}

/// List the keys that resolve to a different node in `new` than in `old`
pub fn diff<I, K>(old: &RingSnapshot, new: &RingSnapshot, keys: I) -> Vec<Reassignment>
where
    I: IntoIterator<Item = K>,
    K: AsRef<str>,
{
    let mut checked = 0usize;
    let mut moves = Vec::new();

    for key in keys {
        let key = key.as_ref();
        checked += 1;

        let from = old.locate(key);
        let to = new.locate(key);
        if from != to {
            moves.push(Reassignment {
                key: key.to_string(),
                from: from.map(str::to_string),
                to: to.map(str::to_string),
            });
        }
    }

    debug!(checked, moved = moves.len(), "computed ring diff");
    moves
}
