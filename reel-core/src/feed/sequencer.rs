//! Ordered, looping cursor over the feed entries.

use std::collections::HashMap;

use reel_model::{EntryId, VideoEntry};
use tracing::debug;

use super::messages::Direction;
use crate::error::{FeedError, Result};

/// Movement of the cursor produced by one navigation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: usize,
    pub to: usize,
}

impl Transition {
    pub fn changed(&self) -> bool {
        self.from != self.to
    }
}

#[derive(Debug, Clone, Default)]
pub struct Sequencer {
    entries: Vec<VideoEntry>,
    positions: HashMap<EntryId, usize>,
    /// `None` only when `entries` is empty.
    current: Option<usize>,
}

impl Sequencer {
    /// Build a cursor over `entries`, clamping `start_index` into range.
    pub fn new(entries: Vec<VideoEntry>, start_index: usize) -> Result<Self> {
        let mut sequencer = Self::default();
        sequencer.replace_entries(entries, start_index)?;
        Ok(sequencer)
    }

    /// Swap in a new entry list. This is the only way out of the empty state.
    pub fn replace_entries(
        &mut self,
        entries: Vec<VideoEntry>,
        start_index: usize,
    ) -> Result<()> {
        let mut positions = HashMap::with_capacity(entries.len());
        for (index, entry) in entries.iter().enumerate() {
            if positions.insert(entry.id.clone(), index).is_some() {
                return Err(FeedError::DuplicateEntry(entry.id.clone()));
            }
        }

        let current = match entries.len() {
            0 => None,
            len => {
                let clamped = start_index.min(len - 1);
                if clamped != start_index {
                    debug!(
                        start_index,
                        clamped, "start index out of range, clamping"
                    );
                }
                Some(clamped)
            }
        };

        self.entries = entries;
        self.positions = positions;
        self.current = current;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[VideoEntry] {
        &self.entries
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    pub fn current(&self) -> Option<&VideoEntry> {
        self.current.and_then(|index| self.entries.get(index))
    }

    pub fn position_of(&self, id: &EntryId) -> Option<usize> {
        self.positions.get(id).copied()
    }

    /// Step one entry forward or back, wrapping at both ends.
    /// Returns `None` in the empty state.
    pub fn advance(&mut self, direction: Direction) -> Option<Transition> {
        let from = self.current?;
        let len = self.entries.len() as isize;
        let to = (from as isize + direction.delta() + len).rem_euclid(len);
        let to = to as usize;
        self.current = Some(to);
        Some(Transition { from, to })
    }

    /// Jump straight to `id`. Leaves the cursor untouched when the id is not
    /// part of the feed.
    pub fn go_to(&mut self, id: &EntryId) -> Result<Transition> {
        let to = self
            .position_of(id)
            .ok_or_else(|| FeedError::NotFound(id.clone()))?;
        // A known id implies a non-empty feed.
        let from = self.current.unwrap_or(to);
        self.current = Some(to);
        Ok(Transition { from, to })
    }
}

/// Resolve a deep-linked id to its start index.
pub fn resolve_start(entries: &[VideoEntry], id: &EntryId) -> Result<usize> {
    entries
        .iter()
        .position(|entry| &entry.id == id)
        .ok_or_else(|| FeedError::NotFound(id.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::test_support::entries;

    #[test]
    fn next_wraps_back_to_start() {
        for len in 1..=6 {
            let mut seq = Sequencer::new(entries(len), 0).unwrap();
            for _ in 0..len {
                seq.advance(Direction::Next);
            }
            assert_eq!(seq.current_index(), Some(0), "len {len}");
        }
    }

    #[test]
    fn previous_from_start_lands_on_last() {
        let mut seq = Sequencer::new(entries(5), 0).unwrap();
        let transition = seq.advance(Direction::Previous).unwrap();
        assert_eq!(transition, Transition { from: 0, to: 4 });
        assert_eq!(seq.current_index(), Some(4));
    }

    #[test]
    fn single_entry_advance_is_a_no_op() {
        let mut seq = Sequencer::new(entries(1), 0).unwrap();
        let transition = seq.advance(Direction::Next).unwrap();
        assert!(!transition.changed());
        assert_eq!(seq.current_index(), Some(0));
    }

    #[test]
    fn start_index_is_clamped() {
        let seq = Sequencer::new(entries(3), 42).unwrap();
        assert_eq!(seq.current_index(), Some(2));
    }

    #[test]
    fn empty_feed_has_no_cursor() {
        let mut seq = Sequencer::new(Vec::new(), 3).unwrap();
        assert!(seq.is_empty());
        assert_eq!(seq.current_index(), None);
        assert!(seq.advance(Direction::Next).is_none());
    }

    #[test]
    fn go_to_resolves_position() {
        let mut seq = Sequencer::new(entries(8), 0).unwrap();
        let id = EntryId::new("short_5").unwrap();
        let transition = seq.go_to(&id).unwrap();
        assert_eq!(transition, Transition { from: 0, to: 5 });
        assert_eq!(seq.current().unwrap().id, id);
    }

    #[test]
    fn go_to_unknown_id_keeps_cursor() {
        let mut seq = Sequencer::new(entries(4), 2).unwrap();
        let missing = EntryId::new("nonexistent").unwrap();
        assert_eq!(seq.go_to(&missing), Err(FeedError::NotFound(missing)));
        assert_eq!(seq.current_index(), Some(2));
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let mut list = entries(3);
        list.push(list[1].clone());
        let err = Sequencer::new(list, 0).unwrap_err();
        assert_eq!(
            err,
            FeedError::DuplicateEntry(EntryId::new("short_1").unwrap())
        );
    }

    #[test]
    fn replace_entries_leaves_empty_state() {
        let mut seq = Sequencer::new(Vec::new(), 0).unwrap();
        seq.replace_entries(entries(2), 1).unwrap();
        assert_eq!(seq.current_index(), Some(1));
    }

    #[test]
    fn resolve_start_matches_deep_link() {
        let list = entries(6);
        let id = EntryId::new("short_3").unwrap();
        assert_eq!(resolve_start(&list, &id), Ok(3));
        let missing = EntryId::new("short_99").unwrap();
        assert!(matches!(
            resolve_start(&list, &missing),
            Err(FeedError::NotFound(_))
        ));
    }
}
