use serde::{Deserialize, Serialize};

/// Identifies a research topic in the catalog. Cheap to copy and compare.
///
/// Ids are assigned in declaration order when the catalog is built, so the
/// `Ord` on `TopicId` is the catalog's identity order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TopicId(pub u32);

/// Identifies a derived unlockable (manufacture project, purchasable item
/// or facility) in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct UnlockableId(pub u32);

impl TopicId {
    /// Index into the catalog's topic table.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl UnlockableId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn topic_id_equality() {
        let a = TopicId(0);
        let b = TopicId(0);
        let c = TopicId(1);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn topic_ids_order_by_value() {
        let mut ids = vec![TopicId(7), TopicId(2), TopicId(5)];
        ids.sort();
        assert_eq!(ids, vec![TopicId(2), TopicId(5), TopicId(7)]);
    }

    #[test]
    fn ids_are_hashable() {
        use std::collections::HashMap;
        let mut map = HashMap::new();
        map.insert(TopicId(0), "alien_alloys");
        map.insert(TopicId(1), "plasma_rifle");
        assert_eq!(map[&TopicId(0)], "alien_alloys");
    }

    #[test]
    fn unlockable_index() {
        assert_eq!(UnlockableId(4).index(), 4);
    }
}
