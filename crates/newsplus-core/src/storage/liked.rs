use std::collections::HashSet;

/// Ordered set of liked article ids, as persisted under the liked key
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LikedIds {
    ids: Vec<String>,
}

impl LikedIds {
    /// Wrap a persisted list; duplicates in stored data are collapsed
    pub fn from_stored(stored: Vec<String>) -> Self {
        let mut liked = Self::default();
        for id in stored {
            liked.insert(&id);
        }
        liked
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|existing| existing == id)
    }

    /// Append `id` unless already present. Returns true if it was added.
    pub fn insert(&mut self, id: &str) -> bool {
        if self.contains(id) {
            return false;
        }
        self.ids.push(id.to_string());
        true
    }

    /// Remove every occurrence of `id`. Returns true if anything was removed.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.ids.len();
        self.ids.retain(|existing| existing != id);
        self.ids.len() != before
    }

    pub fn set(&mut self, id: &str, liked: bool) -> bool {
        if liked {
            self.insert(id)
        } else {
            self.remove(id)
        }
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }

    /// Hash lookup table for bulk membership checks
    pub fn lookup(&self) -> HashSet<&str> {
        self.iter().collect()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.ids
    }
}

impl<'a> FromIterator<&'a str> for LikedIds {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut liked = Self::default();
        for id in iter {
            liked.insert(id);
        }
        liked
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_is_idempotent() {
        let mut liked = LikedIds::default();
        assert!(liked.insert("u1"));
        assert!(!liked.insert("u1"));
        assert_eq!(liked.as_slice(), &["u1".to_string()]);
    }

    #[test]
    fn test_remove_drops_all_occurrences() {
        // Stored data written by older versions may contain duplicates.
        let mut liked = LikedIds {
            ids: vec!["u1".into(), "u2".into(), "u1".into()],
        };
        assert!(liked.remove("u1"));
        assert_eq!(liked.as_slice(), &["u2".to_string()]);
        assert!(!liked.remove("u1"));
    }

    #[test]
    fn test_from_stored_collapses_duplicates_keeping_order() {
        let liked = LikedIds::from_stored(vec!["b".into(), "a".into(), "b".into()]);
        assert_eq!(liked.iter().collect::<Vec<_>>(), vec!["b", "a"]);
    }

    #[test]
    fn test_set_toggles() {
        let mut liked = LikedIds::default();
        liked.set("x", true);
        assert!(liked.contains("x"));
        liked.set("x", false);
        assert!(liked.is_empty());
    }
}
