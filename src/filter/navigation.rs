//! Previous/next navigation within the visible list

use crate::model::Resource;

/// Position of a resource within the visible list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Neighbors<'a> {
    pub previous: Option<&'a Resource>,
    pub next: Option<&'a Resource>,
    /// Zero-based index of the current resource
    pub index: usize,
    pub total: usize,
}

/// Locate `current_id` in `visible` and return its neighbors
///
/// Returns `None` when the resource is not part of the visible list (for
/// example after a filter change hid it).
#[must_use]
pub fn neighbors<'a>(visible: &'a [Resource], current_id: &str) -> Option<Neighbors<'a>> {
    let index = visible.iter().position(|r| r.id == current_id)?;
    Some(Neighbors {
        previous: index.checked_sub(1).and_then(|i| visible.get(i)),
        next: visible.get(index + 1),
        index,
        total: visible.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ResourceType;
    use crate::testing::resource;

    fn list() -> Vec<Resource> {
        vec![
            resource("1", ResourceType::Url, "https://a.com"),
            resource("2", ResourceType::Url, "https://b.com"),
            resource("3", ResourceType::Url, "https://c.com"),
        ]
    }

    #[test]
    fn test_middle() {
        let visible = list();
        let n = neighbors(&visible, "2").unwrap();
        assert_eq!(n.previous.map(|r| r.id.as_str()), Some("1"));
        assert_eq!(n.next.map(|r| r.id.as_str()), Some("3"));
        assert_eq!(n.index, 1);
        assert_eq!(n.total, 3);
    }

    #[test]
    fn test_edges() {
        let visible = list();
        let first = neighbors(&visible, "1").unwrap();
        assert!(first.previous.is_none());
        let last = neighbors(&visible, "3").unwrap();
        assert!(last.next.is_none());
    }

    #[test]
    fn test_missing() {
        assert!(neighbors(&list(), "9").is_none());
        assert!(neighbors(&[], "1").is_none());
    }
}
