//! Navigation path
//!
//! The back-stack of screens, bottom (root) to top (visible). A path always
//! holds at least its root, so reading the top never fails.

use serde::{Deserialize, Serialize};

use crate::screen::Screen;

/// Error returned when building a path from an empty sequence
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Navigation path must contain at least the root screen")]
pub struct EmptyPathError;

/// Ordered back-stack of screens
///
/// Index 0 is the root, the last entry is the visible screen. Only the
/// [`NavigationController`](crate::NavigationController) mutates a path;
/// consumers receive snapshots.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "Vec<Screen>", try_from = "Vec<Screen>")]
pub struct NavigationPath {
    /// Bottom of the stack
    root: Screen,
    /// Entries above the root (bottom to top)
    above: Vec<Screen>,
}

impl NavigationPath {
    /// Create a path holding only `root`
    pub fn new(root: Screen) -> Self {
        Self {
            root,
            above: Vec::new(),
        }
    }

    /// The root screen
    pub fn root(&self) -> Screen {
        self.root
    }

    /// The visible screen
    pub fn top(&self) -> Screen {
        self.above.last().copied().unwrap_or(self.root)
    }

    /// Number of entries, root included
    pub fn depth(&self) -> usize {
        self.above.len() + 1
    }

    /// Check if there is anything above the root
    pub fn can_go_back(&self) -> bool {
        !self.above.is_empty()
    }

    /// Check if `screen` appears anywhere in the path
    pub fn contains(&self, screen: Screen) -> bool {
        self.root == screen || self.above.contains(&screen)
    }

    /// Iterate from root to top
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = Screen> + '_ {
        std::iter::once(self.root).chain(self.above.iter().copied())
    }

    /// Copy the path into a vector, root first
    pub fn screens(&self) -> Vec<Screen> {
        self.iter().collect()
    }

    pub(crate) fn push(&mut self, screen: Screen) {
        self.above.push(screen);
    }

    /// Remove the top entry unless it is the root
    pub(crate) fn pop(&mut self) -> Option<Screen> {
        self.above.pop()
    }

    pub(crate) fn clear_to_root(&mut self) {
        self.above.clear();
    }
}

impl Default for NavigationPath {
    fn default() -> Self {
        Self::new(Screen::default())
    }
}

impl From<NavigationPath> for Vec<Screen> {
    fn from(path: NavigationPath) -> Self {
        path.screens()
    }
}

impl TryFrom<Vec<Screen>> for NavigationPath {
    type Error = EmptyPathError;

    fn try_from(screens: Vec<Screen>) -> Result<Self, Self::Error> {
        let mut iter = screens.into_iter();
        let root = iter.next().ok_or(EmptyPathError)?;
        Ok(Self {
            root,
            above: iter.collect(),
        })
    }
}

impl PartialEq<[Screen]> for NavigationPath {
    fn eq(&self, other: &[Screen]) -> bool {
        self.depth() == other.len() && self.iter().zip(other.iter()).all(|(a, b)| a == *b)
    }
}

impl<const N: usize> PartialEq<[Screen; N]> for NavigationPath {
    fn eq(&self, other: &[Screen; N]) -> bool {
        *self == other[..]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_path_is_root_only() {
        let path = NavigationPath::new(Screen::Camera);
        assert_eq!(path.depth(), 1);
        assert_eq!(path.top(), Screen::Camera);
        assert_eq!(path.root(), Screen::Camera);
        assert!(!path.can_go_back());
    }

    #[test]
    fn test_pop_never_removes_root() {
        let mut path = NavigationPath::default();
        path.push(Screen::Gallery);

        assert_eq!(path.pop(), Some(Screen::Gallery));
        assert_eq!(path.pop(), None);
        assert_eq!(path, [Screen::Home]);
    }

    #[test]
    fn test_duplicates_are_distinct_entries() {
        let mut path = NavigationPath::default();
        path.push(Screen::Gallery);
        path.push(Screen::Gallery);

        assert_eq!(path.depth(), 3);
        assert_eq!(path, [Screen::Home, Screen::Gallery, Screen::Gallery]);
    }

    #[test]
    fn test_clear_to_root() {
        let mut path = NavigationPath::default();
        path.push(Screen::Gallery);
        path.push(Screen::Profile);
        path.clear_to_root();

        assert_eq!(path, [Screen::Home]);
    }

    #[test]
    fn test_contains() {
        let mut path = NavigationPath::default();
        path.push(Screen::Feed);

        assert!(path.contains(Screen::Home));
        assert!(path.contains(Screen::Feed));
        assert!(!path.contains(Screen::Settings));
    }

    #[test]
    fn test_serializes_as_sequence() {
        let mut path = NavigationPath::default();
        path.push(Screen::StoryCreator);

        let json = serde_json::to_string(&path).unwrap();
        assert_eq!(json, r#"["home","story-creator"]"#);

        let parsed: NavigationPath = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, path);
    }

    #[test]
    fn test_empty_sequence_rejected() {
        assert_eq!(NavigationPath::try_from(Vec::new()), Err(EmptyPathError));
        assert!(serde_json::from_str::<NavigationPath>("[]").is_err());
    }
}
