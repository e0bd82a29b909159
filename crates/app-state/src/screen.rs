//! Screen identifiers
//!
//! Every navigable destination in the app is a variant of [`Screen`]. The set
//! is closed: surfaces and deep links can only ever name one of these.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Error returned when a slug does not name a known screen
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseScreenError {
    /// No screen has this slug
    #[error("Unknown screen: {0}")]
    Unknown(String),
}

/// All navigable destinations in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Screen {
    /// Home feed of recent memories
    #[default]
    Home,
    /// Photo capture
    Camera,
    /// Photo grid
    Gallery,
    /// Family member profile
    Profile,
    /// Activity notifications
    Notifications,
    /// Shared memories feed
    Feed,
    /// Family messages
    Messages,
    /// App settings
    Settings,
    /// Search photos and people
    Search,
    /// Memories by date
    Calendar,
    /// Story composer
    StoryCreator,
    /// Family dashboard
    Dashboard,
}

impl Screen {
    /// Get all screens in declaration order
    pub fn all() -> [Screen; 12] {
        [
            Screen::Home,
            Screen::Camera,
            Screen::Gallery,
            Screen::Profile,
            Screen::Notifications,
            Screen::Feed,
            Screen::Messages,
            Screen::Settings,
            Screen::Search,
            Screen::Calendar,
            Screen::StoryCreator,
            Screen::Dashboard,
        ]
    }

    /// Stable kebab-case identifier, matching the serde representation
    pub fn slug(&self) -> &'static str {
        match self {
            Screen::Home => "home",
            Screen::Camera => "camera",
            Screen::Gallery => "gallery",
            Screen::Profile => "profile",
            Screen::Notifications => "notifications",
            Screen::Feed => "feed",
            Screen::Messages => "messages",
            Screen::Settings => "settings",
            Screen::Search => "search",
            Screen::Calendar => "calendar",
            Screen::StoryCreator => "story-creator",
            Screen::Dashboard => "dashboard",
        }
    }

    /// Get the URL path for this screen
    pub fn to_path(&self) -> String {
        match self {
            Screen::Home => "/".to_string(),
            other => format!("/{}", other.slug()),
        }
    }

    /// Get a display title for this screen
    pub fn title(&self) -> &'static str {
        match self {
            Screen::Home => "Home",
            Screen::Camera => "Camera",
            Screen::Gallery => "Gallery",
            Screen::Profile => "Profile",
            Screen::Notifications => "Notifications",
            Screen::Feed => "Feed",
            Screen::Messages => "Messages",
            Screen::Settings => "Settings",
            Screen::Search => "Search",
            Screen::Calendar => "Calendar",
            Screen::StoryCreator => "New Story",
            Screen::Dashboard => "Dashboard",
        }
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for Screen {
    type Err = ParseScreenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Screen::all()
            .into_iter()
            .find(|screen| screen.slug() == s)
            .ok_or_else(|| ParseScreenError::Unknown(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_default_screen_is_home() {
        assert_eq!(Screen::default(), Screen::Home);
    }

    #[test]
    fn test_slugs_are_unique() {
        let slugs: HashSet<_> = Screen::all().iter().map(|s| s.slug()).collect();
        assert_eq!(slugs.len(), Screen::all().len());
    }

    #[test]
    fn test_parse_every_slug() {
        for screen in Screen::all() {
            assert_eq!(screen.slug().parse::<Screen>(), Ok(screen));
        }
    }

    #[test]
    fn test_parse_unknown() {
        assert_eq!(
            "albums".parse::<Screen>(),
            Err(ParseScreenError::Unknown("albums".to_string()))
        );
        // Slugs are case-sensitive
        assert!("Gallery".parse::<Screen>().is_err());
    }

    #[test]
    fn test_to_path() {
        assert_eq!(Screen::Home.to_path(), "/");
        assert_eq!(Screen::Gallery.to_path(), "/gallery");
        assert_eq!(Screen::StoryCreator.to_path(), "/story-creator");
    }

    #[test]
    fn test_serde_matches_slug() {
        let json = serde_json::to_string(&Screen::StoryCreator).unwrap();
        assert_eq!(json, "\"story-creator\"");

        let parsed: Screen = serde_json::from_str("\"calendar\"").unwrap();
        assert_eq!(parsed, Screen::Calendar);
    }

    #[test]
    fn test_display() {
        assert_eq!(Screen::Notifications.to_string(), "notifications");
        assert_eq!(Screen::StoryCreator.title(), "New Story");
    }
}
