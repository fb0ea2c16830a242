use serde::{Deserialize, Serialize};

/// Per-surface toggles.
///
/// Serialized with the host-facing keys (`tagsLinks`, `favorites`, `recent`,
/// `pageTitle`). Missing keys fall back to `true`, unknown keys are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Inline page references and tags
    pub tags_links: bool,
    /// Left sidebar favorites
    pub favorites: bool,
    /// Left sidebar recent items
    pub recent: bool,
    /// Title of the current page
    pub page_title: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tags_links: true,
            favorites: true,
            recent: true,
            page_title: true,
        }
    }
}

/// Rendered surfaces a label can appear on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Surface {
    TagsLinks,
    Favorites,
    Recent,
    PageTitle,
}

impl Settings {
    pub fn enabled(&self, surface: Surface) -> bool {
        match surface {
            Surface::TagsLinks => self.tags_links,
            Surface::Favorites => self.favorites,
            Surface::Recent => self.recent,
            Surface::PageTitle => self.page_title,
        }
    }

    /// Read settings from a host settings object, field by field.
    ///
    /// Anything that is not a boolean under a known key keeps its default,
    /// so a partially filled or foreign settings object never fails.
    pub fn from_host_value(value: &serde_json::Value) -> Self {
        let defaults = Self::default();
        let flag = |key: &str, default: bool| {
            value
                .get(key)
                .and_then(serde_json::Value::as_bool)
                .unwrap_or(default)
        };
        Self {
            tags_links: flag("tagsLinks", defaults.tags_links),
            favorites: flag("favorites", defaults.favorites),
            recent: flag("recent", defaults.recent),
            page_title: flag("pageTitle", defaults.page_title),
        }
    }

    pub fn to_value(&self) -> serde_json::Value {
        serde_json::json!({
            "tagsLinks": self.tags_links,
            "favorites": self.favorites,
            "recent": self.recent,
            "pageTitle": self.page_title,
        })
    }
}

/// One entry of the settings schema declared to the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingDescriptor {
    pub key: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub default: bool,
    pub title: String,
    pub description: String,
}

impl SettingDescriptor {
    fn boolean(key: &str, title: &str, description: &str) -> Self {
        Self {
            key: key.to_string(),
            kind: "boolean".to_string(),
            default: true,
            title: title.to_string(),
            description: description.to_string(),
        }
    }
}

/// Checkbox schema for the host settings UI
pub fn settings_schema() -> Vec<SettingDescriptor> {
    vec![
        SettingDescriptor::boolean(
            "tagsLinks",
            "Hide category on tags/links",
            concat!(
                "Hide the category prefix (everything before the last slash) ",
                "on page references and tags."
            ),
        ),
        SettingDescriptor::boolean(
            "favorites",
            "Hide category in favorites",
            "Hide the category prefix in the left sidebar favorites.",
        ),
        SettingDescriptor::boolean(
            "recent",
            "Hide category in recent",
            "Hide the category prefix in the left sidebar recent items.",
        ),
        SettingDescriptor::boolean(
            "pageTitle",
            "Hide category in page title",
            "Hide the category prefix in the current page title.",
        ),
    ]
}
