//! User preferences and the store that owns them.
//!
//! The store is created once by the application and handed to whoever needs
//! it; there is no global instance. Consumers that want to react to changes
//! register a subscriber instead of polling.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::Result;
use crate::layout::{ExclusionZones, PlacementConfig};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    pub show_minimap: bool,
    pub show_tooltips: bool,
    /// Gap between a hovered job and its tooltip.
    pub popup_margin: f32,
    /// Width of the details sidebar on the right.
    pub sidebar_width: f32,
    pub minimap_height: f32,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            show_minimap: true,
            show_tooltips: true,
            popup_margin: 8.0,
            sidebar_width: 300.0,
            minimap_height: 48.0,
        }
    }
}

impl Preferences {
    /// Popup placement rules for the current layout. `header_height` is the
    /// measured height of everything above the chart.
    pub fn placement_config(&self, header_height: f32) -> PlacementConfig {
        PlacementConfig {
            margin: self.popup_margin,
            zones: ExclusionZones {
                header_height,
                sidebar_width: self.sidebar_width,
                ..ExclusionZones::default()
            },
        }
    }
}

type Subscriber = Box<dyn FnMut(&Preferences)>;

pub struct PreferenceStore {
    prefs: Preferences,
    path: Option<PathBuf>,
    subscribers: Vec<Subscriber>,
}

impl PreferenceStore {
    /// A store that never touches the disk.
    pub fn in_memory() -> Self {
        Self {
            prefs: Preferences::default(),
            path: None,
            subscribers: Vec::new(),
        }
    }

    /// Load preferences from `path`, falling back to defaults when the file
    /// is missing or unreadable. Changes are saved back to the same path.
    pub fn load(path: PathBuf) -> Self {
        let prefs = match std::fs::read_to_string(&path) {
            Ok(json) => serde_json::from_str(&json).unwrap_or_else(|e| {
                warn!(path = %path.display(), error = %e, "ignoring corrupt settings file");
                Preferences::default()
            }),
            Err(e) => {
                debug!(path = %path.display(), error = %e, "no settings file, using defaults");
                Preferences::default()
            }
        };
        Self {
            prefs,
            path: Some(path),
            subscribers: Vec::new(),
        }
    }

    /// Settings file inside the OS config directory.
    pub fn default_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "ShopfloorGantt")
            .map(|dirs| dirs.config_dir().join("settings.json"))
    }

    pub fn get(&self) -> &Preferences {
        &self.prefs
    }

    pub fn subscribe(&mut self, subscriber: impl FnMut(&Preferences) + 'static) {
        self.subscribers.push(Box::new(subscriber));
    }

    /// Apply `change`. Subscribers are notified and the file rewritten only
    /// when something actually changed.
    pub fn update(&mut self, change: impl FnOnce(&mut Preferences)) {
        let before = self.prefs.clone();
        change(&mut self.prefs);
        if self.prefs == before {
            return;
        }
        for subscriber in &mut self.subscribers {
            subscriber(&self.prefs);
        }
        if let Err(e) = self.save() {
            warn!(error = %e, "failed to save settings");
        }
    }

    pub fn save(&self) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        std::fs::write(path, serde_json::to_string_pretty(&self.prefs)?)?;
        Ok(())
    }
}
