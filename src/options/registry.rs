// SPDX-License-Identifier: MPL-2.0
//! Named configuration profiles.
//!
//! The registry owns every profile layer and performs the three-layer merge
//! that produces a notice's [`ResolvedOptions`] snapshot. The five built-in
//! profiles can be configured but never removed or reset; custom profiles
//! support the full CRUD surface plus TOML persistence.

use super::defaults;
use super::{LayoutOverride, ProfileOptions, ResolvedOptions, SymbolOverride};
use crate::error::{Error, Result};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Profiles that ship with the crate and are protected from removal/reset.
const BUILT_IN_PROFILES: [&str; 5] = ["default", "info", "success", "error", "warning"];

/// Name of the fallback profile used for unknown names.
pub(crate) const FALLBACK_PROFILE: &str = "default";

/// Registry of named profile layers.
#[derive(Debug, Clone)]
pub struct Registry {
    profiles: BTreeMap<String, ProfileOptions>,
}

impl Default for Registry {
    fn default() -> Self {
        let mut profiles = BTreeMap::new();
        profiles.insert("default".to_string(), ProfileOptions::default());
        profiles.insert(
            "info".to_string(),
            colored_profile(defaults::INFO_BACKGROUND_COLOR, false),
        );
        profiles.insert(
            "success".to_string(),
            colored_profile(defaults::SUCCESS_BACKGROUND_COLOR, true),
        );
        profiles.insert(
            "error".to_string(),
            colored_profile(defaults::ERROR_BACKGROUND_COLOR, true),
        );
        profiles.insert(
            "warning".to_string(),
            colored_profile(defaults::WARNING_BACKGROUND_COLOR, false),
        );
        Self { profiles }
    }
}

fn colored_profile(color: &str, symbol_visible: bool) -> ProfileOptions {
    ProfileOptions {
        layout: LayoutOverride {
            color: Some(color.to_string()),
            ..LayoutOverride::default()
        },
        symbol: SymbolOverride {
            visible: if symbol_visible { Some(true) } else { None },
            ..SymbolOverride::default()
        },
        ..ProfileOptions::default()
    }
}

impl Registry {
    /// Creates a registry containing only the built-in profiles.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns whether a profile with this name exists.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.profiles.contains_key(name)
    }

    /// Whether this name belongs to a built-in profile.
    #[must_use]
    pub fn is_built_in(name: &str) -> bool {
        BUILT_IN_PROFILES.contains(&name)
    }

    /// Resolves the full configuration snapshot for a notice.
    ///
    /// Unknown profile names fall back to the `default` profile; the result
    /// is a snapshot, so later profile mutation does not affect it.
    #[must_use]
    pub fn resolve(&self, profile: &str, overrides: Option<&ProfileOptions>) -> ResolvedOptions {
        let layer = self
            .profiles
            .get(profile)
            .unwrap_or_else(|| &self.profiles[FALLBACK_PROFILE]);

        let mut resolved = ResolvedOptions::default();
        layer.apply_to(&mut resolved);
        if let Some(call_layer) = overrides {
            call_layer.apply_to(&mut resolved);
        }
        resolved
    }

    /// Returns the resolved view of a profile (no per-call layer).
    ///
    /// Unlike [`Registry::resolve`], looking up an unknown name here is a
    /// caller error.
    pub fn get(&self, name: &str) -> Result<ResolvedOptions> {
        if !self.contains(name) {
            return Err(Error::UnknownProfile(name.to_string()));
        }
        Ok(self.resolve(name, None))
    }

    /// Adds a new profile layer under `name`.
    pub fn add(&mut self, name: &str, layer: ProfileOptions) -> Result<()> {
        if self.contains(name) {
            return Err(Error::DuplicateProfile(name.to_string()));
        }
        self.profiles.insert(name.to_string(), layer);
        Ok(())
    }

    /// Removes a custom profile.
    pub fn remove(&mut self, name: &str) -> Result<()> {
        if !self.contains(name) {
            return Err(Error::UnknownProfile(name.to_string()));
        }
        if Self::is_built_in(name) {
            return Err(Error::ProtectedProfile(name.to_string()));
        }
        self.profiles.remove(name);
        Ok(())
    }

    /// Clears a custom profile's layer back to empty overrides.
    pub fn reset(&mut self, name: &str) -> Result<()> {
        if !self.contains(name) {
            return Err(Error::UnknownProfile(name.to_string()));
        }
        if Self::is_built_in(name) {
            return Err(Error::ProtectedProfile(name.to_string()));
        }
        self.profiles.insert(name.to_string(), ProfileOptions::default());
        Ok(())
    }

    /// Overlays the set keys of `layer` onto an existing profile.
    ///
    /// Built-in profiles may be configured; they only reject removal/reset.
    pub fn configure(&mut self, name: &str, layer: &ProfileOptions) -> Result<()> {
        let Some(existing) = self.profiles.get_mut(name) else {
            return Err(Error::UnknownProfile(name.to_string()));
        };
        existing.merge_layer(layer);
        Ok(())
    }

    /// Saves every custom (non-built-in) profile to a TOML file.
    ///
    /// Hooks are not persisted; they are runtime values.
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        let custom: BTreeMap<&String, &ProfileOptions> = self
            .profiles
            .iter()
            .filter(|(name, _)| !Self::is_built_in(name))
            .collect();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(&custom)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Loads custom profiles from a TOML file, adding each one.
    ///
    /// A file entry whose name collides with an existing profile is a
    /// duplicate-profile error, same as `add`.
    pub fn load_from_path(&mut self, path: &Path) -> Result<()> {
        let content = fs::read_to_string(path)?;
        let parsed: BTreeMap<String, ProfileOptions> = toml::from_str(&content)?;
        for (name, layer) in parsed {
            self.add(&name, layer)?;
        }
        Ok(())
    }
}
