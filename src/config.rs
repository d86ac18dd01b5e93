//! Editor configuration parsed from environment variables.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use crate::doc::ShapeStyle;
use crate::history::DEFAULT_HISTORY_LIMIT;
use crate::input::PrimaryModifier;

pub const DEFAULT_WHEEL_ZOOM_SPEED: f64 = 0.001;
pub const DEFAULT_STORAGE_KEY: &str = "shapeboard-state";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid SHAPEBOARD_PRIMARY_MODIFIER `{0}` (expected `ctrl` or `meta`)")]
    InvalidPrimaryModifier(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct EditorConfig {
    /// Zoom delta applied per pixel of vertical wheel travel.
    pub wheel_zoom_speed: f64,
    /// Maximum undo depth; zero keeps everything.
    pub history_limit: usize,
    /// Modifier that drives the undo/redo shortcuts.
    pub primary_modifier: PrimaryModifier,
    /// Key under which browser storage keeps the board.
    pub storage_key: String,
    /// Paint attributes for newly created shapes.
    pub style: ShapeStyle,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            wheel_zoom_speed: DEFAULT_WHEEL_ZOOM_SPEED,
            history_limit: DEFAULT_HISTORY_LIMIT,
            primary_modifier: PrimaryModifier::default(),
            storage_key: DEFAULT_STORAGE_KEY.to_owned(),
            style: ShapeStyle::default(),
        }
    }
}

impl EditorConfig {
    /// Build config from environment variables.
    ///
    /// Optional:
    /// - `SHAPEBOARD_WHEEL_ZOOM_SPEED`: default 0.001
    /// - `SHAPEBOARD_HISTORY_LIMIT`: default 100, `0` = unlimited
    /// - `SHAPEBOARD_PRIMARY_MODIFIER`: `ctrl` (default) or `meta`
    /// - `SHAPEBOARD_STORAGE_KEY`: default `shapeboard-state`
    ///
    /// # Errors
    ///
    /// Returns `InvalidPrimaryModifier` for an unknown modifier name.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| match std::env::var(key) {
            Ok(v) => Some(v),
            Err(_) => None,
        })
    }

    /// Build config from an arbitrary variable lookup.
    ///
    /// Malformed numbers fall back to their defaults.
    ///
    /// # Errors
    ///
    /// Returns `InvalidPrimaryModifier` for an unknown modifier name.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let wheel_zoom_speed = parse_var::<f64>(lookup("SHAPEBOARD_WHEEL_ZOOM_SPEED"))
            .filter(|v| v.is_finite() && *v > 0.0)
            .unwrap_or(DEFAULT_WHEEL_ZOOM_SPEED);
        let history_limit = parse_var::<usize>(lookup("SHAPEBOARD_HISTORY_LIMIT")).unwrap_or(DEFAULT_HISTORY_LIMIT);
        let primary_modifier = parse_primary_modifier(lookup("SHAPEBOARD_PRIMARY_MODIFIER").as_deref())?;
        let storage_key = lookup("SHAPEBOARD_STORAGE_KEY")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_STORAGE_KEY.to_owned());

        Ok(Self { wheel_zoom_speed, history_limit, primary_modifier, storage_key, style: ShapeStyle::default() })
    }
}

fn parse_var<T: std::str::FromStr>(raw: Option<String>) -> Option<T> {
    match raw?.trim().parse::<T>() {
        Ok(v) => Some(v),
        Err(_) => None,
    }
}

fn parse_primary_modifier(raw: Option<&str>) -> Result<PrimaryModifier, ConfigError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(PrimaryModifier::default()),
        Some(v) if v.eq_ignore_ascii_case("ctrl") || v.eq_ignore_ascii_case("control") => Ok(PrimaryModifier::Ctrl),
        Some(v) if v.eq_ignore_ascii_case("meta") || v.eq_ignore_ascii_case("cmd") => Ok(PrimaryModifier::Meta),
        Some(v) => Err(ConfigError::InvalidPrimaryModifier(v.to_owned())),
    }
}
