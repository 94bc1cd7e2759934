//! TOML-based configuration persistence for the input runtime.
//!
//! Reads and writes `AppConfig` to the platform-appropriate config file:
//! - Windows:  `%APPDATA%\XrInput\config.toml`
//! - Linux:    `~/.config/xrinput/config.toml`
//! - macOS:    `~/Library/Application Support/XrInput/config.toml`
//!
//! A different file can be given explicitly with [`load_config_from`].
//!
//! # Example
//!
//! ```toml
//! [runtime]
//! frame_rate_hz = 90
//! log_level = "info"
//!
//! [dispatch]
//! orientation_mode = "quaternion"
//!
//! [dispatch.tolerance]
//! float = 0.01
//!
//! [[controllers]]
//! source_id = "6f1c3a52-0d9e-4c59-9a38-0a8c3a5f2b11"
//! name = "left wand"
//! handedness = "left"
//! # node = "left_hand"  (defaults from handedness)
//!
//! [[controllers.mappings]]
//! kind = "spatial-pointer"
//! action = 1
//! ```
//!
//! # Serde default values
//!
//! Fields annotated with `#[serde(default = "some_fn")]` take the value of
//! `some_fn()` when absent, so a partial file (or none at all) still yields a
//! complete configuration.

use std::path::{Path, PathBuf};

use glam::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;
use xr_input_core::{
    ActionId, CapabilityKind, ChangeTolerance, Handedness, OrientationMode, ParentTransform,
    TrackedNode, TrackingState,
};

use crate::application::build_registry::{ControllerProfile, MappingProfile};
use crate::application::dispatch::DispatchSettings;

/// Error type for configuration file operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The platform config directory could not be determined.
    #[error("could not determine platform config directory")]
    NoPlatformConfigDir,

    /// A file system I/O error occurred.
    #[error("I/O error accessing config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML content could not be parsed.
    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// The config could not be serialized to TOML.
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

// ── Config schema types ───────────────────────────────────────────────────────

/// Top-level runtime configuration stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub runtime: RuntimeConfig,
    #[serde(default)]
    pub dispatch: DispatchConfig,
    /// Rig transform; absent means poses stay device-local.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub playspace: Option<PlayspaceConfig>,
    /// Recording to replay; absent means run with an idle source.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replay: Option<ReplayConfig>,
    #[serde(default = "default_controllers")]
    pub controllers: Vec<ControllerEntry>,
}

/// Frame loop and logging settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RuntimeConfig {
    /// Schema version string – bump when breaking changes are introduced.
    #[serde(default = "default_version")]
    pub version: String,
    /// Frames dispatched per second.
    #[serde(default = "default_frame_rate_hz")]
    pub frame_rate_hz: u32,
    /// `tracing` log level: `"error"`, `"warn"`, `"info"`, `"debug"`, `"trace"`.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// Change detection and coordinate conversion settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct DispatchConfig {
    #[serde(default)]
    pub orientation_mode: OrientationMode,
    #[serde(default)]
    pub tolerance: ChangeTolerance,
}

/// World transform of the playspace rig.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlayspaceConfig {
    #[serde(default)]
    pub position: [f32; 3],
    /// Euler angles in degrees, `[x, y, z]`.
    #[serde(default)]
    pub rotation_degrees: [f32; 3],
    #[serde(default = "default_scale")]
    pub scale: [f32; 3],
}

/// Recording playback settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReplayConfig {
    pub path: PathBuf,
    /// Restart from the first frame when the recording ends.
    #[serde(default)]
    pub looping: bool,
}

/// Persisted profile of one controller.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ControllerEntry {
    /// UUID identifying the controller to event consumers.
    pub source_id: Uuid,
    /// Display name used in logs.
    pub name: String,
    pub handedness: Handedness,
    /// Tracked node this controller reads; defaults from `handedness`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node: Option<TrackedNode>,
    #[serde(default)]
    pub initial_tracking: TrackingState,
    /// Capability mappings, in dispatch order.
    #[serde(default)]
    pub mappings: Vec<MappingEntry>,
}

/// One capability → action binding.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MappingEntry {
    /// Kebab-case capability name, e.g. `"spatial-pointer"`.
    pub kind: CapabilityKind,
    pub action: ActionId,
}

// ── Default helpers ───────────────────────────────────────────────────────────

fn default_version() -> String {
    "1.0".to_string()
}
fn default_frame_rate_hz() -> u32 {
    90
}
fn default_log_level() -> String {
    "info".to_string()
}
fn default_scale() -> [f32; 3] {
    [1.0, 1.0, 1.0]
}
fn default_controllers() -> Vec<ControllerEntry> {
    vec![
        ControllerEntry::generic(Uuid::from_u128(1), "left controller", Handedness::Left),
        ControllerEntry::generic(Uuid::from_u128(2), "right controller", Handedness::Right),
    ]
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            runtime: RuntimeConfig::default(),
            dispatch: DispatchConfig::default(),
            playspace: None,
            replay: None,
            controllers: default_controllers(),
        }
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            frame_rate_hz: default_frame_rate_hz(),
            log_level: default_log_level(),
        }
    }
}

impl Default for PlayspaceConfig {
    fn default() -> Self {
        Self {
            position: [0.0; 3],
            rotation_degrees: [0.0; 3],
            scale: default_scale(),
        }
    }
}

// ── Conversions ───────────────────────────────────────────────────────────────

impl DispatchConfig {
    pub fn settings(&self) -> DispatchSettings {
        DispatchSettings {
            orientation_mode: self.orientation_mode,
            tolerance: self.tolerance,
        }
    }
}

impl PlayspaceConfig {
    pub fn transform(&self) -> ParentTransform {
        ParentTransform::from_euler_degrees(
            Vec3::from_array(self.position),
            Vec3::from_array(self.rotation_degrees),
            Vec3::from_array(self.scale),
        )
    }
}

impl ControllerEntry {
    /// A hand controller with every common capability bound to actions 1..=11.
    pub fn generic(source_id: Uuid, name: &str, handedness: Handedness) -> Self {
        let kinds = [
            CapabilityKind::SpatialPointer,
            CapabilityKind::SpatialGrip,
            CapabilityKind::Select,
            CapabilityKind::Trigger,
            CapabilityKind::GripPress,
            CapabilityKind::Thumbstick,
            CapabilityKind::ThumbstickPress,
            CapabilityKind::Touchpad,
            CapabilityKind::TouchpadTouch,
            CapabilityKind::TouchpadPress,
            CapabilityKind::Menu,
        ];
        Self {
            source_id,
            name: name.to_string(),
            handedness,
            node: None,
            initial_tracking: TrackingState::NotTracked,
            mappings: kinds
                .into_iter()
                .zip(1..)
                .map(|(kind, id)| MappingEntry {
                    kind,
                    action: ActionId(id),
                })
                .collect(),
        }
    }

    pub fn profile(&self) -> ControllerProfile {
        ControllerProfile {
            source_id: self.source_id,
            name: self.name.clone(),
            handedness: self.handedness,
            node: self.node,
            initial_tracking: self.initial_tracking,
            mappings: self
                .mappings
                .iter()
                .map(|m| MappingProfile {
                    kind: m.kind.clone(),
                    action: m.action,
                })
                .collect(),
        }
    }
}

// ── Config repository ─────────────────────────────────────────────────────────

/// Determines the platform-appropriate directory for the config file.
///
/// # Errors
///
/// Returns [`ConfigError::NoPlatformConfigDir`] when the platform config base
/// directory cannot be determined from the environment.
pub fn config_dir() -> Result<PathBuf, ConfigError> {
    platform_config_dir().ok_or(ConfigError::NoPlatformConfigDir)
}

/// Resolves the full path to the config file.
///
/// # Errors
///
/// Returns [`ConfigError::NoPlatformConfigDir`] if the base directory cannot be
/// determined.
pub fn config_file_path() -> Result<PathBuf, ConfigError> {
    Ok(config_dir()?.join("config.toml"))
}

/// Loads `AppConfig` from the platform config file, returning
/// `AppConfig::default()` if the file does not yet exist.
///
/// # Errors
///
/// See [`load_config_from`].
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from(&config_file_path()?)
}

/// Loads `AppConfig` from `path`, returning `AppConfig::default()` if the
/// file does not exist.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] for file-system errors other than "not found",
/// and [`ConfigError::Parse`] if the TOML is malformed.
pub fn load_config_from(path: &Path) -> Result<AppConfig, ConfigError> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(toml::from_str(&content)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(AppConfig::default()),
        Err(e) => Err(ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}

/// Persists `config` to `path`, creating parent directories as needed.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] for file-system failures or
/// [`ConfigError::Serialize`] if serialization fails.
pub fn save_config_to(config: &AppConfig, path: &Path) -> Result<(), ConfigError> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).map_err(|source| ConfigError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
    }

    let content = toml::to_string_pretty(config)?;
    std::fs::write(path, content).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Resolves the platform config directory, including the `XrInput` subdirectory.
fn platform_config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        std::env::var_os("APPDATA").map(|p| PathBuf::from(p).join("XrInput"))
    }

    #[cfg(target_os = "linux")]
    {
        let base = std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))?;
        Some(base.join("xrinput"))
    }

    #[cfg(target_os = "macos")]
    {
        std::env::var_os("HOME")
            .map(|h| PathBuf::from(h).join("Library").join("Application Support").join("XrInput"))
    }

    #[cfg(not(any(target_os = "windows", target_os = "linux", target_os = "macos")))]
    {
        None
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(label: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("xr-input-config-{label}-{}", Uuid::new_v4()))
            .join("config.toml")
    }

    // ── Defaults ──────────────────────────────────────────────────────────────

    #[test]
    fn test_default_runtime_settings() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.runtime.frame_rate_hz, 90);
        assert_eq!(cfg.runtime.log_level, "info");
        assert_eq!(cfg.dispatch.orientation_mode, OrientationMode::LegacyEuler);
        assert_eq!(cfg.dispatch.tolerance, ChangeTolerance::EXACT);
    }

    #[test]
    fn test_default_config_has_one_controller_per_hand() {
        let cfg = AppConfig::default();
        let hands: Vec<_> = cfg.controllers.iter().map(|c| c.handedness).collect();
        assert_eq!(hands, vec![Handedness::Left, Handedness::Right]);
        assert_eq!(cfg.controllers[0].mappings.len(), 11);
    }

    #[test]
    fn test_empty_toml_yields_defaults() {
        let cfg: AppConfig = toml::from_str("").unwrap();
        assert_eq!(cfg, AppConfig::default());
    }

    // ── Parsing ───────────────────────────────────────────────────────────────

    #[test]
    fn test_parses_controllers_playspace_and_tolerance() {
        // Arrange
        let text = r#"
            [runtime]
            frame_rate_hz = 72

            [dispatch]
            orientation_mode = "quaternion"

            [dispatch.tolerance]
            float = 0.05

            [playspace]
            position = [0.0, 1.5, 0.0]
            rotation_degrees = [0.0, 90.0, 0.0]

            [replay]
            path = "session.xris"
            looping = true

            [[controllers]]
            source_id = "6f1c3a52-0d9e-4c59-9a38-0a8c3a5f2b11"
            name = "wand"
            handedness = "right"

            [[controllers.mappings]]
            kind = "trigger-press"
            action = 4

            [[controllers.mappings]]
            kind = "eye-gaze"
            action = 5
        "#;

        // Act
        let cfg: AppConfig = toml::from_str(text).unwrap();

        // Assert
        assert_eq!(cfg.runtime.frame_rate_hz, 72);
        assert_eq!(cfg.runtime.log_level, "info");
        assert_eq!(cfg.dispatch.orientation_mode, OrientationMode::Quaternion);
        assert_eq!(cfg.dispatch.tolerance.float, 0.05);
        assert_eq!(cfg.dispatch.tolerance.axis, 0.0);
        assert_eq!(cfg.playspace.as_ref().map(|p| p.scale), Some([1.0, 1.0, 1.0]));
        assert_eq!(cfg.replay.as_ref().map(|r| r.looping), Some(true));
        assert_eq!(cfg.controllers.len(), 1);
        let mappings = &cfg.controllers[0].mappings;
        assert_eq!(mappings[0].kind, CapabilityKind::TriggerPress);
        assert_eq!(mappings[0].action, ActionId(4));
        assert_eq!(mappings[1].kind, CapabilityKind::Unrecognized("eye-gaze".to_string()));
        assert_eq!(cfg.controllers[0].initial_tracking, TrackingState::NotTracked);
        assert_eq!(cfg.controllers[0].node, None);
    }

    #[test]
    fn test_parses_explicit_controller_node() {
        let text = r#"
            [[controllers]]
            source_id = "6f1c3a52-0d9e-4c59-9a38-0a8c3a5f2b11"
            name = "waist puck"
            handedness = "other"
            node = "game_controller"
        "#;

        let cfg: AppConfig = toml::from_str(text).unwrap();

        assert_eq!(cfg.controllers[0].node, Some(TrackedNode::GameController));
        assert_eq!(cfg.controllers[0].profile().node, Some(TrackedNode::GameController));
    }

    #[test]
    fn test_unknown_handedness_is_a_parse_error() {
        let text = r#"
            [[controllers]]
            source_id = "6f1c3a52-0d9e-4c59-9a38-0a8c3a5f2b11"
            name = "wand"
            handedness = "both"
        "#;
        assert!(toml::from_str::<AppConfig>(text).is_err());
    }

    #[test]
    fn test_playspace_transform_uses_euler_degrees() {
        let cfg = PlayspaceConfig {
            rotation_degrees: [0.0, 90.0, 0.0],
            ..Default::default()
        };
        let t = cfg.transform();
        assert!(t.transform_direction(Vec3::X).abs_diff_eq(Vec3::NEG_Z, 1e-5));
    }

    #[test]
    fn test_entry_profile_keeps_mapping_order() {
        let entry = ControllerEntry::generic(Uuid::from_u128(9), "wand", Handedness::Left);
        let profile = entry.profile();
        assert_eq!(profile.mappings.len(), entry.mappings.len());
        assert_eq!(profile.mappings[0].kind, CapabilityKind::SpatialPointer);
        assert_eq!(profile.mappings[10].action, ActionId(11));
    }

    // ── File round-trip ───────────────────────────────────────────────────────

    #[test]
    fn test_save_then_load_round_trips() {
        // Arrange
        let path = temp_path("roundtrip");
        let mut cfg = AppConfig::default();
        cfg.runtime.frame_rate_hz = 120;
        cfg.playspace = Some(PlayspaceConfig::default());

        // Act
        save_config_to(&cfg, &path).unwrap();
        let restored = load_config_from(&path).unwrap();
        if let Some(dir) = path.parent() {
            let _ = std::fs::remove_dir_all(dir);
        }

        // Assert
        assert_eq!(restored, cfg);
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let cfg = load_config_from(&temp_path("missing")).unwrap();
        assert_eq!(cfg, AppConfig::default());
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        let path = temp_path("malformed");
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir).unwrap();
        }
        std::fs::write(&path, "[runtime\nframe_rate_hz = ").unwrap();

        let result = load_config_from(&path);
        if let Some(dir) = path.parent() {
            let _ = std::fs::remove_dir_all(dir);
        }

        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }
}
