//! Scene configuration - camera, actor placement, encounter tuning and the
//! dialog assets, loaded from TOML.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

use crate::entities::Vec2;
use crate::mechanics::PatrolRange;

const HERO_SPRITE: &str = "assets/stupidtownhero.png";

/// Errors raised while loading or validating a [`SceneConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// RGBA colour, each channel in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba(pub [f32; 4]);

impl Default for Rgba {
    fn default() -> Self {
        Self([0.9, 0.9, 0.9, 1.0])
    }
}

/// View onto the world: which region is shown and where on screen.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Camera {
    /// World-space center of the view.
    pub center: Vec2,
    /// World-space width of the view.
    pub width: f32,
    /// Screen viewport: origin x, origin y, width, height (pixels).
    pub viewport: [u32; 4],
    pub background: Rgba,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            center: Vec2::new(50.0, 37.5),
            width: 100.0,
            viewport: [0, 0, 640, 480],
            background: Rgba([0.8, 0.8, 0.8, 1.0]),
        }
    }
}

impl Camera {
    /// World-space height, following the viewport aspect ratio.
    pub fn height(&self) -> f32 {
        let [_, _, w, h] = self.viewport;
        if w == 0 {
            return 0.0;
        }
        self.width * h as f32 / w as f32
    }

    /// World-space point at the bottom-left of the view.
    pub fn origin(&self) -> Vec2 {
        self.center - Vec2::new(self.width, self.height()) * 0.5
    }
}

/// Visual style shared by every dialog's text box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextboxStyle {
    pub texture: String,
    pub size: Vec2,
    pub tint: Rgba,
}

impl Default for TextboxStyle {
    fn default() -> Self {
        Self {
            texture: "assets/TextboxStyle1.png".to_string(),
            size: Vec2::new(90.0, 25.0),
            tint: Rgba([0.0, 0.0, 0.0, 0.0]),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeroConfig {
    pub sprite: String,
    pub position: Vec2,
    pub size: Vec2,
    pub speed: f32,
}

impl Default for HeroConfig {
    fn default() -> Self {
        Self {
            sprite: HERO_SPRITE.to_string(),
            position: Vec2::new(35.0, 50.0),
            size: Vec2::new(9.0, 12.0),
            speed: 0.3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HostileConfig {
    pub sprite: String,
    pub position: Vec2,
    pub size: Vec2,
    pub speed: f32,
    pub front_dir: Vec2,
    pub animation_frames: u32,
    pub ticks_per_frame: u32,
}

impl Default for HostileConfig {
    fn default() -> Self {
        Self {
            sprite: HERO_SPRITE.to_string(),
            position: Vec2::new(80.0, 30.0),
            size: Vec2::new(9.0, 12.0),
            speed: 0.05,
            front_dir: Vec2::Y,
            animation_frames: 2,
            ticks_per_frame: 20,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatrolConfig {
    pub sprite: String,
    pub position: Vec2,
    pub size: Vec2,
    pub speed: f32,
    pub patrol_min_x: f32,
    pub patrol_max_x: f32,
}

impl Default for PatrolConfig {
    fn default() -> Self {
        Self {
            sprite: HERO_SPRITE.to_string(),
            position: Vec2::new(20.0, 20.0),
            size: Vec2::new(9.0, 12.0),
            speed: 0.1,
            patrol_min_x: 10.0,
            patrol_max_x: 40.0,
        }
    }
}

impl PatrolConfig {
    pub fn range(&self) -> PatrolRange {
        PatrolRange::new(self.patrol_min_x, self.patrol_max_x)
    }
}

/// Tuning for the encounter rules.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncounterConfig {
    /// Fraction of the remaining angle the hostile enemy turns per frame
    /// while pursuing (1.0 = snap to face the hero).
    pub turn_rate: f32,
}

impl Default for EncounterConfig {
    fn default() -> Self {
        Self { turn_rate: 1.0 }
    }
}

/// Script files, shared dialog resources and playback pacing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DialogAssets {
    /// Played on contact with the hostile enemy.
    pub hostile_script: PathBuf,
    /// Played on contact with the friendly character before the hostile one.
    pub friendly_script: PathBuf,
    /// Played on contact with the friendly character after the hostile one.
    pub final_script: PathBuf,
    pub default_scroll_audio: String,
    pub next_arrow: String,
    pub textbox: TextboxStyle,
    /// Graphemes revealed per frame.
    pub chars_per_tick: u32,
    /// Frames a fully revealed line stays up before turning the page by
    /// itself. `None` waits for the player.
    pub auto_advance_ticks: Option<u32>,
}

impl Default for DialogAssets {
    fn default() -> Self {
        Self {
            hostile_script: PathBuf::from("assets/dialog3.json"),
            friendly_script: PathBuf::from("assets/dialoggreen.json"),
            final_script: PathBuf::from("assets/dialoggreen2.json"),
            default_scroll_audio: "assets/sounds/beep.wav".to_string(),
            next_arrow: "assets/nextbutton.png".to_string(),
            textbox: TextboxStyle::default(),
            chars_per_tick: 1,
            auto_advance_ticks: Some(90),
        }
    }
}

/// Everything needed to build the scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SceneConfig {
    pub camera: Camera,
    /// Canvas clear colour.
    pub clear_color: Rgba,
    pub hero: HeroConfig,
    pub hostile: HostileConfig,
    pub friendly: PatrolConfig,
    pub encounter: EncounterConfig,
    pub dialog: DialogAssets,
}

impl SceneConfig {
    /// Parse a config from TOML text without validating it. Missing sections
    /// and keys take their default values.
    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Load a config file. Relative script paths are resolved against the
    /// directory containing the file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::from_toml_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        if let Some(base) = path.parent() {
            config.resolve_paths(base);
        }
        config.validate()?;

        info!(path = %path.display(), "loaded scene config");
        Ok(config)
    }

    /// Make relative script paths relative to `base`.
    pub fn resolve_paths(&mut self, base: &Path) {
        for script in [
            &mut self.dialog.hostile_script,
            &mut self.dialog.friendly_script,
            &mut self.dialog.final_script,
        ] {
            if script.is_relative() {
                *script = base.join(&*script);
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let sizes = [
            ("hero", self.hero.size),
            ("hostile", self.hostile.size),
            ("friendly", self.friendly.size),
        ];
        for (name, size) in sizes {
            if size.x <= 0.0 || size.y <= 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "{name} size must be positive, got ({}, {})",
                    size.x, size.y
                )));
            }
        }

        if !self.friendly.range().is_valid() {
            return Err(ConfigError::Invalid(format!(
                "friendly patrol range is empty: {}..{}",
                self.friendly.patrol_min_x, self.friendly.patrol_max_x
            )));
        }

        if !(0.0..=1.0).contains(&self.encounter.turn_rate) {
            return Err(ConfigError::Invalid(format!(
                "turn_rate must be within 0..=1, got {}",
                self.encounter.turn_rate
            )));
        }

        if self.camera.width <= 0.0 || self.camera.viewport[2] == 0 || self.camera.viewport[3] == 0 {
            return Err(ConfigError::Invalid("camera view must not be empty".to_string()));
        }

        if self.dialog.chars_per_tick == 0 {
            return Err(ConfigError::Invalid("chars_per_tick must be at least 1".to_string()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config_is_valid() {
        let config = SceneConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.dialog.textbox.size, Vec2::new(90.0, 25.0));
        assert_eq!(config.encounter.turn_rate, 1.0);
    }

    #[test]
    fn test_camera_height_follows_aspect() {
        let camera = Camera::default();
        assert!((camera.height() - 75.0).abs() < 1e-4);
        assert_eq!(camera.origin(), Vec2::new(0.0, 0.0));
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = SceneConfig::from_toml_str(
            r#"
            [hero]
            speed = 1.5

            [encounter]
            turn_rate = 0.25
            "#,
        )
        .unwrap();

        assert_eq!(config.hero.speed, 1.5);
        assert_eq!(config.hero.sprite, HERO_SPRITE);
        assert_eq!(config.encounter.turn_rate, 0.25);
        assert_eq!(config.friendly, PatrolConfig::default());
    }

    #[test]
    fn test_nested_vectors_parse() {
        let config = SceneConfig::from_toml_str(
            r#"
            [hostile]
            position = [1.0, 2.0]
            "#,
        )
        .unwrap();
        assert_eq!(config.hostile.position, Vec2::new(1.0, 2.0));
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let mut config = SceneConfig::default();
        config.encounter.turn_rate = 2.0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = SceneConfig::default();
        config.hostile.size = Vec2::ZERO;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = SceneConfig::default();
        config.friendly.patrol_max_x = config.friendly.patrol_min_x;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_load_resolves_script_paths() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scene.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "[dialog]\nhostile_script = \"scripts/red.json\"").unwrap();

        let config = SceneConfig::load(&path).unwrap();

        assert_eq!(config.dialog.hostile_script, dir.path().join("scripts/red.json"));
        assert_eq!(
            config.dialog.final_script,
            dir.path().join("assets/dialoggreen2.json")
        );
    }

    #[test]
    fn test_load_reports_missing_and_malformed_files() {
        let dir = tempfile::tempdir().unwrap();

        let missing = SceneConfig::load(dir.path().join("nope.toml"));
        assert!(matches!(missing, Err(ConfigError::Io { .. })));

        let path = dir.path().join("broken.toml");
        std::fs::write(&path, "[hero\nspeed = ").unwrap();
        assert!(matches!(SceneConfig::load(&path), Err(ConfigError::Parse { .. })));
    }
}
