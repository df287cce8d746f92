//! Dialog scripts as authored in JSON.
//!
//! ```json
//! { "DialogLine": [
//!     { "SpritePath": "assets/red.png", "Name": "Red", "NameFont": "fonts/name",
//!       "Content": "Stay back!", "ContentFont": "fonts/body",
//!       "ScrollAudio": "assets/sounds/growl.wav", "LineAudio": "assets/sounds/red1.wav" }
//! ] }
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

use super::DialogError;
use crate::assets::{AssetKind, AssetManifest};

/// One page of dialog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DialogLine {
    /// Portrait shown next to the text.
    pub sprite_path: String,
    /// Speaker name.
    #[serde(default)]
    pub name: String,
    pub name_font: String,
    #[serde(default)]
    pub content: String,
    pub content_font: String,
    /// Replaces the scene's default scroll beep for this line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scroll_audio: Option<String>,
    /// Played once when the line appears.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_audio: Option<String>,
}

/// An ordered list of dialog lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DialogScript {
    #[serde(rename = "DialogLine")]
    pub lines: Vec<DialogLine>,
}

impl DialogScript {
    pub fn from_json_str(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Read and parse a script file. A script without lines is rejected.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DialogError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| DialogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let script = Self::from_json_str(&text).map_err(|source| DialogError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        if script.lines.is_empty() {
            return Err(DialogError::EmptyScript);
        }

        debug!(path = %path.display(), lines = script.lines.len(), "loaded dialog script");
        Ok(script)
    }

    /// Every resource referenced by every line.
    pub fn assets(&self) -> AssetManifest {
        let mut manifest = AssetManifest::new();
        for line in &self.lines {
            manifest.insert(AssetKind::Texture, line.sprite_path.as_str());
            manifest.insert(AssetKind::Font, line.name_font.as_str());
            manifest.insert(AssetKind::Font, line.content_font.as_str());
            if let Some(audio) = &line.scroll_audio {
                manifest.insert(AssetKind::Audio, audio.as_str());
            }
            if let Some(audio) = &line.line_audio {
                manifest.insert(AssetKind::Audio, audio.as_str());
            }
        }
        manifest
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCRIPT: &str = r#"{
        "DialogLine": [
            {
                "SpritePath": "assets/red.png",
                "Name": "Red",
                "NameFont": "fonts/name",
                "Content": "Stay back!",
                "ContentFont": "fonts/body",
                "LineAudio": "assets/sounds/red1.wav"
            },
            {
                "SpritePath": "assets/hero.png",
                "Name": "Hero",
                "NameFont": "fonts/name",
                "Content": "Never.",
                "ContentFont": "fonts/italic",
                "ScrollAudio": "assets/sounds/blip.wav"
            }
        ]
    }"#;

    #[test]
    fn test_parse_script() {
        let script = DialogScript::from_json_str(SCRIPT).unwrap();
        assert_eq!(script.lines.len(), 2);
        assert_eq!(script.lines[0].name, "Red");
        assert_eq!(script.lines[0].scroll_audio, None);
        assert_eq!(script.lines[1].scroll_audio.as_deref(), Some("assets/sounds/blip.wav"));
    }

    #[test]
    fn test_missing_required_field_fails() {
        let result = DialogScript::from_json_str(r#"{"DialogLine": [{"Name": "x"}]}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_assets_cover_every_line() {
        let script = DialogScript::from_json_str(SCRIPT).unwrap();
        let assets = script.assets();

        assert_eq!(
            assets.paths(AssetKind::Texture),
            vec!["assets/hero.png", "assets/red.png"]
        );
        assert_eq!(
            assets.paths(AssetKind::Font),
            vec!["fonts/body", "fonts/italic", "fonts/name"]
        );
        assert_eq!(
            assets.paths(AssetKind::Audio),
            vec!["assets/sounds/blip.wav", "assets/sounds/red1.wav"]
        );
    }

    #[test]
    fn test_load_rejects_empty_and_missing() {
        let dir = tempfile::tempdir().unwrap();

        let empty = dir.path().join("empty.json");
        std::fs::write(&empty, r#"{"DialogLine": []}"#).unwrap();
        assert!(matches!(DialogScript::load(&empty), Err(DialogError::EmptyScript)));

        let missing = dir.path().join("missing.json");
        assert!(matches!(DialogScript::load(&missing), Err(DialogError::Io { .. })));

        let broken = dir.path().join("broken.json");
        std::fs::write(&broken, "{").unwrap();
        assert!(matches!(DialogScript::load(&broken), Err(DialogError::Parse { .. })));
    }

    #[test]
    fn test_load_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("red.json");
        std::fs::write(&path, SCRIPT).unwrap();

        let script = DialogScript::load(&path).unwrap();
        assert_eq!(script.lines[1].content, "Never.");
    }
}
