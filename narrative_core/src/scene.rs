//! The playable scene: configuration, scripts and the encounter controller
//! wired together behind a per-frame `update` / `draw` pair.

use game_rules::{ConfigError, Hero, HostileEnemy, MoveInput, PatrolEnemy, SceneConfig};
use std::path::Path;
use std::rc::Rc;
use thiserror::Error;
use tracing::info;

use crate::assets::{AssetKind, AssetManifest};
use crate::dialog::{AudioCue, DialogContext, DialogError, DialogScript, DialogSequence};
use crate::encounter::{DialogSet, DialogSlot, EncounterController, Phase};
use crate::events::EncounterEvent;
use crate::render::Renderer;

/// Errors raised while building a [`Scene`].
#[derive(Debug, Error)]
pub enum SceneError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("{slot:?} dialog: {source}")]
    Dialog {
        slot: DialogSlot,
        #[source]
        source: DialogError,
    },
}

/// The three parsed scripts, one per dialog slot.
#[derive(Debug, Clone)]
pub struct SceneScripts {
    pub red: DialogScript,
    pub green: DialogScript,
    pub green_final: DialogScript,
}

impl SceneScripts {
    /// Load the scripts named in the config.
    pub fn load(config: &SceneConfig) -> Result<Self, SceneError> {
        let load = |slot: DialogSlot, path: &Path| {
            DialogScript::load(path).map_err(|source| SceneError::Dialog { slot, source })
        };
        Ok(Self {
            red: load(DialogSlot::Red, config.dialog.hostile_script.as_path())?,
            green: load(DialogSlot::Green, config.dialog.friendly_script.as_path())?,
            green_final: load(DialogSlot::GreenFinal, config.dialog.final_script.as_path())?,
        })
    }
}

#[derive(Debug)]
pub struct Scene {
    config: SceneConfig,
    assets: AssetManifest,
    controller: EncounterController<DialogSequence>,
}

impl Scene {
    /// Load config and scripts from disk.
    pub fn load(config_path: impl AsRef<Path>) -> Result<Self, SceneError> {
        let config = SceneConfig::load(config_path)?;
        let scripts = SceneScripts::load(&config)?;
        Self::new(config, scripts)
    }

    /// Build the scene from an already loaded config and scripts.
    pub fn new(config: SceneConfig, scripts: SceneScripts) -> Result<Self, SceneError> {
        config.validate()?;

        let assets = Self::collect_assets(&config, &scripts);
        let context = Rc::new(DialogContext::new(config.camera, &config.dialog));
        let sequence = |slot: DialogSlot, script: DialogScript| {
            DialogSequence::new(slot.as_str(), script, Rc::clone(&context))
                .map_err(|source| SceneError::Dialog { slot, source })
        };
        let dialogs = DialogSet::new(
            sequence(DialogSlot::Red, scripts.red)?,
            sequence(DialogSlot::Green, scripts.green)?,
            sequence(DialogSlot::GreenFinal, scripts.green_final)?,
        );

        let controller = EncounterController::new(
            Hero::from_config(&config.hero),
            HostileEnemy::from_config(&config.hostile),
            PatrolEnemy::from_config(&config.friendly),
            dialogs,
            config.encounter.turn_rate,
        );

        info!(assets = assets.len(), "scene ready");
        Ok(Self {
            config,
            assets,
            controller,
        })
    }

    fn collect_assets(config: &SceneConfig, scripts: &SceneScripts) -> AssetManifest {
        let mut assets = AssetManifest::new();
        for sprite in [&config.hero.sprite, &config.hostile.sprite, &config.friendly.sprite] {
            assets.insert(AssetKind::Texture, sprite.as_str());
        }
        assets.insert(AssetKind::Texture, config.dialog.next_arrow.as_str());
        assets.insert(AssetKind::Texture, config.dialog.textbox.texture.as_str());
        assets.insert(AssetKind::Audio, config.dialog.default_scroll_audio.as_str());
        for script in [
            &config.dialog.hostile_script,
            &config.dialog.friendly_script,
            &config.dialog.final_script,
        ] {
            assets.insert(AssetKind::Json, script.to_string_lossy());
        }
        for script in [&scripts.red, &scripts.green, &scripts.green_final] {
            assets.merge(script.assets());
        }
        assets
    }

    /// Everything the host must load before the first frame.
    pub fn required_assets(&self) -> &AssetManifest {
        &self.assets
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn controller(&self) -> &EncounterController<DialogSequence> {
        &self.controller
    }

    pub fn phase(&self) -> Phase {
        self.controller.phase()
    }

    /// Held movement keys; applied on the hero's next update.
    pub fn set_hero_input(&mut self, input: MoveInput) {
        self.controller.hero_mut().set_input(input);
    }

    pub fn advance_dialog(&mut self) {
        self.controller.advance_dialog();
    }

    pub fn dismiss_dialog(&mut self) -> Option<DialogSlot> {
        self.controller.dismiss_dialog()
    }

    pub fn take_audio_cues(&mut self) -> Vec<AudioCue> {
        self.controller.take_audio_cues()
    }

    /// Advance the scene by one frame. All state changes happen here.
    pub fn update(&mut self) -> Vec<EncounterEvent> {
        self.controller.update()
    }

    /// Draw the current frame. Reads state only.
    pub fn draw<R: Renderer + ?Sized>(&self, renderer: &mut R) {
        renderer.clear(self.config.clear_color);
        renderer.set_camera(&self.config.camera);
        self.controller.draw(renderer);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialog::{DialogPlayback, DialogView};
    use game_rules::{Actor, ActorRole, Camera, Rgba, Transform, Vec2};
    use std::path::PathBuf;

    fn script_json(speaker: &str, lines: &[&str]) -> String {
        let lines: Vec<String> = lines
            .iter()
            .map(|content| {
                format!(
                    r#"{{"SpritePath": "assets/{speaker}.png", "Name": "{speaker}", "NameFont": "fonts/name",
                        "Content": "{content}", "ContentFont": "fonts/body",
                        "LineAudio": "assets/sounds/{speaker}.wav"}}"#
                )
            })
            .collect();
        format!(r#"{{"DialogLine": [{}]}}"#, lines.join(","))
    }

    fn write_scene(dir: &Path) -> PathBuf {
        std::fs::create_dir_all(dir.join("scripts")).unwrap();
        std::fs::write(dir.join("scripts/red.json"), script_json("red", &["Go away.", "Now!"])).unwrap();
        std::fs::write(dir.join("scripts/green.json"), script_json("green", &["Beware the red one."])).unwrap();
        std::fs::write(dir.join("scripts/final.json"), script_json("green", &["You met it. It is gone."])).unwrap();

        let config = r#"
            [hero]
            position = [50.0, 50.0]
            size = [4.0, 4.0]
            speed = 1.0

            [hostile]
            position = [80.0, 50.0]
            size = [4.0, 4.0]

            [friendly]
            position = [20.0, 50.0]
            size = [4.0, 4.0]
            speed = 0.0
            patrol_min_x = 10.0
            patrol_max_x = 30.0

            [dialog]
            hostile_script = "scripts/red.json"
            friendly_script = "scripts/green.json"
            final_script = "scripts/final.json"
            chars_per_tick = 100
            auto_advance_ticks = 2
        "#;
        let path = dir.join("scene.toml");
        std::fs::write(&path, config).unwrap();
        path
    }

    fn walk(scene: &mut Scene, input: MoveInput, frames: usize) -> Vec<EncounterEvent> {
        scene.set_hero_input(input);
        let mut events = Vec::new();
        for _ in 0..frames {
            events.extend(scene.update());
        }
        scene.set_hero_input(MoveInput::none());
        events
    }

    fn teleport_hero(scene: &mut Scene, at: Vec2) {
        scene.controller.hero_mut().transform_mut().position = at;
    }

    #[test]
    fn test_load_scene_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let scene = Scene::load(write_scene(dir.path())).unwrap();

        assert_eq!(scene.phase(), Phase::Idle);
        assert_eq!(scene.controller().dialogs().red.line_count(), 2);
        assert_eq!(scene.controller().hero().position(), Vec2::new(50.0, 50.0));
    }

    #[test]
    fn test_required_assets() {
        let dir = tempfile::tempdir().unwrap();
        let scene = Scene::load(write_scene(dir.path())).unwrap();
        let assets = scene.required_assets();

        assert!(assets.contains(AssetKind::Texture, "assets/stupidtownhero.png"));
        assert!(assets.contains(AssetKind::Texture, "assets/nextbutton.png"));
        assert!(assets.contains(AssetKind::Texture, "assets/TextboxStyle1.png"));
        assert!(assets.contains(AssetKind::Texture, "assets/red.png"));
        assert!(assets.contains(AssetKind::Texture, "assets/green.png"));
        assert!(assets.contains(AssetKind::Audio, "assets/sounds/beep.wav"));
        assert!(assets.contains(AssetKind::Audio, "assets/sounds/red.wav"));
        assert!(assets.contains(AssetKind::Font, "fonts/body"));
        assert_eq!(assets.paths(AssetKind::Json).len(), 3);
    }

    #[test]
    fn test_missing_script_names_slot() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_scene(dir.path());
        std::fs::remove_file(dir.path().join("scripts/green.json")).unwrap();

        let result = Scene::load(path);
        assert!(matches!(
            result,
            Err(SceneError::Dialog {
                slot: DialogSlot::Green,
                source: DialogError::Io { .. }
            })
        ));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = SceneConfig::load(write_scene(dir.path())).unwrap();
        let scripts = SceneScripts::load(&config).unwrap();
        config.encounter.turn_rate = -1.0;

        assert!(matches!(
            Scene::new(config, scripts),
            Err(SceneError::Config(ConfigError::Invalid(_)))
        ));
    }

    #[test]
    fn test_full_playthrough() {
        let dir = tempfile::tempdir().unwrap();
        let mut scene = Scene::load(write_scene(dir.path())).unwrap();
        let right = MoveInput {
            right: true,
            ..Default::default()
        };
        let left = MoveInput {
            left: true,
            ..Default::default()
        };

        // Walk right into the red enemy; the walk stops as soon as dialog starts.
        let events = walk(&mut scene, right, 30);
        assert!(scene.controller().state().touched_evil());
        assert!(events.contains(&EncounterEvent::DialogStarted(DialogSlot::Red)));
        assert_eq!(scene.phase(), Phase::Dialog(DialogSlot::Red));
        let frozen_at = scene.controller().hero().position();
        assert!(frozen_at.x < 80.0);

        // Read through both pages.
        scene.advance_dialog();
        scene.advance_dialog();
        assert_eq!(scene.controller().dialogs().red.cursor(), 1);
        scene.dismiss_dialog();
        assert_eq!(scene.phase(), Phase::Idle);

        // Step away and go talk to the green character.
        teleport_hero(&mut scene, Vec2::new(50.0, 20.0));
        let events = scene.update();
        assert!(events.contains(&EncounterEvent::DialogFinished(DialogSlot::Red)));
        teleport_hero(&mut scene, Vec2::new(20.0, 50.0));
        let events = scene.update();
        assert!(events.contains(&EncounterEvent::HostileVanquished));
        assert_eq!(scene.phase(), Phase::Dialog(DialogSlot::GreenFinal));
        assert!(scene.controller().hostile().is_alive());

        // Leave while the final dialog plays itself out.
        teleport_hero(&mut scene, Vec2::new(50.0, 20.0));
        let events = walk(&mut scene, left, 10);
        assert!(events.contains(&EncounterEvent::DialogFinished(DialogSlot::GreenFinal)));
        assert!(events
            .iter()
            .any(|e| matches!(e, EncounterEvent::HostileRemoved { .. })));
        assert!(!scene.controller().hostile().is_alive());
        assert!(scene.controller().active_dialog_count() == 0);

        let cues = scene.take_audio_cues();
        assert!(cues.iter().any(|c| c.path == "assets/sounds/red.wav"));
        assert!(cues.iter().any(|c| c.path == "assets/sounds/beep.wav"));
    }

    #[derive(Default)]
    struct Recorder {
        calls: Vec<String>,
    }

    impl Renderer for Recorder {
        fn clear(&mut self, _color: Rgba) {
            self.calls.push("clear".to_string());
        }

        fn set_camera(&mut self, camera: &Camera) {
            self.calls.push(format!("camera {}", camera.width));
        }

        fn draw_sprite(&mut self, role: ActorRole, _sprite: &str, _transform: &Transform) {
            self.calls.push(format!("{role:?}"));
        }

        fn draw_dialog(&mut self, view: &DialogView<'_>) {
            self.calls.push(format!("dialog {}: {}", view.speaker, view.text));
        }
    }

    #[test]
    fn test_draw_is_read_only() {
        let dir = tempfile::tempdir().unwrap();
        let mut scene = Scene::load(write_scene(dir.path())).unwrap();
        teleport_hero(&mut scene, Vec2::new(20.0, 50.0));
        scene.update();

        let before = scene.controller().dialogs().green.visible_text().to_string();
        let mut first = Recorder::default();
        let mut second = Recorder::default();
        scene.draw(&mut first);
        scene.draw(&mut second);

        assert_eq!(first.calls, second.calls);
        assert_eq!(scene.controller().dialogs().green.visible_text(), before);
        assert_eq!(
            first.calls,
            vec![
                "clear".to_string(),
                "camera 100".to_string(),
                "Hero".to_string(),
                "Friendly".to_string(),
                "Hostile".to_string(),
                "dialog green: Beware the red one.".to_string(),
            ]
        );
        assert!(scene.controller().dialogs().green.is_active());
    }
}
