use serde::Deserialize;

use super::error::ViewerError;
use crate::support::first_filled;

/// Parsed `scene.json` descriptor.
///
/// Optional fields are tolerated throughout; only `model.url` is required.
/// Legacy descriptors carry their poster/title data under `ui.welcome`
/// instead of `meta`, so the `resolved_*` accessors walk both.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneDescriptor {
    pub model: Option<ModelConfig>,
    #[serde(default)]
    pub animations: Vec<String>,
    #[serde(default)]
    pub meta: MetaConfig,
    pub audio: Option<AudioConfig>,
    #[serde(default)]
    pub ui: UiConfig,
    pub environment_image: Option<String>,
    pub exposure: Option<f64>,
    #[serde(default)]
    pub clickable_nodes: Vec<ClickableNode>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelConfig {
    pub url: String,
    pub usdz_url: Option<String>,
    pub y_offset: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetaConfig {
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub body: Option<String>,
    pub description: Option<String>,
    pub poster_image: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UiConfig {
    #[serde(default)]
    pub welcome: WelcomeConfig,
}

/// Legacy welcome-screen block (`ui.welcome`), kept as a fallback source
/// for the `meta` fields.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WelcomeConfig {
    pub title: Option<String>,
    pub eyebrow: Option<String>,
    pub desc: Option<String>,
    pub poster: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioConfig {
    pub url: String,
    #[serde(rename = "loop", default)]
    pub looping: bool,
    pub volume: Option<f32>,
    pub delay_seconds: Option<f64>,
}

impl AudioConfig {
    pub const DEFAULT_VOLUME: f32 = 0.8;

    pub fn effective_volume(&self) -> f32 {
        self.volume.unwrap_or(Self::DEFAULT_VOLUME)
    }

    pub fn delay_seconds(&self) -> f64 {
        self.delay_seconds.unwrap_or(0.0).max(0.0)
    }
}

/// A clickable link node with a world-space position.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClickableNode {
    pub label: Option<String>,
    pub url: Option<String>,
    pub position: Option<NodePosition>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct NodePosition {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// A named animation clip exposed by the loaded model.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationClip {
    pub name: String,
    pub duration_secs: f64,
}

impl SceneDescriptor {
    /// A descriptor without a model reference cannot be viewed at all.
    pub fn validate(&self) -> Result<(), ViewerError> {
        match &self.model {
            Some(model) if !model.url.trim().is_empty() => Ok(()),
            _ => Err(ViewerError::Config(
                "no model reference in scene descriptor".into(),
            )),
        }
    }

    pub fn has_audio(&self) -> bool {
        self.audio
            .as_ref()
            .map(|a| !a.url.trim().is_empty())
            .unwrap_or(false)
    }

    pub fn resolved_title(&self) -> &str {
        first_filled(&[
            self.meta.title.as_deref(),
            self.ui.welcome.title.as_deref(),
        ])
        .unwrap_or("3D / AR experience")
    }

    pub fn resolved_subtitle(&self) -> &str {
        first_filled(&[
            self.meta.subtitle.as_deref(),
            self.ui.welcome.eyebrow.as_deref(),
        ])
        .unwrap_or("")
    }

    pub fn resolved_body(&self) -> &str {
        first_filled(&[
            self.meta.body.as_deref(),
            self.meta.description.as_deref(),
            self.ui.welcome.desc.as_deref(),
        ])
        .unwrap_or("Tap START AR to see the model in your environment.")
    }

    pub fn resolved_poster(&self) -> Option<&str> {
        first_filled(&[
            self.meta.poster_image.as_deref(),
            self.ui.welcome.poster.as_deref(),
        ])
    }

    /// Clickable nodes that carry both a link and a usable position;
    /// entries missing either are skipped.
    pub fn usable_clickable_nodes(&self) -> impl Iterator<Item = &ClickableNode> {
        self.clickable_nodes
            .iter()
            .filter(|node| node.url.is_some() && node.position.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> SceneDescriptor {
        serde_json::from_str(json).expect("descriptor should parse")
    }

    #[test]
    fn minimal_descriptor_parses_with_defaults() {
        let desc = parse(r#"{ "model": { "url": "toy.glb" } }"#);
        desc.validate().unwrap();
        assert!(desc.animations.is_empty());
        assert!(!desc.has_audio());
        assert_eq!(desc.resolved_title(), "3D / AR experience");
        assert!(desc.resolved_poster().is_none());
    }

    #[test]
    fn missing_model_is_a_config_error() {
        let desc = parse(r#"{ "meta": { "title": "x" } }"#);
        assert!(matches!(desc.validate(), Err(ViewerError::Config(_))));

        let desc = parse(r#"{ "model": { "url": "  " } }"#);
        assert!(matches!(desc.validate(), Err(ViewerError::Config(_))));
    }

    #[test]
    fn audio_defaults_apply() {
        let desc = parse(r#"{ "model": { "url": "a.glb" }, "audio": { "url": "track.mp3" } }"#);
        let audio = desc.audio.as_ref().unwrap();
        assert!(!audio.looping);
        assert_eq!(audio.effective_volume(), AudioConfig::DEFAULT_VOLUME);
        assert_eq!(audio.delay_seconds(), 0.0);
        assert!(desc.has_audio());
    }

    #[test]
    fn audio_fields_parse() {
        let desc = parse(
            r#"{ "model": { "url": "a.glb" },
                 "audio": { "url": "t.mp3", "loop": true, "volume": 0.5, "delaySeconds": 2.5 } }"#,
        );
        let audio = desc.audio.as_ref().unwrap();
        assert!(audio.looping);
        assert_eq!(audio.effective_volume(), 0.5);
        assert_eq!(audio.delay_seconds(), 2.5);
    }

    #[test]
    fn meta_falls_back_to_welcome_block() {
        let desc = parse(
            r#"{ "model": { "url": "a.glb" },
                 "ui": { "welcome": { "title": "Old title", "eyebrow": "Old sub",
                                      "desc": "Old body", "poster": "old.jpg" } } }"#,
        );
        assert_eq!(desc.resolved_title(), "Old title");
        assert_eq!(desc.resolved_subtitle(), "Old sub");
        assert_eq!(desc.resolved_body(), "Old body");
        assert_eq!(desc.resolved_poster(), Some("old.jpg"));
    }

    #[test]
    fn meta_wins_over_welcome_block() {
        let desc = parse(
            r#"{ "model": { "url": "a.glb" },
                 "meta": { "title": "New", "posterImage": "new.jpg" },
                 "ui": { "welcome": { "title": "Old", "poster": "old.jpg" } } }"#,
        );
        assert_eq!(desc.resolved_title(), "New");
        assert_eq!(desc.resolved_poster(), Some("new.jpg"));
    }

    #[test]
    fn clickable_nodes_without_url_or_position_are_skipped() {
        let desc = parse(
            r#"{ "model": { "url": "a.glb" },
                 "clickableNodes": [
                   { "label": "ok", "url": "https://example.com",
                     "position": { "x": 0.0, "y": 1.0, "z": 0.0 } },
                   { "label": "no url", "position": { "x": 0.0, "y": 0.0, "z": 0.0 } },
                   { "label": "no pos", "url": "https://example.com" }
                 ] }"#,
        );
        assert_eq!(desc.clickable_nodes.len(), 3);
        assert_eq!(desc.usable_clickable_nodes().count(), 1);
    }
}
