use directories::ProjectDirs;
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use serde::{Deserialize, Serialize};
use swatch::arc::{ArcSpec, DEFAULT_RADIUS, DEFAULT_SPAN};
use swatch::geometry::Direction;
use swatch::sequence::{ConcealTiming, RevealTiming};
use swatch::{Swatch, SwatchColor, SwatchId};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct BorderStyle {
    pub color: SwatchColor,
    pub width: f64,
}

impl Default for BorderStyle {
    fn default() -> Self {
        Self {
            color: SwatchColor::new(1.0, 1.0, 1.0, 1.0),
            width: 2.0,
        }
    }
}

impl BorderStyle {
    /// The close cross is stroked one unit heavier than the swatch borders.
    pub fn cross_width(&self) -> f64 {
        self.width.max(0.0) + 1.0
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub swatches: Vec<Swatch>,
    pub current: Option<SwatchId>,
    pub start_angle: i32,
    pub span: Option<i32>,
    pub end_angle: Option<i32>,
    pub direction: Direction,
    pub radius: f64,
    pub border: BorderStyle,
    pub reveal: RevealTiming,
    pub conceal: ConcealTiming,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            swatches: Swatch::defaults().into_iter().take(6).collect(),
            current: None,
            start_angle: 0,
            span: None,
            end_angle: None,
            direction: Direction::default(),
            radius: DEFAULT_RADIUS,
            border: BorderStyle::default(),
            reveal: RevealTiming::default(),
            conceal: ConcealTiming::default(),
        }
    }
}

impl Config {
    /// `span` wins over `end_angle` when both are given.
    pub fn arc(&self) -> ArcSpec {
        match (self.span, self.end_angle) {
            (Some(span), end) => {
                if end.is_some() {
                    log::warn!("Both span and end_angle are set; using span");
                }
                ArcSpec::new(self.start_angle, span, self.direction)
            }
            (None, Some(end)) => ArcSpec::with_end_angle(self.start_angle, end, self.direction),
            (None, None) => ArcSpec::new(self.start_angle, DEFAULT_SPAN, self.direction),
        }
    }

    /// The configured `current` swatch, else the first one.
    pub fn current_swatch(&self) -> Option<Swatch> {
        self.current
            .as_ref()
            .and_then(|id| {
                let found = self.swatches.iter().find(|s| &s.id == id);
                if found.is_none() {
                    log::warn!("Current swatch '{}' is not in the swatch list", id);
                }
                found
            })
            .or_else(|| self.swatches.first())
            .cloned()
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to determine config directory")]
    ConfigDirNotFound,
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Notify error: {0}")]
    Notify(#[from] notify::Error),
}

pub fn get_config_path() -> Result<std::path::PathBuf, ConfigError> {
    let proj_dirs =
        ProjectDirs::from("org", "swatch", "picker").ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

pub fn load_config() -> Result<Config, ConfigError> {
    let config_path = get_config_path()?;

    let s = config::Config::builder()
        .add_source(config::File::from(config_path).required(false))
        .add_source(config::Environment::with_prefix("PICKER"))
        .build()?;

    Ok(s.try_deserialize()?)
}

pub fn load_or_setup() -> Config {
    match load_config() {
        Ok(c) => c,
        Err(e) => {
            log::error!("Failed to load config, using defaults: {}", e);
            Config::default()
        }
    }
}

pub fn write_default_config() -> std::io::Result<std::path::PathBuf> {
    let path =
        get_config_path().map_err(|e| std::io::Error::new(std::io::ErrorKind::NotFound, e))?;
    if let Some(parent) = path.parent() {
        fs_err::create_dir_all(parent)?;
    }
    if !path.exists() {
        fs_err::write(&path, DEFAULT_CONFIG)?;
        log::info!("Wrote default config to {}", path.display());
    }
    Ok(path)
}

const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

use crate::events::AppEvent;
use async_channel::Sender;

pub async fn run_async_watcher(tx: Sender<AppEvent>) {
    let config_path = match get_config_path() {
        Ok(p) => p,
        Err(e) => {
            log::error!("Config watcher error: {}", e);
            return;
        }
    };
    let config_dir = match config_path.parent() {
        Some(p) => p.to_path_buf(),
        None => return,
    };

    if let Err(e) = fs_err::create_dir_all(&config_dir) {
        log::error!("Failed to create config directory for watching: {}", e);
        return;
    }

    let (bridge_tx, bridge_rx) = async_channel::unbounded();

    let mut watcher = match RecommendedWatcher::new(
        move |res| {
            let _ = bridge_tx.send_blocking(res);
        },
        notify::Config::default(),
    ) {
        Ok(w) => w,
        Err(e) => {
            log::error!("Failed to create watcher: {}", e);
            return;
        }
    };

    if let Err(e) = watcher.watch(&config_dir, RecursiveMode::NonRecursive) {
        log::error!("Failed to watch config directory: {}", e);
        return;
    }

    while let Ok(res) = bridge_rx.recv().await {
        match res {
            Ok(event) => {
                let meaningful_event = matches!(
                    event.kind,
                    EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
                );

                if meaningful_event
                    && event.paths.iter().any(|p| p == &config_path)
                    && tx.send(AppEvent::ConfigReload).await.is_err()
                {
                    break;
                }
            }
            Err(e) => log::error!("Watch error: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_toml(source: &str) -> Config {
        config::Config::builder()
            .add_source(config::File::from_str(source, config::FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn test_default_config_parses() {
        let config = parse_toml(DEFAULT_CONFIG);
        assert_eq!(config.swatches.len(), 6);
        assert_eq!(config.direction, Direction::CounterClockwise);
        assert_eq!(config.arc().span(), 180);
        assert_eq!(config.current_swatch().unwrap().id, SwatchId::new("red"));
        assert_eq!(config.reveal, RevealTiming::default());
        assert_eq!(config.conceal, ConcealTiming::default());
    }

    #[test]
    fn test_end_angle_config() {
        let config = parse_toml("start_angle = 45\nend_angle = 135\ndirection = \"cw\"\n");
        let arc = config.arc();
        assert_eq!(arc.span(), 90);
        assert_eq!(arc.end_angle(), 135);
        assert_eq!(arc.direction(), Direction::Clockwise);
        // untouched sections keep their defaults
        assert_eq!(config.swatches.len(), 6);
        assert_eq!(config.radius, DEFAULT_RADIUS);
    }

    #[test]
    fn test_span_wins_over_end_angle() {
        let config = parse_toml("span = 100\nend_angle = 30\n");
        assert_eq!(config.arc().span(), 100);
    }

    #[test]
    fn test_config_deserialization() {
        let json = r##"{
            "swatches": [
                {"id": "ink", "color": "#101010"},
                {"id": "paper", "color": "white"}
            ],
            "current": "paper",
            "direction": "Clockwise",
            "radius": 80.0,
            "conceal": {"bounce": 0.1}
        }"##;
        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.current_swatch().unwrap().id, SwatchId::new("paper"));
        assert_eq!(config.direction, Direction::Clockwise);
        assert_eq!(config.conceal.bounce, 0.1);
        assert_eq!(config.conceal.delay, ConcealTiming::default().delay);
        assert_eq!(config.border.cross_width(), 3.0);
    }

    #[test]
    fn test_unknown_current_falls_back_to_first() {
        let config = Config {
            current: Some(SwatchId::new("missing")),
            ..Config::default()
        };
        assert_eq!(config.current_swatch().unwrap().id, SwatchId::new("red"));

        let empty = Config {
            swatches: Vec::new(),
            ..Config::default()
        };
        assert!(empty.current_swatch().is_none());
    }
}
