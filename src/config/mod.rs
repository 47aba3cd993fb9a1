use core::time::Duration;

use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Cube {
    /// Zoom at power on, kept across cube sessions afterwards
    pub zoom: f32,
    pub zoom_step: f32,
    pub reset_zoom: f32,
}

impl Default for Cube {
    fn default() -> Self {
        Self { zoom: 90.0, zoom_step: 2.0, reset_zoom: 100.0 }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Game {
    /// Pixels per tick per G of tilt
    pub speed: f32,
    pub collision_radius: f32,
    pub flash_ms: u16,
    pub seed: u64,
}

impl Default for Game {
    fn default() -> Self {
        Self { speed: 4.0, collision_radius: 12.0, flash_ms: 150, seed: 0x4d6f_7469_6f6e }
    }
}

impl Game {
    pub fn flash(&self) -> Duration {
        Duration::from_millis(self.flash_ms as u64)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Graph {
    pub pixels_per_g: f32,
}

impl Default for Graph {
    fn default() -> Self {
        Self { pixels_per_g: 40.0 }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub cube: Cube,
    pub game: Game,
    pub graph: Graph,
}

mod test {
    #[test]
    fn test_deserialize_partial() {
        use pretty_assertions::assert_eq;

        use super::{Config, Cube, Game, Graph};

        let config: Config =
            serde_json::from_str(r#"{"game": {"speed": 6.5, "flash-ms": 300}}"#).unwrap();
        let expected = Config {
            cube: Cube::default(),
            game: Game { speed: 6.5, flash_ms: 300, ..Default::default() },
            graph: Graph::default(),
        };
        assert_eq!(expected, config);
        assert_eq!(config.game.collision_radius, 12.0);
    }

    #[test]
    fn test_deserialize_empty() {
        use super::Config;

        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.cube.zoom, 90.0);
        assert_eq!(config.graph.pixels_per_g, 40.0);
    }

    #[test]
    fn test_serialize_kebab_case() {
        use super::Config;

        let value = serde_json::to_value(&Config::default()).unwrap();
        assert_eq!(value["cube"]["reset-zoom"], 100.0);
        assert_eq!(value["game"]["collision-radius"], 12.0);
        assert_eq!(value["graph"]["pixels-per-g"], 40.0);
    }
}
