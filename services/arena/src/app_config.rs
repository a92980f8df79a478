use bevy::math::Vec3;
use config::{builder::DefaultState, Config, ConfigBuilder, ConfigError as LoadError, Environment, File};
use mirror_combat::{
    classifier::{CombatConfig, ConfigError},
    combat::CameraView,
    geometry::{OwnerTransform, WORLD_FORWARD},
};
use serde::{Deserialize, Serialize};
use std::{net::SocketAddr, path::Path};
use thiserror::Error as ThisError;

pub const SERVICE_NAME: &str = "mirror-arena";
pub const ENV_PREFIX: &str = "MIRROR";

#[derive(Debug, ThisError)]
pub enum ArenaConfigError {
    #[error("Failed to load the configuration")]
    Load(#[from] LoadError),
    #[error("Invalid combat configuration")]
    Combat(#[from] ConfigError),
    #[error("Tick rate must be positive")]
    TickRate,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct CameraConfig {
    pub position: Vec3,
    pub forward: Vec3,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: Vec3::new(-400.0, 0.0, 150.0),
            forward: WORLD_FORWARD,
        }
    }
}

impl CameraConfig {
    pub fn view(&self) -> CameraView {
        CameraView {
            position: self.position,
            forward: self.forward,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct DummyConfig {
    pub position: Vec3,
    pub radius: f32,
    pub health: f32,
}

impl Default for DummyConfig {
    fn default() -> Self {
        Self {
            position: Vec3::new(300.0, 0.0, 0.0),
            radius: 50.0,
            health: 10.0,
        }
    }
}

/// Configuration of the arena host.
///
/// Top level keys can be overridden from the environment, e.g. `MIRROR__LISTEN=0.0.0.0:9100`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ArenaConfig {
    /// UDP address the pose sender streams to.
    pub listen: SocketAddr,
    /// Ticks per second.
    pub fps: u32,
    pub owner: OwnerTransform,
    pub camera: CameraConfig,
    pub dummies: Vec<DummyConfig>,
    pub combat: CombatConfig,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            listen: SocketAddr::from(([127, 0, 0, 1], 9000)),
            fps: 60,
            owner: OwnerTransform::IDENTITY,
            camera: CameraConfig::default(),
            dummies: vec![
                DummyConfig::default(),
                DummyConfig {
                    position: Vec3::new(300.0, 250.0, 0.0),
                    ..Default::default()
                },
                DummyConfig {
                    position: Vec3::new(300.0, -250.0, 0.0),
                    ..Default::default()
                },
            ],
            combat: CombatConfig::default(),
        }
    }
}

impl ArenaConfig {
    /// Load the optional config file, then the environment on top of it.
    pub fn load(config_file: Option<&Path>) -> Result<Self, ArenaConfigError> {
        let mut builder = Config::builder();
        if let Some(config_file) = config_file {
            builder = builder.add_source(File::from(config_file));
        }
        Self::from_builder(builder)
    }

    pub fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self, ArenaConfigError> {
        let s = builder
            .add_source(Environment::with_prefix(ENV_PREFIX).separator("__"))
            .build()?;
        let cfg: ArenaConfig = s.try_deserialize()?;
        cfg.validate()?;

        log::info!("configuration: {:#?}", cfg);
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ArenaConfigError> {
        if self.fps == 0 {
            return Err(ArenaConfigError::TickRate);
        }
        self.combat.validate()?;
        Ok(())
    }
}
