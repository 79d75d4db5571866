//! Tuning Configuration
//!
//! Immutable parameter sets the controller selects between at runtime. All
//! structs are serde-serializable so a game can ship its tuning as JSON.

pub mod jump_params;
pub mod movement_params;
pub mod player_config;

pub use jump_params::JumpParams;
pub use movement_params::MovementParams;
pub use player_config::{ConfigError, PlayerConfig};
