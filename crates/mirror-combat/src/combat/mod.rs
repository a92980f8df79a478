mod combat_world;
mod strike_error;
mod sweep;
mod sweep_config;

pub use self::combat_world::*;
pub use self::strike_error::*;
pub use self::sweep::*;
pub use self::sweep_config::*;
