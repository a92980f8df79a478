mod weapon_config;
mod weapon_gate;
mod weapon_kind;

pub use self::weapon_config::*;
pub use self::weapon_gate::*;
pub use self::weapon_kind::*;
