mod pose_packet;
mod pose_receiver;
mod protocol_error;

pub use self::pose_packet::*;
pub use self::pose_receiver::*;
pub use self::protocol_error::*;
