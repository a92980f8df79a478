use thiserror::Error as ThisError;

#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum ProtocolError {
    #[error("Datagram of {len} bytes is shorter than the {required} bytes header")]
    TooShort { len: usize, required: usize },
    #[error("Invalid magic {0:02x?}")]
    BadMagic([u8; 4]),
    #[error("Unsupported protocol version {0}")]
    UnsupportedVersion(u8),
    #[error("Person record {index} of {count} is truncated")]
    TruncatedPerson { index: usize, count: usize },
    #[error("Hand record {index} of {count} is truncated")]
    TruncatedHand { index: usize, count: usize },

    #[error("Invalid keypoint count {count}, expected {expected}")]
    InvalidKeypointCount { count: usize, expected: usize },
    #[error("Too many records ({0}) for a single datagram")]
    TooManyRecords(usize),
    #[error("Hand records require protocol version 2")]
    HandsRequireV2,
}
