use crate::{
    pose::{HandPose, Handedness, PersonPose, TimedPoseSnapshot, BODY_KEYPOINT_COUNT, HAND_KEYPOINT_COUNT},
    protocol::ProtocolError,
};
use bevy::math::Vec2;
use bytes::{Buf, BufMut, Bytes, BytesMut};

pub const POSE_MAGIC: [u8; 4] = *b"POSE";
pub const LATEST_VERSION: u8 = 2;

/// magic, version, flags, person count, timestamp
pub const HEADER_V1_LEN: usize = 4 + 1 + 1 + 2 + 8;
/// The version 1 header extended with the hand count.
pub const HEADER_V2_LEN: usize = HEADER_V1_LEN + 2;
/// id, xy and confidence per keypoint
pub const PERSON_RECORD_LEN: usize = 2 + BODY_KEYPOINT_COUNT * 8 + BODY_KEYPOINT_COUNT * 4;
/// id, handedness, score, xy and confidence per keypoint
pub const HAND_RECORD_LEN: usize = 2 + 1 + 4 + HAND_KEYPOINT_COUNT * 8 + HAND_KEYPOINT_COUNT * 4;

/// A decoded pose datagram. All multi-byte fields are little endian.
/// Hand records carry no person association on the wire.
#[derive(Debug, Clone, PartialEq)]
pub struct PosePacket {
    pub version: u8,
    pub flags: u8,
    pub timestamp_ms: u64,
    pub persons: Vec<PersonPose>,
    pub hands: Vec<HandPose>,
}

impl PosePacket {
    pub fn new(timestamp_ms: u64, persons: Vec<PersonPose>, hands: Vec<HandPose>) -> Self {
        Self {
            version: LATEST_VERSION,
            flags: 0,
            timestamp_ms,
            persons,
            hands,
        }
    }

    pub fn with_version(mut self, version: u8) -> Self {
        self.version = version;
        self
    }

    /// Decode a datagram. Truncated records reject the whole datagram, trailing bytes are ignored.
    pub fn decode(datagram: &[u8]) -> Result<Self, ProtocolError> {
        if datagram.len() < HEADER_V1_LEN {
            return Err(ProtocolError::TooShort {
                len: datagram.len(),
                required: HEADER_V1_LEN,
            });
        }

        let mut buf = datagram;
        let mut magic = [0u8; 4];
        buf.copy_to_slice(&mut magic);
        if magic != POSE_MAGIC {
            return Err(ProtocolError::BadMagic(magic));
        }

        let version = buf.get_u8();
        if version == 0 || version > LATEST_VERSION {
            return Err(ProtocolError::UnsupportedVersion(version));
        }
        if version >= 2 && datagram.len() < HEADER_V2_LEN {
            return Err(ProtocolError::TooShort {
                len: datagram.len(),
                required: HEADER_V2_LEN,
            });
        }

        let flags = buf.get_u8();
        let person_count = buf.get_u16_le() as usize;
        let hand_count = if version >= 2 { buf.get_u16_le() as usize } else { 0 };
        let timestamp_ms = buf.get_u64_le();

        // the counts come from the sender, never reserve more than the datagram can hold
        let mut persons = Vec::with_capacity(person_count.min(buf.remaining() / PERSON_RECORD_LEN));
        for index in 0..person_count {
            if buf.remaining() < PERSON_RECORD_LEN {
                return Err(ProtocolError::TruncatedPerson {
                    index,
                    count: person_count,
                });
            }
            persons.push(read_person(&mut buf));
        }

        let mut hands = Vec::with_capacity(hand_count.min(buf.remaining() / HAND_RECORD_LEN));
        for index in 0..hand_count {
            if buf.remaining() < HAND_RECORD_LEN {
                return Err(ProtocolError::TruncatedHand { index, count: hand_count });
            }
            hands.push(read_hand(&mut buf));
        }

        Ok(Self {
            version,
            flags,
            timestamp_ms,
            persons,
            hands,
        })
    }

    pub fn encode(&self) -> Result<Bytes, ProtocolError> {
        if self.version == 0 || self.version > LATEST_VERSION {
            return Err(ProtocolError::UnsupportedVersion(self.version));
        }
        if self.version < 2 && !self.hands.is_empty() {
            return Err(ProtocolError::HandsRequireV2);
        }
        let person_count =
            u16::try_from(self.persons.len()).map_err(|_| ProtocolError::TooManyRecords(self.persons.len()))?;
        let hand_count =
            u16::try_from(self.hands.len()).map_err(|_| ProtocolError::TooManyRecords(self.hands.len()))?;

        let header_len = if self.version >= 2 { HEADER_V2_LEN } else { HEADER_V1_LEN };
        let mut buf = BytesMut::with_capacity(
            header_len + self.persons.len() * PERSON_RECORD_LEN + self.hands.len() * HAND_RECORD_LEN,
        );

        buf.put_slice(&POSE_MAGIC);
        buf.put_u8(self.version);
        buf.put_u8(self.flags);
        buf.put_u16_le(person_count);
        if self.version >= 2 {
            buf.put_u16_le(hand_count);
        }
        buf.put_u64_le(self.timestamp_ms);

        for person in &self.persons {
            buf.put_u16_le(person.id);
            write_points(&mut buf, &person.keypoints, &person.confidences, BODY_KEYPOINT_COUNT)?;
        }
        for hand in &self.hands {
            buf.put_u16_le(hand.hand_id);
            buf.put_u8(hand.handedness.to_wire());
            buf.put_f32_le(hand.score);
            write_points(&mut buf, &hand.keypoints, &hand.confidences, HAND_KEYPOINT_COUNT)?;
        }

        Ok(buf.freeze())
    }

    pub fn into_snapshot(self) -> TimedPoseSnapshot {
        TimedPoseSnapshot::new(self.timestamp_ms, self.persons).with_hands(self.hands)
    }
}

fn read_points(buf: &mut &[u8], count: usize) -> (Vec<Vec2>, Vec<f32>) {
    let keypoints = (0..count)
        .map(|_| {
            let x = buf.get_f32_le();
            let y = buf.get_f32_le();
            Vec2::new(x, y)
        })
        .collect();
    let confidences = (0..count).map(|_| buf.get_f32_le()).collect();
    (keypoints, confidences)
}

fn read_person(buf: &mut &[u8]) -> PersonPose {
    let id = buf.get_u16_le();
    let (keypoints, confidences) = read_points(buf, BODY_KEYPOINT_COUNT);
    PersonPose::new(id, keypoints, confidences)
}

fn read_hand(buf: &mut &[u8]) -> HandPose {
    let hand_id = buf.get_u16_le();
    let handedness = Handedness::from_wire(buf.get_u8());
    let score = buf.get_f32_le();
    let (keypoints, confidences) = read_points(buf, HAND_KEYPOINT_COUNT);
    HandPose::new(hand_id, handedness, score, keypoints, confidences)
}

/// Write a fixed size keypoint block. An absent pose is written as missing joints with zero confidence.
fn write_points(buf: &mut BytesMut, keypoints: &[Vec2], confidences: &[f32], count: usize) -> Result<(), ProtocolError> {
    if !keypoints.is_empty() && keypoints.len() != count {
        return Err(ProtocolError::InvalidKeypointCount {
            count: keypoints.len(),
            expected: count,
        });
    }
    if !confidences.is_empty() && confidences.len() != count {
        return Err(ProtocolError::InvalidKeypointCount {
            count: confidences.len(),
            expected: count,
        });
    }

    for i in 0..count {
        let p = keypoints.get(i).copied().unwrap_or(Vec2::NAN);
        buf.put_f32_le(p.x);
        buf.put_f32_le(p.y);
    }
    for i in 0..count {
        buf.put_f32_le(confidences.get(i).copied().unwrap_or(0.0));
    }
    Ok(())
}
