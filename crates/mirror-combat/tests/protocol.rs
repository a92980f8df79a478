use bevy::math::Vec2;
use mirror_combat::{
    pose::{HandPose, Handedness, PersonPose, HAND_KEYPOINT_COUNT},
    protocol::{PosePacket, PoseReceiver, ProtocolError, HEADER_V1_LEN, HEADER_V2_LEN, PERSON_RECORD_LEN},
};
use mirror_test::test;

#[path = "shared/poses.rs"]
mod poses;
pub use poses::*;

fn sample_person(id: u16) -> PersonPose {
    person(id, 200.0, Vec2::new(620.0, 300.0), Vec2::new(660.0, 300.0))
}

fn sample_hand(id: u16) -> HandPose {
    let keypoints = (0..HAND_KEYPOINT_COUNT).map(|i| Vec2::new(600.0 + i as f32, 300.0)).collect();
    HandPose::new(id, Handedness::Right, 0.75, keypoints, vec![0.5; HAND_KEYPOINT_COUNT])
}

#[test]
fn v2_packet_survives_the_wire() {
    let packet = PosePacket::new(123_456, vec![sample_person(7)], vec![sample_hand(3)]);
    let bytes = packet.encode().unwrap();
    assert_eq!(bytes.len(), HEADER_V2_LEN + PERSON_RECORD_LEN + mirror_combat::protocol::HAND_RECORD_LEN);

    let decoded = PosePacket::decode(&bytes).unwrap();
    assert_eq!(decoded.version, 2);
    assert_eq!(decoded.timestamp_ms, 123_456);
    assert_eq!(decoded.persons, packet.persons);
    assert_eq!(decoded.hands.len(), 1);
    assert_eq!(decoded.hands[0].handedness, Handedness::Right);
    assert_eq!(decoded.hands[0].keypoints, packet.hands[0].keypoints);

    let snapshot = decoded.into_snapshot();
    assert_eq!(snapshot.timestamp_ms, 123_456);
    assert_eq!(snapshot.hands.len(), 1);
}

#[test]
fn v1_packet_has_no_hands() {
    let packet = PosePacket::new(99, vec![sample_person(1), sample_person(2)], vec![]).with_version(1);
    let bytes = packet.encode().unwrap();
    assert_eq!(bytes.len(), HEADER_V1_LEN + 2 * PERSON_RECORD_LEN);

    let decoded = PosePacket::decode(&bytes).unwrap();
    assert_eq!(decoded.version, 1);
    assert_eq!(decoded.persons.len(), 2);
    assert!(decoded.hands.is_empty());

    let with_hands = PosePacket::new(99, vec![], vec![sample_hand(0)]).with_version(1);
    assert_eq!(with_hands.encode(), Err(ProtocolError::HandsRequireV2));
}

#[test]
fn absent_person_is_sent_as_missing_joints() {
    let packet = PosePacket::new(5, vec![PersonPose::absent(4)], vec![]);
    let decoded = PosePacket::decode(&packet.encode().unwrap()).unwrap();
    let person = &decoded.persons[0];
    assert_eq!(person.id, 4);
    assert!(person.is_complete());
    assert!(person.keypoints.iter().all(|p| !p.is_finite()));
    assert!(person.confidences.iter().all(|&c| c == 0.0));
}

#[test]
fn malformed_datagrams_are_rejected() {
    let bytes = PosePacket::new(10, vec![sample_person(1)], vec![]).encode().unwrap();

    assert!(matches!(
        PosePacket::decode(&bytes[..10]),
        Err(ProtocolError::TooShort { len: 10, .. })
    ));
    assert!(matches!(
        PosePacket::decode(&bytes[..bytes.len() - 1]),
        Err(ProtocolError::TruncatedPerson { index: 0, count: 1 })
    ));

    let mut bad_magic = bytes.to_vec();
    bad_magic[0] = b'X';
    assert_eq!(PosePacket::decode(&bad_magic), Err(ProtocolError::BadMagic(*b"XOSE")));

    let mut bad_version = bytes.to_vec();
    bad_version[4] = 9;
    assert_eq!(PosePacket::decode(&bad_version), Err(ProtocolError::UnsupportedVersion(9)));

    let mut trailing = bytes.to_vec();
    trailing.extend_from_slice(&[1, 2, 3]);
    assert!(PosePacket::decode(&trailing).is_ok());
}

#[test]
fn oversized_counts_are_rejected_as_truncated() {
    let empty = PosePacket::new(10, vec![], vec![]).encode().unwrap();
    assert_eq!(empty.len(), HEADER_V2_LEN);

    let mut persons = empty.to_vec();
    persons[6..8].copy_from_slice(&u16::MAX.to_le_bytes());
    assert_eq!(
        PosePacket::decode(&persons),
        Err(ProtocolError::TruncatedPerson {
            index: 0,
            count: u16::MAX as usize
        })
    );

    let mut hands = PosePacket::new(10, vec![sample_person(1)], vec![]).encode().unwrap().to_vec();
    hands[8..10].copy_from_slice(&u16::MAX.to_le_bytes());
    assert_eq!(
        PosePacket::decode(&hands),
        Err(ProtocolError::TruncatedHand {
            index: 0,
            count: u16::MAX as usize
        })
    );
}

#[test]
fn receiver_keeps_state_on_bad_input() {
    let good = PosePacket::new(10, vec![sample_person(1)], vec![]).encode().unwrap();
    let newer = PosePacket::new(20, vec![sample_person(1)], vec![]).encode().unwrap();

    let mut receiver = PoseReceiver::new();
    assert!(receiver.receive(&good).is_some());
    assert!(receiver.receive(b"garbage").is_none());
    assert_eq!(receiver.latest_timestamp_ms(), 10);
    assert_eq!(receiver.stats().accepted, 1);
    assert_eq!(receiver.stats().rejected, 1);
    assert!(receiver.stats().last_error.is_some());

    let frames = receiver.drain([&newer[..], &good[..5]]);
    assert_eq!(frames.len(), 1);
    assert_eq!(frames[0].timestamp_ms, 20);
    assert_eq!(receiver.latest_timestamp_ms(), 20);
}
