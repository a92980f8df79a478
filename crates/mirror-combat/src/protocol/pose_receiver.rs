use crate::{
    pose::TimedPoseSnapshot,
    protocol::{PosePacket, ProtocolError},
};

/// Counters describing the health of the incoming pose stream.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PoseReceiverStats {
    pub accepted: u64,
    pub rejected: u64,
    pub last_error: Option<ProtocolError>,
}

/// Decodes pose datagrams and keeps the most recent frame.
///
/// The receiver is transport agnostic, the host feeds it whatever its socket produced this tick.
#[derive(Debug, Default)]
pub struct PoseReceiver {
    latest: Option<TimedPoseSnapshot>,
    stats: PoseReceiverStats,
}

impl PoseReceiver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stats(&self) -> &PoseReceiverStats {
        &self.stats
    }

    /// The last successfully decoded frame.
    pub fn latest(&self) -> Option<&TimedPoseSnapshot> {
        self.latest.as_ref()
    }

    /// Sender timestamp of the last decoded frame, 0 if nothing was received yet.
    pub fn latest_timestamp_ms(&self) -> u64 {
        self.latest.as_ref().map(|s| s.timestamp_ms).unwrap_or(0)
    }

    /// Decode a single datagram. A malformed datagram is counted and leaves the previous state untouched.
    pub fn receive(&mut self, datagram: &[u8]) -> Option<&TimedPoseSnapshot> {
        match PosePacket::decode(datagram) {
            Ok(packet) => {
                log::trace!(
                    "pose datagram v{} at {}ms: {} persons, {} hands",
                    packet.version,
                    packet.timestamp_ms,
                    packet.persons.len(),
                    packet.hands.len()
                );
                self.stats.accepted += 1;
                self.latest = Some(packet.into_snapshot());
                self.latest.as_ref()
            }
            Err(err) => {
                log::debug!("Dropping pose datagram of {} bytes: {err}", datagram.len());
                self.stats.rejected += 1;
                self.stats.last_error = Some(err);
                None
            }
        }
    }

    /// Decode every pending datagram in arrival order and return the frames that were accepted.
    pub fn drain<I, D>(&mut self, datagrams: I) -> Vec<TimedPoseSnapshot>
    where
        I: IntoIterator<Item = D>,
        D: AsRef<[u8]>,
    {
        datagrams
            .into_iter()
            .filter_map(|d| self.receive(d.as_ref()).cloned())
            .collect()
    }
}
