use crate::{
    app_config::ArenaConfig,
    arena_world::{ArenaWorld, PLAYER_ID},
    pose_socket::PoseSocket,
};
use anyhow::Error as AnyError;
use mirror_combat::{
    classifier::{ClassifierEvent, PoseClassifier},
    gesture::GestureKind,
    protocol::PoseReceiver,
};
use std::{future::Future, io, net::SocketAddr, time::Duration};
use tokio::time::{self, MissedTickBehavior};

/// Runs the pose classifier of the player against the dummy arena.
pub struct Arena {
    socket: PoseSocket,
    receiver: PoseReceiver,
    classifier: PoseClassifier,
    world: ArenaWorld,
    tick: Duration,
}

impl Arena {
    pub async fn bind(config: &ArenaConfig) -> Result<Self, AnyError> {
        let socket = PoseSocket::bind(config.listen).await?;
        let mut classifier = PoseClassifier::new(config.combat.clone(), PLAYER_ID)?;
        classifier.set_owner_transform(config.owner);

        Ok(Self {
            socket,
            receiver: PoseReceiver::new(),
            classifier,
            world: ArenaWorld::from_config(config),
            tick: Duration::from_secs_f64(1.0 / config.fps as f64),
        })
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.socket.local_addr()
    }

    pub fn receiver(&self) -> &PoseReceiver {
        &self.receiver
    }

    pub fn classifier(&self) -> &PoseClassifier {
        &self.classifier
    }

    pub fn world(&self) -> &ArenaWorld {
        &self.world
    }

    /// Consume the pending datagrams and run a single classification step.
    pub fn step(&mut self) -> io::Result<Vec<GestureKind>> {
        let datagrams = self.socket.drain()?;
        for snapshot in self.receiver.drain(datagrams) {
            let timestamp_ms = snapshot.timestamp_ms;
            let outcome = self.classifier.ingest(snapshot);
            if !outcome.is_appended() {
                log::debug!("Snapshot at {timestamp_ms}ms not used: {outcome:?}");
            }
        }

        let fired = self.classifier.tick(&mut self.world);
        for event in self.classifier.drain_events() {
            match event {
                ClassifierEvent::WindowUpdated { timestamp_ms, len } => {
                    log::trace!("Window at {timestamp_ms}ms holds {len} snapshots")
                }
                ClassifierEvent::WeaponChanged { from, to } => log::info!("Weapon switched: {from:?} -> {to:?}"),
                ClassifierEvent::GestureDetected(result) => match &result.strike {
                    Ok(strike) => log::info!(
                        "{:?} ({:?}) at {}ms: {} planes, hits: {:?}, projectiles: {}",
                        result.kind,
                        result.hand,
                        result.timestamp_ms,
                        strike.sweep.planes,
                        strike.sweep.hits,
                        strike.sweep.projectiles
                    ),
                    Err(err) => log::warn!("{:?} at {}ms without effect: {err}", result.kind, result.timestamp_ms),
                },
            }
        }

        self.world.advance(self.tick.as_secs_f32());
        Ok(fired)
    }

    /// Step at the configured rate until `shutdown` completes.
    pub async fn run<F>(mut self, shutdown: F) -> Result<(), AnyError>
    where
        F: Future<Output = ()>,
    {
        let mut interval = time::interval(self.tick);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    self.step()?;
                }
                _ = &mut shutdown => break,
            }
        }

        let stats = self.receiver().stats();
        let standing = self.world().dummies().iter().filter(|d| d.is_alive()).count();
        log::info!(
            "Arena closed: {} datagrams accepted, {} rejected, {} dummies destroyed, {standing} standing",
            stats.accepted,
            stats.rejected,
            self.world().kills()
        );
        Ok(())
    }
}
