use crate::{
    classifier::{ClassifierEvent, CombatConfig, ConfigError},
    combat::{ActorId, CombatWorld},
    geometry::OwnerTransform,
    gesture::{
        ArrowDetector, GestureDetector, GestureKind, SingleSwingDetector, StrikeContext, SwingDetector,
    },
    pose::TimedPoseSnapshot,
    weapon::{WeaponGate, WeaponKind},
    window::{IngestOutcome, PoseWindow},
};
use std::mem;

/// Pose pipeline of a single player: the window, the weapon and the detectors.
///
/// The host calls [`PoseClassifier::ingest`] for every received snapshot and [`PoseClassifier::tick`]
/// once per frame after that.
#[derive(Debug)]
pub struct PoseClassifier {
    config: CombatConfig,
    owner: ActorId,
    owner_transform: OwnerTransform,
    window: PoseWindow,
    weapon: WeaponGate,
    detectors: Vec<GestureDetector>,
    events: Vec<ClassifierEvent>,
}

impl PoseClassifier {
    pub fn new(config: CombatConfig, owner: ActorId) -> Result<Self, ConfigError> {
        config.validate()?;

        // detection order
        let detectors = vec![
            SwingDetector::new(config.swing.clone()).into(),
            ArrowDetector::new(config.arrow.clone()).into(),
            SingleSwingDetector::new(config.single_swing.clone()).into(),
        ];

        Ok(Self {
            owner,
            owner_transform: OwnerTransform::IDENTITY,
            window: PoseWindow::new(config.window_seconds),
            weapon: WeaponGate::new(config.weapon.clone()),
            detectors,
            events: Vec::new(),
            config,
        })
    }

    pub fn config(&self) -> &CombatConfig {
        &self.config
    }

    pub fn owner(&self) -> ActorId {
        self.owner
    }

    pub fn owner_transform(&self) -> &OwnerTransform {
        &self.owner_transform
    }

    pub fn set_owner_transform(&mut self, transform: OwnerTransform) {
        self.owner_transform = transform;
    }

    pub fn window(&self) -> &PoseWindow {
        &self.window
    }

    pub fn weapon(&self) -> WeaponKind {
        self.weapon.weapon()
    }

    /// Append a snapshot and follow the weapon it shows.
    pub fn ingest(&mut self, snapshot: TimedPoseSnapshot) -> IngestOutcome {
        let outcome = self.window.ingest(snapshot);
        if !outcome.is_appended() {
            return outcome;
        }

        let Some(latest) = self.window.latest() else {
            return outcome;
        };
        self.events.push(ClassifierEvent::WindowUpdated {
            timestamp_ms: latest.timestamp_ms,
            len: self.window.len(),
        });

        let from = self.weapon.weapon();
        if let Some(to) = self.weapon.update(latest) {
            log::info!("Weapon changed to {to:?}");
            self.events.push(ClassifierEvent::WeaponChanged { from, to });
        }
        outcome
    }

    /// Prune the window and run the detectors live for the current weapon.
    ///
    /// A detection clears the window, the detectors after it see an empty window in the same tick.
    pub fn tick<W>(&mut self, world: &mut W) -> Vec<GestureKind>
    where
        W: CombatWorld + ?Sized,
    {
        self.window.prune_old(self.window.now());
        let weapon = self.weapon.weapon();

        let mut ctx = StrikeContext {
            world,
            owner: self.owner,
            owner_transform: &self.owner_transform,
            mapping: &self.config.mapping,
        };

        let mut fired = Vec::new();
        for detector in &mut self.detectors {
            let kind = detector.kind();
            if !kind.is_live(weapon) {
                continue;
            }
            match detector.detect(&self.window, &mut ctx) {
                Ok(result) => {
                    self.window.reset();
                    fired.push(kind);
                    self.events.push(ClassifierEvent::GestureDetected(result));
                }
                Err(rejection) => log::trace!("{kind:?} rejected: {rejection}"),
            }
        }
        fired
    }

    /// Take the events raised since the last call.
    pub fn drain_events(&mut self) -> Vec<ClassifierEvent> {
        mem::take(&mut self.events)
    }
}
