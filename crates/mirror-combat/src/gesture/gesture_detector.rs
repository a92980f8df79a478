use crate::{
    combat::CombatWorld,
    gesture::{
        ArrowDetector, GestureKind, GestureRejection, GestureResult, SingleSwingDetector, StrikeContext, SwingDetector,
    },
    window::PoseWindow,
};

/// Uniform entry point over the detectors.
#[derive(Debug, Clone)]
pub enum GestureDetector {
    Swing(SwingDetector),
    Arrow(ArrowDetector),
    SingleSwing(SingleSwingDetector),
}

impl GestureDetector {
    pub fn kind(&self) -> GestureKind {
        match self {
            GestureDetector::Swing(_) => GestureKind::Swing,
            GestureDetector::Arrow(_) => GestureKind::Arrow,
            GestureDetector::SingleSwing(_) => GestureKind::SingleSwing,
        }
    }

    pub fn detect<W>(&mut self, window: &PoseWindow, ctx: &mut StrikeContext<'_, W>) -> Result<GestureResult, GestureRejection>
    where
        W: CombatWorld + ?Sized,
    {
        match self {
            GestureDetector::Swing(detector) => detector.detect(window, ctx),
            GestureDetector::Arrow(detector) => detector.detect(window, ctx),
            GestureDetector::SingleSwing(detector) => detector.detect(window, ctx),
        }
    }
}

impl From<SwingDetector> for GestureDetector {
    fn from(detector: SwingDetector) -> Self {
        GestureDetector::Swing(detector)
    }
}

impl From<ArrowDetector> for GestureDetector {
    fn from(detector: ArrowDetector) -> Self {
        GestureDetector::Arrow(detector)
    }
}

impl From<SingleSwingDetector> for GestureDetector {
    fn from(detector: SingleSwingDetector) -> Self {
        GestureDetector::SingleSwing(detector)
    }
}
