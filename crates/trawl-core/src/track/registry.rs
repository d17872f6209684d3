use crate::model::point::WorldPoint;
use crate::track::entity::{TrackedEntity, WorldViewId};
use crate::track::seed::{SeedError, SeedSource};
use serde::{Deserialize, Serialize};
use tracing::{Level, event};

/// Position snapshot delivered with a tick for the shoal it names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MotionSample {
    pub identity: WorldViewId,
    pub position: WorldPoint,
    pub target: WorldPoint,
}

/// Single slot holding the nearest shoal, if any.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    tracked: Option<TrackedEntity>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&TrackedEntity> {
        self.tracked.as_ref()
    }

    /// Mutable access to the tracked entity when it has `identity`.
    pub fn tracked_mut(&mut self, identity: WorldViewId) -> Option<&mut TrackedEntity> {
        self.tracked
            .as_mut()
            .filter(|entity| entity.identity() == identity)
    }

    /// Mutable access to whatever entity is tracked.
    pub fn current_mut(&mut self) -> Option<&mut TrackedEntity> {
        self.tracked.as_mut()
    }

    /// Starts tracking `identity` unless it is already tracked. Returns
    /// whether a new entity replaced the slot.
    pub fn on_spawn(
        &mut self,
        identity: WorldViewId,
        seeds: &dyn SeedSource,
    ) -> Result<bool, SeedError> {
        if self.current().map(TrackedEntity::identity) == Some(identity) {
            return Ok(false);
        }

        let history = seeds.history_for(identity)?;
        let previous = self
            .tracked
            .replace(TrackedEntity::with_history(identity, history))
            .map(|entity| entity.identity());

        event!(
            target: "trawl_core::registry",
            Level::DEBUG,
            identity,
            previous = ?previous,
            "tracking new shoal"
        );
        Ok(true)
    }

    /// Stops tracking when `identity` is the tracked shoal.
    pub fn on_despawn(&mut self, identity: WorldViewId) -> bool {
        if self.current().map(TrackedEntity::identity) != Some(identity) {
            return false;
        }
        self.tracked = None;
        event!(
            target: "trawl_core::registry",
            Level::DEBUG,
            identity,
            "tracking ended"
        );
        true
    }

    pub fn on_tick(&mut self, sample: Option<&MotionSample>) {
        let Some(sample) = sample else {
            return;
        };
        let Some(entity) = self.tracked_mut(sample.identity) else {
            return;
        };
        if let Some(stop) = entity.refresh(sample.position, sample.target) {
            event!(
                target: "trawl_core::registry",
                Level::DEBUG,
                identity = sample.identity,
                stop = %stop,
                "shoal stopped"
            );
        }
    }
}
