use crate::belief::{BeliefChange, DepthBelief, NetOffset};
use crate::model::depth::{Depth, DepthSet};
use crate::model::point::WorldPoint;
use crate::model::species::Species;
use crate::observe::classifier::depth_from_animation;
use crate::track::seed::SeedHistory;
use serde::{Deserialize, Serialize};

/// Identity of a shoal: the id of the world view it owns.
pub type WorldViewId = i32;

/// One shoal under observation, owning its belief and spatial history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackedEntity {
    identity: WorldViewId,
    belief: DepthBelief,
    position: Option<WorldPoint>,
    moving: bool,
    path: Vec<WorldPoint>,
    stops: Vec<WorldPoint>,
    /// Ripple animation code while the ripple is attached.
    animation: Option<i32>,
}

impl TrackedEntity {
    pub fn new(identity: WorldViewId) -> Self {
        Self {
            identity,
            belief: DepthBelief::new(),
            position: None,
            moving: false,
            path: Vec::new(),
            stops: Vec::new(),
            animation: None,
        }
    }

    pub fn with_history(identity: WorldViewId, history: SeedHistory) -> Self {
        let mut entity = Self::new(identity);
        entity.path = history.path;
        for stop in history.stops {
            entity.push_stop(stop);
        }
        entity
    }

    pub fn identity(&self) -> WorldViewId {
        self.identity
    }

    pub fn belief(&self) -> &DepthBelief {
        &self.belief
    }

    pub fn species(&self) -> Option<Species> {
        self.belief.species()
    }

    pub fn depth(&self) -> Depth {
        self.belief.resolved()
    }

    pub fn candidates(&self) -> DepthSet {
        self.belief.candidates()
    }

    pub fn position(&self) -> Option<WorldPoint> {
        self.position
    }

    pub fn is_moving(&self) -> bool {
        self.moving
    }

    pub fn path(&self) -> &[WorldPoint] {
        &self.path
    }

    pub fn stops(&self) -> &[WorldPoint] {
        &self.stops
    }

    pub fn animation(&self) -> Option<i32> {
        self.animation
    }

    /// Assigns the species, then re-reads the attached ripple if there is one.
    pub fn on_species_observed(&mut self, species: Species) -> BeliefChange {
        let change = self.belief.on_species_observed(species);
        let Some(code) = self.animation else {
            return change;
        };
        match self
            .belief
            .on_direct_depth_observed(depth_from_animation(Some(code)))
        {
            BeliefChange::Unchanged => change,
            replayed => replayed,
        }
    }

    pub fn on_animation_observed(&mut self, code: i32) -> BeliefChange {
        self.animation = Some(code);
        self.belief
            .on_direct_depth_observed(depth_from_animation(Some(code)))
    }

    pub fn on_animation_cleared(&mut self) -> BeliefChange {
        self.animation = None;
        self.belief.on_direct_depth_observed(Depth::Unknown)
    }

    pub fn on_relative_shift_observed(&mut self, delta: i8) -> BeliefChange {
        self.belief.on_relative_shift_observed(delta)
    }

    pub fn on_equipment_mismatch_observed(
        &mut self,
        net_depth: Depth,
        offset: NetOffset,
    ) -> BeliefChange {
        self.belief.on_equipment_mismatch_observed(net_depth, offset)
    }

    /// Refreshes position and motion from one tick's sample. Returns the
    /// stop point recorded by a moving to stationary transition, if any.
    pub fn refresh(&mut self, position: WorldPoint, target: WorldPoint) -> Option<WorldPoint> {
        let was_moving = self.moving;
        self.position = Some(position);
        self.moving = position != target;

        if self.path.last() != Some(&position) {
            self.path.push(position);
        }

        if was_moving && !self.moving && self.push_stop(position) {
            return Some(position);
        }
        None
    }

    fn push_stop(&mut self, point: WorldPoint) -> bool {
        if self.stops.contains(&point) {
            return false;
        }
        self.stops.push(point);
        true
    }
}
