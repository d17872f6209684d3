use super::events::Observation;
use crate::belief::{BeliefChange, NetOffset};
use crate::model::catalog;
use crate::model::net::{DEFAULT_NET_SLOTS, Net, NetLevel};
use crate::observe::classifier::{Narration, classify_narration};
use crate::observe::crew::{Actor, CrewRoster};
use crate::observe::quantity::{QuantityCounter, QuantityError, classify_catch};
use crate::observe::text::{DeliveryClass, strip_tags};
use crate::track::entity::{TrackedEntity, WorldViewId};
use crate::track::registry::Registry;
use crate::track::seed::{SeedError, SeedSource, SeedTable};
use thiserror::Error;
use tracing::{Level, event};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Quantity(#[from] QuantityError),
    #[error(transparent)]
    Seed(#[from] SeedError),
}

impl SessionError {
    /// Seed failures mean the environment is broken; quantity failures only
    /// spoil the message that raised them.
    pub fn is_fatal(&self) -> bool {
        matches!(self, SessionError::Seed(_))
    }
}

/// What applying one observation did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Ignored,
    Tracked { identity: WorldViewId },
    Untracked { identity: WorldViewId },
    Belief(BeliefChange),
    NetLevel { slot: usize, level: NetLevel },
    Quantity(i64),
    Ticked,
}

/// Per-session context: the tracked shoal, the nets, the catch counter and
/// the crew roster. Observations must be applied in arrival order.
pub struct Session {
    registry: Registry,
    nets: Vec<Net>,
    quantity: QuantityCounter,
    crew: CrewRoster,
    seeds: Box<dyn SeedSource>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(DEFAULT_NET_SLOTS, Box::new(SeedTable::empty()))
    }
}

impl Session {
    pub fn new(net_slots: usize, seeds: Box<dyn SeedSource>) -> Self {
        Self {
            registry: Registry::new(),
            nets: (0..net_slots).map(Net::new).collect(),
            quantity: QuantityCounter::new(),
            crew: CrewRoster::new(),
            seeds,
        }
    }

    pub fn with_crew(mut self, crew: CrewRoster) -> Self {
        self.crew = crew;
        self
    }

    pub fn current_tracked_entity(&self) -> Option<&TrackedEntity> {
        self.registry.current()
    }

    pub fn equipment_state(&self, slot_index: usize) -> Option<&Net> {
        self.nets.get(slot_index)
    }

    pub fn nets(&self) -> &[Net] {
        &self.nets
    }

    pub fn quantity(&self) -> i64 {
        self.quantity.value()
    }

    /// Combined capacity of every net slot.
    pub fn capacity(&self) -> u32 {
        self.nets.iter().map(Net::capacity).sum()
    }

    /// Nets currently fishing at the tracked shoal's resolved depth.
    pub fn matching_nets(&self) -> Vec<usize> {
        let Some(entity) = self.registry.current() else {
            return Vec::new();
        };
        self.nets
            .iter()
            .filter(|net| net.matches(entity.depth()))
            .map(Net::slot)
            .collect()
    }

    pub fn apply(&mut self, observation: &Observation) -> Result<Outcome, SessionError> {
        let outcome = match observation {
            Observation::SpawnObserved {
                identity,
                kind_code,
            } => {
                if !catalog::is_shoal_entity(*kind_code) {
                    return Ok(Outcome::Ignored);
                }
                if self.registry.on_spawn(*identity, self.seeds.as_ref())? {
                    Outcome::Tracked {
                        identity: *identity,
                    }
                } else {
                    Outcome::Ignored
                }
            }
            Observation::DespawnObserved { identity } => {
                if self.registry.on_despawn(*identity) {
                    Outcome::Untracked {
                        identity: *identity,
                    }
                } else {
                    Outcome::Ignored
                }
            }
            Observation::ObjectObserved {
                identity,
                kind_code,
            } => {
                let Some(species) = catalog::lookup(*kind_code) else {
                    return Ok(Outcome::Ignored);
                };
                match self.registry.tracked_mut(*identity) {
                    Some(entity) => Outcome::Belief(entity.on_species_observed(species)),
                    None => Outcome::Ignored,
                }
            }
            Observation::AnimationObserved { identity, code } => {
                match self.registry.tracked_mut(*identity) {
                    Some(entity) => Outcome::Belief(entity.on_animation_observed(*code)),
                    None => Outcome::Ignored,
                }
            }
            Observation::AnimationCleared { identity } => {
                match self.registry.tracked_mut(*identity) {
                    Some(entity) => Outcome::Belief(entity.on_animation_cleared()),
                    None => Outcome::Ignored,
                }
            }
            Observation::NarrativeText {
                delivery_class,
                text,
            } => self.on_text(*delivery_class, text)?,
            Observation::NumericSignal {
                slot_index,
                raw_value,
            } => match self.nets.get_mut(*slot_index) {
                Some(net) => {
                    if net.set_level(*raw_value) {
                        Outcome::NetLevel {
                            slot: *slot_index,
                            level: net.level(),
                        }
                    } else {
                        Outcome::Ignored
                    }
                }
                None => Outcome::Ignored,
            },
            Observation::CrewAssigned { actor, assignment } => {
                self.crew.assign(actor.clone(), *assignment);
                Outcome::Ignored
            }
            Observation::Tick { motion } => {
                self.registry.on_tick(motion.as_ref());
                Outcome::Ticked
            }
        };
        Ok(outcome)
    }

    fn on_text(&mut self, class: DeliveryClass, raw: &str) -> Result<Outcome, SessionError> {
        let text = strip_tags(raw);

        if let Some(narration) = classify_narration(class, &text) {
            return Ok(self.on_narration(narration));
        }

        if let Some(message) = classify_catch(class, &text) {
            let value = self.quantity.apply(&message)?;
            event!(
                target: "trawl_core::session",
                Level::DEBUG,
                catch = ?message,
                quantity = value,
                "catch counted"
            );
            return Ok(Outcome::Quantity(value));
        }

        Ok(Outcome::Ignored)
    }

    fn on_narration(&mut self, narration: Narration) -> Outcome {
        match narration {
            Narration::Shift(delta) => match self.registry.current_mut() {
                Some(entity) => Outcome::Belief(entity.on_relative_shift_observed(delta)),
                None => Outcome::Ignored,
            },
            Narration::Mismatch { actor, offset } => self.on_mismatch(&actor, offset),
        }
    }

    fn on_mismatch(&mut self, actor: &Actor, offset: NetOffset) -> Outcome {
        let Some(slot) = self.crew.resolve(actor) else {
            event!(
                target: "trawl_core::session",
                Level::WARN,
                actor = ?actor,
                offset = ?offset,
                "no net known for actor; mismatch dropped"
            );
            return Outcome::Ignored;
        };
        let Some(net_depth) = self.nets.get(slot).and_then(|net| net.level().as_depth()) else {
            return Outcome::Ignored;
        };
        match self.registry.current_mut() {
            Some(entity) => {
                Outcome::Belief(entity.on_equipment_mismatch_observed(net_depth, offset))
            }
            None => Outcome::Ignored,
        }
    }
}
