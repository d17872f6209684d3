//! Deterministic (hard) depth belief updates.

use crate::model::depth::{Depth, DepthSet};
use crate::model::species::Species;
use serde::{Deserialize, Serialize};
use tracing::{Level, event};

/// Direction in which a failed catch says the net missed the shoal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NetOffset {
    /// Net sits below the shoal; the shoal is strictly shallower.
    TooDeep,
    /// Net sits above the shoal; the shoal is strictly deeper.
    TooShallow,
}

/// What an observation did to the belief.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BeliefChange {
    Unchanged,
    Reset,
    Narrowed,
    Resolved(Depth),
}

/// Belief about the depth of one shoal.
///
/// States: no species (no opinion), species known with a candidate set of
/// two or more depths, or species known and resolved to a single depth.
/// The candidate set only shrinks between resets; a reset comes from a new
/// species assignment or a direct observation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepthBelief {
    species: Option<Species>,
    candidates: DepthSet,
    resolved: Depth,
}

impl Default for DepthBelief {
    fn default() -> Self {
        Self::new()
    }
}

impl DepthBelief {
    pub const fn new() -> Self {
        Self {
            species: None,
            candidates: DepthSet::EMPTY,
            resolved: Depth::Unknown,
        }
    }

    pub fn species(&self) -> Option<Species> {
        self.species
    }

    /// Depths still consistent with every observation; empty without a species.
    pub fn candidates(&self) -> DepthSet {
        self.candidates
    }

    pub fn resolved(&self) -> Depth {
        self.resolved
    }

    pub fn is_resolved(&self) -> bool {
        self.resolved.is_known()
    }

    /// Hard reset to the species' full range, collapsing singleton ranges.
    pub fn on_species_observed(&mut self, species: Species) -> BeliefChange {
        self.species = Some(species);
        self.set_candidates(species.allowed_depths());
        event!(
            target: "trawl_core::belief",
            Level::DEBUG,
            species = ?species,
            candidates = %self.candidates,
            resolved = %self.resolved,
            "species observed"
        );
        match self.resolved {
            Depth::Unknown => BeliefChange::Reset,
            depth => BeliefChange::Resolved(depth),
        }
    }

    /// Applies an authoritative depth reading. `Depth::Unknown` means the
    /// source is absent and drops the belief back to the full range.
    pub fn on_direct_depth_observed(&mut self, depth: Depth) -> BeliefChange {
        let Some(species) = self.species else {
            return BeliefChange::Unchanged;
        };
        let allowed = species.allowed_depths();

        if !depth.is_known() {
            self.set_candidates(allowed);
            event!(
                target: "trawl_core::belief",
                Level::DEBUG,
                species = ?species,
                resolved = %self.resolved,
                "direct depth absent; belief reset"
            );
            return match self.resolved {
                Depth::Unknown => BeliefChange::Reset,
                resolved => BeliefChange::Resolved(resolved),
            };
        }

        if !allowed.contains(depth) {
            event!(
                target: "trawl_core::belief",
                Level::TRACE,
                species = ?species,
                depth = %depth,
                "direct depth outside species range ignored"
            );
            return BeliefChange::Unchanged;
        }

        self.set_candidates(DepthSet::single(depth));
        BeliefChange::Resolved(depth)
    }

    /// Applies a one-step move: `+1` or `-1` by depth ordinal.
    pub fn on_relative_shift_observed(&mut self, delta: i8) -> BeliefChange {
        let Some(species) = self.species else {
            return BeliefChange::Unchanged;
        };
        if delta != 1 && delta != -1 {
            return BeliefChange::Unchanged;
        }
        let allowed = species.allowed_depths();

        if self.resolved.is_known() {
            return match self.resolved.shifted(delta).filter(|d| allowed.contains(*d)) {
                Some(next) => {
                    self.set_candidates(DepthSet::single(next));
                    BeliefChange::Resolved(next)
                }
                None => {
                    event!(
                        target: "trawl_core::belief",
                        Level::TRACE,
                        resolved = %self.resolved,
                        delta,
                        "shift leaves species range; discarded"
                    );
                    BeliefChange::Unchanged
                }
            };
        }

        let shifted: DepthSet = self
            .candidates
            .iter()
            .filter_map(|d| d.shifted(delta))
            .filter(|d| allowed.contains(*d))
            .collect();
        self.narrow(shifted, "shift")
    }

    /// Applies a failed catch against a net fishing at `net_depth`.
    pub fn on_equipment_mismatch_observed(
        &mut self,
        net_depth: Depth,
        offset: NetOffset,
    ) -> BeliefChange {
        if self.species.is_none() || !net_depth.is_known() {
            return BeliefChange::Unchanged;
        }
        let side: DepthSet = Depth::ORDERED
            .into_iter()
            .filter(|d| match offset {
                NetOffset::TooDeep => d.ordinal() < net_depth.ordinal(),
                NetOffset::TooShallow => d.ordinal() > net_depth.ordinal(),
            })
            .collect();
        self.narrow(side, "mismatch")
    }

    fn narrow(&mut self, evidence: DepthSet, source: &'static str) -> BeliefChange {
        let narrowed = self.candidates.intersect(evidence);
        if narrowed.is_empty() {
            event!(
                target: "trawl_core::belief",
                Level::TRACE,
                source,
                candidates = %self.candidates,
                evidence = %evidence,
                "empty intersection; discarded"
            );
            return BeliefChange::Unchanged;
        }
        if narrowed == self.candidates {
            return BeliefChange::Unchanged;
        }

        self.set_candidates(narrowed);
        event!(
            target: "trawl_core::belief",
            Level::DEBUG,
            source,
            candidates = %self.candidates,
            resolved = %self.resolved,
            "candidates narrowed"
        );
        match self.resolved {
            Depth::Unknown => BeliefChange::Narrowed,
            depth => BeliefChange::Resolved(depth),
        }
    }

    fn set_candidates(&mut self, candidates: DepthSet) {
        self.candidates = candidates;
        self.resolved = candidates.only().unwrap_or(Depth::Unknown);
    }
}
