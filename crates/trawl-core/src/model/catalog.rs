//! Static registry from observed kind codes to species and their depth ranges.

use crate::model::depth::{Depth, DepthSet};
use crate::model::species::Species;

/// World-entity type id shared by every shoal.
pub const SHOAL_WORLD_ENTITY_TYPE: u32 = 4;

pub fn lookup(kind_code: u32) -> Option<Species> {
    Species::ALL
        .into_iter()
        .find(|species| species.kind_code() == kind_code)
}

pub fn allowed_depths(species: Species) -> DepthSet {
    species.allowed_depths()
}

pub fn default_depth(species: Species) -> Depth {
    species.default_depth()
}

pub const fn is_shoal_entity(kind_code: u32) -> bool {
    kind_code == SHOAL_WORLD_ENTITY_TYPE
}
