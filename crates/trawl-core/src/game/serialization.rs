use super::session::Session;
use crate::model::depth::{Depth, DepthSet};
use crate::model::net::NetLevel;
use crate::model::point::WorldPoint;
use crate::model::species::Species;
use crate::track::entity::{TrackedEntity, WorldViewId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EntitySnapshot {
    pub identity: WorldViewId,
    pub species: Option<Species>,
    pub depth: Depth,
    pub candidates: DepthSet,
    pub position: Option<WorldPoint>,
    pub moving: bool,
    pub path_points: usize,
    pub stop_points: usize,
}

impl EntitySnapshot {
    pub fn capture(entity: &TrackedEntity) -> Self {
        EntitySnapshot {
            identity: entity.identity(),
            species: entity.species(),
            depth: entity.depth(),
            candidates: entity.candidates(),
            position: entity.position(),
            moving: entity.is_moving(),
            path_points: entity.path().len(),
            stop_points: entity.stops().len(),
        }
    }
}

/// What the presentation layer reads once per tick.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionSnapshot {
    pub tracked: Option<EntitySnapshot>,
    pub nets: Vec<NetLevel>,
    pub matching_nets: Vec<usize>,
    pub quantity: i64,
    pub capacity: u32,
}

impl SessionSnapshot {
    pub fn capture(session: &Session) -> Self {
        SessionSnapshot {
            tracked: session.current_tracked_entity().map(EntitySnapshot::capture),
            nets: session.nets().iter().map(|net| net.level()).collect(),
            matching_nets: session.matching_nets(),
            quantity: session.quantity(),
            capacity: session.capacity(),
        }
    }

    pub fn to_json(session: &Session) -> serde_json::Result<String> {
        serde_json::to_string(&Self::capture(session))
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
