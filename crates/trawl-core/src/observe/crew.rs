use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Crew assignment id for the port trawling net.
pub const ASSIGNMENT_NET_PORT: i32 = 13;
/// Crew assignment id for the starboard trawling net.
pub const ASSIGNMENT_NET_STARBOARD: i32 = 14;

/// Who a failed-catch message blames.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Actor {
    Local,
    Named(String),
}

/// Net slot worked under a crew assignment id, if it is a net post.
pub const fn net_slot_for_assignment(assignment: i32) -> Option<usize> {
    match assignment {
        ASSIGNMENT_NET_PORT => Some(0),
        ASSIGNMENT_NET_STARBOARD => Some(1),
        _ => None,
    }
}

/// Maps actors to the net they operate.
#[derive(Debug, Clone, Default)]
pub struct CrewRoster {
    local: Option<usize>,
    named: HashMap<String, usize>,
}

impl CrewRoster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_local_slot(mut self, slot: usize) -> Self {
        self.local = Some(slot);
        self
    }

    /// Records an assignment; non-net posts clear any prior slot.
    pub fn assign(&mut self, actor: Actor, assignment: i32) {
        let slot = net_slot_for_assignment(assignment);
        match (actor, slot) {
            (Actor::Local, slot) => self.local = slot,
            (Actor::Named(name), Some(slot)) => {
                self.named.insert(name, slot);
            }
            (Actor::Named(name), None) => {
                self.named.remove(&name);
            }
        }
    }

    pub fn resolve(&self, actor: &Actor) -> Option<usize> {
        match actor {
            Actor::Local => self.local,
            Actor::Named(name) => self.named.get(name).copied(),
        }
    }
}
