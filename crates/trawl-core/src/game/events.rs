use crate::observe::crew::Actor;
use crate::observe::text::DeliveryClass;
use crate::track::entity::WorldViewId;
use crate::track::registry::MotionSample;
use serde::{Deserialize, Serialize};

/// Raw platform event as delivered by the dispatcher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Observation {
    /// A world entity appeared; `kind_code` is its world-entity type.
    SpawnObserved {
        identity: WorldViewId,
        kind_code: u32,
    },
    DespawnObserved {
        identity: WorldViewId,
    },
    /// A scene object appeared in `identity`'s world view; `kind_code` is
    /// its object id.
    ObjectObserved {
        identity: WorldViewId,
        kind_code: u32,
    },
    AnimationObserved {
        identity: WorldViewId,
        code: i32,
    },
    AnimationCleared {
        identity: WorldViewId,
    },
    NarrativeText {
        delivery_class: DeliveryClass,
        text: String,
    },
    NumericSignal {
        slot_index: usize,
        raw_value: i32,
    },
    CrewAssigned {
        actor: Actor,
        assignment: i32,
    },
    Tick {
        #[serde(default)]
        motion: Option<MotionSample>,
    },
}

impl Observation {
    pub fn is_tick(&self) -> bool {
        matches!(self, Observation::Tick { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::point::WorldPoint;

    #[test]
    fn decodes_tagged_json() {
        let spawn: Observation =
            serde_json::from_str(r#"{"type":"spawn_observed","identity":3,"kind_code":4}"#)
                .unwrap();
        assert_eq!(
            spawn,
            Observation::SpawnObserved {
                identity: 3,
                kind_code: 4
            }
        );

        let text: Observation = serde_json::from_str(
            r#"{"type":"narrative_text","delivery_class":"game","text":"hi"}"#,
        )
        .unwrap();
        assert!(matches!(
            text,
            Observation::NarrativeText {
                delivery_class: DeliveryClass::Game,
                ..
            }
        ));
    }

    #[test]
    fn tick_motion_is_optional() {
        let bare: Observation = serde_json::from_str(r#"{"type":"tick"}"#).unwrap();
        assert_eq!(bare, Observation::Tick { motion: None });
        assert!(bare.is_tick());

        let tick = Observation::Tick {
            motion: Some(MotionSample {
                identity: 1,
                position: WorldPoint::new(1, 2, 0),
                target: WorldPoint::new(3, 2, 0),
            }),
        };
        let json = serde_json::to_string(&tick).unwrap();
        let back: Observation = serde_json::from_str(&json).unwrap();
        assert_eq!(back, tick);
    }

    #[test]
    fn crew_actor_encoding() {
        let named: Observation = serde_json::from_str(
            r#"{"type":"crew_assigned","actor":{"named":"Brine"},"assignment":13}"#,
        )
        .unwrap();
        assert_eq!(
            named,
            Observation::CrewAssigned {
                actor: Actor::Named("Brine".into()),
                assignment: 13
            }
        );
        let local: Observation =
            serde_json::from_str(r#"{"type":"crew_assigned","actor":"local","assignment":14}"#)
                .unwrap();
        assert!(matches!(
            local,
            Observation::CrewAssigned {
                actor: Actor::Local,
                ..
            }
        ));
    }
}
