//! Turns raw animation codes and chat lines into typed depth evidence.

use super::crew::Actor;
use super::text::DeliveryClass;
use crate::belief::NetOffset;
use crate::model::depth::Depth;

pub const ANIMATION_SHOAL_SHALLOW: i32 = 13411;
pub const ANIMATION_SHOAL_MEDIUM: i32 = 13412;
pub const ANIMATION_SHOAL_DEEP: i32 = 13413;

/// Evidence extracted from a narration line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Narration {
    /// One-step move by depth ordinal.
    Shift(i8),
    Mismatch { actor: Actor, offset: NetOffset },
}

#[derive(Debug, Clone, Copy)]
enum Rule {
    Shift(i8),
    Mismatch(NetOffset),
}

// First match wins; the order is part of the contract.
const NARRATION_RULES: [(&str, Rule); 4] = [
    ("closer to the surface", Rule::Shift(1)),
    ("deeper into the depths", Rule::Shift(-1)),
    ("too deep to catch fish", Rule::Mismatch(NetOffset::TooDeep)),
    (
        "not deep enough to catch fish",
        Rule::Mismatch(NetOffset::TooShallow),
    ),
];

const LOCAL_PREFIX: &str = "Your ";
const POSSESSIVE: &str = "'s ";

/// Direct depth read from the ripple animation. Absent or unmapped codes
/// yield `Depth::Unknown`.
pub fn depth_from_animation(code: Option<i32>) -> Depth {
    match code {
        Some(ANIMATION_SHOAL_SHALLOW) => Depth::Shallow,
        Some(ANIMATION_SHOAL_MEDIUM) => Depth::Medium,
        Some(ANIMATION_SHOAL_DEEP) => Depth::Deep,
        _ => Depth::Unknown,
    }
}

/// Classifies a markup-free narration line. Only public game narration is
/// considered.
pub fn classify_narration(class: DeliveryClass, text: &str) -> Option<Narration> {
    if class != DeliveryClass::Game {
        return None;
    }
    let (_, rule) = NARRATION_RULES
        .iter()
        .find(|(needle, _)| text.contains(needle))?;

    Some(match *rule {
        Rule::Shift(delta) => Narration::Shift(delta),
        Rule::Mismatch(offset) => Narration::Mismatch {
            actor: implicated_actor(text),
            offset,
        },
    })
}

/// Resolves whose net a failed-catch line refers to: `"Your ..."` is the
/// local player, `"<Name>'s ..."` a named crew member, anything else the
/// local player.
pub fn implicated_actor(text: &str) -> Actor {
    if text.starts_with(LOCAL_PREFIX) {
        return Actor::Local;
    }
    match text.find(POSSESSIVE) {
        Some(end) if end > 0 && !text[..end].contains(". ") => {
            Actor::Named(text[..end].trim().to_string())
        }
        _ => Actor::Local,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn animation_table() {
        assert_eq!(depth_from_animation(Some(13411)), Depth::Shallow);
        assert_eq!(depth_from_animation(Some(13412)), Depth::Medium);
        assert_eq!(depth_from_animation(Some(13413)), Depth::Deep);
        assert_eq!(depth_from_animation(Some(-1)), Depth::Unknown);
        assert_eq!(depth_from_animation(None), Depth::Unknown);
    }

    #[test]
    fn shift_rules() {
        assert_eq!(
            classify_narration(
                DeliveryClass::Game,
                "The shoal swims closer to the surface."
            ),
            Some(Narration::Shift(1))
        );
        assert_eq!(
            classify_narration(DeliveryClass::Game, "The shoal dives deeper into the depths."),
            Some(Narration::Shift(-1))
        );
    }

    #[test]
    fn first_matching_rule_wins() {
        let text = "The shoal moves closer to the surface, then deeper into the depths.";
        assert_eq!(
            classify_narration(DeliveryClass::Game, text),
            Some(Narration::Shift(1))
        );
    }

    #[test]
    fn mismatch_rules_carry_actor() {
        assert_eq!(
            classify_narration(DeliveryClass::Game, "Your net is too deep to catch fish."),
            Some(Narration::Mismatch {
                actor: Actor::Local,
                offset: NetOffset::TooDeep,
            })
        );
        assert_eq!(
            classify_narration(
                DeliveryClass::Game,
                "Brine's net is not deep enough to catch fish."
            ),
            Some(Narration::Mismatch {
                actor: Actor::Named("Brine".into()),
                offset: NetOffset::TooShallow,
            })
        );
    }

    #[test]
    fn matching_is_case_sensitive() {
        assert_eq!(
            classify_narration(DeliveryClass::Game, "CLOSER TO THE SURFACE"),
            None
        );
    }

    #[test]
    fn other_delivery_classes_are_ignored() {
        for class in [DeliveryClass::Spam, DeliveryClass::Other] {
            assert_eq!(
                classify_narration(class, "The shoal swims closer to the surface."),
                None
            );
        }
    }

    #[test]
    fn unprefixed_failure_blames_local_player() {
        assert_eq!(
            implicated_actor("The net is too deep to catch fish."),
            Actor::Local
        );
    }
}
