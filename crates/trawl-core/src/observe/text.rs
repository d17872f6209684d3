use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

// Closed `<...>` spans only; a stray `<` is ordinary text.
static TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("<[^>]*>").expect("tag pattern is valid"));

/// Delivery channel a chat line arrived on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryClass {
    /// Public game narration.
    Game,
    /// Filterable game spam (catch notices land here when filtered).
    Spam,
    Other,
}

/// Removes `<tag>` markup so substring rules see the plain sentence.
pub fn strip_tags(raw: &str) -> String {
    TAG.replace_all(raw, "").into_owned()
}
