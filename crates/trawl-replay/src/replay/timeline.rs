use serde::Serialize;
use trawl_core::belief::telemetry::BeliefMetrics;
use trawl_core::game::SessionSnapshot;
use trawl_core::model::species::Species;

/// One JSONL row per replayed tick.
#[derive(Debug, Clone, Serialize)]
pub(super) struct TimelineRow {
    pub run_id: String,
    pub tick: usize,
    pub resolved: bool,
    pub highlight: Option<Highlight>,
    pub metrics: Option<BeliefMetrics>,
    pub snapshot: SessionSnapshot,
}

/// Overlay label and colour for a highlighted shoal.
#[derive(Debug, Clone, Serialize)]
pub(super) struct Highlight {
    pub label: &'static str,
    pub colour: String,
}

impl Highlight {
    pub fn for_species(species: Species) -> Self {
        Self {
            label: species.display_name(),
            colour: format!("#{:06X}", species.rgb()),
        }
    }
}
