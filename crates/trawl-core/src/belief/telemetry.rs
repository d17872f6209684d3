use super::DepthBelief;
use crate::model::depth::Depth;
use crate::model::species::Species;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BeliefMetrics {
    pub species: Option<Species>,
    pub candidate_count: usize,
    pub resolved: Depth,
    /// Fraction of the species' range already ruled out, in permille.
    pub narrowed_permil: u16,
}

impl BeliefMetrics {
    pub fn from_belief(belief: &DepthBelief) -> Self {
        let candidate_count = belief.candidates().len();
        let narrowed_permil = match belief.species() {
            Some(species) => {
                let range = species.allowed_depths().len();
                if range == 0 {
                    0
                } else {
                    ((range - candidate_count) * 1000 / range) as u16
                }
            }
            None => 0,
        };

        Self {
            species: belief.species(),
            candidate_count,
            resolved: belief.resolved(),
            narrowed_permil,
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.resolved.is_known()
    }
}
