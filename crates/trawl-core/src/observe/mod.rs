//! Classification of raw platform payloads into typed observations.

pub mod classifier;
pub mod crew;
pub mod quantity;
pub mod text;

pub use classifier::{Narration, classify_narration, depth_from_animation, implicated_actor};
pub use crew::{Actor, CrewRoster};
pub use quantity::{CatchMessage, QuantityCounter, QuantityError, classify_catch, word_to_number};
pub use text::{DeliveryClass, strip_tags};
