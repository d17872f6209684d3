pub mod events;
pub mod serialization;
pub mod session;

pub use events::Observation;
pub use serialization::{EntitySnapshot, SessionSnapshot};
pub use session::{Outcome, Session, SessionError};
