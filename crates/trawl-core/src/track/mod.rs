pub mod entity;
pub mod registry;
pub mod seed;

pub use entity::{TrackedEntity, WorldViewId};
pub use registry::{MotionSample, Registry};
pub use seed::{SeedError, SeedFile, SeedHistory, SeedSource, SeedTable};
