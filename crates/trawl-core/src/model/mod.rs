pub mod catalog;
pub mod depth;
pub mod net;
pub mod point;
pub mod species;
