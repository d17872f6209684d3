pub mod belief;
pub mod game;
pub mod model;
pub mod observe;
pub mod track;
