pub mod attendance;
pub mod enrollment;
pub mod error;
pub mod roster;
