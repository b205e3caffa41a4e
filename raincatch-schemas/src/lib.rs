//! Data structures shared by the raincatch engine and its front ends.

pub mod assessment;
pub mod feedback;
pub mod file_formats;
pub mod profile;
pub mod region;
