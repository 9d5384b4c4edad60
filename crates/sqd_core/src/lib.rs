pub mod fps_cap;
pub mod geometry;
pub mod input;
pub mod time;
