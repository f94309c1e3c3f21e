pub mod sync;
pub mod youtube;
