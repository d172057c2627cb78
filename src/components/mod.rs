pub mod fixtures;
pub mod rankings;
pub mod standings;
