// Domain layer: coordinates, the movement rule, and ports.

pub mod ports;
pub mod position;

pub use ports::Clock;
pub use position::{Coord, Position};
