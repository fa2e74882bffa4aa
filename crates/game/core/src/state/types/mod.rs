pub mod common;

pub use common::{PixelPosition, Position};
