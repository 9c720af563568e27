pub mod constants;
pub mod coordinates;
pub mod scale;

pub use coordinates::{CartesianPosition, EquatorialPosition};
pub use scale::ValueRange;
