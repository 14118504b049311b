pub mod clock;
pub mod serde;
pub mod vector;
