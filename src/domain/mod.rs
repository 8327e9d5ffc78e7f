pub mod park;

pub use park::Park;
