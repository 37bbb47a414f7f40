pub mod compute;
pub mod random;
