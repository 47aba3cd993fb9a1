pub mod peak;
pub mod projection;
