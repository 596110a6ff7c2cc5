pub mod body;
pub mod energy;
pub mod food;
pub mod goal;
pub mod macros;
pub mod plan;
pub mod profile;
pub mod session;
pub mod units;
