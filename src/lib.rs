//! Nutrition plan engine: biometrics in, daily calorie and macro targets out,
//! plus proportional food-portion scaling and a small meal log.

pub mod core;
pub mod db;
pub mod models;
pub mod output;
