pub mod config;
pub mod food;
pub mod plan;
pub mod profile;

pub use food::{FoodItem, MealEntry};
pub use plan::Plan;
pub use profile::BiometricProfile;
