use crate::core::units::round_to;
use crate::models::profile::ActivityLevel;

/// Total daily energy expenditure: BMR scaled by the activity multiplier, never negative.
pub fn tdee(bmr: f64, activity: ActivityLevel) -> f64 {
    round_to(bmr * activity.multiplier(), 2).max(0.0)
}
