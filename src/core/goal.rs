use crate::models::profile::{Goal, Pace};

/// Lowest daily calorie target the engine will ever produce.
pub const CALORIE_FLOOR: f64 = 1200.0;

/// Upper bound for a manually entered daily goal.
pub const CALORIE_CEILING: f64 = 6000.0;

/// Daily calorie offset for a goal at the chosen pace.
///
/// Maintenance ignores pace.
pub fn pace_offset(goal: Goal, pace: Pace) -> f64 {
    let offset = match pace {
        Pace::Slow => 250.0,
        Pace::Moderate => 425.0,
        Pace::Fast => 650.0,
    };
    match goal {
        Goal::LoseWeight => -offset,
        Goal::Maintain => 0.0,
        Goal::GainMuscle => offset,
    }
}

/// TDEE shifted by the pace offset, floored at [`CALORIE_FLOOR`].
pub fn adjusted_calories(tdee: f64, goal: Goal, pace: Pace) -> f64 {
    // f64::max also maps a NaN target to the floor
    (tdee + pace_offset(goal, pace)).max(CALORIE_FLOOR)
}

/// Clamp a manually entered daily goal into the supported range.
pub fn bound_daily_goal(calories: f64) -> f64 {
    if calories.is_nan() {
        return CALORIE_FLOOR;
    }
    calories.clamp(CALORIE_FLOOR, CALORIE_CEILING)
}
