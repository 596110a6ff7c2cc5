//! BMI and basal metabolic rate.

use serde::Serialize;

use crate::core::units::round_to;
use crate::models::profile::Sex;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl BmiCategory {
    /// Lower bounds are inclusive, upper bounds exclusive.
    pub fn from_bmi(bmi: f64) -> Self {
        match bmi {
            b if b < 18.5 => Self::Underweight,
            b if b < 25.0 => Self::Normal,
            b if b < 30.0 => Self::Overweight,
            _ => Self::Obese,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Underweight => "Underweight",
            Self::Normal => "Normal",
            Self::Overweight => "Overweight",
            Self::Obese => "Obese",
        }
    }
}

impl std::fmt::Display for BmiCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Body mass index, weight(kg) / height(m)^2. Zero when height is not positive.
pub fn bmi(weight_kg: f64, height_cm: f64) -> f64 {
    let height_m = height_cm / 100.0;
    if height_m <= 0.0 {
        return 0.0;
    }
    weight_kg / (height_m * height_m)
}

pub fn bmi_category(bmi: f64) -> &'static str {
    BmiCategory::from_bmi(bmi).label()
}

/// Mifflin-St Jeor basal metabolic rate in kcal/day, rounded to 2 places.
///
/// `Other` is the mean of the full male and female equations. Age is not
/// range-checked here.
pub fn bmr(weight_kg: f64, height_cm: f64, age: i32, sex: Sex) -> f64 {
    let base = 10.0 * weight_kg + 6.25 * height_cm - 5.0 * age as f64;
    let male = base + 5.0;
    let female = base - 161.0;
    let value = match sex {
        Sex::Male => male,
        Sex::Female => female,
        Sex::Other => (male + female) / 2.0,
    };
    round_to(value, 2)
}
