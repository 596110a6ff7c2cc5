//! Raw profile input and the validity rules that gate the plan pipeline.

use thiserror::Error;

use crate::core::units::{self, parse_decimal};
use crate::models::profile::{
    ActivityLevel, BiometricProfile, Goal, HeightUnit, Pace, Sex, WeightUnit,
};

pub const MIN_AGE: i32 = 13;
pub const MAX_AGE: i32 = 90;
pub const MIN_HEIGHT_CM: f64 = 120.0;
pub const MAX_HEIGHT_CM: f64 = 250.0;
pub const MIN_WEIGHT_KG: f64 = 30.0;
pub const MAX_WEIGHT_KG: f64 = 300.0;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ValidationError {
    #[error("Enter your name.")]
    MissingName,
    #[error("Age is required.")]
    MissingAge,
    #[error("Enter an age 13-90.")]
    AgeOutOfRange,
    #[error("Add your height.")]
    MissingHeight,
    #[error("Height looks too high.")]
    HeightTooHigh,
    #[error("Add your weight.")]
    MissingWeight,
    #[error("Weight looks too high.")]
    WeightTooHigh,
}

impl ValidationError {
    pub fn field(&self) -> &'static str {
        match self {
            Self::MissingName => "name",
            Self::MissingAge | Self::AgeOutOfRange => "age",
            Self::MissingHeight | Self::HeightTooHigh => "height",
            Self::MissingWeight | Self::WeightTooHigh => "weight",
        }
    }
}

/// Every failed rule of a draft, in field order.
#[derive(Debug, Clone, Error, PartialEq)]
#[error("{}", join_messages(.0))]
pub struct ValidationErrors(pub Vec<ValidationError>);

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Unvalidated profile fields as typed by the user.
///
/// Numeric fields are kept as text so that "missing" and "malformed" stay
/// distinguishable until validation.
#[derive(Debug, Clone)]
pub struct ProfileDraft {
    pub name: String,
    pub age: String,
    pub sex: Sex,
    pub height_unit: HeightUnit,
    pub height_cm: String,
    pub height_feet: String,
    pub height_inches: String,
    pub weight_unit: WeightUnit,
    pub weight_kg: String,
    pub weight_lbs: String,
    pub activity: ActivityLevel,
    pub goal: Goal,
    pub pace: Pace,
}

impl Default for ProfileDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            age: String::new(),
            sex: Sex::Female,
            height_unit: HeightUnit::Metric,
            height_cm: String::new(),
            height_feet: String::new(),
            height_inches: String::new(),
            weight_unit: WeightUnit::Metric,
            weight_kg: String::new(),
            weight_lbs: String::new(),
            activity: ActivityLevel::Moderate,
            goal: Goal::Maintain,
            pace: Pace::Moderate,
        }
    }
}

impl ProfileDraft {
    /// Fill a draft back in from a saved profile, in metric units.
    pub fn from_profile(name: &str, p: &BiometricProfile) -> Self {
        let (feet, inches) = units::centimeters_to_feet_inches(p.height_cm);
        Self {
            name: name.to_string(),
            age: p.age.to_string(),
            sex: p.sex,
            height_unit: HeightUnit::Metric,
            height_cm: format!("{:.0}", p.height_cm),
            height_feet: feet.to_string(),
            height_inches: inches.to_string(),
            weight_unit: WeightUnit::Metric,
            weight_kg: format!("{:.1}", p.weight_kg),
            weight_lbs: format!("{:.1}", units::kilograms_to_pounds(p.weight_kg)),
            activity: p.activity,
            goal: p.goal,
            pace: p.pace,
        }
    }

    pub fn trimmed_name(&self) -> &str {
        self.name.trim()
    }

    /// Age when it parses and lies within the accepted range.
    pub fn age_value(&self) -> Option<i32> {
        self.age
            .trim()
            .parse::<i32>()
            .ok()
            .filter(|a| (MIN_AGE..=MAX_AGE).contains(a))
    }

    /// Height in centimeters, `None` when missing or not positive.
    pub fn height_value_cm(&self) -> Option<f64> {
        let cm = parse_decimal(&self.height_cm).unwrap_or(-1.0);
        let feet = parse_decimal(&self.height_feet).unwrap_or(0.0);
        let inches = parse_decimal(&self.height_inches).unwrap_or(0.0);
        let total = units::height_to_centimeters(cm, feet, inches, self.height_unit);
        (total > 0.0).then_some(total)
    }

    /// Weight in kilograms, `None` when missing or not positive.
    pub fn weight_value_kg(&self) -> Option<f64> {
        let kg = parse_decimal(&self.weight_kg).unwrap_or(-1.0);
        let lbs = parse_decimal(&self.weight_lbs).unwrap_or(0.0);
        let total = units::weight_to_kilograms(kg, lbs, self.weight_unit);
        (total > 0.0).then_some(total)
    }

    pub fn name_error(&self) -> Option<ValidationError> {
        self.trimmed_name()
            .is_empty()
            .then_some(ValidationError::MissingName)
    }

    pub fn age_error(&self) -> Option<ValidationError> {
        if self.age.trim().is_empty() {
            return Some(ValidationError::MissingAge);
        }
        self.age_value()
            .is_none()
            .then_some(ValidationError::AgeOutOfRange)
    }

    pub fn height_error(&self) -> Option<ValidationError> {
        match self.height_value_cm() {
            Some(h) if h > MIN_HEIGHT_CM => {
                (h > MAX_HEIGHT_CM).then_some(ValidationError::HeightTooHigh)
            }
            _ => Some(ValidationError::MissingHeight),
        }
    }

    pub fn weight_error(&self) -> Option<ValidationError> {
        match self.weight_value_kg() {
            Some(w) if w > MIN_WEIGHT_KG => {
                (w > MAX_WEIGHT_KG).then_some(ValidationError::WeightTooHigh)
            }
            _ => Some(ValidationError::MissingWeight),
        }
    }

    pub fn errors(&self) -> Vec<ValidationError> {
        [
            self.name_error(),
            self.age_error(),
            self.height_error(),
            self.weight_error(),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    pub fn is_valid(&self) -> bool {
        self.errors().is_empty()
    }

    /// Convert into a metric profile, or report every failing field.
    pub fn validate(&self) -> Result<BiometricProfile, ValidationErrors> {
        let errors = self.errors();
        if !errors.is_empty() {
            return Err(ValidationErrors(errors));
        }
        match (self.age_value(), self.height_value_cm(), self.weight_value_kg()) {
            (Some(age), Some(height_cm), Some(weight_kg)) => Ok(BiometricProfile {
                age,
                sex: self.sex,
                height_cm,
                weight_kg,
                activity: self.activity,
                goal: self.goal,
                pace: self.pace,
            }),
            // errors() already covers every missing value
            _ => Err(ValidationErrors(vec![ValidationError::MissingAge])),
        }
    }
}
