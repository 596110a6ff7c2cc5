use regex::Regex;

use crate::models::profile::{HeightUnit, WeightUnit};

pub const CM_PER_INCH: f64 = 2.54;
pub const LBS_PER_KG: f64 = 2.205;

/// Normalize a height entry to centimeters.
///
/// Metric input is clamped at zero. Imperial input is not validated; negative
/// feet or inches pass straight through.
pub fn height_to_centimeters(height_cm: f64, feet: f64, inches: f64, unit: HeightUnit) -> f64 {
    match unit {
        HeightUnit::Metric => height_cm.max(0.0),
        HeightUnit::Imperial => (feet * 12.0 + inches) * CM_PER_INCH,
    }
}

/// Normalize a weight entry to kilograms. Metric input is clamped at zero.
pub fn weight_to_kilograms(weight_kg: f64, weight_lbs: f64, unit: WeightUnit) -> f64 {
    match unit {
        WeightUnit::Metric => weight_kg.max(0.0),
        WeightUnit::Imperial => weight_lbs / LBS_PER_KG,
    }
}

pub fn kilograms_to_pounds(kg: f64) -> f64 {
    kg * LBS_PER_KG
}

/// Split a centimeter height into whole feet and rounded inches.
///
/// Inches never reach 12: a rounded-up 12 carries into the next foot.
pub fn centimeters_to_feet_inches(cm: f64) -> (u32, u32) {
    if !(cm > 0.0) {
        return (0, 0);
    }
    let total_inches = cm / CM_PER_INCH;
    let mut feet = (total_inches / 12.0).floor();
    let mut inches = (total_inches - feet * 12.0).round();
    if inches >= 12.0 {
        feet += 1.0;
        inches = 0.0;
    }
    // float-to-int casts saturate
    (feet as u32, inches as u32)
}

/// Parse an imperial height such as `5'9"`, `5' 9`, `5ft 9in` or `5 ft`.
pub fn parse_feet_inches(input: &str) -> Option<(f64, f64)> {
    let re = Regex::new(
        r#"^\s*(\d+(?:\.\d+)?)\s*(?:'|ft|feet)\s*(?:(\d+(?:\.\d+)?)\s*(?:"|in|inches)?)?\s*$"#,
    )
    .ok()?;
    let caps = re.captures(input)?;
    let feet: f64 = caps.get(1)?.as_str().parse().ok()?;
    let inches: f64 = match caps.get(2) {
        Some(m) => m.as_str().parse().ok()?,
        None => 0.0,
    };
    Some((feet, inches))
}

/// Parse a decimal number, accepting a comma as the decimal separator.
pub fn parse_decimal(input: &str) -> Option<f64> {
    input.trim().replace(',', ".").parse().ok()
}

/// Round to `places` decimal places, halves away from zero.
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}
