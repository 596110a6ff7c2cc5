use platewise::core::units;
use platewise::models::profile::{HeightUnit, WeightUnit};

const CM: f64 = units::CM_PER_INCH;

#[test]
fn test_height_metric_passes_through() {
    let cm = units::height_to_centimeters(178.0, 9.0, 9.0, HeightUnit::Metric);
    assert_eq!(cm, 178.0);
}

#[test]
fn test_height_metric_negative_clamps_to_zero() {
    let cm = units::height_to_centimeters(-5.0, 0.0, 0.0, HeightUnit::Metric);
    assert_eq!(cm, 0.0);
}

#[test]
fn test_height_imperial_converts_feet_and_inches() {
    let cm = units::height_to_centimeters(0.0, 5.0, 9.0, HeightUnit::Imperial);
    assert!((cm - 175.26).abs() < 1e-9);
}

#[test]
fn test_weight_metric_clamps_and_imperial_converts() {
    assert_eq!(units::weight_to_kilograms(-1.0, 0.0, WeightUnit::Metric), 0.0);
    assert_eq!(units::weight_to_kilograms(72.5, 0.0, WeightUnit::Metric), 72.5);
    let kg = units::weight_to_kilograms(0.0, 170.0, WeightUnit::Imperial);
    assert!((kg - 77.11).abs() < 0.05);
}

#[test]
fn test_kilograms_to_pounds() {
    assert!((units::kilograms_to_pounds(100.0) - 220.5).abs() < 1e-9);
}

#[test]
fn test_feet_inches_non_positive_is_zero() {
    assert_eq!(units::centimeters_to_feet_inches(0.0), (0, 0));
    assert_eq!(units::centimeters_to_feet_inches(-12.0), (0, 0));
}

#[test]
fn test_feet_inches_exact_height() {
    assert_eq!(units::centimeters_to_feet_inches(175.26), (5, 9));
}

#[test]
fn test_feet_inches_carries_twelve_inches() {
    // 71.6 in: 5 ft 11.6 in rounds to 6 ft 0 in
    assert_eq!(units::centimeters_to_feet_inches(181.864), (6, 0));
}

#[test]
fn test_feet_inches_never_reports_twelve_inches() {
    for tenth_mm in 500..3000 {
        let cm = tenth_mm as f64 / 10.0;
        let (_, inches) = units::centimeters_to_feet_inches(cm);
        assert!(inches < 12, "{} cm gave {} inches", cm, inches);
    }
}

#[test]
fn test_round_trip_through_feet_inches() {
    for feet in 4..8 {
        for inches in 0..12 {
            let cm = units::height_to_centimeters(0.0, feet as f64, inches as f64, HeightUnit::Imperial);
            let (f, i) = units::centimeters_to_feet_inches(cm);
            let back = units::height_to_centimeters(0.0, f as f64, i as f64, HeightUnit::Imperial);
            assert!((back - cm).abs() < 1.0, "{}'{}\" drifted to {} cm", feet, inches, back);
        }
    }
}

#[test]
fn test_feet_inches_huge_height_saturates() {
    let cm = 4294967296.0 * 12.0 * CM;
    let (feet, inches) = units::centimeters_to_feet_inches(cm);
    assert_eq!(feet, u32::MAX);
    assert!(inches < 12);
}

#[test]
fn test_feet_inches_nan_is_zero() {
    assert_eq!(units::centimeters_to_feet_inches(f64::NAN), (0, 0));
}
