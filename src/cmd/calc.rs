use anyhow::Result;
use serde_json::{Value, json};

use platewise::core::units::{self, parse_feet_inches, round_to};
use platewise::core::{body, energy, goal, macros};
use platewise::models::profile::{HeightUnit, WeightUnit};
use platewise::output;

use crate::cli::CalcAction;

pub fn run(action: CalcAction, human_flag: bool) -> Result<()> {
    let (text, data) = evaluate(action)?;
    if human_flag {
        println!("{}", text);
    } else {
        let out = output::success("calc", data);
        println!("{}", serde_json::to_string(&out)?);
    }
    Ok(())
}

fn evaluate(action: CalcAction) -> Result<(String, Value)> {
    match action {
        CalcAction::Bmi { weight, height } => {
            let bmi = round_to(body::bmi(weight, height), 2);
            let category = body::bmi_category(bmi);
            Ok((
                format!("BMI: {:.2} ({})", bmi, category),
                json!({ "bmi": bmi, "category": category }),
            ))
        }
        CalcAction::Bmr {
            weight,
            height,
            age,
            sex,
        } => {
            let bmr = body::bmr(weight, height, age, sex);
            Ok((
                format!("BMR: {:.2} kcal/day", bmr),
                json!({ "bmr": bmr, "sex": sex }),
            ))
        }
        CalcAction::Tdee { bmr, activity } => {
            let tdee = energy::tdee(bmr, activity);
            Ok((
                format!("TDEE: {:.2} kcal/day ({})", tdee, activity.label()),
                json!({
                    "tdee": tdee,
                    "activity": activity,
                    "multiplier": activity.multiplier()
                }),
            ))
        }
        CalcAction::Calories { tdee, goal: g, pace } => {
            let offset = goal::pace_offset(g, pace);
            let calories = goal::adjusted_calories(tdee, g, pace);
            Ok((
                format!(
                    "Target: {:.0} kcal/day ({} at {} pace, offset {:+.0})",
                    calories,
                    g.label(),
                    pace.label(),
                    offset
                ),
                json!({ "calories": calories, "offset": offset, "goal": g, "pace": pace }),
            ))
        }
        CalcAction::Macros { calories } => {
            let split = macros::macro_split(calories);
            Ok((
                format!(
                    "Protein {} g | Carbs {} g | Fat {} g ({} kcal)",
                    split.protein,
                    split.carbs,
                    split.fat,
                    split.energy()
                ),
                json!({ "macros": split, "energy": split.energy() }),
            ))
        }
        CalcAction::Convert {
            cm,
            feet_inches,
            kg,
            lbs,
        } => convert(cm, feet_inches.as_deref(), kg, lbs),
    }
}

fn convert(
    cm: Option<f64>,
    feet_inches: Option<&str>,
    kg: Option<f64>,
    lbs: Option<f64>,
) -> Result<(String, Value)> {
    let mut lines = Vec::new();
    let mut data = serde_json::Map::new();

    if let Some(cm) = cm {
        let (feet, inches) = units::centimeters_to_feet_inches(cm);
        lines.push(format!("{} cm = {}'{}\"", cm, feet, inches));
        data.insert("feet".into(), json!(feet));
        data.insert("inches".into(), json!(inches));
    }
    if let Some(text) = feet_inches {
        let (feet, inches) = parse_feet_inches(text)
            .ok_or_else(|| anyhow::anyhow!("invalid height: {} (expected e.g. 5'9\")", text))?;
        let cm = units::height_to_centimeters(0.0, feet, inches, HeightUnit::Imperial);
        lines.push(format!("{} = {:.1} cm", text, cm));
        data.insert("cm".into(), json!(round_to(cm, 2)));
    }
    if let Some(kg) = kg {
        let pounds = units::kilograms_to_pounds(kg);
        lines.push(format!("{} kg = {:.1} lb", kg, pounds));
        data.insert("lbs".into(), json!(round_to(pounds, 2)));
    }
    if let Some(lbs) = lbs {
        let kilos = units::weight_to_kilograms(0.0, lbs, WeightUnit::Imperial);
        lines.push(format!("{} lb = {:.1} kg", lbs, kilos));
        data.insert("kg".into(), json!(round_to(kilos, 2)));
    }

    if lines.is_empty() {
        anyhow::bail!("nothing to convert; pass --cm, --feet-inches, --kg or --lbs");
    }
    Ok((lines.join("\n"), Value::Object(data)))
}
