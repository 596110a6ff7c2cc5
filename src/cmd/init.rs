use anyhow::Result;
use std::io::{self, Write};
use std::str::FromStr;

use platewise::core::plan;
use platewise::core::profile::ProfileDraft;
use platewise::core::units::parse_feet_inches;
use platewise::db::Database;
use platewise::models::config::Config;
use platewise::models::profile::{ActivityLevel, Goal, HeightUnit, Pace, Sex, WeightUnit};
use platewise::output::human;

pub fn run(skip: bool, human_flag: bool) -> Result<()> {
    let config = Config::load().unwrap_or_default();

    if skip {
        config.save()?;
        println!("Config initialized with defaults at {:?}", Config::path());
        return Ok(());
    }

    println!("platewise - profile setup\n");
    let mut draft = prompt_draft(&config)?;

    // re-ask only the failing fields until the draft is complete
    loop {
        let errors = draft.errors();
        if errors.is_empty() {
            break;
        }
        for e in &errors {
            println!("  {}", e);
            match e.field() {
                "name" => draft.name = prompt_string("Name")?,
                "age" => draft.age = prompt_string("Age")?,
                "height" => fill_height(&mut draft)?,
                _ => fill_weight(&mut draft)?,
            }
        }
    }

    let profile = draft.validate()?;
    let p = plan::compute_plan(&draft.name, &profile);
    config.save()?;
    let db = Database::open(&Config::db_path())?;
    db.save_plan(&p)?;

    println!();
    if human_flag {
        println!("{}", human::format_plan(&p, &config.units));
    } else {
        println!(
            "Target: {} kcal/day (protein {} g, carbs {} g, fat {} g)",
            p.target_calories, p.protein_g, p.carbs_g, p.fat_g
        );
    }
    println!("\nSetup complete. Data stored in {:?}", Config::data_dir());
    Ok(())
}

fn prompt_draft(config: &Config) -> Result<ProfileDraft> {
    let mut draft = ProfileDraft {
        height_unit: config.units.height,
        weight_unit: config.units.weight,
        ..ProfileDraft::default()
    };
    draft.name = prompt_string("Name")?;
    draft.age = prompt_string("Age")?;
    draft.sex = prompt_parse(&format!("Sex ({})", choices(&Sex::ALL)))?;
    fill_height(&mut draft)?;
    fill_weight(&mut draft)?;
    for level in ActivityLevel::ALL {
        println!("  {:<12} {}", level.to_string(), level.description());
    }
    draft.activity = prompt_parse(&format!("Activity ({})", choices(&ActivityLevel::ALL)))?;
    draft.goal = prompt_parse(&format!("Goal ({})", choices(&Goal::ALL)))?;
    draft.pace = prompt_parse(&format!("Pace ({})", choices(&Pace::ALL)))?;
    Ok(draft)
}

/// Slash-separated input keys, e.g. `male/female/other`.
fn choices<T: std::fmt::Display>(all: &[T]) -> String {
    all.iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join("/")
}

fn fill_height(draft: &mut ProfileDraft) -> Result<()> {
    match draft.height_unit {
        HeightUnit::Metric => draft.height_cm = prompt_string("Height (cm)")?,
        HeightUnit::Imperial => {
            let text = prompt_string("Height (e.g. 5'9\")")?;
            match parse_feet_inches(&text) {
                Some((feet, inches)) => {
                    draft.height_feet = feet.to_string();
                    draft.height_inches = inches.to_string();
                }
                None => {
                    draft.height_feet = text;
                    draft.height_inches.clear();
                }
            }
        }
    }
    Ok(())
}

fn fill_weight(draft: &mut ProfileDraft) -> Result<()> {
    match draft.weight_unit {
        WeightUnit::Metric => draft.weight_kg = prompt_string("Weight (kg)")?,
        WeightUnit::Imperial => draft.weight_lbs = prompt_string("Weight (lb)")?,
    }
    Ok(())
}

fn prompt_string(label: &str) -> Result<String> {
    print!("{}: ", label);
    io::stdout().flush()?;
    let mut buf = String::new();
    if io::stdin().read_line(&mut buf)? == 0 {
        anyhow::bail!("input closed during setup");
    }
    Ok(buf.trim().to_string())
}

fn prompt_parse<T: FromStr<Err = anyhow::Error>>(label: &str) -> Result<T> {
    loop {
        let s = prompt_string(label)?;
        match s.parse::<T>() {
            Ok(v) => return Ok(v),
            Err(e) => println!("{}", e),
        }
    }
}
