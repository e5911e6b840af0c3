//! Per-field input checks for the meal plan questionnaire.
//!
//! Lenient mode only requires non-blank input. Strict mode restricts each
//! answer to a known shape and normalises it before it is stored.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use validator::{Validate, ValidationError};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationMode {
    #[default]
    Lenient,
    Strict,
}

impl FromStr for ValidationMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "lenient" => Ok(ValidationMode::Lenient),
            "strict" => Ok(ValidationMode::Strict),
            other => Err(format!("Unknown validation mode: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthGoal {
    LoseWeight,
    BuildMuscle,
    MaintainHealth,
}

impl HealthGoal {
    pub fn as_str(&self) -> &'static str {
        match self {
            HealthGoal::LoseWeight => "lose weight",
            HealthGoal::BuildMuscle => "build muscle",
            HealthGoal::MaintainHealth => "maintain health",
        }
    }
}

impl FromStr for HealthGoal {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "lose weight" => Ok(HealthGoal::LoseWeight),
            "build muscle" => Ok(HealthGoal::BuildMuscle),
            "maintain health" => Ok(HealthGoal::MaintainHealth),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DietaryPreference {
    Vegan,
    Vegetarian,
    NoDairy,
    None,
}

impl DietaryPreference {
    pub fn as_str(&self) -> &'static str {
        match self {
            DietaryPreference::Vegan => "vegan",
            DietaryPreference::Vegetarian => "vegetarian",
            DietaryPreference::NoDairy => "no dairy",
            DietaryPreference::None => "none",
        }
    }
}

impl FromStr for DietaryPreference {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "vegan" => Ok(DietaryPreference::Vegan),
            "vegetarian" => Ok(DietaryPreference::Vegetarian),
            "no dairy" => Ok(DietaryPreference::NoDairy),
            "none" => Ok(DietaryPreference::None),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Validate)]
struct NameField {
    #[validate(length(min = 2), custom = "validate_alphabetic")]
    value: String,
}

#[derive(Debug, Validate)]
struct MealCountField {
    #[validate(range(min = 1, max = 10))]
    value: i64,
}

// Letters, optionally separated by single spaces ("Mary Ann").
fn validate_alphabetic(value: &str) -> Result<(), ValidationError> {
    let ok = value.split(' ').all(|word| !word.is_empty() && word.chars().all(char::is_alphabetic));
    if ok {
        Ok(())
    } else {
        Err(ValidationError::new("alphabetic"))
    }
}

fn normalize(input: &str) -> String {
    input.split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase()
}

fn non_blank(input: &str) -> Option<String> {
    let trimmed = input.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Each returns the value to store, or `None` when the answer must be asked again.
pub fn validate_name(input: &str, mode: ValidationMode) -> Option<String> {
    let name = non_blank(input)?;
    match mode {
        ValidationMode::Lenient => Some(name),
        ValidationMode::Strict => {
            let value = name.split_whitespace().collect::<Vec<_>>().join(" ");
            let field = NameField { value };
            field.validate().ok().map(|_| field.value)
        }
    }
}

pub fn validate_health_goal(input: &str, mode: ValidationMode) -> Option<String> {
    let goal = non_blank(input)?;
    match mode {
        ValidationMode::Lenient => Some(goal),
        ValidationMode::Strict => goal.parse::<HealthGoal>().ok().map(|g| g.as_str().to_string()),
    }
}

pub fn validate_dietary_preferences(input: &str, mode: ValidationMode) -> Option<String> {
    let preference = non_blank(input)?;
    match mode {
        ValidationMode::Lenient => Some(preference),
        ValidationMode::Strict => preference
            .parse::<DietaryPreference>()
            .ok()
            .map(|p| p.as_str().to_string()),
    }
}

pub fn validate_meals_per_day(input: &str, mode: ValidationMode) -> Option<String> {
    let count = non_blank(input)?;
    match mode {
        ValidationMode::Lenient => Some(count),
        ValidationMode::Strict => {
            let field = MealCountField {
                value: count.parse().ok()?,
            };
            field.validate().ok().map(|_| field.value.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use ValidationMode::{Lenient, Strict};

    #[test]
    fn test_lenient_accepts_any_non_blank() {
        assert_eq!(validate_name("  x ", Lenient), Some("x".to_string()));
        assert_eq!(validate_health_goal("get stronger", Lenient), Some("get stronger".to_string()));
        assert_eq!(validate_meals_per_day("lots", Lenient), Some("lots".to_string()));
        assert_eq!(validate_dietary_preferences("   ", Lenient), None);
    }

    #[test]
    fn test_strict_name() {
        assert_eq!(validate_name("Ann", Strict), Some("Ann".to_string()));
        assert_eq!(validate_name("Mary  Ann", Strict), Some("Mary Ann".to_string()));
        assert_eq!(validate_name("A", Strict), None);
        assert_eq!(validate_name("R2D2", Strict), None);
    }

    #[test]
    fn test_strict_enumerations() {
        assert_eq!(validate_health_goal("Build  Muscle", Strict), Some("build muscle".to_string()));
        assert_eq!(validate_health_goal("get stronger", Strict), None);
        assert_eq!(validate_dietary_preferences("No Dairy", Strict), Some("no dairy".to_string()));
        assert_eq!(validate_dietary_preferences("keto", Strict), None);
    }

    #[test]
    fn test_strict_meal_count_range() {
        assert_eq!(validate_meals_per_day("3", Strict), Some("3".to_string()));
        assert_eq!(validate_meals_per_day("10", Strict), Some("10".to_string()));
        assert_eq!(validate_meals_per_day("0", Strict), None);
        assert_eq!(validate_meals_per_day("11", Strict), None);
        assert_eq!(validate_meals_per_day("three", Strict), None);
    }

    #[test]
    fn test_mode_from_str() {
        assert_eq!("STRICT".parse::<ValidationMode>(), Ok(Strict));
        assert!("loose".parse::<ValidationMode>().is_err());
    }
}
