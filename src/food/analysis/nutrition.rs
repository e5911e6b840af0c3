use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_PORTION: &str = "1 serving";

/// Nutrient values for a single matched food, per the provider's reference amount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NutritionFacts {
    pub name: String,
    pub calories: f64,
    pub protein: f64,
    pub fat: f64,
    pub carbs: f64,
}

/// Outcome of a nutrition lookup. Errors are values here, not failures: the
/// caller decides whether to re-prompt or skip the record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NutritionRecord {
    Facts(NutritionFacts),
    Error { error: String },
}

impl NutritionRecord {
    pub fn error(message: impl Into<String>) -> Self {
        NutritionRecord::Error {
            error: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, NutritionRecord::Error { .. })
    }

    pub fn facts(&self) -> Option<&NutritionFacts> {
        match self {
            NutritionRecord::Facts(facts) => Some(facts),
            NutritionRecord::Error { .. } => None,
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| r#"{"error":"unserializable record"}"#.to_string())
    }
}

impl fmt::Display for NutritionFacts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "🍽️ {}", self.name)?;
        writeln!(f, "• Calories: {:.1} kcal", self.calories)?;
        writeln!(f, "• Protein: {:.1} g", self.protein)?;
        writeln!(f, "• Fat: {:.1} g", self.fat)?;
        write!(f, "• Carbohydrates: {:.1} g", self.carbs)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NutritionTotals {
    pub calories: f64,
    pub protein: f64,
    pub fat: f64,
    pub carbs: f64,
}

impl NutritionTotals {
    /// Sums every record that carries facts; error records are skipped.
    pub fn from_records<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a NutritionRecord>,
    {
        records
            .into_iter()
            .filter_map(NutritionRecord::facts)
            .fold(Self::default(), |mut totals, facts| {
                totals.add(facts);
                totals
            })
    }

    pub fn add(&mut self, facts: &NutritionFacts) {
        self.calories += facts.calories;
        self.protein += facts.protein;
        self.fat += facts.fat;
        self.carbs += facts.carbs;
    }
}

impl fmt::Display for NutritionTotals {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total Calories: {}", round1(self.calories))?;
        writeln!(f, "Total Protein: {}g", round1(self.protein))?;
        writeln!(f, "Total Fat: {}g", round1(self.fat))?;
        write!(f, "Total Carbohydrates: {}g", round1(self.carbs))
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// A food request split into portion and food name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoodQuery {
    pub portion: String,
    pub food: String,
}

impl FoodQuery {
    /// `"2 cups of rice"` splits on the literal `" of "` when it occurs exactly
    /// once; anything else is taken whole as the food with a default portion.
    pub fn parse(input: &str) -> Self {
        let parts: Vec<&str> = input.split(" of ").collect();
        if let [portion, food] = parts.as_slice() {
            return Self {
                portion: portion.trim().to_string(),
                food: food.trim().to_string(),
            };
        }

        Self {
            portion: DEFAULT_PORTION.to_string(),
            food: input.trim().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn facts(calories: f64) -> NutritionRecord {
        NutritionRecord::Facts(NutritionFacts {
            name: "test".to_string(),
            calories,
            protein: 1.0,
            fat: 2.0,
            carbs: 3.0,
        })
    }

    #[test]
    fn test_parse_portion_and_food() {
        let query = FoodQuery::parse("2 cups of rice");
        assert_eq!(query.portion, "2 cups");
        assert_eq!(query.food, "rice");
    }

    #[test]
    fn test_parse_food_only_defaults_portion() {
        let query = FoodQuery::parse("rice");
        assert_eq!(query.portion, DEFAULT_PORTION);
        assert_eq!(query.food, "rice");
    }

    #[test]
    fn test_parse_multiple_separators_keeps_whole_input() {
        let query = FoodQuery::parse("a cup of cream of mushroom soup");
        assert_eq!(query.portion, DEFAULT_PORTION);
        assert_eq!(query.food, "a cup of cream of mushroom soup");
    }

    #[test]
    fn test_totals_skip_error_records() {
        let records = vec![facts(100.0), NutritionRecord::error("not found"), facts(50.0)];
        let totals = NutritionTotals::from_records(&records);
        assert_eq!(totals.calories, 150.0);
        assert_eq!(totals.protein, 2.0);
        assert_eq!(totals.carbs, 6.0);
    }

    #[test]
    fn test_totals_display() {
        let totals = NutritionTotals::from_records(&[facts(150.0)]);
        assert_eq!(
            totals.to_string(),
            "Total Calories: 150\nTotal Protein: 1g\nTotal Fat: 2g\nTotal Carbohydrates: 3g"
        );
    }

    #[test]
    fn test_record_json_shapes() {
        assert_eq!(
            NutritionRecord::error("boom").to_json(),
            r#"{"error":"boom"}"#
        );
        let json = facts(10.0).to_json();
        assert!(json.contains(r#""calories":10.0"#));
        let parsed: NutritionRecord = serde_json::from_str(&json).unwrap();
        assert!(!parsed.is_error());
    }
}
