//! Daily calorie and macro goal calculation
//!
//! Derives a user's daily targets from body metrics, activity and objective.
//!
//! # Design Principles
//!
//! 1. **Pure Functions**: All calculations are pure, no side effects
//! 2. **No Rounding**: Values are raw `f64`; rounding is a display concern
//! 3. **Exhaustive Tables**: Every enum-driven factor is a `match`
//!
//! Pipeline: Mifflin-St Jeor BMR → TDEE (activity multiplier) → calorie goal
//! (objective adjustment) → macro grams (calorie split / kcal per gram).

use crate::errors::CoreResult;
use crate::models::DietaryPreference;
use crate::validation::{
    check, validate_age, validate_finite, validate_height_cm, validate_weight_kg,
};
use serde::{Deserialize, Serialize};

// ============================================================================
// Profile Input Types
// ============================================================================

/// Gender used by the BMR formula
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl std::str::FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            _ => Err("Must be one of: male, female".to_string()),
        }
    }
}

/// Activity level for TDEE calculation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    /// Little or no exercise
    Sedentary,
    /// Light exercise 1-3 days/week
    #[default]
    LightlyActive,
    /// Moderate exercise 3-5 days/week
    ModeratelyActive,
    /// Hard exercise 6-7 days/week
    VeryActive,
}

impl ActivityLevel {
    /// Get the activity multiplier for TDEE calculation
    pub fn multiplier(&self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 1.2,
            ActivityLevel::LightlyActive => 1.375,
            ActivityLevel::ModeratelyActive => 1.55,
            ActivityLevel::VeryActive => 1.725,
        }
    }
}

impl std::str::FromStr for ActivityLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sedentary" => Ok(ActivityLevel::Sedentary),
            "lightly_active" => Ok(ActivityLevel::LightlyActive),
            "moderately_active" => Ok(ActivityLevel::ModeratelyActive),
            "very_active" => Ok(ActivityLevel::VeryActive),
            _ => Err(
                "Must be one of: sedentary, lightly_active, moderately_active, very_active"
                    .to_string(),
            ),
        }
    }
}

/// The user's primary objective
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum WeightGoal {
    LoseWeight,
    #[default]
    MaintainWeight,
    GainMuscle,
}

impl WeightGoal {
    /// Daily kcal added to TDEE for this objective
    pub fn calorie_adjustment(&self) -> f64 {
        match self {
            WeightGoal::LoseWeight => -500.0,
            WeightGoal::MaintainWeight => 0.0,
            WeightGoal::GainMuscle => 300.0,
        }
    }
}

impl std::str::FromStr for WeightGoal {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "lose_weight" => Ok(WeightGoal::LoseWeight),
            "maintain_weight" => Ok(WeightGoal::MaintainWeight),
            "gain_muscle" => Ok(WeightGoal::GainMuscle),
            _ => Err("Must be one of: lose_weight, maintain_weight, gain_muscle".to_string()),
        }
    }
}

/// Body, activity and objective inputs collected at onboarding
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyInputs {
    /// Age in years
    pub age_years: u32,
    pub gender: Gender,
    /// Height in centimeters
    pub height_cm: f64,
    /// Current weight in kilograms
    pub current_weight_kg: f64,
    /// Target weight in kilograms
    pub goal_weight_kg: f64,
    pub activity_level: ActivityLevel,
    pub goal: WeightGoal,
    #[serde(default)]
    pub dietary_preference: DietaryPreference,
}

impl BodyInputs {
    /// Check the ranges the goal engine depends on
    pub fn validate(&self) -> CoreResult<()> {
        check("age", validate_age(i64::from(self.age_years)))?;
        check("height", validate_height_cm(self.height_cm))?;
        check("current_weight", validate_weight_kg(self.current_weight_kg))?;
        check("goal_weight", validate_finite(self.goal_weight_kg))?;
        Ok(())
    }
}

// ============================================================================
// Macro Split
// ============================================================================

/// kcal per gram of protein
pub const PROTEIN_KCAL_PER_GRAM: f64 = 4.0;
/// kcal per gram of carbohydrate
pub const CARB_KCAL_PER_GRAM: f64 = 4.0;
/// kcal per gram of fat
pub const FAT_KCAL_PER_GRAM: f64 = 9.0;

/// Share of the calorie goal assigned to each macro
///
/// The fractions need not sum to exactly 1.0; grams are always
/// `fraction * calories / kcal_per_gram`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacroSplit {
    pub protein_fraction: f64,
    pub carb_fraction: f64,
    pub fat_fraction: f64,
}

impl Default for MacroSplit {
    fn default() -> Self {
        Self {
            protein_fraction: 0.30,
            carb_fraction: 0.40,
            fat_fraction: 0.30,
        }
    }
}

impl MacroSplit {
    /// Macro grams for a calorie goal
    pub fn grams_for(&self, calorie_goal: f64) -> (f64, f64, f64) {
        (
            calorie_goal * self.protein_fraction / PROTEIN_KCAL_PER_GRAM,
            calorie_goal * self.carb_fraction / CARB_KCAL_PER_GRAM,
            calorie_goal * self.fat_fraction / FAT_KCAL_PER_GRAM,
        )
    }
}

/// Daily targets derived from [`BodyInputs`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacroGoals {
    pub calorie_goal: f64,
    pub protein_goal: f64,
    pub carb_goal: f64,
    pub fat_goal: f64,
}

// ============================================================================
// BMR and TDEE Calculations
// ============================================================================

/// Calculate Basal Metabolic Rate using Mifflin-St Jeor equation
///
/// Men: BMR = 10 × weight(kg) + 6.25 × height(cm) - 5 × age(y) + 5
/// Women: BMR = 10 × weight(kg) + 6.25 × height(cm) - 5 × age(y) - 161
pub fn calculate_bmr_mifflin(weight_kg: f64, height_cm: f64, age_years: u32, gender: Gender) -> f64 {
    let base = 10.0 * weight_kg + 6.25 * height_cm - 5.0 * f64::from(age_years);
    match gender {
        Gender::Male => base + 5.0,
        Gender::Female => base - 161.0,
    }
}

/// Calculate Total Daily Energy Expenditure
///
/// TDEE = BMR × Activity Multiplier
pub fn calculate_tdee(inputs: &BodyInputs) -> f64 {
    let bmr = calculate_bmr_mifflin(
        inputs.current_weight_kg,
        inputs.height_cm,
        inputs.age_years,
        inputs.gender,
    );
    bmr * inputs.activity_level.multiplier()
}

/// Daily calorie goal for an objective
pub fn calorie_goal_for(tdee: f64, goal: WeightGoal) -> f64 {
    match goal {
        WeightGoal::MaintainWeight => tdee,
        WeightGoal::LoseWeight | WeightGoal::GainMuscle => tdee + goal.calorie_adjustment(),
    }
}

/// Compute daily goals with the default 30/40/30 split
pub fn compute_goals(inputs: &BodyInputs) -> CoreResult<MacroGoals> {
    compute_goals_with_split(inputs, &MacroSplit::default())
}

/// Compute daily goals with a custom macro split
pub fn compute_goals_with_split(inputs: &BodyInputs, split: &MacroSplit) -> CoreResult<MacroGoals> {
    inputs.validate()?;

    let calorie_goal = calorie_goal_for(calculate_tdee(inputs), inputs.goal);
    let (protein_goal, carb_goal, fat_goal) = split.grams_for(calorie_goal);

    Ok(MacroGoals {
        calorie_goal,
        protein_goal,
        carb_goal,
        fat_goal,
    })
}

// ============================================================================
// Profile
// ============================================================================

/// A user's profile: onboarding inputs plus the goals derived from them
///
/// Fields are private so the goals can only change together with the inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(flatten)]
    inputs: BodyInputs,
    #[serde(flatten)]
    goals: MacroGoals,
}

impl Profile {
    /// Build a profile, computing its goals
    pub fn new(inputs: BodyInputs) -> CoreResult<Self> {
        let goals = compute_goals(&inputs)?;
        Ok(Self { inputs, goals })
    }

    pub fn inputs(&self) -> &BodyInputs {
        &self.inputs
    }

    pub fn goals(&self) -> &MacroGoals {
        &self.goals
    }

    pub fn dietary_preference(&self) -> DietaryPreference {
        self.inputs.dietary_preference
    }

    /// Replace the inputs and recompute the goals
    ///
    /// On error the profile is left unchanged.
    pub fn update(&mut self, inputs: BodyInputs) -> CoreResult<()> {
        let goals = compute_goals(&inputs)?;
        self.inputs = inputs;
        self.goals = goals;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::CoreError;
    use proptest::prelude::*;

    fn reference_inputs() -> BodyInputs {
        BodyInputs {
            age_years: 30,
            gender: Gender::Male,
            height_cm: 175.0,
            current_weight_kg: 75.0,
            goal_weight_kg: 70.0,
            activity_level: ActivityLevel::LightlyActive,
            goal: WeightGoal::LoseWeight,
            dietary_preference: DietaryPreference::All,
        }
    }

    // =========================================================================
    // BMR/TDEE Tests
    // =========================================================================

    #[test]
    fn test_bmr_mifflin() {
        let bmr = calculate_bmr_mifflin(75.0, 175.0, 30, Gender::Male);
        assert_eq!(bmr, 1698.75);

        let bmr = calculate_bmr_mifflin(60.0, 165.0, 30, Gender::Female);
        assert_eq!(bmr, 1320.25);
    }

    #[test]
    fn test_reference_profile_goals() {
        let goals = compute_goals(&reference_inputs()).unwrap();

        assert_eq!(calculate_tdee(&reference_inputs()), 2335.78125);
        assert_eq!(goals.calorie_goal, 1835.78125);
        assert!((goals.protein_goal - 137.68359375).abs() < 1e-9);
        assert!((goals.carb_goal - 183.578125).abs() < 1e-9);
        assert!((goals.fat_goal - 61.1927).abs() < 0.001);
    }

    #[test]
    fn test_goal_adjustments() {
        let mut inputs = reference_inputs();
        let tdee = calculate_tdee(&inputs);

        inputs.goal = WeightGoal::MaintainWeight;
        assert_eq!(compute_goals(&inputs).unwrap().calorie_goal, tdee);

        inputs.goal = WeightGoal::GainMuscle;
        assert_eq!(compute_goals(&inputs).unwrap().calorie_goal, tdee + 300.0);
    }

    #[test]
    fn test_activity_multipliers() {
        assert_eq!(ActivityLevel::Sedentary.multiplier(), 1.2);
        assert_eq!(ActivityLevel::LightlyActive.multiplier(), 1.375);
        assert_eq!(ActivityLevel::ModeratelyActive.multiplier(), 1.55);
        assert_eq!(ActivityLevel::VeryActive.multiplier(), 1.725);
    }

    #[test]
    fn test_invalid_inputs_rejected() {
        let mut inputs = reference_inputs();
        inputs.age_years = 0;
        assert!(matches!(compute_goals(&inputs), Err(CoreError::InvalidInput(_))));

        let mut inputs = reference_inputs();
        inputs.height_cm = 0.0;
        assert!(matches!(compute_goals(&inputs), Err(CoreError::InvalidInput(_))));

        let mut inputs = reference_inputs();
        inputs.current_weight_kg = -70.0;
        assert!(matches!(compute_goals(&inputs), Err(CoreError::InvalidInput(_))));

        let mut inputs = reference_inputs();
        inputs.goal_weight_kg = f64::NAN;
        assert!(matches!(compute_goals(&inputs), Err(CoreError::InvalidInput(_))));
    }

    #[test]
    fn test_goal_weight_and_age_have_no_upper_limits() {
        // Goal weight is informational; the target itself is not bounded
        let mut inputs = reference_inputs();
        inputs.goal_weight_kg = 0.0;
        assert!(compute_goals(&inputs).is_ok());

        let mut inputs = reference_inputs();
        inputs.age_years = 151;
        let goals = compute_goals(&inputs).unwrap();
        assert!(goals.calorie_goal.is_finite());
    }

    #[test]
    fn test_unknown_enum_text_rejected() {
        assert!("extra_active".parse::<ActivityLevel>().is_err());
        assert!("bulk".parse::<WeightGoal>().is_err());
        assert!("other".parse::<Gender>().is_err());
    }

    #[test]
    fn test_custom_split_stays_consistent() {
        let split = MacroSplit {
            protein_fraction: 0.40,
            carb_fraction: 0.30,
            fat_fraction: 0.30,
        };
        let goals = compute_goals_with_split(&reference_inputs(), &split).unwrap();
        assert_eq!(goals.protein_goal, goals.calorie_goal * 0.40 / 4.0);
        assert_eq!(goals.carb_goal, goals.calorie_goal * 0.30 / 4.0);
        assert_eq!(goals.fat_goal, goals.calorie_goal * 0.30 / 9.0);
    }

    #[test]
    fn test_profile_update_recomputes_goals() {
        let mut profile = Profile::new(reference_inputs()).unwrap();
        let before = *profile.goals();

        let mut heavier = reference_inputs();
        heavier.current_weight_kg = 85.0;
        profile.update(heavier.clone()).unwrap();

        assert_eq!(profile.inputs(), &heavier);
        assert_eq!(profile.goals(), &compute_goals(&heavier).unwrap());
        assert!(profile.goals().calorie_goal > before.calorie_goal);
    }

    #[test]
    fn test_profile_update_failure_keeps_state() {
        let mut profile = Profile::new(reference_inputs()).unwrap();
        let snapshot = profile.clone();

        let mut broken = reference_inputs();
        broken.height_cm = f64::NAN;
        assert!(profile.update(broken).is_err());
        assert_eq!(profile, snapshot);
    }

    #[test]
    fn test_profile_serializes_flat() {
        let profile = Profile::new(reference_inputs()).unwrap();
        let json = serde_json::to_value(&profile).unwrap();
        assert_eq!(json["activity_level"], "lightly_active");
        assert_eq!(json["calorie_goal"], 1835.78125);

        let back: Profile = serde_json::from_value(json).unwrap();
        assert_eq!(back, profile);
    }

    fn activity_strategy() -> impl Strategy<Value = ActivityLevel> {
        prop_oneof![
            Just(ActivityLevel::Sedentary),
            Just(ActivityLevel::LightlyActive),
            Just(ActivityLevel::ModeratelyActive),
            Just(ActivityLevel::VeryActive),
        ]
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Property: identical inputs yield bit-identical goals
        #[test]
        fn prop_goals_deterministic(
            weight in 40.0f64..150.0,
            height in 140.0f64..210.0,
            age in 18u32..80,
            activity in activity_strategy()
        ) {
            let inputs = BodyInputs {
                age_years: age,
                gender: Gender::Female,
                height_cm: height,
                current_weight_kg: weight,
                goal_weight_kg: weight,
                activity_level: activity,
                goal: WeightGoal::MaintainWeight,
                dietary_preference: DietaryPreference::All,
            };
            let first = compute_goals(&inputs).unwrap();
            let second = compute_goals(&inputs).unwrap();
            prop_assert_eq!(first.calorie_goal.to_bits(), second.calorie_goal.to_bits());
            prop_assert_eq!(first.protein_goal.to_bits(), second.protein_goal.to_bits());
            prop_assert_eq!(first.carb_goal.to_bits(), second.carb_goal.to_bits());
            prop_assert_eq!(first.fat_goal.to_bits(), second.fat_goal.to_bits());
        }

        /// Property: Male BMR exceeds Female BMR by exactly 166 kcal
        #[test]
        fn prop_male_bmr_offset(
            weight in 50.0f64..100.0,
            height in 160.0f64..190.0,
            age in 20u32..60
        ) {
            let male = calculate_bmr_mifflin(weight, height, age, Gender::Male);
            let female = calculate_bmr_mifflin(weight, height, age, Gender::Female);
            prop_assert!(((male - female) - 166.0).abs() < 1e-9);
        }

        /// Property: macro grams convert back to their share of the calorie goal
        #[test]
        fn prop_macros_match_split(calories in 1000.0f64..5000.0) {
            let (protein, carbs, fat) = MacroSplit::default().grams_for(calories);
            prop_assert!((protein * 4.0 - calories * 0.30).abs() < 1e-9);
            prop_assert!((carbs * 4.0 - calories * 0.40).abs() < 1e-9);
            prop_assert!((fat * 9.0 - calories * 0.30).abs() < 1e-9);
        }
    }
}
