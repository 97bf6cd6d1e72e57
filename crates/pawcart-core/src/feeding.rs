//! # Feeding Calculator
//!
//! Converts a pet's biometrics into a daily gram requirement, an ideal
//! weight bracket, a weight classification and a feeding plan.
//!
//! ## Daily Grams
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  base = weight_kg × 0.0275 × 1000                                       │
//! │                                                                         │
//! │  grams = round(base × age × activity × goal)                            │
//! │                                                                         │
//! │  age       puppy/kitten 1.4   adult 1.0   senior 0.9                    │
//! │  activity  dog: 0.9 / 1.0 / 1.2     cat: 0.9 / 1.0 / 1.15               │
//! │  goal      maintain 1.0   lose 0.85   gain 1.2 (dog) / 1.15 (cat)       │
//! │                                                                         │
//! │  lose_weight feeds to the TARGET weight instead:                        │
//! │    base = midpoint(ideal bracket) × 0.0275 × 1000                       │
//! │    goal = 0.9                                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Weights and grams are measurements, not money, so this module works in
//! `f64` and rounds to whole grams.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::types::{ActivityLevel, AgeGroup, Goal, PetProfile, Species};

/// Food fraction of body weight per day, before factors.
const BASE_FOOD_FRACTION: f64 = 0.0275;

/// Goal multiplier on the weight-loss path (applied to ideal weight).
const WEIGHT_LOSS_TARGET_FACTOR: f64 = 0.9;

/// Deviation above the bracket still counted as "slightly above" (percent).
const SLIGHTLY_ABOVE_LIMIT_PCT: f64 = 15.0;

/// Float slack on the slightly-above cut-off.
const DEVIATION_EPSILON: f64 = 1e-9;

/// Ideal weight buckets for dogs, in kg, smallest first.
const DOG_BRACKETS: [(f64, f64); 7] = [
    (1.0, 5.0),
    (5.0, 10.0),
    (10.0, 15.0),
    (15.0, 25.0),
    (25.0, 35.0),
    (35.0, 45.0),
    (45.0, 55.0),
];

/// Ideal weight buckets for cats, in kg, smallest first.
const CAT_BRACKETS: [(f64, f64); 5] = [(2.0, 3.0), (3.0, 4.0), (4.0, 5.0), (5.0, 6.0), (6.0, 7.0)];

// =============================================================================
// Result Types
// =============================================================================

/// Inclusive ideal weight range in kg.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct WeightBracket {
    pub min: f64,
    pub max: f64,
}

impl WeightBracket {
    pub fn midpoint(&self) -> f64 {
        (self.min + self.max) / 2.0
    }

    pub fn contains(&self, weight_kg: f64) -> bool {
        weight_kg >= self.min && weight_kg <= self.max
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum WeightStatus {
    Healthy,
    Underweight,
    SlightlyAbove,
    Overweight,
}

/// Current weight measured against an ideal bracket.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct WeightAssessment {
    pub status: WeightStatus,
    pub ideal_min: f64,
    pub ideal_max: f64,
    /// Distance outside the bracket as a percentage of the nearest bound,
    /// one decimal. Zero when healthy.
    pub percentage: f64,
}

/// Daily feeding guide.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FeedingPlan {
    pub daily_grams: u32,
    /// In half-pouch steps, never below 0.5.
    pub pouches_per_day: f64,
    pub meals_per_day: u32,
    /// Rounded to the nearest 10 g.
    pub grams_per_meal: u32,
}

// =============================================================================
// Factors
// =============================================================================

fn age_factor(age_group: AgeGroup) -> f64 {
    match age_group {
        AgeGroup::Puppy | AgeGroup::Kitten => 1.4,
        AgeGroup::Adult => 1.0,
        AgeGroup::Senior => 0.9,
    }
}

fn activity_factor(species: Species, activity: ActivityLevel) -> f64 {
    match (species, activity) {
        (_, ActivityLevel::Low) => 0.9,
        (_, ActivityLevel::Normal) => 1.0,
        (Species::Dog, ActivityLevel::High) => 1.2,
        (Species::Cat, ActivityLevel::High) => 1.15,
    }
}

fn goal_factor(species: Species, goal: Goal) -> f64 {
    match (species, goal) {
        (_, Goal::Maintain) => 1.0,
        (_, Goal::LoseWeight) => 0.85,
        (Species::Dog, Goal::GainWeight) => 1.2,
        (Species::Cat, Goal::GainWeight) => 1.15,
    }
}

fn base_grams(weight_kg: f64) -> f64 {
    weight_kg * BASE_FOOD_FRACTION * 1000.0
}

/// Rounds `value` to the nearest multiple of `step`.
pub fn round_to_step(value: f64, step: f64) -> f64 {
    (value / step).round() * step
}

/// One decimal place, for reported percentages.
fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Whole grams; negative and NaN inputs land on zero.
fn to_grams(value: f64) -> u32 {
    value.round().max(0.0) as u32
}

// =============================================================================
// Operations
// =============================================================================

/// Daily food requirement in grams.
///
/// For `LoseWeight` the base comes from the midpoint of the ideal bracket and
/// the goal multiplier is 0.9; the generic 0.85 lose factor is not used on
/// that path.
///
/// ## Example
/// ```rust
/// use pawcart_core::feeding::daily_feeding_grams;
/// use pawcart_core::types::{ActivityLevel, AgeGroup, Goal, Species};
///
/// let grams = daily_feeding_grams(
///     Species::Dog, 10.0, AgeGroup::Adult, ActivityLevel::Normal, Goal::Maintain,
/// );
/// assert_eq!(grams, 275);
/// ```
pub fn daily_feeding_grams(
    species: Species,
    weight_kg: f64,
    age_group: AgeGroup,
    activity: ActivityLevel,
    goal: Goal,
) -> u32 {
    let age = age_factor(age_group);
    let activity = activity_factor(species, activity);

    if goal == Goal::LoseWeight {
        let target = ideal_weight_bracket(species, weight_kg).midpoint();
        return to_grams(base_grams(target) * age * activity * WEIGHT_LOSS_TARGET_FACTOR);
    }

    to_grams(base_grams(weight_kg) * age * activity * goal_factor(species, goal))
}

/// Ideal weight bracket for a species and current weight.
///
/// The first bucket containing the weight wins, so a weight on a shared
/// boundary selects the smaller bucket. Heavier than every bucket selects the
/// largest; lighter than every bucket selects the smallest.
pub fn ideal_weight_bracket(species: Species, weight_kg: f64) -> WeightBracket {
    let buckets: &[(f64, f64)] = match species {
        Species::Dog => &DOG_BRACKETS,
        Species::Cat => &CAT_BRACKETS,
    };

    let (min, max) = buckets
        .iter()
        .copied()
        .find(|&(min, max)| weight_kg >= min && weight_kg <= max)
        .unwrap_or_else(|| {
            let largest = buckets[buckets.len() - 1];
            if weight_kg > largest.1 {
                largest
            } else {
                buckets[0]
            }
        });

    WeightBracket { min, max }
}

/// Classifies a weight against a bracket.
///
/// ## Rules
/// - inside `[min, max]` (inclusive): healthy
/// - below `min`: underweight, deviation `(min - w) / min`
/// - above `max`: deviation `(w - max) / max`; up to 15% is slightly above,
///   beyond that overweight
///
/// The 15% cut-off is applied to the raw deviation; only the reported
/// `percentage` is rounded to one decimal.
pub fn weight_status(weight_kg: f64, bracket: WeightBracket) -> WeightAssessment {
    let (status, percentage) = if bracket.contains(weight_kg) {
        (WeightStatus::Healthy, 0.0)
    } else if weight_kg < bracket.min {
        let pct = round_to_tenth((bracket.min - weight_kg) / bracket.min * 100.0);
        (WeightStatus::Underweight, pct)
    } else {
        let deviation = (weight_kg - bracket.max) / bracket.max * 100.0;
        let status = if deviation <= SLIGHTLY_ABOVE_LIMIT_PCT + DEVIATION_EPSILON {
            WeightStatus::SlightlyAbove
        } else {
            WeightStatus::Overweight
        };
        (status, round_to_tenth(deviation))
    };

    WeightAssessment {
        status,
        ideal_min: bracket.min,
        ideal_max: bracket.max,
        percentage,
    }
}

/// Pouches per day in half-pouch steps, never below half a pouch.
pub fn pouches_per_day(daily_grams: u32, pouch_grams: f64) -> f64 {
    if pouch_grams.is_nan() || pouch_grams <= 0.0 {
        return 0.5;
    }
    round_to_step(f64::from(daily_grams) / pouch_grams, 0.5).max(0.5)
}

/// Meals per day: growing animals eat three times, everyone else twice.
pub fn meals_per_day(age_group: AgeGroup) -> u32 {
    if age_group.is_juvenile() {
        3
    } else {
        2
    }
}

/// Builds the feeding guide shown after the questionnaire.
pub fn feeding_plan(profile: &PetProfile, pouch_grams: f64) -> FeedingPlan {
    let daily_grams = daily_feeding_grams(
        profile.species,
        profile.weight_kg,
        profile.age_group,
        profile.activity_level,
        profile.goal,
    );
    let meals = meals_per_day(profile.age_group);
    let grams_per_meal = to_grams(round_to_step(f64::from(daily_grams) / f64::from(meals), 10.0));

    FeedingPlan {
        daily_grams,
        pouches_per_day: pouches_per_day(daily_grams, pouch_grams),
        meals_per_day: meals,
        grams_per_meal,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
