//! # Subscription Quotes
//!
//! Prices the three subscription plans for a pet profile.
//!
//! ## Quote Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  PetProfile ──► daily_feeding_grams ──► pouches_per_day (150 g pouch)  │
//! │                                                │                        │
//! │              ┌─────────────────┬───────────────┴─┐                      │
//! │              ▼                 ▼                 ▼                      │
//! │          weekly ×7        monthly ×30      quarterly ×90               │
//! │              │                 │                 │                      │
//! │              ▼                 ▼                 ▼                      │
//! │     round(pouches) × rate[species][plan]  → price, 2 decimals          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Quote prices are display prices and carry two decimals, unlike order
//! amounts which carry three. The server still recomputes the quote before
//! it attaches the price to a cart line.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use ts_rs::TS;

use crate::error::CoreResult;
use crate::feeding::{self, FeedingPlan, WeightAssessment, WeightBracket};
use crate::money::Money;
use crate::settings::{FeedingSettings, PouchRates};
use crate::types::{ActivityLevel, AgeGroup, Goal, PetProfile, PlanType, Species};
use crate::validation;

/// Fractional digits on subscription display prices.
pub const QUOTE_PRICE_DP: u32 = 2;

// =============================================================================
// Result Types
// =============================================================================

/// Price for one plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SubscriptionQuote {
    pub plan_type: PlanType,
    pub total_pouches: u32,
    /// `total_pouches × price_per_pouch`, two decimals.
    #[ts(type = "string")]
    pub price: Money,
    #[ts(type = "string")]
    pub price_per_pouch: Money,
    /// Whole-percent saving per pouch against the weekly plan.
    pub savings_percent: u32,
    pub period_label: String,
}

/// Everything the questionnaire result page shows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FeedingGuide {
    pub profile: PetProfile,
    pub plan: FeedingPlan,
    pub ideal_weight: WeightBracket,
    pub weight: WeightAssessment,
    pub quotes: [SubscriptionQuote; 3],
}

// =============================================================================
// Quotes
// =============================================================================

/// Quote for one plan given the daily pouch count.
pub fn quote_for(
    plan: PlanType,
    species: Species,
    pouches_per_day: f64,
    rates: &PouchRates,
) -> SubscriptionQuote {
    let total_pouches = (pouches_per_day * f64::from(plan.days())).round().max(0.0) as u32;
    let price_per_pouch = rates.rate(species, plan);
    let price = price_per_pouch
        .multiply_quantity(i64::from(total_pouches))
        .round_dp(QUOTE_PRICE_DP);

    SubscriptionQuote {
        plan_type: plan,
        total_pouches,
        price,
        price_per_pouch,
        savings_percent: savings_percent(rates.rate(species, PlanType::Weekly), price_per_pouch),
        period_label: plan.period_label().to_string(),
    }
}

fn savings_percent(weekly: Money, rate: Money) -> u32 {
    if !weekly.is_positive() || rate >= weekly {
        return 0;
    }
    let saved = (weekly - rate).fils() as f64 / weekly.fils() as f64 * 100.0;
    saved.round() as u32
}

/// Quotes for all three plans, in weekly / monthly / quarterly order, using
/// the default pouch size and rates.
///
/// ## Example
/// ```rust
/// use pawcart_core::subscription::subscription_quotes;
/// use pawcart_core::types::{ActivityLevel, AgeGroup, Goal, PlanType, Species};
///
/// let quotes = subscription_quotes(
///     Species::Dog, 10.0, AgeGroup::Adult, ActivityLevel::Normal, Goal::Maintain,
/// );
/// assert_eq!(quotes.len(), 3);
/// assert_eq!(quotes[0].plan_type, PlanType::Weekly);
/// assert_eq!(quotes[0].total_pouches, 14);
/// ```
pub fn subscription_quotes(
    species: Species,
    weight_kg: f64,
    age_group: AgeGroup,
    activity: ActivityLevel,
    goal: Goal,
) -> [SubscriptionQuote; 3] {
    let profile = PetProfile {
        species,
        weight_kg,
        age_group,
        activity_level: activity,
        goal,
    };
    subscription_quotes_with(&profile, &FeedingSettings::default())
}

/// Quotes for all three plans with explicit settings.
pub fn subscription_quotes_with(
    profile: &PetProfile,
    settings: &FeedingSettings,
) -> [SubscriptionQuote; 3] {
    let daily_grams = feeding::daily_feeding_grams(
        profile.species,
        profile.weight_kg,
        profile.age_group,
        profile.activity_level,
        profile.goal,
    );
    let per_day = feeding::pouches_per_day(daily_grams, settings.subscription_pouch_grams);

    PlanType::all().map(|plan| quote_for(plan, profile.species, per_day, &settings.pouch_rates))
}

// =============================================================================
// Strict Path
// =============================================================================

/// Validates a questionnaire profile and builds the full result page.
///
/// The feeding plan uses the guide pouch size; the quotes use the
/// subscription pouch size.
pub fn feeding_guide(
    profile: &PetProfile,
    settings: &FeedingSettings,
) -> CoreResult<FeedingGuide> {
    validation::validate_pet_profile(profile).map_err(|e| {
        warn!(error = %e, "rejected pet profile");
        e
    })?;

    let ideal_weight = feeding::ideal_weight_bracket(profile.species, profile.weight_kg);
    let guide = FeedingGuide {
        profile: *profile,
        plan: feeding::feeding_plan(profile, settings.guide_pouch_grams),
        ideal_weight,
        weight: feeding::weight_status(profile.weight_kg, ideal_weight),
        quotes: subscription_quotes_with(profile, settings),
    };

    debug!(
        species = ?profile.species,
        daily_grams = guide.plan.daily_grams,
        status = ?guide.weight.status,
        "feeding guide built"
    );

    Ok(guide)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;
    use crate::feeding::WeightStatus;
    use crate::settings::PlanRates;

    fn adult_dog(weight_kg: f64) -> PetProfile {
        PetProfile {
            species: Species::Dog,
            weight_kg,
            age_group: AgeGroup::Adult,
            activity_level: ActivityLevel::Normal,
            goal: Goal::Maintain,
        }
    }

    #[test]
    fn test_quotes_for_adult_dog() {
        // 275 g / 150 g -> 2.0 pouches a day
        let quotes = subscription_quotes_with(&adult_dog(10.0), &FeedingSettings::default());

        assert_eq!(quotes[0].plan_type, PlanType::Weekly);
        assert_eq!(quotes[0].total_pouches, 14);
        assert_eq!(quotes[0].price, Money::from_fils(13_300));

        assert_eq!(quotes[1].plan_type, PlanType::Monthly);
        assert_eq!(quotes[1].total_pouches, 60);
        assert_eq!(quotes[1].price, Money::from_fils(54_000));

        assert_eq!(quotes[2].plan_type, PlanType::Quarterly);
        assert_eq!(quotes[2].total_pouches, 180);
        assert_eq!(quotes[2].price, Money::from_fils(153_000));
        assert_eq!(quotes[2].period_label, "per 3 months");
    }

    #[test]
    fn test_half_pouch_totals_round() {
        // 0.5 pouch/day * 7 = 3.5 -> 4
        let quote = quote_for(PlanType::Weekly, Species::Cat, 0.5, &PouchRates::default());
        assert_eq!(quote.total_pouches, 4);
        assert_eq!(quote.price, Money::from_fils(3_200));
    }

    #[test]
    fn test_quote_price_has_two_decimals() {
        let rates = PouchRates {
            dog: PlanRates {
                weekly: Money::from_fils(1_333),
                monthly: Money::from_fils(1_333),
                quarterly: Money::from_fils(1_333),
            },
            cat: PouchRates::default().cat,
        };
        // 14 * 1.333 = 18.662 -> 18.66
        let quote = quote_for(PlanType::Weekly, Species::Dog, 2.0, &rates);
        assert_eq!(quote.price, Money::from_fils(18_660));
        assert_eq!(quote.price.fils() % 10, 0);
    }

    #[test]
    fn test_savings_against_weekly() {
        let quotes = subscription_quotes_with(&adult_dog(10.0), &FeedingSettings::default());
        assert_eq!(quotes[0].savings_percent, 0);
        // 0.950 -> 0.900 is 5.26%
        assert_eq!(quotes[1].savings_percent, 5);
        // 0.950 -> 0.850 is 10.5%
        assert_eq!(quotes[2].savings_percent, 11);
    }

    #[test]
    fn test_always_three_quotes() {
        let species = [Species::Dog, Species::Cat];
        let ages = [AgeGroup::Puppy, AgeGroup::Kitten, AgeGroup::Adult, AgeGroup::Senior];
        let activities = [ActivityLevel::Low, ActivityLevel::Normal, ActivityLevel::High];
        let goals = [Goal::Maintain, Goal::LoseWeight, Goal::GainWeight];

        for s in species {
            for a in ages {
                for act in activities {
                    for g in goals {
                        for w in [0.0, 0.8, 4.0, 30.0, 90.0] {
                            let quotes = subscription_quotes(s, w, a, act, g);
                            let plans: Vec<PlanType> =
                                quotes.iter().map(|q| q.plan_type).collect();
                            assert_eq!(plans, PlanType::all().to_vec());
                            assert!(quotes.iter().all(|q| q.total_pouches >= 4));
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_feeding_guide_uses_both_pouch_sizes() {
        let guide = feeding_guide(&adult_dog(10.0), &FeedingSettings::default()).unwrap();

        // 120 g guide pouch -> 2.5 a day; 150 g subscription pouch -> 14 a week
        assert_eq!(guide.plan.pouches_per_day, 2.5);
        assert_eq!(guide.quotes[0].total_pouches, 14);
        assert_eq!(guide.weight.status, WeightStatus::Healthy);
        assert_eq!((guide.ideal_weight.min, guide.ideal_weight.max), (5.0, 10.0));
    }

    #[test]
    fn test_feeding_guide_rejects_invalid_profile() {
        let kitten_dog = PetProfile {
            age_group: AgeGroup::Kitten,
            ..adult_dog(10.0)
        };
        assert!(matches!(
            feeding_guide(&kitten_dog, &FeedingSettings::default()),
            Err(CoreError::Validation(_))
        ));

        assert!(feeding_guide(&adult_dog(0.0), &FeedingSettings::default()).is_err());
    }

    #[test]
    fn test_quote_wire_shape() {
        let quotes = subscription_quotes_with(&adult_dog(10.0), &FeedingSettings::default());
        let json = serde_json::to_value(&quotes[1]).unwrap();
        assert_eq!(json["plan_type"], "monthly");
        assert_eq!(json["price"], "54.000");
        assert_eq!(json["total_pouches"], 60);
    }
}
