// ABOUTME: Rule-based recommendation selector over goal, calorie level, and meal type
// ABOUTME: Static lookup tables plus an ordered list of conditional calorie rules
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Recommendation selector
//!
//! Selection appends, in order: the meal-type table, the general tips, the
//! goal's base entry, then every conditional rule whose predicate holds.
//! The result is deduplicated by title (first occurrence wins) and capped at
//! [`MAX_RECOMMENDATIONS`].

use std::collections::HashSet;

use nutri_core::constants::recommendations::{
    HIGH_INTAKE_CALORIES, LOW_INTAKE_CALORIES, MAX_RECOMMENDATIONS, MUSCLE_GAIN_ALERT_CALORIES,
    WEIGHT_LOSS_ALERT_CALORIES,
};
use nutri_core::models::{
    Goal, MealType, Priority, RecommendationEntry, RecommendationKind as Kind,
};

static BREAKFAST: [RecommendationEntry; 3] = [
    RecommendationEntry::fixed(
        Kind::MealTiming,
        "🌅 Breakfast Boost",
        "Include protein and complex carbs for sustained energy throughout the morning.",
        Priority::High,
        Some(MealType::Breakfast),
    ),
    RecommendationEntry::fixed(
        Kind::FoodSuggestion,
        "🥚 Protein Power",
        "Consider eggs, Greek yogurt, or protein smoothie to keep you full until lunch.",
        Priority::Medium,
        Some(MealType::Breakfast),
    ),
    RecommendationEntry::fixed(
        Kind::NutritionTip,
        "💧 Morning Hydration",
        "Start your day with a glass of water to rehydrate after sleep.",
        Priority::High,
        Some(MealType::Breakfast),
    ),
];

static LUNCH: [RecommendationEntry; 3] = [
    RecommendationEntry::fixed(
        Kind::MealBalance,
        "🥗 Balanced Lunch",
        "Aim for 50% vegetables, 25% protein, and 25% whole grains for optimal nutrition.",
        Priority::Medium,
        Some(MealType::Lunch),
    ),
    RecommendationEntry::fixed(
        Kind::EnergyTip,
        "⚡ Afternoon Energy",
        "Include lean protein and complex carbs to avoid afternoon energy crashes.",
        Priority::Medium,
        Some(MealType::Lunch),
    ),
    RecommendationEntry::fixed(
        Kind::FoodSuggestion,
        "🥦 Veggie Focus",
        "Add at least 2 different colored vegetables for varied nutrients.",
        Priority::Medium,
        Some(MealType::Lunch),
    ),
];

static DINNER: [RecommendationEntry; 3] = [
    RecommendationEntry::fixed(
        Kind::MealTiming,
        "🌙 Light Dinner",
        "Keep dinner lighter and finish 2-3 hours before bedtime for better digestion.",
        Priority::Medium,
        Some(MealType::Dinner),
    ),
    RecommendationEntry::fixed(
        Kind::FoodSuggestion,
        "🍗 Lean Protein",
        "Choose grilled fish, chicken, or plant-based proteins for easier digestion at night.",
        Priority::Medium,
        Some(MealType::Dinner),
    ),
    RecommendationEntry::fixed(
        Kind::NutritionTip,
        "🌿 Herb Benefits",
        "Use herbs like turmeric, ginger, or garlic for anti-inflammatory benefits.",
        Priority::Low,
        Some(MealType::Dinner),
    ),
];

static SNACK: [RecommendationEntry; 3] = [
    RecommendationEntry::fixed(
        Kind::SnackTiming,
        "🕒 Smart Snacking",
        "Plan snacks between meals to maintain energy levels and prevent overeating.",
        Priority::Medium,
        Some(MealType::Snack),
    ),
    RecommendationEntry::fixed(
        Kind::FoodSuggestion,
        "🥜 Protein Snacks",
        "Choose protein-rich snacks like nuts, cheese, or hummus with veggies.",
        Priority::Medium,
        Some(MealType::Snack),
    ),
    RecommendationEntry::fixed(
        Kind::PortionTip,
        "📏 Portion Control",
        "Pre-portion snacks to avoid mindless eating.",
        Priority::High,
        Some(MealType::Snack),
    ),
];

static GENERAL_TIPS: [RecommendationEntry; 2] = [
    RecommendationEntry::fixed(
        Kind::Hydration,
        "💧 Stay Hydrated",
        "Drink at least 8 glasses of water throughout the day.",
        Priority::High,
        None,
    ),
    RecommendationEntry::fixed(
        Kind::Variety,
        "🌈 Eat the Rainbow",
        "Include fruits and vegetables of different colors for diverse nutrients.",
        Priority::Medium,
        None,
    ),
];

static WEIGHT_LOSS_TIP: RecommendationEntry = RecommendationEntry::fixed(
    Kind::GoalTip,
    "⚖️ Weight Loss Strategy",
    "Focus on high-volume, low-calorie foods like vegetables and lean proteins.",
    Priority::High,
    None,
);

static MUSCLE_GAIN_TIP: RecommendationEntry = RecommendationEntry::fixed(
    Kind::GoalTip,
    "💪 Muscle Building",
    "Ensure adequate protein intake (1.6-2.2g per kg of body weight) post-workout.",
    Priority::High,
    None,
);

static MAINTENANCE_TIP: RecommendationEntry = RecommendationEntry::fixed(
    Kind::GoalTip,
    "🔄 Maintenance Mode",
    "Focus on balanced meals and consistent eating patterns.",
    Priority::Medium,
    None,
);

/// An entry appended when its predicate holds for `(goal, calories)`
struct ConditionalRule {
    applies: fn(Goal, f64) -> bool,
    entry: RecommendationEntry,
}

fn weight_loss_over_target(goal: Goal, calories: f64) -> bool {
    goal == Goal::WeightLoss && calories > WEIGHT_LOSS_ALERT_CALORIES
}

fn muscle_gain_under_target(goal: Goal, calories: f64) -> bool {
    goal == Goal::MuscleGain && calories < MUSCLE_GAIN_ALERT_CALORIES
}

fn low_intake(_: Goal, calories: f64) -> bool {
    calories < LOW_INTAKE_CALORIES
}

fn high_intake(_: Goal, calories: f64) -> bool {
    calories > HIGH_INTAKE_CALORIES
}

static CONDITIONAL_RULES: [ConditionalRule; 4] = [
    ConditionalRule {
        applies: weight_loss_over_target,
        entry: RecommendationEntry::fixed(
            Kind::CalorieAlert,
            "📊 Calorie Awareness",
            "Consider smaller portions or more vegetables to reduce calorie density.",
            Priority::High,
            None,
        ),
    },
    ConditionalRule {
        applies: muscle_gain_under_target,
        entry: RecommendationEntry::fixed(
            Kind::CalorieAlert,
            "📈 Increase Calories",
            "Consider adding calorie-dense foods like nuts, avocados, or whole grains.",
            Priority::Medium,
            None,
        ),
    },
    ConditionalRule {
        applies: low_intake,
        entry: RecommendationEntry::fixed(
            Kind::CalorieWarning,
            "⚠️ Low Calorie Intake",
            "Your calorie intake seems low. Consider adding nutrient-dense foods.",
            Priority::High,
            None,
        ),
    },
    ConditionalRule {
        applies: high_intake,
        entry: RecommendationEntry::fixed(
            Kind::CalorieWarning,
            "⚠️ High Calorie Intake",
            "Consider balancing with more vegetables and monitoring portion sizes.",
            Priority::Medium,
            None,
        ),
    },
];

/// Static entries for a meal type
#[must_use]
pub fn meal_type_entries(meal_type: MealType) -> &'static [RecommendationEntry] {
    match meal_type {
        MealType::Breakfast => &BREAKFAST,
        MealType::Lunch => &LUNCH,
        MealType::Dinner => &DINNER,
        MealType::Snack => &SNACK,
    }
}

/// Tips included in every selection
#[must_use]
pub fn general_tips() -> &'static [RecommendationEntry] {
    &GENERAL_TIPS
}

/// Base entry for a goal; every goal other than weight loss and muscle gain maintains
#[must_use]
pub fn goal_entry(goal: Goal) -> &'static RecommendationEntry {
    match goal {
        Goal::WeightLoss => &WEIGHT_LOSS_TIP,
        Goal::MuscleGain => &MUSCLE_GAIN_TIP,
        Goal::Maintenance | Goal::ImproveHealth => &MAINTENANCE_TIP,
    }
}

/// Select recommendations for a goal, calorie level, and optional meal type
///
/// Deterministic and total: every input combination yields at most
/// [`MAX_RECOMMENDATIONS`] entries with unique titles. A NaN calorie level
/// matches no calorie rule.
#[must_use]
pub fn select(goal: Goal, calories: f64, meal_type: Option<MealType>) -> Vec<RecommendationEntry> {
    let by_meal_type = meal_type.map(meal_type_entries).unwrap_or_default();
    let conditional = CONDITIONAL_RULES
        .iter()
        .filter(|rule| (rule.applies)(goal, calories))
        .map(|rule| &rule.entry);

    let candidates = by_meal_type
        .iter()
        .chain(general_tips())
        .chain(std::iter::once(goal_entry(goal)))
        .chain(conditional);

    let mut seen = HashSet::new();
    candidates
        .filter(|entry| seen.insert(entry.title.as_ref()))
        .take(MAX_RECOMMENDATIONS)
        .cloned()
        .collect()
}
