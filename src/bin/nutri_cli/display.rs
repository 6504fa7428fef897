// ABOUTME: Output formatting helpers for nutri-cli
// ABOUTME: Renders the food catalog, meal log, running totals, recommendations, and profiles
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use nutri_ai::client::loader::{DashboardState, LoadStatus};
use nutri_ai::client::AuthSession;
use nutri_ai::models::{
    FoodItem, MacroTotals, Meal, MealOwner, Priority, PublicUser, RecommendationEntry,
};

const RULE_WIDTH: usize = 72;

fn rule() -> String {
    "=".repeat(RULE_WIDTH)
}

const fn priority_label(priority: Priority) -> &'static str {
    match priority {
        Priority::High => "HIGH",
        Priority::Medium => "MED ",
        Priority::Low => "LOW ",
    }
}

/// Catalog as an aligned table
pub fn display_foods(foods: &[FoodItem]) {
    if foods.is_empty() {
        println!("No foods in the catalog. Run seed-foods or `nutri-cli foods add`.");
        return;
    }
    println!(
        "{:<36}  {:<20} {:<10} {:>7} {:>7} {:>7} {:>7}  Serving",
        "ID", "Name", "Category", "kcal", "P (g)", "C (g)", "F (g)"
    );
    println!("{}", "-".repeat(RULE_WIDTH + 40));
    for food in foods {
        let serving = food
            .serving_size
            .as_ref()
            .map(|s| format!("{} {}", s.amount, s.unit))
            .unwrap_or_default();
        println!(
            "{:<36}  {:<20} {:<10} {:>7.1} {:>7.1} {:>7.1} {:>7.1}  {}",
            food.id,
            food.name,
            food.category.as_str(),
            food.macros.calories,
            food.macros.protein,
            food.macros.carbs,
            food.macros.fat,
            serving
        );
    }
    println!("\n{} foods", foods.len());
}

/// One created catalog entry
pub fn display_food_created(food: &FoodItem) {
    println!("\nFood added: {} ({})", food.name, food.id);
    display_totals_line("Per serving", &food.macros);
}

/// Meal log, newest last, with each line item resolved
pub fn display_meals(meals: &[Meal]) {
    if meals.is_empty() {
        println!("No meals logged yet.");
        return;
    }
    for meal in meals {
        display_meal(meal);
    }
}

/// One meal with its line items
pub fn display_meal(meal: &Meal) {
    let owner = match meal.user {
        MealOwner::Guest => "guest".to_owned(),
        MealOwner::User(id) => id.to_string(),
    };
    println!(
        "\n{} [{}] {} (owner: {owner})",
        meal.name,
        meal.created_at.format("%Y-%m-%d %H:%M UTC"),
        meal.id
    );
    for item in &meal.foods {
        match item.food.as_food() {
            Some(food) => println!("   {:>4} x {}", item.quantity, food.name),
            None => println!("   {:>4} x <missing food {}>", item.quantity, item.food_id),
        }
    }
    display_totals_line("Total", &meal.totals);
}

fn display_totals_line(label: &str, totals: &MacroTotals) {
    println!(
        "   {label}: {:.0} kcal | protein {:.1} g | carbs {:.1} g | fat {:.1} g",
        totals.calories, totals.protein, totals.carbs, totals.fat
    );
}

/// Recommendation list, highest priority first as returned
pub fn display_recommendations(entries: &[RecommendationEntry]) {
    if entries.is_empty() {
        println!("No recommendations available.");
        return;
    }
    for entry in entries {
        println!("   [{}] {}", priority_label(entry.priority), entry.title);
        println!("          {}", entry.message);
    }
}

fn status_note(status: &LoadStatus) -> Option<String> {
    match status {
        LoadStatus::Failed(message) => Some(format!("unavailable: {message}")),
        LoadStatus::Idle | LoadStatus::Loading => Some("not loaded".to_owned()),
        LoadStatus::Ready => None,
    }
}

/// Full dashboard: totals, meal log, and recommendations
pub fn display_dashboard(state: &DashboardState, heading: &str) {
    println!("\n{heading}");
    println!("{}", rule());

    println!("Today's Nutrition:");
    display_totals_line("Running total", &state.totals);

    println!("\nMeals:");
    if let Some(note) = status_note(&state.meals_status) {
        println!("   Meals {note}");
    } else {
        display_meals(&state.meals);
    }

    println!("\nRecommendations:");
    display_recommendations(&state.recommendations);

    match status_note(&state.foods_status) {
        Some(note) => println!("\nCatalog {note}"),
        None => println!("\n{} foods available in the catalog", state.foods.len()),
    }
    println!("{}", rule());
}

/// Account details without secrets
pub fn display_user(user: &PublicUser) {
    let attributes = &user.attributes;
    println!("\nUser: {} <{}>", user.username, user.email);
    println!("   ID: {}", user.id);
    println!("   Goal: {}", attributes.goal.as_str());
    if let Some(age) = attributes.age {
        println!("   Age: {age}");
    }
    if let Some(weight) = attributes.weight {
        println!("   Weight: {weight} kg");
    }
    if let Some(height) = attributes.height {
        println!("   Height: {height} cm");
    }
    if !attributes.dietary_preferences.is_empty() {
        println!(
            "   Dietary preferences: {}",
            attributes.dietary_preferences.join(", ")
        );
    }
    if !attributes.allergies.is_empty() {
        println!("   Allergies: {}", attributes.allergies.join(", "));
    }
    println!("   Member since: {}", user.created_at.format("%Y-%m-%d"));
}

/// Register or login result with the bearer token
pub fn display_session(session: &AuthSession) {
    println!("\n{}", session.message);
    println!("{}", rule());
    display_user(&session.user);
    println!("\nBearer token:");
    println!("{}", session.token);
    println!("{}", rule());
    println!("Use it with later commands:");
    println!("  export NUTRI_AI_TOKEN=\"{}\"", session.token);
}
