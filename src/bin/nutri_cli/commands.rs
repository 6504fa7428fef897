// ABOUTME: Command implementations for nutri-cli
// ABOUTME: Each command calls the API client and hands the result to the display helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use anyhow::{bail, Result};
use chrono::NaiveDate;
use clap::Args;
use nutri_ai::client::loader::DashboardLoader;
use nutri_ai::client::{
    CreateFoodRequest, CreateMealRequest, LineItemRequest, NutriClient, RegisterPayload,
};
use nutri_ai::models::{FoodCategory, Goal, MealOwner, MealType, ServingSize};
use nutri_core::constants::limits::{DEFAULT_QUANTITY, MIN_QUANTITY};
use tracing::warn;
use uuid::Uuid;

use crate::display;

/// Arguments of `foods add`
#[derive(Args)]
pub struct FoodArgs {
    /// Display name
    #[arg(long)]
    name: String,

    /// Calories per serving
    #[arg(long)]
    calories: f64,

    /// Protein grams per serving
    #[arg(long)]
    protein: f64,

    /// Carbohydrate grams per serving
    #[arg(long)]
    carbs: f64,

    /// Fat grams per serving
    #[arg(long)]
    fat: f64,

    /// Catalog category
    #[arg(long, value_parser = crate::parse_category)]
    category: Option<FoodCategory>,

    /// Serving amount, e.g. 100
    #[arg(long, requires = "serving_unit")]
    serving_amount: Option<f64>,

    /// Serving unit, e.g. g
    #[arg(long, requires = "serving_amount")]
    serving_unit: Option<String>,
}

/// Arguments of `register`
#[derive(Args)]
pub struct RegisterArgs {
    /// Username, at least 3 characters
    #[arg(long)]
    username: String,

    /// Email
    #[arg(long)]
    email: String,

    /// Password, at least 6 characters
    #[arg(long)]
    password: String,

    /// Age in years
    #[arg(long)]
    age: Option<u32>,

    /// Weight in kilograms
    #[arg(long)]
    weight: Option<f64>,

    /// Height in centimeters
    #[arg(long)]
    height: Option<f64>,

    /// Nutrition goal
    #[arg(long)]
    goal: Option<String>,
}

/// Parse `FOOD_ID` or `FOOD_ID:QUANTITY`
pub fn parse_line_item(s: &str) -> Result<LineItemRequest, String> {
    let (id, quantity) = match s.split_once(':') {
        Some((id, quantity)) => {
            let quantity: f64 = quantity
                .trim()
                .parse()
                .map_err(|_| format!("invalid quantity in '{s}'"))?;
            (id, quantity)
        }
        None => (s, DEFAULT_QUANTITY),
    };
    if !quantity.is_finite() || quantity < MIN_QUANTITY {
        return Err(format!("quantity must be at least {MIN_QUANTITY} in '{s}'"));
    }
    let food = Uuid::parse_str(id.trim()).map_err(|_| format!("invalid food id in '{s}'"))?;
    Ok(LineItemRequest { food, quantity })
}

/// `foods list`
pub async fn list_foods(client: &NutriClient) -> Result<()> {
    let foods = client.list_foods().await?;
    display::display_foods(&foods);
    Ok(())
}

/// `foods add`
pub async fn add_food(client: &NutriClient, args: FoodArgs) -> Result<()> {
    let serving_size = match (args.serving_amount, args.serving_unit) {
        (Some(amount), Some(unit)) => Some(ServingSize { amount, unit }),
        _ => None,
    };
    let request = CreateFoodRequest {
        name: args.name,
        calories: args.calories,
        protein: args.protein,
        carbs: args.carbs,
        fat: args.fat,
        category: args.category,
        serving_size,
    };
    let food = client.create_food(&request).await?;
    display::display_food_created(&food);
    Ok(())
}

/// `meals list`
pub async fn list_meals(client: &NutriClient, user: Option<Uuid>) -> Result<()> {
    let meals = client.list_meals(MealOwner::from(user)).await?;
    display::display_meals(&meals);
    Ok(())
}

/// `meals log`
pub async fn log_meal(
    client: &NutriClient,
    name: String,
    foods: Vec<LineItemRequest>,
    user: Option<Uuid>,
) -> Result<()> {
    if user.is_some() && client.token().is_some() {
        warn!("--user is ignored when a token is set; the meal belongs to the logged-in user");
    }
    let meal = client
        .create_meal(&CreateMealRequest { name, foods, user })
        .await?;
    println!("\nMeal logged");
    display::display_meal(&meal);
    Ok(())
}

/// `meals delete`
pub async fn delete_meal(client: &NutriClient, id: Uuid) -> Result<()> {
    client.delete_meal(id).await?;
    println!("Meal {id} deleted");
    Ok(())
}

/// `dashboard`
///
/// With a token the dashboard shows that user's meals and goal; without one
/// it shows every meal with the given goal.
pub async fn dashboard(client: &NutriClient, meal_type: MealType, goal: Option<Goal>) -> Result<()> {
    let (owner, goal, heading) = if client.token().is_some() {
        let user = client.profile().await?;
        let heading = format!("Welcome back, {}!", user.username);
        (
            MealOwner::User(user.id),
            goal.unwrap_or(user.attributes.goal),
            heading,
        )
    } else {
        (
            MealOwner::Guest,
            goal.unwrap_or_default(),
            "Nutri-AI Dashboard (guest)".to_owned(),
        )
    };

    let mut loader = DashboardLoader::new();
    loader.refresh(client, owner, goal, Some(meal_type)).await;
    display::display_dashboard(loader.state(), &heading);
    Ok(())
}

/// `recommend`
pub async fn recommend(
    client: &NutriClient,
    goal: Goal,
    calories: f64,
    meal_type: Option<MealType>,
) -> Result<()> {
    let entries = client.recommendations(goal, calories, meal_type).await?;
    println!("\nRecommendations for {} at {calories:.0} kcal:", goal.as_str());
    display::display_recommendations(&entries);
    Ok(())
}

/// `summary`
pub async fn summary(client: &NutriClient, user: Option<Uuid>, date: Option<NaiveDate>) -> Result<()> {
    let summary = client
        .nutrition_summary(MealOwner::from(user), date)
        .await?;
    let scope = date.map_or_else(|| "all time".to_owned(), |d| d.to_string());
    println!("\nNutrition summary ({scope}, {} meals)", summary.meal_count);
    for (field, value) in summary.totals.fields() {
        println!("   {field:<9} {value:>9.1}");
    }
    Ok(())
}

/// `register`
pub async fn register(client: &NutriClient, args: RegisterArgs) -> Result<()> {
    let goals = match args.goal.as_deref() {
        None => None,
        Some(raw) => match Goal::try_parse(raw) {
            Some(goal) => Some(goal),
            None => bail!("Unknown goal '{raw}'"),
        },
    };
    let payload = RegisterPayload {
        username: args.username,
        email: args.email,
        password: args.password,
        age: args.age,
        weight: args.weight,
        height: args.height,
        goals,
    };
    let session = client.register(&payload).await?;
    display::display_session(&session);
    Ok(())
}

/// `login`
pub async fn login(client: &NutriClient, email: &str, password: &str) -> Result<()> {
    let session = client.login(email, password).await?;
    display::display_session(&session);
    Ok(())
}

/// `profile`
pub async fn profile(client: &NutriClient) -> Result<()> {
    if client.token().is_none() {
        bail!("No token set. Pass --token or export NUTRI_AI_TOKEN after `login`.");
    }
    let user = client.profile().await?;
    display::display_user(&user);
    Ok(())
}

/// `health`
pub async fn health(client: &NutriClient) -> Result<()> {
    let body = client.health().await?;
    println!("{}", serde_json::to_string_pretty(&body)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_line_item() {
        let id = Uuid::new_v4();
        let item = parse_line_item(&format!("{id}:2.5")).unwrap();
        assert_eq!(item.food, id);
        assert!((item.quantity - 2.5).abs() < f64::EPSILON);

        let item = parse_line_item(&id.to_string()).unwrap();
        assert!((item.quantity - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_parse_line_item_rejects_bad_input() {
        let id = Uuid::new_v4();
        assert!(parse_line_item(&format!("{id}:0.5")).is_err());
        assert!(parse_line_item(&format!("{id}:many")).is_err());
        assert!(parse_line_item("apple:1").is_err());
    }
}
