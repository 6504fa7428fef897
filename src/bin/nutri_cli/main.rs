// ABOUTME: Nutri-AI CLI - terminal client for the nutrition tracking API
// ABOUTME: Browses the catalog, logs meals, shows the dashboard, and manages the account session
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//!
//! Usage:
//! ```bash
//! # Browse the food catalog
//! nutri-cli foods list
//!
//! # Log a breakfast of two servings of one food and one of another
//! nutri-cli meals log --name breakfast --food <food-id>:2 --food <food-id>
//!
//! # Dashboard: meal log, running totals, and recommendations
//! nutri-cli dashboard --meal-type lunch
//!
//! # Create an account and keep the token for later commands
//! nutri-cli register --username alice --email alice@example.com --password secret1
//! export NUTRI_AI_TOKEN=...
//! nutri-cli profile
//! ```

mod commands;
mod display;

use anyhow::Result;
use clap::{Parser, Subcommand};
use nutri_ai::client::{LineItemRequest, NutriClient};
use nutri_ai::models::{FoodCategory, Goal, MealType};
use tracing::debug;
use uuid::Uuid;

use commands::{FoodArgs, RegisterArgs};

#[derive(Parser)]
#[command(
    name = "nutri-cli",
    about = "Nutri-AI Terminal Client",
    long_about = "Terminal client for the Nutri-AI API: food catalog, meal log, dashboard, and account."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// API base URL
    #[arg(long, global = true, env = "NUTRI_AI_URL", default_value = "http://localhost:5000")]
    server: String,

    /// Bearer token from `login` or `register`
    #[arg(long, global = true, env = "NUTRI_AI_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// Food catalog commands
    Foods {
        #[command(subcommand)]
        action: FoodCommand,
    },

    /// Meal log commands
    Meals {
        #[command(subcommand)]
        action: MealCommand,
    },

    /// Meal log, running totals, and recommendations in one view
    Dashboard {
        /// Meal type for meal-specific recommendations
        #[arg(long, value_parser = parse_meal_type, default_value = "breakfast")]
        meal_type: MealType,

        /// Goal when not logged in
        #[arg(long, value_parser = parse_goal)]
        goal: Option<Goal>,
    },

    /// Recommendations for a goal and calorie intake
    Recommend {
        /// Nutrition goal
        #[arg(long, value_parser = parse_goal, default_value = "maintenance")]
        goal: Goal,

        /// Calories consumed so far
        #[arg(long, default_value_t = 0.0)]
        calories: f64,

        /// Meal type
        #[arg(long, value_parser = parse_meal_type)]
        meal_type: Option<MealType>,
    },

    /// Summed nutrition over logged meals
    Summary {
        /// Only meals of this user
        #[arg(long)]
        user: Option<Uuid>,

        /// UTC day as YYYY-MM-DD
        #[arg(long)]
        date: Option<chrono::NaiveDate>,
    },

    /// Create an account
    Register(RegisterArgs),

    /// Log in and print a bearer token
    Login {
        /// Account email
        #[arg(long)]
        email: String,

        /// Account password
        #[arg(long)]
        password: String,
    },

    /// Show the account behind the bearer token
    Profile,

    /// Check server and database health
    Health,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum FoodCommand {
    /// List the catalog
    List,

    /// Add a food to the catalog
    Add(FoodArgs),
}

#[non_exhaustive]
#[derive(Subcommand)]
enum MealCommand {
    /// List logged meals
    List {
        /// Only meals of this user
        #[arg(long)]
        user: Option<Uuid>,
    },

    /// Log a meal
    Log {
        /// Meal name, usually the meal type
        #[arg(long, default_value = "breakfast")]
        name: String,

        /// Line item as FOOD_ID or FOOD_ID:QUANTITY, repeatable
        #[arg(long = "food", required = true, value_parser = commands::parse_line_item)]
        foods: Vec<LineItemRequest>,

        /// Owner when not logged in
        #[arg(long)]
        user: Option<Uuid>,
    },

    /// Delete a logged meal
    Delete {
        /// Meal id
        id: Uuid,
    },
}

fn parse_meal_type(s: &str) -> Result<MealType, String> {
    MealType::parse(s).ok_or_else(|| format!("unknown meal type '{s}' (breakfast, lunch, dinner, snack)"))
}

fn parse_goal(s: &str) -> Result<Goal, String> {
    Goal::try_parse(s).ok_or_else(|| {
        let names: Vec<&str> = Goal::ALL.iter().map(Goal::as_str).collect();
        format!("unknown goal '{s}' ({})", names.join(", "))
    })
}

/// Parse a catalog category argument
pub fn parse_category(s: &str) -> Result<FoodCategory, String> {
    FoodCategory::try_parse(s).ok_or_else(|| {
        let names: Vec<&str> = FoodCategory::ALL.iter().map(FoodCategory::as_str).collect();
        format!("unknown category '{s}' ({})", names.join(", "))
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt().with_env_filter(log_level).init();

    debug!("Using API at {}", cli.server);
    let mut client = NutriClient::new(cli.server);
    if let Some(token) = cli.token.filter(|t| !t.trim().is_empty()) {
        client = client.with_token(token);
    }

    match cli.command {
        Command::Foods { action } => match action {
            FoodCommand::List => commands::list_foods(&client).await?,
            FoodCommand::Add(args) => commands::add_food(&client, args).await?,
        },
        Command::Meals { action } => match action {
            MealCommand::List { user } => commands::list_meals(&client, user).await?,
            MealCommand::Log { name, foods, user } => {
                commands::log_meal(&client, name, foods, user).await?;
            }
            MealCommand::Delete { id } => commands::delete_meal(&client, id).await?,
        },
        Command::Dashboard { meal_type, goal } => {
            commands::dashboard(&client, meal_type, goal).await?;
        }
        Command::Recommend {
            goal,
            calories,
            meal_type,
        } => commands::recommend(&client, goal, calories, meal_type).await?,
        Command::Summary { user, date } => commands::summary(&client, user, date).await?,
        Command::Register(args) => commands::register(&client, args).await?,
        Command::Login { email, password } => commands::login(&client, &email, &password).await?,
        Command::Profile => commands::profile(&client).await?,
        Command::Health => commands::health(&client).await?,
    }

    Ok(())
}
