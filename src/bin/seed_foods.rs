// ABOUTME: Food catalog seeding utility for the Nutri-AI API
// ABOUTME: Loads the 24 default foods with per-serving macros and serving sizes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Default food catalog seeder.
//!
//! Usage:
//! ```bash
//! # Seed the catalog (uses DATABASE_URL from environment)
//! cargo run --bin seed-foods
//!
//! # Override database URL
//! cargo run --bin seed-foods -- --database-url sqlite:./data/nutri.db
//!
//! # Replace an existing catalog
//! cargo run --bin seed-foods -- --force
//! ```

use std::collections::BTreeMap;
use std::env;

use anyhow::Result;
use clap::Parser;
use nutri_ai::config::DatabaseUrl;
use nutri_ai::database::{Database, NewFood};
use nutri_ai::models::{FoodCategory, MacroTotals, ServingSize};
use nutri_core::constants::{database, env_config};
use tracing::{debug, info};

#[derive(Parser)]
#[command(
    name = "seed-foods",
    about = "Nutri-AI Food Catalog Seeder",
    long_about = "Load the 24 default foods into the Nutri-AI food catalog"
)]
struct SeedArgs {
    /// Database URL override
    #[arg(long)]
    database_url: Option<String>,

    /// Delete the existing catalog and re-seed
    #[arg(long)]
    force: bool,

    /// Enable verbose logging
    #[arg(long, short = 'v')]
    verbose: bool,
}

/// Seed food definition
struct SeedFood {
    name: &'static str,
    calories: f64,
    protein: f64,
    carbs: f64,
    fat: f64,
    category: FoodCategory,
    amount: f64,
    unit: &'static str,
}

impl SeedFood {
    fn to_new_food(&self) -> NewFood {
        NewFood {
            name: self.name.to_owned(),
            macros: MacroTotals::new(self.calories, self.protein, self.carbs, self.fat),
            category: self.category,
            serving_size: Some(ServingSize {
                amount: self.amount,
                unit: self.unit.to_owned(),
            }),
        }
    }
}

const fn food(
    name: &'static str,
    [calories, protein, carbs, fat]: [f64; 4],
    category: FoodCategory,
    amount: f64,
    unit: &'static str,
) -> SeedFood {
    SeedFood {
        name,
        calories,
        protein,
        carbs,
        fat,
        category,
        amount,
        unit,
    }
}

/// The default catalog, macros per serving
const SEED_FOODS: &[SeedFood] = &[
    // Fruits
    food("Apple", [52.0, 0.3, 14.0, 0.2], FoodCategory::Fruit, 1.0, "medium"),
    food("Banana", [89.0, 1.1, 23.0, 0.3], FoodCategory::Fruit, 1.0, "medium"),
    food("Orange", [47.0, 0.9, 12.0, 0.1], FoodCategory::Fruit, 1.0, "medium"),
    food("Strawberries", [32.0, 0.7, 8.0, 0.3], FoodCategory::Fruit, 100.0, "g"),
    food("Blueberries", [57.0, 0.7, 14.0, 0.3], FoodCategory::Fruit, 100.0, "g"),
    // Vegetables
    food("Broccoli", [34.0, 2.8, 7.0, 0.4], FoodCategory::Vegetable, 100.0, "g"),
    food("Spinach", [23.0, 2.9, 3.6, 0.4], FoodCategory::Vegetable, 100.0, "g"),
    food("Carrots", [41.0, 0.9, 10.0, 0.2], FoodCategory::Vegetable, 100.0, "g"),
    food("Sweet Potato", [86.0, 1.6, 20.0, 0.1], FoodCategory::Vegetable, 100.0, "g"),
    food("Avocado", [160.0, 2.0, 9.0, 15.0], FoodCategory::Vegetable, 100.0, "g"),
    // Proteins
    food("Chicken Breast", [165.0, 31.0, 0.0, 3.6], FoodCategory::Protein, 100.0, "g"),
    food("Salmon", [208.0, 22.0, 0.0, 13.0], FoodCategory::Protein, 100.0, "g"),
    food("Eggs", [155.0, 13.0, 1.1, 11.0], FoodCategory::Protein, 2.0, "large"),
    food("Greek Yogurt", [59.0, 10.0, 3.6, 0.4], FoodCategory::Protein, 100.0, "g"),
    food("Tofu", [76.0, 8.0, 2.0, 4.0], FoodCategory::Protein, 100.0, "g"),
    // Grains
    food("Brown Rice", [112.0, 2.6, 23.0, 0.9], FoodCategory::Grain, 100.0, "g"),
    food("Oatmeal", [68.0, 2.4, 12.0, 1.4], FoodCategory::Grain, 100.0, "g"),
    food("Whole Wheat Bread", [265.0, 13.0, 51.0, 4.0], FoodCategory::Grain, 100.0, "g"),
    food("Quinoa", [120.0, 4.4, 21.0, 1.9], FoodCategory::Grain, 100.0, "g"),
    // Dairy
    food("Milk", [42.0, 3.4, 5.0, 1.0], FoodCategory::Dairy, 100.0, "ml"),
    food("Cheddar Cheese", [404.0, 25.0, 1.3, 33.0], FoodCategory::Dairy, 100.0, "g"),
    // Other
    food("Almonds", [579.0, 21.0, 22.0, 50.0], FoodCategory::Other, 100.0, "g"),
    food("Peanut Butter", [588.0, 25.0, 20.0, 50.0], FoodCategory::Other, 100.0, "g"),
    food("Dark Chocolate", [546.0, 4.9, 61.0, 31.0], FoodCategory::Other, 100.0, "g"),
];

#[tokio::main]
async fn main() -> Result<()> {
    let args = SeedArgs::parse();

    let log_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt().with_env_filter(log_level).init();

    info!("=== Nutri-AI Food Catalog Seeder ===");

    let database_url = args
        .database_url
        .or_else(|| env::var(env_config::DATABASE_URL).ok())
        .unwrap_or_else(|| database::DEFAULT_DATABASE_URL.to_owned());
    let url = DatabaseUrl::parse_url(&database_url);

    info!("Connecting to database: {}", url);
    let db = Database::new(&url).await?;
    let foods = db.foods();

    let existing = foods.count().await?;
    if existing > 0 {
        if !args.force {
            info!(
                "Food catalog already seeded ({} foods found). Use --force to re-seed.",
                existing
            );
            return Ok(());
        }
        let removed = foods.delete_all().await?;
        info!("Cleared {} existing foods", removed);
    }

    info!("Seeding {} foods...", SEED_FOODS.len());
    let mut per_category: BTreeMap<&'static str, usize> = BTreeMap::new();
    for seed in SEED_FOODS {
        let created = foods.create(&seed.to_new_food()).await?;
        debug!(id = %created.id, name = %created.name, "Food created");
        *per_category.entry(seed.category.as_str()).or_default() += 1;
    }

    info!("");
    info!("=== Seeding Complete ===");
    info!("Added {} foods", SEED_FOODS.len());
    for (category, count) in &per_category {
        info!("   - {}: {} foods", category, count);
    }

    Ok(())
}
