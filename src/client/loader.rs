// ABOUTME: Dashboard loading state machine with latest-wins request tickets
// ABOUTME: Discards stale responses, recomputes totals on meal changes, and tolerates recommendation failures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Dashboard Loader
//!
//! Every fetch is issued with a [`Ticket`] carrying a per-resource generation.
//! Issuing a new ticket supersedes all earlier ones for that resource, so a
//! slow response that arrives after a newer one is dropped instead of
//! overwriting fresher state.

use std::fmt;

use nutri_core::models::{FoodItem, Goal, MacroTotals, Meal, MealOwner, MealType, RecommendationEntry};
use nutri_intelligence::total_meals;
use tracing::{debug, warn};

use super::{ClientResult, NutriClient};

/// Independently loaded parts of the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    /// Food catalog
    Foods,
    /// Meal log
    Meals,
    /// Recommendation list
    Recommendations,
}

impl Resource {
    const fn index(self) -> usize {
        match self {
            Self::Foods => 0,
            Self::Meals => 1,
            Self::Recommendations => 2,
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Foods => "foods",
            Self::Meals => "meals",
            Self::Recommendations => "recommendations",
        })
    }
}

/// Handle for one in-flight fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    resource: Resource,
    generation: u64,
}

impl Ticket {
    /// Resource this ticket fetches
    #[must_use]
    pub const fn resource(&self) -> Resource {
        self.resource
    }
}

/// Load state of a resource whose failure is shown to the user
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadStatus {
    /// Never requested
    #[default]
    Idle,
    /// A request is in flight
    Loading,
    /// Last response applied
    Ready,
    /// Last response was an error
    Failed(String),
}

/// Everything the dashboard renders
#[derive(Debug, Clone, Default)]
pub struct DashboardState {
    /// Food catalog
    pub foods: Vec<FoodItem>,
    /// Meal log
    pub meals: Vec<Meal>,
    /// Sum of the meal log's totals
    pub totals: MacroTotals,
    /// Latest recommendations; kept when a refresh fails
    pub recommendations: Vec<RecommendationEntry>,
    /// Catalog load state
    pub foods_status: LoadStatus,
    /// Meal log load state
    pub meals_status: LoadStatus,
}

/// Latest-wins loader for the dashboard state
#[derive(Debug, Default)]
pub struct DashboardLoader {
    generations: [u64; 3],
    state: DashboardState,
}

impl DashboardLoader {
    /// Empty loader
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state
    #[must_use]
    pub const fn state(&self) -> &DashboardState {
        &self.state
    }

    /// Start a fetch, superseding any earlier ticket for the resource
    pub fn issue(&mut self, resource: Resource) -> Ticket {
        let slot = &mut self.generations[resource.index()];
        *slot += 1;
        match resource {
            Resource::Foods => self.state.foods_status = LoadStatus::Loading,
            Resource::Meals => self.state.meals_status = LoadStatus::Loading,
            Resource::Recommendations => {}
        }
        Ticket {
            resource,
            generation: *slot,
        }
    }

    /// Whether a ticket is still the latest for its resource
    #[must_use]
    pub const fn is_current(&self, ticket: Ticket) -> bool {
        self.generations[ticket.resource.index()] == ticket.generation
    }

    fn accept(&self, ticket: Ticket, expected: Resource) -> bool {
        if ticket.resource != expected {
            warn!(ticket = %ticket.resource, expected = %expected, "Ticket applied to wrong resource");
            return false;
        }
        if !self.is_current(ticket) {
            debug!(resource = %expected, generation = ticket.generation, "Discarding stale response");
            return false;
        }
        true
    }

    /// Apply a catalog response; returns whether it was applied
    pub fn apply_foods(&mut self, ticket: Ticket, result: ClientResult<Vec<FoodItem>>) -> bool {
        if !self.accept(ticket, Resource::Foods) {
            return false;
        }
        match result {
            Ok(foods) => {
                self.state.foods = foods;
                self.state.foods_status = LoadStatus::Ready;
            }
            Err(e) => self.state.foods_status = LoadStatus::Failed(e.to_string()),
        }
        true
    }

    /// Apply a meal log response and recompute the running totals
    pub fn apply_meals(&mut self, ticket: Ticket, result: ClientResult<Vec<Meal>>) -> bool {
        if !self.accept(ticket, Resource::Meals) {
            return false;
        }
        match result {
            Ok(meals) => {
                self.state.totals = total_meals(&meals);
                self.state.meals = meals;
                self.state.meals_status = LoadStatus::Ready;
            }
            Err(e) => self.state.meals_status = LoadStatus::Failed(e.to_string()),
        }
        true
    }

    /// Apply a recommendation response; failures keep the previous list
    pub fn apply_recommendations(
        &mut self,
        ticket: Ticket,
        result: ClientResult<Vec<RecommendationEntry>>,
    ) -> bool {
        if !self.accept(ticket, Resource::Recommendations) {
            return false;
        }
        match result {
            Ok(entries) => self.state.recommendations = entries,
            Err(e) => debug!("Recommendations unavailable, keeping previous list: {e}"),
        }
        true
    }

    /// Fetch catalog and meals together, then recommendations for the new totals
    pub async fn refresh(
        &mut self,
        client: &NutriClient,
        owner: MealOwner,
        goal: Goal,
        meal_type: Option<MealType>,
    ) {
        let foods_ticket = self.issue(Resource::Foods);
        let meals_ticket = self.issue(Resource::Meals);
        let (foods, meals) = tokio::join!(client.list_foods(), client.list_meals(owner));
        self.apply_foods(foods_ticket, foods);
        self.apply_meals(meals_ticket, meals);

        self.refresh_recommendations(client, goal, meal_type).await;
    }

    /// Fetch recommendations for the current totals
    pub async fn refresh_recommendations(
        &mut self,
        client: &NutriClient,
        goal: Goal,
        meal_type: Option<MealType>,
    ) {
        let ticket = self.issue(Resource::Recommendations);
        let result = client
            .recommendations(goal, self.state.totals.calories, meal_type)
            .await;
        self.apply_recommendations(ticket, result);
    }
}
