// ABOUTME: Macro nutrient totals shared by foods, meals, and daily summaries
// ABOUTME: Supports addition, summation, and scaling by a serving quantity
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::iter::Sum;
use std::ops::{Add, AddAssign};

use serde::{Deserialize, Serialize};

/// Calories, protein, carbs, and fat
///
/// Missing fields deserialize as zero so partially populated payloads still sum.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MacroTotals {
    /// Energy in kilocalories
    pub calories: f64,
    /// Protein in grams
    pub protein: f64,
    /// Carbohydrates in grams
    pub carbs: f64,
    /// Fat in grams
    pub fat: f64,
}

impl MacroTotals {
    /// All-zero totals
    pub const ZERO: Self = Self {
        calories: 0.0,
        protein: 0.0,
        carbs: 0.0,
        fat: 0.0,
    };

    /// Create totals from the four macro values
    #[must_use]
    pub const fn new(calories: f64, protein: f64, carbs: f64, fat: f64) -> Self {
        Self {
            calories,
            protein,
            carbs,
            fat,
        }
    }

    /// Every macro multiplied by `quantity`
    #[must_use]
    pub fn scaled(self, quantity: f64) -> Self {
        Self {
            calories: self.calories * quantity,
            protein: self.protein * quantity,
            carbs: self.carbs * quantity,
            fat: self.fat * quantity,
        }
    }

    /// Iterate over `(name, value)` pairs in wire order
    pub fn fields(&self) -> impl Iterator<Item = (&'static str, f64)> {
        [
            ("calories", self.calories),
            ("protein", self.protein),
            ("carbs", self.carbs),
            ("fat", self.fat),
        ]
        .into_iter()
    }
}

impl Add for MacroTotals {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            calories: self.calories + rhs.calories,
            protein: self.protein + rhs.protein,
            carbs: self.carbs + rhs.carbs,
            fat: self.fat + rhs.fat,
        }
    }
}

impl AddAssign for MacroTotals {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sum for MacroTotals {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Self> for MacroTotals {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.copied().sum()
    }
}
