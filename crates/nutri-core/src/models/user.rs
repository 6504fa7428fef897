// ABOUTME: User account models with physical attributes and nutrition goals
// ABOUTME: User keeps the password hash private; PublicUser is the API projection
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Nutrition objective of a user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Goal {
    /// Lose body weight
    WeightLoss,
    /// Build muscle mass
    MuscleGain,
    /// Keep current weight
    #[default]
    Maintenance,
    /// General health improvement
    ImproveHealth,
}

impl Goal {
    /// All goals
    pub const ALL: [Self; 4] = [
        Self::WeightLoss,
        Self::MuscleGain,
        Self::Maintenance,
        Self::ImproveHealth,
    ];

    /// Convert to database string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::WeightLoss => "weight_loss",
            Self::MuscleGain => "muscle_gain",
            Self::Maintenance => "maintenance",
            Self::ImproveHealth => "improve_health",
        }
    }

    /// Strict parse for request input
    #[must_use]
    pub fn try_parse(s: &str) -> Option<Self> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|goal| goal.as_str().eq_ignore_ascii_case(s))
    }

    /// Parse, falling back to maintenance for unrecognized values
    #[must_use]
    pub fn parse_lossy(s: &str) -> Self {
        Self::try_parse(s).unwrap_or_default()
    }
}

/// Optional physical attributes and dietary profile
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAttributes {
    /// Age in years
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    /// Weight in kilograms
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    /// Height in centimeters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    /// Dietary preference tags, deduplicated
    #[serde(default)]
    pub dietary_preferences: Vec<String>,
    /// Allergy tags, deduplicated
    #[serde(default)]
    pub allergies: Vec<String>,
    /// Nutrition goal
    #[serde(default, rename = "goals")]
    pub goal: Goal,
}

/// Stored user account
///
/// Not serializable: the password hash never leaves the account manager.
#[derive(Debug, Clone)]
pub struct User {
    /// Unique identifier
    pub id: Uuid,
    /// Unique username
    pub username: String,
    /// Unique lowercased email
    pub email: String,
    /// bcrypt hash of the password
    pub password_hash: String,
    /// Profile attributes
    pub attributes: UserAttributes,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp
    pub updated_at: DateTime<Utc>,
}

/// Password-free projection of a user returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    /// Unique identifier
    pub id: Uuid,
    /// Username
    pub username: String,
    /// Email
    pub email: String,
    /// Profile attributes
    #[serde(flatten)]
    pub attributes: UserAttributes,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp
    pub updated_at: DateTime<Utc>,
}

impl From<&User> for PublicUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            attributes: user.attributes.clone(),
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_goal_parse_lossy_falls_back_to_maintenance() {
        assert_eq!(Goal::parse_lossy("weight_loss"), Goal::WeightLoss);
        assert_eq!(Goal::parse_lossy("MUSCLE_GAIN"), Goal::MuscleGain);
        assert_eq!(Goal::parse_lossy("bulk"), Goal::Maintenance);
        assert_eq!(Goal::try_parse("bulk"), None);
    }

    #[test]
    fn test_public_user_omits_password() {
        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            username: "alice".to_owned(),
            email: "alice@example.com".to_owned(),
            password_hash: "$2b$12$secret".to_owned(),
            attributes: UserAttributes {
                goal: Goal::WeightLoss,
                ..UserAttributes::default()
            },
            created_at: now,
            updated_at: now,
        };
        let json = serde_json::to_string(&PublicUser::from(&user)).unwrap();
        assert!(!json.contains("secret"));
        assert!(!json.contains("password"));
        assert!(json.contains("\"goals\":\"weight_loss\""));
    }
}
