//! In-memory recipe book: ingredients, preparation steps, quantity scaling
//! and calorie warnings.

use serde::{Deserialize, Serialize};

pub mod console;
pub mod error;
pub mod recipe;
pub mod store;

pub use console::{parse_number, Console};
pub use error::{RecipeError, Result};
pub use recipe::{Ingredient, Recipe, RecipeView};
pub use store::{CalorieListener, PrintListener, RecipeStore, WarningQueue};

/// Default calorie limit above which a recipe triggers a warning.
pub const DEFAULT_CALORIE_THRESHOLD: f64 = 300.0;

/// Tunables for a [`RecipeStore`].
#[derive(Copy, Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StoreSettings {
    /// Total calories a recipe may reach before a warning is raised.
    pub calorie_threshold: f64,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            calorie_threshold: DEFAULT_CALORIE_THRESHOLD,
        }
    }
}

/// Message delivered to calorie listeners when `name` goes over `threshold`.
pub fn calorie_warning(name: &str, threshold: f64) -> String {
    format!("Warning: {name} exceeds {threshold} calories.")
}
