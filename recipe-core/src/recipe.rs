//! Recipes and their ingredients.

use std::fmt;
use std::io::{self, BufRead, Write};

use chrono::{DateTime, Local};
use tracing::debug;

use crate::console::{parse_number, Console};
use crate::error::{RecipeError, Result};

/// One ingredient line of a recipe.
#[derive(Clone, Debug, PartialEq)]
pub struct Ingredient {
    pub name: String,
    pub quantity: f64,
    pub unit: String,
    /// Calories for the listed quantity.
    pub calories: f64,
    /// Free-text category, e.g. "Vegetable" or "Dairy".
    pub food_group: String,
}

impl Ingredient {
    pub fn new(
        name: impl Into<String>,
        quantity: f64,
        unit: impl Into<String>,
        calories: f64,
        food_group: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            quantity,
            unit: unit.into(),
            calories,
            food_group: food_group.into(),
        }
    }
}

impl fmt::Display for Ingredient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} of {} ({} calories) - {}",
            self.quantity, self.unit, self.name, self.calories, self.food_group
        )
    }
}

/// A named dish with ordered ingredients and preparation steps.
#[derive(Clone, Debug)]
pub struct Recipe {
    name: String,
    ingredients: Vec<Ingredient>,
    steps: Vec<String>,
    created_at: DateTime<Local>,
}

impl Recipe {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ingredients: Vec::new(),
            steps: Vec::new(),
            created_at: Local::now(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ingredients(&self) -> &[Ingredient] {
        &self.ingredients
    }

    pub fn steps(&self) -> &[String] {
        &self.steps
    }

    pub fn created_at(&self) -> DateTime<Local> {
        self.created_at
    }

    pub fn add_ingredient(&mut self, ingredient: Ingredient) {
        self.ingredients.push(ingredient);
    }

    pub fn add_step(&mut self, step: impl Into<String>) {
        self.steps.push(step.into());
    }

    /// Sum of the current ingredient calories. Never cached.
    pub fn total_calories(&self) -> f64 {
        self.ingredients.iter().map(|i| i.calories).sum()
    }

    /// Interactively collect ingredients and steps.
    ///
    /// Each round reads one ingredient and then at most one step. A round
    /// restarts when quantity or calories is not a number. A blank step line
    /// ends entry; so does the end of input.
    pub fn add_details<R: BufRead, W: Write>(
        &mut self,
        console: &mut Console<R, W>,
    ) -> io::Result<()> {
        loop {
            console.say("Enter ingredient details:")?;
            let Some(name) = console.prompt("Ingredient name: ")? else {
                return Ok(());
            };
            let Some(quantity) = console.prompt("Quantity: ")? else {
                return Ok(());
            };
            let Some(quantity) = parse_number(&quantity) else {
                console.say("Invalid quantity. Please enter a number.")?;
                continue;
            };
            let Some(unit) = console.prompt("Unit: ")? else {
                return Ok(());
            };
            let Some(calories) = console.prompt("Calories: ")? else {
                return Ok(());
            };
            let Some(calories) = parse_number(&calories) else {
                console.say("Invalid calories. Please enter a number.")?;
                continue;
            };
            let Some(food_group) = console.prompt("Food group: ")? else {
                return Ok(());
            };

            self.add_ingredient(Ingredient::new(name, quantity, unit, calories, food_group));

            console.say("Enter a step description (or press enter to finish):")?;
            match console.read_line()? {
                Some(step) if !step.trim().is_empty() => self.add_step(step),
                _ => return Ok(()),
            }
        }
    }

    /// Multiply quantity and calories of every ingredient by `factor`.
    pub fn scale(&mut self, factor: f64) {
        for ingredient in &mut self.ingredients {
            ingredient.quantity *= factor;
            ingredient.calories *= factor;
        }
        debug!(recipe = %self.name, factor, "scaled quantities");
    }

    /// Parse a scaling factor and apply it. Nothing changes on bad input.
    pub fn adjust_quantities(&mut self, input: &str) -> Result<f64> {
        let factor = parse_number(input).ok_or_else(|| RecipeError::InvalidNumber {
            field: "scaling factor",
            input: input.to_string(),
        })?;
        self.scale(factor);
        Ok(factor)
    }

    /// Zero every quantity; calories and labels are kept.
    pub fn reset_quantities(&mut self) {
        for ingredient in &mut self.ingredients {
            ingredient.quantity = 0.0;
        }
        debug!(recipe = %self.name, "reset quantities");
    }

    pub fn clear(&mut self) {
        self.ingredients.clear();
        self.steps.clear();
        debug!(recipe = %self.name, "cleared recipe");
    }

    /// Printable view that flags totals above `calorie_threshold`.
    pub fn display(&self, calorie_threshold: f64) -> RecipeView<'_> {
        RecipeView {
            recipe: self,
            calorie_threshold,
        }
    }
}

/// Full text rendering of a recipe, see [`Recipe::display`].
pub struct RecipeView<'a> {
    recipe: &'a Recipe,
    calorie_threshold: f64,
}

impl fmt::Display for RecipeView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let recipe = self.recipe;
        writeln!(f, "Recipe: {}", recipe.name)?;
        writeln!(f, "Ingredients:")?;
        for ingredient in &recipe.ingredients {
            writeln!(f, "{ingredient}")?;
        }

        let total = recipe.total_calories();
        writeln!(f, "\nTotal Calories: {total}")?;
        if total > self.calorie_threshold {
            writeln!(
                f,
                "Warning: This recipe exceeds {} calories.",
                self.calorie_threshold
            )?;
        }

        writeln!(f, "\nSteps:")?;
        for (i, step) in recipe.steps.iter().enumerate() {
            writeln!(f, "{}. {}", i + 1, step)?;
        }
        Ok(())
    }
}

/* ===========================
Unit tests
=========================== */
