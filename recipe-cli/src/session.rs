use chrono::Timelike;
use comfy_table::{presets::UTF8_FULL, Attribute, Cell, ContentArrangement, Table};
use recipe_core::{Console, Recipe, RecipeError, RecipeStore, Result, WarningQueue};
use std::io::{BufRead, Write};

const MENU: [&str; 7] = [
    "1. Add a new recipe",
    "2. View a recipe",
    "3. Adjust a recipe's quantities",
    "4. Reset a recipe's quantities",
    "5. Delete a recipe",
    "6. List all recipes",
    "7. Exit",
];

/// The interactive menu loop over one recipe book.
pub struct Session<R, W> {
    console: Console<R, W>,
    store: RecipeStore,
    /// Calorie warnings waiting to be written to the console.
    warnings: WarningQueue,
    /// Render "List all recipes" as a table instead of bare names.
    table: bool,
}

impl<R: BufRead, W: Write> Session<R, W> {
    /// Calorie warnings raised by `store` are echoed on `console`.
    pub fn new(console: Console<R, W>, mut store: RecipeStore, table: bool) -> Self {
        let warnings = WarningQueue::default();
        store.subscribe(warnings.clone());
        Self {
            console,
            store,
            warnings,
            table,
        }
    }

    /// Serve menu choices until "Exit" or the end of input.
    /// Only console I/O failures are returned.
    pub fn run(&mut self) -> Result<()> {
        loop {
            self.console.say("Recipe Application")?;
            for line in MENU {
                self.console.say(line)?;
            }
            let Some(choice) = self.console.prompt("Choose an option: ")? else {
                return Ok(());
            };
            let Ok(choice) = choice.trim().parse::<i32>() else {
                self.console.say("Invalid option. Please enter a number.")?;
                continue;
            };

            match choice {
                1 => self.add_recipe()?,
                2 => self.view_recipe()?,
                3 => self.adjust_recipe()?,
                4 => self.reset_recipe()?,
                5 => self.delete_recipe()?,
                6 => self.list_recipes()?,
                7 => return Ok(()),
                _ => self.console.say("Invalid option.")?,
            }
        }
    }

    pub fn store(&self) -> &RecipeStore {
        &self.store
    }

    fn add_recipe(&mut self) -> Result<()> {
        let Some(name) = self.console.prompt("Enter the recipe name: ")? else {
            return Ok(());
        };
        if self.store.contains(&name) {
            self.console.say(format!("A recipe named '{name}' already exists."))?;
            return Ok(());
        }

        let mut recipe = Recipe::new(name);
        recipe.add_details(&mut self.console)?;
        match self.store.add(recipe) {
            Err(RecipeError::DuplicateName(name)) => self
                .console
                .say(format!("A recipe named '{name}' already exists."))?,
            other => other?,
        }
        for message in self.warnings.drain() {
            self.console.say(message)?;
        }
        Ok(())
    }

    fn view_recipe(&mut self) -> Result<()> {
        let Some(name) = self.console.prompt("Enter the recipe name to view: ")? else {
            return Ok(());
        };
        let threshold = self.store.settings().calorie_threshold;
        match self.store.find(&name) {
            Some(recipe) => self.console.print(recipe.display(threshold))?,
            None => self.console.say("Recipe not found.")?,
        }
        Ok(())
    }

    fn adjust_recipe(&mut self) -> Result<()> {
        let Some(name) = self.console.prompt("Enter the recipe name to adjust: ")? else {
            return Ok(());
        };
        let Some(recipe) = self.store.find_mut(&name) else {
            self.console.say("Recipe not found.")?;
            return Ok(());
        };

        self.console.say("Enter the scaling factor:")?;
        let Some(factor) = self.console.read_line()? else {
            return Ok(());
        };
        match recipe.adjust_quantities(&factor) {
            Err(RecipeError::InvalidNumber { .. }) => self
                .console
                .say("Invalid scaling factor. Please enter a number.")?,
            other => other.map(|_| ())?,
        }
        Ok(())
    }

    fn reset_recipe(&mut self) -> Result<()> {
        let Some(name) = self.console.prompt("Enter the recipe name to reset: ")? else {
            return Ok(());
        };
        match self.store.find_mut(&name) {
            Some(recipe) => recipe.reset_quantities(),
            None => self.console.say("Recipe not found.")?,
        }
        Ok(())
    }

    fn delete_recipe(&mut self) -> Result<()> {
        let Some(name) = self.console.prompt("Enter the recipe name to delete: ")? else {
            return Ok(());
        };
        match self.store.remove(&name) {
            Ok(_) => self.console.say("Recipe deleted.")?,
            Err(RecipeError::NotFound(_)) => self.console.say("Recipe not found.")?,
            Err(e) => return Err(e),
        }
        Ok(())
    }

    fn list_recipes(&mut self) -> Result<()> {
        let Some(names) = self.store.list() else {
            self.console.say("No recipes available.")?;
            return Ok(());
        };

        if self.table {
            let table = recipe_table(&self.store);
            self.console.say(table)?;
            return Ok(());
        }

        self.console.say("Recipes:")?;
        for name in names {
            self.console.say(name)?;
        }
        Ok(())
    }
}

fn fmt_kcal(x: f64) -> String {
    let v = (x * 10.0).round() / 10.0;
    if (v - v.round()).abs() < 1e-9 {
        format!("{:.0} kcal", v)
    } else {
        format!("{:.1} kcal", v)
    }
}

fn recipe_table(store: &RecipeStore) -> Table {
    let threshold = store.settings().calorie_threshold;
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Recipe").add_attribute(Attribute::Bold),
            Cell::new("Ingredients").add_attribute(Attribute::Bold),
            Cell::new("Steps").add_attribute(Attribute::Bold),
            Cell::new("Total calories").add_attribute(Attribute::Bold),
            Cell::new("Added").add_attribute(Attribute::Bold),
        ]);

    for recipe in store.iter() {
        let total = recipe.total_calories();
        let mut calories = Cell::new(fmt_kcal(total));
        if total > threshold {
            calories = calories.add_attribute(Attribute::Bold);
        }
        let added = recipe.created_at();
        table.add_row(vec![
            Cell::new(recipe.name()),
            Cell::new(recipe.ingredients().len()),
            Cell::new(recipe.steps().len()),
            calories,
            Cell::new(format!("{:02}:{:02}", added.hour(), added.minute())),
        ]);
    }
    table
}
