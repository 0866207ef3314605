//! The recipe book itself.
//!
//! Recipes live in memory only, kept sorted by name. Names are matched
//! case-insensitively on lookup.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::{debug, warn};

use crate::error::{RecipeError, Result};
use crate::recipe::Recipe;
use crate::{StoreSettings, calorie_warning};

/// Receives calorie warnings raised by [`RecipeStore::add`].
pub trait CalorieListener {
    fn notify(&mut self, message: &str);
}

impl<F: FnMut(&str)> CalorieListener for F {
    fn notify(&mut self, message: &str) {
        self(message)
    }
}

/// Prints warnings to stdout.
#[derive(Debug, Default)]
pub struct PrintListener;

impl CalorieListener for PrintListener {
    fn notify(&mut self, message: &str) {
        println!("{message}");
    }
}

/// Holds warnings until the owner of the output stream drains them.
///
/// Clones share one queue, so a clone can be subscribed to the store while
/// the original stays with whoever writes the messages out.
#[derive(Clone, Debug, Default)]
pub struct WarningQueue {
    pending: Rc<RefCell<Vec<String>>>,
}

impl WarningQueue {
    /// Take all queued messages, oldest first.
    pub fn drain(&self) -> Vec<String> {
        std::mem::take(&mut *self.pending.borrow_mut())
    }
}

impl CalorieListener for WarningQueue {
    fn notify(&mut self, message: &str) {
        self.pending.borrow_mut().push(message.to_string());
    }
}

pub struct RecipeStore {
    recipes: Vec<Recipe>,
    settings: StoreSettings,
    listeners: Vec<Box<dyn CalorieListener>>,
}

impl RecipeStore {
    /// Store with default settings that prints calorie warnings.
    pub fn new() -> Self {
        Self::with_settings(StoreSettings::default())
    }

    pub fn with_settings(settings: StoreSettings) -> Self {
        let mut store = Self::silent(settings);
        store.subscribe(PrintListener);
        store
    }

    /// Store without any listener registered.
    pub fn silent(settings: StoreSettings) -> Self {
        Self {
            recipes: Vec::new(),
            settings,
            listeners: Vec::new(),
        }
    }

    pub fn subscribe(&mut self, listener: impl CalorieListener + 'static) {
        self.listeners.push(Box::new(listener));
    }

    pub fn settings(&self) -> &StoreSettings {
        &self.settings
    }

    /// Insert a recipe and keep the book sorted by name.
    ///
    /// Listeners are told when the recipe is over the calorie threshold.
    pub fn add(&mut self, recipe: Recipe) -> Result<()> {
        if self.contains(recipe.name()) {
            return Err(RecipeError::DuplicateName(recipe.name().to_string()));
        }

        let total = recipe.total_calories();
        let threshold = self.settings.calorie_threshold;
        let message = (total > threshold).then(|| calorie_warning(recipe.name(), threshold));

        debug!(recipe = %recipe.name(), total, "adding recipe");
        self.recipes.push(recipe);
        self.recipes.sort_by(|a, b| a.name().cmp(b.name()));

        if let Some(message) = message {
            warn!(total, threshold, "{message}");
            for listener in &mut self.listeners {
                listener.notify(&message);
            }
        }
        Ok(())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    pub fn find(&self, name: &str) -> Option<&Recipe> {
        self.position(name).map(|i| &self.recipes[i])
    }

    pub fn find_mut(&mut self, name: &str) -> Option<&mut Recipe> {
        self.position(name).map(|i| &mut self.recipes[i])
    }

    pub fn remove(&mut self, name: &str) -> Result<Recipe> {
        let index = self
            .position(name)
            .ok_or_else(|| RecipeError::NotFound(name.to_string()))?;
        let recipe = self.recipes.remove(index);
        debug!(recipe = %recipe.name(), "removed recipe");
        Ok(recipe)
    }

    /// Names in book order, or `None` when the book is empty.
    pub fn list(&self) -> Option<Vec<&str>> {
        if self.recipes.is_empty() {
            return None;
        }
        Some(self.recipes.iter().map(Recipe::name).collect())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Recipe> {
        self.recipes.iter()
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.recipes.iter().position(|r| same_name(r.name(), name))
    }
}

fn same_name(a: &str, b: &str) -> bool {
    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}

impl Default for RecipeStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recipe::Ingredient;

    fn recipe(name: &str, calories: &[f64]) -> Recipe {
        let mut r = Recipe::new(name);
        for (i, c) in calories.iter().enumerate() {
            r.add_ingredient(Ingredient::new(format!("item{i}"), 1.0, "g", *c, "Other"));
        }
        r
    }

    fn recording_store() -> (RecipeStore, Rc<RefCell<Vec<String>>>) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let mut store = RecipeStore::silent(StoreSettings::default());
        store.subscribe(move |m: &str| sink.borrow_mut().push(m.to_string()));
        (store, seen)
    }

    #[test]
    fn test_list_is_sorted_by_ordinal_name() {
        fn permutations(names: &[&'static str]) -> Vec<Vec<&'static str>> {
            if names.len() <= 1 {
                return vec![names.to_vec()];
            }
            let mut out = Vec::new();
            for i in 0..names.len() {
                let mut rest = names.to_vec();
                let first = rest.remove(i);
                for mut tail in permutations(&rest) {
                    tail.insert(0, first);
                    out.push(tail);
                }
            }
            out
        }

        let orders = permutations(&["Tacos", "apple pie", "Burger", "Zucchini bread", "Apple crumble"]);
        assert_eq!(orders.len(), 120);
        for order in orders {
            let (mut store, _) = recording_store();
            for name in &order {
                store.add(recipe(name, &[10.0])).unwrap();
            }
            assert_eq!(
                store.list().unwrap(),
                vec!["Apple crumble", "Burger", "Tacos", "Zucchini bread", "apple pie"],
                "insertion order {order:?}"
            );
        }
    }

    #[test]
    fn test_find_ignores_case_beyond_ascii() {
        let (mut store, _) = recording_store();
        store.add(recipe("Crème Brûlée", &[250.0])).unwrap();
        assert!(store.contains("CRÈME BRÛLÉE"));
        assert!(store.find("crème brûlée").is_some());
        assert!(!store.contains("Creme Brulee"));
        assert!(!store.contains("Crème Brûlé"));
    }

    #[test]
    fn test_warning_queue_collects_until_drained() {
        let queue = WarningQueue::default();
        let mut store = RecipeStore::silent(StoreSettings::default());
        store.subscribe(queue.clone());

        store.add(recipe("Lasagna", &[400.0])).unwrap();
        store.add(recipe("Salad", &[50.0])).unwrap();
        assert_eq!(queue.drain(), vec!["Warning: Lasagna exceeds 300 calories.".to_string()]);
        assert!(queue.drain().is_empty());
    }

    #[test]
    fn test_empty_list() {
        let store = RecipeStore::silent(StoreSettings::default());
        assert!(store.list().is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn test_find_ignores_case() {
        let (mut store, _) = recording_store();
        store.add(recipe("Pasta", &[200.0])).unwrap();
        assert_eq!(store.find("pasta").map(Recipe::name), Some("Pasta"));
        assert_eq!(store.find("PASTA").map(Recipe::name), Some("Pasta"));
        assert!(store.find("Pizza").is_none());
    }

    #[test]
    fn test_warning_fires_once_above_threshold() {
        let (mut store, seen) = recording_store();
        store.add(recipe("Lasagna", &[250.0, 100.0])).unwrap();
        assert_eq!(*seen.borrow(), vec!["Warning: Lasagna exceeds 300 calories.".to_string()]);
    }

    #[test]
    fn test_no_warning_at_or_below_threshold() {
        let (mut store, seen) = recording_store();
        store.add(recipe("Soup", &[200.0, 100.0])).unwrap();
        store.add(recipe("Salad", &[50.0])).unwrap();
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn test_custom_threshold() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let mut store = RecipeStore::silent(StoreSettings { calorie_threshold: 100.0 });
        store.subscribe(move |m: &str| sink.borrow_mut().push(m.to_string()));
        store.add(recipe("Soup", &[150.0])).unwrap();
        assert_eq!(*seen.borrow(), vec!["Warning: Soup exceeds 100 calories.".to_string()]);
    }

    #[test]
    fn test_remove_unknown_leaves_store_unchanged() {
        let (mut store, _) = recording_store();
        store.add(recipe("B", &[1.0])).unwrap();
        store.add(recipe("A", &[1.0])).unwrap();

        let err = store.remove("Nonexistent").unwrap_err();
        assert!(matches!(err, RecipeError::NotFound(ref n) if n == "Nonexistent"));
        assert_eq!(store.list().unwrap(), vec!["A", "B"]);
    }

    #[test]
    fn test_remove_by_any_case() {
        let (mut store, _) = recording_store();
        store.add(recipe("Pasta", &[1.0])).unwrap();
        let removed = store.remove("pASTA").unwrap();
        assert_eq!(removed.name(), "Pasta");
        assert!(store.is_empty());
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let (mut store, _) = recording_store();
        store.add(recipe("Pasta", &[1.0])).unwrap();
        let err = store.add(recipe("PASTA", &[2.0])).unwrap_err();
        assert!(matches!(err, RecipeError::DuplicateName(_)));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_total_tracks_mutation_through_store() {
        let (mut store, _) = recording_store();
        store.add(recipe("Pasta", &[100.0, 50.0])).unwrap();

        let pasta = store.find_mut("pasta").unwrap();
        pasta.scale(2.0);
        assert_eq!(pasta.total_calories(), 300.0);
        pasta.reset_quantities();
        assert_eq!(store.find("Pasta").unwrap().total_calories(), 300.0);
    }
}
