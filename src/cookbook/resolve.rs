// src/cookbook/resolve.rs

//! Recipe resolution
//!
//! Expands a recipe into the base ingredients it needs, depth first and in
//! list order. Quantities compound down the expansion path: a sub-recipe
//! needed 3 times that itself needs 2 of something contributes 6 of it.
//! An ingredient reached along several branches is reported once with the
//! summed quantity, in the order it was first reached.
//!
//! Each sub-recipe is expanded at most once per resolution. Its totals for
//! one unit are kept and scaled into every later parent that needs it, so
//! recipes shared across many branches cost linear rather than exponential
//! time.
//!
//! Admission does not reject cross-entry cycles, so the traversal tracks the
//! active path and fails with [`Error::CyclicReference`] on re-entry. A
//! sub-recipe reached twice through different branches is not a cycle.
//! The walk uses an explicit frame stack, so nesting depth is bounded by
//! memory rather than by the thread's stack.

use crate::cookbook::model::{Entry, Ingredient, Quantity, Recipe, RequiredItem, Summary};
use crate::cookbook::store::Entries;
use crate::error::{Error, Result};
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Flattened totals for one unit of a recipe
#[derive(Default)]
struct Totals<'a> {
    cook_time: Quantity,
    /// Ingredient totals in first-encountered order
    ingredients: Vec<(&'a str, Quantity)>,
    /// Map from ingredient name to its position in `ingredients`
    positions: HashMap<&'a str, usize>,
}

impl<'a> Totals<'a> {
    /// Add `quantity` units of a base ingredient
    fn add_ingredient(&mut self, ingredient: &'a Ingredient, quantity: Quantity) -> Option<()> {
        let cook_time = ingredient.unit_cook_time().checked_mul(quantity)?;
        self.add(&ingredient.name, quantity, cook_time)
    }

    /// Add `factor` units of an already expanded sub-recipe
    fn merge(&mut self, sub: &Totals<'a>, factor: Quantity) -> Option<()> {
        self.cook_time = self.cook_time.checked_add(sub.cook_time.checked_mul(factor)?)?;
        for &(name, quantity) in &sub.ingredients {
            self.add(name, quantity.checked_mul(factor)?, Quantity::ZERO)?;
        }
        Some(())
    }

    fn add(&mut self, name: &'a str, quantity: Quantity, cook_time: Quantity) -> Option<()> {
        self.cook_time = self.cook_time.checked_add(cook_time)?;
        match self.positions.get(name) {
            Some(&pos) => {
                let total = &mut self.ingredients[pos].1;
                *total = total.checked_add(quantity)?;
            }
            None => {
                self.positions.insert(name, self.ingredients.len());
                self.ingredients.push((name, quantity));
            }
        }
        Some(())
    }
}

/// A recipe being expanded
struct Frame<'a> {
    recipe: &'a Recipe,
    /// Index of the next required item to visit
    next: usize,
    /// How many of this recipe its parent needs
    quantity: Quantity,
    totals: Totals<'a>,
}

impl<'a> Frame<'a> {
    fn new(recipe: &'a Recipe, quantity: Quantity) -> Self {
        Self {
            recipe,
            next: 0,
            quantity,
            totals: Totals::default(),
        }
    }
}

/// Resolve the recipe `name` into a flattened [`Summary`]
///
/// Fails with:
/// - [`Error::NotARecipe`] if `name` is absent or is an ingredient
/// - [`Error::MissingIngredient`] if any transitively required item is absent
/// - [`Error::CyclicReference`] if a recipe requires itself, directly or not
/// - [`Error::InvalidQuantity`] if a required quantity is not a positive
///   finite number
/// - [`Error::QuantityOverflow`] if totals leave the representable range
///
/// Items are checked depth first in list order and the first failure wins.
/// An absent item is reported as missing whatever its quantity. No partial
/// summary is ever returned.
pub fn resolve(name: &str, entries: &Entries) -> Result<Summary> {
    let root = entries
        .get(name)
        .and_then(Entry::as_recipe)
        .ok_or_else(|| Error::NotARecipe(name.to_string()))?;
    let overflow = || Error::QuantityOverflow(root.name.clone());

    let mut expanded: HashMap<&str, Totals> = HashMap::new();
    let mut on_path: HashSet<&str> = HashSet::from([root.name.as_str()]);
    let mut stack = vec![Frame::new(root, Quantity::from(1_i64))];
    let mut resolved = None;

    while let Some(frame) = stack.last_mut() {
        let recipe = frame.recipe;
        let Some(item) = recipe.required_items.get(frame.next) else {
            let Some(done) = stack.pop() else { break };
            on_path.remove(done.recipe.name.as_str());
            match stack.last_mut() {
                Some(parent) => {
                    parent
                        .totals
                        .merge(&done.totals, done.quantity)
                        .ok_or_else(overflow)?;
                    expanded.insert(done.recipe.name.as_str(), done.totals);
                }
                None => resolved = Some(done.totals),
            }
            continue;
        };
        frame.next += 1;

        let Some(entry) = entries.get(&item.name) else {
            return Err(Error::MissingIngredient {
                recipe: recipe.name.clone(),
                item: item.name.clone(),
            });
        };
        if !item.quantity.is_positive() {
            return Err(Error::InvalidQuantity {
                recipe: recipe.name.clone(),
                item: item.name.clone(),
                quantity: item.quantity,
            });
        }

        match entry {
            Entry::Ingredient(ingredient) => frame
                .totals
                .add_ingredient(ingredient, item.quantity)
                .ok_or_else(overflow)?,
            Entry::Recipe(sub) => {
                if let Some(sub_totals) = expanded.get(sub.name.as_str()) {
                    frame
                        .totals
                        .merge(sub_totals, item.quantity)
                        .ok_or_else(overflow)?;
                } else if on_path.insert(sub.name.as_str()) {
                    stack.push(Frame::new(sub, item.quantity));
                } else {
                    let mut cycle: Vec<String> =
                        stack.iter().map(|f| f.recipe.name.clone()).collect();
                    cycle.push(sub.name.clone());
                    return Err(Error::CyclicReference { path: cycle });
                }
            }
        }
    }

    let totals = resolved.unwrap_or_default();
    let summary = Summary {
        name: root.name.clone(),
        cook_time: totals.cook_time,
        ingredients: totals
            .ingredients
            .into_iter()
            .map(|(name, quantity)| RequiredItem::with_quantity(name, quantity))
            .collect(),
    };
    debug!(
        "Resolved '{}': {} ingredients ({} sub-recipes expanded), cook time {}",
        summary.name,
        summary.ingredients.len(),
        expanded.len(),
        summary.cook_time
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(name: &str, quantity: i64) -> RequiredItem {
        RequiredItem::new(name, quantity)
    }

    fn qty(n: i64) -> Quantity {
        Quantity::from(n)
    }

    fn burger_shop() -> Entries {
        [
            Entry::ingredient("Bun", 10),
            Entry::ingredient("Patty", 20),
            Entry::recipe("Burger", vec![item("Bun", 2), item("Patty", 1)]),
            Entry::recipe("Meal", vec![item("Burger", 3)]),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_single_level() {
        let summary = resolve("Burger", &burger_shop()).unwrap();
        assert_eq!(summary.name, "Burger");
        assert_eq!(summary.cook_time, qty(2 * 10 + 20));
        assert_eq!(summary.ingredients, vec![item("Bun", 2), item("Patty", 1)]);
    }

    #[test]
    fn test_quantities_compound_through_sub_recipes() {
        let summary = resolve("Meal", &burger_shop()).unwrap();
        assert_eq!(summary.cook_time, qty(120));
        assert_eq!(summary.ingredients, vec![item("Bun", 6), item("Patty", 3)]);
    }

    #[test]
    fn test_three_levels_deep() {
        let mut entries = burger_shop();
        entries
            .insert(Entry::recipe("Party", vec![item("Meal", 2), item("Bun", 1)]))
            .unwrap();

        let summary = resolve("Party", &entries).unwrap();
        assert_eq!(summary.ingredients, vec![item("Bun", 13), item("Patty", 6)]);
        assert_eq!(summary.cook_time, qty(2 * 120 + 10));
    }

    #[test]
    fn test_shared_ingredient_accumulates() {
        let entries: Entries = [
            Entry::ingredient("Salt", 1),
            Entry::recipe("A", vec![item("Salt", 1)]),
            Entry::recipe("B", vec![item("Salt", 1)]),
            Entry::recipe("R", vec![item("A", 1), item("B", 1)]),
        ]
        .into_iter()
        .collect();

        let summary = resolve("R", &entries).unwrap();
        assert_eq!(summary.ingredients, vec![item("Salt", 2)]);
        assert_eq!(summary.cook_time, qty(2));
    }

    #[test]
    fn test_first_encountered_order() {
        let entries: Entries = [
            Entry::ingredient("Flour", 0),
            Entry::ingredient("Egg", 3),
            Entry::ingredient("Milk", 1),
            Entry::recipe("Batter", vec![item("Egg", 2), item("Flour", 1)]),
            Entry::recipe("Pancake", vec![item("Milk", 1), item("Batter", 1), item("Egg", 1)]),
        ]
        .into_iter()
        .collect();

        let summary = resolve("Pancake", &entries).unwrap();
        assert_eq!(
            summary.ingredients,
            vec![item("Milk", 1), item("Egg", 3), item("Flour", 1)]
        );
        assert_eq!(summary.cook_time, qty(1 + 3 * 3));
    }

    #[test]
    fn test_diamond_is_not_a_cycle() {
        let entries: Entries = [
            Entry::ingredient("Salt", 5),
            Entry::recipe("Base", vec![item("Salt", 1)]),
            Entry::recipe("Left", vec![item("Base", 2)]),
            Entry::recipe("Right", vec![item("Base", 3)]),
            Entry::recipe("Top", vec![item("Left", 1), item("Right", 1)]),
        ]
        .into_iter()
        .collect();

        let summary = resolve("Top", &entries).unwrap();
        assert_eq!(summary.ingredients, vec![item("Salt", 5)]);
        assert_eq!(summary.cook_time, qty(25));
    }

    #[test]
    fn test_empty_recipe() {
        let entries: Entries = [Entry::recipe("Air", vec![])].into_iter().collect();
        let summary = resolve("Air", &entries).unwrap();
        assert_eq!(summary.cook_time, qty(0));
        assert!(summary.ingredients.is_empty());
    }

    #[test]
    fn test_not_a_recipe() {
        let entries = burger_shop();
        assert_eq!(
            resolve("Bun", &entries).unwrap_err(),
            Error::NotARecipe("Bun".to_string())
        );
        assert_eq!(
            resolve("Pizza", &entries).unwrap_err(),
            Error::NotARecipe("Pizza".to_string())
        );
    }

    #[test]
    fn test_missing_ingredient() {
        let entries: Entries = [
            Entry::ingredient("Bun", 10),
            Entry::recipe("Burger", vec![item("Bun", 2), item("Patty", 1)]),
        ]
        .into_iter()
        .collect();

        let err = resolve("Burger", &entries).unwrap_err();
        assert_eq!(
            err,
            Error::MissingIngredient {
                recipe: "Burger".to_string(),
                item: "Patty".to_string()
            }
        );
        assert_eq!(entries.len(), 2);
    }

    #[test]
    fn test_missing_ingredient_deep() {
        let entries: Entries = [
            Entry::recipe("Outer", vec![item("Inner", 1)]),
            Entry::recipe("Inner", vec![item("Ghost", 1)]),
        ]
        .into_iter()
        .collect();

        assert_eq!(resolve("Outer", &entries).unwrap_err().code(), "missing_ingredient");
    }

    #[test]
    fn test_two_recipe_cycle() {
        let entries: Entries = [
            Entry::recipe("A", vec![item("B", 1)]),
            Entry::recipe("B", vec![item("A", 1)]),
        ]
        .into_iter()
        .collect();

        let err = resolve("A", &entries).unwrap_err();
        assert_eq!(
            err,
            Error::CyclicReference {
                path: vec!["A".to_string(), "B".to_string(), "A".to_string()]
            }
        );
    }

    #[test]
    fn test_self_reference_cycle() {
        let entries: Entries = [Entry::recipe("Ouroboros", vec![item("Ouroboros", 1)])]
            .into_iter()
            .collect();

        assert_eq!(resolve("Ouroboros", &entries).unwrap_err().code(), "cyclic_reference");
    }

    #[test]
    fn test_cycle_below_root() {
        let entries: Entries = [
            Entry::ingredient("Salt", 1),
            Entry::recipe("Root", vec![item("Salt", 1), item("X", 1)]),
            Entry::recipe("X", vec![item("Y", 1)]),
            Entry::recipe("Y", vec![item("X", 1)]),
        ]
        .into_iter()
        .collect();

        let err = resolve("Root", &entries).unwrap_err();
        assert_eq!(
            err,
            Error::CyclicReference {
                path: vec![
                    "Root".to_string(),
                    "X".to_string(),
                    "Y".to_string(),
                    "X".to_string()
                ]
            }
        );
    }

    #[test]
    fn test_non_positive_quantity() {
        let entries: Entries = [
            Entry::ingredient("Bun", 10),
            Entry::recipe("Burger", vec![item("Bun", 0)]),
            Entry::recipe("Debt", vec![item("Bun", -2)]),
        ]
        .into_iter()
        .collect();

        assert_eq!(resolve("Burger", &entries).unwrap_err().code(), "invalid_quantity");
        assert_eq!(
            resolve("Debt", &entries).unwrap_err(),
            Error::InvalidQuantity {
                recipe: "Debt".to_string(),
                item: "Bun".to_string(),
                quantity: qty(-2)
            }
        );
    }

    #[test]
    fn test_overflow_is_reported() {
        let entries: Entries = [
            Entry::ingredient("Grain", 1),
            Entry::recipe("Sack", vec![item("Grain", i64::MAX)]),
            Entry::recipe("Cart", vec![item("Sack", 2)]),
        ]
        .into_iter()
        .collect();

        assert!(resolve("Sack", &entries).is_ok());
        assert_eq!(
            resolve("Cart", &entries).unwrap_err(),
            Error::QuantityOverflow("Cart".to_string())
        );
    }

    #[test]
    fn test_deep_chain_does_not_exhaust_stack() {
        let depth = 50_000;
        let mut entries = Entries::new();
        entries.insert(Entry::ingredient("Grain", 1)).unwrap();
        entries
            .insert(Entry::recipe("Level0", vec![item("Grain", 1)]))
            .unwrap();
        for level in 1..depth {
            entries
                .insert(Entry::recipe(
                    format!("Level{level}"),
                    vec![item(&format!("Level{}", level - 1), 1)],
                ))
                .unwrap();
        }

        let summary = resolve(&format!("Level{}", depth - 1), &entries).unwrap();
        assert_eq!(summary.ingredients, vec![item("Grain", 1)]);
        assert_eq!(summary.cook_time, qty(1));
    }

    #[test]
    fn test_missing_item_reported_before_its_quantity() {
        let entries: Entries = [Entry::recipe("Burger", vec![item("Pickle", 0)])]
            .into_iter()
            .collect();

        assert_eq!(
            resolve("Burger", &entries).unwrap_err(),
            Error::MissingIngredient {
                recipe: "Burger".to_string(),
                item: "Pickle".to_string()
            }
        );
    }

    #[test]
    fn test_fractional_quantities() {
        let entries: Entries = [
            Entry::ingredient("Butter", 4),
            Entry::ingredient("Flour", 1),
            Entry::recipe(
                "Roux",
                vec![
                    RequiredItem::with_quantity("Butter", Quantity::from(0.5)),
                    item("Flour", 1),
                ],
            ),
            Entry::recipe(
                "Sauce",
                vec![RequiredItem::with_quantity("Roux", Quantity::from(1.5))],
            ),
        ]
        .into_iter()
        .collect();

        let summary = resolve("Sauce", &entries).unwrap();
        assert_eq!(
            summary.ingredients,
            vec![
                RequiredItem::with_quantity("Butter", Quantity::from(0.75)),
                RequiredItem::with_quantity("Flour", Quantity::from(1.5)),
            ]
        );
        assert_eq!(summary.cook_time, Quantity::from(4.5));
    }

    #[test]
    fn test_fractions_that_sum_to_whole_numbers() {
        let entries: Entries = [
            Entry::ingredient("Egg", 3),
            Entry::recipe(
                "Omelette",
                vec![RequiredItem::with_quantity("Egg", Quantity::from(2.5))],
            ),
            Entry::recipe(
                "Brunch",
                vec![RequiredItem::with_quantity("Omelette", Quantity::from(2.0))],
            ),
        ]
        .into_iter()
        .collect();

        let summary = resolve("Brunch", &entries).unwrap();
        assert_eq!(summary.ingredients, vec![item("Egg", 5)]);
        assert_eq!(summary.cook_time, qty(15));
    }

    #[test]
    fn test_non_finite_quantity() {
        let entries: Entries = [
            Entry::ingredient("Bun", 10),
            Entry::recipe(
                "Burger",
                vec![RequiredItem::with_quantity("Bun", Quantity::from(f64::INFINITY))],
            ),
        ]
        .into_iter()
        .collect();

        assert_eq!(resolve("Burger", &entries).unwrap_err().code(), "invalid_quantity");
    }

    /// `Level{i}` needs `Left{i}` and `Right{i}`, which both need `Level{i-1}`
    fn doubling_ladder(depth: u32) -> Entries {
        let mut entries = Entries::new();
        entries.insert(Entry::ingredient("Salt", 1)).unwrap();
        entries
            .insert(Entry::recipe("Level0", vec![item("Salt", 1)]))
            .unwrap();
        for level in 1..=depth {
            let below = format!("Level{}", level - 1);
            for side in ["Left", "Right"] {
                entries
                    .insert(Entry::recipe(format!("{side}{level}"), vec![item(&below, 1)]))
                    .unwrap();
            }
            entries
                .insert(Entry::recipe(
                    format!("Level{level}"),
                    vec![
                        item(&format!("Left{level}"), 1),
                        item(&format!("Right{level}"), 1),
                    ],
                ))
                .unwrap();
        }
        entries
    }

    #[test]
    fn test_shared_sub_recipes_expand_once() {
        // 2^60 paths reach Salt; walking each one would never finish
        let entries = doubling_ladder(60);

        let summary = resolve("Level60", &entries).unwrap();
        assert_eq!(summary.ingredients, vec![item("Salt", 1 << 60)]);
        assert_eq!(summary.cook_time, qty(1 << 60));
    }

    #[test]
    fn test_shared_sub_recipes_overflow() {
        let entries = doubling_ladder(100);
        assert_eq!(
            resolve("Level100", &entries).unwrap_err(),
            Error::QuantityOverflow("Level100".to_string())
        );
    }

    #[test]
    fn test_expanded_sub_recipe_keeps_first_encountered_order() {
        let entries: Entries = [
            Entry::ingredient("Oil", 1),
            Entry::ingredient("Garlic", 2),
            Entry::ingredient("Basil", 3),
            Entry::recipe("Pesto", vec![item("Basil", 2), item("Garlic", 1)]),
            Entry::recipe("Bread", vec![item("Pesto", 1)]),
            Entry::recipe("Pasta", vec![item("Garlic", 1), item("Pesto", 2)]),
            Entry::recipe("Dinner", vec![item("Bread", 1), item("Oil", 1), item("Pasta", 1)]),
        ]
        .into_iter()
        .collect();

        let summary = resolve("Dinner", &entries).unwrap();
        assert_eq!(
            summary.ingredients,
            vec![item("Basil", 6), item("Garlic", 4), item("Oil", 1)]
        );
        assert_eq!(summary.cook_time, qty(6 * 3 + 4 * 2 + 1));
    }

    #[test]
    fn test_cycle_behind_expanded_sub_recipe() {
        // Shared is expanded cleanly under A, then B loops back onto itself
        let entries: Entries = [
            Entry::ingredient("Salt", 1),
            Entry::recipe("Shared", vec![item("Salt", 1)]),
            Entry::recipe("A", vec![item("Shared", 1)]),
            Entry::recipe("B", vec![item("Shared", 1), item("B", 1)]),
            Entry::recipe("Root", vec![item("A", 1), item("B", 1)]),
        ]
        .into_iter()
        .collect();

        assert_eq!(
            resolve("Root", &entries).unwrap_err(),
            Error::CyclicReference {
                path: vec!["Root".to_string(), "B".to_string(), "B".to_string()]
            }
        );
    }
}
