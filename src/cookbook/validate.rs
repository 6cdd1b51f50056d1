// src/cookbook/validate.rs

//! Admission rules for new entries
//!
//! Rules are checked in order and the first failure wins:
//! 1. the name must not already be in the cookbook
//! 2. the type tag must be `ingredient` or `recipe`
//! 3. the fields for that type must be present
//! 4. a recipe must not list the same item twice
//! 5. an ingredient must not have a negative cook time
//!
//! Whether a recipe's items exist is deliberately not checked here; recipes
//! may be registered before the entries they require.

use crate::cookbook::model::{Entry, EntryDraft, EntryKind, Ingredient, Recipe, RequiredItem};
use crate::cookbook::store::Entries;
use crate::error::{Error, Result};
use std::collections::HashSet;

/// Check a submitted entry against the cookbook and turn it into an [`Entry`]
pub fn validate(draft: EntryDraft, entries: &Entries) -> Result<Entry> {
    let EntryDraft {
        name,
        kind,
        cook_time,
        required_items,
    } = draft;

    if entries.contains(&name) {
        return Err(Error::DuplicateName(name));
    }

    let Some(kind) = EntryKind::parse(&kind) else {
        return Err(Error::UnknownKind { name, kind });
    };

    match kind {
        EntryKind::Recipe => {
            let Some(required_items) = required_items else {
                return Err(Error::MissingField {
                    name,
                    field: "requiredItems",
                });
            };
            if let Some(item) = first_duplicate(&required_items) {
                return Err(Error::DuplicateRequiredItem {
                    item: item.to_string(),
                    recipe: name,
                });
            }
            Ok(Entry::Recipe(Recipe {
                name,
                required_items,
            }))
        }
        EntryKind::Ingredient => {
            let Some(cook_time) = cook_time else {
                return Err(Error::MissingField {
                    name,
                    field: "cookTime",
                });
            };
            let Ok(cook_time) = u64::try_from(cook_time) else {
                return Err(Error::NegativeCookTime { name, cook_time });
            };
            Ok(Entry::Ingredient(Ingredient { name, cook_time }))
        }
    }
}

/// Name of the first item that appears twice in the list, if any
fn first_duplicate(items: &[RequiredItem]) -> Option<&str> {
    let mut seen = HashSet::with_capacity(items.len());
    items
        .iter()
        .map(|item| item.name.as_str())
        .find(|name| !seen.insert(*name))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cookbook_with(entries: &[Entry]) -> Entries {
        entries.iter().cloned().collect()
    }

    #[test]
    fn test_valid_ingredient() {
        let entry = validate(EntryDraft::ingredient("Bun", 10), &Entries::new()).unwrap();
        assert_eq!(entry, Entry::ingredient("Bun", 10));
    }

    #[test]
    fn test_zero_cook_time_allowed() {
        assert!(validate(EntryDraft::ingredient("Lettuce", 0), &Entries::new()).is_ok());
    }

    #[test]
    fn test_valid_recipe_with_unknown_items() {
        // Items need not exist yet
        let draft = EntryDraft::recipe(
            "Burger",
            vec![RequiredItem::new("Bun", 2), RequiredItem::new("Patty", 1)],
        );
        let entry = validate(draft, &Entries::new()).unwrap();
        assert_eq!(entry.kind(), EntryKind::Recipe);
    }

    #[test]
    fn test_empty_recipe_allowed() {
        assert!(validate(EntryDraft::recipe("Air", vec![]), &Entries::new()).is_ok());
    }

    #[test]
    fn test_duplicate_name() {
        let entries = cookbook_with(&[Entry::ingredient("X", 1)]);
        let err = validate(EntryDraft::ingredient("X", 1), &entries).unwrap_err();
        assert_eq!(err, Error::DuplicateName("X".to_string()));
    }

    #[test]
    fn test_duplicate_name_checked_before_kind() {
        let entries = cookbook_with(&[Entry::ingredient("X", 1)]);
        let mut draft = EntryDraft::ingredient("X", 1);
        draft.kind = "utensil".to_string();
        assert_eq!(validate(draft, &entries).unwrap_err().code(), "duplicate_name");
    }

    #[test]
    fn test_unknown_kind() {
        let mut draft = EntryDraft::ingredient("Spoon", 0);
        draft.kind = "utensil".to_string();
        let err = validate(draft, &Entries::new()).unwrap_err();
        assert_eq!(
            err,
            Error::UnknownKind {
                name: "Spoon".to_string(),
                kind: "utensil".to_string()
            }
        );
    }

    #[test]
    fn test_duplicate_required_item() {
        let draft = EntryDraft::recipe(
            "Toast",
            vec![RequiredItem::new("A", 1), RequiredItem::new("A", 2)],
        );
        let err = validate(draft, &Entries::new()).unwrap_err();
        assert_eq!(
            err,
            Error::DuplicateRequiredItem {
                recipe: "Toast".to_string(),
                item: "A".to_string()
            }
        );
    }

    #[test]
    fn test_negative_cook_time() {
        let err = validate(EntryDraft::ingredient("Ice", -1), &Entries::new()).unwrap_err();
        assert_eq!(
            err,
            Error::NegativeCookTime {
                name: "Ice".to_string(),
                cook_time: -1
            }
        );
    }

    #[test]
    fn test_missing_fields() {
        let mut ingredient = EntryDraft::ingredient("Bun", 1);
        ingredient.cook_time = None;
        assert_eq!(
            validate(ingredient, &Entries::new()).unwrap_err(),
            Error::MissingField {
                name: "Bun".to_string(),
                field: "cookTime"
            }
        );

        let mut recipe = EntryDraft::recipe("Burger", vec![]);
        recipe.required_items = None;
        assert_eq!(
            validate(recipe, &Entries::new()).unwrap_err().code(),
            "missing_field"
        );
    }

    #[test]
    fn test_recipe_ignores_cook_time_field() {
        let mut draft = EntryDraft::recipe("Burger", vec![RequiredItem::new("Bun", 1)]);
        draft.cook_time = Some(-5);
        assert!(validate(draft, &Entries::new()).is_ok());
    }
}
