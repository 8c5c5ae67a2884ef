//! Display-line rendering: the strings a front end shows for a recipe.
//!
//! These are pure builders; the preferred unit system decides which side of
//! a conversion leads the line.

use crate::model::{Ingredient, Instruction, Recipe};
use crate::units::{self, UnitSystem};

/// Ingredient rendered in the preferred unit system: `1 ½ cup flour`.
///
/// Zero amounts drop the numeral, so "salt, to taste" does not come out as
/// "0 to taste salt".
pub fn ingredient_line(ingredient: &Ingredient, system: UnitSystem) -> String {
    let measurement = ingredient.measurement().convert(system);
    if measurement.amount == 0.0 {
        let symbol = measurement.unit.symbol();
        if symbol.is_empty() {
            return ingredient.name.clone();
        }
        return format!("{}, {}", ingredient.name, symbol);
    }
    format!(
        "{} {}",
        units::format(measurement.amount, &measurement.unit),
        ingredient.name
    )
}

/// Ingredient rendered in the preferred system with the other system in
/// parentheses: `1 ½ cup flour (355 ml)`.
///
/// The parenthetical is omitted when both renderings coincide, i.e. when
/// the unit does not convert.
pub fn ingredient_line_dual(ingredient: &Ingredient, system: UnitSystem) -> String {
    let line = ingredient_line(ingredient, system);
    let preferred = ingredient.measurement().convert(system);
    let other = ingredient.measurement().convert(system.opposite());
    if other == preferred {
        return line;
    }
    format!("{} ({})", line, units::format(other.amount, &other.unit))
}

/// Numbered instruction line with the duration for timed steps:
/// `3. Simmer the sauce (10 min)`
pub fn instruction_line(index: usize, instruction: &Instruction) -> String {
    match instruction.time {
        Some(minutes) => format!("{}. {} ({} min)", index + 1, instruction.text, minutes),
        None => format!("{}. {}", index + 1, instruction.text),
    }
}

/// One-line listing entry for a recipe collection
pub fn recipe_summary(recipe: &Recipe) -> String {
    let total = recipe.total_time();
    if total > 0 {
        format!(
            "{} ({} ingredients, {} min)",
            recipe.name,
            recipe.ingredients.len(),
            total
        )
    } else {
        format!("{} ({} ingredients)", recipe.name, recipe.ingredients.len())
    }
}
