//! Cooking measurement units and metric/imperial conversion.
//!
//! Conversion pivots through a per-class base unit (milliliters for volume,
//! grams for weight) and rounds results to kitchen-friendly precision.
//! Units the tables do not cover pass through unchanged; an unknown unit is
//! never an error.

mod format;

pub use format::{format, format_amount};

use serde::{Deserialize, Serialize};
use std::fmt;

/// Measurement class, determines the conversion pivot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitClass {
    Volume,
    Weight,
}

/// Target system of a conversion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitSystem {
    Metric,
    Imperial,
}

impl UnitSystem {
    pub fn opposite(self) -> Self {
        match self {
            UnitSystem::Metric => UnitSystem::Imperial,
            UnitSystem::Imperial => UnitSystem::Metric,
        }
    }
}

/// A cooking measurement unit.
///
/// The convertible set is closed; everything else is either a marker for
/// quantities that have no sensible conversion ("pinch", "to taste", an
/// empty unit on counted items) or [`Unit::Other`], which carries whatever
/// token the recipe data used.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Unit {
    // Volume
    Milliliter,
    Liter,
    FluidOunce,
    Cup,
    Pint,
    Quart,
    Tablespoon,
    Teaspoon,
    // Weight
    Gram,
    Kilogram,
    Ounce,
    Pound,
    // Non-convertible markers
    Pinch,
    Dash,
    ToTaste,
    Empty,
    /// Unit absent from the conversion tables, kept verbatim
    Other(String),
}

impl Unit {
    /// Parse a unit token, case-insensitively, accepting common aliases
    pub fn parse(token: &str) -> Unit {
        let token = token.trim().to_lowercase();
        match token.as_str() {
            "" => Unit::Empty,
            "ml" | "milliliter" | "milliliters" | "millilitre" | "millilitres" => Unit::Milliliter,
            "l" | "liter" | "liters" | "litre" | "litres" => Unit::Liter,
            "floz" | "fl oz" | "fl-oz" | "fluid ounce" | "fluid ounces" => Unit::FluidOunce,
            "cup" | "cups" => Unit::Cup,
            "pint" | "pints" | "pt" => Unit::Pint,
            "quart" | "quarts" | "qt" => Unit::Quart,
            "tbsp" | "tbs" | "tablespoon" | "tablespoons" => Unit::Tablespoon,
            "tsp" | "teaspoon" | "teaspoons" => Unit::Teaspoon,
            "g" | "gram" | "grams" => Unit::Gram,
            "kg" | "kilogram" | "kilograms" => Unit::Kilogram,
            "oz" | "ounce" | "ounces" => Unit::Ounce,
            "lb" | "lbs" | "pound" | "pounds" => Unit::Pound,
            "pinch" => Unit::Pinch,
            "dash" => Unit::Dash,
            "to taste" => Unit::ToTaste,
            _ => Unit::Other(token),
        }
    }

    /// Canonical lowercase token, as used in recipe data
    pub fn symbol(&self) -> &str {
        match self {
            Unit::Milliliter => "ml",
            Unit::Liter => "l",
            Unit::FluidOunce => "floz",
            Unit::Cup => "cup",
            Unit::Pint => "pint",
            Unit::Quart => "quart",
            Unit::Tablespoon => "tbsp",
            Unit::Teaspoon => "tsp",
            Unit::Gram => "g",
            Unit::Kilogram => "kg",
            Unit::Ounce => "oz",
            Unit::Pound => "lb",
            Unit::Pinch => "pinch",
            Unit::Dash => "dash",
            Unit::ToTaste => "to taste",
            Unit::Empty => "",
            Unit::Other(token) => token,
        }
    }

    /// Volume or weight; `None` for markers and unknown units
    pub fn class(&self) -> Option<UnitClass> {
        match self {
            Unit::Milliliter
            | Unit::Liter
            | Unit::FluidOunce
            | Unit::Cup
            | Unit::Pint
            | Unit::Quart
            | Unit::Tablespoon
            | Unit::Teaspoon => Some(UnitClass::Volume),
            Unit::Gram | Unit::Kilogram | Unit::Ounce | Unit::Pound => Some(UnitClass::Weight),
            _ => None,
        }
    }

    /// Scale to the class base unit: milliliters for volume, grams for weight
    fn factor_to_base(&self) -> Option<f64> {
        let factor = match self {
            Unit::Milliliter => 1.0,
            Unit::Liter => 1000.0,
            Unit::FluidOunce => 29.5735,
            Unit::Cup => 236.588,
            Unit::Pint => 473.176,
            Unit::Quart => 946.353,
            Unit::Tablespoon => 14.7868,
            Unit::Teaspoon => 4.92892,
            Unit::Gram => 1.0,
            Unit::Kilogram => 1000.0,
            Unit::Ounce => 28.3495,
            Unit::Pound => 453.592,
            _ => return None,
        };
        Some(factor)
    }

    /// Canonical counterpart in the given system.
    ///
    /// The metric direction folds many units onto milliliters and grams, so
    /// converting there and back is not an identity on the unit symbol.
    fn counterpart(&self, direction: UnitSystem) -> Option<Unit> {
        match direction {
            UnitSystem::Imperial => match self {
                Unit::Milliliter => Some(Unit::FluidOunce),
                Unit::Liter => Some(Unit::Quart),
                Unit::Gram => Some(Unit::Ounce),
                Unit::Kilogram => Some(Unit::Pound),
                _ => None,
            },
            UnitSystem::Metric => match self {
                Unit::FluidOunce
                | Unit::Cup
                | Unit::Pint
                | Unit::Quart
                | Unit::Tablespoon
                | Unit::Teaspoon => Some(Unit::Milliliter),
                Unit::Ounce | Unit::Pound => Some(Unit::Gram),
                _ => None,
            },
        }
    }
}

impl From<String> for Unit {
    fn from(token: String) -> Self {
        Unit::parse(&token)
    }
}

impl From<Unit> for String {
    fn from(unit: Unit) -> Self {
        unit.symbol().to_string()
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// An amount paired with its unit.
///
/// Immutable value object: conversion returns a new measurement and never
/// mutates the input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    pub amount: f64,
    pub unit: Unit,
}

impl Measurement {
    pub fn new(amount: f64, unit: Unit) -> Self {
        Self { amount, unit }
    }

    /// Convert into the given unit system, rounding the result
    pub fn convert(&self, direction: UnitSystem) -> Measurement {
        convert(self.amount, &self.unit, direction)
    }
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format(self.amount, &self.unit))
    }
}

/// Convert `amount` of `unit` into the given system.
///
/// Markers, unknown units and units without a counterpart in the requested
/// direction pass through unchanged. The result is rounded with
/// [`round_cooking`].
pub fn convert(amount: f64, unit: &Unit, direction: UnitSystem) -> Measurement {
    let Some(from_base) = unit.factor_to_base() else {
        return Measurement::new(amount, unit.clone());
    };
    let Some(target) = unit.counterpart(direction) else {
        return Measurement::new(amount, unit.clone());
    };
    let Some(to_base) = target.factor_to_base() else {
        return Measurement::new(amount, unit.clone());
    };

    let raw = amount * from_base / to_base;
    Measurement::new(round_cooking(raw), target)
}

/// Round a converted amount to kitchen precision: whole numbers from 10 up,
/// quarters from 1 up, eighths below that.
pub fn round_cooking(value: f64) -> f64 {
    let magnitude = value.abs();
    if magnitude >= 10.0 {
        value.round()
    } else if magnitude >= 1.0 {
        (value * 4.0).round() / 4.0
    } else {
        (value * 8.0).round() / 8.0
    }
}
