use serde::{Deserialize, Serialize};

use crate::units::{Measurement, Unit};

/// A recipe as it appears in the JSON collection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recipe {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub servings: Option<u32>,
    pub ingredients: Vec<Ingredient>,
    pub instructions: Vec<Instruction>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// A single ingredient entry: an amount, a unit and a name
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ingredient {
    pub amount: f64,
    pub unit: Unit,
    pub name: String,
}

/// One instruction step, with an optional duration in minutes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Instruction {
    pub text: String,
    #[serde(default)]
    pub time: Option<u64>,
}

impl Recipe {
    /// Instructions that carry a duration, with their step index
    pub fn timed_steps(&self) -> impl Iterator<Item = (usize, &Instruction)> {
        self.instructions
            .iter()
            .enumerate()
            .filter(|(_, instruction)| instruction.time.is_some())
    }

    /// Sum of all step durations, in minutes
    pub fn total_time(&self) -> u64 {
        self.instructions
            .iter()
            .filter_map(|instruction| instruction.time)
            .sum()
    }
}

impl Ingredient {
    /// The ingredient's measurement as a value object
    pub fn measurement(&self) -> Measurement {
        Measurement::new(self.amount, self.unit.clone())
    }
}

impl Instruction {
    /// Step duration in seconds, if the step is timed
    pub fn duration_secs(&self) -> Option<u64> {
        self.time.map(|minutes| minutes * 60)
    }
}
