use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::data::posology::Posology;

/// A substance administered during the trial
///
/// A treatment is identified by its abbreviation (e.g. "VER" for verum,
/// "PLA" for placebo) and carries the unit its doses are expressed in.
/// Both are immutable once the trial is active.
///
/// A treatment owns one or more alternative dosing tables ([Posology]);
/// one is selected at random per trial instantiation. It may additionally
/// declare a decreasing (taper) table, used only for the supplementary
/// pharmacy schedule when the treatment is switched away from.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Treatment {
    abbreviation: String,
    unit: String,
    posologies: Vec<Posology>,
    decreasing: Option<Posology>,
}

impl Treatment {
    /// Create a new treatment with no dosing tables
    ///
    /// # Arguments
    ///
    /// * `abbreviation` - Short label identifying the treatment
    /// * `unit` - Unit the doses are expressed in (e.g. "mg")
    pub fn new(abbreviation: impl Into<String>, unit: impl Into<String>) -> Self {
        Treatment {
            abbreviation: abbreviation.into(),
            unit: unit.into(),
            posologies: Vec::new(),
            decreasing: None,
        }
    }

    /// Add an alternative dosing table
    pub fn with_posology(mut self, posology: Posology) -> Self {
        self.posologies.push(posology);
        self
    }

    /// Declare a decreasing (taper) table for this treatment
    pub fn with_decreasing(mut self, posology: Posology) -> Self {
        self.decreasing = Some(posology);
        self
    }

    /// Get the treatment abbreviation
    pub fn abbreviation(&self) -> &str {
        &self.abbreviation
    }

    /// Get the dose unit
    pub fn unit(&self) -> &str {
        &self.unit
    }

    /// Get all alternative dosing tables
    pub fn posologies(&self) -> &[Posology] {
        &self.posologies
    }

    /// Get the decreasing (taper) table, if declared
    pub fn decreasing(&self) -> Option<&Posology> {
        self.decreasing.as_ref()
    }

    /// Select one of the alternative dosing tables at random
    ///
    /// Returns `None` when the treatment owns no tables.
    pub fn select_posology(&self, rng: &mut impl Rng) -> Option<&Posology> {
        if self.posologies.is_empty() {
            return None;
        }
        let idx = rng.random_range(0..self.posologies.len());
        Some(&self.posologies[idx])
    }
}
