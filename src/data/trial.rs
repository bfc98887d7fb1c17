use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::data::treatment::Treatment;
use crate::error::Nof1Error;
use crate::randomize::{RandomizeError, Strategy};
use crate::schedule::{
    assemble, decreasing_blocks, DecreasingBlock, Schedule, ScheduleError, SelectedPosology,
};

/// The frozen configuration of a trial
///
/// A [TrialDesign] bundles everything needed to activate a trial: the
/// treatment set with its dosing tables, the period geometry, and the
/// randomization strategy. It is authored once, before randomization, and
/// not modified afterwards.
///
/// # Examples
///
/// ```
/// use nof1::*;
/// use rand::rngs::StdRng;
/// use rand::SeedableRng;
///
/// let day = DayDose::new(
///     SlotDose::new(10.0, 1.0),
///     SlotDose::default(),
///     SlotDose::new(10.0, 1.0),
///     SlotDose::default(),
/// );
/// let design = TrialDesign::builder()
///     .treatment(Treatment::new("VER", "mg").with_posology(Posology::new(vec![day; 7], false)))
///     .treatment(Treatment::new("PLA", "mg").with_posology(Posology::new(vec![day; 7], false)))
///     .periods(6)
///     .period_len(7)
///     .strategy(Strategy::Permutation)
///     .build()
///     .unwrap();
///
/// let mut rng = StdRng::seed_from_u64(42);
/// let trial = design.generate(&mut rng).unwrap();
/// assert_eq!(trial.schedule.entries().len(), 42);
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TrialDesign {
    treatments: Vec<Treatment>,
    periods: usize,
    period_len: usize,
    origin: usize,
    strategy: Strategy,
}

/// The product of activating a trial
///
/// Holds the randomized administration sequence, the materialized day-by-day
/// schedule, and the supplementary taper blocks for the pharmacy. Generated
/// exactly once per activation; re-randomizing produces a fresh value that
/// replaces the old one.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct GeneratedTrial {
    pub sequence: Vec<String>,
    pub schedule: Schedule,
    pub decreasing: Vec<DecreasingBlock>,
}

impl TrialDesign {
    /// Start building a trial design
    pub fn builder() -> TrialDesignBuilder {
        TrialDesignBuilder::default()
    }

    /// Get the treatment set
    pub fn treatments(&self) -> &[Treatment] {
        &self.treatments
    }

    /// Number of periods
    pub fn periods(&self) -> usize {
        self.periods
    }

    /// Days per period
    pub fn period_len(&self) -> usize {
        self.period_len
    }

    /// First day index of the plan (0 or 1 by convention)
    pub fn origin(&self) -> usize {
        self.origin
    }

    /// The randomization strategy
    pub fn strategy(&self) -> &Strategy {
        &self.strategy
    }

    /// Randomize the administration sequence and materialize the schedule
    ///
    /// Runs the full activation pipeline: draw the sequence with the
    /// configured strategy, select one dosing table per treatment at random,
    /// assemble the day-by-day plan, and extract the supplementary taper
    /// blocks. All randomness is drawn from `rng`, so a seeded generator
    /// reproduces the same trial.
    pub fn generate(&self, rng: &mut impl Rng) -> Result<GeneratedTrial, Nof1Error> {
        let labels: Vec<String> = self
            .treatments
            .iter()
            .map(|t| t.abbreviation().to_string())
            .collect();
        let sequence = self.strategy.randomize(&labels, self.periods, rng)?;

        let mut selections: HashMap<String, SelectedPosology> = HashMap::new();
        for treatment in &self.treatments {
            if let Some(posology) = treatment.select_posology(rng) {
                selections.insert(
                    treatment.abbreviation().to_string(),
                    SelectedPosology::new(treatment.unit(), posology.clone()),
                );
            }
        }

        let schedule = assemble(&sequence, &selections, self.period_len, self.origin)?;
        let decreasing = decreasing_blocks(&sequence, &self.treatments, self.period_len, self.origin);

        Ok(GeneratedTrial {
            sequence,
            schedule,
            decreasing,
        })
    }
}

/// Builder for [TrialDesign]
#[derive(Debug, Clone)]
pub struct TrialDesignBuilder {
    treatments: Vec<Treatment>,
    periods: usize,
    period_len: usize,
    origin: usize,
    strategy: Strategy,
}

impl Default for TrialDesignBuilder {
    fn default() -> Self {
        TrialDesignBuilder {
            treatments: Vec::new(),
            periods: 0,
            period_len: 0,
            origin: 0,
            strategy: Strategy::Permutation,
        }
    }
}

impl TrialDesignBuilder {
    /// Add a treatment to the trial
    pub fn treatment(mut self, treatment: Treatment) -> Self {
        self.treatments.push(treatment);
        self
    }

    /// Set the number of periods
    pub fn periods(mut self, periods: usize) -> Self {
        self.periods = periods;
        self
    }

    /// Set the period length in days
    pub fn period_len(mut self, period_len: usize) -> Self {
        self.period_len = period_len;
        self
    }

    /// Set the first day index of the plan (defaults to 0)
    pub fn origin(mut self, origin: usize) -> Self {
        self.origin = origin;
        self
    }

    /// Set the randomization strategy (defaults to [Strategy::Permutation])
    pub fn strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Validate the configuration and freeze the design
    pub fn build(self) -> Result<TrialDesign, Nof1Error> {
        if self.treatments.len() < 2 {
            return Err(RandomizeError::TooFewTreatments(self.treatments.len()).into());
        }
        if self.periods < 1 {
            return Err(RandomizeError::TooFewPeriods(self.periods).into());
        }
        if self.period_len < 1 {
            return Err(ScheduleError::InvalidPeriodLength(self.period_len).into());
        }
        Ok(TrialDesign {
            treatments: self.treatments,
            periods: self.periods,
            period_len: self.period_len,
            origin: self.origin,
            strategy: self.strategy,
        })
    }
}
