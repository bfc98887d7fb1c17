use std::collections::HashMap;

use crate::data::treatment::Treatment;
use crate::schedule::error::ScheduleError;
use crate::schedule::types::{DecreasingBlock, Schedule, ScheduleEntry, SelectedPosology};

/// Expand an administration sequence into the day-by-day plan
///
/// Iterates the sequence period by period, copying each period's selected
/// dosing table day-for-day into the plan. When a period continues the same
/// treatment as its predecessor and the table carries the repeat-last flag,
/// the table is not restarted: every day of the continuation period repeats
/// the table's final day (the flat maintenance dose of decreasing schedules).
///
/// The day counter is global, starting at `origin` and contiguous across the
/// whole plan; per-table day numbering never leaks into the output. The
/// function is pure: all randomness was resolved when the sequence and the
/// selections were drawn.
///
/// The repeat-last continuation keys on label equality alone. Handing in a
/// different table instance for the same label between calls is a caller
/// error and is not defended against.
///
/// # Arguments
///
/// * `sequence` - One treatment label per period, from the randomizer
/// * `selections` - The dosing table chosen per treatment label
/// * `period_len` - Days per period; every table must cover exactly this
/// * `origin` - First day index of the plan (0 or 1 by convention)
pub fn assemble(
    sequence: &[String],
    selections: &HashMap<String, SelectedPosology>,
    period_len: usize,
    origin: usize,
) -> Result<Schedule, ScheduleError> {
    if period_len == 0 {
        return Err(ScheduleError::InvalidPeriodLength(period_len));
    }

    let mut entries = Vec::with_capacity(sequence.len() * period_len);
    let mut day = origin;
    for (index, label) in sequence.iter().enumerate() {
        let selection = selections
            .get(label)
            .ok_or_else(|| ScheduleError::MissingPosology(label.clone()))?;
        let posology = selection.posology();
        if posology.len() != period_len {
            return Err(ScheduleError::PosologyLengthMismatch {
                treatment: label.clone(),
                days: posology.len(),
                expected: period_len,
            });
        }

        let continuation = index > 0 && sequence[index - 1] == *label && posology.repeat_last();
        for table_day in 0..period_len {
            let doses = if continuation {
                posology.days()[period_len - 1]
            } else {
                posology.days()[table_day]
            };
            entries.push(ScheduleEntry {
                day,
                treatment: label.clone(),
                unit: selection.unit().to_string(),
                doses,
            });
            day += 1;
        }
    }

    Ok(Schedule::new(entries, origin, period_len))
}

/// Extract the supplementary taper blocks for the dispensing pharmacy
///
/// Walks the interior period boundaries of the sequence; wherever the
/// treatment changes away from one that declares a decreasing dosage table,
/// a [DecreasingBlock] built from that table is emitted, anchored at the
/// first day of the new period. Treatments without a taper table contribute
/// nothing.
pub fn decreasing_blocks(
    sequence: &[String],
    treatments: &[Treatment],
    period_len: usize,
    origin: usize,
) -> Vec<DecreasingBlock> {
    let mut blocks = Vec::new();
    for boundary in 1..sequence.len() {
        if sequence[boundary] == sequence[boundary - 1] {
            continue;
        }
        let previous = treatments
            .iter()
            .find(|t| t.abbreviation() == sequence[boundary - 1]);
        if let Some(treatment) = previous {
            if let Some(taper) = treatment.decreasing() {
                blocks.push(DecreasingBlock {
                    start_day: origin + boundary * period_len,
                    treatment: treatment.abbreviation().to_string(),
                    unit: treatment.unit().to_string(),
                    doses: taper.days().to_vec(),
                });
            }
        }
    }
    blocks
}
