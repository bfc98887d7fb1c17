use criterion::{black_box, criterion_group, criterion_main, Criterion};
use nof1::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn trial_with_outcomes(periods: usize) -> (TrialDesign, GeneratedTrial, Vec<OutcomeDataPoint>) {
    let day = DayDose::new(
        SlotDose::new(10.0, 1.0),
        SlotDose::default(),
        SlotDose::new(10.0, 1.0),
        SlotDose::default(),
    );
    let design = TrialDesign::builder()
        .treatment(Treatment::new("VER", "mg").with_posology(Posology::new(vec![day; 7], false)))
        .treatment(Treatment::new("PLA", "mg").with_posology(Posology::new(vec![day; 7], false)))
        .periods(periods)
        .period_len(7)
        .strategy(Strategy::Permutation)
        .build()
        .unwrap();
    let mut rng = StdRng::seed_from_u64(42);
    let trial = design.generate(&mut rng).unwrap();
    let outcomes: Vec<OutcomeDataPoint> = trial
        .schedule
        .entries()
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let base = if entry.treatment == "VER" { 3.0 } else { 6.0 };
            OutcomeDataPoint::new(entry.day, entry.treatment.clone())
                .with_value("pain", format!("{:.1}", base + (i % 4) as f64 * 0.2))
        })
        .collect();
    (design, trial, outcomes)
}

fn generation_benchmark(c: &mut Criterion) {
    let day = DayDose::new(
        SlotDose::new(10.0, 1.0),
        SlotDose::default(),
        SlotDose::new(10.0, 1.0),
        SlotDose::default(),
    );
    let design = TrialDesign::builder()
        .treatment(Treatment::new("VER", "mg").with_posology(Posology::new(vec![day; 7], false)))
        .treatment(Treatment::new("PLA", "mg").with_posology(Posology::new(vec![day; 7], false)))
        .periods(20)
        .period_len(7)
        .strategy(Strategy::Permutation)
        .build()
        .unwrap();

    c.bench_function("generate 20 periods", |b| {
        let mut rng = StdRng::seed_from_u64(7);
        b.iter(|| {
            let trial = design.generate(&mut rng).unwrap();
            black_box(trial);
        })
    });
}

fn analysis_benchmark(c: &mut Criterion) {
    let (design, trial, outcomes) = trial_with_outcomes(20);
    let variable = AnalysisVariable::new("pain", 2);

    for (name, variant) in [
        ("naive anova", AnalysisVariant::Naive),
        ("cycle anova", AnalysisVariant::Cycle),
        ("autoregressive ancova", AnalysisVariant::Autoregression),
    ] {
        c.bench_function(name, |b| {
            b.iter(|| {
                let result = analyze(
                    variant,
                    design.treatments(),
                    &trial.schedule,
                    &outcomes,
                    &variable,
                )
                .unwrap();
                black_box(result);
            })
        });
    }
}

criterion_group!(benches, generation_benchmark, analysis_benchmark);
criterion_main!(benches);
