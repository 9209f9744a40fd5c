use thermo_filter::{FilterEngine, FilterKind};

fn engine(kind: FilterKind, window_size: usize) -> FilterEngine {
    FilterEngine::new(kind, window_size).expect("Valid window")
}

fn all_kinds() -> Vec<FilterKind> {
    let mut kinds = vec![FilterKind::None];
    #[cfg(feature = "filter-median")]
    kinds.push(FilterKind::Median);
    #[cfg(feature = "filter-moving-avg")]
    kinds.push(FilterKind::MovingAverage);
    #[cfg(feature = "filter-ema")]
    kinds.push(FilterKind::ExponentialSmoothing);
    #[cfg(feature = "filter-two-stage")]
    kinds.push(FilterKind::TwoStage);
    kinds
}

#[test]
fn every_strategy_returns_first_input() {
    for kind in all_kinds() {
        for window_size in [1, 2, 3, 8, 15] {
            let mut filter = engine(kind, window_size);
            assert_eq!(filter.apply(21.37), 21.37, "{kind:?} window {window_size}");
        }
    }
}

#[test]
fn every_strategy_holds_constant_input() {
    for kind in all_kinds() {
        let mut filter = engine(kind, 5);
        for _ in 0..20 {
            let out = filter.apply(22.5);
            assert!((out - 22.5).abs() < 1e-5, "{kind:?} drifted to {out}");
        }
    }
}

#[cfg(feature = "filter-median")]
mod median_tests {
    use super::*;

    #[test]
    fn median_seeded_window_sequence() {
        let mut filter = engine(FilterKind::Median, 3);

        assert_eq!(filter.apply(20.0), 20.0);
        assert_eq!(filter.apply(22.0), 20.0);
        assert_eq!(filter.apply(19.0), 20.0);
    }

    #[test]
    fn median_follows_step_after_majority() {
        let mut filter = engine(FilterKind::Median, 3);
        filter.apply(20.0);

        // Seed copies are overwritten one by one
        assert_eq!(filter.apply(25.0), 20.0);
        assert_eq!(filter.apply(25.0), 25.0);
    }
}

#[cfg(feature = "filter-moving-avg")]
mod moving_avg_tests {
    use super::*;

    #[test]
    fn moving_avg_fill_then_steady_state() {
        let mut filter = engine(FilterKind::MovingAverage, 3);

        assert_eq!(filter.apply(20.0), 20.0);
        assert_eq!(filter.apply(20.5), 20.5);
        assert_eq!(filter.apply(21.0), 21.0);

        // (328 + 336 + 344) / 3 = 336 ticks
        assert_eq!(filter.apply(21.5), 21.0);
    }

    #[test]
    fn moving_avg_output_is_tick_aligned() {
        let mut filter = engine(FilterKind::MovingAverage, 4);
        let samples = [20.03, 20.11, 19.97, 20.08, 20.2, 19.9, 20.04, 20.13];

        for (i, &sample) in samples.iter().enumerate() {
            let out = filter.apply(sample);
            if i >= 4 {
                let ticks = out * 16.0;
                assert_eq!(ticks, ticks.round(), "output {out} is not a whole tick");
            }
        }
    }

    #[test]
    fn moving_avg_step_response() {
        let mut filter = engine(FilterKind::MovingAverage, 4);
        for _ in 0..4 {
            filter.apply(0.0);
        }

        assert_eq!(filter.apply(1.0), 0.25);
        assert_eq!(filter.apply(1.0), 0.5);
        assert_eq!(filter.apply(1.0), 0.75);
        assert_eq!(filter.apply(1.0), 1.0);
    }
}

#[cfg(feature = "filter-ema")]
mod ema_tests {
    use super::*;

    #[test]
    fn ema_step_response() {
        let mut filter = engine(FilterKind::ExponentialSmoothing, 1);
        filter.apply(0.0);

        let out1 = filter.apply(1.0);
        assert!((out1 - 0.3).abs() < 1e-6, "Expected 0.3, got {}", out1);

        let out2 = filter.apply(1.0);
        assert!((out2 - 0.51).abs() < 1e-6, "Expected 0.51, got {}", out2);
    }

    #[test]
    fn ema_converges_to_constant() {
        let mut filter = engine(FilterKind::ExponentialSmoothing, 1);
        filter.apply(18.0);

        let mut output = 0.0;
        for _ in 0..100 {
            output = filter.apply(24.0);
        }

        assert!((output - 24.0).abs() < 0.01);
    }

    #[test]
    fn ema_filters_noise() {
        let mut filter = engine(FilterKind::ExponentialSmoothing, 1);

        let noisy_samples = [20.5, 20.6, 20.4, 20.55, 20.45, 20.52];
        let outputs: Vec<f32> = noisy_samples.iter().map(|&s| filter.apply(s)).collect();

        assert!(variance(&outputs) < variance(&noisy_samples));
    }

    fn variance(data: &[f32]) -> f32 {
        let mean: f32 = data.iter().sum::<f32>() / data.len() as f32;
        data.iter().map(|x| (x - mean).powi(2)).sum::<f32>() / data.len() as f32
    }
}

#[cfg(feature = "filter-two-stage")]
mod two_stage_tests {
    use super::*;

    #[test]
    fn two_stage_ignores_spike_and_smooths_step() {
        let mut filter = engine(FilterKind::TwoStage, 3);
        filter.apply(20.0);

        assert!((filter.apply(80.0) - 20.0).abs() < 1e-5);

        // Median now [80, 30, 20] -> 30; 0.4 * 30 + 0.6 * 20 = 24
        let out = filter.apply(30.0);
        assert!((out - 24.0).abs() < 1e-4, "Expected 24.0, got {}", out);
    }

    #[test]
    fn stages_are_independent_across_engines() {
        let mut a = engine(FilterKind::TwoStage, 3);
        let mut b = engine(FilterKind::TwoStage, 3);

        a.apply(10.0);
        a.apply(50.0);
        a.apply(50.0);

        assert_eq!(b.apply(30.0), 30.0);
    }
}
