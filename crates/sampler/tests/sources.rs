use approx::assert_relative_eq;
use quarry_sampler::{Distribution, RandomSource, RngSource, SequenceSource};

#[test]
fn seeded_sources_repeat() {
    let mut a = RngSource::from_seed(Some(2024));
    let mut b = RngSource::from_seed(Some(2024));
    let xs: Vec<f64> = (0..100).map(|_| a.next_unit()).collect();
    let ys: Vec<f64> = (0..100).map(|_| b.next_unit()).collect();
    assert_eq!(xs, ys);
    assert!(xs.iter().all(|x| (0.0..1.0).contains(x)));
}

#[test]
fn different_seeds_diverge() {
    let mut a = RngSource::from_seed(Some(1));
    let mut b = RngSource::from_seed(Some(2));
    let xs: Vec<f64> = (0..10).map(|_| a.next_unit()).collect();
    let ys: Vec<f64> = (0..10).map(|_| b.next_unit()).collect();
    assert_ne!(xs, ys);
}

#[test]
fn normal_moments_are_plausible() {
    let dist = Distribution::Normal { mean: 50.0, sd: 5.0 };
    let mut src = RngSource::from_seed(Some(7));
    let n = 20_000;
    let xs: Vec<f64> = (0..n).map(|_| dist.sample(&mut src)).collect();
    let mean = xs.iter().sum::<f64>() / n as f64;
    let var = xs.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1) as f64;
    assert_relative_eq!(mean, 50.0, epsilon = 0.2);
    assert_relative_eq!(var.sqrt(), 5.0, epsilon = 0.2);
}

#[test]
fn uniform_stays_in_range() {
    let dist = Distribution::Uniform { min: 40.0, max: 60.0 };
    let mut src = RngSource::from_seed(Some(3));
    for _ in 0..1_000 {
        let x = dist.sample(&mut src);
        assert!((40.0..=60.0).contains(&x));
    }
}

#[test]
fn sequence_source_behind_dyn() {
    let mut seq = SequenceSource::new(vec![0.25, 0.75]).unwrap();
    let src: &mut dyn RandomSource = &mut seq;
    assert!(src.bernoulli(0.5));
    assert!(!src.bernoulli(0.5));
    assert_eq!(src.sample_uniform(0.0, 4.0), 1.0);
    assert_eq!(seq.draws(), 3);
}
