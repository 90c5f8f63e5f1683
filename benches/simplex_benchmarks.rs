use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use ndarray::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::time::Duration;

use simplexkit::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq)]
enum TestType {
    L2Penalty,
    L1Penalty,
}

impl TestType {
    pub fn name(&self) -> &'static str {
        match self {
            TestType::L2Penalty => "L2Penalty",
            TestType::L1Penalty => "L1Penalty",
        }
    }

    pub fn penalty(&self) -> PenaltyType {
        match self {
            TestType::L2Penalty => PenaltyType::L2,
            TestType::L1Penalty => PenaltyType::L1,
        }
    }

    pub fn all_types() -> Vec<TestType> {
        vec![TestType::L2Penalty, TestType::L1Penalty]
    }
}

#[derive(Clone)]
struct TestProblem {
    name: String,
    function: fn(&Array1<f64>) -> f64,
    constraints: Vec<fn(&Array1<f64>) -> f64>,
    x0: Array1<f64>,
    lb: Array1<f64>,
    ub: Array1<f64>,
    dimensions: usize,
}

impl TestProblem {
    fn problem(&self) -> Problem {
        let constraints = self
            .constraints
            .iter()
            .map(|&g| Box::new(MultiDimFn::new(g)) as Box<dyn Constraint>)
            .collect();
        let bounds = Bounds::new(self.lb.clone(), self.ub.clone()).unwrap();
        Problem::new(
            MultiDimFn::new(self.function),
            self.x0.clone(),
            bounds,
            constraints,
        )
        .unwrap()
    }
}

// Test Functions
fn sphere_function(x: &Array1<f64>) -> f64 {
    x.iter().map(|xi| xi * xi).sum()
}

fn rosenbrock_function(x: &Array1<f64>) -> f64 {
    let mut sum = 0.0;
    for i in 0..x.len() - 1 {
        sum += 100.0 * (x[i + 1] - x[i] * x[i]).powi(2) + (1.0 - x[i]).powi(2);
    }
    sum
}

fn rastrigin_function(x: &Array1<f64>) -> f64 {
    let a = 10.0;
    let sum: f64 = x
        .iter()
        .map(|xi| xi * xi - a * (2.0 * std::f64::consts::PI * xi).cos())
        .sum();
    a * x.len() as f64 + sum
}

fn quadratic_function(x: &Array1<f64>) -> f64 {
    (x[0] - 2.0).powi(2) + 2.0 * (x[1] - 1.0).powi(2) + x[0] * x[1]
}

// Constraints, g(x) ≤ 0
fn cubic_line(x: &Array1<f64>) -> f64 {
    (x[0] - 1.0).powi(3) - x[1] + 1.0
}

fn half_plane(x: &Array1<f64>) -> f64 {
    x[0] + x[1] - 1.8
}

fn unit_ball(x: &Array1<f64>) -> f64 {
    x.iter().map(|xi| xi * xi).sum::<f64>() - 1.0
}

fn sum_at_least_one(x: &Array1<f64>) -> f64 {
    1.0 - x.sum()
}

fn setup_test_problems() -> Vec<TestProblem> {
    vec![
        TestProblem {
            name: "sphere_2d".to_string(),
            function: sphere_function,
            constraints: vec![],
            x0: array![1.5, 1.5],
            lb: array![-5.0, -5.0],
            ub: array![5.0, 5.0],
            dimensions: 2,
        },
        TestProblem {
            name: "rosenbrock_constrained_2d".to_string(),
            function: rosenbrock_function,
            constraints: vec![cubic_line, half_plane],
            x0: array![0.5, 0.5],
            lb: array![-1.5, -0.5],
            ub: array![1.5, 0.5],
            dimensions: 2,
        },
        TestProblem {
            name: "quadratic_constrained_2d".to_string(),
            function: quadratic_function,
            constraints: vec![unit_ball, sum_at_least_one],
            x0: array![0.0, 0.0],
            lb: array![-2.0, -2.0],
            ub: array![2.0, 2.0],
            dimensions: 2,
        },
        TestProblem {
            name: "sphere_5d".to_string(),
            function: sphere_function,
            constraints: vec![sum_at_least_one],
            x0: Array1::from_elem(5, 0.5),
            lb: Array1::from_elem(5, -3.0),
            ub: Array1::from_elem(5, 3.0),
            dimensions: 5,
        },
        TestProblem {
            name: "rastrigin_5d".to_string(),
            function: rastrigin_function,
            constraints: vec![unit_ball],
            x0: Array1::from_elem(5, 0.1),
            lb: Array1::from_elem(5, -5.12),
            ub: Array1::from_elem(5, 5.12),
            dimensions: 5,
        },
        TestProblem {
            name: "rosenbrock_10d".to_string(),
            function: rosenbrock_function,
            constraints: vec![],
            x0: Array1::from_elem(10, 0.3),
            lb: Array1::from_elem(10, -2.0),
            ub: Array1::from_elem(10, 2.0),
            dimensions: 10,
        },
    ]
}

fn run_optimization_benchmark(
    problem: &Problem,
    category: TestType,
    iterations: usize,
    seed: u64,
) -> (f64, usize) {
    let options = SimplexOptions::default().with_penalty(category.penalty());
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let res = minimize_with_rng(problem, iterations, &options, &mut rng).unwrap();
    (res.fmin().unwrap_or(f64::NAN), res.fn_evals)
}

fn bench_iterations(c: &mut Criterion, iterations: usize, measurement_secs: u64) {
    let problems = setup_test_problems();

    let mut group = c.benchmark_group(format!("simplex_{}_iterations", iterations));
    group.measurement_time(Duration::from_secs(measurement_secs));
    group.sample_size(20);

    for test in &problems {
        let problem = test.problem();
        for category in TestType::all_types() {
            group.throughput(Throughput::Elements(test.dimensions as u64));
            group.bench_with_input(
                BenchmarkId::new(format!("optimization_{}", category.name()), &test.name),
                &(&problem, category),
                |b, (prob, cat)| {
                    b.iter(|| {
                        let (fmin, fn_evals) = run_optimization_benchmark(
                            black_box(prob),
                            black_box(*cat),
                            black_box(iterations),
                            black_box(42),
                        );
                        black_box((fmin, fn_evals))
                    });
                },
            );
        }
    }
    group.finish();
}

fn bench_iterations_10(c: &mut Criterion) {
    bench_iterations(c, 10, 10);
}

fn bench_iterations_100(c: &mut Criterion) {
    bench_iterations(c, 100, 20);
}

fn bench_iterations_1000(c: &mut Criterion) {
    bench_iterations(c, 1000, 60);
}

// Cost of one augmented evaluation as the number of constraints grows
fn bench_penalty_evaluation(c: &mut Criterion) {
    let mut group = c.benchmark_group("penalty_evaluation");

    for n_constraints in [0usize, 4, 16, 64] {
        let constraints: Vec<Box<dyn Constraint>> = (0..n_constraints)
            .map(|i| {
                let mut a = Array1::zeros(8);
                a[i % 8] = 1.0;
                Box::new(LinearConstraint::new(a, -0.5)) as Box<dyn Constraint>
            })
            .collect();
        let pf = PenaltyFunction::new(
            Box::new(MultiDimFn::new(sphere_function)),
            constraints,
            PenaltyType::L2,
            100.0,
        )
        .unwrap();
        let x = Array1::linspace(-1.0, 1.0, 8);

        group.throughput(Throughput::Elements(n_constraints as u64));
        group.bench_with_input(
            BenchmarkId::new("augmented", n_constraints),
            &x,
            |b, x| b.iter(|| black_box(pf.augmented(black_box(x)).unwrap())),
        );
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_iterations_10,
    bench_iterations_100,
    bench_iterations_1000,
    bench_penalty_evaluation
);
criterion_main!(benches);
