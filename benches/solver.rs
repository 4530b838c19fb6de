//! Benchmarks for the cube solver.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use rubik::moves::random_scramble;
use rubik::{optimize_moves, solve, Cube, SOLVED_CUBE_STR};

fn scrambled_cube() -> Cube {
    let mut cube = Cube::new(SOLVED_CUBE_STR).unwrap();
    cube.apply_all(&random_scramble(&mut fastrand::Rng::with_seed(1), 25));
    cube
}

/// Benchmark a full solve of a 25-move scramble.
fn bench_solve(c: &mut Criterion) {
    let cube = scrambled_cube();

    c.bench_function("solve", |b| b.iter(|| solve(black_box(cube.clone()))));
}

/// Benchmark optimizing a solver's move list.
fn bench_optimize(c: &mut Criterion) {
    let moves = solve(scrambled_cube()).unwrap();

    c.bench_function("optimize_moves", |b| {
        b.iter(|| optimize_moves(black_box(&moves)))
    });
}

/// Benchmark parsing and applying a move sequence.
fn bench_sequence(c: &mut Criterion) {
    let cube = Cube::new(SOLVED_CUBE_STR).unwrap();

    c.bench_function("sequence", |b| {
        b.iter(|| {
            let mut cube = cube.clone();
            cube.sequence(black_box("R U Ri Ui M E S X Y Z Li Di Bi Fi"))
                .unwrap();
            cube
        })
    });
}

/// Benchmark reading the stickers back in net order.
fn bench_color_list(c: &mut Criterion) {
    let cube = scrambled_cube();

    c.bench_function("color_list", |b| b.iter(|| black_box(&cube).color_list()));
}

criterion_group!(
    benches,
    bench_solve,
    bench_optimize,
    bench_sequence,
    bench_color_list
);
criterion_main!(benches);
