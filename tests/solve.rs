use log::info;
use rubik::moves::random_scramble;
use rubik::optimize::invert;
use rubik::{format_sequence, optimize_moves, parse_sequence, solve, Cube, Move, SOLVED_CUBE_STR};

fn solved() -> Cube {
    Cube::new(SOLVED_CUBE_STR).unwrap()
}

/// A scramble over all 24 moves, including slice turns and cube rotations.
fn any_move_scramble(rng: &mut fastrand::Rng, length: usize) -> Vec<Move> {
    (0..length)
        .map(|_| Move::ALL[rng.usize(..Move::ALL.len())])
        .collect()
}

#[test_log::test]
fn test_r_u_ri_ui() {
    let mut cube = solved();
    cube.sequence("R U Ri Ui").unwrap();

    let moves = solve(cube.clone()).unwrap();
    let optimized = optimize_moves(&moves);
    info!("{} moves, {} optimized", moves.len(), optimized.len());
    assert!(moves.len() >= optimized.len());

    // replay on cubes built independently of the solver's
    let mut raw = Cube::new(&cube.flat_str()).unwrap();
    raw.apply_all(&moves);
    assert!(raw.is_solved());

    let mut short = Cube::new(&cube.flat_str()).unwrap();
    short.apply_all(&optimized);
    assert!(short.is_solved());
}

#[test_log::test]
fn test_face_turn_scrambles() {
    let mut rng = fastrand::Rng::with_seed(2024);
    for round in 0..100 {
        let scramble = random_scramble(&mut rng, 25);
        let mut cube = solved();
        cube.apply_all(&scramble);

        let moves = solve(cube.clone())
            .unwrap_or_else(|err| panic!("{}: {err}", format_sequence(&scramble)));
        cube.apply_all(&moves);
        assert!(cube.is_solved(), "round {round}");
    }
}

#[test_log::test]
fn test_any_move_scrambles() {
    let mut rng = fastrand::Rng::with_seed(99);
    for _ in 0..100 {
        let scramble = any_move_scramble(&mut rng, 25);
        let mut start = solved();
        start.apply_all(&scramble);

        let moves = solve(start.clone())
            .unwrap_or_else(|err| panic!("{}: {err}", format_sequence(&scramble)));
        let optimized = optimize_moves(&moves);
        assert_eq!(optimize_moves(&optimized), optimized);

        let mut raw = start.clone();
        raw.apply_all(&moves);
        let mut short = start;
        short.apply_all(&optimized);
        assert!(raw.is_solved());
        assert_eq!(raw, short);
    }
}

#[test_log::test]
fn test_cube_string_round_trip_solves() {
    let mut rng = fastrand::Rng::with_seed(7);
    let mut cube = solved();
    cube.apply_all(&random_scramble(&mut rng, 40));

    let rebuilt: Cube = cube.to_string().parse().unwrap();
    assert_eq!(rebuilt, cube);

    let moves = solve(rebuilt).unwrap();
    cube.apply_all(&moves);
    assert!(cube.is_solved());
}

#[test_log::test]
fn test_undoing_a_scramble() {
    let scramble = parse_sequence("F R U Ri Ui Fi M E S").unwrap();
    let mut cube = solved();
    cube.apply_all(&scramble);
    assert!(!cube.is_solved());
    cube.apply_all(&invert(&scramble));
    assert!(cube.is_solved());
}
