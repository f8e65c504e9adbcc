use std::hint::black_box;
use std::time::Duration;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use oh_my_chess::game_state::chess_rules::{RuleConfig, STARTING_POSITION_FEN};
use oh_my_chess::game_state::chess_types::Side;
use oh_my_chess::game_state::game_state::GameState;
use oh_my_chess::move_generation::perft::perft;
use oh_my_chess::utils::fen_parser::parse_fen;
use oh_my_chess::utils::long_algebraic::long_algebraic_to_move;

#[derive(Clone, Copy)]
struct BenchCase {
    name: &'static str,
    fen: &'static str,
    expected_nodes: &'static [u64],
}

const CASES_QUICK: &[BenchCase] = &[
    BenchCase {
        name: "position_1",
        fen: STARTING_POSITION_FEN,
        expected_nodes: &[20, 400, 8902],
    },
    BenchCase {
        name: "position_2",
        fen: "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 0",
        expected_nodes: &[48, 2039],
    },
    BenchCase {
        name: "position_3",
        fen: "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
        expected_nodes: &[14, 191, 2812],
    },
];

const CASES_STANDARD: &[BenchCase] = &[
    BenchCase {
        name: "position_1",
        fen: STARTING_POSITION_FEN,
        expected_nodes: &[20, 400, 8902, 197_281],
    },
    BenchCase {
        name: "position_2",
        fen: "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 0",
        expected_nodes: &[48, 2039, 97_862],
    },
    BenchCase {
        name: "position_3",
        fen: "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
        expected_nodes: &[14, 191, 2812, 43_238, 674_624],
    },
    BenchCase {
        name: "position_4",
        fen: "r2q1rk1/pP1p2pp/Q4n2/bbp1p3/Np6/1B3NBn/pPPP1PPP/R3K2R b KQ - 0 1",
        expected_nodes: &[6, 264, 9467, 422_333],
    },
    BenchCase {
        name: "position_5",
        fen: "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8",
        expected_nodes: &[44, 1486, 62_379, 2_103_487],
    },
    BenchCase {
        name: "position_6",
        fen: "r4rk1/1pp1qppp/p1np1n2/2b1p1B1/2B1P1b1/P1NP1N2/1PP1QPPP/R4RK1 w - - 0 10",
        expected_nodes: &[46, 2079, 89_890, 3_894_594],
    },
];

const SUITE_ENV: &str = "OH_MY_CHESS_BENCH_SUITE";

fn suite_name() -> &'static str {
    match std::env::var(SUITE_ENV) {
        Ok(value) if value.eq_ignore_ascii_case("standard") => "standard",
        _ => "quick",
    }
}

fn selected_cases() -> &'static [BenchCase] {
    match suite_name() {
        "standard" => CASES_STANDARD,
        _ => CASES_QUICK,
    }
}

fn bench_perft(c: &mut Criterion) {
    let mut group = c.benchmark_group(format!("perft_{}", suite_name()));
    group.warm_up_time(Duration::from_secs(1));
    group.measurement_time(Duration::from_secs(4));
    group.sample_size(20);

    for case in selected_cases() {
        let position = parse_fen(case.fen)
            .expect("benchmark FEN should parse")
            .position;

        for (depth_idx, expected_nodes) in case.expected_nodes.iter().enumerate() {
            let depth = (depth_idx + 1) as u8;

            // Correctness guard before benchmarking.
            let warmup = perft(&position, depth);
            assert_eq!(
                warmup.nodes, *expected_nodes,
                "node mismatch in warmup for {} depth {}",
                case.name, depth
            );

            group.throughput(Throughput::Elements(*expected_nodes));
            let bench_name = format!("{}_d{}", case.name, depth);

            group.bench_with_input(
                BenchmarkId::from_parameter(bench_name),
                expected_nodes,
                |b, expected| {
                    b.iter(|| {
                        let count = perft(black_box(&position), black_box(depth));
                        assert_eq!(count.nodes, *expected);
                        black_box(count.nodes)
                    });
                },
            );
        }
    }

    group.finish();
}

/// Cost of one `apply_move`, which replays the whole history to recompute
/// the status. Measured after increasingly long knight shuffles.
fn bench_status_recompute(c: &mut Criterion) {
    let mut group = c.benchmark_group("apply_move_status");
    group.sample_size(20);

    let cycle = ["g1f3", "g8f6", "f3g1", "f6g8"]
        .map(|lan| long_algebraic_to_move(lan).expect("bench move should parse"));
    let rules = RuleConfig {
        repetition_limit: usize::MAX,
        ..RuleConfig::default()
    };

    for plies in [0usize, 40, 80] {
        let mut game = GameState::with_rules(rules);
        for mv in cycle.iter().cycle().take(plies) {
            let side = game.side_to_move();
            game.apply_move(*mv, side).expect("shuffle move should apply");
        }

        group.bench_with_input(BenchmarkId::from_parameter(plies), &game, |b, game| {
            b.iter(|| {
                let mut next = game.clone();
                next.apply_move(black_box(cycle[0]), Side::White)
                    .expect("bench move should apply");
                black_box(next.status())
            });
        });
    }

    group.finish();
}

criterion_group!(perft_benches, bench_perft, bench_status_recompute);
criterion_main!(perft_benches);
