//! Integration tests for group allocation, standings, and playoff/cup
//! bracket construction.

use fixture_engine::{
    allocate, build_cup_playoffs, build_playoffs, cross_seed_table, generate_fixtures,
    group_standings, Cup, Fixture, FixtureError, FixtureSet, Format, FormatParams, Group,
    Participant, PlayoffRound, PlayoffStructure,
};

fn roster(n: usize, category: &str) -> Vec<Participant> {
    (1..=n)
        .map(|i| Participant::new(format!("p{i}"), category, Some(i as u32)))
        .collect()
}

/// Capture engine diagnostics in test output (`RUST_LOG=warn` to see them).
fn init_logs() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// A group whose membership is already in standing order.
fn ranked_group(index: usize, category: &str, ids: &[&str]) -> Group {
    let mut g = Group::new(index, category);
    g.player_ids = ids.iter().map(|s| s.to_string()).collect();
    g
}

fn two_ranked_groups() -> FixtureSet {
    init_logs();
    let mut set = FixtureSet::new();
    set.groups = vec![
        ranked_group(0, "open", &["a1", "a2", "a3", "a4"]),
        ranked_group(1, "open", &["b1", "b2", "b3", "b4"]),
    ];
    set
}

/// The `position`-th (1-based, by match-number order) non-cup fixture of a
/// playoff round.
fn find_playoff(set: &FixtureSet, round: PlayoffRound, position: usize) -> &Fixture {
    let mut fixtures: Vec<&Fixture> = set
        .fixtures
        .iter()
        .filter(|f| f.playoff_round == Some(round) && f.cup.is_none())
        .collect();
    fixtures.sort_by_key(|f| f.match_number);
    fixtures
        .get(position - 1)
        .copied()
        .expect("playoff fixture missing")
}

#[test]
fn snake_allocation_two_groups() {
    // 8 seeds over 2 groups: A gets 1,4,5,8 and B gets 2,3,6,7.
    let groups = allocate(&roster(8, "open"), 2, "open");
    assert_eq!(groups[0].name, "A");
    assert_eq!(groups[1].name, "B");
    assert_eq!(groups[0].player_ids, vec!["p1", "p4", "p5", "p8"]);
    assert_eq!(groups[1].player_ids, vec!["p2", "p3", "p6", "p7"]);
}

#[test]
fn snake_allocation_sizes_differ_by_at_most_one() {
    let groups = allocate(&roster(10, "open"), 3, "open");
    let mut sizes: Vec<usize> = groups.iter().map(|g| g.player_ids.len()).collect();
    assert_eq!(sizes.iter().sum::<usize>(), 10);
    sizes.sort_unstable();
    assert!(sizes[2] - sizes[0] <= 1);
}

#[test]
fn snake_beats_contiguous_split_on_seed_balance() {
    // Variance of per-group seed-rank sums: snake must never be worse
    // than a naive contiguous split.
    fn variance(sums: &[i64]) -> f64 {
        let mean = sums.iter().sum::<i64>() as f64 / sums.len() as f64;
        sums.iter()
            .map(|&s| (s as f64 - mean).powi(2))
            .sum::<f64>()
            / sums.len() as f64
    }

    for (n, g) in [(8usize, 2usize), (12, 3), (16, 4), (10, 2), (18, 3)] {
        let groups = allocate(&roster(n, "open"), g, "open");
        let snake_sums: Vec<i64> = groups
            .iter()
            .map(|grp| {
                grp.player_ids
                    .iter()
                    .map(|id| id[1..].parse::<i64>().unwrap())
                    .sum()
            })
            .collect();

        let per = n / g;
        let contiguous_sums: Vec<i64> = (0..g)
            .map(|i| ((i * per + 1)..=(i * per + per)).map(|s| s as i64).sum())
            .collect();

        assert!(
            variance(&snake_sums) <= variance(&contiguous_sums),
            "snake worse than contiguous for n={n} g={g}"
        );
    }
}

#[test]
fn standings_order_by_wins_then_points_diff() {
    let mut set = FixtureSet::new();
    let group = ranked_group(0, "open", &["x", "y", "z"]);
    let gid = group.id.clone();
    let m = |p1: &str, p2: &str, winner: &str, score: &str, number: u32| {
        let mut f = Fixture::pool(1, number, p1.to_string(), p2.to_string(), "open", Some(&gid));
        f.winner = Some(winner.to_string());
        f.score = Some(score.to_string());
        f.completed = true;
        f
    };
    // x and y both beat z once; y's margin is bigger, so the points
    // differential tie-break puts y first.
    set.fixtures = vec![
        m("x", "z", "x", "21-19", 1),
        m("y", "z", "y", "21-5", 2),
    ];
    // x: 1 win, diff +2; y: 1 win, diff +16; z: 0 wins, diff -18.
    let standings = group_standings(&set.fixtures, &group);
    assert_eq!(standings, vec!["y", "x", "z"]);
}

#[test]
fn cross_seed_table_two_and_four_groups() {
    assert_eq!(cross_seed_table(2), vec![[(0, 0), (1, 1)], [(1, 0), (0, 1)]]);
    assert_eq!(
        cross_seed_table(4),
        vec![
            [(0, 0), (3, 1)],
            [(1, 0), (2, 1)],
            [(2, 0), (1, 1)],
            [(3, 0), (0, 1)],
        ]
    );
}

#[test]
fn cross_seed_table_fallback_uses_each_finisher_once() {
    for n in [3usize, 5, 6] {
        let table = cross_seed_table(n);
        assert_eq!(table.len(), n);
        let mut seen = std::collections::HashSet::new();
        for [a, b] in table {
            assert!(seen.insert(a));
            assert!(seen.insert(b));
        }
        assert_eq!(seen.len(), 2 * n);
    }
}

#[test]
fn quarter_final_bracket_from_two_groups() {
    // Scenario: standings [a1..a4] and [b1..b4] -> QF1 a1vb2, QF2 b1va2,
    // one empty semifinal, empty final and 3rd place.
    let mut set = two_ranked_groups();
    build_playoffs(&mut set, "open", PlayoffStructure::QuarterFinals).unwrap();

    let qf1 = find_playoff(&set, PlayoffRound::QuarterFinal, 1);
    assert_eq!(qf1.player1.as_deref(), Some("a1"));
    assert_eq!(qf1.player2.as_deref(), Some("b2"));
    let qf2 = find_playoff(&set, PlayoffRound::QuarterFinal, 2);
    assert_eq!(qf2.player1.as_deref(), Some("b1"));
    assert_eq!(qf2.player2.as_deref(), Some("a2"));

    let sf1 = find_playoff(&set, PlayoffRound::SemiFinal, 1);
    assert_eq!((sf1.player1.as_deref(), sf1.player2.as_deref()), (None, None));
    let final_match = find_playoff(&set, PlayoffRound::Final, 1);
    assert!(final_match.player1.is_none() && final_match.player2.is_none());
    let third = find_playoff(&set, PlayoffRound::ThirdPlace, 1);
    assert!(third.player1.is_none() && third.player2.is_none());
    // Final and 3rd place share a round; their numbers must not collide.
    assert_eq!(final_match.round, third.round);
    assert_ne!(final_match.match_number, third.match_number);

    // QF + QF + SF + Final + 3rd
    assert_eq!(set.total_matches(), 5);
}

#[test]
fn semi_final_structure_pairs_group_winners() {
    let mut set = two_ranked_groups();
    build_playoffs(&mut set, "open", PlayoffStructure::SemiFinals).unwrap();

    assert!(set
        .fixtures
        .iter()
        .all(|f| f.playoff_round != Some(PlayoffRound::QuarterFinal)));
    let sf1 = find_playoff(&set, PlayoffRound::SemiFinal, 1);
    assert_eq!(sf1.player1.as_deref(), Some("a1"));
    assert_eq!(sf1.player2.as_deref(), Some("b1"));
}

#[test]
fn final_only_structure_emits_empty_final_and_third() {
    let mut set = two_ranked_groups();
    build_playoffs(&mut set, "open", PlayoffStructure::FinalOnly).unwrap();
    assert_eq!(set.total_matches(), 2);
    for f in &set.fixtures {
        assert!(f.player1.is_none() && f.player2.is_none());
    }
}

#[test]
fn playoff_build_is_guarded_against_double_invocation() {
    let mut set = two_ranked_groups();
    build_playoffs(&mut set, "open", PlayoffStructure::QuarterFinals).unwrap();
    let err = build_playoffs(&mut set, "open", PlayoffStructure::QuarterFinals).unwrap_err();
    assert!(matches!(err, FixtureError::PlayoffsAlreadyGenerated { .. }));
    assert_eq!(set.total_matches(), 5);
}

#[test]
fn fewer_than_two_groups_builds_nothing() {
    init_logs();
    let mut set = FixtureSet::new();
    set.groups = vec![ranked_group(0, "open", &["a1", "a2"])];
    build_playoffs(&mut set, "open", PlayoffStructure::QuarterFinals).unwrap();
    assert_eq!(set.total_matches(), 0);
}

#[test]
fn cup_brackets_split_gold_and_silver_tiers() {
    let mut set = two_ranked_groups();
    build_cup_playoffs(&mut set, "open", PlayoffStructure::QuarterFinals).unwrap();

    let gold = |round, number| {
        set.fixtures
            .iter()
            .find(|f| {
                f.cup == Some(Cup::Gold) && f.playoff_round == Some(round) && f.match_number == number
            })
            .expect("gold fixture missing")
    };
    let gold_qf1 = gold(PlayoffRound::QuarterFinal, 1);
    assert_eq!(gold_qf1.player1.as_deref(), Some("a1"));
    assert_eq!(gold_qf1.player2.as_deref(), Some("b2"));

    // Silver is the next tier down, same shape, disjoint match numbers.
    let mut silver: Vec<_> = set
        .fixtures
        .iter()
        .filter(|f| f.cup == Some(Cup::Silver))
        .collect();
    silver.sort_by_key(|f| f.match_number);
    assert_eq!(silver.len(), 5);
    let silver_qf1 = silver
        .iter()
        .find(|f| f.playoff_round == Some(PlayoffRound::QuarterFinal))
        .expect("silver QF1 missing");
    assert_eq!(silver_qf1.player1.as_deref(), Some("a3"));
    assert_eq!(silver_qf1.player2.as_deref(), Some("b4"));

    let max_gold = set
        .fixtures
        .iter()
        .filter(|f| f.cup == Some(Cup::Gold))
        .map(|f| f.match_number)
        .max()
        .unwrap();
    let min_silver = silver.iter().map(|f| f.match_number).min().unwrap();
    assert!(min_silver > max_gold);

    // One final and one 3rd place per cup.
    for cup in [Cup::Gold, Cup::Silver] {
        for round in [PlayoffRound::Final, PlayoffRound::ThirdPlace] {
            let count = set
                .fixtures
                .iter()
                .filter(|f| f.cup == Some(cup) && f.playoff_round == Some(round))
                .count();
            assert_eq!(count, 1);
        }
    }
}

#[test]
fn pool_play_generation_feeds_playoff_build() {
    // End to end: 8 entrants, 2 pool groups, every pool match decided by
    // the better-seeded side, then the knockout stage.
    let mut params = FormatParams::default();
    params.group_count = 2;
    let mut set = generate_fixtures(&roster(8, "open"), "open", Format::PoolPlayPlayoffs, &params)
        .unwrap();
    assert_eq!(set.groups.len(), 2);
    // Two groups of 4: 6 round-robin matches each.
    assert_eq!(set.total_matches(), 12);
    assert!(!set.pool_complete("open"));

    let decisions: Vec<(fixture_engine::MatchId, String)> = set
        .fixtures
        .iter()
        .map(|f| {
            let p1 = f.player1.clone().unwrap();
            let p2 = f.player2.clone().unwrap();
            // Lower seed number wins.
            let winner = if p1[1..].parse::<u32>().unwrap() < p2[1..].parse::<u32>().unwrap() {
                p1
            } else {
                p2
            };
            (f.id, winner)
        })
        .collect();
    for (id, winner) in decisions {
        fixture_engine::record_result(&mut set, id, &winner, Some("21-15".into())).unwrap();
    }
    assert!(set.pool_complete("open"));

    build_playoffs(&mut set, "open", PlayoffStructure::QuarterFinals).unwrap();
    // Group A is p1,p4,p5,p8; group B is p2,p3,p6,p7. Seed order decides
    // every standing, so QF1 = p1 vs B's runner-up p3.
    let qf1 = find_playoff(&set, PlayoffRound::QuarterFinal, 1);
    assert_eq!(qf1.player1.as_deref(), Some("p1"));
    assert_eq!(qf1.player2.as_deref(), Some("p3"));
    let qf2 = find_playoff(&set, PlayoffRound::QuarterFinal, 2);
    assert_eq!(qf2.player1.as_deref(), Some("p2"));
    assert_eq!(qf2.player2.as_deref(), Some("p4"));
}

#[test]
fn match_numbers_stay_unique_within_round_partitions() {
    // Pool fixtures and the appended knockout stage must never reuse a
    // match number inside one (round, category, cup) partition; in
    // particular the final and 3rd-place match may not collide.
    let mut params = FormatParams::default();
    params.group_count = 2;
    let mut set = generate_fixtures(&roster(8, "open"), "open", Format::PoolPlayPlayoffs, &params)
        .unwrap();
    build_playoffs(&mut set, "open", PlayoffStructure::QuarterFinals).unwrap();

    let mut keys = std::collections::HashSet::new();
    for f in &set.fixtures {
        assert!(
            keys.insert((f.round, f.category.clone(), f.cup, f.match_number)),
            "duplicate match number {} in round {} (cup {:?})",
            f.match_number,
            f.round,
            f.cup
        );
    }

    // Cup brackets keep the guarantee too, with silver past gold's range.
    let mut cup_set = generate_fixtures(&roster(8, "open"), "open", Format::PoolPlayCups, &params)
        .unwrap();
    fixture_engine::build_cup_playoffs(&mut cup_set, "open", PlayoffStructure::QuarterFinals)
        .unwrap();
    let mut keys = std::collections::HashSet::new();
    for f in &cup_set.fixtures {
        assert!(
            keys.insert((f.round, f.category.clone(), f.cup, f.match_number)),
            "duplicate match number {} in round {} (cup {:?})",
            f.match_number,
            f.round,
            f.cup
        );
    }
}

#[test]
fn match_frequency_repeats_each_group_schedule() {
    // frequency 2: every pairing is played twice, with the second cycle's
    // rounds continuing past the first so rounds stay strictly increasing.
    let mut params = FormatParams::default();
    params.group_count = 1;
    params.match_frequency = 2;
    let set = generate_fixtures(&roster(4, "open"), "open", Format::PoolPlayGroups, &params)
        .unwrap();
    assert_eq!(set.total_matches(), 12); // 6 pairings x 2

    let max_round = set.fixtures.iter().map(|f| f.round).max().unwrap();
    assert_eq!(max_round, 6); // 3 rounds per cycle, 2 cycles

    let mut pair_counts = std::collections::HashMap::new();
    let mut numbers = std::collections::HashSet::new();
    for f in &set.fixtures {
        let a = f.player1.clone().unwrap();
        let b = f.player2.clone().unwrap();
        let key = if a < b { (a, b) } else { (b, a) };
        *pair_counts.entry(key).or_insert(0u32) += 1;
        assert!(numbers.insert(f.match_number), "match number reused");
    }
    assert_eq!(pair_counts.len(), 6);
    assert!(pair_counts.values().all(|&c| c == 2));
}
