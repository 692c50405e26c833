//! Property tests for partitioning and multi-worker determinism.

use std::sync::Arc;

use proptest::prelude::*;

use conway::patterns::random_board;
use conway::rule::advance_by;
use conway::{Axis, LifeError, NullReporter, OwnerMap, Settings, Simulation, partition_axis, partition_grid};

proptest! {
    #[test]
    fn spans_cover_axis_exactly_once((len, workers) in (1usize..=1000).prop_flat_map(|len| (Just(len), 1..=len))) {
        let spans = partition_axis(len, workers).unwrap();
        prop_assert_eq!(spans.len(), workers);

        let mut next = 0;
        for span in &spans {
            prop_assert_eq!(span.start, next, "gap or overlap before {:?}", span);
            prop_assert!(span.end >= span.start);
            next = span.end + 1;
        }
        prop_assert_eq!(next, len);

        // sizes differ by at most one, longer ones first
        let sizes: Vec<usize> = spans.iter().map(|s| s.len()).collect();
        prop_assert!(sizes.windows(2).all(|w| w[0] >= w[1]));
        prop_assert!(sizes[0] - sizes[workers - 1] <= 1);
    }

    #[test]
    fn too_many_workers_rejected(len in 1usize..200, extra in 1usize..50) {
        let err = partition_axis(len, len + extra).unwrap_err();
        prop_assert!(
            matches!(err, LifeError::TooManyWorkers { .. }),
            "unexpected error {}",
            err
        );
    }

    #[test]
    fn grid_partitions_own_every_cell_once(rows in 1usize..40, cols in 1usize..40, pick in 0usize..1000, by_col in any::<bool>()) {
        let axis = if by_col { Axis::Col } else { Axis::Row };
        let workers = 1 + pick % axis.length(rows, cols);
        let parts = partition_grid(rows, cols, workers, axis).unwrap();

        let mut owned = vec![0u32; rows * cols];
        for p in &parts {
            for (row, col) in p.cells() {
                owned[row * cols + col] += 1;
            }
        }
        prop_assert!(owned.iter().all(|&n| n == 1));

        let owners = OwnerMap::new(rows, cols, &parts);
        for p in &parts {
            for (row, col) in p.cells() {
                prop_assert_eq!(owners.owner(row, col), p.worker_id);
            }
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn threaded_run_matches_reference(
        rows in 3usize..20,
        cols in 3usize..20,
        seed in any::<u64>(),
        rounds in 0usize..12,
        pick in 0usize..100,
        by_col in any::<bool>(),
    ) {
        let board = random_board(rows, cols, seed);
        let axis = if by_col { Axis::Col } else { Axis::Row };
        let workers = 1 + pick % axis.length(rows, cols);

        let outcome = Simulation::new(board.clone(), rounds, Settings::new(workers, axis))
            .unwrap()
            .run(Arc::new(NullReporter))
            .unwrap();

        let expected = advance_by(&board, rounds);
        prop_assert_eq!(outcome.board.live_count(), expected.live_count());
        prop_assert_eq!(outcome.board, expected);
    }
}

#[test]
fn every_split_up_to_200_is_exact() {
    for len in 1..=200 {
        for workers in 1..=len {
            let spans = partition_axis(len, workers).unwrap();
            let covered: usize = spans.iter().map(|s| s.len()).sum();
            assert_eq!(covered, len);
            assert_eq!(spans[0].start, 0);
            assert_eq!(spans[workers - 1].end, len - 1);
            assert!(spans.windows(2).all(|w| w[1].start == w[0].end + 1), "{len}/{workers}");
        }
    }
}
