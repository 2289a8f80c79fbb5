use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use terrasort::prelude::*;
use terrasort::sample::is_sorted;

fn random_elevations(rng: &mut SmallRng, len: usize, distinct: u32) -> Vec<f64> {
    (0..len)
        .map(|_| rng.random_range(0..distinct) as f64 * 10.0)
        .collect()
}

fn sort(algorithm: SortAlgorithm, input: &[Sample]) -> (Vec<Sample>, EventLog, Metrics) {
    let mut data = input.to_vec();
    let mut log = EventLog::new();
    let mut metrics = Metrics::new();
    algorithm.run(&mut data, &mut log, &mut metrics);
    (data, log, metrics)
}

#[test]
fn tied_elevations_follow_original_index() {
    let input = vec![
        Sample::new(0.0, 0.0, 5.0, 0),
        Sample::new(0.0, 0.0, 3.0, 1),
        Sample::new(0.0, 0.0, 5.0, 2),
    ];
    for algorithm in SortAlgorithm::ALL {
        let (data, _, _) = sort(algorithm, &input);
        assert_eq!(
            data,
            vec![
                Sample::new(0.0, 0.0, 3.0, 1),
                Sample::new(0.0, 0.0, 5.0, 0),
                Sample::new(0.0, 0.0, 5.0, 2),
            ],
            "{algorithm}"
        );
    }
}

#[test]
fn random_inputs_sort_stably_and_keep_every_sample() {
    let mut rng = SmallRng::seed_from_u64(0xD1CE);
    for round in 0..40 {
        let len = rng.random_range(0..60);
        let elevations = random_elevations(&mut rng, len, 8);
        let mut input = Dataset::from_elevations(&elevations).samples().to_vec();
        // Scramble positions so origin order differs from position order.
        rand::seq::SliceRandom::shuffle(&mut input[..], &mut rng);

        for algorithm in SortAlgorithm::ALL {
            let (data, _, _) = sort(algorithm, &input);
            assert!(is_sorted(&data), "{algorithm} round {round}");

            for pair in data.windows(2) {
                if pair[0].elevation == pair[1].elevation {
                    assert!(
                        pair[0].original_index < pair[1].original_index,
                        "{algorithm} broke a tie in round {round}"
                    );
                }
            }

            let mut before: Vec<usize> = input.iter().map(|s| s.original_index).collect();
            let mut after: Vec<usize> = data.iter().map(|s| s.original_index).collect();
            before.sort_unstable();
            after.sort_unstable();
            assert_eq!(before, after, "{algorithm} round {round}");
        }
    }
}

/// Tallies every event it sees and rejects self-swaps.
struct EventCounter {
    comparisons: u64,
    swaps: u64,
    done: usize,
}

impl ObservationSink for EventCounter {
    fn on_compare(&mut self, _i: usize, _j: usize) {
        self.comparisons += 1;
    }

    fn on_swap(&mut self, i: usize, j: usize) {
        assert_ne!(i, j, "swap of a position with itself");
        self.swaps += 1;
    }

    fn on_done(&mut self) {
        self.done += 1;
    }
}

#[test]
fn metrics_agree_with_observed_events() {
    let mut rng = SmallRng::seed_from_u64(7);
    let elevations = random_elevations(&mut rng, 48, 5);
    let input = Dataset::from_elevations(&elevations).samples().to_vec();

    for algorithm in SortAlgorithm::ALL {
        let mut data = input.clone();
        let mut check = EventCounter {
            comparisons: 0,
            swaps: 0,
            done: 0,
        };
        let mut metrics = Metrics::new();
        algorithm.run(&mut data, &mut check, &mut metrics);
        assert_eq!(check.comparisons, metrics.comparisons, "{algorithm}");
        assert_eq!(check.swaps, metrics.swaps, "{algorithm}");
        assert_eq!(check.done, 1, "{algorithm}");
    }
}

#[test]
fn event_stream_replays_every_algorithm() {
    // Applying the recorded swaps to the input reproduces the sorted output.
    let mut rng = SmallRng::seed_from_u64(99);
    let elevations = random_elevations(&mut rng, 30, 12);
    let input = Dataset::from_elevations(&elevations).samples().to_vec();

    for algorithm in SortAlgorithm::ALL {
        let (sorted, log, _) = sort(algorithm, &input);
        let mut replayed = input.clone();
        for event in log.events() {
            if let SortEvent::Swap(i, j) = *event {
                replayed.swap(i, j);
            }
        }
        assert_eq!(replayed, sorted, "{algorithm}");
    }
}

#[test]
fn merge_events_name_current_positions() {
    // Replaying any prefix on [3, 1, 2] leaves the compared values in the
    // slots each comparison names.
    let input = Dataset::from_elevations(&[3.0, 1.0, 2.0]).samples().to_vec();
    let (_, log, metrics) = sort(SortAlgorithm::Merge, &input);
    assert_eq!(
        log.events(),
        &[
            SortEvent::Compare(1, 2),
            SortEvent::Compare(0, 1),
            SortEvent::Swap(0, 1),
            SortEvent::Compare(1, 2),
            SortEvent::Swap(1, 2),
            SortEvent::Done,
        ]
    );
    assert_eq!(metrics.swaps, 2);

    let mut replayed: Vec<f64> = input.iter().map(|s| s.elevation).collect();
    let mut compared = Vec::new();
    for event in log.events() {
        match *event {
            SortEvent::Compare(i, j) => compared.push((replayed[i], replayed[j])),
            SortEvent::Swap(i, j) => replayed.swap(i, j),
            SortEvent::Done => {}
        }
    }
    assert_eq!(compared, vec![(1.0, 2.0), (3.0, 1.0), (3.0, 2.0)]);
    assert_eq!(replayed, vec![1.0, 2.0, 3.0]);
}

#[test]
fn bubble_example_from_three_elevations() {
    let input = Dataset::from_elevations(&[3.0, 1.0, 2.0]).samples().to_vec();
    let (_, log, metrics) = sort(SortAlgorithm::Bubble, &input);
    assert_eq!(
        log.events(),
        &[
            SortEvent::Compare(0, 1),
            SortEvent::Swap(0, 1),
            SortEvent::Compare(1, 2),
            SortEvent::Swap(1, 2),
            SortEvent::Compare(0, 1),
            SortEvent::Done,
        ]
    );
    assert_eq!(metrics.swaps, 2);
}
