//! Randomized checks of the index invariants over seeded inputs.
use approx::assert_relative_eq;

use crate::builder::{DuplicatePolicy, PreferenceIndexBuilder};
use crate::identity::SimpleIdentityIndex;
use crate::tests::test_helpers::{random_index, random_lists};

const SEEDS: [u64; 4] = [7, 42, 1234, 99991];

#[test]
fn total_equals_sum_of_per_entity_counts() {
    for seed in SEEDS {
        let index = random_index(seed, 40, 30, 0.2);

        let by_users: usize = (0..index.num_users()).map(|u| index.user_preference_count(u)).sum();
        let by_items: usize = (0..index.num_items()).map(|i| index.item_preference_count(i)).sum();

        assert_eq!(index.num_preferences(), by_users);
        assert_eq!(index.num_preferences(), by_items);
    }
}

#[test]
fn every_present_list_is_strictly_increasing() {
    for seed in SEEDS {
        let index = random_index(seed, 25, 60, 0.3);

        for u in index.users_with_preferences() {
            let idx: Vec<usize> = index.user_item_indices(u).collect();
            assert!(idx.windows(2).all(|w| w[0] < w[1]), "user {u}: {idx:?}");
        }
        for i in index.items_with_preferences() {
            let idx: Vec<usize> = index.item_user_indices(i).collect();
            assert!(idx.windows(2).all(|w| w[0] < w[1]), "item {i}: {idx:?}");
        }
    }
}

#[test]
fn lookups_are_bidirectionally_consistent() {
    for seed in SEEDS {
        let index = random_index(seed, 20, 20, 0.25);

        for u in 0..index.num_users() {
            for i in 0..index.num_items() {
                match (index.preference(u, i), index.item_preference(u, i)) {
                    (Some(a), Some(b)) => {
                        assert_relative_eq!(a.value, (u * 1000 + i) as f64);
                        assert_relative_eq!(a.value, b.value);
                        assert_relative_eq!(a.context, b.context);
                    }
                    (None, None) => {}
                    other => panic!("views disagree on ({u}, {i}): {other:?}"),
                }
            }
        }
    }
}

#[test]
fn repeated_queries_return_identical_results() {
    let index = random_index(5, 15, 15, 0.4);

    for u in 0..index.num_users() {
        assert_eq!(index.user_preferences(u), index.user_preferences(u));
        for i in 0..index.num_items() {
            assert_eq!(index.preference(u, i), index.preference(u, i));
        }
    }
    assert_eq!(
        index.users_with_preferences().collect::<Vec<_>>(),
        index.users_with_preferences().collect::<Vec<_>>()
    );
    assert_eq!(index.num_users_with_preferences(), index.num_users_with_preferences());
}

#[test]
fn with_preferences_counts_match_iteration() {
    for seed in SEEDS {
        // sparse enough that some users and items stay absent
        let index = random_index(seed, 50, 50, 0.02);

        assert_eq!(index.num_users_with_preferences(), index.users_with_preferences().count());
        assert_eq!(index.num_items_with_preferences(), index.items_with_preferences().count());
        for u in 0..index.num_users() {
            let present = index.users_with_preferences().any(|x| x == u);
            assert_eq!(present, index.user_preference_count(u) > 0);
        }
    }
}

#[test]
fn builder_agrees_with_constructor() {
    let (count, by_user, _) = random_lists(11, 30, 30, 0.15);
    let direct = random_index(11, 30, 30, 0.15);

    let mut builder = PreferenceIndexBuilder::new()
        .with_context_size(1)
        .with_duplicate_policy(DuplicatePolicy::Reject);
    for (u, list) in by_user.iter().enumerate() {
        for p in list.iter().flatten() {
            builder.push(u, p.idx, p.value, p.context);
        }
    }
    let built = builder
        .build(
            SimpleIdentityIndex::from_ids(0..30usize),
            SimpleIdentityIndex::from_ids(0..30usize),
        )
        .unwrap();

    assert_eq!(built.num_preferences(), count);
    for u in 0..30 {
        assert_eq!(built.user_preferences(u), direct.user_preferences(u));
    }
    for i in 0..30 {
        assert_eq!(built.item_preferences(i), direct.item_preferences(i));
    }
}
