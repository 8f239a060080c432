mod common;

use common::{date, draft, memory_tracker};
use expense_ledger::{
    errors::LedgerError,
    ledger::{Category, CategoryTotal, SortKey},
};

#[test]
fn coffee_lifecycle() {
    let (mut tracker, _storage) = memory_tracker();
    let id = tracker
        .add(draft("Cà phê", 25_000, Category::Food, date(2024, 6, 1)))
        .unwrap();
    assert_eq!(tracker.ledger().total_spend(), 25_000);

    assert_eq!(tracker.upvote(id).unwrap(), 1);
    tracker.downvote(id).unwrap();
    assert_eq!(tracker.downvote(id).unwrap(), -1);

    tracker.delete(id).unwrap();
    assert!(tracker.ledger().is_empty());
    assert_eq!(tracker.ledger().total_spend(), 0);
}

#[test]
fn category_totals_and_top_category() {
    let (mut tracker, _storage) = memory_tracker();
    tracker
        .add(draft("Rice", 10_000, Category::Food, date(2024, 6, 1)))
        .unwrap();
    tracker
        .add(draft("Noodles", 20_000, Category::Food, date(2024, 6, 2)))
        .unwrap();
    tracker
        .add(draft("Pen", 5_000, Category::Study, date(2024, 6, 3)))
        .unwrap();

    let mut totals = tracker.ledger().category_totals();
    totals.sort_by(|a, b| a.category.cmp(&b.category));
    assert_eq!(
        totals,
        vec![
            CategoryTotal {
                category: Category::Study,
                amount: 5_000
            },
            CategoryTotal {
                category: Category::Food,
                amount: 30_000
            },
        ]
    );

    let stats = tracker.ledger().quick_stats().unwrap();
    assert_eq!(stats.top_category, Category::Food);
    assert_eq!(stats.top_category_count, 2);

    let food: Vec<i64> = tracker
        .ledger()
        .filter_sort_for_table(Some(&Category::Food), SortKey::AmountDesc)
        .iter()
        .map(|expense| expense.amount)
        .collect();
    assert_eq!(food, vec![20_000, 10_000]);
}

#[test]
fn length_tracks_adds_deletes_and_clears() {
    let (mut tracker, _storage) = memory_tracker();
    let mut ids = Vec::new();
    for n in 1..=5 {
        ids.push(
            tracker
                .add(draft("x", n, Category::Other, date(2024, 6, 1)))
                .unwrap(),
        );
    }
    tracker.delete(ids[1]).unwrap();
    tracker.delete(ids[3]).unwrap();
    assert_eq!(tracker.ledger().len(), 3);

    assert_eq!(tracker.clear_all().unwrap(), 3);
    tracker
        .add(draft("y", 1, Category::Other, date(2024, 6, 1)))
        .unwrap();
    assert_eq!(tracker.ledger().len(), 1);
}

#[test]
fn adds_are_reverse_chronological() {
    let (mut tracker, _storage) = memory_tracker();
    let names = ["first", "second", "third", "fourth"];
    for name in names {
        let id = tracker
            .add(draft(name, 1, Category::Tech, date(2024, 6, 1)))
            .unwrap();
        assert_eq!(tracker.ledger().expenses()[0].id, id);
    }
    let order: Vec<&str> = tracker
        .ledger()
        .expenses()
        .iter()
        .map(|expense| expense.name.as_str())
        .collect();
    assert_eq!(order, vec!["fourth", "third", "second", "first"]);
}

#[test]
fn votes_net_out_and_survive_edits() {
    let (mut tracker, _storage) = memory_tracker();
    let id = tracker
        .add(draft("Movie", 90_000, Category::Entertainment, date(2024, 6, 7)))
        .unwrap();
    let created_at = tracker.ledger().get(id).unwrap().created_at;
    for _ in 0..4 {
        tracker.upvote(id).unwrap();
    }
    tracker.downvote(id).unwrap();

    tracker
        .edit(id, draft("Cinema", 80_000, Category::Entertainment, date(2024, 6, 8)))
        .unwrap();
    let expense = tracker.ledger().get(id).unwrap();
    assert_eq!(expense.id, id);
    assert_eq!(expense.votes, 3);
    assert_eq!(expense.created_at, created_at);
    assert_eq!(expense.name, "Cinema");
}

#[test]
fn category_totals_sum_to_total_spend() {
    let (mut tracker, _storage) = memory_tracker();
    for (amount, category) in [
        (1_000, Category::Food),
        (2_500, Category::Transport),
        (700, Category::Food),
        (12_000, Category::Health),
        (40, Category::from_tag("pets")),
    ] {
        tracker
            .add(draft("item", amount, category, date(2024, 6, 2)))
            .unwrap();
    }
    let sum: i64 = tracker
        .ledger()
        .category_totals()
        .iter()
        .map(|entry| entry.amount)
        .sum();
    assert_eq!(sum, tracker.ledger().total_spend());
}

#[test]
fn window_sizes_are_respected() {
    let (mut tracker, _storage) = memory_tracker();
    for month in 1..=12 {
        tracker
            .add(draft("rent", 100, Category::Other, date(2023, month, 1)))
            .unwrap();
    }
    let series = tracker.ledger().monthly_series(6);
    assert_eq!(series.len(), 6);
    assert!(series
        .windows(2)
        .all(|pair| (pair[0].year, pair[0].month) < (pair[1].year, pair[1].month)));

    let trend = tracker.daily_trend(7);
    assert_eq!(trend.len(), 7);
    assert_eq!(trend[6].date, date(2024, 6, 15));
    assert!(trend.iter().all(|point| point.amount == 0));
}

#[test]
fn month_to_date_uses_tracker_clock() {
    let (mut tracker, _storage) = memory_tracker();
    tracker
        .add(draft("June", 300, Category::Food, date(2024, 6, 30)))
        .unwrap();
    tracker
        .add(draft("May", 500, Category::Food, date(2024, 5, 31)))
        .unwrap();
    assert_eq!(tracker.month_to_date_spend(), 300);
}

#[test]
fn invalid_drafts_are_rejected() {
    let (mut tracker, storage) = memory_tracker();
    let err = tracker
        .add(draft("   ", 100, Category::Food, date(2024, 6, 1)))
        .expect_err("empty name");
    assert!(matches!(err, LedgerError::Validation(_)));
    assert!(tracker.ledger().is_empty());
    assert_eq!(storage.save_count(), 0);
}
