//! Render-ready view model derived from the ledger.
//!
//! Everything here is a pure function of the ledger, the configuration and
//! the reference day, so any front end can draw it without touching ledger
//! internals.

use chrono::NaiveDate;
use serde::Serialize;

use crate::{
    config::Config,
    currency::{
        format_currency, format_date, format_day_label, format_vote, month_label, CurrencyFormat,
        VoteTone,
    },
    ledger::{Expense, Ledger},
};

const MEDALS: [&str; 5] = ["🥇", "🥈", "🥉", "4️⃣", "5️⃣"];

#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub stats: StatCards,
    pub recent: Vec<ExpenseRow>,
    /// Every expense in ledger order with its signed score.
    pub vote_cards: Vec<ExpenseRow>,
    pub category_breakdown: Vec<BreakdownEntry>,
    pub charts: ChartData,
    /// `None` means "no votes yet".
    pub top_voted: Option<Vec<RankedRow>>,
    pub quick_stats: Option<QuickStatsView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StatCards {
    pub total_spend: String,
    pub month_spend: String,
    pub expense_count: usize,
    pub total_votes: i64,
}

/// One expense as shown in lists and tables.
#[derive(Debug, Clone, Serialize)]
pub struct ExpenseRow {
    pub id: i64,
    pub icon: &'static str,
    pub name: String,
    pub category_label: &'static str,
    pub amount: String,
    pub date: String,
    pub note: String,
    pub votes: String,
    pub tone: VoteTone,
}

impl ExpenseRow {
    pub fn from_expense(expense: &Expense, currency: &CurrencyFormat) -> Self {
        Self {
            id: expense.id.value(),
            icon: expense.category.icon(),
            name: expense.name.clone(),
            category_label: expense.category.label(),
            amount: format_currency(expense.amount, currency),
            date: format_date(expense.date),
            note: expense.note.clone(),
            votes: format_vote(expense.votes),
            tone: VoteTone::from_votes(expense.votes),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BreakdownEntry {
    pub tag: String,
    pub icon: &'static str,
    pub label: &'static str,
    pub color: &'static str,
    pub amount: String,
    /// Share of total spend, one decimal place.
    pub percent: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RankedRow {
    pub rank: String,
    pub row: ExpenseRow,
}

#[derive(Debug, Clone, Serialize)]
pub struct QuickStatsView {
    pub max_amount: String,
    pub min_amount: String,
    pub average_amount: String,
    pub top_category: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Series {
    pub labels: Vec<String>,
    pub values: Vec<i64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub colors: Vec<&'static str>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChartData {
    pub category: Series,
    pub monthly: Series,
    pub trend: Series,
}

impl DashboardView {
    pub fn build(ledger: &Ledger, config: &Config, today: NaiveDate) -> Self {
        let currency = config.currency_format();
        let top = ledger.top_voted(config.top_voted_limit);
        let top_voted = if top.is_empty() || top.iter().all(|expense| expense.votes == 0) {
            None
        } else {
            Some(
                top.iter()
                    .enumerate()
                    .map(|(index, expense)| RankedRow {
                        rank: rank_label(index),
                        row: ExpenseRow::from_expense(expense, &currency),
                    })
                    .collect(),
            )
        };

        Self {
            stats: StatCards {
                total_spend: format_currency(ledger.total_spend(), &currency),
                month_spend: format_currency(ledger.month_to_date_spend(today), &currency),
                expense_count: ledger.len(),
                total_votes: ledger.total_absolute_votes(),
            },
            recent: ledger
                .recent(config.recent_limit)
                .iter()
                .map(|expense| ExpenseRow::from_expense(expense, &currency))
                .collect(),
            vote_cards: ledger
                .expenses()
                .iter()
                .map(|expense| ExpenseRow::from_expense(expense, &currency))
                .collect(),
            category_breakdown: category_breakdown(ledger, &currency),
            charts: chart_data(ledger, config, today),
            top_voted,
            quick_stats: ledger.quick_stats().map(|stats| QuickStatsView {
                max_amount: format_currency(stats.max_amount, &currency),
                min_amount: format_currency(stats.min_amount, &currency),
                average_amount: format_currency(stats.average_amount, &currency),
                top_category: format!(
                    "{} {}",
                    stats.top_category.icon(),
                    stats.top_category.label()
                ),
            }),
        }
    }
}

/// Category shares sorted by amount, largest first. Empty when nothing was
/// spent.
pub fn category_breakdown(ledger: &Ledger, currency: &CurrencyFormat) -> Vec<BreakdownEntry> {
    let total = ledger.total_spend();
    if total == 0 {
        return Vec::new();
    }
    let mut totals = ledger.category_totals();
    totals.sort_by(|a, b| b.amount.cmp(&a.amount));
    totals
        .into_iter()
        .map(|entry| BreakdownEntry {
            tag: entry.category.tag().to_string(),
            icon: entry.category.icon(),
            label: entry.category.label(),
            color: entry.category.color(),
            amount: format_currency(entry.amount, currency),
            percent: format!("{:.1}", entry.amount as f64 * 100.0 / total as f64),
        })
        .collect()
}

pub fn chart_data(ledger: &Ledger, config: &Config, today: NaiveDate) -> ChartData {
    let totals = ledger.category_totals();
    let category = Series {
        labels: totals
            .iter()
            .map(|entry| entry.category.label().to_string())
            .collect(),
        values: totals.iter().map(|entry| entry.amount).collect(),
        colors: totals.iter().map(|entry| entry.category.color()).collect(),
    };

    let months = ledger.monthly_series(config.monthly_window);
    let monthly = Series {
        labels: months.iter().map(|bucket| month_label(bucket.month)).collect(),
        values: months.iter().map(|bucket| bucket.amount).collect(),
        colors: Vec::new(),
    };

    let days = ledger.daily_trend(config.trend_days, today);
    let trend = Series {
        labels: days.iter().map(|point| format_day_label(point.date)).collect(),
        values: days.iter().map(|point| point.amount).collect(),
        colors: Vec::new(),
    };

    ChartData {
        category,
        monthly,
        trend,
    }
}

fn rank_label(index: usize) -> String {
    MEDALS
        .get(index)
        .map(|medal| medal.to_string())
        .unwrap_or_else(|| format!("#{}", index + 1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::{Category, ExpenseDraft};
    use chrono::{TimeZone, Utc};

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, d).unwrap()
    }

    fn sample_ledger() -> Ledger {
        let mut ledger = Ledger::new();
        let now = Utc.with_ymd_and_hms(2024, 6, 10, 9, 0, 0).unwrap();
        for (name, amount, category, date) in [
            ("Rice", 10_000, Category::Food, day(8)),
            ("Noodles", 20_000, Category::Food, day(9)),
            ("Notebook", 5_000, Category::Study, day(10)),
        ] {
            ledger
                .add(ExpenseDraft::new(name, amount, category, date), now)
                .unwrap();
        }
        ledger
    }

    #[test]
    fn empty_ledger_renders_empty_states() {
        let view = DashboardView::build(&Ledger::new(), &Config::default(), day(10));
        assert_eq!(view.stats.total_spend, "0 ₫");
        assert_eq!(view.stats.expense_count, 0);
        assert!(view.recent.is_empty());
        assert!(view.vote_cards.is_empty());
        assert!(view.category_breakdown.is_empty());
        assert!(view.top_voted.is_none());
        assert!(view.quick_stats.is_none());
        assert_eq!(view.charts.trend.values, vec![0; 7]);
    }

    #[test]
    fn breakdown_is_sorted_with_percentages() {
        let view = DashboardView::build(&sample_ledger(), &Config::default(), day(10));
        let tags: Vec<&str> = view
            .category_breakdown
            .iter()
            .map(|entry| entry.tag.as_str())
            .collect();
        assert_eq!(tags, vec!["food", "study"]);
        assert_eq!(view.category_breakdown[0].percent, "85.7");
        assert_eq!(view.category_breakdown[1].percent, "14.3");
    }

    #[test]
    fn top_voted_hidden_until_someone_votes() {
        let mut ledger = sample_ledger();
        let config = Config::default();
        assert!(DashboardView::build(&ledger, &config, day(10)).top_voted.is_none());

        let id = ledger.expenses()[2].id;
        ledger.upvote(id).unwrap();
        let view = DashboardView::build(&ledger, &config, day(10));
        let top = view.top_voted.expect("ranked rows");
        assert_eq!(top.len(), 3);
        assert_eq!(top[0].rank, "🥇");
        assert_eq!(top[0].row.name, "Rice");
        assert_eq!(top[0].row.votes, "+1");
        assert_eq!(top[0].row.tone, VoteTone::Positive);
    }

    #[test]
    fn vote_cards_list_every_expense_with_tone() {
        let mut ledger = sample_ledger();
        let notebook = ledger.expenses()[0].id;
        ledger.downvote(notebook).unwrap();
        let config = Config {
            recent_limit: 1,
            ..Config::default()
        };
        let view = DashboardView::build(&ledger, &config, day(10));

        assert_eq!(view.recent.len(), 1);
        let names: Vec<&str> = view.vote_cards.iter().map(|row| row.name.as_str()).collect();
        assert_eq!(names, vec!["Notebook", "Noodles", "Rice"]);
        let first = &view.vote_cards[0];
        assert_eq!(first.category_label, "Study");
        assert_eq!(first.date, "10/06/2024");
        assert_eq!(first.votes, "-1");
        assert_eq!(first.tone, VoteTone::Negative);
        assert_eq!(view.vote_cards[1].votes, "0");
        assert_eq!(view.vote_cards[1].tone, VoteTone::Neutral);
    }

    #[test]
    fn charts_use_month_and_day_labels() {
        let view = DashboardView::build(&sample_ledger(), &Config::default(), day(10));
        assert_eq!(view.charts.monthly.labels, vec!["T6"]);
        assert_eq!(view.charts.monthly.values, vec![35_000]);
        assert_eq!(view.charts.trend.labels.first().map(String::as_str), Some("4/6"));
        assert_eq!(
            view.charts.trend.values,
            vec![0, 0, 0, 0, 10_000, 20_000, 5_000]
        );
        assert_eq!(view.charts.category.colors, vec!["#6366f1", "#f59e0b"]);
    }

    #[test]
    fn quick_stats_are_formatted() {
        let view = DashboardView::build(&sample_ledger(), &Config::default(), day(10));
        let stats = view.quick_stats.expect("stats");
        assert_eq!(stats.max_amount, "20.000 ₫");
        assert_eq!(stats.min_amount, "5.000 ₫");
        assert_eq!(stats.average_amount, "11.667 ₫");
        assert_eq!(stats.top_category, "🍔 Food");
    }

    #[test]
    fn rank_labels_continue_after_medals() {
        assert_eq!(rank_label(4), "5️⃣");
        assert_eq!(rank_label(5), "#6");
    }
}
