//! One handler per CLI command.

use crate::{
    config::CONFIG_KEYS,
    currency::{format_currency, format_day_label, format_vote, month_label},
    errors::LedgerError,
    ledger::{parse_amount, parse_date, Category, ExpenseDraft, ExpenseId, SortKey},
    view::{category_breakdown, DashboardView, ExpenseRow},
};

use super::{
    args::Args,
    io::confirm_action,
    output,
    table::{Table, TableColumn},
    CliError, Session,
};

const DRAFT_OPTIONS: [&str; 5] = ["name", "amount", "category", "date", "note"];

pub fn add(session: &mut Session, args: &Args) -> Result<(), CliError> {
    args.expect_only(&DRAFT_OPTIONS)?;
    let date = match args.option("date") {
        Some(raw) => parse_date(raw)?,
        None => session.tracker.today(),
    };
    let draft = ExpenseDraft::new(
        args.required_option("name")?,
        parse_amount(args.required_option("amount")?)?,
        args.required_option("category")?.parse::<Category>()?,
        date,
    )
    .with_note(args.option("note").unwrap_or_default());

    let id = session.tracker.add(draft)?;
    let currency = session.config.currency_format();
    if let Some(expense) = session.tracker.ledger().get(id) {
        output::success(format!(
            "Added expense {}: {} ({})",
            id,
            expense.name,
            format_currency(expense.amount, &currency)
        ));
    }
    Ok(())
}

pub fn edit(session: &mut Session, args: &Args) -> Result<(), CliError> {
    args.expect_only(&DRAFT_OPTIONS)?;
    let id: ExpenseId = args.required_positional(0, "expense id")?.parse()?;
    let mut draft = session
        .tracker
        .ledger()
        .get(id)
        .map(|expense| expense.to_draft())
        .ok_or(LedgerError::NotFound(id))?;

    if let Some(name) = args.option("name") {
        draft.name = name.to_string();
    }
    if let Some(amount) = args.option("amount") {
        draft.amount = parse_amount(amount)?;
    }
    if let Some(category) = args.option("category") {
        draft.category = category.parse()?;
    }
    if let Some(date) = args.option("date") {
        draft.date = parse_date(date)?;
    }
    if let Some(note) = args.option("note") {
        draft.note = note.to_string();
    }

    session.tracker.edit(id, draft)?;
    output::success(format!("Updated expense {}", id));
    Ok(())
}

pub fn delete(session: &mut Session, args: &Args) -> Result<(), CliError> {
    args.expect_only(&[])?;
    let id: ExpenseId = args.required_positional(0, "expense id")?.parse()?;
    let name = session
        .tracker
        .ledger()
        .get(id)
        .map(|expense| expense.name.clone())
        .ok_or(LedgerError::NotFound(id))?;

    if !confirmed(session, args, &format!("Delete expense `{}`?", name))? {
        output::info("Cancelled");
        return Ok(());
    }
    let removed = session.tracker.delete(id)?;
    output::success(format!("Deleted expense {}: {}", removed.id, removed.name));
    Ok(())
}

pub fn upvote(session: &mut Session, args: &Args) -> Result<(), CliError> {
    args.expect_only(&[])?;
    let id: ExpenseId = args.required_positional(0, "expense id")?.parse()?;
    let votes = session.tracker.upvote(id)?;
    output::success(format!("Expense {} score: {}", id, format_vote(votes)));
    Ok(())
}

pub fn downvote(session: &mut Session, args: &Args) -> Result<(), CliError> {
    args.expect_only(&[])?;
    let id: ExpenseId = args.required_positional(0, "expense id")?.parse()?;
    let votes = session.tracker.downvote(id)?;
    output::success(format!("Expense {} score: {}", id, format_vote(votes)));
    Ok(())
}

pub fn clear(session: &mut Session, args: &Args) -> Result<(), CliError> {
    args.expect_only(&[])?;
    if !confirmed(
        session,
        args,
        "Delete ALL expenses? This cannot be undone.",
    )? {
        output::info("Cancelled");
        return Ok(());
    }
    let removed = session.tracker.clear_all()?;
    output::success(format!("Cleared {} expenses", removed));
    Ok(())
}

pub fn list(session: &mut Session, args: &Args) -> Result<(), CliError> {
    args.expect_only(&["category", "sort"])?;
    let category = args
        .option("category")
        .map(str::parse::<Category>)
        .transpose()?;
    let sort = args
        .option("sort")
        .map(str::parse::<SortKey>)
        .transpose()?
        .unwrap_or_default();

    let currency = session.config.currency_format();
    let rows = session
        .tracker
        .ledger()
        .filter_sort_for_table(category.as_ref(), sort);
    if rows.is_empty() {
        output::info("No expenses found");
        return Ok(());
    }

    let mut table = Table::new(vec![
        TableColumn::right("ID"),
        TableColumn::left(""),
        TableColumn::left("Name").max_width(32),
        TableColumn::right("Amount"),
        TableColumn::left("Date"),
        TableColumn::right("Votes"),
    ]);
    for expense in rows {
        let row = ExpenseRow::from_expense(expense, &currency);
        table.push_row(vec![
            row.id.to_string(),
            row.icon.to_string(),
            row.name,
            row.amount,
            row.date,
            row.votes,
        ]);
    }
    println!("{}", table.render());
    Ok(())
}

pub fn stats(session: &mut Session, args: &Args) -> Result<(), CliError> {
    args.expect_only(&[])?;
    let ledger = session.tracker.ledger();
    let currency = session.config.currency_format();

    output::section("Statistics");
    output::field(
        "Total spend",
        format_currency(ledger.total_spend(), &currency),
        12,
    );
    output::field(
        "This month",
        format_currency(session.tracker.month_to_date_spend(), &currency),
        12,
    );
    output::field("Expenses", ledger.len(), 12);
    output::field("Votes", ledger.total_absolute_votes(), 12);

    output::section("Quick stats");
    match ledger.quick_stats() {
        Some(quick) => {
            output::field("Largest", format_currency(quick.max_amount, &currency), 12);
            output::field("Smallest", format_currency(quick.min_amount, &currency), 12);
            output::field("Average", format_currency(quick.average_amount, &currency), 12);
            output::field(
                "Top category",
                format!(
                    "{} {} ({})",
                    quick.top_category.icon(),
                    quick.top_category.label(),
                    quick.top_category_count
                ),
                12,
            );
        }
        None => output::info("No expenses yet"),
    }
    Ok(())
}

pub fn categories(session: &mut Session, args: &Args) -> Result<(), CliError> {
    args.expect_only(&[])?;
    let breakdown = category_breakdown(
        session.tracker.ledger(),
        &session.config.currency_format(),
    );
    if breakdown.is_empty() {
        output::info("No data yet");
        return Ok(());
    }
    let mut table = Table::new(vec![
        TableColumn::left(""),
        TableColumn::left("Category"),
        TableColumn::right("Amount"),
        TableColumn::right("Share"),
    ]);
    for entry in breakdown {
        table.push_row(vec![
            entry.icon.to_string(),
            entry.label.to_string(),
            entry.amount,
            format!("{}%", entry.percent),
        ]);
    }
    println!("{}", table.render());
    Ok(())
}

pub fn monthly(session: &mut Session, args: &Args) -> Result<(), CliError> {
    args.expect_only(&[])?;
    let currency = session.config.currency_format();
    let series = session
        .tracker
        .ledger()
        .monthly_series(session.config.monthly_window);
    if series.is_empty() {
        output::info("No data yet");
        return Ok(());
    }
    for bucket in series {
        output::field(
            &format!("{} {}", month_label(bucket.month), bucket.year),
            format_currency(bucket.amount, &currency),
            8,
        );
    }
    Ok(())
}

pub fn trend(session: &mut Session, args: &Args) -> Result<(), CliError> {
    args.expect_only(&[])?;
    let currency = session.config.currency_format();
    for point in session.tracker.daily_trend(session.config.trend_days) {
        output::field(
            &format_day_label(point.date),
            format_currency(point.amount, &currency),
            5,
        );
    }
    Ok(())
}

pub fn top(session: &mut Session, args: &Args) -> Result<(), CliError> {
    args.expect_only(&[])?;
    let view = DashboardView::build(
        session.tracker.ledger(),
        &session.config,
        session.tracker.today(),
    );
    match view.top_voted {
        Some(ranked) => {
            for entry in ranked {
                println!(
                    "{} {} {} ({}, {}) {}",
                    entry.rank,
                    entry.row.icon,
                    entry.row.name,
                    entry.row.amount,
                    entry.row.date,
                    entry.row.votes
                );
            }
        }
        None => output::info("No votes yet"),
    }
    Ok(())
}

pub fn votes(session: &mut Session, args: &Args) -> Result<(), CliError> {
    args.expect_only(&[])?;
    let view = DashboardView::build(
        session.tracker.ledger(),
        &session.config,
        session.tracker.today(),
    );
    if view.vote_cards.is_empty() {
        output::info("No expenses to vote on yet");
        return Ok(());
    }
    let mut table = Table::new(vec![
        TableColumn::right("ID"),
        TableColumn::left(""),
        TableColumn::left("Name").max_width(32),
        TableColumn::left("Category"),
        TableColumn::left("Date"),
        TableColumn::right("Score"),
    ]);
    for card in view.vote_cards {
        table.push_row(vec![
            card.id.to_string(),
            card.icon.to_string(),
            card.name,
            card.category_label.to_string(),
            card.date,
            card.votes,
        ]);
    }
    println!("{}", table.render());
    Ok(())
}

pub fn config(session: &mut Session, args: &Args) -> Result<(), CliError> {
    args.expect_only(&[])?;
    match args.positional(0) {
        None | Some("show") => {
            output::section("Configuration");
            output::field("file", session.config_manager.path().display(), 19);
            for (key, value) in session.config.entries() {
                output::field(key, value, 19);
            }
            Ok(())
        }
        Some("set") => {
            let key = args.required_positional(1, "setting name")?;
            let value = args.required_positional(2, "setting value")?;
            let mut updated = session.config.clone();
            updated.set(key, value)?;
            session.config_manager.save(&updated)?;
            session.config = updated;
            output::success(format!("Set {} = {}", key, value));
            Ok(())
        }
        Some(other) => Err(CliError::Usage(format!(
            "unknown config action `{}` (expected show or set <{}> <value>)",
            other,
            CONFIG_KEYS.join("|")
        ))),
    }
}

pub fn dashboard(session: &mut Session, args: &Args) -> Result<(), CliError> {
    args.expect_only(&[])?;
    let view = DashboardView::build(
        session.tracker.ledger(),
        &session.config,
        session.tracker.today(),
    );
    if args.switch("json") {
        let json = serde_json::to_string_pretty(&view).map_err(LedgerError::from)?;
        println!("{}", json);
        return Ok(());
    }

    output::section("Dashboard");
    output::field("Total spend", &view.stats.total_spend, 12);
    output::field("This month", &view.stats.month_spend, 12);
    output::field("Expenses", view.stats.expense_count, 12);
    output::field("Votes", view.stats.total_votes, 12);

    output::section("Recent");
    if view.recent.is_empty() {
        output::info("No expenses yet");
    }
    for row in &view.recent {
        println!(
            "{} {} ({}, {}) -{}",
            row.icon, row.name, row.category_label, row.date, row.amount
        );
    }

    output::section("By category");
    if view.category_breakdown.is_empty() {
        output::info("No data yet");
    }
    for entry in &view.category_breakdown {
        println!("{} {} {}%", entry.icon, entry.label, entry.percent);
    }
    Ok(())
}

/// Destructive commands ask first unless `--yes` was given or confirmation
/// is turned off in the configuration.
fn confirmed(session: &Session, args: &Args, prompt: &str) -> Result<bool, CliError> {
    if args.switch("yes") || !session.config.confirm_destructive {
        return Ok(true);
    }
    confirm_action(prompt)
}

