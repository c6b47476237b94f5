//! Reward rules evaluation for timesheet submission events
//!
//! One evaluation pass runs in a single database transaction: the ledger
//! inserts and the balance updates commit together or not at all, so a
//! failure mid-pass can never leave the balance out of step with the ledger.

use buildflow_core::{
    Error, EvaluationOutcome, LeaveKind, PeriodAward, PeriodKind, Result, RewardConfig,
    RewardPoints, SubmissionEvent, TransactionKind,
};
use buildflow_persistence::sqlite;
use chrono::{Duration, NaiveDate};
use sqlx::{Sqlite, SqlitePool, Transaction};
use tracing::{debug, info, instrument, warn};

use super::achievements;
use super::periods;

/// Evaluate one timesheet submission event
///
/// The config is passed in explicitly (loaded via [`crate::config::load_config`])
/// so callers and tests control exactly which tunables apply. Evaluation is
/// idempotent per (employee, date): re-submitting an already-recorded day
/// awards nothing.
#[instrument(skip(pool, config), fields(employee_id = %event.employee_id, date = %event.date))]
pub async fn evaluate_submission(
    pool: &SqlitePool,
    config: &RewardConfig,
    event: &SubmissionEvent,
) -> Result<EvaluationOutcome> {
    if !sqlite::employee_exists(pool, &event.employee_id).await? {
        return Err(Error::EmployeeNotFound(event.employee_id.clone()));
    }

    // A halted ledger blocks all further automated awards until reconciled
    if let Some(points) = sqlite::get_points(pool, &event.employee_id).await? {
        if points.awards_halted {
            let actual = sqlite::ledger_sum(pool, &event.employee_id).await?;
            warn!("Awards halted for {}, refusing to evaluate", event.employee_id);
            return Err(Error::ConsistencyError {
                employee_id: event.employee_id.clone(),
                recorded: points.total_points,
                actual,
            });
        }
    }

    let mut tx = pool
        .begin()
        .await
        .map_err(|e| Error::DatabaseError(e.to_string()))?;

    sqlite::ensure_points_row(&mut tx, &event.employee_id).await?;
    let points = sqlite::get_points_tx(&mut tx, &event.employee_id)
        .await?
        .ok_or_else(|| Error::DatabaseError("reward_points row missing after insert".to_string()))?;

    let mut outcome = EvaluationOutcome::empty(&event.employee_id, event.date, points.current_streak);

    if let Some(leave) = event.leave {
        apply_streak_break(&mut tx, &points, event, leave, &mut outcome).await?;
    } else {
        apply_worked_day(&mut tx, config, &points, event, &mut outcome).await?;
    }

    tx.commit()
        .await
        .map_err(|e| Error::DatabaseError(e.to_string()))?;

    info!(
        "Evaluated {} on {}: +{} points, streak {} -> {}",
        event.employee_id, event.date, outcome.points_awarded, outcome.streak_before, outcome.streak_after
    );
    Ok(outcome)
}

/// Leave day: reset the streak, award nothing
async fn apply_streak_break(
    tx: &mut Transaction<'_, Sqlite>,
    points: &RewardPoints,
    event: &SubmissionEvent,
    leave: LeaveKind,
    outcome: &mut EvaluationOutcome,
) -> Result<()> {
    let recorded =
        sqlite::try_record_day(tx, &event.employee_id, event.date, Some(leave)).await?;

    outcome.streak_reset = true;
    outcome.streak_after = 0;
    outcome.duplicate = !recorded;

    if points.current_streak != 0 {
        sqlite::update_streak(
            tx,
            &event.employee_id,
            0,
            points.longest_streak,
            points.last_submission_date,
        )
        .await?;
    }

    // One zero-point marker per leave day; nothing beyond the reset itself
    if recorded {
        sqlite::insert_transaction(
            tx,
            &event.employee_id,
            TransactionKind::Penalty,
            0,
            &format!("Streak reset: {} leave", leave.as_str()),
            Some(event.date),
        )
        .await?;
    }

    debug!(
        "Streak reset for {} ({} leave on {})",
        event.employee_id,
        leave.as_str(),
        event.date
    );
    Ok(())
}

/// Worked day: daily points, streak advance, period and milestone bonuses
async fn apply_worked_day(
    tx: &mut Transaction<'_, Sqlite>,
    config: &RewardConfig,
    points: &RewardPoints,
    event: &SubmissionEvent,
    outcome: &mut EvaluationOutcome,
) -> Result<()> {
    let recorded = sqlite::try_record_day(tx, &event.employee_id, event.date, None).await?;
    if !recorded {
        outcome.duplicate = true;
        debug!(
            "Duplicate submission for {} on {}, nothing awarded",
            event.employee_id, event.date
        );
        return Ok(());
    }

    // ── Daily award ────────────────────────────────────────────────
    let weekend = periods::is_weekend(event.date);
    let daily = if weekend {
        config.daily_points + config.weekend_bonus
    } else {
        config.daily_points
    };
    let reason = if weekend {
        "Daily submission (weekend)"
    } else {
        "Daily submission"
    };

    sqlite::insert_transaction(
        tx,
        &event.employee_id,
        TransactionKind::Earned,
        daily,
        reason,
        Some(event.date),
    )
    .await?;
    sqlite::apply_points_delta(tx, &event.employee_id, daily).await?;
    outcome.daily_awarded = true;
    outcome.points_awarded += daily;

    // ── Streak ─────────────────────────────────────────────────────
    let first_submission = points.last_submission_date.is_none();
    let new_streak = match points.last_submission_date {
        None => 1,
        // Back-dated submissions earn points but never move the streak
        Some(last) if event.date <= last => points.current_streak,
        Some(last) => {
            if gap_is_covered(tx, &event.employee_id, last, event.date).await? {
                points.current_streak + 1
            } else {
                1
            }
        }
    };
    let new_longest = new_streak.max(points.longest_streak);
    let last_date = match points.last_submission_date {
        Some(last) if event.date <= last => Some(last),
        _ => Some(event.date),
    };

    sqlite::update_streak(tx, &event.employee_id, new_streak, new_longest, last_date).await?;
    outcome.streak_after = new_streak;

    // ── Period completion bonuses ──────────────────────────────────
    let week = periods::week_bounds(event.date);
    let fortnight = periods::fortnight_bounds(event.date);
    let month = periods::month_bounds(event.date);

    let checks = [
        (PeriodKind::Weekly, week, config.weekly_points),
        (PeriodKind::Fortnightly, fortnight, config.fortnightly_points),
        (PeriodKind::Monthly, month, config.monthly_points),
    ];

    for (kind, (start, end), bonus) in checks {
        if !period_complete(tx, &event.employee_id, start, end).await? {
            continue;
        }
        // The unique claim row is what makes each period exactly-once
        if !sqlite::try_claim_period(tx, &event.employee_id, kind, start).await? {
            continue;
        }

        sqlite::insert_transaction(
            tx,
            &event.employee_id,
            TransactionKind::Bonus,
            bonus,
            &format!("Complete {} bonus", kind.as_str()),
            Some(start),
        )
        .await?;
        sqlite::apply_points_delta(tx, &event.employee_id, bonus).await?;

        outcome.points_awarded += bonus;
        outcome.period_awards.push(PeriodAward {
            kind,
            period_start: start,
            points: bonus,
        });
        info!(
            "{} period bonus for {} ({} starting {})",
            kind.as_str(),
            event.employee_id,
            bonus,
            start
        );
    }

    // ── Milestone badges ───────────────────────────────────────────
    for milestone in achievements::milestones_reached(new_streak, first_submission) {
        let awarded = sqlite::try_award_achievement(
            tx,
            &event.employee_id,
            milestone.kind,
            milestone.name,
            milestone.description,
            milestone.points,
            milestone.icon,
        )
        .await?;
        if !awarded {
            continue;
        }

        sqlite::insert_transaction(
            tx,
            &event.employee_id,
            TransactionKind::Bonus,
            milestone.points,
            &format!("Achievement: {}", milestone.name),
            Some(event.date),
        )
        .await?;
        sqlite::apply_points_delta(tx, &event.employee_id, milestone.points).await?;

        outcome.points_awarded += milestone.points;
        outcome.achievements.push(milestone.name.to_string());
    }

    Ok(())
}

/// True when no required working day between `last` and `date` (exclusive)
/// is missing a submission; weekends never interrupt a streak
async fn gap_is_covered(
    tx: &mut Transaction<'_, Sqlite>,
    employee_id: &str,
    last: NaiveDate,
    date: NaiveDate,
) -> Result<bool> {
    let from = last + Duration::days(1);
    let to = date - Duration::days(1);
    if from > to {
        return Ok(true);
    }

    let expected = periods::weekday_count(from, to);
    if expected == 0 {
        return Ok(true);
    }

    let have = sqlite::count_weekday_submissions(tx, employee_id, from, to).await?;
    Ok(have >= expected)
}

/// True when every required working day in [start, end] has a submission
async fn period_complete(
    tx: &mut Transaction<'_, Sqlite>,
    employee_id: &str,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<bool> {
    let expected = periods::weekday_count(start, end);
    if expected == 0 {
        return Ok(false);
    }

    let have = sqlite::count_weekday_submissions(tx, employee_id, start, end).await?;
    Ok(have >= expected)
}
