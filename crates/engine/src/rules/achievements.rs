//! Milestone badge definitions

/// A badge an employee can earn exactly once
#[derive(Debug, Clone)]
pub struct Milestone {
    /// Stable identifier, unique per employee in the achievements table
    pub kind: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    /// Bonus points paid through the ledger when the badge lands
    pub points: i64,
    pub icon: &'static str,
    /// Streak length that unlocks the badge; None for event-based badges
    pub streak: Option<i64>,
}

/// Fixed milestone table
///
/// Streak thresholds are working-day streaks. The unique index on
/// (employee, kind) keeps repeated matches harmless.
pub const MILESTONES: &[Milestone] = &[
    Milestone {
        kind: "first_submission",
        name: "First Timer",
        description: "Submitted a first timesheet",
        points: 5,
        icon: "🎉",
        streak: None,
    },
    Milestone {
        kind: "streak_3",
        name: "On a Roll",
        description: "Three submission days in a row",
        points: 10,
        icon: "🔥",
        streak: Some(3),
    },
    Milestone {
        kind: "streak_5",
        name: "Full Week",
        description: "Five submission days in a row",
        points: 15,
        icon: "⚡",
        streak: Some(5),
    },
    Milestone {
        kind: "streak_10",
        name: "Fortnight Force",
        description: "Ten submission days in a row",
        points: 30,
        icon: "🏗️",
        streak: Some(10),
    },
    Milestone {
        kind: "streak_20",
        name: "Iron Regular",
        description: "Twenty submission days in a row",
        points: 60,
        icon: "🏆",
        streak: Some(20),
    },
];

/// Milestones satisfied by the state after an evaluation pass
///
/// Matches are inclusive (>= threshold) so a badge missed during an outage
/// still lands on the next submission; the database guard deduplicates.
pub fn milestones_reached(streak: i64, first_submission: bool) -> Vec<&'static Milestone> {
    MILESTONES
        .iter()
        .filter(|m| match m.streak {
            Some(threshold) => streak >= threshold,
            None => first_submission,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(streak: i64, first: bool) -> Vec<&'static str> {
        milestones_reached(streak, first)
            .iter()
            .map(|m| m.kind)
            .collect()
    }

    #[test]
    fn test_first_submission_badge_only_on_first() {
        assert!(kinds(1, true).contains(&"first_submission"));
        assert!(!kinds(1, false).contains(&"first_submission"));
    }

    #[test]
    fn test_streak_thresholds_are_inclusive() {
        assert!(kinds(2, false).is_empty());
        assert_eq!(kinds(3, false), vec!["streak_3"]);
        assert_eq!(kinds(7, false), vec!["streak_3", "streak_5"]);
        assert_eq!(
            kinds(25, false),
            vec!["streak_3", "streak_5", "streak_10", "streak_20"]
        );
    }
}
