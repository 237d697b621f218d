use chrono::{Days, NaiveDate, NaiveDateTime, NaiveTime};

use crate::dto::membership::ActiveMembership;
use crate::models::{Athlete, AthleteDirectory, Fee};

/// Length of a membership window, counted from the fee's starting date.
pub const MEMBERSHIP_DAYS: u64 = 30;

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Memberships still inside the lookback window at `now`, soonest to expire first.
///
/// A fee is kept when its starting date is on or after `now.date() - 30 days`.
/// Fees with a missing or unparsable starting date are left out. Fees whose
/// athlete is not in `athletes` are kept with `athlete: None`. Rows with the
/// same remaining days keep their order from `fees`.
///
/// `now` is read once by the caller and used for both the window and the
/// per-row countdown.
pub fn project_active_memberships(
    fees: &[Fee],
    athletes: &[Athlete],
    now: NaiveDateTime,
) -> Vec<ActiveMembership> {
    let window_start = now
        .date()
        .checked_sub_days(Days::new(MEMBERSHIP_DAYS))
        .unwrap_or(NaiveDate::MIN);
    let directory = AthleteDirectory::new(athletes);

    let mut active: Vec<ActiveMembership> = fees
        .iter()
        .filter_map(|fee| {
            let starting_date = fee.start_date()?;
            if starting_date < window_start {
                return None;
            }
            let expires_on = starting_date.checked_add_days(Days::new(MEMBERSHIP_DAYS))?;

            Some(ActiveMembership {
                id: fee.id,
                athlete_id: fee.athlete,
                athlete: fee.athlete.and_then(|id| directory.get(id)).cloned(),
                starting_date,
                expires_on,
                fee: fee.fee,
                taken: fee.taken,
                remainder: fee.remainder,
                remaining_days: remaining_days(expires_on, now),
            })
        })
        .collect();

    // stable
    active.sort_by_key(|membership| membership.remaining_days);
    active
}

/// Whole days from `now` until midnight of `expires_on`, rounded up, never negative.
fn remaining_days(expires_on: NaiveDate, now: NaiveDateTime) -> u32 {
    let left = expires_on.and_time(NaiveTime::MIN) - now;
    let millis = left.num_milliseconds();
    if millis <= 0 {
        return 0;
    }

    let days = (millis + MILLIS_PER_DAY - 1) / MILLIS_PER_DAY;
    u32::try_from(days).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rust_decimal::Decimal;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn midnight(y: i32, m: u32, d: u32) -> NaiveDateTime {
        date(y, m, d).and_time(NaiveTime::MIN)
    }

    fn athlete(id: i64, name: &str) -> Athlete {
        Athlete {
            id,
            name: name.to_string(),
            last_name: "Test".to_string(),
            father_name: None,
            current_location: None,
            permanent_location: None,
            date_of_birth: None,
            picture: None,
            nic: None,
            document: None,
        }
    }

    fn fee(id: i64, athlete: i64, starting_date: &str) -> Fee {
        Fee {
            id,
            athlete: Some(athlete),
            starting_date: Some(starting_date.to_string()),
            fee: Decimal::from(1000),
            taken: Decimal::from(600),
            remainder: Decimal::from(400),
        }
    }

    #[test]
    fn test_recent_fee_included_old_fee_excluded() {
        let athletes = vec![athlete(1, "Ali")];
        let fees = vec![fee(1, 1, "2024-05-20"), fee(2, 1, "2024-04-01")];

        let active = project_active_memberships(&fees, &athletes, midnight(2024, 6, 1));

        assert_eq!(active.len(), 1);
        assert_eq!(active[0].id, 1);
        assert_eq!(active[0].remaining_days, 18);
        assert_eq!(active[0].expires_on, date(2024, 6, 19));
        assert_eq!(active[0].athlete.as_ref().unwrap().name, "Ali");
        assert_eq!(active[0].remainder, Decimal::from(400));
    }

    #[test]
    fn test_fee_older_than_window_excluded() {
        let fees = vec![fee(3, 1, "2024-06-01")];

        let active = project_active_memberships(&fees, &[], midnight(2024, 7, 5));

        assert!(active.is_empty());
    }

    #[test]
    fn test_window_boundary_is_inclusive() {
        let fees = vec![fee(4, 1, "2024-05-02"), fee(5, 1, "2024-05-01")];

        let active = project_active_memberships(&fees, &[], midnight(2024, 6, 1));
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].id, 4);
        assert_eq!(active[0].remaining_days, 0);
        assert!(active[0].is_expired());

        // later the same day the boundary fee is still listed, at zero
        let afternoon = date(2024, 6, 1).and_hms_opt(15, 30, 0).unwrap();
        let active = project_active_memberships(&fees, &[], afternoon);
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].remaining_days, 0);
    }

    #[test]
    fn test_partial_days_round_up() {
        let fees = vec![fee(6, 1, "2024-05-20")];
        let morning = date(2024, 6, 1).and_hms_opt(10, 0, 0).unwrap();

        let active = project_active_memberships(&fees, &[], morning);

        assert_eq!(active[0].remaining_days, 18);
    }

    #[test]
    fn test_equal_remaining_days_keep_input_order() {
        let fees = vec![
            fee(10, 1, "2024-05-25"),
            fee(11, 2, "2024-05-20"),
            fee(12, 3, "2024-05-20"),
            fee(13, 4, "2024-05-10"),
        ];

        let active = project_active_memberships(&fees, &[], midnight(2024, 6, 1));
        let ids: Vec<i64> = active.iter().map(|m| m.id).collect();

        assert_eq!(ids, vec![13, 11, 12, 10]);
    }

    #[test]
    fn test_unknown_athlete_is_kept_without_athlete() {
        let athletes = vec![athlete(1, "Ali")];
        let fees = vec![fee(20, 42, "2024-05-28")];

        let active = project_active_memberships(&fees, &athletes, midnight(2024, 6, 1));

        assert_eq!(active.len(), 1);
        assert_eq!(active[0].athlete_id, Some(42));
        assert!(active[0].athlete.is_none());
    }

    #[test]
    fn test_bad_or_missing_dates_are_skipped() {
        let mut missing = fee(31, 1, "");
        missing.starting_date = None;
        let fees = vec![fee(30, 1, "31/05/2024"), missing, fee(32, 1, "2024-05-31")];

        let active = project_active_memberships(&fees, &[], midnight(2024, 6, 1));

        assert_eq!(active.len(), 1);
        assert_eq!(active[0].id, 32);
    }

    #[test]
    fn test_malformed_upstream_rows_are_skipped_not_fatal() {
        let json = r#"[
            {"id": 1, "athlete": 1, "starting_date": "2024-05-20", "fee": "1000"},
            {"id": 2, "athlete": 1, "starting_date": 20240520, "fee": "1000"},
            {"id": 3, "athlete": null, "starting_date": "2024-05-25", "fee": "1000"}
        ]"#;
        let fees: Vec<Fee> = serde_json::from_str(json).unwrap();
        let athletes = vec![athlete(1, "Ali")];

        let active = project_active_memberships(&fees, &athletes, midnight(2024, 6, 1));

        let ids: Vec<i64> = active.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![1, 3]);
        assert_eq!(active[0].athlete.as_ref().unwrap().name, "Ali");
        assert_eq!(active[1].athlete_id, None);
        assert!(active[1].athlete.is_none());
    }

    #[test]
    fn test_empty_inputs() {
        assert!(project_active_memberships(&[], &[], midnight(2024, 6, 1)).is_empty());
    }

    #[test]
    fn test_future_start_counts_full_window() {
        let fees = vec![fee(40, 1, "2024-06-10")];

        let active = project_active_memberships(&fees, &[], midnight(2024, 6, 1));

        assert_eq!(active[0].remaining_days, 39);
    }

    #[test]
    fn test_projection_is_idempotent_and_leaves_inputs_alone() {
        let athletes = vec![athlete(1, "Ali"), athlete(2, "Mina")];
        let fees = vec![
            fee(1, 2, "2024-05-29"),
            fee(2, 1, "2024-05-05"),
            fee(3, 9, "2024-05-15"),
        ];
        let fees_before = fees.clone();
        let athletes_before = athletes.clone();
        let now = midnight(2024, 6, 1);

        let first = project_active_memberships(&fees, &athletes, now);
        let second = project_active_memberships(&fees, &athletes, now);

        assert_eq!(first, second);
        assert_eq!(fees, fees_before);
        assert_eq!(athletes, athletes_before);
    }

    fn arb_fees() -> impl Strategy<Value = Vec<Fee>> {
        prop::collection::vec((0i64..5, 0u64..90), 0..40).prop_map(|rows| {
            rows.into_iter()
                .enumerate()
                .map(|(idx, (athlete, days_back))| {
                    let start = date(2024, 6, 1) - Days::new(days_back);
                    fee(idx as i64, athlete, &start.format("%Y-%m-%d").to_string())
                })
                .collect()
        })
    }

    proptest! {
        #[test]
        fn test_projection_properties(fees in arb_fees(), hour in 0u32..24) {
            let athletes = vec![athlete(0, "A"), athlete(1, "B"), athlete(2, "C")];
            let now = date(2024, 6, 1).and_hms_opt(hour, 0, 0).unwrap();
            let window_start = date(2024, 5, 2);

            let active = project_active_memberships(&fees, &athletes, now);

            for membership in &active {
                prop_assert!(membership.starting_date >= window_start);
                prop_assert!(membership.remaining_days <= MEMBERSHIP_DAYS as u32);
                prop_assert_eq!(
                    membership.athlete.is_some(),
                    membership.athlete_id.is_some_and(|id| id < 3)
                );
            }
            for pair in active.windows(2) {
                prop_assert!(pair[0].remaining_days <= pair[1].remaining_days);
                if pair[0].remaining_days == pair[1].remaining_days {
                    // ids follow input position
                    prop_assert!(pair[0].id < pair[1].id);
                }
            }

            let expected = fees
                .iter()
                .filter(|fee| fee.start_date().is_some_and(|d| d >= window_start))
                .count();
            prop_assert_eq!(active.len(), expected);
        }
    }
}
