use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::types::Liquidation;

/// Liquidation proceeds are held for 3 days before the protocol sends
/// them back to the lender's wallet.
pub const CLAIM_COOLDOWN_DAYS: i64 = 3;

/// Display label for where a liquidation's proceeds stand. Not an
/// authoritative settlement state; the send transaction is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum ClaimStatus {
    ReturnedToWallet,
    Processing,
    #[serde(rename_all = "camelCase")]
    Cooldown {
        hours_left: i64,
        minutes_left: i64,
    },
}

pub fn claim_status(liquidation: &Liquidation, now: DateTime<Utc>) -> ClaimStatus {
    if liquidation.send_tx.is_some() {
        return ClaimStatus::ReturnedToWallet;
    }

    let cooldown = Duration::days(CLAIM_COOLDOWN_DAYS);
    let elapsed = now - liquidation.liquidated_at;

    // strict: exactly 72h elapsed is still cooldown, with zero remaining
    if elapsed > cooldown {
        return ClaimStatus::Processing;
    }

    let remaining = liquidation.liquidated_at + cooldown - now;
    let hours_left = remaining.num_hours();
    let minutes_left = remaining.num_minutes() - hours_left * 60;

    ClaimStatus::Cooldown {
        hours_left,
        minutes_left,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn liquidation(liquidated_at: DateTime<Utc>, send_tx: Option<&str>) -> Liquidation {
        Liquidation {
            offer: "o1".to_owned(),
            position: "pos".to_owned(),
            borrowed_amount: 1.0,
            sold_for: "1000000".to_owned(),
            token_sold: "mintA".to_owned(),
            to_receive_token: "mintB".to_owned(),
            liquidated_at,
            sold_at: None,
            liquidation_tx: "liqtx".to_owned(),
            sale_tx: None,
            send_tx: send_tx.map(str::to_owned),
            send_timestamp: None,
        }
    }

    fn at(secs_after_liquidation: i64) -> (Liquidation, DateTime<Utc>) {
        let liquidated_at = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
        let now = liquidated_at + Duration::seconds(secs_after_liquidation);
        (liquidation(liquidated_at, None), now)
    }

    #[test]
    fn send_transaction_wins_regardless_of_age() {
        let (l, now) = at(10);
        let settled = Liquidation {
            send_tx: Some("sendtx".to_owned()),
            ..l
        };
        assert_eq!(claim_status(&settled, now), ClaimStatus::ReturnedToWallet);
    }

    #[test]
    fn strict_three_day_boundary() {
        let day3 = 3 * 24 * 3600;

        let (l, now) = at(day3 + 1);
        assert_eq!(claim_status(&l, now), ClaimStatus::Processing);

        let (l, now) = at(day3 - 1);
        assert_eq!(
            claim_status(&l, now),
            ClaimStatus::Cooldown {
                hours_left: 0,
                minutes_left: 0
            }
        );

        // exactly 72h is still cooldown with nothing left on the clock
        let (l, now) = at(day3);
        assert_eq!(
            claim_status(&l, now),
            ClaimStatus::Cooldown {
                hours_left: 0,
                minutes_left: 0
            }
        );
    }

    #[test]
    fn remaining_time_floors_to_whole_hours_and_minutes() {
        // 1 day in: 48h remain minus 30m and some seconds
        let (l, now) = at(24 * 3600 + 30 * 60 + 59);
        assert_eq!(
            claim_status(&l, now),
            ClaimStatus::Cooldown {
                hours_left: 47,
                minutes_left: 29
            }
        );
    }

    #[test]
    fn classification_is_idempotent_for_a_fixed_now() {
        let (l, now) = at(3600);
        assert_eq!(claim_status(&l, now), claim_status(&l, now));
    }
}
