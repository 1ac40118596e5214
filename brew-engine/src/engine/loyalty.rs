//! Loyalty ledger: points accrual and the stamp card

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use shared::models::PointReward;
use shared::util::new_id;

use super::manager::StateManager;

/// Stamp-card size; a full card is reset explicitly by the user
pub const STAMP_CAP: u8 = 8;

impl StateManager {
    /// Earn points for one checkout line: `floor(price x 100)` on the
    /// discounted, rounded price. Appends a positive ledger entry.
    /// Callers hold the write gate.
    pub(super) fn add_points(&self, price: Decimal, label: &str, datetime: &str) {
        let earned = (price * Decimal::from(100u32))
            .floor()
            .to_u64()
            .unwrap_or(0);
        self.state().points.update(|points| *points += earned);
        self.state().points_history.update(|history| {
            history.push(PointReward {
                id: new_id(),
                product: label.to_string(),
                datetime: datetime.to_string(),
                points: earned as i64,
            })
        });
        tracing::debug!(label, earned, total = self.state().points.get(), "points earned");
    }

    /// Append a negative ledger entry for points spent. Callers hold the
    /// write gate and have already deducted the balance.
    pub(super) fn record_points_spent(&self, label: &str, datetime: &str, spent: u64) {
        self.state().points_history.update(|history| {
            history.push(PointReward {
                id: new_id(),
                product: label.to_string(),
                datetime: datetime.to_string(),
                points: -(spent as i64),
            })
        });
    }

    /// One stamp per checkout call, capped. Callers hold the write gate.
    pub(super) fn award_stamp(&self) {
        self.state().stamp_count.update(|stamps| {
            if *stamps >= STAMP_CAP {
                tracing::debug!("stamp card already full, no stamp awarded");
            } else {
                *stamps += 1;
                tracing::debug!(stamps = *stamps, "stamp awarded");
            }
        });
    }

    /// Reset a full stamp card to zero
    ///
    /// Models a remote round-trip before mutating. Only a full card
    /// (exactly [`STAMP_CAP`] stamps) may be reset; anything else is
    /// rejected without touching state.
    pub async fn reset_stamp_count(&self) -> bool {
        tokio::time::sleep(std::time::Duration::from_millis(500)).await;
        let _gate = self.gate();
        if self.state().stamp_count.get() != STAMP_CAP {
            tracing::warn!(
                stamps = self.state().stamp_count.get(),
                "stamp reset rejected, card is not full"
            );
            return false;
        }
        self.state().stamp_count.set(0);
        tracing::debug!("stamp card reset");
        self.schedule_sync();
        true
    }
}
