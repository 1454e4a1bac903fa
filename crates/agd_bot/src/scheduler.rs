use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, NaiveTime, Utc};
use tokio::time::sleep;
use tracing::{error, info};

use agd_core::{Error, Result};

use crate::telegram::TelegramBot;

/// Delivers the digest to the channel once a day at a fixed UTC time.
pub struct DigestScheduler {
    bot: Arc<TelegramBot>,
    schedule: NaiveTime,
}

impl DigestScheduler {
    /// `schedule` is a `HH:MM` wall-clock time in UTC.
    pub fn new(bot: Arc<TelegramBot>, schedule: &str) -> Result<Self> {
        let schedule = NaiveTime::parse_from_str(schedule, "%H:%M")
            .map_err(|e| Error::Config(format!("invalid schedule {:?}: {}", schedule, e)))?;
        Ok(Self { bot, schedule })
    }

    /// The next occurrence of the scheduled time strictly after `now`.
    pub fn next_run(now: DateTime<Utc>, at: NaiveTime) -> DateTime<Utc> {
        let today = now.date_naive().and_time(at).and_utc();
        if today > now {
            today
        } else {
            today + chrono::Duration::days(1)
        }
    }

    /// Sleep-until-send loop. A failed delivery is logged and the schedule
    /// continues with the next day.
    pub async fn run(&self) {
        loop {
            let now = Utc::now();
            let next = Self::next_run(now, self.schedule);
            let wait = (next - now).to_std().unwrap_or(Duration::from_secs(0));
            info!(next = %next, "next scheduled digest");
            sleep(wait).await;

            if let Err(e) = self.bot.send_digest_to_channel().await {
                error!(error = %e, "scheduled digest delivery failed");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn next_run_is_later_today_when_time_has_not_passed() {
        let now = Utc.with_ymd_and_hms(2026, 8, 7, 6, 30, 0).unwrap();
        let at = NaiveTime::from_hms_opt(8, 0, 0).unwrap();
        let next = DigestScheduler::next_run(now, at);
        assert_eq!(next, Utc.with_ymd_and_hms(2026, 8, 7, 8, 0, 0).unwrap());
    }

    #[test]
    fn next_run_rolls_to_tomorrow_when_time_has_passed() {
        let now = Utc.with_ymd_and_hms(2026, 8, 7, 9, 0, 0).unwrap();
        let at = NaiveTime::from_hms_opt(8, 0, 0).unwrap();
        let next = DigestScheduler::next_run(now, at);
        assert_eq!(next, Utc.with_ymd_and_hms(2026, 8, 8, 8, 0, 0).unwrap());
    }

    #[test]
    fn next_run_rolls_over_at_the_exact_scheduled_instant() {
        let now = Utc.with_ymd_and_hms(2026, 8, 7, 8, 0, 0).unwrap();
        let at = NaiveTime::from_hms_opt(8, 0, 0).unwrap();
        let next = DigestScheduler::next_run(now, at);
        assert_eq!(next, Utc.with_ymd_and_hms(2026, 8, 8, 8, 0, 0).unwrap());
    }
}
