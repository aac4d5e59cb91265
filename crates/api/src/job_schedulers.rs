use crate::reminder::send_reminders::SendRemindersUseCase;
use crate::shared::usecase::execute;
use actix_web::rt::time::{interval, sleep};
use chrono::{DateTime, Timelike, Utc};
use parkvakt_infra::ParkvaktContext;
use std::time::Duration;
use tracing::{error, info};

/// Seconds until the next occurrence of `sweep_hour_utc`. Being exactly on
/// the hour counts as the next occurrence, so the delay can be zero.
pub fn get_start_delay(now: &DateTime<Utc>, sweep_hour_utc: u32) -> u64 {
    let secs_of_day = now.num_seconds_from_midnight() as i64;
    let target = sweep_hour_utc as i64 * 3600;
    (target - secs_of_day).rem_euclid(24 * 3600) as u64
}

/// Runs the reminder sweep once per day at the configured UTC hour. The
/// sweep itself is idempotent per day, so it is also safe to trigger it
/// additionally over the cron route.
pub fn start_send_reminders_job(ctx: ParkvaktContext) {
    actix_web::rt::spawn(async move {
        let now = ctx.sys.get_utc_now();
        let secs_to_first_run = get_start_delay(&now, ctx.config.sweep_hour_utc);
        sleep(Duration::from_secs(secs_to_first_run)).await;

        let mut daily_interval = interval(Duration::from_secs(60 * 60 * 24));
        loop {
            daily_interval.tick().await;

            let usecase = SendRemindersUseCase {};
            match execute(usecase, &ctx).await {
                Ok(report) => {
                    info!("Reminder sweep done. Sent {} reminders", report.sent);
                    for e in &report.errors {
                        error!("Reminder sweep error: {}", e);
                    }
                }
                Err(e) => error!("Reminder sweep did not run: {:?}", e),
            }
        }
    });
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn start_delay_works() {
        let at = |h: u32, m: u32, s: u32| Utc.with_ymd_and_hms(2021, 2, 21, h, m, s).unwrap();

        assert_eq!(get_start_delay(&at(4, 0, 0), 5), 3600);
        assert_eq!(get_start_delay(&at(5, 0, 0), 5), 0);
        assert_eq!(get_start_delay(&at(5, 0, 1), 5), 24 * 3600 - 1);
        assert_eq!(get_start_delay(&at(6, 0, 0), 5), 23 * 3600);
        assert_eq!(get_start_delay(&at(23, 59, 59), 0), 1);
        assert_eq!(get_start_delay(&at(0, 0, 0), 0), 0);
    }
}
