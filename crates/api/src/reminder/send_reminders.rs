use crate::error::ParkvaktError;
use crate::shared::auth::protect_cron_route;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpRequest, HttpResponse};
use parkvakt_api_structs::send_reminders::*;
use parkvakt_domain::{days_until, ExpiryType, ReminderLog, SweepReport};
use parkvakt_infra::ParkvaktContext;

pub async fn send_reminders_controller(
    http_req: HttpRequest,
    ctx: web::Data<ParkvaktContext>,
) -> Result<HttpResponse, ParkvaktError> {
    protect_cron_route(&http_req, &ctx)?;

    let usecase = SendRemindersUseCase {};

    execute(usecase, &ctx)
        .await
        .map(|report| HttpResponse::Ok().json(APIResponse::new(report)))
        .map_err(ParkvaktError::from)
}

/// One reminder sweep over every vehicle.
///
/// For each vehicle and each of its three expiry dates the days remaining
/// are computed once and compared against every configured threshold. A
/// threshold matches on the exact day only, which is what turns a reminder
/// into a one-time point event instead of a daily nag. The reminder log is
/// consulted before sending and written after a successful send, so a sweep
/// can run any number of times per day without re-sending, and a failed
/// send stays eligible for the next sweep.
#[derive(Debug)]
pub struct SendRemindersUseCase {}

#[derive(Debug)]
pub enum UseCaseError {
    StorageError,
}

impl From<UseCaseError> for ParkvaktError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for SendRemindersUseCase {
    type Response = SweepReport;

    type Error = UseCaseError;

    const NAME: &'static str = "SendReminders";

    async fn execute(&mut self, ctx: &ParkvaktContext) -> Result<Self::Response, Self::Error> {
        let now = ctx.sys.get_utc_now();
        let vehicles = ctx
            .repos
            .vehicles
            .find_all()
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        let mut report = SweepReport::default();

        for vehicle in vehicles {
            let owner = match ctx.repos.users.find(&vehicle.user_id).await {
                Some(owner) => owner,
                None => {
                    report.errors.push(format!(
                        "Owner: {} of vehicle: {} was not found",
                        vehicle.user_id, vehicle.plate
                    ));
                    continue;
                }
            };

            for expiry_type in ExpiryType::ALL {
                let days_remaining = days_until(vehicle.expiry_date(expiry_type), now);

                for &threshold in &ctx.config.reminder_days {
                    if days_remaining != threshold {
                        continue;
                    }

                    if ctx
                        .repos
                        .reminder_logs
                        .exists(&vehicle.id, expiry_type, threshold)
                        .await
                    {
                        // Already sent this reminder
                        continue;
                    }

                    if let Err(e) = ctx
                        .services
                        .notifier
                        .send_reminder(&owner, &vehicle, expiry_type, days_remaining)
                        .await
                    {
                        report.errors.push(format!(
                            "Failed to send {} reminder for vehicle: {}. Error: {}",
                            expiry_type, vehicle.plate, e
                        ));
                        continue;
                    }

                    let reminder_log = ReminderLog {
                        id: Default::default(),
                        user_id: owner.id.clone(),
                        vehicle_id: vehicle.id.clone(),
                        expiry_type,
                        threshold,
                        sent_at: ctx.sys.get_timestamp_millis(),
                    };
                    match ctx.repos.reminder_logs.insert(&reminder_log).await {
                        Ok(_) => report.sent += 1,
                        Err(e) => {
                            // The notification went out but the ledger write
                            // did not. Leaving the key unrecorded keeps the
                            // reminder eligible for the next sweep: a possible
                            // duplicate over a silently lost reminder.
                            report.errors.push(format!(
                                "Failed to log sent {} reminder for vehicle: {}. Error: {}",
                                expiry_type, vehicle.plate, e
                            ));
                        }
                    }
                }
            }
        }

        Ok(report)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use parkvakt_domain::{User, Vehicle};
    use parkvakt_infra::{ISys, InMemoryNotifier};
    use std::sync::Arc;

    pub struct StaticTimeSys {
        now: DateTime<Utc>,
    }
    impl ISys for StaticTimeSys {
        fn get_timestamp_millis(&self) -> i64 {
            self.now.timestamp_millis()
        }

        fn get_utc_now(&self) -> DateTime<Utc> {
            self.now
        }
    }

    struct TestContext {
        ctx: ParkvaktContext,
        notifier: Arc<InMemoryNotifier>,
        user: User,
    }

    async fn setup() -> TestContext {
        let mut ctx = ParkvaktContext::create_inmemory();
        ctx.sys = Arc::new(StaticTimeSys {
            now: Utc.with_ymd_and_hms(2021, 2, 21, 12, 30, 0).unwrap(),
        });
        ctx.config.reminder_days = vec![30, 7, 1, 0];

        let notifier = Arc::new(InMemoryNotifier::new());
        ctx.services.notifier = notifier.clone();

        let user = User::new("ana@example.com");
        ctx.repos.users.insert(&user).await.unwrap();

        TestContext {
            ctx,
            notifier,
            user,
        }
    }

    async fn insert_vehicle(
        test_ctx: &TestContext,
        plate: &str,
        registration: i64,
        insurance: i64,
        inspection: i64,
    ) -> Vehicle {
        let today = test_ctx.ctx.sys.get_utc_now().date_naive();
        let vehicle = Vehicle {
            id: Default::default(),
            user_id: test_ctx.user.id.clone(),
            plate: plate.into(),
            registration_expiry: today + Duration::days(registration),
            insurance_expiry: today + Duration::days(insurance),
            inspection_expiry: today + Duration::days(inspection),
            created: 0,
            updated: 0,
        };
        test_ctx.ctx.repos.vehicles.insert(&vehicle).await.unwrap();
        vehicle
    }

    #[tokio::test]
    async fn sends_one_reminder_for_the_matching_threshold_only() {
        let test_ctx = setup().await;
        let vehicle = insert_vehicle(&test_ctx, "SK 1234 AB", 1, 45, 120).await;

        let report = execute(SendRemindersUseCase {}, &test_ctx.ctx).await.unwrap();
        assert_eq!(report.sent, 1);
        assert!(report.errors.is_empty());

        let sent = test_ctx.notifier.sent.lock().unwrap().clone();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].expiry_type, ExpiryType::Registration);
        assert_eq!(sent[0].days_remaining, 1);
        assert_eq!(sent[0].recipient, "ana@example.com");

        let logs = test_ctx
            .ctx
            .repos
            .reminder_logs
            .find_by_vehicle(&vehicle.id)
            .await;
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].expiry_type, ExpiryType::Registration);
        assert_eq!(logs[0].threshold, 1);
    }

    #[tokio::test]
    async fn a_second_sweep_the_same_day_sends_nothing() {
        let test_ctx = setup().await;
        insert_vehicle(&test_ctx, "SK 1234 AB", 1, 45, 120).await;

        let report = execute(SendRemindersUseCase {}, &test_ctx.ctx).await.unwrap();
        assert_eq!(report.sent, 1);

        let report = execute(SendRemindersUseCase {}, &test_ctx.ctx).await.unwrap();
        assert_eq!(report.sent, 0);
        assert!(report.errors.is_empty());
        assert_eq!(test_ctx.notifier.sent_count(), 1);
    }

    #[tokio::test]
    async fn days_without_an_exact_threshold_match_send_nothing() {
        let test_ctx = setup().await;
        // 15 is between the 30 and 7 thresholds, 2 between 7 and 1
        insert_vehicle(&test_ctx, "SK 1234 AB", 15, 2, 45).await;

        let report = execute(SendRemindersUseCase {}, &test_ctx.ctx).await.unwrap();
        assert_eq!(report.sent, 0);
        assert!(report.errors.is_empty());
        assert_eq!(test_ctx.notifier.sent_count(), 0);
    }

    #[tokio::test]
    async fn two_dates_can_owe_reminders_in_the_same_sweep() {
        let test_ctx = setup().await;
        // Registration and insurance both sit exactly on a threshold
        insert_vehicle(&test_ctx, "SK 1234 AB", 7, 30, 120).await;

        let report = execute(SendRemindersUseCase {}, &test_ctx.ctx).await.unwrap();
        assert_eq!(report.sent, 2);

        let sent = test_ctx.notifier.sent.lock().unwrap().clone();
        let types = sent.iter().map(|s| s.expiry_type).collect::<Vec<_>>();
        assert!(types.contains(&ExpiryType::Registration));
        assert!(types.contains(&ExpiryType::Insurance));
    }

    #[tokio::test]
    async fn an_expired_date_matches_the_zero_threshold() {
        let test_ctx = setup().await;
        insert_vehicle(&test_ctx, "SK 1234 AB", 0, 45, 120).await;

        let report = execute(SendRemindersUseCase {}, &test_ctx.ctx).await.unwrap();
        assert_eq!(report.sent, 1);

        let sent = test_ctx.notifier.sent.lock().unwrap().clone();
        assert_eq!(sent[0].days_remaining, 0);
    }

    #[tokio::test]
    async fn a_failed_send_is_reported_and_stays_eligible() {
        let test_ctx = setup().await;
        insert_vehicle(&test_ctx, "SK 1234 AB", 1, 45, 120).await;
        let failing = insert_vehicle(&test_ctx, "KU 5678 CD", 45, 7, 120).await;
        insert_vehicle(&test_ctx, "BT 9012 EF", 45, 120, 30).await;
        test_ctx.notifier.fail_plate("KU 5678 CD");

        let report = execute(SendRemindersUseCase {}, &test_ctx.ctx).await.unwrap();
        assert_eq!(report.sent, 2);
        assert_eq!(report.errors.len(), 1);
        assert!(report.errors[0].contains("KU 5678 CD"));

        // No ledger entry for the failed send, so it is retried by the
        // next sweep of the same day
        assert!(test_ctx
            .ctx
            .repos
            .reminder_logs
            .find_by_vehicle(&failing.id)
            .await
            .is_empty());

        let report = execute(SendRemindersUseCase {}, &test_ctx.ctx).await.unwrap();
        assert_eq!(report.sent, 0);
        assert_eq!(report.errors.len(), 1);
    }

    #[tokio::test]
    async fn a_vehicle_without_an_owner_is_reported_and_skipped() {
        let test_ctx = setup().await;
        let today = test_ctx.ctx.sys.get_utc_now().date_naive();
        let orphan = Vehicle {
            id: Default::default(),
            user_id: Default::default(),
            plate: "OH 3456 GH".into(),
            registration_expiry: today + Duration::days(1),
            insurance_expiry: today + Duration::days(45),
            inspection_expiry: today + Duration::days(120),
            created: 0,
            updated: 0,
        };
        test_ctx.ctx.repos.vehicles.insert(&orphan).await.unwrap();
        insert_vehicle(&test_ctx, "SK 1234 AB", 1, 45, 120).await;

        let report = execute(SendRemindersUseCase {}, &test_ctx.ctx).await.unwrap();
        assert_eq!(report.sent, 1);
        assert_eq!(report.errors.len(), 1);
        assert!(report.errors[0].contains("OH 3456 GH"));
    }

    #[tokio::test]
    async fn the_next_day_fires_the_next_threshold() {
        let mut test_ctx = setup().await;
        insert_vehicle(&test_ctx, "SK 1234 AB", 1, 45, 120).await;

        let report = execute(SendRemindersUseCase {}, &test_ctx.ctx).await.unwrap();
        assert_eq!(report.sent, 1);

        // One day later the same registration date is 0 days away
        test_ctx.ctx.sys = Arc::new(StaticTimeSys {
            now: Utc.with_ymd_and_hms(2021, 2, 22, 12, 30, 0).unwrap(),
        });
        let report = execute(SendRemindersUseCase {}, &test_ctx.ctx).await.unwrap();
        assert_eq!(report.sent, 1);

        let sent = test_ctx.notifier.sent.lock().unwrap().clone();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[1].days_remaining, 0);

        // And running the later day again is still idempotent
        let report = execute(SendRemindersUseCase {}, &test_ctx.ctx).await.unwrap();
        assert_eq!(report.sent, 0);
    }
}
