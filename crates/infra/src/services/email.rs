use super::INotifier;
use crate::Config;
use parkvakt_domain::{ExpiryType, Language, User, Vehicle};
use serde::Serialize;
use std::time::Duration;

const EMAIL_API_URL: &str = "https://api.resend.com/emails";

/// A hung provider call must not stall the whole sweep, so every request
/// carries this timeout and a timed-out send surfaces as a normal failure.
const SEND_TIMEOUT: Duration = Duration::from_secs(10);

/// Sends reminder emails through the HTTP API of the email provider
pub struct EmailNotifier {
    client: reqwest::Client,
    api_key: Option<String>,
    sender: String,
}

impl EmailNotifier {
    pub fn new(config: &Config) -> Self {
        let client = reqwest::Client::builder()
            .timeout(SEND_TIMEOUT)
            .build()
            .expect("To create http client");
        Self {
            client,
            api_key: config.email_api_key.clone(),
            sender: config.email_sender.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    html: &'a str,
}

#[async_trait::async_trait]
impl INotifier for EmailNotifier {
    async fn send_reminder(
        &self,
        recipient: &User,
        vehicle: &Vehicle,
        expiry_type: ExpiryType,
        days_remaining: i64,
    ) -> anyhow::Result<()> {
        let api_key = self
            .api_key
            .as_ref()
            .ok_or_else(|| anyhow::anyhow!("EMAIL_API_KEY is not configured"))?;

        let subject = reminder_subject(recipient.language, vehicle, expiry_type, days_remaining);
        let html = reminder_body(recipient.language, vehicle, expiry_type, days_remaining);

        let res = self
            .client
            .post(EMAIL_API_URL)
            .bearer_auth(api_key)
            .json(&SendEmailRequest {
                from: &self.sender,
                to: &recipient.email,
                subject: &subject,
                html: &html,
            })
            .send()
            .await?;

        if !res.status().is_success() {
            anyhow::bail!("Email provider responded with status: {}", res.status());
        }
        Ok(())
    }
}

fn document_label(language: Language, expiry_type: ExpiryType) -> &'static str {
    match language {
        Language::Mk => match expiry_type {
            ExpiryType::Registration => "регистрацијата",
            ExpiryType::Insurance => "осигурувањето",
            ExpiryType::Inspection => "техничкиот преглед",
        },
        Language::En => match expiry_type {
            ExpiryType::Registration => "the registration",
            ExpiryType::Insurance => "the insurance",
            ExpiryType::Inspection => "the inspection",
        },
    }
}

fn urgency_label(language: Language, days_remaining: i64) -> String {
    match language {
        Language::Mk => match days_remaining {
            0 => "истекува денес".into(),
            1 => "истекува утре".into(),
            n => format!("истекува за {} дена", n),
        },
        Language::En => match days_remaining {
            0 => "expires today".into(),
            1 => "expires tomorrow".into(),
            n => format!("expires in {} days", n),
        },
    }
}

fn reminder_subject(
    language: Language,
    vehicle: &Vehicle,
    expiry_type: ExpiryType,
    days_remaining: i64,
) -> String {
    format!(
        "{}: {} {}",
        vehicle.plate,
        document_label(language, expiry_type),
        urgency_label(language, days_remaining)
    )
}

fn reminder_body(
    language: Language,
    vehicle: &Vehicle,
    expiry_type: ExpiryType,
    days_remaining: i64,
) -> String {
    let expiry_date = vehicle.expiry_date(expiry_type).format("%d.%m.%Y");
    let line = format!(
        "{} {} ({})",
        document_label(language, expiry_type),
        urgency_label(language, days_remaining),
        expiry_date
    );
    format!(
        "<html><body><h2>{}</h2><p>{}</p></body></html>",
        vehicle.plate, line
    )
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::NaiveDate;

    fn vehicle_factory() -> Vehicle {
        Vehicle {
            id: Default::default(),
            user_id: Default::default(),
            plate: "SK 1234 AB".into(),
            registration_expiry: NaiveDate::from_ymd_opt(2021, 3, 1).unwrap(),
            insurance_expiry: NaiveDate::from_ymd_opt(2021, 4, 1).unwrap(),
            inspection_expiry: NaiveDate::from_ymd_opt(2021, 5, 1).unwrap(),
            created: 0,
            updated: 0,
        }
    }

    #[test]
    fn subject_mentions_plate_and_urgency() {
        let vehicle = vehicle_factory();

        let subject = reminder_subject(Language::En, &vehicle, ExpiryType::Registration, 7);
        assert_eq!(subject, "SK 1234 AB: the registration expires in 7 days");

        let subject = reminder_subject(Language::En, &vehicle, ExpiryType::Insurance, 0);
        assert_eq!(subject, "SK 1234 AB: the insurance expires today");

        let subject = reminder_subject(Language::Mk, &vehicle, ExpiryType::Inspection, 1);
        assert_eq!(subject, "SK 1234 AB: техничкиот преглед истекува утре");
    }

    #[test]
    fn body_contains_the_expiry_date() {
        let vehicle = vehicle_factory();
        let body = reminder_body(Language::En, &vehicle, ExpiryType::Registration, 1);
        assert!(body.contains("01.03.2021"));
        assert!(body.contains("SK 1234 AB"));
    }
}
