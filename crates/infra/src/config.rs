use parkvakt_utils::create_random_secret;
use tracing::{info, warn};

/// Day-counts at which a one-time reminder is due for every expiry date.
/// Evaluated as an unordered set by the reminder sweep.
pub const DEFAULT_REMINDER_DAYS: [i64; 4] = [30, 7, 1, 0];

#[derive(Debug, Clone)]
pub struct Config {
    /// Port for the application to run on
    pub port: usize,
    /// Shared secret that the external cron trigger must present as a
    /// bearer token when invoking the reminder sweep route
    pub cron_secret: String,
    /// Day thresholds at which reminders fire, exact-day matched
    pub reminder_days: Vec<i64>,
    /// UTC hour of day at which the in-process sweep job runs
    pub sweep_hour_utc: u32,
    /// API key for the outbound email provider. When missing, reminder
    /// sends fail and end up in the sweep report errors
    pub email_api_key: Option<String>,
    /// From-address used for reminder emails
    pub email_sender: String,
}

impl Config {
    pub fn new() -> Self {
        let cron_secret = match std::env::var("CRON_SECRET") {
            Ok(secret) => secret,
            Err(_) => {
                info!("Did not find CRON_SECRET environment variable. Going to create one.");
                let secret = create_random_secret(16);
                info!(
                    "Secret code for triggering the reminder sweep was generated and set to: {}",
                    secret
                );
                secret
            }
        };

        let default_port = "5000";
        let port = std::env::var("PORT").unwrap_or_else(|_| default_port.into());
        let port = match port.parse::<usize>() {
            Ok(port) => port,
            Err(_) => {
                warn!(
                    "The given PORT: {} is not valid, falling back to the default port: {}.",
                    port, default_port
                );
                default_port.parse::<usize>().unwrap()
            }
        };

        let reminder_days = match std::env::var("REMINDER_DAYS") {
            Ok(value) => match parse_reminder_days(&value) {
                Some(days) => days,
                None => {
                    warn!(
                        "The given REMINDER_DAYS: {} is not a valid comma separated list of day counts, falling back to the defaults: {:?}.",
                        value, DEFAULT_REMINDER_DAYS
                    );
                    DEFAULT_REMINDER_DAYS.to_vec()
                }
            },
            Err(_) => DEFAULT_REMINDER_DAYS.to_vec(),
        };

        let default_sweep_hour = 5;
        let sweep_hour_utc = match std::env::var("SWEEP_HOUR_UTC") {
            Ok(value) => match value.parse::<u32>() {
                Ok(hour) if hour < 24 => hour,
                _ => {
                    warn!(
                        "The given SWEEP_HOUR_UTC: {} is not a valid hour, falling back to the default: {}.",
                        value, default_sweep_hour
                    );
                    default_sweep_hour
                }
            },
            Err(_) => default_sweep_hour,
        };

        let email_api_key = match std::env::var("EMAIL_API_KEY") {
            Ok(key) => Some(key),
            Err(_) => {
                warn!("Did not find EMAIL_API_KEY environment variable. Reminder emails cannot be delivered.");
                None
            }
        };

        let email_sender = std::env::var("EMAIL_SENDER")
            .unwrap_or_else(|_| "Parkvakt <notifications@parkvakt.app>".into());

        Self {
            port,
            cron_secret,
            reminder_days,
            sweep_hour_utc,
            email_api_key,
            email_sender,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

/// Parses a comma separated list of day counts, e.g. "30,7,1,0".
/// Duplicates are dropped; an empty or malformed list is rejected.
fn parse_reminder_days(value: &str) -> Option<Vec<i64>> {
    let mut days = Vec::new();
    for part in value.split(',') {
        let day = part.trim().parse::<i64>().ok()?;
        if day < 0 {
            return None;
        }
        if !days.contains(&day) {
            days.push(day);
        }
    }
    if days.is_empty() {
        return None;
    }
    Some(days)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn it_parses_valid_reminder_days() {
        assert_eq!(parse_reminder_days("30,7,1,0"), Some(vec![30, 7, 1, 0]));
        assert_eq!(parse_reminder_days(" 14 , 3 "), Some(vec![14, 3]));
        assert_eq!(parse_reminder_days("7,7,7"), Some(vec![7]));
        assert_eq!(parse_reminder_days("0"), Some(vec![0]));
    }

    #[test]
    fn it_rejects_invalid_reminder_days() {
        assert_eq!(parse_reminder_days(""), None);
        assert_eq!(parse_reminder_days("30,x"), None);
        assert_eq!(parse_reminder_days("30,-1"), None);
        assert_eq!(parse_reminder_days("30;7"), None);
    }
}
