use crate::dtos::SweepReportDTO;
use parkvakt_domain::SweepReport;
use serde::{Deserialize, Serialize};

pub mod send_reminders {
    use super::*;

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub report: SweepReportDTO,
    }

    impl APIResponse {
        pub fn new(report: SweepReport) -> Self {
            Self {
                report: SweepReportDTO::new(report),
            }
        }
    }
}
