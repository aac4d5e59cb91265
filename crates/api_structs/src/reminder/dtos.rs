use parkvakt_domain::SweepReport;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SweepReportDTO {
    pub sent_count: usize,
    pub errors: Vec<String>,
}

impl SweepReportDTO {
    pub fn new(report: SweepReport) -> Self {
        Self {
            sent_count: report.sent,
            errors: report.errors,
        }
    }
}
