use serde::Serialize;

use crate::domain::services::lifecycle::{BulkActionReport, BulkFailure};

#[derive(Serialize)]
pub struct BulkActionResponse {
    pub succeeded_count: usize,
    pub failed_count: usize,
    pub succeeded: Vec<String>,
    pub failed: Vec<BulkFailure>,
}

impl From<BulkActionReport> for BulkActionResponse {
    fn from(report: BulkActionReport) -> Self {
        Self {
            succeeded_count: report.succeeded.len(),
            failed_count: report.failed.len(),
            succeeded: report.succeeded,
            failed: report.failed,
        }
    }
}
