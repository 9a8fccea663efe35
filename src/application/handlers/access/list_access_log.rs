//! ListAccessLogHandler - Query handler for the entrance log.

use std::sync::Arc;

use crate::domain::access::{AccessError, AccessLogFilter, AccessLogPage};
use crate::ports::AccessLogRepository;

pub struct ListAccessLogHandler {
    access_log: Arc<dyn AccessLogRepository>,
}

impl ListAccessLogHandler {
    pub fn new(access_log: Arc<dyn AccessLogRepository>) -> Self {
        Self { access_log }
    }

    pub async fn handle(&self, filter: AccessLogFilter) -> Result<AccessLogPage, AccessError> {
        Ok(self.access_log.list(&filter).await?)
    }
}
