use serde::Deserialize;

use crate::errors::{Result, ScheduleError};
use crate::utils::validate::validate_email;

// 创建学校请求
#[derive(Debug, Clone, Deserialize)]
pub struct CreateSchoolRequest {
    pub name: String,
    pub address: String,
    pub email: String,
    pub logo: Option<String>,
    pub instagram: Option<String>,
}

impl CreateSchoolRequest {
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(ScheduleError::validation("School name must not be empty"));
        }
        if self.address.trim().is_empty() {
            return Err(ScheduleError::validation("School address must not be empty"));
        }
        validate_email(&self.email).map_err(ScheduleError::validation)
    }
}
