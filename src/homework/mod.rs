//! 作业状态 - 状态表、响应校验与消息格式化

pub mod response;
pub mod status;

pub use response::{check_response, current_date, parse_status};
pub use status::HomeworkStatus;
