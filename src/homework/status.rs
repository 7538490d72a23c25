//! 作业审核状态表

use serde::Serialize;
use std::fmt;

/// 已知的审核状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HomeworkStatus {
    /// 审核通过
    Approved,
    /// 审核中
    Reviewing,
    /// 有修改意见
    Rejected,
}

impl HomeworkStatus {
    /// 全部已知状态
    pub const ALL: [HomeworkStatus; 3] = [
        HomeworkStatus::Approved,
        HomeworkStatus::Reviewing,
        HomeworkStatus::Rejected,
    ];

    /// 根据服务端状态码查找；未知状态返回 None，绝不猜测
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "approved" => Some(HomeworkStatus::Approved),
            "reviewing" => Some(HomeworkStatus::Reviewing),
            "rejected" => Some(HomeworkStatus::Rejected),
            _ => None,
        }
    }

    /// 服务端状态码
    pub fn code(&self) -> &'static str {
        match self {
            HomeworkStatus::Approved => "approved",
            HomeworkStatus::Reviewing => "reviewing",
            HomeworkStatus::Rejected => "rejected",
        }
    }

    /// 面向用户的结论文本
    pub fn verdict(&self) -> &'static str {
        match self {
            HomeworkStatus::Approved => "Работа проверена: ревьюеру всё понравилось. Ура!",
            HomeworkStatus::Reviewing => "Работа взята на проверку ревьюером.",
            HomeworkStatus::Rejected => "Работа проверена: у ревьюера есть замечания.",
        }
    }
}

impl fmt::Display for HomeworkStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
