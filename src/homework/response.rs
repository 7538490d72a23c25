//! API 响应校验与单条作业的消息格式化

use super::status::HomeworkStatus;
use crate::error::{BotError, Result};
use serde_json::Value;

/// 校验响应结构并返回 `homeworks` 列表的副本
pub fn check_response(response: &Value) -> Result<Vec<Value>> {
    match response.get("homeworks") {
        Some(Value::Array(homeworks)) => Ok(homeworks.clone()),
        _ => Err(BotError::api_format("для всех работ")),
    }
}

/// 提取服务端时间，作为下一次查询的游标
pub fn current_date(response: &Value) -> Result<i64> {
    response
        .get("current_date")
        .and_then(Value::as_i64)
        .ok_or_else(|| BotError::api_format("для current_date"))
}

/// 把单条作业记录格式化为通知文本
///
/// 缺少 `homework_name` 或 `status` 时返回 `ApiFormat`，
/// 状态不在状态表中时返回 `Status`。
pub fn parse_status(homework: &Value) -> Result<String> {
    let name = homework.get("homework_name").and_then(Value::as_str);
    let code = homework.get("status").and_then(Value::as_str);

    let (name, code) = match (name, code) {
        (Some(name), Some(code)) => (name, code),
        _ => return Err(BotError::api_format("для конкретной работы")),
    };

    let status = HomeworkStatus::from_code(code).ok_or_else(|| BotError::Status {
        status: code.to_string(),
    })?;

    Ok(format!(
        "Изменился статус проверки работы \"{}\". {}",
        name,
        status.verdict()
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_check_response_returns_homeworks() {
        let response = json!({
            "homeworks": [{"homework_name": "hw1", "status": "approved"}],
            "current_date": 1000
        });
        let homeworks = check_response(&response).unwrap();
        assert_eq!(homeworks.len(), 1);
        assert_eq!(homeworks[0]["homework_name"], "hw1");
    }

    #[test]
    fn test_check_response_missing_key() {
        let err = check_response(&json!({"current_date": 1000})).unwrap_err();
        assert!(matches!(err, BotError::ApiFormat(_)));
    }

    #[test]
    fn test_check_response_wrong_type() {
        for bad in [json!({"homeworks": {}}), json!({"homeworks": "hw"}), json!([])] {
            let err = check_response(&bad).unwrap_err();
            assert_eq!(err.kind(), "APIFormatError");
        }
    }

    #[test]
    fn test_current_date() {
        assert_eq!(current_date(&json!({"current_date": 1000})).unwrap(), 1000);
        assert!(current_date(&json!({"current_date": "1000"})).is_err());
        assert!(current_date(&json!({})).is_err());
    }

    #[test]
    fn test_parse_status_known_codes() {
        for status in HomeworkStatus::ALL {
            let homework = json!({"homework_name": "project_x", "status": status.code()});
            let message = parse_status(&homework).unwrap();
            assert!(message.contains("\"project_x\""));
            assert!(message.ends_with(status.verdict()));
        }
    }

    #[test]
    fn test_parse_status_exact_format() {
        let homework = json!({"homework_name": "hw1", "status": "approved"});
        assert_eq!(
            parse_status(&homework).unwrap(),
            "Изменился статус проверки работы \"hw1\". Работа проверена: ревьюеру всё понравилось. Ура!"
        );
    }

    #[test]
    fn test_parse_status_unknown_code() {
        let homework = json!({"homework_name": "hw1", "status": "archived"});
        match parse_status(&homework).unwrap_err() {
            BotError::Status { status } => assert_eq!(status, "archived"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_parse_status_missing_keys() {
        for bad in [
            json!({"status": "approved"}),
            json!({"homework_name": "hw1"}),
            json!({"homework_name": 1, "status": "approved"}),
        ] {
            let err = parse_status(&bad).unwrap_err();
            assert!(matches!(err, BotError::ApiFormat(_)));
        }
    }
}
