// ==========================================
// 游泳比赛选手分配系统 - 成绩时间工具
// ==========================================
// 职责: 成绩字符串 <-> 秒数 的解析与格式化
// 格式: SS.ss / MM:SS.ss / HH:MM:SS.ss (百分秒两位,不足右补零)
// ==========================================

use serde::{Deserialize, Deserializer};

/// 解析成绩字符串为秒数（保留两位小数）
///
/// # 参数
/// - `raw`: 成绩字符串, 如 "35.8" / "1:05.30" / "00:01:05.3"
///
/// # 返回
/// - Some(seconds): 解析成功
/// - None: 空串或格式非法
pub fn parse_seconds(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    let parts: Vec<&str> = trimmed.split(':').collect();
    let (hours, minutes, seconds_part) = match parts.as_slice() {
        [s] => (0u64, 0u64, *s),
        [m, s] => (0, m.trim().parse().ok()?, *s),
        [h, m, s] => (h.trim().parse().ok()?, m.trim().parse().ok()?, *s),
        _ => return None,
    };

    let (whole, hundredths) = match seconds_part.trim().split_once('.') {
        Some((whole, frac)) => {
            // 百分秒: "3" → 30, "30" → 30, "305" → 30
            let mut digits: String = frac.chars().take(2).collect();
            while digits.len() < 2 {
                digits.push('0');
            }
            (whole.parse::<u64>().ok()?, digits.parse::<u64>().ok()?)
        }
        None => (seconds_part.trim().parse::<u64>().ok()?, 0),
    };

    let whole_seconds = hours
        .checked_mul(3600)?
        .checked_add(minutes.checked_mul(60)?)?
        .checked_add(whole)?;
    let total = whole_seconds as f64 + hundredths as f64 / 100.0;
    Some(round_to(total, 2))
}

/// 格式化接力总成绩 MM:SS.ss
pub fn format_total_time(seconds: f64) -> String {
    let minutes = (seconds / 60.0).floor();
    let remainder = seconds - minutes * 60.0;
    format!("{:02}:{:05.2}", minutes as u64, remainder)
}

/// 格式化单棒/个人成绩, 如 "60.00s"
pub fn format_leg_time(seconds: f64) -> String {
    format!("{:.2}s", seconds)
}

/// 舍入到指定小数位 (恰为一半时取偶, 如 -0.0625 → -0.062)
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    let scaled = value * factor;
    let mut rounded = scaled.round();
    if (scaled - rounded).abs() == 0.5 {
        rounded = 2.0 * (scaled / 2.0).round();
    }
    rounded / factor
}

/// serde 辅助: 成绩字段既可为数字(秒)也可为字符串
pub fn deserialize_seconds<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawTime {
        Seconds(f64),
        Text(String),
    }

    match RawTime::deserialize(deserializer)? {
        RawTime::Seconds(value) => Ok(value),
        RawTime::Text(text) => parse_seconds(&text)
            .ok_or_else(|| serde::de::Error::custom(format!("成绩格式非法: {}", text))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_seconds() {
        assert_eq!(parse_seconds("35.8"), Some(35.80));
        assert_eq!(parse_seconds("35"), Some(35.0));
    }

    #[test]
    fn test_parse_minutes_and_hours() {
        assert_eq!(parse_seconds("1:05.30"), Some(65.30));
        assert_eq!(parse_seconds("00:01:05.3"), Some(65.30));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(parse_seconds(""), None);
        assert_eq!(parse_seconds("abc"), None);
        assert_eq!(parse_seconds("1:2:3:4"), None);
    }

    #[test]
    fn test_parse_rejects_overflowing_fields() {
        assert_eq!(parse_seconds("5124095576030432:00:00"), None);
        assert_eq!(parse_seconds("18446744073709551615:00.00"), None);
    }

    #[test]
    fn test_round_half_to_even() {
        assert_eq!(round_to(-0.0625, 3), -0.062);
        assert_eq!(round_to(0.0625, 3), 0.062);
        assert_eq!(round_to(-0.0628125, 3), -0.063);
        assert_eq!(round_to(65.3, 2), 65.3);
    }

    #[test]
    fn test_format_total_time() {
        assert_eq!(format_total_time(125.5), "02:05.50");
        assert_eq!(format_total_time(59.99), "00:59.99");
    }

    #[test]
    fn test_format_leg_time() {
        assert_eq!(format_leg_time(60.0), "60.00s");
    }
}
