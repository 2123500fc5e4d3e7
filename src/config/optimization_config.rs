// ==========================================
// 游泳比赛选手分配系统 - 优化配置
// ==========================================
// 职责: 单次优化运行的全部可调参数 (JSON, camelCase, 全部有默认值)
// ==========================================

use crate::config::competition::CompetitionType;
use crate::domain::types::Course;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// 配置键默认值
pub mod defaults {
    pub const MAX_INDIVIDUAL_EVENTS: u32 = 2;
    pub const MEDLEY_POOL_WIDTH: usize = 10;
    pub const MEDLEY_COMBINATION_CAP: usize = 1000;
    pub const ROUND_BEFORE_SORT: bool = true;
}

// ==========================================
// ConfigError - 配置错误
// ==========================================
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件读取失败 ({path}): {source}")]
    FileRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("配置解析失败: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("配置值非法 (key: {key}): {message}")]
    InvalidValue { key: String, message: String },
}

// ==========================================
// OptimizationConfig - 优化配置
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OptimizationConfig {
    /// 每名运动员最多个人项目数
    pub max_individual_events: u32,

    /// 比赛类型 (决定缺省项目目录)
    pub competition_type: CompetitionType,

    /// 混合泳接力: 每棒候选池宽度 (按成绩取前 N)
    pub medley_pool_width: usize,

    /// 混合泳接力: 最多检查的组合数
    pub medley_combination_cap: usize,

    /// 排序前是否先将 diff 取 2 位、index 取 3 位小数
    pub round_before_sort: bool,

    /// 资格基准限定泳池长度 (None = 不限定, 取表中首条匹配)
    pub baseline_course: Option<Course>,

    /// 年龄基准日 (记录带出生日期时按此日重算年龄)
    pub age_reference_date: Option<NaiveDate>,
}

impl Default for OptimizationConfig {
    fn default() -> Self {
        Self {
            max_individual_events: defaults::MAX_INDIVIDUAL_EVENTS,
            competition_type: CompetitionType::default(),
            medley_pool_width: defaults::MEDLEY_POOL_WIDTH,
            medley_combination_cap: defaults::MEDLEY_COMBINATION_CAP,
            round_before_sort: defaults::ROUND_BEFORE_SORT,
            baseline_course: None,
            age_reference_date: None,
        }
    }
}

impl OptimizationConfig {
    /// 从 JSON 文件加载配置
    ///
    /// # 参数
    /// - `path`: 配置文件路径
    ///
    /// # 返回
    /// - Ok(config): 加载并校验成功
    /// - Err(ConfigError): 读取/解析/校验失败
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::FileRead {
            path: path.display().to_string(),
            source,
        })?;

        Self::from_json(&raw)
    }

    /// 从 JSON 字符串加载配置
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: OptimizationConfig = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// 使用比赛类型预设的个人项目上限
    pub fn for_competition(competition_type: CompetitionType) -> Self {
        Self {
            max_individual_events: competition_type
                .preset_max_individual_events()
                .unwrap_or(defaults::MAX_INDIVIDUAL_EVENTS),
            competition_type,
            ..Self::default()
        }
    }

    /// 校验配置
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.medley_pool_width == 0 {
            return Err(ConfigError::InvalidValue {
                key: "medleyPoolWidth".to_string(),
                message: "必须大于 0".to_string(),
            });
        }
        if self.medley_combination_cap == 0 {
            return Err(ConfigError::InvalidValue {
                key: "medleyCombinationCap".to_string(),
                message: "必须大于 0".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let config = OptimizationConfig::default();
        assert_eq!(config.max_individual_events, 2);
        assert_eq!(config.medley_pool_width, 10);
        assert_eq!(config.medley_combination_cap, 1000);
        assert!(config.round_before_sort);
        assert_eq!(config.competition_type, CompetitionType::ArenaLeague);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config =
            OptimizationConfig::from_json(r#"{"maxIndividualEvents": 3, "competitionType": "county_relays"}"#)
                .unwrap();
        assert_eq!(config.max_individual_events, 3);
        assert_eq!(config.competition_type, CompetitionType::CountyRelays);
        assert_eq!(config.medley_pool_width, 10);
    }

    #[test]
    fn test_validate_rejects_zero_pool_width() {
        let err = OptimizationConfig::from_json(r#"{"medleyPoolWidth": 0}"#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn test_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, r#"{{"maxIndividualEvents": 1, "baselineCourse": "SC"}}"#).unwrap();

        let config = OptimizationConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.max_individual_events, 1);
        assert_eq!(config.baseline_course, Some(Course::Sc));
    }

    #[test]
    fn test_from_missing_file() {
        let err = OptimizationConfig::from_file("/nonexistent/optimization_config.json").unwrap_err();
        assert!(matches!(err, ConfigError::FileRead { .. }));
    }

    #[test]
    fn test_for_competition_uses_preset_cap() {
        let config = OptimizationConfig::for_competition(CompetitionType::CountyRelays);
        assert_eq!(config.max_individual_events, 0);
    }
}
