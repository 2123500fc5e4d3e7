// ==========================================
// 游泳比赛选手分配系统 - 优化 API
// ==========================================
// 职责: 请求 → 领域输入 → 引擎 → 输出文档
// 红线: 引擎致命错误输出显式错误文档 (统计归零), 不输出部分结果
// ==========================================

use crate::api::dto::OptimizeRequest;
use crate::api::error::{ApiError, ApiResult};
use crate::config::{CompetitionType, OptimizationConfig};
use crate::domain::athlete::Roster;
use crate::domain::qualifying::QualifyingTimeTable;
use crate::domain::result::OptimizationResult;
use crate::engine::{GalaOptimizer, OptimizationInput};
use tracing::{info, instrument, warn};

// ==========================================
// OptimizeApi - 优化 API
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct OptimizeApi {
    /// 覆盖请求内配置 (CLI --config)
    config_override: Option<OptimizationConfig>,
}

impl OptimizeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: OptimizationConfig) -> Self {
        Self {
            config_override: Some(config),
        }
    }

    /// 请求 → (配置, 引擎输入)
    ///
    /// # 规则
    /// - 未提供项目目录时使用比赛类型预设目录
    /// - custom 类型必须显式提供项目目录
    pub fn prepare(&self, request: OptimizeRequest) -> ApiResult<(OptimizationConfig, OptimizationInput)> {
        let config = self
            .config_override
            .clone()
            .unwrap_or(request.config);
        config.validate()?;

        let catalog = match request.events {
            Some(events) => events,
            None if config.competition_type == CompetitionType::Custom => {
                return Err(ApiError::InvalidInput(
                    "custom 比赛类型必须提供项目目录 (events)".to_string(),
                ));
            }
            None => {
                info!(competition_type = %config.competition_type, "未提供项目目录, 使用预设目录");
                config.competition_type.default_catalog()
            }
        };

        let input = OptimizationInput {
            roster: Roster::from_records(request.roster, config.age_reference_date),
            catalog,
            qualifying_times: QualifyingTimeTable::from_records(request.qualifying_times),
            pre_assignments: request.pre_assignments,
            current_assignments: request.current_assignments,
        };

        Ok((config, input))
    }

    /// 执行优化, 错误向上传播
    #[instrument(skip_all)]
    pub fn try_optimize(&self, request: OptimizeRequest) -> ApiResult<OptimizationResult> {
        let (config, input) = self.prepare(request)?;
        let optimizer = GalaOptimizer::new(&config)?;
        Ok(optimizer.optimize(&input)?)
    }

    /// 执行优化, 致命错误转换为显式错误文档
    pub fn optimize(&self, request: OptimizeRequest) -> ApiResult<OptimizationResult> {
        match self.try_optimize(request) {
            Ok(result) => Ok(result),
            Err(err) if err.is_fatal() => {
                warn!(error = %err, "分配流程致命错误, 输出错误文档");
                Ok(OptimizationResult::failure(err.to_string()))
            }
            Err(err) => Err(err),
        }
    }

    /// JSON 请求 → 输出文档
    pub fn optimize_json(&self, raw: &str) -> ApiResult<OptimizationResult> {
        let request: OptimizeRequest = serde_json::from_str(raw)?;
        self.optimize(request)
    }
}
