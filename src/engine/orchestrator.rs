// ==========================================
// 游泳比赛选手分配系统 - 引擎编排器
// ==========================================
// 用途: 协调排名、个人项目分配、接力组建的执行顺序
// 流程: 名额表 → 全局排名 → 既有/预分配 → 贪心分配 → 接力 → 组装
// 红线: 相同输入必须产生相同输出
// ==========================================

use crate::config::OptimizationConfig;
use crate::domain::assignment::{IndividualPreAssignment, PreAssignments};
use crate::domain::athlete::Roster;
use crate::domain::event::CatalogEvent;
use crate::domain::qualifying::QualifyingTimeTable;
use crate::domain::result::OptimizationResult;
use crate::engine::assembler::ResultAssembler;
use crate::engine::eligibility::EligibilityBuilder;
use crate::engine::error::{OptimizeError, OptimizeResult};
use crate::engine::allocator::IndividualAllocator;
use crate::engine::relay::RelayBuilder;
use crate::engine::slot_table::SlotTable;
use tracing::{debug, info, instrument};

// ==========================================
// OptimizationInput - 单次运行输入
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct OptimizationInput {
    pub roster: Roster,
    pub catalog: Vec<CatalogEvent>, // 顺序影响同分排名
    pub qualifying_times: QualifyingTimeTable,
    pub pre_assignments: PreAssignments,
    /// 上一轮的分配状态 (可选)
    pub current_assignments: Vec<IndividualPreAssignment>,
}

// ==========================================
// GalaOptimizer - 引擎编排器
// ==========================================
pub struct GalaOptimizer {
    eligibility: EligibilityBuilder,
    allocator: IndividualAllocator,
    relays: RelayBuilder,
}

impl GalaOptimizer {
    /// 创建编排器
    ///
    /// # 参数
    /// - config: 优化配置 (先校验)
    ///
    /// # 返回
    /// - Err(InvalidConfig): 配置校验失败
    pub fn new(config: &OptimizationConfig) -> OptimizeResult<Self> {
        config
            .validate()
            .map_err(|e| OptimizeError::InvalidConfig(e.to_string()))?;

        Ok(Self {
            eligibility: EligibilityBuilder::from_config(config),
            allocator: IndividualAllocator::new(config.max_individual_events),
            relays: RelayBuilder::from_config(config),
        })
    }

    /// 执行完整分配流程
    ///
    /// # 返回
    /// - Ok(result): 含个人项目、接力、统计与诊断
    /// - Err(NoEligibleAthletes): 花名册为空
    #[instrument(skip_all, fields(
        athletes = input.roster.len(),
        catalog = input.catalog.len(),
        max_individual_events = self.allocator.max_individual_events(),
    ))]
    pub fn optimize(&self, input: &OptimizationInput) -> OptimizeResult<OptimizationResult> {
        if input.roster.is_empty() {
            return Err(OptimizeError::NoEligibleAthletes);
        }
        info!("开始执行分配流程");

        let mut diagnostics = Vec::new();

        // ==========================================
        // 步骤1: 构建个人项目名额表
        // ==========================================
        let mut slots = SlotTable::from_catalog(&input.catalog, &mut diagnostics);
        debug!(slots = slots.len(), "步骤1: 名额表构建完成");

        // ==========================================
        // 步骤2: 资格匹配 + 全局排名
        // ==========================================
        let ranking = self.eligibility.build(
            &slots,
            &input.roster,
            &input.qualifying_times,
            &mut diagnostics,
        );
        debug!(entries = ranking.len(), "步骤2: 全局排名完成");

        // ==========================================
        // 步骤3: 个人项目分配 (既有 → 预分配 → 贪心)
        // ==========================================
        let summary = self.allocator.run(
            &mut slots,
            &input.roster,
            &ranking,
            &input.current_assignments,
            &input.pre_assignments.individual,
            &mut diagnostics,
        );
        debug!(
            pre_assigned = summary.pre_assigned,
            auto_assigned = summary.auto_assigned,
            "步骤3: 个人项目分配完成"
        );

        // ==========================================
        // 步骤4: 接力组建
        // ==========================================
        let teams = self.relays.build_all(
            &input.catalog,
            &input.roster,
            &input.pre_assignments.relay,
            &mut diagnostics,
        );
        debug!(teams = teams.len(), "步骤4: 接力组建完成");

        // ==========================================
        // 步骤5: 组装输出
        // ==========================================
        let result =
            ResultAssembler::assemble(&slots, &input.roster, &ranking, &teams, diagnostics);

        info!(
            individual = result.individual.len(),
            relay = result.relay.len(),
            qualifying_times = result.stats.qualifying_times,
            diagnostics = result.diagnostics.len(),
            "分配流程完成"
        );
        Ok(result)
    }
}
