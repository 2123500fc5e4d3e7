// ==========================================
// 游泳比赛选手分配系统 - 引擎层
// ==========================================
// 职责: 资格匹配、计分排名、个人项目分配、接力组建
// 红线: 引擎为纯函数式流程, 不做 I/O; 可恢复情况一律输出诊断
// ==========================================

pub mod allocator;
pub mod assembler;
pub mod eligibility;
pub mod error;
pub mod orchestrator;
pub mod relay;
pub mod scoring;
pub mod slot_table;

// 重导出核心引擎
pub use allocator::{AllocationSummary, AssignmentCounter, IndividualAllocator};
pub use assembler::ResultAssembler;
pub use eligibility::EligibilityBuilder;
pub use error::{OptimizeError, OptimizeResult};
pub use orchestrator::{GalaOptimizer, OptimizationInput};
pub use relay::{
    FreestyleRelayBuilder, MedleyRelayBuilder, MedleySearchLimits, RelayBuilder, RelayFormation,
    RelayLeg, RelayTeam, SquadRelayBuilder,
};
pub use scoring::{compute_score, rank_entries, PerformanceEntry};
pub use slot_table::{SlotError, SlotTable};
