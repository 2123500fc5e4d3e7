// ==========================================
// 游泳比赛选手分配系统 - 领域模型层
// ==========================================
// 职责: 定义领域实体、值类型、输入输出结构
// 红线: 不含分配逻辑
// ==========================================

pub mod assignment;
pub mod athlete;
pub mod diagnostic;
pub mod event;
pub mod qualifying;
pub mod result;
pub mod time;
pub mod types;

// 重导出核心类型
pub use assignment::{IndividualPreAssignment, PreAssignments, RelayPreAssignment};
pub use athlete::{Athlete, AthleteId, RecordedTime, Roster, RosterRecord};
pub use diagnostic::Diagnostic;
pub use event::{
    AssignmentState, CatalogEvent, EventSlot, RelayDescriptor, SlotKey, StrokeDistance,
};
pub use qualifying::{QualifyingTime, QualifyingTimeRecord, QualifyingTimeTable};
pub use result::{
    IndividualResult, OptimizationResult, OptimizationStats, RelayLegResult, RelayResult,
};
pub use types::{AgeCategory, Course, Gender, RelayKind, Stroke, TimeStatus};
