// ==========================================
// 测试数据构建器 - 用于集成测试
// ==========================================

use chrono::NaiveDate;
use gala_optimizer::api::{OptimizeApi, OptimizeRequest};
use gala_optimizer::domain::assignment::{IndividualPreAssignment, RelayPreAssignment};
use gala_optimizer::domain::athlete::{AthleteId, RosterRecord};
use gala_optimizer::domain::event::CatalogEvent;
use gala_optimizer::domain::qualifying::QualifyingTimeRecord;
use gala_optimizer::domain::result::OptimizationResult;
use gala_optimizer::domain::types::{AgeCategory, Course, Gender, Stroke};
use gala_optimizer::domain::StrokeDistance;

// ==========================================
// 运动员构建器 (一名运动员 → 多行花名册记录)
// ==========================================

pub struct AthleteBuilder {
    id: String,
    first_name: String,
    last_name: String,
    gender: Gender,
    age: u32,
    date_of_birth: Option<NaiveDate>,
    available: bool,
    times: Vec<(Stroke, u32, Course, f64)>,
}

impl AthleteBuilder {
    pub fn new(id: &str, first_name: &str, last_name: &str) -> Self {
        Self {
            id: id.to_string(),
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            gender: Gender::Male,
            age: 12,
            date_of_birth: None,
            available: true,
            times: Vec::new(),
        }
    }

    pub fn gender(mut self, gender: Gender) -> Self {
        self.gender = gender;
        self
    }

    pub fn age(mut self, age: u32) -> Self {
        self.age = age;
        self
    }

    pub fn born(mut self, date_of_birth: NaiveDate) -> Self {
        self.date_of_birth = Some(date_of_birth);
        self
    }

    pub fn unavailable(mut self) -> Self {
        self.available = false;
        self
    }

    /// 短池成绩
    pub fn time(self, stroke: Stroke, distance: u32, seconds: f64) -> Self {
        self.time_in(stroke, distance, Course::Sc, seconds)
    }

    pub fn time_in(mut self, stroke: Stroke, distance: u32, course: Course, seconds: f64) -> Self {
        self.times.push((stroke, distance, course, seconds));
        self
    }

    pub fn build(self) -> Vec<RosterRecord> {
        self.times
            .iter()
            .map(|&(stroke, distance, course, time)| RosterRecord {
                first_name: self.first_name.clone(),
                last_name: self.last_name.clone(),
                id: AthleteId::new(self.id.as_str()),
                gender: self.gender,
                age: self.age,
                date_of_birth: self.date_of_birth,
                stroke,
                distance,
                course,
                time,
                available: self.available,
            })
            .collect()
    }
}

// ==========================================
// 请求构建器
// ==========================================

pub struct RequestBuilder {
    request: OptimizeRequest,
}

impl RequestBuilder {
    /// 空目录的请求 (调用方逐条添加项目)
    pub fn new() -> Self {
        Self {
            request: OptimizeRequest {
                events: Some(Vec::new()),
                ..OptimizeRequest::default()
            },
        }
    }

    /// 不提供项目目录 (使用预设)
    pub fn with_preset_catalog() -> Self {
        Self {
            request: OptimizeRequest::default(),
        }
    }

    pub fn athlete(mut self, athlete: AthleteBuilder) -> Self {
        self.request.roster.extend(athlete.build());
        self
    }

    pub fn qualifying(
        mut self,
        stroke: Stroke,
        distance: u32,
        age_category: u32,
        gender: Gender,
        seconds: f64,
    ) -> Self {
        self.request.qualifying_times.push(QualifyingTimeRecord {
            event: StrokeDistance::new(distance, stroke),
            age_category,
            course: Course::Sc,
            kind: "QT".to_string(),
            gender,
            time: seconds,
        });
        self
    }

    pub fn event(mut self, name: &str, age_category: u32, gender: Gender) -> Self {
        self.request
            .events
            .get_or_insert_with(Vec::new)
            .push(CatalogEvent::individual(name, age_category, gender));
        self
    }

    pub fn relay(mut self, name: &str, age_category: u32, gender: Gender) -> Self {
        self.request
            .events
            .get_or_insert_with(Vec::new)
            .push(CatalogEvent::relay(name, age_category, gender));
        self
    }

    pub fn pre_assign(mut self, swimmer: &str, event: &str, age_category: u32, gender: Gender) -> Self {
        self.request.pre_assignments.individual.push(IndividualPreAssignment {
            swimmer_id: AthleteId::new(swimmer),
            event: event.to_string(),
            age_category: AgeCategory(age_category),
            gender,
        });
        self
    }

    pub fn current(mut self, swimmer: &str, event: &str, age_category: u32, gender: Gender) -> Self {
        self.request.current_assignments.push(IndividualPreAssignment {
            swimmer_id: AthleteId::new(swimmer),
            event: event.to_string(),
            age_category: AgeCategory(age_category),
            gender,
        });
        self
    }

    pub fn relay_pre_assign(
        mut self,
        relay_name: &str,
        age_category: u32,
        gender: Gender,
        position: u32,
        stroke: Option<Stroke>,
        swimmer: &str,
    ) -> Self {
        self.request.pre_assignments.relay.push(RelayPreAssignment {
            relay_name: relay_name.to_string(),
            age_category: AgeCategory(age_category),
            gender,
            position,
            stroke,
            swimmer_id: AthleteId::new(swimmer),
        });
        self
    }

    pub fn max_individual_events(mut self, max: u32) -> Self {
        self.request.config.max_individual_events = max;
        self
    }

    pub fn build(self) -> OptimizeRequest {
        self.request
    }

    /// 构建并执行
    pub fn run(self) -> OptimizationResult {
        OptimizeApi::new()
            .optimize(self.build())
            .expect("请求应能被处理")
    }
}

// ==========================================
// 断言辅助
// ==========================================

/// 某项目标签对应的运动员姓名
pub fn swimmer_for<'a>(result: &'a OptimizationResult, event: &str) -> Option<&'a str> {
    result
        .individual
        .iter()
        .find(|r| r.event == event)
        .map(|r| r.swimmer.as_str())
}

/// 某运动员获得的个人项目数
pub fn events_for(result: &OptimizationResult, swimmer: &str) -> usize {
    result
        .individual
        .iter()
        .filter(|r| r.swimmer == swimmer)
        .count()
}
