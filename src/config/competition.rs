// ==========================================
// 游泳比赛选手分配系统 - 比赛类型预设
// ==========================================
// 职责: 比赛类型 → 缺省项目目录 + 个人项目上限
// 说明: 请求未提供项目目录时使用预设; custom 类型无预设目录
// ==========================================

use crate::domain::event::CatalogEvent;
use crate::domain::types::{AgeCategory, Gender};
use serde::{Deserialize, Serialize};
use std::fmt;

const GENDERS: [Gender; 2] = [Gender::Male, Gender::Female];
const STROKES: [&str; 4] = ["Freestyle", "Backstroke", "Breaststroke", "Butterfly"];

// ==========================================
// CompetitionType - 比赛类型
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompetitionType {
    #[default]
    ArenaLeague,
    CountyRelays,
    Custom,
}

impl fmt::Display for CompetitionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompetitionType::ArenaLeague => write!(f, "Arena League"),
            CompetitionType::CountyRelays => write!(f, "County Relays"),
            CompetitionType::Custom => write!(f, "Custom Competition"),
        }
    }
}

impl CompetitionType {
    /// 预设个人项目上限 (custom 由调用方指定)
    pub fn preset_max_individual_events(&self) -> Option<u32> {
        match self {
            CompetitionType::ArenaLeague => Some(2),
            CompetitionType::CountyRelays => Some(0),
            CompetitionType::Custom => None,
        }
    }

    /// 预设项目目录 (顺序即排名同分时的先后)
    pub fn default_catalog(&self) -> Vec<CatalogEvent> {
        match self {
            CompetitionType::ArenaLeague => arena_league_catalog(),
            CompetitionType::CountyRelays => county_relays_catalog(),
            CompetitionType::Custom => Vec::new(),
        }
    }
}

fn arena_league_catalog() -> Vec<CatalogEvent> {
    let mut events = Vec::new();

    // 个人项目: 11U 50m, 13U/15U/Open 100m
    for (age, distance) in [(11, 50), (13, 100), (15, 100), (AgeCategory::OPEN.0, 100)] {
        for stroke in STROKES {
            for gender in GENDERS {
                let name = format!("{}m {}", distance, stroke);
                events.push(CatalogEvent::individual(&name, age, gender));
            }
        }
    }
    for gender in GENDERS {
        events.push(CatalogEvent::individual(
            "200m Individual Medley",
            AgeCategory::OPEN.0,
            gender,
        ));
    }

    // 接力: 各年龄组 4x50m 自由泳 / 混合泳
    for age in [11, 13, 15, AgeCategory::OPEN.0] {
        for name in ["4x50m Freestyle", "4x50m Medley"] {
            for gender in GENDERS {
                events.push(CatalogEvent::relay(name, age, gender));
            }
        }
    }

    // 混合组接力 (8 人: 11U/13U/15U/Open 各一男一女)
    events.push(CatalogEvent::relay("Squadrun", AgeCategory::MIXED.0, Gender::Mixed));

    events
}

fn county_relays_catalog() -> Vec<CatalogEvent> {
    let mut events = Vec::new();

    for age in [12, 14, 16] {
        for gender in GENDERS {
            events.push(CatalogEvent::relay("4 x 50m Freestyle", age, gender));
        }
    }
    for name in ["4 x 100m Freestyle", "4 x 200m Freestyle"] {
        for gender in GENDERS {
            events.push(CatalogEvent::relay(name, AgeCategory::OPEN.0, gender));
        }
    }
    for age in [12, 14, 16] {
        for gender in GENDERS {
            events.push(CatalogEvent::relay("4 x 50m Medley", age, gender));
        }
    }
    for gender in GENDERS {
        events.push(CatalogEvent::relay("4 x 100m Medley", AgeCategory::OPEN.0, gender));
    }

    events
}
