use crate::models::{date_key, ScoreRecord};
use chrono::{Duration, NaiveDate};
use serde::Serialize;
use std::collections::HashMap;

pub const DAY_COUNT: usize = 365;
pub const COLUMNS: usize = 53;
pub const BACKGROUND: &str = "#ebedf0";
const INTENSITY_STEP: u8 = 25;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CellColor {
    Background,
    Green { intensity: u8 },
}

impl CellColor {
    pub fn for_score(score: u8) -> Self {
        if score == 0 {
            Self::Background
        } else {
            Self::Green {
                intensity: score.saturating_mul(INTENSITY_STEP),
            }
        }
    }

    pub fn css(self) -> String {
        match self {
            Self::Background => BACKGROUND.to_string(),
            Self::Green { intensity } => format!("rgb(0, {intensity}, 0)"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeatmapCell {
    pub date: NaiveDate,
    pub score: u8,
    pub color: CellColor,
}

impl HeatmapCell {
    pub fn title(&self) -> String {
        format!("{}: {}", date_key(self.date), self.score)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Heatmap {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub columns: usize,
    pub cells: Vec<HeatmapCell>,
}

/// Lays out the 365 days ending at `today`, oldest first.
pub fn build_heatmap_at(today: NaiveDate, scores: &[ScoreRecord]) -> Heatmap {
    let mut by_date: HashMap<&str, u8> = HashMap::with_capacity(scores.len());
    for record in scores {
        // First record for a date wins.
        by_date.entry(record.date.as_str()).or_insert(record.score);
    }

    let start = today - Duration::days(DAY_COUNT as i64 - 1);
    let cells = (0..DAY_COUNT)
        .map(|offset| {
            let date = start + Duration::days(offset as i64);
            let score = by_date.get(date_key(date).as_str()).copied().unwrap_or(0);
            HeatmapCell {
                date,
                score,
                color: CellColor::for_score(score),
            }
        })
        .collect();

    Heatmap {
        start,
        end: today,
        columns: COLUMNS,
        cells,
    }
}
