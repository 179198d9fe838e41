// ==========================================
// 充电台账合并系统 - 合并排序引擎
// ==========================================
// 职责: 台账行按充电开始时间升序排序 / 日期区间过滤 / 重排序号
// 规则: 时间无法解析的行排在所有有效行之后，彼此保持输入顺序
// 红线: 序号只是最近一次排序的位置，不是稳定标识
// ==========================================

use crate::domain::ledger::LedgerRow;
use crate::domain::sheet::CellValue;
use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// 支持的文本时间格式（按尝试顺序）
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%Y.%m.%d %H:%M:%S",
    "%Y.%m.%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y%m%d%H%M%S",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%Y.%m.%d"];

// ==========================================
// DateRange - 日期区间（闭区间）
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DateRange {
    pub start: Option<NaiveDateTime>,
    pub end: Option<NaiveDateTime>,
}

impl DateRange {
    /// 不过滤
    pub fn all() -> Self {
        Self::default()
    }

    pub fn between(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
        }
    }

    /// 按自然日取区间: 起始日 00:00:00 ~ 结束日 23:59:59.999
    pub fn from_dates(start: NaiveDate, end: NaiveDate) -> Self {
        let end_of_day = NaiveTime::from_hms_milli_opt(23, 59, 59, 999).unwrap_or(NaiveTime::MIN);
        Self::between(start.and_time(NaiveTime::MIN), end.and_time(end_of_day))
    }

    /// 两端都给定才算有效过滤
    pub fn is_bounded(&self) -> bool {
        self.start.is_some() && self.end.is_some()
    }

    pub fn contains(&self, ts: NaiveDateTime) -> bool {
        match (self.start, self.end) {
            (Some(start), Some(end)) => start <= ts && ts <= end,
            _ => true,
        }
    }
}

/// 解析单元格为时间戳；无法解析返回 None（从不报错）
///
/// - 文本: 常见的 `年-月-日 时:分:秒` 变体、RFC 3339、纯日期
/// - 数值: Excel 序列日期（1899-12-30 起的天数）
pub fn parse_timestamp(value: &CellValue) -> Option<NaiveDateTime> {
    match value {
        CellValue::Empty => None,
        CellValue::Number(serial) => from_excel_serial(*serial),
        CellValue::Text(text) => parse_text(text.trim()),
    }
}

fn parse_text(text: &str) -> Option<NaiveDateTime> {
    if text.is_empty() {
        return None;
    }

    if let Some(ts) = DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
    {
        return Some(ts);
    }

    if let Ok(ts) = DateTime::parse_from_rfc3339(text) {
        return Some(ts.naive_local());
    }

    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
        .map(|d| d.and_time(NaiveTime::MIN))
}

fn from_excel_serial(serial: f64) -> Option<NaiveDateTime> {
    if !serial.is_finite() || serial <= 0.0 {
        return None;
    }
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?.and_time(NaiveTime::MIN);
    let millis = (serial * 86_400_000.0).round() as i64;
    epoch.checked_add_signed(Duration::milliseconds(millis))
}

// ==========================================
// MergeSorter - 合并排序引擎
// ==========================================
pub struct MergeSorter {
    // 无状态引擎,不需要注入依赖
}

impl Default for MergeSorter {
    fn default() -> Self {
        Self::new()
    }
}

impl MergeSorter {
    pub fn new() -> Self {
        Self {}
    }

    /// 按充电开始时间升序排序并重排序号（稳定排序）
    pub fn sort(&self, rows: Vec<LedgerRow>) -> Vec<LedgerRow> {
        let mut keyed: Vec<(Option<NaiveDateTime>, LedgerRow)> = rows
            .into_iter()
            .map(|row| (parse_timestamp(&row.start_time), row))
            .collect();

        keyed.sort_by(|a, b| Self::compare(a.0, b.0));

        keyed
            .into_iter()
            .enumerate()
            .map(|(index, (_, mut row))| {
                row.no = index + 1;
                row
            })
            .collect()
    }

    /// 按日期区间过滤后排序；区间任一端缺省时返回全部行
    pub fn filter_by_date_range(&self, rows: Vec<LedgerRow>, range: &DateRange) -> Vec<LedgerRow> {
        if !range.is_bounded() {
            return self.sort(rows);
        }

        let kept = rows
            .into_iter()
            .filter(|row| parse_timestamp(&row.start_time).map_or(false, |ts| range.contains(ts)))
            .collect();

        self.sort(kept)
    }

    /// 有效时间在前；两者都无效视为相等
    fn compare(a: Option<NaiveDateTime>, b: Option<NaiveDateTime>) -> Ordering {
        match (a, b) {
            (Some(a), Some(b)) => a.cmp(&b),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    }
}
