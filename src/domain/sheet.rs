// ==========================================
// 充电台账合并系统 - 单元格与原始行
// ==========================================
// 职责: 解析结果的最小数据单元
// 说明: RawRecord 保留列顺序（手动映射按位置重新配对列名）
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// CellValue - 单元格值
// ==========================================
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    #[default]
    Empty,
    Number(f64),
    Text(String),
}

impl CellValue {
    pub fn text<S: Into<String>>(value: S) -> Self {
        CellValue::Text(value.into())
    }

    /// 空值判定（空白文本视为空）
    pub fn is_empty(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Number(_) => false,
            CellValue::Text(s) => s.trim().is_empty(),
        }
    }

    /// 渲染为显示文本
    pub fn as_text(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Number(n) => {
                // 整数值不带小数点输出
                if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
                    write!(f, "{}", *n as i64)
                } else {
                    write!(f, "{}", n)
                }
            }
            CellValue::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        if value.is_empty() {
            CellValue::Empty
        } else {
            CellValue::Text(value.to_string())
        }
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

// ==========================================
// RawRecord - 原始行记录（列名 → 值，有序）
// ==========================================
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RawRecord {
    cells: Vec<(String, CellValue)>,
}

impl RawRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_cells(cells: Vec<(String, CellValue)>) -> Self {
        let mut record = Self::new();
        for (key, value) in cells {
            record.insert(key, value);
        }
        record
    }

    /// 插入列；同名列覆盖原值但保留原位置
    pub fn insert<K: Into<String>>(&mut self, key: K, value: CellValue) {
        let key = key.into();
        match self.cells.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.cells.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&CellValue> {
        self.cells.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().map(|(k, _)| k.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &CellValue> {
        self.cells.iter().map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CellValue)> {
        self.cells.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// 所有值都为空
    pub fn is_blank(&self) -> bool {
        self.cells.iter().all(|(_, v)| v.is_empty())
    }
}
