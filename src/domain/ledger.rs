// ==========================================
// 充电台账合并系统 - 归一记录与台账行
// ==========================================
// 职责: NormalizedRecord（标准字段 → 值）/ LedgerRow（展示行）
// 红线: 台账行为重算投影，不做增量修补
// ==========================================

use crate::domain::sheet::{CellValue, RawRecord};
use crate::domain::types::CanonicalField;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ==========================================
// NormalizedRecord - 归一记录
// ==========================================
// 始终携带全部标准字段，缺失列为空值
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedRecord {
    /// 行号（1 起）
    pub row_number: usize,
    values: BTreeMap<CanonicalField, CellValue>,
}

impl NormalizedRecord {
    pub fn new(row_number: usize) -> Self {
        let values = CanonicalField::ALL
            .iter()
            .map(|f| (*f, CellValue::Empty))
            .collect();
        Self { row_number, values }
    }

    pub fn set(&mut self, field: CanonicalField, value: CellValue) {
        self.values.insert(field, value);
    }

    pub fn get(&self, field: CanonicalField) -> &CellValue {
        // new() 已填充全部字段
        self.values.get(&field).unwrap_or(&CellValue::Empty)
    }

    /// 转为以标准表头为键的原始行（手动映射提交后写回文件数据）
    pub fn to_raw_record(&self) -> RawRecord {
        let cells = CanonicalField::ALL
            .iter()
            .map(|f| (f.header().to_string(), self.get(*f).clone()))
            .collect();
        RawRecord::from_cells(cells)
    }
}

// ==========================================
// LedgerRow - 台账展示行
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerRow {
    /// 序号（每次排序后重排）
    pub no: usize,
    pub charger_id: CellValue,
    pub start_time: CellValue,
    pub end_time: CellValue,
    pub duration: CellValue,
    pub energy: CellValue,
    pub amount: CellValue,
}

impl LedgerRow {
    /// 由归一记录投影；充电桩 ID 为空时以 `Row-<行号>` 占位
    pub fn from_normalized(record: &NormalizedRecord) -> Self {
        let charger_id = match record.get(CanonicalField::ChargerId) {
            v if v.is_empty() => CellValue::Text(format!("Row-{}", record.row_number)),
            v => v.clone(),
        };

        Self {
            no: record.row_number,
            charger_id,
            start_time: record.get(CanonicalField::ChargingStart).clone(),
            end_time: record.get(CanonicalField::ChargingEnd).clone(),
            duration: record.get(CanonicalField::ChargingDuration).clone(),
            energy: record.get(CanonicalField::ChargingEnergy).clone(),
            amount: record.get(CanonicalField::ChargingAmount).clone(),
        }
    }

    pub fn value(&self, field: CanonicalField) -> &CellValue {
        match field {
            CanonicalField::ChargerId => &self.charger_id,
            CanonicalField::ChargingStart => &self.start_time,
            CanonicalField::ChargingEnd => &self.end_time,
            CanonicalField::ChargingDuration => &self.duration,
            CanonicalField::ChargingEnergy => &self.energy,
            CanonicalField::ChargingAmount => &self.amount,
        }
    }
}
