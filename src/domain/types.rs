// ==========================================
// 充电台账合并系统 - 领域类型定义
// ==========================================
// 职责: 文件状态 / 标准字段 / 格式匹配结果
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

/// 手动映射后写入 form_id 的标记
pub const CUSTOM_FORM_ID: &str = "custom";

/// 手动映射后写入 form_name 的标记（界面显示原文）
pub const USER_MODIFIED_FORM_NAME: &str = "사용자 수정";

// ==========================================
// 文件生命周期状态 (File Status)
// ==========================================
// 序列化格式: lowercase (与前端一致)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileStatus {
    Pending, // 已选择，未解析
    Success, // 已识别或已手动映射
    Error,   // 解析失败或格式不支持
}

impl fmt::Display for FileStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileStatus::Pending => write!(f, "pending"),
            FileStatus::Success => write!(f, "success"),
            FileStatus::Error => write!(f, "error"),
        }
    }
}

// ==========================================
// 标准字段 (Canonical Field)
// ==========================================
// 顺序即台账列顺序
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CanonicalField {
    ChargerId,
    ChargingStart,
    ChargingEnd,
    ChargingDuration,
    ChargingEnergy,
    ChargingAmount,
}

impl CanonicalField {
    pub const ALL: [CanonicalField; 6] = [
        CanonicalField::ChargerId,
        CanonicalField::ChargingStart,
        CanonicalField::ChargingEnd,
        CanonicalField::ChargingDuration,
        CanonicalField::ChargingEnergy,
        CanonicalField::ChargingAmount,
    ];

    /// 标准表头名（归一后记录的键，也是导出表头）
    pub fn header(&self) -> &'static str {
        match self {
            CanonicalField::ChargerId => "충전기ID",
            CanonicalField::ChargingStart => "충전시작",
            CanonicalField::ChargingEnd => "충전종료",
            CanonicalField::ChargingDuration => "충전시간",
            CanonicalField::ChargingEnergy => "충전량",
            CanonicalField::ChargingAmount => "충전금액",
        }
    }
}

impl fmt::Display for CanonicalField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.header())
    }
}

// ==========================================
// 格式匹配结果 (Form Match)
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormMatch {
    pub form_id: String,
    pub form_name: String,
    /// 表头所在行（1 起）
    pub header_row: usize,
}
