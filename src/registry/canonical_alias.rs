// ==========================================
// 充电台账合并系统 - 标准字段别名表
// ==========================================
// 职责: 源表头 → 标准字段
// 说明: 每个字段的最后一个别名为标准表头本身（手动映射结果按标准表头落键）
// ==========================================

use crate::domain::types::CanonicalField;

/// 标准字段及其源表头别名（有序）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalAlias {
    pub field: CanonicalField,
    pub aliases: Vec<String>,
}

impl CanonicalAlias {
    fn new(field: CanonicalField, aliases: &[&str]) -> Self {
        Self {
            field,
            aliases: aliases.iter().map(|a| a.to_string()).collect(),
        }
    }

    pub fn matches(&self, header: &str) -> bool {
        self.aliases.iter().any(|a| a == header)
    }
}

/// 内置别名表
pub fn builtin_aliases() -> Vec<CanonicalAlias> {
    vec![
        CanonicalAlias::new(
            CanonicalField::ChargerId,
            &["충전기 ID", "충전기/커넥터 ID", "충전기ID"],
        ),
        CanonicalAlias::new(CanonicalField::ChargingStart, &["충전시작일시", "충전시작"]),
        CanonicalAlias::new(CanonicalField::ChargingEnd, &["충전종료일시", "충전종료"]),
        CanonicalAlias::new(
            CanonicalField::ChargingDuration,
            &["이용시간", "충전시간(분)", "충전시간"],
        ),
        CanonicalAlias::new(CanonicalField::ChargingEnergy, &["충전량(kWh)", "충전량"]),
        CanonicalAlias::new(
            CanonicalField::ChargingAmount,
            &["충전요금", "사용금액", "충전금액"],
        ),
    ]
}
