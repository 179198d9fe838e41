// ==========================================
// 充电台账合并系统 - 厂商格式定义
// ==========================================
// 职责: 已登记的厂商结算表指纹（必备表头集合 + 表头行）
// 红线: 启动后不可变
// ==========================================

use serde::{Deserialize, Serialize};

/// 厂商格式
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VendorFormat {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// 必须全部出现的表头
    pub required_headers: Vec<String>,
    /// 表头所在行（1 起）
    pub header_row: usize,
}

impl VendorFormat {
    pub fn new(id: &str, name: &str, description: &str, headers: &[&str], header_row: usize) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            required_headers: headers.iter().map(|h| h.to_string()).collect(),
            header_row,
        }
    }

    /// 必备表头是否全部出现在候选表头行中（精确相等）
    pub fn is_satisfied_by(&self, header_row: &[String]) -> bool {
        self.required_headers
            .iter()
            .all(|required| header_row.iter().any(|h| h == required))
    }
}

// ===== 内置格式 =====

pub const EVSIS_HEADERS: &[&str] = &[
    "충전사업자",
    "대표가맹점",
    "가맹점/충전소",
    "충전기/커넥터 ID",
    "회원 기관",
    "회원 번호",
    "인증구분",
    "거래분류",
    "구독구분",
    "충전상태",
    "충전량(kWh)",
    "충전요금",
    "충전시작일시",
    "충전종료일시",
    "충전시간(분)",
    "충전속도",
    "기본단가",
    "할인율",
    "선물카드금액",
    "사용포인트",
    "결제요청금액",
    "결제금액",
    "결제처리상태",
    "결제상태",
    "결제(부분)취소처리상태",
    "충전종료사유",
    "결제실패사유",
    "결제제외사유",
    "수집일자",
    "거래일자",
    "모델ID",
    "최종배포버전",
    "충전소ID",
    "거래고유번호",
];

pub const CHARGEIN_HEADERS: &[&str] = &[
    "No",
    "충전기그룹",
    "충전기명",
    "충전기 ID",
    "이용방법",
    "충전시작",
    "충전종료",
    "완료수신",
    "이용시간",
    "충전량",
    "사용금액",
];

/// 内置厂商格式（登记顺序即匹配顺序）
pub fn builtin_formats() -> Vec<VendorFormat> {
    vec![
        VendorFormat::new("evsis", "EVSIS", "EVSIS 엑셀 형식", EVSIS_HEADERS, 1),
        VendorFormat::new("chargin", "차지인", "차지인 엑셀 형식", CHARGEIN_HEADERS, 3),
    ]
}
