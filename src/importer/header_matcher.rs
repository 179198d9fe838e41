// ==========================================
// 充电台账合并系统 - 表头匹配器
// ==========================================
// 职责: 候选表头行 → 命中的厂商格式
// 规则: 按登记顺序逐个检查，必填表头全部出现（精确相等）即命中，首个命中即返回
// ==========================================

use crate::domain::types::FormMatch;
use crate::importer::error::{ImportError, ImportResult};
use crate::registry::FormRegistry;
use std::sync::Arc;
use tracing::debug;

pub struct HeaderMatcher {
    registry: Arc<FormRegistry>,
}

impl HeaderMatcher {
    pub fn new(registry: Arc<FormRegistry>) -> Self {
        Self { registry }
    }

    /// 匹配一行候选表头
    ///
    /// # 参数
    /// - headers: 表头文本；None 表示该行不存在
    /// - header_row: 该行的 1 起行号（写入命中结果）
    ///
    /// # 返回
    /// - Ok(FormMatch): 首个完全命中的格式
    /// - Err(MalformedHeader): 行不存在或整行为空
    /// - Err(UnsupportedFormat): 无格式命中
    pub fn match_header_row(
        &self,
        headers: Option<&[String]>,
        header_row: usize,
    ) -> ImportResult<FormMatch> {
        let headers = match headers {
            Some(h) if h.iter().any(|cell| !cell.is_empty()) => h,
            _ => return Err(ImportError::MalformedHeader { header_row }),
        };

        let matched = self
            .registry
            .formats()
            .iter()
            .find(|format| format.is_satisfied_by(headers));

        match matched {
            Some(format) => {
                debug!(form_id = %format.id, header_row, "表头命中");
                Ok(FormMatch {
                    form_id: format.id.clone(),
                    form_name: format.name.clone(),
                    header_row,
                })
            }
            None => Err(ImportError::UnsupportedFormat),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::vendor_format::{CHARGEIN_HEADERS, EVSIS_HEADERS};
    use crate::registry::VendorFormat;

    fn strings(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn matcher() -> HeaderMatcher {
        HeaderMatcher::new(Arc::new(FormRegistry::builtin()))
    }

    #[test]
    fn test_exact_headers_match_each_format() {
        let m = matcher();

        let evsis = strings(EVSIS_HEADERS);
        assert_eq!(m.match_header_row(Some(&evsis), 1).unwrap().form_id, "evsis");

        let chargein = strings(CHARGEIN_HEADERS);
        let hit = m.match_header_row(Some(&chargein), 3).unwrap();
        assert_eq!(hit.form_id, "chargin");
        assert_eq!(hit.form_name, "차지인");
        assert_eq!(hit.header_row, 3);
    }

    #[test]
    fn test_extra_headers_still_match() {
        let mut headers = strings(CHARGEIN_HEADERS);
        headers.push("비고".to_string());
        headers.reverse();
        assert!(matcher().match_header_row(Some(&headers), 3).is_ok());
    }

    #[test]
    fn test_missing_one_header_fails() {
        for missing in 0..CHARGEIN_HEADERS.len() {
            let mut headers = strings(CHARGEIN_HEADERS);
            headers.remove(missing);
            let result = matcher().match_header_row(Some(&headers), 3);
            assert!(matches!(result, Err(ImportError::UnsupportedFormat)));
        }
    }

    #[test]
    fn test_first_registered_format_wins() {
        let registry = FormRegistry::with_formats(vec![
            VendorFormat::new("a", "A", "", &["X"], 1),
            VendorFormat::new("b", "B", "", &["X", "Y"], 1),
        ]);
        let m = HeaderMatcher::new(Arc::new(registry));
        let hit = m.match_header_row(Some(&strings(&["X", "Y"])), 1).unwrap();
        assert_eq!(hit.form_id, "a");
    }

    #[test]
    fn test_malformed_header_row() {
        let m = matcher();
        assert!(matches!(
            m.match_header_row(None, 3),
            Err(ImportError::MalformedHeader { header_row: 3 })
        ));
        assert!(matches!(
            m.match_header_row(Some(&strings(&["", ""])), 1),
            Err(ImportError::MalformedHeader { .. })
        ));
    }

    #[test]
    fn test_foo_bar_is_unsupported() {
        let result = matcher().match_header_row(Some(&strings(&["Foo", "Bar"])), 1);
        assert!(matches!(result, Err(ImportError::UnsupportedFormat)));
    }
}
