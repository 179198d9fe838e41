// ==========================================
// 充电台账合并系统 - 数据清洗器实现
// ==========================================
// 职责: TRIM / 表头去重命名 / 数值识别
// ==========================================

use std::collections::HashSet;

/// 空表头占位名
pub const EMPTY_HEADER: &str = "__EMPTY";

pub struct DataCleaner;

impl DataCleaner {
    /// 清洗文本（TRIM）
    pub fn clean_text(&self, value: &str) -> String {
        value.trim().to_string()
    }

    /// 数值形态判定（整串可解析为有限浮点数）
    pub fn is_numeric(&self, value: &str) -> bool {
        let trimmed = value.trim();
        !trimmed.is_empty() && trimmed.parse::<f64>().map_or(false, f64::is_finite)
    }

    /// 表头命名: 空表头 → `__EMPTY`、`__EMPTY_1`…；重名 `X` → `X_1`、`X_2`…
    pub fn unique_header_names(&self, raw: &[String]) -> Vec<String> {
        let mut used: HashSet<String> = HashSet::new();
        let mut names = Vec::with_capacity(raw.len());

        for header in raw {
            let base = match self.clean_text(header) {
                h if h.is_empty() => EMPTY_HEADER.to_string(),
                h => h,
            };

            let mut candidate = base.clone();
            let mut suffix = 0;
            while used.contains(&candidate) {
                suffix += 1;
                candidate = format!("{}_{}", base, suffix);
            }

            used.insert(candidate.clone());
            names.push(candidate);
        }

        names
    }

    /// 渲染宽度（按字符计）
    pub fn rendered_width(&self, value: &str) -> usize {
        value.chars().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_clean_text_basic() {
        let cleaner = DataCleaner;
        assert_eq!(cleaner.clean_text("  충전량  "), "충전량");
    }

    #[test]
    fn test_is_numeric() {
        let cleaner = DataCleaner;
        assert!(cleaner.is_numeric("12.5"));
        assert!(cleaner.is_numeric(" 300 "));
        assert!(!cleaner.is_numeric("1,200"));
        assert!(!cleaner.is_numeric("2024-05-01"));
        assert!(!cleaner.is_numeric(""));
        assert!(!cleaner.is_numeric("NaN"));
    }

    #[test]
    fn test_unique_header_names() {
        let cleaner = DataCleaner;
        let names = cleaner.unique_header_names(&strings(&["충전량", "", "충전량", " ", "A"]));
        assert_eq!(
            names,
            strings(&["충전량", "__EMPTY", "충전량_1", "__EMPTY_1", "A"])
        );
    }

    #[test]
    fn test_rendered_width_counts_chars() {
        let cleaner = DataCleaner;
        assert_eq!(cleaner.rendered_width("충전기ID"), 5);
    }
}
