// ==========================================
// 国际化 (i18n) 模块
// ==========================================
// 使用 rust-i18n 库
// 支持韩文（默认）、英文、中文
// ==========================================
// 注意: rust_i18n::i18n! 宏已在 lib.rs 中初始化
// 注意: 会话文案一律显式传 locale，不修改全局 locale
// ==========================================

/// 默认语言
pub const DEFAULT_LOCALE: &str = "ko";

/// 是否为支持的语言
pub fn is_supported_locale(locale: &str) -> bool {
    rust_i18n::available_locales!().iter().any(|l| *l == locale)
}

/// 翻译消息（指定语言，无参数）
///
/// # 示例
/// ```no_run
/// use ev_charge_ledger::i18n::t_in;
/// let msg = t_in("ko", "ingest.unsupported_format");
/// ```
pub fn t_in(locale: &str, key: &str) -> String {
    rust_i18n::t!(key, locale = locale).to_string()
}

/// 翻译消息（指定语言，带参数）
///
/// # 示例
/// ```no_run
/// use ev_charge_ledger::i18n::t_with_args_in;
/// let msg = t_with_args_in("ko", "remap.column_not_found", &[("column", "Foo")]);
/// ```
pub fn t_with_args_in(locale: &str, key: &str, args: &[(&str, &str)]) -> String {
    let mut result = t_in(locale, key);
    for (k, v) in args {
        let placeholder = format!("%{{{}}}", k);
        result = result.replace(&placeholder, v);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_korean_messages() {
        assert_eq!(
            t_in("ko", "ingest.unsupported_format"),
            "지원하지 않는 엑셀 형식입니다."
        );
        assert_eq!(
            t_in("ko", "ingest.malformed_header"),
            "header 행이 잘못 설정되어 있습니다."
        );
        assert_eq!(t_in("ko", "export.empty"), "다운로드할 데이터가 없습니다.");
    }

    #[test]
    fn test_english_messages() {
        assert_eq!(
            t_in("en", "ingest.unsupported_format"),
            "Unsupported spreadsheet format."
        );
    }

    #[test]
    fn test_with_args() {
        let msg = t_with_args_in("ko", "remap.column_not_found", &[("column", "Foo")]);
        assert!(msg.contains("Foo"));
        assert!(!msg.contains("%{column}"));
    }

    #[test]
    fn test_supported_locales() {
        assert!(is_supported_locale("ko"));
        assert!(is_supported_locale("en"));
        assert!(is_supported_locale("zh-CN"));
        assert!(!is_supported_locale("fr"));
    }
}
