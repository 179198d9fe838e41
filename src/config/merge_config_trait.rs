// ==========================================
// 充电台账合并系统 - 配置读取 Trait
// ==========================================
// 职责: 定义各层所需的配置读取接口（不包含实现）
// 红线: 不包含配置写入、不包含业务逻辑
// ==========================================

use crate::config::error::ConfigResult;
use crate::registry::VendorFormat;

// ==========================================
// MergeConfigReader Trait
// ==========================================
// 实现者: ConfigManager
pub trait MergeConfigReader: Send + Sync {
    // ===== 会话 =====

    /// 界面文案语言
    ///
    /// # 默认值
    /// - "ko"
    fn get_locale(&self) -> ConfigResult<String>;

    /// 允许上传的扩展名（小写，不含点）
    ///
    /// # 默认值
    /// - ["xlsx", "xls", "csv"]
    fn get_accepted_extensions(&self) -> ConfigResult<Vec<String>>;

    // ===== 导出 =====

    /// # 默认值
    /// - "충전 데이터"
    fn get_export_sheet_name(&self) -> ConfigResult<String>;

    /// 导出文件名前缀，文件名为 `<prefix>_<YYYY-MM-DD>.xlsx`
    ///
    /// # 默认值
    /// - "충전데이터"
    fn get_export_file_prefix(&self) -> ConfigResult<String>;

    /// 列宽下限（字符）
    fn get_min_column_width(&self) -> ConfigResult<usize>;

    /// 列宽上限（字符）
    fn get_max_column_width(&self) -> ConfigResult<usize>;

    /// 空单元格按多少字符计宽
    fn get_empty_cell_width(&self) -> ConfigResult<usize>;

    fn get_header_row_height(&self) -> ConfigResult<f64>;

    fn get_data_row_height(&self) -> ConfigResult<f64>;

    /// 表头底色（ARGB）
    fn get_header_fill_argb(&self) -> ConfigResult<String>;

    // ===== 格式注册表 =====

    /// 追加在内置格式之后的厂商格式
    fn get_extra_vendor_formats(&self) -> ConfigResult<Vec<VendorFormat>>;
}
