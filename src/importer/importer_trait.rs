// ==========================================
// 充电台账合并系统 - 导入 Trait
// ==========================================
// 职责: 定义导入层接口（不包含实现）
// ==========================================

use crate::domain::uploaded_file::{FileId, UploadedFile};
use crate::importer::error::ImportResult;
use crate::importer::sheet_grid::SheetGrid;
use async_trait::async_trait;

// ==========================================
// SheetDecoder Trait
// ==========================================
// 用途: 字节 → 网格
// 实现者: ExcelParser, CsvParser
pub trait SheetDecoder: Send + Sync {
    /// 解析文件字节为工作表网格（只读第一个工作表）
    ///
    /// # 参数
    /// - bytes: 文件原始字节
    ///
    /// # 返回
    /// - Ok(SheetGrid): A1 对齐的矩形网格
    /// - Err: 字节损坏 / 不可读
    fn decode(&self, bytes: &[u8]) -> ImportResult<SheetGrid>;
}

// ==========================================
// LedgerImporter Trait
// ==========================================
// 用途: 单文件摄入（解析 + 格式识别）
// 实现者: FileIngestor
#[async_trait]
pub trait LedgerImporter: Send + Sync {
    /// 摄入一个上传文件
    ///
    /// # 参数
    /// - id: 选择文件时分配的标识
    /// - bytes: 文件原始字节
    /// - declared_name: 实际上传的文件名
    ///
    /// # 返回
    /// - UploadedFile: 终态快照（success / error）；失败不会以 Err 形式传出
    async fn ingest(&self, id: FileId, bytes: Vec<u8>, declared_name: &str) -> UploadedFile;
}
