// ==========================================
// 充电台账合并系统 - 文件摄入器
// ==========================================
// 流程: 解码 → 以首行为表头保存原始数据 → 逐个候选表头行匹配 → 标记终态
// 红线: 单文件失败只影响该文件，不向调用方抛错
// ==========================================

use crate::domain::uploaded_file::{FileId, UploadedFile};
use crate::i18n::DEFAULT_LOCALE;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::file_parser::UniversalFileParser;
use crate::importer::header_matcher::HeaderMatcher;
use crate::importer::importer_trait::LedgerImporter;
use crate::importer::sheet_grid::SheetGrid;
use crate::registry::FormRegistry;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

pub struct FileIngestor {
    registry: Arc<FormRegistry>,
    matcher: HeaderMatcher,
    locale: String,
}

impl FileIngestor {
    pub fn new(registry: Arc<FormRegistry>) -> Self {
        Self::with_locale(registry, DEFAULT_LOCALE)
    }

    /// 指定文案语言（写入 error_message）
    pub fn with_locale(registry: Arc<FormRegistry>, locale: &str) -> Self {
        Self {
            matcher: HeaderMatcher::new(registry.clone()),
            registry,
            locale: locale.to_string(),
        }
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// 在阻塞线程池中解码（解码是唯一的长耗时步骤）
    async fn decode(bytes: Vec<u8>, declared_name: &str) -> ImportResult<SheetGrid> {
        let name = declared_name.to_string();
        tokio::task::spawn_blocking(move || UniversalFileParser.parse(&bytes, &name))
            .await
            .map_err(|e| ImportError::InternalError(format!("解码任务中断: {}", e)))?
    }

    /// 对已解码的网格做格式识别，结果写回 `file`
    pub fn classify(&self, file: &mut UploadedFile, grid: &SheetGrid) {
        // 无论是否命中，先以首行为表头保存一份原始数据
        file.attach_raw_data(grid.records_at(1));

        for offset in self.registry.list_header_row_offsets() {
            let headers = grid.header_at(offset);
            match self.matcher.match_header_row(headers.as_deref(), offset) {
                Ok(form) => {
                    let records = grid.records_at(offset);
                    info!(
                        file_id = %file.id,
                        form_id = %form.form_id,
                        header_row = offset,
                        rows = records.len(),
                        "格式识别成功"
                    );
                    file.mark_matched(form, records);
                    return;
                }
                Err(err) => {
                    debug!(file_id = %file.id, header_row = offset, reason = %err, "候选表头行未命中");
                }
            }
        }

        warn!(file_id = %file.id, file_name = %file.name, "未登记的厂商格式，保留原始数据");
        file.mark_unsupported(ImportError::UnsupportedFormat.user_message(&self.locale));
    }
}

#[async_trait]
impl LedgerImporter for FileIngestor {
    #[instrument(skip(self, bytes), fields(file_id = %id, size = bytes.len()))]
    async fn ingest(&self, id: FileId, bytes: Vec<u8>, declared_name: &str) -> UploadedFile {
        // 文件名以实际上传的为准
        let mut file = UploadedFile::pending(id, declared_name);

        match Self::decode(bytes, declared_name).await {
            Ok(grid) => self.classify(&mut file, &grid),
            Err(err) => {
                warn!(file_id = %id, file_name = declared_name, error = %err, "文件解码失败");
                file.mark_failed(err.user_message(&self.locale));
            }
        }

        file
    }
}
