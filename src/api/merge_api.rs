// ==========================================
// 充电台账合并系统 - 合并 API
// ==========================================
// 职责: 面向界面的统一入口（上传 / 删除 / 勾选 / 手动映射 / 台账视图 / 导出）
// 红线: 单文件失败只落在该文件状态上，不中断批次
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::app::session_store::{SessionStore, WriteOutcome};
use crate::domain::ledger::LedgerRow;
use crate::domain::uploaded_file::{FileId, UploadedFile};
use crate::engine::{DateRange, LedgerBuilder, RemapCommit, RemapSession};
use crate::exporter::LedgerExporter;
use crate::i18n;
use crate::importer::{ImportError, LedgerImporter, UniversalFileParser};
use crate::registry::{FormRegistry, VendorFormat};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// 台账视图
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerView {
    pub rows: Vec<LedgerRow>,
    /// 处于 error 状态、未计入台账的文件
    pub excluded_error_files: Vec<FileId>,
}

impl LedgerView {
    /// 是否需要先向用户确认（存在未计入的错误文件）
    pub fn needs_confirmation(&self) -> bool {
        !self.excluded_error_files.is_empty()
    }
}

/// 导出结果
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerExport {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

// ==========================================
// MergeApi
// ==========================================
pub struct MergeApi {
    store: SessionStore,
    registry: Arc<FormRegistry>,
    importer: Arc<dyn LedgerImporter>,
    builder: LedgerBuilder,
    exporter: LedgerExporter,
    accepted_extensions: Vec<String>,
    locale: String,
}

impl MergeApi {
    pub fn new(
        registry: Arc<FormRegistry>,
        importer: Arc<dyn LedgerImporter>,
        exporter: LedgerExporter,
        accepted_extensions: Vec<String>,
        locale: &str,
    ) -> Self {
        Self {
            store: SessionStore::new(),
            builder: LedgerBuilder::new(registry.clone()),
            registry,
            importer,
            exporter,
            accepted_extensions,
            locale: locale.to_string(),
        }
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// 是否为允许上传的扩展名
    pub fn is_accepted(&self, file_name: &str) -> bool {
        let ext = UniversalFileParser::extension_of(file_name);
        self.accepted_extensions.iter().any(|e| *e == ext)
    }

    // ==========================================
    // 文件上传
    // ==========================================

    /// 新增一个空的上传槽位
    pub async fn add_placeholder(&self) -> UploadedFile {
        self.store.push_pending("").await
    }

    /// 上传单个文件
    ///
    /// # 参数
    /// - slot: 已有槽位（占位框或重新选择的文件）；None 时追加新文件
    /// - declared_name: 实际文件名
    /// - bytes: 文件字节
    ///
    /// # 返回
    /// - Ok(UploadedFile): 摄入后的终态快照（status 为 success 或 error）
    /// - Err(NotFound): 槽位不存在，或摄入期间文件已被删除
    /// - Err(Superseded): 摄入期间该槽位又被选择了其他文件，本次结果被丢弃
    #[instrument(skip(self, bytes), fields(size = bytes.len()))]
    pub async fn submit_file(
        &self,
        slot: Option<FileId>,
        declared_name: &str,
        bytes: Vec<u8>,
    ) -> ApiResult<UploadedFile> {
        let (id, revision) = match slot {
            Some(id) => {
                let revision = self
                    .store
                    .reset_to_pending(id, declared_name)
                    .await
                    .ok_or(ApiError::NotFound(id))?;
                (id, revision)
            }
            None => {
                let file = self.store.push_pending(declared_name).await;
                (file.id, file.revision)
            }
        };

        let mut result = if self.is_accepted(declared_name) {
            self.importer.ingest(id, bytes, declared_name).await
        } else {
            let ext = UniversalFileParser::extension_of(declared_name);
            let mut file = UploadedFile::pending(id, declared_name);
            file.mark_failed(ImportError::UnsupportedExtension(ext).user_message(&self.locale));
            file
        };

        result.revision = revision;
        match self.store.apply(result.clone(), revision).await {
            WriteOutcome::Applied(()) => {}
            WriteOutcome::Missing => {
                warn!(file_id = %id, "摄入完成时文件已被删除");
                return Err(ApiError::NotFound(id));
            }
            WriteOutcome::Superseded => {
                warn!(file_id = %id, file_name = %declared_name, "槽位已被重新选择，丢弃本次摄入结果");
                return Err(ApiError::Superseded(id));
            }
        }

        info!(file_id = %id, status = %result.status, rows = result.row_count(), "文件已处理");
        Ok(result)
    }

    /// 批量拖入
    ///
    /// 只保留允许的扩展名；逐个按拖入顺序摄入，前一个完成后才开始下一个。
    /// 末尾若有空占位槽位，第一个文件复用它。
    ///
    /// # 错误
    /// - InvalidInput: 没有任何可接受的文件
    pub async fn submit_batch(&self, files: Vec<(String, Vec<u8>)>) -> ApiResult<Vec<UploadedFile>> {
        let accepted: Vec<(String, Vec<u8>)> = files
            .into_iter()
            .filter(|(name, _)| self.is_accepted(name))
            .collect();

        if accepted.is_empty() {
            return Err(ApiError::InvalidInput(i18n::t_in(&self.locale, "ingest.excel_only")));
        }

        let mut slot = self.store.trailing_placeholder().await;
        let mut results = Vec::with_capacity(accepted.len());

        for (name, bytes) in accepted {
            match self.submit_file(slot.take(), &name, bytes).await {
                Ok(file) => results.push(file),
                // 批次中途被删除的文件不影响其余文件
                Err(ApiError::NotFound(id)) | Err(ApiError::Superseded(id)) => {
                    warn!(file_id = %id, file_name = %name, "批次中的文件已被删除或替换")
                }
                Err(err) => return Err(err),
            }
        }

        Ok(results)
    }

    // ==========================================
    // 文件列表
    // ==========================================

    pub async fn list_files(&self) -> Vec<UploadedFile> {
        self.store.snapshot().await
    }

    pub async fn get_file(&self, id: FileId) -> ApiResult<UploadedFile> {
        self.store.get(id).await.ok_or(ApiError::NotFound(id))
    }

    pub async fn files_snapshot_json(&self) -> ApiResult<String> {
        Ok(serde_json::to_string(&self.store.snapshot().await)?)
    }

    /// 删除文件（其台账贡献随下一次重算消失）
    pub async fn delete_file(&self, id: FileId) -> ApiResult<UploadedFile> {
        let removed = self.store.remove(id).await.ok_or(ApiError::NotFound(id))?;
        info!(file_id = %id, file_name = %removed.name, "文件已删除");
        Ok(removed)
    }

    /// 切换勾选，返回新的勾选状态
    pub async fn toggle_selected(&self, id: FileId) -> ApiResult<bool> {
        self.store
            .update(id, |f| {
                f.selected = !f.selected;
                f.selected
            })
            .await
            .ok_or(ApiError::NotFound(id))
    }

    pub async fn set_selected(&self, id: FileId, selected: bool) -> ApiResult<()> {
        self.store
            .update(id, |f| f.selected = selected)
            .await
            .ok_or(ApiError::NotFound(id))
    }

    /// 删除全部勾选文件，返回删除数量
    pub async fn delete_selected(&self) -> usize {
        let removed = self.store.remove_selected().await;
        info!(removed, "已删除勾选文件");
        removed
    }

    // ==========================================
    // 手动映射
    // ==========================================

    /// 为文件开启手动映射会话
    pub async fn open_remap(&self, id: FileId) -> ApiResult<RemapSession> {
        let file = self.get_file(id).await?;
        Ok(RemapSession::new(&file, &self.registry)?)
    }

    /// 确认提交手动映射：文件转为 success（사용자 수정），数据替换为归一后的记录
    ///
    /// # 错误
    /// - InvalidInput: 没有可写回的记录
    /// - NotFound: 文件已被删除
    /// - Superseded: 会话开启后文件已被重新选择或再次映射
    #[instrument(skip(self, commit), fields(file_id = %commit.file_id, rows = commit.records.len()))]
    pub async fn apply_remap(&self, commit: RemapCommit) -> ApiResult<UploadedFile> {
        if commit.records.is_empty() {
            return Err(ApiError::InvalidInput(i18n::t_in(&self.locale, "remap.empty")));
        }

        let data = commit.records.iter().map(|r| r.to_raw_record()).collect();
        let outcome = self
            .store
            .update_at(commit.file_id, commit.revision, |f| {
                f.mark_user_modified(data);
                f.clone()
            })
            .await;

        let file = match outcome {
            WriteOutcome::Applied(file) => file,
            WriteOutcome::Missing => return Err(ApiError::NotFound(commit.file_id)),
            WriteOutcome::Superseded => return Err(ApiError::Superseded(commit.file_id)),
        };

        info!(file_id = %file.id, rows = file.row_count(), "手动映射结果已写回");
        Ok(file)
    }

    // ==========================================
    // 台账 / 导出
    // ==========================================

    /// 按日期区间重算台账视图
    pub async fn ledger(&self, range: &DateRange) -> LedgerView {
        let files = self.store.snapshot().await;
        let excluded_error_files = files.iter().filter(|f| f.is_error()).map(|f| f.id).collect();

        LedgerView {
            rows: self.builder.recompute_in(&files, range),
            excluded_error_files,
        }
    }

    /// 导出当前视图（文件名使用 UTC 日期）
    pub async fn export(&self, range: &DateRange) -> ApiResult<LedgerExport> {
        self.export_at(range, Utc::now().date_naive()).await
    }

    pub async fn export_at(&self, range: &DateRange, date: NaiveDate) -> ApiResult<LedgerExport> {
        let view = self.ledger(range).await;
        let bytes = self.exporter.export(&view.rows)?;

        Ok(LedgerExport {
            file_name: self.exporter.file_name_for(date),
            bytes,
        })
    }

    /// 已登记的厂商格式
    pub fn vendor_formats(&self) -> Vec<VendorFormat> {
        self.registry.formats().to_vec()
    }
}
