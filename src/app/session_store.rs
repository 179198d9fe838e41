// ==========================================
// 充电台账合并系统 - 会话存储
// ==========================================
// 职责: 一个会话内的上传文件集合（仅内存，生命周期 = 会话）
// 红线: 每次写入都在锁内对当前集合做读-改-写，不基于旧快照
// 红线: 迟到的结果（槽位已被重新选择）一律丢弃
// ==========================================

use crate::domain::uploaded_file::{FileId, UploadedFile};
use chrono::Utc;
use tokio::sync::Mutex;
use tracing::debug;

/// 按版本写入的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOutcome<R> {
    /// 已写入
    Applied(R),
    /// 文件已被删除
    Missing,
    /// 槽位版本已变化（期间被重新选择或改写）
    Superseded,
}

#[derive(Debug, Default)]
struct StoreInner {
    files: Vec<UploadedFile>,
    last_id: u64,
    last_revision: u64,
}

impl StoreInner {
    /// 按上传时间（毫秒）分配，保证严格递增
    fn next_id(&mut self) -> FileId {
        let now = Utc::now().timestamp_millis().max(0) as u64;
        self.last_id = now.max(self.last_id + 1);
        FileId(self.last_id)
    }

    fn next_revision(&mut self) -> u64 {
        self.last_revision += 1;
        self.last_revision
    }

    fn position(&self, id: FileId) -> Option<usize> {
        self.files.iter().position(|f| f.id == id)
    }

    /// 定位当前版本仍为 `revision` 的文件
    fn current(&self, id: FileId, revision: u64) -> Result<usize, WriteOutcome<()>> {
        let pos = self.position(id).ok_or(WriteOutcome::Missing)?;
        if self.files[pos].revision == revision {
            Ok(pos)
        } else {
            Err(WriteOutcome::Superseded)
        }
    }
}

#[derive(Debug, Default)]
pub struct SessionStore {
    inner: Mutex<StoreInner>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 追加一个待上传文件（name 为空即占位输入框）
    pub async fn push_pending(&self, name: &str) -> UploadedFile {
        let mut inner = self.inner.lock().await;
        let id = inner.next_id();
        let mut file = UploadedFile::pending(id, name);
        file.revision = inner.next_revision();
        inner.files.push(file.clone());
        file
    }

    /// 把已有槽位重置为待处理并改名，返回新版本号；槽位不存在返回 None
    pub async fn reset_to_pending(&self, id: FileId, name: &str) -> Option<u64> {
        let mut inner = self.inner.lock().await;
        let pos = inner.position(id)?;
        let revision = inner.next_revision();

        let mut file = UploadedFile::pending(id, name);
        file.selected = inner.files[pos].selected;
        file.revision = revision;
        inner.files[pos] = file;
        Some(revision)
    }

    /// 写回摄入结果（保留勾选状态）
    ///
    /// 只有槽位版本仍为 `revision` 时才写入；文件已删除或已被重新选择时丢弃。
    pub async fn apply(&self, mut result: UploadedFile, revision: u64) -> WriteOutcome<()> {
        let mut inner = self.inner.lock().await;
        let pos = match inner.current(result.id, revision) {
            Ok(pos) => pos,
            Err(outcome) => {
                debug!(file_id = %result.id, revision, outcome = ?outcome, "丢弃过期的摄入结果");
                return outcome;
            }
        };

        result.selected = inner.files[pos].selected;
        result.revision = revision;
        inner.files[pos] = result;
        WriteOutcome::Applied(())
    }

    /// 在锁内按版本修改单个文件，写入后版本递增
    pub async fn update_at<F, R>(&self, id: FileId, revision: u64, f: F) -> WriteOutcome<R>
    where
        F: FnOnce(&mut UploadedFile) -> R,
    {
        let mut inner = self.inner.lock().await;
        let pos = match inner.current(id, revision) {
            Ok(pos) => pos,
            Err(WriteOutcome::Missing) => return WriteOutcome::Missing,
            Err(_) => return WriteOutcome::Superseded,
        };

        let next = inner.next_revision();
        let file = &mut inner.files[pos];
        file.revision = next;
        WriteOutcome::Applied(f(file))
    }

    /// 在锁内修改单个文件
    pub async fn update<F, R>(&self, id: FileId, f: F) -> Option<R>
    where
        F: FnOnce(&mut UploadedFile) -> R,
    {
        let mut inner = self.inner.lock().await;
        let pos = inner.position(id)?;
        Some(f(&mut inner.files[pos]))
    }

    pub async fn get(&self, id: FileId) -> Option<UploadedFile> {
        let inner = self.inner.lock().await;
        inner.files.iter().find(|f| f.id == id).cloned()
    }

    /// 当前集合快照（按加入顺序）
    pub async fn snapshot(&self) -> Vec<UploadedFile> {
        self.inner.lock().await.files.clone()
    }

    pub async fn remove(&self, id: FileId) -> Option<UploadedFile> {
        let mut inner = self.inner.lock().await;
        let pos = inner.position(id)?;
        Some(inner.files.remove(pos))
    }

    /// 删除全部勾选文件，返回删除数量
    pub async fn remove_selected(&self) -> usize {
        let mut inner = self.inner.lock().await;
        let before = inner.files.len();
        inner.files.retain(|f| !f.selected);
        before - inner.files.len()
    }

    /// 末尾的空占位槽位
    pub async fn trailing_placeholder(&self) -> Option<FileId> {
        let inner = self.inner.lock().await;
        inner
            .files
            .last()
            .filter(|f| f.is_placeholder())
            .map(|f| f.id)
    }

    pub async fn len(&self) -> usize {
        self.inner.lock().await.files.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
