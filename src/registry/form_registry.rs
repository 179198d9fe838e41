// ==========================================
// 充电台账合并系统 - 格式注册表
// ==========================================
// 职责: 厂商格式 + 标准字段别名的只读集合
// ==========================================

use crate::domain::types::CanonicalField;
use crate::registry::canonical_alias::{builtin_aliases, CanonicalAlias};
use crate::registry::vendor_format::{builtin_formats, VendorFormat};
use std::collections::BTreeSet;

#[derive(Debug, Clone)]
pub struct FormRegistry {
    formats: Vec<VendorFormat>,
    aliases: Vec<CanonicalAlias>,
}

impl Default for FormRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl FormRegistry {
    /// 内置格式与别名
    pub fn builtin() -> Self {
        Self {
            formats: builtin_formats(),
            aliases: builtin_aliases(),
        }
    }

    /// 指定格式列表（登记顺序即匹配顺序），别名表使用内置
    pub fn with_formats(formats: Vec<VendorFormat>) -> Self {
        Self {
            formats,
            aliases: builtin_aliases(),
        }
    }

    /// 在内置格式之后追加格式
    pub fn extended(extra: Vec<VendorFormat>) -> Self {
        let mut registry = Self::builtin();
        registry.formats.extend(extra);
        registry
    }

    pub fn formats(&self) -> &[VendorFormat] {
        &self.formats
    }

    pub fn aliases(&self) -> &[CanonicalAlias] {
        &self.aliases
    }

    pub fn canonical_fields(&self) -> Vec<CanonicalField> {
        self.aliases.iter().map(|a| a.field).collect()
    }

    pub fn find_format(&self, form_id: &str) -> Option<&VendorFormat> {
        self.formats.iter().find(|f| f.id == form_id)
    }

    /// 所有格式声明的表头行（去重，升序）
    pub fn list_header_row_offsets(&self) -> Vec<usize> {
        self.formats
            .iter()
            .map(|f| f.header_row)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}
