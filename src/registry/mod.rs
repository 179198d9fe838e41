// ==========================================
// 充电台账合并系统 - 格式注册表层
// ==========================================

pub mod canonical_alias;
pub mod form_registry;
pub mod vendor_format;

pub use canonical_alias::CanonicalAlias;
pub use form_registry::FormRegistry;
pub use vendor_format::VendorFormat;
