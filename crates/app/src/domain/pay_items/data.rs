//! Pay Item Data

use crate::domain::pay_items::records::{PayItemKind, PayItemUuid};

/// New Pay Item Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewPayItem {
    pub uuid: PayItemUuid,
    pub code: String,
    pub name: String,
    pub kind: PayItemKind,
}

/// Pay Item Update Data
#[derive(Debug, Clone, PartialEq)]
pub struct PayItemUpdate {
    pub code: String,
    pub name: String,
    pub kind: PayItemKind,
}
