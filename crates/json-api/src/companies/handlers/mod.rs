//! Company Handlers

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};

use planilla_app::domain::companies::records::PaySplit;

pub(crate) mod create;
pub(crate) mod delete;
pub(crate) mod get;
pub(crate) mod index;
pub(crate) mod update;

/// Percentages of the monthly payroll paid on each pay date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub(crate) struct PaySplitBody {
    pub first: u8,
    pub second: u8,
    pub third: u8,
    pub fourth: u8,
}

impl Default for PaySplitBody {
    fn default() -> Self {
        PaySplit::default().into()
    }
}

impl From<PaySplit> for PaySplitBody {
    fn from(split: PaySplit) -> Self {
        Self {
            first: split.first,
            second: split.second,
            third: split.third,
            fourth: split.fourth,
        }
    }
}

impl From<PaySplitBody> for PaySplit {
    fn from(body: PaySplitBody) -> Self {
        Self {
            first: body.first,
            second: body.second,
            third: body.third,
            fourth: body.fourth,
        }
    }
}
