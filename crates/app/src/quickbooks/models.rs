//! QuickBooks accounting API payloads.
//!
//! Only the fields this service reads are modelled; everything else in the
//! provider's documents is ignored.

use serde::{Deserialize, Serialize};

/// `{"value": "...", "name": "..."}` reference to another entity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Reference {
    pub value: String,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Account {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub fully_qualified_name: Option<String>,
    #[serde(default)]
    pub acct_num: Option<String>,
    #[serde(default)]
    pub account_type: Option<String>,
    #[serde(default)]
    pub account_sub_type: Option<String>,
    #[serde(default)]
    pub classification: Option<String>,
    #[serde(default)]
    pub current_balance: Option<f64>,
    #[serde(default = "active_by_default")]
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TaxRate {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,

    /// Percentage, e.g. `13` for 13 %.
    #[serde(default)]
    pub rate_value: Option<f64>,

    #[serde(default = "active_by_default")]
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TaxCode {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub sales_tax_rate_list: Option<TaxRateList>,
    #[serde(default = "active_by_default")]
    pub active: bool,
}

impl TaxCode {
    /// Ids of the sales tax rates linked to this code, in provider order.
    pub fn sales_rate_ids(&self) -> impl Iterator<Item = &str> {
        self.sales_tax_rate_list
            .iter()
            .flat_map(|list| list.tax_rate_detail.iter())
            .map(|detail| detail.tax_rate_ref.value.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TaxRateList {
    #[serde(default)]
    pub tax_rate_detail: Vec<TaxRateDetail>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TaxRateDetail {
    pub tax_rate_ref: Reference,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Invoice {
    pub id: String,
    #[serde(default)]
    pub txn_date: Option<String>,
    #[serde(default)]
    pub line: Vec<Line>,
    #[serde(default)]
    pub txn_tax_detail: Option<TxnTaxDetail>,
}

impl Invoice {
    /// Tax rates the provider applied to the whole transaction.
    pub fn tax_rate_ids(&self) -> impl Iterator<Item = &str> {
        self.txn_tax_detail
            .iter()
            .flat_map(|detail| detail.tax_line.iter())
            .filter_map(|line| line.tax_line_detail.as_ref())
            .map(|detail| detail.tax_rate_ref.value.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Line {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub amount: f64,
    #[serde(default)]
    pub detail_type: Option<String>,
    #[serde(default)]
    pub sales_item_line_detail: Option<SalesItemLineDetail>,
}

impl Line {
    /// Only item lines carry a taxable base; subtotal and discount lines do not.
    #[must_use]
    pub fn is_sales_item(&self) -> bool {
        self.sales_item_line_detail.is_some()
    }

    #[must_use]
    pub fn tax_code_id(&self) -> Option<&str> {
        self.sales_item_line_detail
            .as_ref()
            .and_then(|detail| detail.tax_code_ref.as_ref())
            .map(|code| code.value.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SalesItemLineDetail {
    #[serde(default)]
    pub tax_code_ref: Option<Reference>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TxnTaxDetail {
    #[serde(default)]
    pub tax_line: Vec<TaxLine>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TaxLine {
    #[serde(default)]
    pub amount: f64,
    #[serde(default)]
    pub tax_line_detail: Option<TaxLineDetail>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TaxLineDetail {
    pub tax_rate_ref: Reference,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CompanyInfo {
    pub company_name: String,
    #[serde(default)]
    pub legal_name: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct CompanyInfoResponse {
    pub company_info: CompanyInfo,
}

fn active_by_default() -> bool {
    true
}
