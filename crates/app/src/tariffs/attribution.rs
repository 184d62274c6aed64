//! Per-line tariff attribution and the sales summary built from it.

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use crate::{
    quickbooks::models::{Invoice, TaxCode, TaxRate},
    tariffs::{Tariff, classify},
};

/// Tax rates and tax code links needed to attribute invoice lines.
#[derive(Debug, Clone, Default)]
pub struct RateLookup {
    tariffs: HashMap<String, Tariff>,
    code_rates: HashMap<String, Vec<String>>,
}

impl RateLookup {
    #[must_use]
    pub fn new(rates: &[TaxRate], codes: &[TaxCode]) -> Self {
        let tariffs = rates
            .iter()
            .map(|rate| (rate.id.clone(), classify(rate.rate_value, &rate.name)))
            .collect();

        let code_rates = codes
            .iter()
            .map(|code| {
                let linked = code.sales_rate_ids().map(str::to_string).collect();

                (code.id.clone(), linked)
            })
            .collect();

        Self {
            tariffs,
            code_rates,
        }
    }

    /// Picks the rate that applies to a line and classifies it.
    ///
    /// Preference order: a rate the transaction references that is linked to
    /// the line's tax code, then the code's first linked rate, then the first
    /// rate the transaction references. Lines without a rate are exempt.
    #[must_use]
    pub fn line_tariff(&self, tax_code: Option<&str>, referenced: &[&str]) -> Tariff {
        let linked = tax_code
            .and_then(|code| self.code_rates.get(code))
            .map(Vec::as_slice)
            .unwrap_or_default();

        let rate_id = referenced
            .iter()
            .copied()
            .find(|id| linked.iter().any(|link| link == id))
            .or_else(|| linked.first().map(String::as_str))
            .or_else(|| referenced.first().copied());

        rate_id
            .and_then(|id| self.tariffs.get(id))
            .copied()
            .unwrap_or(Tariff::Exempt)
    }
}

/// Taxable base per tariff, in minor units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SalesSummary {
    pub invoices: usize,
    pub totals: BTreeMap<Tariff, i64>,
}

impl SalesSummary {
    #[must_use]
    pub fn total_for(&self, tariff: Tariff) -> i64 {
        self.totals.get(&tariff).copied().unwrap_or_default()
    }
}

fn to_minor_units(amount: f64) -> i64 {
    (amount * 100.0).round() as i64
}

/// Sums sales line amounts per tariff across `invoices`.
///
/// Every tariff appears in the result, with zero when nothing was sold under it.
#[must_use]
pub fn summarize_sales(invoices: &[Invoice], lookup: &RateLookup) -> SalesSummary {
    let mut totals: BTreeMap<Tariff, i64> =
        Tariff::ALL.into_iter().map(|tariff| (tariff, 0)).collect();

    for invoice in invoices {
        let referenced: Vec<&str> = invoice.tax_rate_ids().collect();

        for line in invoice.line.iter().filter(|line| line.is_sales_item()) {
            let tariff = lookup.line_tariff(line.tax_code_id(), &referenced);

            let total = totals.entry(tariff).or_default();
            *total = total.saturating_add(to_minor_units(line.amount));
        }
    }

    SalesSummary {
        invoices: invoices.len(),
        totals,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn rate(id: &str, name: &str, value: Option<f64>) -> TaxRate {
        TaxRate {
            id: id.to_string(),
            name: name.to_string(),
            description: None,
            rate_value: value,
            active: true,
        }
    }

    fn code(id: &str, rates: &[&str]) -> Result<TaxCode, serde_json::Error> {
        let details: Vec<_> = rates
            .iter()
            .map(|rate| json!({ "TaxRateRef": { "value": rate } }))
            .collect();

        serde_json::from_value(json!({
            "Id": id,
            "Name": format!("Code {id}"),
            "SalesTaxRateList": { "TaxRateDetail": details },
        }))
    }

    fn invoice(lines: &[(f64, &str)], referenced: &[&str]) -> Result<Invoice, serde_json::Error> {
        let lines: Vec<_> = lines
            .iter()
            .map(|(amount, code)| {
                json!({
                    "Amount": amount,
                    "DetailType": "SalesItemLineDetail",
                    "SalesItemLineDetail": { "TaxCodeRef": { "value": code } },
                })
            })
            .chain([json!({ "Amount": 999.0, "DetailType": "SubTotalLineDetail" })])
            .collect();

        let tax_lines: Vec<_> = referenced
            .iter()
            .map(|rate| {
                json!({
                    "Amount": 0.0,
                    "TaxLineDetail": { "TaxRateRef": { "value": rate } },
                })
            })
            .collect();

        serde_json::from_value(json!({
            "Id": "1",
            "Line": lines,
            "TxnTaxDetail": { "TaxLine": tax_lines },
        }))
    }

    fn lookup() -> Result<RateLookup, serde_json::Error> {
        let rates = [
            rate("r13", "IVA 13%", Some(13.0)),
            rate("r4", "IVA 4%", Some(4.0)),
            rate("r1", "Canasta", Some(1.0)),
        ];

        let codes = [code("c-general", &["r13"])?, code("c-mixed", &["r4", "r1"])?];

        Ok(RateLookup::new(&rates, &codes))
    }

    #[test]
    fn referenced_rate_linked_to_the_code_wins() -> Result<(), serde_json::Error> {
        let lookup = lookup()?;

        assert_eq!(lookup.line_tariff(Some("c-mixed"), &["r13", "r1"]), Tariff::Reduced1);

        Ok(())
    }

    #[test]
    fn falls_back_to_first_linked_then_first_referenced() -> Result<(), serde_json::Error> {
        let lookup = lookup()?;

        assert_eq!(lookup.line_tariff(Some("c-mixed"), &["r13"]), Tariff::Reduced4);
        assert_eq!(lookup.line_tariff(Some("unknown"), &["r13"]), Tariff::General13);
        assert_eq!(lookup.line_tariff(None, &["r4"]), Tariff::Reduced4);

        Ok(())
    }

    #[test]
    fn lines_without_any_rate_are_exempt() -> Result<(), serde_json::Error> {
        let lookup = lookup()?;

        assert_eq!(lookup.line_tariff(None, &[]), Tariff::Exempt);
        assert_eq!(lookup.line_tariff(None, &["missing"]), Tariff::Exempt);

        Ok(())
    }

    #[test]
    fn summary_sums_sales_lines_in_minor_units() -> Result<(), serde_json::Error> {
        let lookup = lookup()?;

        let invoices = [
            invoice(&[(1000.10, "c-general"), (250.0, "c-mixed")], &["r13", "r4"])?,
            invoice(&[(99.999, "c-general")], &["r13"])?,
        ];

        let summary = summarize_sales(&invoices, &lookup);

        assert_eq!(summary.invoices, 2);
        assert_eq!(summary.total_for(Tariff::General13), 110_010);
        assert_eq!(summary.total_for(Tariff::Reduced4), 25_000);
        assert_eq!(summary.total_for(Tariff::Exempt), 0);
        assert_eq!(summary.totals.len(), Tariff::ALL.len());

        Ok(())
    }
}
