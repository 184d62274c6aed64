//! Company Profile Records

use serde::{Deserialize, Serialize};

use crate::domain::profiles::errors::CompanyProfilesError;

/// Answers a bookkeeper gives about how a company handles IVA.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompanyProfile {
    /// Whether sales go through a point-of-sale system.
    pub uses_pos: bool,

    /// Share of input VAT that is creditable, when the company applies prorata.
    pub prorata_percentage: Option<f64>,

    /// Exemption references (e.g. exoneration document numbers).
    pub exemptions: Vec<String>,

    pub notes: Option<String>,
}

impl CompanyProfile {
    /// Checks the profile before it is saved.
    ///
    /// # Errors
    ///
    /// Returns an error when the prorata percentage is outside `0..=100`.
    pub fn validate(&self) -> Result<(), CompanyProfilesError> {
        match self.prorata_percentage {
            Some(percentage) if !(0.0..=100.0).contains(&percentage) => {
                Err(CompanyProfilesError::InvalidProrata(percentage))
            }
            _ => Ok(()),
        }
    }
}
