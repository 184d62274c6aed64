//! Profile Handlers

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};

use planilla_app::domain::profiles::records::CompanyProfile;

pub(crate) mod get;
pub(crate) mod update;

/// How a company handles IVA
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub(crate) struct ProfileBody {
    /// Sales go through a point-of-sale system
    pub uses_pos: bool,

    /// Creditable share of input VAT, 0 to 100
    pub prorata_percentage: Option<f64>,

    /// Exoneration document references
    pub exemptions: Vec<String>,

    pub notes: Option<String>,
}

impl From<CompanyProfile> for ProfileBody {
    fn from(profile: CompanyProfile) -> Self {
        Self {
            uses_pos: profile.uses_pos,
            prorata_percentage: profile.prorata_percentage,
            exemptions: profile.exemptions,
            notes: profile.notes,
        }
    }
}

impl From<ProfileBody> for CompanyProfile {
    fn from(body: ProfileBody) -> Self {
        Self {
            uses_pos: body.uses_pos,
            prorata_percentage: body.prorata_percentage,
            exemptions: body.exemptions,
            notes: body.notes,
        }
    }
}
