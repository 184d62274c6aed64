//! Calendar date query parsing helpers.

use jiff::civil::Date;
use salvo::{oapi::extract::QueryParam, prelude::StatusError};

use crate::extensions::*;

pub(crate) trait DateParamExt {
    /// Parses an ISO-8601 calendar date (`YYYY-MM-DD`).
    fn into_date(self, name: &str) -> Result<Date, StatusError>;
}

impl DateParamExt for QueryParam<String, true> {
    fn into_date(self, name: &str) -> Result<Date, StatusError> {
        self.into_inner()
            .parse::<Date>()
            .or_400(&format!("could not parse \"{name}\" query parameter"))
    }
}

pub(crate) trait DateStrExt {
    /// Parses a request body date, answering 400 with the field name.
    fn parse_date(&self, field: &str) -> Result<Date, StatusError>;
}

impl DateStrExt for str {
    fn parse_date(&self, field: &str) -> Result<Date, StatusError> {
        self.parse::<Date>()
            .or_400(&format!("could not parse \"{field}\" as YYYY-MM-DD"))
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use super::*;

    #[test]
    fn body_dates_parse_iso_calendar_dates() {
        assert_eq!("2026-09-30".parse_date("pay_date").ok(), Some(date(2026, 9, 30)));
    }

    #[test]
    fn malformed_body_dates_are_bad_requests() {
        let error = "30/09/2026"
            .parse_date("pay_date")
            .err()
            .map(|e| e.code);

        assert_eq!(error, Some(salvo::http::StatusCode::BAD_REQUEST));
    }
}
