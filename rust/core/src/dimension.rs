// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Dimension-string normalization
//!
//! Architectural drawings annotate lengths as feet-and-inches strings
//! such as `12'-6"`. This module reduces such a token to a plain number
//! of feet so two of them can be multiplied into an area.

use crate::error::{Error, Result};

/// Normalize a raw dimension token into a length in feet.
///
/// Every character that is not a digit, quote mark, or hyphen is
/// stripped first, so tokens like `±12'-6" (typ.)` still parse. The
/// remainder is split on the foot mark: the first segment is whole feet,
/// the second (if present) is inches.
///
/// ```
/// # use plan_carbon_core::dimension::parse_dimension;
/// assert_eq!(parse_dimension("12'-6\"").unwrap(), 12.5);
/// ```
pub fn parse_dimension(raw: &str) -> Result<f64> {
    if !raw.chars().any(|c| c.is_ascii_digit()) {
        return Err(Error::DimensionFormat(raw.to_string()));
    }

    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '\'' || *c == '"' || *c == '-')
        .collect();
    let cleaned = cleaned.replace('"', "");

    let mut parts = cleaned.split('\'');
    let feet_part = parts.next().unwrap_or("");
    let inch_part = parts.next().unwrap_or("");

    let feet: i64 = if feet_part.is_empty() {
        0
    } else {
        feet_part
            .parse()
            .map_err(|_| Error::DimensionFormat(raw.to_string()))?
    };

    // The hyphen separating feet from inches survives the character
    // filter; trim it before parsing the inch segment.
    let inch_part = inch_part.trim_matches('-');
    let inches: i64 = if inch_part.is_empty() {
        0
    } else {
        inch_part
            .parse()
            .map_err(|_| Error::DimensionFormat(raw.to_string()))?
    };

    Ok(feet as f64 + inches as f64 / 12.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn feet_and_inches() {
        assert_relative_eq!(parse_dimension("12'-6\"").unwrap(), 12.5);
        assert_relative_eq!(parse_dimension("10'-0\"").unwrap(), 10.0);
        assert_relative_eq!(parse_dimension("0'-9\"").unwrap(), 0.75);
    }

    #[test]
    fn feet_only() {
        assert_relative_eq!(parse_dimension("8'").unwrap(), 8.0);
    }

    #[test]
    fn inches_only() {
        // Leading foot mark with no feet segment: `'6"` reads as 6 inches.
        assert_relative_eq!(parse_dimension("'6\"").unwrap(), 0.5);
    }

    #[test]
    fn surrounding_noise_is_stripped() {
        assert_relative_eq!(parse_dimension("approx. 12'-6\" clear").unwrap(), 12.5);
    }

    #[test]
    fn exact_integer_combinations() {
        for feet in 0..24u32 {
            for inches in 0..12u32 {
                let raw = format!("{feet}'-{inches}\"");
                let expected = feet as f64 + inches as f64 / 12.0;
                assert_relative_eq!(parse_dimension(&raw).unwrap(), expected);
            }
        }
    }

    #[test]
    fn no_digits_fails() {
        assert!(matches!(
            parse_dimension("N/A"),
            Err(Error::DimensionFormat(_))
        ));
    }

    #[test]
    fn stray_quote_marks_fail() {
        assert!(parse_dimension("'").is_err());
        assert!(parse_dimension("\"").is_err());
        assert!(parse_dimension("").is_err());
    }

    #[test]
    fn error_is_local_to_the_token() {
        let err = parse_dimension("twelve feet").unwrap_err();
        assert!(err.to_string().contains("twelve feet"));
    }
}
