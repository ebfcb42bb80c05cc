use crate::types::{AriaError, AriaResult};
use chrono::NaiveDate;

/// Position of the date-pair token in a `-`-split GUNW product name,
/// e.g. `S1-GUNW-D-R-163-tops-20250527_20250503-212910-...`.
const DATE_PAIR_TOKEN_INDEX: usize = 6;

/// Extract the (reference, secondary) date pair encoded in a GUNW
/// product name.
///
/// The encoding is fixed: a name that does not carry exactly two
/// 8-digit `YYYYMMDD` dates at the expected position is a hard error,
/// never a "no match".
pub fn parse_date_pair(product_name: &str) -> AriaResult<(NaiveDate, NaiveDate)> {
    let token = product_name
        .split('-')
        .nth(DATE_PAIR_TOKEN_INDEX)
        .ok_or_else(|| {
            AriaError::ProductName(format!("'{}' has no date-pair token", product_name))
        })?;

    let mut parts = token.split('_');
    let (reference, secondary) = match (parts.next(), parts.next(), parts.next()) {
        (Some(reference), Some(secondary), None) => (reference, secondary),
        _ => {
            return Err(AriaError::ProductName(format!(
                "'{}' date-pair token '{}' is not two '_'-joined dates",
                product_name, token
            )))
        }
    };

    Ok((
        parse_compact_date(product_name, reference)?,
        parse_compact_date(product_name, secondary)?,
    ))
}

/// True if the product name encodes exactly this (reference, secondary)
/// date pair.
pub fn dates_match(
    product_name: &str,
    reference: NaiveDate,
    secondary: NaiveDate,
) -> AriaResult<bool> {
    let (name_reference, name_secondary) = parse_date_pair(product_name)?;
    Ok(name_reference == reference && name_secondary == secondary)
}

/// True if any of the product names encodes the given date pair.
/// A malformed name propagates as an error even when other names are
/// present.
pub fn any_product_matches(
    product_names: &[String],
    reference: NaiveDate,
    secondary: NaiveDate,
) -> AriaResult<bool> {
    for name in product_names {
        if dates_match(name, reference, secondary)? {
            return Ok(true);
        }
    }

    Ok(false)
}

fn parse_compact_date(product_name: &str, token: &str) -> AriaResult<NaiveDate> {
    if token.len() != 8 || !token.bytes().all(|b| b.is_ascii_digit()) {
        return Err(AriaError::ProductName(format!(
            "'{}' contains '{}' where an 8-digit YYYYMMDD date was expected",
            product_name, token
        )));
    }

    NaiveDate::parse_from_str(token, "%Y%m%d").map_err(|e| {
        AriaError::ProductName(format!(
            "'{}' contains invalid date '{}': {}",
            product_name, token, e
        ))
    })
}
