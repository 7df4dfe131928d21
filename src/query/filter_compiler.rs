use crate::{
    CampdirComparison, CampdirPredicate, CampdirRawQuery, CampdirRawValue, CampdirValue,
};

/// Control keys that shape the view (projection, ordering, window) and are
/// therefore stripped before filter compilation. They never become filter
/// fields.
pub const CAMPDIR_RESERVED_QUERY_KEYS: [&str; 4] = ["select", "sort", "limit", "page"];

/// Compiles a raw query-parameter map into a structured predicate.
///
/// Keys of the form `field[op]` become comparisons when `op` resolves in the
/// closed operator set (`gt`, `gte`, `lt`, `lte`, `in`); several operators on
/// one field accumulate into one clause. A bracketed key whose operator does
/// not resolve is dropped entirely; degrading to "no filter for that key"
/// keeps store-specific operators uninjectable without turning bad input into
/// errors. Any other key becomes a direct equality clause.
///
/// The compiler is schema-agnostic: field names are taken as-is and no
/// semantic validation happens here. It never fails and never touches its
/// input.
///
/// # Examples
///
/// ```rust
/// use campdir::*;
///
/// let raw: CampdirRawQuery = [("tuition[gte]", "500"), ("name", "Devworks")]
///     .into_iter()
///     .collect();
/// let predicate = compile_filter(&raw);
/// assert_eq!(predicate.len(), 2);
/// ```
pub fn compile_filter(raw: &CampdirRawQuery) -> CampdirPredicate {
    let mut predicate = CampdirPredicate::new();

    for (key, value) in raw.iter() {
        if CAMPDIR_RESERVED_QUERY_KEYS.contains(&key.as_str()) {
            continue;
        }

        match split_operator_key(key) {
            Some((field, token)) => {
                if let Some(op) = CampdirComparison::from_query_token(token) {
                    predicate.set_comparison(field, op, coerce_raw_value(value));
                }
            }
            None => predicate.set_equals(key, coerce_raw_value(value)),
        }
    }

    predicate
}

/// Splits `field[op]` into its parts. Both parts must be non-empty and
/// word-like (letters, digits, underscore); anything else is not an operator
/// key and falls through to equality handling.
fn split_operator_key(key: &str) -> Option<(&str, &str)> {
    let open = key.find('[')?;
    if !key.ends_with(']') || open == 0 || open + 2 > key.len() - 1 {
        return None;
    }

    let field = &key[..open];
    let token = &key[open + 1..key.len() - 1];

    let word_like = |s: &str| {
        s.chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
    };

    if word_like(field) && word_like(token) {
        Some((field, token))
    } else {
        None
    }
}

/// Coercion applied to every filter value: a scalar that fully parses as a
/// finite base-10 number becomes numeric, everything else passes through
/// unchanged. Arrays are never coerced.
pub(crate) fn coerce_raw_value(value: &CampdirRawValue) -> CampdirValue {
    match value {
        CampdirRawValue::Single(scalar) => coerce_scalar(scalar),
        CampdirRawValue::Multi(values) => CampdirValue::Array(
            values
                .iter()
                .map(|scalar| CampdirValue::String(scalar.clone()))
                .collect(),
        ),
    }
}

fn coerce_scalar(scalar: &str) -> CampdirValue {
    // f64's parser also accepts `inf`/`NaN` spellings; those are not numbers
    // in a query string, so any alphabetic character other than an exponent
    // marker disqualifies the candidate.
    let numeric_shape = !scalar.is_empty()
        && !scalar
            .chars()
            .any(|c| c.is_ascii_alphabetic() && !matches!(c, 'e' | 'E'));

    if numeric_shape {
        if let Ok(parsed) = scalar.parse::<f64>() {
            if parsed.is_finite() {
                return CampdirValue::Number(parsed);
            }
        }
    }

    CampdirValue::String(scalar.to_string())
}
