use crate::loader::is_missing;

/// Arithmetic mean of the values, or NaN when there are none.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Parses a numeric cell. Blank and NA cells yield `None`; thousands
/// separators are ignored.
pub fn parse_number(value: &str) -> Option<Result<f64, std::num::ParseFloatError>> {
    let cleaned: String = value.chars().filter(|c| *c != ',').collect();
    if is_missing(&cleaned) {
        None
    } else {
        Some(cleaned.parse::<f64>())
    }
}
