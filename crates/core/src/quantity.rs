use thiserror::Error;

/// The spelled-out numbers the upstream agent is allowed to pass through
/// without converting. Anything beyond ten arrives as a numeral.
const NUMBER_WORDS: &[(&str, u32)] = &[
    ("one", 1),
    ("two", 2),
    ("three", 3),
    ("four", 4),
    ("five", 5),
    ("six", 6),
    ("seven", 7),
    ("eight", 8),
    ("nine", 9),
    ("ten", 10),
];

#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("unrecognized quantity token `{0}`")]
pub struct QuantityError(pub String);

/// Converts a raw quantity token into a positive integer.
///
/// Number words ("one" through "ten", ASCII case-insensitive) map to 1–10;
/// any other token must parse as a positive integer numeral. Zero and
/// negative values are rejected here so a cart entry with quantity <= 0 can
/// never be constructed downstream.
pub fn normalize(token: &str) -> Result<u32, QuantityError> {
    let trimmed = token.trim();
    let lowered = trimmed.to_ascii_lowercase();

    if let Some((_, quantity)) =
        NUMBER_WORDS.iter().find(|(word, _)| *word == lowered.as_str())
    {
        return Ok(*quantity);
    }

    match trimmed.parse::<i64>() {
        Ok(value) if value > 0 && value <= i64::from(u32::MAX) => Ok(value as u32),
        _ => Err(QuantityError(token.to_owned())),
    }
}
