//! Inbound-parameter shape normalization.
//!
//! The upstream platform delivers a parameter either as a scalar or as a
//! list, and numbers either as JSON numbers (typically floats, `2.0`) or as
//! strings (`"two"`). Everything is flattened to string tokens once, here at
//! the boundary; operation logic only ever sees `Vec<String>`.

use serde_json::Value;

/// Structured operation inputs: the inbound-parameter contract after shape
/// normalization. `food_items` and `quantity_tokens` are parallel sequences;
/// the operations validate their lengths against each other.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OrderParams {
    pub food_items: Vec<String>,
    pub quantity_tokens: Vec<String>,
}

impl OrderParams {
    /// Parameter key the platform uses for food-item names.
    pub const FOOD_ITEM: &'static str = "food-item";
    /// Parameter key the platform uses for quantities and order ids.
    pub const NUMBER: &'static str = "number";

    /// Extracts and flattens both parameters from a raw parameter bag.
    /// Missing keys read as empty lists.
    pub fn from_parameters(parameters: &serde_json::Map<String, Value>) -> Self {
        Self {
            food_items: parameters.get(Self::FOOD_ITEM).map(value_tokens).unwrap_or_default(),
            quantity_tokens: parameters.get(Self::NUMBER).map(value_tokens).unwrap_or_default(),
        }
    }
}

/// Flattens a scalar-or-list parameter value into string tokens.
///
/// Integral floats render without the fractional part (`2.0` -> `"2"`).
/// Empty and whitespace-only strings are dropped: the platform sends `""`
/// for a slot the user never filled, which must read as "no value", not as
/// an invalid token.
pub fn value_tokens(value: &Value) -> Vec<String> {
    match value {
        Value::Array(values) => values.iter().filter_map(scalar_token).collect(),
        other => scalar_token(other).into_iter().collect(),
    }
}

fn scalar_token(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => {
            let trimmed = text.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_owned())
        }
        Value::Number(number) => {
            if let Some(integer) = number.as_i64() {
                return Some(integer.to_string());
            }
            let float = number.as_f64()?;
            if float.fract() == 0.0 && float.abs() < 9_007_199_254_740_992.0 {
                Some(format!("{}", float as i64))
            } else {
                Some(float.to_string())
            }
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{value_tokens, OrderParams};

    #[test]
    fn order_params_flatten_both_parameter_shapes() {
        let bag = json!({
            "food-item": "burger",
            "number": [1.0, "two"],
        });
        let parameters = bag.as_object().expect("object");

        let params = OrderParams::from_parameters(parameters);
        assert_eq!(params.food_items, vec!["burger".to_owned()]);
        assert_eq!(params.quantity_tokens, vec!["1".to_owned(), "two".to_owned()]);
    }

    #[test]
    fn order_params_treat_missing_keys_as_empty() {
        let bag = json!({});
        let params = OrderParams::from_parameters(bag.as_object().expect("object"));
        assert!(params.food_items.is_empty());
        assert!(params.quantity_tokens.is_empty());
    }

    #[test]
    fn scalar_string_becomes_a_single_token() {
        assert_eq!(value_tokens(&json!("burger")), vec!["burger".to_owned()]);
    }

    #[test]
    fn lists_flatten_in_order() {
        assert_eq!(
            value_tokens(&json!(["burger", "fries"])),
            vec!["burger".to_owned(), "fries".to_owned()]
        );
    }

    #[test]
    fn integral_floats_render_as_integers() {
        assert_eq!(value_tokens(&json!(2.0)), vec!["2".to_owned()]);
        assert_eq!(value_tokens(&json!([1.0, 3.0])), vec!["1".to_owned(), "3".to_owned()]);
    }

    #[test]
    fn fractional_floats_keep_their_fraction() {
        // Downstream quantity normalization rejects these; the boundary just
        // reports what arrived.
        assert_eq!(value_tokens(&json!(2.5)), vec!["2.5".to_owned()]);
    }

    #[test]
    fn unfilled_slots_yield_no_tokens() {
        assert!(value_tokens(&json!("")).is_empty());
        assert!(value_tokens(&json!("   ")).is_empty());
        assert!(value_tokens(&json!(null)).is_empty());
        assert!(value_tokens(&json!([""])).is_empty());
    }
}
