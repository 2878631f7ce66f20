use crate::models::PriceValue;

/// Currency unit tokens stripped before digit extraction
const UNIT_TOKENS: &[&str] = &["INR", "Rs.", "Rs"];

/// Parse a stored price into whole currency units
///
/// Never fails: missing, negative or unparseable input yields 0.
#[inline]
pub fn parse_price(input: Option<&PriceValue>) -> u64 {
    match input {
        None => 0,
        Some(PriceValue::Amount(amount)) => {
            if amount.is_finite() && *amount > 0.0 {
                amount.trunc() as u64
            } else {
                0
            }
        }
        Some(PriceValue::Text(text)) => parse_price_str(text),
    }
}

/// Parse a formatted price string such as "₹1,20,000/-" or "INR 85000"
///
/// Unit tokens, thousands separators and the trailing "/-" are removed,
/// then the first run of digits is read as a base-10 integer.
pub fn parse_price_str(input: &str) -> u64 {
    let mut cleaned = input.trim().to_string();
    for token in UNIT_TOKENS {
        cleaned = cleaned.replace(token, "");
    }
    let cleaned = cleaned.replace(',', "").replace("/-", "");

    let digits: String = cleaned
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit())
        .collect();

    if digits.is_empty() {
        return 0;
    }

    // Overflowing digit runs are as meaningless as no digits at all
    digits.parse::<u64>().unwrap_or(0)
}

/// Format a price the way the store writes it, using Indian digit grouping
///
/// `format_inr(120000)` gives "₹1,20,000/-".
pub fn format_inr(amount: u64) -> String {
    let digits = amount.to_string();
    if digits.len() <= 3 {
        return format!("₹{}/-", digits);
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut rest = head;
    while rest.len() > 2 {
        let (left, right) = rest.split_at(rest.len() - 2);
        groups.push(right);
        rest = left;
    }
    if !rest.is_empty() {
        groups.push(rest);
    }
    groups.reverse();

    format!("₹{},{}/-", groups.join(","), tail)
}
