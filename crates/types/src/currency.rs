//! Rupee amount formatting with zero decimals and Indian digit grouping.

/// How the currency is spelled in front of an amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurrencyStyle {
    /// The `₹` glyph. Needs a typeface that can draw it.
    Symbol,
    /// The plain-text `Rs ` prefix, safe for the standard PDF fonts.
    Code,
}

/// Formats `amount` rounded to whole rupees, e.g. `₹1,00,000` or `Rs 1,00,000`.
pub fn format_amount(amount: f64, style: CurrencyStyle) -> String {
    let rounded = amount.round();
    let negative = rounded < 0.0;
    let digits = group_indian(rounded.abs() as u64);
    let sign = if negative { "-" } else { "" };
    match style {
        CurrencyStyle::Symbol => format!("{sign}\u{20B9}{digits}"),
        CurrencyStyle::Code => format!("Rs {sign}{digits}"),
    }
}

/// Groups digits the en-IN way: the last three together, then pairs.
pub fn group_indian(value: u64) -> String {
    let raw = value.to_string();
    if raw.len() <= 3 {
        return raw;
    }
    let (head, tail) = raw.split_at(raw.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 2 {
        groups.push(&head[end - 2..end]);
        end -= 2;
    }
    groups.push(&head[..end]);
    groups.reverse();
    format!("{},{}", groups.join(","), tail)
}
