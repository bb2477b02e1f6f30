/// Reduces free-form quantity input to a count.
///
/// Non-digit characters are dropped; empty input or a value that does not
/// fit is read as 0.
pub fn parse_quantity_input(raw: &str) -> u32 {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    digits.parse().unwrap_or(0)
}
