/// Formats an ISK amount with two decimals and comma thousands separators, e.g.
/// `1234567.5` becomes `1,234,567.50`
pub fn format_isk(amount: f64) -> String {
    let formatted = format!("{:.2}", amount.abs());
    let (whole, fraction) = formatted
        .split_once('.')
        .unwrap_or((formatted.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    // Amounts that round to zero are printed without a sign
    let sign = if amount < 0.0 && formatted != "0.00" {
        "-"
    } else {
        ""
    };

    format!("{}{}.{}", sign, grouped, fraction)
}
