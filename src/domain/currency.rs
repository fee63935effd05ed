//! Currency display formatting

/// Format as dollars with thousands separators and two decimals: `$1,234.56`
pub fn format_currency(amount: f64) -> String {
    let rounded = format!("{:.2}", amount.abs());
    let (whole, cents) = rounded.split_once('.').unwrap_or((rounded.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if amount < 0.0 && rounded != "0.00" { "-" } else { "" };

    format!("{}${}.{}", sign, grouped, cents)
}
