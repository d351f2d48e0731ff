/// 金额格式化：两位小数、千分位；USD/EUR/GBP 使用符号，其他币种前置代码。
pub fn format_currency(amount: f64, code: &str) -> String {
    let code = code.trim().to_ascii_uppercase();
    let cents = (amount.abs() * 100.0).round() as u64;
    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    let number = format!("{}.{:02}", group_thousands(cents / 100), cents % 100);
    match code.as_str() {
        "USD" => format!("{sign}${number}"),
        "EUR" => format!("{sign}€{number}"),
        "GBP" => format!("{sign}£{number}"),
        _ => format!("{sign}{code} {number}"),
    }
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_known_symbols() {
        assert_eq!(format_currency(1234.56, "USD"), "$1,234.56");
        assert_eq!(format_currency(1_000_000.0, "eur"), "€1,000,000.00");
        assert_eq!(format_currency(0.5, "GBP"), "£0.50");
    }

    #[test]
    fn other_codes_are_prefixed() {
        assert_eq!(format_currency(1234.5, "JPY"), "JPY 1,234.50");
    }

    #[test]
    fn negative_amounts_keep_sign() {
        assert_eq!(format_currency(-42.0, "USD"), "-$42.00");
        assert_eq!(format_currency(-0.001, "USD"), "$0.00");
    }
}
