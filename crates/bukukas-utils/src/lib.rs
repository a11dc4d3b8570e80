//! Utility functions and helpers

/// Format a whole-Rupiah amount with thousands separators, e.g. `Rp 1,250,000`.
///
/// Amounts are rounded to whole Rupiah for display.
pub fn format_rupiah(amount: f64) -> String {
    let rounded = if amount.is_finite() { amount.round() as i64 } else { 0 };
    let digits = rounded.unsigned_abs().to_string();
    let mut grouped = String::new();
    let mut count = 0;
    for c in digits.chars().rev() {
        if count == 3 {
            grouped.push(',');
            count = 0;
        }
        grouped.push(c);
        count += 1;
    }
    let grouped: String = grouped.chars().rev().collect();
    if rounded < 0 {
        format!("-Rp {}", grouped)
    } else {
        format!("Rp {}", grouped)
    }
}

/// Coerce a JSON value into an amount, tolerating numeric strings and
/// garbage alike. Anything unparsable (or non-finite) becomes `0.0`.
pub fn coerce_amount(value: &serde_json::Value) -> f64 {
    let parsed = match value {
        serde_json::Value::Number(n) => n.as_f64().unwrap_or(0.0),
        serde_json::Value::String(s) => s.trim().parse::<f64>().unwrap_or(0.0),
        _ => 0.0,
    };
    if parsed.is_finite() {
        parsed
    } else {
        0.0
    }
}

// ==================== Tests ====================
