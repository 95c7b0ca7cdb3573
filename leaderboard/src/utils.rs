use std::cmp::Ordering;

/// Descending order for floats; NaN compares equal so sorting stays total.
pub fn compare_desc_float(a: f64, b: f64) -> Ordering {
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}

// Formats each x1000 step
pub fn format_number(number: u64) -> String {
    let num_str = number.to_string();
    let mut result = String::new();
    let len = num_str.len();

    for (i, c) in num_str.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result
}

/// Short form used in summaries: `1.2K`, `3.4M`, `1B`.
pub fn format_compact(number: u64) -> String {
    const STEPS: [(f64, &str); 3] = [(1e3, "K"), (1e6, "M"), (1e9, "B")];

    let value = number as f64;
    let Some(mut index) = STEPS.iter().rposition(|(step, _)| value >= *step) else {
        return format_number(number);
    };

    let round_to_tenth = |step: f64| (value / step * 10.0).round() / 10.0;
    let mut scaled = round_to_tenth(STEPS[index].0);
    // 999.95K rounds up to 1000K; show it as the next step instead.
    if scaled >= 1000.0 && index + 1 < STEPS.len() {
        index += 1;
        scaled = round_to_tenth(STEPS[index].0);
    }

    let scaled = format!("{scaled:.1}");
    let scaled = scaled.strip_suffix(".0").unwrap_or(&scaled);
    format!("{scaled}{}", STEPS[index].1)
}

/// Signed rank movement as an arrow, empty when unchanged.
pub fn format_rank_delta(delta: i64) -> String {
    match delta.cmp(&0) {
        Ordering::Greater => format!("▲{delta}"),
        Ordering::Less => format!("▼{}", delta.abs()),
        Ordering::Equal => String::new(),
    }
}
