/// Compact display form of an engagement counter: `999`, `1.5K`, `2.3M`.
pub fn format_count(count: u64) -> String {
    const THOUSAND: u64 = 1_000;
    const MILLION: u64 = 1_000_000;

    if count >= MILLION {
        format!("{:.1}M", count as f64 / MILLION as f64)
    } else if count >= THOUSAND {
        format!("{:.1}K", count as f64 / THOUSAND as f64)
    } else {
        count.to_string()
    }
}
