//! Axis label formatting

use pd_core::Aggregation;

fn join_nonempty(parts: &[&str]) -> String {
    parts
        .iter()
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Label of a raw slice axis: `"TP53 TPM"`
pub fn raw_axis_label(entity: &str, units: &str) -> String {
    join_nonempty(&[entity, units])
}

/// Label of an aggregated axis: `"mean TPM of BRCA genes (2 Genes)"`
pub fn aggregated_axis_label(
    aggregation: Aggregation,
    units: &str,
    context_name: &str,
    matched: usize,
    type_display_name: &str,
) -> String {
    let head = join_nonempty(&[aggregation.as_str(), units]);
    let count = if type_display_name.is_empty() {
        matched.to_string()
    } else if matched == 1 {
        format!("1 {}", type_display_name)
    } else {
        format!("{} {}s", matched, type_display_name)
    };
    format!("{} of {} ({})", head, context_name.trim(), count)
}
