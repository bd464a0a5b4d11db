//! Filter evaluation: a context turned into the set of matching index keys.

use crate::error::ResolveResult;
use crate::pipeline::Pass;
use crate::slice::ResolvedFilter;
use pd_core::FilterSpec;
use std::collections::HashSet;

/// Evaluate a filter's context and key its members like the index
pub async fn fetch_filter(
    pass: &Pass<'_>,
    key: &str,
    spec: &FilterSpec,
) -> ResolveResult<ResolvedFilter> {
    if spec.context.dimension_type != pass.strategy.index_type() {
        log::warn!(
            "Filter '{}' ranges over '{}' but the index is '{}'; it will match nothing",
            key,
            spec.context.dimension_type,
            pass.strategy.index_type()
        );
    }

    let members = pass.client.evaluate_context(&spec.context).await?;
    if members.is_empty() {
        log::debug!(
            "Filter '{}' ({}): context matched nothing; every entry is false",
            key,
            spec.name
        );
    }

    let keys: HashSet<String> = members
        .identifiers()
        .filter_map(|m| {
            pass.strategy
                .key(&m.id, &m.label)
                .or_else(|| pass.strategy.key_for_id(&m.id, pass.resolution))
                .map(String::from)
        })
        .collect();

    log::debug!(
        "Filter '{}' ({}): {} matching entities",
        key,
        spec.name,
        keys.len()
    );

    Ok(ResolvedFilter {
        key: key.to_string(),
        name: spec.name.clone(),
        members: keys,
    })
}
