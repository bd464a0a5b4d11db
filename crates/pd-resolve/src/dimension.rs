//! Dimension fetchers
//!
//! A raw slice dimension reads one entity's values directly. An aggregated
//! dimension evaluates its context, keeps the members the dataset actually
//! has, and asks the server to reduce them along the slice axis.

use crate::error::{ResolveError, ResolveResult};
use crate::pipeline::Pass;
use crate::slice::{ResolvedDimension, Selection};
use futures::FutureExt;
use pd_api::{ApiError, MatrixRequest};
use pd_core::{
    Axis, AxisType, DatasetId, DimensionSpec, Identifier, IdentifierType, SelectorKind, SliceQuery,
};
use std::collections::{HashMap, HashSet};

/// Fetch one dimension in the mode its spec selects
pub async fn fetch_dimension(
    pass: &Pass<'_>,
    key: &str,
    spec: &DimensionSpec,
) -> ResolveResult<ResolvedDimension> {
    match spec.axis_type {
        AxisType::RawSlice => fetch_raw(pass, key, spec).await,
        AxisType::Aggregated => fetch_aggregated(pass, key, spec).await,
    }
}

/// Identifier type addressing one entity on `axis`
fn identifier_type(axis: Axis, kind: SelectorKind) -> IdentifierType {
    match (axis, kind) {
        (Axis::Feature, SelectorKind::Label) => IdentifierType::FeatureLabel,
        (Axis::Feature, SelectorKind::Id) => IdentifierType::FeatureId,
        (Axis::Sample, SelectorKind::Label) => IdentifierType::SampleLabel,
        (Axis::Sample, SelectorKind::Id) => IdentifierType::SampleId,
    }
}

fn request_dataset_id(pass: &Pass<'_>, spec: &DimensionSpec) -> DatasetId {
    DatasetId::try_new(pass.catalog.request_id(&spec.dataset_id))
        .unwrap_or_else(|| spec.dataset_id.clone())
}

async fn fetch_raw(
    pass: &Pass<'_>,
    key: &str,
    spec: &DimensionSpec,
) -> ResolveResult<ResolvedDimension> {
    let selector =
        spec.context
            .equality_selector()
            .ok_or_else(|| ResolveError::RawContextNotEquality {
                key: key.to_string(),
            })?;

    let dataset = pass.catalog.find_dataset(&spec.dataset_id);
    let axis = pass.catalog.axis_of(&spec.slice_type, dataset);
    let query = SliceQuery {
        dataset_id: request_dataset_id(pass, spec),
        identifier: selector.value.clone(),
        identifier_type: identifier_type(axis, selector.kind()),
    };

    let data = pass.client.dimension_data(&query).await?;
    if data.values.is_none() {
        log::warn!(
            "Dimension '{}' ({}): response has no values; plotting nulls",
            key,
            query
        );
    }

    let mut entries = Vec::with_capacity(data.ids.len());
    let mut observed_labels = HashMap::new();
    for (id, label, value) in data.entries() {
        if !label.is_empty() {
            observed_labels
                .entry(id.to_string())
                .or_insert_with(|| label.to_string());
        }
        if let Some(k) = pass.strategy.key(id, label) {
            entries.push((k.to_string(), value.as_f64()));
        }
    }

    log::debug!(
        "Dimension '{}': {} values for {} from {}",
        key,
        entries.len(),
        selector.value,
        query.dataset_id
    );

    Ok(ResolvedDimension {
        key: key.to_string(),
        dataset_id: spec.dataset_id.to_string(),
        slice_type: spec.slice_type.to_string(),
        selection: Selection::Entity {
            identifier: selector.value,
        },
        entries,
        observed_labels,
    })
}

async fn fetch_aggregated(
    pass: &Pass<'_>,
    key: &str,
    spec: &DimensionSpec,
) -> ResolveResult<ResolvedDimension> {
    let dataset = pass.catalog.find_dataset(&spec.dataset_id);
    let axis = pass.catalog.axis_of(&spec.slice_type, dataset);
    let dataset_id = request_dataset_id(pass, spec);

    // The reply is keyed by ids on the axis that is not reduced
    let (members, available, reply_axis) = futures::try_join!(
        pass.client.evaluate_context(&spec.context),
        pass.client.dataset_identifiers(&dataset_id, axis),
        reply_axis_identifiers(pass, &dataset_id, axis.other()).map(Ok::<_, ApiError>),
    )?;

    let available: HashSet<&str> = available.iter().map(|i| i.id.as_str()).collect();
    let mut seen = HashSet::new();
    let ids: Vec<String> = members
        .ids
        .iter()
        .filter(|id| available.contains(id.as_str()) && seen.insert(id.as_str()))
        .cloned()
        .collect();
    let matched = ids.len();

    let mut entries = Vec::new();
    let mut observed_labels = HashMap::new();
    if ids.is_empty() {
        log::warn!(
            "Dimension '{}': none of the {} members of '{}' are in dataset {}",
            key,
            members.len(),
            spec.context.name,
            dataset_id
        );
    } else {
        let request = MatrixRequest::aggregate(axis, ids, spec.aggregation);
        let by_id = pass.client.matrix_aggregate(&dataset_id, &request).await?;

        let mut label_by_id: HashMap<&str, &str> = HashMap::new();
        let mut position_by_id: HashMap<&str, usize> = HashMap::new();
        for (i, ident) in reply_axis.iter().enumerate() {
            if !ident.label.is_empty() {
                label_by_id.entry(ident.id.as_str()).or_insert(ident.label.as_str());
            }
            position_by_id.entry(ident.id.as_str()).or_insert(i);
        }

        let mut reply_ids: Vec<String> = by_id.keys().cloned().collect();
        reply_ids.sort_by(|a, b| {
            let pa = position_by_id.get(a.as_str()).copied().unwrap_or(usize::MAX);
            let pb = position_by_id.get(b.as_str()).copied().unwrap_or(usize::MAX);
            pa.cmp(&pb).then_with(|| a.cmp(b))
        });
        pass.resolution.sort_ids(&mut reply_ids);

        let mut unkeyed = 0;
        for id in &reply_ids {
            let label = label_by_id
                .get(id.as_str())
                .copied()
                .or_else(|| pass.resolution.label_of(id))
                .unwrap_or("");
            if !label.is_empty() {
                observed_labels.insert(id.clone(), label.to_string());
            }
            match pass.strategy.key(id, label) {
                Some(k) => {
                    let value = by_id.get(id).copied().flatten().filter(|v| v.is_finite());
                    entries.push((k.to_string(), value));
                }
                None => unkeyed += 1,
            }
        }
        if unkeyed > 0 {
            log::warn!(
                "Dimension '{}': {} aggregated {} have no known label and were skipped",
                key,
                unkeyed,
                axis.other().plural()
            );
        }
    }

    log::debug!(
        "Dimension '{}': {} of {} matched, {} by {}",
        key,
        matched,
        spec.context.name,
        spec.aggregation,
        axis.plural()
    );

    Ok(ResolvedDimension {
        key: key.to_string(),
        dataset_id: spec.dataset_id.to_string(),
        slice_type: spec.slice_type.to_string(),
        selection: Selection::Context {
            name: spec.context.name.clone(),
            aggregation: spec.aggregation,
            matched,
        },
        entries,
        observed_labels,
    })
}

/// Id/label table of the dataset axis an aggregation reply is keyed by.
///
/// A failed lookup yields an empty table; labels then come from the index
/// resolution alone.
async fn reply_axis_identifiers(
    pass: &Pass<'_>,
    dataset_id: &str,
    axis: Axis,
) -> Vec<Identifier> {
    match pass.client.dataset_identifiers(dataset_id, axis).await {
        Ok(identifiers) => identifiers,
        Err(e) => {
            log::warn!(
                "Could not list the {} of dataset {}: {}",
                axis.plural(),
                dataset_id,
                e
            );
            Vec::new()
        }
    }
}

#[cfg(test)]
#[path = "dimension_test.rs"]
mod tests;
