//! Entry point: one full resolution pass.

use crate::assembler::assemble;
use crate::catalog::Catalog;
use crate::dimension::fetch_dimension;
use crate::error::ResolveResult;
use crate::filter::fetch_filter;
use crate::index::{IndexResolution, IndexStrategy};
use crate::metadata::fetch_metadata;
use crate::slice::ResolvedSlice;
use futures::future::{try_join_all, BoxFuture, FutureExt, TryFutureExt};
use pd_api::{ApiError, DataClient, MemoTransport};
use pd_core::{CanonicalResponse, Config, DimensionSpec, FilterSpec, MetadataSpec, PlotRequest};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;

/// State shared by every fetch of one pass
pub struct Pass<'a> {
    pub client: &'a DataClient,
    pub config: &'a Config,
    pub catalog: &'a Catalog,
    pub strategy: &'a IndexStrategy,
    pub resolution: &'a IndexResolution,
}

/// Resolve every dimension, filter and metadata slice of a plot and
/// assemble them onto one index.
///
/// All requests go through a memo that lives for this call only, so
/// identical requests issued by independent fetches cost one round trip.
/// The first failed fetch aborts the pass.
pub async fn fetch_plot_dimensions(
    client: &DataClient,
    config: &Config,
    index_type: &str,
    dimensions: &BTreeMap<String, DimensionSpec>,
    filters: Option<&BTreeMap<String, FilterSpec>>,
    metadata: Option<&BTreeMap<String, MetadataSpec>>,
) -> ResolveResult<CanonicalResponse> {
    let start = Instant::now();
    let memo = Arc::new(MemoTransport::new(Arc::clone(client.transport())));
    let client = DataClient::new(memo.clone());

    let strategy = IndexStrategy::select(index_type, config);
    let (catalog, resolution) = futures::try_join!(
        Catalog::load(&client),
        IndexResolution::resolve(&client, index_type).map(Ok::<_, ApiError>),
    )?;

    let pass = Pass {
        client: &client,
        config,
        catalog: &catalog,
        strategy: &strategy,
        resolution: &resolution,
    };

    let mut pending: Vec<BoxFuture<'_, ResolveResult<ResolvedSlice>>> = Vec::new();
    for (key, spec) in dimensions {
        pending.push(
            fetch_dimension(&pass, key, spec)
                .map_ok(ResolvedSlice::Dimension)
                .boxed(),
        );
    }
    for (key, spec) in filters.into_iter().flatten() {
        pending.push(
            fetch_filter(&pass, key, spec)
                .map_ok(ResolvedSlice::Filter)
                .boxed(),
        );
    }
    for (key, spec) in metadata.into_iter().flatten() {
        pending.push(
            fetch_metadata(&pass, key, spec)
                .map_ok(ResolvedSlice::Metadata)
                .boxed(),
        );
    }

    let slices = try_join_all(pending).await?;
    let response = assemble(&strategy, &resolution, &catalog, slices);

    log::debug!(
        "Resolved {} dimensions, {} filters, {} metadata onto {} {} entries in {:?} ({} requests, {} memo hits)",
        response.dimensions.len(),
        response.filters.len(),
        response.metadata.len(),
        response.len(),
        index_type,
        start.elapsed(),
        memo.distinct_requests(),
        memo.hits()
    );

    Ok(response)
}

/// Resolve a loaded plot request
pub async fn resolve_plot(
    client: &DataClient,
    config: &Config,
    request: &PlotRequest,
) -> ResolveResult<CanonicalResponse> {
    fetch_plot_dimensions(
        client,
        config,
        &request.index_type,
        &request.dimensions,
        Some(&request.filters),
        Some(&request.metadata),
    )
    .await
}
