//! End-to-end resolution scenarios against a canned data API

use pd_api::testing::FakeTransport;
use pd_api::{ApiError, DataClient, Method};
use pd_core::{CanonicalResponse, Config, PlotRequest};
use pd_resolve::{resolve_plot, ResolveError};
use serde_json::{json, Value};
use std::sync::Arc;

const DATA: &str = "/datasets/dimension/data/";
const EVALUATE: &str = "/context/evaluate/";

fn catalog_routes() -> FakeTransport {
    FakeTransport::new()
        .on_get(
            "/datasets/",
            json!([
                {
                    "id": "uuid-tpm",
                    "given_id": "ExpressionTPM",
                    "name": "Expression",
                    "units": "TPM",
                    "feature_type_name": "gene",
                    "sample_type_name": "depmap_model"
                },
                {
                    "id": "uuid-meta",
                    "name": "Model Metadata",
                    "sample_type_name": "depmap_model"
                }
            ]),
        )
        .on_get(
            "/types/dimensions",
            json!([
                {"name": "gene", "display_name": "Gene", "axis": "feature"},
                {"name": "depmap_model", "display_name": "Model", "axis": "sample"}
            ]),
        )
        .on_get(
            "/types/dimensions/depmap_model/identifiers",
            json!([
                {"id": "ACH-1", "label": "A549"},
                {"id": "ACH-2", "label": "HELA"},
                {"id": "ACH-3", "label": "MCF7"}
            ]),
        )
}

fn tp53_reply() -> Value {
    json!({
        "ids": ["ACH-2", "ACH-1"],
        "labels": ["HELA", "A549"],
        "values": [7.25, 1.5]
    })
}

fn plot(yaml: &str) -> PlotRequest {
    serde_yaml::from_str(yaml).unwrap()
}

async fn resolve(fake: &Arc<FakeTransport>, request: &PlotRequest) -> CanonicalResponse {
    let client = DataClient::new(fake.clone());
    resolve_plot(&client, &Config::default(), request)
        .await
        .unwrap()
}

const RAW_TP53: &str = r#"
index_type: depmap_model
dimensions:
  x:
    dataset_id: ExpressionTPM
    axis_type: raw_slice
    slice_type: gene
    context:
      name: TP53
      dimension_type: gene
      expr: {"==": [{"var": "entity_label"}, "TP53"]}
"#;

// ── Raw slice on a model index ──────────────────────────────────────────

#[tokio::test]
async fn test_raw_expression_keyed_by_model_id() {
    let fake = catalog_routes().on_post(DATA, tp53_reply()).into_arc();
    let response = resolve(&fake, &plot(RAW_TP53)).await;

    assert_eq!(response.index_type, "depmap_model");
    assert_eq!(response.index_labels, vec!["ACH-2", "ACH-1"]);

    let x = &response.dimensions["x"];
    assert_eq!(x.values, vec![Some(7.25), Some(1.5)]);
    assert_eq!(x.dataset_label, "Expression");
    assert_eq!(x.axis_label, "TP53 TPM");
    assert_eq!(x.slice_type, "gene");

    assert_eq!(response.index_aliases.len(), 1);
    let alias = &response.index_aliases[0];
    assert_eq!(alias.label, "Cell Line Name");
    assert_eq!(
        alias.values,
        vec![Some("HELA".to_string()), Some("A549".to_string())]
    );
    assert!(response.is_aligned());

    let body = fake
        .requests()
        .into_iter()
        .find(|r| r.path == DATA)
        .and_then(|r| r.body)
        .unwrap();
    assert_eq!(body["dataset_id"], "uuid-tpm");
    assert_eq!(body["identifier_type"], "feature_label");
}

#[tokio::test]
async fn test_raw_rejects_non_equality_context() {
    let fake = catalog_routes().on_post(DATA, tp53_reply()).into_arc();
    let request = plot(
        r#"
index_type: depmap_model
dimensions:
  x:
    dataset_id: ExpressionTPM
    axis_type: raw_slice
    slice_type: gene
    context:
      name: two genes
      dimension_type: gene
      expr: {"in": [{"var": "entity_label"}, ["TP53", "KRAS"]]}
"#,
    );

    let client = DataClient::new(fake.clone());
    let err = resolve_plot(&client, &Config::default(), &request)
        .await
        .unwrap_err();
    assert!(matches!(err, ResolveError::RawContextNotEquality { .. }));
    assert_eq!(fake.count(Method::Post, DATA), 0);
}

// ── Aggregated dimension ────────────────────────────────────────────────

#[tokio::test]
async fn test_aggregated_brca_mean_on_model_index() {
    let fake = catalog_routes()
        .on_post(
            EVALUATE,
            json!({"ids": ["672", "675", "999"], "labels": ["BRCA1", "BRCA2", "NOTINDATA"]}),
        )
        .on_get(
            "/datasets/features/uuid-tpm",
            json!([
                {"id": "672", "label": "BRCA1"},
                {"id": "675", "label": "BRCA2"},
                {"id": "7157", "label": "TP53"}
            ]),
        )
        .on_post(
            "/datasets/matrix/uuid-tpm/",
            json!({"mean": {"ACH-3": 2.0, "ACH-1": 4.5}}),
        )
        .into_arc();
    let request = plot(
        r#"
index_type: depmap_model
dimensions:
  y:
    dataset_id: ExpressionTPM
    axis_type: aggregated
    aggregation: mean
    slice_type: gene
    context:
      name: BRCA genes
      dimension_type: gene
      expr: {"in": [{"var": "entity_label"}, ["BRCA1", "BRCA2"]]}
"#,
    );

    let response = resolve(&fake, &request).await;

    assert_eq!(response.index_labels, vec!["ACH-1", "ACH-3"]);
    let y = &response.dimensions["y"];
    assert_eq!(y.values, vec![Some(4.5), Some(2.0)]);
    assert_eq!(y.axis_label, "mean TPM of BRCA genes (2 Genes)");
    assert_eq!(
        response.index_aliases[0].values,
        vec![Some("A549".to_string()), Some("MCF7".to_string())]
    );

    let body = fake
        .requests()
        .into_iter()
        .find(|r| r.path == "/datasets/matrix/uuid-tpm/")
        .and_then(|r| r.body)
        .unwrap();
    assert_eq!(body["features"], json!(["672", "675"]));
    assert_eq!(
        body["aggregate"],
        json!({"aggregate_by": "features", "aggregation": "mean"})
    );
}

const BRCA_MEAN_GENE_INDEX: &str = r#"
index_type: gene
dimensions:
  y:
    dataset_id: ExpressionTPM
    axis_type: aggregated
    aggregation: mean
    slice_type: gene
    context:
      name: BRCA genes
      dimension_type: gene
      expr: {"in": [{"var": "entity_label"}, ["BRCA1", "BRCA2"]]}
"#;

fn brca_routes(fake: FakeTransport) -> FakeTransport {
    fake.on_post(
        EVALUATE,
        json!({"ids": ["672", "675"], "labels": ["BRCA1", "BRCA2"]}),
    )
    .on_get(
        "/datasets/features/uuid-tpm",
        json!([{"id": "672", "label": "BRCA1"}, {"id": "675", "label": "BRCA2"}]),
    )
    .on_get(
        "/datasets/samples/uuid-tpm",
        json!([
            {"id": "ACH-1", "label": "A549"},
            {"id": "ACH-2", "label": "HELA"},
            {"id": "ACH-3", "label": "MCF7"}
        ]),
    )
    .on_post(
        "/datasets/matrix/uuid-tpm/",
        json!({"mean": {"ACH-1": 4.5, "ACH-3": 2.0}}),
    )
}

fn assert_one_value_per_sample(response: &CanonicalResponse) {
    assert_eq!(response.index_type, "gene");
    assert_eq!(response.index_labels, vec!["A549", "MCF7"]);
    assert_eq!(response.dimensions["y"].values, vec![Some(4.5), Some(2.0)]);
    assert!(response.index_aliases.is_empty());
    assert!(response.is_aligned());
}

#[tokio::test]
async fn test_aggregated_brca_mean_on_gene_index() {
    let fake = brca_routes(catalog_routes())
        .on_get(
            "/types/dimensions/gene/identifiers",
            json!([{"id": "672", "label": "BRCA1"}, {"id": "675", "label": "BRCA2"}]),
        )
        .into_arc();

    let response = resolve(&fake, &plot(BRCA_MEAN_GENE_INDEX)).await;

    assert_one_value_per_sample(&response);
    let body = fake
        .requests()
        .into_iter()
        .find(|r| r.path == "/datasets/matrix/uuid-tpm/")
        .and_then(|r| r.body)
        .unwrap();
    assert_eq!(body["aggregate"]["aggregate_by"], "features");
}

#[tokio::test]
async fn test_aggregated_on_label_index_survives_failed_identifier_lookup() {
    let fake = brca_routes(catalog_routes())
        .on_error(
            Method::Get,
            "/types/dimensions/gene/identifiers",
            ApiError::Status {
                url: "/types/dimensions/gene/identifiers".to_string(),
                status: 503,
                body: "unavailable".to_string(),
            },
        )
        .into_arc();

    let response = resolve(&fake, &plot(BRCA_MEAN_GENE_INDEX)).await;

    assert_one_value_per_sample(&response);
}

// ── Filters ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_two_filters_one_empty() {
    let fake = catalog_routes()
        .on_post(DATA, tp53_reply())
        .on_post_matching(
            EVALUATE,
            json!({"context": {"name": "lung"}}),
            json!({"ids": ["ACH-1"], "labels": ["A549"]}),
        )
        .on_post_matching(
            EVALUATE,
            json!({"context": {"name": "nothing"}}),
            json!({"ids": [], "labels": []}),
        )
        .into_arc();
    let request = plot(&format!(
        "{}{}",
        RAW_TP53,
        r#"
filters:
  color1:
    name: Lung
    context:
      name: lung
      dimension_type: depmap_model
      expr: {"==": [{"var": "lineage"}, "Lung"]}
  color2:
    name: Nothing
    context:
      name: nothing
      dimension_type: depmap_model
      expr: {"==": [{"var": "lineage"}, "Mars"]}
"#
    ));

    let response = resolve(&fake, &request).await;

    assert_eq!(response.index_labels, vec!["ACH-2", "ACH-1"]);
    assert_eq!(response.filters["color1"].values, vec![false, true]);
    assert_eq!(response.filters["color1"].name, "Lung");
    assert_eq!(response.filters["color2"].values, vec![false, false]);
    assert!(response.is_aligned());
}

// ── Metadata ────────────────────────────────────────────────────────────

const WITH_METADATA: &str = r#"
metadata:
  lineage:
    label: Lineage
    slice:
      dataset_id: uuid-meta
      identifier: lineage
      identifier_type: column
"#;

fn metadata_route(fake: FakeTransport, reply: Value) -> FakeTransport {
    fake.on_post_matching(DATA, json!({"identifier": "lineage"}), reply)
        .on_post(DATA, tp53_reply())
}

#[tokio::test]
async fn test_metadata_aligned_with_nulls() {
    let fake = metadata_route(
        catalog_routes(),
        json!({"ids": ["ACH-1", "ACH-3"], "labels": ["A549", "MCF7"], "values": ["Lung", "Breast"]}),
    )
    .into_arc();
    let request = plot(&format!("{}{}", RAW_TP53, WITH_METADATA));

    let response = resolve(&fake, &request).await;

    let lineage = &response.metadata["lineage"];
    assert_eq!(lineage.label, "Lineage");
    assert_eq!(lineage.slice_id, "slice/uuid-meta/lineage/column");
    assert_eq!(lineage.values, vec![Value::Null, json!("Lung")]);
    assert_eq!(response.index_labels, vec!["ACH-2", "ACH-1"]);
}

#[tokio::test]
async fn test_metadata_with_too_many_values_fails() {
    let ids: Vec<String> = (0..101).map(|i| format!("ACH-{}", i)).collect();
    let values: Vec<String> = (0..101).map(|i| format!("lineage {}", i)).collect();
    let fake = metadata_route(
        catalog_routes(),
        json!({"ids": ids, "labels": ids, "values": values}),
    )
    .into_arc();
    let request = plot(&format!("{}{}", RAW_TP53, WITH_METADATA));

    let client = DataClient::new(fake.clone());
    let err = resolve_plot(&client, &Config::default(), &request)
        .await
        .unwrap_err();
    match err {
        ResolveError::TooManyMetadataValues { key, count, max, .. } => {
            assert_eq!(key, "lineage");
            assert_eq!(count, 101);
            assert_eq!(max, 100);
        }
        other => panic!("unexpected error: {}", other),
    }
}

#[tokio::test]
async fn test_metadata_at_limit_succeeds() {
    let ids: Vec<String> = (0..150).map(|i| format!("ACH-{}", i)).collect();
    let values: Vec<Value> = (0..150)
        .map(|i| {
            if i < 100 {
                json!(format!("lineage {}", i))
            } else {
                Value::Null
            }
        })
        .collect();
    let fake = metadata_route(
        catalog_routes(),
        json!({"ids": ids, "labels": ids, "values": values}),
    )
    .into_arc();
    let request = plot(&format!("{}{}", RAW_TP53, WITH_METADATA));

    let response = resolve(&fake, &request).await;
    assert!(response.metadata.contains_key("lineage"));
}

#[tokio::test]
async fn test_metadata_without_values_fails() {
    let fake = metadata_route(
        catalog_routes(),
        json!({"ids": ["ACH-1"], "labels": ["A549"]}),
    )
    .into_arc();
    let request = plot(&format!("{}{}", RAW_TP53, WITH_METADATA));

    let client = DataClient::new(fake.clone());
    let err = resolve_plot(&client, &Config::default(), &request)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ResolveError::MetadataMissingValues { ref key, .. } if key == "lineage"
    ));
}

// ── Pass behaviour ──────────────────────────────────────────────────────

#[tokio::test]
async fn test_repeated_calls_are_identical() {
    let fake = catalog_routes().on_post(DATA, tp53_reply()).into_arc();
    let request = plot(RAW_TP53);

    let first = resolve(&fake, &request).await;
    let second = resolve(&fake, &request).await;

    assert_eq!(first, second);
    // Memoization lasts one pass only
    assert_eq!(fake.count(Method::Get, "/datasets/"), 2);
}

#[tokio::test]
async fn test_identical_requests_share_one_round_trip() {
    let fake = catalog_routes()
        .on_post(DATA, tp53_reply())
        .yielding()
        .into_arc();
    let request = plot(
        r#"
index_type: depmap_model
dimensions:
  x:
    dataset_id: ExpressionTPM
    axis_type: raw_slice
    slice_type: gene
    context:
      name: TP53
      dimension_type: gene
      expr: {"==": [{"var": "entity_label"}, "TP53"]}
  y:
    dataset_id: uuid-tpm
    axis_type: raw_slice
    slice_type: gene
    context:
      name: TP53 again
      dimension_type: gene
      expr: {"==": ["TP53", {"var": "entity_label"}]}
"#,
    );

    let response = resolve(&fake, &request).await;

    assert_eq!(response.dimensions["x"].values, response.dimensions["y"].values);
    assert_eq!(fake.count(Method::Post, DATA), 1);
    assert_eq!(fake.count(Method::Get, "/datasets/"), 1);
    assert_eq!(fake.count(Method::Get, "/types/dimensions"), 1);
}

#[tokio::test]
async fn test_failed_fetch_aborts_pass() {
    let fake = catalog_routes()
        .on_error(
            Method::Post,
            DATA,
            ApiError::Status {
                url: DATA.to_string(),
                status: 500,
                body: "boom".to_string(),
            },
        )
        .into_arc();

    let client = DataClient::new(fake.clone());
    let err = resolve_plot(&client, &Config::default(), &plot(RAW_TP53))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ResolveError::Api(ApiError::Status { status: 500, .. })
    ));
}

#[tokio::test]
async fn test_unresolvable_index_degrades() {
    // No identifier route for depmap_model: aliases fall back to labels
    // seen in the replies.
    let fake = FakeTransport::new()
        .on_get("/datasets/", json!([]))
        .on_get("/types/dimensions", json!([]))
        .on_post(DATA, tp53_reply())
        .into_arc();

    let response = resolve(&fake, &plot(RAW_TP53)).await;

    assert_eq!(response.index_labels, vec!["ACH-2", "ACH-1"]);
    assert_eq!(response.dimensions["x"].dataset_label, "(Unknown dataset)");
    assert_eq!(
        response.index_aliases[0].values,
        vec![Some("HELA".to_string()), Some("A549".to_string())]
    );
}
