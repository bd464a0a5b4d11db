use super::*;
use crate::slice::{ResolvedFilter, ResolvedMetadata};
use pd_core::{Aggregation, Axis, Config, DatasetDescriptor, DimensionType, Identifier};
use serde_json::json;

fn catalog() -> Catalog {
    Catalog {
        datasets: vec![DatasetDescriptor {
            id: "uuid-tpm".to_string(),
            given_id: Some("ExpressionTPM".to_string()),
            name: "Expression".to_string(),
            units: "TPM".to_string(),
            feature_type_name: Some("gene".to_string()),
            sample_type_name: Some("depmap_model".to_string()),
        }],
        dimension_types: vec![DimensionType {
            name: "gene".to_string(),
            display_name: "Gene".to_string(),
            axis: Some(Axis::Feature),
        }],
    }
}

fn dimension(key: &str, dataset: &str, entries: &[(&str, Option<f64>)]) -> ResolvedSlice {
    ResolvedSlice::Dimension(ResolvedDimension {
        key: key.to_string(),
        dataset_id: dataset.to_string(),
        slice_type: "gene".to_string(),
        selection: Selection::Entity {
            identifier: "TP53".to_string(),
        },
        entries: entries
            .iter()
            .map(|(k, v)| (k.to_string(), *v))
            .collect(),
        observed_labels: HashMap::new(),
    })
}

fn filter(key: &str, members: &[&str]) -> ResolvedSlice {
    ResolvedSlice::Filter(ResolvedFilter {
        key: key.to_string(),
        name: key.to_uppercase(),
        members: members.iter().map(|m| m.to_string()).collect(),
    })
}

fn label_strategy() -> IndexStrategy {
    IndexStrategy::select("gene", &Config::default())
}

#[test]
fn test_index_is_first_seen_union() {
    let slices = vec![
        dimension("x", "ExpressionTPM", &[("b", Some(1.0)), ("a", Some(2.0))]),
        dimension("y", "ExpressionTPM", &[("c", Some(3.0)), ("a", Some(4.0))]),
    ];
    let response = assemble(
        &label_strategy(),
        &IndexResolution::default(),
        &catalog(),
        slices,
    );

    assert_eq!(response.index_labels, vec!["b", "a", "c"]);
    assert_eq!(
        response.dimensions["x"].values,
        vec![Some(1.0), Some(2.0), None]
    );
    assert_eq!(
        response.dimensions["y"].values,
        vec![None, Some(4.0), Some(3.0)]
    );
    assert!(response.is_aligned());
}

#[test]
fn test_filters_default_to_false() {
    let slices = vec![
        dimension("x", "ExpressionTPM", &[("a", Some(1.0)), ("b", Some(2.0))]),
        filter("color1", &["b", "not-in-index"]),
        filter("color2", &[]),
    ];
    let response = assemble(
        &label_strategy(),
        &IndexResolution::default(),
        &catalog(),
        slices,
    );

    assert_eq!(response.filters["color1"].values, vec![false, true]);
    assert_eq!(response.filters["color1"].name, "COLOR1");
    assert_eq!(response.filters["color2"].values, vec![false, false]);
    assert!(response.is_aligned());
}

#[test]
fn test_metadata_defaults_to_null() {
    let mut values = HashMap::new();
    values.insert("a".to_string(), json!("Lung"));
    let slices = vec![
        dimension("x", "ExpressionTPM", &[("a", Some(1.0)), ("b", Some(2.0))]),
        ResolvedSlice::Metadata(ResolvedMetadata {
            key: "lineage".to_string(),
            label: "Lineage".to_string(),
            slice_id: "slice/meta/lineage/column".to_string(),
            values,
            observed_labels: HashMap::new(),
        }),
    ];
    let response = assemble(
        &label_strategy(),
        &IndexResolution::default(),
        &catalog(),
        slices,
    );

    let lineage = &response.metadata["lineage"];
    assert_eq!(lineage.values, vec![json!("Lung"), Value::Null]);
    assert_eq!(lineage.label, "Lineage");
}

#[test]
fn test_filters_alone_produce_empty_index() {
    let response = assemble(
        &label_strategy(),
        &IndexResolution::default(),
        &catalog(),
        vec![filter("color1", &["a"])],
    );
    assert!(response.is_empty());
    assert!(response.filters["color1"].values.is_empty());
}

#[test]
fn test_duplicate_keys_keep_first_value() {
    let slices = vec![dimension(
        "x",
        "ExpressionTPM",
        &[("a", Some(1.0)), ("a", Some(9.0))],
    )];
    let response = assemble(
        &label_strategy(),
        &IndexResolution::default(),
        &catalog(),
        slices,
    );
    assert_eq!(response.index_labels, vec!["a"]);
    assert_eq!(response.dimensions["x"].values, vec![Some(1.0)]);
}

#[test]
fn test_labels() {
    let aggregated = ResolvedSlice::Dimension(ResolvedDimension {
        key: "y".to_string(),
        dataset_id: "ExpressionTPM".to_string(),
        slice_type: "gene".to_string(),
        selection: Selection::Context {
            name: "BRCA genes".to_string(),
            aggregation: Aggregation::Mean,
            matched: 2,
        },
        entries: vec![("a".to_string(), Some(1.0))],
        observed_labels: HashMap::new(),
    });
    let slices = vec![
        dimension("x", "missing-dataset", &[("a", Some(1.0))]),
        aggregated,
    ];
    let response = assemble(
        &label_strategy(),
        &IndexResolution::default(),
        &catalog(),
        slices,
    );

    let x = &response.dimensions["x"];
    assert_eq!(x.dataset_label, crate::catalog::UNKNOWN_DATASET);
    assert_eq!(x.axis_label, "TP53");

    let y = &response.dimensions["y"];
    assert_eq!(y.dataset_label, "Expression");
    assert_eq!(y.axis_label, "mean TPM of BRCA genes (2 Genes)");
}

#[test]
fn test_alias_for_id_keyed_index() {
    let strategy = IndexStrategy::select("depmap_model", &Config::default());
    let resolution = IndexResolution::from_identifiers(vec![Identifier {
        id: "ACH-1".to_string(),
        label: "A549".to_string(),
    }]);

    let mut observed = HashMap::new();
    observed.insert("ACH-2".to_string(), "HELA".to_string());
    let slices = vec![ResolvedSlice::Dimension(ResolvedDimension {
        key: "x".to_string(),
        dataset_id: "ExpressionTPM".to_string(),
        slice_type: "gene".to_string(),
        selection: Selection::Entity {
            identifier: "TP53".to_string(),
        },
        entries: vec![
            ("ACH-1".to_string(), Some(1.0)),
            ("ACH-2".to_string(), Some(2.0)),
            ("ACH-3".to_string(), Some(3.0)),
        ],
        observed_labels: observed,
    })];

    let response = assemble(&strategy, &resolution, &catalog(), slices);

    assert_eq!(response.index_labels, vec!["ACH-1", "ACH-2", "ACH-3"]);
    assert_eq!(response.index_aliases.len(), 1);
    let alias = &response.index_aliases[0];
    assert_eq!(alias.label, "Cell Line Name");
    assert_eq!(alias.slice_id, "depmap_model/label");
    assert_eq!(
        alias.values,
        vec![Some("A549".to_string()), Some("HELA".to_string()), None]
    );
    assert!(response.is_aligned());
}

#[test]
fn test_label_keyed_index_has_no_alias() {
    let response = assemble(
        &label_strategy(),
        &IndexResolution::default(),
        &catalog(),
        vec![dimension("x", "ExpressionTPM", &[("a", Some(1.0))])],
    );
    assert!(response.index_aliases.is_empty());
    assert_eq!(response.index_type, "gene");
}
