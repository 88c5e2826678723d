//! End-to-end tests for generated models.
//!
//! These tests verify:
//! - Referential integrity of relationship endpoints
//! - Uniqueness of asset ids, relationship ids and element ids
//! - JSON array and JSON Lines output parse to the same documents
//! - Compound keys keep the model/asset identity
//! - Seeded runs are reproducible
//! - Multi-tenant runs stay isolated per tenant

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

use aec_datagen::builders::{MANIFEST_FILE, ModelBuilder, RunManifest, TenantShardWriter};
use aec_datagen::catalogue::{self, TypeCatalogue};
use aec_datagen::config::TenantManifest;
use aec_datagen::output::{OutputFormat, read_collection};
use aec_model::models::{Asset, Relationship, StoredAsset, StoredRelationship};
use rand::SeedableRng;
use rand::rngs::StdRng;
use time::OffsetDateTime;
use time::macros::datetime;

const AT: OffsetDateTime = datetime!(2025-06-01 08:30 UTC);

fn builder(catalogue: TypeCatalogue) -> ModelBuilder {
    ModelBuilder::new(catalogue)
        .with_model_id("model-test")
        .with_generated_at(AT)
}

fn read_assets(path: &Path, format: OutputFormat) -> Vec<StoredAsset> {
    read_collection(&fs::read_to_string(path).unwrap(), format).unwrap()
}

fn read_relationships(path: &Path, format: OutputFormat) -> Vec<StoredRelationship> {
    read_collection(&fs::read_to_string(path).unwrap(), format).unwrap()
}

#[test]
fn test_relationship_endpoints_reference_permitted_types() {
    let catalogue = catalogue::standard().unwrap();
    let mut rng = StdRng::seed_from_u64(12345);
    let model = builder(catalogue.clone())
        .with_assets(1_000)
        .with_relationships(800)
        .build_data(&mut rng)
        .unwrap();

    // Asset id -> type tag, via the wire type.
    let tag_of_type: HashMap<&str, &str> = catalogue
        .asset_types()
        .iter()
        .map(|t| (t.type_id.as_str(), t.tag.as_str()))
        .collect();
    let tag_of_asset: HashMap<&str, &str> = model
        .assets
        .iter()
        .map(|a| (a.key.id.as_str(), tag_of_type[a.type_id.as_str()]))
        .collect();

    assert!(!model.relationships.is_empty());
    for rel in &model.relationships {
        let category = catalogue
            .relationship_categories()
            .iter()
            .find(|c| c.name == rel.attributes.application.relationship_type)
            .unwrap();

        let from_tag = tag_of_asset[rel.key.from_asset_id.as_str()];
        let to_tag = tag_of_asset[rel.key.to_asset_id.as_str()];
        assert!(category.from_types.iter().any(|t| t == from_tag), "{}", rel.key.id);
        assert!(category.to_types.iter().any(|t| t == to_tag), "{}", rel.key.id);
    }
}

#[test]
fn test_ids_and_element_ids_are_unique() {
    let mut rng = StdRng::seed_from_u64(12345);
    let model = builder(catalogue::standard().unwrap())
        .with_assets(2_000)
        .with_relationships(1_000)
        .build_data(&mut rng)
        .unwrap();

    let asset_ids: HashSet<&str> = model.assets.iter().map(|a| a.key.id.as_str()).collect();
    assert_eq!(asset_ids.len(), model.assets.len());

    let element_ids: HashSet<u64> = model
        .assets
        .iter()
        .map(|a| Asset::from(a.clone()).element_id().unwrap())
        .collect();
    assert_eq!(element_ids.len(), model.assets.len());

    let rel_ids: HashSet<&str> = model.relationships.iter().map(|r| r.key.id.as_str()).collect();
    assert_eq!(rel_ids.len(), model.relationships.len());
}

#[test]
fn test_entity_distribution_matches_allocation() {
    let mut rng = StdRng::seed_from_u64(12345);
    let model = builder(catalogue::standard().unwrap())
        .with_assets(10_000)
        .with_relationships(0)
        .build_data(&mut rng)
        .unwrap();

    assert_eq!(model.summary.entity_distribution["walls"], 2_300);
    assert_eq!(model.summary.entity_distribution["doors"], 400);
    for (tag, count) in model.allocation.iter() {
        assert_eq!(model.summary.entity_distribution[tag], count);
    }
    assert_eq!(model.summary.model_statistics.batch_count, 400);
    assert_eq!(model.summary.description, "AEC Model with 10000 entities - Generated payload");
}

#[test]
fn test_json_and_jsonl_outputs_hold_same_documents() {
    let json_dir = tempfile::tempdir().unwrap();
    let jsonl_dir = tempfile::tempdir().unwrap();

    let mut rng = StdRng::seed_from_u64(777);
    let json = builder(catalogue::standard().unwrap())
        .with_assets(300)
        .with_relationships(200)
        .with_format(OutputFormat::Json)
        .write_to(json_dir.path(), &mut rng)
        .unwrap();

    let mut rng = StdRng::seed_from_u64(777);
    let jsonl = builder(catalogue::standard().unwrap())
        .with_assets(300)
        .with_relationships(200)
        .with_format(OutputFormat::Jsonl)
        .write_to(jsonl_dir.path(), &mut rng)
        .unwrap();

    assert!(json.assets_file.ends_with("assets.json"));
    assert!(jsonl.assets_file.ends_with("assets.jsonl"));

    assert_eq!(
        read_assets(&json.assets_file, OutputFormat::Json),
        read_assets(&jsonl.assets_file, OutputFormat::Jsonl)
    );
    assert_eq!(
        read_relationships(&json.relationships_file, OutputFormat::Json),
        read_relationships(&jsonl.relationships_file, OutputFormat::Jsonl)
    );
    assert_eq!(
        json.summary.model_statistics,
        jsonl.summary.model_statistics
    );
}

#[test]
fn test_written_documents_use_compound_keys() {
    let dir = tempfile::tempdir().unwrap();
    let mut rng = StdRng::seed_from_u64(12345);
    let written = builder(catalogue::standard().unwrap())
        .with_assets(100)
        .with_relationships(100)
        .write_to(dir.path(), &mut rng)
        .unwrap();

    let assets: Vec<serde_json::Value> =
        read_collection(&fs::read_to_string(&written.assets_file).unwrap(), OutputFormat::Json)
            .unwrap();
    for asset in &assets {
        assert_eq!(asset["_id"]["modelId"], "model-test");
        assert!(asset["_id"]["id"].is_string());
        assert!(asset.get("modelId").is_none());
        assert!(asset.get("id").is_none());
    }

    let relationships: Vec<serde_json::Value> = read_collection(
        &fs::read_to_string(&written.relationships_file).unwrap(),
        OutputFormat::Json,
    )
    .unwrap();
    for rel in &relationships {
        let key = &rel["_id"];
        assert!(key["fromAssetId"].is_string() && key["toAssetId"].is_string());
        // Endpoints carry nothing but the asset id, so they are dropped.
        assert!(rel.get("from").is_none() && rel.get("to").is_none());
    }

    // Converting back restores the full identity.
    let restored: Vec<Relationship> = read_relationships(&written.relationships_file, OutputFormat::Json)
        .into_iter()
        .map(Relationship::from)
        .collect();
    for (rel, raw) in restored.iter().zip(&relationships) {
        assert_eq!(rel.model_id, "model-test");
        assert_eq!(rel.id, raw["_id"]["id"]);
        assert_eq!(rel.from.asset_id, raw["_id"]["fromAssetId"]);
    }
}

#[test]
fn test_seeded_runs_are_reproducible() {
    let run = |seed: u64| {
        let mut rng = StdRng::seed_from_u64(seed);
        builder(catalogue::revit_workload().unwrap())
            .with_assets(250)
            .with_relationships(250)
            .with_long_tail_properties(true)
            .build_data(&mut rng)
            .unwrap()
    };

    let first = run(99);
    let second = run(99);
    assert_eq!(first.assets, second.assets);
    assert_eq!(first.relationships, second.relationships);
    assert_eq!(first.summary, second.summary);

    let other = run(100);
    assert_ne!(first.assets, other.assets);
}

#[test]
fn test_tenant_run_is_isolated_per_tenant() {
    let dir = tempfile::tempdir().unwrap();
    let run = TenantShardWriter::new(
        catalogue::revit_workload().unwrap(),
        TenantManifest::uniform(3, 40, 60),
        5,
    )
    .with_model_id("model-test")
    .with_generated_at(AT)
    .with_format(OutputFormat::Jsonl)
    .write_to(dir.path())
    .unwrap();

    let manifest: RunManifest =
        serde_json::from_str(&fs::read_to_string(dir.path().join(MANIFEST_FILE)).unwrap())
            .unwrap();
    assert_eq!(manifest, run);
    assert_eq!(manifest.tenants.len(), 3);

    let mut all_ids = HashSet::new();
    for record in &manifest.tenants {
        let tenant_dir = dir.path().join(&record.directory);
        let assets = read_assets(&tenant_dir.join("assets.jsonl"), OutputFormat::Jsonl);
        let relationships =
            read_relationships(&tenant_dir.join("relationships.jsonl"), OutputFormat::Jsonl);
        assert_eq!(assets.len(), record.total_assets);
        assert_eq!(relationships.len(), record.total_relationships);

        let tenant_ids: HashSet<&str> = assets.iter().map(|a| a.key.id.as_str()).collect();
        for asset in &assets {
            assert_eq!(asset.key.tenant_id.as_deref(), Some(record.tenant_id.as_str()));
            assert!(asset.key.id.starts_with(&format!("{}-asset-", record.tenant_id)));
            let shard_key = asset.shard_key.as_deref().unwrap();
            assert_eq!(shard_key, format!("{}:{}", record.tenant_id, asset.space.id));
            assert!(all_ids.insert(asset.key.id.clone()));
        }
        for rel in &relationships {
            assert!(tenant_ids.contains(rel.key.from_asset_id.as_str()));
            assert!(tenant_ids.contains(rel.key.to_asset_id.as_str()));
        }
    }
}

#[test]
fn test_tenant_can_be_regenerated_alone() {
    let catalogue = catalogue::revit_workload().unwrap();
    let manifest = TenantManifest::uniform(2, 30, 30);

    let dir = tempfile::tempdir().unwrap();
    let writer = TenantShardWriter::new(catalogue.clone(), manifest, 40)
        .with_model_id("model-test")
        .with_generated_at(AT);
    writer.write_to(dir.path()).unwrap();

    // Second tenant, seeded with base + 1.
    let mut rng = StdRng::seed_from_u64(writer.tenant_seed(1));
    let alone = ModelBuilder::new(catalogue)
        .with_tenant("tenant_0002")
        .with_model_id("model-test")
        .with_generated_at(AT)
        .with_assets(30)
        .with_relationships(30)
        .with_long_tail_properties(true)
        .build_data(&mut rng)
        .unwrap();

    let on_disk = read_assets(
        &dir.path().join("tenant_0002").join("assets.json"),
        OutputFormat::Json,
    );
    assert_eq!(on_disk, alone.assets);
}
