//! Integration tests for writing artifacts to disk

use std::fs;
use tempfile::TempDir;
use transex_extractor::{
    generate_outputs, write_artifacts, ExtractorConfig, Triplet, FEWSHOT_JSON, TRANSITIONS_TXT,
};

#[test]
fn test_write_artifacts_creates_all_files() {
    let temp_dir = TempDir::new().unwrap();
    let out_dir = temp_dir.path().join("resultats");

    let triplets = vec![Triplet {
        paragraph_a: "La foire aux vins se tient ce week-end.".to_string(),
        transition: "En outre".to_string(),
        paragraph_b: "une navette gratuite relie la gare au parc.".to_string(),
    }];
    let transitions = vec!["En outre".to_string(), "Ainsi".to_string()];
    let bundle = generate_outputs(&triplets, &transitions, &ExtractorConfig::default()).unwrap();

    let written = write_artifacts(&bundle, &out_dir).unwrap();
    assert_eq!(written.len(), 6);
    for path in &written {
        assert!(path.exists(), "missing {}", path.display());
    }

    let json = fs::read_to_string(out_dir.join(FEWSHOT_JSON)).unwrap();
    let parsed: Vec<Triplet> = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, triplets);

    let list = fs::read_to_string(out_dir.join(TRANSITIONS_TXT)).unwrap();
    assert_eq!(list, "Ainsi\nEn outre");
}

#[test]
fn test_write_artifacts_overwrites_previous_run() {
    let temp_dir = TempDir::new().unwrap();
    let config = ExtractorConfig::default();

    let first = generate_outputs(&[], &["Puis".to_string()], &config).unwrap();
    write_artifacts(&first, temp_dir.path()).unwrap();

    let second = generate_outputs(&[], &["Enfin".to_string()], &config).unwrap();
    write_artifacts(&second, temp_dir.path()).unwrap();

    let list = fs::read_to_string(temp_dir.path().join(TRANSITIONS_TXT)).unwrap();
    assert_eq!(list, "Enfin");
}
