// tests/integration_test.rs
use unifi_timeline::classifier::Classifier;
use unifi_timeline::config::Config;
use unifi_timeline::domain::{DownloadLink, JsonList, ProductLine, RawRelease, VersionType, Year};
use unifi_timeline::input::{load_releases, parse_releases};
use unifi_timeline::merge::{MergeEngine, MergeKey};
use unifi_timeline::output::{write_document, TimelineDocument};

const FIXTURE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/releases.json");

fn engine() -> MergeEngine {
    let config = Config::default();
    let classifier = Classifier::new(&config.taxonomy).expect("default taxonomy compiles");
    MergeEngine::new(classifier, config.display, config.sources)
}

fn switch(name: &str, version: &str) -> RawRelease {
    RawRelease {
        release_id: format!("id-{}", name),
        product_name: name.to_string(),
        version: version.to_string(),
        tags: JsonList::from(vec!["unifi-switch"]),
        release_date: "2023-05-01".into(),
        ..Default::default()
    }
}

#[test]
fn test_end_to_end_switch_merge() {
    let timeline = engine().process(&[switch("USW-24-PoE", "6_0_0"), switch("USW-48", "6.0.0")]);

    assert_eq!(timeline.stats.merged_releases, 1);
    let key = MergeKey::new(
        ProductLine::UnifiSwitch,
        VersionType::Ga,
        Year::Known(2023),
        "6-0-0",
    );
    let entry = timeline.find(&key).expect("merged entry exists");
    assert_eq!(entry.compatible_devices, vec!["USW-24-PoE", "USW-48"]);
    assert_eq!(entry.version, "6-0-0");
    assert!(entry.is_merged);
    assert!(
        entry.display_title.contains("2 devices"),
        "title should carry the device count, got: {}",
        entry.display_title
    );
}

#[test]
fn test_merge_in_either_order() {
    let a = switch("USW-24-PoE", "6.0.0");
    let b = switch("USW-48", "6.0.0");
    let forward = engine().process(&[a.clone(), b.clone()]);
    let backward = engine().process(&[b, a]);

    let mut f = forward.entries().next().unwrap().compatible_devices.clone();
    let mut r = backward.entries().next().unwrap().compatible_devices.clone();
    assert_eq!(f.len(), r.len());
    f.sort();
    r.sort();
    assert_eq!(f, r);
    assert!(forward.entries().all(|e| e.is_merged));
    assert!(backward.entries().all(|e| e.is_merged));
}

#[test]
fn test_stats_sum_equals_distinct_keys() {
    let releases = vec![
        switch("USW-24", "6.0.0"),
        switch("USW-48", "6.0.0"),
        switch("USW-16", "6.0.0"),
        switch("USW-16", "6.1.0"),
    ];
    let timeline = engine().process(&releases);
    let sum: usize = timeline.stats.product_lines.values().sum();
    assert_eq!(sum, timeline.entries().count());
    assert_eq!(sum, 2);
    assert_ne!(sum, releases.len());
}

#[test]
fn test_source_urls_dedup_ignoring_query() {
    let mut a = switch("USW-24", "6.0.0");
    a.source_url = Some("https://community.ui.com/releases/x?ref=1".to_string());
    let mut b = switch("USW-48", "6.0.0");
    b.source_url = Some("https://community.ui.com/releases/x?ref=2".to_string());

    let timeline = engine().process(&[a, b]);
    let entry = timeline.entries().next().unwrap();
    assert_eq!(entry.source_urls, vec!["https://community.ui.com/releases/x?ref=1"]);
}

#[test]
fn test_download_links_dedup() {
    let mut a = switch("USW-24", "6.0.0");
    a.download_links = JsonList::from(vec!["Firmware: https://dl.example/fw.bin"]);
    let mut b = switch("USW-48", "6.0.0");
    b.download_links = JsonList::from(vec![
        "Firmware: https://dl.example/fw.bin",
        "https://dl.example/fw48.bin",
    ]);

    let timeline = engine().process(&[a, b]);
    let entry = timeline.entries().next().unwrap();
    assert_eq!(
        entry.download_links,
        vec![
            DownloadLink::new("Firmware", "https://dl.example/fw.bin"),
            DownloadLink::new("Download", "https://dl.example/fw48.bin"),
        ]
    );
}

#[test]
fn test_malformed_record_does_not_affect_others() {
    let mut bad = switch("USW-24", "6.0.0");
    bad.tags = JsonList::Encoded("[unterminated".to_string());
    bad.download_links = JsonList::Encoded("{".to_string());
    let good = RawRelease {
        release_id: "ap".to_string(),
        product_name: "U6 Pro".to_string(),
        version: "6.5.28".to_string(),
        tags: JsonList::from(vec!["unifi-wireless"]),
        release_date: "2023-07-01".into(),
        download_links: JsonList::from(vec!["U6 Pro: https://dl.example/u6.bin"]),
        ..Default::default()
    };

    let alone = engine().process(&[good.clone()]);
    let together = engine().process(&[bad, good]);

    let key = MergeKey::new(
        ProductLine::UnifiAp,
        VersionType::Ga,
        Year::Known(2023),
        "6.5.28",
    );
    assert_eq!(alone.find(&key), together.find(&key));
    let kinds: Vec<&str> = together.warnings.iter().map(|w| w.kind()).collect();
    assert_eq!(kinds, vec!["malformed_tags", "malformed_links"]);
}

#[test]
fn test_bad_payloads_become_warnings_not_dropped_records() {
    let loaded = parse_releases(
        r#"[
            {"release_id": "a", "product_name": "USW-24", "version": "6.0.0",
             "tags": {"x": 1}, "release_date": "2023-05-01", "release_notes": "Fix A"},
            {"release_id": "b", "product_name": "USW-48", "version": "6.0.0",
             "tags": ["unifi-switch"], "download_links": 7, "stage": null,
             "release_date": 1682899200.0, "release_notes": "Fix B"}
        ]"#,
    )
    .expect("input parses");
    assert_eq!(loaded.releases.len(), 2);
    assert!(loaded.warnings.is_empty());

    let timeline = engine().process(&loaded.releases);
    let kinds: Vec<&str> = timeline.warnings.iter().map(|w| w.kind()).collect();
    assert_eq!(kinds, vec!["malformed_tags", "malformed_links"]);

    let key = MergeKey::new(
        ProductLine::UnifiSwitch,
        VersionType::Ga,
        Year::Known(2023),
        "6.0.0",
    );
    let entry = timeline.find(&key).expect("both records merged");
    assert_eq!(entry.compatible_devices, vec!["USW-24", "USW-48"]);
    assert_eq!(entry.combined_notes.len(), 2);
    assert!(entry.download_links.is_empty());
}

#[test]
fn test_fixture_batch() {
    let loaded = load_releases(FIXTURE).expect("fixture loads");
    assert_eq!(loaded.releases.len(), 7);
    assert_eq!(loaded.warnings.len(), 1);
    assert_eq!(loaded.warnings[0].kind(), "undecodable_record");

    let timeline = engine().process(&loaded.releases);
    assert_eq!(timeline.stats.total_releases, 7);
    assert_eq!(timeline.stats.merged_releases, 6);

    let switch_key = MergeKey::new(
        ProductLine::UnifiSwitch,
        VersionType::Ga,
        Year::Known(2023),
        "6.0.0",
    );
    let merged = timeline.find(&switch_key).expect("switch entry");
    assert_eq!(merged.compatible_devices, vec!["USW-24-PoE", "USW-48"]);
    assert_eq!(merged.source_urls.len(), 1);
    assert_eq!(merged.download_links.len(), 2);
    assert_eq!(merged.combined_notes.len(), 2);
    assert_eq!(merged.combined_notes[0].notes, "Improved PoE stability");

    let lines: Vec<ProductLine> = timeline.organized.keys().copied().collect();
    assert_eq!(
        lines,
        vec![
            ProductLine::UnifiOs,
            ProductLine::UnifiSwitch,
            ProductLine::UnifiAp,
            ProductLine::UnifiApp,
            ProductLine::Other,
        ]
    );
    assert!(timeline.organized[&ProductLine::UnifiApp].contains_key(&VersionType::Ios));
    assert!(timeline.organized[&ProductLine::UnifiAp].contains_key(&VersionType::Rc));
    assert!(timeline.organized[&ProductLine::Other][&VersionType::Ga].contains_key(&Year::Unknown));

    let kinds: Vec<&str> = timeline.warnings.iter().map(|w| w.kind()).collect();
    assert_eq!(kinds, vec!["malformed_links", "malformed_tags", "unparsable_date"]);
}

#[test]
fn test_fixture_document_written() {
    let loaded = load_releases(FIXTURE).unwrap();
    let config = Config::default();
    let classifier = Classifier::new(&config.taxonomy).unwrap();
    let engine = MergeEngine::new(classifier, config.display, config.sources);
    let timeline = engine.process(&loaded.releases);

    let dir = tempfile::tempdir().unwrap();
    let mut output = config.output.clone();
    output.dir = dir.path().to_path_buf();
    let document = TimelineDocument::new(&timeline, engine.classifier());
    let path = write_document(&document, &output).unwrap();

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
    assert_eq!(json["latest_update"], "2024-02-01");
    assert_eq!(json["stats"]["total_releases"], 7);
    assert_eq!(json["stats"]["years"]["unknown"], 1);
    assert_eq!(json["product_line_stats"]["unifi-switch"]["GA"], 2);
    assert_eq!(json["warnings"][0]["kind"], "malformed_links");
    assert_eq!(json["warnings"][0]["release_id"], "ap-rc");
    let switch_2023 = &json["organized"]["unifi-switch"]["GA"]["2023"][0];
    assert_eq!(switch_2023["is_merged"], true);
    assert_eq!(switch_2023["compatible_devices"][1], "USW-48");
}
