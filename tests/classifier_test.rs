// tests/classifier_test.rs
use unifi_timeline::classifier::{Classifier, Rule};
use unifi_timeline::config::TaxonomyConfig;
use unifi_timeline::domain::{JsonList, ProductLine, RawRelease, VersionType};
use unifi_timeline::version::sortable_key;

fn classifier() -> Classifier {
    Classifier::new(&TaxonomyConfig::default()).expect("default taxonomy compiles")
}

fn release(product: &str, version: &str, tags: &[&str]) -> RawRelease {
    RawRelease {
        product_name: product.to_string(),
        version: version.to_string(),
        tags: JsonList::from(tags.to_vec()),
        ..Default::default()
    }
}

#[test]
fn test_unifi_os_classifies_as_os() {
    let c = classifier().classify_detailed(&release("UniFi OS 3.0", "3.0.13", &["UniFi OS"]));
    assert_eq!(c.product_line, ProductLine::UnifiOs);
    assert_eq!(c.rule, Rule::OsOverride);
}

#[test]
fn test_ios_app_is_not_unifi_os() {
    let (line, vtype) = classifier().classify(&release("UniFi iOS App 2.0", "2.0", &[]));
    assert_ne!(line, ProductLine::UnifiOs);
    assert!(line.is_app(), "expected an app line, got {}", line);
    assert_eq!(vtype, VersionType::Ios);
}

#[test]
fn test_gateway_tag_routing() {
    let c = classifier();
    assert_eq!(
        c.product_line(&release("Dream Machine", "4.0.6", &["unifi-gateway", "UniFi OS"])),
        ProductLine::UnifiOs
    );
    assert_eq!(
        c.product_line(&release("U-LTE", "1.2.0", &["unifi-wireless", "lte"])),
        ProductLine::UnifiGateway
    );
    assert_eq!(
        c.product_line(&release("UXG Pro", "1.2.0", &["unifi-gateway"])),
        ProductLine::UnifiGateway
    );
}

#[test]
fn test_classification_is_total() {
    let c = classifier();
    let samples = [
        release("", "", &[]),
        release("???", "!!!", &["", "   "]),
        release("UniFi", "5.14.23", &["unifi-mystery"]),
        release("EdgeRouter X", "v2.0.9", &[]),
        RawRelease {
            tags: JsonList::Encoded("nope".to_string()),
            ..Default::default()
        },
    ];
    for sample in &samples {
        let line = c.product_line(sample);
        assert!(ProductLine::ALL.contains(&line));
    }
}

#[test]
fn test_version_types() {
    let c = classifier();
    let mut beta = release("USW Flex", "6.0.0", &["unifi-switch"]);
    beta.is_beta = true;
    assert_eq!(c.version_type(&beta), VersionType::Beta);

    let mut rc = release("USW Flex", "6.0.0", &["unifi-switch"]);
    rc.stage = "Release Candidate".to_string();
    assert_eq!(c.version_type(&rc), VersionType::Rc);

    assert_eq!(
        c.version_type(&release("USW Flex", "6.0.0-alpha.2", &["unifi-switch"])),
        VersionType::Alpha
    );
    assert_eq!(
        c.version_type(&release("WiFiman", "1.4.0", &["android"])),
        VersionType::Android
    );
}

#[test]
fn test_version_ordering() {
    assert!(sortable_key("2.1.0") > sortable_key("2.1.0-rc.1"));
    assert!(sortable_key("2.1.0-rc.1") > sortable_key("2.1.0-beta.3"));
    assert!(sortable_key("2.1.0-beta.3") > sortable_key("2.1.0-alpha.1"));
    assert!(sortable_key("2.10.0") > sortable_key("2.9.0"));
}

#[test]
fn test_label_overrides() {
    let mut taxonomy = TaxonomyConfig::default();
    taxonomy
        .labels
        .insert(ProductLine::UnifiAp, "Access Points".to_string());
    let c = Classifier::new(&taxonomy).unwrap();
    assert_eq!(c.label(ProductLine::UnifiAp), "Access Points");
    assert_eq!(c.label(ProductLine::UnifiSwitch), "UniFi Switch");
}
