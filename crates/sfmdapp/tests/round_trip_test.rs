use sfmdapp::ops::tidy::tidy;
use sfmdapp::registry::Registry;
use sfmdapp::schema::kinds::{CUSTOM_OBJECT, PACKAGE};
use sfmdapp::store;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const PACKAGE_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<Package xmlns="http://soap.sforce.com/2006/04/metadata">
    <types>
        <members>InvoiceService</members>
        <members>InvoiceServiceTest</members>
        <name>ApexClass</name>
    </types>
    <types>
        <members>Invoice__c</members>
        <name>CustomObject</name>
    </types>
    <version>51.0</version>
</Package>
"#;

const OBJECT_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<CustomObject xmlns="http://soap.sforce.com/2006/04/metadata" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">
    <deploymentStatus>Deployed</deploymentStatus>
    <description>Tom &amp; Jerry&apos;s &quot;invoices&quot; &lt;draft&gt;</description>
    <fields>
        <fullName>Amount__c</fullName>
        <label>Amount</label>
        <precision>18</precision>
        <required>false</required>
        <scale>2</scale>
        <type>Currency</type>
    </fields>
    <fields>
        <fullName>Notes__c</fullName>
        <inlineHelpText></inlineHelpText>
        <label>Notes</label>
        <type>LongTextArea</type>
        <visibleLines>3</visibleLines>
    </fields>
    <label>Invoice</label>
    <futureFeature>kept</futureFeature>
    <nameField>
        <label>Invoice Number</label>
        <type>AutoNumber</type>
    </nameField>
    <pluralLabel>Invoices</pluralLabel>
    <sharingModel>ReadWrite</sharingModel>
</CustomObject>
"#;

const CONNECTED_APP_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<ConnectedApp xmlns="http://soap.sforce.com/2006/04/metadata">
    <contactEmail>admin@example.com</contactEmail>
    <label>Billing Sync</label>
    <oauthConfig>
        <callbackUrl>https://example.com/callback</callbackUrl>
        <consumerKey>abc123</consumerKey>
        <isAdminApproved>true</isAdminApproved>
        <scopes>Api</scopes>
        <scopes>RefreshToken</scopes>
    </oauthConfig>
    <oauthPolicy>
        <ipRelaxation>ENFORCE</ipRelaxation>
        <refreshTokenPolicy>infinite</refreshTokenPolicy>
    </oauthPolicy>
</ConnectedApp>
"#;

fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn canonical_files_round_trip_byte_for_byte() {
    let dir = TempDir::new().unwrap();
    let registry = Registry::default();
    for (name, content) in [
        ("package.xml", PACKAGE_XML),
        ("Invoice__c.object", OBJECT_XML),
        ("Billing.connectedApp", CONNECTED_APP_XML),
        ("Admin.profile", sfmdapp_profile()),
    ] {
        let path = write(&dir, name, content);
        let doc = store::open_any(&path, &registry).unwrap();
        assert_eq!(doc.encode(), content, "{name}");

        store::write_to_file(&doc, &path).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), content, "{name}");
        assert!(!store::needs_tidy(&path, &registry, None).unwrap(), "{name}");
    }
}

fn sfmdapp_profile() -> &'static str {
    r#"<?xml version="1.0" encoding="UTF-8"?>
<Profile xmlns="http://soap.sforce.com/2006/04/metadata">
    <custom>true</custom>
    <layoutAssignments>
        <layout>Invoice__c-Invoice Layout</layout>
    </layoutAssignments>
    <layoutAssignments>
        <layout>Invoice__c-Invoice Layout</layout>
        <recordType>Invoice__c.Credit</recordType>
    </layoutAssignments>
    <userLicense>Salesforce</userLicense>
</Profile>
"#
}

#[test]
fn reordered_input_is_written_in_schema_order() {
    let dir = TempDir::new().unwrap();
    let shuffled = r#"<?xml version='1.0' encoding='UTF-8'?>
<Package xmlns="http://soap.sforce.com/2006/04/metadata">
  <version>51.0</version>
  <types><name>CustomObject</name><members>Invoice__c</members></types>
  <types><name>ApexClass</name><members>InvoiceServiceTest</members></types>
  <types><members>InvoiceService</members><name>ApexClass</name></types>
</Package>"#;
    let path = write(&dir, "package.xml", shuffled);

    let registry = Registry::default();
    assert!(store::tidy_file(&path, &registry, None).unwrap());
    assert_eq!(fs::read_to_string(&path).unwrap(), PACKAGE_XML);
}

#[test]
fn tidy_is_idempotent_on_messy_documents() {
    let dir = TempDir::new().unwrap();
    let messy = r#"<?xml version="1.0" encoding="UTF-8"?>
<Package xmlns="http://soap.sforce.com/2006/04/metadata">
<types><members>B</members><members>A</members><members>B</members><name>ApexClass</name></types>
<types><members>C</members><name>ApexClass</name></types>
<version>51.0</version>
</Package>"#;
    let path = write(&dir, "package.xml", messy);

    let mut doc = store::open(&path, &PACKAGE).unwrap();
    tidy(&mut doc, None).unwrap();
    let once = doc.encode();
    tidy(&mut doc, None).unwrap();
    assert_eq!(doc.encode(), once);
    assert!(once.contains("<members>A</members>\n        <members>B</members>\n        <members>C</members>"));
}

#[test]
fn lenient_decoding_keeps_unknown_entities_and_latin1_text() {
    let dir = TempDir::new().unwrap();
    let mut bytes = br#"<?xml version="1.0" encoding="ISO-8859-1"?>
<CustomObject xmlns="http://soap.sforce.com/2006/04/metadata">
    <description>caf"#
        .to_vec();
    bytes.push(0xE9);
    bytes.extend_from_slice(b" &nbsp; R&D</description>\n</CustomObject>\n");
    let path = dir.path().join("Cafe__c.object");
    fs::write(&path, bytes).unwrap();

    let doc = store::open(&path, &CUSTOM_OBJECT).unwrap();
    assert_eq!(doc.leaf("description").as_str(), Some("café &nbsp; R&D"));
    assert!(doc
        .encode()
        .contains("<description>café &amp;nbsp; R&amp;D</description>"));
}

#[test]
fn malformed_file_is_a_parse_error() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "Broken.object", "<CustomObject><label>x</CustomObject>");
    let err = store::open(&path, &CUSTOM_OBJECT).unwrap_err();
    assert!(matches!(err, sfmdapp::error::MdError::Parse { .. }));
}
