use crate::document::Document;
use crate::schema::kinds::{CUSTOM_APPLICATION, PROFILE};
use crate::xml::element::Element;

/// A canonical profile: tidied and encoded, so it round-trips byte for byte.
pub const PROFILE_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<Profile xmlns="http://soap.sforce.com/2006/04/metadata">
    <applicationVisibilities>
        <application>MyApp</application>
        <default>false</default>
        <visible>true</visible>
    </applicationVisibilities>
    <custom>false</custom>
    <description></description>
    <fieldPermissions>
        <editable>false</editable>
        <field>Account.Industry</field>
        <readable>true</readable>
    </fieldPermissions>
    <layoutAssignments>
        <layout>Account-Account Layout</layout>
    </layoutAssignments>
    <layoutAssignments>
        <layout>Account-Account Layout</layout>
        <recordType>Account.Partner</recordType>
    </layoutAssignments>
    <objectPermissions>
        <allowCreate>false</allowCreate>
        <allowDelete>false</allowDelete>
        <allowEdit>false</allowEdit>
        <allowRead>true</allowRead>
        <modifyAllRecords>false</modifyAllRecords>
        <object>Account</object>
        <viewAllRecords>false</viewAllRecords>
    </objectPermissions>
    <userLicense>Salesforce</userLicense>
    <userPermissions>
        <enabled>true</enabled>
        <name>ApiEnabled</name>
    </userPermissions>
</Profile>
"#;

/// A profile holding only a read-only `Account` object permission.
pub fn profile_with_account() -> Document {
    let mut doc = Document::new(&PROFILE);
    doc.root_mut().push(
        Element::record("objectPermissions")
            .with_leaf("allowCreate", false)
            .with_leaf("allowDelete", false)
            .with_leaf("allowEdit", false)
            .with_leaf("allowRead", true)
            .with_leaf("modifyAllRecords", false)
            .with_leaf("object", "Account")
            .with_leaf("viewAllRecords", false),
    );
    doc
}

/// An application with one `View` override per form factor, Large first.
pub fn application_with_overrides() -> Document {
    let mut doc = Document::new(&CUSTOM_APPLICATION);
    for form_factor in ["Large", "Small"] {
        doc.root_mut().push(
            Element::record("profileActionOverrides")
                .with_leaf("actionName", "View")
                .with_leaf("content", "Account_Record_Page")
                .with_leaf("formFactor", form_factor)
                .with_leaf("pageOrSobjectType", "Account")
                .with_leaf("type", "Flexipage")
                .with_leaf("profile", "Admin"),
        );
    }
    doc
}
