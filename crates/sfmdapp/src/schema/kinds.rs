//! Field tables for every supported document kind.
//!
//! Field order follows the platform's own export order. Collections list their
//! natural key; anything the platform allows to repeat is declared with
//! [`CollectionSpec::repeated`].

use super::{CanonicalOrder, CollectionSpec, FieldSpec, KindSchema, RecordSchema};
use crate::xml::element::Element;

pub const METADATA_NAMESPACE: &str = "http://soap.sforce.com/2006/04/metadata";

/// A record whose children are kept exactly as read.
pub static OPEN_RECORD: RecordSchema = RecordSchema { fields: &[] };

const fn by(key: &'static [&'static str]) -> CollectionSpec {
    CollectionSpec::unique(key)
}

const fn in_document_order(key: &'static [&'static str]) -> CollectionSpec {
    CollectionSpec::repeated(key).ordered(CanonicalOrder::Preserve)
}

const fn text_in_document_order() -> CollectionSpec {
    CollectionSpec::text().ordered(CanonicalOrder::Preserve)
}

static ENABLED_BY_NAME: RecordSchema = RecordSchema {
    fields: &[FieldSpec::leaf("enabled"), FieldSpec::leaf("name")],
};

// Permission records shared by profiles and permission sets.

pub static APPLICATION_VISIBILITY: RecordSchema = RecordSchema {
    fields: &[
        FieldSpec::leaf("application"),
        FieldSpec::leaf("default"),
        FieldSpec::leaf("visible"),
    ],
};

pub static CLASS_ACCESS: RecordSchema = RecordSchema {
    fields: &[FieldSpec::leaf("apexClass"), FieldSpec::leaf("enabled")],
};

pub static FIELD_PERMISSION: RecordSchema = RecordSchema {
    fields: &[
        FieldSpec::leaf("editable"),
        FieldSpec::leaf("field"),
        FieldSpec::leaf("readable"),
    ],
};

pub static FLOW_ACCESS: RecordSchema = RecordSchema {
    fields: &[FieldSpec::leaf("enabled"), FieldSpec::leaf("flow")],
};

pub static OBJECT_PERMISSION: RecordSchema = RecordSchema {
    fields: &[
        FieldSpec::leaf("allowCreate"),
        FieldSpec::leaf("allowDelete"),
        FieldSpec::leaf("allowEdit"),
        FieldSpec::leaf("allowRead"),
        FieldSpec::leaf("modifyAllRecords"),
        FieldSpec::leaf("object"),
        FieldSpec::leaf("viewAllRecords"),
    ],
};

static PAGE_ACCESS: RecordSchema = RecordSchema {
    fields: &[FieldSpec::leaf("apexPage"), FieldSpec::leaf("enabled")],
};

static RECORD_TYPE_VISIBILITY: RecordSchema = RecordSchema {
    fields: &[
        FieldSpec::leaf("default"),
        FieldSpec::leaf("personAccountDefault"),
        FieldSpec::leaf("recordType"),
        FieldSpec::leaf("visible"),
    ],
};

static TAB_SETTING: RecordSchema = RecordSchema {
    fields: &[FieldSpec::leaf("tab"), FieldSpec::leaf("visibility")],
};

static EXTERNAL_DATA_SOURCE_ACCESS: RecordSchema = RecordSchema {
    fields: &[FieldSpec::leaf("dataSource"), FieldSpec::leaf("enabled")],
};

static EXTERNAL_CREDENTIAL_PRINCIPAL_ACCESS: RecordSchema = RecordSchema {
    fields: &[
        FieldSpec::leaf("enabled"),
        FieldSpec::leaf("externalCredentialPrincipal"),
    ],
};

// Profile

pub static LAYOUT_ASSIGNMENT: RecordSchema = RecordSchema {
    fields: &[FieldSpec::leaf("layout"), FieldSpec::leaf("recordType")],
};

static LOGIN_FLOW: RecordSchema = RecordSchema {
    fields: &[
        FieldSpec::leaf("flow"),
        FieldSpec::leaf("flowType"),
        FieldSpec::leaf("friendlyName"),
        FieldSpec::leaf("uiLoginFlowType"),
        FieldSpec::leaf("useLightningRuntime"),
        FieldSpec::leaf("vfFlowPage"),
        FieldSpec::leaf("vfFlowPageTitle"),
    ],
};

static LOGIN_IP_RANGE: RecordSchema = RecordSchema {
    fields: &[
        FieldSpec::leaf("description"),
        FieldSpec::leaf("endAddress"),
        FieldSpec::leaf("startAddress"),
    ],
};

pub static PROFILE_ACTION_OVERRIDE: RecordSchema = RecordSchema {
    fields: &[
        FieldSpec::leaf("actionName"),
        FieldSpec::leaf("content"),
        FieldSpec::leaf("formFactor"),
        FieldSpec::leaf("pageOrSobjectType"),
        FieldSpec::leaf("recordType"),
        FieldSpec::leaf("type"),
        FieldSpec::leaf("profile"),
    ],
};

const PROFILE_ACTION_OVERRIDES: CollectionSpec =
    in_document_order(&["pageOrSobjectType", "recordType", "profile", "formFactor"]);

static PROFILE_ROOT: RecordSchema = RecordSchema {
    fields: &[
        FieldSpec::records("applicationVisibilities", &APPLICATION_VISIBILITY, by(&["application"])),
        FieldSpec::records("categoryGroupVisibilities", &OPEN_RECORD, in_document_order(&[])),
        FieldSpec::records("classAccesses", &CLASS_ACCESS, by(&["apexClass"])),
        FieldSpec::leaf("custom"),
        FieldSpec::records("customMetadataTypeAccesses", &ENABLED_BY_NAME, by(&["name"])),
        FieldSpec::records("customPermissions", &ENABLED_BY_NAME, by(&["name"])),
        FieldSpec::records("customSettingAccesses", &ENABLED_BY_NAME, by(&["name"])),
        FieldSpec::leaf("description"),
        FieldSpec::records("externalDataSourceAccesses", &EXTERNAL_DATA_SOURCE_ACCESS, by(&["dataSource"])),
        FieldSpec::records("fieldPermissions", &FIELD_PERMISSION, by(&["field"])),
        FieldSpec::records("flowAccesses", &FLOW_ACCESS, by(&["flow"])),
        FieldSpec::records("layoutAssignments", &LAYOUT_ASSIGNMENT, CollectionSpec::repeated(&["layout", "recordType"])),
        FieldSpec::record("loginFlows", &LOGIN_FLOW),
        FieldSpec::record("loginHours", &OPEN_RECORD),
        FieldSpec::records("loginIpRanges", &LOGIN_IP_RANGE, in_document_order(&["startAddress", "endAddress"])),
        FieldSpec::records("objectPermissions", &OBJECT_PERMISSION, by(&["object"])),
        FieldSpec::records("pageAccesses", &PAGE_ACCESS, by(&["apexPage"])),
        FieldSpec::records("profileActionOverrides", &PROFILE_ACTION_OVERRIDE, PROFILE_ACTION_OVERRIDES),
        FieldSpec::records("recordTypeVisibilities", &RECORD_TYPE_VISIBILITY, by(&["recordType"])),
        FieldSpec::records("tabVisibilities", &TAB_SETTING, by(&["tab"])),
        FieldSpec::leaf("userLicense"),
        FieldSpec::records("userPermissions", &ENABLED_BY_NAME, by(&["name"])),
    ],
};

pub static PROFILE: KindSchema = KindSchema {
    name: "Profile",
    root: &PROFILE_ROOT,
    suffixes: &[".profile", ".profile-meta.xml"],
    tidy_hook: None,
};

// Permission set

static PERMISSION_SET_ROOT: RecordSchema = RecordSchema {
    fields: &[
        FieldSpec::records("applicationVisibilities", &APPLICATION_VISIBILITY, by(&["application"])),
        FieldSpec::records("classAccesses", &CLASS_ACCESS, by(&["apexClass"])),
        FieldSpec::records("customMetadataTypeAccesses", &ENABLED_BY_NAME, by(&["name"])),
        FieldSpec::records("customPermissions", &ENABLED_BY_NAME, by(&["name"])),
        FieldSpec::records("customSettingAccesses", &ENABLED_BY_NAME, by(&["name"])),
        FieldSpec::leaf("description"),
        FieldSpec::records(
            "externalCredentialPrincipalAccesses",
            &EXTERNAL_CREDENTIAL_PRINCIPAL_ACCESS,
            by(&["externalCredentialPrincipal"]),
        ),
        FieldSpec::records("externalDataSourceAccesses", &EXTERNAL_DATA_SOURCE_ACCESS, by(&["dataSource"])),
        FieldSpec::records("fieldPermissions", &FIELD_PERMISSION, by(&["field"])),
        FieldSpec::records("flowAccesses", &FLOW_ACCESS, by(&["flow"])),
        FieldSpec::leaf("hasActivationRequired"),
        FieldSpec::leaf("label"),
        FieldSpec::leaf("license"),
        FieldSpec::records("objectPermissions", &OBJECT_PERMISSION, by(&["object"])),
        FieldSpec::records("pageAccesses", &PAGE_ACCESS, by(&["apexPage"])),
        FieldSpec::records("recordTypeVisibilities", &RECORD_TYPE_VISIBILITY, by(&["recordType"])),
        FieldSpec::records("tabSettings", &TAB_SETTING, by(&["tab"])),
        FieldSpec::records("userPermissions", &ENABLED_BY_NAME, by(&["name"])),
    ],
};

pub static PERMISSION_SET: KindSchema = KindSchema {
    name: "PermissionSet",
    root: &PERMISSION_SET_ROOT,
    suffixes: &[".permissionset", ".permissionset-meta.xml"],
    tidy_hook: None,
};

// Package manifest

pub static PACKAGE_TYPES: RecordSchema = RecordSchema {
    fields: &[
        FieldSpec::leaves("members", CollectionSpec::text()),
        FieldSpec::leaf("name"),
    ],
};

static PACKAGE_ROOT: RecordSchema = RecordSchema {
    fields: &[
        FieldSpec::leaf("fullName"),
        FieldSpec::leaf("description"),
        FieldSpec::records("types", &PACKAGE_TYPES, by(&["name"])),
        FieldSpec::leaf("version"),
    ],
};

pub static PACKAGE: KindSchema = KindSchema {
    name: "Package",
    root: &PACKAGE_ROOT,
    suffixes: &["package.xml", "destructiveChanges.xml", "destructiveChangesPre.xml", "destructiveChangesPost.xml"],
    tidy_hook: Some(crate::kinds::package::merge_types as fn(&mut Element)),
};

// Custom application

static APP_ACTION_OVERRIDE: RecordSchema = RecordSchema {
    fields: &[
        FieldSpec::leaf("actionName"),
        FieldSpec::leaf("comment"),
        FieldSpec::leaf("content"),
        FieldSpec::leaf("formFactor"),
        FieldSpec::leaf("skipRecordTypeSelect"),
        FieldSpec::leaf("type"),
        FieldSpec::leaf("pageOrSobjectType"),
    ],
};

static APP_BRAND: RecordSchema = RecordSchema {
    fields: &[
        FieldSpec::leaf("headerColor"),
        FieldSpec::leaf("logo"),
        FieldSpec::leaf("logoVersion"),
        FieldSpec::leaf("shouldOverrideOrgTheme"),
    ],
};

static CUSTOM_APPLICATION_ROOT: RecordSchema = RecordSchema {
    fields: &[
        FieldSpec::records("actionOverrides", &APP_ACTION_OVERRIDE, in_document_order(&["actionName", "pageOrSobjectType"])),
        FieldSpec::record("brand", &APP_BRAND),
        FieldSpec::record("consoleConfig", &OPEN_RECORD),
        FieldSpec::leaf("defaultLandingTab"),
        FieldSpec::leaf("description"),
        FieldSpec::leaves("formFactors", text_in_document_order()),
        FieldSpec::leaf("isNavAutoTempTabsDisabled"),
        FieldSpec::leaf("isNavPersonalizationDisabled"),
        FieldSpec::leaf("isNavTabPersistenceDisabled"),
        FieldSpec::leaf("label"),
        FieldSpec::leaf("logo"),
        FieldSpec::leaf("navType"),
        FieldSpec::records("profileActionOverrides", &PROFILE_ACTION_OVERRIDE, PROFILE_ACTION_OVERRIDES),
        FieldSpec::leaf("setupExperience"),
        FieldSpec::leaves("tabs", CollectionSpec::text().ordered(CanonicalOrder::Manifest("CustomTab"))),
        FieldSpec::leaf("uiType"),
        FieldSpec::leaf("utilityBar"),
    ],
};

pub static CUSTOM_APPLICATION: KindSchema = KindSchema {
    name: "CustomApplication",
    root: &CUSTOM_APPLICATION_ROOT,
    suffixes: &[".app", ".app-meta.xml"],
    tidy_hook: None,
};

// Custom object and list views

static LIST_VIEW_FILTER: RecordSchema = RecordSchema {
    fields: &[
        FieldSpec::leaf("field"),
        FieldSpec::leaf("operation"),
        FieldSpec::leaf("value"),
    ],
};

static SHARED_TO: RecordSchema = RecordSchema {
    fields: &[
        FieldSpec::leaf("allInternalUsers"),
        FieldSpec::leaves("group", CollectionSpec::text()),
        FieldSpec::leaves("role", CollectionSpec::text()),
        FieldSpec::leaves("roleAndSubordinates", CollectionSpec::text()),
    ],
};

pub static LIST_VIEW_RECORD: RecordSchema = RecordSchema {
    fields: &[
        FieldSpec::leaf("fullName"),
        FieldSpec::leaf("booleanFilter"),
        FieldSpec::leaves("columns", text_in_document_order()),
        FieldSpec::leaf("filterScope"),
        FieldSpec::records("filters", &LIST_VIEW_FILTER, in_document_order(&["field"])),
        FieldSpec::leaf("label"),
        FieldSpec::leaf("queue"),
        FieldSpec::record("sharedTo", &SHARED_TO),
        FieldSpec::leaf("language"),
    ],
};

pub static OBJECT_FIELD: RecordSchema = RecordSchema {
    fields: &[
        FieldSpec::leaf("fullName"),
        FieldSpec::leaf("businessOwnerGroup"),
        FieldSpec::leaf("businessStatus"),
        FieldSpec::leaf("caseSensitive"),
        FieldSpec::leaf("complianceGroup"),
        FieldSpec::leaf("defaultValue"),
        FieldSpec::leaf("deleteConstraint"),
        FieldSpec::leaf("deprecated"),
        FieldSpec::leaf("description"),
        FieldSpec::leaf("displayFormat"),
        FieldSpec::leaf("externalId"),
        FieldSpec::leaf("fieldManageability"),
        FieldSpec::leaf("formula"),
        FieldSpec::leaf("formulaTreatBlanksAs"),
        FieldSpec::leaf("inlineHelpText"),
        FieldSpec::leaf("label"),
        FieldSpec::leaf("length"),
        FieldSpec::record("lookupFilter", &OPEN_RECORD),
        FieldSpec::leaf("precision"),
        FieldSpec::leaf("referenceTo"),
        FieldSpec::leaf("relationshipLabel"),
        FieldSpec::leaf("relationshipName"),
        FieldSpec::leaf("relationshipOrder"),
        FieldSpec::leaf("reparentableMasterDetail"),
        FieldSpec::leaf("required"),
        FieldSpec::leaf("scale"),
        FieldSpec::leaf("securityClassification"),
        FieldSpec::leaf("summarizedField"),
        FieldSpec::leaf("summaryForeignKey"),
        FieldSpec::leaf("summaryOperation"),
        FieldSpec::leaf("trackFeedHistory"),
        FieldSpec::leaf("trackHistory"),
        FieldSpec::leaf("trackTrending"),
        FieldSpec::leaf("type"),
        FieldSpec::leaf("unique"),
        FieldSpec::record("valueSet", &OPEN_RECORD),
        FieldSpec::leaf("visibleLines"),
        FieldSpec::leaf("writeRequiresMasterRead"),
    ],
};

static FIELD_SET_ITEM: RecordSchema = RecordSchema {
    fields: &[
        FieldSpec::leaf("field"),
        FieldSpec::leaf("isFieldManaged"),
        FieldSpec::leaf("isRequired"),
    ],
};

pub static FIELD_SET: RecordSchema = RecordSchema {
    fields: &[
        FieldSpec::leaf("fullName"),
        FieldSpec::records("availableFields", &FIELD_SET_ITEM, in_document_order(&["field"])),
        FieldSpec::leaf("description"),
        FieldSpec::records("displayedFields", &FIELD_SET_ITEM, in_document_order(&["field"])),
        FieldSpec::leaf("label"),
    ],
};

static COMPACT_LAYOUT: RecordSchema = RecordSchema {
    fields: &[
        FieldSpec::leaf("fullName"),
        FieldSpec::leaves("fields", text_in_document_order()),
        FieldSpec::leaf("label"),
    ],
};

static NAME_FIELD: RecordSchema = RecordSchema {
    fields: &[
        FieldSpec::leaf("displayFormat"),
        FieldSpec::leaf("label"),
        FieldSpec::leaf("trackHistory"),
        FieldSpec::leaf("type"),
    ],
};

pub static RECORD_TYPE: RecordSchema = RecordSchema {
    fields: &[
        FieldSpec::leaf("fullName"),
        FieldSpec::leaf("active"),
        FieldSpec::leaf("businessProcess"),
        FieldSpec::leaf("compactLayoutAssignment"),
        FieldSpec::leaf("description"),
        FieldSpec::leaf("label"),
        FieldSpec::records("picklistValues", &OPEN_RECORD, in_document_order(&["picklist"])),
    ],
};

pub static VALIDATION_RULE: RecordSchema = RecordSchema {
    fields: &[
        FieldSpec::leaf("fullName"),
        FieldSpec::leaf("active"),
        FieldSpec::leaf("description"),
        FieldSpec::leaf("errorConditionFormula"),
        FieldSpec::leaf("errorDisplayField"),
        FieldSpec::leaf("errorMessage"),
    ],
};

static OBJECT_WEB_LINK: RecordSchema = RecordSchema {
    fields: &[
        FieldSpec::leaf("fullName"),
        FieldSpec::leaf("availability"),
        FieldSpec::leaf("description"),
        FieldSpec::leaf("displayType"),
        FieldSpec::leaf("encodingKey"),
        FieldSpec::leaf("hasMenubar"),
        FieldSpec::leaf("hasScrollbars"),
        FieldSpec::leaf("hasToolbar"),
        FieldSpec::leaf("height"),
        FieldSpec::leaf("isResizable"),
        FieldSpec::leaf("linkType"),
        FieldSpec::leaf("masterLabel"),
        FieldSpec::leaf("openType"),
        FieldSpec::leaf("page"),
        FieldSpec::leaf("position"),
        FieldSpec::leaf("protected"),
        FieldSpec::leaf("requireRowSelection"),
        FieldSpec::leaf("showsLocation"),
        FieldSpec::leaf("showsStatus"),
        FieldSpec::leaf("url"),
        FieldSpec::leaf("width"),
    ],
};

static CUSTOM_OBJECT_ROOT: RecordSchema = RecordSchema {
    fields: &[
        FieldSpec::records("actionOverrides", &APP_ACTION_OVERRIDE, in_document_order(&["actionName", "formFactor"])),
        FieldSpec::leaf("allowInChatterGroups"),
        FieldSpec::leaf("compactLayoutAssignment"),
        FieldSpec::records("compactLayouts", &COMPACT_LAYOUT, by(&["fullName"])),
        FieldSpec::leaf("customHelpPage"),
        FieldSpec::leaf("deploymentStatus"),
        FieldSpec::leaf("description"),
        FieldSpec::leaf("enableActivities"),
        FieldSpec::leaf("enableBulkApi"),
        FieldSpec::leaf("enableDivisions"),
        FieldSpec::leaf("enableEnhancedLookup"),
        FieldSpec::leaf("enableFeeds"),
        FieldSpec::leaf("enableHistory"),
        FieldSpec::leaf("enableLicensing"),
        FieldSpec::leaf("enableReports"),
        FieldSpec::leaf("enableSearch"),
        FieldSpec::leaf("enableSharing"),
        FieldSpec::leaf("enableStreamingApi"),
        FieldSpec::leaf("externalSharingModel"),
        FieldSpec::records("fieldSets", &FIELD_SET, by(&["fullName"])),
        FieldSpec::records("fields", &OBJECT_FIELD, by(&["fullName"])),
        FieldSpec::leaf("label"),
        FieldSpec::records("listViews", &LIST_VIEW_RECORD, by(&["fullName"])),
        FieldSpec::record("nameField", &NAME_FIELD),
        FieldSpec::leaf("pluralLabel"),
        FieldSpec::leaf("recordTypeTrackFeedHistory"),
        FieldSpec::leaf("recordTypeTrackHistory"),
        FieldSpec::records("recordTypes", &RECORD_TYPE, by(&["fullName"])),
        FieldSpec::record("searchLayouts", &OPEN_RECORD),
        FieldSpec::leaf("sharingModel"),
        FieldSpec::leaf("startsWith"),
        FieldSpec::records("validationRules", &VALIDATION_RULE, by(&["fullName"])),
        FieldSpec::leaf("visibility"),
        FieldSpec::records("webLinks", &OBJECT_WEB_LINK, by(&["fullName"])),
    ],
};

pub static CUSTOM_OBJECT: KindSchema = KindSchema {
    name: "CustomObject",
    root: &CUSTOM_OBJECT_ROOT,
    suffixes: &[".object", ".object-meta.xml"],
    tidy_hook: None,
};

pub static LIST_VIEW: KindSchema = KindSchema {
    name: "ListView",
    root: &LIST_VIEW_RECORD,
    suffixes: &[".listView", ".listView-meta.xml"],
    tidy_hook: None,
};

// Custom permission

static CUSTOM_PERMISSION_ROOT: RecordSchema = RecordSchema {
    fields: &[
        FieldSpec::leaf("connectedApp"),
        FieldSpec::leaf("description"),
        FieldSpec::leaf("isLicensed"),
        FieldSpec::leaf("label"),
        FieldSpec::records("requiredPermission", &OPEN_RECORD, in_document_order(&["customPermission"])),
    ],
};

pub static CUSTOM_PERMISSION: KindSchema = KindSchema {
    name: "CustomPermission",
    root: &CUSTOM_PERMISSION_ROOT,
    suffixes: &[".customPermission", ".customPermission-meta.xml"],
    tidy_hook: None,
};

// Open-only kinds

static OAUTH_CONFIG: RecordSchema = RecordSchema {
    fields: &[
        FieldSpec::leaf("callbackUrl"),
        FieldSpec::leaf("certificate"),
        FieldSpec::leaf("consumerKey"),
        FieldSpec::leaf("isAdminApproved"),
        FieldSpec::leaf("isConsumerSecretOptional"),
        FieldSpec::leaf("isIntrospectAllTokens"),
        FieldSpec::leaf("isSecretRequiredForRefreshToken"),
        FieldSpec::leaves("scopes", text_in_document_order()),
    ],
};

static OAUTH_POLICY: RecordSchema = RecordSchema {
    fields: &[
        FieldSpec::leaf("ipRelaxation"),
        FieldSpec::leaf("refreshTokenPolicy"),
    ],
};

static CONNECTED_APP_ROOT: RecordSchema = RecordSchema {
    fields: &[
        FieldSpec::leaf("contactEmail"),
        FieldSpec::leaf("label"),
        FieldSpec::record("oauthConfig", &OAUTH_CONFIG),
        FieldSpec::record("oauthPolicy", &OAUTH_POLICY),
        FieldSpec::leaf("description"),
        FieldSpec::leaf("permissionSetName"),
    ],
};

pub static CONNECTED_APP: KindSchema = KindSchema {
    name: "ConnectedApp",
    root: &CONNECTED_APP_ROOT,
    suffixes: &[".connectedApp", ".connectedApp-meta.xml"],
    tidy_hook: None,
};

static NAMED_CREDENTIAL_PARAMETER: RecordSchema = RecordSchema {
    fields: &[
        FieldSpec::leaf("parameterName"),
        FieldSpec::leaf("parameterType"),
        FieldSpec::leaf("parameterValue"),
        FieldSpec::leaf("externalCredential"),
    ],
};

static NAMED_CREDENTIAL_ROOT: RecordSchema = RecordSchema {
    fields: &[
        FieldSpec::leaf("allowMergeFieldsInBody"),
        FieldSpec::leaf("allowMergeFieldsInHeader"),
        FieldSpec::leaf("calloutStatus"),
        FieldSpec::leaf("generateAuthorizationHeader"),
        FieldSpec::leaf("label"),
        FieldSpec::records(
            "namedCredentialParameters",
            &NAMED_CREDENTIAL_PARAMETER,
            in_document_order(&["parameterName", "parameterType"]),
        ),
        FieldSpec::leaf("namedCredentialType"),
    ],
};

pub static NAMED_CREDENTIAL: KindSchema = KindSchema {
    name: "NamedCredential",
    root: &NAMED_CREDENTIAL_ROOT,
    suffixes: &[".namedCredential", ".namedCredential-meta.xml"],
    tidy_hook: None,
};

static EXTERNAL_CREDENTIAL_PARAMETER: RecordSchema = RecordSchema {
    fields: &[
        FieldSpec::leaf("parameterName"),
        FieldSpec::leaf("parameterType"),
        FieldSpec::leaf("sequenceNumber"),
        FieldSpec::leaf("parameterValue"),
    ],
};

static EXTERNAL_CREDENTIAL_ROOT: RecordSchema = RecordSchema {
    fields: &[
        FieldSpec::leaf("authenticationProtocol"),
        FieldSpec::records(
            "externalCredentialParameters",
            &EXTERNAL_CREDENTIAL_PARAMETER,
            in_document_order(&["parameterName", "parameterType"]),
        ),
        FieldSpec::leaf("label"),
    ],
};

pub static EXTERNAL_CREDENTIAL: KindSchema = KindSchema {
    name: "ExternalCredential",
    root: &EXTERNAL_CREDENTIAL_ROOT,
    suffixes: &[".externalCredential", ".externalCredential-meta.xml"],
    tidy_hook: None,
};

static WEB_LINK_ROOT: RecordSchema = RecordSchema {
    fields: &[
        FieldSpec::leaf("availability"),
        FieldSpec::leaf("displayType"),
        FieldSpec::leaf("encodingKey"),
        FieldSpec::leaf("hasMenubar"),
        FieldSpec::leaf("hasScrollbars"),
        FieldSpec::leaf("hasToolbar"),
        FieldSpec::leaf("height"),
        FieldSpec::leaf("isResizable"),
        FieldSpec::leaf("linkType"),
        FieldSpec::leaf("masterLabel"),
        FieldSpec::leaf("openType"),
        FieldSpec::leaf("position"),
        FieldSpec::leaf("protected"),
        FieldSpec::leaf("showsLocation"),
        FieldSpec::leaf("showsStatus"),
        FieldSpec::leaf("url"),
    ],
};

pub static CUSTOM_PAGE_WEB_LINK: KindSchema = KindSchema {
    name: "CustomPageWebLink",
    root: &WEB_LINK_ROOT,
    suffixes: &[".weblink", ".weblink-meta.xml"],
    tidy_hook: None,
};

static SUBSCRIBER_CONFIG_ROOT: RecordSchema = RecordSchema {
    fields: &[
        FieldSpec::leaf("batchSize"),
        FieldSpec::leaf("masterLabel"),
        FieldSpec::leaf("platformEventConsumer"),
        FieldSpec::leaf("user"),
    ],
};

pub static PLATFORM_EVENT_SUBSCRIBER_CONFIG: KindSchema = KindSchema {
    name: "PlatformEventSubscriberConfig",
    root: &SUBSCRIBER_CONFIG_ROOT,
    suffixes: &[".platformEventSubscriberConfig", ".platformEventSubscriberConfig-meta.xml"],
    tidy_hook: None,
};

/// Every kind this crate knows, in registry order.
pub static ALL: &[&KindSchema] = &[
    &PROFILE,
    &PERMISSION_SET,
    &PACKAGE,
    &CUSTOM_APPLICATION,
    &CUSTOM_OBJECT,
    &LIST_VIEW,
    &CUSTOM_PERMISSION,
    &CONNECTED_APP,
    &NAMED_CREDENTIAL,
    &EXTERNAL_CREDENTIAL,
    &CUSTOM_PAGE_WEB_LINK,
    &PLATFORM_EVENT_SUBSCRIBER_CONFIG,
];
