//! Version descriptor shared by a mod's local manifest and its remote counterpart

use serde::{Deserialize, Serialize};

use crate::version::error::DescriptorError;

/// A mod's declared version, where to find the latest one, and when it was released
///
/// On disk and over the wire this is a small XML document:
///
/// ```xml
/// <VersionData>
///   <version>1.0.3</version>
///   <versionURL>https://example.com/MyMod/Version.xml</versionURL>
///   <date>2016-08-01</date>
/// </VersionData>
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename = "VersionData")]
pub struct VersionRecord {
    #[serde(default)]
    pub version: String,
    #[serde(default, rename = "versionURL")]
    pub source_url: String,
    #[serde(default, rename = "date")]
    pub release_date: String,
}

impl VersionRecord {
    pub fn new(version: &str, source_url: &str, release_date: &str) -> Self {
        Self {
            version: version.to_string(),
            source_url: source_url.to_string(),
            release_date: release_date.to_string(),
        }
    }

    /// Returns false for records with an empty version, which are never compared
    pub fn is_declared(&self) -> bool {
        !self.version.is_empty()
    }

    fn trimmed(self) -> Self {
        Self {
            version: self.version.trim().to_string(),
            source_url: self.source_url.trim().to_string(),
            release_date: self.release_date.trim().to_string(),
        }
    }
}

/// Parse a version descriptor document
///
/// Missing elements become empty strings and every value is trimmed.
pub fn parse_descriptor(body: &str) -> Result<VersionRecord, DescriptorError> {
    let body = body.trim_start_matches('\u{feff}').trim();
    if !body.starts_with('<') {
        return Err(DescriptorError::NotXml);
    }

    let record: VersionRecord = quick_xml::de::from_str(body)?;
    Ok(record.trimmed())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn parse_descriptor_reads_all_fields() {
        let body = r#"<?xml version="1.0" encoding="utf-8"?>
<VersionData>
    <version>1.0.3</version>
    <versionURL>https://example.com/Mod/Version.xml</versionURL>
    <date>2016-08-01</date>
</VersionData>"#;

        let record = parse_descriptor(body).unwrap();

        assert_eq!(
            record,
            VersionRecord::new("1.0.3", "https://example.com/Mod/Version.xml", "2016-08-01")
        );
    }

    #[test]
    fn parse_descriptor_defaults_missing_fields_to_empty() {
        let record = parse_descriptor("<VersionData><version>2.1</version></VersionData>").unwrap();

        assert_eq!(record.version, "2.1");
        assert!(record.source_url.is_empty());
        assert!(record.release_date.is_empty());
    }

    #[test]
    fn parse_descriptor_trims_values() {
        let record = parse_descriptor(
            "<VersionData><version>\n  0.14.2  \n</version><date> June </date></VersionData>",
        )
        .unwrap();

        assert_eq!(record.version, "0.14.2");
        assert_eq!(record.release_date, "June");
    }

    #[test]
    fn parse_descriptor_ignores_unknown_elements() {
        let record = parse_descriptor(
            "<VersionData><author>someone</author><version>1.0</version></VersionData>",
        )
        .unwrap();

        assert_eq!(record.version, "1.0");
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("1.0.3")]
    #[case("{\"version\": \"1.0\"}")]
    fn parse_descriptor_rejects_non_xml_bodies(#[case] body: &str) {
        assert!(matches!(
            parse_descriptor(body),
            Err(DescriptorError::NotXml)
        ));
    }

    #[test]
    fn parse_descriptor_rejects_truncated_document() {
        let result = parse_descriptor("<VersionData><version>1.0.3</version>");

        assert!(matches!(result, Err(DescriptorError::Parse(_))));
    }

    #[rstest]
    #[case(VersionRecord::new("1.0", "", ""), true)]
    #[case(VersionRecord::new("", "https://example.com", "today"), false)]
    #[case(VersionRecord::default(), false)]
    fn is_declared_depends_only_on_version(#[case] record: VersionRecord, #[case] expected: bool) {
        assert_eq!(record.is_declared(), expected);
    }
}
