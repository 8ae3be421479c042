use serde::{Deserialize, Serialize};

use crate::error::{PsaError, Result};
use crate::platform::Platform;

pub const DEFAULT_SECTION: &str = "utils";
pub const DEFAULT_CATEGORY: &str = "Application";
pub const INITIAL_VERSION: &str = "0.1.0";
pub const INITIAL_REVISION: u32 = 1;

/// The variable fields of a project, as embedded in its generated files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectMetadata {
    pub name: String,
    pub platform: Platform,
    pub section: String,
    pub app_name: String,
    pub category: String,
    pub description: String,
    pub version: String,
    pub revision: u32,
}

impl ProjectMetadata {
    /// Metadata with every optional field at its default.
    pub fn new(name: &str, platform: Platform) -> Self {
        Self {
            name: name.to_string(),
            platform,
            section: DEFAULT_SECTION.to_string(),
            app_name: name.to_string(),
            category: DEFAULT_CATEGORY.to_string(),
            description: String::new(),
            version: INITIAL_VERSION.to_string(),
            revision: INITIAL_REVISION,
        }
    }

    /// Overlay the fields present in `update`. `name` and `platform` never change.
    pub fn apply(&mut self, update: &MetadataUpdate) {
        if let Some(section) = &update.section {
            self.section = section.clone();
        }
        if let Some(app_name) = &update.app_name {
            self.app_name = app_name.clone();
        }
        if let Some(category) = &update.category {
            self.category = category.clone();
        }
        if let Some(description) = &update.description {
            self.description = description.clone();
        }
    }
}

/// A partial set of field assignments. Absent fields keep their current value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct MetadataUpdate {
    #[serde(default)]
    pub section: Option<String>,
    #[serde(default)]
    pub app_name: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl MetadataUpdate {
    pub fn is_empty(&self) -> bool {
        self.fields().iter().all(|(_, value)| value.is_none())
    }

    /// Reject empty or multi-line values; every field is stored on a single line.
    pub fn validate(&self) -> Result<()> {
        for (field, value) in self.fields() {
            if let Some(value) = value {
                validate_value(field, value)?;
            }
        }
        Ok(())
    }

    fn fields(&self) -> [(&'static str, Option<&String>); 4] {
        [
            ("section", self.section.as_ref()),
            ("app-name", self.app_name.as_ref()),
            ("category", self.category.as_ref()),
            ("description", self.description.as_ref()),
        ]
    }
}

/// Project names become file names, a Debian package name and a Python literal.
pub fn validate_name(name: &str) -> Result<()> {
    let mut chars = name.chars();
    let valid = match chars.next() {
        Some(first) => {
            first.is_ascii_alphanumeric()
                && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '+' | '-'))
        }
        None => false,
    };

    if valid {
        Ok(())
    } else {
        Err(PsaError::InvalidField {
            field: "name".into(),
            reason: format!(
                "'{name}' must start with a letter or digit and contain only letters, digits, '.', '_', '+' or '-'"
            ),
        })
    }
}

fn validate_value(field: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(PsaError::InvalidField {
            field: field.to_string(),
            reason: "value must not be empty".into(),
        });
    }
    if value.contains(['\n', '\r']) {
        return Err(PsaError::InvalidField {
            field: field.to_string(),
            reason: "value must fit on a single line".into(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn new_uses_defaults() {
        let meta = ProjectMetadata::new("testproject", Platform::Harmattan);
        assert_eq!(meta.section, "utils");
        assert_eq!(meta.app_name, "testproject");
        assert_eq!(meta.category, "Application");
        assert_eq!(meta.description, "");
        assert_eq!(meta.version, "0.1.0");
        assert_eq!(meta.revision, 1);
    }

    #[test]
    fn apply_only_touches_present_fields() {
        let mut meta = ProjectMetadata::new("testproject", Platform::Fremantle);
        meta.description = "kept".into();

        meta.apply(&MetadataUpdate {
            category: Some("Game".into()),
            ..Default::default()
        });

        assert_eq!(meta.category, "Game");
        assert_eq!(meta.section, "utils");
        assert_eq!(meta.app_name, "testproject");
        assert_eq!(meta.description, "kept");
        assert_eq!(meta.name, "testproject");
        assert_eq!(meta.platform, Platform::Fremantle);
    }

    #[test]
    fn empty_update_is_empty() {
        assert!(MetadataUpdate::default().is_empty());
        assert!(!MetadataUpdate {
            section: Some("games".into()),
            ..Default::default()
        }
        .is_empty());
    }

    #[rstest]
    #[case(MetadataUpdate { section: Some(String::new()), ..Default::default() }, "section")]
    #[case(MetadataUpdate { app_name: Some(String::new()), ..Default::default() }, "app-name")]
    #[case(MetadataUpdate { category: Some("a\nb".into()), ..Default::default() }, "category")]
    #[case(MetadataUpdate { description: Some(String::new()), ..Default::default() }, "description")]
    fn validate_rejects_bad_values(#[case] update: MetadataUpdate, #[case] expected: &str) {
        let err = update.validate().unwrap_err();
        assert!(matches!(err, PsaError::InvalidField { field, .. } if field == expected));
    }

    #[test]
    fn validate_accepts_free_text() {
        let update = MetadataUpdate {
            description: Some(r#"say "hi" \ wave"#.into()),
            app_name: Some("test app1".into()),
            ..Default::default()
        };
        assert!(update.validate().is_ok());
    }

    #[rstest]
    #[case("testproject", true)]
    #[case("testproject-harmattan", true)]
    #[case("my_app2.0", true)]
    #[case("", false)]
    #[case("-leading", false)]
    #[case("has space", false)]
    #[case("../escape", false)]
    #[case("quote\"d", false)]
    fn validate_name_cases(#[case] name: &str, #[case] ok: bool) {
        assert_eq!(validate_name(name).is_ok(), ok);
    }
}
