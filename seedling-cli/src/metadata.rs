use serde::Serialize;

/// Package metadata of this tool, exposed to templates
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageMetadata {
    pub name: String,
    pub version: String,
    pub description: String,
    pub homepage: String,
    pub repository: String,
    pub authors: Vec<String>,
}

impl PackageMetadata {
    /// Metadata baked in from this crate's manifest
    pub fn current() -> Self {
        Self {
            name: env!("CARGO_PKG_NAME").to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            description: env!("CARGO_PKG_DESCRIPTION").to_string(),
            homepage: env!("CARGO_PKG_HOMEPAGE").to_string(),
            repository: env!("CARGO_PKG_REPOSITORY").to_string(),
            authors: env!("CARGO_PKG_AUTHORS")
                .split(':')
                .filter(|a| !a.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_current_metadata() {
        let meta = PackageMetadata::current();
        assert_eq!(meta.name, "seedling-cli");
        assert!(!meta.version.is_empty());
        assert!(!meta.description.is_empty());
        assert_eq!(meta.authors, vec!["The Seedling Developers".to_string()]);
    }
}
