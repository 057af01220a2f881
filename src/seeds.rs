//! Seed packs: knowledge bootstrapping for a knowledge base.
//!
//! A seed pack is a TOML document holding a `[seed]` metadata table and a
//! top-level `rules` array of `(= pattern body)` strings in the textual atom
//! form. One pack is bundled into the binary: `funding`.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::atom::Atom;
use crate::error::SeedError;
use crate::reader;
use crate::space::KnowledgeBase;

pub type SeedResult<T> = std::result::Result<T, SeedError>;

// ── Seed pack data model ────────────────────────────────────────────────

/// A seed pack: metadata plus parsed rule atoms, in file order.
#[derive(Debug, Clone)]
pub struct SeedPack {
    pub id: String,
    pub name: String,
    pub version: String,
    pub description: String,
    pub rules: Vec<Atom>,
    /// Source: `Bundled` or `External(path)`.
    pub source: SeedSource,
}

/// Where a seed pack came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeedSource {
    /// Bundled into the binary via `include_str!`.
    Bundled,
    /// Loaded from a file.
    External(PathBuf),
}

/// Report after applying a seed pack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedReport {
    pub id: String,
    pub rules_applied: usize,
    pub rules_rejected: usize,
}

// ── TOML deserialization helpers ─────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct SeedToml {
    seed: SeedMeta,
    #[serde(default)]
    rules: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct SeedMeta {
    id: String,
    name: String,
    version: String,
    #[serde(default)]
    description: String,
}

// ── Bundled seed packs ──────────────────────────────────────────────────

const FUNDING_TOML: &str = include_str!("../data/seeds/funding/seed.toml");

/// IDs of the packs bundled into the binary.
pub fn bundled_ids() -> &'static [&'static str] {
    &["funding"]
}

impl SeedPack {
    /// Parse a pack from TOML text.
    pub fn parse(toml_str: &str, source: SeedSource) -> SeedResult<Self> {
        let parsed: SeedToml = toml::from_str(toml_str).map_err(|e| SeedError::Parse {
            id: "(unknown)".into(),
            message: e.to_string(),
        })?;

        let rules = parsed
            .rules
            .iter()
            .enumerate()
            .map(|(index, text)| {
                reader::parse(text).map_err(|source| SeedError::RuleSyntax {
                    id: parsed.seed.id.clone(),
                    index,
                    source,
                })
            })
            .collect::<SeedResult<Vec<_>>>()?;

        Ok(Self {
            id: parsed.seed.id,
            name: parsed.seed.name,
            version: parsed.seed.version,
            description: parsed.seed.description,
            rules,
            source,
        })
    }

    /// Load a pack from a TOML file.
    pub fn load(path: &Path) -> SeedResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| SeedError::Io {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::parse(&content, SeedSource::External(path.to_path_buf()))
    }

    /// A pack bundled into the binary, by ID.
    pub fn bundled(id: &str) -> SeedResult<Self> {
        match id {
            "funding" => Self::parse(FUNDING_TOML, SeedSource::Bundled),
            _ => Err(SeedError::NotFound {
                id: id.to_string(),
                available: bundled_ids().join(", "),
            }),
        }
    }

    /// Insert every rule into `kb`, in order. Atoms that are not equality
    /// rules are counted and skipped.
    pub fn apply(&self, kb: &mut KnowledgeBase) -> SeedReport {
        let mut report = SeedReport {
            id: self.id.clone(),
            rules_applied: 0,
            rules_rejected: 0,
        };
        for rule in &self.rules {
            if kb.add_rule(rule) {
                report.rules_applied += 1;
            } else {
                tracing::warn!(seed = %self.id, %rule, "seed entry is not an equality rule; skipped");
                report.rules_rejected += 1;
            }
        }
        tracing::info!(
            seed = %self.id,
            applied = report.rules_applied,
            rejected = report.rules_rejected,
            "seed pack applied"
        );
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
rules = [
    "(= (threshold HIGH) 0.50)",
    "(NotARule x)",
    "(= A AA)",
]

[seed]
id = "sample"
name = "Sample"
version = "1.0.0"
"#;

    #[test]
    fn parse_sample_pack() {
        let pack = SeedPack::parse(SAMPLE, SeedSource::Bundled).unwrap();
        assert_eq!(pack.id, "sample");
        assert_eq!(pack.rules.len(), 3);
        assert!(pack.description.is_empty());
    }

    #[test]
    fn apply_counts_rejected_rules() {
        let pack = SeedPack::parse(SAMPLE, SeedSource::Bundled).unwrap();
        let mut kb = KnowledgeBase::new();
        let report = pack.apply(&mut kb);
        assert_eq!(report.rules_applied, 2);
        assert_eq!(report.rules_rejected, 1);
        assert_eq!(kb.len(), 2);
    }

    #[test]
    fn bad_rule_text_reports_index() {
        let toml = r#"
rules = ["(= a b)", "(= (a b)"]

[seed]
id = "broken"
name = "Broken"
version = "0"
"#;
        let err = SeedPack::parse(toml, SeedSource::Bundled).unwrap_err();
        assert!(matches!(err, SeedError::RuleSyntax { index: 1, .. }));
    }

    #[test]
    fn missing_metadata_is_parse_error() {
        let err = SeedPack::parse("rules = []", SeedSource::Bundled).unwrap_err();
        assert!(matches!(err, SeedError::Parse { .. }));
    }

    #[test]
    fn bundled_funding_pack_loads() {
        let pack = SeedPack::bundled("funding").unwrap();
        assert_eq!(pack.source, SeedSource::Bundled);
        let mut kb = KnowledgeBase::new();
        let report = pack.apply(&mut kb);
        assert_eq!(report.rules_rejected, 0);
        assert_eq!(report.rules_applied, 11);
    }

    #[test]
    fn unknown_bundled_pack() {
        let err = SeedPack::bundled("nope").unwrap_err();
        assert!(matches!(err, SeedError::NotFound { ref available, .. } if available == "funding"));
        for id in bundled_ids() {
            assert!(SeedPack::bundled(id).is_ok(), "bundled pack {id} failed to load");
        }
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("seed.toml");
        std::fs::write(&path, SAMPLE).unwrap();
        let pack = SeedPack::load(&path).unwrap();
        assert_eq!(pack.source, SeedSource::External(path));
        assert!(matches!(
            SeedPack::load(&dir.path().join("missing.toml")),
            Err(SeedError::Io { .. })
        ));
    }
}
