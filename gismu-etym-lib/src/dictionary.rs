use std::collections::HashMap;

use tracing::debug;

use crate::error::LoadError;
use crate::types::RootWord;

/// Read-only map from gismu to its entry.
#[derive(Debug, Clone, Default)]
pub struct RootIndex {
    entries: HashMap<String, RootWord>,
}

impl RootIndex {
    /// Build the index. A later entry for the same gismu replaces an earlier one.
    pub fn new(roots: impl IntoIterator<Item = RootWord>) -> Self {
        let entries = roots
            .into_iter()
            .map(|root| (root.gismu.clone(), root))
            .collect();
        Self { entries }
    }

    pub fn get(&self, gismu: &str) -> Option<&RootWord> {
        self.entries.get(gismu)
    }

    pub fn contains(&self, gismu: &str) -> bool {
        self.entries.contains_key(gismu)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries in alphabetical order.
    pub fn sorted(&self) -> Vec<&RootWord> {
        let mut roots: Vec<_> = self.entries.values().collect();
        roots.sort_by(|a, b| a.gismu.cmp(&b.gismu));
        roots
    }
}

/// Read-only map from rafsi to the gismu it abbreviates.
#[derive(Debug, Clone, Default)]
pub struct AffixIndex {
    entries: HashMap<String, String>,
}

impl AffixIndex {
    /// Derive the affix table from the rafsi lists of `roots`. Every rafsi
    /// must belong to exactly one gismu.
    pub fn from_roots(roots: &RootIndex) -> Result<Self, LoadError> {
        let mut entries: HashMap<String, String> = HashMap::new();
        for root in roots.sorted() {
            for rafsi in &root.rafsi {
                if let Some(first) = entries.get(rafsi) {
                    if *first != root.gismu {
                        return Err(LoadError::DuplicateAffix {
                            rafsi: rafsi.clone(),
                            first: first.clone(),
                            second: root.gismu.clone(),
                        });
                    }
                    continue;
                }
                entries.insert(rafsi.clone(), root.gismu.clone());
            }
        }
        Ok(Self { entries })
    }

    /// The gismu abbreviated by `rafsi`.
    pub fn get(&self, rafsi: &str) -> Option<&str> {
        self.entries.get(rafsi).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The two lookup tables the decomposer and annotator work against.
#[derive(Debug, Clone, Default)]
pub struct Dictionary {
    roots: RootIndex,
    affixes: AffixIndex,
}

impl Dictionary {
    /// Build both tables from a list of root entries.
    pub fn from_roots(roots: impl IntoIterator<Item = RootWord>) -> Result<Self, LoadError> {
        let roots = RootIndex::new(roots);
        let affixes = AffixIndex::from_roots(&roots)?;
        debug!(
            gismu = roots.len(),
            rafsi = affixes.len(),
            "dictionary tables built"
        );
        Ok(Self { roots, affixes })
    }

    pub fn roots(&self) -> &RootIndex {
        &self.roots
    }

    pub fn affixes(&self) -> &AffixIndex {
        &self.affixes
    }

    /// Look up a gismu entry.
    pub fn lookup(&self, gismu: &str) -> Option<&RootWord> {
        self.roots.get(gismu)
    }

    pub fn is_root(&self, word: &str) -> bool {
        self.roots.contains(word)
    }

    /// The gismu a rafsi stands for.
    pub fn rafsi_root(&self, rafsi: &str) -> Option<&str> {
        self.affixes.get(rafsi)
    }
}
