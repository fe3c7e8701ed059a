//! Import declarations (`use`)

use pact_core::hash::ModuleHash;
use pact_core::names::ModuleName;
use compact_str::CompactString;
use serde::{Deserialize, Serialize};

/// Import failures
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ImportError {
    /// The module's hash differs from the pinned one
    #[error("module {module} hash mismatch: pinned {pinned}, found {actual}")]
    HashMismatch {
        /// Imported module
        module: ModuleName,
        /// Hash named by the import
        pinned: ModuleHash,
        /// Hash of the module actually loaded
        actual: ModuleHash,
    },

    /// The import was checked against a different module
    #[error("import of {expected} checked against module {actual}")]
    ModuleMismatch {
        /// Module named by the import
        expected: ModuleName,
        /// Module supplied
        actual: ModuleName,
    },

    /// An explicit import list with nothing in it
    #[error("empty import list for module {0}")]
    EmptyImportList(ModuleName),
}

/// An import: module, optional pinned hash, optional symbol allow-list
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Use {
    /// Imported module
    pub module: ModuleName,
    /// Exact hash the module must have
    #[serde(default)]
    pub hash: Option<ModuleHash>,
    /// Visible symbols; all public symbols when absent
    #[serde(default)]
    pub imports: Option<Vec<CompactString>>,
}

impl Use {
    /// Import every public symbol of `module` at whatever hash it has
    pub fn new(module: ModuleName) -> Self {
        Use {
            module,
            hash: None,
            imports: None,
        }
    }

    /// Pin the module hash
    pub fn pinned(mut self, hash: ModuleHash) -> Self {
        self.hash = Some(hash);
        self
    }

    /// Restrict visible symbols
    pub fn with_imports<I, S>(mut self, symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<CompactString>,
    {
        self.imports = Some(symbols.into_iter().map(Into::into).collect());
        self
    }

    /// Fails when a pinned hash is present and differs from `actual`
    pub fn check_hash(&self, actual: &ModuleHash) -> Result<(), ImportError> {
        match &self.hash {
            Some(pinned) if pinned != actual => {
                tracing::warn!(module = %self.module, %pinned, %actual, "import hash mismatch");
                Err(ImportError::HashMismatch {
                    module: self.module.clone(),
                    pinned: *pinned,
                    actual: *actual,
                })
            }
            _ => Ok(()),
        }
    }

    /// Validate this import against the module it resolved to
    pub fn check_module(&self, name: &ModuleName, hash: &ModuleHash) -> Result<(), ImportError> {
        if &self.module != name {
            return Err(ImportError::ModuleMismatch {
                expected: self.module.clone(),
                actual: name.clone(),
            });
        }
        if matches!(&self.imports, Some(list) if list.is_empty()) {
            return Err(ImportError::EmptyImportList(self.module.clone()));
        }
        self.check_hash(hash)
    }

    /// Whether `symbol` is visible through this import
    pub fn exposes(&self, symbol: &str) -> bool {
        match &self.imports {
            None => true,
            Some(list) => list.iter().any(|s| s == symbol),
        }
    }
}
