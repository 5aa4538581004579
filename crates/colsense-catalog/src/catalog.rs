//! The mutable, hot-reloadable pattern catalog.
//!
//! # Concurrency
//!
//! Readers call [`PatternCatalog::snapshot`] and get an `Arc` to an
//! immutable [`CatalogSnapshot`]; they never block on each other and never
//! observe a partially applied change. Mutations are serialized by a mutex,
//! build a complete new snapshot, and publish it with a single pointer swap.

use std::io::Write;
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};

use colsense_model::{CatalogDocument, RuleDefinition, RuleProvenance};
use tracing::{debug, info, warn};

use crate::error::{CatalogError, Result};
use crate::persist::write_atomic;
use crate::rule::PatternRule;
use crate::snapshot::{CatalogSnapshot, CatalogSummary, ExportScope};
use crate::source::CatalogSource;
use crate::validators::{ValidatorRegistry, default_registry};

/// What `add_custom_pattern_with` does when the type key already exists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InsertPolicy {
    /// Replace the existing rule in place.
    #[default]
    Overwrite,
    /// Fail with [`CatalogError::DuplicateKey`].
    Strict,
}

/// Process-wide rule set with atomic snapshot publication.
#[derive(Debug)]
pub struct PatternCatalog {
    active: RwLock<Arc<CatalogSnapshot>>,
    /// Serializes mutations and remembers the last loaded source.
    last_source: Mutex<Option<CatalogSource>>,
    registry: Arc<ValidatorRegistry>,
}

impl Default for PatternCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl PatternCatalog {
    /// An empty catalog using the built-in validation strategies.
    pub fn new() -> Self {
        Self::with_registry(default_registry())
    }

    /// An empty catalog resolving validators through `registry`.
    pub fn with_registry(registry: Arc<ValidatorRegistry>) -> Self {
        Self {
            active: RwLock::new(Arc::new(CatalogSnapshot::default())),
            last_source: Mutex::new(None),
            registry,
        }
    }

    /// A catalog loaded from `source`.
    pub fn from_source(source: CatalogSource) -> Result<Self> {
        let catalog = Self::new();
        catalog.load(source)?;
        Ok(catalog)
    }

    /// A catalog loaded from the embedded default rule set.
    pub fn builtin() -> Result<Self> {
        Self::from_source(CatalogSource::builtin())
    }

    /// Loads `path`, falling back to the built-in rule set when the file
    /// does not exist. A file that is malformed, or whose existence cannot
    /// be checked, is still an error.
    pub fn open_or_builtin(path: &Path) -> Result<Self> {
        let exists = path.try_exists().map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        if exists {
            return Self::from_source(CatalogSource::file(path));
        }
        warn!(
            path = %path.display(),
            "pattern catalog not found, using built-in field patterns"
        );
        Self::builtin()
    }

    /// The current snapshot. Cheap; holds no lock after returning.
    pub fn snapshot(&self) -> Arc<CatalogSnapshot> {
        let active = self.active.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&active)
    }

    /// Current rules in catalog order.
    pub fn rules(&self) -> Vec<Arc<PatternRule>> {
        self.snapshot().rules().to_vec()
    }

    pub fn summary(&self) -> CatalogSummary {
        self.snapshot().summary()
    }

    pub fn registry(&self) -> &Arc<ValidatorRegistry> {
        &self.registry
    }

    /// The source the active rule set was last loaded from.
    pub fn source(&self) -> Option<CatalogSource> {
        self.lock_mutations().clone()
    }

    /// Parses `source` and replaces the active rule set with it.
    ///
    /// On failure the active rule set and the remembered source are left
    /// unchanged.
    pub fn load(&self, source: CatalogSource) -> Result<()> {
        let mut last_source = self.lock_mutations();
        self.replace_from(&source)?;
        *last_source = Some(source);
        Ok(())
    }

    /// Re-reads the last source, or `source` when given, and replaces the
    /// active rule set wholesale. Custom patterns the source does not
    /// declare are discarded.
    pub fn reload(&self, source: Option<CatalogSource>) -> Result<()> {
        let mut last_source = self.lock_mutations();
        let source = match source.or_else(|| last_source.clone()) {
            Some(source) => source,
            None => {
                return Err(CatalogError::malformed(
                    "<none>",
                    "no catalog source has been loaded yet",
                ));
            }
        };
        info!(source = %source.name(), "reloading field patterns");
        self.replace_from(&source)?;
        *last_source = Some(source);
        Ok(())
    }

    /// Inserts or overwrites a custom rule.
    pub fn add_custom_pattern(&self, type_key: &str, definition: RuleDefinition) -> Result<()> {
        self.add_custom_pattern_with(type_key, definition, InsertPolicy::Overwrite)
    }

    /// Inserts a custom rule under an explicit duplicate-key policy.
    ///
    /// An overwritten rule keeps its position in catalog order.
    pub fn add_custom_pattern_with(
        &self,
        type_key: &str,
        definition: RuleDefinition,
        policy: InsertPolicy,
    ) -> Result<()> {
        let _guard = self.lock_mutations();
        let current = self.snapshot();
        let existing = current.position(type_key);
        if existing.is_some() && policy == InsertPolicy::Strict {
            return Err(CatalogError::DuplicateKey {
                type_key: type_key.to_string(),
            });
        }

        let rule = PatternRule::compile(
            type_key,
            definition,
            RuleProvenance::Custom,
            &self.registry,
        )
        .map_err(|message| {
            CatalogError::malformed(format!("custom pattern '{type_key}'"), message)
        })?;

        let mut rules = current.rules().to_vec();
        match existing {
            Some(idx) => rules[idx] = Arc::new(rule),
            None => rules.push(Arc::new(rule)),
        }
        let snapshot = self.publish(rules);
        debug!(
            type_key,
            replaced = existing.is_some(),
            generation = snapshot.generation(),
            "added custom field pattern"
        );
        Ok(())
    }

    /// Removes a rule, built-in or custom, returning it.
    pub fn remove_pattern(&self, type_key: &str) -> Result<Arc<PatternRule>> {
        let _guard = self.lock_mutations();
        let current = self.snapshot();
        let Some(idx) = current.position(type_key) else {
            return Err(CatalogError::UnknownType {
                type_key: type_key.to_string(),
            });
        };
        let mut rules = current.rules().to_vec();
        let removed = rules.remove(idx);
        let snapshot = self.publish(rules);
        debug!(
            type_key,
            provenance = %removed.provenance(),
            generation = snapshot.generation(),
            "removed field pattern"
        );
        Ok(removed)
    }

    /// Writes every rule to `path` in the format `load` reads.
    pub fn export(&self, path: &Path) -> Result<()> {
        self.export_with(path, ExportScope::All)
    }

    /// Writes the rules selected by `scope` to `path`.
    ///
    /// The file is written to a temporary sibling and renamed into place.
    pub fn export_with(&self, path: &Path, scope: ExportScope) -> Result<()> {
        let target = path.display().to_string();
        let bytes = self.export_bytes(scope, &target)?;
        write_atomic(path, &bytes).map_err(|source| CatalogError::serialization(&target, source))?;
        info!(path = %target, bytes = bytes.len(), "exported field patterns");
        Ok(())
    }

    /// Writes the rules selected by `scope` to an arbitrary byte stream.
    pub fn export_to_writer<W: Write>(&self, writer: &mut W, scope: ExportScope) -> Result<()> {
        let bytes = self.export_bytes(scope, "<writer>")?;
        writer
            .write_all(&bytes)
            .and_then(|()| writer.flush())
            .map_err(|source| CatalogError::serialization("<writer>", source))
    }

    /// The current rule set as a document.
    pub fn to_document(&self, scope: ExportScope) -> Result<CatalogDocument> {
        self.snapshot()
            .to_document(scope)
            .map_err(|e| CatalogError::serialization("<document>", e.into()))
    }

    fn export_bytes(&self, scope: ExportScope, target: &str) -> Result<Vec<u8>> {
        let document = self.to_document(scope)?;
        let mut bytes = serde_json::to_vec_pretty(&document)
            .map_err(|e| CatalogError::serialization(target, e.into()))?;
        bytes.push(b'\n');
        Ok(bytes)
    }

    fn replace_from(&self, source: &CatalogSource) -> Result<()> {
        let name = source.name();
        let bytes = source.read()?;
        let rules = parse_rules(&bytes, &name, &self.registry)?;
        let snapshot = self.publish(rules);
        info!(
            source = %name,
            patterns = snapshot.len(),
            generation = snapshot.generation(),
            "loaded field patterns"
        );
        Ok(())
    }

    fn publish(&self, rules: Vec<Arc<PatternRule>>) -> Arc<CatalogSnapshot> {
        let mut active = self.active.write().unwrap_or_else(PoisonError::into_inner);
        let snapshot = Arc::new(CatalogSnapshot::new(rules, active.generation() + 1));
        *active = Arc::clone(&snapshot);
        snapshot
    }

    fn lock_mutations(&self) -> MutexGuard<'_, Option<CatalogSource>> {
        self.last_source
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

/// Parses a rule-definition document into built-in rules, in document order.
pub fn parse_rules(
    bytes: &[u8],
    source_name: &str,
    registry: &ValidatorRegistry,
) -> Result<Vec<Arc<PatternRule>>> {
    let document: CatalogDocument = serde_json::from_slice(bytes)
        .map_err(|e| CatalogError::malformed(source_name, e.to_string()))?;

    let mut rules = Vec::with_capacity(document.field_patterns.len());
    for (type_key, definition) in document.definitions() {
        let definition = definition.map_err(|e| {
            CatalogError::malformed(source_name, format!("pattern '{type_key}': {e}"))
        })?;
        let rule = PatternRule::compile(type_key, definition, RuleProvenance::BuiltIn, registry)
            .map_err(|message| CatalogError::malformed(source_name, message))?;
        rules.push(Arc::new(rule));
    }
    Ok(rules)
}

#[cfg(test)]
mod tests {
    use colsense_model::ValidationSpec;

    use super::*;

    const SMALL: &str = r#"{"field_patterns": {
        "email": {"keywords": ["email", "mail"], "field_type": "email_field",
                  "validation": {"type": "regex", "pattern": "^[^@]+@[^@]+\\.[^@]+$", "threshold": 0.7}},
        "identifier": {"keywords": ["id", "key", "pk", "fk"], "field_type": "identifier_field",
                       "validation": {"type": "numeric", "threshold": 0.8}}
    }}"#;

    fn small_catalog() -> PatternCatalog {
        PatternCatalog::from_source(CatalogSource::inline("small", SMALL)).expect("load")
    }

    fn keys(catalog: &PatternCatalog) -> Vec<String> {
        catalog.summary().pattern_types
    }

    #[test]
    fn load_keeps_document_order() {
        let catalog = small_catalog();
        assert_eq!(keys(&catalog), vec!["email", "identifier"]);
        assert_eq!(catalog.snapshot().generation(), 1);
        assert!(
            catalog
                .rules()
                .iter()
                .all(|rule| rule.provenance() == RuleProvenance::BuiltIn)
        );
    }

    #[test]
    fn malformed_source_leaves_active_set_untouched() {
        let catalog = small_catalog();
        let before = catalog.snapshot();

        let bad = r#"{"field_patterns": {"x": {"keywords": ["x"], "validation": {"type": "numeric", "threshold": 2}}}}"#;
        let err = catalog.load(CatalogSource::inline("bad", bad)).unwrap_err();

        assert!(matches!(err, CatalogError::MalformedCatalog { .. }));
        assert!(Arc::ptr_eq(&before, &catalog.snapshot()));
        assert_eq!(catalog.source(), Some(CatalogSource::inline("small", SMALL)));
    }

    #[test]
    fn missing_required_fields_are_malformed() {
        let catalog = PatternCatalog::new();
        for (name, json) in [
            ("no keywords", r#"{"field_patterns": {"x": {"validation": {"type": "numeric"}}}}"#),
            ("no type", r#"{"field_patterns": {"x": {"keywords": ["x"], "validation": {}}}}"#),
            ("no validation", r#"{"field_patterns": {"x": {"keywords": ["x"]}}}"#),
            ("unknown type", r#"{"field_patterns": {"x": {"keywords": ["x"], "validation": {"type": "uuid"}}}}"#),
            ("not json", "field_patterns: {}"),
            ("no root", r#"{"patterns": {}}"#),
        ] {
            let err = catalog.load(CatalogSource::inline(name, json)).unwrap_err();
            assert!(
                matches!(
                    err,
                    CatalogError::MalformedCatalog { ref source_name, .. } if source_name == name
                ),
                "{name}: {err}"
            );
        }
        assert!(catalog.snapshot().is_empty());
    }

    #[test]
    fn add_custom_pattern_appends_and_overwrites_in_place() {
        let catalog = small_catalog();
        let sku = RuleDefinition::new(
            ["sku"],
            ValidationSpec::new("regex").with_param("pattern", "^[A-Z]{3}-\\d+$"),
        );
        catalog.add_custom_pattern("sku", sku).expect("add");
        assert_eq!(keys(&catalog), vec!["email", "identifier", "sku"]);

        let replacement = RuleDefinition::new(["mail"], ValidationSpec::new("numeric"));
        catalog.add_custom_pattern("email", replacement).expect("overwrite");
        assert_eq!(keys(&catalog), vec!["email", "identifier", "sku"]);

        let snapshot = catalog.snapshot();
        let email = snapshot.get("email").expect("email rule");
        assert_eq!(email.provenance(), RuleProvenance::Custom);
        assert_eq!(email.validation_kind(), "numeric");
        assert_eq!(snapshot.summary().custom_count, 2);
        assert_eq!(snapshot.generation(), 3);
    }

    #[test]
    fn strict_insert_rejects_existing_key() {
        let catalog = small_catalog();
        let definition = RuleDefinition::new(["mail"], ValidationSpec::new("numeric"));
        let err = catalog
            .add_custom_pattern_with("email", definition.clone(), InsertPolicy::Strict)
            .unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateKey { ref type_key } if type_key == "email"));

        catalog
            .add_custom_pattern_with("contact", definition, InsertPolicy::Strict)
            .expect("new key is accepted");
    }

    #[test]
    fn invalid_custom_pattern_is_malformed() {
        let catalog = small_catalog();
        let definition = RuleDefinition::new(
            ["x"],
            ValidationSpec::new("regex").with_param("pattern", "("),
        );
        let err = catalog.add_custom_pattern("broken", definition).unwrap_err();
        assert!(matches!(err, CatalogError::MalformedCatalog { .. }));
        assert!(!catalog.snapshot().contains("broken"));
    }

    #[test]
    fn remove_pattern_allows_builtin_and_reports_unknown() {
        let catalog = small_catalog();
        let removed = catalog.remove_pattern("identifier").expect("remove");
        assert_eq!(removed.type_key(), "identifier");
        assert_eq!(keys(&catalog), vec!["email"]);

        let err = catalog.remove_pattern("identifier").unwrap_err();
        assert!(matches!(
            err,
            CatalogError::UnknownType { ref type_key } if type_key == "identifier"
        ));
    }

    #[test]
    fn reload_without_any_source_fails() {
        let catalog = PatternCatalog::new();
        let err = catalog.reload(None).unwrap_err();
        assert!(matches!(err, CatalogError::MalformedCatalog { .. }));
    }

    #[test]
    fn reload_with_new_source_becomes_the_remembered_source() {
        let catalog = small_catalog();
        catalog.reload(Some(CatalogSource::builtin())).expect("reload builtin");
        assert_eq!(catalog.summary().total_patterns, 10);

        catalog.remove_pattern("email").expect("remove");
        catalog.reload(None).expect("reload");
        assert!(catalog.snapshot().contains("email"));
        assert_eq!(catalog.source(), Some(CatalogSource::builtin()));
    }

    #[test]
    fn export_to_writer_round_trips() {
        let catalog = small_catalog();
        let mut buffer = Vec::new();
        catalog.export_to_writer(&mut buffer, ExportScope::All).expect("export");

        let reloaded =
            PatternCatalog::from_source(CatalogSource::inline("exported", buffer)).expect("load");
        assert_eq!(
            reloaded.to_document(ExportScope::All).unwrap(),
            catalog.to_document(ExportScope::All).unwrap()
        );
    }

    #[test]
    fn custom_only_scope_filters_builtin_rules() {
        let catalog = small_catalog();
        catalog
            .add_custom_pattern("sku", RuleDefinition::new(["sku"], ValidationSpec::new("numeric")))
            .expect("add");
        let document = catalog.to_document(ExportScope::CustomOnly).expect("document");
        assert_eq!(document.type_keys().collect::<Vec<_>>(), vec!["sku"]);
    }
}
