use std::path::Path;

use anyhow::{Context, Result, bail};
use tracing::{info, info_span};

use colsense_catalog::{CatalogSource, ExportScope, InsertPolicy, PatternCatalog};
use colsense_classify::FieldClassifier;
use colsense_cli::profile::{ProfileOptions, profile_csv};
use colsense_model::{RuleDefinition, SampleValue};

use crate::cli::{AddArgs, CatalogArgs, ClassifyArgs, ExportArgs, ProfileArgs, RemoveArgs};
use crate::summary::{print_catalog, print_classification, print_profile};

/// Opens the catalog named on the command line, or the built-in one.
fn load_catalog(args: &CatalogArgs) -> Result<PatternCatalog> {
    match &args.catalog {
        Some(path) => PatternCatalog::open_or_builtin(path)
            .with_context(|| format!("load field patterns from {}", path.display())),
        None => PatternCatalog::builtin().context("load built-in field patterns"),
    }
}

fn source_label(catalog: &PatternCatalog) -> String {
    catalog
        .source()
        .map_or_else(|| "<none>".to_string(), |source| source.name())
}

pub fn run_patterns(args: &CatalogArgs) -> Result<()> {
    let catalog = load_catalog(args)?;
    let snapshot = catalog.snapshot();
    print_catalog(&source_label(&catalog), &snapshot.summary(), snapshot.rules());
    Ok(())
}

pub fn run_classify(args: &ClassifyArgs) -> Result<()> {
    let catalog = load_catalog(&args.catalog)?;
    let classifier = FieldClassifier::from_catalog(&catalog);
    let values: Vec<SampleValue> = args
        .values
        .iter()
        .map(|value| SampleValue::from(value.as_str()))
        .collect();
    let result = classifier.classify(&args.column, &values);
    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&result).context("serialize classification")?
        );
    } else {
        print_classification(&result);
    }
    Ok(())
}

/// Profiles every input and prints the reports in input order.
pub fn run_profile(args: &ProfileArgs) -> Result<()> {
    if args.sample_size == 0 {
        bail!("--sample-size must be at least 1");
    }
    let catalog = load_catalog(&args.catalog)?;
    let classifier = FieldClassifier::from_catalog(&catalog);
    let options = ProfileOptions {
        sample_size: args.sample_size,
    };

    let mut profiles = Vec::with_capacity(args.inputs.len());
    for path in &args.inputs {
        let span = info_span!("profile", path = %path.display());
        let _guard = span.enter();
        let profile = profile_csv(&classifier, path, &options)
            .with_context(|| format!("profile {}", path.display()))?;
        profiles.push(profile);
    }

    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&profiles).context("serialize profiles")?
        );
    } else {
        for (idx, profile) in profiles.iter().enumerate() {
            if idx > 0 {
                println!();
            }
            print_profile(profile);
        }
    }
    Ok(())
}

pub fn run_export(args: &ExportArgs) -> Result<()> {
    let catalog = load_catalog(&args.catalog)?;
    let scope = if args.custom_only {
        ExportScope::CustomOnly
    } else {
        ExportScope::All
    };
    catalog
        .export_with(&args.destination, scope)
        .with_context(|| format!("export field patterns to {}", args.destination.display()))?;
    println!(
        "Exported {} patterns to {}",
        catalog.to_document(scope)?.field_patterns.len(),
        args.destination.display()
    );
    Ok(())
}

pub fn run_add(args: &AddArgs) -> Result<()> {
    let definition: RuleDefinition =
        serde_json::from_str(&args.definition).context("parse --definition")?;
    let catalog = open_for_update(&args.catalog)?;
    let policy = if args.strict {
        InsertPolicy::Strict
    } else {
        InsertPolicy::Overwrite
    };
    let replaced = catalog.snapshot().contains(&args.type_key);
    catalog
        .add_custom_pattern_with(&args.type_key, definition, policy)
        .with_context(|| format!("add field pattern '{}'", args.type_key))?;
    save(&catalog, &args.catalog)?;
    let verb = if replaced { "Replaced" } else { "Added" };
    println!("{verb} pattern '{}' in {}", args.type_key, args.catalog.display());
    Ok(())
}

pub fn run_remove(args: &RemoveArgs) -> Result<()> {
    let catalog = open_for_update(&args.catalog)?;
    let removed = catalog
        .remove_pattern(&args.type_key)
        .with_context(|| format!("remove field pattern '{}'", args.type_key))?;
    save(&catalog, &args.catalog)?;
    println!(
        "Removed {} pattern '{}' from {}",
        removed.provenance(),
        removed.type_key(),
        args.catalog.display()
    );
    Ok(())
}

/// Loads a catalog file that is about to be rewritten. A missing file
/// starts from the built-in patterns.
fn open_for_update(path: &Path) -> Result<PatternCatalog> {
    let exists = path
        .try_exists()
        .with_context(|| format!("check catalog file {}", path.display()))?;
    if exists {
        PatternCatalog::from_source(CatalogSource::file(path))
            .with_context(|| format!("load field patterns from {}", path.display()))
    } else {
        info!(path = %path.display(), "creating catalog from built-in field patterns");
        PatternCatalog::builtin().context("load built-in field patterns")
    }
}

fn save(catalog: &PatternCatalog, path: &Path) -> Result<()> {
    catalog
        .export(path)
        .with_context(|| format!("save field patterns to {}", path.display()))
}
