use std::fs;
use std::path::Path;

use colsense_catalog::PatternCatalog;
use colsense_classify::FieldClassifier;
use colsense_cli::ingest::read_csv_sample;
use colsense_cli::profile::{
    MappingComplexity, NamingConvention, ProfileOptions, profile_csv, profile_table,
};

const CUSTOMERS: &str = "\
customer_id,email,signup_date,total,notes
1,a@b.com,2024-01-05,10.50,hello
2,bad-email,2024-02-30,abc,
3,c@d.org,not a date,7,
x,e@f.net,2024-03-01,3.25,
5,g@h.io,2024-03-02,1,
6,i@j.com,2024-03-03,2,
";

fn builtin_classifier() -> FieldClassifier {
    FieldClassifier::from_catalog(&PatternCatalog::builtin().expect("builtin catalog"))
}

fn write_csv(dir: &Path, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn profile_reports_confirmed_columns_and_issues() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_csv(dir.path(), "customers.csv", CUSTOMERS);

    let profile = profile_csv(&builtin_classifier(), &path, &ProfileOptions::default()).unwrap();

    assert_eq!(profile.table_name, "customers");
    assert_eq!(profile.row_count, 6);
    assert_eq!(profile.column_count, 5);
    assert_eq!(profile.classified_count(), 4);
    assert_eq!(profile.confirmed_count(), 3);

    let insights = &profile.insights;
    assert_eq!(insights.naming_convention, NamingConvention::Mixed);
    let patterns: Vec<(&str, &str)> = insights
        .sample_patterns
        .iter()
        .map(|p| (p.column.as_str(), p.field_type_label.as_str()))
        .collect();
    assert_eq!(
        patterns,
        vec![
            ("customer_id", "identifier_field"),
            ("email", "email_field"),
            ("signup_date", "date_field"),
            ("total", "monetary_field"),
        ]
    );
    assert_eq!(
        insights.data_type_notes,
        vec![
            "customer_id: valid identifier format in sample",
            "email: valid email format in sample",
            "total: valid monetary format in sample",
        ]
    );
    assert_eq!(insights.potential_issues.len(), 1);
    let issue = &insights.potential_issues[0];
    assert_eq!(issue.column, "signup_date");
    assert_eq!(issue.match_score, 0.6);
    assert_eq!(issue.invalid_values, vec!["2024-02-30", "not a date"]);
    assert_eq!(insights.mapping_complexity, MappingComplexity::Low);
}

#[test]
fn sample_size_limits_validated_rows() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_csv(dir.path(), "customers.csv", CUSTOMERS);

    let profile = profile_csv(&builtin_classifier(), &path, &ProfileOptions { sample_size: 2 })
        .unwrap();

    let email = &profile.columns[1];
    assert_eq!(email.total_count, 2);
    assert_eq!(email.valid_count, 1);
    assert!(!email.is_confirmed);
    assert_eq!(profile.row_count, 6);
}

#[test]
fn many_failing_columns_make_mapping_complex() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_csv(
        dir.path(),
        "legacy.csv",
        "CustomerId,Email,Phone,ZipCode,Price,UpdatedAt\n\
         ???,???,???,???,???,\n\
         n/a,n/a,n/a,n/a,n/a,\n",
    );

    let table = read_csv_sample(&path, 5).unwrap();
    let profile = profile_table(&builtin_classifier(), &table);
    let insights = &profile.insights;

    assert_eq!(insights.naming_convention, NamingConvention::PascalCase);
    assert_eq!(insights.potential_issues.len(), 5);
    assert_eq!(insights.mapping_complexity, MappingComplexity::High);
    // UpdatedAt is recognized but has no values, so it is not reported.
    assert_eq!(profile.columns[5].type_key, "date");
    assert!(insights.sample_patterns.iter().all(|p| p.column != "UpdatedAt"));
}

#[test]
fn table_without_recognized_columns_is_low_complexity() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_csv(dir.path(), "widgets.csv", "widget_flag,paint_hue\n1,red\n");
    let profile = profile_csv(&builtin_classifier(), &path, &ProfileOptions::default()).unwrap();

    assert_eq!(profile.columns[0].type_key, "unclassified");
    assert_eq!(profile.insights.naming_convention, NamingConvention::SnakeCase);
    assert_eq!(profile.insights.mapping_complexity, MappingComplexity::Low);
}
