//! Schema files as written by operators: `[[criteria]]` tables in TOML.

use pretty_assertions::assert_eq;
use scan_core::{CoreError, Schema};

#[test]
fn loads_schema_from_toml_in_file_order() {
    let schema: Schema = toml::from_str(
        r#"
[[criteria]]
name = "Loop"
description = "The assistant repeats the same message three or more times."

[[criteria]]
name = "PIN"
description = "A PIN code contains commas."
"#,
    )
    .expect("schema should parse");

    assert_eq!(schema.names().collect::<Vec<_>>(), vec!["Loop", "PIN"]);
    assert_eq!(
        schema.criteria()[1].description,
        "A PIN code contains commas."
    );
}

#[test]
fn rejects_duplicate_names_in_toml() {
    let err = toml::from_str::<Schema>(
        r#"
[[criteria]]
name = "Loop"
description = "first"

[[criteria]]
name = "Loop"
description = "second"
"#,
    )
    .unwrap_err();

    assert!(
        err.to_string()
            .contains(&CoreError::DuplicateCriterion("Loop".into()).to_string()),
        "unexpected error: {err}"
    );
}

#[test]
fn schema_roundtrips_through_toml() {
    let schema = Schema::call_review();
    let text = toml::to_string(&schema).expect("serialize");
    let back: Schema = toml::from_str(&text).expect("parse");
    assert_eq!(back, schema);
}
