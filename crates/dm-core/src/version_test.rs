use super::*;

#[test]
fn test_from_file_name_takes_prefix_before_first_separator() {
    let v = MigrationVersion::from_file_name("0002_add_tasks_table.down.sql").unwrap();
    assert_eq!(v, "0002");
}

#[test]
fn test_from_file_name_rejects_missing_separator() {
    assert!(MigrationVersion::from_file_name("0002.down.sql").is_none());
    assert!(MigrationVersion::from_file_name("_leading.down.sql").is_none());
}

#[test]
fn test_from_status_line() {
    let v = MigrationVersion::from_status_line("20240105120000/installed add users").unwrap();
    assert_eq!(v.as_str(), "20240105120000");

    let v = MigrationVersion::from_status_line("  0003/desc  ").unwrap();
    assert_eq!(v, "0003");
}

#[test]
fn test_from_status_line_requires_slash() {
    assert!(MigrationVersion::from_status_line("Applied migrations: none").is_none());
    assert!(MigrationVersion::from_status_line("/no version").is_none());
    assert!(MigrationVersion::from_status_line("").is_none());
}

#[test]
fn test_ordering_is_lexicographic() {
    let mut versions = vec![
        MigrationVersion::new("20240301000000"),
        MigrationVersion::new("20231101000000"),
        MigrationVersion::new("20240105000000"),
    ];
    versions.sort();
    assert_eq!(versions[0], "20231101000000");
    assert_eq!(versions[2], "20240301000000");
}

#[test]
fn test_try_new_rejects_empty() {
    assert!(MigrationVersion::try_new("").is_none());
    assert!(MigrationVersion::try_from("").is_err());
}

#[test]
fn test_deserialize_rejects_empty() {
    let ok: MigrationVersion = serde_yaml::from_str("\"0001\"").unwrap();
    assert_eq!(ok, "0001");
    assert!(serde_yaml::from_str::<MigrationVersion>("\"\"").is_err());
}
