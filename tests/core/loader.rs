use astartes::core::codec;
use astartes::core::error::{LineError, LoadError, SaveError};
use astartes::core::persist::{self, load, load_from_reader, save};
use astartes::core::record::AstartesCategory;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn line(key: i64, id: i64, health: &str, category: Option<&str>, date: &str) -> String {
    format!(
        r#""{key}", "{id}", "Marine {id}", "1.5", "2", "{date}", "{health}", {}, "BOLTGUN", "CHAIN_SWORD", "Ultramarines", null"#,
        codec::quoted(category)
    )
}

fn write_file(path: &Path, lines: &[String]) {
    let mut body = lines.join("\n");
    body.push('\n');
    fs::write(path, body).unwrap();
}

#[test]
fn test_malformed_lines_are_skipped_and_numbered() {
    let tmp = tempdir().unwrap();
    let path = tmp.path().join("roster.csv");
    let short = vec!["\"1\""; 10].join(", ");
    write_file(
        &path,
        &[
            line(1, 1, "10", Some("SCOUT"), "01-01-24"),
            short,
            line(3, 3, "-2", None, "01-01-24"),
            line(4, 4, "5", Some("LIBRARIAN"), "01-01-24"),
            line(5, 5, "7", None, "31-02-24"),
            line(6, 6, "12.5", None, "15-06-24"),
        ],
    );

    let loaded = load(Some(path.as_path())).unwrap();
    assert_eq!(loaded.roster.len(), 2);
    assert_eq!(
        loaded.errors,
        vec![
            (2, LineError::FieldCount(10)),
            (3, LineError::InvalidHealth),
            (4, LineError::InvalidCategory),
            (5, LineError::InvalidDate),
        ]
    );
    assert_eq!(loaded.errors[0].1.to_string(), "only 10fields");
}

#[test]
fn test_one_good_line_and_one_short_line() {
    let input = format!("{}\n{}\n", line(1, 1, "3", None, "01-01-24"), vec!["null"; 10].join(", "));
    let loaded = load_from_reader(input.as_bytes()).unwrap();
    assert_eq!(loaded.roster.len(), 1);
    assert_eq!(loaded.errors, vec![(2, LineError::FieldCount(10))]);
}

#[test]
fn test_undecodable_line_is_a_line_error() {
    let mut input = format!("{}\n", line(1, 1, "3", None, "01-01-24")).into_bytes();
    input.extend_from_slice(b"\"2\", \"\xff\"\n");
    input.extend_from_slice(format!("{}\n", line(3, 3, "4", None, "01-01-24")).as_bytes());

    let loaded = load_from_reader(input.as_slice()).unwrap();
    assert_eq!(loaded.roster.len(), 2);
    assert_eq!(loaded.errors, vec![(2, LineError::FieldCount(2))]);
}

#[test]
fn test_duplicate_keys_keep_last_line() {
    let input = [
        line(7, 1, "3", None, "01-01-24"),
        line(7, 2, "4", Some("CHAPLAIN"), "01-01-24"),
    ]
    .join("\n");
    let loaded = load_from_reader(input.as_bytes()).unwrap();
    assert_eq!(loaded.roster.len(), 1);
    let kept = loaded.roster.get(7).unwrap();
    assert_eq!(kept.id, 2);
    assert_eq!(kept.category, Some(AstartesCategory::Chaplain));
    assert!(loaded.errors.is_empty());
}

#[test]
fn test_id_counter_resumes_from_highest_loaded_id() {
    let input = [
        line(1, 40, "3", None, "01-01-24"),
        line(2, 9, "3", None, "01-01-24"),
    ]
    .join("\n");
    let mut loaded = load_from_reader(input.as_bytes()).unwrap();
    assert_eq!(loaded.roster.last_id(), 40);
    assert_eq!(loaded.roster.draw_id(), 41);

    let empty = load_from_reader(&b""[..]).unwrap();
    assert_eq!(empty.roster.last_id(), 0);
}

#[test]
fn test_fatal_open_errors_are_distinct() {
    let tmp = tempdir().unwrap();

    assert!(matches!(load(None), Err(LoadError::PathNotConfigured)));

    let missing = tmp.path().join("missing.csv");
    match load(Some(missing.as_path())) {
        Err(LoadError::NotFound(path)) => assert_eq!(path, missing),
        other => panic!("expected NotFound, got {other:?}"),
    }

    // Opening a directory succeeds on Unix but reading it does not.
    #[cfg(unix)]
    assert!(matches!(
        load(Some(tmp.path())),
        Err(LoadError::ReadProblem(_))
    ));
}

#[test]
fn test_save_then_load_restores_roster() {
    let tmp = tempdir().unwrap();
    let source = tmp.path().join("source.csv");
    write_file(
        &source,
        &[
            line(3, 3, "30", Some("TACTICAL"), "02-03-24"),
            line(-1, 8, "0.5", None, "29-02-24"),
        ],
    );
    let loaded = load(Some(source.as_path())).unwrap();

    let target = tmp.path().join("fresh.csv");
    assert!(!target.exists());
    save(Some(target.as_path()), &loaded.roster).unwrap();

    let reloaded = load(Some(target.as_path())).unwrap();
    assert!(reloaded.errors.is_empty());
    assert_eq!(reloaded.roster, loaded.roster);
}

#[test]
fn test_save_overwrites_whole_file() {
    let tmp = tempdir().unwrap();
    let path = tmp.path().join("roster.csv");
    write_file(
        &path,
        &[
            line(1, 1, "3", None, "01-01-24"),
            line(2, 2, "3", None, "01-01-24"),
        ],
    );
    let mut roster = load(Some(path.as_path())).unwrap().roster;
    roster.remove_key(2);
    save(Some(path.as_path()), &roster).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    assert_eq!(text.lines().count(), 1);
    let mut buf = Vec::new();
    persist::write_roster(&roster, &mut buf).unwrap();
    assert_eq!(text.as_bytes(), &buf[..]);
}

#[test]
fn test_save_failures_are_reported() {
    let tmp = tempdir().unwrap();
    let roster = load_from_reader(&b""[..]).unwrap().roster;

    let unreachable = tmp.path().join("no-such-dir").join("roster.csv");
    assert!(matches!(
        save(Some(unreachable.as_path()), &roster),
        Err(SaveError::CannotCreate(_))
    ));

    let locked = tmp.path().join("locked.csv");
    fs::write(&locked, "").unwrap();
    let mut perms = fs::metadata(&locked).unwrap().permissions();
    perms.set_readonly(true);
    fs::set_permissions(&locked, perms).unwrap();
    let err = save(Some(locked.as_path()), &roster).unwrap_err();
    assert_eq!(err.to_string(), "bad permissions");
}
