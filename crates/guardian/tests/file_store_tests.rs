use guardian::{FileGuardianStore, Guardian, GuardianError, GuardianStore};
use std::{fs, path::PathBuf};

fn test_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("snitch-guardian-test-{}-{}", std::process::id(), name));
    let _ = fs::remove_dir_all(&dir);
    dir
}

#[test]
fn test_unknown_user_has_no_guardians() {
    let dir = test_dir("unknown");
    let store = FileGuardianStore::open(&dir).expect("open failed");
    assert!(store.list("nobody").unwrap().is_empty());
    fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_add_persists_friends_file() {
    let dir = test_dir("add");
    let store = FileGuardianStore::open(&dir).expect("open failed");

    store.add("alice", Guardian::new(42, "Bob")).unwrap();
    store.add("alice", Guardian::new(43, "Carol")).unwrap();

    let content = fs::read_to_string(dir.join("alice.json")).unwrap();
    let json: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(json["friends"][0]["chatId"], 42);
    assert_eq!(json["friends"][1]["name"], "Carol");
    assert_eq!(json["friends"][1]["enabled"], true);

    // a fresh store over the same directory sees the same list
    let reopened = FileGuardianStore::open(&dir).unwrap();
    assert_eq!(
        reopened.list("alice").unwrap(),
        vec![Guardian::new(42, "Bob"), Guardian::new(43, "Carol")]
    );
    fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_duplicate_chat_is_rejected() {
    let dir = test_dir("duplicate");
    let store = FileGuardianStore::open(&dir).unwrap();
    store.add("alice", Guardian::new(42, "Bob")).unwrap();
    assert!(matches!(
        store.add("alice", Guardian::new(42, "Bobby")),
        Err(GuardianError::AlreadyExists(42))
    ));
    // other users may register the same chat
    store.add("dave", Guardian::new(42, "Bob")).unwrap();
    fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_toggle_and_enabled_filter() {
    let dir = test_dir("toggle");
    let store = FileGuardianStore::open(&dir).unwrap();
    store.add("alice", Guardian::new(1, "One")).unwrap();
    store.add("alice", Guardian::new(2, "Two")).unwrap();

    let toggled = store.toggle("alice", 1).unwrap();
    assert!(!toggled.enabled);
    let enabled = store.enabled("alice").unwrap();
    assert_eq!(enabled, vec![Guardian::new(2, "Two")]);

    assert!(store.toggle("alice", 1).unwrap().enabled);
    assert_eq!(store.enabled("alice").unwrap().len(), 2);
    fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_remove() {
    let dir = test_dir("remove");
    let store = FileGuardianStore::open(&dir).unwrap();
    store.add("alice", Guardian::new(1, "One")).unwrap();

    assert_eq!(store.remove("alice", 1).unwrap().name, "One");
    assert!(store.list("alice").unwrap().is_empty());
    assert!(matches!(store.remove("alice", 1), Err(GuardianError::NotFound(1))));
    assert!(matches!(store.toggle("alice", 7), Err(GuardianError::NotFound(7))));
    fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_user_ids_cannot_escape_directory() {
    let dir = test_dir("sanitize");
    let store = FileGuardianStore::open(&dir).unwrap();
    assert_eq!(
        store.path_for("../../etc/passwd"),
        dir.join("_2E_2E_2F_2E_2E_2Fetc_2Fpasswd.json")
    );
    assert_eq!(store.path_for("  "), dir.join("default.json"));
    assert_eq!(store.path_for("user-1"), dir.join("user-1.json"));
    assert_eq!(store.path_for("user_1"), dir.join("user_5F1.json"));
    fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_similar_user_ids_keep_separate_guardians() {
    let dir = test_dir("distinct");
    let store = FileGuardianStore::open(&dir).unwrap();
    store.add("alice.smith", Guardian::new(1, "Mum")).unwrap();
    store.add("alice_smith", Guardian::new(2, "Dad")).unwrap();
    store.add("alice smith", Guardian::new(3, "Gran")).unwrap();

    assert_eq!(store.list("alice.smith").unwrap(), vec![Guardian::new(1, "Mum")]);
    assert_eq!(store.list("alice_smith").unwrap(), vec![Guardian::new(2, "Dad")]);
    assert_eq!(store.list("alice smith").unwrap(), vec![Guardian::new(3, "Gran")]);
    assert_ne!(store.path_for("alice.smith"), store.path_for("alice_smith"));
    fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_missing_enabled_flag_defaults_to_true() {
    let dir = test_dir("legacy");
    let store = FileGuardianStore::open(&dir).unwrap();
    fs::write(dir.join("alice.json"), r#"{"friends":[{"chatId":5,"name":"Eve"}]}"#).unwrap();
    assert_eq!(store.enabled("alice").unwrap(), vec![Guardian::new(5, "Eve")]);
    fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_corrupt_file_is_an_error() {
    let dir = test_dir("corrupt");
    let store = FileGuardianStore::open(&dir).unwrap();
    fs::write(dir.join("alice.json"), "{not json").unwrap();
    assert!(matches!(store.list("alice"), Err(GuardianError::Json(_))));
    fs::remove_dir_all(&dir).ok();
}
