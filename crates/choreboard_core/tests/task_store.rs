use choreboard_core::{FileTaskRepository, Task, TaskStore, DEFAULT_OWNER};
use chrono::Local;
use tempfile::TempDir;

fn open_store(dir: &TempDir) -> TaskStore<FileTaskRepository> {
    let repo = FileTaskRepository::new(dir.path().join("tasks.txt"));
    TaskStore::open(repo).unwrap()
}

#[test]
fn absent_file_yields_empty_tasks_and_default_roster() {
    let dir = TempDir::new().unwrap();
    let store = open_store(&dir);

    assert!(store.tasks().is_empty());
    assert_eq!(store.owners(), [DEFAULT_OWNER.to_string()]);
    assert_eq!(store.default_owner(), DEFAULT_OWNER);
    assert!(!store.is_dirty());
}

#[test]
fn add_task_appends_normalized_record() {
    let dir = TempDir::new().unwrap();
    let mut store = open_store(&dir);

    store.add_task(Task::new("Buy milk", "Alice"));
    store.add_task(Task::new("Walk dog", "Bob"));

    let last = store.tasks().last().unwrap();
    assert_eq!(last.text, "Walk dog");
    assert_eq!(last.owner, "Bob");
    assert!(!last.done);
    assert_eq!(last.completed_at, None);
}

#[test]
fn delete_removes_exactly_one_and_preserves_order() {
    let dir = TempDir::new().unwrap();
    let mut store = open_store(&dir);
    store.add_task(Task::new("first", "Alice"));
    store.add_task(Task::new("second", "Alice"));
    store.add_task(Task::new("third", "Bob"));

    assert!(store.delete_task(1));

    let texts: Vec<&str> = store.tasks().iter().map(|t| t.text.as_str()).collect();
    assert_eq!(texts, ["first", "third"]);
}

#[test]
fn out_of_range_indices_are_noops() {
    let dir = TempDir::new().unwrap();
    let mut store = open_store(&dir);
    store.add_task(Task::new("only", "Alice"));
    store.save().unwrap();

    assert!(!store.delete_task(5));
    assert!(!store.toggle_done(5));
    assert!(!store.change_owner(5, "Bob"));
    assert_eq!(store.tasks().len(), 1);
    assert!(!store.is_dirty());
}

#[test]
fn toggle_stamps_today_and_toggling_back_clears() {
    let dir = TempDir::new().unwrap();
    let mut store = open_store(&dir);
    store.add_task(Task::new("Buy milk", "Alice"));

    assert!(store.toggle_done(0));
    let task = &store.tasks()[0];
    assert!(task.done);
    let today = Local::now().format("%Y-%m-%d").to_string();
    assert!(task.completed_at.as_deref().unwrap().starts_with(&today));

    assert!(store.toggle_done(0));
    let task = &store.tasks()[0];
    assert!(!task.done);
    assert_eq!(task.completed_at, None);
}

#[test]
fn change_owner_preserves_done_state_and_stamp() {
    let dir = TempDir::new().unwrap();
    let mut store = open_store(&dir);
    store.add_task(Task::new("Buy milk", "Alice"));
    store.toggle_done(0);
    let stamp = store.tasks()[0].completed_at.clone();

    assert!(store.change_owner(0, "Bob"));
    let task = &store.tasks()[0];
    assert_eq!(task.owner, "Bob");
    assert!(task.done);
    assert_eq!(task.completed_at, stamp);
}

#[test]
fn change_owner_accepts_names_outside_the_roster() {
    let dir = TempDir::new().unwrap();
    let mut store = open_store(&dir);
    store.add_task(Task::new("Buy milk", "Alice"));

    assert!(store.change_owner(0, "Stranger"));
    assert_eq!(store.tasks()[0].owner, "Stranger");
    assert!(!store.owners().contains(&"Stranger".to_string()));
}

#[test]
fn add_owner_persists_immediately() {
    let dir = TempDir::new().unwrap();
    let mut store = open_store(&dir);

    assert!(store.add_owner("Alice").unwrap());
    assert!(!store.is_dirty());

    // A fresh store sees the roster without any explicit save.
    let reopened = open_store(&dir);
    assert_eq!(
        reopened.owners(),
        [DEFAULT_OWNER.to_string(), "Alice".to_string()]
    );
}

#[test]
fn add_owner_duplicate_is_a_noop() {
    let dir = TempDir::new().unwrap();
    let mut store = open_store(&dir);
    store.add_owner("Alice").unwrap();

    assert!(!store.add_owner("Alice").unwrap());
    assert_eq!(
        store.owners(),
        [DEFAULT_OWNER.to_string(), "Alice".to_string()]
    );
}

#[test]
fn load_twice_without_mutation_is_idempotent() {
    let dir = TempDir::new().unwrap();
    let mut store = open_store(&dir);
    store.add_owner("Alice").unwrap();
    store.add_task(Task::new("Buy milk", "Alice"));
    store.save().unwrap();

    store.load().unwrap();
    let first_tasks = store.tasks().to_vec();
    let first_owners = store.owners().to_vec();

    store.load().unwrap();
    assert_eq!(store.tasks(), first_tasks.as_slice());
    assert_eq!(store.owners(), first_owners.as_slice());
}

#[test]
fn task_serialization_uses_expected_wire_fields() {
    let mut task = Task::new("Buy milk", "Alice");
    task.complete();
    task.completed_at = Some("2026-08-29 10:15".to_string());

    let json = serde_json::to_value(&task).unwrap();
    assert_eq!(json["text"], "Buy milk");
    assert_eq!(json["owner"], "Alice");
    assert_eq!(json["done"], true);
    assert_eq!(json["completed_at"], "2026-08-29 10:15");

    let decoded: Task = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, task);
}

#[test]
fn load_discards_unsaved_mutations() {
    let dir = TempDir::new().unwrap();
    let mut store = open_store(&dir);
    store.add_task(Task::new("kept", "Alice"));
    store.save().unwrap();

    store.add_task(Task::new("discarded", "Alice"));
    assert!(store.is_dirty());

    store.load().unwrap();
    assert_eq!(store.tasks().len(), 1);
    assert_eq!(store.tasks()[0].text, "kept");
    assert!(!store.is_dirty());
}
