use choreboard_core::{
    FileTaskRepository, Task, TaskRepository, TaskStore, DEFAULT_OWNER,
};
use std::fs;
use tempfile::TempDir;

fn repo_at(dir: &TempDir) -> FileTaskRepository {
    FileTaskRepository::new(dir.path().join("tasks.txt"))
}

#[test]
fn save_then_fresh_load_round_trips_field_for_field() {
    let dir = TempDir::new().unwrap();
    let mut store = TaskStore::open(repo_at(&dir)).unwrap();
    store.add_owner("Alice").unwrap();
    store.add_owner("Bob").unwrap();
    store.add_task(Task::new("Buy milk", "Alice"));
    store.add_task(Task::new("Ship crate", "Bob"));
    store.toggle_done(1);
    store.save().unwrap();

    let reopened = TaskStore::open(repo_at(&dir)).unwrap();
    assert_eq!(reopened.owners(), store.owners());
    assert_eq!(reopened.tasks(), store.tasks());
}

#[test]
fn legacy_file_with_true_false_flags_loads() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("tasks.txt"),
        "OWNERS:Alice,Bob\nBuy milk|Alice|False|\nShip crate|Bob|True|2025-12-01 09:30\n",
    )
    .unwrap();

    let contents = repo_at(&dir).load().unwrap();
    assert_eq!(
        contents.owners.names(),
        ["Alice".to_string(), "Bob".to_string()]
    );
    assert_eq!(contents.tasks.len(), 2);

    let milk = &contents.tasks[0];
    assert_eq!((milk.text.as_str(), milk.owner.as_str()), ("Buy milk", "Alice"));
    assert!(!milk.done);
    assert_eq!(milk.completed_at, None);

    let crate_task = &contents.tasks[1];
    assert!(crate_task.done);
    assert_eq!(crate_task.completed_at.as_deref(), Some("2025-12-01 09:30"));
}

#[test]
fn legacy_date_only_stamp_round_trips_verbatim() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("tasks.txt"),
        "OWNERS:Alice\nShip crate|Alice|True|2025-12-01\n",
    )
    .unwrap();

    let mut store = TaskStore::open(repo_at(&dir)).unwrap();
    assert_eq!(store.tasks()[0].completed_at.as_deref(), Some("2025-12-01"));

    store.save().unwrap();
    let reopened = TaskStore::open(repo_at(&dir)).unwrap();
    assert_eq!(reopened.tasks()[0].completed_at.as_deref(), Some("2025-12-01"));
}

#[test]
fn mixed_arity_lines_all_load() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("tasks.txt"),
        "OWNERS:Alice\nfour|Alice|1|2026-01-01 08:00\nthree|Alice|1\ntwo|Alice\nbare\n\n",
    )
    .unwrap();

    let contents = repo_at(&dir).load().unwrap();
    assert_eq!(contents.tasks.len(), 4);
    assert_eq!(
        contents.tasks[0].completed_at.as_deref(),
        Some("2026-01-01 08:00")
    );
    assert!(contents.tasks[1].done);
    assert_eq!(contents.tasks[1].completed_at, None);
    assert!(!contents.tasks[2].done);
    assert_eq!(contents.tasks[3].text, "bare");
    assert_eq!(contents.tasks[3].owner, DEFAULT_OWNER);
}

#[test]
fn file_without_owner_header_treats_every_line_as_a_task() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("tasks.txt"),
        "Buy milk|Alice|0|\nWalk dog|Bob|0|\n",
    )
    .unwrap();

    let contents = repo_at(&dir).load().unwrap();
    assert_eq!(contents.owners.names(), [DEFAULT_OWNER.to_string()]);
    assert_eq!(contents.tasks.len(), 2);
}

#[test]
fn saved_file_uses_canonical_digit_encoding() {
    let dir = TempDir::new().unwrap();
    let mut store = TaskStore::open(repo_at(&dir)).unwrap();
    store.add_task(Task::new("pending", "No Owner"));
    store.add_task(Task::new("finished", "No Owner"));
    store.toggle_done(1);
    store.save().unwrap();

    let raw = fs::read_to_string(dir.path().join("tasks.txt")).unwrap();
    let mut lines = raw.lines();
    assert_eq!(lines.next(), Some("OWNERS:No Owner"));
    assert_eq!(lines.next(), Some("pending|No Owner|0|"));
    let finished = lines.next().unwrap();
    assert!(finished.starts_with("finished|No Owner|1|"));
}

#[test]
fn save_leaves_no_temp_file_behind() {
    let dir = TempDir::new().unwrap();
    let mut store = TaskStore::open(repo_at(&dir)).unwrap();
    store.add_task(Task::new("Buy milk", "Alice"));
    store.save().unwrap();

    let names: Vec<String> = fs::read_dir(dir.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, ["tasks.txt".to_string()]);
}

#[test]
fn save_to_unwritable_directory_reports_io_error() {
    let repo = FileTaskRepository::new("/proc/choreboard-denied/tasks.txt");
    let mut store = TaskStore::open(repo).unwrap();
    store.add_task(Task::new("Buy milk", "Alice"));

    let err = store.save().unwrap_err();
    assert!(err.to_string().contains("I/O failed"));
    assert!(store.is_dirty());
}
