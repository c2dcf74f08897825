use std::io;

use rjecnik_config::Config;
use rjecnik_core::error::Result;
use rjecnik_core::storage::{NAMESPACES_KEY, THEME_KEY};
use rjecnik_core::{DictError, FileStore, KeyValueStore, MemoryStore, Session};
use rjecnik_types::{CategoryFilter, Entry, EntryDraft, FilterSpec, ImportReport, Theme, TransferFormat};

fn memory_session() -> Session {
    Session::open(Box::new(MemoryStore::new()), &Config::default()).unwrap()
}

fn seeded() -> Session {
    let mut session = memory_session();
    session.add(EntryDraft::new("cat", "dog")).unwrap();
    session.add(EntryDraft::new("apple", "jabuka")).unwrap();
    session
}

fn words(session: &Session) -> Vec<&str> {
    session.entries().iter().map(|e| e.word.as_str()).collect()
}

/// Storage whose writes fail on demand
struct FlakyStore {
    inner: MemoryStore,
    fail_writes: bool,
}

impl KeyValueStore for FlakyStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.inner.get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        if self.fail_writes {
            return Err(DictError::storage(key, io::Error::other("disk full")));
        }
        self.inner.set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.inner.remove(key)
    }
}

#[test]
fn add_remove_restore_scenario() {
    let mut session = seeded();

    session.add(EntryDraft::new("sun", "sunce")).unwrap();
    assert_eq!(session.entries().len(), 3);
    assert_eq!(session.entries()[2], Entry::new("sun", "sunce"));

    let removed = session.remove(0).unwrap();
    assert_eq!(removed, Entry::new("cat", "dog"));
    assert_eq!(words(&session), vec!["apple", "sun"]);
    let token = session.pending_undo().unwrap();
    assert_eq!((token.entry.word.as_str(), token.index), ("cat", 0));

    session.restore().unwrap();
    assert_eq!(words(&session), vec!["cat", "apple", "sun"]);
    assert!(session.pending_undo().is_none());
}

#[test]
fn remove_then_restore_is_identity_for_every_index() {
    for i in 0..4 {
        let mut session = seeded();
        session.add(EntryDraft::new("sun", "sunce")).unwrap();
        session.add(EntryDraft::new("moon", "mjesec").with_favorite(true)).unwrap();
        let before = session.entries().to_vec();

        session.remove(i).unwrap();
        session.restore().unwrap();

        assert_eq!(session.entries(), before.as_slice(), "index {i}");
    }
}

#[test]
fn json_round_trip_and_idempotent_import() {
    let mut source = seeded();
    source.toggle_favorite(1).unwrap();
    source
        .add(EntryDraft::new("run", "trčati").with_category("Verbs"))
        .unwrap();
    let json = source.export(TransferFormat::Json).unwrap();

    let mut target = memory_session();
    let report = target.import(&json, TransferFormat::Json).unwrap();
    assert_eq!(report, ImportReport { added: 3, total: 3 });
    assert_eq!(target.entries(), source.entries());

    let again = target.import(&json, TransferFormat::Json).unwrap();
    assert_eq!(again, ImportReport { added: 0, total: 3 });
    assert_eq!(target.entries().len(), 3);
}

#[test]
fn csv_round_trip_keeps_pairs_only() {
    let mut source = seeded();
    source.toggle_favorite(0).unwrap();
    let csv = source.export(TransferFormat::Csv).unwrap();

    let mut target = memory_session();
    target.import(&csv, TransferFormat::Csv).unwrap();

    let pairs: Vec<(&str, &str)> = target
        .entries()
        .iter()
        .map(|e| (e.word.as_str(), e.translation.as_str()))
        .collect();
    assert_eq!(pairs, vec![("cat", "dog"), ("apple", "jabuka")]);
    assert!(!target.entries()[0].favorite);
}

#[test]
fn csv_hund_row_imports_one_entry() {
    let mut session = memory_session();
    let report = session
        .import("\"word\",\"translation\"\n\"Hund\",\"dog\"", TransferFormat::Csv)
        .unwrap();

    assert_eq!(report.added, 1);
    assert_eq!(session.entries(), &[Entry::new("Hund", "dog")]);
}

#[test]
fn malformed_json_leaves_store_untouched() {
    let mut session = seeded();
    let before = session.entries().to_vec();

    let format = TransferFormat::from_path("words.json".as_ref());
    let err = session.import("{not valid json", format).unwrap_err();

    assert!(matches!(err, DictError::Parse(_)));
    assert_eq!(session.entries(), before.as_slice());
}

#[test]
fn filter_results_are_ordered_subsequences() {
    let mut session = seeded();
    session
        .add(EntryDraft::new("dog", "pas").with_category("Animals").with_favorite(true))
        .unwrap();
    session
        .add(EntryDraft::new("dogma", "dogma").with_category("Animals"))
        .unwrap();

    let specs = [
        FilterSpec::default(),
        FilterSpec {
            category: CategoryFilter::Named("Animals".into()),
            ..FilterSpec::default()
        },
        FilterSpec {
            category: CategoryFilter::Named("Animals".into()),
            search: "DOG".into(),
            ..FilterSpec::default()
        },
        FilterSpec {
            category: CategoryFilter::Named("Animals".into()),
            favorites_only: true,
            search: "dog".into(),
        },
    ];

    let mut previous: Option<Vec<usize>> = None;
    for spec in specs {
        session.set_filter(spec);
        let indices: Vec<usize> = session.visible().iter().map(|r| r.index).collect();

        assert!(indices.windows(2).all(|w| w[0] < w[1]));
        if let Some(looser) = &previous {
            assert!(indices.iter().all(|i| looser.contains(i)));
        }
        previous = Some(indices);
    }
    assert_eq!(previous, Some(vec![2]));
}

#[test]
fn namespaces_are_isolated() {
    let mut session = memory_session();
    session.select("en-bs").unwrap();
    session.add(EntryDraft::new("house", "kuća")).unwrap();
    let english = session.entries().to_vec();

    session.select("de-bs").unwrap();
    session.add(EntryDraft::new("Haus", "kuća")).unwrap();
    session.toggle_favorite(0).unwrap();
    session.remove(0).unwrap();
    session.add(EntryDraft::new("Baum", "drvo")).unwrap();

    assert_eq!(session.registry().store("en-bs").entries(), english.as_slice());
}

#[test]
fn file_store_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config::default();

    {
        let mut session = Session::open(Box::new(FileStore::new(dir.path())), &config).unwrap();
        session.add(EntryDraft::new("cat", "dog")).unwrap();
        session.select("de-bs").unwrap();
        session.add(EntryDraft::new("Hund", "pas")).unwrap();
        session.set_theme(Theme::Dark).unwrap();
    }

    let session = Session::open(Box::new(FileStore::new(dir.path())), &config).unwrap();
    assert_eq!(session.selected_pair(), "de-bs");
    assert_eq!(session.entries(), &[Entry::new("Hund", "pas")]);
    assert_eq!(session.registry().store("en-bs").len(), 1);
    assert_eq!(session.theme(), Theme::Dark);
}

#[test]
fn legacy_list_migrates_into_selected_pair() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("dictionary.json"),
        r#"[{"word":"cat","translation":"dog"},{"word":"cat","translation":"dog"},{"word":"","translation":"x"}]"#,
    )
    .unwrap();
    std::fs::write(dir.path().join("darkMode.json"), "enabled").unwrap();

    let session = Session::open(Box::new(FileStore::new(dir.path())), &Config::default()).unwrap();
    assert_eq!(session.entries(), &[Entry::new("cat", "dog")]);
    assert_eq!(session.theme(), Theme::Dark);
    assert!(!dir.path().join("dictionary.json").exists());

    drop(session);
    let session = Session::open(Box::new(FileStore::new(dir.path())), &Config::default()).unwrap();
    assert_eq!(session.entries().len(), 1);
}

#[test]
fn storage_failure_keeps_memory_state() {
    let storage = FlakyStore {
        inner: MemoryStore::new(),
        fail_writes: true,
    };
    let mut session = Session::open(Box::new(storage), &Config::default()).unwrap();

    let err = session.add(EntryDraft::new("cat", "dog")).unwrap_err();
    assert!(matches!(err, DictError::StorageUnavailable { ref key, .. } if key == NAMESPACES_KEY));
    assert_eq!(session.entries().len(), 1);
    assert!(session.is_dirty());

    let err = session.remove(0).unwrap_err();
    assert!(matches!(err, DictError::StorageUnavailable { .. }));
    assert!(session.entries().is_empty());
    assert!(session.pending_undo().is_some());

    assert!(session.set_theme(Theme::Dark).is_err());
    assert_eq!(session.theme(), Theme::Dark);
    assert!(session.registry().storage().get(THEME_KEY).unwrap().is_none());
}

#[test]
fn stale_index_is_a_no_op() {
    let mut session = seeded();
    let before = session.entries().to_vec();

    assert!(matches!(session.remove(7), Err(DictError::IndexOutOfRange { index: 7, len: 2 })));
    assert!(session.toggle_favorite(2).is_err());
    assert!(session.update(3, EntryDraft::new("a", "b")).is_err());

    assert_eq!(session.entries(), before.as_slice());
    assert!(session.pending_undo().is_none());
}

#[test]
fn unreadable_data_dir_opens_in_memory() {
    let file = tempfile::NamedTempFile::new().unwrap();
    let mut session = Session::open(Box::new(FileStore::new(file.path())), &Config::default()).unwrap();

    assert!(session.registry().is_memory_only());
    session.add(EntryDraft::new("cat", "dog")).unwrap();
    assert_eq!(words(&session), vec!["cat"]);
    assert_eq!(std::fs::read(file.path()).unwrap(), Vec::<u8>::new());
}

#[test]
fn multiline_word_survives_csv_round_trip() {
    let mut source = memory_session();
    let report = source
        .import(r#"[{"word":"line\nbreak","translation":"prijelom"}]"#, TransferFormat::Json)
        .unwrap();
    assert_eq!(report, ImportReport { added: 1, total: 1 });

    let csv = source.export(TransferFormat::Csv).unwrap();
    let mut target = memory_session();
    let report = target.import(&csv, TransferFormat::Csv).unwrap();

    assert_eq!(report, ImportReport { added: 1, total: 1 });
    assert_eq!(target.entries()[0], Entry::new("line\nbreak", "prijelom"));
}

#[test]
fn rejected_edit_stays_open() {
    let mut session = seeded();
    session.begin_edit(1).unwrap();

    let err = session.commit_edit(EntryDraft::new("  ", "jabuka")).unwrap_err();
    assert!(matches!(err, DictError::Validation(_)));
    assert_eq!(session.editing(), Some(1));

    session.commit_edit(EntryDraft::new("apple", "jabuka, voćka")).unwrap();
    assert_eq!(session.editing(), None);
    assert_eq!(session.entries()[1].translation, "jabuka, voćka");
}
