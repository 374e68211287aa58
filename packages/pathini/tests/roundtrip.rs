use pathini::{ConfigTree, KeyPath, OpenFailure, TreeOptions};
use proptest::prelude::*;

// Segments and values free of the format's structural characters.
fn segment() -> impl Strategy<Value = String> {
    "[A-Za-z0-9_.-]{1,8}"
}

fn value() -> impl Strategy<Value = String> {
    "[A-Za-z0-9_.:=/-][A-Za-z0-9 _.:=/-]{0,14}[A-Za-z0-9_.:=/-]"
}

fn assignments() -> impl Strategy<Value = Vec<(Vec<String>, String)>> {
    prop::collection::vec((prop::collection::vec(segment(), 2..5), value()), 1..20)
}

proptest! {
    /// Every set path reads back its latest value after save and a fresh load.
    #[test]
    fn prop_save_load_round_trip(sets in assignments()) {
        let mut tree = ConfigTree::new();
        for (path, value) in &sets {
            tree.set(path, value.as_str()).unwrap();
        }

        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("prop.ini");
        tree.save_to(&file).unwrap();

        let mut reloaded =
            ConfigTree::with_options(TreeOptions::default().with_open_failure(OpenFailure::Report));
        reloaded.load_from(&file).unwrap();

        for (path, _) in &sets {
            let expected = tree.get(path).unwrap();
            prop_assert_eq!(reloaded.get(path).unwrap(), expected);
        }
    }

    /// Re-serializing parsed output reproduces it exactly.
    #[test]
    fn prop_text_is_stable(sets in assignments()) {
        let mut tree = ConfigTree::new();
        for (path, value) in &sets {
            tree.set(path, value.as_str()).unwrap();
        }

        let text = tree.to_string();
        let reparsed = ConfigTree::parse_str(&text);
        prop_assert_eq!(reparsed.to_string(), text);
    }

    /// Setting the same path again keeps one node and the latest value.
    #[test]
    fn prop_set_is_idempotent(path in prop::collection::vec(segment(), 1..5), a in value(), b in value()) {
        let mut once = ConfigTree::new();
        once.set(&path, b.as_str()).unwrap();

        let mut twice = ConfigTree::new();
        twice.set(&path, a.as_str()).unwrap();
        twice.set(&path, b.as_str()).unwrap();

        prop_assert_eq!(&once, &twice);
        prop_assert_eq!(twice.get(KeyPath::from(path)).unwrap(), b.as_str());
    }
}
