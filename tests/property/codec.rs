//! Encoding a series and reading it back gives the same states.

use proptest::prelude::*;
use serie::grammar::{self, SentinelName};
use serie::state::{self, StateValue};

fn states(max_len: usize) -> impl Strategy<Value = Vec<StateValue>> {
    prop::collection::vec(prop::sample::select(StateValue::ALL.to_vec()), 1..max_len)
}

#[test]
fn test_run_decoding_inverts_encoding() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&states(150), |states| {
            let length = states.len() as u32;
            let width = state::digit_width(length);
            let encoded: String = states
                .iter()
                .enumerate()
                .map(|(i, s)| state::encode(i as u32 + 1, *s, width))
                .collect();

            let decoded = state::decode(&encoded).expect("encoded runs decode");
            let expected: Vec<(u32, StateValue)> = states
                .iter()
                .enumerate()
                .map(|(i, s)| (i as u32 + 1, *s))
                .collect();
            prop_assert_eq!(decoded, expected);
            Ok(())
        })
        .unwrap();
}

#[test]
fn test_item_filenames_parse_back() {
    let mut runner = proptest::test_runner::TestRunner::default();
    let namespaces = prop::sample::select(vec!["", "show", "show_s01", "Talk"]);

    runner
        .run(&(namespaces, states(20)), |(namespace, states)| {
            let width = state::digit_width(states.len() as u32);
            let mut filename = String::from("@_");
            if !namespace.is_empty() {
                filename.push_str(namespace);
                filename.push('_');
            }
            for (i, s) in states.iter().enumerate() {
                filename.push_str(&state::encode(i as u32 + 1, *s, width));
            }

            match grammar::parse(&filename) {
                SentinelName::Item(item) => {
                    prop_assert_eq!(item.namespace.as_str(), namespace);
                    prop_assert_eq!(item.runs.len(), states.len());
                    prop_assert!(item.end.is_none());
                }
                other => prop_assert!(false, "{:?} parsed as {:?}", filename, other),
            }
            Ok(())
        })
        .unwrap();
}
