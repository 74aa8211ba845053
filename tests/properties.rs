// tests/properties.rs
use proptest::prelude::*;
use symbios_dol::{CharTokenizer, LSystem, PatternTokenizer, Rules, Symbol, Tokenizer};

/// Rules over the letters `a..=d`; `x`, `y` and `+` are always terminal.
fn arb_rules() -> impl Strategy<Value = Rules> {
    prop::collection::vec(("[a-d]", "[a-dxy+]{0,4}"), 0..6)
        .prop_map(|pairs| pairs.into_iter().collect::<Rules>())
}

fn arb_axiom() -> impl Strategy<Value = String> {
    "[a-dxy+]{0,12}"
}

proptest! {
    #[test]
    fn prop_step_is_deterministic(rules in arb_rules(), axiom in arb_axiom(), steps in 0usize..4) {
        let mut a = LSystem::simple(axiom.clone(), rules.clone());
        let mut b = LSystem::simple(axiom, rules);
        a.step_n(steps).unwrap();
        b.step_n(steps).unwrap();
        prop_assert_eq!(a.state(), b.state());
        prop_assert_eq!(a.to_string(), b.to_string());
    }

    #[test]
    fn prop_each_symbol_rewritten_in_place(rules in arb_rules(), axiom in arb_axiom()) {
        let mut system = LSystem::simple(axiom.clone(), rules.clone());
        system.step().unwrap();

        let mut expected: Vec<Symbol> = Vec::new();
        for ch in axiom.chars() {
            let key = ch.to_string();
            match rules.get(&key) {
                Some(rhs) => expected.extend(CharTokenizer.tokenize(rhs).unwrap()),
                None => expected.push(Symbol::from(ch)),
            }
        }
        prop_assert_eq!(system.state(), expected.as_slice());
    }

    #[test]
    fn prop_terminal_only_axiom_is_fixed_point(axiom in "[xy+]{0,16}", rules in arb_rules()) {
        let mut system = LSystem::simple(axiom.clone(), rules);
        system.step_n(3).unwrap();
        prop_assert_eq!(system.to_string(), axiom);
    }

    #[test]
    fn prop_pattern_tokens_concatenate_to_input(input in "[FG+\\-\\[\\]%<>@IQ.0-9XYZ]{0,24}") {
        let tokenizer = PatternTokenizer::standard();
        if let Ok(symbols) = tokenizer.tokenize(&input) {
            prop_assert!(symbols.iter().all(|s| !s.is_empty()));
            prop_assert_eq!(symbol_string(&symbols), input);
        }
    }
}

fn symbol_string(symbols: &[Symbol]) -> String {
    symbols.iter().map(Symbol::as_str).collect()
}
