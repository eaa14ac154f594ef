//! Case-insensitive text comparison.
//!
//! PDDL names --- relations, constants, variables, types --- compare without
//! regard to (ASCII) case, and every comparison in the library routes through
//! these helpers.

use std::cmp::Ordering;

/// Whether two names are equal, ignoring ASCII case.
pub fn eq_no_case(a: &str, b: &str) -> bool {
    a.eq_ignore_ascii_case(b)
}

/// Order two names, ignoring ASCII case.
pub fn cmp_no_case(a: &str, b: &str) -> Ordering {
    let mut b_chars = b.chars().map(|c| c.to_ascii_lowercase());

    for a_char in a.chars().map(|c| c.to_ascii_lowercase()) {
        match b_chars.next() {
            None => return Ordering::Greater,
            Some(b_char) => match a_char.cmp(&b_char) {
                Ordering::Equal => continue,
                unequal => return unequal,
            },
        }
    }

    match b_chars.next() {
        None => Ordering::Equal,
        Some(_) => Ordering::Less,
    }
}

#[cfg(test)]
mod text_tests {
    use super::*;

    #[test]
    fn case_folding() {
        assert!(eq_no_case("Block", "bLOCK"));
        assert!(!eq_no_case("block", "blocks"));

        assert_eq!(cmp_no_case("At", "at"), Ordering::Equal);
        assert_eq!(cmp_no_case("at", "ON"), Ordering::Less);
        assert_eq!(cmp_no_case("table", "Tab"), Ordering::Greater);
    }
}
