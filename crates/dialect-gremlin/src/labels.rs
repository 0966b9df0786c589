//! The `::` label-packing convention.
//!
//! A Gremlin vertex carries exactly one label string on the wire; servers
//! represent multiple types on one vertex by joining them with `::`
//! ("airport::international"). Everything in this crate that touches a
//! label goes through these helpers so composite labels are split (or
//! preserved) consistently.

/// Split a possibly composite label into its components, preserving order.
/// Empty components are dropped.
pub fn split_composite(label: &str) -> Vec<&str> {
    label.split("::").filter(|part| !part.is_empty()).collect()
}

/// Split a composite label into owned component strings.
pub fn split_composite_owned(label: &str) -> Vec<String> {
    split_composite(label)
        .into_iter()
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_in_original_order() {
        assert_eq!(split_composite("A::B::C"), vec!["A", "B", "C"]);
    }

    #[test]
    fn single_label_passes_through() {
        assert_eq!(split_composite("airport"), vec!["airport"]);
    }

    #[test]
    fn empty_components_are_dropped() {
        assert_eq!(split_composite("A::::B"), vec!["A", "B"]);
        assert!(split_composite("").is_empty());
    }
}
