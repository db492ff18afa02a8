//! Identifier resolution for validated bindings.

use vantage_core::Identifiers;

use crate::binding::ElementBinding;

/// Resolve a binding to the identifiers that index engine state.
///
/// A single-element binding yields [`Identifiers::One`]; a sequence
/// binding (even of length one) yields [`Identifiers::Many`] in binding
/// order. Identifiers are read from the element handles on every call,
/// so the result always reflects the scene model's current naming.
pub fn resolve(binding: &ElementBinding) -> Identifiers {
    match binding.single() {
        Some(e) => Identifiers::One(e.full_identifier()),
        None => Identifiers::Many(
            binding
                .elements()
                .iter()
                .map(|e| e.full_identifier())
                .collect(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binding::{validate_element_binding, BindingTarget};
    use proptest::prelude::*;
    use vantage_core::ElementHandle;
    use vantage_test_utils::MockScene;

    #[test]
    fn single_resolves_to_one() {
        let mut scene = MockScene::new();
        let hinge = scene.add("joint", "my_hinge");
        let binding = validate_element_binding(&hinge.into()).unwrap();
        assert_eq!(resolve(&binding), Identifiers::One("my_hinge".into()));
    }

    #[test]
    fn one_item_sequence_resolves_to_many() {
        let mut scene = MockScene::new();
        let geom = scene.add("geom", "my_box");
        let binding = validate_element_binding(&vec![geom].into()).unwrap();
        assert_eq!(resolve(&binding), Identifiers::Many(vec!["my_box".into()]));
    }

    #[test]
    fn prefixed_identifiers_pass_through() {
        let mut scene = MockScene::with_prefix("arm");
        let joint = scene.add("joint", "elbow");
        let binding = validate_element_binding(&joint.into()).unwrap();
        assert_eq!(resolve(&binding), Identifiers::One("arm/elbow".into()));
    }

    proptest! {
        #[test]
        fn sequence_order_is_preserved(names in prop::collection::hash_set("[a-z]{1,8}", 1..12)) {
            let mut scene = MockScene::new();
            let names: Vec<String> = names.into_iter().collect();
            let handles: Vec<ElementHandle> = names.iter().map(|n| scene.add("site", n)).collect();
            let binding = validate_element_binding(&BindingTarget::from(handles)).unwrap();
            let ids = resolve(&binding);
            let want: Vec<&str> = names.iter().map(String::as_str).collect();
            prop_assert_eq!(ids.iter().collect::<Vec<_>>(), want);
        }
    }
}
