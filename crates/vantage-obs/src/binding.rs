//! Binding targets and their validation.
//!
//! Callers hand observables a loosely-typed [`BindingTarget`]: an
//! element, a bare name, or a sequence of either. [`classify`] sorts a
//! target into a strict [`Classification`]; the `validate_*` functions
//! turn that into a well-formed [`ElementBinding`] or camera handle, or
//! an [`ObservableError::BindingType`] naming the violated contract.

use vantage_core::{ElementCategory, ElementHandle, ExpectedBinding, ObservableError};

/// A caller-supplied binding target, prior to validation.
///
/// # Examples
///
/// ```
/// use vantage_obs::BindingTarget;
///
/// // A bare name converts, but never validates as an element.
/// let t = BindingTarget::from("my_hinge");
/// assert!(matches!(t, BindingTarget::Name(_)));
/// ```
#[derive(Clone, Debug)]
pub enum BindingTarget {
    /// A scene element.
    Element(ElementHandle),
    /// A bare name or identifier string.
    Name(String),
    /// An ordered sequence of targets.
    Sequence(Vec<BindingTarget>),
}

impl BindingTarget {
    /// Short human-readable description, used in error messages.
    pub fn describe(&self) -> String {
        match self {
            Self::Element(e) => format!("{} element '{}'", e.category(), e.full_identifier()),
            Self::Name(name) => format!("name {name:?}"),
            Self::Sequence(items) => format!("sequence of {} items", items.len()),
        }
    }
}

impl From<ElementHandle> for BindingTarget {
    fn from(element: ElementHandle) -> Self {
        Self::Element(element)
    }
}

impl From<&ElementHandle> for BindingTarget {
    fn from(element: &ElementHandle) -> Self {
        Self::Element(ElementHandle::clone(element))
    }
}

impl From<&str> for BindingTarget {
    fn from(name: &str) -> Self {
        Self::Name(name.to_string())
    }
}

impl From<String> for BindingTarget {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

impl<T: Into<BindingTarget>> From<Vec<T>> for BindingTarget {
    fn from(items: Vec<T>) -> Self {
        Self::Sequence(items.into_iter().map(Into::into).collect())
    }
}

impl From<&[ElementHandle]> for BindingTarget {
    fn from(items: &[ElementHandle]) -> Self {
        Self::Sequence(items.iter().map(BindingTarget::from).collect())
    }
}

/// Strict classification of a [`BindingTarget`].
#[derive(Clone, Debug)]
pub enum Classification {
    /// Exactly one element.
    SingleElement(ElementHandle),
    /// A non-empty sequence of elements sharing one category.
    ElementSequence(Vec<ElementHandle>),
    /// Anything else.
    Invalid {
        /// Description of the offending value.
        found: String,
        /// The contract it violated.
        expected: ExpectedBinding,
    },
}

/// Sort a target into a [`Classification`].
///
/// Sequences must be non-empty, must contain only elements (no names,
/// no nested sequences), and all elements must share one category.
pub fn classify(target: &BindingTarget) -> Classification {
    match target {
        BindingTarget::Element(e) => Classification::SingleElement(ElementHandle::clone(e)),
        BindingTarget::Name(_) => Classification::Invalid {
            found: target.describe(),
            expected: ExpectedBinding::Element,
        },
        BindingTarget::Sequence(items) => {
            if items.is_empty() {
                return Classification::Invalid {
                    found: "empty sequence".into(),
                    expected: ExpectedBinding::Element,
                };
            }
            let mut elements = Vec::with_capacity(items.len());
            for (i, item) in items.iter().enumerate() {
                match item {
                    BindingTarget::Element(e) => elements.push(ElementHandle::clone(e)),
                    other => {
                        return Classification::Invalid {
                            found: format!("{} at index {i}", other.describe()),
                            expected: ExpectedBinding::Element,
                        }
                    }
                }
            }
            let category = elements[0].category();
            if let Some((i, odd)) = elements
                .iter()
                .enumerate()
                .find(|(_, e)| e.category() != category)
            {
                return Classification::Invalid {
                    found: format!(
                        "{} element at index {i} in a sequence of {category} elements",
                        odd.category()
                    ),
                    expected: ExpectedBinding::SingleCategory,
                };
            }
            Classification::ElementSequence(elements)
        }
    }
}

/// A validated element binding: one element or a non-empty, ordered,
/// single-category sequence of elements. Immutable once built.
///
/// Only [`validate_element_binding`] constructs one.
#[derive(Clone, Debug)]
pub struct ElementBinding(Bound);

#[derive(Clone, Debug)]
enum Bound {
    Single(ElementHandle),
    // Non-empty; a one-item sequence stays a sequence.
    Sequence(Vec<ElementHandle>),
}

impl ElementBinding {
    /// Bound elements in binding order.
    pub fn elements(&self) -> &[ElementHandle] {
        match &self.0 {
            Bound::Single(e) => std::slice::from_ref(e),
            Bound::Sequence(es) => es,
        }
    }

    /// The element of a single-element binding; `None` for a sequence.
    pub fn single(&self) -> Option<&ElementHandle> {
        match &self.0 {
            Bound::Single(e) => Some(e),
            Bound::Sequence(_) => None,
        }
    }

    /// Number of bound elements. At least one.
    pub fn len(&self) -> usize {
        self.elements().len()
    }

    /// Always `false`: validation rejects empty sequences.
    pub fn is_empty(&self) -> bool {
        self.elements().is_empty()
    }

    /// Returns `true` for a sequence binding, even of length one.
    pub fn is_sequence(&self) -> bool {
        matches!(self.0, Bound::Sequence(_))
    }

    /// The shared category of the bound elements.
    pub fn category(&self) -> ElementCategory {
        self.elements()[0].category()
    }
}

/// Validate a target for a feature observable (no category restriction
/// beyond sequences sharing one).
pub fn validate_element_binding(target: &BindingTarget) -> Result<ElementBinding, ObservableError> {
    match classify(target) {
        Classification::SingleElement(e) => Ok(ElementBinding(Bound::Single(e))),
        Classification::ElementSequence(es) => Ok(ElementBinding(Bound::Sequence(es))),
        Classification::Invalid { found, expected } => {
            Err(ObservableError::BindingType { found, expected })
        }
    }
}

/// Validate a target for a camera observable.
///
/// Accepts exactly one element of category `camera`. Sequences are
/// rejected even when they hold a single camera; bare names are
/// rejected as non-elements.
pub fn validate_camera_binding(target: &BindingTarget) -> Result<ElementHandle, ObservableError> {
    match classify(target) {
        Classification::SingleElement(e) if e.category().is_camera() => Ok(e),
        Classification::SingleElement(_) => Err(ObservableError::BindingType {
            found: target.describe(),
            expected: ExpectedBinding::Camera,
        }),
        Classification::ElementSequence(_) => Err(ObservableError::BindingType {
            found: target.describe(),
            expected: ExpectedBinding::Element,
        }),
        Classification::Invalid { found, .. } => Err(ObservableError::BindingType {
            found,
            expected: ExpectedBinding::Element,
        }),
    }
}
