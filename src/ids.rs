macro_rules! impl_id {
    ($name:ident, $doc:literal) => {
        #[doc = $doc]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
        pub struct $name(usize);

        impl $name {
            /// Create a new id.
            #[inline]
            pub(crate) const fn new(index: usize) -> Self {
                $name(index)
            }

            /// Get the id as usize.
            /// It is dead code in case of NfaStateID.
            #[allow(dead_code)]
            #[inline]
            pub fn as_usize(&self) -> usize {
                self.0
            }
        }

        impl<T> std::ops::Index<$name> for [T] {
            type Output = T;

            #[inline]
            fn index(&self, index: $name) -> &Self::Output {
                &self[index.0]
            }
        }

        impl<T> std::ops::Index<$name> for Vec<T> {
            type Output = T;

            #[inline]
            fn index(&self, index: $name) -> &Self::Output {
                &self[index.0]
            }
        }

        impl<T> std::ops::IndexMut<$name> for Vec<T> {
            #[inline]
            fn index_mut(&mut self, index: $name) -> &mut T {
                &mut self[index.0]
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<usize> for $name {
            fn from(index: usize) -> Self {
                $name::new(index)
            }
        }
    };
}

impl_id!(
    NfaStateID,
    "The id of an NFA state, an index into the NFA state arena. Unique within one compilation."
);
impl_id!(
    DfaStateID,
    "The id of a DFA state, assigned in subset discovery order. State 0 is the start state."
);
