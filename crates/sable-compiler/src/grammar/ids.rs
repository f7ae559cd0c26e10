//! Dense identifiers into the grammar arenas.

use serde::Serialize;

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
        #[serde(transparent)]
        pub struct $name(u32);

        impl $name {
            #[inline]
            pub fn index(self) -> usize {
                self.0 as usize
            }

            #[inline]
            pub(crate) fn from_index(index: usize) -> Self {
                Self(u32::try_from(index).expect("grammar arena exceeds u32::MAX entries"))
            }
        }
    };
}

define_id!(
    /// Lexer token declaration.
    TokenId
);
define_id!(
    /// Lexer or parser selection.
    SelectionId
);
define_id!(ProductionId);
define_id!(AlternativeId);
define_id!(
    /// Element of a parser alternative.
    ElementId
);
define_id!(TreeProductionId);
define_id!(TreeAlternativeId);
define_id!(TreeElementId);
