//! Pattern handling for notation rules.
//!
//! Wrong patterns are a hybrid of literal text and regular-expression syntax:
//! `.` and bare parentheses are escaped so they match literally, while
//! `(?...)` group constructs and every other metacharacter keep their regex
//! meaning. This lets the dictionary carry plain strings such as `"."` next to
//! contextual rules such as `"(?<!お)祭り"`.

pub mod compiler;
