// @mention text encoding for annotation bodies.
//
// A mention exists in three representations: the plain-text form a user
// types (`@bob` or `@[Bob Smith]`), the tagged-markup form that is persisted
// (`<a data-hyp-mention="" data-userid="...">@bob</a>`), and the decorated
// form shown to readers. These modules convert between the three and match
// partial mention input against candidate users.

pub mod caret;
pub mod decode;
pub mod encode;
pub mod render;
pub mod session;
pub mod suggestions;
pub mod syntax;
pub mod tag;
