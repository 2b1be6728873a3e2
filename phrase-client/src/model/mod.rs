//! Request and response bodies of the Phrase API.
//!
//! Field names follow the snake_case of the wire format. Unknown response
//! fields are ignored and optional request fields that are `None` are left
//! out of the body.

mod key;
mod locale;
mod project;
mod tag;
mod translation;

pub use key::{CreateKey, Key};
pub use locale::{
    CreatePhraseLocale, DownloadLocaleOptions, LocalePreview, Message, PhraseLocale,
    PhraseLocaleMessages,
};
pub use project::{CreatePhraseProject, PhraseProject, UpdatePhraseProject};
pub use tag::{PhraseTagWithStats, TagStatistics};
pub use translation::{CreateTranslation, Translation, TranslationKey};
