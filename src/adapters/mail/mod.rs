//! Mail adapters - Implementations of the `MailComposer` port.

mod mailto_composer;

pub use mailto_composer::{plain_text_body, MailtoComposer};
