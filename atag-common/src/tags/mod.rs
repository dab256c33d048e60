//! Tag engine: vocabulary, token codec, enforcement and bank reconciliation

pub mod codec;
pub mod definition;
pub mod enforce;
pub mod reconcile;
pub mod store;
pub mod vocabulary;

pub use codec::{
    decode_comment, encode_selection, is_recognized, match_token, parse_token_list, tokens,
    SelectedTag, Selection, DELIMITER,
};
pub use definition::{slugify, validate_name, AmountRange, Classification, TagDefinition};
pub use enforce::{
    ancestors, check_removal, descendants, enforce, has_required_main, require_main,
};
pub use reconcile::{
    bank_sentinel_of, reconcile, requires_policy_choice, sentinel_token, split_tokens,
    unknown_tokens, ReconcilePolicy, BANK_SENTINEL_PREFIX,
};
pub use store::{TagForm, TagStore};
pub use vocabulary::{TagsFile, TAGS_SCHEMA_VERSION};
