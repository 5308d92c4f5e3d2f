//! Checks for Java-style property files.

mod duplicate_key;
mod illegal_assignment_text;
mod illegal_comment_text;
mod illegal_token;
mod illegal_token_text;
mod indentation;
mod key_name;
mod missing_assignment;
mod ordered_key;

pub use duplicate_key::DuplicateKeyPropertyCheck;
pub use illegal_assignment_text::{
    IllegalAssignmentTextPropertyCheck, IllegalAssignmentTextPropertyOptions,
};
pub use illegal_comment_text::{IllegalCommentTextPropertyCheck, IllegalCommentTextPropertyOptions};
pub use illegal_token::IllegalTokenPropertyCheck;
pub use illegal_token_text::{IllegalTokenTextPropertyCheck, IllegalTokenTextPropertyOptions};
pub use indentation::{IndentationPropertyCheck, IndentationPropertyOptions};
pub use key_name::{KeyNamePropertyCheck, KeyNamePropertyOptions};
pub use missing_assignment::MissingAssignmentPropertyCheck;
pub use ordered_key::{OrderedKeyPropertyCheck, OrderedKeyPropertyOptions};
