use thiserror::Error;

/// Errors a [`Builder`](crate::dawg::builder::Builder) can report. The builder never
/// partially applies an insertion: on any of these, the word is rejected before any
/// structural change is made.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum BuilderError {
    #[error("words must be inserted in non-decreasing order: '{word}' is not greater than '{last_word}'")]
    OutOfOrder { word: String, last_word: String },

    #[error("cannot insert the empty word")]
    EmptyWord,

    #[error("builder has already been finished; insert/finish cannot be called again")]
    AlreadyFinished,
}

/// Errors from [`save`](crate::dawg::codec::save)/[`load`](crate::dawg::codec::load).
#[derive(Error, Debug)]
pub enum CodecError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not decode DAWG: {0}")]
    Decode(String),
}
