//! Operation arguments: named options plus an optional completion handler

use crate::options::{
    ColorOptions, FadeOptions, LedOptions, PatternLineOptions, PlayLoopOptions,
    ReadPatternOptions, ServerDownOptions,
};

/// Completion handler, run synchronously on the caller's stack once the
/// operation's transport calls return
pub type Completion<'a, T> = Box<dyn FnOnce(T) + 'a>;

/// How an operation was invoked
///
/// Either a bare handler (every option takes its default) or a set of options
/// that may carry its own handler.
pub enum Call<'a, O, T> {
    /// Only a completion handler
    Handler(Completion<'a, T>),
    /// Named options with an optional handler
    Configured {
        options: O,
        callback: Option<Completion<'a, T>>,
    },
}

impl<'a, O: Default, T> Call<'a, O, T> {
    /// Options without a handler
    pub fn new(options: O) -> Self {
        Self::Configured {
            options,
            callback: None,
        }
    }

    /// A bare handler with default options
    pub fn handler(f: impl FnOnce(T) + 'a) -> Self {
        Self::Handler(Box::new(f))
    }

    /// Attach a handler to configured options
    ///
    /// A bare handler already in place wins and is kept.
    pub fn callback(self, f: impl FnOnce(T) + 'a) -> Self {
        match self {
            Self::Configured { options, .. } => Self::Configured {
                options,
                callback: Some(Box::new(f)),
            },
            handler => handler,
        }
    }

    /// Split into options and the handler to run
    pub fn into_parts(self) -> (O, Option<Completion<'a, T>>) {
        match self {
            Self::Handler(h) => (O::default(), Some(h)),
            Self::Configured { options, callback } => (options, callback),
        }
    }
}

impl<O: Default, T> Default for Call<'_, O, T> {
    fn default() -> Self {
        Self::new(O::default())
    }
}

macro_rules! call_from_options {
    ($($opts:ty),*) => {
        $(
            impl<T> From<$opts> for Call<'_, $opts, T> {
                fn from(options: $opts) -> Self {
                    Self::new(options)
                }
            }
        )*
    };
}

call_from_options!(
    (),
    ColorOptions,
    FadeOptions,
    LedOptions,
    ServerDownOptions,
    PlayLoopOptions,
    PatternLineOptions,
    ReadPatternOptions
);

/// Run the handler, if any, with a copy of the result
pub(crate) fn complete<T: Clone>(callback: Option<Completion<'_, T>>, value: &T) {
    if let Some(cb) = callback {
        cb(value.clone());
    }
}
