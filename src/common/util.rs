// Copyright (c) 2016-2021 Fabian Schuiki

//! A collection of utility traits shared by the token, block, and group
//! streams.

#![deny(missing_docs)]

/// Describes stream elements.
pub trait HasDesc {
    /// Obtain a human-readable descriptive name for this element.
    fn desc(&self) -> &'static str;

    /// Obtain a human-readable description for this element, possibly
    /// containing the element's text. Defaults to return whatever `desc()`
    /// returns.
    fn desc_full(&self) -> String {
        self.desc().into()
    }
}

impl<'a, T> HasDesc for &'a T
where
    T: HasDesc + ?Sized,
{
    fn desc(&self) -> &'static str {
        (*self).desc()
    }

    fn desc_full(&self) -> String {
        (*self).desc_full()
    }
}
