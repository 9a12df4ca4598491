// Copyright (c) 2017 Fabian Schuiki

//! An iterator adapter that allows peeking arbitrarily far ahead and pushing
//! elements back into the stream.

use std::collections::VecDeque;

pub struct Lookahead<T: Iterator> {
    inner: T,
    buffer: VecDeque<Option<T::Item>>,
}

impl<T> Lookahead<T>
where
    T: Iterator,
{
    pub fn new(inner: T) -> Lookahead<T> {
        Lookahead {
            inner: inner,
            buffer: VecDeque::new(),
        }
    }

    /// Look at the element `offset` positions ahead without consuming it.
    /// Returns `None` past the end of the stream.
    pub fn lookahead(&mut self, offset: usize) -> Option<&T::Item> {
        for _ in self.buffer.len()..offset + 1 {
            self.buffer.push_back(self.inner.next());
        }
        self.buffer[offset].as_ref()
    }

    /// Access the wrapped iterator.
    pub fn inner(&self) -> &T {
        &self.inner
    }

    /// Push an element back to the front of the stream.
    pub fn undo(&mut self, item: T::Item) {
        self.buffer.push_front(Some(item));
    }
}

impl<T> Iterator for Lookahead<T>
where
    T: Iterator,
{
    type Item = T::Item;

    fn next(&mut self) -> Option<T::Item> {
        match self.buffer.pop_front() {
            Some(v) => v,
            None => self.inner.next(),
        }
    }
}

impl<T> From<T> for Lookahead<T>
where
    T: Iterator,
{
    fn from(inner: T) -> Lookahead<T> {
        Lookahead::new(inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookahead_and_undo() {
        let mut la = Lookahead::new("abc".chars());
        assert_eq!(la.lookahead(1), Some(&'b'));
        assert_eq!(la.lookahead(5), None);
        assert_eq!(la.next(), Some('a'));
        la.undo('x');
        assert_eq!(la.next(), Some('x'));
        assert_eq!(la.next(), Some('b'));
        assert_eq!(la.next(), Some('c'));
        assert_eq!(la.next(), None);
    }
}
