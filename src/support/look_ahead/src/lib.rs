use derive_more::Deref;
use std::collections::VecDeque;

/// Iterator adapter with unbounded lookahead.
///
/// Items pulled ahead of time are buffered in order, so peeking never
/// changes what `next` returns.
#[derive(Deref)]
pub struct LookAhead<I>
where
    I: Iterator,
{
    #[deref]
    iterator: I,

    buffer: VecDeque<I::Item>,
}

impl<I> LookAhead<I>
where
    I: Iterator,
{
    pub fn new(iterator: I) -> Self {
        Self {
            iterator,
            buffer: VecDeque::with_capacity(4),
        }
    }

    pub fn peek(&mut self) -> Option<&I::Item> {
        self.peek_nth(0)
    }

    pub fn peek_nth(&mut self, index: usize) -> Option<&I::Item> {
        while self.buffer.len() <= index {
            self.buffer.push_back(self.iterator.next()?);
        }

        self.buffer.get(index)
    }

    /// Advances only if the next item satisfies `predicate`.
    pub fn next_if(&mut self, predicate: impl FnOnce(&I::Item) -> bool) -> Option<I::Item> {
        if predicate(self.peek()?) {
            self.next()
        } else {
            None
        }
    }
}

impl<I: Iterator> Iterator for LookAhead<I> {
    type Item = I::Item;

    fn next(&mut self) -> Option<Self::Item> {
        self.buffer.pop_front().or_else(|| self.iterator.next())
    }
}

#[test]
fn peeking_does_not_consume() {
    let mut input = LookAhead::new([1, 2, 3].into_iter());

    assert_eq!(input.peek_nth(2), Some(&3));
    assert_eq!(input.peek(), Some(&1));
    assert_eq!(input.next(), Some(1));
    assert_eq!(input.peek_nth(5), None);
    assert_eq!(input.collect::<Vec<_>>(), vec![2, 3]);
}

#[test]
fn next_if_keeps_rejected_item() {
    let mut input = LookAhead::new("ab".chars());

    assert_eq!(input.next_if(|c| *c == 'b'), None);
    assert_eq!(input.next_if(|c| *c == 'a'), Some('a'));
    assert_eq!(input.next(), Some('b'));
    assert_eq!(input.next(), None);
}
