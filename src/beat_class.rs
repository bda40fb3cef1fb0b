/*
MIT License

Copyright (c) 2024 Philipp Schuster

Permission is hereby granted, free of charge, to any person obtaining a copy
of this software and associated documentation files (the "Software"), to deal
in the Software without restriction, including without limitation the rights
to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
copies of the Software, and to permit persons to whom the Software is
furnished to do so, subject to the following conditions:

The above copyright notice and this permission notice shall be included in all
copies or substantial portions of the Software.

THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
SOFTWARE.
*/
//! Module for [`BeatClass`] and the per-class storage [`PerClass`].

use core::fmt::{Display, Formatter};
use core::ops::{Index, IndexMut};

/// Frequency class of a beat. Each class has its own vote cutoff,
/// threshold percentage and cooldown.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BeatClass {
    /// Low beats, e.g., kick drums.
    Low,
    /// Mid beats, e.g., snares.
    Mid,
    /// High beats, e.g., hi-hats.
    High,
}

impl BeatClass {
    /// Number of beat classes.
    pub const COUNT: usize = 3;

    /// All classes in dispatch order.
    pub const ALL: [Self; Self::COUNT] = [Self::Low, Self::Mid, Self::High];

    /// Position of the class inside [`Self::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Low => 0,
            Self::Mid => 1,
            Self::High => 2,
        }
    }
}

impl Display for BeatClass {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        let name = match self {
            Self::Low => "low",
            Self::Mid => "mid",
            Self::High => "high",
        };
        f.pad(name)
    }
}

/// One value per [`BeatClass`], stored in a fixed array.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct PerClass<V>([V; BeatClass::COUNT]);

impl<V> PerClass<V> {
    /// Creates the storage from one value per class.
    pub const fn new(low: V, mid: V, high: V) -> Self {
        Self([low, mid, high])
    }

    /// Iterates `(class, value)` pairs in dispatch order.
    pub fn iter(&self) -> impl Iterator<Item = (BeatClass, &V)> {
        BeatClass::ALL.into_iter().zip(self.0.iter())
    }

    /// Iterates `(class, value)` pairs in dispatch order with mutable values.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (BeatClass, &mut V)> {
        BeatClass::ALL.into_iter().zip(self.0.iter_mut())
    }
}

impl<V: Copy> PerClass<V> {
    /// Same value for every class.
    pub const fn splat(value: V) -> Self {
        Self([value; BeatClass::COUNT])
    }
}

impl<V> Index<BeatClass> for PerClass<V> {
    type Output = V;

    #[inline]
    fn index(&self, class: BeatClass) -> &Self::Output {
        &self.0[class.index()]
    }
}

impl<V> IndexMut<BeatClass> for PerClass<V> {
    #[inline]
    fn index_mut(&mut self, class: BeatClass) -> &mut Self::Output {
        &mut self.0[class.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::string::ToString;
    use std::vec::Vec;

    #[test]
    fn all_is_in_index_order() {
        for (i, class) in BeatClass::ALL.iter().enumerate() {
            check!(class.index() == i);
        }
        check!(BeatClass::Low < BeatClass::Mid);
        check!(BeatClass::Mid < BeatClass::High);
    }

    #[test]
    fn per_class_indexing() {
        let mut values = PerClass::new(4, 16, 32);
        check!(values[BeatClass::Low] == 4);
        check!(values[BeatClass::Mid] == 16);
        check!(values[BeatClass::High] == 32);

        values[BeatClass::Mid] += 1;
        check!(values[BeatClass::Mid] == 17);

        let classes = values.iter().map(|(class, _)| class).collect::<Vec<_>>();
        check!(classes == BeatClass::ALL);

        for (_, value) in values.iter_mut() {
            *value = 0;
        }
        check!(values == PerClass::splat(0));
    }

    #[test]
    fn display() {
        check!(BeatClass::Low.to_string() == "low");
        check!(BeatClass::High.to_string() == "high");
    }
}
