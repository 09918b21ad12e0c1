//! Read-only projection of the live body set for renderers.
//!
//! A renderer only needs to know where each body is and how big to draw it.
//! [`BodyView`] is a `Copy` snapshot of exactly that, and [`Bodies`] walks the
//! world's live set producing one view per body. Because [`Bodies`] borrows
//! the world immutably, it can never observe a tick in progress.

use std::iter::FusedIterator;
use std::slice;

use crate::simulation::body::{BodyId, MassiveBody};
use crate::simulation::vector::Vector;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyView<const D: usize> {
    pub id: BodyId,
    pub position: Vector<D>,
    pub mass: f64,
    pub radius: f64,
    pub is_static: bool,
}

impl<const D: usize> From<&MassiveBody<D>> for BodyView<D> {
    fn from(b: &MassiveBody<D>) -> Self {
        Self {
            id: b.id(),
            position: b.position(),
            mass: b.mass(),
            radius: b.radius(),
            is_static: b.is_static(),
        }
    }
}

/// Iterator over [`BodyView`]s. Clone it to restart from the same point.
#[derive(Debug, Clone)]
pub struct Bodies<'a, const D: usize> {
    inner: slice::Iter<'a, MassiveBody<D>>,
}

impl<'a, const D: usize> Bodies<'a, D> {
    pub(crate) fn new(bodies: &'a [MassiveBody<D>]) -> Self {
        Self { inner: bodies.iter() }
    }
}

impl<'a, const D: usize> Iterator for Bodies<'a, D> {
    type Item = BodyView<D>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(BodyView::from)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a, const D: usize> ExactSizeIterator for Bodies<'a, D> {}

impl<'a, const D: usize> FusedIterator for Bodies<'a, D> {}
