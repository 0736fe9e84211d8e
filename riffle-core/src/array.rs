//! [`ndarray`]-backed implementation of [`BatchData`].
use crate::BatchData;
use ndarray::{ArrayD, Axis, IxDyn};

/// Columnar `f32` storage with a leading batch dimension.
///
/// The per-record shape is negotiated by the first record written (or by
/// [`expand`](BatchData::expand) from an example) and fixed afterwards; a
/// record with a different shape panics, which should be caught at setup
/// rather than per message.
#[derive(Clone, Debug, PartialEq)]
pub struct ArrayBatch {
    data: Option<ArrayD<f32>>,
    capacity: usize,
}

impl ArrayBatch {
    /// The underlying array, or `None` before anything has been written.
    pub fn array(&self) -> Option<&ArrayD<f32>> {
        self.data.as_ref()
    }

    fn alloc(capacity: usize, record_shape: &[usize]) -> ArrayD<f32> {
        let mut shape = vec![capacity];
        shape.extend_from_slice(record_shape);
        ArrayD::zeros(IxDyn(&shape))
    }
}

impl From<ArrayD<f32>> for ArrayBatch {
    /// Wraps an array whose leading axis is the batch dimension.
    fn from(data: ArrayD<f32>) -> Self {
        let capacity = data.shape()[0];
        Self {
            data: Some(data),
            capacity,
        }
    }
}

impl BatchData for ArrayBatch {
    fn new(capacity: usize) -> Self {
        Self {
            data: None,
            capacity,
        }
    }

    fn expand(&self, capacity: usize) -> Self {
        let data = self
            .data
            .as_ref()
            .map(|a| Self::alloc(capacity, &a.shape()[1..]));
        Self { data, capacity }
    }

    fn push(&mut self, i: usize, data: &Self) {
        let src = match data.data.as_ref() {
            Some(src) => src,
            None => return,
        };

        if self.data.is_none() {
            self.data = Some(Self::alloc(self.capacity, &src.shape()[1..]));
        }
        let dst = self.data.as_mut().unwrap();
        assert_eq!(
            &dst.shape()[1..],
            &src.shape()[1..],
            "transition field shape disagrees with the negotiated example"
        );

        for k in 0..src.shape()[0] {
            let j = (i + k) % self.capacity;
            dst.index_axis_mut(Axis(0), j)
                .assign(&src.index_axis(Axis(0), k));
        }
    }

    fn sample(&self, ixs: &[usize]) -> Self {
        let data = self.data.as_ref().map(|a| a.select(Axis(0), ixs));
        Self {
            data,
            capacity: ixs.len(),
        }
    }

    fn len(&self) -> usize {
        match &self.data {
            Some(a) => a.shape()[0],
            None => 0,
        }
    }
}
