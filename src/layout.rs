//! Memory layout detection and routing for frame buffers.
//!
//! A 2-D buffer is indexed `[frame, channel]`. When channels vary fastest the
//! buffer is interleaved; when frames vary fastest it is planar. Both are
//! handed to the engine without copying; anything else is copied once into
//! interleaved order.

use crate::engine::Frames;
use crate::error::{Error, Result};
use ndarray::{Array2, ArrayD, ArrayView2, ArrayViewD, Axis, Ix1, Ix2};
use tracing::trace;

/// Fastest-varying axis of a frame buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// Channels vary fastest (row-major `[frame, channel]`).
    Interleaved,
    /// Frames vary fastest (column-major `[frame, channel]`).
    Planar,
}

/// Detect the layout of a `[frame, channel]` view from its strides.
///
/// Returns `None` when neither axis has unit stride, e.g. for views sliced
/// with a step.
pub fn detect_layout<T>(view: &ArrayView2<'_, T>) -> Option<Layout> {
    if view.is_standard_layout() {
        Some(Layout::Interleaved)
    } else if view.nrows() <= 1 || view.strides()[0] == 1 {
        Some(Layout::Planar)
    } else {
        None
    }
}

/// A frame buffer prepared for the engine.
#[derive(Debug)]
pub enum Routed<'a, T> {
    /// Borrowed contiguous interleaved samples.
    Interleaved(&'a [T]),
    /// Borrowed contiguous channel slices.
    Planar(Vec<&'a [T]>),
    /// Interleaved copy of a buffer with no usable layout.
    Copied(Vec<T>),
}

impl<T: Copy> Routed<'_, T> {
    /// Engine view of the routed buffer.
    pub fn frames(&self) -> Frames<'_, T> {
        match self {
            Self::Interleaved(data) => Frames::Interleaved(data),
            Self::Planar(planes) => Frames::Planar(planes.as_slice()),
            Self::Copied(data) => Frames::Interleaved(data.as_slice()),
        }
    }

    /// Whether routing had to copy the samples.
    pub const fn is_copy(&self) -> bool {
        matches!(self, Self::Copied(_))
    }
}

/// Route a `[frame, channel]` view to the cheapest engine input.
///
/// The path follows [`detect_layout`]; views without a contiguous layout are
/// copied into interleaved order.
pub fn route<T: Copy>(view: ArrayView2<'_, T>) -> Routed<'_, T> {
    let borrowed = match detect_layout(&view) {
        Some(Layout::Interleaved) => view.to_slice().map(Routed::Interleaved),
        Some(Layout::Planar) => (0..view.ncols())
            .map(|channel| view.index_axis_move(Axis(1), channel).to_slice())
            .collect::<Option<Vec<_>>>()
            .map(Routed::Planar),
        None => None,
    };

    borrowed.unwrap_or_else(|| {
        trace!(
            "Copying {}x{} buffer with strides {:?} into interleaved order",
            view.nrows(),
            view.ncols(),
            view.strides()
        );
        Routed::Copied(view.iter().copied().collect())
    })
}

/// Apply a `[frame, channel]` operation to a rank-1 or rank-2 array.
///
/// Rank-1 input is treated as one channel and the result is returned with
/// rank 1 again.
pub(crate) fn map_frames<T, F>(input: ArrayViewD<'_, T>, op: F) -> Result<ArrayD<T>>
where
    F: FnOnce(ArrayView2<'_, T>) -> Result<Array2<T>>,
{
    match input.ndim() {
        1 => {
            let mono = input.into_dimensionality::<Ix1>()?.insert_axis(Axis(1));
            Ok(op(mono)?.remove_axis(Axis(1)).into_dyn())
        }
        2 => Ok(op(input.into_dimensionality::<Ix2>()?)?.into_dyn()),
        ndim => Err(Error::InvalidRank { ndim }),
    }
}
