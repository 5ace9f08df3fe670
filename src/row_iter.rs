/*
 * Copyright (c) Radzivon Bartoshyk, 10/2024. All rights reserved.
 *
 * Redistribution and use in source and binary forms, with or without modification,
 * are permitted provided that the following conditions are met:
 *
 * 1.  Redistributions of source code must retain the above copyright notice, this
 * list of conditions and the following disclaimer.
 *
 * 2.  Redistributions in binary form must reproduce the above copyright notice,
 * this list of conditions and the following disclaimer in the documentation
 * and/or other materials provided with the distribution.
 *
 * 3.  Neither the name of the copyright holder nor the names of its
 * contributors may be used to endorse or promote products derived from
 * this software without specific prior written permission.
 *
 * THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND CONTRIBUTORS "AS IS"
 * AND ANY EXPRESS OR IMPLIED WARRANTIES, INCLUDING, BUT NOT LIMITED TO, THE
 * IMPLIED WARRANTIES OF MERCHANTABILITY AND FITNESS FOR A PARTICULAR PURPOSE ARE
 * DISCLAIMED. IN NO EVENT SHALL THE COPYRIGHT HOLDER OR CONTRIBUTORS BE LIABLE
 * FOR ANY DIRECT, INDIRECT, INCIDENTAL, SPECIAL, EXEMPLARY, OR CONSEQUENTIAL
 * DAMAGES (INCLUDING, BUT NOT LIMITED TO, PROCUREMENT OF SUBSTITUTE GOODS OR
 * SERVICES; LOSS OF USE, DATA, OR PROFITS; OR BUSINESS INTERRUPTION) HOWEVER
 * CAUSED AND ON ANY THEORY OF LIABILITY, WHETHER IN CONTRACT, STRICT LIABILITY,
 * OR TORT (INCLUDING NEGLIGENCE OR OTHERWISE) ARISING IN ANY WAY OUT OF THE USE
 * OF THIS SOFTWARE, EVEN IF ADVISED OF THE POSSIBILITY OF SUCH DAMAGE.
 */
#![forbid(unsafe_code)]
#[cfg(feature = "rayon")]
use rayon::iter::{IndexedParallelIterator, ParallelIterator};
#[cfg(feature = "rayon")]
use rayon::prelude::ParallelSliceMut;

/// Row `index` of a plane, trimmed to `len` bytes.
///
/// Planes are validated up front, an out of range row here is a bug and panics.
#[inline(always)]
pub(crate) fn plane_row(plane: &[u8], stride: usize, index: usize, len: usize) -> &[u8] {
    let start = index * stride;
    &plane[start..start + len]
}

#[inline(always)]
fn rows_span(stride: usize, rows: usize, row_bytes: usize) -> usize {
    stride * (rows - 1) + row_bytes
}

/// Calls `row_fn(y, row)` for the first `rows` destination rows, each trimmed
/// to `row_bytes` so stride padding is never handed out.
pub(crate) fn for_each_row<F>(dst: &mut [u8], stride: usize, rows: usize, row_bytes: usize, row_fn: F)
where
    F: Fn(usize, &mut [u8]) + Send + Sync,
{
    if rows == 0 {
        return;
    }
    let dst = &mut dst[..rows_span(stride, rows, row_bytes)];

    let iter;
    #[cfg(feature = "rayon")]
    {
        iter = dst.par_chunks_mut(stride);
    }
    #[cfg(not(feature = "rayon"))]
    {
        iter = dst.chunks_mut(stride);
    }

    iter.enumerate()
        .for_each(|(y, row)| row_fn(y, &mut row[..row_bytes]));
}

/// Calls `pair_fn(pair, upper, lower)` for the first `pairs` row pairs.
pub(crate) fn for_each_row_pair<F>(
    dst: &mut [u8],
    stride: usize,
    pairs: usize,
    row_bytes: usize,
    pair_fn: F,
) where
    F: Fn(usize, &mut [u8], &mut [u8]) + Send + Sync,
{
    if pairs == 0 {
        return;
    }
    let dst = &mut dst[..rows_span(stride, pairs * 2, row_bytes)];

    let iter;
    #[cfg(feature = "rayon")]
    {
        iter = dst.par_chunks_mut(stride * 2);
    }
    #[cfg(not(feature = "rayon"))]
    {
        iter = dst.chunks_mut(stride * 2);
    }

    iter.enumerate().for_each(|(pair, rows)| {
        let (upper, lower) = rows.split_at_mut(stride);
        pair_fn(pair, &mut upper[..row_bytes], &mut lower[..row_bytes]);
    });
}
