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
use crate::row_iter::for_each_row;
use crate::{PackedLayout, PixelBufferMut, RepackError};

/// Neutral chroma and studio black luma for one `2vuy` column: U/V then Y.
pub const UYVY_CLEAR_PATTERN: [u8; 2] = [0x80, 0x10];

/// Neutral chroma, studio black luma and opaque alpha for one `v408` sample.
pub const V408_CLEAR_PATTERN: [u8; 4] = [0x80, 0x10, 0x80, 0xEB];

fn fill_pattern(
    dst: &mut PixelBufferMut,
    layout: PackedLayout,
    pattern: &[u8],
) -> Result<(), RepackError> {
    dst.check_constraints(layout, dst.width, dst.height)?;
    let row_bytes = layout.row_bytes(dst.width);
    let dst_stride = dst.stride as usize;
    let rows = dst.height as usize;

    for_each_row(
        dst.data.borrow_mut(),
        dst_stride,
        rows,
        row_bytes,
        |_, dst_row| {
            for dst in dst_row.chunks_exact_mut(pattern.len()) {
                dst.copy_from_slice(pattern);
            }
        },
    );

    Ok(())
}

fn fill_zero(dst: &mut PixelBufferMut, layout: PackedLayout) -> Result<(), RepackError> {
    dst.check_constraints(layout, dst.width, dst.height)?;
    let row_bytes = layout.row_bytes(dst.width);
    let dst_stride = dst.stride as usize;
    let rows = dst.height as usize;

    for_each_row(
        dst.data.borrow_mut(),
        dst_stride,
        rows,
        row_bytes,
        |_, dst_row| dst_row.fill(0),
    );

    Ok(())
}

pub(crate) fn clear_rgb24(dst: &mut PixelBufferMut) -> Result<(), RepackError> {
    fill_zero(dst, PackedLayout::Rgb24)
}

pub(crate) fn clear_rgb32(dst: &mut PixelBufferMut) -> Result<(), RepackError> {
    fill_zero(dst, PackedLayout::Argb32)
}

pub(crate) fn clear_rgb16(dst: &mut PixelBufferMut) -> Result<(), RepackError> {
    fill_zero(dst, PackedLayout::Rgb555Be)
}

/// Paints black into `2vuy`, every pixel gets a full U/V + Y column so an odd
/// width is covered too.
pub(crate) fn clear_uyvy(dst: &mut PixelBufferMut) -> Result<(), RepackError> {
    fill_pattern(dst, PackedLayout::Uyvy422, &UYVY_CLEAR_PATTERN)
}

/// Paints opaque black into `v408`.
pub(crate) fn clear_v408(dst: &mut PixelBufferMut) -> Result<(), RepackError> {
    fill_pattern(dst, PackedLayout::V408, &V408_CLEAR_PATTERN)
}
