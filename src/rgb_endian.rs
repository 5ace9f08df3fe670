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
use crate::repack_support::WordOrder;
use crate::row_iter::{for_each_row, plane_row};
use crate::{DecodedFrame, PackedLayout, PixelBufferMut, RepackError};
use num_traits::PrimInt;

/// Integer word a packed RGB sample is stored in.
pub(crate) trait PackedWord: PrimInt + Send + Sync {
    const SIZE: usize;

    fn read_ne(bytes: &[u8]) -> Self;

    fn write_ne(self, bytes: &mut [u8]);
}

impl PackedWord for u16 {
    const SIZE: usize = 2;

    #[inline(always)]
    fn read_ne(bytes: &[u8]) -> Self {
        u16::from_ne_bytes([bytes[0], bytes[1]])
    }

    #[inline(always)]
    fn write_ne(self, bytes: &mut [u8]) {
        bytes.copy_from_slice(&self.to_ne_bytes());
    }
}

impl PackedWord for u32 {
    const SIZE: usize = 4;

    #[inline(always)]
    fn read_ne(bytes: &[u8]) -> Self {
        u32::from_ne_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
    }

    #[inline(always)]
    fn write_ne(self, bytes: &mut [u8]) {
        bytes.copy_from_slice(&self.to_ne_bytes());
    }
}

/// Rewrites every `W` word of the frame in big endian order.
fn words_to_big_endian_impl<W: PackedWord, const SOURCE_ORDER: u8>(
    frame: &DecodedFrame,
    dst: &mut PixelBufferMut,
    layout: PackedLayout,
) -> Result<(), RepackError> {
    let source_order: WordOrder = SOURCE_ORDER.into();
    frame.check_packed(W::SIZE)?;
    dst.check_constraints(layout, frame.width, frame.height)?;

    // Native words on a big endian host are already in place.
    let straight_copy = source_order == WordOrder::Native && cfg!(target_endian = "big");

    let row_bytes = frame.width as usize * W::SIZE;
    let src_plane = frame.planes[0];
    let src_stride = frame.strides[0] as usize;
    let dst_stride = dst.stride as usize;

    for_each_row(
        dst.data.borrow_mut(),
        dst_stride,
        frame.height as usize,
        row_bytes,
        |y, dst_row| {
            let src_row = plane_row(src_plane, src_stride, y, row_bytes);
            if straight_copy {
                dst_row.copy_from_slice(src_row);
                return;
            }
            for (dst, src) in dst_row
                .chunks_exact_mut(W::SIZE)
                .zip(src_row.chunks_exact(W::SIZE))
            {
                let word = W::read_ne(src);
                let word = match source_order {
                    WordOrder::Native => word,
                    WordOrder::LittleEndian => W::from_le(word),
                };
                word.to_be().write_ne(dst);
            }
        },
    );

    Ok(())
}

/// Host endian xRGB words to big endian ARGB.
pub(crate) fn rgb32_to_argb32(
    frame: &DecodedFrame,
    dst: &mut PixelBufferMut,
) -> Result<(), RepackError> {
    words_to_big_endian_impl::<u32, { WordOrder::Native as u8 }>(frame, dst, PackedLayout::Argb32)
}

/// Little endian 5:5:5 words to big endian, swapped on every host.
pub(crate) fn rgb555le_to_rgb555be(
    frame: &DecodedFrame,
    dst: &mut PixelBufferMut,
) -> Result<(), RepackError> {
    words_to_big_endian_impl::<u16, { WordOrder::LittleEndian as u8 }>(
        frame,
        dst,
        PackedLayout::Rgb555Be,
    )
}
