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
use crate::repack_support::RgbChannels;
use crate::row_iter::{for_each_row, plane_row};
use crate::{DecodedFrame, PackedLayout, PixelBufferMut, RepackError};

pub(crate) trait ShuffleConverter<const SRC: u8, const DST: u8> {
    fn convert(&self, src: &[u8], dst: &mut [u8]);
}

#[derive(Default)]
struct Rgb24DefaultConverter<const SRC: u8, const DST: u8> {}

impl<const SRC: u8, const DST: u8> ShuffleConverter<SRC, DST> for Rgb24DefaultConverter<SRC, DST> {
    #[inline(always)]
    fn convert(&self, src: &[u8], dst: &mut [u8]) {
        let src_channels: RgbChannels = SRC.into();
        let dst_channels: RgbChannels = DST.into();
        if src_channels == dst_channels {
            dst.copy_from_slice(src);
            return;
        }
        for (dst, src) in dst.chunks_exact_mut(3).zip(src.chunks_exact(3)) {
            dst[dst_channels.get_r_channel_offset()] = src[src_channels.get_r_channel_offset()];
            dst[dst_channels.get_g_channel_offset()] = src[src_channels.get_g_channel_offset()];
            dst[dst_channels.get_b_channel_offset()] = src[src_channels.get_b_channel_offset()];
        }
    }
}

/// Channel reshuffling of packed 24-bit rows
fn shuffle_rgb24_impl<const SRC: u8, const DST: u8>(
    frame: &DecodedFrame,
    dst: &mut PixelBufferMut,
) -> Result<(), RepackError> {
    let layout = PackedLayout::Rgb24;
    frame.check_packed(layout.bytes_per_pixel())?;
    dst.check_constraints(layout, frame.width, frame.height)?;

    let converter = Rgb24DefaultConverter::<SRC, DST>::default();
    let row_bytes = layout.row_bytes(frame.width);
    let src_plane = frame.planes[0];
    let src_stride = frame.strides[0] as usize;
    let dst_stride = dst.stride as usize;

    for_each_row(
        dst.data.borrow_mut(),
        dst_stride,
        frame.height as usize,
        row_bytes,
        |y, dst_row| {
            converter.convert(plane_row(src_plane, src_stride, y, row_bytes), dst_row);
        },
    );

    Ok(())
}

/// Swaps the outer channels of BGR rows into RGB.
pub(crate) fn bgr24_to_rgb24(
    frame: &DecodedFrame,
    dst: &mut PixelBufferMut,
) -> Result<(), RepackError> {
    shuffle_rgb24_impl::<{ RgbChannels::Bgr as u8 }, { RgbChannels::Rgb as u8 }>(frame, dst)
}

/// Copies RGB rows as they are.
pub(crate) fn rgb24_to_rgb24(
    frame: &DecodedFrame,
    dst: &mut PixelBufferMut,
) -> Result<(), RepackError> {
    shuffle_rgb24_impl::<{ RgbChannels::Rgb as u8 }, { RgbChannels::Rgb as u8 }>(frame, dst)
}

/// Row by row copy of `bytes_per_pixel` wide samples, shared by layouts that
/// need no byte change.
pub(crate) fn copy_rows(
    frame: &DecodedFrame,
    dst: &mut PixelBufferMut,
    layout: PackedLayout,
) -> Result<(), RepackError> {
    frame.check_packed(layout.bytes_per_pixel())?;
    dst.check_constraints(layout, frame.width, frame.height)?;

    let row_bytes = layout.row_bytes(frame.width);
    let src_plane = frame.planes[0];
    let src_stride = frame.strides[0] as usize;
    let dst_stride = dst.stride as usize;

    for_each_row(
        dst.data.borrow_mut(),
        dst_stride,
        frame.height as usize,
        row_bytes,
        |y, dst_row| {
            dst_row.copy_from_slice(plane_row(src_plane, src_stride, y, row_bytes));
        },
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn test_bgr_channels_swap() {
        let src = [1u8, 2, 3, 4, 5, 6, 0xFF, 0xFF];
        let frame = DecodedFrame::packed(&src, 8, 2, 1);
        let mut buffer = PixelBufferMut::alloc(2, 1, PackedLayout::Rgb24);
        bgr24_to_rgb24(&frame, &mut buffer).unwrap();
        assert_eq!(buffer.data.borrow(), &[3, 2, 1, 6, 5, 4]);
    }

    #[test]
    fn test_rgb_copy_respects_strides() {
        let width = 13u32;
        let height = 6u32;
        let src_stride = 13 * 3 + 7;
        let dst_stride = 13 * 3 + 3;
        let mut rng = rand::rng();
        let src: Vec<u8> = (0..src_stride * height as usize)
            .map(|_| rng.random::<u8>())
            .collect();
        let frame = DecodedFrame::packed(&src, src_stride as u32, width, height);
        let mut data = vec![0x5Au8; dst_stride * height as usize];
        let mut buffer = PixelBufferMut::borrowed(&mut data, dst_stride as u32, width, height);
        rgb24_to_rgb24(&frame, &mut buffer).unwrap();
        for (dst_row, src_row) in data.chunks(dst_stride).zip(src.chunks(src_stride)) {
            assert_eq!(&dst_row[..39], &src_row[..39]);
            assert_eq!(&dst_row[39..], &[0x5A; 3]);
        }
    }

    #[test]
    fn test_short_source_is_rejected() {
        let src = [0u8; 5];
        let frame = DecodedFrame::packed(&src, 6, 2, 1);
        let mut buffer = PixelBufferMut::alloc(2, 1, PackedLayout::Rgb24);
        assert!(copy_rows(&frame, &mut buffer, PackedLayout::Rgb24).is_err());
    }
}
