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
#[cfg(all(target_arch = "aarch64", target_feature = "neon"))]
use crate::neon::neon_yuv420_to_uyvy_row_pair;
use crate::repack_support::RepackChromaSubsample;
use crate::row_iter::{for_each_row, for_each_row_pair, plane_row};
#[cfg(any(
    all(any(target_arch = "x86", target_arch = "x86_64"), feature = "sse"),
    all(target_arch = "aarch64", target_feature = "neon")
))]
use crate::simd_capability;
#[cfg(all(any(target_arch = "x86", target_arch = "x86_64"), feature = "sse"))]
use crate::sse::sse_yuv420_to_uyvy_row_pair;
#[cfg(all(
    any(target_arch = "x86", target_arch = "x86_64"),
    feature = "sse",
    feature = "rayon"
))]
use crate::store_fence;
use crate::{DecodedFrame, PackedLayout, PixelBufferMut, RepackError};

/// One `2vuy` row from a luma row and the chroma row it shares.
///
/// A trailing odd luma column has no chroma partner and is not written.
#[inline(always)]
fn pack_uyvy_row(y_row: &[u8], u_row: &[u8], v_row: &[u8], dst: &mut [u8]) {
    for (((dst, y_src), &u), &v) in dst
        .chunks_exact_mut(4)
        .zip(y_row.chunks_exact(2))
        .zip(u_row.iter())
        .zip(v_row.iter())
    {
        dst[0] = u;
        dst[1] = y_src[0];
        dst[2] = v;
        dst[3] = y_src[1];
    }
}

/// Two `2vuy` rows sharing one chroma row, as 4:2:0 lays them out.
#[inline(always)]
fn pack_uyvy_row_pair(
    y_upper: &[u8],
    y_lower: &[u8],
    u_row: &[u8],
    v_row: &[u8],
    upper: &mut [u8],
    lower: &mut [u8],
) {
    for ((((dst_upper, dst_lower), (y_up, y_low)), &u), &v) in upper
        .chunks_exact_mut(4)
        .zip(lower.chunks_exact_mut(4))
        .zip(y_upper.chunks_exact(2).zip(y_lower.chunks_exact(2)))
        .zip(u_row.iter())
        .zip(v_row.iter())
    {
        dst_upper[0] = u;
        dst_upper[1] = y_up[0];
        dst_upper[2] = v;
        dst_upper[3] = y_up[1];

        dst_lower[0] = u;
        dst_lower[1] = y_low[0];
        dst_lower[2] = v;
        dst_lower[3] = y_low[1];
    }
}

fn yuv420_to_uyvy_impl<const VECTORIZED: bool>(
    frame: &DecodedFrame,
    dst: &mut PixelBufferMut,
) -> Result<(), RepackError> {
    let chroma_subsampling = RepackChromaSubsample::Yuv420;
    frame.check_planar(chroma_subsampling)?;
    dst.check_constraints(PackedLayout::Uyvy422, frame.width, frame.height)?;

    let width = frame.width as usize;
    let height = frame.height as usize;
    let chroma_width = chroma_subsampling.chroma_width(frame.width);
    let row_bytes = PackedLayout::Uyvy422.row_bytes(frame.width);

    let [y_plane, u_plane, v_plane, _] = frame.planes;
    let y_stride = frame.strides[0] as usize;
    let u_stride = frame.strides[1] as usize;
    let v_stride = frame.strides[2] as usize;
    let dst_stride = dst.stride as usize;
    let dst_store = dst.data.borrow_mut();

    #[cfg(all(any(target_arch = "x86", target_arch = "x86_64"), feature = "sse"))]
    let _use_sse = VECTORIZED && simd_capability().sse2;
    #[cfg(all(target_arch = "aarch64", target_feature = "neon"))]
    let _use_neon = VECTORIZED && simd_capability().neon;

    for_each_row_pair(
        dst_store,
        dst_stride,
        height / 2,
        row_bytes,
        |pair, upper, lower| {
            let y_upper = plane_row(y_plane, y_stride, pair * 2, width);
            let y_lower = plane_row(y_plane, y_stride, pair * 2 + 1, width);
            let u_row = plane_row(u_plane, u_stride, pair, chroma_width);
            let v_row = plane_row(v_plane, v_stride, pair, chroma_width);

            #[allow(unused_mut)]
            let mut _processed = 0usize;

            #[cfg(all(any(target_arch = "x86", target_arch = "x86_64"), feature = "sse"))]
            {
                if _use_sse {
                    // SAFETY: sse2 availability was probed, every slice bounds its lanes.
                    _processed = unsafe {
                        sse_yuv420_to_uyvy_row_pair(y_upper, y_lower, u_row, v_row, upper, lower)
                    };
                    #[cfg(feature = "rayon")]
                    {
                        // workers do not outlive this call, their stores must be ordered here
                        store_fence();
                    }
                }
            }

            #[cfg(all(target_arch = "aarch64", target_feature = "neon"))]
            {
                if _use_neon {
                    _processed = unsafe {
                        neon_yuv420_to_uyvy_row_pair(y_upper, y_lower, u_row, v_row, upper, lower)
                    };
                }
            }

            pack_uyvy_row_pair(
                &y_upper[_processed * 2..],
                &y_lower[_processed * 2..],
                &u_row[_processed..],
                &v_row[_processed..],
                &mut upper[_processed * 4..],
                &mut lower[_processed * 4..],
            );
        },
    );

    if height & 1 != 0 {
        // No partner row: the last chroma row is reused as is.
        let last = height - 1;
        let y_row = plane_row(y_plane, y_stride, last, width);
        let u_row = plane_row(u_plane, u_stride, last / 2, chroma_width);
        let v_row = plane_row(v_plane, v_stride, last / 2, chroma_width);
        let start = last * dst_stride;
        pack_uyvy_row(
            y_row,
            u_row,
            v_row,
            &mut dst_store[start..start + row_bytes],
        );
    }

    Ok(())
}

/// Repacks planar 4:2:0 into `2vuy` one sample at a time.
///
/// Any luma stride is accepted. An odd final luma row reuses the last chroma row.
pub(crate) fn yuv420_to_uyvy_scalar(
    frame: &DecodedFrame,
    dst: &mut PixelBufferMut,
) -> Result<(), RepackError> {
    yuv420_to_uyvy_impl::<false>(frame, dst)
}

/// Repacks planar 4:2:0 into `2vuy` with the vector unit, 32 luma columns per step.
///
/// Produces the same bytes as [yuv420_to_uyvy_scalar]. On x86 aligned destination
/// rows are written with streaming stores and need [crate::store_fence] before
/// being handed over.
pub(crate) fn yuv420_to_uyvy_vectorized(
    frame: &DecodedFrame,
    dst: &mut PixelBufferMut,
) -> Result<(), RepackError> {
    yuv420_to_uyvy_impl::<true>(frame, dst)
}

/// Repacks planar 4:1:0 into `2vuy`.
///
/// Chroma advances every fourth row and each chroma sample serves two luma pairs.
/// This is a layout upsample only, nothing is interpolated.
pub(crate) fn yuv410_to_uyvy(
    frame: &DecodedFrame,
    dst: &mut PixelBufferMut,
) -> Result<(), RepackError> {
    let chroma_subsampling = RepackChromaSubsample::Yuv410;
    frame.check_planar(chroma_subsampling)?;
    dst.check_constraints(PackedLayout::Uyvy422, frame.width, frame.height)?;

    let width = frame.width as usize;
    let chroma_width = chroma_subsampling.chroma_width(frame.width);
    let [y_plane, u_plane, v_plane, _] = frame.planes;
    let y_stride = frame.strides[0] as usize;
    let u_stride = frame.strides[1] as usize;
    let v_stride = frame.strides[2] as usize;
    let dst_stride = dst.stride as usize;

    for_each_row(
        dst.data.borrow_mut(),
        dst_stride,
        frame.height as usize,
        PackedLayout::Uyvy422.row_bytes(frame.width),
        |y, dst_row| {
            let y_row = plane_row(y_plane, y_stride, y, width);
            let u_row = plane_row(u_plane, u_stride, y >> 2, chroma_width);
            let v_row = plane_row(v_plane, v_stride, y >> 2, chroma_width);

            for (x, (dst, y_src)) in dst_row
                .chunks_exact_mut(4)
                .zip(y_row.chunks_exact(2))
                .enumerate()
            {
                dst[0] = u_row[x >> 1];
                dst[1] = y_src[0];
                dst[2] = v_row[x >> 1];
                dst[3] = y_src[1];
            }
        },
    );

    Ok(())
}

/// Repacks planar 4:2:2 into `2vuy`, a straight interleave row by row.
pub(crate) fn yuv422_to_uyvy(
    frame: &DecodedFrame,
    dst: &mut PixelBufferMut,
) -> Result<(), RepackError> {
    let chroma_subsampling = RepackChromaSubsample::Yuv422;
    frame.check_planar(chroma_subsampling)?;
    dst.check_constraints(PackedLayout::Uyvy422, frame.width, frame.height)?;

    let width = frame.width as usize;
    let chroma_width = chroma_subsampling.chroma_width(frame.width);
    let [y_plane, u_plane, v_plane, _] = frame.planes;
    let y_stride = frame.strides[0] as usize;
    let u_stride = frame.strides[1] as usize;
    let v_stride = frame.strides[2] as usize;
    let dst_stride = dst.stride as usize;

    for_each_row(
        dst.data.borrow_mut(),
        dst_stride,
        frame.height as usize,
        PackedLayout::Uyvy422.row_bytes(frame.width),
        |y, dst_row| {
            pack_uyvy_row(
                plane_row(y_plane, y_stride, y, width),
                plane_row(u_plane, u_stride, y, chroma_width),
                plane_row(v_plane, v_stride, y, chroma_width),
                dst_row,
            );
        },
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{aligned_storage, PlanarFixture};
    use crate::{PreconditionViolation, UYVY_CLEAR_PATTERN};

    fn expected_uyvy(fixture: &PlanarFixture, subsampling: RepackChromaSubsample) -> Vec<u8> {
        let width = fixture.width as usize;
        let height = fixture.height as usize;
        let mut out = vec![0u8; width * 2 * height];
        for y in 0..height {
            let chroma_y = match subsampling {
                RepackChromaSubsample::Yuv410 => y / 4,
                RepackChromaSubsample::Yuv420 => y / 2,
                RepackChromaSubsample::Yuv422 => y,
            };
            for x in 0..width / 2 {
                let chroma_x = match subsampling {
                    RepackChromaSubsample::Yuv410 => x / 2,
                    _ => x,
                };
                let y_pos = y * fixture.strides[0] as usize + x * 2;
                let u_pos = chroma_y * fixture.strides[1] as usize + chroma_x;
                let v_pos = chroma_y * fixture.strides[2] as usize + chroma_x;
                let dst = y * width * 2 + x * 4;
                out[dst] = fixture.planes[1][u_pos];
                out[dst + 1] = fixture.planes[0][y_pos];
                out[dst + 2] = fixture.planes[2][v_pos];
                out[dst + 3] = fixture.planes[0][y_pos + 1];
            }
        }
        out
    }

    fn convert_tight(
        fixture: &PlanarFixture,
        converter: fn(&DecodedFrame, &mut PixelBufferMut) -> Result<(), RepackError>,
    ) -> Vec<u8> {
        let mut buffer = PixelBufferMut::alloc(fixture.width, fixture.height, PackedLayout::Uyvy422);
        converter(&fixture.frame(), &mut buffer).unwrap();
        crate::store_fence();
        buffer.data.borrow().to_vec()
    }

    #[test]
    fn test_yuv420_matches_reference() {
        for (width, height) in [(2u32, 2u32), (6, 4), (16, 5), (40, 7), (66, 3)] {
            let fixture = PlanarFixture::random(width, height, RepackChromaSubsample::Yuv420, 3, false);
            let expected = expected_uyvy(&fixture, RepackChromaSubsample::Yuv420);
            assert_eq!(convert_tight(&fixture, yuv420_to_uyvy_scalar), expected);
            assert_eq!(convert_tight(&fixture, yuv420_to_uyvy_vectorized), expected);
        }
    }

    #[test]
    fn test_vectorized_matches_scalar() {
        let widths = [2u32, 4, 30, 32, 34, 62, 64, 66, 96, 100, 128, 130, 258];
        let heights = [1u32, 2, 3, 7, 16];
        for &width in widths.iter() {
            for &height in heights.iter() {
                for padding in [0usize, 16 - width as usize % 16] {
                    let fixture =
                        PlanarFixture::random(width, height, RepackChromaSubsample::Yuv420, padding, false);
                    let frame = fixture.frame();
                    let row_bytes = PackedLayout::Uyvy422.row_bytes(width);
                    let stride = row_bytes.div_ceil(16) * 16 + 16;
                    let len = stride * height as usize;

                    let mut scalar = vec![0u8; len];
                    let mut scalar_buffer =
                        PixelBufferMut::borrowed(&mut scalar, stride as u32, width, height);
                    yuv420_to_uyvy_scalar(&frame, &mut scalar_buffer).unwrap();

                    for misaligned in [false, true] {
                        let (mut storage, offset) = aligned_storage(len, misaligned);
                        let mut vector_buffer = PixelBufferMut::borrowed(
                            &mut storage[offset..offset + len],
                            stride as u32,
                            width,
                            height,
                        );
                        yuv420_to_uyvy_vectorized(&frame, &mut vector_buffer).unwrap();
                        crate::store_fence();
                        assert_eq!(
                            &storage[offset..offset + len],
                            scalar.as_slice(),
                            "width {}, height {}, padding {}, misaligned {}",
                            width,
                            height,
                            padding,
                            misaligned
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_odd_height_last_row_reuses_chroma() {
        let fixture = PlanarFixture::random(8, 5, RepackChromaSubsample::Yuv420, 0, false);
        let out = convert_tight(&fixture, yuv420_to_uyvy_scalar);
        let last = &out[4 * 16..];
        for x in 0..4 {
            assert_eq!(last[x * 4], fixture.planes[1][2 * 4 + x]);
            assert_eq!(last[x * 4 + 1], fixture.planes[0][4 * 8 + x * 2]);
            assert_eq!(last[x * 4 + 2], fixture.planes[2][2 * 4 + x]);
            assert_eq!(last[x * 4 + 3], fixture.planes[0][4 * 8 + x * 2 + 1]);
        }
    }

    #[test]
    fn test_black_frame_equals_cleared_buffer() {
        let fixture = PlanarFixture::filled(64, 6, RepackChromaSubsample::Yuv420, [0x10, 0x80, 0x80, 0]);
        let converted = convert_tight(&fixture, yuv420_to_uyvy_vectorized);
        let cleared: Vec<u8> = UYVY_CLEAR_PATTERN
            .iter()
            .copied()
            .cycle()
            .take(converted.len())
            .collect();
        assert_eq!(converted, cleared);
    }

    #[test]
    fn test_odd_width_drops_trailing_column() {
        let fixture = PlanarFixture::random(5, 2, RepackChromaSubsample::Yuv422, 0, false);
        let mut buffer = PixelBufferMut::alloc(5, 2, PackedLayout::Uyvy422);
        buffer.data.borrow_mut().fill(0xCD);
        yuv422_to_uyvy(&fixture.frame(), &mut buffer).unwrap();
        let out = buffer.data.borrow();
        assert_eq!(&out[8..10], &[0xCD, 0xCD]);
        assert_eq!(out[0], fixture.planes[1][0]);
        assert_eq!(out[10 + 1], fixture.planes[0][5]);
    }

    #[test]
    fn test_destination_padding_is_untouched() {
        let fixture = PlanarFixture::random(34, 4, RepackChromaSubsample::Yuv420, 2, false);
        let stride = 34 * 2 + 10;
        let mut data = vec![0xEEu8; stride * 4];
        let mut buffer = PixelBufferMut::borrowed(&mut data, stride as u32, 34, 4);
        yuv420_to_uyvy_vectorized(&fixture.frame(), &mut buffer).unwrap();
        crate::store_fence();
        for row in data.chunks(stride) {
            assert!(row[68..].iter().all(|&b| b == 0xEE));
        }
    }

    #[test]
    fn test_yuv410_and_yuv422_match_reference() {
        for (width, height) in [(4u32, 4u32), (10, 9), (36, 8)] {
            let fixture = PlanarFixture::random(width, height, RepackChromaSubsample::Yuv410, 1, false);
            assert_eq!(
                convert_tight(&fixture, yuv410_to_uyvy),
                expected_uyvy(&fixture, RepackChromaSubsample::Yuv410)
            );
            let fixture = PlanarFixture::random(width, height, RepackChromaSubsample::Yuv422, 1, false);
            assert_eq!(
                convert_tight(&fixture, yuv422_to_uyvy),
                expected_uyvy(&fixture, RepackChromaSubsample::Yuv422)
            );
        }
    }

    #[test]
    fn test_failed_validation_writes_nothing() {
        let fixture = PlanarFixture::random(8, 4, RepackChromaSubsample::Yuv420, 0, false);
        let mut frame = fixture.frame();
        frame.planes[2] = &fixture.planes[2][..3];
        let mut buffer = PixelBufferMut::alloc(8, 4, PackedLayout::Uyvy422);
        let result = yuv420_to_uyvy_vectorized(&frame, &mut buffer);
        assert!(matches!(
            result,
            Err(RepackError::Precondition(
                PreconditionViolation::PlaneSizeMismatch { plane: 2, .. }
            ))
        ));
        assert!(buffer.data.borrow().iter().all(|&b| b == 0));
    }
}
