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
use crate::sse::sse_support::{
    __mm128x4, _mm_loadu_si128_x2, _mm_store_si128_x4, is_stream_aligned,
};
#[cfg(target_arch = "x86")]
use std::arch::x86::*;
#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

/// Interleaves two luma rows sharing one chroma row into two `2vuy` rows,
/// 32 luma samples at a time.
///
/// Returns the number of luma pairs written, the scalar tail resumes there.
/// Destination rows starting on a 16 byte boundary are written with streaming
/// stores.
#[target_feature(enable = "sse2")]
pub(crate) unsafe fn sse_yuv420_to_uyvy_row_pair(
    y_upper: &[u8],
    y_lower: &[u8],
    u_row: &[u8],
    v_row: &[u8],
    upper: &mut [u8],
    lower: &mut [u8],
) -> usize {
    let lanes = (y_upper.len() / 32)
        .min(y_lower.len() / 32)
        .min(u_row.len() / 16)
        .min(v_row.len() / 16)
        .min(upper.len() / 64)
        .min(lower.len() / 64);

    let stream_upper = is_stream_aligned(upper.as_ptr());
    let stream_lower = is_stream_aligned(lower.as_ptr());

    for lane in 0..lanes {
        let y_pos = lane * 32;
        let uv_pos = lane * 16;
        let dst_pos = lane * 64;

        let y_upper_pixels = _mm_loadu_si128_x2(y_upper.as_ptr().add(y_pos));
        let y_lower_pixels = _mm_loadu_si128_x2(y_lower.as_ptr().add(y_pos));
        let u_pixels = _mm_loadu_si128(u_row.as_ptr().add(uv_pos) as *const __m128i);
        let v_pixels = _mm_loadu_si128(v_row.as_ptr().add(uv_pos) as *const __m128i);

        let chroma_l = _mm_unpacklo_epi8(u_pixels, v_pixels);
        let chroma_h = _mm_unpackhi_epi8(u_pixels, v_pixels);

        let upper_store = __mm128x4(
            _mm_unpacklo_epi8(chroma_l, y_upper_pixels.0),
            _mm_unpackhi_epi8(chroma_l, y_upper_pixels.0),
            _mm_unpacklo_epi8(chroma_h, y_upper_pixels.1),
            _mm_unpackhi_epi8(chroma_h, y_upper_pixels.1),
        );
        let lower_store = __mm128x4(
            _mm_unpacklo_epi8(chroma_l, y_lower_pixels.0),
            _mm_unpackhi_epi8(chroma_l, y_lower_pixels.0),
            _mm_unpacklo_epi8(chroma_h, y_lower_pixels.1),
            _mm_unpackhi_epi8(chroma_h, y_lower_pixels.1),
        );

        _mm_store_si128_x4(upper.as_mut_ptr().add(dst_pos), upper_store, stream_upper);
        _mm_store_si128_x4(lower.as_mut_ptr().add(dst_pos), lower_store, stream_lower);
    }

    lanes * 16
}
