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
use std::arch::aarch64::*;

/// NEON counterpart of the SSE2 row pair kernel, plain stores only.
///
/// Returns the number of luma pairs written.
pub(crate) unsafe fn neon_yuv420_to_uyvy_row_pair(
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

    for lane in 0..lanes {
        let y_pos = lane * 32;
        let uv_pos = lane * 16;
        let dst_pos = lane * 64;

        // de-interleaves into even and odd luma columns
        let y_upper_pixels = vld2q_u8(y_upper.as_ptr().add(y_pos));
        let y_lower_pixels = vld2q_u8(y_lower.as_ptr().add(y_pos));
        let u_pixels = vld1q_u8(u_row.as_ptr().add(uv_pos));
        let v_pixels = vld1q_u8(v_row.as_ptr().add(uv_pos));

        vst4q_u8(
            upper.as_mut_ptr().add(dst_pos),
            uint8x16x4_t(u_pixels, y_upper_pixels.0, v_pixels, y_upper_pixels.1),
        );
        vst4q_u8(
            lower.as_mut_ptr().add(dst_pos),
            uint8x16x4_t(u_pixels, y_lower_pixels.0, v_pixels, y_lower_pixels.1),
        );
    }

    lanes * 16
}
