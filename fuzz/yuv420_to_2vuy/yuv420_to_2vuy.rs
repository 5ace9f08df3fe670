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
#![no_main]

use libfuzzer_sys::fuzz_target;
use yuv_repack::{store_fence, Converter, DecodedFrame, PackedLayout, PixelBufferMut};

fuzz_target!(|data: (u8, u8, u8, u8, u8)| {
    fuzz_yuv_420(data.0, data.1, data.2, data.3, data.4);
});

fn fuzz_yuv_420(i_width: u8, i_height: u8, y_padding: u8, dst_padding: u8, seed: u8) {
    if i_height == 0 || i_width == 0 {
        return;
    }
    let width = i_width as usize;
    let height = i_height as usize;
    let y_stride = width + y_padding as usize;
    let uv_width = width.div_ceil(2);
    let uv_height = height.div_ceil(2);

    let y_plane: Vec<u8> = (0..y_stride * height)
        .map(|i| (i as u8).wrapping_mul(31).wrapping_add(seed))
        .collect();
    let u_plane: Vec<u8> = (0..uv_width * uv_height)
        .map(|i| (i as u8).wrapping_mul(17) ^ seed)
        .collect();
    let v_plane: Vec<u8> = (0..uv_width * uv_height)
        .map(|i| (i as u8).wrapping_add(seed.rotate_left(3)))
        .collect();

    let frame = DecodedFrame::planar(
        &y_plane,
        y_stride as u32,
        &u_plane,
        uv_width as u32,
        &v_plane,
        uv_width as u32,
        width as u32,
        height as u32,
    );

    let dst_stride = PackedLayout::Uyvy422.row_bytes(width as u32) + dst_padding as usize;

    let mut scalar = PixelBufferMut::alloc_with_stride(
        width as u32,
        height as u32,
        dst_stride as u32,
        PackedLayout::Uyvy422,
    );
    let mut vectorized = PixelBufferMut::alloc_with_stride(
        width as u32,
        height as u32,
        dst_stride as u32,
        PackedLayout::Uyvy422,
    );

    Converter::Yuv420ToUyvyScalar
        .convert(&frame, &mut scalar)
        .unwrap();
    Converter::Yuv420ToUyvyVectorized
        .convert(&frame, &mut vectorized)
        .unwrap();
    store_fence();

    assert_eq!(scalar.data.borrow(), vectorized.data.borrow());
}
