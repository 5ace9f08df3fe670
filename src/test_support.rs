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
use crate::repack_support::RepackChromaSubsample;
use crate::DecodedFrame;
use rand::Rng;

/// Owned planes for building [DecodedFrame]s in tests.
pub(crate) struct PlanarFixture {
    pub(crate) planes: [Vec<u8>; 4],
    pub(crate) strides: [u32; 4],
    pub(crate) width: u32,
    pub(crate) height: u32,
}

fn random_plane(stride: usize, rows: usize) -> Vec<u8> {
    let mut rng = rand::rng();
    (0..stride * rows).map(|_| rng.random::<u8>()).collect()
}

impl PlanarFixture {
    /// Random YUV planes, each row padded by `padding` bytes of noise.
    pub(crate) fn random(
        width: u32,
        height: u32,
        subsampling: RepackChromaSubsample,
        padding: usize,
        with_alpha: bool,
    ) -> Self {
        let chroma_width = subsampling.chroma_width(width);
        let chroma_height = subsampling.chroma_height(height);
        let y_stride = width as usize + padding;
        let uv_stride = chroma_width + padding;
        let a_stride = if with_alpha { y_stride } else { 0 };
        PlanarFixture {
            planes: [
                random_plane(y_stride, height as usize),
                random_plane(uv_stride, chroma_height),
                random_plane(uv_stride, chroma_height),
                random_plane(a_stride, height as usize),
            ],
            strides: [
                y_stride as u32,
                uv_stride as u32,
                uv_stride as u32,
                a_stride as u32,
            ],
            width,
            height,
        }
    }

    /// Planes filled with constant `y`, `u`, `v` and `a` samples.
    pub(crate) fn filled(
        width: u32,
        height: u32,
        subsampling: RepackChromaSubsample,
        samples: [u8; 4],
    ) -> Self {
        let chroma_width = subsampling.chroma_width(width);
        let chroma_height = subsampling.chroma_height(height);
        let luma_size = width as usize * height as usize;
        let chroma_size = chroma_width * chroma_height;
        PlanarFixture {
            planes: [
                vec![samples[0]; luma_size],
                vec![samples[1]; chroma_size],
                vec![samples[2]; chroma_size],
                vec![samples[3]; luma_size],
            ],
            strides: [width, chroma_width as u32, chroma_width as u32, width],
            width,
            height,
        }
    }

    pub(crate) fn frame(&self) -> DecodedFrame<'_> {
        DecodedFrame {
            planes: [
                &self.planes[0],
                &self.planes[1],
                &self.planes[2],
                &self.planes[3],
            ],
            strides: self.strides,
            width: self.width,
            height: self.height,
        }
    }
}

/// Buffer of `len` bytes whose slice starting at the returned offset is
/// 16 byte aligned, or deliberately misaligned by one byte.
pub(crate) fn aligned_storage(len: usize, misaligned: bool) -> (Vec<u8>, usize) {
    let storage = vec![0u8; len + 32];
    let mut offset = storage.as_ptr().align_offset(16);
    if misaligned {
        offset += 1;
    }
    (storage, offset)
}
