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
#![deny(deprecated)]
#![deny(unreachable_code, unused)]
mod clear;
mod dispatch;
mod images;
#[cfg(all(target_arch = "aarch64", target_feature = "neon"))]
mod neon;
mod repack_error;
mod repack_support;
mod rgb_endian;
mod row_iter;
mod shuffle;
mod simd_support;
#[cfg(all(any(target_arch = "x86", target_arch = "x86_64"), feature = "sse"))]
mod sse;
#[cfg(test)]
mod test_support;
mod yuv_to_2vuy;
mod yuva_to_v408;

pub use images::{BufferStoreMut, DecodedFrame, PixelBufferMut};
pub use repack_error::{MismatchedSize, PreconditionViolation, RepackError};
pub use repack_support::{PackedLayout, PixelFormat};

pub use clear::{UYVY_CLEAR_PATTERN, V408_CLEAR_PATTERN};
pub use simd_support::{simd_capability, store_fence, SimdCapability, VECTOR_ALIGNMENT};

pub use dispatch::destination_layout_for;
pub use dispatch::select_conversion;
pub use dispatch::select_conversion_for_tag;
pub use dispatch::{ConversionBinding, ConversionPlan, Converter, RegionClearer};
