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
#[cfg(target_arch = "x86")]
use std::arch::x86::*;
#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

#[inline(always)]
pub(crate) unsafe fn _mm_loadu_si128_x2(ptr: *const u8) -> (__m128i, __m128i) {
    (
        _mm_loadu_si128(ptr as *const __m128i),
        _mm_loadu_si128(ptr.add(16) as *const __m128i),
    )
}

#[allow(non_camel_case_types)]
#[derive(Copy, Clone)]
pub(crate) struct __mm128x4(pub(crate) __m128i, pub(crate) __m128i, pub(crate) __m128i, pub(crate) __m128i);

#[inline(always)]
pub(crate) fn is_stream_aligned(ptr: *const u8) -> bool {
    ptr as usize % 16 == 0
}

/// Writes 64 bytes at `ptr`.
///
/// With `streaming` set the stores bypass the cache, `ptr` must then be 16 byte
/// aligned and the caller owes a [crate::store_fence] before the bytes are read
/// elsewhere.
#[inline]
#[target_feature(enable = "sse2")]
pub(crate) unsafe fn _mm_store_si128_x4(ptr: *mut u8, vals: __mm128x4, streaming: bool) {
    if streaming {
        _mm_stream_si128(ptr as *mut __m128i, vals.0);
        _mm_stream_si128(ptr.add(16) as *mut __m128i, vals.1);
        _mm_stream_si128(ptr.add(32) as *mut __m128i, vals.2);
        _mm_stream_si128(ptr.add(48) as *mut __m128i, vals.3);
    } else {
        _mm_storeu_si128(ptr as *mut __m128i, vals.0);
        _mm_storeu_si128(ptr.add(16) as *mut __m128i, vals.1);
        _mm_storeu_si128(ptr.add(32) as *mut __m128i, vals.2);
        _mm_storeu_si128(ptr.add(48) as *mut __m128i, vals.3);
    }
}
