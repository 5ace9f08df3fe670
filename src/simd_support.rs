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
use std::sync::atomic::{fence, Ordering};
use std::sync::OnceLock;

/// Luma stride multiple at which the 4:2:0 fast path is selected.
pub const VECTOR_ALIGNMENT: usize = 16;

/// Vector units usable by the repack kernels on this machine.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct SimdCapability {
    pub sse2: bool,
    pub neon: bool,
}

impl SimdCapability {
    #[inline]
    pub const fn has_vector_unit(&self) -> bool {
        self.sse2 || self.neon
    }

    /// Whether the vector kernels write with cache bypassing stores.
    #[inline]
    pub const fn streams_stores(&self) -> bool {
        self.sse2
    }
}

static CAPABILITY: OnceLock<SimdCapability> = OnceLock::new();

/// Cached result of the one-time capability probe.
pub fn simd_capability() -> SimdCapability {
    *CAPABILITY.get_or_init(probe_capability)
}

fn probe_capability() -> SimdCapability {
    #[allow(unused_mut)]
    let mut capability = SimdCapability::default();
    #[cfg(all(any(target_arch = "x86", target_arch = "x86_64"), feature = "sse"))]
    {
        capability.sse2 = std::arch::is_x86_feature_detected!("sse2");
    }
    #[cfg(all(target_arch = "aarch64", target_feature = "neon"))]
    {
        capability.neon = true;
    }
    tracing::debug!(
        sse2 = capability.sse2,
        neon = capability.neon,
        "probed vector units for repack kernels"
    );
    capability
}

/// Orders every streaming store issued by this thread before later memory
/// operations.
///
/// The 4:2:0 fast path on x86 writes the destination with non-temporal stores,
/// which are weakly ordered. Call this after such a conversion (see
/// [crate::ConversionBinding::uses_streaming_stores]) and before the
/// destination is read by another thread or handed to another subsystem.
#[inline]
pub fn store_fence() {
    #[cfg(target_arch = "x86_64")]
    #[allow(unused_unsafe)]
    unsafe {
        std::arch::x86_64::_mm_sfence();
    }
    #[cfg(target_arch = "x86")]
    {
        if std::arch::is_x86_feature_detected!("sse") {
            #[allow(unused_unsafe)]
            unsafe {
                std::arch::x86::_mm_sfence();
            }
        }
    }
    fence(Ordering::SeqCst);
}
