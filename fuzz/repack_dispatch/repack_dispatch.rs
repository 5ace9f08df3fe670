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

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use yuv_repack::{
    destination_layout_for, select_conversion_for_tag, store_fence, DecodedFrame,
    PixelBufferMut, RepackError,
};

#[derive(Arbitrary, Debug)]
struct RepackInput {
    tag: u8,
    width: u8,
    height: u8,
    strides: [u8; 4],
    dst_padding: u8,
    sample: u8,
}

fuzz_target!(|input: RepackInput| {
    fuzz_dispatch(input);
});

fn fuzz_dispatch(input: RepackInput) {
    let width = input.width as u32;
    let height = input.height as u32;
    // planes sized from the fuzzed strides, undersized ones must be rejected
    let planes: Vec<Vec<u8>> = input
        .strides
        .iter()
        .map(|&stride| vec![input.sample; stride as usize * input.height as usize])
        .collect();
    let frame = DecodedFrame {
        planes: [&planes[0], &planes[1], &planes[2], &planes[3]],
        strides: input.strides.map(|s| s as u32),
        width,
        height,
    };

    let plan = match select_conversion_for_tag(input.tag, Some(&frame)) {
        Ok(plan) => plan,
        Err(RepackError::UnsupportedFormat(_)) | Err(RepackError::UnknownFormatTag(_)) => return,
        Err(err) => panic!("selection failed with {}", err),
    };
    let binding = plan.binding().unwrap();
    let layout = binding.layout();
    if let Ok(format) = input.tag.try_into() {
        assert_eq!(destination_layout_for(format), Ok(layout));
    }

    if width == 0 || height == 0 {
        return;
    }
    let stride = layout.row_bytes(width) + input.dst_padding as usize;
    let mut buffer = PixelBufferMut::alloc_with_stride(width, height, stride as u32, layout);
    binding.clear(&mut buffer).unwrap();
    match binding.convert(&frame, &mut buffer) {
        Ok(()) => {
            if binding.uses_streaming_stores() {
                store_fence();
            }
        }
        Err(RepackError::Precondition(_)) => {}
        Err(err) => panic!("conversion failed with {}", err),
    }
}
