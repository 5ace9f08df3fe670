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
use rand::Rng;
use std::time::Instant;
use tracing_subscriber::EnvFilter;
use yuv_repack::{
    destination_layout_for, select_conversion, store_fence, DecodedFrame, PixelBufferMut,
    PixelFormat,
};

struct SyntheticPlanes {
    planes: [Vec<u8>; 4],
    strides: [u32; 4],
}

fn synthetic_planes(format: PixelFormat, width: u32, height: u32) -> SyntheticPlanes {
    let mut rng = rand::rng();
    let mut noise = |len: usize| (0..len).map(|_| rng.random::<u8>()).collect::<Vec<u8>>();
    let w = width as usize;
    let h = height as usize;
    // 16 bytes of luma padding so 4:2:0 frames pick the vector path
    let y_stride = (w + 16).div_ceil(16) * 16;
    match format {
        PixelFormat::Bgr24 | PixelFormat::Rgb24 => SyntheticPlanes {
            planes: [noise(w * 3 * h), vec![], vec![], vec![]],
            strides: [width * 3, 0, 0, 0],
        },
        PixelFormat::Rgb32 => SyntheticPlanes {
            planes: [noise(w * 4 * h), vec![], vec![], vec![]],
            strides: [width * 4, 0, 0, 0],
        },
        PixelFormat::Rgb555Le | PixelFormat::Rgb555Be => SyntheticPlanes {
            planes: [noise(w * 2 * h), vec![], vec![], vec![]],
            strides: [width * 2, 0, 0, 0],
        },
        PixelFormat::Yuv410p => {
            let (cw, ch) = (w.div_ceil(4), h.div_ceil(4));
            SyntheticPlanes {
                planes: [noise(y_stride * h), noise(cw * ch), noise(cw * ch), vec![]],
                strides: [y_stride as u32, cw as u32, cw as u32, 0],
            }
        }
        PixelFormat::Yuv422p | PixelFormat::Yuvj422p => {
            let cw = w.div_ceil(2);
            SyntheticPlanes {
                planes: [noise(y_stride * h), noise(cw * h), noise(cw * h), vec![]],
                strides: [y_stride as u32, cw as u32, cw as u32, 0],
            }
        }
        _ => {
            let (cw, ch) = (w.div_ceil(2), h.div_ceil(2));
            SyntheticPlanes {
                planes: [
                    noise(y_stride * h),
                    noise(cw * ch),
                    noise(cw * ch),
                    noise(y_stride * h),
                ],
                strides: [y_stride as u32, cw as u32, cw as u32, y_stride as u32],
            }
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "yuv_repack=debug".into()))
        .init();

    let width = 1920u32;
    let height = 1081u32;

    for format in PixelFormat::ALL {
        let layout = match destination_layout_for(format) {
            Ok(layout) => layout,
            Err(err) => {
                println!("{:?}: {}", format, err);
                continue;
            }
        };
        let planes = synthetic_planes(format, width, height);
        let frame = DecodedFrame {
            planes: [
                &planes.planes[0],
                &planes.planes[1],
                &planes.planes[2],
                &planes.planes[3],
            ],
            strides: planes.strides,
            width,
            height,
        };

        let binding = select_conversion(format, Some(&frame))
            .unwrap()
            .binding()
            .unwrap();

        let mut buffer = PixelBufferMut::alloc(width, height, layout);

        let start_time = Instant::now();
        binding.clear(&mut buffer).unwrap();
        println!("{:?} clear time: {:?}", format, start_time.elapsed());

        let start_time = Instant::now();
        binding.convert(&frame, &mut buffer).unwrap();
        if binding.uses_streaming_stores() {
            store_fence();
        }
        println!(
            "{:?} -> {:?} ({:?}) time: {:?}",
            format,
            layout,
            binding.converter,
            start_time.elapsed()
        );
    }
}
