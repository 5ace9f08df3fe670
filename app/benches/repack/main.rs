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
use criterion::{criterion_group, criterion_main, Criterion};
use rand::Rng;
use yuv_repack::{
    select_conversion, Converter, DecodedFrame, PackedLayout, PixelBufferMut, PixelFormat,
    RegionClearer,
};

fn noise(len: usize) -> Vec<u8> {
    let mut rng = rand::rng();
    (0..len).map(|_| rng.random::<u8>()).collect()
}

pub fn criterion_benchmark(c: &mut Criterion) {
    let width = 1920u32;
    let height = 1080u32;
    let w = width as usize;
    let h = height as usize;

    let y_plane = noise(w * h);
    let u_plane = noise(w / 2 * h);
    let v_plane = noise(w / 2 * h);
    let a_plane = noise(w * h);
    let rgb_plane = noise(w * 4 * h);

    let frame420 = DecodedFrame::planar(
        &y_plane, width, &u_plane, width / 2, &v_plane, width / 2, width, height,
    );
    let frame422 = frame420;
    let frame_alpha = DecodedFrame::planar_with_alpha(
        &y_plane, width, &u_plane, width / 2, &v_plane, width / 2, &a_plane, width, width, height,
    );
    let frame_bgr = DecodedFrame::packed(&rgb_plane, width * 3, width, height);
    let frame_rgb32 = DecodedFrame::packed(&rgb_plane, width * 4, width, height);

    let mut uyvy = PixelBufferMut::alloc(width, height, PackedLayout::Uyvy422);
    let mut v408 = PixelBufferMut::alloc(width, height, PackedLayout::V408);
    let mut rgb24 = PixelBufferMut::alloc(width, height, PackedLayout::Rgb24);
    let mut argb = PixelBufferMut::alloc(width, height, PackedLayout::Argb32);

    let selected = select_conversion(PixelFormat::Yuv420p, Some(&frame420))
        .unwrap()
        .binding()
        .unwrap();

    c.bench_function("yuv repack: YUV 4:2:0 -> 2vuy (selected)", |b| {
        b.iter(|| {
            selected.convert(&frame420, &mut uyvy).unwrap();
        })
    });

    c.bench_function("yuv repack: YUV 4:2:0 -> 2vuy (scalar)", |b| {
        b.iter(|| {
            Converter::Yuv420ToUyvyScalar
                .convert(&frame420, &mut uyvy)
                .unwrap();
        })
    });

    c.bench_function("yuv repack: YUV 4:2:2 -> 2vuy", |b| {
        b.iter(|| {
            Converter::Yuv422ToUyvy
                .convert(&frame422, &mut uyvy)
                .unwrap();
        })
    });

    c.bench_function("yuv repack: YUVA 4:2:0 -> v408", |b| {
        b.iter(|| {
            Converter::Yuva420ToV408
                .convert(&frame_alpha, &mut v408)
                .unwrap();
        })
    });

    c.bench_function("yuv repack: BGR24 -> RGB24", |b| {
        b.iter(|| {
            Converter::Bgr24ToRgb24
                .convert(&frame_bgr, &mut rgb24)
                .unwrap();
        })
    });

    c.bench_function("yuv repack: RGB32 -> ARGB big endian", |b| {
        b.iter(|| {
            Converter::Rgb32ToArgb32
                .convert(&frame_rgb32, &mut argb)
                .unwrap();
        })
    });

    c.bench_function("yuv repack: clear 2vuy", |b| {
        b.iter(|| {
            RegionClearer::Uyvy422.clear(&mut uyvy).unwrap();
        })
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
