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
use crate::clear::{clear_rgb16, clear_rgb24, clear_rgb32, clear_uyvy, clear_v408};
use crate::rgb_endian::{rgb32_to_argb32, rgb555le_to_rgb555be};
use crate::shuffle::{bgr24_to_rgb24, copy_rows, rgb24_to_rgb24};
use crate::yuv_to_2vuy::{
    yuv410_to_uyvy, yuv420_to_uyvy_scalar, yuv420_to_uyvy_vectorized, yuv422_to_uyvy,
};
use crate::yuva_to_v408::yuva420_to_v408;
use crate::{
    simd_capability, DecodedFrame, PackedLayout, PixelBufferMut, PixelFormat, RepackError,
    VECTOR_ALIGNMENT,
};

/// Repack routine bound for a source format.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Converter {
    Bgr24ToRgb24,
    Rgb24ToRgb24,
    /// Host endian xRGB to big endian ARGB
    Rgb32ToArgb32,
    Rgb555LeToRgb555Be,
    Rgb555BeToRgb555Be,
    /// 4:2:0 to `2vuy`, any luma stride
    Yuv420ToUyvyScalar,
    /// 4:2:0 to `2vuy` on the vector unit, selected for 16 byte multiple luma strides
    Yuv420ToUyvyVectorized,
    Yuv410ToUyvy,
    Yuv422ToUyvy,
    Yuva420ToV408,
}

impl Converter {
    /// Layout the destination buffer must have.
    pub const fn layout(&self) -> PackedLayout {
        match self {
            Converter::Bgr24ToRgb24 | Converter::Rgb24ToRgb24 => PackedLayout::Rgb24,
            Converter::Rgb32ToArgb32 => PackedLayout::Argb32,
            Converter::Rgb555LeToRgb555Be | Converter::Rgb555BeToRgb555Be => {
                PackedLayout::Rgb555Be
            }
            Converter::Yuv420ToUyvyScalar
            | Converter::Yuv420ToUyvyVectorized
            | Converter::Yuv410ToUyvy
            | Converter::Yuv422ToUyvy => PackedLayout::Uyvy422,
            Converter::Yuva420ToV408 => PackedLayout::V408,
        }
    }

    /// Whether this converter may leave weakly ordered streaming stores behind,
    /// in which case [crate::store_fence] must run before the destination is
    /// handed to another thread or subsystem.
    pub fn uses_streaming_stores(&self) -> bool {
        *self == Converter::Yuv420ToUyvyVectorized && simd_capability().streams_stores()
    }

    /// Repacks `frame` into the top-left `frame.width` x `frame.height` of `dst`.
    ///
    /// Descriptors are validated before anything is written, a rejected call
    /// leaves `dst` as it was.
    pub fn convert(&self, frame: &DecodedFrame, dst: &mut PixelBufferMut) -> Result<(), RepackError> {
        match self {
            Converter::Bgr24ToRgb24 => bgr24_to_rgb24(frame, dst),
            Converter::Rgb24ToRgb24 => rgb24_to_rgb24(frame, dst),
            Converter::Rgb32ToArgb32 => rgb32_to_argb32(frame, dst),
            Converter::Rgb555LeToRgb555Be => rgb555le_to_rgb555be(frame, dst),
            Converter::Rgb555BeToRgb555Be => copy_rows(frame, dst, PackedLayout::Rgb555Be),
            Converter::Yuv420ToUyvyScalar => yuv420_to_uyvy_scalar(frame, dst),
            Converter::Yuv420ToUyvyVectorized => yuv420_to_uyvy_vectorized(frame, dst),
            Converter::Yuv410ToUyvy => yuv410_to_uyvy(frame, dst),
            Converter::Yuv422ToUyvy => yuv422_to_uyvy(frame, dst),
            Converter::Yuva420ToV408 => yuva420_to_v408(frame, dst),
        }
    }
}

/// Fills a destination region with the blank pixel of its layout.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum RegionClearer {
    /// All zero, 3 bytes per pixel
    Rgb24,
    /// All zero, 4 bytes per pixel
    Rgb32,
    /// All zero, 2 bytes per pixel
    Rgb16,
    /// Repeats [crate::UYVY_CLEAR_PATTERN]
    Uyvy422,
    /// Repeats [crate::V408_CLEAR_PATTERN]
    V408,
}

impl RegionClearer {
    pub const fn layout(&self) -> PackedLayout {
        match self {
            RegionClearer::Rgb24 => PackedLayout::Rgb24,
            RegionClearer::Rgb32 => PackedLayout::Argb32,
            RegionClearer::Rgb16 => PackedLayout::Rgb555Be,
            RegionClearer::Uyvy422 => PackedLayout::Uyvy422,
            RegionClearer::V408 => PackedLayout::V408,
        }
    }

    /// Clears `dst.width` x `dst.height`, stride padding is left alone.
    pub fn clear(&self, dst: &mut PixelBufferMut) -> Result<(), RepackError> {
        match self {
            RegionClearer::Rgb24 => clear_rgb24(dst),
            RegionClearer::Rgb32 => clear_rgb32(dst),
            RegionClearer::Rgb16 => clear_rgb16(dst),
            RegionClearer::Uyvy422 => clear_uyvy(dst),
            RegionClearer::V408 => clear_v408(dst),
        }
    }
}

/// Converter and clearer picked for one source format.
///
/// Bindings hold no state and may be shared by any number of threads, each
/// converting into its own destination.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct ConversionBinding {
    pub converter: Converter,
    pub clear: RegionClearer,
}

impl ConversionBinding {
    #[inline]
    pub fn convert(&self, frame: &DecodedFrame, dst: &mut PixelBufferMut) -> Result<(), RepackError> {
        self.converter.convert(frame, dst)
    }

    #[inline]
    pub fn clear(&self, dst: &mut PixelBufferMut) -> Result<(), RepackError> {
        self.clear.clear(dst)
    }

    #[inline]
    pub const fn layout(&self) -> PackedLayout {
        self.converter.layout()
    }

    /// See [Converter::uses_streaming_stores].
    #[inline]
    pub fn uses_streaming_stores(&self) -> bool {
        self.converter.uses_streaming_stores()
    }
}

/// Outcome of [select_conversion].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ConversionPlan {
    Ready(ConversionBinding),
    /// The converter depends on the first decoded frame, select again once it
    /// is available. The destination can already be cleared.
    AwaitingFrame { clear: RegionClearer },
}

impl ConversionPlan {
    pub fn binding(&self) -> Option<ConversionBinding> {
        match self {
            ConversionPlan::Ready(binding) => Some(*binding),
            ConversionPlan::AwaitingFrame { .. } => None,
        }
    }

    pub fn clearer(&self) -> RegionClearer {
        match self {
            ConversionPlan::Ready(binding) => binding.clear,
            ConversionPlan::AwaitingFrame { clear } => *clear,
        }
    }
}

#[derive(Debug, Copy, Clone)]
enum ConverterChoice {
    Fixed(Converter),
    /// Picked by the luma stride of a sample frame.
    StrideAligned {
        aligned: Converter,
        unaligned: Converter,
    },
}

#[derive(Debug, Copy, Clone)]
struct FormatEntry {
    layout: PackedLayout,
    clear: RegionClearer,
    converter: ConverterChoice,
}

impl FormatEntry {
    const fn fixed(layout: PackedLayout, clear: RegionClearer, converter: Converter) -> Self {
        FormatEntry {
            layout,
            clear,
            converter: ConverterChoice::Fixed(converter),
        }
    }
}

static DISPATCH_TABLE: [Option<FormatEntry>; PixelFormat::COUNT] = build_dispatch_table();

const fn build_dispatch_table() -> [Option<FormatEntry>; PixelFormat::COUNT] {
    let mut table: [Option<FormatEntry>; PixelFormat::COUNT] = [None; PixelFormat::COUNT];

    table[PixelFormat::Bgr24 as usize] = Some(FormatEntry::fixed(
        PackedLayout::Rgb24,
        RegionClearer::Rgb24,
        Converter::Bgr24ToRgb24,
    ));
    table[PixelFormat::Rgb24 as usize] = Some(FormatEntry::fixed(
        PackedLayout::Rgb24,
        RegionClearer::Rgb24,
        Converter::Rgb24ToRgb24,
    ));
    table[PixelFormat::Rgb32 as usize] = Some(FormatEntry::fixed(
        PackedLayout::Argb32,
        RegionClearer::Rgb32,
        Converter::Rgb32ToArgb32,
    ));
    table[PixelFormat::Rgb555Le as usize] = Some(FormatEntry::fixed(
        PackedLayout::Rgb555Be,
        RegionClearer::Rgb16,
        Converter::Rgb555LeToRgb555Be,
    ));
    table[PixelFormat::Rgb555Be as usize] = Some(FormatEntry::fixed(
        PackedLayout::Rgb555Be,
        RegionClearer::Rgb16,
        Converter::Rgb555BeToRgb555Be,
    ));
    table[PixelFormat::Yuv410p as usize] = Some(FormatEntry::fixed(
        PackedLayout::Uyvy422,
        RegionClearer::Uyvy422,
        Converter::Yuv410ToUyvy,
    ));

    let yuv420 = Some(FormatEntry {
        layout: PackedLayout::Uyvy422,
        clear: RegionClearer::Uyvy422,
        converter: ConverterChoice::StrideAligned {
            aligned: Converter::Yuv420ToUyvyVectorized,
            unaligned: Converter::Yuv420ToUyvyScalar,
        },
    });
    table[PixelFormat::Yuv420p as usize] = yuv420;
    table[PixelFormat::Yuvj420p as usize] = yuv420;

    let yuv422 = Some(FormatEntry::fixed(
        PackedLayout::Uyvy422,
        RegionClearer::Uyvy422,
        Converter::Yuv422ToUyvy,
    ));
    table[PixelFormat::Yuv422p as usize] = yuv422;
    table[PixelFormat::Yuvj422p as usize] = yuv422;

    table[PixelFormat::Yuva420p as usize] = Some(FormatEntry::fixed(
        PackedLayout::V408,
        RegionClearer::V408,
        Converter::Yuva420ToV408,
    ));

    table
}

#[inline]
fn format_entry(format: PixelFormat) -> Result<FormatEntry, RepackError> {
    match DISPATCH_TABLE[format as usize] {
        Some(entry) => Ok(entry),
        None => {
            tracing::warn!(?format, "pixel format has no repack conversion");
            Err(RepackError::UnsupportedFormat(format))
        }
    }
}

/// Packed layout a destination buffer must be created with for `format`.
pub fn destination_layout_for(format: PixelFormat) -> Result<PackedLayout, RepackError> {
    format_entry(format).map(|entry| entry.layout)
}

/// Picks the converter and clearer for `format`.
///
/// 4:2:0 sources choose between the scalar and the vectorized converter by the
/// luma stride of `sample`: the vectorized one is bound only when the stride is
/// a multiple of [VECTOR_ALIGNMENT] and a vector unit is present. Without a
/// sample frame the choice is deferred and [ConversionPlan::AwaitingFrame]
/// carries the clearer alone. Other formats ignore `sample`.
///
/// # Example
///
/// ```
/// use yuv_repack::{select_conversion, ConversionPlan, PixelFormat, RegionClearer};
///
/// let plan = select_conversion(PixelFormat::Yuv420p, None).unwrap();
/// assert_eq!(plan, ConversionPlan::AwaitingFrame { clear: RegionClearer::Uyvy422 });
/// ```
pub fn select_conversion(
    format: PixelFormat,
    sample: Option<&DecodedFrame>,
) -> Result<ConversionPlan, RepackError> {
    let entry = format_entry(format)?;
    let converter = match entry.converter {
        ConverterChoice::Fixed(converter) => converter,
        ConverterChoice::StrideAligned { aligned, unaligned } => match sample {
            Some(frame) => {
                let luma_stride = frame.luma_stride() as usize;
                if luma_stride % VECTOR_ALIGNMENT == 0 && simd_capability().has_vector_unit() {
                    aligned
                } else {
                    unaligned
                }
            }
            None => {
                tracing::debug!(?format, "converter deferred until first decoded frame");
                return Ok(ConversionPlan::AwaitingFrame { clear: entry.clear });
            }
        },
    };
    tracing::debug!(
        ?format,
        layout = ?entry.layout,
        ?converter,
        luma_stride = ?sample.map(|frame| frame.luma_stride()),
        "selected repack conversion"
    );
    Ok(ConversionPlan::Ready(ConversionBinding {
        converter,
        clear: entry.clear,
    }))
}

/// [select_conversion] for a raw decoder format tag.
pub fn select_conversion_for_tag(
    tag: u8,
    sample: Option<&DecodedFrame>,
) -> Result<ConversionPlan, RepackError> {
    let format = PixelFormat::try_from(tag).inspect_err(|_| {
        tracing::warn!(tag, "unknown pixel format tag");
    })?;
    select_conversion(format, sample)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repack_support::RepackChromaSubsample;
    use crate::test_support::PlanarFixture;
    use crate::{store_fence, UYVY_CLEAR_PATTERN};
    use std::sync::mpsc;

    const UNSUPPORTED: [PixelFormat; 6] = [
        PixelFormat::Nv12,
        PixelFormat::Nv21,
        PixelFormat::Yuv444p,
        PixelFormat::Gray8,
        PixelFormat::Yuyv422,
        PixelFormat::Rgb565Le,
    ];

    #[test]
    fn test_unsupported_formats_are_rejected() {
        for format in UNSUPPORTED {
            assert_eq!(
                select_conversion(format, None),
                Err(RepackError::UnsupportedFormat(format))
            );
            assert_eq!(
                destination_layout_for(format),
                Err(RepackError::UnsupportedFormat(format))
            );
        }
        assert_eq!(
            select_conversion_for_tag(200, None),
            Err(RepackError::UnknownFormatTag(200))
        );
    }

    #[test]
    fn test_supported_formats_have_consistent_layouts() {
        for format in PixelFormat::ALL {
            if UNSUPPORTED.contains(&format) {
                continue;
            }
            let layout = destination_layout_for(format).unwrap();
            let plan = select_conversion(format, None).unwrap();
            assert_eq!(plan.clearer().layout(), layout, "{:?}", format);
            if let Some(binding) = plan.binding() {
                assert_eq!(binding.layout(), layout, "{:?}", format);
            }
        }
        assert_eq!(
            destination_layout_for(PixelFormat::Yuva420p),
            Ok(PackedLayout::V408)
        );
        assert_eq!(
            destination_layout_for(PixelFormat::Yuvj422p),
            Ok(PackedLayout::Uyvy422)
        );
        assert_eq!(
            destination_layout_for(PixelFormat::Rgb32),
            Ok(PackedLayout::Argb32)
        );
    }

    #[test]
    fn test_yuv420_selection_is_deferred_without_frame() {
        for format in [PixelFormat::Yuv420p, PixelFormat::Yuvj420p] {
            assert_eq!(
                select_conversion(format, None),
                Ok(ConversionPlan::AwaitingFrame {
                    clear: RegionClearer::Uyvy422
                })
            );
        }
        let plan = select_conversion(PixelFormat::Yuv422p, None).unwrap();
        assert_eq!(
            plan.binding().map(|binding| binding.converter),
            Some(Converter::Yuv422ToUyvy)
        );
    }

    #[test]
    fn test_yuv420_selection_follows_luma_stride() {
        let aligned = PlanarFixture::random(48, 4, RepackChromaSubsample::Yuv420, 16, false);
        let unaligned = PlanarFixture::random(48, 4, RepackChromaSubsample::Yuv420, 2, false);
        let pick = |fixture: &PlanarFixture| {
            select_conversion(PixelFormat::Yuv420p, Some(&fixture.frame()))
                .unwrap()
                .binding()
                .unwrap()
                .converter
        };
        assert_eq!(pick(&unaligned), Converter::Yuv420ToUyvyScalar);
        let expected = if simd_capability().has_vector_unit() {
            Converter::Yuv420ToUyvyVectorized
        } else {
            Converter::Yuv420ToUyvyScalar
        };
        assert_eq!(pick(&aligned), expected);
        assert!(!Converter::Yuv420ToUyvyScalar.uses_streaming_stores());
    }

    #[test]
    fn test_frame_smaller_than_destination() {
        let fixture = PlanarFixture::random(6, 3, RepackChromaSubsample::Yuv422, 0, false);
        let binding = select_conversion(PixelFormat::Yuv422p, Some(&fixture.frame()))
            .unwrap()
            .binding()
            .unwrap();
        let mut buffer = PixelBufferMut::alloc(10, 4, PackedLayout::Uyvy422);
        buffer.data.borrow_mut().fill(0xFF);
        binding.convert(&fixture.frame(), &mut buffer).unwrap();
        {
            let mut right = buffer.sub_region(PackedLayout::Uyvy422, 6, 0, 4, 4).unwrap();
            binding.clear(&mut right).unwrap();
        }
        {
            let mut bottom = buffer.sub_region(PackedLayout::Uyvy422, 0, 3, 6, 1).unwrap();
            binding.clear(&mut bottom).unwrap();
        }
        let data = buffer.data.borrow();
        assert_eq!(&data[12..20], &[0x80, 0x10, 0x80, 0x10, 0x80, 0x10, 0x80, 0x10]);
        assert_eq!(data[0], fixture.planes[1][0]);
        assert_eq!(data[1], fixture.planes[0][0]);
        let last_row = &data[3 * 20..];
        assert!(last_row
            .iter()
            .zip(UYVY_CLEAR_PATTERN.iter().cycle())
            .all(|(a, b)| a == b));
    }

    #[test]
    fn test_shared_binding_across_threads() {
        let fixture = PlanarFixture::random(96, 8, RepackChromaSubsample::Yuv420, 0, false);
        let frame = fixture.frame();
        let binding = select_conversion(PixelFormat::Yuv420p, Some(&frame))
            .unwrap()
            .binding()
            .unwrap();
        let mut reference = PixelBufferMut::alloc(96, 8, PackedLayout::Uyvy422);
        Converter::Yuv420ToUyvyScalar
            .convert(&frame, &mut reference)
            .unwrap();

        let outputs: Vec<Vec<u8>> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..4)
                .map(|_| {
                    scope.spawn(|| {
                        let mut buffer = PixelBufferMut::alloc(96, 8, binding.layout());
                        binding.convert(&frame, &mut buffer).unwrap();
                        if binding.uses_streaming_stores() {
                            store_fence();
                        }
                        buffer.data.borrow().to_vec()
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });
        for output in outputs {
            assert_eq!(output.as_slice(), reference.data.borrow());
        }
    }

    #[test]
    fn test_fenced_buffer_handoff() {
        let fixture = PlanarFixture::random(64, 6, RepackChromaSubsample::Yuv420, 0, false);
        let (sender, receiver) = mpsc::channel::<Vec<u8>>();
        let producer_planes = fixture.planes.clone();
        let strides = fixture.strides;
        let producer = std::thread::spawn(move || {
            let frame = DecodedFrame {
                planes: [
                    &producer_planes[0],
                    &producer_planes[1],
                    &producer_planes[2],
                    &producer_planes[3],
                ],
                strides,
                width: 64,
                height: 6,
            };
            let binding = select_conversion(PixelFormat::Yuvj420p, Some(&frame))
                .unwrap()
                .binding()
                .unwrap();
            let mut storage = vec![0u8; 64 * 2 * 6];
            let mut buffer = PixelBufferMut::borrowed(&mut storage, 128, 64, 6);
            binding.convert(&frame, &mut buffer).unwrap();
            if binding.uses_streaming_stores() {
                store_fence();
            }
            sender.send(storage).unwrap();
        });
        let received = receiver.recv().unwrap();
        producer.join().unwrap();

        let mut expected = PixelBufferMut::alloc(64, 6, PackedLayout::Uyvy422);
        Converter::Yuv420ToUyvyScalar
            .convert(&fixture.frame(), &mut expected)
            .unwrap();
        assert_eq!(received.as_slice(), expected.data.borrow());
    }
}
