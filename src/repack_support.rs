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
use crate::RepackError;

#[repr(u8)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
/// Pixel format of a decoded frame as handed over by the decoder.
///
/// Only a fixed subset is repackable, see [crate::destination_layout_for].
pub enum PixelFormat {
    /// Packed 24-bit, B G R byte order
    Bgr24 = 0,
    /// Packed 24-bit, R G B byte order
    Rgb24 = 1,
    /// Packed 32-bit xRGB word in host endianness
    Rgb32 = 2,
    /// Packed 16-bit x1R5G5B5 word, little endian
    Rgb555Le = 3,
    /// Packed 16-bit x1R5G5B5 word, big endian
    Rgb555Be = 4,
    /// Planar YUV, chroma shared by a 4x4 luma block
    Yuv410p = 5,
    /// Planar YUV, chroma shared by a 2x2 luma block
    Yuv420p = 6,
    /// Full range (JPEG) variant of [PixelFormat::Yuv420p]
    Yuvj420p = 7,
    /// Planar YUV, chroma shared by two horizontal luma samples
    Yuv422p = 8,
    /// Full range (JPEG) variant of [PixelFormat::Yuv422p]
    Yuvj422p = 9,
    /// Planar YUV 4:2:0 with a full resolution alpha plane
    Yuva420p = 10,
    Nv12 = 11,
    Nv21 = 12,
    Yuv444p = 13,
    Gray8 = 14,
    Yuyv422 = 15,
    Rgb565Le = 16,
}

impl PixelFormat {
    pub(crate) const COUNT: usize = 17;

    /// Every known format tag, supported or not.
    pub const ALL: [PixelFormat; PixelFormat::COUNT] = [
        PixelFormat::Bgr24,
        PixelFormat::Rgb24,
        PixelFormat::Rgb32,
        PixelFormat::Rgb555Le,
        PixelFormat::Rgb555Be,
        PixelFormat::Yuv410p,
        PixelFormat::Yuv420p,
        PixelFormat::Yuvj420p,
        PixelFormat::Yuv422p,
        PixelFormat::Yuvj422p,
        PixelFormat::Yuva420p,
        PixelFormat::Nv12,
        PixelFormat::Nv21,
        PixelFormat::Yuv444p,
        PixelFormat::Gray8,
        PixelFormat::Yuyv422,
        PixelFormat::Rgb565Le,
    ];

    /// Number of planes a frame of this format carries.
    pub const fn plane_count(&self) -> usize {
        match self {
            PixelFormat::Bgr24
            | PixelFormat::Rgb24
            | PixelFormat::Rgb32
            | PixelFormat::Rgb555Le
            | PixelFormat::Rgb555Be
            | PixelFormat::Gray8
            | PixelFormat::Yuyv422
            | PixelFormat::Rgb565Le => 1,
            PixelFormat::Nv12 | PixelFormat::Nv21 => 2,
            PixelFormat::Yuv410p
            | PixelFormat::Yuv420p
            | PixelFormat::Yuvj420p
            | PixelFormat::Yuv422p
            | PixelFormat::Yuvj422p
            | PixelFormat::Yuv444p => 3,
            PixelFormat::Yuva420p => 4,
        }
    }
}

impl TryFrom<u8> for PixelFormat {
    type Error = RepackError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        PixelFormat::ALL
            .get(value as usize)
            .copied()
            .ok_or(RepackError::UnknownFormatTag(value))
    }
}

#[repr(u8)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
/// Packed layouts accepted by the presentation side.
pub enum PackedLayout {
    /// 3 bytes per pixel, R G B
    Rgb24 = 0,
    /// 4 bytes per pixel, A R G B words stored big endian
    Argb32 = 1,
    /// 2 bytes per pixel, x1R5G5B5 words stored big endian
    Rgb555Be = 2,
    /// `2vuy`: U Y0 V Y1, two luma samples share one chroma pair
    Uyvy422 = 3,
    /// `v408`: U Y V A, one group per sample
    V408 = 4,
}

impl PackedLayout {
    #[inline]
    pub const fn bytes_per_pixel(&self) -> usize {
        match self {
            PackedLayout::Rgb24 => 3,
            PackedLayout::Argb32 | PackedLayout::V408 => 4,
            PackedLayout::Rgb555Be | PackedLayout::Uyvy422 => 2,
        }
    }

    /// Bytes a row of `width` pixels occupies, excluding stride padding.
    #[inline]
    pub const fn row_bytes(&self, width: u32) -> usize {
        width as usize * self.bytes_per_pixel()
    }

    /// QuickTime style pixel format code.
    pub const fn os_type(&self) -> u32 {
        match self {
            PackedLayout::Rgb24 => 24,
            PackedLayout::Argb32 => 32,
            PackedLayout::Rgb555Be => 16,
            PackedLayout::Uyvy422 => u32::from_be_bytes(*b"2vuy"),
            PackedLayout::V408 => u32::from_be_bytes(*b"v408"),
        }
    }
}

#[repr(u8)]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum RepackChromaSubsample {
    Yuv410 = 0,
    Yuv420 = 1,
    Yuv422 = 2,
}

impl From<u8> for RepackChromaSubsample {
    #[inline(always)]
    fn from(value: u8) -> Self {
        match value {
            0 => RepackChromaSubsample::Yuv410,
            1 => RepackChromaSubsample::Yuv420,
            2 => RepackChromaSubsample::Yuv422,
            _ => {
                panic!("Unknown value")
            }
        }
    }
}

impl RepackChromaSubsample {
    #[inline]
    pub(crate) const fn chroma_width(&self, width: u32) -> usize {
        match self {
            RepackChromaSubsample::Yuv410 => (width as usize).div_ceil(4),
            RepackChromaSubsample::Yuv420 | RepackChromaSubsample::Yuv422 => {
                (width as usize).div_ceil(2)
            }
        }
    }

    #[inline]
    pub(crate) const fn chroma_height(&self, height: u32) -> usize {
        match self {
            RepackChromaSubsample::Yuv410 => (height as usize).div_ceil(4),
            RepackChromaSubsample::Yuv420 => (height as usize).div_ceil(2),
            RepackChromaSubsample::Yuv422 => height as usize,
        }
    }
}

#[repr(u8)]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum RgbChannels {
    Rgb = 0,
    Bgr = 1,
}

impl From<u8> for RgbChannels {
    #[inline(always)]
    fn from(value: u8) -> Self {
        match value {
            0 => RgbChannels::Rgb,
            1 => RgbChannels::Bgr,
            _ => {
                panic!("Unknown value")
            }
        }
    }
}

impl RgbChannels {
    #[inline(always)]
    pub(crate) const fn get_r_channel_offset(&self) -> usize {
        match self {
            RgbChannels::Rgb => 0,
            RgbChannels::Bgr => 2,
        }
    }

    #[inline(always)]
    pub(crate) const fn get_g_channel_offset(&self) -> usize {
        1
    }

    #[inline(always)]
    pub(crate) const fn get_b_channel_offset(&self) -> usize {
        match self {
            RgbChannels::Rgb => 2,
            RgbChannels::Bgr => 0,
        }
    }
}

#[repr(u8)]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
/// Byte order of packed RGB words in a decoded frame.
pub(crate) enum WordOrder {
    Native = 0,
    LittleEndian = 1,
}

impl From<u8> for WordOrder {
    #[inline(always)]
    fn from(value: u8) -> Self {
        match value {
            0 => WordOrder::Native,
            1 => WordOrder::LittleEndian,
            _ => {
                panic!("Unknown value")
            }
        }
    }
}
