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
use crate::PixelFormat;
use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug, Copy, Clone, Ord, PartialOrd, Eq, PartialEq)]
pub struct MismatchedSize {
    pub expected: usize,
    pub received: usize,
}

/// Caller supplied descriptors that cannot be repacked without reading or
/// writing out of bounds.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum PreconditionViolation {
    ZeroBaseSize,
    PointerOverflow,
    /// Plane row stride is shorter than the bytes a row occupies.
    PlaneStrideTooSmall {
        plane: usize,
        size: MismatchedSize,
    },
    /// Plane slice is shorter than its stride and row count require.
    PlaneSizeMismatch {
        plane: usize,
        size: MismatchedSize,
    },
    DestinationStrideTooSmall(MismatchedSize),
    DestinationSizeMismatch(MismatchedSize),
    /// Destination dimensions are smaller than the frame being repacked into it.
    DestinationTooSmall {
        frame: (u32, u32),
        destination: (u32, u32),
    },
    RegionOutOfBounds,
    /// Packed 4:2:2 regions must start on a chroma pair.
    UnalignedRegion {
        x: u32,
    },
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum RepackError {
    /// No conversion exists for this format; permanent for the configuration.
    UnsupportedFormat(PixelFormat),
    /// Raw tag does not name any [PixelFormat].
    UnknownFormatTag(u8),
    Precondition(PreconditionViolation),
}

impl Display for PreconditionViolation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            PreconditionViolation::ZeroBaseSize => f.write_str("Zero sized images is not supported"),
            PreconditionViolation::PointerOverflow => {
                f.write_str("Image size overflow pointer capabilities")
            }
            PreconditionViolation::PlaneStrideTooSmall { plane, size } => f.write_fmt(format_args!(
                "Plane {} stride must be at least {}, but it was {}",
                plane, size.expected, size.received
            )),
            PreconditionViolation::PlaneSizeMismatch { plane, size } => f.write_fmt(format_args!(
                "Plane {} have invalid size, it must be at least {}, but it was {}",
                plane, size.expected, size.received
            )),
            PreconditionViolation::DestinationStrideTooSmall(size) => f.write_fmt(format_args!(
                "Destination stride must be at least {} but it is {}",
                size.expected, size.received
            )),
            PreconditionViolation::DestinationSizeMismatch(size) => f.write_fmt(format_args!(
                "Destination must have size at least {} but it is {}",
                size.expected, size.received
            )),
            PreconditionViolation::DestinationTooSmall { frame, destination } => {
                f.write_fmt(format_args!(
                    "Destination {}x{} cannot hold a {}x{} frame",
                    destination.0, destination.1, frame.0, frame.1
                ))
            }
            PreconditionViolation::RegionOutOfBounds => {
                f.write_str("Region exceeds destination dimensions")
            }
            PreconditionViolation::UnalignedRegion { x } => f.write_fmt(format_args!(
                "Packed 4:2:2 region must start on an even column, got {}",
                x
            )),
        }
    }
}

impl Display for RepackError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            RepackError::UnsupportedFormat(format) => f.write_fmt(format_args!(
                "Pixel format {:?} cannot be repacked into any supported layout",
                format
            )),
            RepackError::UnknownFormatTag(tag) => {
                f.write_fmt(format_args!("Unknown pixel format tag {}", tag))
            }
            RepackError::Precondition(violation) => Display::fmt(violation, f),
        }
    }
}

impl Error for PreconditionViolation {}

impl Error for RepackError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            RepackError::Precondition(violation) => Some(violation),
            _ => None,
        }
    }
}

impl From<PreconditionViolation> for RepackError {
    fn from(value: PreconditionViolation) -> Self {
        RepackError::Precondition(value)
    }
}

#[inline]
pub(crate) fn check_overflow_v2(v0: usize, v1: usize) -> Result<usize, RepackError> {
    v0.checked_mul(v1)
        .ok_or(RepackError::Precondition(PreconditionViolation::PointerOverflow))
}

/// Bytes spanned by `rows` rows of `row_bytes` spaced `stride` apart. The last
/// row is not required to carry its padding.
#[inline]
pub(crate) fn rows_extent(stride: usize, rows: usize, row_bytes: usize) -> Result<usize, RepackError> {
    check_overflow_v2(stride, rows.saturating_sub(1))?
        .checked_add(row_bytes)
        .ok_or(RepackError::Precondition(PreconditionViolation::PointerOverflow))
}

#[inline]
pub(crate) fn check_plane(
    plane: usize,
    data: &[u8],
    stride: u32,
    row_bytes: usize,
    rows: usize,
) -> Result<(), RepackError> {
    if (stride as usize) < row_bytes {
        return Err(PreconditionViolation::PlaneStrideTooSmall {
            plane,
            size: MismatchedSize {
                expected: row_bytes,
                received: stride as usize,
            },
        }
        .into());
    }
    let required = rows_extent(stride as usize, rows, row_bytes)?;
    if data.len() < required {
        return Err(PreconditionViolation::PlaneSizeMismatch {
            plane,
            size: MismatchedSize {
                expected: required,
                received: data.len(),
            },
        }
        .into());
    }
    Ok(())
}

#[inline]
pub(crate) fn check_destination(
    data: &[u8],
    stride: u32,
    row_bytes: usize,
    rows: usize,
) -> Result<(), RepackError> {
    if (stride as usize) < row_bytes {
        return Err(
            PreconditionViolation::DestinationStrideTooSmall(MismatchedSize {
                expected: row_bytes,
                received: stride as usize,
            })
            .into(),
        );
    }
    let required = rows_extent(stride as usize, rows, row_bytes)?;
    if data.len() < required {
        return Err(
            PreconditionViolation::DestinationSizeMismatch(MismatchedSize {
                expected: required,
                received: data.len(),
            })
            .into(),
        );
    }
    Ok(())
}
