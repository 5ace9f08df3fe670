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
use crate::repack_error::{check_destination, check_overflow_v2, check_plane, rows_extent};
use crate::repack_support::RepackChromaSubsample;
use crate::{PackedLayout, PreconditionViolation, RepackError};
use std::fmt::Debug;

#[derive(Debug)]
pub enum BufferStoreMut<'a, T: Copy + Debug> {
    Borrowed(&'a mut [T]),
    Owned(Vec<T>),
}

impl<T: Copy + Debug> BufferStoreMut<'_, T> {
    pub fn borrow(&self) -> &[T] {
        match self {
            Self::Borrowed(p_ref) => p_ref,
            Self::Owned(vec) => vec,
        }
    }

    pub fn borrow_mut(&mut self) -> &mut [T] {
        match self {
            Self::Borrowed(p_ref) => p_ref,
            Self::Owned(vec) => vec,
        }
    }
}

/// Read-only view of a decoded frame.
///
/// Plane order follows the decoder: packed formats use plane 0 only, planar YUV
/// uses Y, U, V in planes 0..3 and the alpha plane in 3. Unused planes are empty.
#[derive(Debug, Copy, Clone)]
pub struct DecodedFrame<'a> {
    pub planes: [&'a [u8]; 4],
    /// Stride here always means bytes per row, per plane.
    pub strides: [u32; 4],
    pub width: u32,
    pub height: u32,
}

impl<'a> DecodedFrame<'a> {
    pub fn packed(data: &'a [u8], stride: u32, width: u32, height: u32) -> Self {
        DecodedFrame {
            planes: [data, &[], &[], &[]],
            strides: [stride, 0, 0, 0],
            width,
            height,
        }
    }

    #[allow(clippy::too_many_arguments)]
    pub fn planar(
        y_plane: &'a [u8],
        y_stride: u32,
        u_plane: &'a [u8],
        u_stride: u32,
        v_plane: &'a [u8],
        v_stride: u32,
        width: u32,
        height: u32,
    ) -> Self {
        DecodedFrame {
            planes: [y_plane, u_plane, v_plane, &[]],
            strides: [y_stride, u_stride, v_stride, 0],
            width,
            height,
        }
    }

    #[allow(clippy::too_many_arguments)]
    pub fn planar_with_alpha(
        y_plane: &'a [u8],
        y_stride: u32,
        u_plane: &'a [u8],
        u_stride: u32,
        v_plane: &'a [u8],
        v_stride: u32,
        a_plane: &'a [u8],
        a_stride: u32,
        width: u32,
        height: u32,
    ) -> Self {
        DecodedFrame {
            planes: [y_plane, u_plane, v_plane, a_plane],
            strides: [y_stride, u_stride, v_stride, a_stride],
            width,
            height,
        }
    }

    /// Row stride of the first plane, the only one alignment decisions look at.
    #[inline]
    pub fn luma_stride(&self) -> u32 {
        self.strides[0]
    }

    pub(crate) fn check_dimensions(&self) -> Result<(), RepackError> {
        if self.width == 0 || self.height == 0 {
            return Err(PreconditionViolation::ZeroBaseSize.into());
        }
        check_overflow_v2(self.width as usize, self.height as usize)?;
        Ok(())
    }

    pub(crate) fn check_packed(&self, bytes_per_pixel: usize) -> Result<(), RepackError> {
        self.check_dimensions()?;
        let row_bytes = check_overflow_v2(self.width as usize, bytes_per_pixel)?;
        check_plane(
            0,
            self.planes[0],
            self.strides[0],
            row_bytes,
            self.height as usize,
        )
    }

    pub(crate) fn check_planar(&self, subsampling: RepackChromaSubsample) -> Result<(), RepackError> {
        self.check_dimensions()?;
        check_plane(
            0,
            self.planes[0],
            self.strides[0],
            self.width as usize,
            self.height as usize,
        )?;
        let chroma_width = subsampling.chroma_width(self.width);
        let chroma_height = subsampling.chroma_height(self.height);
        for plane in 1..3 {
            check_plane(
                plane,
                self.planes[plane],
                self.strides[plane],
                chroma_width,
                chroma_height,
            )?;
        }
        Ok(())
    }

    pub(crate) fn check_alpha(&self) -> Result<(), RepackError> {
        check_plane(
            3,
            self.planes[3],
            self.strides[3],
            self.width as usize,
            self.height as usize,
        )
    }
}

/// Caller owned destination of a repack or clear.
#[derive(Debug)]
pub struct PixelBufferMut<'a> {
    pub data: BufferStoreMut<'a, u8>,
    /// Stride here always means bytes per row.
    pub stride: u32,
    pub width: u32,
    pub height: u32,
}

impl<'a> PixelBufferMut<'a> {
    pub fn borrowed(data: &'a mut [u8], stride: u32, width: u32, height: u32) -> Self {
        PixelBufferMut {
            data: BufferStoreMut::Borrowed(data),
            stride,
            width,
            height,
        }
    }
}

impl PixelBufferMut<'_> {
    /// Allocates a tightly packed destination for `layout`
    pub fn alloc(width: u32, height: u32, layout: PackedLayout) -> Self {
        let stride = layout.row_bytes(width) as u32;
        Self::alloc_with_stride(width, height, stride, layout)
    }

    /// Allocates a destination whose rows are `stride` bytes apart
    pub fn alloc_with_stride(width: u32, height: u32, stride: u32, layout: PackedLayout) -> Self {
        let row_bytes = layout.row_bytes(width);
        let stride = stride.max(row_bytes as u32);
        PixelBufferMut {
            data: BufferStoreMut::Owned(vec![0u8; stride as usize * height as usize]),
            stride,
            width,
            height,
        }
    }

    pub(crate) fn check_constraints(
        &self,
        layout: PackedLayout,
        width: u32,
        height: u32,
    ) -> Result<(), RepackError> {
        if width == 0 || height == 0 {
            return Err(PreconditionViolation::ZeroBaseSize.into());
        }
        if self.width < width || self.height < height {
            return Err(PreconditionViolation::DestinationTooSmall {
                frame: (width, height),
                destination: (self.width, self.height),
            }
            .into());
        }
        let row_bytes = check_overflow_v2(width as usize, layout.bytes_per_pixel())?;
        check_destination(self.data.borrow(), self.stride, row_bytes, height as usize)
    }

    /// Borrows a `width` x `height` window starting at column `x`, row `y`.
    ///
    /// Used to paint the parts of a destination that a smaller frame leaves
    /// uncovered. In [PackedLayout::Uyvy422] the window must start on an even
    /// column so it does not split a chroma pair.
    pub fn sub_region(
        &mut self,
        layout: PackedLayout,
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    ) -> Result<PixelBufferMut<'_>, RepackError> {
        self.check_constraints(layout, self.width, self.height)?;
        if width == 0 || height == 0 {
            return Err(PreconditionViolation::ZeroBaseSize.into());
        }
        let right = x.checked_add(width);
        let bottom = y.checked_add(height);
        match (right, bottom) {
            (Some(right), Some(bottom)) if right <= self.width && bottom <= self.height => {}
            _ => return Err(PreconditionViolation::RegionOutOfBounds.into()),
        }
        if layout == PackedLayout::Uyvy422 && x & 1 != 0 {
            return Err(PreconditionViolation::UnalignedRegion { x }.into());
        }
        let offset = rows_extent(self.stride as usize, y as usize + 1, layout.row_bytes(x))?;
        let stride = self.stride;
        Ok(PixelBufferMut::borrowed(
            &mut self.data.borrow_mut()[offset..],
            stride,
            width,
            height,
        ))
    }
}
