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
use crate::repack_support::RepackChromaSubsample;
use crate::row_iter::{for_each_row, plane_row};
use crate::{DecodedFrame, PackedLayout, PixelBufferMut, RepackError};

/// Repacks planar 4:2:0 with alpha into `v408` (U Y V A per sample).
///
/// Every luma and alpha row is emitted while chroma advances every second row.
/// Each chroma sample is repeated for the two columns it covers.
pub(crate) fn yuva420_to_v408(
    frame: &DecodedFrame,
    dst: &mut PixelBufferMut,
) -> Result<(), RepackError> {
    let chroma_subsampling = RepackChromaSubsample::Yuv420;
    frame.check_planar(chroma_subsampling)?;
    frame.check_alpha()?;
    dst.check_constraints(PackedLayout::V408, frame.width, frame.height)?;

    let width = frame.width as usize;
    let chroma_width = chroma_subsampling.chroma_width(frame.width);
    let [y_plane, u_plane, v_plane, a_plane] = frame.planes;
    let y_stride = frame.strides[0] as usize;
    let u_stride = frame.strides[1] as usize;
    let v_stride = frame.strides[2] as usize;
    let a_stride = frame.strides[3] as usize;
    let dst_stride = dst.stride as usize;

    for_each_row(
        dst.data.borrow_mut(),
        dst_stride,
        frame.height as usize,
        PackedLayout::V408.row_bytes(frame.width),
        |y, dst_row| {
            let y_row = plane_row(y_plane, y_stride, y, width);
            let a_row = plane_row(a_plane, a_stride, y, width);
            let u_row = plane_row(u_plane, u_stride, y >> 1, chroma_width);
            let v_row = plane_row(v_plane, v_stride, y >> 1, chroma_width);

            for (x, ((dst, &y_src), &a_src)) in dst_row
                .chunks_exact_mut(4)
                .zip(y_row.iter())
                .zip(a_row.iter())
                .enumerate()
            {
                dst[0] = u_row[x >> 1];
                dst[1] = y_src;
                dst[2] = v_row[x >> 1];
                dst[3] = a_src;
            }
        },
    );

    Ok(())
}
