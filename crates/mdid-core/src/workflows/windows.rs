use super::intrinsic_dimension::{self, IdRequest};
use crate::core::models::records::WindowRecord;
use crate::engine::config::WindowConfig;
use crate::engine::context::{AnalysisContext, Verbosity};
use crate::engine::error::EngineError;
use crate::engine::progress::Progress;
use crate::engine::structure::StructuralInput;
use std::ops::Range;
use tracing::{debug, info, instrument};

/// Slides a window of `window_size` residues along the structure in steps of `stride`
/// and estimates the intrinsic dimension of each window.
///
/// Windows are taken over the sorted, deduplicated residue numbers by position, so they
/// are contiguous in that list even when the numbering has gaps. Residues left over at
/// the end that cannot fill a whole window belong to no window. Records are returned in
/// scan order with `start`/`end` set to actual residue numbers.
///
/// # Errors
///
/// Fails with [`EngineError::InvalidWindow`] if `window_size <= 1` and with
/// [`EngineError::InvalidStride`] if `stride == 0`, before the input is resolved.
/// Any error from a window's estimation aborts the scan.
#[instrument(skip_all, name = "window_scan_workflow")]
pub fn run(
    ctx: &AnalysisContext,
    input: StructuralInput<'_>,
    windows: &WindowConfig,
    request: &IdRequest<'_>,
    verbosity: Verbosity,
) -> Result<Vec<WindowRecord>, EngineError> {
    let WindowConfig {
        window_size,
        stride,
    } = *windows;
    if window_size <= 1 {
        return Err(EngineError::InvalidWindow { window_size });
    }
    if stride == 0 {
        return Err(EngineError::InvalidStride { stride });
    }

    let trajectory = input.resolve(ctx.reader)?;
    let residues = trajectory.residue_numbers();
    let bounds = window_bounds(residues.len(), window_size, stride);

    if verbosity.is_verbose() {
        info!(
            "Scanning {} residues with window size {} and stride {}: {} window(s).",
            residues.len(),
            window_size,
            stride,
            bounds.len()
        );
    }
    let covered = bounds.last().map_or(0, |range| range.end);
    if covered < residues.len() {
        let excluded = &residues[covered..];
        if verbosity.is_verbose() {
            info!("Residues {excluded:?} do not fill a complete window and are not analysed.");
        } else {
            debug!(?excluded, "Trailing residues excluded from the window scan.");
        }
    }

    ctx.reporter.report(Progress::ScanStart {
        scan: "windows",
        total_units: bounds.len() as u64,
    });
    let mut records = Vec::with_capacity(bounds.len());
    for range in bounds {
        let window = &residues[range];
        let (start, end) = (window[0], window[window.len() - 1]);
        let sub_structure = trajectory.filter_residues(window);
        let estimate = intrinsic_dimension::run(
            ctx,
            StructuralInput::InMemory(&sub_structure),
            request,
            Verbosity::Quiet,
        )?;
        debug!(start, end, "Window estimated.");
        records.push(WindowRecord {
            start,
            end,
            entire_simulation: estimate.entire_simulation(),
            last_simulation: estimate.last_simulation(),
            instantaneous: estimate.into_instantaneous(),
        });
        ctx.reporter.report(Progress::UnitFinished { start, end });
    }
    ctx.reporter.report(Progress::ScanFinish);

    Ok(records)
}

/// Position ranges of every complete window over `n_residues` residues.
fn window_bounds(n_residues: usize, window_size: usize, stride: usize) -> Vec<Range<usize>> {
    (0..)
        .map(|i| i * stride)
        .take_while(|start| start + window_size <= n_residues)
        .map(|start| start..start + window_size)
        .collect()
}
