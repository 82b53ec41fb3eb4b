//! Presentation seam between the generated table and its renderers.

use tracing::{info, warn};

use crate::table::OutputTable;

/// Something that presents an [`OutputTable`] (a chart, a report).
///
/// Rendering is a separate step from generation: a failing renderer never
/// invalidates the table it was given.
pub trait Renderer {
    /// Error returned when presentation fails.
    type Error: std::error::Error;

    /// Presents `table`.
    fn render(&mut self, table: &OutputTable) -> Result<(), Self::Error>;

    /// Short name used in log messages.
    fn name(&self) -> &str {
        "renderer"
    }
}

/// Runs `renderer` on `table`, logging any failure at `warn` instead of
/// propagating it.
///
/// Returns `true` if rendering succeeded.
pub fn render_detached<R: Renderer + ?Sized>(renderer: &mut R, table: &OutputTable) -> bool {
    match renderer.render(table) {
        Ok(()) => {
            info!(renderer = renderer.name(), "rendered");
            true
        }
        Err(e) => {
            warn!(renderer = renderer.name(), error = %e, "rendering failed; table kept");
            false
        }
    }
}
